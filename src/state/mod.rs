//! Client-side session state.
//!
//! DESIGN
//! ======
//! `role` holds the closed set of account kinds and the storage/API naming
//! derived from them. `session` holds the `Session` value and the shared
//! `SessionStore` context that is the only writer of it.

pub mod role;
pub mod session;

pub use role::{ROLE_KEY, Role, UnknownRole};
pub use session::{Session, SessionStore};
