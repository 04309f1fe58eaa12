//! # vpn-panel
//!
//! Client core for the VPN reselling admin panel: session state for the
//! two operator roles (superadmin, admin), the route table with its
//! navigation guard, an authenticated HTTP client, and thin services over
//! the backend's superadmin and admin endpoints.
//!
//! The session is an explicit `SessionStore` handed to the client and the
//! services; there is no global state. The `vpn-panel` binary drives the
//! same pieces from the command line.

pub mod config;
pub mod net;
pub mod router;
pub mod services;
pub mod state;
pub mod storage;
