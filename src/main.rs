use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

use vpn_panel::config::{ConfigError, PanelConfig, normalize_base_url};
use vpn_panel::net::{ApiClient, ApiError, ReqwestTransport};
use vpn_panel::router::{NavigationError, RouteName, login_for, navigate};
use vpn_panel::services::types::{AdminUpdate, NewAdmin, NewPlan, NewVpnUser, PlanUpdate};
use vpn_panel::services::{AdminService, AuthError, AuthService, Credentials, Page, SuperadminService};
use vpn_panel::state::{Role, Session, SessionStore};
use vpn_panel::storage::{DurableStorage, FileStorage, MemoryStorage, StorageError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{}", .0.user_message())]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("access to {path} denied; redirected to {redirect} ({})", .redirect.path())]
    Denied { path: String, redirect: RouteName },
}

#[derive(Parser, Debug)]
#[command(name = "vpn-panel", about = "VPN reselling panel console")]
struct Cli {
    #[arg(long, env = "PANEL_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "PANEL_STORAGE_PATH")]
    storage_path: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Keep the session in memory only")]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        role: RoleArg,
        #[arg(long)]
        username: String,
        #[arg(long, env = "PANEL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    Navigate {
        path: String,
    },
    Admins(AdminsCommand),
    Plans(PlansCommand),
    Users(UsersCommand),
    ActivePlans,
    Recharge(RechargeCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoleArg {
    Superadmin,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Superadmin => Self::SuperAdmin,
            RoleArg::Admin => Self::Admin,
        }
    }
}

#[derive(Args, Debug)]
struct PageArgs {
    #[arg(long, default_value_t = 0)]
    skip: u32,

    #[arg(long)]
    limit: Option<u32>,
}

impl PageArgs {
    fn page(&self, default_limit: u32) -> Page {
        Page::new(self.skip, self.limit.unwrap_or(default_limit))
    }
}

#[derive(Args, Debug)]
struct AdminsCommand {
    #[command(subcommand)]
    command: AdminsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminsSubcommand {
    List(PageArgs),
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        is_active: Option<bool>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct PlansCommand {
    #[command(subcommand)]
    command: PlansSubcommand,
}

#[derive(Subcommand, Debug)]
enum PlansSubcommand {
    List(PageArgs),
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        duration_days: u32,
        #[arg(long, default_value_t = 0, help = "0 means unlimited")]
        data_limit_gb: u32,
        #[arg(long)]
        price: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        duration_days: Option<u32>,
        #[arg(long)]
        data_limit_gb: Option<u32>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        is_active: Option<bool>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List(PageArgs),
    Get {
        username: String,
    },
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        plan_id: i64,
    },
    Delete {
        username: String,
    },
    ResetTraffic {
        username: String,
    },
    Subscription {
        username: String,
    },
}

#[derive(Args, Debug)]
struct RechargeCommand {
    #[command(subcommand)]
    command: RechargeSubcommand,
}

#[derive(Subcommand, Debug)]
enum RechargeSubcommand {
    Request {
        #[arg(long, help = "Amount in Toman")]
        amount: u64,
    },
    Logs(PageArgs),
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let mut config = PanelConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.api_base_url = normalize_base_url(base_url);
    }
    if let Some(storage_path) = cli.storage_path.clone() {
        config.storage_path = storage_path;
    }

    let storage: Arc<dyn DurableStorage> = if cli.ephemeral {
        Arc::new(MemoryStorage::new())
    } else {
        Arc::new(FileStorage::new(config.storage_path.clone()))
    };
    let session = SessionStore::restore(storage)?;
    let transport = Arc::new(ReqwestTransport::new(config.timeouts)?);
    let client = ApiClient::new(transport, config.api_base_url.clone(), session);
    tracing::debug!(base_url = %config.api_base_url, storage = %config.storage_path.display(), "console ready");

    let auth = AuthService::new(client.clone());
    auth.initialize_auth().await;

    match cli.command {
        Command::Login { role, username, password } => run_login(&auth, role.into(), username, password).await,
        Command::Logout => run_logout(&auth).await,
        Command::Whoami => run_whoami(client.session()).await,
        Command::Navigate { path } => run_navigate(client.session(), &path).await,
        Command::Admins(admins) => run_admins(&client, admins).await,
        Command::Plans(plans) => run_plans(&client, plans).await,
        Command::Users(users) => run_users(&client, users).await,
        Command::ActivePlans => {
            enter(client.session(), RouteName::AdminViewPlans.path()).await?;
            print_json(&AdminService::new(client).active_plans().await?)
        }
        Command::Recharge(recharge) => run_recharge(&client, recharge).await,
    }
}

/// Apply the navigation guard for the page a command belongs to.
async fn enter(session: &SessionStore, path: &str) -> Result<(), CliError> {
    let nav = navigate(path, &session.snapshot().await)?;
    if nav.redirected() {
        return Err(CliError::Denied { path: path.to_owned(), redirect: nav.route.name });
    }
    Ok(())
}

async fn run_login(auth: &AuthService, role: Role, username: String, password: String) -> Result<(), CliError> {
    enter(auth.session(), login_for(Some(role)).path()).await?;
    let profile = auth.login(role, &Credentials::new(username, password)).await?;
    print_json(&profile)
}

async fn run_logout(auth: &AuthService) -> Result<(), CliError> {
    let role = auth.logout().await;
    print_json(&json!({
        "logged_out": role,
        "login": login_for(role).path(),
    }))
}

async fn run_whoami(session: &SessionStore) -> Result<(), CliError> {
    let rendered = match session.snapshot().await {
        Session::Anonymous => json!({ "authenticated": false }),
        Session::Authenticated { role, profile, .. } => json!({
            "authenticated": true,
            "role": role,
            "profile": profile,
        }),
    };
    print_json(&rendered)
}

async fn run_navigate(session: &SessionStore, path: &str) -> Result<(), CliError> {
    let nav = navigate(path, &session.snapshot().await)?;
    let query: Map<String, Value> = nav
        .route
        .query
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    print_json(&json!({
        "requested": path,
        "route": nav.route.name.as_str(),
        "path": nav.route.name.path(),
        "redirected": nav.redirected(),
        "trail": nav.trail.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        "query": query,
    }))
}

async fn run_admins(client: &ApiClient, admins: AdminsCommand) -> Result<(), CliError> {
    enter(client.session(), RouteName::SaManageAdmins.path()).await?;
    let service = SuperadminService::new(client.clone());
    let json = match admins.command {
        AdminsSubcommand::List(page) => service.list_admins(page.page(Page::DEFAULT_LIMIT)).await?,
        AdminsSubcommand::Get { id } => service.get_admin(id).await?,
        AdminsSubcommand::Create { username, email, password } => {
            service.create_admin(&NewAdmin { username, email, password }).await?
        }
        AdminsSubcommand::Update { id, email, is_active } => {
            service.update_admin(id, &AdminUpdate { email, is_active }).await?
        }
        AdminsSubcommand::Delete { id } => service.delete_admin(id).await?,
    };
    print_json(&json)
}

async fn run_plans(client: &ApiClient, plans: PlansCommand) -> Result<(), CliError> {
    enter(client.session(), RouteName::SaManagePlans.path()).await?;
    let service = SuperadminService::new(client.clone());
    let json = match plans.command {
        PlansSubcommand::List(page) => service.list_plans(page.page(Page::DEFAULT_LIMIT)).await?,
        PlansSubcommand::Get { id } => service.get_plan(id).await?,
        PlansSubcommand::Create { name, duration_days, data_limit_gb, price } => {
            service
                .create_plan(&NewPlan { name, duration_days, data_limit_gb, price })
                .await?
        }
        PlansSubcommand::Update { id, name, duration_days, data_limit_gb, price, is_active } => {
            let update = PlanUpdate { name, duration_days, data_limit_gb, price, is_active };
            service.update_plan(id, &update).await?
        }
        PlansSubcommand::Delete { id } => service.delete_plan(id).await?,
    };
    print_json(&json)
}

async fn run_users(client: &ApiClient, users: UsersCommand) -> Result<(), CliError> {
    enter(client.session(), RouteName::AdminManageUsers.path()).await?;
    let service = AdminService::new(client.clone());
    let json = match users.command {
        UsersSubcommand::List(page) => service.list_vpn_users(page.page(Page::DEFAULT_LIMIT)).await?,
        UsersSubcommand::Get { username } => service.get_vpn_user(&username).await?,
        UsersSubcommand::Create { username, plan_id } => {
            service.create_vpn_user(&NewVpnUser { username, plan_id }).await?
        }
        UsersSubcommand::Delete { username } => service.delete_vpn_user(&username).await?,
        UsersSubcommand::ResetTraffic { username } => service.reset_vpn_user_traffic(&username).await?,
        UsersSubcommand::Subscription { username } => service.vpn_user_subscription(&username).await?,
    };
    print_json(&json)
}

async fn run_recharge(client: &ApiClient, recharge: RechargeCommand) -> Result<(), CliError> {
    enter(client.session(), RouteName::AdminRecharge.path()).await?;
    let service = AdminService::new(client.clone());
    let json = match recharge.command {
        RechargeSubcommand::Request { amount } => service.request_payment(amount).await?,
        RechargeSubcommand::Logs(page) => service.payment_logs(page.page(Page::PAYMENT_LOG_LIMIT)).await?,
    };
    print_json(&json)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
