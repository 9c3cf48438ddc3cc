use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use sellerdesk::error::{AppError, Result};
use sellerdesk::terminal::{TerminalNavigator, TerminalNotifier};
use sellerdesk::{AccessControlService, ApiClient, Config, FileSessionStore};
use sellerdesk_access::{Requirement, SessionDecision, SessionGate, SessionView};
use sellerdesk_shared::subscription::PaymentMethod;
use sellerdesk_shared::{AuthContext, Permission, Role, SessionUser};
use sellerdesk_subscription::{Confirmed, RenewalController, RenewalError, RenewalOutcome, today_utc};

/// sellerdesk - seller console for the marketplace backend
#[derive(Parser)]
#[command(name = "sellerdesk")]
#[command(about = "Store access checks and subscription renewal for sellers", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Persist a session issued by the backend
    Login {
        #[arg(long, env = "SELLERDESK_TOKEN")]
        token: String,

        #[arg(long)]
        user_id: String,

        #[arg(long)]
        email: Option<String>,

        /// Coarse role handed out at login
        #[arg(long)]
        role: Option<String>,
    },
    /// Forget the persisted session
    Logout,
    /// Resolve the current role and check one requirement
    Access {
        /// Permission key, e.g. canManageProducts
        #[arg(long, value_parser = parse_permission, conflicts_with_all = ["role", "roles"])]
        permission: Option<Permission>,

        #[arg(long, conflicts_with = "roles")]
        role: Option<String>,

        /// Comma-separated list; any one is enough
        #[arg(long, value_delimiter = ',')]
        roles: Vec<String>,
    },
    /// Evaluate the subscription and optionally pay for a renewal
    Renewal {
        #[arg(long, value_enum)]
        pay: Option<PayWith>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PayWith {
    Wallet,
    External,
}

impl From<PayWith> for PaymentMethod {
    fn from(value: PayWith) -> Self {
        match value {
            PayWith::Wallet => PaymentMethod::Wallet,
            PayWith::External => PaymentMethod::External,
        }
    }
}

fn parse_permission(value: &str) -> std::result::Result<Permission, String> {
    value
        .parse()
        .map_err(|_| format!("unknown permission '{value}'"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(AppError::ConfigError)?;

    sellerdesk::observability::init_observability(
        "sellerdesk",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )
    .map_err(|e| AppError::ConfigError(e.to_string()))?;

    let auth = Arc::new(AuthContext::new(FileSessionStore::new(&config.session.path)));
    auth.init().await;

    match cli.command {
        Commands::Login {
            token,
            user_id,
            email,
            role,
        } => login_command(&auth, token, user_id, email, role).await,
        Commands::Logout => logout_command(&auth).await,
        Commands::Access {
            permission,
            role,
            roles,
        } => access_command(config, auth, requirement(permission, role, roles)).await,
        Commands::Renewal { pay } => renewal_command(config, auth, pay.map(Into::into)).await,
    }
}

fn requirement(permission: Option<Permission>, role: Option<String>, roles: Vec<String>) -> Requirement {
    if let Some(permission) = permission {
        Requirement::permission(permission)
    } else if let Some(role) = Role::parse_optional(role.as_deref()) {
        Requirement::role(role)
    } else {
        Requirement::any_role(roles.iter().filter_map(|r| Role::parse_optional(Some(r))))
    }
}

#[tracing::instrument(skip(auth, token))]
async fn login_command(
    auth: &AuthContext<FileSessionStore>,
    token: String,
    user_id: String,
    email: Option<String>,
    role: Option<String>,
) -> Result<()> {
    let user = SessionUser {
        id: user_id,
        email,
        role: Role::parse_optional(role.as_deref()),
    };
    let session = auth.login(token, user).await?;

    if !session.has_valid_token() {
        tracing::warn!("Stored token is already expired");
    }
    println!("Signed in");
    Ok(())
}

async fn logout_command(auth: &AuthContext<FileSessionStore>) -> Result<()> {
    auth.logout().await?;
    println!("Signed out");
    Ok(())
}

#[tracing::instrument(skip_all)]
async fn access_command(
    config: Config,
    auth: Arc<AuthContext<FileSessionStore>>,
    requirement: Requirement,
) -> Result<()> {
    let api = Arc::new(ApiClient::new(&config.api)?);
    let service = AccessControlService::new(auth, api, &config.access);
    let navigator = TerminalNavigator::default();

    let check = service.check(requirement, &navigator).await;
    if check.session != SessionDecision::Valid {
        return Err(AppError::SignedOut);
    }

    let role = check
        .access
        .effective_role
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_owned());
    println!("role: {role}");

    let granted: Vec<String> = check
        .access
        .permissions
        .granted()
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("permissions: {}", granted.join(", "));

    if check.granted() {
        println!("access: granted");
    } else {
        println!("access: denied");
        if check.modal.visible {
            println!("[{}] {}", check.modal.title(), check.modal.message());
        }
    }

    Ok(())
}

#[tracing::instrument(skip_all)]
async fn renewal_command(
    config: Config,
    auth: Arc<AuthContext<FileSessionStore>>,
    pay: Option<PaymentMethod>,
) -> Result<()> {
    let navigator = Arc::new(TerminalNavigator::default());
    let session = auth.session();

    let token = match SessionGate::new().render(&session, &*navigator, || session.token.clone()) {
        SessionView::Children(Some(token)) => token,
        _ => return Err(AppError::SignedOut),
    };

    let api = ApiClient::new(&config.api)?;
    let controller = RenewalController::new(api, token, navigator, Arc::new(TerminalNotifier));
    let today = today_utc();

    let outcome = controller.load(today).await;
    println!("subscription: {outcome}");
    if outcome != RenewalOutcome::ShowRenewalModal {
        return Ok(());
    }

    let modal = controller.modal();
    println!(
        "renew {} for {:.2} (wallet: {})",
        modal.plan_name.as_deref().unwrap_or("plan"),
        modal.plan_price,
        modal
            .wallet_amount
            .map(|amount| format!("{amount:.2}"))
            .unwrap_or_else(|| "unknown".to_owned())
    );

    let Some(method) = pay else {
        return Ok(());
    };
    controller.select(method);

    match controller.confirm(today).await {
        Ok(Confirmed::Renewed) => println!("renewed"),
        Ok(Confirmed::Redirected { order_id }) => println!("payment order {order_id}"),
        Err(RenewalError::InsufficientBalance { shortfall }) => {
            println!("wallet is short by {shortfall:.2}");
            controller.top_up();
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
