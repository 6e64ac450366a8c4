//! Terminal client for auth-portal.
//!
//! Walks through the signup and signin forms, keeps the session in a local
//! file and opens the role dashboards.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin portal -- signup
//! cargo run --bin portal -- signin
//! cargo run --bin portal -- whoami
//! cargo run --bin portal -- open /admin/dashboard
//! cargo run --bin portal -- signout
//! ```
//!
//! # Environment Variables
//!
//! - `PORTAL_API_URL`: service address (default: `http://localhost:5000`)
//! - `PORTAL_SESSION_FILE`: session file (default: `.portal-session.json`)

use auth_portal::client::api::{ApiError, AuthApi, HttpAuthClient};
use auth_portal::client::controller::{FormController, Mount, sign_out};
use auth_portal::client::form::{CredentialForm, FormField, Phase, SigninForm, SignupForm};
use auth_portal::client::navigation::{
    ADMIN_DASHBOARD, Access, HOME, History, SIGNIN, SIGNUP, USER_DASHBOARD, guard,
};
use auth_portal::client::session::{FileSession, SessionReader, SessionStore};
use auth_portal::domain::entities::Role;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Terminal client for auth-portal.
#[derive(Parser)]
#[command(name = "portal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Service address
    #[arg(long, env = "PORTAL_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    /// File holding the signed-in session
    #[arg(long, env = "PORTAL_SESSION_FILE", default_value = ".portal-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup,

    /// Sign in and open your dashboard
    Signin,

    /// Show the signed-in account
    Whoami,

    /// Sign out and forget the local session
    Signout,

    /// Open a page, e.g. /admin/dashboard
    Open {
        /// Page path
        path: String,
    },
}

struct Portal {
    api: Arc<dyn AuthApi>,
    session_file: PathBuf,
}

impl Portal {
    fn session(&self) -> FileSession {
        FileSession::new(&self.session_file)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let portal = Portal {
        api: Arc::new(HttpAuthClient::new(cli.api_url)?),
        session_file: cli.session_file,
    };

    match cli.command {
        Commands::Signup => open(&portal, SIGNUP).await?,
        Commands::Signin => open(&portal, SIGNIN).await?,
        Commands::Whoami => whoami(&portal).await?,
        Commands::Signout => signout(&portal).await?,
        Commands::Open { path } => open(&portal, &path).await?,
    }

    Ok(())
}

/// Shows `path`, following guard redirects and post-signin navigation.
async fn open(portal: &Portal, path: &str) -> Result<()> {
    let mut path = path.to_string();

    loop {
        let current = portal.session().current();

        let next = match guard(&path, current.as_ref()) {
            Access::Allow => show(portal, &path).await?,
            Access::Redirect(to) => {
                println!("{} {} → {}", "↪".bright_black(), path.bright_black(), to.cyan());
                Some(to.to_string())
            }
            Access::NotFound => {
                println!("{} {}", "404".red().bold(), "Page not found".red());
                None
            }
        };

        match next {
            Some(to) => path = to,
            None => return Ok(()),
        }
    }
}

/// Renders an allowed page. Returns the next page to open, if any.
async fn show(portal: &Portal, path: &str) -> Result<Option<String>> {
    match path {
        SIGNIN => run_form(portal, SigninForm::default(), "🔐 Log in").await,
        SIGNUP => run_form(portal, SignupForm::default(), "📝 Sign up").await,
        USER_DASHBOARD => user_dashboard(portal).await,
        ADMIN_DASHBOARD => admin_dashboard(portal).await,
        HOME => {
            println!("{}", "Auth Portal".bright_blue().bold());
            println!();
            println!("  {} portal signup", "Create an account:".bright_white());
            println!("  {} portal signin", "Log in:           ".bright_white());
            Ok(None)
        }
        _ => Ok(None),
    }
}

/// Prompts for every field until the form succeeds or the user gives up.
async fn run_form<F: CredentialForm>(
    portal: &Portal,
    fields: F,
    title: &str,
) -> Result<Option<String>> {
    let mut controller =
        match FormController::mount(fields, portal.api.clone(), portal.session(), History::new()) {
            Mount::Ready(controller) => controller,
            Mount::Redirected { to, .. } => return Ok(Some(to.to_string())),
        };

    println!("{}", title.bright_blue().bold());
    println!();

    loop {
        for &field in F::FIELDS {
            let value = prompt(field, controller.state().fields.value(field))?;
            controller.edit(field, value);
        }

        let state = controller.submit().await;

        if state.phase == Phase::Succeeded {
            break;
        }
        if let Some(message) = state.success() {
            println!();
            println!("{} {}", "✅".green(), message.green().bold());
            println!("  Continue with: {} portal signin", "cargo run --bin".bright_cyan());
            return Ok(None);
        }
        if let Some(message) = state.error() {
            println!();
            println!("{} {}", "❌".red(), message.red());
        }

        let retry = Confirm::new()
            .with_prompt("Try again?")
            .default(true)
            .interact()?;
        if !retry {
            return Ok(None);
        }
        println!();
    }

    let (_, session, navigator) = controller.into_parts();
    if let Some(auth) = session.current() {
        println!();
        println!(
            "{} Signed in as {}",
            "✅".green(),
            auth.user.username.cyan().bold()
        );
    }

    Ok(navigator.current().map(str::to_string))
}

fn prompt<Fd: FormField>(field: Fd, current: &str) -> Result<String> {
    if field.is_secret() {
        return Ok(Password::new()
            .with_prompt(field.label())
            .allow_empty_password(true)
            .interact()?);
    }

    Ok(Input::new()
        .with_prompt(field.label())
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?)
}

async fn user_dashboard(portal: &Portal) -> Result<Option<String>> {
    let Some(auth) = portal.session().current() else {
        return Ok(Some(SIGNIN.to_string()));
    };

    match portal.api.user_dashboard(&auth.token).await {
        Ok(dashboard) => {
            println!("{}", "🏠 User Dashboard".bright_blue().bold());
            println!();
            println!("  {}", dashboard.greeting.bright_white());
            println!("  Email: {}", dashboard.user.email.cyan());
            println!();
            Ok(None)
        }
        Err(e) => on_api_error(portal, e),
    }
}

async fn admin_dashboard(portal: &Portal) -> Result<Option<String>> {
    let Some(auth) = portal.session().current() else {
        return Ok(Some(SIGNIN.to_string()));
    };

    match portal.api.admin_dashboard(&auth.token).await {
        Ok(dashboard) => {
            println!("{}", "🛠  Admin Dashboard".bright_blue().bold());
            println!();
            println!("  {}", dashboard.greeting.bright_white());
            println!();
            println!(
                "  {:<4} {:<20} {:<30} {}",
                "ID".bright_white().bold(),
                "Username".bright_white().bold(),
                "Email".bright_white().bold(),
                "Role".bright_white().bold()
            );
            println!("  {}", "─".repeat(64).bright_black());

            for user in &dashboard.users {
                let role = match user.role {
                    Role::Admin => "ADMIN".magenta(),
                    Role::User => "USER".green(),
                };
                println!(
                    "  {:<4} {:<20} {:<30} {}",
                    user.id.to_string().bright_black(),
                    user.username.cyan(),
                    user.email,
                    role
                );
            }

            println!();
            println!("  Total: {}", dashboard.total.to_string().bright_white().bold());
            println!();
            Ok(None)
        }
        Err(e) => on_api_error(portal, e),
    }
}

/// A 401 means the stored session is no longer valid: forget it and go to signin.
fn on_api_error(portal: &Portal, error: ApiError) -> Result<Option<String>> {
    match error {
        ApiError::Rejected { status: 401, .. } => {
            portal.session().clear()?;
            println!("{}", "⚠️  Session expired, please sign in again".yellow());
            Ok(Some(SIGNIN.to_string()))
        }
        other => {
            println!("{} {}", "❌".red(), other.user_message().red());
            Ok(None)
        }
    }
}

async fn whoami(portal: &Portal) -> Result<()> {
    let Some(auth) = portal.session().current() else {
        println!("{}", "Not signed in".yellow());
        return Ok(());
    };

    match portal.api.me(&auth.token).await {
        Ok(user) => {
            println!("  Username: {}", user.username.cyan().bold());
            println!("  Email:    {}", user.email);
            println!("  Role:     {}", user.role.to_string().bright_white());
        }
        Err(e) => {
            on_api_error(portal, e)?;
        }
    }

    Ok(())
}

async fn signout(portal: &Portal) -> Result<()> {
    let mut session = portal.session();

    if sign_out(portal.api.as_ref(), &mut session).await? {
        println!("{}", "👋 Signed out".green());
    } else {
        println!("{}", "Not signed in".yellow());
    }

    Ok(())
}
