//! CLI administration tool for auth-portal.
//!
//! Manages accounts and sessions directly in the database, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # Create an administrator
//! cargo run --bin admin -- user create --admin
//!
//! # Change a role
//! cargo run --bin admin -- user promote jane@example.com
//! cargo run --bin admin -- user demote jane@example.com
//!
//! # Remove expired sessions
//! cargo run --bin admin -- sessions purge
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use auth_portal::application::services::UserService;
use auth_portal::application::services::auth_service::hash_password;
use auth_portal::domain::entities::{NewUser, Role};
use auth_portal::domain::repositories::{SessionRepository, UserRepository};
use auth_portal::infrastructure::persistence::{PgSessionRepository, PgUserRepository};
use auth_portal::utils::email_normalizer::normalize_email;
use auth_portal::utils::field_validator::{MIN_PASSWORD_LENGTH, has_min_length, is_valid_email};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing auth-portal.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage sessions
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all accounts
    List,

    /// Create an account
    Create {
        /// Display name
        #[arg(short, long)]
        username: Option<String>,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Give the account the admin role
        #[arg(long)]
        admin: bool,
    },

    /// Give an account the admin role
    Promote {
        /// Email of the account
        email: String,
    },

    /// Return an account to the user role
    Demote {
        /// Email of the account
        email: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Delete expired sessions
    Purge,
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Sessions { action } => handle_session_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::List => list_users(UserService::new(repo)).await?,
        UserAction::Create {
            username,
            email,
            admin,
        } => create_user(repo, username, email, admin).await?,
        UserAction::Promote { email } => {
            change_role(UserService::new(repo), &email, Role::Admin).await?
        }
        UserAction::Demote { email, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove admin rights from {email}?"))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }
            change_role(UserService::new(repo), &email, Role::User).await?
        }
    }

    Ok(())
}

/// Lists all accounts.
///
/// # Output Format
///
/// ```text
/// 👥 Accounts
///
///   ID  Username             Email                          Role    Created
///   ─────────────────────────────────────────────────────────────────────────
///   1   Jane                 jane@example.com               ADMIN   2025-01-15 10:30
/// ```
async fn list_users(service: UserService<PgUserRepository>) -> Result<()> {
    println!("{}", "👥 Accounts".bright_blue().bold());
    println!();

    let users = service
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create --admin",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<20} {:<30} {:<7} {}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for user in &users {
        let role = match user.role {
            Role::Admin => "ADMIN".magenta(),
            Role::User => "USER".green(),
        };

        println!(
            "  {:<4} {:<20} {:<30} {:<7} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            role,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Creates an account with interactive prompts.
///
/// Applies the same email and password rules as the signup endpoint.
async fn create_user(
    repo: Arc<PgUserRepository>,
    username: Option<String>,
    email: Option<String>,
    admin: bool,
) -> Result<()> {
    println!("{}", "🆕 Create Account".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };
    if !is_valid_email(&email) {
        anyhow::bail!("Invalid Email");
    }

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Password do not match")
        .interact()?;
    if !has_min_length(&password, MIN_PASSWORD_LENGTH) {
        anyhow::bail!("Password must be at least {MIN_PASSWORD_LENGTH} character long");
    }

    let role = if admin { Role::Admin } else { Role::User };
    let password_hash = hash_password(&password)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let user = repo
        .create(NewUser {
            username: username.trim().to_string(),
            email: normalize_email(&email),
            password_hash,
            role,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!("{}", "✅ Account created successfully!".green().bold());
    println!("  ID:    {}", user.id.to_string().bright_black());
    println!("  Email: {}", user.email.cyan());
    println!("  Role:  {}", user.role.to_string().bright_white());
    println!();

    Ok(())
}

async fn change_role(service: UserService<PgUserRepository>, email: &str, role: Role) -> Result<()> {
    let user = service
        .set_role(email, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to change role: {}", e))?;

    println!(
        "{} {} is now {}",
        "✅".green(),
        user.email.cyan(),
        user.role.to_string().bright_white().bold()
    );

    Ok(())
}

async fn handle_session_action(action: SessionAction, pool: &PgPool) -> Result<()> {
    let repo = PgSessionRepository::new(Arc::new(pool.clone()));

    match action {
        SessionAction::Purge => {
            println!("{}", "🧹 Purging expired sessions...".bright_blue());

            let removed = repo
                .purge_expired()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to purge sessions: {}", e))?;

            println!(
                "{} Removed {} session(s)",
                "✅".green(),
                removed.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

/// Displays account and session counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let admins_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
        .bind(Role::Admin.code())
        .fetch_one(pool)
        .await?;

    let sessions_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sessions WHERE revoked_at IS NULL AND expires_at > NOW()",
    )
    .fetch_one(pool)
    .await?;

    println!(
        "  Accounts:        {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Administrators:  {}",
        admins_count.to_string().bright_green().bold()
    );
    println!(
        "  Active sessions: {}",
        sessions_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
