//! Helpdesk CLI - database migrations and account management.
//!
//! # Usage
//!
//! ```bash
//! # Run database and session-store migrations
//! hd-cli migrate
//!
//! # Create a user (there is no signup page)
//! hd-cli user create -e agent@example.com -n "Alex Agent" -r AGENT -p 'long password'
//!
//! # Change a user's role (takes effect at their next login)
//! hd-cli user set-role -e agent@example.com -r ADMIN
//!
//! # Show the tickets a user can see
//! hd-cli tickets list -e agent@example.com
//!
//! # Assign a ticket, or clear the assignee
//! hd-cli tickets assign 42 --to agent@example.com
//! hd-cli tickets assign 42 --unassign
//! ```
//!
//! The database is read from `HELPDESK_DATABASE_URL`, `DATABASE_URL` or the
//! `DB_*` variables, as for the server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use helpdesk_core::Role;

mod commands;

#[derive(Parser)]
#[command(name = "hd-cli")]
#[command(author, version, about = "Helpdesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Inspect and assign tickets
    Tickets {
        #[command(subcommand)]
        action: TicketAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address (login name)
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role (`ADMIN`, `AGENT`, `USER`)
        #[arg(short, long, default_value = "USER")]
        role: Role,

        /// Initial password
        #[arg(short, long, env = "HELPDESK_USER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Change a user's role
    SetRole {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// New role (`ADMIN`, `AGENT`, `USER`)
        #[arg(short, long)]
        role: Role,
    },
}

#[derive(Subcommand)]
enum TicketAction {
    /// List the tickets visible to a user, newest first
    List {
        /// Email address of the user whose view to show
        #[arg(short, long)]
        email: String,
    },
    /// Set or clear a ticket's assignee
    Assign {
        /// Ticket id
        id: i32,

        /// Assignee email address
        #[arg(long, conflicts_with = "unassign", required_unless_present = "unassign")]
        to: Option<String>,

        /// Clear the assignee
        #[arg(long)]
        unassign: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helpdesk_cli=info,helpdesk_web=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                role,
                password,
            } => commands::user::create(&email, &name, role, &password).await?,
            UserAction::SetRole { email, role } => {
                commands::user::set_role(&email, role).await?;
            }
        },
        Commands::Tickets { action } => match action {
            TicketAction::List { email } => commands::tickets::list(&email).await?,
            TicketAction::Assign { id, to, unassign: _ } => {
                commands::tickets::assign(id, to.as_deref()).await?;
            }
        },
    }
    Ok(())
}
