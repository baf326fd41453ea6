//! CLI binary for todosync.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todosync::checkup;
use todosync::notify::SmtpNotifier;
use todosync::{AuthMode, Controller, Notice, SessionStore, SyncClient, SyncConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// todosync: session and sync client for a query-endpoint todo service.
#[derive(Parser)]
#[command(name = "todosync", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Log in with an existing account.
    Login {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },

    /// Create an account and log in.
    Signup {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },

    /// Clear the stored session.
    Logout,

    /// Show the task list.
    List,

    /// Add a task.
    Add {
        /// Task text.
        text: String,
    },

    /// Toggle a task's completion state.
    Done {
        /// Task id as shown by `list`.
        id: String,
        /// Mark the task as not done instead.
        #[arg(long)]
        undo: bool,
    },

    /// Run the external-CLI login checkup loop (startup + hourly).
    Checkup,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // An explicit --config must exist; the default location is optional.
    let config = if let Some(ref path) = cli.config {
        SyncConfig::from_file(path)?
    } else {
        match SyncConfig::default_config_path() {
            Some(ref path) if path.exists() => SyncConfig::from_file(path)?,
            _ => SyncConfig::default(),
        }
    };

    if let Command::Checkup = cli.command {
        return run_checkup(config).await;
    }

    let state_dir = config
        .state_dir
        .clone()
        .or_else(SessionStore::default_dir)
        .ok_or_else(|| anyhow::anyhow!("cannot determine a state directory"))?;
    let client = SyncClient::new(config.endpoint.clone())?;
    let mut controller = Controller::new(client, SessionStore::new(state_dir));

    let notice = match cli.command {
        Command::Login { email, password } => {
            controller.authenticate(AuthMode::Login, &email, &password).await
        }
        Command::Signup { email, password } => {
            controller
                .authenticate(AuthMode::Signup, &email, &password)
                .await
        }
        Command::Logout => {
            controller.logout();
            println!("Logged out.");
            None
        }
        Command::List => controller.refresh_tasks().await,
        Command::Add { text } => {
            let notice = controller.add_task(&text).await;
            if notice.is_none() {
                // Show the full list around the appended task.
                controller.refresh_tasks().await
            } else {
                notice
            }
        }
        Command::Done { id, undo } => controller.toggle_task(&id, !undo).await,
        Command::Checkup => unreachable!("handled above"),
    };

    if let Some(Notice::Alert(message)) = notice {
        eprintln!("{message}");
        return Ok(());
    }

    print_view(&controller);
    Ok(())
}

/// Render the controller's view to stdout.
fn print_view(controller: &Controller) {
    if !controller.view().is_logged_in() {
        println!("Not logged in. Use `todosync login <email> <password>`.");
        return;
    }

    if let Some(email) = controller.user_email() {
        println!("Logged in as {email}");
    }

    let list = controller.list();
    if let Some(placeholder) = list.placeholder() {
        println!("{placeholder}");
        return;
    }
    for row in list.rows() {
        let mark = if row.done { "x" } else { " " };
        println!("[{mark}] {}  {}", row.id, row.text);
    }
}

/// Run the login checkup on its schedule until interrupted.
async fn run_checkup(config: SyncConfig) -> anyhow::Result<()> {
    config.validate()?;
    if !config.checkup_enabled() {
        anyhow::bail!("no checkup.command configured");
    }

    let notifier = SmtpNotifier::new(config.notify.clone())?;
    let schedule = tokio::spawn(checkup::run_schedule(
        config.checkup.clone(),
        Box::new(notifier),
    ));

    tokio::signal::ctrl_c().await?;
    info!("received Ctrl+C, shutting down");
    schedule.abort();
    Ok(())
}
