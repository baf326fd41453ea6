//! Periodic login checkup for an external CLI tool.
//!
//! Runs a configured command that writes a status file, then inspects the
//! file for the tool's logged-in marker. Any problem — the command erroring,
//! the file missing or unreadable, or the marker absent — is reported to the
//! operator through a [`Notifier`]. The check runs once at startup and then
//! on a fixed interval; it has no inputs beyond its schedule and no outputs
//! beyond the notification side effect and logs.

use crate::config::CheckupConfig;
use crate::notify::Notifier;
use std::process::Command;
use tracing::{debug, error, info, warn};

/// Marker the output file must contain for the tool to count as logged in.
pub const LOGIN_MARKER: &str = "/help for help";

/// Subject line for operator alerts.
pub const ALERT_SUBJECT: &str = "[todosync] CLI login alert";

/// Result of one checkup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckupOutcome {
    /// The marker was found; the tool is logged in.
    LoggedIn,
    /// The check command could not be run or exited unsuccessfully.
    CommandFailed(String),
    /// The command ran but its output file does not exist.
    OutputMissing,
    /// The output file exists but could not be read.
    OutputUnreadable(String),
    /// The output file exists but the marker is absent.
    NotLoggedIn,
}

impl CheckupOutcome {
    /// Problem description for the operator, or `None` when healthy.
    pub fn problem(&self) -> Option<String> {
        match self {
            Self::LoggedIn => None,
            Self::CommandFailed(detail) => {
                Some(format!("Error executing the login check command: {detail}"))
            }
            Self::OutputMissing => Some("Login check output file not found".to_owned()),
            Self::OutputUnreadable(detail) => {
                Some(format!("Error reading login check output: {detail}"))
            }
            Self::NotLoggedIn => Some("The CLI tool is not logged in".to_owned()),
        }
    }
}

/// Run the check command once and classify the result.
pub fn run_check(config: &CheckupConfig) -> CheckupOutcome {
    debug!(command = %config.command, "running login check");

    let output = match Command::new(&config.command).args(&config.args).output() {
        Ok(output) => output,
        Err(e) => return CheckupOutcome::CommandFailed(e.to_string()),
    };

    if !output.status.success() {
        let detail = output
            .status
            .code()
            .map_or_else(|| "terminated by signal".to_owned(), |c| format!("exit status {c}"));
        return CheckupOutcome::CommandFailed(detail);
    }

    if !config.output_file.exists() {
        return CheckupOutcome::OutputMissing;
    }

    match std::fs::read_to_string(&config.output_file) {
        Ok(contents) if contents.contains(LOGIN_MARKER) => CheckupOutcome::LoggedIn,
        Ok(_) => CheckupOutcome::NotLoggedIn,
        Err(e) => CheckupOutcome::OutputUnreadable(e.to_string()),
    }
}

/// Run one check and notify the operator when it finds a problem.
///
/// Notification delivery failures are logged, never propagated; a broken
/// relay must not take the schedule down.
pub fn check_and_notify(config: &CheckupConfig, notifier: &dyn Notifier) -> CheckupOutcome {
    let outcome = run_check(config);
    match outcome.problem() {
        None => info!("login check passed"),
        Some(problem) => {
            warn!("login check failed: {problem}");
            let body = format!(
                "{problem}\n\nPlease log in again with the tool's login command.\n\
                 This is an automated notification."
            );
            if let Err(e) = notifier.notify(ALERT_SUBJECT, &body) {
                error!("cannot notify operator: {e}");
            }
        }
    }
    outcome
}

/// Run the checkup immediately and then on the configured interval, forever.
pub async fn run_schedule(config: CheckupConfig, notifier: Box<dyn Notifier>) {
    info!(
        interval_secs = config.interval_secs,
        "login checkup schedule started"
    );
    // The first tick fires immediately, covering the run-on-startup case.
    let mut interval =
        tokio::time::interval(std::time::Duration::from_secs(config.interval_secs));

    loop {
        interval.tick().await;
        check_and_notify(&config, notifier.as_ref());
    }
}
