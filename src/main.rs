use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use pr_cli::cli::{self, Cli};
use pr_cli::forge::ForgeError;
use pr_cli::git::GitError;
use pr_cli::process::{ProcessError, INTERRUPTED_EXIT_CODE};
use pr_cli::ui::confirm::ConfirmError;
use pr_cli::ui::output;
use pr_cli::ui::prompts::PromptError;

/// Environment variable holding the log filter, e.g. `PR_CLI_LOG=debug`.
const LOG_ENV: &str = "PR_CLI_LOG";

fn init_logging(debug: bool) {
    let default = if debug { "pr_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// The process error behind `cause`, looking through transparent wrappers.
fn process_error<'a>(cause: &'a (dyn std::error::Error + 'static)) -> Option<&'a ProcessError> {
    if let Some(err) = cause.downcast_ref::<ProcessError>() {
        return Some(err);
    }
    if let Some(GitError::Command(err)) = cause.downcast_ref::<GitError>() {
        return Some(err);
    }
    match cause.downcast_ref::<ForgeError>() {
        Some(ForgeError::Command(err)) => Some(err),
        _ => None,
    }
}

fn is_interrupted(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<ConfirmError>(),
            Some(ConfirmError::Interrupted)
        ) || matches!(
            cause.downcast_ref::<PromptError>(),
            Some(PromptError::Cancelled)
        ) || process_error(cause).is_some_and(ProcessError::is_interrupted)
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let debug = cli.debug;
    init_logging(debug);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if is_interrupted(&err) => {
            tracing::debug!(error = ?err, "interrupted");
            eprintln!("Aborted");
            ExitCode::from(INTERRUPTED_EXIT_CODE as u8)
        }
        Err(err) => {
            if debug {
                output::error(format!("{err:?}"));
            } else {
                output::error(format!("{err:#}"));
            }
            ExitCode::FAILURE
        }
    }
}
