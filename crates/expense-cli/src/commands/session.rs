use std::fs::File;
use std::io::{self, BufReader};

use crate::app::AppContext;
use crate::cli::SessionArgs;
use crate::errors::CliError;
use crate::session::{Session, SessionSummary};
use crate::ui::{header, print};

pub fn handle_session(ctx: &AppContext, args: &SessionArgs) -> anyhow::Result<()> {
    let ui = ctx.ui()?;
    let mut session = Session::new(ui.clone(), ctx.quiet());

    let summary = match &args.script {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                CliError::not_found(
                    format!("Script not found: {} ({})", path.display(), e),
                    "Check the path passed to --script.",
                )
            })?;
            tracing::info!(script = %path.display(), "running session script");
            session.run(BufReader::new(file), false)?
        }
        None => {
            let interactive = ui.is_interactive();
            if interactive && !ctx.quiet() {
                print(&ui, &header(&ui, "session", Some("type `help` for commands")));
            }
            session.run(io::stdin().lock(), interactive)?
        }
    };

    tracing::info!(
        transactions = session.store().transaction_count(),
        updates = session.view().updates(),
        "session ended"
    );
    finish(summary)
}

fn finish(summary: SessionSummary) -> anyhow::Result<()> {
    if summary.failures > 0 {
        return Err(CliError::invalid_input(format!(
            "{} of the session's lines failed",
            summary.failures
        ))
        .into());
    }
    Ok(())
}
