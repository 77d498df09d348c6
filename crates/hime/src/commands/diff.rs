//! `hime diff` and `hime highlight` command implementations.

use std::path::PathBuf;

use clap::Args;
use hime_format::{highlight, unified_diff};

use super::{read_file, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the diff command.
#[derive(Args)]
pub(crate) struct DiffArgs {
    /// Older revision.
    old: PathBuf,

    /// Newer revision.
    new: PathBuf,

    /// Print highlighted HTML instead of the unified diff.
    #[arg(long)]
    html: bool,
}

impl DiffArgs {
    /// Execute the diff command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let old = read_file(&self.old)?;
        let new = read_file(&self.new)?;

        let diff = unified_diff(&old, &new);
        if diff.is_empty() {
            tracing::info!("Revisions are identical");
            return Ok(());
        }

        if self.html {
            output.print(&highlight(&diff))?;
        } else {
            output.print(&diff)?;
        }
        Ok(())
    }
}

/// Arguments for the highlight command.
#[derive(Args)]
pub(crate) struct HighlightArgs {
    /// Unified diff file (default: stdin).
    file: Option<PathBuf>,
}

impl HighlightArgs {
    /// Execute the highlight command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let diff = read_input(self.file.as_deref())?;
        output.print(&highlight(&diff))?;
        Ok(())
    }
}
