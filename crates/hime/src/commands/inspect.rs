//! `hime detect` and `hime summary` command implementations.

use std::path::PathBuf;

use clap::Args;
use hime_format::{apply, detect, trim_for_summary};

use super::{fallback_title, load_config, read_input};
use crate::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the detect command.
#[derive(Args)]
pub(crate) struct DetectArgs {
    /// Page source file (default: stdin).
    file: Option<PathBuf>,
}

impl DetectArgs {
    /// Execute the detect command.
    pub(crate) fn execute(self, global: &GlobalArgs, output: &Output) -> Result<(), CliError> {
        let config = load_config(global, None)?;
        let text = read_input(self.file.as_deref())?;
        let dialect = detect(&config.format_config(), &text);
        output.print_line(dialect.as_str())?;
        Ok(())
    }
}

/// Arguments for the summary command.
#[derive(Args)]
pub(crate) struct SummaryArgs {
    /// Page source file (default: stdin).
    file: Option<PathBuf>,

    /// Maximum summary length in characters (overrides config).
    #[arg(short, long)]
    length: Option<usize>,
}

impl SummaryArgs {
    /// Execute the summary command.
    ///
    /// The summary is cut from the rendered plain text, so markup never
    /// shows up in it.
    pub(crate) fn execute(self, global: &GlobalArgs, output: &Output) -> Result<(), CliError> {
        let config = load_config(global, self.length)?;
        let text = read_input(self.file.as_deref())?;
        let title = fallback_title(None, self.file.as_ref());

        let page = apply(&config.format_config(), &title, &text);
        let limit = isize::try_from(config.wiki_resolved.summary_length).unwrap_or(isize::MAX);
        output.print_line(trim_for_summary(page.plain.trim_end(), limit).as_str())?;
        Ok(())
    }
}
