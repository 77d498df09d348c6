//! `hime render` and `hime batch` command implementations.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use hime_format::{PageSource, Rendered, apply, apply_batch};
use serde::Serialize;

use super::{fallback_title, load_config, read_file, read_input};
use crate::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Which rendered artifact to print.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub(crate) enum RenderOutput {
    /// HTML fragment.
    #[default]
    Html,
    /// Normalized wiki source.
    Text,
    /// Plain text without markup.
    Plain,
    /// All artifacts and the title as JSON.
    Json,
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Page source file (default: stdin).
    file: Option<PathBuf>,

    /// Fallback title when the page has no level-1 heading.
    #[arg(short, long)]
    title: Option<String>,

    /// Artifact to print.
    #[arg(short, long, value_enum, default_value_t)]
    output: RenderOutput,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or input cannot be read.
    pub(crate) fn execute(self, global: &GlobalArgs, output: &Output) -> Result<(), CliError> {
        let config = load_config(global, None)?;
        let text = read_input(self.file.as_deref())?;
        let title = fallback_title(self.title.as_deref(), self.file.as_ref());

        let page = apply(&config.format_config(), &title, &text);
        tracing::info!(title = %page.title, html_len = page.html.len(), "Rendered page");

        match self.output {
            RenderOutput::Html => output.print(&page.html)?,
            RenderOutput::Text => output.print(&page.text)?,
            RenderOutput::Plain => output.print(&page.plain)?,
            RenderOutput::Json => output.print_line(&serde_json::to_string_pretty(&page)?)?,
        }
        Ok(())
    }
}

/// Arguments for the batch command.
#[derive(Args)]
pub(crate) struct BatchArgs {
    /// Page source files.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

/// One line of batch output.
#[derive(Serialize)]
struct BatchEntry<'a> {
    path: String,
    #[serde(flatten)]
    page: &'a Rendered,
}

impl BatchArgs {
    /// Execute the batch command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or any input file cannot be read.
    pub(crate) fn execute(self, global: &GlobalArgs, output: &Output) -> Result<(), CliError> {
        let config = load_config(global, None)?;

        let texts = self
            .files
            .iter()
            .map(|path| read_file(path))
            .collect::<Result<Vec<_>, _>>()?;
        let titles: Vec<String> = self
            .files
            .iter()
            .map(|path| fallback_title(None, Some(path)))
            .collect();
        let sources: Vec<PageSource<'_>> = titles
            .iter()
            .zip(&texts)
            .map(|(title, text)| PageSource { title, text })
            .collect();

        let pages = apply_batch(&config.format_config(), &sources);

        for (path, page) in self.files.iter().zip(&pages) {
            let entry = BatchEntry {
                path: path.display().to_string(),
                page,
            };
            output.print_line(&serde_json::to_string(&entry)?)?;
        }
        output.success(&format!("Rendered {} pages", pages.len()));
        Ok(())
    }
}
