//! oxide-formkit CLI
//!
//! Renders a JSON form description to HTML, optionally binding submitted
//! values and validation errors read from JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_formkit::{Bindings, FormDescription, SubmittedValues, ValidationErrors};

/// Render a form description as HTML.
#[derive(Parser)]
#[command(name = "oxide-formkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Form description (JSON).
    #[arg(short, long)]
    form: PathBuf,

    /// Submitted values to bind (JSON object of name to string or list).
    #[arg(long)]
    values: Option<PathBuf>,

    /// Validation errors to bind (JSON object of name to list of messages).
    #[arg(long)]
    errors: Option<PathBuf>,

    /// Spaces per indent level, overriding the description.
    #[arg(short, long, env = "FORMKIT_INDENT")]
    indent: Option<i64>,

    /// Indent level of the opening form tag.
    #[arg(short, long, default_value_t = 0)]
    level: usize,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let description = read(&cli.form)?;
    let values = cli.values.as_deref().map(read).transpose()?;
    let errors = cli.errors.as_deref().map(read).transpose()?;

    let html = render(
        &description,
        values.as_deref(),
        errors.as_deref(),
        cli.indent,
        cli.level,
    )
    .with_context(|| format!("failed to render {}", cli.form.display()))?;
    println!("{html}");
    Ok(())
}

/// Builds the form from `description` and renders it with the optional
/// submitted values and validation errors bound.
///
/// Submitted values are raw client input and are escaped before binding.
fn render(
    description: &str,
    values: Option<&str>,
    errors: Option<&str>,
    indent: Option<i64>,
    level: usize,
) -> anyhow::Result<String> {
    let mut description =
        FormDescription::from_json(description).context("invalid form description")?;
    if let Some(indent) = indent {
        debug!(indent, "overriding indent width");
        description.render.indent_spaces = indent;
    }
    let mut form = description.into_form()?;
    info!(form = form.name(), widgets = form.get_widgets("").len(), "loaded form");

    let values = values
        .map(|json| {
            serde_json::from_str::<SubmittedValues>(json).context("invalid submitted values")
        })
        .transpose()?
        .map(|submitted| submitted.sanitize());
    let errors: Option<ValidationErrors> = errors
        .map(|json| serde_json::from_str(json).context("invalid validation errors"))
        .transpose()?;

    let mut bindings = Bindings::none();
    if let Some(values) = &values {
        debug!(count = values.len(), "binding submitted values");
        bindings = bindings.values(values);
    }
    if let Some(errors) = &errors {
        bindings = bindings.errors(errors);
    }
    Ok(form.render(&bindings, level))
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
