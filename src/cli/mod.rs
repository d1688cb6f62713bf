//! Command-line driver.
//!
//! Feeds a document file through the same editor → renderer pipeline a user
//! drives interactively, then writes HTML or a submission result.

pub mod watch;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::form::Submission;
use crate::workbench::Workbench;

/// Initialize logging once per process; `RUST_LOG` wins over the configured level
pub fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env).init();
}

/// Run one invocation of the tool
pub async fn run(config: Config) -> Result<ExitCode> {
    if let Some(path) = &config.settings_path {
        log::debug!("Using settings from {}", path.display());
    }

    let text = read_input(&config.input).await?;
    let mut workbench = Workbench::from_text(&text, config.theme);
    report_parse_error(&workbench, &config.input);

    for (id, value) in &config.values {
        workbench
            .set_value(id, value.as_str())
            .with_context(|| format!("Cannot set field '{}'", id))?;
    }

    if config.submit {
        return submit(&mut workbench);
    }

    write_output(config.output.as_deref(), &render_output(&workbench, &config)).await?;

    if config.watch {
        watch::watch(&config, workbench, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    }

    Ok(ExitCode::SUCCESS)
}

/// HTML for the current workbench state, page or fragment per config
pub fn render_output(workbench: &Workbench, config: &Config) -> String {
    if config.fragment {
        workbench.render_html(&config.render)
    } else {
        workbench.render_page(&config.render)
    }
}

fn submit(workbench: &mut Workbench) -> Result<ExitCode> {
    match workbench.submit() {
        None => bail!("The document is empty, there is no form to submit"),
        Some(Ok(submission)) => {
            print_submission(&submission)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Err(failed)) => {
            for error in &failed.errors {
                eprintln!("{}: {}", error.field_id, error.message);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_submission(submission: &Submission) -> Result<()> {
    let json = serde_json::to_string_pretty(&submission.to_json())?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    writeln!(stdout, "{}", submission.confirmation())?;
    Ok(())
}

pub(crate) async fn read_input(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read form document: {}", path.display()))
}

pub(crate) fn report_parse_error(workbench: &Workbench, path: &Path) {
    if let Some(error) = workbench.editor().error() {
        log::warn!(
            "{}:{}:{}: {} ({})",
            path.display(),
            error.line,
            error.column,
            error,
            error.detail
        );
    }
}

pub(crate) async fn write_output(output: Option<&Path>, html: &str) -> Result<()> {
    match output {
        Some(path) => tokio::fs::write(path, html)
            .await
            .with_context(|| format!("Failed to write HTML: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
