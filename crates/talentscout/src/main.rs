//! Runs one TalentScout interview in the terminal.

#[macro_use]
extern crate tracing;

use std::future::Future;
use std::io::Write as _;
use std::pin::pin;
use std::process::ExitCode;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use talentscout::core::Reply;
use talentscout::{Config, Session, SessionBuilder, SessionRegistry};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::select;
use tokio::time::sleep;

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    debug!(?config, "starting");

    let builder = SessionBuilder::with_model_provider(config.model_provider())
        .with_assessment_policy(config.assessment_policy());
    let mut registry = SessionRegistry::default();
    let id = registry.open(builder);
    let Some(session) = registry.get_mut(id) else {
        return ExitCode::FAILURE;
    };

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let reply = with_spinner(&progress_style, session.start()).await;
    print_reply(&reply);

    let mut stdin = BufReader::new(io::stdin()).lines();

    while !session.is_complete() {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line(&mut stdin).await else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let reply =
            with_spinner(&progress_style, session.send_message(&line)).await;
        print_reply(&reply);
    }

    if session.is_complete() {
        return export(session, &config).await;
    }
    ExitCode::SUCCESS
}

/// Drives `fut` while a spinner ticks on the terminal.
async fn with_spinner<F: Future>(style: &ProgressStyle, fut: F) -> F::Output {
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(style.clone());
    progress_bar.set_message("🤔 Thinking...");

    let mut fut = pin!(fut);
    let output = loop {
        progress_bar.inc(1);
        let sleep = sleep(Duration::from_millis(100));
        select! {
            output = &mut fut => break output,
            _ = sleep => {}
        }
    };

    // Finish the progress bar before printing anything else.
    progress_bar.finish_and_clear();
    output
}

fn print_reply(reply: &Reply) {
    match reply {
        Reply::Generated(text) => {
            println!("{}🤖 {}", BAR_CHAR.bright_cyan(), text.bright_white());
        }
        Reply::Rejected { message, .. } => {
            println!("{}⚠️  {}", BAR_CHAR.bright_yellow(), message.yellow());
        }
        Reply::ModelFailed { message, .. } => {
            println!("{}❌ {}", BAR_CHAR.bright_red(), message.red());
        }
        Reply::Closed(message) => {
            println!("{}🤖 {}", BAR_CHAR.bright_cyan(), message.bright_white());
        }
    }
    println!();
}

async fn export(session: &Session, config: &Config) -> ExitCode {
    let Some(record) = session.record() else {
        return ExitCode::SUCCESS;
    };
    match record.to_json_pretty() {
        Ok(json) => {
            println!("{}", "Interview summary".bold());
            println!("{json}");
        }
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    }

    if let Some(dir) = config.record_dir() {
        match record.save_to_dir(dir, session.id()).await {
            Ok(path) => println!("Saved to {}", path.display().dimmed()),
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

/// Reads the next line. The same reader must be used for the whole session,
/// or lines it already buffered are lost.
async fn read_line<R: AsyncBufRead + Unpin>(
    lines: &mut Lines<R>,
) -> Option<String> {
    match lines.next_line().await {
        Ok(line) => line,
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_line_keeps_buffered_input() {
        let input: &[u8] = b"Alice\n\nalice@example.com\n";
        let mut lines = input.lines();
        assert_eq!(read_line(&mut lines).await.as_deref(), Some("Alice"));
        assert_eq!(read_line(&mut lines).await.as_deref(), Some(""));
        assert_eq!(
            read_line(&mut lines).await.as_deref(),
            Some("alice@example.com")
        );
        assert_eq!(read_line(&mut lines).await, None);
    }
}
