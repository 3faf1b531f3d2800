use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use user_search_core::{
    parse_id, ApiClient, Config, ReqwestTransport, SearchSession, SearchState, Searcher,
    ValidationError,
};

mod render;

use render::render;

#[derive(Parser)]
#[command(name = "user-search", about = "Look up a user and their posts by id")]
struct Cli {
    /// User id to look up (1-10). Omit for an interactive prompt.
    #[arg(allow_hyphen_values = true)]
    id: Option<String>,

    /// API base URL (overrides USER_SEARCH_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides USER_SEARCH_TIMEOUT_SECS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("invalid environment configuration")?;
    if let Some(url) = cli.base_url {
        config
            .set_base_url("--base-url", &url)
            .context("invalid command line")?;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "Loaded config");

    let api = ApiClient::http(&config.base_url, config.timeout)
        .context("failed to build HTTP client")?;
    let searcher = Searcher::new(api);

    match cli.id {
        Some(input) => {
            let state = searcher.search_input(&input).await;
            print_state(&state, cli.json, false)?;
            Ok(ExitCode::from(exit_status(&state)))
        }
        None => {
            interactive(&searcher, cli.json).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// 0 when a user was found, 1 on failure, 2 when the id has no user.
fn exit_status(state: &SearchState) -> u8 {
    match state {
        SearchState::NotFound { .. } => 2,
        SearchState::Failed { .. } => 1,
        _ => 0,
    }
}

/// What one line of interactive input asks for.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Search(u32),
    NothingToRetry,
    Reject(ValidationError),
    Quit,
    Skip,
}

fn next_action(session: &SearchSession, line: &str) -> Action {
    match line.trim() {
        "" => Action::Skip,
        "q" | "quit" => Action::Quit,
        "r" | "retry" => session
            .retry_id()
            .map_or(Action::NothingToRetry, Action::Search),
        input => match parse_id(input) {
            Ok(id) => Action::Search(id),
            Err(err) => Action::Reject(err),
        },
    }
}

fn print_state(state: &SearchState, json: bool, interactive: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(state).context("failed to encode state")?);
    } else {
        println!("{}", render(state, interactive));
    }
    Ok(())
}

/// Read ids from stdin until EOF or `q`. `r` repeats the last failed search.
async fn interactive(searcher: &Searcher<ReqwestTransport>, json: bool) -> Result<()> {
    let mut session = SearchSession::new();
    print_state(session.state(), json, true)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let id = match next_action(&session, &line) {
            Action::Search(id) => id,
            Action::Skip => continue,
            Action::Quit => break,
            Action::NothingToRetry => {
                println!("Nothing to retry.");
                continue;
            }
            Action::Reject(err) => {
                session.reject(err);
                print_state(session.state(), json, true)?;
                continue;
            }
        };

        let ticket = session.begin(id);
        print_state(session.state(), json, true)?;
        let state = searcher.search(id.into()).await;
        session.complete(ticket, state);
        print_state(session.state(), json, true)?;
    }
    Ok(())
}
