//! CLI command implementations

mod accounts;
mod auth;
mod books;
mod orders;

pub use accounts::{
    block_client, delete_employee, list_clients, list_employees, show_client, show_employee,
    unblock_client,
};
pub use auth::{forgot_password, login, logout, register, reset_password, whoami};
pub use books::{delete_book, search_books, show_book};
pub use orders::{assign_order, list_orders, place_order};

use anyhow::{bail, Context as _, Result};
use bookstore_client::{Bookstore, ClientConfig, SearchController, SearchSource};
use bookstore_core::{FileSessionStore, QueryParams, Session, SortOptionMap};
use directories::ProjectDirs;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Everything a command needs: the configured client and output mode
pub struct Context {
    pub bookstore: Bookstore,
    pub json: bool,
}

impl Context {
    /// Build the client from flags, falling back to the environment
    pub async fn connect(
        api_url: Option<String>,
        session_file: Option<PathBuf>,
        json: bool,
    ) -> Result<Self> {
        let config = match api_url {
            Some(url) => ClientConfig {
                base_url: ClientConfig::new(url).base_url,
                ..ClientConfig::from_env()
            },
            None => ClientConfig::from_env(),
        };

        let path = session_path(session_file)?;
        tracing::debug!(path = %path.display(), base_url = %config.base_url, "Opening session");
        let session = Session::load(Arc::new(FileSessionStore::new(&path)))
            .await
            .with_context(|| format!("Failed to open session file {}", path.display()))?;

        Ok(Self {
            bookstore: Bookstore::new(config, session)?,
            json,
        })
    }

    /// Print `value` as pretty JSON
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn session_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Ok(path) = std::env::var("BOOKSTORE_SESSION_PATH") {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    let dirs = ProjectDirs::from("", "", "bookstore")
        .context("Could not determine a data directory, pass --session-file")?;
    Ok(dirs.data_dir().join("session.json"))
}

/// Query string from optional CLI values; unset and empty values are dropped
pub fn query(pairs: Vec<(&str, Option<String>)>) -> QueryParams {
    QueryParams::from_pairs(
        pairs
            .into_iter()
            .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v))),
    )
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

/// Run one search cycle and print the resulting page
pub async fn run_search<S>(
    ctx: &Context,
    controller: SearchController<S>,
    params: &QueryParams,
    render: impl Fn(&S::Item) -> String,
) -> Result<()>
where
    S: SearchSource,
    S::Item: Serialize,
{
    let spinner = spinner("Loading results")?;
    controller.mount(params).await;
    spinner.finish_and_clear();

    let state = controller.state().await;
    if state.error {
        bail!(
            "{}",
            state
                .error_message
                .unwrap_or_else(|| "Loading results failed".to_string())
        );
    }

    if ctx.json {
        return ctx.print_json(&state);
    }

    if state.items.is_empty() {
        println!("No results");
    }
    for item in &state.items {
        println!("{}", render(item));
    }
    println!(
        "\nPage {} of {} ({} results)",
        state.current_page,
        state.total_pages.max(1),
        state.total_results
    );
    Ok(())
}

/// Print the sort labels a listing accepts
pub fn sort_options(options: &SortOptionMap) {
    for (label, spec) in options.iter() {
        println!("{:<24} {}", label, spec.to_query_value());
    }
}

/// Message for a failed call, pointing at `login` when the session is gone
pub fn user_error(err: bookstore_client::ClientError) -> anyhow::Error {
    if err.requires_login() {
        anyhow::anyhow!("{}. Run `bookstore login` first", err.user_message())
    } else {
        anyhow::anyhow!(err.user_message())
    }
}
