//! CLI command definitions and dispatch.

pub mod route;
pub mod session;
pub mod token;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use gatehouse_auth::{FileStorage, HistoryNavigator, InitOutcome, RouteTable, SessionManager};
use gatehouse_core::config::AppConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::traits::{Navigator, SystemClock};

use crate::output::OutputFormat;

/// Gatehouse: token sessions with lazy expiry and route guards
#[derive(Debug, Parser)]
#[command(name = "gatehouse", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (extension optional)
    #[arg(short, long, default_value = "config/gatehouse")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the current session after startup reconciliation
    Status,
    /// Accept a token as if the login form had just succeeded
    Login(session::LoginArgs),
    /// End the session
    Logout,
    /// Open a path through the route guards
    Visit(route::VisitArgs),
    /// List guarded routes
    Routes,
    /// Create or inspect tokens
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Status => session::status(&config, self.format).await,
            Commands::Login(args) => session::login(args, &config, self.format).await,
            Commands::Logout => session::logout(&config, self.format).await,
            Commands::Visit(args) => route::visit(args, &config, self.format).await,
            Commands::Routes => route::list(&config, self.format),
            Commands::Token(args) => token::execute(args, self.format),
        }
    }
}

/// One simulated page load: store, history, and a reconciled session manager.
pub struct PageLoad {
    pub manager: SessionManager,
    pub navigator: Arc<dyn Navigator>,
    pub routes: RouteTable,
    pub init: InitOutcome,
}

impl PageLoad {
    /// Loads the page at `path` and runs startup reconciliation.
    pub async fn open(config: &AppConfig, path: &str) -> Self {
        let storage = Arc::new(FileStorage::new(&config.storage.path));
        let navigator: Arc<dyn Navigator> = Arc::new(HistoryNavigator::new(path));

        let manager = SessionManager::new(
            storage,
            Arc::new(SystemClock),
            navigator.clone(),
            config.session.clone(),
            &config.routes,
        );
        let init = manager.initialize().await;
        debug!(path = %path, init = ?init, "Page loaded");

        Self {
            manager,
            navigator,
            routes: RouteTable::from_config(&config.routes),
            init,
        }
    }
}
