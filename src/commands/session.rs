//! Session commands: status, login, logout.

use clap::Args;
use serde::Serialize;

use gatehouse_auth::{InitOutcome, SessionManager};
use gatehouse_core::config::AppConfig;
use gatehouse_core::error::AppError;

use super::PageLoad;
use crate::output::{self, OutputFormat};

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Bearer token issued by the server
    pub token: String,
}

/// Session summary for display
#[derive(Debug, Serialize)]
struct SessionSummary {
    initialization: String,
    authenticated: bool,
    user_id: String,
    name: String,
    email: String,
    role: String,
    expires_at: Option<String>,
    remaining_minutes: Option<i64>,
    page: String,
}

impl SessionSummary {
    fn new(manager: &SessionManager, init: InitOutcome, page: String) -> Self {
        let identity = manager.identity().unwrap_or_default();
        Self {
            initialization: format!("{init:?}"),
            authenticated: manager.is_authenticated(),
            user_id: identity.user_id,
            name: identity.name,
            email: identity.email,
            role: identity.role_name,
            expires_at: manager.expires_at().map(|t| t.to_rfc3339()),
            remaining_minutes: manager.remaining().map(|d| d.num_minutes()),
            page,
        }
    }

    fn print(&self, format: OutputFormat) {
        match format {
            OutputFormat::Json => output::print_json(self),
            OutputFormat::Table => {
                output::print_kv("Initialization", &self.initialization);
                output::print_kv("Authenticated", &self.authenticated.to_string());
                if self.authenticated {
                    output::print_kv("User ID", &self.user_id);
                    output::print_kv("Name", &self.name);
                    output::print_kv("Email", &self.email);
                    output::print_kv("Role", &self.role);
                    output::print_kv("Expires", self.expires_at.as_deref().unwrap_or("-"));
                    if let Some(minutes) = self.remaining_minutes {
                        output::print_kv("Remaining", &format!("{minutes} min"));
                    }
                }
                output::print_kv("Page", &self.page);
            }
        }
    }
}

/// Show the session as reconciled at startup
pub async fn status(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let page = PageLoad::open(config, &config.routes.authenticated_landing).await;
    let summary = SessionSummary::new(&page.manager, page.init, page.navigator.current());
    summary.print(format);
    Ok(())
}

/// Accept a token from the login screen
pub async fn login(
    args: &LoginArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let page = PageLoad::open(config, &config.routes.public_entry).await;

    page.manager.login(&args.token);

    // The login screen's anonymous guard reacts to the new state.
    let visit = page.routes.open(&page.manager.snapshot(), &page.navigator)?;

    if format == OutputFormat::Table {
        match page.manager.identity() {
            _ if args.token.trim().is_empty() => output::print_warning("Empty token ignored"),
            Some(identity) if !identity.is_empty() => {
                output::print_success(&format!("Logged in as {}", identity.user_id));
            }
            _ => output::print_warning("Logged in, but the token carries no readable claims"),
        }
    }

    SessionSummary::new(&page.manager, page.init, visit.path).print(format);
    Ok(())
}

/// End the session
pub async fn logout(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let page = PageLoad::open(config, &config.routes.authenticated_landing).await;
    let was_authenticated = page.manager.is_authenticated();

    page.manager.logout();
    let visit = page.routes.open(&page.manager.snapshot(), &page.navigator)?;

    if format == OutputFormat::Table {
        if was_authenticated {
            output::print_success("Logged out");
        } else {
            output::print_warning("No active session");
        }
    }

    SessionSummary::new(&page.manager, page.init, visit.path).print(format);
    Ok(())
}
