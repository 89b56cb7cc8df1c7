//! Route commands: visit a path, list guarded routes.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use gatehouse_auth::{RouteAccess, RouteTable, VisitOutcome};
use gatehouse_core::config::AppConfig;
use gatehouse_core::error::AppError;

use super::PageLoad;
use crate::output::{self, OutputFormat};

/// Arguments for the visit command
#[derive(Debug, Args)]
pub struct VisitArgs {
    /// Path to open, e.g. /dashboard
    pub path: String,
}

/// Route display row
#[derive(Debug, Serialize, Tabled)]
struct RouteRow {
    /// Path
    path: String,
    /// Access
    access: String,
    /// Redirects to
    fallback: String,
}

/// Open a path through the guards
pub async fn visit(args: &VisitArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let page = PageLoad::open(config, &args.path).await;

    if !page.routes.converges() {
        output::print_warning("Public entry and landing routes are not guarded in opposite ways");
    }

    let visit = page.routes.open(&page.manager.snapshot(), &page.navigator)?;

    match format {
        OutputFormat::Json => output::print_json(&visit),
        OutputFormat::Table => {
            output::print_kv("Requested", &args.path);
            output::print_kv("Showing", &visit.path);
            let outcome = match visit.outcome {
                VisitOutcome::Rendered => "view",
                VisitOutcome::Placeholder => "placeholder",
            };
            output::print_kv("Outcome", outcome);
            if !visit.redirects.is_empty() {
                output::print_kv("Redirects", &visit.redirects.join(" -> "));
            }
        }
    }

    Ok(())
}

/// List configured routes
pub fn list(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let table = RouteTable::from_config(&config.routes);

    let rows: Vec<RouteRow> = table
        .entries()
        .map(|(path, access)| RouteRow {
            path: path.to_string(),
            access: access.to_string(),
            fallback: table
                .guard_for(path)
                .map(|g| g.fallback().to_string())
                .unwrap_or_default(),
        })
        .collect();

    output::print_list(&rows, format);

    if format == OutputFormat::Table && !table.converges() {
        output::print_warning(&format!(
            "'{}' should be {} and '{}' should be {}",
            config.routes.public_entry,
            RouteAccess::Anonymous,
            config.routes.authenticated_landing,
            RouteAccess::Protected,
        ));
    }

    Ok(())
}
