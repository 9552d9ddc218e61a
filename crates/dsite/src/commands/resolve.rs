//! `dsite resolve` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use dsite_config::Config;
use dsite_nav::{Breakpoint, NavigationResolver, NavigationSession, RouteOutcome};
use dsite_site::{compile_navigation, load_site_description, navigation_links};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Route to resolve, e.g. `/components/button`.
    route: String,

    /// Path to configuration file (default: auto-discover dsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Viewport breakpoint (tiny, small, medium, large, huge, enormous).
    #[arg(short, long, default_value = "large")]
    breakpoint: Breakpoint,
}

impl ResolveArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let desc = load_site_description(&config.site_resolved)?;
        let navigation = compile_navigation(&navigation_links(&desc, &config.build_resolved))?;

        tracing::debug!(item_count = navigation.items.len(), "Compiled navigation for resolve");

        let resolver = NavigationResolver::new(Arc::from(navigation.items))?;
        let mut session = NavigationSession::new(resolver, desc.index_path(), self.breakpoint);
        let outcome = session.route_changed(&self.route);
        tracing::debug!(route = %self.route, outcome = ?outcome, "Resolved route");

        output.field("Route", &self.route);
        match &outcome {
            RouteOutcome::Active { .. } => {
                for (label, value) in describe(&outcome) {
                    output.field(label, &value);
                }
            }
            RouteOutcome::Redirect(_) | RouteOutcome::NotFound => {
                for (label, value) in describe(&outcome) {
                    output.warning(&format!("{label}: {value}"));
                }
            }
        }
        output.field(
            "Menu",
            &format!("{:?} ({})", session.menu().state(), session.menu().breakpoint()),
        );
        Ok(())
    }
}

/// Labelled lines describing a routing outcome.
fn describe(outcome: &RouteOutcome) -> Vec<(&'static str, String)> {
    match outcome {
        RouteOutcome::Active {
            key,
            selection_path,
        } => vec![
            ("Active", key.clone()),
            ("Selection", selection_path.join(" > ")),
        ],
        RouteOutcome::Redirect(target) => vec![("Redirect", target.clone())],
        RouteOutcome::NotFound => vec![("Outcome", "not found".to_owned())],
    }
}
