//! `dsite generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use dsite_config::{CliSettings, Config};
use dsite_site::{generate_app_config, load_site_description};
use dsite_writer::FsWriter;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to configuration file (default: auto-discover dsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root directory for generated modules (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Site prefix for multi-site builds (overrides config).
    #[arg(long)]
    prefix: Option<String>,

    /// Default locale written to the settings config.
    #[arg(long, env = "DSITE_LOCALE")]
    locale: Option<String>,

    /// Add the test evidence link to the navigation.
    #[arg(long)]
    include_test_evidence: bool,

    /// Enable verbose output (show INFO logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl GenerateArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir,
            prefix: self.prefix,
            locale: self.locale,
            include_test_evidence: self.include_test_evidence.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            config_path = ?config.config_path,
            prefix = ?config.build_resolved.prefix,
            "Loaded configuration"
        );

        if let Some(path) = &config.config_path {
            output.field("Config", &path.display().to_string());
        }
        let build_dir = config.build_resolved.build_dir();
        output.field("Navigation", &config.site_resolved.navigation.display().to_string());
        output.field("Pages", &config.site_resolved.pages.display().to_string());
        output.field("Output", &build_dir.display().to_string());

        let desc = load_site_description(&config.site_resolved)?;
        tracing::debug!(
            link_count = desc.navigation.links.len(),
            page_count = desc.pages.len(),
            "Loaded site description"
        );
        let writer = FsWriter::new(build_dir.clone());
        let site = generate_app_config(&desc, &config.app, &config.build_resolved, &writer)?;

        tracing::debug!(
            module_count = site.modules().len(),
            build_dir = %build_dir.display(),
            "Wrote app config modules"
        );
        for module in site.modules() {
            output.info(&format!("  {}", module.file_name()));
        }
        output.field("Title", site.document_title());
        output.success(&format!(
            "Generated {} modules in {}",
            site.modules().len(),
            build_dir.display()
        ));
        Ok(())
    }
}
