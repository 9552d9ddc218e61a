//! CLI error types.

use dsite_config::ConfigError;
use dsite_nav::NavError;
use dsite_site::{GenerateError, LoadError, TreeError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Nav(#[from] NavError),
}
