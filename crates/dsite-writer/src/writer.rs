//! Writer trait and error types.
//!
//! Provides the core [`ConfigWriter`] trait for persisting generated modules,
//! along with [`WriteError`] for unified error handling across backends.
//!
//! # Module Naming
//!
//! A module is identified by its logical name (`"nameConfig"`, `"menuItems"`),
//! never by a file path. Writers map the name to their own storage format:
//! - file name: `<name>.json`
//! - import path used by other generated modules: `./<name>`

use std::path::PathBuf;

use serde::Serialize;

/// A named module produced by the compiler, ready to be persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedModule {
    name: String,
    body: serde_json::Value,
}

impl GeneratedModule {
    /// Create a module from an already-built JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`WriteErrorKind::InvalidName`] if the name is empty or is not
    /// a plain identifier-like file stem (no separators, no leading dot).
    pub fn new(name: impl Into<String>, body: serde_json::Value) -> Result<Self, WriteError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, body })
    }

    /// Create a module by serializing `value`.
    ///
    /// # Errors
    ///
    /// Returns [`WriteErrorKind::InvalidName`] for invalid names and
    /// [`WriteErrorKind::Serialize`] if `value` cannot be represented as JSON.
    pub fn from_serialize<T: Serialize + ?Sized>(
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self, WriteError> {
        let name = name.into();
        let body = serde_json::to_value(value)
            .map_err(|e| WriteError::new(WriteErrorKind::Serialize).with_source(e))?;
        Self::new(name, body)
    }

    /// Logical module name (also the import alias).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module body.
    #[must_use]
    pub fn body(&self) -> &serde_json::Value {
        &self.body
    }

    /// File name a filesystem backend stores this module under.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name)
    }

    /// Relative import path other generated modules use to reference this one.
    #[must_use]
    pub fn import_path(&self) -> String {
        format!("./{}", self.name)
    }
}

fn validate_name(name: &str) -> Result<(), WriteError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && name.chars().all(|c| !c.is_control());
    if valid {
        Ok(())
    } else {
        Err(WriteError::new(WriteErrorKind::InvalidName).with_path(name))
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum WriteErrorKind {
    /// Output location does not exist and could not be created.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Module name cannot be mapped to an output location.
    InvalidName,
    /// Module body could not be serialized.
    Serialize,
    /// Other/unknown error category.
    Other,
}

/// Write error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct WriteError {
    /// Semantic error category.
    pub kind: WriteErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl WriteError {
    /// Create a new write error.
    #[must_use]
    pub fn new(kind: WriteErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a write error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => WriteErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => WriteErrorKind::PermissionDenied,
            _ => WriteErrorKind::Other,
        };
        Self::new(kind).with_path(path).with_source(err)
    }
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            WriteErrorKind::NotFound => "Not found",
            WriteErrorKind::PermissionDenied => "Permission denied",
            WriteErrorKind::InvalidName => "Invalid module name",
            WriteErrorKind::Serialize => "Serialization failed",
            WriteErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Persistence backend for generated modules.
///
/// Implementations receive fully compiled modules; they never see partially
/// compiled output. Each call persists exactly one module; writing the same
/// name twice replaces the earlier content.
pub trait ConfigWriter: Send + Sync {
    /// Persist one module.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] if the module cannot be stored.
    fn write(&self, module: &GeneratedModule) -> Result<(), WriteError>;
}
