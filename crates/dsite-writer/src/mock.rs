//! Mock writer implementation for testing.
//!
//! Provides [`MockWriter`] for unit testing without filesystem access.

use std::sync::RwLock;

use crate::writer::{ConfigWriter, GeneratedModule, WriteError, WriteErrorKind};

/// Mock writer for testing.
///
/// Records written modules in memory, in write order. Can be configured to
/// fail on a given module name to exercise error paths.
///
/// # Example
///
/// ```ignore
/// use dsite_writer::{ConfigWriter, MockWriter};
///
/// let writer = MockWriter::new();
/// writer.write(&module)?;
/// assert_eq!(writer.names(), vec!["nameConfig"]);
/// ```
#[derive(Debug, Default)]
pub struct MockWriter {
    modules: RwLock<Vec<GeneratedModule>>,
    fail_on: Option<String>,
}

impl MockWriter {
    /// Create a new empty mock writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes of the named module fail with [`WriteErrorKind::Other`].
    #[must_use]
    pub fn failing_on(mut self, name: impl Into<String>) -> Self {
        self.fail_on = Some(name.into());
        self
    }

    /// Names of written modules, in write order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.modules
            .read()
            .unwrap()
            .iter()
            .map(|m| m.name().to_owned())
            .collect()
    }

    /// Body of the most recent write of the named module.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<serde_json::Value> {
        self.modules
            .read()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.name() == name)
            .map(|m| m.body().clone())
    }

    /// Number of modules written so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.read().unwrap().len()
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConfigWriter for MockWriter {
    fn write(&self, module: &GeneratedModule) -> Result<(), WriteError> {
        if self.fail_on.as_deref() == Some(module.name()) {
            return Err(WriteError::new(WriteErrorKind::Other)
                .with_backend("Mock")
                .with_path(module.file_name()));
        }
        self.modules.write().unwrap().push(module.clone());
        Ok(())
    }
}
