//! Filesystem writer implementation.
//!
//! Provides [`FsWriter`] for persisting generated modules as pretty-printed
//! JSON files inside a build directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::writer::{ConfigWriter, GeneratedModule, WriteError, WriteErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem writer.
///
/// Writes each module to `{build_dir}/{name}.json`, creating the build
/// directory on first use. Output is pretty-printed with a trailing newline
/// so identical inputs produce byte-identical files.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use dsite_writer::{ConfigWriter, FsWriter};
///
/// let writer = FsWriter::new(PathBuf::from("dev-site-config/build"));
/// writer.write(&module)?;
/// ```
pub struct FsWriter {
    build_dir: PathBuf,
}

impl FsWriter {
    /// Create a new filesystem writer.
    ///
    /// # Arguments
    ///
    /// * `build_dir` - Directory that receives the generated files
    #[must_use]
    pub fn new(build_dir: PathBuf) -> Self {
        Self { build_dir }
    }

    /// Directory that receives the generated files.
    #[must_use]
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }
}

impl ConfigWriter for FsWriter {
    fn write(&self, module: &GeneratedModule) -> Result<(), WriteError> {
        fs::create_dir_all(&self.build_dir)
            .map_err(|e| WriteError::io(e, &self.build_dir).with_backend(BACKEND))?;

        let path = self.build_dir.join(module.file_name());
        let mut content = serde_json::to_string_pretty(module.body()).map_err(|e| {
            WriteError::new(WriteErrorKind::Serialize)
                .with_backend(BACKEND)
                .with_path(&path)
                .with_source(e)
        })?;
        content.push('\n');

        fs::write(&path, content).map_err(|e| WriteError::io(e, &path).with_backend(BACKEND))?;

        tracing::debug!(module = %module.name(), path = %path.display(), "Wrote module");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_write_creates_build_dir_and_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let build_dir = temp_dir.path().join("dev-site-config/build");
        let writer = FsWriter::new(build_dir.clone());
        let module = GeneratedModule::new("nameConfig", json!({"title": "Site"})).unwrap();

        writer.write(&module).unwrap();

        let content = fs::read_to_string(build_dir.join("nameConfig.json")).unwrap();
        assert_eq!(content, "{\n  \"title\": \"Site\"\n}\n");
    }

    #[test]
    fn test_write_overwrites_existing_module() {
        let temp_dir = tempfile::tempdir().unwrap();
        let writer = FsWriter::new(temp_dir.path().to_path_buf());

        writer
            .write(&GeneratedModule::new("menuItems", json!([1])).unwrap())
            .unwrap();
        writer
            .write(&GeneratedModule::new("menuItems", json!([2])).unwrap())
            .unwrap();

        let content = fs::read_to_string(temp_dir.path().join("menuItems.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, json!([2]));
    }

    #[test]
    fn test_write_into_file_path_fails_with_backend() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let writer = FsWriter::new(blocker.join("build"));

        let err = writer
            .write(&GeneratedModule::new("nameConfig", json!({})).unwrap())
            .unwrap_err();

        assert_eq!(err.backend, Some("Fs"));
        assert!(err.to_string().starts_with("[Fs]"));
    }
}
