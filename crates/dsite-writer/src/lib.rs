//! Generated module persistence for dsite.
//!
//! The site compiler produces a set of named modules (`nameConfig`,
//! `menuItems`, `siteConfig`, ...). This crate provides the [`ConfigWriter`]
//! trait that persists them, decoupling compilation from I/O:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (build directory today, anything tomorrow)
//! - **Clean separation** between tree compilation and file output
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ConfigWriter`] trait with a single `write()` method
//! - [`FsWriter`] writing `<name>.json` files into a build directory
//! - [`MockWriter`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use dsite_writer::{ConfigWriter, FsWriter, GeneratedModule};
//!
//! let writer = FsWriter::new(PathBuf::from("dev-site-config/build"));
//! let module = GeneratedModule::new("nameConfig", serde_json::json!({"title": "Site"}))?;
//! writer.write(&module)?;
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod writer;

pub use fs::FsWriter;
#[cfg(feature = "mock")]
pub use mock::MockWriter;
pub use writer::{ConfigWriter, GeneratedModule, WriteError, WriteErrorKind};
