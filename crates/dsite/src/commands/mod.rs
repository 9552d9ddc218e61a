//! CLI command implementations.

pub(crate) mod generate;
pub(crate) mod resolve;

pub(crate) use generate::GenerateArgs;
pub(crate) use resolve::ResolveArgs;
