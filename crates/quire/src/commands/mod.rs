//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod config_args;
pub(crate) mod presets;
pub(crate) mod resolve;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;
