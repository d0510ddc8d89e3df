//! CLI subcommand implementations.

pub mod info;

pub use info::CmdInfo;
