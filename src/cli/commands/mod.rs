//! Subcommands of the `ngt` binary

pub mod estimate;
pub mod experiment;
pub mod inspect;
pub mod play;
