//! Build orchestration for rtbridge.
//!
//! Folds every discovered Rust application into the wrapper crate, builds it
//! with cargo for the resolved bare-metal target, and installs the resulting
//! `librust.a` where the host build links it from.
//!
//! Pipeline: discover -> resolve + probe -> synthesize -> select features ->
//! build -> install. See [`prebuild`].

pub mod clean;
pub mod command;
pub mod error;
pub mod flags;
pub mod install;
pub mod invoke;
pub mod link;
pub mod pipeline;

pub use clean::clean;
pub use command::CargoCommand;
pub use error::PipelineError;
pub use flags::{path_remaps, PathRemap, RustFlags};
pub use install::install_artifact;
pub use invoke::{build_invocation, invoke};
pub use link::LinkDirectives;
pub use pipeline::{
    prebuild, BuildArtifact, BuildResult, PipelineConfig, SkipReason, UnresolvedPolicy,
};
