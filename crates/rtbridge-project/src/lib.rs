//! Sub-project discovery and wrapper crate synthesis.
//!
//! Application crates live in immediate subdirectories of an applications
//! directory. They are folded, together with the runtime-support crate
//! (`rt_rust`), into a generated wrapper crate whose only job is to re-export
//! everything as one `staticlib`.

pub mod discover;
pub mod error;
pub mod feature;
pub mod layout;
pub mod manifest;
pub mod synthesize;

pub use discover::{discover, SubProject};
pub use error::{ProjectError, Result};
pub use feature::select_feature;
pub use layout::ProjectLayout;
pub use manifest::WrapperManifest;
pub use synthesize::{aggregate, ensure_skeleton, synthesize, WrapperHandle};
