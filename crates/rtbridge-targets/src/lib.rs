//! Architecture profiles and Rust target resolution.
//!
//! The host build describes the hardware through configuration symbols and a
//! raw C compiler flag string. This crate turns those into an [`ArchProfile`]
//! and resolves the profile to a bare-metal Rust target identifier:
//!
//! - **Symbols:** [`ConfigSymbols`] abstracts the host's `symbol -> bool` predicate
//! - **Flags:** [`CompilerFlags`] extracts `-march`, `-mabi`, `-mcpu`, `-mfpu`, `-mfloat-abi`
//! - **Profile:** [`ArchProfile`] is derived once per invocation
//! - **Resolution:** [`resolve_target`] picks the first matching rule, or nothing

pub mod flags;
pub mod profile;
pub mod resolve;
pub mod symbols;
pub mod triple;

pub use flags::CompilerFlags;
pub use profile::{ArchFamily, ArchProfile, CortexCore, FpuFlags};
pub use resolve::resolve_target;
pub use symbols::{ConfigSymbols, SymbolSet};
pub use triple::TargetTriple;
