//! Link directives the host build needs to pull in the archive.

use std::path::PathBuf;

use serde::Serialize;

use rtbridge_project::layout::LIB_NAME;
use rtbridge_project::ProjectLayout;

/// How the host links `librust.a`: as a whole archive, with multiple
/// definitions allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkDirectives {
    pub search_dir: PathBuf,
    pub library: String,
}

impl LinkDirectives {
    pub fn for_layout(layout: &ProjectLayout) -> Self {
        Self {
            search_dir: layout.output_dir(),
            library: LIB_NAME.to_string(),
        }
    }

    /// Linker flags in the order the host passes them.
    pub fn flags(&self) -> Vec<String> {
        vec![
            format!("-L{}", self.search_dir.display()),
            "-Wl,--whole-archive".to_string(),
            format!("-l{}", self.library),
            "-Wl,--no-whole-archive".to_string(),
            "-Wl,--allow-multiple-definition".to_string(),
        ]
    }
}
