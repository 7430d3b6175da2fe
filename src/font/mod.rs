//! Font resolution through the host's font-configuration service.

pub mod pattern;
pub mod resolver;
pub mod session;

use std::path::PathBuf;

pub use pattern::{FamilyName, FontPattern, PatternError, Slant};
pub use resolver::{FontResolver, LoadedFont};
pub use session::{DatabaseSession, FontMatch, FontSession, FontSource, SystemFonts};

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("invalid font specification: {0}")]
    InvalidPattern(#[from] PatternError),

    #[error("no installed font matches {0:?}")]
    NoMatch(String),

    #[error("matched font {0:?} has no file path")]
    NoPath(String),

    #[error("failed to read font file {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a usable font file", path.display())]
    Unparsable { path: PathBuf },
}
