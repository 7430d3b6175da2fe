use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::pattern::FontPattern;
use super::session::{FontSession, FontSource, SystemFonts};
use super::FontError;

/// A font face read from disk and verified to parse
#[derive(Clone)]
pub struct LoadedFont {
    family: String,
    path: PathBuf,
    index: u32,
    data: Arc<Vec<u8>>,
}

impl LoadedFont {
    /// Read `path` and check that it holds face number `index`
    pub fn from_file(
        family: impl Into<String>,
        path: impl Into<PathBuf>,
        index: u32,
    ) -> Result<Self, FontError> {
        let path = path.into();
        let data = std::fs::read(&path).map_err(|source| FontError::Load {
            path: path.clone(),
            source,
        })?;
        let data = Arc::new(data);

        let mut parsed = fontdb::Database::new();
        parsed.load_font_source(fontdb::Source::Binary(data.clone()));
        if !parsed.faces().any(|face| face.index == index) {
            return Err(FontError::Unparsable { path });
        }

        Ok(Self {
            family: family.into(),
            path,
            index,
            data,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("family", &self.family)
            .field("path", &self.path)
            .field("index", &self.index)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Maps font specification strings to loaded fonts
///
/// Every call opens its own session on the font source and drops it before
/// returning, whatever the outcome. Nothing is cached between calls.
#[derive(Debug, Default, Clone)]
pub struct FontResolver<S: FontSource = SystemFonts> {
    source: S,
}

impl FontResolver<SystemFonts> {
    pub fn system() -> Self {
        Self::new(SystemFonts)
    }
}

impl<S: FontSource> FontResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn resolve(&self, spec: &str) -> Result<LoadedFont, FontError> {
        let session = self.source.open();

        let mut pattern = FontPattern::parse(spec)?;
        session.substitute(&mut pattern);
        log::debug!("Font pattern for {:?}: {:?}", spec, pattern);

        let matched = session
            .best_match(&pattern)
            .ok_or_else(|| FontError::NoMatch(spec.to_string()))?;
        let path = matched
            .path
            .ok_or_else(|| FontError::NoPath(matched.family.clone()))?;

        let font = LoadedFont::from_file(matched.family, path, matched.index)?;
        log::info!(
            "Resolved font {:?} to {} ({})",
            spec,
            font.family(),
            font.path().display()
        );
        Ok(font)
    }
}
