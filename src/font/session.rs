use std::path::PathBuf;

use super::pattern::{FamilyName, FontPattern};

/// A matched face as reported by the font service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontMatch {
    pub family: String,
    /// Face index inside a collection file
    pub index: u32,
    /// `None` when the face does not come from a file on disk
    pub path: Option<PathBuf>,
}

/// One scoped session with a font-configuration service
pub trait FontSession {
    /// Apply the service's configuration and default substitution
    fn substitute(&self, pattern: &mut FontPattern) {
        pattern.substitute_aliases();
        pattern.substitute_defaults();
    }

    /// Best installed face for a fully substituted pattern
    fn best_match(&self, pattern: &FontPattern) -> Option<FontMatch>;
}

/// Opens font sessions; each resolution gets a fresh one
pub trait FontSource {
    type Session: FontSession;

    fn open(&self) -> Self::Session;
}

/// The host's installed fonts
///
/// On Linux `fontdb` reads the fontconfig configuration to locate them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFonts;

impl FontSource for SystemFonts {
    type Session = DatabaseSession;

    fn open(&self) -> DatabaseSession {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("Font session opened with {} faces", db.len());
        DatabaseSession::new(db)
    }
}

/// A prepared database, e.g. with bundled fonts; each session gets a copy
impl FontSource for fontdb::Database {
    type Session = DatabaseSession;

    fn open(&self) -> DatabaseSession {
        DatabaseSession::new(self.clone())
    }
}

/// Session backed by a `fontdb::Database`
pub struct DatabaseSession {
    db: fontdb::Database,
}

impl DatabaseSession {
    pub fn new(db: fontdb::Database) -> Self {
        Self { db }
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Installed family spelled like `name`, ignoring case and blanks
    fn installed_family(&self, name: &str) -> Option<&str> {
        self.db
            .faces()
            .flat_map(|face| face.families.iter())
            .map(|(family, _)| family.as_str())
            .find(|family| same_family(family, name))
    }

    /// Family of the first face that lives in a file
    fn any_file_family(&self) -> Option<&str> {
        self.db
            .faces()
            .filter(|face| !matches!(face.source, fontdb::Source::Binary(_)))
            .find_map(|face| face.families.first())
            .map(|(family, _)| family.as_str())
    }

    /// Query families for `pattern`, in preference order
    ///
    /// Named families take the installed spelling. A generic family expands
    /// to the configured alias, then its installed preferences, and finally
    /// any file-backed face, so it always matches when fonts are installed.
    fn candidates<'a>(&'a self, pattern: &'a FontPattern) -> Vec<fontdb::Family<'a>> {
        let mut families = Vec::new();
        let mut has_generic = false;

        for family in &pattern.families {
            match family {
                FamilyName::Named(name) => {
                    let name = self.installed_family(name).unwrap_or(name.as_str());
                    families.push(fontdb::Family::Name(name));
                }
                generic => {
                    has_generic = true;
                    families.push(generic.to_fontdb());
                    families.extend(
                        generic
                            .preferred()
                            .iter()
                            .filter_map(|name| self.installed_family(name))
                            .map(fontdb::Family::Name),
                    );
                }
            }
        }

        if has_generic {
            if let Some(name) = self.any_file_family() {
                log::debug!("Last resort family for {:?}: {}", pattern.families, name);
                families.push(fontdb::Family::Name(name));
            }
        }
        families
    }
}

/// Family name comparison as fontconfig does it
fn same_family(a: &str, b: &str) -> bool {
    fn folded(s: &str) -> impl Iterator<Item = u8> + '_ {
        s.bytes()
            .filter(|b| *b != b' ')
            .map(|b| b.to_ascii_lowercase())
    }
    folded(a).eq(folded(b))
}

impl FontSession for DatabaseSession {
    fn best_match(&self, pattern: &FontPattern) -> Option<FontMatch> {
        let families = self.candidates(pattern);
        let query = fontdb::Query {
            families: &families,
            weight: pattern.fontdb_weight(),
            stretch: pattern.fontdb_stretch(),
            style: pattern.fontdb_style(),
        };

        let id = self.db.query(&query)?;
        let face = self.db.face(id)?;
        let path = match &face.source {
            fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => Some(path.clone()),
            fontdb::Source::Binary(_) => None,
        };
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| face.post_script_name.clone());

        Some(FontMatch {
            family,
            index: face.index,
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Database holding one file-backed system face, and that face's family
    fn single_face_database() -> Option<(fontdb::Database, String)> {
        let mut system = fontdb::Database::new();
        system.load_system_fonts();
        let found = system.faces().find_map(|face| match &face.source {
            fontdb::Source::File(path) => face
                .families
                .first()
                .map(|(family, _)| (path.clone(), family.clone())),
            _ => None,
        });
        let (path, family) = found?;

        let mut db = fontdb::Database::new();
        db.load_font_file(path).ok()?;
        Some((db, family))
    }

    fn session_match(session: &DatabaseSession, spec: &str) -> Option<FontMatch> {
        let mut pattern = FontPattern::parse(spec).unwrap();
        session.substitute(&mut pattern);
        session.best_match(&pattern)
    }

    #[test]
    fn test_empty_database_matches_nothing() {
        let session = DatabaseSession::new(fontdb::Database::new());
        let mut pattern = FontPattern::parse("DejaVu Sans").unwrap();
        session.substitute(&mut pattern);

        assert_eq!(session.face_count(), 0);
        assert_eq!(session.best_match(&pattern), None);
    }

    #[test]
    fn test_default_substitute_fills_pattern() {
        let session = DatabaseSession::new(fontdb::Database::new());
        let mut pattern = FontPattern::parse("mono").unwrap();
        session.substitute(&mut pattern);

        assert_eq!(pattern.families, vec![FamilyName::Monospace]);
        assert_eq!(pattern.weight, Some(400));
    }

    #[test]
    fn test_same_family() {
        assert!(same_family("DejaVu Sans", "dejavu sans"));
        assert!(same_family("DejaVu Sans", "DEJAVUSANS"));
        assert!(same_family("Noto Sans Mono", "notosans mono"));
        assert!(!same_family("DejaVu Sans", "DejaVu Serif"));
    }

    #[test]
    fn test_family_matches_ignoring_case() {
        let Some((db, family)) = single_face_database() else {
            return;
        };
        if !family.is_ascii() {
            return;
        }
        let session = DatabaseSession::new(db);

        let exact = session_match(&session, &family).unwrap();
        let lower = session_match(&session, &family.to_lowercase()).unwrap();
        let upper = session_match(&session, &family.to_uppercase()).unwrap();
        assert_eq!(lower, exact);
        assert_eq!(upper, exact);
    }

    #[test]
    fn test_generic_families_fall_back_to_installed_face() {
        let Some((db, _)) = single_face_database() else {
            return;
        };
        let session = DatabaseSession::new(db);

        for spec in ["", "sans-serif", "serif", "monospace", "mono:bold"] {
            let matched = session_match(&session, spec);
            assert!(
                matched.as_ref().is_some_and(|m| m.path.is_some()),
                "{:?} matched {:?}",
                spec,
                matched
            );
        }
    }

    #[test]
    fn test_unknown_named_family_has_no_fallback() {
        let Some((db, _)) = single_face_database() else {
            return;
        };
        let session = DatabaseSession::new(db);
        assert_eq!(session_match(&session, "No Such Family 7f3a9c"), None);
    }
}
