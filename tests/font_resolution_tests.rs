use pixel_surface::font::{FontError, FontPattern, FontResolver, LoadedFont, SystemFonts};

/// Path, family and face index of some file-backed installed font
fn any_installed_face() -> Option<(std::path::PathBuf, String, u32)> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let found = db.faces().find_map(|face| match &face.source {
        fontdb::Source::File(path) => face
            .families
            .first()
            .map(|(family, _)| (path.clone(), family.clone(), face.index)),
        _ => None,
    });
    found
}

// ============================================================================
// Resolution against an in-memory database
// ============================================================================

#[cfg(test)]
mod database_tests {
    use super::*;

    #[test]
    fn test_empty_database_has_no_match() {
        let resolver = FontResolver::new(fontdb::Database::new());
        let err = resolver.resolve("DejaVu Sans").unwrap_err();
        assert!(matches!(err, FontError::NoMatch(_)));
    }

    #[test]
    fn test_generic_family_with_empty_database() {
        let resolver = FontResolver::new(fontdb::Database::new());
        assert!(matches!(
            resolver.resolve("sans-serif:bold").unwrap_err(),
            FontError::NoMatch(_)
        ));
        assert!(matches!(
            resolver.resolve("").unwrap_err(),
            FontError::NoMatch(_)
        ));
    }

    #[test]
    fn test_generic_family_falls_back_to_only_face() {
        let Some((path, family, _)) = any_installed_face() else {
            return;
        };
        let mut db = fontdb::Database::new();
        db.load_font_file(&path).unwrap();
        let resolver = FontResolver::new(db);

        for spec in ["", "sans-serif", "serif:italic", "monospace", "cursive"] {
            let font = resolver.resolve(spec).unwrap();
            assert_eq!(font.path(), path.as_path(), "{:?}", spec);
        }
        assert!(resolver.resolve(&family).is_ok());
    }

    #[test]
    fn test_font_loaded_from_bytes_has_no_path() {
        let Some((path, family, _)) = any_installed_face() else {
            return;
        };
        let mut db = fontdb::Database::new();
        db.load_font_data(std::fs::read(path).unwrap());

        let err = FontResolver::new(db).resolve(&family).unwrap_err();
        assert!(matches!(err, FontError::NoPath(_)));
    }

    #[test]
    fn test_font_file_in_database_resolves() {
        let Some((path, family, _)) = any_installed_face() else {
            return;
        };
        let mut db = fontdb::Database::new();
        db.load_font_file(&path).unwrap();

        // A collection may hold several faces of the family; any of them is fine
        let font = FontResolver::new(db).resolve(&family).unwrap();
        assert_eq!(font.path(), path.as_path());
        assert!(!font.data().is_empty());
    }
}

// ============================================================================
// Resolution against the host's installed fonts
// ============================================================================

#[cfg(test)]
mod system_tests {
    use super::*;

    #[test]
    fn test_unknown_family_fails_cleanly() {
        let resolver = FontResolver::new(SystemFonts);
        let err = resolver.resolve("No Such Family 7f3a9c").unwrap_err();
        assert!(matches!(err, FontError::NoMatch(_)));
    }

    #[test]
    fn test_installed_family_resolves() {
        let Some((_, family, _)) = any_installed_face() else {
            eprintln!("no file-backed system fonts, skipping");
            return;
        };

        let font = FontResolver::system().resolve(&family).unwrap();
        assert!(font.path().exists());
        assert!(!font.data().is_empty());
    }

    #[test]
    fn test_generic_families_resolve() {
        if any_installed_face().is_none() {
            eprintln!("no file-backed system fonts, skipping");
            return;
        }

        let resolver = FontResolver::system();
        for spec in ["", "sans-serif", "serif", "monospace", "mono:bold"] {
            match resolver.resolve(spec) {
                Ok(font) => assert!(font.path().exists(), "{:?}", spec),
                Err(e) => panic!("{:?} did not resolve: {}", spec, e),
            }
        }
    }

    #[test]
    fn test_family_names_ignore_case() {
        let Some((_, family, _)) = any_installed_face() else {
            return;
        };
        if !family.is_ascii() {
            return;
        }

        let resolver = FontResolver::system();
        let exact = resolver.resolve(&family).unwrap();
        let lower = resolver.resolve(&family.to_lowercase()).unwrap();
        assert_eq!(lower.path(), exact.path());
        assert_eq!(lower.family(), exact.family());
    }

    #[test]
    fn test_loaded_font_rejects_wrong_face_index() {
        let Some((path, family, _)) = any_installed_face() else {
            return;
        };
        let err = LoadedFont::from_file(family, path, 4096).unwrap_err();
        assert!(matches!(err, FontError::Unparsable { .. }));
    }
}

// ============================================================================
// Pattern parsing through the public API
// ============================================================================

#[cfg(test)]
mod pattern_tests {
    use super::*;
    use pixel_surface::font::{FamilyName, Slant};

    #[test]
    fn test_full_specification() {
        let mut pattern =
            FontPattern::parse("DejaVu Sans,sans-serif-11:style=Bold Italic:width=expanded")
                .unwrap();
        pattern.substitute_aliases();

        assert_eq!(
            pattern.families,
            vec![
                FamilyName::Named("DejaVu Sans".to_string()),
                FamilyName::SansSerif
            ]
        );
        assert_eq!(pattern.size, Some(11.0));
        assert_eq!(pattern.weight, Some(700));
        assert_eq!(pattern.slant, Some(Slant::Italic));
        assert_eq!(pattern.width, Some(125));
    }

    #[test]
    fn test_invalid_specification_reports_pattern_error() {
        let resolver = FontResolver::new(fontdb::Database::new());
        let err = resolver.resolve("Inter:slant=sideways").unwrap_err();
        assert!(matches!(err, FontError::InvalidPattern(_)));
    }
}
