//! Category-name normalization for the dedicated category lookup path.

/// Normalizes a category display name into the URL-safe form the upstream
/// category endpoint expects.
///
/// Lowercases, trims, collapses whitespace runs into single hyphens, drops
/// every character outside `[a-z0-9-]`, collapses repeated hyphens, and
/// trims leading/trailing hyphens. Idempotent: `slug(slug(x)) == slug(x)`.
///
/// Only the dedicated category-listing path uses this; the search-based
/// fallback sends the raw label as a query parameter instead.
#[must_use]
pub fn slug(category: &str) -> String {
    let mut out = String::with_capacity(category.len());
    let mut pending_hyphen = false;

    for c in category.trim().to_lowercase().chars() {
        let mapped = if c.is_whitespace() || c == '-' {
            None
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            Some(c)
        } else {
            // Dropped characters do not act as separators.
            continue;
        };

        match mapped {
            Some(c) => {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(c);
            }
            None => pending_hyphen = true,
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates_spaces() {
        assert_eq!(slug("Plant Based Foods"), "plant-based-foods");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slug("  sugary   snacks \t drinks "), "sugary-snacks-drinks");
    }

    #[test]
    fn strips_characters_outside_the_safe_set() {
        assert_eq!(slug("Chocolats & pralinés!"), "chocolats-pralins");
        assert_eq!(slug("100% fruit juices"), "100-fruit-juices");
    }

    #[test]
    fn collapses_repeated_hyphens_and_trims_edges() {
        assert_eq!(slug("--dried--fruits--"), "dried-fruits");
        assert_eq!(slug("- -"), "");
    }

    #[test]
    fn empty_and_symbol_only_input_yields_empty() {
        assert_eq!(slug(""), "");
        assert_eq!(slug("***"), "");
    }

    #[test]
    fn is_idempotent() {
        for s in [
            "Plant Based Foods",
            "Chocolats & pralinés!",
            "--dried--fruits--",
            "déjà-vu drinks",
            "",
        ] {
            let once = slug(s);
            assert_eq!(slug(&once), once, "slug not idempotent for {s:?}");
        }
    }

    #[test]
    fn output_shape_is_hyphen_separated_alnum_runs() {
        for s in ["A b", "  x ", "&&", "Thé glacé 2L", "snacks"] {
            let out = slug(s);
            assert!(!out.starts_with('-') && !out.ends_with('-'), "{out:?}");
            assert!(!out.contains("--"), "{out:?}");
            assert!(
                out.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "{out:?}"
            );
        }
    }
}
