//! The mutually-prioritized search filter driving every listing query.

/// Exactly one filter is active at a time. When several raw inputs are
/// non-blank, priority is Barcode > Name > Category > None.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterState {
    Barcode(String),
    Name(String),
    Category(String),
    /// No criteria: the popularity-sorted listing.
    #[default]
    None,
}

impl FilterState {
    /// Resolves raw UI inputs into the single active filter.
    ///
    /// Blank and whitespace-only values count as empty. The surviving value
    /// is trimmed.
    #[must_use]
    pub fn resolve(barcode: &str, name: &str, category: &str) -> Self {
        fn active(s: &str) -> Option<&str> {
            let t = s.trim();
            (!t.is_empty()).then_some(t)
        }

        if let Some(code) = active(barcode) {
            FilterState::Barcode(code.to_string())
        } else if let Some(q) = active(name) {
            FilterState::Name(q.to_string())
        } else if let Some(c) = active(category) {
            FilterState::Category(c.to_string())
        } else {
            FilterState::None
        }
    }

    /// Returns `true` for the single-item barcode lookup, where pagination
    /// is meaningless.
    #[must_use]
    pub fn is_barcode(&self) -> bool {
        matches!(self, FilterState::Barcode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barcode_wins_over_everything() {
        let f = FilterState::resolve("123", "chocolate", "snacks");
        assert_eq!(f, FilterState::Barcode("123".into()));
    }

    #[test]
    fn name_wins_over_category() {
        let f = FilterState::resolve("", "chocolate", "snacks");
        assert_eq!(f, FilterState::Name("chocolate".into()));
    }

    #[test]
    fn category_when_barcode_and_name_blank() {
        let f = FilterState::resolve("  ", "\t", "snacks");
        assert_eq!(f, FilterState::Category("snacks".into()));
    }

    #[test]
    fn all_blank_is_none() {
        assert_eq!(FilterState::resolve("", "  ", ""), FilterState::None);
    }

    #[test]
    fn surviving_value_is_trimmed() {
        let f = FilterState::resolve("", " chocolate ", "");
        assert_eq!(f, FilterState::Name("chocolate".into()));
    }
}
