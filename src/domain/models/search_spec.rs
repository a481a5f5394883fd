use crate::domain::DomainError;

/// The ordered, non-empty collection of literal strings to search for.
///
/// Literals are exact substrings, never patterns. Duplicates collapse to the
/// first occurrence so the composed predicate stays minimal. An empty list is
/// a configuration error: a scan with nothing to look for is a caller
/// mistake, not a condition to recover from.
#[derive(Debug, Clone)]
pub struct SearchSpec {
    terms: Vec<String>,
}

impl SearchSpec {
    pub fn new(terms: Vec<String>) -> Result<Self, DomainError> {
        let mut distinct: Vec<String> = Vec::with_capacity(terms.len());
        for term in terms {
            if term.is_empty() {
                continue;
            }
            if !distinct.contains(&term) {
                distinct.push(term);
            }
        }

        if distinct.is_empty() {
            return Err(DomainError::config(
                "You must supply at least one string to search for",
            ));
        }

        Ok(Self { terms: distinct })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_keeps_insertion_order() {
        let spec = SearchSpec::new(vec!["b".into(), "a".into(), "c".into()]).unwrap();
        assert_eq!(spec.terms(), &["b", "a", "c"]);
    }

    #[test]
    fn test_spec_deduplicates_preserving_first() {
        let spec = SearchSpec::new(vec!["a".into(), "b".into(), "a".into()]).unwrap();
        assert_eq!(spec.terms(), &["a", "b"]);
        assert_eq!(spec.len(), 2);
    }

    #[test]
    fn test_empty_spec_is_config_error() {
        let err = SearchSpec::new(vec![]).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_blank_terms_are_ignored() {
        let err = SearchSpec::new(vec!["".into()]).unwrap_err();
        assert!(err.is_config_error());
    }
}
