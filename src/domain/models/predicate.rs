use crate::domain::SearchSpec;

/// A "matches any of" content predicate, ready for the underlying search
/// facility (`git grep -E`).
///
/// Each literal is escaped independently so extended-regex metacharacters
/// match themselves; the escaped patterns are combined with logical OR by the
/// adapter. Patterns keep the spec's insertion order, and because OR is
/// commutative the order never affects which commits match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    patterns: Vec<String>,
}

impl SearchPredicate {
    pub fn build(spec: &SearchSpec) -> Self {
        Self {
            patterns: spec.terms().iter().map(|t| escape_literal(t)).collect(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Escapes every POSIX extended-regex metacharacter in `literal`.
fn escape_literal(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if matches!(
            c,
            '\\' | '.' | '[' | ']' | '(' | ')' | '{' | '}' | '*' | '+' | '?' | '|' | '^' | '$'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn spec(terms: &[&str]) -> SearchSpec {
        SearchSpec::new(terms.iter().map(|t| t.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_plain_literals_pass_through() {
        let predicate = SearchPredicate::build(&spec(&["sk_live_ABC123"]));
        assert_eq!(predicate.patterns(), &["sk_live_ABC123"]);
    }

    #[test]
    fn test_metacharacters_are_escaped() {
        let predicate = SearchPredicate::build(&spec(&["a.b*c"]));
        assert_eq!(predicate.patterns(), &[r"a\.b\*c"]);
    }

    #[test]
    fn test_each_literal_escaped_independently() {
        let predicate = SearchPredicate::build(&spec(&["key(1)", "key[2]"]));
        assert_eq!(predicate.patterns(), &[r"key\(1\)", r"key\[2\]"]);
    }

    #[test]
    fn test_backslash_is_escaped_first() {
        let predicate = SearchPredicate::build(&spec(&[r"a\b"]));
        assert_eq!(predicate.patterns(), &[r"a\\b"]);
    }

    #[test]
    fn test_order_preserved_but_commutative_as_a_set() {
        let forward = SearchPredicate::build(&spec(&["alpha", "beta"]));
        let reversed = SearchPredicate::build(&spec(&["beta", "alpha"]));

        assert_eq!(forward.patterns()[0], "alpha");
        assert_eq!(reversed.patterns()[0], "beta");

        let forward_set: HashSet<_> = forward.patterns().iter().collect();
        let reversed_set: HashSet<_> = reversed.patterns().iter().collect();
        assert_eq!(forward_set, reversed_set);
    }
}
