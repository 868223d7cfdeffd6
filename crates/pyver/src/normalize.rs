use std::borrow::Cow;

#[cfg(feature = "tracing")]
use tracing::trace;

/// Surface cleanup applied to every version string before it is scanned.
///
/// Strips surrounding ASCII whitespace, lowercases ASCII letters and drops a single leading
/// `v` (<https://peps.python.org/pep-0440/#preceding-v-character>). Never fails and never
/// looks at the structure of the version; anything else is left for the parser to reject.
///
/// Borrows from the input when no change is needed.
pub fn normalize(version: &str) -> Cow<'_, str> {
    let trimmed = version.trim_matches(|c: char| c.is_ascii_whitespace());
    let stripped = match trimmed.as_bytes().first() {
        Some(b'v' | b'V') => &trimmed[1..],
        _ => trimmed,
    };

    let normalized = if stripped.bytes().any(|byte| byte.is_ascii_uppercase()) {
        Cow::Owned(stripped.to_ascii_lowercase())
    } else {
        Cow::Borrowed(stripped)
    };

    #[cfg(feature = "tracing")]
    {
        if normalized.len() != version.len() || matches!(normalized, Cow::Owned(_)) {
            trace!("Normalized version input `{version}` to `{normalized}`");
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use test_case::test_case;

    use super::normalize;

    #[test_case("1.0", "1.0"; "unchanged")]
    #[test_case("  1.0\t\n", "1.0"; "surrounding whitespace")]
    #[test_case("v1.0", "1.0"; "v prefix")]
    #[test_case("V1.0", "1.0"; "uppercase v prefix")]
    #[test_case(" v1.0RC1 ", "1.0rc1"; "everything at once")]
    #[test_case("1.0 dev1", "1.0 dev1"; "internal whitespace is kept")]
    #[test_case("vv1.0", "v1.0"; "only one v is dropped")]
    #[test_case("", ""; "empty")]
    #[test_case("  ", ""; "only whitespace")]
    #[test_case("1.0+ÄBC", "1.0+Äbc"; "non ascii is left alone")]
    fn normalizes(input: &str, expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn borrows_when_clean() {
        assert!(matches!(normalize("1.0.post1"), Cow::Borrowed("1.0.post1")));
        assert!(matches!(normalize(" 1.0 "), Cow::Borrowed("1.0")));
        assert!(matches!(normalize("1.0A1"), Cow::Owned(_)));
    }

    #[test]
    #[cfg(feature = "tracing")]
    #[tracing_test::traced_test]
    fn logs_changed_input() {
        normalize(" V1.0 ");
        assert!(logs_contain("Normalized version input ` V1.0 ` to `1.0`"));
    }
}
