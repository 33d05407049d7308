mod semantic;
mod version_tag;

pub use semantic::Semantic;
pub use version_tag::{TagScope, VersionTag};

/// Strip `prefix` from the start of `text`, ignoring ASCII case.
///
/// Returns `None` when the prefix is not present. An empty prefix always
/// matches.
pub(crate) fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(text);
    }
    if text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::strip_prefix_ignore_case;

    #[rstest]
    #[case::exact("v1.0.0", "v", Some("1.0.0"))]
    #[case::upper_tag("V1.0.0", "v", Some("1.0.0"))]
    #[case::upper_prefix("v1.0.0", "V", Some("1.0.0"))]
    #[case::empty_prefix("1.0.0", "", Some("1.0.0"))]
    #[case::absent("1.0.0", "v", None)]
    #[case::longer_prefix("v1", "ver", None)]
    fn strip_prefix_cases(
        #[case] text: &str,
        #[case] prefix: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(expected, strip_prefix_ignore_case(text, prefix));
    }
}
