use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+(?: [A-Z][a-z]+)*").expect("regex compiles"));

/// Returns the run of capitalized words the text opens with, if any.
///
/// Names are assumed to come first. A sentence that starts with any other
/// capitalized word ("Tuesday at 3pm") will have that word taken as the name.
pub fn extract_name(text: &str) -> Option<&str> {
    LEADING_NAME_RE.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_at_start() {
        assert_eq!(
            extract_name("John Doe 7205551212 wants estimate"),
            Some("John Doe")
        );
    }

    #[test]
    fn test_single_name() {
        assert_eq!(extract_name("Alice needs a quote"), Some("Alice"));
    }

    #[test]
    fn test_longest_run_of_capitalized_words() {
        assert_eq!(
            extract_name("Mary Ann Smith called about gutters"),
            Some("Mary Ann Smith")
        );
    }

    #[test]
    fn test_lowercase_start_has_no_name() {
        assert_eq!(extract_name("call Bob tomorrow"), None);
    }

    #[test]
    fn test_leading_whitespace_has_no_name() {
        assert_eq!(extract_name(" Bob tomorrow"), None);
    }

    #[test]
    fn test_all_caps_word_is_not_a_name() {
        assert_eq!(extract_name("ASAP roof leak"), None);
    }

    #[test]
    fn test_double_space_ends_the_name() {
        assert_eq!(extract_name("John  Doe"), Some("John"));
    }

    // Known limitation: a capitalized day name at the start reads as a name.
    #[test]
    fn test_leading_day_name_is_taken_as_name() {
        assert_eq!(extract_name("Tuesday at 3pm"), Some("Tuesday"));
    }
}
