use once_cell::sync::Lazy;
use regex::Regex;

static GROUPED_PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(?\d{3}\)?[ .-]?\d{3}[ .-]?\d{4}").expect("regex compiles")
});

static BARE_PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{10}").expect("regex compiles"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMatch {
    /// Substring as it appeared in the text.
    pub raw: String,
    /// `DDD-DDD-DDDD`
    pub formatted: String,
}

/// Finds a US-style phone number, trying the grouped pattern before a bare
/// run of ten digits. A candidate is kept only if it holds exactly ten ASCII
/// digits once separators are stripped.
pub fn extract_phone(text: &str) -> Option<PhoneMatch> {
    [&*GROUPED_PHONE_RE, &*BARE_PHONE_RE]
        .into_iter()
        .find_map(|re| {
            let candidate = re.find(text)?;
            let formatted = format_phone(candidate.as_str())?;
            Some(PhoneMatch {
                raw: candidate.as_str().to_string(),
                formatted,
            })
        })
}

/// Formats anything carrying exactly ten digits as `DDD-DDD-DDDD`.
pub fn format_phone(s: &str) -> Option<String> {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 10 {
        return None;
    }
    Some(format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_digits() {
        let m = extract_phone("John 7205551212 wants estimate").unwrap();
        assert_eq!(m.raw, "7205551212");
        assert_eq!(m.formatted, "720-555-1212");
    }

    #[test]
    fn test_parenthesized_area_code() {
        let m = extract_phone("call (720) 555-1212 today").unwrap();
        assert_eq!(m.raw, "(720) 555-1212");
        assert_eq!(m.formatted, "720-555-1212");
    }

    #[test]
    fn test_dotted_and_hyphenated() {
        assert_eq!(
            extract_phone("720.555.1212").unwrap().formatted,
            "720-555-1212"
        );
        assert_eq!(
            extract_phone("reach me at 720-555-1212").unwrap().raw,
            "720-555-1212"
        );
    }

    #[test]
    fn test_formatted_number_is_stable() {
        for digits in ["0123456789", "9998887777", "3035550000"] {
            let formatted = format_phone(digits).unwrap();
            let again = extract_phone(&formatted).unwrap();
            assert_eq!(again.formatted, formatted);
            assert_eq!(again.raw, formatted);
        }
    }

    #[test]
    fn test_too_few_digits() {
        assert_eq!(extract_phone("call 555-1212"), None);
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // Arabic-Indic digits match \d but are not phone digits.
        assert_eq!(extract_phone("رقم ٧٢٠٥٥٥١٢١٢"), None);
    }

    #[test]
    fn test_format_phone_counts_digits_only() {
        assert_eq!(format_phone("(720) 555-1212"), Some("720-555-1212".to_string()));
        assert_eq!(format_phone("720-555-121"), None);
        assert_eq!(format_phone("No phone"), None);
    }
}
