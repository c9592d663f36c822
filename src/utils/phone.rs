/// Normalize a free-form phone number for dispatch.
///
/// Anything already carrying a `+` country code is passed through unchanged.
/// Otherwise non-digits are stripped and a US country code is assumed: a
/// 10-digit number gets `+1`, an 11-digit number starting with `1` gets `+`.
/// Everything else is unnormalizable and the caller skips the recipient.
/// US-centric on purpose; the app only operates on US numbers today.
pub fn normalize_us_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('+') {
        return Some(trimmed.to_string());
    }

    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        10 => Some(format!("+1{}", digits)),
        11 if digits.starts_with('1') => Some(format!("+{}", digits)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_us_phone;

    #[test]
    fn ten_digits_get_us_country_code() {
        assert_eq!(
            normalize_us_phone("5551234567").as_deref(),
            Some("+15551234567")
        );
        assert_eq!(
            normalize_us_phone("(555) 123-4567").as_deref(),
            Some("+15551234567")
        );
    }

    #[test]
    fn eleven_digits_starting_with_one_get_a_plus() {
        assert_eq!(
            normalize_us_phone("15551234567").as_deref(),
            Some("+15551234567")
        );
    }

    #[test]
    fn plus_prefixed_input_passes_through() {
        assert_eq!(
            normalize_us_phone("+445551234567").as_deref(),
            Some("+445551234567")
        );
    }

    #[test]
    fn garbage_is_unnormalizable() {
        assert_eq!(normalize_us_phone("abc"), None);
        assert_eq!(normalize_us_phone(""), None);
        assert_eq!(normalize_us_phone("123456"), None);
        assert_eq!(normalize_us_phone("25551234567"), None);
    }
}
