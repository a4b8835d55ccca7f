/// Strip characters that shall never occur in login credentials
/// (leading/trailing whitespace and control characters).
pub fn sanitize(input: &str) -> String {
    input.trim().chars().filter(|c| !c.is_control()).collect()
}

/// Plausibility check for an email address
/// This is not RFC 5322 — the authentication backend has the final word,
/// this only rejects obvious garbage before a backend call is spent.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }
    let re = regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    re.is_match(email)
}

/// Password policy: at least 8 characters,
/// containing upper case, lower case, digit and special character.
pub fn validate_password(password: &str) -> bool {
    if password.chars().count() < 8 {
        return false;
    }
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| c.is_ascii_punctuation());
    has_upper && has_lower && has_digit && has_special
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_whitespace_and_controls() {
        assert_eq!(sanitize("  a.b@c.de  "), "a.b@c.de");
        assert_eq!(sanitize("pass\u{0}word\r\n"), "password");
        assert_eq!(sanitize("\tfoo\tbar"), "foobar");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn email_plausibility() {
        assert!(validate_email("a.b@c.de"));
        assert!(validate_email("user+tag@example.co.uk"));

        assert!(!validate_email(""));
        assert!(!validate_email("no-at-sign.example.com"));
        assert!(!validate_email("two@@example.com"));
        assert!(!validate_email("spaces in@example.com"));
        assert!(!validate_email("nodomain@"));
        assert!(!validate_email("@nolocal.com"));
        assert!(!validate_email("notld@example"));

        // length cap
        let local = "x".repeat(250);
        assert!(!validate_email(&format!("{}@ex.com", local)));
    }

    #[test]
    fn password_policy() {
        assert!(validate_password("TestPass1!"));
        assert!(validate_password("a1B!a1B!"));

        assert!(!validate_password(""));
        assert!(!validate_password("Short1!"));            // 7 chars
        assert!(!validate_password("alllowercase1!"));     // no upper
        assert!(!validate_password("ALLUPPERCASE1!"));     // no lower
        assert!(!validate_password("NoDigitsHere!"));      // no digit
        assert!(!validate_password("NoSpecials123"));      // no special
    }
}
