use validator::ValidationError;

pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Password policy: minimum length plus upper, lower, digit and symbol.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= PASSWORD_MIN_LENGTH;
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if long_enough && has_upper && has_lower && has_digit && has_symbol {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_strength");
        err.message = Some(
            "password must be at least 8 characters with upper, lower, digit and symbol".into(),
        );
        Err(err)
    }
}

/// Rejects strings that are empty once trimmed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_strong_password() {
        assert!(validate_password_strength("Xx1!aaaa").is_ok());
    }

    #[test]
    fn rejects_weak_passwords() {
        for weak in ["short1!", "alllower1!", "ALLUPPER1!", "NoDigits!!", "NoSymbol12"] {
            assert!(
                validate_password_strength(weak).is_err(),
                "{weak} should be rejected"
            );
        }
    }

    #[test]
    fn blank_strings_are_rejected() {
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("Default").is_ok());
    }
}
