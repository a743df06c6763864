//! Input checks shared by signup, profile update and password change.

/// Minimum password length accepted by the strength policy
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Signup fields in the order they are checked
pub const SIGNUP_REQUIRED_FIELDS: [&str; 4] = ["first_name", "last_name", "email", "password"];

pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format.";

pub const WEAK_PASSWORD_MESSAGE: &str =
    "Password must be at least 6 characters long and contain an uppercase letter, a lowercase letter, and a number.";

/// Structural email check: `local@label.suffix`.
///
/// The local part must be non-empty and free of whitespace and `@`; the
/// domain must contain a dot with non-empty labels on both sides of it.
/// This is deliberately looser than RFC 5322.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }

    if domain.is_empty() || domain.contains('@') || domain.chars().any(char::is_whitespace) {
        return false;
    }

    match (domain.find('.'), domain.rfind('.')) {
        (Some(first), Some(last)) => first > 0 && last + 1 < domain.len(),
        _ => false,
    }
}

/// Length >= 6 with at least one uppercase, one lowercase and one digit.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && password.chars().any(char::is_uppercase)
        && password.chars().any(char::is_lowercase)
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Returns the first required field that is missing or blank.
///
/// `lookup` resolves a field name to its submitted value; fields are probed
/// in [`SIGNUP_REQUIRED_FIELDS`] order and probing stops at the first gap.
pub fn first_missing_field<'a, F>(lookup: F) -> Option<&'static str>
where
    F: Fn(&str) -> Option<&'a str>,
{
    SIGNUP_REQUIRED_FIELDS
        .iter()
        .copied()
        .find(|field| lookup(field).map_or(true, |value| value.trim().is_empty()))
}

pub fn required_message(field: &str) -> String {
    format!("{} is required.", field)
}
