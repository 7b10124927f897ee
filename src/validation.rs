//! Local input checks run before any request is sent.
//!
//! The email check is deliberately minimal: it only requires an `@`.

/// Returns the trimmed phone number, or `None` when nothing was typed.
pub fn phone_input(raw: &str) -> Option<&str> {
    let phone = raw.trim();
    (!phone.is_empty()).then_some(phone)
}

/// Returns the trimmed email address, or `None` when it is empty or has no `@`.
pub fn email_input(raw: &str) -> Option<&str> {
    let email = raw.trim();
    (!email.is_empty() && email.contains('@')).then_some(email)
}
