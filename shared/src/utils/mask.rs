//! Identifier masking for log output
//!
//! OTP identifiers are phone numbers, email addresses, or account ids and
//! must never appear unmasked in logs.

/// Mask an identifier for logging, keeping only the last four characters.
pub fn mask_identifier(identifier: &str) -> String {
    let char_count = identifier.chars().count();
    if char_count <= 4 {
        "****".to_string()
    } else {
        let tail: String = identifier.chars().skip(char_count - 4).collect();
        format!("***{}", tail)
    }
}
