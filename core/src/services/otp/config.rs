//! Configuration for the OTP manager

use serde::{Deserialize, Serialize};

use crate::domain::entities::otp_record::{
    DEFAULT_CODE_LENGTH, DEFAULT_EXPIRY_MINUTES, DEFAULT_MAX_ATTEMPTS,
};

/// Alphabet a generated code is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeCharset {
    /// ASCII digits 0-9
    Numeric,
    /// ASCII letters and digits
    Alphanumeric,
}

impl CodeCharset {
    /// The characters codes are drawn from
    pub fn alphabet(&self) -> &'static [u8] {
        match self {
            CodeCharset::Numeric => b"0123456789",
            CodeCharset::Alphanumeric => {
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789"
            }
        }
    }
}

/// Configuration for the OTP manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of characters in a generated code
    pub code_length: usize,
    /// Number of minutes before a stored code expires
    pub expiry_minutes: i64,
    /// Maximum number of validation attempts allowed
    pub max_attempts: u32,
    /// Alphabet codes are drawn from
    pub charset: CodeCharset,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            expiry_minutes: DEFAULT_EXPIRY_MINUTES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            charset: CodeCharset::Numeric,
        }
    }
}

impl OtpConfig {
    /// Set the number of characters in generated codes
    pub fn with_code_length(mut self, length: usize) -> Self {
        self.code_length = length;
        self
    }

    /// Set the validity window in minutes
    pub fn with_expiry_minutes(mut self, minutes: i64) -> Self {
        self.expiry_minutes = minutes;
        self
    }

    /// Set the maximum number of validation attempts
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set the alphabet codes are drawn from
    pub fn with_charset(mut self, charset: CodeCharset) -> Self {
        self.charset = charset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OtpConfig::default();
        assert_eq!(config.code_length, DEFAULT_CODE_LENGTH);
        assert_eq!(config.expiry_minutes, DEFAULT_EXPIRY_MINUTES);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.charset, CodeCharset::Numeric);
    }

    #[test]
    fn test_builder_methods() {
        let config = OtpConfig::default()
            .with_code_length(8)
            .with_expiry_minutes(10)
            .with_max_attempts(3)
            .with_charset(CodeCharset::Alphanumeric);

        assert_eq!(config.code_length, 8);
        assert_eq!(config.expiry_minutes, 10);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.charset, CodeCharset::Alphanumeric);
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: OtpConfig = serde_json::from_str(r#"{"code_length": 4}"#).unwrap();
        assert_eq!(config.code_length, 4);
        assert_eq!(config.expiry_minutes, DEFAULT_EXPIRY_MINUTES);
        assert_eq!(config.charset, CodeCharset::Numeric);
    }
}
