//! Field validation against the EPC QR code constraints.
//!
//! Checks run in a fixed order (header, beneficiary, amount, purpose,
//! remittance) and the first violation is returned.

use crate::error::ValidationError;
use crate::payment::{Payment, IDENTIFICATION_CODE, SERVICE_TAG};
use regex::Regex;
use std::sync::OnceLock;

/// Punctuation accepted in names and unstructured remittance, next to
/// letters, digits and spaces.
pub const ALLOWED_SPECIAL_CHARS: &str = r#"@&+()"':?.,-/"#;

pub const MAX_NAME_LENGTH: usize = 70;
pub const MAX_PURPOSE_LENGTH: usize = 4;
pub const MAX_STRUCTURED_REMITTANCE_LENGTH: usize = 35;
pub const MAX_UNSTRUCTURED_REMITTANCE_LENGTH: usize = 140;

fn allowed_text_regex() -> &'static Regex {
    static TEXT_REGEX: OnceLock<Regex> = OnceLock::new();
    TEXT_REGEX.get_or_init(|| {
        let pattern = format!(
            r"^[\p{{L}}0-9 {}]+$",
            regex::escape(ALLOWED_SPECIAL_CHARS)
        );
        Regex::new(&pattern).expect("allowed character pattern compiles")
    })
}

/// Returns `true` if `s` is non-empty and only uses letters, digits,
/// spaces and [`ALLOWED_SPECIAL_CHARS`].
pub fn is_allowed_text(s: &str) -> bool {
    allowed_text_regex().is_match(s)
}

impl Payment {
    /// Checks all fields, returning the first violation encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_header()?;
        self.validate_beneficiary()?;
        self.validate_amount()?;
        self.validate_purpose()?;
        self.validate_remittance()?;
        Ok(())
    }

    /// Returns `true` if [`Payment::validate`] succeeds.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate_header(&self) -> Result<(), ValidationError> {
        if self.service_tag != SERVICE_TAG {
            return Err(ValidationError::ServiceTag);
        }

        if !(1..=8).contains(&self.character_set) {
            return Err(ValidationError::CharacterSet);
        }

        if self.version != 1 && self.version != 2 {
            return Err(ValidationError::Version);
        }

        if self.identification_code != IDENTIFICATION_CODE {
            return Err(ValidationError::IdentificationCode);
        }

        if self.version == 1 && self.bic_beneficiary.is_empty() {
            return Err(ValidationError::BicRequired);
        }

        Ok(())
    }

    pub fn validate_beneficiary(&self) -> Result<(), ValidationError> {
        if self.name_beneficiary.is_empty() {
            return Err(ValidationError::NameRequired);
        }

        if self.name_beneficiary.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::NameTooLong);
        }

        if !is_allowed_text(&self.name_beneficiary) {
            return Err(ValidationError::NameCharacters);
        }

        self.iban()?;
        Ok(())
    }

    /// A zero amount is treated as omitted and always passes.
    pub fn validate_amount(&self) -> Result<(), ValidationError> {
        if self.euro_amount.is_zero() || self.euro_amount.is_within_range() {
            return Ok(());
        }

        Err(ValidationError::EuroAmount)
    }

    pub fn validate_purpose(&self) -> Result<(), ValidationError> {
        if self.purpose_string().chars().count() > MAX_PURPOSE_LENGTH {
            return Err(ValidationError::Purpose);
        }

        Ok(())
    }

    pub fn validate_remittance(&self) -> Result<(), ValidationError> {
        if self.remittance.is_empty() {
            return Err(ValidationError::RemittanceRequired);
        }

        let length = self.remittance.chars().count();

        if self.remittance_is_structured {
            if length > MAX_STRUCTURED_REMITTANCE_LENGTH {
                return Err(ValidationError::RemittanceStructuredTooLong);
            }
            return Ok(());
        }

        if length > MAX_UNSTRUCTURED_REMITTANCE_LENGTH {
            return Err(ValidationError::RemittanceUnstructuredTooLong);
        }

        if !is_allowed_text(&self.remittance) {
            return Err(ValidationError::RemittanceUnstructuredCharacters);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::EuroAmount;
    use crate::error::IbanError;
    use std::str::FromStr;

    const STR_40_CHARS: &str = "1234567890123456789012345678901234567890";

    fn valid_payment() -> Payment {
        let mut p = Payment::new();
        p.remittance = "Valid".to_string();
        p.name_beneficiary = "François D'Alsace S.A.".to_string();
        p.iban_beneficiary = "FR1420041010050500013M02606".to_string();
        p
    }

    #[test]
    fn test_allowed_text() {
        for s in [
            "My Name",
            "François D'Alsace S.A.",
            "Franz Mustermänn",
            "The numb3r 0ne1",
            "Лев Николаевич Толстой",
            "老子",
            "이용철",
            "ألفت الادلبي",
            "M&M",
            "me@example.net",
            "How much is (5 + 1) : 3?",
            "One, 2, thr33",
            r#""To be, or not to be.""#,
            "Invoice 2024/17",
        ] {
            assert!(is_allowed_text(s), "should match: {}", s);
        }

        for s in [
            "Don't allow {}",
            "No # symbol",
            "; drop table users",
            "🌈🌞🦄",
            "",
            "tab\there",
        ] {
            assert!(!is_allowed_text(s), "should not match: {}", s);
        }
    }

    #[test]
    fn test_defaults_pass_header() {
        assert!(valid_payment().validate_header().is_ok());
        assert!(Payment::new_structured().validate_header().is_ok());
        assert!(valid_payment().validate().is_ok());
    }

    #[test]
    fn test_validate_header() {
        let mut p = valid_payment();
        p.service_tag = "ABC".to_string();
        assert_eq!(p.validate_header(), Err(ValidationError::ServiceTag));
        assert_eq!(p.validate(), Err(ValidationError::ServiceTag));

        for cs in [0, 9] {
            let mut p = valid_payment();
            p.character_set = cs;
            assert_eq!(p.validate_header(), Err(ValidationError::CharacterSet));
        }

        for v in [0, 3] {
            let mut p = valid_payment();
            p.version = v;
            assert_eq!(p.validate_header(), Err(ValidationError::Version));
        }

        let mut p = valid_payment();
        p.identification_code = "DEF".to_string();
        assert_eq!(p.validate_header(), Err(ValidationError::IdentificationCode));

        let mut p = valid_payment();
        p.version = 1;
        assert_eq!(p.validate_header(), Err(ValidationError::BicRequired));
        p.bic_beneficiary = "XYZ".to_string();
        assert!(p.validate_header().is_ok());
    }

    #[test]
    fn test_validate_beneficiary() {
        let mut p = valid_payment();
        p.name_beneficiary = String::new();
        assert_eq!(p.validate_beneficiary(), Err(ValidationError::NameRequired));

        p.name_beneficiary = STR_40_CHARS.repeat(2);
        assert_eq!(p.validate_beneficiary(), Err(ValidationError::NameTooLong));

        p.name_beneficiary = "#!".to_string();
        assert_eq!(p.validate_beneficiary(), Err(ValidationError::NameCharacters));

        let mut p = valid_payment();
        p.iban_beneficiary = "ABC".to_string();
        assert_eq!(
            p.validate_beneficiary(),
            Err(ValidationError::Iban(IbanError::MissingCountryOrCheckDigits))
        );
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut p = valid_payment();
        // 70 two-byte characters
        p.name_beneficiary = "ä".repeat(70);
        assert!(p.validate_beneficiary().is_ok());

        p.name_beneficiary = "ä".repeat(71);
        assert_eq!(p.validate_beneficiary(), Err(ValidationError::NameTooLong));
    }

    #[test]
    fn test_validate_amount() {
        let mut p = valid_payment();

        for a in ["-1", "0.001", "0.00999", "999999999.991", "1000000000"] {
            p.euro_amount = EuroAmount::from_str(a).unwrap();
            assert_eq!(p.validate(), Err(ValidationError::EuroAmount), "amount {}", a);
        }

        for a in ["0", "0.01", "0.1", "1", "2.05", "99", "123456.78", "999999999.99"] {
            p.euro_amount = EuroAmount::from_str(a).unwrap();
            assert!(p.validate().is_ok(), "amount {}", a);
        }
    }

    #[test]
    fn test_validate_purpose() {
        let mut p = valid_payment();

        for n in ["ABCDEF", "AB CD EF"] {
            p.purpose = n.to_string();
            assert_eq!(p.validate(), Err(ValidationError::Purpose), "purpose {}", n);
        }

        for n in ["", "ABCD", "AB CD", "A B C D"] {
            p.purpose = n.to_string();
            assert!(p.validate().is_ok(), "purpose {}", n);
        }
    }

    #[test]
    fn test_validate_remittance() {
        let mut p = valid_payment();
        p.remittance = String::new();
        assert_eq!(p.validate_remittance(), Err(ValidationError::RemittanceRequired));
        assert_eq!(p.validate(), Err(ValidationError::RemittanceRequired));

        p.remittance_is_structured = true;
        p.remittance = STR_40_CHARS.to_string();
        assert_eq!(
            p.validate_remittance(),
            Err(ValidationError::RemittanceStructuredTooLong)
        );

        p.remittance_is_structured = false;
        assert!(p.validate_remittance().is_ok());

        p.remittance = STR_40_CHARS.repeat(4);
        assert_eq!(
            p.validate_remittance(),
            Err(ValidationError::RemittanceUnstructuredTooLong)
        );

        p.remittance = "#!".to_string();
        assert_eq!(
            p.validate_remittance(),
            Err(ValidationError::RemittanceUnstructuredCharacters)
        );

        // structured references skip the character check
        p.remittance_is_structured = true;
        assert!(p.validate_remittance().is_ok());
    }

    #[test]
    fn test_first_failure_wins() {
        let mut p = Payment::new();
        p.version = 7;
        p.purpose = "TOO LONG PURPOSE".to_string();
        assert_eq!(p.validate(), Err(ValidationError::Version));

        let p = Payment::new();
        assert_eq!(p.validate(), Err(ValidationError::NameRequired));
        assert!(!p.is_valid());
    }
}
