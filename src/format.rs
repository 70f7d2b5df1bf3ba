//! Rendering of the 12-line EPC payload.

use crate::error::ValidationError;
use crate::payment::Payment;

/// Separator between payload fields.
pub const FIELD_SEPARATOR: &str = "\n";

impl Payment {
    /// Validates the record and renders the payload text.
    ///
    /// Fields, in order: service tag, version, character set, identification
    /// code, BIC, name, IBAN, amount, purpose, structured remittance,
    /// unstructured remittance, beneficiary to originator information.
    /// Optional fields that are not set stay as empty lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use sepa_qr::Payment;
    ///
    /// let mut p = Payment::new();
    /// p.name_beneficiary = "Red Cross".to_string();
    /// p.iban_beneficiary = "BE68539007547034".to_string();
    /// p.remittance = "Donation".to_string();
    ///
    /// let text = p.to_qr_string().unwrap();
    /// assert_eq!(text, "BCD\n002\n2\nSCT\n\nRed Cross\nBE68 5390 0754 7034\n\n\n\nDonation\n");
    /// ```
    pub fn to_qr_string(&self) -> Result<String, ValidationError> {
        self.validate()?;

        let iban = self.iban_string();
        let version = self.version_string();
        let character_set = self.character_set_string();
        let amount = self.euro_amount_string();
        let purpose = self.purpose_string();

        let fields: [&str; 12] = [
            &self.service_tag,
            &version,
            &character_set,
            &self.identification_code,
            self.bic_string(),
            &self.name_beneficiary,
            &iban,
            &amount,
            &purpose,
            self.remittance_structured(),
            self.remittance_text(),
            &self.b2o_information,
        ];

        Ok(fields.join(FIELD_SEPARATOR))
    }
}
