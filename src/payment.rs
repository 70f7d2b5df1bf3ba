//! SEPA credit transfer record as laid out by the EPC QR code guidelines.
//!
//! See: <https://www.europeanpaymentscouncil.eu/document-library/guidance-documents/quick-response-code-guidelines-enable-data-capture-initiation>

use crate::amount::EuroAmount;
use crate::error::IbanError;
use crate::iban::Iban;

/// Service tag, always `BCD`.
pub const SERVICE_TAG: &str = "BCD";

/// Identification code, always `SCT` (SEPA Credit Transfer).
pub const IDENTIFICATION_CODE: &str = "SCT";

/// All fields needed to generate an EPC QR code.
///
/// # Invariants
///
/// - Exactly one of the structured / unstructured remittance lines is populated,
///   selected by `remittance_is_structured`
/// - Formatting only reads the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Should always be `BCD`.
    pub service_tag: String,

    /// Format version, 1 or 2.
    pub version: u8,

    /// Character set of the payload:
    ///
    /// | | | | |
    /// |---|---|---|---|
    /// | 1: UTF-8 | 2: ISO 8859-1 | 3: ISO 8859-2 | 4: ISO 8859-4 |
    /// | 5: ISO 8859-5 | 6: ISO 8859-7 | 7: ISO 8859-10 | 8: ISO 8859-15 |
    pub character_set: u8,

    /// Should always be `SCT`.
    pub identification_code: String,

    /// AT-23 BIC of the beneficiary bank. Mandatory in version 1, optional in version 2.
    pub bic_beneficiary: String,

    /// AT-21 Name of the beneficiary.
    pub name_beneficiary: String,

    /// AT-20 Account number of the beneficiary. Only IBAN is allowed.
    pub iban_beneficiary: String,

    /// AT-04 Amount of the credit transfer; zero when omitted.
    pub euro_amount: EuroAmount,

    /// AT-44 Purpose of the credit transfer.
    pub purpose: String,

    /// AT-05 Remittance information, either an ISO 11649 creditor reference
    /// (structured) or free text (unstructured).
    ///
    /// Only unstructured text goes through the character allow-list; a
    /// structured reference is checked for length alone.
    pub remittance: String,

    /// Beneficiary to originator information.
    ///
    /// Passed through verbatim. Like a structured `remittance`, it is not
    /// checked for line breaks, so a `\n` here adds lines to the payload.
    pub b2o_information: String,

    /// Whether `remittance` goes into the structured or the unstructured line.
    pub remittance_is_structured: bool,
}

impl Payment {
    /// Creates a version 2 record with unstructured remittance.
    pub fn new() -> Self {
        Payment {
            service_tag: SERVICE_TAG.to_string(),
            version: 2,
            character_set: 2,
            identification_code: IDENTIFICATION_CODE.to_string(),
            bic_beneficiary: String::new(),
            name_beneficiary: String::new(),
            iban_beneficiary: String::new(),
            euro_amount: EuroAmount::ZERO,
            purpose: String::new(),
            remittance: String::new(),
            b2o_information: String::new(),
            remittance_is_structured: false,
        }
    }

    /// Creates a version 2 record with structured remittance.
    pub fn new_structured() -> Self {
        Payment {
            remittance_is_structured: true,
            ..Payment::new()
        }
    }

    /// Parses the beneficiary IBAN.
    pub fn iban(&self) -> Result<Iban, IbanError> {
        Iban::parse(&self.iban_beneficiary)
    }

    /// IBAN in print form, or an empty string if it does not validate.
    pub fn iban_string(&self) -> String {
        self.iban().map(|iban| iban.print_code()).unwrap_or_default()
    }

    /// Version as a 3-digit number with leading zeros.
    pub fn version_string(&self) -> String {
        format!("{:03}", self.version)
    }

    pub fn character_set_string(&self) -> String {
        self.character_set.to_string()
    }

    /// BIC, only emitted for version 1.
    pub fn bic_string(&self) -> &str {
        if self.version != 1 {
            return "";
        }

        &self.bic_beneficiary
    }

    /// Purpose with all spaces removed.
    pub fn purpose_string(&self) -> String {
        self.purpose.replace(' ', "")
    }

    /// Amount in financial format (e.g. `EUR12.34`), empty if zero.
    pub fn euro_amount_string(&self) -> String {
        self.euro_amount.to_field()
    }

    /// Value of the structured remittance line.
    pub fn remittance_structured(&self) -> &str {
        self.remittance_line(true)
    }

    /// Value of the unstructured (free text) remittance line.
    pub fn remittance_text(&self) -> &str {
        self.remittance_line(false)
    }

    fn remittance_line(&self, structured: bool) -> &str {
        if self.remittance_is_structured != structured {
            return "";
        }

        &self.remittance
    }
}

impl Default for Payment {
    fn default() -> Self {
        Payment::new()
    }
}
