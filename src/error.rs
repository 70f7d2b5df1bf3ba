//! Error types for payment validation, QR encoding and the CLI.

use thiserror::Error;

use crate::validate::ALLOWED_SPECIAL_CHARS;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons an IBAN is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IbanError {
    #[error("IBAN is required")]
    Empty,

    #[error("IBAN can contain only alphanumeric characters")]
    InvalidCharacters,

    #[error("IBAN must start with country code (2 characters) and check digits (2 digits)")]
    MissingCountryOrCheckDigits,

    #[error("unsupported IBAN country code {0}")]
    UnsupportedCountry(String),

    #[error("IBAN length {actual} does not match length {expected} specified for country code {country}")]
    WrongLength {
        country: String,
        expected: usize,
        actual: usize,
    },

    #[error("BBAN part of IBAN is not formatted correctly for country code {country}")]
    InvalidBban { country: String },

    #[error("IBAN has incorrect check digits")]
    ChecksumFailed,
}

/// A single violated field constraint.
///
/// Validation is fail-fast, so a record only ever reports the first
/// violation found in field order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field 'ServiceTag' should be BCD")]
    ServiceTag,

    #[error("field 'CharacterSet' should be 1..8")]
    CharacterSet,

    #[error("field 'Version' should be 1 or 2")]
    Version,

    #[error("field 'IdentificationCode' should be SCT")]
    IdentificationCode,

    #[error("field 'BICBeneficiary' is required when version is 1")]
    BicRequired,

    #[error("field 'NameBeneficiary' is required")]
    NameRequired,

    #[error("field 'NameBeneficiary' should not exceed 70 characters")]
    NameTooLong,

    #[error("field 'NameBeneficiary' should only contain alpha-numerics, spaces and/or {}", ALLOWED_SPECIAL_CHARS)]
    NameCharacters,

    #[error("field 'IBANBeneficiary' is invalid: {0}")]
    Iban(#[from] IbanError),

    #[error("field 'EuroAmount' must be 0.01 or more and 999999999.99 or less")]
    EuroAmount,

    #[error("field 'Purpose' should not exceed 4 characters")]
    Purpose,

    #[error("field 'Remittance' is required")]
    RemittanceRequired,

    #[error("structured 'Remittance' should not exceed 35 characters")]
    RemittanceStructuredTooLong,

    #[error("unstructured 'Remittance' should not exceed 140 characters")]
    RemittanceUnstructuredTooLong,

    #[error("unstructured 'Remittance' should only contain alpha-numerics, spaces and/or {}", ALLOWED_SPECIAL_CHARS)]
    RemittanceUnstructuredCharacters,
}

/// Errors that can occur while producing a QR code.
#[derive(Error, Debug)]
pub enum Error {
    /// The payment record violates a field constraint
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The symbol encoder could not fit the text
    #[error("QR encoding error: {0}")]
    Encoding(#[from] qrcode::types::QrError),

    /// Requested image is smaller than the symbol itself
    #[error("can not scale QR code to an image smaller than {minimum}x{minimum} (requested {requested})")]
    ScaleTooSmall { requested: u32, minimum: u32 },

    /// Requested image exceeds the largest supported raster
    #[error("can not scale QR code to an image larger than {maximum}x{maximum} (requested {requested})")]
    ScaleTooLarge { requested: u32, maximum: u32 },

    /// PNG encoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to write the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A flag that takes a value was given without one
    #[error("missing value for {0}. Usage: sepa-qr --name <NAME> --iban <IBAN> --remittance <TEXT>")]
    MissingValue(String),

    /// A flag or environment variable has an unusable value
    #[error("invalid value for {flag}: {message}")]
    InvalidArgument { flag: String, message: String },

    /// Unrecognized command line argument
    #[error("unknown argument {0}")]
    UnknownArgument(String),
}
