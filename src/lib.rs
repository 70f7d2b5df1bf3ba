//! # SEPA QR
//!
//! Generates EPC "BCD" QR codes for SEPA credit transfers, as described in the
//! European Payments Council's *Quick Response Code Guidelines*.
//!
//! ## Design Principles
//!
//! - **Exact payload**: 12 newline-separated fields, byte-for-byte
//! - **Fail-fast validation**: the first violated constraint is returned as a typed error
//! - **Exact amounts**: `rust_decimal`, rounded half away from zero to 2 places
//! - **Pure core**: validation and formatting never mutate, log, or do I/O
//!
//! ## Example
//!
//! ```
//! use sepa_qr::{EuroAmount, Payment};
//! use std::str::FromStr;
//!
//! let mut p = Payment::new();
//! p.name_beneficiary = "François D'Alsace S.A.".to_string();
//! p.iban_beneficiary = "FR1420041010050500013M02606".to_string();
//! p.euro_amount = EuroAmount::from_str("12.3").unwrap();
//! p.remittance = "Client:Marie Louise La Lune".to_string();
//!
//! let text = p.to_qr_string().unwrap();
//! assert!(text.starts_with("BCD\n002\n2\nSCT\n"));
//!
//! let png = p.to_qr_png(300).unwrap();
//! assert!(png.starts_with(b"\x89PNG"));
//! ```

pub mod amount;
pub mod config;
pub mod error;
pub mod format;
pub mod iban;
pub mod payment;
pub mod render;
pub mod validate;

pub use amount::EuroAmount;
pub use error::{Error, IbanError, Result, ValidationError};
pub use iban::Iban;
pub use payment::Payment;
pub use render::{GlyphStyle, DEFAULT_EC_LEVEL};
pub use validate::ALLOWED_SPECIAL_CHARS;
