//! IBAN parsing and validation (ISO 13616 structure, ISO 7064 MOD-97-10).
//!
//! Every supported country has a fixed total length and a BBAN layout written
//! as a sequence of `<class><count>` groups, e.g. `F05F05A11F02` for France:
//!
//! | Class | Characters |
//! |---|---|
//! | `F` | digits |
//! | `L` | lowercase letters |
//! | `U` | uppercase letters |
//! | `A` | digits and letters of either case |
//! | `B` | digits and uppercase letters |
//! | `C` | letters of either case |
//! | `W` | digits and lowercase letters |

use crate::error::IbanError;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// (country code, total IBAN length, BBAN format)
const COUNTRIES: &[(&str, usize, &str)] = &[
    ("AD", 24, "F04F04A12"),
    ("AE", 23, "F03F16"),
    ("AL", 28, "F08A16"),
    ("AT", 20, "F05F11"),
    ("AZ", 28, "U04A20"),
    ("BA", 20, "F03F03F08F02"),
    ("BE", 16, "F03F07F02"),
    ("BG", 22, "U04F04F02A08"),
    ("BH", 22, "U04A14"),
    ("BR", 29, "F08F05F10U01A01"),
    ("CH", 21, "F05A12"),
    ("CR", 21, "F03F14"),
    ("CY", 28, "F03F05A16"),
    ("CZ", 24, "F04F06F10"),
    ("DE", 22, "F08F10"),
    ("DK", 18, "F04F09F01"),
    ("DO", 28, "U04F20"),
    ("EE", 20, "F02F02F11F01"),
    ("ES", 24, "F04F04F01F01F10"),
    ("FI", 18, "F06F07F01"),
    ("FO", 18, "F04F09F01"),
    ("FR", 27, "F05F05A11F02"),
    ("GB", 22, "U04F06F08"),
    ("GE", 22, "U02F16"),
    ("GI", 23, "U04A15"),
    ("GL", 18, "F04F09F01"),
    ("GR", 27, "F03F04A16"),
    ("GT", 28, "A04A20"),
    ("HR", 21, "F07F10"),
    ("HU", 28, "F03F04F01F15F01"),
    ("IE", 22, "U04F06F08"),
    ("IL", 23, "F03F03F13"),
    ("IS", 26, "F04F02F06F10"),
    ("IT", 27, "U01F05F05A12"),
    ("JO", 30, "U04F04A18"),
    ("KW", 30, "U04A22"),
    ("KZ", 20, "F03A13"),
    ("LB", 28, "F04A20"),
    ("LC", 32, "U04A24"),
    ("LI", 21, "F05A12"),
    ("LT", 20, "F05F11"),
    ("LU", 20, "F03A13"),
    ("LV", 21, "U04A13"),
    ("MC", 27, "F05F05A11F02"),
    ("MD", 24, "A20"),
    ("ME", 22, "F03F13F02"),
    ("MK", 19, "F03A10F02"),
    ("MR", 27, "F05F05F11F02"),
    ("MT", 31, "U04F05A18"),
    ("MU", 30, "U04F02F02F12F03U03"),
    ("NL", 18, "U04F10"),
    ("NO", 15, "F04F06F01"),
    ("PK", 24, "U04A16"),
    ("PL", 28, "F08F16"),
    ("PS", 29, "U04A21"),
    ("PT", 25, "F04F04F11F02"),
    ("QA", 29, "U04A21"),
    ("RO", 24, "U04A16"),
    ("RS", 22, "F03F13F02"),
    ("SA", 24, "F02A18"),
    ("SC", 31, "U04F02F02F16U03"),
    ("SE", 24, "F03F16F01"),
    ("SI", 19, "F05F08F02"),
    ("SK", 24, "F04F06F10"),
    ("SM", 27, "U01F05F05A12"),
    ("ST", 25, "F08F11F02"),
    ("TL", 23, "F03F14F02"),
    ("TN", 24, "F02F03F13F02"),
    ("TR", 26, "F05A01A16"),
    ("UA", 29, "F06A19"),
    ("VG", 24, "U04F16"),
    ("XK", 20, "F04F10F02"),
];

/// Character class of one BBAN group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Digit,
    Lower,
    Upper,
    Alphanumeric,
    AlphanumericUpper,
    Alpha,
    AlphanumericLower,
}

impl CharClass {
    fn from_code(code: char) -> Option<Self> {
        match code {
            'F' => Some(CharClass::Digit),
            'L' => Some(CharClass::Lower),
            'U' => Some(CharClass::Upper),
            'A' => Some(CharClass::Alphanumeric),
            'B' => Some(CharClass::AlphanumericUpper),
            'C' => Some(CharClass::Alpha),
            'W' => Some(CharClass::AlphanumericLower),
            _ => None,
        }
    }

    fn matches(self, c: char) -> bool {
        match self {
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Lower => c.is_ascii_lowercase(),
            CharClass::Upper => c.is_ascii_uppercase(),
            CharClass::Alphanumeric => c.is_ascii_alphanumeric(),
            CharClass::AlphanumericUpper => c.is_ascii_digit() || c.is_ascii_uppercase(),
            CharClass::Alpha => c.is_ascii_alphabetic(),
            CharClass::AlphanumericLower => c.is_ascii_digit() || c.is_ascii_lowercase(),
        }
    }
}

/// Length and BBAN layout for one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryFormat {
    /// Total IBAN length, including country code and check digits
    pub length: usize,
    groups: Vec<(CharClass, usize)>,
}

impl CountryFormat {
    /// Parses a format string such as `F05F05A11F02`.
    fn parse(format: &str) -> Option<Self> {
        let chars: Vec<char> = format.chars().collect();
        if chars.is_empty() || chars.len() % 3 != 0 {
            return None;
        }

        let mut groups = Vec::with_capacity(chars.len() / 3);
        for group in chars.chunks(3) {
            let class = CharClass::from_code(group[0])?;
            let count = group[1].to_digit(10)? * 10 + group[2].to_digit(10)?;
            groups.push((class, count as usize));
        }

        Some(CountryFormat { length: 0, groups })
    }

    /// Number of BBAN characters described by the layout.
    pub fn bban_length(&self) -> usize {
        self.groups.iter().map(|(_, count)| count).sum()
    }

    fn matches_bban(&self, bban: &str) -> bool {
        let mut chars = bban.chars();
        for &(class, count) in &self.groups {
            for _ in 0..count {
                match chars.next() {
                    Some(c) if class.matches(c) => {}
                    _ => return false,
                }
            }
        }
        chars.next().is_none()
    }
}

fn countries() -> &'static HashMap<&'static str, CountryFormat> {
    static TABLE: OnceLock<HashMap<&'static str, CountryFormat>> = OnceLock::new();
    TABLE.get_or_init(|| {
        COUNTRIES
            .iter()
            .map(|&(code, length, format)| {
                let mut parsed = CountryFormat::parse(format)
                    .unwrap_or_else(|| panic!("malformed BBAN format {format} for {code}"));
                parsed.length = length;
                (code, parsed)
            })
            .collect()
    })
}

fn country_format(country_code: &str) -> Option<&'static CountryFormat> {
    countries().get(country_code)
}

/// A validated IBAN.
///
/// # Examples
///
/// ```
/// use sepa_qr::Iban;
///
/// let iban = Iban::parse("fr14 2004 1010 0505 0001 3m02 606").unwrap();
/// assert_eq!(iban.code(), "FR1420041010050500013M02606");
/// assert_eq!(iban.print_code(), "FR14 2004 1010 0505 0001 3M02 606");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iban {
    code: String,
}

impl Iban {
    /// Parses and validates an IBAN.
    ///
    /// Spaces are removed and letters uppercased before validation. Checks run
    /// in order: characters, country code and check digits, supported country,
    /// length, BBAN layout, MOD-97-10 checksum.
    pub fn parse(input: &str) -> Result<Self, IbanError> {
        let code: String = input
            .chars()
            .filter(|c| *c != ' ')
            .collect::<String>()
            .to_ascii_uppercase();

        if code.is_empty() {
            return Err(IbanError::Empty);
        }

        if !code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()) {
            return Err(IbanError::InvalidCharacters);
        }

        // Only ASCII remains, so byte offsets are character offsets
        let bytes = code.as_bytes();
        if bytes.len() < 4
            || !bytes[..2].iter().all(u8::is_ascii_uppercase)
            || !bytes[2..4].iter().all(u8::is_ascii_digit)
        {
            return Err(IbanError::MissingCountryOrCheckDigits);
        }

        let country = &code[..2];
        let format = country_format(country)
            .ok_or_else(|| IbanError::UnsupportedCountry(country.to_string()))?;

        if code.len() != format.length {
            return Err(IbanError::WrongLength {
                country: country.to_string(),
                expected: format.length,
                actual: code.len(),
            });
        }

        if !format.matches_bban(&code[4..]) {
            return Err(IbanError::InvalidBban {
                country: country.to_string(),
            });
        }

        if mod97(&code) != 1 {
            return Err(IbanError::ChecksumFailed);
        }

        Ok(Iban { code })
    }

    /// Normalized code without spaces.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Two-letter country code.
    pub fn country_code(&self) -> &str {
        &self.code[..2]
    }

    /// Two check digits.
    pub fn check_digits(&self) -> &str {
        &self.code[2..4]
    }

    /// Country specific account part.
    pub fn bban(&self) -> &str {
        &self.code[4..]
    }

    /// Code grouped in blocks of four characters separated by spaces.
    pub fn print_code(&self) -> String {
        self.code
            .as_bytes()
            .chunks(4)
            .map(|chunk| String::from_utf8_lossy(chunk))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print_code())
    }
}

/// ISO 7064 MOD-97-10 remainder of an uppercase alphanumeric IBAN.
///
/// The first four characters move to the end and letters expand to two
/// digits (A = 10 .. Z = 35). The remainder is folded per digit, so the
/// expanded number never has to be materialized.
fn mod97(code: &str) -> u32 {
    let (head, tail) = code.split_at(4);
    tail.chars().chain(head.chars()).fold(0, |rem, c| match c.to_digit(36) {
        Some(v) if v < 10 => (rem * 10 + v) % 97,
        Some(v) => (rem * 100 + v) % 97,
        None => rem,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_table_is_well_formed() {
        for &(code, length, _) in COUNTRIES {
            let format = country_format(code).unwrap();
            assert_eq!(format.length, length);
            assert_eq!(format.bban_length() + 4, length, "country {}", code);
        }
    }

    #[test]
    fn test_parse_valid_ibans() {
        for s in [
            "DE71110220330123456789",
            "FR1420041010050500013M02606",
            "GB29 NWBK 6016 1331 9268 19",
            "NL91ABNA0417164300",
            "BE68539007547034",
        ] {
            assert!(Iban::parse(s).is_ok(), "{}", s);
        }
    }

    #[test]
    fn test_parse_normalizes_case_and_spaces() {
        let iban = Iban::parse(" de71 1102 2033 0123 4567 89").unwrap();
        assert_eq!(iban.code(), "DE71110220330123456789");
        assert_eq!(iban.country_code(), "DE");
        assert_eq!(iban.check_digits(), "71");
        assert_eq!(iban.bban(), "110220330123456789");
    }

    #[test]
    fn test_print_code_groups_by_four() {
        let iban = Iban::parse("DE71110220330123456789").unwrap();
        assert_eq!(iban.print_code(), "DE71 1102 2033 0123 4567 89");

        let iban = Iban::parse("BE68539007547034").unwrap();
        assert_eq!(iban.to_string(), "BE68 5390 0754 7034");
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        assert_eq!(
            Iban::parse("DE71110220330123456780"),
            Err(IbanError::ChecksumFailed)
        );
    }

    #[test]
    fn test_parse_rejects_structural_errors() {
        assert_eq!(Iban::parse(""), Err(IbanError::Empty));
        assert_eq!(Iban::parse("   "), Err(IbanError::Empty));
        assert_eq!(Iban::parse("DE71-1102"), Err(IbanError::InvalidCharacters));
        // non-ASCII letters must not case-map into ASCII
        assert_eq!(
            Iban::parse("GB76\u{FB00}AA60161331926819"),
            Err(IbanError::InvalidCharacters)
        );
        assert_eq!(
            Iban::parse("DE71110220330123456789\u{00DF}"),
            Err(IbanError::InvalidCharacters)
        );
        assert_eq!(Iban::parse("ABC"), Err(IbanError::MissingCountryOrCheckDigits));
        assert_eq!(
            Iban::parse("1234567890"),
            Err(IbanError::MissingCountryOrCheckDigits)
        );
    }

    #[test]
    fn test_parse_rejects_unsupported_country() {
        assert_eq!(
            Iban::parse("ZZ71110220330123456789"),
            Err(IbanError::UnsupportedCountry("ZZ".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            Iban::parse("DE7111022033012345678"),
            Err(IbanError::WrongLength {
                country: "DE".to_string(),
                expected: 22,
                actual: 21,
            })
        );
    }

    #[test]
    fn test_parse_rejects_bban_layout() {
        // DE requires an all-digit BBAN
        assert_eq!(
            Iban::parse("DE7111022033012345678X"),
            Err(IbanError::InvalidBban {
                country: "DE".to_string()
            })
        );
    }

    #[test]
    fn test_format_parse_rejects_malformed_codes() {
        assert!(CountryFormat::parse("").is_none());
        assert!(CountryFormat::parse("F0").is_none());
        assert!(CountryFormat::parse("X04").is_none());
        assert!(CountryFormat::parse("F0A").is_none());
    }

    #[test]
    fn test_mod97_of_valid_iban_is_one() {
        assert_eq!(mod97("GB82WEST12345698765432"), 1);
    }
}
