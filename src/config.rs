//! Command line and environment configuration.
//!
//! Every option can be given as a flag (`--name value` or `--name=value`) or
//! through an environment variable; flags win over the environment.

use crate::amount::EuroAmount;
use crate::error::{Error, Result};
use crate::payment::Payment;
use crate::render::{GlyphStyle, DEFAULT_PNG_SIZE};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

/// (flag name, environment variable)
const OPTIONS: &[(&str, &str)] = &[
    ("name", "SEPA_QR_NAME"),
    ("iban", "SEPA_QR_IBAN"),
    ("bic", "SEPA_QR_BIC"),
    ("amount", "SEPA_QR_AMOUNT"),
    ("purpose", "SEPA_QR_PURPOSE"),
    ("remittance", "SEPA_QR_REMITTANCE"),
    ("structured", "SEPA_QR_STRUCTURED"),
    ("b2o", "SEPA_QR_B2O"),
    ("qr-version", "SEPA_QR_VERSION"),
    ("charset", "SEPA_QR_CHARSET"),
    ("output", "SEPA_QR_OUTPUT"),
    ("size", "SEPA_QR_SIZE"),
    ("glyphs", "SEPA_QR_GLYPHS"),
    ("out", "SEPA_QR_OUT"),
];

/// Flags that do not take a value.
const SWITCHES: &[&str] = &["structured"];

pub const USAGE: &str = "\
Generate SEPA payment QR code

Usage: sepa-qr [OPTIONS]

Options:
  --name <NAME>            Name of the beneficiary            [env: SEPA_QR_NAME]
  --iban <IBAN>            IBAN of the beneficiary            [env: SEPA_QR_IBAN]
  --bic <BIC>              BIC of the beneficiary bank        [env: SEPA_QR_BIC]
  --amount <EUR>           Amount of the transaction          [env: SEPA_QR_AMOUNT]
  --purpose <CODE>         Purpose of the transaction         [env: SEPA_QR_PURPOSE]
  --remittance <TEXT>      Remittance (message)               [env: SEPA_QR_REMITTANCE]
  --structured             Make the remittance structured     [env: SEPA_QR_STRUCTURED]
  --b2o <TEXT>             Beneficiary to originator info     [env: SEPA_QR_B2O]
  --qr-version <1|2>       EPC QR code version (default 2)    [env: SEPA_QR_VERSION]
  --charset <1-8>          Character set (default 2)          [env: SEPA_QR_CHARSET]
  --output <FORMAT>        text, terminal or png              [env: SEPA_QR_OUTPUT]
  --size <PIXELS>          PNG size (default 300)             [env: SEPA_QR_SIZE]
  --glyphs <STYLE>         Terminal glyphs: half or full      [env: SEPA_QR_GLYPHS]
  --out <FILE>             Write to FILE instead of stdout    [env: SEPA_QR_OUT]
  -h, --help               Print this help
";

/// What to emit once the payment is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The raw payload text
    #[default]
    Text,
    /// QR code drawn with block glyphs
    Terminal,
    /// QR code as PNG bytes
    Png,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "stdout" => Ok(OutputFormat::Text),
            "terminal" => Ok(OutputFormat::Terminal),
            "png" => Ok(OutputFormat::Png),
            other => Err(format!("unknown output type '{}', expected text, terminal or png", other)),
        }
    }
}

impl FromStr for GlyphStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "half" => Ok(GlyphStyle::HalfBlock),
            "full" => Ok(GlyphStyle::FullBlock),
            other => Err(format!("unknown glyph style '{}', expected half or full", other)),
        }
    }
}

/// Parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Generate(Config),
}

/// Everything needed to produce one QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub payment: Payment,
    pub output: OutputFormat,
    /// PNG edge length in pixels
    pub size: u32,
    pub glyphs: GlyphStyle,
    /// Output file; stdout when `None`
    pub out: Option<PathBuf>,
}

impl Config {
    /// Reads the process arguments and environment.
    pub fn from_env() -> Result<Command> {
        Self::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Parses `args` (without the program name), falling back to `env` for
    /// options that were not given on the command line.
    pub fn parse<I, F>(args: I, env: F) -> Result<Command>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut flags: HashMap<&'static str, String> = HashMap::new();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            if arg == "-h" || arg == "--help" {
                return Ok(Command::Help);
            }

            let Some(flag) = arg.strip_prefix("--") else {
                return Err(Error::UnknownArgument(arg.clone()));
            };

            let (name, inline) = match flag.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (flag, None),
            };

            let Some(&(key, _)) = OPTIONS.iter().find(|(key, _)| *key == name) else {
                return Err(Error::UnknownArgument(arg.clone()));
            };

            let value = match inline {
                Some(value) => value,
                None if SWITCHES.contains(&key) => "true".to_string(),
                None => args
                    .next()
                    .ok_or_else(|| Error::MissingValue(format!("--{}", key)))?,
            };

            flags.insert(key, value);
        }

        let lookup = |key: &str| -> Option<String> {
            flags.get(key).cloned().or_else(|| {
                OPTIONS
                    .iter()
                    .find(|(k, _)| *k == key)
                    .and_then(|(_, var)| env(var))
            })
        };

        let mut payment = Payment::new();
        if let Some(v) = lookup("name") {
            payment.name_beneficiary = v;
        }
        if let Some(v) = lookup("iban") {
            payment.iban_beneficiary = v;
        }
        if let Some(v) = lookup("bic") {
            payment.bic_beneficiary = v;
        }
        if let Some(v) = lookup("amount") {
            payment.euro_amount = parse_value("amount", &v, EuroAmount::from_str)?;
        }
        if let Some(v) = lookup("purpose") {
            payment.purpose = v;
        }
        if let Some(v) = lookup("remittance") {
            payment.remittance = v;
        }
        if let Some(v) = lookup("structured") {
            payment.remittance_is_structured = parse_value("structured", &v, parse_bool)?;
        }
        if let Some(v) = lookup("b2o") {
            payment.b2o_information = v;
        }
        if let Some(v) = lookup("qr-version") {
            payment.version = parse_value("qr-version", &v, |s| s.parse::<u8>())?;
        }
        if let Some(v) = lookup("charset") {
            payment.character_set = parse_value("charset", &v, |s| s.parse::<u8>())?;
        }

        let output = match lookup("output") {
            Some(v) => parse_value("output", &v, OutputFormat::from_str)?,
            None => OutputFormat::default(),
        };
        let size = match lookup("size") {
            Some(v) => parse_value("size", &v, |s| s.parse::<u32>())?,
            None => DEFAULT_PNG_SIZE,
        };
        let glyphs = match lookup("glyphs") {
            Some(v) => parse_value("glyphs", &v, GlyphStyle::from_str)?,
            None => GlyphStyle::default(),
        };
        let out = lookup("out").filter(|s| !s.is_empty()).map(PathBuf::from);

        Ok(Command::Generate(Config {
            payment,
            output,
            size,
            glyphs,
            out,
        }))
    }
}

fn parse_value<T, E, P>(key: &str, value: &str, parse: P) -> Result<T>
where
    P: FnOnce(&str) -> std::result::Result<T, E>,
    E: ToString,
{
    parse(value.trim()).map_err(|e| Error::InvalidArgument {
        flag: format!("--{}", key),
        message: e.to_string(),
    })
}

fn parse_bool(s: &str) -> std::result::Result<bool, String> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(format!("expected true or false, got '{}'", other)),
    }
}
