//! SEPA QR CLI
//!
//! Builds an EPC payment record from flags and environment variables and
//! writes it as payload text, a terminal QR code, or a PNG image.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --name "Red Cross" --iban BE68539007547034 --amount 10 \
//!     --remittance Donation --output png --out donation.png
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity
//! - `SEPA_QR_*`: Fallback for every flag, see `--help`

use log::{debug, info};
use sepa_qr::config::{Command, Config, OutputFormat, USAGE};
use sepa_qr::Result;
use std::fs;
use std::io::{self, Write};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = match Config::from_env()? {
        Command::Help => {
            print!("{}", USAGE);
            return Ok(());
        }
        Command::Generate(config) => config,
    };

    debug!("{:?}", config.payment);
    info!("Generating {:?} output", config.output);

    let bytes = match config.output {
        OutputFormat::Text => config.payment.to_qr_string()?.into_bytes(),
        OutputFormat::Terminal => config.payment.to_qr_terminal(config.glyphs)?.into_bytes(),
        OutputFormat::Png => config.payment.to_qr_png(config.size)?,
    };

    match &config.out {
        Some(path) => {
            fs::write(path, &bytes)?;
            info!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&bytes)?;
            handle.flush()?;
        }
    }

    Ok(())
}
