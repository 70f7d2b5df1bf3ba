//! QR symbol encoding and output rendering.
//!
//! The payload text is handed to `qrcode`, which picks the smallest version
//! that fits at the requested error correction level. The resulting module
//! matrix is drawn either as a PNG (via `image`) or as terminal glyphs.

use crate::error::{Error, Result};
use crate::payment::Payment;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use log::debug;
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;

/// Error correction level used unless the caller picks another one.
pub const DEFAULT_EC_LEVEL: EcLevel = EcLevel::M;

/// Light modules required around the symbol.
pub const QUIET_ZONE: usize = 4;

/// Default PNG edge length in pixels.
pub const DEFAULT_PNG_SIZE: u32 = 300;

/// Largest PNG edge length in pixels.
pub const MAX_PNG_SIZE: u32 = 4096;

const BLACK: Luma<u8> = Luma([0u8]);
const WHITE: Luma<u8> = Luma([255u8]);

/// Glyph style for terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphStyle {
    /// Two full blocks per dark module, one text row per module row.
    FullBlock,
    /// Upper/lower half blocks, two module rows per text row.
    #[default]
    HalfBlock,
}

/// Encodes text into a QR symbol, choosing the version automatically.
pub fn encode(text: &str, ec_level: EcLevel) -> Result<QrCode> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), ec_level)?;
    debug!(
        "Encoded {} bytes as QR {:?} ({}x{} modules)",
        text.len(),
        code.version(),
        code.width(),
        code.width()
    );
    Ok(code)
}

/// Module matrix including the quiet zone, row-major, `true` = dark.
struct Modules {
    width: usize,
    dark: Vec<bool>,
}

impl Modules {
    fn new(code: &QrCode) -> Self {
        let inner = code.width();
        let width = inner + 2 * QUIET_ZONE;
        let mut dark = vec![false; width * width];

        for (i, color) in code.to_colors().into_iter().enumerate() {
            if color == Color::Dark {
                let x = i % inner + QUIET_ZONE;
                let y = i / inner + QUIET_ZONE;
                dark[y * width + x] = true;
            }
        }

        Modules { width, dark }
    }

    fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }
}

/// Renders the symbol into an exactly `size`x`size` grayscale PNG.
///
/// Modules are scaled by the largest integer factor that fits and the
/// result is centered. Returns [`Error::ScaleTooSmall`] if `size` cannot
/// hold one pixel per module and [`Error::ScaleTooLarge`] above
/// [`MAX_PNG_SIZE`].
pub fn to_png(code: &QrCode, size: u32) -> Result<Vec<u8>> {
    if size > MAX_PNG_SIZE {
        return Err(Error::ScaleTooLarge {
            requested: size,
            maximum: MAX_PNG_SIZE,
        });
    }

    let modules = Modules::new(code);
    let minimum = modules.width as u32;
    if size < minimum {
        return Err(Error::ScaleTooSmall {
            requested: size,
            minimum,
        });
    }

    let scale = size / minimum;
    let offset = (size - minimum * scale) / 2;
    let mut img = GrayImage::from_pixel(size, size, WHITE);

    for y in 0..modules.width {
        for x in 0..modules.width {
            if !modules.is_dark(x, y) {
                continue;
            }
            let px = offset + x as u32 * scale;
            let py = offset + y as u32 * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(px + dx, py + dy, BLACK);
                }
            }
        }
    }

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(img).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    debug!("Rendered {}x{} PNG at scale {} ({} bytes)", size, size, scale, png.len());
    Ok(png)
}

/// Renders the symbol as printable text, one line per text row.
pub fn to_terminal(code: &QrCode, style: GlyphStyle) -> String {
    let modules = Modules::new(code);
    let mut out = String::new();

    match style {
        GlyphStyle::FullBlock => {
            for y in 0..modules.width {
                for x in 0..modules.width {
                    out.push_str(if modules.is_dark(x, y) { "██" } else { "  " });
                }
                out.push('\n');
            }
        }
        GlyphStyle::HalfBlock => {
            for y in (0..modules.width).step_by(2) {
                for x in 0..modules.width {
                    let ch = match (modules.is_dark(x, y), modules.is_dark(x, y + 1)) {
                        (true, true) => '█',
                        (true, false) => '▀',
                        (false, true) => '▄',
                        (false, false) => ' ',
                    };
                    out.push(ch);
                }
                out.push('\n');
            }
        }
    }

    out
}

impl Payment {
    /// Validates, formats and encodes the record at the given level.
    pub fn to_qr_code(&self, ec_level: EcLevel) -> Result<QrCode> {
        let text = self.to_qr_string()?;
        encode(&text, ec_level)
    }

    /// PNG image of `size`x`size` pixels at [`DEFAULT_EC_LEVEL`].
    pub fn to_qr_png(&self, size: u32) -> Result<Vec<u8>> {
        let code = self.to_qr_code(DEFAULT_EC_LEVEL)?;
        to_png(&code, size)
    }

    /// Terminal rendering at [`DEFAULT_EC_LEVEL`].
    pub fn to_qr_terminal(&self, style: GlyphStyle) -> Result<String> {
        let code = self.to_qr_code(DEFAULT_EC_LEVEL)?;
        Ok(to_terminal(&code, style))
    }
}
