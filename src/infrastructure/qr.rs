use crate::domain::ports::{OutputFormat, QrEncoder, QrImage};
use crate::error::Result;
use image::{ImageFormat, Luma};
use qrcode::render::svg;
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_LIGHT: &str = "\x1b[47m  ";
const ANSI_DARK: &str = "\x1b[40m  ";

/// Rendering parameters for [`QrCodeEncoder`].
#[derive(Debug, Clone)]
pub struct QrStyle {
    pub ec_level: EcLevel,
    /// Pixels per module for raster and vector output.
    pub scale: u32,
    /// Quiet zone width in modules. SVG output only distinguishes between
    /// the standard 4-module zone and none.
    pub border: usize,
    pub dark_color: String,
    pub light_color: String,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::M,
            scale: 10,
            border: 4,
            dark_color: "#000000".to_string(),
            light_color: "#FFFFFF".to_string(),
        }
    }
}

/// `QrEncoder` backed by the `qrcode` crate.
#[derive(Debug, Clone, Default)]
pub struct QrCodeEncoder {
    style: QrStyle,
}

impl QrCodeEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: QrStyle) -> Self {
        Self { style }
    }

    fn png(&self, code: &QrCode) -> Result<Vec<u8>> {
        let image = code
            .render::<Luma<u8>>()
            .module_dimensions(self.style.scale, self.style.scale)
            .quiet_zone(false)
            .build();
        let image = with_border(image, self.style.border as u32 * self.style.scale);

        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn svg(&self, code: &QrCode) -> String {
        code.render::<svg::Color<'_>>()
            .module_dimensions(self.style.scale, self.style.scale)
            .quiet_zone(self.style.border > 0)
            .dark_color(svg::Color(&self.style.dark_color))
            .light_color(svg::Color(&self.style.light_color))
            .build()
    }

    fn console(&self, code: &QrCode) -> String {
        let size = code.width();
        let border = self.style.border;
        let total = size + 2 * border;
        let light = format!("{ANSI_LIGHT}{ANSI_RESET}");
        let dark = format!("{ANSI_DARK}{ANSI_RESET}");

        let mut out = String::new();
        let blank_rows = |out: &mut String| {
            for _ in 0..border {
                out.push_str(&light.repeat(total));
                out.push('\n');
            }
        };

        blank_rows(&mut out);
        for y in 0..size {
            out.push_str(&light.repeat(border));
            for x in 0..size {
                out.push_str(if code[(x, y)] == Color::Dark {
                    &dark
                } else {
                    &light
                });
            }
            out.push_str(&light.repeat(border));
            out.push('\n');
        }
        blank_rows(&mut out);
        out
    }
}

/// Pads a rendered symbol with a light margin of `margin` pixels.
fn with_border(
    image: image::ImageBuffer<Luma<u8>, Vec<u8>>,
    margin: u32,
) -> image::ImageBuffer<Luma<u8>, Vec<u8>> {
    if margin == 0 {
        return image;
    }
    let (width, height) = image.dimensions();
    let mut padded =
        image::ImageBuffer::from_pixel(width + 2 * margin, height + 2 * margin, Luma([255u8]));
    image::imageops::overlay(&mut padded, &image, i64::from(margin), i64::from(margin));
    padded
}

impl QrEncoder for QrCodeEncoder {
    fn encode(&self, payload: &str, format: OutputFormat) -> Result<QrImage> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.style.ec_level)?;
        tracing::debug!(
            version = ?code.version(),
            width = code.width(),
            %format,
            "QR symbol encoded"
        );

        Ok(match format {
            OutputFormat::Png => QrImage::Png(self.png(&code)?),
            OutputFormat::Svg => QrImage::Svg(self.svg(&code)),
            OutputFormat::Console => QrImage::Console(self.console(&code)),
        })
    }
}
