use crate::error::{EpcError, Result};
use std::fmt;
use std::str::FromStr;

/// Output modes supported by the QR encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
    /// Terminal preview, CLI only.
    Console,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Console => "console",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Svg => "image/svg+xml",
            OutputFormat::Console => "text/plain; charset=utf-8",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = EpcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "console" => Ok(OutputFormat::Console),
            _ => Err(EpcError::UnsupportedOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encoded QR symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrImage {
    Png(Vec<u8>),
    Svg(String),
    /// ANSI-colored rows ready to be printed to a terminal.
    Console(String),
}

impl QrImage {
    pub fn format(&self) -> OutputFormat {
        match self {
            QrImage::Png(_) => OutputFormat::Png,
            QrImage::Svg(_) => OutputFormat::Svg,
            QrImage::Console(_) => OutputFormat::Console,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            QrImage::Png(bytes) => bytes,
            QrImage::Svg(text) | QrImage::Console(text) => text.into_bytes(),
        }
    }
}

pub trait IbanValidator: Send + Sync {
    /// Checks the structure of a whitespace-free IBAN.
    fn validate(&self, iban: &str) -> Result<()>;
}

pub trait QrEncoder: Send + Sync {
    fn encode(&self, payload: &str, format: OutputFormat) -> Result<QrImage>;
}

pub type IbanValidatorBox = Box<dyn IbanValidator>;
pub type QrEncoderBox = Box<dyn QrEncoder>;
