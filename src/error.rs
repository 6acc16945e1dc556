use std::fmt;
use thiserror::Error;

/// Fields the EPC payload cannot be built without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    BeneficiaryName,
    Iban,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::BeneficiaryName => write!(f, "beneficiary name"),
            RequiredField::Iban => write!(f, "IBAN"),
        }
    }
}

#[derive(Error, Debug)]
pub enum EpcError {
    #[error("{0} is required")]
    MissingRequiredField(RequiredField),
    #[error("Invalid IBAN: {0}")]
    InvalidIban(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid creditor reference: {0}")]
    InvalidCreditorReference(String),
    #[error("Invalid BIC: {0}")]
    InvalidBic(String),
    #[error("unsupported format: {0}")]
    UnsupportedOutputFormat(String),
    #[error("QR encoding error: {0}")]
    Encoding(#[from] qrcode::types::QrError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, EpcError>;
