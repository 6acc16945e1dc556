use crate::domain::ports::IbanValidator;
use crate::error::{EpcError, Result};
use iban::Iban;

/// Structural IBAN validation (country format and mod-97 check digits)
/// backed by the `iban_validate` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralIbanValidator;

impl StructuralIbanValidator {
    pub fn new() -> Self {
        Self
    }
}

impl IbanValidator for StructuralIbanValidator {
    fn validate(&self, iban: &str) -> Result<()> {
        iban.parse::<Iban>()
            .map(|_| ())
            .map_err(|e| EpcError::InvalidIban(e.to_string()))
    }
}
