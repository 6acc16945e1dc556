use crate::error::{EpcError, RequiredField, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Service tag opening every EPC069-12 payload.
pub const SERVICE_TAG: &str = "BCD";
/// Payload version. Version 002 makes the BIC optional.
pub const VERSION: &str = "002";
/// Character set indicator, 1 = UTF-8.
pub const CHARACTER_SET: &str = "1";
/// SEPA Credit Transfer identification.
pub const IDENTIFICATION: &str = "SCT";
/// Currency prefix of the amount field. Only euro transfers are supported.
pub const CURRENCY: &str = "EUR";
/// Readers only consider the first 70 characters of the beneficiary name.
pub const MAX_NAME_CHARS: usize = 70;
/// Number of newline-terminated lines in a rendered payload.
pub const LINE_COUNT: usize = 12;

/// A euro amount carried by a payment record.
///
/// Wraps `rust_decimal::Decimal` so that parsing and the two-decimal
/// rendering required by the payload live in one place. Sign and range are
/// not checked here; see [`crate::domain::reference::check_amount`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct EuroAmount(Decimal);

impl EuroAmount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The amount rounded half away from zero to exactly two decimals.
    ///
    /// Fails for values too large to carry two fractional digits in a
    /// `Decimal`, since `rescale` would silently keep a lower scale.
    pub fn to_cents_precision(&self) -> Result<Decimal> {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        if rounded.scale() != 2 {
            return Err(EpcError::InvalidAmount(format!(
                "{} cannot be represented with two decimals",
                self.0
            )));
        }
        Ok(rounded)
    }

    /// The amount as written in the payload, e.g. `10.50`.
    pub fn to_payload_string(&self) -> Result<String> {
        self.to_cents_precision().map(|value| value.to_string())
    }
}

impl From<Decimal> for EuroAmount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<EuroAmount> for Decimal {
    fn from(amount: EuroAmount) -> Self {
        amount.0
    }
}

impl FromStr for EuroAmount {
    type Err = EpcError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Decimal::from_str(trimmed)
            .map(Self)
            .map_err(|_| EpcError::InvalidAmount(trimmed.to_string()))
    }
}

/// Removes every whitespace character, not only the surrounding ones.
pub fn normalize_iban(iban: &str) -> String {
    iban.chars().filter(|c| !c.is_whitespace()).collect()
}

/// The payment fields encoded in a SEPA Credit Transfer QR code.
///
/// Built once per request and consumed by [`PaymentRecord::render`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentRecord {
    pub beneficiary_name: String,
    pub iban: String,
    pub bic: String,
    pub amount: EuroAmount,
    /// Structured creditor reference (ISO 11649, `RF...`).
    pub creditor_reference: String,
    /// Unstructured remittance information.
    pub remittance_text: String,
    /// Beneficiary to originator information.
    pub originator_info: String,
}

impl PaymentRecord {
    pub fn new(beneficiary_name: impl Into<String>, iban: impl Into<String>) -> Self {
        Self {
            beneficiary_name: beneficiary_name.into(),
            iban: iban.into(),
            ..Self::default()
        }
    }

    pub fn with_bic(mut self, bic: impl Into<String>) -> Self {
        self.bic = bic.into();
        self
    }

    pub fn with_amount(mut self, amount: impl Into<EuroAmount>) -> Self {
        self.amount = amount.into();
        self
    }

    pub fn with_creditor_reference(mut self, reference: impl Into<String>) -> Self {
        self.creditor_reference = reference.into();
        self
    }

    pub fn with_remittance_text(mut self, text: impl Into<String>) -> Self {
        self.remittance_text = text.into();
        self
    }

    pub fn with_originator_info(mut self, info: impl Into<String>) -> Self {
        self.originator_info = info.into();
        self
    }

    /// Renders the EPC069-12 text block.
    ///
    /// The output always has [`LINE_COUNT`] newline-terminated lines in a
    /// fixed order; absent optional fields are emitted as empty lines. An
    /// over-long beneficiary name is clamped to [`MAX_NAME_CHARS`] without
    /// error, while a blank name or IBAN fails with
    /// [`EpcError::MissingRequiredField`].
    pub fn render(&self) -> Result<String> {
        let iban = normalize_iban(&self.iban);
        if iban.is_empty() {
            return Err(EpcError::MissingRequiredField(RequiredField::Iban));
        }
        let name = self.beneficiary_name.trim();
        if name.is_empty() {
            return Err(EpcError::MissingRequiredField(
                RequiredField::BeneficiaryName,
            ));
        }

        // Clamped after folding and never re-trimmed
        let name: String = single_line(name).chars().take(MAX_NAME_CHARS).collect();
        let amount = format!("{CURRENCY}{}", self.amount.to_payload_string()?);

        let fields = [
            SERVICE_TAG.to_string(),
            VERSION.to_string(),
            CHARACTER_SET.to_string(),
            IDENTIFICATION.to_string(),
            single_line(&self.bic),
            name,
            iban,
            amount,
            // Purpose code is not supported
            String::new(),
            single_line(&self.creditor_reference),
            single_line(&self.remittance_text),
            single_line(&self.originator_info),
        ];

        let mut payload = String::with_capacity(fields.iter().map(|f| f.len() + 1).sum());
        for field in &fields {
            payload.push_str(field);
            payload.push('\n');
        }
        Ok(payload)
    }
}

/// Trims a field and folds embedded line breaks into spaces so a value can
/// never shift the positions of the fields after it.
fn single_line(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
