use crate::domain::payment::{PaymentRecord, normalize_iban};
use crate::domain::ports::{IbanValidatorBox, OutputFormat, QrEncoderBox, QrImage};
use crate::domain::reference;
use crate::error::Result;
use crate::infrastructure::iban::StructuralIbanValidator;
use crate::infrastructure::qr::QrCodeEncoder;

/// Per-request options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    pub format: OutputFormat,
    /// Validate the IBAN structure before rendering.
    pub strict: bool,
    /// Also check the BIC, the creditor reference and the amount range.
    /// Independent of `strict`.
    pub check_fields: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            strict: true,
            check_fields: false,
        }
    }
}

impl GenerateOptions {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Skips IBAN validation. The payload is still built.
    pub fn bypass_validation(mut self, bypass: bool) -> Self {
        self.strict = !bypass;
        self
    }

    pub fn with_field_checks(mut self, enabled: bool) -> Self {
        self.check_fields = enabled;
        self
    }
}

/// Turns payment records into EPC069-12 QR symbols.
///
/// `QrGenerator` owns the IBAN validator and the QR encoder. It holds no
/// per-request state, so one instance can serve concurrent requests.
pub struct QrGenerator {
    iban_validator: IbanValidatorBox,
    encoder: QrEncoderBox,
}

impl Default for QrGenerator {
    fn default() -> Self {
        Self::new(
            Box::new(StructuralIbanValidator::new()),
            Box::new(QrCodeEncoder::new()),
        )
    }
}

impl QrGenerator {
    /// Creates a new `QrGenerator`.
    ///
    /// # Arguments
    ///
    /// * `iban_validator` - Structural IBAN check used in strict mode.
    /// * `encoder` - Turns the payload text into a QR symbol.
    pub fn new(iban_validator: IbanValidatorBox, encoder: QrEncoderBox) -> Self {
        Self {
            iban_validator,
            encoder,
        }
    }

    /// Builds the EPC069-12 payload text for `record`.
    ///
    /// In strict mode the IBAN is validated after whitespace removal. With
    /// field checks enabled, non-empty BIC and creditor reference fields and
    /// the amount range are checked as well.
    pub fn payload(&self, record: &PaymentRecord, options: GenerateOptions) -> Result<String> {
        if options.strict {
            self.check_iban(&record.iban)?;
        } else {
            tracing::warn!("IBAN validation bypassed, building payload as given");
        }
        if options.check_fields {
            reference::check_bic(&record.bic)?;
            reference::check_creditor_reference(&record.creditor_reference)?;
            reference::check_amount(record.amount)?;
        }

        let payload = record.render()?;
        tracing::debug!(bytes = payload.len(), "EPC payload rendered");
        Ok(payload)
    }

    /// Builds the payload and encodes it in the requested format.
    pub fn generate(&self, record: &PaymentRecord, options: GenerateOptions) -> Result<QrImage> {
        let payload = self.payload(record, options)?;
        self.encoder.encode(&payload, options.format)
    }

    /// Validates the structure of `iban` after whitespace removal.
    pub fn check_iban(&self, iban: &str) -> Result<()> {
        let iban = normalize_iban(iban);
        // Blank IBANs are reported as missing by the renderer
        if iban.is_empty() {
            return Ok(());
        }
        self.iban_validator.validate(&iban)
    }
}
