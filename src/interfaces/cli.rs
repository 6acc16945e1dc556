use crate::application::generator::GenerateOptions;
use crate::domain::payment::{EuroAmount, PaymentRecord};
use crate::domain::ports::OutputFormat;
use clap::Args;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Payment fields shared by the `generate` and `payload` commands.
#[derive(Args, Debug, Clone)]
pub struct PaymentArgs {
    /// Beneficiary name (required, truncated to 70 characters)
    #[arg(long)]
    pub name: String,

    /// Beneficiary IBAN (required, spaces are ignored)
    #[arg(long)]
    pub iban: String,

    /// Beneficiary BIC
    #[arg(long, default_value = "")]
    pub bic: String,

    /// Amount in EUR
    #[arg(long, default_value = "0")]
    pub amount: EuroAmount,

    /// Creditor reference (ISO 11649, RF...)
    #[arg(long = "ref", default_value = "")]
    pub reference: String,

    /// Unstructured remittance text
    #[arg(long, default_value = "")]
    pub text: String,

    /// Beneficiary to originator information
    #[arg(long, default_value = "")]
    pub info: String,

    /// Generate even if the IBAN fails validation
    #[arg(long)]
    pub force: bool,

    /// Also check the BIC, the creditor reference and the amount range
    #[arg(long)]
    pub check_fields: bool,
}

impl PaymentArgs {
    pub fn to_record(&self) -> PaymentRecord {
        PaymentRecord::new(self.name.as_str(), self.iban.as_str())
            .with_bic(self.bic.as_str())
            .with_amount(self.amount)
            .with_creditor_reference(self.reference.as_str())
            .with_remittance_text(self.text.as_str())
            .with_originator_info(self.info.as_str())
    }

    pub fn options(&self, format: OutputFormat) -> GenerateOptions {
        GenerateOptions::new(format)
            .bypass_validation(self.force)
            .with_field_checks(self.check_fields)
    }
}

/// Arguments of the `generate` command.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub payment: PaymentArgs,

    /// Output file path (png and svg formats)
    #[arg(long, default_value = "qr.png")]
    pub out: PathBuf,

    /// Output format: png, svg or console
    #[arg(long, default_value = "console")]
    pub format: OutputFormat,
}

/// Arguments of the `serve` command.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "EPCQR_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "EPCQR_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServeArgs {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
