use clap::{Parser, Subcommand};
use epcqr::application::generator::QrGenerator;
use epcqr::domain::ports::{OutputFormat, QrImage};
use epcqr::interfaces::cli::{GenerateArgs, PaymentArgs, ServeArgs};
use epcqr::interfaces::http;
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use std::sync::Arc;

/// Generate SEPA Credit Transfer (EPC069-12) QR codes.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a QR code as PNG, SVG or terminal preview
    Generate(GenerateArgs),
    /// Print the EPC069-12 payload text
    Payload(PaymentArgs),
    /// Serve QR codes over HTTP
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    epcqr::telemetry::init();
    let cli = Cli::parse();
    let generator = QrGenerator::default();

    match cli.command {
        Command::Generate(args) => {
            let record = args.payment.to_record();
            let image = generator
                .generate(&record, args.payment.options(args.format))
                .into_diagnostic()?;

            match image {
                QrImage::Console(text) => {
                    let stdout = io::stdout();
                    let mut out = stdout.lock();
                    out.write_all(text.as_bytes()).into_diagnostic()?;
                    out.flush().into_diagnostic()?;
                }
                image => {
                    std::fs::write(&args.out, image.into_bytes()).into_diagnostic()?;
                    tracing::info!(
                        path = %args.out.display(),
                        format = %args.format,
                        "QR code written"
                    );
                    println!("QR code saved to {}", args.out.display());
                }
            }
        }
        Command::Payload(args) => {
            let payload = generator
                .payload(&args.to_record(), args.options(OutputFormat::Console))
                .into_diagnostic()?;
            print!("{payload}");
        }
        Command::Serve(args) => {
            http::serve(args.socket_addr(), Arc::new(generator))
                .await
                .into_diagnostic()?;
        }
    }

    Ok(())
}
