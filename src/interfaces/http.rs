//! Single-endpoint HTTP service.
//!
//! `GET /?iban=..&name=..[&amount=..&bic=..&ref=..&text=..&info=..&format=png|svg&force=1&check_fields=1]`
//! answers with the QR image, or a plain-text 400/500 error.

use crate::application::generator::{GenerateOptions, QrGenerator};
use crate::domain::payment::{EuroAmount, PaymentRecord};
use crate::domain::ports::OutputFormat;
use crate::error::EpcError;
use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

const INVALID_FORMAT: &str = "Invalid format. Supported: png, svg";
const MISSING_PARAMETERS: &str = "Missing required parameters: iban, name";

/// Query parameters accepted by the endpoint. Everything is optional at the
/// extraction level so that missing fields produce our own error messages.
#[derive(Debug, Default, Deserialize)]
pub struct QrQuery {
    pub iban: Option<String>,
    pub name: Option<String>,
    pub amount: Option<String>,
    pub bic: Option<String>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub text: Option<String>,
    pub info: Option<String>,
    pub format: Option<String>,
    pub force: Option<String>,
    pub check_fields: Option<String>,
}

/// Errors returned to HTTP clients.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match &self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

impl From<EpcError> for HttpError {
    fn from(err: EpcError) -> Self {
        match err {
            EpcError::MissingRequiredField(_) => {
                HttpError::BadRequest(format!("Error building EPC data: {err}"))
            }
            EpcError::UnsupportedOutputFormat(_) => HttpError::BadRequest(INVALID_FORMAT.into()),
            EpcError::InvalidIban(_)
            | EpcError::InvalidAmount(_)
            | EpcError::InvalidCreditorReference(_)
            | EpcError::InvalidBic(_) => HttpError::BadRequest(err.to_string()),
            EpcError::Encoding(_) | EpcError::Image(_) => {
                tracing::error!(error = %err, "QR generation failed");
                HttpError::Internal("Failed to generate QR".into())
            }
        }
    }
}

/// Builds the router serving the QR endpoint.
pub fn router(generator: Arc<QrGenerator>) -> Router {
    Router::new()
        .route("/", get(qr_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(generator)
}

/// Binds `addr` and serves the QR endpoint until the process exits.
pub async fn serve(addr: SocketAddr, generator: Arc<QrGenerator>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_with_listener(listener, generator).await
}

/// Serves on an already bound listener.
pub async fn serve_with_listener(
    listener: TcpListener,
    generator: Arc<QrGenerator>,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);
    tracing::info!(
        "Try: http://localhost:{}/?iban=BE68539007547034&name=JohnDoe&amount=10.50",
        addr.port()
    );

    axum::serve(listener, router(generator)).await
}

/// GET / - Generate a SEPA Credit Transfer QR code.
async fn qr_handler(
    State(generator): State<Arc<QrGenerator>>,
    Query(query): Query<QrQuery>,
) -> Result<Response, HttpError> {
    let format = match non_empty(query.format.as_deref()) {
        None => OutputFormat::Png,
        Some(raw) => match raw.parse::<OutputFormat>() {
            Ok(format @ (OutputFormat::Png | OutputFormat::Svg)) => format,
            _ => return Err(HttpError::BadRequest(INVALID_FORMAT.into())),
        },
    };

    let (Some(iban), Some(name)) = (
        non_empty(query.iban.as_deref()),
        non_empty(query.name.as_deref()),
    ) else {
        return Err(HttpError::BadRequest(MISSING_PARAMETERS.into()));
    };

    let force = is_truthy(query.force.as_deref());
    if !force {
        generator.check_iban(iban)?;
    }

    let amount = match non_empty(query.amount.as_deref()) {
        None => EuroAmount::ZERO,
        Some(raw) => raw
            .parse::<EuroAmount>()
            .map_err(|_| HttpError::BadRequest("Invalid amount".into()))?,
    };

    let record = PaymentRecord {
        beneficiary_name: name.to_string(),
        iban: iban.to_string(),
        bic: query.bic.unwrap_or_default(),
        amount,
        creditor_reference: query.reference.unwrap_or_default(),
        remittance_text: query.text.unwrap_or_default(),
        originator_info: query.info.unwrap_or_default(),
    };
    let options = GenerateOptions::new(format)
        .bypass_validation(force)
        .with_field_checks(is_truthy(query.check_fields.as_deref()));

    let image = tokio::task::spawn_blocking(move || generator.generate(&record, options))
        .await
        .map_err(|e| HttpError::Internal(format!("Failed to generate QR: {e}")))??;

    Ok((
        [(header::CONTENT_TYPE, format.content_type())],
        image.into_bytes(),
    )
        .into_response())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Flags are set by `1` or `true` (any case).
fn is_truthy(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v == "1" || v.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

    fn app() -> Router {
        router(Arc::new(QrGenerator::default()))
    }

    async fn send(uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, body.to_vec())
    }

    #[tokio::test]
    async fn test_png_by_default() {
        let (status, content_type, body) =
            send("/?iban=BE68%205390%200754%207034&name=John%20Doe&amount=10.50").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("image/png"));
        assert!(body.starts_with(PNG_SIGNATURE));
    }

    #[tokio::test]
    async fn test_svg_format() {
        let (status, content_type, body) =
            send("/?iban=BE68539007547034&name=John&format=svg").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
        assert!(String::from_utf8(body).unwrap().contains("<svg"));
    }

    #[tokio::test]
    async fn test_console_format_rejected() {
        let (status, _, body) = send("/?iban=BE68539007547034&name=John&format=console").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(String::from_utf8(body).unwrap(), INVALID_FORMAT);
    }

    #[tokio::test]
    async fn test_missing_parameters() {
        for uri in ["/?name=John", "/?iban=BE68539007547034", "/?iban=&name=John", "/"] {
            let (status, _, body) = send(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(String::from_utf8(body).unwrap(), MISSING_PARAMETERS);
        }
    }

    #[tokio::test]
    async fn test_invalid_iban_and_force() {
        let (status, _, body) = send("/?iban=BE12345678901234&name=John").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().starts_with("Invalid IBAN"));

        for force in ["1", "true", "TRUE"] {
            let uri = format!("/?iban=BE12345678901234&name=John&force={force}");
            let (status, _, _) = send(&uri).await;
            assert_eq!(status, StatusCode::OK, "force={force}");
        }
    }

    #[tokio::test]
    async fn test_iban_reported_before_amount() {
        let (status, _, body) = send("/?iban=BE12345678901234&name=John&amount=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().starts_with("Invalid IBAN"));

        let (_, _, body) = send("/?iban=BE12345678901234&name=John&amount=abc&force=1").await;
        assert_eq!(String::from_utf8(body).unwrap(), "Invalid amount");
    }

    #[tokio::test]
    async fn test_field_checks_opt_in() {
        let uri = "/?iban=BE68539007547034&name=John&bic=NONSTANDARD-BIC";
        let (status, _, _) = send(uri).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, body) = send(&format!("{uri}&check_fields=1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().starts_with("Invalid BIC"));
    }

    #[tokio::test]
    async fn test_invalid_amount() {
        let (status, _, body) = send("/?iban=BE68539007547034&name=John&amount=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(String::from_utf8(body).unwrap(), "Invalid amount");
    }

    #[tokio::test]
    async fn test_oversized_payload_is_server_error() {
        // Lowercase forces byte mode, which holds at most 2331 bytes at level M
        let text = "a".repeat(3000);
        let uri = format!("/?iban=BE68539007547034&name=John&text={text}");
        let (status, _, body) = send(&uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(String::from_utf8(body).unwrap(), "Failed to generate QR");
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(Some("1")));
        assert!(is_truthy(Some("True")));
        assert!(!is_truthy(Some("0")));
        assert!(!is_truthy(Some("yes")));
        assert!(!is_truthy(None));
    }
}
