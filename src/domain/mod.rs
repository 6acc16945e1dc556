//! Domain layer: the payment record, the EPC069-12 payload it renders to,
//! and the ports to the IBAN and QR collaborators.

pub mod payment;
pub mod ports;
pub mod reference;
