//! Adapters for the collaborator ports in [`crate::domain::ports`].

pub mod iban;
pub mod qr;
