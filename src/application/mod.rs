//! Application layer orchestrating payload building and QR encoding.
//!
//! `QrGenerator` is shared by the command-line and HTTP front ends; it runs
//! IBAN validation and the opt-in field checks, renders the EPC069-12 payload and hands it to
//! the QR encoder.

pub mod generator;
