#![allow(dead_code)]

use epcqr::domain::payment::{EuroAmount, PaymentRecord};
use rand::Rng;
use rust_decimal::Decimal;

const TEXT_CHARSET: &[char] = &[
    'a', 'b', 'c', 'x', 'y', 'z', 'A', 'Q', 'Z', '0', '7', '9', ' ', ' ', '\t', '-', '.', '/',
    'é', 'ü', 'ß', 'Ø', '€',
];
const IBAN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Random single-line text of up to `max_len` characters, whitespace included.
pub fn random_text<R: Rng + ?Sized>(rng: &mut R, max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| TEXT_CHARSET[rng.gen_range(0..TEXT_CHARSET.len())])
        .collect()
}

/// Random text guaranteed to contain at least one non-whitespace character.
pub fn random_required_text<R: Rng + ?Sized>(rng: &mut R, max_len: usize) -> String {
    loop {
        let text = random_text(rng, max_len);
        if !text.trim().is_empty() {
            return text;
        }
    }
}

/// Random IBAN-like string with spaces and tabs sprinkled in.
pub fn random_spaced_iban<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.gen_range(1..=34);
    let mut out = String::new();
    for _ in 0..len {
        match rng.gen_range(0..6) {
            0 => out.push(' '),
            1 => out.push('\t'),
            _ => {}
        }
        out.push(char::from(IBAN_CHARSET[rng.gen_range(0..IBAN_CHARSET.len())]));
    }
    out
}

pub fn random_cents<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    rng.gen_range(0..100_000_000_000)
}

pub fn random_record<R: Rng + ?Sized>(rng: &mut R) -> PaymentRecord {
    PaymentRecord::new(random_required_text(rng, 90), random_spaced_iban(rng))
        .with_bic(random_text(rng, 11))
        .with_amount(EuroAmount::new(Decimal::new(random_cents(rng), 2)))
        .with_creditor_reference(random_text(rng, 25))
        .with_remittance_text(random_text(rng, 140))
        .with_originator_info(random_text(rng, 70))
}
