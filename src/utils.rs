//! Small helpers.

use rust_decimal::Decimal;

/// Length of the id slice shown next to each call.
pub const SHORT_ID_LEN: usize = 6;

pub fn sanitize_symbol(sym: &str) -> String {
    sym.trim().to_uppercase()
}

pub fn short_id(id: &str) -> &str {
    // ids are ASCII uuids, but don't panic on anything else
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((i, _)) => &id[..i],
        None => id,
    }
}

pub fn fmt_decimal(d: Decimal) -> String {
    d.normalize().to_string()
}

pub fn fmt_opt_decimal(d: Option<Decimal>) -> String {
    d.map(fmt_decimal).unwrap_or_else(|| "-".to_string())
}
