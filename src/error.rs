//! Error kinds surfaced by the ledger and its checks.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no call with id '{0}'")]
    NotFound(String),

    #[error("id prefix '{prefix}' matches {matches} calls")]
    AmbiguousPrefix { prefix: String, matches: usize },

    #[error("spreadsheet export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}
