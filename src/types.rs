//! Core domain types for logged covered calls.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Open,
    Closed,
    Expired,
    Assigned,
}

impl CallStatus {
    pub const ALL: [CallStatus; 4] = [
        CallStatus::Open,
        CallStatus::Closed,
        CallStatus::Expired,
        CallStatus::Assigned,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CallStatus::Open => "open",
            CallStatus::Closed => "closed",
            CallStatus::Expired => "expired",
            CallStatus::Assigned => "assigned",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CallStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LedgerError::InvalidInput(format!("unknown status '{}'", s.trim())))
    }
}

/// Field values of the add form, before the ledger assigns an id and profit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCall {
    pub ticker: String,
    pub strike: Decimal,
    pub premium: Decimal,
    pub expiration_date: NaiveDate,
    pub status: CallStatus,
    /// Kept only when `status` is closed.
    pub close_price: Option<Decimal>,
    pub rolled_from_id: Option<String>,
    pub spot_price: Option<Decimal>,
}

/// One logged covered call. Never mutated after the ledger creates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallRecord {
    pub id: String,
    pub ticker: String,
    pub strike: Decimal,
    pub premium: Decimal,
    pub expiration_date: NaiveDate,
    pub status: CallStatus,
    pub close_price: Option<Decimal>,
    pub rolled_from_id: Option<String>,
    /// Informational only.
    pub spot_price: Option<Decimal>,
    /// Computed once at insertion.
    pub net_profit: Decimal,
}
