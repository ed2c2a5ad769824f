//! In-memory call ledger. One instance per session, insertion order preserved.

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::types::{CallRecord, CallStatus, NewCall};

/// Net profit of a new call, carrying forward the leg it was rolled from.
///
/// `premium - close_price`, plus `prev.premium - prev.close_price` when
/// `rolled_from_id` names a record in `ledger`. A roll link that matches
/// nothing adds nothing.
pub fn compute_net_profit(
    premium: Decimal,
    close_price: Option<Decimal>,
    rolled_from_id: Option<&str>,
    ledger: &[CallRecord],
) -> Decimal {
    let mut profit = premium;
    if let Some(close) = close_price {
        profit -= close;
    }
    if let Some(from) = rolled_from_id.filter(|id| !id.is_empty()) {
        if let Some(prev) = ledger.iter().find(|c| c.id == from) {
            let roll_loss = prev.premium - prev.close_price.unwrap_or(Decimal::ZERO);
            profit += roll_loss;
        }
    }
    profit
}

#[derive(Debug, Default)]
pub struct Ledger {
    records: Vec<CallRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call under a fresh uuid and return it.
    pub fn add_record(&mut self, new: NewCall) -> &CallRecord {
        self.insert_with_id(Uuid::new_v4().to_string(), new)
    }

    pub(crate) fn insert_with_id(&mut self, id: String, new: NewCall) -> &CallRecord {
        let close_price = match new.status {
            CallStatus::Closed => new.close_price,
            _ => None,
        };
        let rolled_from_id = new.rolled_from_id.filter(|s| !s.is_empty());
        let net_profit = compute_net_profit(
            new.premium,
            close_price,
            rolled_from_id.as_deref(),
            &self.records,
        );
        debug!(%id, ticker = %new.ticker, %net_profit, "call added");
        self.records.push(CallRecord {
            id,
            ticker: new.ticker,
            strike: new.strike,
            premium: new.premium,
            expiration_date: new.expiration_date,
            status: new.status,
            close_price,
            rolled_from_id,
            spot_price: new.spot_price,
            net_profit,
        });
        &self.records[self.records.len() - 1]
    }

    /// Remove every call whose id starts with `prefix`. Returns how many went.
    /// An empty prefix removes nothing.
    pub fn delete_by_id_prefix(&mut self, prefix: &str) -> usize {
        if prefix.is_empty() {
            return 0;
        }
        let before = self.records.len();
        self.records.retain(|c| !c.id.starts_with(prefix));
        let removed = before - self.records.len();
        debug!(prefix, removed, "calls deleted by prefix");
        removed
    }

    /// Remove the call with exactly this id.
    pub fn delete(&mut self, id: &str) -> Result<CallRecord, LedgerError> {
        let idx = self
            .records
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        let removed = self.records.remove(idx);
        debug!(id, ticker = %removed.ticker, "call deleted");
        Ok(removed)
    }

    pub fn list_records(&self) -> &[CallRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CallRecord> {
        self.records.iter().find(|c| c.id == id)
    }

    /// The single call whose id starts with `prefix`.
    pub fn resolve_prefix(&self, prefix: &str) -> Result<&CallRecord, LedgerError> {
        let mut hits = self
            .records
            .iter()
            .filter(|c| !prefix.is_empty() && c.id.starts_with(prefix));
        match (hits.next(), hits.count()) {
            (Some(c), 0) => Ok(c),
            (Some(_), rest) => Err(LedgerError::AmbiguousPrefix {
                prefix: prefix.to_string(),
                matches: rest + 1,
            }),
            (None, _) => Err(LedgerError::NotFound(prefix.to_string())),
        }
    }

    /// Look a call up by its "TICKER - STRIKE" label. Later calls shadow earlier ones.
    pub fn find_by_label(&self, ticker: &str, strike: Decimal) -> Option<&CallRecord> {
        self.records
            .iter()
            .rev()
            .find(|c| c.ticker.eq_ignore_ascii_case(ticker) && c.strike == strike)
    }

    pub fn total_net_profit(&self) -> Decimal {
        self.records
            .iter()
            .fold(Decimal::ZERO, |acc, c| acc + c.net_profit)
    }
}
