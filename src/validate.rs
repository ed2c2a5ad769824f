//! Checks run on form input before it reaches the ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::ValidationCfg;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::types::NewCall;

pub struct Validator {
    allow_past_expiration: bool,
    reject_dangling_roll: bool,
}

impl Validator {
    pub fn new(cfg: &ValidationCfg) -> Self {
        Self {
            allow_past_expiration: cfg.allow_past_expiration,
            reject_dangling_roll: cfg.reject_dangling_roll,
        }
    }

    pub fn pre_check(
        &self,
        call: &NewCall,
        ledger: &Ledger,
        today: NaiveDate,
    ) -> Result<(), LedgerError> {
        if call.ticker.trim().is_empty() {
            return Err(LedgerError::InvalidInput("ticker is empty".into()));
        }
        non_negative("strike", Some(call.strike))?;
        non_negative("premium", Some(call.premium))?;
        non_negative("close price", call.close_price)?;
        non_negative("spot price", call.spot_price)?;

        if !self.allow_past_expiration && call.expiration_date < today {
            return Err(LedgerError::InvalidInput(format!(
                "expiration {} is before today ({})",
                call.expiration_date, today
            )));
        }

        if self.reject_dangling_roll {
            if let Some(from) = call.rolled_from_id.as_deref().filter(|s| !s.is_empty()) {
                if ledger.get(from).is_none() {
                    return Err(LedgerError::NotFound(from.to_string()));
                }
            }
        }
        Ok(())
    }
}

fn non_negative(field: &str, v: Option<Decimal>) -> Result<(), LedgerError> {
    match v {
        Some(d) if d.is_sign_negative() && !d.is_zero() => Err(LedgerError::InvalidInput(
            format!("{} must not be negative (got {})", field, d),
        )),
        _ => Ok(()),
    }
}
