//! One interactive session: a ledger plus the policy applied to it.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::LedgerError;
use crate::export::{export_dir, write_export};
use crate::ledger::Ledger;
use crate::parser::{AddArgs, Command, RollRef};
use crate::types::{CallRecord, NewCall};
use crate::validate::Validator;
use crate::view::{self, Style};

#[derive(Debug)]
pub enum Reply {
    Added(CallRecord),
    Deleted(CallRecord),
    Purged(usize),
    Table(String),
    Exported(PathBuf),
    Json(String),
    Help,
    Quit,
}

impl Reply {
    pub fn message(&self, style: Style) -> String {
        match self {
            Reply::Added(c) => format!("{} {}", style.paint("added"), view::label(c)),
            Reply::Deleted(c) => format!("{} {}", style.paint("deleted"), view::label(c)),
            Reply::Purged(n) => format!("{} {} calls", style.paint("purged"), n),
            Reply::Table(t) | Reply::Json(t) => t.clone(),
            Reply::Exported(p) => format!("{} {}", style.paint("exported"), p.display()),
            Reply::Help => view::HELP.to_string(),
            Reply::Quit => "bye".to_string(),
        }
    }
}

pub struct Session {
    ledger: Ledger,
    validator: Validator,
    default_ticker: String,
    export_dir: Option<String>,
    style: Style,
}

impl Session {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            ledger: Ledger::new(),
            validator: Validator::new(&cfg.validation),
            default_ticker: cfg.default_ticker(),
            export_dir: cfg.export.dir.clone(),
            style: Style {
                theme: cfg.ui.theme,
                color: cfg.ui.color,
            },
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn handle(&mut self, cmd: Command, today: NaiveDate) -> anyhow::Result<Reply> {
        match cmd {
            Command::Add(args) => Ok(Reply::Added(self.add(args, today)?)),
            Command::Delete(prefix) => Ok(Reply::Deleted(self.delete(&prefix)?)),
            Command::Purge(prefix) => {
                let n = self.ledger.delete_by_id_prefix(&prefix);
                info!(prefix = %prefix, removed = n, "covered calls purged");
                Ok(Reply::Purged(n))
            }
            Command::List => Ok(Reply::Table(self.table())),
            Command::Export(dir) => {
                let dir = match dir {
                    Some(d) => PathBuf::from(d),
                    None => export_dir(self.export_dir.as_deref()),
                };
                Ok(Reply::Exported(self.export(&dir)?))
            }
            Command::Json => Ok(Reply::Json(serde_json::to_string_pretty(
                self.ledger.list_records(),
            )?)),
            Command::Help => Ok(Reply::Help),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    pub fn add(&mut self, args: AddArgs, today: NaiveDate) -> Result<CallRecord, LedgerError> {
        let rolled_from_id = match &args.rolled_from {
            Some(r) => Some(self.resolve_roll(r)?),
            None => None,
        };
        let call = NewCall {
            ticker: args.ticker.unwrap_or_else(|| self.default_ticker.clone()),
            strike: args.strike,
            premium: args.premium,
            expiration_date: args.expiration_date,
            status: args.status,
            close_price: args.close_price,
            rolled_from_id,
            spot_price: args.spot_price,
        };
        if let Err(e) = self.validator.pre_check(&call, &self.ledger, today) {
            warn!("add rejected: {}", e);
            return Err(e);
        }
        let rec = self.ledger.add_record(call).clone();
        info!(id = %rec.id, ticker = %rec.ticker, net_profit = %rec.net_profit, "covered call added");
        Ok(rec)
    }

    /// Resolve a display prefix to one call, then delete by its exact id.
    pub fn delete(&mut self, prefix: &str) -> Result<CallRecord, LedgerError> {
        let id = self.ledger.resolve_prefix(prefix)?.id.clone();
        let removed = self.ledger.delete(&id)?;
        info!(id = %removed.id, ticker = %removed.ticker, "covered call deleted");
        Ok(removed)
    }

    pub fn table(&self) -> String {
        view::render_table(
            self.ledger.list_records(),
            self.ledger.total_net_profit(),
            self.style,
        )
    }

    pub fn export(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        write_export(self.ledger.list_records(), dir)
    }

    /// Unknown id prefixes pass through as-is and later add no roll credit.
    fn resolve_roll(&self, r: &RollRef) -> Result<String, LedgerError> {
        match r {
            RollRef::Id(raw) => {
                if self.ledger.get(raw).is_some() {
                    return Ok(raw.clone());
                }
                match self.ledger.resolve_prefix(raw) {
                    Ok(c) => Ok(c.id.clone()),
                    Err(LedgerError::NotFound(_)) => Ok(raw.clone()),
                    Err(e) => Err(e),
                }
            }
            RollRef::Label { ticker, strike } => self
                .ledger
                .find_by_label(ticker, *strike)
                .map(|c| c.id.clone())
                .ok_or_else(|| LedgerError::NotFound(format!("{}@{}", ticker, strike))),
        }
    }
}
