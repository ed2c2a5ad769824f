//! Parse console commands typed by the user.
//!
//! ```text
//! add [TICKER] <strike> <premium> <YYYY-MM-DD> <status> [close=<x>] [from=<ref>] [spot=<x>]
//! list | ls
//! delete <id-prefix> | rm <id-prefix>
//! purge <id-prefix>
//! export [dir]
//! json | help | quit | exit
//! ```

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

use crate::types::CallStatus;
use crate::utils::sanitize_symbol;

/// How the user pointed at the leg a new call was rolled from.
#[derive(Debug, Clone, PartialEq)]
pub enum RollRef {
    /// Full id or a prefix of it.
    Id(String),
    /// `TICKER@STRIKE`, the label shown in the table.
    Label { ticker: String, strike: Decimal },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddArgs {
    pub ticker: Option<String>,
    pub strike: Decimal,
    pub premium: Decimal,
    pub expiration_date: NaiveDate,
    pub status: CallStatus,
    pub close_price: Option<Decimal>,
    pub rolled_from: Option<RollRef>,
    pub spot_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(AddArgs),
    List,
    Delete(String),
    /// Remove every call whose id starts with the prefix.
    Purge(String),
    Export(Option<String>),
    Json,
    Help,
    Quit,
}

fn add_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^add\s+(?:([A-Z][A-Z.]{0,9})\s+)?(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\s+(\d{4}-\d{2}-\d{2})\s+(open|closed|expired|assigned)((?:\s+[a-z]+=\S+)*)$",
        )
        .unwrap()
    })
}

fn opt_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)([a-z]+)=(\S+)").unwrap())
}

fn label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^([A-Z][A-Z.]{0,9})@(\d+(?:\.\d+)?)$").unwrap())
}

pub fn parse_command(text: &str) -> Option<Command> {
    let t = text.trim();
    let mut words = t.split_whitespace();
    let head = words.next()?.to_ascii_lowercase();
    let rest: Vec<&str> = words.collect();

    match (head.as_str(), rest.as_slice()) {
        ("list" | "ls", []) => Some(Command::List),
        ("delete" | "rm", [prefix]) => Some(Command::Delete(prefix.to_string())),
        ("purge", [prefix]) => Some(Command::Purge(prefix.to_string())),
        ("export", []) => Some(Command::Export(None)),
        ("export", [dir]) => Some(Command::Export(Some(dir.to_string()))),
        ("json", []) => Some(Command::Json),
        ("help" | "?", []) => Some(Command::Help),
        ("quit" | "exit", []) => Some(Command::Quit),
        ("add", _) => parse_add(t).map(Command::Add),
        _ => None,
    }
}

fn parse_add(t: &str) -> Option<AddArgs> {
    let c = add_re().captures(t)?;
    let ticker = c.get(1).map(|m| sanitize_symbol(m.as_str()));
    let strike: Decimal = c[2].parse().ok()?;
    let premium: Decimal = c[3].parse().ok()?;
    let expiration_date = NaiveDate::parse_from_str(&c[4], "%Y-%m-%d").ok()?;
    let status: CallStatus = c[5].parse().ok()?;

    let mut args = AddArgs {
        ticker,
        strike,
        premium,
        expiration_date,
        status,
        close_price: None,
        rolled_from: None,
        spot_price: None,
    };

    for o in opt_re().captures_iter(&c[6]) {
        let val = &o[2];
        match o[1].to_ascii_lowercase().as_str() {
            "close" => args.close_price = Some(val.parse().ok()?),
            "spot" => args.spot_price = Some(val.parse().ok()?),
            "from" => args.rolled_from = Some(parse_roll_ref(val)),
            _ => return None,
        }
    }
    Some(args)
}

fn parse_roll_ref(val: &str) -> RollRef {
    if let Some(c) = label_re().captures(val) {
        if let Ok(strike) = c[2].parse() {
            return RollRef::Label {
                ticker: sanitize_symbol(&c[1]),
                strike,
            };
        }
    }
    RollRef::Id(val.to_string())
}
