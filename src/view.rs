//! Plain-text rendering of the ledger for the console.

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::config::Theme;
use crate::types::CallRecord;
use crate::utils::{fmt_decimal, fmt_opt_decimal, short_id};

pub const EMPTY_NOTICE: &str = "No covered calls registered yet.";

pub const HELP: &str = "\
commands:
  add [TICKER] <strike> <premium> <YYYY-MM-DD> <open|closed|expired|assigned> [close=<x>] [from=<id|TICKER@STRIKE>] [spot=<x>]
  list                 show all calls
  delete <id-prefix>   remove one call (prefix must be unique)
  purge <id-prefix>    remove every call whose id starts with the prefix
  export [dir]         write covered_calls.xlsx
  json                 dump the ledger as JSON
  quit";

#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub theme: Theme,
    pub color: bool,
}

impl Style {
    pub fn paint(&self, text: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", self.theme.accent(), text)
        } else {
            text.to_string()
        }
    }
}

/// "TICKER - STRIKE (abc123)", the label used to pick a call.
pub fn label(c: &CallRecord) -> String {
    format!("{} - {} ({})", c.ticker, fmt_decimal(c.strike), short_id(&c.id))
}

pub fn render_table(records: &[CallRecord], total: Decimal, style: Style) -> String {
    if records.is_empty() {
        return EMPTY_NOTICE.to_string();
    }
    let wide = style.theme.wide();

    let mut head = format!(
        "{:<8} {:>10} {:>9} {:<10} {:<8} {:>9} {:>10} {:>10}",
        "ticker", "strike", "premium", "expiration", "status", "close", "net", "spot"
    );
    if wide {
        head.push_str(&format!(" {:<6} {:<6}", "id", "rolled"));
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", style.paint(&head));
    for c in records {
        let _ = write!(
            out,
            "{:<8} {:>10} {:>9} {:<10} {:<8} {:>9} {:>10} {:>10}",
            c.ticker,
            fmt_decimal(c.strike),
            fmt_decimal(c.premium),
            c.expiration_date.format("%Y-%m-%d"),
            c.status.as_str(),
            fmt_opt_decimal(c.close_price),
            fmt_decimal(c.net_profit),
            fmt_opt_decimal(c.spot_price),
        );
        if wide {
            let rolled = c.rolled_from_id.as_deref().map(short_id).unwrap_or("-");
            let _ = write!(out, " {:<6} {:<6}", short_id(&c.id), rolled);
        }
        out.push('\n');
    }
    let _ = write!(
        out,
        "{}",
        style.paint(&format!("{} calls, total net profit {}", records.len(), fmt_decimal(total)))
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CallStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn rec() -> CallRecord {
        CallRecord {
            id: "0f3a9c1e-1111-4222-8333-444455556666".into(),
            ticker: "AAPL".into(),
            strike: dec!(150.0),
            premium: dec!(2.50),
            expiration_date: NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
            status: CallStatus::Closed,
            close_price: Some(dec!(1.00)),
            rolled_from_id: Some("abcdef99".into()),
            spot_price: None,
            net_profit: dec!(1.50),
        }
    }

    fn plain(theme: Theme) -> Style {
        Style { theme, color: false }
    }

    #[test]
    fn empty_ledger_shows_notice() {
        assert_eq!(render_table(&[], Decimal::ZERO, plain(Theme::Classic)), EMPTY_NOTICE);
    }

    #[test]
    fn label_uses_short_id() {
        assert_eq!(label(&rec()), "AAPL - 150 (0f3a9c)");
    }

    #[test]
    fn narrow_table_has_row_and_total() {
        let out = render_table(&[rec()], dec!(1.5), plain(Theme::Classic));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ticker"));
        assert!(lines[1].contains("2026-11-20"));
        assert!(lines[1].contains("closed"));
        assert!(!lines[1].contains("0f3a9c"));
        assert_eq!(lines[2], "1 calls, total net profit 1.5");
    }

    #[test]
    fn wide_table_shows_ids() {
        let out = render_table(&[rec()], dec!(1.5), plain(Theme::Premium));
        assert!(out.contains("0f3a9c"));
        assert!(out.contains("abcdef"));
    }

    #[test]
    fn color_wraps_in_ansi() {
        let s = Style { theme: Theme::BlackOrange, color: true };
        assert_eq!(s.paint("x"), "\x1b[1;38;5;208mx\x1b[0m");
        assert_eq!(plain(Theme::BlackOrange).paint("x"), "x");
    }
}
