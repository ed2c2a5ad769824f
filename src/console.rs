//! Console input. Reads lines on a dedicated thread and forwards parsed commands.

use std::io::BufRead;
use std::thread::JoinHandle;
use tokio::sync::mpsc::Sender;
use tracing::{error, info, warn};

use crate::parser::{parse_command, Command};

/// Forward every recognised line of `input` to `tx`. Returns how many were sent.
/// Stops early when the receiver is gone.
pub fn forward_lines<R: BufRead>(input: R, tx: &Sender<Command>) -> usize {
    let mut sent = 0;
    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("Console read error: {}", e);
                break;
            }
        };
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        match parse_command(text) {
            Some(cmd) => {
                if tx.blocking_send(cmd).is_err() {
                    break;
                }
                sent += 1;
            }
            None => warn!("Unrecognized command: {} (type 'help')", text),
        }
    }
    sent
}

/// Blocking stdin reads live on their own thread so the runtime never waits on them.
pub fn spawn(tx: Sender<Command>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        forward_lines(stdin.lock(), &tx);
        info!("Console input closed");
    })
}
