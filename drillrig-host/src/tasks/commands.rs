//! Command input
//!
//! Each non-empty line is one command token. Tokens are queued in order
//! and picked up one per tick.

use std::io::{self, BufRead};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

/// Forward tokens from `reader` until EOF or the receiver is gone
///
/// Returns the number of tokens sent.
pub fn read_commands<R: BufRead>(reader: R, tx: &Sender<String>) -> usize {
    let mut sent = 0;
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "command input failed");
                break;
            }
        };
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        debug!(token, "command queued");
        if tx.send(token.to_owned()).is_err() {
            break;
        }
        sent += 1;
    }
    sent
}

/// Read command tokens from stdin on a background thread
pub fn spawn_stdin_reader(tx: Sender<String>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-commands".into())
        .spawn(move || {
            let sent = read_commands(io::stdin().lock(), &tx);
            debug!(sent, "command input closed");
        })
}
