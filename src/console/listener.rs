// console/listener.rs

use std::io::{self, BufRead};
use std::thread;
use tokio::sync::mpsc::Sender;
use tracing::{info, warn};

/// Forwards non-empty lines until EOF or until the receiver is gone.
///
/// Blocks the calling thread; never call it from inside the runtime.
pub fn forward_lines<R: BufRead>(reader: R, tx: Sender<String>) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!("stdin read error: {:?}", e);
                break;
            }
        }
    }
}

/// Reads stdin on a detached OS thread.
///
/// A pending read on tokio's stdin sits on the blocking pool and keeps the
/// runtime from shutting down; a plain thread does not, so the process exits
/// as soon as `main` returns even while a read is outstanding.
pub fn spawn_listener(tx: Sender<String>) {
    let spawned = thread::Builder::new()
        .name("console-listener".to_string())
        .spawn(move || {
            info!("▶️ Starting console listener...");
            forward_lines(io::stdin().lock(), tx);
            info!("🛑 Console listener ended.");
        });
    if let Err(e) = spawned {
        warn!("Failed to start console listener: {:?}", e);
    }
}
