//! Record global input until Ctrl+C, then dump the session as JSON lines.
//!
//! ```sh
//! cargo run --example record
//! ```

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use action_recorder::prelude::*;
use anyhow::Result;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let recorder = Recorder::global();

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    println!("Recording global input (Ctrl+C to stop)");
    recorder.start()?;

    let mut count = 0;
    while running.load(Ordering::SeqCst) {
        let buffered = recorder.action_count();
        if buffered != count {
            count = buffered;
            print!("\r{count} actions");
            io::stdout().flush()?;
        }
        thread::sleep(Duration::from_millis(50));
    }

    let actions = recorder.stop();
    println!("\n{} actions recorded", actions.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for action in &actions {
        serde_json::to_writer(&mut out, action)?;
        writeln!(out)?;
    }

    Ok(())
}
