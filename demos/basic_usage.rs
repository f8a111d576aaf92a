//! Basic gossip usage example
//!
//! Demonstrates hierarchy construction, level inheritance and the logging
//! macros.
//!
//! Run with: cargo run --example basic_usage

use gossip::prelude::*;
use gossip::{debug, info, warn};

fn main() {
    println!("=== Gossip - Basic Usage Example ===\n");

    // Resolve configuration (environment, home, working directory) and
    // fall back to console output if none is found.
    let hierarchy = Hierarchy::new();

    println!("1. Root default is WARN, so only warnings and errors show:");
    let app = hierarchy.get_logger("com.example.app");
    app.debug("debug message (hidden)");
    app.warn("warning message (visible)");
    app.error("error message (visible)");

    println!("\n2. Levels are inherited from the closest configured ancestor:");
    hierarchy.set_level("com.example", Some(Level::Debug));
    let worker = hierarchy.get_logger("com.example.app.worker");
    println!(
        "   com.example.app.worker resolves to {}",
        worker.effective_level()
    );
    worker.debug("debug message (now visible)");

    println!("\n3. Macros format lazily and capture the call site:");
    info!(worker, "processed {} items", 42);
    debug!(worker, "queue depth: {}", 7);
    warn!(app, "disk usage at {}%", 93);

    println!("\n4. Registered loggers:");
    let mut names = hierarchy.logger_names();
    names.sort();
    for name in names {
        println!("   {name}");
    }

    println!("\n=== Example completed successfully! ===");
}
