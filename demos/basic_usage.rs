//! Basic registry usage example
//!
//! Demonstrates named loggers, rules applied by name and by regex, structured
//! configuration and image dumping.
//!
//! Run with: cargo run --example basic_usage

use logger_registry::prelude::*;
use logger_registry::{critical, debug, error, info, warn};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Logger Registry - Basic Usage Example ===\n");

    println!("1. Loggers are shared by name:");
    let app = get_logger("app");
    info!(app, "application starting, pid {}", std::process::id());
    debug!(app, "hidden: the default level is info");

    println!("\n2. A regex rule reaches existing and future loggers:");
    let db = get_logger("svc.db");
    configure(
        Target::regex(r"svc\..*"),
        ConfigRule::new()
            .with_level(LogLevel::Debug)
            .with_pattern("[%H:%M:%S.%e] [%n] [%^%L%$] %v", TimeType::Utc),
    )?;
    let cache = get_logger("svc.cache");
    debug!(db, "pool size {}", 8);
    debug!(cache, "warming {} entries", 1024);

    println!("\n3. Structured configuration, one result per record:");
    let results = logger_registry::config::apply_document(&json!({
        "loggers": [
            {"name": "audit", "level": "3", "sink": 1},
            {"name": "broken", "level": "loud"}
        ]
    }));
    for result in &results {
        match result {
            Ok(Some(logger)) => println!("   configured '{}'", logger.name()),
            Ok(None) => println!("   registered a pattern rule"),
            Err(e) => println!("   rejected: {}", e),
        }
    }
    let audit = get_logger("audit");
    info!(audit, "hidden: audit only shows warnings and above");
    warn!(audit, "user {} changed permissions", "alice");

    #[cfg(feature = "image")]
    {
        println!("\n4. Image arguments are dumped above the image threshold:");
        let camera = get_logger("camera");
        camera.set_log_image(LogLevel::Error);
        let frame = Image::from(image::RgbImage::from_pixel(16, 16, image::Rgb([255, 0, 0])));
        info!(camera, "below threshold: {}", frame.clone());
        error!(camera, "dumped: {}", frame);
    }

    critical!("the default logger has an empty name");

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
