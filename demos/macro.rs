//! Using the tjson! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use serde_tjson::{encode, tjson, TjsonValue};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let numbers = tjson!([1, 2u8, 3.5]);
    let mixed = tjson!([1, "two", true, null]);

    println!("Arrays:");
    println!("  Numbers: {}", encode(&numbers)?);
    println!("  Mixed:   {}\n", encode(&mixed)?);

    let user = tjson!({
        "id": 123u64,
        "name": "Alice",
        "email": "alice@example.com",
        "active": true
    });

    println!("Objects:");
    println!("{}\n", encode(&user)?);

    let config = tjson!({
        "app": {
            "name": "MyApp",
            "version": "1.0.0"
        },
        "database": {
            "host": "localhost",
            "port": 5432u16,
            "name": "mydb"
        },
        b"\x01\x02": (vec![0xffu8, 0x00]),
        "features": ["auth", "logging", "metrics"]
    });

    println!("Nested structures:");
    println!("{}\n", encode(&config)?);

    let items = vec![
        tjson!({"id": 1u32, "status": "active"}),
        tjson!({"id": 2u32, "status": "pending"}),
        tjson!({"id": 3u32, "status": "completed"}),
    ];

    let summary = tjson!({
        "total": 3u32,
        "items": items
    });

    println!("Dynamic construction:");
    println!("{}\n", encode(&summary)?);

    if let TjsonValue::Object(obj) = &config {
        if let Some(TjsonValue::Object(app)) = obj.get_text("app") {
            if let Some(name) = app.get_text("name").and_then(TjsonValue::as_str) {
                println!("Accessing values:");
                println!("  App name: {}", name);
            }
        }

        if let Some(TjsonValue::Array(features)) = obj.get_text("features") {
            println!("  Features: {}", features.len());
        }
    }

    // Scalars have no TJSON document form on their own
    if let Err(err) = encode(&tjson!("Hello, TJSON!")) {
        println!("\nScalar root: {}", err);
    }

    Ok(())
}
