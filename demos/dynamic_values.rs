//! Working with TjsonValue for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_tjson::{decode, encode, from_value, to_value, TjsonValue};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let input = r#"{
        "s:host": "s:localhost",
        "s:port": "u:8080",
        "b16:c0ffee": "b32:mzxw6",
        "s:started": "t:2016-10-02T07:31:51Z",
        "s:load": 0.75
    }"#;

    let config = decode(input)?;
    println!("Decoded: {:?}\n", config);

    // Access values dynamically
    if let TjsonValue::Object(obj) = &config {
        if let Some(host) = obj.get_text("host").and_then(TjsonValue::as_str) {
            println!("Accessing member 'host': {}", host);
        }

        if let Some(port) = obj.get_text("port").and_then(TjsonValue::as_u64) {
            println!("Accessing member 'port': {}", port);
        }

        if let Some(bytes) = obj.get_binary(&[0xc0, 0xff, 0xee]).and_then(TjsonValue::as_bytes) {
            println!("Accessing binary member: {:?}", bytes);
        }

        if let Some(started) = obj.get_text("started").and_then(TjsonValue::as_timestamp) {
            println!("Accessing member 'started': {}\n", started);
        }

        for (key, value) in obj {
            println!("  {} is {}", key, value.kind());
        }
    }

    // Binary re-encodes as base64 whatever it was read as
    println!("\nRe-encoded:\n{}\n", encode(&config)?);

    // Convert an existing struct to a value and back
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = to_value(&user)?;
    println!("User as TJSON:\n{}\n", encode(&user_value)?);

    println!("Type checks:");
    println!("  is_object: {}", user_value.is_object());
    println!("  is_array:  {}", user_value.is_array());
    println!("  is_string: {}", user_value.is_string());

    let user_back: User = from_value(user_value)?;
    println!("\nBack to struct: {:?}", user_back);

    Ok(())
}
