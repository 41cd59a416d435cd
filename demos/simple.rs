//! Basic TJSON serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_tjson::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u64,
    name: String,
    balance: i64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            balance: 1200,
        },
        User {
            id: u64::MAX,
            name: "Bob Smith".to_string(),
            balance: -35,
        },
    ];

    // Serialize to TJSON
    let text = to_string(&users)?;
    println!("TJSON output:\n{}\n", text);

    // Deserialize back to struct
    let users_back: Vec<User> = from_str(&text)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    Ok(())
}
