//! Strict handling of untagged literals with TjsonOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_tjson::{decode_with_options, to_string, to_string_with_options, TjsonOptions};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Config {
    name: String,
    retries: u8,
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        retries: 3,
        debug: true,
    };

    // Default options let JSON booleans and null through untouched
    println!("Default:");
    println!("{}\n", to_string(&config)?);

    // Strict mode refuses them in both directions
    println!("Strict:");
    match to_string_with_options(&config, TjsonOptions::strict()) {
        Ok(text) => println!("{}\n", text),
        Err(err) => println!("rejected: {}\n", err),
    }

    let input = r#"{"s:name":"s:MyApp","s:debug":true}"#;
    for options in [TjsonOptions::new(), TjsonOptions::new().with_strict(true)] {
        match decode_with_options(input, options.clone()) {
            Ok(value) => println!("strict={} decoded: {:?}", options.strict, value),
            Err(err) => println!("strict={} rejected: {}", options.strict, err),
        }
    }

    Ok(())
}
