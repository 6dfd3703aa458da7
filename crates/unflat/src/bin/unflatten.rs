//! `unflatten` — rebuild a nested document from a flat JSON object.
//!
//! Usage:
//!   unflatten [delimiter]
//!
//! Reads a flat JSON object of string values from stdin, e.g.
//! `{"Address_Street": "Victory Street", "Countries_0_Name": "UK"}`, and
//! prints the nested document. The delimiter defaults to `_`.

use std::collections::HashMap;
use std::io::{self, Read, Write};

use serde_json::Value;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let delimiter = match args.get(1) {
        Some(arg) => {
            let mut chars = arg.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    eprintln!("Delimiter must be a single character.");
                    std::process::exit(1);
                }
            }
        }
        None => unflat::DEFAULT_DELIMITER,
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let parsed: Value = match serde_json::from_str(buf.trim()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let Value::Object(entries) = parsed else {
        eprintln!("Input must be a JSON object.");
        std::process::exit(1);
    };

    let mut data: HashMap<String, String> = HashMap::with_capacity(entries.len());
    for (key, value) in entries {
        let Value::String(text) = value else {
            eprintln!("Key `{key}` must map to a string value.");
            std::process::exit(1);
        };
        data.insert(key, text);
    }

    match unflat::tree::unflatten_with(&data, delimiter) {
        Ok(Some(tree)) => {
            let rendered = serde_json::to_string_pretty(&tree).unwrap();
            io::stdout().write_all(rendered.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Ok(None) => println!("null"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
