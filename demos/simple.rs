//! Basic CKT serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_ckt::{from_str, to_string, to_string_pretty};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
    nickname: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            nickname: Some("ali".to_string()),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            nickname: None,
        },
    ];

    let compact = to_string(&users)?;
    println!("CKT output:\n{}\n", compact);

    println!("Pretty:\n{}\n", to_string_pretty(&users)?);

    let users_back: Vec<User> = from_str(&compact)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    Ok(())
}
