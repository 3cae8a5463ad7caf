//! Decoding hand-written CKT and inspecting it as tables.
//!
//! Run with: cargo run --example dynamic_values

use serde_ckt::{ckt, decode, encode, Indent, Value};
use std::error::Error;

const CONFIG: &str = r#"
# positional members first, then named ones
localhost, 8080
features = [auth, logging, metrics]
debug = true
motd =
  | Welcome!
  | Maintenance on Sundays.
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let config = decode(CONFIG)?;

    println!("{} elements, {} members", config.element_count(), config.len());
    for (index, element) in config.elements().enumerate() {
        println!("  element {}: {} ({})", index, element, element.kind());
    }
    for (key, value) in config.properties() {
        println!("  property {}: {}", key, value);
    }

    if let Some(features) = config.get("features").and_then(Value::as_table) {
        let names: Vec<&str> = features.elements().filter_map(Value::as_str).collect();
        println!("\nFeatures: {}", names.join(", "));
    }

    if let Some(motd) = config.get("motd").and_then(Value::as_str) {
        println!("Message of the day:\n{}\n", motd);
    }

    // Gaps turn later indices into named members.
    let sparse = decode("first, 5 = sixth, seventh")?;
    println!("Sparse table: {}", encode(&sparse, Indent::None)?);

    let patch = ckt!({"debug": false, "features": ["auth"]});
    println!("Patch:\n{}", encode(&patch, 2usize)?);

    match decode("key = [ nested") {
        Ok(_) => println!("unexpectedly valid"),
        Err(err) => println!("\nError reporting: {}", err),
    }

    Ok(())
}
