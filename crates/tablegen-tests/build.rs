use std::{env, error::Error, path::PathBuf};
use tablegen_build::{Generator, GeneratorConfig};

// schema file, subdirectory of OUT_DIR
const SCHEMAS: [(&str, &str); 2] = [
    ("../../schemas/market_data.json", "market_data"),
    ("schemas/trade_events.json", "trade_events"),
];

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    for (schema, name) in SCHEMAS {
        let schema = manifest_dir.join(schema);
        println!("cargo:rerun-if-changed={}", schema.display());

        Generator::new(GeneratorConfig::new(schema, out_dir.join(name))).run()?;
    }

    Ok(())
}
