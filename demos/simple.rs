//! Basic VMX serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_vmx::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Vm {
    #[serde(rename = ".encoding")]
    encoding: String,
    #[serde(rename = "displayName")]
    name: String,
    #[serde(rename = "memsize")]
    memsize: u32,
    #[serde(rename = "numvcpus")]
    numvcpus: u32,
    #[serde(rename = "annotation,omitempty")]
    annotation: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let vm = Vm {
        encoding: "UTF-8".to_string(),
        name: "dev-box".to_string(),
        memsize: 2048,
        numvcpus: 2,
        annotation: String::new(),
    };

    // Serialize to VMX
    let vmx = to_string(&vm)?;
    println!("VMX output:\n{}", vmx);

    // Deserialize back to struct
    let vm_back: Vm = from_str(&vmx)?;
    assert_eq!(vm, vm_back);
    println!("✓ Round-trip successful");

    Ok(())
}
