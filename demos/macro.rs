//! Using the vmx! macro to build flat key/value maps.
//!
//! Run with: cargo run --example macro

use serde::Deserialize;
use serde_vmx::{from_map, vmx};
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Vm {
    #[serde(rename = "displayName")]
    name: String,
    #[serde(rename = "memsize")]
    memsize: u32,
    #[serde(rename = "mem.hotadd")]
    mem_hot_add: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let memsize = 4096;
    let map = vmx! {
        ".encoding" => "UTF-8",
        "displayName" => "from-macro",
        "memsize" => memsize,
        "mem.hotadd" => true,
    };

    println!("Map as VMX:\n{}", map);

    for (key, value) in &map {
        println!("{key} -> {value}");
    }

    let vm: Vm = from_map(map)?;
    println!("\nDecoded: {:?}", vm);
    assert_eq!(vm.memsize, memsize);
    assert!(vm.mem_hot_add);
    assert_eq!(vm.name, "from-macro");

    Ok(())
}
