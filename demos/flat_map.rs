//! Inspecting and editing a descriptor through VmxMap.
//!
//! Run with: cargo run --example flat_map

use serde_vmx::model::VirtualMachine;
use serde_vmx::{from_map, VmxMap};
use std::error::Error;

const DESCRIPTOR: &str = r#".encoding = "UTF-8"
config.version = "8"
virtualHW.version = "13"
displayName = "legacy"
guestOS = "centos-64"
memsize = "1024"
numvcpus = "1"
scsi0:0.fileName = "legacy.vmdk"
ethernet0.present = "true"
ethernet0.connectionType = "nat"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let mut map: VmxMap = DESCRIPTOR.parse()?;
    println!("{} settings", map.len());

    if map.contains_group("ethernet0") {
        println!("ethernet0 is configured");
    }

    // Edit in place; keys keep their position
    map.insert("memsize".to_string(), "4096".to_string());
    map.remove("scsi0:0.fileName");
    println!("\nEdited:\n{}", map);

    let vm: VirtualMachine = from_map(map)?;
    println!("{} now has {} MB", vm.display_name, vm.memsize);

    Ok(())
}
