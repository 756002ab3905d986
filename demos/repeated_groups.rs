//! Nested groups and indexed repeated groups.
//!
//! Run with: cargo run --example repeated_groups

use serde_vmx::model::{Ethernet, VirtualMachine};
use serde_vmx::{from_str, to_string};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut vm = VirtualMachine::new("router", "other3xlinux-64");
    vm.numvcpus = 2;
    vm.ethernet = vec![
        Ethernet::new("e1000", "bridged"),
        Ethernet::new("e1000", "nat"),
        {
            let mut lan = Ethernet::new("vmxnet3", "custom");
            lan.vnet = "vmnet2".to_string();
            lan.link_state_propagation = true;
            lan
        },
    ];

    let vmx = to_string(&vm)?;
    println!("{}", vmx);

    let back: VirtualMachine = from_str(&vmx)?;
    println!("Decoded {} network adapters", back.ethernet.len());
    assert_eq!(back, vm);

    // A gap in the indices ends the group
    let gapped = "ethernet0.present = \"true\"\nethernet2.present = \"true\"\n";
    let partial: VirtualMachine = from_str(gapped)?;
    println!("With a gap after ethernet0: {} adapter(s)", partial.ethernet.len());

    Ok(())
}
