//! Customizing VMX output with VmxOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use serde_vmx::{to_string_with_options, LineEnding, VmxOptions};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Vm {
    #[serde(rename = "displayName")]
    name: String,
    #[serde(rename = "guestOS")]
    guest_os: String,
    #[serde(rename = "msg.autoAnswer")]
    auto_answer: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let vm = Vm {
        name: "win-build".to_string(),
        guest_os: "windows9-64".to_string(),
        auto_answer: true,
    };

    println!("Default (LF):");
    let default = serde_vmx::to_string(&vm)?;
    println!("{:?}\n", default);

    println!("CRLF line endings:");
    let crlf = to_string_with_options(&vm, VmxOptions::crlf())?;
    println!("{:?}\n", crlf);

    // Both forms decode to the same record
    let explicit = VmxOptions::new().with_line_ending(LineEnding::CrLf);
    let again = to_string_with_options(&vm, explicit)?;
    assert_eq!(crlf, again);

    let back: Vm = serde_vmx::from_str(&crlf)?;
    println!("Decoded from CRLF: {:?}", back);

    Ok(())
}
