//! Ready-made records for common VMware descriptor settings.
//!
//! These types cover the keys most tools touch when generating or inspecting a
//! `.vmx` file. Keys this model does not declare are ignored on decode, so a full
//! descriptor can be read without losing the fields you care about. Device entries
//! addressed with a colon (`scsi0:0.fileName`) do not follow the dotted composition
//! rules and are not modeled.
//!
//! ## Examples
//!
//! ```rust
//! use serde_vmx::model::{Ethernet, VirtualMachine};
//!
//! let mut vm = VirtualMachine::new("build-agent", "ubuntu-64");
//! vm.memsize = 2048;
//! vm.ethernet.push(Ethernet::new("e1000", "nat"));
//!
//! let vmx = serde_vmx::to_string(&vm).unwrap();
//! assert!(vmx.contains("ethernet0.virtualDev = \"e1000\"\n"));
//!
//! let back: VirtualMachine = serde_vmx::from_str(&vmx).unwrap();
//! assert_eq!(back, vm);
//! ```

use serde::{Deserialize, Serialize};

/// Top-level settings of a virtual machine descriptor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct VirtualMachine {
    #[serde(rename = ".encoding")]
    pub encoding: String,
    #[serde(rename = "config.version")]
    pub config_version: String,
    #[serde(rename = "virtualHW")]
    pub hardware: VirtualHardware,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "annotation,omitempty")]
    pub annotation: String,
    #[serde(rename = "guestOS")]
    pub guest_os: String,
    /// Firmware type; the hypervisor picks BIOS when unset.
    #[serde(rename = "firmware")]
    pub firmware: Option<Firmware>,
    /// Memory in megabytes.
    #[serde(rename = "memsize")]
    pub memsize: u32,
    #[serde(rename = "numvcpus")]
    pub numvcpus: u32,
    #[serde(rename = "cpuid.coresPerSocket,omitempty")]
    pub cores_per_socket: u32,
    #[serde(rename = "mem.hotadd,omitempty")]
    pub mem_hot_add: bool,
    #[serde(rename = "vcpu.hotadd,omitempty")]
    pub vcpu_hot_add: bool,
    /// Answer interactive questions with their default choice.
    #[serde(rename = "msg.autoAnswer,omitempty")]
    pub auto_answer: bool,
    #[serde(rename = "uuid")]
    pub uuid: Option<Uuid>,
    #[serde(rename = "tools")]
    pub tools: Tools,
    #[serde(rename = "RemoteDisplay.vnc")]
    pub vnc: Option<Vnc>,
    #[serde(rename = "ethernet")]
    pub ethernet: Vec<Ethernet>,
}

impl VirtualMachine {
    /// Creates a descriptor with the settings every VM needs and one vCPU.
    #[must_use]
    pub fn new(display_name: &str, guest_os: &str) -> Self {
        VirtualMachine {
            encoding: "UTF-8".to_string(),
            config_version: "8".to_string(),
            hardware: VirtualHardware {
                version: 10,
                product_compatibility: "hosted".to_string(),
            },
            display_name: display_name.to_string(),
            guest_os: guest_os.to_string(),
            memsize: 512,
            numvcpus: 1,
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct VirtualHardware {
    #[serde(rename = "version")]
    pub version: u32,
    #[serde(rename = "productCompatibility,omitempty")]
    pub product_compatibility: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Firmware {
    Bios,
    Efi,
}

/// BIOS and location identifiers, written by the hypervisor on first boot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Uuid {
    #[serde(rename = "bios,omitempty")]
    pub bios: String,
    #[serde(rename = "location,omitempty")]
    pub location: String,
    /// `keep` or `create` when the VM is moved or copied.
    #[serde(rename = "action,omitempty")]
    pub action: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Tools {
    #[serde(rename = "syncTime,omitempty")]
    pub sync_time: bool,
    #[serde(rename = "upgrade.policy,omitempty")]
    pub upgrade_policy: String,
}

/// Built-in VNC server settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Vnc {
    #[serde(rename = "enabled")]
    pub enabled: bool,
    #[serde(rename = "port,omitempty")]
    pub port: u16,
    #[serde(rename = "key,omitempty")]
    pub key: String,
}

/// One virtual network adapter, `ethernetN.*`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Ethernet {
    #[serde(rename = "present")]
    pub present: bool,
    #[serde(rename = "startConnected,omitempty")]
    pub start_connected: bool,
    #[serde(rename = "connectionType,omitempty")]
    pub connection_type: String,
    #[serde(rename = "virtualDev,omitempty")]
    pub virtual_dev: String,
    #[serde(rename = "vnet,omitempty")]
    pub vnet: String,
    #[serde(rename = "addressType,omitempty")]
    pub address_type: String,
    #[serde(rename = "address,omitempty")]
    pub address: String,
    #[serde(rename = "generatedAddress,omitempty")]
    pub generated_address: String,
    #[serde(rename = "wakeOnPcktRcv,omitempty")]
    pub wake_on_packet: bool,
    #[serde(rename = "linkStatePropagation.enable,omitempty")]
    pub link_state_propagation: bool,
}

impl Ethernet {
    /// A connected adapter with a generated MAC address.
    #[must_use]
    pub fn new(virtual_dev: &str, connection_type: &str) -> Self {
        Ethernet {
            present: true,
            start_connected: true,
            connection_type: connection_type.to_string(),
            virtual_dev: virtual_dev.to_string(),
            address_type: "generated".to_string(),
            ..Default::default()
        }
    }
}
