use serde::{Deserialize, Serialize};
use serde_vmx::{
    from_reader, from_slice, from_str, marshal, to_map, to_string, to_string_with_options,
    to_writer, unmarshal, Error, VmxOptions,
};

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct FlatVm {
    #[serde(rename = ".encoding")]
    encoding: String,
    #[serde(rename = "annotation")]
    annotation: String,
    #[serde(rename = "virtualHW.version")]
    hw_version: u8,
    #[serde(rename = "virtualHW.productCompatibility")]
    hw_prod_compat: String,
    #[serde(rename = "memsize")]
    memsize: u32,
    #[serde(rename = "numvcpus")]
    numvcpus: u32,
    #[serde(rename = "mem.hotadd")]
    mem_hot_add: bool,
    #[serde(rename = "displayName")]
    display_name: String,
    #[serde(rename = "guestOS")]
    guest_os: String,
    #[serde(rename = "msg.autoAnswer")]
    auto_answer: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
struct VirtualHardware {
    #[serde(rename = "version")]
    version: String,
    #[serde(rename = "productCompatibility")]
    compat: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
struct Ethernet {
    #[serde(rename = "startConnected")]
    start_connected: bool,
    #[serde(rename = "present")]
    present: bool,
    #[serde(rename = "connectionType")]
    connection_type: String,
    #[serde(rename = "virtualDev")]
    virtual_dev: String,
    #[serde(rename = "wakeOnPcktRcv")]
    wake_on_packet: bool,
    #[serde(rename = "addressType")]
    address_type: String,
    #[serde(rename = "linkStatePropagation.enable,omitempty")]
    link_state_propagation: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
struct Vm {
    #[serde(rename = ".encoding")]
    encoding: String,
    #[serde(rename = "annotation")]
    annotation: String,
    #[serde(rename = "virtualHW")]
    hardware: VirtualHardware,
    #[serde(rename = "memsize")]
    memsize: u32,
    #[serde(rename = "numvcpus")]
    numvcpus: u32,
    #[serde(rename = "mem.hotadd")]
    mem_hot_add: bool,
    #[serde(rename = "displayName")]
    display_name: String,
    #[serde(rename = "guestOS")]
    guest_os: String,
    #[serde(rename = "msg.autoAnswer")]
    auto_answer: bool,
    #[serde(rename = "ethernet")]
    ethernet: Vec<Ethernet>,
}

const HEADER: &str = ".encoding = \"utf-8\"
annotation = \"Test VM\"
virtualHW.version = \"10\"
virtualHW.productCompatibility = \"hosted\"
memsize = \"1024\"
numvcpus = \"2\"
mem.hotadd = \"false\"
displayName = \"test\"
guestOS = \"other3xlinux-64\"
msg.autoAnswer = \"true\"
";

fn test_vm(hw_version: &str) -> Vm {
    Vm {
        encoding: "utf-8".to_string(),
        annotation: "Test VM".to_string(),
        hardware: VirtualHardware {
            version: hw_version.to_string(),
            compat: "hosted".to_string(),
        },
        memsize: 1024,
        numvcpus: 2,
        mem_hot_add: false,
        display_name: "test".to_string(),
        guest_os: "other3xlinux-64".to_string(),
        auto_answer: true,
        ethernet: Vec::new(),
    }
}

fn nic(connection_type: &str, link_state_propagation: bool) -> Ethernet {
    Ethernet {
        start_connected: true,
        present: true,
        connection_type: connection_type.to_string(),
        virtual_dev: "e1000".to_string(),
        wake_on_packet: false,
        address_type: "generated".to_string(),
        link_state_propagation,
    }
}

#[test]
fn test_marshal_flat_record() {
    let vm = FlatVm {
        encoding: "utf-8".to_string(),
        annotation: "Test VM".to_string(),
        hw_version: 10,
        hw_prod_compat: "hosted".to_string(),
        memsize: 1024,
        numvcpus: 2,
        mem_hot_add: false,
        display_name: "test".to_string(),
        guest_os: "other3xlinux-64".to_string(),
        auto_answer: true,
    };

    let data = marshal(&vm).unwrap();
    assert_eq!(String::from_utf8(data).unwrap(), HEADER);
}

#[test]
fn test_marshal_nested_group() {
    let vmx = to_string(&test_vm("10")).unwrap();
    assert_eq!(vmx, HEADER);
}

#[test]
fn test_marshal_repeated_group() {
    let mut vm = test_vm("9");
    vm.ethernet = vec![nic("bridged", true), nic("nat", false)];

    let expected = format!(
        "{}{}",
        HEADER.replace("virtualHW.version = \"10\"", "virtualHW.version = \"9\""),
        "ethernet0.startConnected = \"true\"
ethernet0.present = \"true\"
ethernet0.connectionType = \"bridged\"
ethernet0.virtualDev = \"e1000\"
ethernet0.wakeOnPcktRcv = \"false\"
ethernet0.addressType = \"generated\"
ethernet0.linkStatePropagation.enable = \"true\"
ethernet1.startConnected = \"true\"
ethernet1.present = \"true\"
ethernet1.connectionType = \"nat\"
ethernet1.virtualDev = \"e1000\"
ethernet1.wakeOnPcktRcv = \"false\"
ethernet1.addressType = \"generated\"
"
    );

    assert_eq!(to_string(&vm).unwrap(), expected);
}

#[test]
fn test_round_trip_repeated_group() {
    let mut vm = test_vm("9");
    vm.ethernet = vec![nic("bridged", true), nic("nat", false), nic("hostonly", false)];

    let data = marshal(&vm).unwrap();
    let mut decoded = Vm::default();
    unmarshal(&data, &mut decoded).unwrap();
    assert_eq!(decoded, vm);
}

#[test]
fn test_marshal_is_deterministic() {
    let mut vm = test_vm("10");
    vm.ethernet = vec![nic("bridged", true)];
    assert_eq!(marshal(&vm).unwrap(), marshal(&vm).unwrap());
}

#[test]
fn test_decode_real_descriptor() {
    let input = r#".encoding = "UTF-8"
config.version = "8"
virtualHW.version = "10"
virtualHW.productCompatibility = "hosted"
memsize = "2048"
numvcpus = "4"
displayName = "ubuntu"
guestOS = "ubuntu-64"
scsi0:0.fileName = "disk.vmdk"
ethernet0.present = "true"
ethernet0.connectionType = "nat"
ethernet0.virtualDev = "vmxnet3"
ethernet1.present = "true"
ethernet1.connectionType = "bridged"
"#;

    let vm: Vm = from_str(input).unwrap();
    assert_eq!(vm.encoding, "UTF-8");
    assert_eq!(vm.hardware.version, "10");
    assert_eq!(vm.memsize, 2048);
    assert_eq!(vm.numvcpus, 4);
    assert_eq!(vm.annotation, "");
    assert!(!vm.auto_answer);
    assert_eq!(vm.ethernet.len(), 2);
    assert_eq!(vm.ethernet[0].virtual_dev, "vmxnet3");
    assert!(vm.ethernet[1].present);
    assert_eq!(vm.ethernet[1].virtual_dev, "");
}

#[test]
fn test_decode_stops_at_index_gap() {
    let input = "ethernet0.present = \"true\"\nethernet2.present = \"true\"\n";
    let vm: Vm = from_str(input).unwrap();
    assert_eq!(vm.ethernet.len(), 1);
}

#[test]
fn test_decode_crlf_and_blank_lines() {
    let input = "memsize = \"512\"\r\n\r\nnumvcpus = \"1\"\r\n";
    let vm: Vm = from_str(input).unwrap();
    assert_eq!(vm.memsize, 512);
    assert_eq!(vm.numvcpus, 1);
}

#[test]
fn test_crlf_output_round_trips() {
    let vm = test_vm("10");
    let vmx = to_string_with_options(&vm, VmxOptions::crlf()).unwrap();
    assert_eq!(vmx, HEADER.replace('\n', "\r\n"));
    assert_eq!(from_str::<Vm>(&vmx).unwrap(), vm);
}

#[test]
fn test_decode_type_mismatch() {
    let err = from_str::<Vm>("memsize = \"lots\"\n").unwrap_err();
    match err {
        Error::TypeMismatch { key, .. } => assert_eq!(key, "memsize"),
        other => panic!("expected type mismatch, got {other:?}"),
    }

    assert!(matches!(
        from_str::<Vm>("mem.hotadd = \"TRUE\"\n"),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_decode_parse_error() {
    let err = from_str::<Vm>("memsize = \"1\"\nnumvcpus: 2\n").unwrap_err();
    assert!(matches!(err, Error::Parse { line: 2, .. }));
}

#[test]
fn test_unmarshal_error_leaves_target() {
    let mut vm = test_vm("10");
    let before = vm.clone();
    assert!(unmarshal(b"numvcpus = \"-1\"\n", &mut vm).is_err());
    assert_eq!(vm, before);
}

#[test]
fn test_writer_reader_and_slice() {
    let vm = test_vm("10");

    let mut buffer = Vec::new();
    to_writer(&mut buffer, &vm).unwrap();
    assert_eq!(from_reader::<_, Vm>(buffer.as_slice()).unwrap(), vm);
    assert_eq!(from_slice::<Vm>(&buffer).unwrap(), vm);
}

#[test]
fn test_to_map_keeps_line_order() {
    let mut vm = test_vm("10");
    vm.ethernet = vec![nic("nat", false)];

    let map = to_map(&vm).unwrap();
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys.first(), Some(&".encoding"));
    assert_eq!(keys.last(), Some(&"ethernet0.addressType"));
    assert!(!map.contains_key("ethernet0.linkStatePropagation.enable"));
}

#[test]
fn test_optional_fields() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Optional {
        #[serde(rename = "annotation")]
        annotation: Option<String>,
        #[serde(rename = "cpuid.coresPerSocket")]
        cores: Option<u32>,
        #[serde(rename = "uuid")]
        uuid: Option<VirtualHardware>,
    }

    let value = Optional {
        annotation: Some(String::new()),
        cores: None,
        uuid: Some(VirtualHardware {
            version: "1".to_string(),
            compat: String::new(),
        }),
    };

    let vmx = to_string(&value).unwrap();
    assert_eq!(
        vmx,
        "annotation = \"\"\nuuid.version = \"1\"\nuuid.productCompatibility = \"\"\n"
    );
    assert_eq!(from_str::<Optional>(&vmx).unwrap(), value);
}

#[test]
fn test_skipped_field_is_neither_written_nor_read() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct WithSkip {
        #[serde(rename = "memsize")]
        memsize: u32,
        #[serde(skip)]
        scratch: String,
    }

    let value = WithSkip {
        memsize: 256,
        scratch: "local".to_string(),
    };
    let vmx = to_string(&value).unwrap();
    assert_eq!(vmx, "memsize = \"256\"\n");

    let back: WithSkip = from_str("memsize = \"256\"\nscratch = \"x\"\n").unwrap();
    assert_eq!(back.scratch, "");
}

#[test]
fn test_full_tag_form_field_name() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Tagged {
        #[serde(rename = r#"vmx:"displayName""#)]
        name: String,
        #[serde(rename = r#"vmx:"annotation,omitempty""#)]
        annotation: String,
    }

    let value = Tagged {
        name: "test".to_string(),
        annotation: String::new(),
    };
    let vmx = to_string(&value).unwrap();
    assert_eq!(vmx, "displayName = \"test\"\n");
    assert_eq!(from_str::<Tagged>(&vmx).unwrap(), value);
}

#[test]
fn test_malformed_field_directive() {
    #[derive(Serialize, Deserialize, Debug)]
    struct Broken {
        #[serde(rename = "vmx:displayname")]
        name: String,
    }

    let err = to_string(&Broken {
        name: "x".to_string(),
    })
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Tag name has to be enclosed in double quotes: vmx:displayname"
    );

    let err = from_str::<Broken>("").unwrap_err();
    assert!(matches!(err, Error::MalformedTag { .. }));
}

#[test]
fn test_value_with_quote_is_rejected() {
    let mut vm = test_vm("10");
    vm.annotation = "say \"hi\"".to_string();
    assert!(matches!(
        to_string(&vm),
        Err(Error::TypeMismatch { key, .. }) if key == "annotation"
    ));
}

#[test]
fn test_duplicate_composed_key() {
    #[derive(Serialize)]
    struct Hw {
        #[serde(rename = "version")]
        version: u32,
    }

    #[derive(Serialize)]
    struct Clash {
        #[serde(rename = "virtualHW.version")]
        flat: u32,
        #[serde(rename = "virtualHW")]
        nested: Hw,
    }

    let err = to_string(&Clash {
        flat: 9,
        nested: Hw { version: 10 },
    })
    .unwrap_err();
    assert_eq!(err, Error::DuplicateKey("virtualHW.version".to_string()));
}

#[test]
fn test_optional_repeated_group_round_trip() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct OptionalGroups {
        #[serde(rename = "ethernet")]
        ethernet: Option<Vec<Ethernet>>,
        #[serde(rename = "tag")]
        tags: Option<Vec<String>>,
    }

    let value = OptionalGroups {
        ethernet: Some(vec![nic("nat", false), nic("bridged", true)]),
        tags: Some(vec!["build".to_string(), String::new()]),
    };
    let vmx = to_string(&value).unwrap();
    assert!(vmx.contains("tag1 = \"\"\n"));
    assert_eq!(from_str::<OptionalGroups>(&vmx).unwrap(), value);

    let empty = OptionalGroups {
        ethernet: None,
        tags: None,
    };
    assert_eq!(to_string(&empty).unwrap(), "");
    assert_eq!(from_str::<OptionalGroups>("").unwrap(), empty);
}

#[test]
fn test_element_without_lines_fails_to_encode() {
    #[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
    struct Link {
        #[serde(rename = "linkStatePropagation.enable,omitempty")]
        link: bool,
        #[serde(rename = "virtualDev,omitempty")]
        dev: String,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Links {
        #[serde(rename = "ethernet")]
        nics: Vec<Link>,
    }

    let gapped = Links {
        nics: vec![
            Link::default(),
            Link {
                link: true,
                dev: "e1000".to_string(),
            },
        ],
    };
    match to_string(&gapped) {
        Err(Error::TypeMismatch { key, .. }) => assert_eq!(key, "ethernet0"),
        other => panic!("expected type mismatch, got {other:?}"),
    }

    let dense = Links {
        nics: vec![Link {
            link: false,
            dev: "vmxnet3".to_string(),
        }],
    };
    let vmx = to_string(&dense).unwrap();
    assert_eq!(from_str::<Links>(&vmx).unwrap(), dense);
}

#[test]
fn test_field_name_must_be_a_valid_key() {
    #[derive(Serialize, Deserialize, Debug)]
    struct Spaced {
        #[serde(rename = "display name")]
        name: String,
    }

    let err = to_string(&Spaced {
        name: "x".to_string(),
    })
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Tag name contains whitespace or a double quote: vmx:\"display name\""
    );
    assert!(matches!(
        from_str::<Spaced>(""),
        Err(Error::MalformedTag { .. })
    ));
}

#[test]
fn test_leading_plus_is_not_an_integer() {
    assert!(matches!(
        from_str::<Vm>("memsize = \"+5\"\n"),
        Err(Error::TypeMismatch { key, .. }) if key == "memsize"
    ));
}
