//! # serde_vmx
//!
//! A Serde-compatible encoder and decoder for the VMX format, the flat `key = "value"`
//! text used by VMware virtual machine descriptors.
//!
//! ## What is VMX?
//!
//! A `.vmx` file is a list of lines, one setting per line, every value double-quoted:
//!
//! ```text
//! .encoding = "UTF-8"
//! memsize = "1024"
//! virtualHW.version = "10"
//! ethernet0.present = "true"
//! ethernet1.present = "true"
//! ```
//!
//! Dots namespace nested groups and a numeric suffix (`ethernet0`, `ethernet1`)
//! distinguishes the elements of a repeated group.
//!
//! ## Key Features
//!
//! - **Field directives**: each field's serde name is its key fragment, with an
//!   optional `omitempty` flag (`#[serde(rename = "mem.hotadd,omitempty")]`)
//! - **Nested groups**: struct fields compose dotted keys
//! - **Repeated groups**: `Vec` fields become `name0.*`, `name1.*`, ...
//! - **Deterministic**: lines follow field declaration order
//! - **Lenient decoding**: keys missing from the input leave fields at their zero value
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_vmx::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug, Default)]
//! struct Vm {
//!     #[serde(rename = ".encoding")]
//!     encoding: String,
//!     #[serde(rename = "memsize")]
//!     memsize: u32,
//!     #[serde(rename = "mem.hotadd")]
//!     mem_hot_add: bool,
//! }
//!
//! let vm = Vm {
//!     encoding: "utf-8".to_string(),
//!     memsize: 1024,
//!     mem_hot_add: false,
//! };
//!
//! let vmx = to_string(&vm).unwrap();
//! assert_eq!(vmx, ".encoding = \"utf-8\"\nmemsize = \"1024\"\nmem.hotadd = \"false\"\n");
//!
//! let vm_back: Vm = from_str(&vmx).unwrap();
//! assert_eq!(vm, vm_back);
//! ```
//!
//! ## Supported Types
//!
//! `bool`, all integer types, `String`/`&str`/`char`, unit enum variants, `Option`,
//! nested structs, newtype structs, and `Vec`/tuples of any of these. Floats, maps,
//! byte strings and enum variants carrying data are rejected with
//! [`Error::TypeMismatch`].
//!
//! ## Format Reference
//!
//! See the [`format`] module for the full grammar and composition rules.

pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod model;
pub mod options;
pub mod path;
pub mod ser;
pub mod tag;

pub use de::Deserializer;
pub use error::{Error, Result, TagError};
pub use map::VmxMap;
pub use options::{LineEnding, VmxOptions};
pub use path::{compose_path, KeyPath};
pub use ser::Serializer;
pub use tag::{parse_tag, Directive, NAMESPACE};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` record to VMX text.
///
/// # Examples
///
/// ```rust
/// use serde_vmx::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Vm {
///     #[serde(rename = "numvcpus")]
///     cpus: u32,
/// }
///
/// assert_eq!(to_string(&Vm { cpus: 2 }).unwrap(), "numvcpus = \"2\"\n");
/// ```
///
/// # Errors
///
/// Returns an error if a field name is a malformed directive, a value has an
/// unsupported type, or two fields compose the same key.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, VmxOptions::default())
}

/// Serialize any `T: Serialize` record to VMX text with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: VmxOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    let vmx = serializer.into_inner();
    tracing::trace!(bytes = vmx.len(), "encoded vmx record");
    Ok(vmx)
}

/// Serialize any `T: Serialize` record to VMX bytes.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

/// Encodes a record, returning the VMX bytes.
///
/// Same as [`to_vec`]; the name matches the `Marshal`/`Unmarshal` pairing.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn marshal<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_vec(value)
}

/// Flatten a record into its ordered key/value pairs without rendering text.
///
/// # Examples
///
/// ```rust
/// use serde_vmx::to_map;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Vm {
///     #[serde(rename = "guestOS")]
///     guest_os: &'static str,
/// }
///
/// let map = to_map(&Vm { guest_os: "ubuntu-64" }).unwrap();
/// assert_eq!(map.get("guestOS"), Some("ubuntu-64"));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_map<T>(value: &T) -> Result<VmxMap>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(VmxOptions::default());
    value.serialize(&mut serializer)?;
    Ok(serializer.into_map())
}

/// Serialize any `T: Serialize` record to a writer as VMX text.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, VmxOptions::default())
}

/// Serialize any `T: Serialize` record to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: VmxOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let vmx = to_string_with_options(value, options)?;
    writer
        .write_all(vmx.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from VMX text.
///
/// # Examples
///
/// ```rust
/// use serde_vmx::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Vm {
///     #[serde(rename = "displayName")]
///     name: String,
///     #[serde(rename = "memsize")]
///     memsize: u32,
/// }
///
/// let vm: Vm = from_str("displayName = \"test\"\n").unwrap();
/// assert_eq!(vm, Vm { name: "test".to_string(), memsize: 0 });
/// ```
///
/// # Errors
///
/// Returns an error if a line is not `key = "value"`, a field name is a malformed
/// directive, or a value cannot be converted to its field type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_map(VmxMap::parse(s)?)
}

/// Deserialize an instance of type `T` from already parsed key/value pairs.
///
/// # Errors
///
/// Returns an error if a field name is a malformed directive or a value cannot be
/// converted to its field type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_map<T>(entries: VmxMap) -> Result<T>
where
    T: DeserializeOwned,
{
    tracing::trace!(keys = entries.len(), "decoding vmx record");
    let deserializer = Deserializer::from_map(entries);
    T::deserialize(&deserializer)
}

/// Deserialize an instance of type `T` from an I/O stream of VMX text.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid UTF-8 VMX text,
/// or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of VMX text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or not valid VMX text, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Decodes VMX bytes into `target`.
///
/// `target` is only replaced when decoding succeeds.
///
/// # Examples
///
/// ```rust
/// use serde_vmx::unmarshal;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, Default)]
/// struct Vm {
///     #[serde(rename = "numvcpus")]
///     cpus: u32,
/// }
///
/// let mut vm = Vm::default();
/// unmarshal(b"numvcpus = \"4\"\n", &mut vm).unwrap();
/// assert_eq!(vm.cpus, 4);
/// ```
///
/// # Errors
///
/// Same as [`from_slice`].
pub fn unmarshal<T>(data: &[u8], target: &mut T) -> Result<()>
where
    T: DeserializeOwned,
{
    *target = from_slice(data)?;
    Ok(())
}
