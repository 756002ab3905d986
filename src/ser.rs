//! VMX serialization.
//!
//! This module provides the [`Serializer`] that flattens a Rust record into
//! ordered `key = "value"` lines.
//!
//! ## Overview
//!
//! - Each struct field's serde name is its directive (see [`crate::Directive`]).
//! - Scalars emit one line under the composed key; `bool`, integers, strings,
//!   `char` and unit enum variants are supported, every value is quoted.
//! - Nested structs add a dotted level and emit nothing themselves.
//! - Sequences number their elements `0..n` directly after the group fragment.
//! - `omitempty` fields holding `false`, `0` or `""` are skipped, as is `None`.
//!
//! ## Usage
//!
//! ```rust
//! use serde_vmx::{Serializer, VmxOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Hardware {
//!     #[serde(rename = "version")]
//!     version: u8,
//! }
//!
//! #[derive(Serialize)]
//! struct Vm {
//!     #[serde(rename = "virtualHW")]
//!     hardware: Hardware,
//! }
//!
//! let mut serializer = Serializer::new(VmxOptions::new());
//! Vm { hardware: Hardware { version: 10 } }.serialize(&mut serializer).unwrap();
//! assert_eq!(serializer.into_inner(), "virtualHW.version = \"10\"\n");
//! ```

use crate::{Directive, Error, KeyPath, Result, VmxMap, VmxOptions};
use serde::ser::Impossible;
use serde::ser::Serializer as _;
use serde::{ser, Serialize};

/// The VMX serializer.
///
/// Collects emitted lines in traversal order; nothing is rendered until
/// [`Serializer::into_inner`], so a failed call never yields partial output.
pub struct Serializer {
    entries: VmxMap,
    options: VmxOptions,
}

impl Serializer {
    pub fn new(options: VmxOptions) -> Self {
        Serializer {
            entries: VmxMap::with_capacity(32),
            options,
        }
    }

    /// Renders the collected lines.
    pub fn into_inner(self) -> String {
        self.entries.render(&self.options)
    }

    /// Returns the collected key/value pairs without rendering them.
    pub fn into_map(self) -> VmxMap {
        self.entries
    }

    fn emit(&mut self, path: &KeyPath, value: String) -> Result<()> {
        if value.contains(['"', '\n', '\r']) {
            return Err(Error::type_mismatch(
                path.as_str(),
                "string without double quotes or line breaks",
                &format!("{:?}", value),
            ));
        }
        if self.entries.insert(path.as_str().to_string(), value).is_some() {
            return Err(Error::duplicate_key(path.as_str()));
        }
        Ok(())
    }
}

fn root_mismatch(found: &str) -> Error {
    Error::type_mismatch(&KeyPath::root().to_string(), "struct", found)
}

/// The top level only accepts records.
impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = StructSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, _v: bool) -> Result<()> {
        Err(root_mismatch("bool"))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, _v: i64) -> Result<()> {
        Err(root_mismatch("integer"))
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, _v: u64) -> Result<()> {
        Err(root_mismatch("integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        Err(root_mismatch("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(root_mismatch("float"))
    }

    fn serialize_char(self, _v: char) -> Result<()> {
        Err(root_mismatch("char"))
    }

    fn serialize_str(self, _v: &str) -> Result<()> {
        Err(root_mismatch("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(root_mismatch("bytes"))
    }

    fn serialize_none(self) -> Result<()> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Err(root_mismatch("enum"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(root_mismatch("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(root_mismatch("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(root_mismatch("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(root_mismatch("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(root_mismatch("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(root_mismatch("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(StructSerializer {
            ser: self,
            path: KeyPath::root(),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(root_mismatch("enum"))
    }
}

/// Serializes the value found at one composed key.
pub struct ValueSerializer<'a> {
    ser: &'a mut Serializer,
    path: KeyPath,
    omit_empty: bool,
}

impl<'a> ValueSerializer<'a> {
    fn scalar(self, value: String, empty: bool) -> Result<()> {
        if self.omit_empty && empty {
            return Ok(());
        }
        self.ser.emit(&self.path, value)
    }

    fn mismatch(&self, found: &str) -> Error {
        Error::type_mismatch(
            self.path.as_str(),
            "bool, integer, string, struct or sequence",
            found,
        )
    }
}

impl<'a> ser::Serializer for ValueSerializer<'a> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = SeqSerializer<'a>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = StructSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.scalar(v.to_string(), !v)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.scalar(v.to_string(), v == 0)
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.scalar(v.to_string(), v == 0)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.scalar(v.to_string(), v == 0)
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.scalar(v.to_string(), v == 0)
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        Err(self.mismatch("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(self.mismatch("float"))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.scalar(v.to_string(), false)
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.scalar(v.to_string(), v.is_empty())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(self.mismatch("bytes"))
    }

    fn serialize_none(self) -> Result<()> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        // A present option is never empty.
        value.serialize(ValueSerializer {
            ser: self.ser,
            path: self.path,
            omit_empty: false,
        })
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.scalar(variant.to_string(), false)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(self.mismatch(&format!("enum variant `{}` with data", variant)))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SeqSerializer {
            ser: self.ser,
            path: self.path,
            index: 0,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(self.mismatch("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(self.mismatch(&format!("enum variant `{}` with data", variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(self.mismatch("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(StructSerializer {
            ser: self.ser,
            path: self.path,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(self.mismatch(&format!("enum variant `{}` with data", variant)))
    }
}

/// Walks the fields of one record, resolving each field's directive.
pub struct StructSerializer<'a> {
    ser: &'a mut Serializer,
    path: KeyPath,
}

impl<'a> ser::SerializeStruct for StructSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let directive = Directive::from_field_name(key)?;
        value.serialize(ValueSerializer {
            ser: &mut *self.ser,
            path: self.path.child(&directive.name),
            omit_empty: directive.omit_empty,
        })
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Numbers the elements of a repeated group.
pub struct SeqSerializer<'a> {
    ser: &'a mut Serializer,
    path: KeyPath,
    index: usize,
}

impl<'a> SeqSerializer<'a> {
    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        // Elements are never omitted so indices stay contiguous.
        let path = self.path.indexed(self.index);
        let before = self.ser.entries.len();
        value.serialize(ValueSerializer {
            ser: &mut *self.ser,
            path: path.clone(),
            omit_empty: false,
        })?;

        // Decoding stops at the first index without keys, so an element that wrote
        // nothing would hide every element after it.
        if self.ser.entries.len() == before {
            return Err(Error::type_mismatch(
                path.as_str(),
                "element with at least one value",
                "no values",
            ));
        }
        self.index += 1;
        Ok(())
    }
}

impl<'a> ser::SerializeSeq for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a> ser::SerializeTuple for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}
