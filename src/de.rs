//! VMX deserialization.
//!
//! Decoding happens in two steps: the text is parsed into a [`VmxMap`], then the
//! target type is walked exactly like the encoder walks it, looking up each
//! composed key in the map.
//!
//! - A present value is converted to the field type (`true`/`false`, base-10
//!   integers, strings verbatim).
//! - An absent value leaves the field at its zero value (`false`, `0`, `""`,
//!   `None`, an empty sequence). This holds whether or not the field is `omitempty`.
//! - A sequence's length is discovered by probing `frag0`, `frag1`, ... until an
//!   index has no key at or below it.
//!
//! ## Usage
//!
//! ```rust
//! use serde_vmx::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Nic {
//!     #[serde(rename = "present")]
//!     present: bool,
//! }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Vm {
//!     #[serde(rename = "memsize")]
//!     memsize: u32,
//!     #[serde(rename = "ethernet")]
//!     ethernet: Vec<Nic>,
//! }
//!
//! let vm: Vm = from_str("memsize = \"512\"\nethernet0.present = \"true\"\n").unwrap();
//! assert_eq!(vm.memsize, 512);
//! assert_eq!(vm.ethernet, vec![Nic { present: true }]);
//! ```

use crate::{Directive, Error, KeyPath, Result, VmxMap};
use serde::de::{self, Deserializer as _, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// The VMX deserializer.
///
/// Holds the parsed key/value pairs of one input. The top-level type must be a
/// struct (optionally wrapped in newtypes or an `Option`).
pub struct Deserializer {
    entries: VmxMap,
}

impl Deserializer {
    /// Parses `input` into a deserializer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for the first line that is not `key = "value"`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self> {
        Ok(Deserializer {
            entries: VmxMap::parse(input)?,
        })
    }

    /// Wraps already parsed key/value pairs.
    pub fn from_map(entries: VmxMap) -> Self {
        Deserializer { entries }
    }

    fn root(&self) -> KeyDeserializer<'_> {
        KeyDeserializer {
            entries: &self.entries,
            path: KeyPath::root(),
        }
    }
}

impl<'de, 'a> de::Deserializer<'de> for &'a Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::type_mismatch(
            &KeyPath::root().to_string(),
            "struct",
            "an untyped value",
        ))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.entries.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_struct(self.root(), name, fields, visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf seq tuple tuple_struct map enum identifier ignored_any
    }
}

/// Deserializes the value found at one composed key.
struct KeyDeserializer<'a> {
    entries: &'a VmxMap,
    path: KeyPath,
}

macro_rules! deserialize_integer {
    ($($method:ident => $visit:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.raw() {
                    None => visitor.$visit(0),
                    // `str::parse` takes a leading `+`; plain decimal only.
                    Some(raw) if raw.starts_with('+') => Err(self.mismatch(stringify!($ty), raw)),
                    Some(raw) => {
                        let value = raw
                            .parse::<$ty>()
                            .map_err(|_| self.mismatch(stringify!($ty), raw))?;
                        visitor.$visit(value)
                    }
                }
            }
        )*
    };
}

impl<'a> KeyDeserializer<'a> {
    fn raw(&self) -> Option<&'a str> {
        self.entries.get(self.path.as_str())
    }

    fn mismatch(&self, expected: &str, raw: &str) -> Error {
        Error::type_mismatch(self.path.as_str(), expected, &format!("\"{}\"", raw))
    }

    fn unsupported(&self, kind: &str) -> Error {
        Error::type_mismatch(
            self.path.as_str(),
            "bool, integer, string, struct or sequence",
            kind,
        )
    }

    /// Counts the contiguous elements of the repeated group at this path.
    fn group_len(&self) -> usize {
        let mut len = 0;
        while self.entries.contains_group(self.path.indexed(len).as_str()) {
            len += 1;
        }
        tracing::trace!(group = %self.path, len, "discovered repeated group");
        len
    }
}

impl<'de, 'a> de::Deserializer<'de> for KeyDeserializer<'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.raw() {
            Some(raw) => visitor.visit_str(raw),
            None => visitor.visit_unit(),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.raw() {
            None | Some("false") => visitor.visit_bool(false),
            Some("true") => visitor.visit_bool(true),
            Some(raw) => Err(self.mismatch("bool", raw)),
        }
    }

    deserialize_integer! {
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_i128 => visit_i128: i128,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_u128 => visit_u128: u128,
    }

    fn deserialize_f32<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported("float"))
    }

    fn deserialize_f64<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported("float"))
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let Some(raw) = self.raw() else {
            return visitor.visit_char('\0');
        };
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => visitor.visit_char(ch),
            _ => Err(self.mismatch("char", raw)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_str(self.raw().unwrap_or_default())
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported("bytes"))
    }

    fn deserialize_byte_buf<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported("bytes"))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // A repeated group only has indexed keys below its own fragment.
        if self.entries.contains_group(self.path.as_str())
            || self.entries.contains_group(self.path.indexed(0).as_str())
        {
            visitor.visit_some(self)
        } else {
            visitor.visit_none()
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let len = self.group_len();
        visitor.visit_seq(GroupAccess {
            entries: self.entries,
            path: self.path,
            index: 0,
            len,
        })
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(GroupAccess {
            entries: self.entries,
            path: self.path,
            index: 0,
            len,
        })
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported("tuple struct"))
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported("map"))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(StructAccess {
            entries: self.entries,
            path: self.path,
            fields: fields.iter(),
            current: None,
        })
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.raw() {
            Some(raw) => visitor.visit_enum(raw.into_deserializer()),
            None => Err(Error::type_mismatch(
                self.path.as_str(),
                "enum variant",
                "no value",
            )),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// Yields every declared field of a record, present in the input or not.
struct StructAccess<'a> {
    entries: &'a VmxMap,
    path: KeyPath,
    fields: std::slice::Iter<'static, &'static str>,
    current: Option<&'static str>,
}

impl<'de, 'a> de::MapAccess<'de> for StructAccess<'a> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.fields.next() {
            Some(&field) => {
                self.current = Some(field);
                seed.deserialize(field.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let field = self
            .current
            .take()
            .ok_or_else(|| Error::custom("next_value_seed called before next_key_seed"))?;
        let directive = Directive::from_field_name(field)?;
        seed.deserialize(KeyDeserializer {
            entries: self.entries,
            path: self.path.child(&directive.name),
        })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

/// Yields the elements `0..len` of a repeated group.
struct GroupAccess<'a> {
    entries: &'a VmxMap,
    path: KeyPath,
    index: usize,
    len: usize,
}

impl<'de, 'a> de::SeqAccess<'de> for GroupAccess<'a> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if self.index >= self.len {
            return Ok(None);
        }
        let element = KeyDeserializer {
            entries: self.entries,
            path: self.path.indexed(self.index),
        };
        self.index += 1;
        seed.deserialize(element).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len - self.index)
    }
}
