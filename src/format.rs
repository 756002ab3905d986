//! VMX Format Reference
//!
//! This module documents the subset of the VMX descriptor format implemented by this
//! library. It contains no code.
//!
//! # Overview
//!
//! A VMX file describes a virtual machine as a flat list of settings. There is no
//! nesting syntax: structure lives entirely in the keys, which are dotted paths.
//!
//! # Lines
//!
//! Every non-blank line has exactly this shape:
//!
//! ```text
//! key = "value"
//! ```
//!
//! **Rules**:
//! - The key starts at the first column and contains no whitespace
//! - Key and value are separated by exactly ` = ` (space, equals, space)
//! - The value is always double-quoted, whatever its type
//! - The value cannot contain a double quote or a line break; there are no escapes
//! - Trailing whitespace, including the `\r` of a CRLF terminator, is ignored
//! - Blank lines are skipped
//! - If a key appears twice, the last value wins
//!
//! Anything else is a parse error reporting the 1-based line number.
//!
//! # Values
//!
//! | Type | Encoded as | Example |
//! |------|------------|---------|
//! | Boolean | `true` or `false` (decoding is case-sensitive) | `mem.hotadd = "false"` |
//! | Integer | Decimal digits, optional leading `-` (a leading `+` is rejected) | `memsize = "1024"` |
//! | String | Verbatim | `displayName = "test"` |
//! | Unit enum variant | Variant name | `firmware = "efi"` |
//!
//! Floating point numbers, maps, byte strings and enum variants with data have no
//! representation and are rejected.
//!
//! # Field Directives
//!
//! Each record field is bound to a key fragment through its serde name:
//!
//! ```rust
//! # use serde::Serialize;
//! #[derive(Serialize)]
//! struct Vm {
//!     #[serde(rename = "memsize")]
//!     memsize: u32,
//!     #[serde(rename = "mem.hotadd,omitempty")]
//!     mem_hot_add: bool,
//!     #[serde(rename = r#"vmx:"numvcpus,omitempty""#)]
//!     cpus: u32,
//!     #[serde(skip)]
//!     scratch: String,
//! }
//! ```
//!
//! The full tag form is `vmx:"name[,option...]"`. The only recognized option is
//! `omitempty`, which suppresses the line when the value is `false`, `0` or `""`.
//! Unknown options are ignored. A field without a directive is skipped entirely.
//! The name may not contain whitespace or a double quote, since it becomes part of
//! a line key.
//!
//! # Key Composition
//!
//! Keys are built by joining the fragments of every enclosing group with `.`:
//!
//! ```text
//! ethernet0.virtualDev = "e1000"
//! ^^^^^^^^ ^^^^^^^^^^
//! group    field
//! ```
//!
//! - A top-level field's key is its fragment, verbatim (`.encoding` stays `.encoding`)
//! - A nested record's fields are prefixed with the record's key and a dot
//! - The `i`-th element of a repeated group appends `i` to the group's key with no
//!   separator: `ethernet0`, `ethernet1`, ...
//! - Repeated groups of scalars produce keys like `tag0 = "a"`, `tag1 = "b"`
//! - Every element must write at least one line. An element that writes nothing
//!   (all of its fields omitted, or `None`) is an encoding error, because decoding
//!   would stop at its index
//!
//! # Decoding Repeated Groups
//!
//! The number of elements is found by probing indices from 0 upward and stopping at
//! the first index with no key equal to `name{i}` and no key starting with
//! `name{i}.`. Elements after a gap are ignored.
//!
//! An `Option` wrapping a repeated group is `Some` when element `0` exists.
//!
//! # Output Order
//!
//! Encoding emits lines in field declaration order, depth first, so the same record
//! always renders to the same text.
//!
//! # Missing Keys
//!
//! Decoding never fails because a key is absent. The field keeps its zero value:
//! `false`, `0`, `""`, `None`, or an empty sequence.
