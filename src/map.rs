//! Ordered flat mapping of VMX keys to raw string values.
//!
//! [`VmxMap`] is the intermediate form between text and records: the decoder parses
//! lines into one and then walks the target type over it, and the encoder collects
//! into one before rendering. It wraps an [`IndexMap`] so iteration follows the order
//! keys were first inserted, which keeps rendered output identical to traversal order.
//!
//! ## Examples
//!
//! ```rust
//! use serde_vmx::VmxMap;
//!
//! let map: VmxMap = "memsize = \"1024\"\nethernet0.present = \"TRUE\"\n".parse().unwrap();
//! assert_eq!(map.get("memsize"), Some("1024"));
//! assert!(map.contains_group("ethernet0"));
//! assert!(!map.contains_group("ethernet1"));
//! ```

use crate::{Error, Result, VmxOptions};
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// An ordered map of flat keys to unquoted string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmxMap(IndexMap<String, String>);

impl VmxMap {
    /// Creates an empty `VmxMap`.
    #[must_use]
    pub fn new() -> Self {
        VmxMap(IndexMap::new())
    }

    /// Creates an empty `VmxMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        VmxMap(IndexMap::with_capacity(capacity))
    }

    /// Parses VMX text.
    ///
    /// Blank lines are skipped. Every other line must be `key = "value"` with a key
    /// free of whitespace and a value free of double quotes; trailing whitespace
    /// (including a `\r` before the newline) is ignored. A repeated key keeps its
    /// first position and takes the last value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] with the 1-based line number of the first bad line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vmx::VmxMap;
    ///
    /// let err = VmxMap::parse("memsize: 1024").unwrap_err();
    /// assert!(err.to_string().contains("line 1"));
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let mut map = VmxMap::new();

        for (index, raw) in input.lines().enumerate() {
            let line = raw.trim_end();
            if line.is_empty() {
                continue;
            }

            let (key, value) = parse_line(line).ok_or_else(|| Error::parse(index + 1, raw))?;
            if let Some(previous) = map.insert(key.to_string(), value.to_string()) {
                tracing::debug!(key, previous = %previous, value, "duplicate key, keeping last value");
            }
        }

        tracing::trace!(keys = map.len(), "parsed vmx text");
        Ok(map)
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns `true` if `prefix` is itself a key or has keys nested below it.
    ///
    /// `ethernet1` matches `ethernet1` and `ethernet1.present` but not
    /// `ethernet10.present`.
    ///
    /// Scans every key, so probing a group of `n` elements is `O(n * len)`. That is
    /// fine for descriptor-sized maps.
    #[must_use]
    pub fn contains_group(&self, prefix: &str) -> bool {
        self.0.keys().any(|key| {
            key.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
        })
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, String> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, String> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Renders every entry as a `key = "value"` line.
    #[must_use]
    pub fn render(&self, options: &VmxOptions) -> String {
        let terminator = options.line_ending.as_str();
        let mut output = String::with_capacity(self.0.len() * 32);
        for (key, value) in &self.0 {
            output.push_str(key);
            output.push_str(" = \"");
            output.push_str(value);
            output.push('"');
            output.push_str(terminator);
        }
        output
    }
}

/// Splits `key = "value"`. The line has already lost trailing whitespace.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(" = ")?;
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    let value = rest.strip_prefix('"')?.strip_suffix('"')?;
    if value.contains('"') {
        return None;
    }

    Some((key, value))
}

impl FromStr for VmxMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        VmxMap::parse(s)
    }
}

impl fmt::Display for VmxMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&VmxOptions::default()))
    }
}

impl IntoIterator for VmxMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a VmxMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, String)> for VmxMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        VmxMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let map = VmxMap::parse(".encoding = \"UTF-8\"\n\nmemsize = \"1024\"\n").unwrap();
        let entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(entries, vec![(".encoding", "UTF-8"), ("memsize", "1024")]);
    }

    #[test]
    fn test_parse_crlf_and_trailing_space() {
        let map = VmxMap::parse("a = \"1\"\r\nb = \"2\"   \r\n").unwrap();
        assert_eq!(map.get("a"), Some("1"));
        assert_eq!(map.get("b"), Some("2"));
    }

    #[test]
    fn test_parse_empty_value() {
        let map = VmxMap::parse("annotation = \"\"").unwrap();
        assert_eq!(map.get("annotation"), Some(""));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let map = VmxMap::parse("a = \"1\"\nb = \"2\"\na = \"3\"\n").unwrap();
        assert_eq!(map.get("a"), Some("3"));
        assert_eq!(map.keys().next().map(String::as_str), Some("a"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            ("memsize = 1024", 1),
            ("ok = \"1\"\nmemsize=\"1024\"", 2),
            ("ok = \"1\"\n\nbad key = \"x\"", 3),
            (" = \"x\"", 1),
            ("  indented = \"x\"", 1),
            ("a = \"x\"y\"", 1),
            ("a = \"unterminated", 1),
        ];

        for (input, line) in cases {
            match VmxMap::parse(input) {
                Err(Error::Parse { line: got, .. }) => assert_eq!(got, line, "{input:?}"),
                other => panic!("expected parse error for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_contains_group() {
        let map = VmxMap::parse("ethernet10.present = \"TRUE\"\nserial0 = \"x\"").unwrap();
        assert!(map.contains_group("ethernet10"));
        assert!(!map.contains_group("ethernet1"));
        assert!(map.contains_group("serial0"));
    }

    #[test]
    fn test_render_round_trip() {
        let input = "displayName = \"test\"\nguestOS = \"other3xlinux-64\"\n";
        let map = VmxMap::parse(input).unwrap();
        assert_eq!(map.to_string(), input);
        assert_eq!(
            map.render(&VmxOptions::crlf()),
            "displayName = \"test\"\r\nguestOS = \"other3xlinux-64\"\r\n"
        );
    }
}
