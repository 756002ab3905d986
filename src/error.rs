//! Error types for VMX serialization and deserialization.
//!
//! ## Error Categories
//!
//! - **Malformed tags**: a field directive does not follow the `vmx:"name[,option...]"` grammar
//! - **Parse errors**: an input line is not of the form `key = "value"`
//! - **Type mismatches**: a value cannot be converted to or from its field type
//! - **Duplicate keys**: two fields of one record compose the same flat key
//! - **I/O errors**: reader/writer failures
//!
//! Every error is terminal for the call that produced it; there is no partial output.
//!
//! ## Examples
//!
//! ```rust
//! use serde_vmx::parse_tag;
//!
//! let err = parse_tag("vmx:displayname").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Tag name has to be enclosed in double quotes: vmx:displayname"
//! );
//! ```

use std::fmt;
use thiserror::Error;

/// Why a field directive was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagError {
    /// Missing namespace, missing colon, or nothing after the colon.
    Invalid,
    /// The part after `vmx:` does not start with a double quote.
    Unquoted,
    /// The quoted name is empty.
    MissingName,
    /// The name holds whitespace or a double quote and cannot be a line key.
    InvalidName,
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TagError::Invalid => "Invalid tag",
            TagError::Unquoted => "Tag name has to be enclosed in double quotes",
            TagError::MissingName => "Tag name is missing",
            TagError::InvalidName => "Tag name contains whitespace or a double quote",
        })
    }
}

/// Represents all possible errors that can occur during VMX serialization/deserialization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A field directive violates the tag grammar
    #[error("{reason}: {tag}")]
    MalformedTag { reason: TagError, tag: String },

    /// An input line is not `key = "value"`
    #[error("Parse error at line {line}: expected `key = \"value\"`, found `{content}`")]
    Parse { line: usize, content: String },

    /// A value cannot be converted to or from its field type
    #[error("Type mismatch for key `{key}`: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: String,
        found: String,
    },

    /// Two fields of the same record produced one key
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a malformed tag error for the raw directive `tag`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vmx::{Error, TagError};
    ///
    /// let err = Error::malformed_tag(TagError::Invalid, "vm");
    /// assert_eq!(err.to_string(), "Invalid tag: vm");
    /// ```
    pub fn malformed_tag(reason: TagError, tag: &str) -> Self {
        Error::MalformedTag {
            reason,
            tag: tag.to_string(),
        }
    }

    /// Creates a parse error for a 1-based line number.
    pub fn parse(line: usize, content: &str) -> Self {
        Error::Parse {
            line,
            content: content.to_string(),
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vmx::Error;
    ///
    /// let err = Error::type_mismatch("memsize", "u32", "\"lots\"");
    /// assert!(err.to_string().contains("expected u32"));
    /// ```
    pub fn type_mismatch(key: &str, expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            key: key.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn duplicate_key(key: &str) -> Self {
        Error::DuplicateKey(key.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
