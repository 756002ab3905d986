//! Configuration options for VMX serialization.
//!
//! The line grammar itself is fixed (`key = "value"`); the only knob is how
//! lines are terminated. Decoding accepts either terminator.
//!
//! ## Examples
//!
//! ```rust
//! use serde_vmx::{to_string_with_options, LineEnding, VmxOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Vm {
//!     #[serde(rename = "memsize")]
//!     memsize: u32,
//! }
//!
//! let options = VmxOptions::new().with_line_ending(LineEnding::CrLf);
//! let vmx = to_string_with_options(&Vm { memsize: 512 }, options).unwrap();
//! assert_eq!(vmx, "memsize = \"512\"\r\n");
//! ```

/// Line terminator written after every emitted line.
///
/// # Examples
///
/// ```rust
/// use serde_vmx::LineEnding;
///
/// assert_eq!(LineEnding::Lf.as_str(), "\n");
/// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Configuration options for VMX serialization.
#[derive(Clone, Debug, Default)]
pub struct VmxOptions {
    pub line_ending: LineEnding,
}

impl VmxOptions {
    /// Creates default options (`\n` line endings).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vmx::{LineEnding, VmxOptions};
    ///
    /// assert_eq!(VmxOptions::new().line_ending, LineEnding::Lf);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for descriptors edited on Windows hosts.
    #[must_use]
    pub fn crlf() -> Self {
        VmxOptions {
            line_ending: LineEnding::CrLf,
        }
    }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}
