//! Flat key composition.
//!
//! Nesting levels are joined with `.`. An element of a repeated group gets its
//! zero-based index appended directly to the group's fragment, so element 1 of
//! `ethernet` owns keys under `ethernet1.`. A fragment that itself starts with a
//! dot (`.encoding`) is kept literally.

use std::fmt;

/// A composed flat key, built one level at a time while walking a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(String);

impl KeyPath {
    /// The empty path that top-level fields hang off.
    #[must_use]
    pub fn root() -> Self {
        KeyPath(String::new())
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of a field nested one level below this one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vmx::KeyPath;
    ///
    /// let hw = KeyPath::root().child("virtualHW");
    /// assert_eq!(hw.child("version").as_str(), "virtualHW.version");
    /// assert_eq!(KeyPath::root().child(".encoding").as_str(), ".encoding");
    /// ```
    #[must_use]
    pub fn child(&self, fragment: &str) -> Self {
        if self.is_root() {
            KeyPath(fragment.to_string())
        } else {
            let mut path = String::with_capacity(self.0.len() + 1 + fragment.len());
            path.push_str(&self.0);
            path.push('.');
            path.push_str(fragment);
            KeyPath(path)
        }
    }

    /// Path of element `index` of the repeated group at this path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vmx::KeyPath;
    ///
    /// let nic = KeyPath::root().child("ethernet").indexed(0);
    /// assert_eq!(nic.child("present").as_str(), "ethernet0.present");
    /// ```
    #[must_use]
    pub fn indexed(&self, index: usize) -> Self {
        KeyPath(format!("{}{}", self.0, index))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Composes the full key of `leaf` below `ancestors`.
///
/// `ancestors` are already composed segments (an indexed group appears as
/// `ethernet0`). With `index` set, `leaf` is a repeated group and the result names
/// that element.
///
/// # Examples
///
/// ```rust
/// use serde_vmx::compose_path;
///
/// assert_eq!(compose_path(&["virtualHW"], "version", None), "virtualHW.version");
/// assert_eq!(compose_path(&[], "ethernet", Some(1)), "ethernet1");
/// assert_eq!(
///     compose_path(&["ethernet0"], "linkStatePropagation.enable", None),
///     "ethernet0.linkStatePropagation.enable"
/// );
/// ```
#[must_use]
pub fn compose_path(ancestors: &[&str], leaf: &str, index: Option<usize>) -> String {
    let parent = ancestors
        .iter()
        .fold(KeyPath::root(), |path, fragment| path.child(fragment));
    let path = parent.child(leaf);
    match index {
        Some(i) => path.indexed(i).0,
        None => path.0,
    }
}
