//! Field directives.
//!
//! A directive tells the encoder which key fragment a field maps to and whether a
//! zero value may be left out. The raw grammar is
//!
//! ```text
//! vmx:"<fragment>[,<option>...]"
//! ```
//!
//! Only the `omitempty` option is recognized; unknown options are ignored. The
//! fragment `-` is an ordinary key fragment, not a skip marker.
//!
//! Rust fields carry their directive in the serde field name, see
//! [`Directive::from_field_name`].

use crate::error::{Error, Result, TagError};

/// The tag namespace recognized by [`parse_tag`].
pub const NAMESPACE: &str = "vmx";

const OMIT_EMPTY: &str = "omitempty";

/// A parsed field directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Key fragment the field contributes to the composed key path.
    pub name: String,
    /// Skip the field when it holds its type's zero value.
    pub omit_empty: bool,
}

impl Directive {
    /// Resolves the directive carried by a serde field name.
    ///
    /// Names starting with `vmx:` are full tags and go through [`parse_tag`].
    /// Anything else is the quoted part of a tag, e.g. `"memsize,omitempty"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vmx::Directive;
    ///
    /// let d = Directive::from_field_name("linkStatePropagation.enable,omitempty").unwrap();
    /// assert_eq!(d.name, "linkStatePropagation.enable");
    /// assert!(d.omit_empty);
    ///
    /// let d = Directive::from_field_name("vmx:\"memsize\"").unwrap();
    /// assert_eq!(d.name, "memsize");
    /// ```
    pub fn from_field_name(field: &str) -> Result<Self> {
        if field.starts_with(NAMESPACE) && field[NAMESPACE.len()..].starts_with(':') {
            return parse_tag(field);
        }
        parse_body(field).map_err(|reason| {
            Error::malformed_tag(reason, &format!("{}:\"{}\"", NAMESPACE, field))
        })
    }
}

/// Parses a raw `vmx:"..."` tag.
///
/// A missing trailing quote is tolerated.
///
/// # Examples
///
/// ```rust
/// use serde_vmx::parse_tag;
///
/// let d = parse_tag(r#"vmx:"displayname,blah""#).unwrap();
/// assert_eq!(d.name, "displayname");
/// assert!(!d.omit_empty);
///
/// assert_eq!(parse_tag("vmx:").unwrap_err().to_string(), "Invalid tag: vmx:");
/// ```
///
/// # Errors
///
/// Returns [`Error::MalformedTag`] naming the raw tag when the namespace or colon is
/// missing, when nothing follows the colon, when the name is not quoted, or when the
/// quoted name is empty or holds whitespace or a double quote.
pub fn parse_tag(raw: &str) -> Result<Directive> {
    let invalid = || Error::malformed_tag(TagError::Invalid, raw);

    let (namespace, rest) = raw.split_once(':').ok_or_else(invalid)?;
    if namespace != NAMESPACE || rest.is_empty() {
        return Err(invalid());
    }

    let quoted = rest
        .strip_prefix('"')
        .ok_or_else(|| Error::malformed_tag(TagError::Unquoted, raw))?;
    let body = quoted.strip_suffix('"').unwrap_or(quoted);

    parse_body(body).map_err(|reason| Error::malformed_tag(reason, raw))
}

/// Splits tag content into name and options.
///
/// The name must be non-empty and usable as part of a line key: no whitespace and
/// no double quote.
fn parse_body(body: &str) -> std::result::Result<Directive, TagError> {
    let mut tokens = body.split(',');
    let name = tokens
        .next()
        .filter(|name| !name.is_empty())
        .ok_or(TagError::MissingName)?;
    if name.contains(|c: char| c.is_whitespace() || c == '"') {
        return Err(TagError::InvalidName);
    }

    let mut omit_empty = false;
    for option in tokens {
        if option == OMIT_EMPTY {
            omit_empty = true;
        } else {
            tracing::trace!(tag = body, option, "ignoring unknown tag option");
        }
    }

    Ok(Directive {
        name: name.to_string(),
        omit_empty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name() {
        let d = Directive::from_field_name("memsize").unwrap();
        assert_eq!(d.name, "memsize");
        assert!(!d.omit_empty);
    }

    #[test]
    fn test_dash_is_a_name() {
        let d = Directive::from_field_name("-,omitempty").unwrap();
        assert_eq!(d.name, "-");
        assert!(d.omit_empty);
    }

    #[test]
    fn test_empty_field_name() {
        let err = Directive::from_field_name("").unwrap_err();
        assert_eq!(err.to_string(), r#"Tag name is missing: vmx:"""#);

        let err = Directive::from_field_name(",omitempty").unwrap_err();
        assert_eq!(err.to_string(), r#"Tag name is missing: vmx:",omitempty""#);
    }

    #[test]
    fn test_full_tag_field_name() {
        let err = Directive::from_field_name("vmx:memsize").unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedTag {
                reason: TagError::Unquoted,
                ..
            }
        ));
    }

    #[test]
    fn test_colon_inside_name() {
        let d = parse_tag(r#"vmx:"scsi0:0.present""#).unwrap();
        assert_eq!(d.name, "scsi0:0.present");

        let d = Directive::from_field_name("scsi0:0.present").unwrap();
        assert_eq!(d.name, "scsi0:0.present");
    }

    #[test]
    fn test_name_must_fit_line_key() {
        for field in ["display name", "displayName\t", "tab\tbed,omitempty", "a\"b"] {
            let err = Directive::from_field_name(field).unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::MalformedTag {
                        reason: TagError::InvalidName,
                        ..
                    }
                ),
                "{field:?}"
            );
        }

        let err = parse_tag(r#"vmx:"display name,omitempty""#).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Tag name contains whitespace or a double quote: vmx:"display name,omitempty""#
        );
    }

    #[test]
    fn test_wrong_namespace() {
        let err = parse_tag(r#"json:"name""#).unwrap_err();
        assert_eq!(err.to_string(), r#"Invalid tag: json:"name""#);
    }

    #[test]
    fn test_options_after_name() {
        let d = parse_tag(r#"vmx:"x,blah,omitempty""#).unwrap();
        assert_eq!(d.name, "x");
        assert!(d.omit_empty);
    }
}
