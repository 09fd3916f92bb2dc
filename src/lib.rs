//! Parsing, reordering and serialization of RFC2253-style distinguished names, as emitted by
//! cryptography backends for the subject and issuer of a certificate.


/// Stands in for the `tracing` macros when the `tracing` feature is disabled.
#[cfg(not(feature = "tracing"))]
macro_rules! no_trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
pub(crate) use no_trace;


mod common_parsing;
pub mod dn;
pub mod oid;
#[cfg(feature = "serde")] mod ser_de;


use std::fmt;

pub use crate::dn::{DistinguishedName, ParseError};
pub use crate::dn::escaping::escape_value;
pub use crate::dn::order::{AttributeOrder, OrderToken, reorder};


/// A single named attribute of a distinguished name.
///
/// The name is either the key as it appeared in the input or, for known OIDs, the corresponding
/// mnemonic (see [`oid`]). The value is fully decoded, i.e. free of escapes and hex encoding.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Attribute {
    name: String,
    value: String,
}
impl Attribute {
    /// Creates a new attribute from its name and its (unescaped) value.
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The name of this attribute.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The decoded value of this attribute.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Attempts to parse a single attribute from its `name=value` string representation.
    ///
    /// Returns `None` if the string is malformed or does not consist of exactly one attribute.
    pub fn try_from_str(s: &str) -> Option<Self> {
        let mut attributes = crate::dn::parsing::parse_dn(s).ok()?;
        if attributes.len() != 1 {
            return None;
        }
        attributes.pop()
    }
}

/// Writes `name=value` with both parts trimmed and the value escaped, exactly as the attribute
/// appears in [`DistinguishedName::canonical_form`].
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name.trim(), escape_value(self.value.trim()))
    }
}
