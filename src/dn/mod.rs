//! Structures related to Distinguished Names (DNs).


pub mod escaping;
pub mod order;
pub(crate) mod parsing;


use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use nom::error::ErrorKind;
#[cfg(feature = "tracing")] use tracing::{debug, trace};

use crate::Attribute;
use crate::dn::escaping::{escape_value, list_attributes, serialize};
use crate::dn::order::{AttributeOrder, reorder};
#[cfg(not(feature = "tracing"))] use crate::no_trace as debug;
#[cfg(not(feature = "tracing"))] use crate::no_trace as trace;


/// The separator used by [`DistinguishedName::canonical_form`] and
/// [`DistinguishedName::display_form`].
pub const DEFAULT_SEPARATOR: &str = ",";


/// The unique identifier of an entity such as the subject or issuer of a certificate.
///
/// The string representation follows RFC2253, with two simplifications: the components of a
/// multi-valued RDN are treated as independent attributes, and `;` is accepted as a separator.
///
/// Next to the attributes in their original order, a distinguished name carries an
/// [`AttributeOrder`] which controls how it is displayed. Cloning produces a fully independent
/// value.
#[derive(Clone, Debug, Default)]
pub struct DistinguishedName {
    attributes: Vec<Attribute>,
    order: AttributeOrder,
    reordered: OnceLock<Vec<Attribute>>,
}
impl DistinguishedName {
    /// Creates an empty distinguished name with the default display order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a distinguished name from a string.
    ///
    /// Parsing is all-or-nothing: if the string is malformed, the result contains no attributes
    /// at all and is indistinguishable from an empty distinguished name. Use
    /// [`DistinguishedName::try_from_str`] to tell the two apart.
    pub fn parse_or_empty(s: &str) -> Self {
        match Self::try_from_str(s) {
            Ok(dn) => dn,
            Err(e) => {
                debug!("discarding malformed distinguished name {:?}: {}", s, e);
                Self::new()
            },
        }
    }

    /// Attempts to parse a distinguished name from a string.
    pub fn try_from_str(s: &str) -> Result<Self, ParseError> {
        let attributes = crate::dn::parsing::parse_dn(s)?;
        Ok(Self::from(attributes))
    }

    /// Obtains the attributes of this distinguished name in their original order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Iterates over the attributes of this distinguished name in their original order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    /// The number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether this distinguished name has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Appends an attribute.
    pub fn append(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
        self.reordered = OnceLock::new();
    }

    /// Returns the value of the first attribute with the given name.
    ///
    /// The name is converted to uppercase before being compared exactly to the stored names, so
    /// `lookup("cn")` finds `CN` but nothing can find an attribute stored as `SerialNumber`.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        let upper_name = name.to_uppercase();
        self.attributes.iter()
            .find(|attribute| attribute.name() == upper_name)
            .map(|attribute| attribute.value())
    }

    /// The order in which attributes are displayed.
    pub fn order(&self) -> &AttributeOrder {
        &self.order
    }

    /// Changes the order in which attributes are displayed.
    pub fn set_order(&mut self, order: AttributeOrder) {
        self.order = order;
        self.reordered = OnceLock::new();
    }

    /// Renders the attributes in their original order, separated by commas.
    pub fn canonical_form(&self) -> String {
        self.canonical_form_with_separator(DEFAULT_SEPARATOR)
    }

    /// Renders the attributes in their original order, separated by the given separator.
    pub fn canonical_form_with_separator(&self, separator: &str) -> String {
        serialize(&self.attributes, separator)
    }

    /// The attributes rearranged according to the display order.
    ///
    /// The rearranged sequence is computed on first use and kept until the attributes or the
    /// order change.
    pub fn display_order_attributes(&self) -> &[Attribute] {
        self.reordered.get_or_init(|| {
            trace!("reordering {} attributes", self.attributes.len());
            reorder(&self.attributes, &self.order)
        })
    }

    /// Renders the attributes in display order, separated by commas.
    pub fn display_form(&self) -> String {
        serialize(self.display_order_attributes(), DEFAULT_SEPARATOR)
    }

    /// Renders each attribute in display order as `name=value`.
    pub fn display_attributes(&self) -> Vec<String> {
        list_attributes(self.display_order_attributes())
    }

    /// Escapes an attribute value for inclusion in a distinguished name string.
    pub fn escape(value: &str) -> Cow<str> {
        escape_value(value)
    }
}
impl From<Vec<Attribute>> for DistinguishedName {
    fn from(value: Vec<Attribute>) -> Self {
        Self {
            attributes: value,
            ..Self::default()
        }
    }
}
impl FromStr for DistinguishedName {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_str(s)
    }
}
impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_form())
    }
}
impl PartialEq for DistinguishedName {
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes
            && self.order == other.order
    }
}
impl Eq for DistinguishedName {
}
impl<'a> IntoIterator for &'a DistinguishedName {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}


/// An error that can occur while parsing a distinguished name.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ParseError {
    /// A component contains no `=` between attribute type and value.
    MissingEquals,

    /// The attribute type is empty.
    EmptyType,

    /// Nothing but spaces follows the `=`.
    EmptyValue,

    /// A `#` is not followed by any hex digits.
    EmptyHexString,

    /// A hex string consists of an odd number of hex digits.
    OddLengthHexString,

    /// A hex string contains a byte that is not a valid hex digit.
    InvalidByteInHexString { byte: u8, pos: usize },

    /// A quoted value is missing its closing quotation mark.
    UnterminatedQuotedString,

    /// A string ends with an incomplete escape sequence.
    IncompleteFinalEscape,

    /// A backslash is followed by neither a special character nor two hex digits.
    ///
    /// `character` is the first character after the backslash.
    InvalidEscape { character: char },

    /// An unquoted value contains an unescaped quotation mark.
    UnescapedQuote,

    /// A component is followed by something other than a separator (`,`, `;` or `+`).
    UnexpectedCharacter { character: char },

    /// The string is malformed in another way.
    Malformed,
}
impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEquals
                => write!(f, "component is missing an equals sign"),
            Self::EmptyType
                => write!(f, "empty attribute type"),
            Self::EmptyValue
                => write!(f, "empty attribute value"),
            Self::EmptyHexString
                => write!(f, "hex string contains no hex digits"),
            Self::OddLengthHexString
                => write!(f, "hex string has an odd number of hex digits"),
            Self::InvalidByteInHexString { byte, pos }
                => write!(f, "hex string contains an invalid character (byte 0x{:02X}) at byte position {}", byte, pos),
            Self::UnterminatedQuotedString
                => write!(f, "quoted string is not terminated"),
            Self::IncompleteFinalEscape
                => write!(f, "string ends with an incomplete escape sequence"),
            Self::InvalidEscape { character }
                => write!(f, "invalid escape sequence starting with {:?}", character),
            Self::UnescapedQuote
                => write!(f, "unescaped quotation mark in unquoted value"),
            Self::UnexpectedCharacter { character }
                => write!(f, "unexpected character {:?} after component", character),
            Self::Malformed
                => write!(f, "malformed distinguished name"),
        }
    }
}
impl std::error::Error for ParseError {
}
impl<'a> nom::error::ParseError<&'a str> for ParseError {
    fn from_error_kind(_input: &'a str, _kind: ErrorKind) -> Self {
        Self::Malformed
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}


#[cfg(test)]
mod tests {
    use super::{DistinguishedName, ParseError};
    use crate::Attribute;
    use crate::dn::order::{AttributeOrder, OrderToken};

    #[test]
    fn test_parse() {
        let dn = DistinguishedName::parse_or_empty("CN=Steve Kille,O=Isode Limited,C=GB");
        assert_eq!(dn.len(), 3);
        assert_eq!(dn.attributes()[0], Attribute::new("CN", "Steve Kille"));
        assert_eq!(dn.attributes()[1], Attribute::new("O", "Isode Limited"));
        assert_eq!(dn.attributes()[2], Attribute::new("C", "GB"));

        let dn = DistinguishedName::parse_or_empty("CN=Simple\\");
        assert!(dn.is_empty());
        let dn = DistinguishedName::parse_or_empty("");
        assert!(dn.is_empty());

        assert_eq!(DistinguishedName::try_from_str("CN=Simple\\"), Err(ParseError::IncompleteFinalEscape));
        assert_eq!(DistinguishedName::try_from_str("").unwrap(), DistinguishedName::new());

        let dn: DistinguishedName = "CN=Simple,O=Silly".parse().unwrap();
        assert_eq!(dn.iter().map(|a| a.name()).collect::<Vec<_>>(), vec!["CN", "O"]);
    }

    #[test]
    fn test_canonical_form() {
        let dn = DistinguishedName::parse_or_empty("2.5.4.5=#34, CN=Koch\\, Werner,OID.2.5.4.4=#4B6F6368,C=DE");
        assert_eq!(dn.canonical_form(), "SerialNumber=4,CN=Koch\\, Werner,SN=Koch,C=DE");
        assert_eq!(dn.canonical_form_with_separator("; "), "SerialNumber=4; CN=Koch\\, Werner; SN=Koch; C=DE");
        assert_eq!(dn.to_string(), dn.canonical_form());
        assert_eq!(DistinguishedName::new().canonical_form(), "");
    }

    #[test]
    fn test_display_form() {
        let dn = DistinguishedName::parse_or_empty("C=DE,O=Telekom,2.5.4.5=#34,CN=Koch\\, Werner,L=Bonn,EMAIL=k@example.com");
        assert_eq!(dn.display_form(), "CN=Koch\\, Werner,L=Bonn,SerialNumber=4,EMAIL=k@example.com,O=Telekom,C=DE");
        assert_eq!(
            dn.display_attributes(),
            vec!["CN=Koch\\, Werner", "L=Bonn", "SerialNumber=4", "EMAIL=k@example.com", "O=Telekom", "C=DE"],
        );
        // the canonical form is unaffected by the display order
        assert_eq!(dn.canonical_form(), "C=DE,O=Telekom,SerialNumber=4,CN=Koch\\, Werner,L=Bonn,EMAIL=k@example.com");
    }

    #[test]
    fn test_display_form_cache() {
        let mut dn = DistinguishedName::parse_or_empty("O=Widget,C=US");
        assert!(dn.reordered.get().is_none());

        let first = dn.display_form();
        assert!(dn.reordered.get().is_some());
        assert_eq!(dn.display_form(), first);
        assert_eq!(first, "O=Widget,C=US");

        dn.append(Attribute::new("CN", "X"));
        assert!(dn.reordered.get().is_none());
        assert_eq!(dn.display_form(), "CN=X,O=Widget,C=US");

        dn.set_order(AttributeOrder::new(vec![OrderToken::named("C"), OrderToken::Rest]));
        assert!(dn.reordered.get().is_none());
        assert_eq!(dn.display_form(), "C=US,O=Widget,CN=X");
        assert_eq!(dn.order().as_tokens().len(), 2);
    }

    #[test]
    fn test_value_semantics() {
        let mut original = DistinguishedName::parse_or_empty("CN=X,O=Widget");
        assert_eq!(original.display_form(), "CN=X,O=Widget");

        let copy = original.clone();
        original.append(Attribute::new("C", "US"));
        original.set_order(AttributeOrder::new(vec![OrderToken::Rest]));

        assert_eq!(copy.len(), 2);
        assert_eq!(copy.order(), &AttributeOrder::default());
        assert_eq!(copy.display_form(), "CN=X,O=Widget");
        assert_eq!(original.display_form(), "CN=X,O=Widget,C=US");
        assert_ne!(original, copy);

        // a custom order survives cloning
        let copy = original.clone();
        assert_eq!(copy.order(), original.order());
        assert_eq!(copy, original);
    }

    #[test]
    fn test_lookup() {
        let dn = DistinguishedName::parse_or_empty("OU=Sales+CN=J. Smith,OU=Europe,2.5.4.5=#34");
        assert_eq!(dn.lookup("CN"), Some("J. Smith"));
        assert_eq!(dn.lookup("cn"), Some("J. Smith"));
        assert_eq!(dn.lookup("ou"), Some("Sales"));
        assert_eq!(dn.lookup("O"), None);

        // stored names are not case-folded
        assert_eq!(dn.lookup("SerialNumber"), None);
        assert_eq!(dn.lookup("SERIALNUMBER"), None);
    }

    #[test]
    fn test_escape() {
        assert_eq!(DistinguishedName::escape("Sue, Grabbit"), "Sue\\, Grabbit");
        assert_eq!(DistinguishedName::escape("plain"), "plain");
    }
}
