use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Visitor;

use crate::Attribute;
use crate::dn::DistinguishedName;
use crate::dn::order::{AttributeOrder, OrderToken};


/// Serialized as a `(name, value)` pair holding the decoded strings, so that every attribute can
/// be read back, including values that only make sense escaped.
impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.name(), self.value()).serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for Attribute {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (name, value) = <(String, String)>::deserialize(deserializer)?;
        Ok(Self::new(name, value))
    }
}

/// Serialized as the sequence of its attributes; a deserialized distinguished name has the
/// default order.
impl Serialize for DistinguishedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.attributes().serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for DistinguishedName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let attributes = Vec::<Attribute>::deserialize(deserializer)?;
        Ok(Self::from(attributes))
    }
}

/// Names are serialized as strings, [`OrderToken::Rest`] as a unit value (`null` in JSON).
impl Serialize for OrderToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Named(name) => serializer.serialize_str(name),
            Self::Rest => serializer.serialize_unit(),
        }
    }
}
impl<'de> Deserialize<'de> for OrderToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderTokenVisitor;
        impl<'de> Visitor<'de> for OrderTokenVisitor {
            type Value = OrderToken;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "an attribute name or a unit value")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(OrderToken::named(v))
            }

            fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(OrderToken::Named(v))
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(OrderToken::Rest)
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(OrderToken::Rest)
            }
        }

        deserializer.deserialize_any(OrderTokenVisitor)
    }
}

impl Serialize for AttributeOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_tokens().serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for AttributeOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tokens = Vec::<OrderToken>::deserialize(deserializer)?;
        Ok(Self::new(tokens))
    }
}
