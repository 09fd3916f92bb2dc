//! Display ordering of distinguished-name attributes.


use crate::Attribute;


/// A single entry of an [`AttributeOrder`].
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum OrderToken {
    /// All attributes with this exact name, in their original relative order.
    Named(String),

    /// All attributes whose names are not mentioned anywhere in the order, in their original
    /// relative order.
    Rest,
}
impl OrderToken {
    /// Creates a token matching attributes with the given name.
    pub fn named<N: Into<String>>(name: N) -> Self {
        Self::Named(name.into())
    }

    /// `Some(name)` if this token matches attributes by name; `None` if it is [`OrderToken::Rest`].
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name.as_str()),
            Self::Rest => None,
        }
    }
}


/// The order in which the attributes of a distinguished name are displayed.
///
/// The default order is `CN`, `L`, everything else, `OU`, `O`, `C`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AttributeOrder(Vec<OrderToken>);
impl AttributeOrder {
    /// Creates a new attribute order from its tokens.
    pub fn new(tokens: Vec<OrderToken>) -> Self {
        Self(tokens)
    }

    /// The tokens making up this order.
    pub fn as_tokens(&self) -> &[OrderToken] {
        &self.0
    }

    /// Converts this order into its tokens.
    pub fn into_tokens(self) -> Vec<OrderToken> {
        self.0
    }

    /// Whether an attribute with this name is explicitly placed by this order.
    pub fn mentions(&self, name: &str) -> bool {
        self.0.iter()
            .any(|token| token.as_name() == Some(name))
    }
}
impl Default for AttributeOrder {
    fn default() -> Self {
        Self(vec![
            OrderToken::named("CN"),
            OrderToken::named("L"),
            OrderToken::Rest,
            OrderToken::named("OU"),
            OrderToken::named("O"),
            OrderToken::named("C"),
        ])
    }
}
impl From<Vec<OrderToken>> for AttributeOrder {
    fn from(value: Vec<OrderToken>) -> Self {
        Self(value)
    }
}
impl FromIterator<OrderToken> for AttributeOrder {
    fn from_iter<T: IntoIterator<Item = OrderToken>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}


/// Rearranges attributes according to the given display order.
///
/// Attributes not mentioned by name are inserted at the first [`OrderToken::Rest`]; if the order
/// contains no such token, they are left out.
pub fn reorder(attributes: &[Attribute], order: &AttributeOrder) -> Vec<Attribute> {
    let mut unlisted: Vec<&Attribute> = attributes.iter()
        .filter(|attribute| !order.mentions(attribute.name()))
        .collect();
    let mut result = Vec::with_capacity(attributes.len());

    for token in order.as_tokens() {
        match token {
            OrderToken::Rest => {
                // later Rest tokens find this empty
                result.extend(unlisted.drain(..).cloned());
            },
            OrderToken::Named(name) => {
                result.extend(
                    attributes.iter()
                        .filter(|attribute| attribute.name() == name)
                        .cloned()
                );
            },
        }
    }

    result
}


#[cfg(test)]
mod tests {
    use super::{AttributeOrder, OrderToken, reorder};
    use crate::Attribute;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<Attribute> {
        pairs.iter()
            .map(|(name, value)| Attribute::new(*name, *value))
            .collect()
    }

    #[test]
    fn test_reorder_default() {
        let order = AttributeOrder::default();

        let reordered = reorder(&attrs(&[("O", "Widget"), ("C", "US"), ("CN", "X")]), &order);
        assert_eq!(reordered, attrs(&[("CN", "X"), ("O", "Widget"), ("C", "US")]));

        let reordered = reorder(
            &attrs(&[("C", "DE"), ("SerialNumber", "4"), ("O", "Telekom"), ("GN", "Werner"), ("CN", "Koch"), ("L", "Bonn")]),
            &order,
        );
        assert_eq!(
            reordered,
            attrs(&[("CN", "Koch"), ("L", "Bonn"), ("SerialNumber", "4"), ("GN", "Werner"), ("O", "Telekom"), ("C", "DE")]),
        );
    }

    #[test]
    fn test_reorder_repeated_names() {
        let reordered = reorder(
            &attrs(&[("OU", "Sales"), ("CN", "J. Smith"), ("OU", "Europe"), ("C", "US")]),
            &AttributeOrder::default(),
        );
        assert_eq!(reordered, attrs(&[("CN", "J. Smith"), ("OU", "Sales"), ("OU", "Europe"), ("C", "US")]));
    }

    #[test]
    fn test_reorder_rest_variants() {
        let attributes = attrs(&[("EMAIL", "x@example.com"), ("CN", "X"), ("SN", "Y")]);

        // without Rest, unlisted attributes are dropped
        let order = AttributeOrder::new(vec![OrderToken::named("CN")]);
        assert_eq!(reorder(&attributes, &order), attrs(&[("CN", "X")]));

        // a second Rest does not duplicate anything
        let order: AttributeOrder = vec![OrderToken::Rest, OrderToken::named("CN"), OrderToken::Rest]
            .into_iter()
            .collect();
        assert_eq!(reorder(&attributes, &order), attrs(&[("EMAIL", "x@example.com"), ("SN", "Y"), ("CN", "X")]));

        // an attribute literally named like a placeholder is an ordinary attribute
        let attributes = attrs(&[("_X_", "odd"), ("CN", "X")]);
        assert_eq!(reorder(&attributes, &AttributeOrder::default()), attrs(&[("CN", "X"), ("_X_", "odd")]));

        assert_eq!(reorder(&[], &AttributeOrder::default()), attrs(&[]));
    }

    #[test]
    fn test_mentions() {
        let order = AttributeOrder::default();
        assert!(order.mentions("CN"));
        assert!(order.mentions("C"));
        assert!(!order.mentions("cn"));
        assert!(!order.mentions("SerialNumber"));
        assert_eq!(order.as_tokens().len(), 6);
        assert_eq!(order.as_tokens()[2].as_name(), None);
    }
}
