//! Decoded property storage.

use super::parameter::ParamSet;

/// One property after tokenizing, parameter classification, and value
/// decoding.
#[derive(Debug, Clone)]
pub struct DecodedProperty {
    /// Property name, lower-cased.
    pub name: String,
    /// Classified parameters.
    pub params: ParamSet,
    /// Decoded value components (split on the property's delimiter).
    pub values: Vec<String>,
    /// Raw text after the colon, kept for binary-valued properties.
    pub raw_value: String,
}

impl DecodedProperty {
    /// The first component, if present and non-empty.
    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        self.values
            .first()
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Component `index`, if present and non-empty.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<&str> {
        self.values
            .get(index)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// All decoded properties of one vCard, in input order.
#[derive(Debug, Clone, Default)]
pub struct PropertyBag {
    props: Vec<DecodedProperty>,
}

impl PropertyBag {
    /// Appends a decoded property.
    pub fn push(&mut self, prop: DecodedProperty) {
        self.props.push(prop);
    }

    /// Number of stored properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Whether no property was stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// All properties named `name`, in input order.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DecodedProperty> {
        self.props.iter().filter(move |p| p.name == name)
    }

    /// The first property named `name`, if any.
    #[must_use]
    pub fn first_named(&self, name: &str) -> Option<&DecodedProperty> {
        self.props.iter().find(|p| p.name == name)
    }

    /// The first non-empty first component of the first property named
    /// `name`.
    #[must_use]
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.first_named(name).and_then(DecodedProperty::first_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str, value: &str) -> DecodedProperty {
        DecodedProperty {
            name: name.to_string(),
            params: ParamSet::default(),
            values: vec![value.to_string()],
            raw_value: value.to_string(),
        }
    }

    #[test]
    fn named_preserves_input_order() {
        let mut bag = PropertyBag::default();
        bag.push(prop("email", "first@example.com"));
        bag.push(prop("tel", "555"));
        bag.push(prop("email", "second@example.com"));

        let emails: Vec<_> = bag
            .named("email")
            .filter_map(DecodedProperty::first_value)
            .collect();
        assert_eq!(emails, vec!["first@example.com", "second@example.com"]);
    }

    #[test]
    fn empty_component_is_none() {
        let p = DecodedProperty {
            name: "n".to_string(),
            params: ParamSet::default(),
            values: vec!["Smith".to_string(), String::new()],
            raw_value: "Smith;".to_string(),
        };
        assert_eq!(p.component(0), Some("Smith"));
        assert_eq!(p.component(1), None);
        assert_eq!(p.component(5), None);
    }
}
