// 🚗 Model Entity - one row of the dataset
//
// A model never owns its manufacturer: it carries the manufacturer's
// ManufacturerId, which resolves against the Registry it was built into.

use crate::attributes::{AttributeKind, AttributeValue};
use crate::entities::manufacturer::ManufacturerId;

/// Model - immutable bundle of {manufacturer, display name, attributes}
///
/// Identity is positional (index in the manufacturer's model list).
/// Attributes keep source column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    manufacturer: ManufacturerId,
    name: String,
    attributes: Vec<AttributeValue>,
}

impl Model {
    pub fn new(manufacturer: ManufacturerId, name: String, attributes: Vec<AttributeValue>) -> Self {
        Model {
            manufacturer,
            name,
            attributes,
        }
    }

    pub fn manufacturer_id(&self) -> ManufacturerId {
        self.manufacturer
    }

    /// Display name: the `name` field without its brand token (may be empty)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[AttributeValue] {
        &self.attributes
    }

    /// First attribute of the given kind
    pub fn attribute(&self, kind: AttributeKind) -> Option<&AttributeValue> {
        self.attributes.iter().find(|attr| attr.kind() == kind)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Model {
        Model::new(
            ManufacturerId::new(0),
            "Corolla".to_string(),
            vec![
                AttributeValue::new(AttributeKind::MilesPerGallon, "32"),
                AttributeValue::new(AttributeKind::Cylinders, "4"),
                AttributeValue::new(AttributeKind::Year, "1985"),
            ],
        )
    }

    #[test]
    fn test_model_creation() {
        let model = sample();

        assert_eq!(model.name(), "Corolla");
        assert_eq!(model.manufacturer_id(), ManufacturerId::new(0));
        assert_eq!(model.attributes().len(), 3);
    }

    #[test]
    fn test_model_keeps_attribute_order() {
        let model = sample();
        let rendered: Vec<&str> = model.attributes().iter().map(|a| a.display()).collect();

        assert_eq!(rendered, vec!["32 mpg", "4", "1985"]);
    }

    #[test]
    fn test_model_attribute_lookup() {
        let model = sample();

        assert_eq!(
            model.attribute(AttributeKind::Year).map(|a| a.raw()),
            Some("1985")
        );
        assert!(model.attribute(AttributeKind::Weight).is_none());
    }
}
