// 👁️ Consumer View - serializable snapshot of the Registry
// What the CLI's --json output and the HTTP API hand out.

use serde::Serialize;

use crate::attributes::{AttributeKind, AttributeValue, Scalar, UnitOfMeasure};
use crate::entities::{Manufacturer, Model, Registry};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeView {
    pub kind: AttributeKind,
    pub label: &'static str,
    pub raw: String,
    pub value: Scalar,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    pub display: String,
}

impl From<&AttributeValue> for AttributeView {
    fn from(attr: &AttributeValue) -> Self {
        AttributeView {
            kind: attr.kind(),
            label: attr.kind().label(),
            raw: attr.raw().to_string(),
            value: attr.value().clone(),
            unit: attr.unit().map(|u: UnitOfMeasure| u.symbol()),
            display: attr.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelView {
    pub name: String,
    pub attributes: Vec<AttributeView>,
}

impl From<&Model> for ModelView {
    fn from(model: &Model) -> Self {
        ModelView {
            name: model.name().to_string(),
            attributes: model.attributes().iter().map(AttributeView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManufacturerView {
    pub brand: String,
    pub model_count: usize,
    pub models: Vec<ModelView>,
}

impl From<&Manufacturer> for ManufacturerView {
    fn from(manufacturer: &Manufacturer) -> Self {
        ManufacturerView {
            brand: manufacturer.brand().to_string(),
            model_count: manufacturer.model_count(),
            models: manufacturer.models().iter().map(ModelView::from).collect(),
        }
    }
}

/// Whole catalog, manufacturers in first-seen order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    pub manufacturer_count: usize,
    pub model_count: usize,
    pub manufacturers: Vec<ManufacturerView>,
}

impl From<&Registry> for CatalogView {
    fn from(registry: &Registry) -> Self {
        CatalogView {
            manufacturer_count: registry.len(),
            model_count: registry.model_count(),
            manufacturers: registry
                .manufacturers()
                .iter()
                .map(ManufacturerView::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ModelBuilder;
    use crate::config::UnknownColumnPolicy;
    use crate::entities::RegistryBuilder;

    fn registry() -> Registry {
        let builder = ModelBuilder::new(UnknownColumnPolicy::Reject).unwrap();
        let mut registry = RegistryBuilder::new();
        builder
            .build(&mut registry, "Toyota Corolla", [("mpg", "32"), ("cylinders", "4")])
            .unwrap();
        builder
            .build(&mut registry, "Ford Focus", [("horsepower", "?")])
            .unwrap();
        registry.build()
    }

    #[test]
    fn test_catalog_view_counts() {
        let view = CatalogView::from(&registry());

        assert_eq!(view.manufacturer_count, 2);
        assert_eq!(view.model_count, 2);
        assert_eq!(view.manufacturers[0].brand, "Toyota");
        assert_eq!(view.manufacturers[1].brand, "Ford");
    }

    #[test]
    fn test_attribute_view_json() {
        let view = CatalogView::from(&registry());
        let json = serde_json::to_value(&view.manufacturers[0].models[0].attributes).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {
                    "kind": "mpg",
                    "label": "Fuel efficiency",
                    "raw": "32",
                    "value": 32,
                    "unit": "mpg",
                    "display": "32 mpg"
                },
                {
                    "kind": "cylinders",
                    "label": "Cylinders",
                    "raw": "4",
                    "value": 4,
                    "display": "4"
                }
            ])
        );
    }

    #[test]
    fn test_text_value_serializes_as_string() {
        let view = CatalogView::from(&registry());
        let hp = &view.manufacturers[1].models[0].attributes[0];

        assert_eq!(serde_json::to_value(&hp.value).unwrap(), serde_json::json!("?"));
        assert_eq!(hp.display, "? hp");
    }
}
