// 🔧 Row-to-Model Builder
//
// One row in, one Model out:
// 1. split the name field into brand + display name
// 2. build every attribute through the factory
// 3. get-or-create the manufacturer and attach the model
//
// The row is fully resolved before the registry is touched, so a row that
// fails never leaves an empty manufacturer behind.

use tracing::{debug, trace};

use crate::attributes::AttributeValue;
use crate::config::UnknownColumnPolicy;
use crate::entities::{ManufacturerId, Model, RegistryBuilder};
use crate::error::{CatalogError, Result};
use crate::factory::AttributeFactory;

/// Split "<brand> <model name...>" on whitespace
///
/// Remaining tokens are re-joined with single spaces. A single token gives an
/// empty model name. Returns None when there is no token at all.
pub fn split_name(name_field: &str) -> Option<(&str, String)> {
    let mut tokens = name_field.split_whitespace();
    let brand = tokens.next()?;
    let model_name = tokens.collect::<Vec<_>>().join(" ");
    Some((brand, model_name))
}

#[derive(Debug, Clone)]
pub struct ModelBuilder {
    factory: AttributeFactory,
    unknown_columns: UnknownColumnPolicy,
}

impl ModelBuilder {
    pub fn new(unknown_columns: UnknownColumnPolicy) -> Result<Self> {
        Ok(ModelBuilder {
            factory: AttributeFactory::new()?,
            unknown_columns,
        })
    }

    pub fn factory(&self) -> &AttributeFactory {
        &self.factory
    }

    pub fn unknown_columns(&self) -> UnknownColumnPolicy {
        self.unknown_columns
    }

    /// Build one Model and attach it to its (possibly new) manufacturer
    ///
    /// `attribute_fields` are (column, cell) pairs in source order, without
    /// the name column.
    pub fn build<'a, I>(
        &self,
        registry: &mut RegistryBuilder,
        name_field: &str,
        attribute_fields: I,
    ) -> Result<ManufacturerId>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let (brand, model_name) =
            split_name(name_field).ok_or_else(|| CatalogError::MalformedRecord {
                line: 0,
                reason: "name field is blank".to_string(),
            })?;

        let mut attributes: Vec<AttributeValue> = Vec::new();
        for (column, raw) in attribute_fields {
            match self.factory.build(column, raw) {
                Ok(value) => {
                    trace!(column, value = value.display(), "attribute");
                    attributes.push(value);
                }
                Err(CatalogError::UnknownAttributeKind { .. })
                    if self.unknown_columns == UnknownColumnPolicy::Skip =>
                {
                    debug!(column, "skipping unknown column");
                }
                Err(e) => return Err(e),
            }
        }

        let id = registry.get_or_create(brand);
        registry.attach(Model::new(id, model_name, attributes));

        Ok(id)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ModelBuilder {
        ModelBuilder::new(UnknownColumnPolicy::Reject).unwrap()
    }

    #[test]
    fn test_split_name() {
        assert_eq!(
            split_name("Toyota Corolla"),
            Some(("Toyota", "Corolla".to_string()))
        );
        assert_eq!(
            split_name("chevrolet  chevelle\tmalibu"),
            Some(("chevrolet", "chevelle malibu".to_string()))
        );
        assert_eq!(split_name("Tesla"), Some(("Tesla", String::new())));
        assert_eq!(split_name("   "), None);
        assert_eq!(split_name(""), None);
    }

    #[test]
    fn test_build_single_row() {
        let mut registry = RegistryBuilder::new();
        builder()
            .build(
                &mut registry,
                "Toyota Corolla",
                [("mpg", "32"), ("cylinders", "4"), ("year", "1985")],
            )
            .unwrap();

        let registry = registry.build();
        let toyota = registry.get("Toyota").unwrap();
        assert_eq!(toyota.model_count(), 1);

        let corolla = &toyota.models()[0];
        assert_eq!(corolla.name(), "Corolla");

        let rendered: Vec<&str> = corolla.attributes().iter().map(|a| a.display()).collect();
        assert_eq!(rendered, vec!["32 mpg", "4", "1985"]);
    }

    #[test]
    fn test_build_same_brand_twice() {
        let mut registry = RegistryBuilder::new();
        let b = builder();

        let focus = b.build(&mut registry, "Ford Focus", [("mpg", "30")]).unwrap();
        let fiesta = b.build(&mut registry, "Ford Fiesta", [("mpg", "35")]).unwrap();
        assert_eq!(focus, fiesta);

        let registry = registry.build();
        assert_eq!(registry.len(), 1);

        let names: Vec<&str> = registry.get("Ford").unwrap().models().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Focus", "Fiesta"]);
    }

    #[test]
    fn test_build_brand_only_name() {
        let mut registry = RegistryBuilder::new();
        builder().build(&mut registry, "Tesla", [("mpg", "120")]).unwrap();

        let registry = registry.build();
        let tesla = registry.get("Tesla").unwrap();
        assert_eq!(tesla.models()[0].name(), "");
    }

    #[test]
    fn test_build_blank_name_is_malformed() {
        let mut registry = RegistryBuilder::new();
        let err = builder().build(&mut registry, "  ", [("mpg", "1")]).unwrap_err();

        assert!(matches!(err, CatalogError::MalformedRecord { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_build_unknown_column_rejected() {
        let mut registry = RegistryBuilder::new();
        let err = builder()
            .build(&mut registry, "amc hornet", [("mpg", "18"), ("origin", "1")])
            .unwrap_err();

        assert!(matches!(err, CatalogError::UnknownAttributeKind { column } if column == "origin"));
        // Failed row must not create the manufacturer
        assert!(registry.get("amc").is_none());
    }

    #[test]
    fn test_build_unknown_column_skipped() {
        let mut registry = RegistryBuilder::new();
        ModelBuilder::new(UnknownColumnPolicy::Skip)
            .unwrap()
            .build(&mut registry, "amc hornet", [("mpg", "18"), ("origin", "1"), ("year", "70")])
            .unwrap();

        let registry = registry.build();
        let hornet = &registry.get("amc").unwrap().models()[0];
        let kinds: Vec<&str> = hornet.attributes().iter().map(|a| a.kind().column_name()).collect();
        assert_eq!(kinds, vec!["mpg", "year"]);
    }

    #[test]
    fn test_build_without_attributes() {
        let mut registry = RegistryBuilder::new();
        builder()
            .build(&mut registry, "datsun 510", std::iter::empty())
            .unwrap();

        let registry = registry.build();
        assert!(registry.get("datsun").unwrap().models()[0].attributes().is_empty());
    }
}
