// 🏭 Attribute Factory - column name → AttributeValue
// Static constructor table, checked against the kind catalog on creation.

use std::collections::HashMap;
use std::fmt;

use crate::attributes::{AttributeKind, AttributeValue};
use crate::error::{CatalogError, Result};

/// Constructor for one attribute kind
pub type Constructor = fn(&str) -> AttributeValue;

fn miles_per_gallon(raw: &str) -> AttributeValue {
    AttributeValue::new(AttributeKind::MilesPerGallon, raw)
}

fn cylinders(raw: &str) -> AttributeValue {
    AttributeValue::new(AttributeKind::Cylinders, raw)
}

fn displacement(raw: &str) -> AttributeValue {
    AttributeValue::new(AttributeKind::Displacement, raw)
}

fn horsepower(raw: &str) -> AttributeValue {
    AttributeValue::new(AttributeKind::Horsepower, raw)
}

fn weight(raw: &str) -> AttributeValue {
    AttributeValue::new(AttributeKind::Weight, raw)
}

fn acceleration(raw: &str) -> AttributeValue {
    AttributeValue::new(AttributeKind::Acceleration, raw)
}

fn year(raw: &str) -> AttributeValue {
    AttributeValue::new(AttributeKind::Year, raw)
}

const CONSTRUCTORS: [(AttributeKind, Constructor); 7] = [
    (AttributeKind::MilesPerGallon, miles_per_gallon),
    (AttributeKind::Cylinders, cylinders),
    (AttributeKind::Displacement, displacement),
    (AttributeKind::Horsepower, horsepower),
    (AttributeKind::Weight, weight),
    (AttributeKind::Acceleration, acceleration),
    (AttributeKind::Year, year),
];

// ============================================================================
// FACTORY
// ============================================================================

/// AttributeFactory - builds one AttributeValue per recognized column
#[derive(Clone)]
pub struct AttributeFactory {
    constructors: HashMap<&'static str, (AttributeKind, Constructor)>,
}

impl fmt::Debug for AttributeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut columns: Vec<&str> = self.constructors.keys().copied().collect();
        columns.sort_unstable();
        f.debug_struct("AttributeFactory")
            .field("columns", &columns)
            .finish()
    }
}

impl AttributeFactory {
    /// Create the factory from the static table
    ///
    /// Fails with `IncompleteCatalog` if any kind is missing or listed twice.
    pub fn new() -> Result<Self> {
        Self::from_table(&CONSTRUCTORS)
    }

    fn from_table(table: &[(AttributeKind, Constructor)]) -> Result<Self> {
        let mut constructors = HashMap::with_capacity(table.len());

        for &(kind, constructor) in table {
            if constructors
                .insert(kind.column_name(), (kind, constructor))
                .is_some()
            {
                return Err(CatalogError::IncompleteCatalog { kind });
            }
        }

        if let Some(kind) = AttributeKind::ALL
            .into_iter()
            .find(|kind| !constructors.contains_key(kind.column_name()))
        {
            return Err(CatalogError::IncompleteCatalog { kind });
        }

        Ok(AttributeFactory { constructors })
    }

    /// Build the value for `column`, or `UnknownAttributeKind`
    pub fn build(&self, column: &str, raw: &str) -> Result<AttributeValue> {
        let (_, constructor) =
            self.constructors
                .get(column)
                .ok_or_else(|| CatalogError::UnknownAttributeKind {
                    column: column.to_string(),
                })?;

        Ok(constructor(raw))
    }

    pub fn recognizes(&self, column: &str) -> bool {
        self.constructors.contains_key(column)
    }

    /// Kind registered for `column`
    pub fn kind_of(&self, column: &str) -> Option<AttributeKind> {
        self.constructors.get(column).map(|(kind, _)| *kind)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::UnitOfMeasure;

    #[test]
    fn test_factory_covers_every_kind() {
        let factory = AttributeFactory::new().unwrap();

        for kind in AttributeKind::ALL {
            assert!(factory.recognizes(kind.column_name()));
            assert_eq!(factory.kind_of(kind.column_name()), Some(kind));

            let value = factory.build(kind.column_name(), "7").unwrap();
            assert_eq!(value.kind(), kind);
            assert_eq!(value.unit(), kind.unit());
        }
    }

    #[test]
    fn test_factory_rendering() {
        let factory = AttributeFactory::new().unwrap();

        assert_eq!(factory.build("mpg", "32").unwrap().display(), "32 mpg");
        assert_eq!(factory.build("displacement", "307.0").unwrap().display(), "307.0 cc");
        assert_eq!(factory.build("horsepower", "130.0").unwrap().display(), "130.0 hp");
        assert_eq!(factory.build("weight", "3504.").unwrap().display(), "3504. kg");
        assert_eq!(factory.build("acceleration", "12.0").unwrap().display(), "12.0 secs");
        assert_eq!(factory.build("cylinders", "8").unwrap().display(), "8");
        assert_eq!(factory.build("year", "70").unwrap().display(), "70");
    }

    #[test]
    fn test_factory_rejects_unknown_column() {
        let factory = AttributeFactory::new().unwrap();

        let err = factory.build("origin", "1").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownAttributeKind { column } if column == "origin"));
        assert!(!factory.recognizes("origin"));
        assert!(factory.kind_of("Weight").is_none());
    }

    #[test]
    fn test_missing_constructor_is_detected() {
        let err = AttributeFactory::from_table(&CONSTRUCTORS[..6]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::IncompleteCatalog { kind: AttributeKind::Year }
        ));
    }

    #[test]
    fn test_duplicate_constructor_is_detected() {
        let table = [
            (AttributeKind::Weight, weight as Constructor),
            (AttributeKind::Weight, weight as Constructor),
        ];
        let err = AttributeFactory::from_table(&table).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::IncompleteCatalog { kind: AttributeKind::Weight }
        ));
    }

    #[test]
    fn test_constructors_attach_the_right_unit() {
        let factory = AttributeFactory::new().unwrap();
        let value = factory.build("weight", "2130").unwrap();
        assert_eq!(value.unit(), Some(UnitOfMeasure::Kg));
    }
}
