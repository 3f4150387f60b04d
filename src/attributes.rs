// 🏷️ Attribute Catalog - typed, unit-aware model attributes
// A closed set of kinds; each kind knows its column name and its unit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

// ============================================================================
// UNITS OF MEASURE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    Mpg,
    Cc,
    Hp,
    Kg,
    Seconds,
}

impl UnitOfMeasure {
    /// Short tag used when rendering a value
    pub fn symbol(&self) -> &'static str {
        match self {
            UnitOfMeasure::Mpg => "mpg",
            UnitOfMeasure::Cc => "cc",
            UnitOfMeasure::Hp => "hp",
            UnitOfMeasure::Kg => "kg",
            UnitOfMeasure::Seconds => "secs",
        }
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// ATTRIBUTE KINDS
// ============================================================================

/// AttributeKind - every column the dataset may carry besides `name`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    #[serde(rename = "mpg")]
    MilesPerGallon,
    #[serde(rename = "cylinders")]
    Cylinders,
    #[serde(rename = "displacement")]
    Displacement,
    #[serde(rename = "horsepower")]
    Horsepower,
    #[serde(rename = "weight")]
    Weight,
    #[serde(rename = "acceleration")]
    Acceleration,
    #[serde(rename = "year")]
    Year,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 7] = [
        AttributeKind::MilesPerGallon,
        AttributeKind::Cylinders,
        AttributeKind::Displacement,
        AttributeKind::Horsepower,
        AttributeKind::Weight,
        AttributeKind::Acceleration,
        AttributeKind::Year,
    ];

    /// Column header this kind is read from
    pub fn column_name(&self) -> &'static str {
        match self {
            AttributeKind::MilesPerGallon => "mpg",
            AttributeKind::Cylinders => "cylinders",
            AttributeKind::Displacement => "displacement",
            AttributeKind::Horsepower => "horsepower",
            AttributeKind::Weight => "weight",
            AttributeKind::Acceleration => "acceleration",
            AttributeKind::Year => "year",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            AttributeKind::MilesPerGallon => "Fuel efficiency",
            AttributeKind::Cylinders => "Cylinders",
            AttributeKind::Displacement => "Displacement",
            AttributeKind::Horsepower => "Power",
            AttributeKind::Weight => "Weight",
            AttributeKind::Acceleration => "Acceleration",
            AttributeKind::Year => "Model year",
        }
    }

    /// Unit attached to values of this kind, if any
    pub fn unit(&self) -> Option<UnitOfMeasure> {
        match self {
            AttributeKind::MilesPerGallon => Some(UnitOfMeasure::Mpg),
            AttributeKind::Cylinders => None,
            AttributeKind::Displacement => Some(UnitOfMeasure::Cc),
            AttributeKind::Horsepower => Some(UnitOfMeasure::Hp),
            AttributeKind::Weight => Some(UnitOfMeasure::Kg),
            AttributeKind::Acceleration => Some(UnitOfMeasure::Seconds),
            AttributeKind::Year => None,
        }
    }

    /// Exact, case-sensitive column lookup
    pub fn from_column(column: &str) -> Option<AttributeKind> {
        AttributeKind::ALL
            .into_iter()
            .find(|kind| kind.column_name() == column)
    }
}

impl FromStr for AttributeKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeKind::from_column(s).ok_or_else(|| CatalogError::UnknownAttributeKind {
            column: s.to_string(),
        })
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ============================================================================
// RAW SCALARS
// ============================================================================

/// Loosely-typed cell content. Coercion never fails: anything that is not a
/// number stays text (the dataset uses `?` for missing horsepower).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl Scalar {
    pub fn coerce(raw: &str) -> Scalar {
        let trimmed = raw.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Scalar::Integer(n);
        }
        match trimmed.parse::<f64>() {
            Ok(x) if x.is_finite() => Scalar::Decimal(x),
            _ => Scalar::Text(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(n) => Some(*n as f64),
            Scalar::Decimal(x) => Some(*x),
            Scalar::Text(_) => None,
        }
    }
}

// ============================================================================
// ATTRIBUTE VALUE
// ============================================================================

/// AttributeValue - one typed cell of a model row
///
/// Immutable once built. `display` is computed at construction so consumers
/// never re-derive the rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeValue {
    kind: AttributeKind,
    raw: String,
    value: Scalar,
    unit: Option<UnitOfMeasure>,
    display: String,
}

impl AttributeValue {
    /// Build a value of `kind`, attaching the kind's unit
    pub fn new(kind: AttributeKind, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let unit = kind.unit();
        let display = render(&raw, unit);

        AttributeValue {
            kind,
            value: Scalar::coerce(&raw),
            raw,
            unit,
            display,
        }
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// Cell text exactly as read from the source
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &Scalar {
        &self.value
    }

    pub fn unit(&self) -> Option<UnitOfMeasure> {
        self.unit
    }

    pub fn has_unit(&self) -> bool {
        self.unit.is_some()
    }

    /// Rendered form: "<raw> <unit>" or "<raw>"
    pub fn display(&self) -> &str {
        &self.display
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

fn render(raw: &str, unit: Option<UnitOfMeasure>) -> String {
    match unit {
        Some(unit) => format!("{} {}", raw, unit.symbol()),
        None => raw.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_round_trips_through_its_column() {
        for kind in AttributeKind::ALL {
            assert_eq!(AttributeKind::from_column(kind.column_name()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_column_has_no_kind() {
        assert_eq!(AttributeKind::from_column("origin"), None);
        assert_eq!(AttributeKind::from_column("MPG"), None); // Case sensitive
        assert_eq!(AttributeKind::from_column("name"), None);

        let err = "origin".parse::<AttributeKind>().unwrap_err();
        assert!(matches!(err, CatalogError::UnknownAttributeKind { column } if column == "origin"));
    }

    #[test]
    fn test_unit_table() {
        assert_eq!(AttributeKind::MilesPerGallon.unit(), Some(UnitOfMeasure::Mpg));
        assert_eq!(AttributeKind::Displacement.unit(), Some(UnitOfMeasure::Cc));
        assert_eq!(AttributeKind::Horsepower.unit(), Some(UnitOfMeasure::Hp));
        assert_eq!(AttributeKind::Weight.unit(), Some(UnitOfMeasure::Kg));
        assert_eq!(AttributeKind::Acceleration.unit(), Some(UnitOfMeasure::Seconds));
        assert_eq!(AttributeKind::Cylinders.unit(), None);
        assert_eq!(AttributeKind::Year.unit(), None);
    }

    #[test]
    fn test_unit_bearing_rendering() {
        let value = AttributeValue::new(AttributeKind::MilesPerGallon, "32");
        assert_eq!(value.display(), "32 mpg");
        assert_eq!(value.to_string(), "32 mpg");
        assert!(value.has_unit());

        let value = AttributeValue::new(AttributeKind::Acceleration, "12.5");
        assert_eq!(value.display(), "12.5 secs");
    }

    #[test]
    fn test_unitless_rendering() {
        let value = AttributeValue::new(AttributeKind::Cylinders, "4");
        assert_eq!(value.display(), "4");
        assert_eq!(value.unit(), None);

        let value = AttributeValue::new(AttributeKind::Year, "1985");
        assert_eq!(value.display(), "1985");
    }

    #[test]
    fn test_rendering_keeps_raw_text() {
        // "18.0" must not collapse to "18"
        let value = AttributeValue::new(AttributeKind::MilesPerGallon, "18.0");
        assert_eq!(value.raw(), "18.0");
        assert_eq!(value.display(), "18.0 mpg");
        assert_eq!(value.value(), &Scalar::Decimal(18.0));
    }

    #[test]
    fn test_scalar_coercion() {
        assert_eq!(Scalar::coerce("1985"), Scalar::Integer(1985));
        assert_eq!(Scalar::coerce("3504."), Scalar::Decimal(3504.0));
        assert_eq!(Scalar::coerce("?"), Scalar::Text("?".to_string()));
        assert_eq!(Scalar::coerce(""), Scalar::Text(String::new()));
        assert_eq!(Scalar::coerce("inf"), Scalar::Text("inf".to_string()));

        assert_eq!(Scalar::coerce("130").as_f64(), Some(130.0));
        assert_eq!(Scalar::coerce("?").as_f64(), None);
    }

    #[test]
    fn test_missing_value_still_renders() {
        let value = AttributeValue::new(AttributeKind::Horsepower, "?");
        assert_eq!(value.display(), "? hp");
        assert_eq!(value.value(), &Scalar::Text("?".to_string()));
    }

    #[test]
    fn test_kind_serializes_as_column_name() {
        let json = serde_json::to_string(&AttributeKind::MilesPerGallon).unwrap();
        assert_eq!(json, "\"mpg\"");
    }
}
