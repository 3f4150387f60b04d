// 🏭 Manufacturer Entity + Registry
//
// Brand string is the identity: at most one Manufacturer per brand.
//
// Lifecycle:
// - RegistryBuilder owns everything while rows are being ingested
//   (get-or-create by brand, append models)
// - build() freezes it into a Registry, which has no mutating methods

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::debug;

use crate::entities::model::Model;

// ============================================================================
// MANUFACTURER ID
// ============================================================================

/// Index of a Manufacturer inside the registry that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManufacturerId(usize);

impl ManufacturerId {
    pub fn new(index: usize) -> Self {
        ManufacturerId(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

// ============================================================================
// MANUFACTURER ENTITY
// ============================================================================

/// Manufacturer - a brand and the models it owns, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct Manufacturer {
    id: ManufacturerId,
    brand: String,
    models: Vec<Model>,
}

impl Manufacturer {
    pub fn new(id: ManufacturerId, brand: String) -> Self {
        Manufacturer {
            id,
            brand,
            models: Vec::new(),
        }
    }

    pub fn id(&self) -> ManufacturerId {
        self.id
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// First model with this display name
    pub fn find_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name() == name)
    }

    /// Append-only
    fn add_model(&mut self, model: Model) {
        debug_assert_eq!(model.manufacturer_id(), self.id);
        self.models.push(model);
    }
}

// ============================================================================
// REGISTRY BUILDER
// ============================================================================

/// Mutable registry used during ingestion
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    manufacturers: Vec<Manufacturer>,
    index: HashMap<String, ManufacturerId>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing manufacturer for `brand`, or a new one inserted first
    pub fn get_or_create(&mut self, brand: &str) -> ManufacturerId {
        if let Some(id) = self.index.get(brand) {
            return *id;
        }

        let id = ManufacturerId::new(self.manufacturers.len());
        debug!(brand, id = id.index(), "new manufacturer");

        self.manufacturers.push(Manufacturer::new(id, brand.to_string()));
        self.index.insert(brand.to_string(), id);
        id
    }

    /// Attach a model to the manufacturer it references
    ///
    /// The model's ManufacturerId must come from this builder's get_or_create.
    pub(crate) fn attach(&mut self, model: Model) {
        let index = model.manufacturer_id().index();
        self.manufacturers[index].add_model(model);
    }

    pub fn get(&self, brand: &str) -> Option<&Manufacturer> {
        self.index.get(brand).map(|id| &self.manufacturers[id.index()])
    }

    pub fn len(&self) -> usize {
        self.manufacturers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manufacturers.is_empty()
    }

    /// Freeze into a read-only Registry
    pub fn build(self) -> Registry {
        Registry {
            manufacturers: self.manufacturers,
            index: self.index,
        }
    }
}

// ============================================================================
// REGISTRY (read-only)
// ============================================================================

/// Registry - brand name → Manufacturer, frozen after ingestion
///
/// Manufacturers iterate in first-seen order. A brand that is not present is
/// a plain `None`, never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    manufacturers: Vec<Manufacturer>,
    index: HashMap<String, ManufacturerId>,
}

impl Registry {
    /// Lookup by brand (case sensitive)
    pub fn get(&self, brand: &str) -> Option<&Manufacturer> {
        self.index.get(brand).and_then(|id| self.manufacturer(*id))
    }

    pub fn contains(&self, brand: &str) -> bool {
        self.index.contains_key(brand)
    }

    pub fn manufacturer(&self, id: ManufacturerId) -> Option<&Manufacturer> {
        self.manufacturers.get(id.index())
    }

    /// Resolve a model's back-reference
    pub fn manufacturer_of(&self, model: &Model) -> Option<&Manufacturer> {
        self.manufacturer(model.manufacturer_id())
    }

    /// All manufacturers, first-seen order
    pub fn manufacturers(&self) -> &[Manufacturer] {
        &self.manufacturers
    }

    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.manufacturers.iter().map(|m| m.brand())
    }

    /// Every model of every manufacturer
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.manufacturers.iter().flat_map(|m| m.models().iter())
    }

    pub fn len(&self) -> usize {
        self.manufacturers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manufacturers.is_empty()
    }

    pub fn model_count(&self) -> usize {
        self.manufacturers.iter().map(|m| m.model_count()).sum()
    }

    /// SHA-256 over brands, model names and raw attribute values
    ///
    /// Two loads of the same source produce the same fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        for manufacturer in &self.manufacturers {
            hasher.update(b"M\x1f");
            hasher.update(manufacturer.brand().as_bytes());
            for model in manufacturer.models() {
                hasher.update(b"\x1eN\x1f");
                hasher.update(model.name().as_bytes());
                for attr in model.attributes() {
                    hasher.update(b"\x1f");
                    hasher.update(attr.kind().column_name().as_bytes());
                    hasher.update(b"=");
                    hasher.update(attr.raw().as_bytes());
                }
            }
            hasher.update(b"\x1d");
        }

        format!("{:x}", hasher.finalize())
    }
}

// ============================================================================
// TESTS
// ============================================================================
