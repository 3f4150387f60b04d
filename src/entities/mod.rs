// Entity Models - manufacturers and the models they own
//
// - Manufacturer: identity = brand string, owns an append-only model list
// - Model: immutable row, refers back to its manufacturer by ManufacturerId
// - RegistryBuilder / Registry: get-or-create during load, read-only after

pub mod manufacturer;
pub mod model;

pub use manufacturer::{Manufacturer, ManufacturerId, Registry, RegistryBuilder};
pub use model::Model;
