pub mod catalog;

pub use catalog::{Catalog, CatalogSnapshot, SNAPSHOT_VERSION};
