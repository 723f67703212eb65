//! Static catalog data: record types, network source, on-disk cache and the
//! loaded snapshot used by the analyzer.

pub mod cache;
pub mod catalog;
pub mod champion;
pub mod equipment;
pub mod fetch;

pub use cache::{CatalogCache, DEFAULT_CACHE_DIR, FALLBACK_VERSION, LATEST_VERSION};
pub use catalog::{normalize_lookup_key, Catalog};
pub use champion::{EntityRecord, RoleTag};
pub use equipment::{EquipmentRecord, OptionTree, SpellRecord};
pub use fetch::{CatalogSource, HttpCatalogSource, RetryPolicy, DEFAULT_CATALOG_BASE_URL};
