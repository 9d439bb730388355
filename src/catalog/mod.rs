mod error;
mod filter;
mod loader;
mod types;

pub use error::CatalogError;
pub use filter::CatalogFilter;
pub use loader::{parse_catalog, parse_dec, parse_ra, read_catalog, to_astro_objects};
pub use types::CatalogRow;
