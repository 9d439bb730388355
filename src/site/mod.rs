mod error;
mod obstruction;
pub(crate) mod types;

pub use error::SiteError;
pub use obstruction::{MAX_OBSERVABLE_ALTITUDE_DEG, MIN_OBSERVABLE_ALTITUDE_DEG};
pub use types::SiteConfig;
