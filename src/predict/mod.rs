mod error;
mod merge;
mod reachability;
mod types;
mod window_finder;

pub use error::PredictError;
pub use reachability::{object_ever_in_azimuth_window, object_never_visible, quick_check};
pub use types::{QuickCheck, TimeRange, VisibilityInfo, VisibilityWindow};
pub use window_finder::compute_visibility;
