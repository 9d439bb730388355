mod angles;
mod coordinates;
mod time;
mod transform;

pub use angles::normalize_degrees;
pub use coordinates::{AstroObject, Declination, EquatorialCoordinate, Position, RightAscension};
pub use transform::{equatorial_to_horizontal, hour_angle_to_horizontal, HorizontalCoordinate};
