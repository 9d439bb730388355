pub mod error;
pub mod visibility;
