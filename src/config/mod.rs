// Configuration: YAML search profiles

pub mod profile;

pub use profile::{ProfileScalar, ProfileValue, SearchProfile};
