pub mod definition;
pub mod errors;
pub mod params;
pub mod transform;
pub mod variation;
