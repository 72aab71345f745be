pub mod accumulate_samples;
pub mod cancellation;
pub mod render_density;
