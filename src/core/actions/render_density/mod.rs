pub mod render_density;
pub mod render_density_parallel_rayon;
