pub mod accumulate_samples;
pub mod accumulate_samples_parallel_rayon;
