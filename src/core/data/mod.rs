pub mod accumulation_buffers;
pub mod affine;
pub mod colour;
pub mod pixel_buffer;
pub mod point;
pub mod resolution;
