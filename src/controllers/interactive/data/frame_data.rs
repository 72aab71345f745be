use crate::core::actions::accumulate_samples::accumulate_samples::AccumulateStats;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FrameData {
    pub generation: u64,
    pub pixel_buffer: PixelBuffer,
    pub render_duration: Duration,
    /// Samples plotted and discarded by the pass that produced this frame.
    pub stats: AccumulateStats,
}
