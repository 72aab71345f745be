use crate::controllers::interactive::data::frame_data::FrameData;

#[derive(Debug)]
pub enum RenderEvent {
    Frame(FrameData),
    /// A requested palette is now active; `generation` is the buffer
    /// generation it started.
    ColourMapLoaded { name: String, generation: u64 },
    /// A requested palette could not be loaded; the previous one stays active.
    ColourMapLoadFailed { name: String, message: String },
}
