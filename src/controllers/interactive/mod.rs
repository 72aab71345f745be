//! Interactive controller for progressive flame rendering.
//!
//! This module provides the application layer that owns a flame session,
//! drives its tick cadence and dispatches frames to the presentation layer.
//!
//! # Architecture
//!
//! The interactive controller follows the ports & adapters pattern:
//! - **Input**: `SessionEdit`s from the configuration surface, palette names
//! - **Output**: `FlamePresenterPort` receiving `RenderEvent`s
//! - **Core**: Uses domain actions from `core/` for actual computation

mod controller;
pub mod data;
pub mod errors;
pub mod events;
pub mod ports;
pub mod scheduler;
pub mod session;

pub use controller::FlameController;
pub use data::frame_data::FrameData;
pub use data::options::FlameOptions;
pub use data::session_edit::SessionEdit;
pub use events::render::RenderEvent;
pub use ports::presenter::FlamePresenterPort;
pub use scheduler::{TickDecision, TickScheduler};
pub use session::{PassJob, Session};
