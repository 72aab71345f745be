mod controllers;
pub mod core;
mod presenters;
mod storage;

pub use controllers::cli::CliRenderController;
pub use controllers::interactive::errors::options::FlameOptionsError;
pub use controllers::interactive::errors::session::SessionError;
pub use controllers::interactive::{
    FlameController, FlameOptions, FlamePresenterPort, FrameData, PassJob, RenderEvent, Session,
    SessionEdit, TickDecision, TickScheduler,
};
pub use controllers::ports::file_presenter::FilePresenterPort;
pub use presenters::file::ppm::PpmFilePresenter;
pub use storage::cmap_file_source::FileColourMapSource;
