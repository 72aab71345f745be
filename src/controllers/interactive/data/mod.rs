pub mod frame_data;
pub mod options;
pub mod session_edit;
