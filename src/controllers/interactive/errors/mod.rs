pub mod options;
pub mod session;
