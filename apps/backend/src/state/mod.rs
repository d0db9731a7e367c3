pub mod app_state;
pub mod status_directory;
