pub mod app_header;
pub mod batch_runner;
pub mod help;
pub mod log_panel;
pub mod status;
pub mod timing;
