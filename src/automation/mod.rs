pub mod context;
pub mod detection;
pub mod interaction;
