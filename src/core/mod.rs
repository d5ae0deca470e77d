pub mod hotkey;
pub mod input;
pub mod window;
pub mod worker;
