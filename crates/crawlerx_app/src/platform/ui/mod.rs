pub mod constants;
pub mod format;
pub mod layout;
pub mod render;
