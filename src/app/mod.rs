pub mod camera;
pub mod display;
pub mod setup;

pub use camera::follow_camera;
pub use display::{present_mode_for, sync_window_settings};
pub use setup::setup;
