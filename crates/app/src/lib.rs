pub mod app_loop;
pub mod launch;
pub mod ui_text;

pub const APP_NAME: &str = "Wayfarer";
