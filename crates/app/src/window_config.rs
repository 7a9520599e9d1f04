//! Window configuration for the desktop app.

use macroquad::window::Conf;
use wayfarer_app::APP_NAME;
use wayfarer_core::SimConfig;

pub fn build_window_conf() -> Conf {
    let view = SimConfig::default();
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: view.view_width as i32,
        window_height: view.view_height as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}
