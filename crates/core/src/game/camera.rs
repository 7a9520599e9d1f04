use super::*;

impl Game {
    /// Centers the view on the player, clamped so it never leaves the world's pixel extent.
    pub(super) fn follow_camera(&mut self) {
        let Some(world) = self.catalog.world(&self.state.active_world) else {
            return;
        };
        let bounds = world.pixel_bounds();
        let center = self.state.player.center();
        let camera = &mut self.state.camera;
        camera.x = (center.x - camera.width / 2.0).min(bounds.width - camera.width).max(0.0);
        camera.y = (center.y - camera.height / 2.0).min(bounds.height - camera.height).max(0.0);
    }
}
