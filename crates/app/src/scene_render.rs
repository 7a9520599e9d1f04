//! macroquad drawing for one simulation frame.

use macroquad::prelude::*;
use wayfarer_app::ui_text::{dialogue_lines, hud_line, transition_notice};
use wayfarer_core::game::melee_hitbox;
use wayfarer_core::render::{EnemyTint, enemy_look, health_bar_fill};
use wayfarer_core::state::Camera;
use wayfarer_core::world::TileType;
use wayfarer_core::{FrameView, ItemKind, Rect as WorldRect, Renderer, Vec2 as WorldVec};

const HUD_FONT_SIZE: f32 = 20.0;
const HEALTH_BAR_HEIGHT: f32 = 4.0;
const HEALTH_BAR_GAP: f32 = 6.0;
const DIALOGUE_BOX_HEIGHT: f32 = 90.0;
const PORTAL_COLOR: Color = Color { r: 0.55, g: 0.25, b: 0.85, a: 0.55 };

fn tile_color(kind: TileType) -> Color {
    match kind {
        TileType::Grass => Color::from_hex(0x3c_8d_2f),
        TileType::Tree => Color::from_hex(0x1f_4d_1a),
        TileType::Rock => Color::from_hex(0x7a_7a_7a),
        TileType::Water => Color::from_hex(0x2a_6f_c9),
        TileType::Wall => Color::from_hex(0x3a_3a_3a),
        TileType::Path => Color::from_hex(0xb0_8d_57),
        TileType::CaveFloor => Color::from_hex(0x4a_40_36),
        TileType::Cave => Color::from_hex(0x2b_24_1e),
        TileType::Decoration => Color::from_hex(0xd9_b8_d6),
    }
}

fn enemy_color(tint: EnemyTint) -> Color {
    match tint {
        EnemyTint::Flash => WHITE,
        EnemyTint::Chase => Color::from_hex(0xe0_3c_31),
        EnemyTint::Patrol => Color::from_hex(0x9c_27_b0),
        EnemyTint::Dying => Color::from_hex(0x60_60_60),
    }
}

fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::HealthPotion => RED,
        ItemKind::ManaPotion => BLUE,
    }
}

fn fill(camera: &Camera, rect: WorldRect, color: Color) {
    let screen = camera.world_to_screen(WorldVec::new(rect.x, rect.y));
    draw_rectangle(screen.x, screen.y, rect.width, rect.height, color);
}

/// Draws the `FrameView` with flat colors; tiles carry no sprite sheets here.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    pub frames: u64,
}

impl SceneRenderer {
    fn draw_world(&self, frame: &FrameView<'_>) {
        let tile_size = frame.world.tile_size() as f32;
        for tile in frame.visible_tiles() {
            let rect = WorldRect::at(tile.origin, tile_size, tile_size);
            fill(frame.camera, rect, tile_color(tile.base_kind));
            for overlay in &tile.overlays {
                let inset = tile_size * 0.15;
                let inner = WorldRect::new(
                    rect.x + inset,
                    rect.y + inset,
                    tile_size - inset * 2.0,
                    tile_size - inset * 2.0,
                );
                let target = if overlay.kind == TileType::Path { rect } else { inner };
                fill(frame.camera, target, tile_color(overlay.kind));
            }
        }
        for portal in frame.world.portals().iter() {
            if frame.is_visible(portal.rect) {
                fill(frame.camera, portal.rect, PORTAL_COLOR);
            }
        }
    }

    fn draw_actors(&self, frame: &FrameView<'_>) {
        let camera = frame.camera;
        for item in frame.items.values() {
            fill(camera, item.rect(), item_color(item.kind));
        }
        for npc in frame.npcs.values() {
            fill(camera, npc.rect(), GOLD);
            if npc.can_interact && !npc.talking {
                let head = camera.world_to_screen(WorldVec::new(npc.pos.x, npc.pos.y));
                draw_text("E", head.x + npc.width / 2.0 - 4.0, head.y - 4.0, 18.0, WHITE);
            }
        }

        for enemy in frame.enemies.values() {
            let look = enemy_look(enemy);
            let center = enemy.center();
            let (width, height) = (enemy.width * look.scale, enemy.height * look.scale);
            let body = WorldRect::new(center.x - width / 2.0, center.y - height / 2.0, width, height);
            let mut color = enemy_color(look.tint);
            color.a = look.alpha;
            fill(camera, body, color);

            if look.show_health_bar {
                let bar = WorldRect::new(
                    enemy.pos.x,
                    enemy.pos.y - HEALTH_BAR_GAP,
                    enemy.width,
                    HEALTH_BAR_HEIGHT,
                );
                fill(camera, bar, DARKGRAY);
                fill(camera, health_bar_fill(bar, enemy.health_fraction()), GREEN);
            }
        }

        for projectile in frame.projectiles.values() {
            let color = Color::from_hex(projectile.tier.color());
            let trail_len = projectile.trail.len().max(1) as f32;
            for (index, point) in projectile.trail.iter().enumerate() {
                let screen = camera.world_to_screen(*point);
                let fade = (index + 1) as f32 / (trail_len + 1.0);
                let radius = projectile.size / 2.0 * fade;
                draw_circle(screen.x, screen.y, radius, Color { a: 0.5 * fade, ..color });
            }
            let head = camera.world_to_screen(projectile.pos);
            draw_circle(head.x, head.y, projectile.size / 2.0, color);
        }

        let player = frame.player;
        let player_color = if player.flash_ms > 0 { WHITE } else { SKYBLUE };
        fill(camera, player.rect(), player_color);
        if player.attacking {
            let swing = melee_hitbox(player);
            let screen = camera.world_to_screen(WorldVec::new(swing.x, swing.y));
            draw_rectangle_lines(screen.x, screen.y, swing.width, swing.height, 2.0, WHITE);
        }
        if player.charging {
            let bar = WorldRect::new(player.pos.x, player.pos.y + player.height + 2.0, 24.0, 3.0);
            fill(camera, health_bar_fill(bar, player.charge / 100.0), YELLOW);
        }
    }

    fn draw_hud(&self, frame: &FrameView<'_>) {
        let backdrop = Color::new(0.0, 0.0, 0.0, 0.6);
        draw_rectangle(0.0, 0.0, screen_width(), HUD_FONT_SIZE + 8.0, backdrop);
        draw_text(&hud_line(frame), 8.0, HUD_FONT_SIZE, HUD_FONT_SIZE, WHITE);
        if let Some(notice) = transition_notice(frame.transition) {
            draw_text(&notice, 8.0, HUD_FONT_SIZE * 2.2, HUD_FONT_SIZE, LIGHTGRAY);
        }

        if let Some(dialogue) = frame.dialogue {
            let top = screen_height() - DIALOGUE_BOX_HEIGHT - 10.0;
            let width = screen_width() - 20.0;
            draw_rectangle(10.0, top, width, DIALOGUE_BOX_HEIGHT, Color::new(0.0, 0.0, 0.0, 0.8));
            draw_rectangle_lines(10.0, top, width, DIALOGUE_BOX_HEIGHT, 2.0, WHITE);
            let [speaker, text] = dialogue_lines(dialogue);
            draw_text(&speaker, 24.0, top + 28.0, HUD_FONT_SIZE, GOLD);
            draw_text(&text, 24.0, top + 56.0, HUD_FONT_SIZE, WHITE);
        }
    }
}

impl Renderer for SceneRenderer {
    fn draw_frame(&mut self, frame: &FrameView<'_>) {
        clear_background(BLACK);
        self.draw_world(frame);
        self.draw_actors(frame);
        self.draw_hud(frame);
        self.frames += 1;
    }
}
