//! AABB-versus-tile collision. A body is blocked when any tile it covers is solid or lies
//! outside the grid.

use crate::types::{Rect, TilePos};

use super::store::TileStore;

/// Inclusive tile range covered by `body`.
pub fn covered_tiles(tile_size: u32, body: Rect) -> (TilePos, TilePos) {
    let ts = tile_size as f32;
    let start = TilePos { y: (body.y / ts).floor() as i32, x: (body.x / ts).floor() as i32 };
    let end = TilePos {
        y: ((body.y + body.height - 1.0) / ts).floor() as i32,
        x: ((body.x + body.width - 1.0) / ts).floor() as i32,
    };
    (start, TilePos { y: end.y.max(start.y), x: end.x.max(start.x) })
}

pub fn check_collision(store: &TileStore, body: Rect) -> bool {
    let (start, end) = covered_tiles(store.tile_size(), body);
    for y in start.y..=end.y {
        for x in start.x..=end.x {
            if store.is_solid(TilePos { y, x }) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> TileStore {
        TileStore::from_pattern(&["....", "..#.", "...."], 32)
    }

    #[test]
    fn far_edge_stops_one_pixel_short() {
        let (start, end) = covered_tiles(32, Rect::new(32.0, 0.0, 32.0, 32.0));
        assert_eq!((start.x, end.x), (1, 1));
        assert_eq!((start.y, end.y), (0, 0));

        let (_, end) = covered_tiles(32, Rect::new(33.0, 0.0, 32.0, 32.0));
        assert_eq!(end.x, 2);
    }

    #[test]
    fn touching_a_wall_is_clear_overlapping_it_is_blocked() {
        let store = strip();
        assert!(!check_collision(&store, Rect::new(32.0, 32.0, 32.0, 32.0)));
        assert!(check_collision(&store, Rect::new(33.0, 32.0, 32.0, 32.0)));
        assert!(check_collision(&store, Rect::new(70.0, 40.0, 4.0, 4.0)));
    }

    #[test]
    fn any_coverage_outside_the_grid_is_blocked() {
        let store = strip();
        assert!(check_collision(&store, Rect::new(-1.0, 0.0, 10.0, 10.0)));
        assert!(check_collision(&store, Rect::new(0.0, -0.5, 10.0, 10.0)));
        assert!(check_collision(&store, Rect::new(100.0, 0.0, 30.0, 10.0)));
        assert!(check_collision(&store, Rect::new(0.0, 90.0, 10.0, 10.0)));
        assert!(check_collision(&store, Rect::new(500.0, 500.0, 10.0, 10.0)));
        assert!(!check_collision(&store, Rect::new(96.0, 64.0, 32.0, 32.0)));
    }

    #[test]
    fn repeated_queries_agree() {
        let store = strip();
        for step in 0..40 {
            let body = Rect::new(step as f32 * 3.5 - 10.0, step as f32 * 2.0 - 5.0, 24.0, 24.0);
            let first = check_collision(&store, body);
            assert!((0..3).all(|_| check_collision(&store, body) == first), "{body:?}");
        }
    }
}
