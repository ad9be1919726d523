//! Screen-space culling and pointer-drag camera state.
//!
//! A cell at `(x, y)` is drawn at `(x * tile_width + offset.x, y * tile_width + offset.y)`
//! and is visible when that position lies strictly inside
//! `(-tile_width, screen_width) × (-tile_width, screen_height)`.
use crate::classify::Color;

/// Pixel offset applied to every cell position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One visible cell and where its top-left corner lands on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawTile {
    pub grid_x: usize,
    pub grid_y: usize,
    pub screen_x: f64,
    pub screen_y: f64,
}

/// Lazy scan over a `size × size` grid yielding the cells that land on screen.
///
/// Cloning restarts the scan from the current position; a fresh iterator from
/// [`VisibleTiles::new`] always starts at cell `(0, 0)`.
#[derive(Debug, Clone)]
pub struct VisibleTiles {
    size: usize,
    tile_width: f64,
    offset: Offset,
    screen_width: f64,
    screen_height: f64,
    next: usize,
}

impl VisibleTiles {
    pub fn new(size: usize, tile_width: f64, offset: Offset, screen_width: f64, screen_height: f64) -> Self {
        Self { size, tile_width, offset, screen_width, screen_height, next: 0 }
    }

    fn on_screen(&self, pos: f64, extent: f64) -> bool {
        pos > -self.tile_width && pos < extent
    }
}

impl Iterator for VisibleTiles {
    type Item = DrawTile;

    fn next(&mut self) -> Option<DrawTile> {
        while self.next < self.size * self.size {
            let grid_x = self.next / self.size;
            let grid_y = self.next % self.size;
            self.next += 1;

            let screen_x = grid_x as f64 * self.tile_width + self.offset.x;
            let screen_y = grid_y as f64 * self.tile_width + self.offset.y;
            if self.on_screen(screen_x, self.screen_width) && self.on_screen(screen_y, self.screen_height) {
                return Some(DrawTile { grid_x, grid_y, screen_x, screen_y });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.size * self.size - self.next))
    }
}

/// Rectangle-fill target driven by [`Map::draw`](crate::map::Map::draw).
pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, size: f64, color: Color);
}

/// Pan state owned by the render loop.
///
/// Pointer positions only move the camera while a button is held; the first
/// move after a press with no known previous position is absorbed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Camera {
    pub offset: Offset,
    dragging: bool,
    last_pointer: Option<(f64, f64)>,
}

impl Camera {
    pub fn new(offset: Offset) -> Self {
        Self { offset, ..Self::default() }
    }

    /// Initial framing: offset by minus half the screen, floored.
    pub fn centered(screen_width: f64, screen_height: f64) -> Self {
        Self::new(Offset::new((-screen_width / 2.0).floor(), (-screen_height / 2.0).floor()))
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer_down(&mut self) {
        self.dragging = true;
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Pointer left the drawing surface.
    pub fn pointer_leave(&mut self) {
        self.dragging = false;
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let prev = self.last_pointer.replace((x, y));
        if let (true, Some((px, py))) = (self.dragging, prev) {
            self.pan(x - px, y - py);
        }
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_visible_far_cell_excluded() {
        let tiles: Vec<_> = VisibleTiles::new(17, 6.0, Offset::default(), 800.0, 600.0).collect();
        assert_eq!(
            tiles[0],
            DrawTile { grid_x: 0, grid_y: 0, screen_x: 0.0, screen_y: 0.0 }
        );
        assert!(!tiles.iter().any(|t| t.grid_x == 1000 && t.grid_y == 1000));
        // 17 × 6 = 102 px fits on an 800 × 600 screen.
        assert_eq!(tiles.len(), 17 * 17);
    }

    #[test]
    fn margin_of_one_tile_on_negative_side() {
        // Cell 0 at -6 is excluded, cell 1 at 0 is kept.
        let tiles: Vec<_> = VisibleTiles::new(5, 6.0, Offset::new(-6.0, 0.0), 100.0, 100.0).collect();
        assert!(tiles.iter().all(|t| t.grid_x >= 1));
        // Cell 0 at -5.5 is partially on screen.
        let tiles: Vec<_> = VisibleTiles::new(5, 6.0, Offset::new(-5.5, 0.0), 100.0, 100.0).collect();
        assert!(tiles.iter().any(|t| t.grid_x == 0));
    }

    #[test]
    fn right_and_bottom_edges_are_exclusive() {
        // 4 cells × 10 px; screen 20 px wide: x positions 0, 10 kept; 20, 30 culled.
        let tiles: Vec<_> = VisibleTiles::new(4, 10.0, Offset::default(), 20.0, 15.0).collect();
        assert!(tiles.iter().all(|t| t.screen_x < 20.0 && t.screen_y < 15.0));
        assert_eq!(tiles.len(), 2 * 2);
    }

    #[test]
    fn offset_shifts_screen_positions() {
        let tile = VisibleTiles::new(9, 6.0, Offset::new(13.0, -4.0), 800.0, 600.0)
            .find(|t| t.grid_x == 2 && t.grid_y == 3)
            .unwrap();
        assert_eq!((tile.screen_x, tile.screen_y), (25.0, 14.0));
    }

    #[test]
    fn offscreen_camera_yields_nothing() {
        let mut tiles = VisibleTiles::new(9, 6.0, Offset::new(5000.0, 0.0), 800.0, 600.0);
        assert!(tiles.next().is_none());
    }

    #[test]
    fn clone_restarts_from_same_position() {
        let tiles = VisibleTiles::new(9, 6.0, Offset::default(), 30.0, 30.0);
        let first: Vec<_> = tiles.clone().collect();
        let second: Vec<_> = tiles.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn centered_camera_floors_half_screen() {
        let cam = Camera::centered(801.0, 600.0);
        assert_eq!(cam.offset, Offset::new(-401.0, -300.0));
    }

    #[test]
    fn drag_pans_only_while_pressed() {
        let mut cam = Camera::default();
        cam.pointer_move(10.0, 10.0);
        cam.pointer_move(20.0, 15.0);
        assert_eq!(cam.offset, Offset::default());

        cam.pointer_down();
        cam.pointer_move(25.0, 5.0);
        assert_eq!(cam.offset, Offset::new(5.0, -10.0));

        cam.pointer_leave();
        assert!(!cam.is_dragging());
        cam.pointer_move(100.0, 100.0);
        assert_eq!(cam.offset, Offset::new(5.0, -10.0));
    }

    #[test]
    fn first_move_after_press_without_history_is_absorbed() {
        let mut cam = Camera::default();
        cam.pointer_down();
        cam.pointer_move(50.0, 50.0);
        assert_eq!(cam.offset, Offset::default());
        cam.pointer_move(52.0, 49.0);
        assert_eq!(cam.offset, Offset::new(2.0, -1.0));
        cam.pointer_up();
    }
}
