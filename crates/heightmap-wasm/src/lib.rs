use heightmap_core::{Camera, Color, GenerationKind, Map, MapConfig, MapState, SeededRng, Surface};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Floats per rectangle in a frame buffer: x, y, size, r, g, b.
pub const RECT_STRIDE: usize = 6;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(s: &str);
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

static CONSOLE: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{} {}] {}", record.level(), record.target(), record.args());
        if record.level() <= Level::Warn {
            console_warn(&line);
        } else {
            console_log(&line);
        }
    }

    fn flush(&self) {}
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second module instance finds the logger already installed.
    if log::set_logger(&CONSOLE).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Browser-side viewer: a map, its camera and the random source that feeds
/// every regeneration.
#[wasm_bindgen]
pub struct Viewer {
    map: Map,
    camera: Camera,
    rng: SeededRng,
}

#[derive(Serialize)]
struct Summary {
    kind: Option<GenerationKind>,
    size: usize,
    /// Decimal string: seeds may exceed JS's safe integer range.
    seed: String,
    min_height: f64,
    max_height: f64,
}

#[wasm_bindgen]
impl Viewer {
    /// Build and generate a map from a `MapConfig`-shaped object
    /// (`undefined` for defaults), framed for the given screen size.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, screen_width: f64, screen_height: f64) -> Result<Viewer, JsValue> {
        let config: MapConfig = if config.is_undefined() || config.is_null() {
            MapConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let seed = config.seed.unwrap_or_else(browser_seed);
        let mut map = Map::from_config(&config).map_err(to_js)?;
        let mut rng = SeededRng::new(seed);
        map.generate(config.kind, &mut rng);
        log::info!("viewer ready: seed {seed}, {} cells per side", map.size());

        Ok(Viewer { map, camera: Camera::centered(screen_width, screen_height), rng })
    }

    /// Regenerate the whole map. `kind` is `"diamond-square"` or
    /// `"gradient-noise"` (`"perlin-noise"` is accepted too).
    pub fn generate(&mut self, kind: &str) -> Result<(), JsValue> {
        self.map.generate_named(kind, &mut self.rng).map_err(to_js)
    }

    pub fn pointer_down(&mut self) {
        self.camera.pointer_down();
    }

    pub fn pointer_up(&mut self) {
        self.camera.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.camera.pointer_leave();
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.camera.pointer_move(x, y);
    }

    /// Rectangles for one frame, `RECT_STRIDE` floats each.
    pub fn frame(&self, screen_width: f64, screen_height: f64) -> js_sys::Float32Array {
        let mut buf = FrameBuffer::default();
        self.map.draw(&mut buf, self.camera.offset, screen_width, screen_height);
        js_sys::Float32Array::from(buf.data.as_slice())
    }

    /// `#rrggbb` fill style of one cell.
    pub fn color_of(&self, grid_x: usize, grid_y: usize) -> String {
        self.map.color_of(grid_x, grid_y).hex()
    }

    pub fn size(&self) -> usize {
        self.map.size()
    }

    pub fn tile_width(&self) -> f64 {
        self.map.tile_width()
    }

    /// Kind, size, seed and height range of the current map.
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        let grid = self.map.grid();
        let summary = Summary {
            kind: match self.map.state() {
                MapState::Unset => None,
                MapState::Generated(kind) => Some(kind),
            },
            size: grid.size(),
            seed: self.rng.seed().to_string(),
            min_height: grid.min_height(),
            max_height: grid.max_height(),
        };
        Ok(serde_wasm_bindgen::to_value(&summary)?)
    }
}

/// Flat `[x, y, size, r, g, b]` rectangle list.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    pub data: Vec<f32>,
}

impl FrameBuffer {
    pub fn rects(&self) -> usize {
        self.data.len() / RECT_STRIDE
    }
}

impl Surface for FrameBuffer {
    fn fill_rect(&mut self, x: f64, y: f64, size: f64, color: Color) {
        let [r, g, b] = color.to_array();
        self.data.extend_from_slice(&[x as f32, y as f32, size as f32, r as f32, g as f32, b as f32]);
    }
}

fn browser_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use heightmap_core::Offset;

    #[test]
    fn frame_buffer_packs_six_floats_per_rect() {
        let mut map = Map::new(3, 6.0).unwrap();
        map.generate(GenerationKind::DiamondSquare, &mut SeededRng::new(4));
        let mut buf = FrameBuffer::default();
        let drawn = map.draw(&mut buf, Offset::default(), 800.0, 600.0);
        assert_eq!(buf.rects(), drawn);
        assert_eq!(buf.data.len(), drawn * RECT_STRIDE);

        let c = map.color_of(0, 0);
        assert_eq!(&buf.data[..RECT_STRIDE], &[0.0, 0.0, 6.0, c.r as f32, c.g as f32, c.b as f32]);
    }
}
