//! Renders one viewer frame to a PNG: generate, cull to the viewport,
//! fill one square per visible cell.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use heightmap_core::{Camera, Color, Map, MapConfig, Offset, SeededRng, Surface};
use image::{Rgb, RgbImage};

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Render a generated heightmap viewport to PNG")]
struct Args {
    /// JSON `MapConfig` file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// diamond-square or gradient-noise; overrides the config.
    #[arg(short, long)]
    kind: Option<String>,

    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Camera offset in pixels; defaults to the viewer's centred framing.
    #[arg(long, allow_hyphen_values = true)]
    offset_x: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    offset_y: Option<f64>,

    #[arg(short, long, default_value = "data/debug/heightmap.png")]
    output: PathBuf,
}

/// Image target clipping rectangles to its bounds.
struct ImageSurface {
    img: RgbImage,
}

impl Surface for ImageSurface {
    fn fill_rect(&mut self, x: f64, y: f64, size: f64, color: Color) {
        let (w, h) = (self.img.width() as f64, self.img.height() as f64);
        let x0 = x.max(0.0).floor() as u32;
        let y0 = y.max(0.0).floor() as u32;
        let x1 = (x + size).min(w).ceil().max(0.0) as u32;
        let y1 = (y + size).min(h).ceil().max(0.0) as u32;
        let px = Rgb(color.to_array());
        for row in y0..y1 {
            for col in x0..x1 {
                self.img.put_pixel(col, row, px);
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            MapConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => MapConfig::default(),
    };
    if let Some(kind) = &args.kind {
        config.kind = kind.parse()?;
    }
    let seed = args.seed.or(config.seed).unwrap_or(42);

    let mut map = Map::from_config(&config)?;
    log::info!("generating {} ({}×{} cells, seed {seed})…", config.kind, map.size(), map.size());
    map.generate(config.kind, &mut SeededRng::new(seed));

    let (sw, sh) = (args.width as f64, args.height as f64);
    let centred = Camera::centered(sw, sh).offset;
    let offset = Offset::new(args.offset_x.unwrap_or(centred.x), args.offset_y.unwrap_or(centred.y));

    let mut surface = ImageSurface { img: RgbImage::new(args.width, args.height) };
    let drawn = map.draw(&mut surface, offset, sw, sh);
    log::info!("drew {drawn} tiles");

    save(&surface.img, &args.output)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}

fn save(img: &RgbImage, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    }
    img.save(path).with_context(|| format!("failed to save {}", path.display()))
}
