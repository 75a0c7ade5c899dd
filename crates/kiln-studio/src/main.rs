//! Renders the demo scene offscreen and writes it to a PNG.
//!
//! ```text
//! kiln-studio [--out scene.png] [--size 640x480] [--samples 4] [--workers 0] [--log debug]
//! ```
//!
//! `--workers 0` uses every available core.

mod export;
mod scene;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use kiln_raster::logging::{init_logging, LoggingConfig};
use kiln_raster::Workers;

#[derive(Debug)]
struct Options {
    out: PathBuf,
    size: [usize; 2],
    samples: u32,
    workers: Workers,
    log: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            out: PathBuf::from("scene.png"),
            size: [640, 480],
            samples: 4,
            workers: Workers::Auto,
            log: None,
        }
    }
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Option<Self>> {
        let mut options = Options::default();

        while let Some(arg) = args.next() {
            let mut value = |name: &str| args.next().with_context(|| format!("missing value for {name}"));
            match arg.as_str() {
                "--out" => options.out = PathBuf::from(value("--out")?),
                "--size" => options.size = parse_size(&value("--size")?)?,
                "--samples" => {
                    let raw = value("--samples")?;
                    options.samples = raw.parse().with_context(|| format!("invalid sample count {raw:?}"))?;
                }
                "--workers" => {
                    let raw = value("--workers")?;
                    let n: usize = raw.parse().with_context(|| format!("invalid worker count {raw:?}"))?;
                    options.workers = match n {
                        0 => Workers::Auto,
                        1 => Workers::Single,
                        n => Workers::Fixed(n),
                    };
                }
                "--log" => options.log = Some(value("--log")?),
                "--help" | "-h" => return Ok(None),
                other => bail!("unknown argument {other:?} (try --help)"),
            }
        }
        Ok(Some(options))
    }
}

fn parse_size(raw: &str) -> Result<[usize; 2]> {
    let (w, h) = raw.split_once('x').with_context(|| format!("size {raw:?} is not WIDTHxHEIGHT"))?;
    let w: usize = w.parse().with_context(|| format!("invalid width in {raw:?}"))?;
    let h: usize = h.parse().with_context(|| format!("invalid height in {raw:?}"))?;
    if w == 0 || h == 0 {
        bail!("size {raw:?} has a zero extent");
    }
    Ok([w, h])
}

fn print_help() {
    println!("kiln-studio: software-rasterized demo scene");
    println!();
    println!("  --out <path>        output PNG (default scene.png)");
    println!("  --size <w>x<h>      image size in pixels (default 640x480)");
    println!("  --samples <n>       samples per pixel: 1, 2, 4, 8 or 16 (default 4)");
    println!("  --workers <n>       render threads, 0 = all cores (default 0)");
    println!("  --log <filter>      env_logger filter, e.g. kiln_raster=debug");
}

fn main() -> Result<()> {
    let Some(options) = Options::parse(std::env::args().skip(1))? else {
        print_help();
        return Ok(());
    };

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &options.log {
        logging = logging.with_filter(filter.clone());
    }
    init_logging(logging);
    log::debug!("{options:?}");

    let image = scene::render(options.size, options.samples, options.workers)?;
    export::write_png(&options.out, &image)?;

    log::info!("wrote {}x{} image to {}", options.size[0], options.size[1], options.out.display());
    Ok(())
}
