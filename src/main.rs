use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::prelude::*;

use huepick::{identify, load_palette, AppState, DisplayImage, Palette, ViewConfig};

/// Name the color under a point of an image
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Reference palette CSV (display_name, common_name, hex, R, G, B; no header)
    #[arg(long, env = "HUEPICK_PALETTE", default_value = "colors.csv", global = true)]
    palette: PathBuf,

    /// Folder holding the default and imported images
    #[arg(long, env = "HUEPICK_IMAGES", default_value = "images", global = true)]
    images: PathBuf,

    /// Image shown when none is chosen, relative to the image folder
    #[arg(long, env = "HUEPICK_DEFAULT_IMAGE", default_value = "living_room.jpeg", global = true)]
    default_image: String,

    /// Display width the image is stretched to before sampling
    #[arg(long, default_value_t = 800, global = true)]
    width: u32,

    /// Display height the image is stretched to before sampling
    #[arg(long, default_value_t = 500, global = true)]
    height: u32,

    /// Sample the image at its own resolution instead of the display size
    #[arg(long, global = true)]
    native: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Name the color at display coordinate (X, Y)
    Pick {
        x: u32,
        y: u32,

        /// Image name in the image folder, or a path to any image
        #[arg(long)]
        image: Option<String>,

        /// Also list the runner-up names, up to this many results in total
        #[arg(short = 'k', long, default_value_t = 1)]
        alternatives: usize,
    },
    /// Name an RGB triple directly; out-of-range values are clamped
    Rgb {
        #[arg(allow_negative_numbers = true)]
        r: i32,
        #[arg(allow_negative_numbers = true)]
        g: i32,
        #[arg(allow_negative_numbers = true)]
        b: i32,
    },
    /// List the images available in the image folder
    Images,
    /// Add an image to the list
    Import {
        file: PathBuf,

        /// Keep a copy in the image folder
        #[arg(long)]
        save: bool,
    },
}

impl Args {
    fn view_config(&self) -> ViewConfig {
        if self.native {
            ViewConfig::native()
        } else {
            ViewConfig::new().display_size(self.width, self.height)
        }
    }

    fn palette(&self) -> Result<Palette> {
        let palette = load_palette(&self.palette)
            .with_context(|| format!("failed to load palette {}", self.palette.display()))?;
        info!(colors = palette.len(), "palette loaded");
        Ok(palette)
    }

    fn app_state(&self) -> Result<AppState> {
        AppState::open(&self.images, &self.default_image).context("failed to open image folder")
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huepick=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &args.command {
        Command::Pick {
            x,
            y,
            image,
            alternatives,
        } => {
            // Load the palette first: a bad palette is fatal before any lookup.
            let palette = args.palette()?;
            let mut state = args.app_state()?;
            if let Some(image) = image {
                state.choose(image)?;
            }

            let path = state.current_image();
            let display = DisplayImage::open(path, args.view_config())
                .with_context(|| format!("failed to open image {}", path.display()))?;
            let found = identify(&palette, &display, *x, *y)?;

            let p = found.pixel;
            println!("Color: {}", found.color.name());
            println!("RGB: {}, {}, {}", p.r, p.g, p.b);
            println!("HEX: {}", found.color.hex());

            for idx in palette
                .k_nearest(p.r.into(), p.g.into(), p.b.into(), *alternatives)
                .into_iter()
                .skip(1)
            {
                if let Some(entry) = palette.get(idx) {
                    let d = palette.distance(p.r.into(), p.g.into(), p.b.into(), idx).unwrap_or(0.0);
                    println!("Also close: {} ({}, distance {:.1})", entry.common_name(), entry.hex(), d);
                }
            }
        }
        Command::Rgb { r, g, b } => {
            let palette = args.palette()?;
            let found = palette.nearest(*r, *g, *b);
            println!("Color: {}", found.name());
            println!("HEX: {}", found.hex());
        }
        Command::Images => {
            let state = args.app_state()?;
            for name in state.list_images()? {
                println!("{name}");
            }
        }
        Command::Import { file, save } => {
            let mut state = args.app_state()?;
            let name = state
                .import(file, *save)
                .with_context(|| format!("failed to import {}", file.display()))?;
            if *save {
                println!("Stored {name} in {}", state.image_folder().display());
            } else {
                println!("Using {name} for this run only; pass --save to keep it");
            }
        }
    }

    Ok(())
}
