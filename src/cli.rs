// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::SurfaceConfig;
use crate::core::Pixel;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pixel-surface")]
#[command(about = "Pixel buffer window with a text overlay", long_about = None)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Window title
    #[arg(long)]
    pub title: Option<String>,

    /// Pixel buffer width
    #[arg(long)]
    pub width: Option<u32>,

    /// Pixel buffer height
    #[arg(long)]
    pub height: Option<u32>,

    /// Font specification, e.g. "DejaVu Sans" or "monospace:bold"
    #[arg(long)]
    pub font: Option<String>,

    /// Label character size in pixels
    #[arg(long = "font-size")]
    pub font_size: Option<u32>,

    /// Label color: #rrggbb, #rrggbbaa or a color name
    #[arg(long)]
    pub color: Option<Pixel>,
}

impl Cli {
    /// Overlay the flags that were given on top of `config`
    pub fn apply(&self, mut config: SurfaceConfig) -> SurfaceConfig {
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(font) = &self.font {
            config.text.font_name = font.clone();
        }
        if let Some(size) = self.font_size {
            config.text.font_size = size;
        }
        if let Some(color) = self.color {
            config.text.color = color;
        }
        config
    }
}
