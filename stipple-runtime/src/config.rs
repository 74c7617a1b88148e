use std::path::{Path, PathBuf};

use eyre::{bail, WrapErr};
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::graphics::{Color, BLACK, WHITE};
use crate::layout::{Point, Size};

/// Environment variable naming a config file, used when no path is given on the command line
pub const CONFIG_ENV: &str = "STIPPLE_CONFIG";

/// Everything the painter can be told at startup. Every field is optional in the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub title: String,

    pub window_width: u32,
    pub window_height: u32,
    /// Fills the window around the canvas
    #[serde(with = "hex_color")]
    pub window_color: Color,

    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Output pixels per canvas cell
    pub scale: u32,
    /// When `true`, `canvas_x`/`canvas_y` name the canvas center instead of its top-left corner
    pub center: bool,
    /// Defaults to the window center when centering, otherwise to 0
    pub canvas_x: Option<i32>,
    pub canvas_y: Option<i32>,
    #[serde(with = "hex_color")]
    pub canvas_color: Color,

    #[serde(with = "hex_color")]
    pub paint_color: Color,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Stipple".to_owned(),
            window_width: 800,
            window_height: 600,
            window_color: Color::new(50, 50, 50),
            canvas_width: 790,
            canvas_height: 590,
            scale: 1,
            center: true,
            canvas_x: None,
            canvas_y: None,
            canvas_color: WHITE,
            paint_color: BLACK,
        }
    }
}
impl Config {
    pub fn from_json(text: &str) -> eyre::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(text).wrap_err("deserializing config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> eyre::Result<Self> {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text).wrap_err_with(|| format!("loading config file {}", path.display()))
    }

    /// The config file named by the first argument, or by [`CONFIG_ENV`], if any
    pub fn locate(mut args: impl Iterator<Item = String>) -> Option<PathBuf> {
        args.next()
            .or_else(|| std::env::var(CONFIG_ENV).ok())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }

    /// Loads the located config file, falling back to defaults when there is none
    pub fn from_args(args: impl Iterator<Item = String>) -> eyre::Result<Self> {
        match Self::locate(args) {
            Some(path) => {
                log::info!("loading config from {}", path.display());
                Self::load(&path)
            }
            None => {
                log::debug!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> eyre::Result<()> {
        if self.window_width == 0 || self.window_height == 0 {
            bail!(
                "window size must be non-zero, got {}x{}",
                self.window_width,
                self.window_height
            );
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            bail!(
                "canvas size must be non-zero, got {}x{}",
                self.canvas_width,
                self.canvas_height
            );
        }
        if self.scale == 0 {
            bail!("scale must be at least 1");
        }
        if i32::try_from(self.window_width).is_err() || i32::try_from(self.window_height).is_err() {
            bail!(
                "window size {}x{} is too large",
                self.window_width,
                self.window_height
            );
        }
        let (x, y) = self.anchor();
        for (anchor, extent) in [(x, self.canvas_width), (y, self.canvas_height)] {
            let Some(scaled) = extent
                .checked_mul(self.scale)
                .and_then(|scaled| i32::try_from(scaled).ok())
            else {
                bail!(
                    "canvas {}x{} at scale {} is too large",
                    self.canvas_width,
                    self.canvas_height,
                    self.scale
                );
            };
            let start = match self.center {
                true => i64::from(anchor) - i64::from(scaled / 2),
                false => i64::from(anchor),
            };
            if i32::try_from(start).is_err() || i32::try_from(start + i64::from(scaled)).is_err() {
                bail!("canvas placed at ({x}, {y}) does not fit in output coordinates");
            }
        }
        Ok(())
    }

    pub fn window_size(&self) -> Size {
        Size::new(self.window_width, self.window_height)
    }

    /// A blank canvas placed on the window as configured
    pub fn canvas(&self) -> Canvas {
        let canvas = Canvas::new(self.canvas_width, self.canvas_height, self.canvas_color);
        let (x, y) = self.anchor();
        if self.center {
            canvas
                .with_placement(Point::default(), self.scale)
                .centered_on(Point::new(x, y))
        } else {
            canvas.with_placement(Point::new(x, y), self.scale)
        }
    }

    /// The canvas center when centering, otherwise its top-left corner
    fn anchor(&self) -> (i32, i32) {
        if self.center {
            (
                self.canvas_x.unwrap_or((self.window_width / 2) as i32),
                self.canvas_y.unwrap_or((self.window_height / 2) as i32),
            )
        } else {
            (self.canvas_x.unwrap_or(0), self.canvas_y.unwrap_or(0))
        }
    }
}

/// Colors are written as `#rrggbb` (or `#rgb`) strings
mod hex_color {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::graphics::{parse_hex, Color};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!(
            "#{:02x}{:02x}{:02x}",
            color.red, color.green, color.blue
        ))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let code = String::deserialize(deserializer)?;
        parse_hex(&code).map_err(|report| serde::de::Error::custom(format!("{report:#}")))
    }
}
