// File: crates/lumen-core/src/surface.rs
// Summary: Skia raster viewports (y-up or screen oriented), upright text and PNG output; named-canvas pages.

use std::path::Path;

use indexmap::map::Entry;
use indexmap::IndexMap;
use skia_safe as skia;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::text::{Label, TextShaper};
use crate::types::default_padding;

/// Where the origin sits and which way Y grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Origin bottom-left, Y up. Data coordinates increase upward.
    YUp,
    /// Origin top-left, Y down.
    Screen,
}

/// A CPU raster surface plus the text shaper used for its labels.
pub struct Viewport {
    surface: skia::Surface,
    width: i32,
    height: i32,
    orientation: Orientation,
    text: TextShaper,
}

impl Viewport {
    /// Y-up viewport: the canvas is translated to the bottom edge and flipped.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let mut vp = Self::allocate(width, height, Orientation::YUp)?;
        let canvas = vp.surface.canvas();
        canvas.translate((0.0, height as f32));
        canvas.scale((1.0, -1.0));
        Ok(vp)
    }

    /// Screen-oriented viewport, used by the tree and flower layers.
    pub fn screen(width: i32, height: i32) -> Result<Self> {
        Self::allocate(width, height, Orientation::Screen)
    }

    fn allocate(width: i32, height: i32, orientation: Orientation) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidSurfaceSize { width, height });
        }
        let surface = skia::surfaces::raster_n32_premul((width, height)).ok_or(Error::Surface)?;
        debug!(width, height, ?orientation, "viewport created");
        Ok(Self { surface, width, height, orientation, text: TextShaper::new() })
    }

    pub fn canvas(&mut self) -> &skia::Canvas {
        self.surface.canvas()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// 2% of the width.
    pub fn default_padding(&self) -> f64 {
        default_padding(self.width)
    }

    pub fn text_shaper(&self) -> &TextShaper {
        &self.text
    }

    /// Erase every pixel to transparent.
    pub fn clear(&mut self) {
        self.surface.canvas().clear(skia::Color::TRANSPARENT);
    }

    pub fn fill_background(&mut self, color: skia::Color) {
        self.surface.canvas().clear(color);
    }

    /// Convert a pointer position (origin top-left) into this viewport's
    /// drawing coordinates.
    pub fn pointer_to_surface(&self, x: f64, y: f64) -> Point {
        match self.orientation {
            Orientation::YUp => Point::new(x, self.height as f64 - y),
            Orientation::Screen => Point::new(x, y),
        }
    }

    /// Draw `text` upright at `(x, y)` with its vertical middle on `y`.
    ///
    /// On a y-up viewport the text is counter-flipped locally; `label.angle`
    /// rotates counter-clockwise as seen on screen.
    pub fn draw_text(&mut self, text: &str, x: f64, y: f64, label: &Label) {
        let flip = self.orientation == Orientation::YUp;
        let canvas = self.surface.canvas();
        canvas.save();
        canvas.translate((x as f32, y as f32));
        if flip {
            canvas.scale((1.0, -1.0));
        }
        if label.angle != 0.0 {
            canvas.rotate(-label.angle, None);
        }
        self.text.draw_at_origin(canvas, text, label);
        canvas.restore();
    }

    /// Encode the current pixels as PNG.
    pub fn to_png_bytes(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(Error::Encode)?;
        Ok(data.as_bytes().to_vec())
    }

    pub fn write_png(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_png_bytes()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        debug!(path = %path.display(), "wrote PNG");
        Ok(())
    }
}

/// A set of viewports addressed by id, like the canvases of one page.
#[derive(Default)]
pub struct Page {
    canvases: IndexMap<String, Viewport>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a y-up viewport under `id`, replacing any previous one.
    pub fn init_viewport(&mut self, id: impl Into<String>, width: i32, height: i32) -> Result<&mut Viewport> {
        let vp = Viewport::new(width, height)?;
        Ok(self.insert(id, vp))
    }

    pub fn insert(&mut self, id: impl Into<String>, viewport: Viewport) -> &mut Viewport {
        match self.canvases.entry(id.into()) {
            Entry::Occupied(mut slot) => {
                slot.insert(viewport);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(viewport),
        }
    }

    pub fn canvas(&self, id: &str) -> Result<&Viewport> {
        self.canvases.get(id).ok_or_else(|| Error::CanvasNotFound { id: id.to_string() })
    }

    pub fn canvas_mut(&mut self, id: &str) -> Result<&mut Viewport> {
        self.canvases.get_mut(id).ok_or_else(|| Error::CanvasNotFound { id: id.to_string() })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.canvases.keys().map(String::as_str)
    }

    /// Write every canvas to `<dir>/<id>.png`.
    pub fn write_all(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        for (id, vp) in self.canvases.iter_mut() {
            vp.write_png(dir.join(format!("{id}.png")))?;
        }
        Ok(())
    }
}
