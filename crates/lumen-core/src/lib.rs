// File: crates/lumen-core/src/lib.rs
// Summary: Core library entry point; data loading, value-to-pixel mapping, chart renderers and hover.

pub mod animation;
pub mod axis;
pub mod color;
pub mod data;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod hover;
pub mod plots;
pub mod record;
pub mod scale;
pub mod spline;
pub mod surface;
pub mod text;
pub mod ticks;
pub mod tree;
pub mod types;

pub use animation::{Animation, AnimationHandle, AnimationSession};
pub use axis::{AxesProperties, PixelAxis, TickFormat};
pub use color::{parse_color, ColorEntry, ColorMapping, ColorRole, GradientScale};
pub use data::{load_csv, load_geojson, read_csv};
pub use error::{Error, Result};
pub use geojson::{Feature, FeatureCollection, Geometry};
pub use geometry::{BoundingBox, Point, Projection};
pub use hover::{Hover, InfoOverlay, Tooltip};
pub use record::{Dataset, Record, Value};
pub use scale::{map_value, Extent, LinearScale};
pub use spline::{catmull_rom_closed, catmull_rom_open};
pub use surface::{Orientation, Page, Viewport};
pub use text::{Label, TextShaper};
pub use ticks::{dynamic_interval, tick_values, values_by_interval, IntervalMode, MAX_TICKS};
pub use tree::{FlowerColor, FlowerTally, TreeAnimation, TreeParams, TreeState, TreeTotals};
pub use types::CanvasPoint;
