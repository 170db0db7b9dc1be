//! `pathcontour`: an arc-length parameterized contour core for a 2D
//! vector-graphics path engine.
//!
//! A [`path::Path`] is an ordered list of [`contour::Contour`]s. Each
//! contour variant (an arbitrary curve chain, an axis-aligned rectangle,
//! a rounded rectangle, or a circular arc) implements
//! [`contour::ContourContract`]: enumerate as curve operations, measure
//! arc length, evaluate position/tangent/curvature at a distance along
//! the contour, find the closest point to a query, extract a
//! sub-contour, and test a point's winding number.
//!
//! Distance-based queries go through a two-step protocol:
//! [`contour::ContourContract::init_measure`] builds a
//! [`measure::MeasureHandle`] once (amortizing any adaptive flattening
//! work), which is then passed to repeated `point`/`curvature`/
//! `closest_point`/`add_segment`/`winding` calls.

pub mod builder;
pub mod contour;
pub mod curve;
pub mod flatten;
pub mod line_segment;
pub mod measure;
pub mod path;
pub mod printer;
pub mod rect;
pub mod util;
pub mod vector;

pub use contour::{ClosestPoint, Contour, ContourContract, Direction, PathFlags};
pub use contour::circle::CircleContour;
pub use contour::rect::RectContour;
pub use contour::rounded_rect::RoundedRectContour;
pub use contour::standard::StandardContour;
pub use curve::{CurveKind, CurveOp};
pub use measure::{MeasureHandle, MeasureRecord, MeasureTable};
pub use path::Path;
pub use rect::RectF;
pub use vector::{vec2f, Vector2F};
