//! # octoplot
//!
//! `octoplot` renders a serialized octree: one wireframe box per node and one
//! marker per stored point, drawn into a 3D plot and saved as a PNG image.
//!
//! ## Features
//!
//! - **Loading**: reads the JSON node format (`boundary`, `points`, `divided`
//!   and the eight octant children `fne` … `bsw`), with `null` as the empty tree.
//! - **Rendering**: an iterative walk that emits primitives into any [`Canvas`],
//!   collecting the visited points for reporting.
//! - **Plotting**: a `plotters` canvas with fixed axis limits, background and
//!   dpi, written out as PNG.
//!
//! ## Main Interface
//!
//! [`load_tree`] reads a file, [`render`] walks a tree onto a [`Canvas`] and
//! [`plot_tree`] does both steps for an image on disk.
//!
//! ```
//! use octoplot::{parse_tree, render, RecordingCanvas};
//!
//! let text = r#"{"boundary":{"center":{"x":0,"y":0,"z":0},"half_size":10},
//!                "points":[{"x":1,"y":1,"z":1}],"divided":false}"#;
//! let tree = parse_tree(text).unwrap();
//!
//! let mut canvas = RecordingCanvas::new();
//! let mut visited = Vec::new();
//! render(tree.as_ref(), &mut canvas, &mut visited).unwrap();
//!
//! assert_eq!(canvas.count_boxes(), 1);
//! assert_eq!(visited.len(), 1);
//! ```

mod canvas;
mod display;
mod error;
mod geometry;
mod loader;
mod node;
mod plot;
mod render;

pub use canvas::Canvas;
pub use canvas::MarkerStyle;
pub use canvas::Primitive;
pub use canvas::RecordingCanvas;
pub use canvas::BOX_STYLE;
pub use canvas::POINT_STYLE;
pub use display::open_image;
pub use error::RenderError;
pub use geometry::Boundary;
pub use geometry::Point;
pub use geometry::FACE_BACK;
pub use geometry::FACE_BOTTOM;
pub use geometry::FACE_CORNERS;
pub use geometry::FACE_FRONT;
pub use geometry::FACE_LEFT;
pub use geometry::FACE_RIGHT;
pub use geometry::FACE_TOP;
pub use loader::load_tree;
pub use loader::parse_tree;
pub use node::Octant;
pub use node::TreeNode;
pub use node::TreeStats;
pub use plot::draw_tree;
pub use plot::plot_tree;
pub use plot::PlotSettings;
pub use plot::PlottersCanvas;
pub use plot::DEFAULT_BACKGROUND;
pub use plot::DEFAULT_DPI;
pub use plot::DEFAULT_LIMIT;
pub use plot::DEFAULT_OUTPUT;
pub use render::render;
pub use render::render_until;
