use crate::error::RenderError;
use crate::geometry::Point;

/// Colour and size of a drawn primitive.
///
/// For boxes `size` is the outline width in pixels, for points the marker
/// radius in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerStyle {
    pub color: (u8, u8, u8),
    pub size: u32,
}

/// Outline style of node boxes.
pub const BOX_STYLE: MarkerStyle = MarkerStyle { color: (0, 0, 255), size: 1 };

/// Marker style of stored points.
pub const POINT_STYLE: MarkerStyle = MarkerStyle { color: (255, 0, 0), size: 2 };

/// A 3D drawing surface the tree renderer emits primitives into.
pub trait Canvas {
    /// Draws the outline of a box given by its six faces. Faces are not filled,
    /// so nested boxes stay visible.
    fn draw_box(&mut self, faces: &[[Point; 4]; 6], style: &MarkerStyle) -> Result<(), RenderError>;

    /// Draws a single point marker.
    fn draw_point(&mut self, point: &Point, style: &MarkerStyle) -> Result<(), RenderError>;
}

/// A primitive captured by [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Box { faces: [[Point; 4]; 6], style: MarkerStyle },
    Point { point: Point, style: MarkerStyle },
}

/// A canvas that keeps every primitive in memory instead of drawing it.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub primitives: Vec<Primitive>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxes(&self) -> impl Iterator<Item = &[[Point; 4]; 6]> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Box { faces, .. } => Some(faces),
            _ => None,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Point { point, .. } => Some(point),
            _ => None,
        })
    }

    pub fn count_boxes(&self) -> usize {
        self.boxes().count()
    }

    pub fn count_points(&self) -> usize {
        self.points().count()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_box(&mut self, faces: &[[Point; 4]; 6], style: &MarkerStyle) -> Result<(), RenderError> {
        self.primitives.push(Primitive::Box { faces: *faces, style: *style });
        Ok(())
    }

    fn draw_point(&mut self, point: &Point, style: &MarkerStyle) -> Result<(), RenderError> {
        self.primitives.push(Primitive::Point { point: *point, style: *style });
        Ok(())
    }
}
