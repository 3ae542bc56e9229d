use crate::canvas::{Canvas, MarkerStyle};
use crate::error::RenderError;
use crate::geometry::Point;
use crate::node::TreeNode;
use crate::render::render_until;
use plotters::coord::ranged3d::Cartesian3d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

/// Default half-width of every axis.
pub const DEFAULT_LIMIT: f64 = 800.0;
/// Default output resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 1200;
/// Default figure size in inches (width, height).
pub const DEFAULT_FIGURE_SIZE: (f64, f64) = (6.4, 4.8);
/// Default background of the figure and the axis panels.
pub const DEFAULT_BACKGROUND: (u8, u8, u8) = (255, 255, 237);
/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "octree_plot.png";

/// Everything that controls how a tree is plotted.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotSettings {
    /// Every axis spans `[-limit, +limit]`, whatever the extent of the tree.
    pub limit: f64,
    pub dpi: u32,
    pub figure_size: (f64, f64),
    pub background: (u8, u8, u8),
    pub output: PathBuf,
    /// Camera rotation around the vertical axis, in radians.
    pub yaw: f64,
    /// Camera elevation, in radians.
    pub pitch: f64,
    /// Draw axis panels, grid and tick labels.
    pub show_axes: bool,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            dpi: DEFAULT_DPI,
            figure_size: DEFAULT_FIGURE_SIZE,
            background: DEFAULT_BACKGROUND,
            output: PathBuf::from(DEFAULT_OUTPUT),
            yaw: 0.5,
            pitch: 0.35,
            show_axes: true,
        }
    }
}

impl PlotSettings {
    pub fn with_limit(limit: f64) -> Self {
        Self { limit, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.limit.is_finite() || self.limit <= 0.0 {
            return Err(RenderError::InvalidSettings(format!(
                "axis limit must be positive and finite, got {}",
                self.limit
            )));
        }
        if self.dpi == 0 {
            return Err(RenderError::InvalidSettings("dpi must be at least 1".into()));
        }
        let (w, h) = self.figure_size;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(RenderError::InvalidSettings(format!(
                "figure size must be positive, got {}x{}",
                w, h
            )));
        }
        Ok(())
    }

    /// Image size in pixels: the figure size scaled by the dpi.
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figure_size;
        let dpi = self.dpi as f64;
        (((w * dpi).round() as u32).max(1), ((h * dpi).round() as u32).max(1))
    }

    /// The range shared by the x, y and z axes.
    pub fn axis_range(&self) -> Range<f64> {
        -self.limit..self.limit
    }

    // Sizes are given in points (1/72 inch) and scaled with the dpi.
    fn points_to_pixels(&self, points: f64) -> u32 {
        ((points * self.dpi as f64 / 72.0).round() as u32).max(1)
    }
}

type Chart3d<'a, DB> = ChartContext<'a, DB, Cartesian3d<RangedCoordf64, RangedCoordf64, RangedCoordf64>>;

/// A [`Canvas`] drawing into a plotters 3D chart.
pub struct PlottersCanvas<'c, 'a, DB: DrawingBackend> {
    chart: &'c mut Chart3d<'a, DB>,
    scale: f64,
}

impl<'c, 'a, DB: DrawingBackend> PlottersCanvas<'c, 'a, DB> {
    /// `scale` multiplies the pixel sizes of the marker styles.
    pub fn new(chart: &'c mut Chart3d<'a, DB>, scale: f64) -> Self {
        Self { chart, scale }
    }

    fn scaled(&self, size: u32) -> u32 {
        ((size as f64 * self.scale).round() as u32).max(1)
    }
}

impl<'c, 'a, DB: DrawingBackend> Canvas for PlottersCanvas<'c, 'a, DB> {
    fn draw_box(&mut self, faces: &[[Point; 4]; 6], style: &MarkerStyle) -> Result<(), RenderError> {
        let outline = rgb(style).stroke_width(self.scaled(style.size));
        self.chart
            .draw_series(faces.iter().map(|face| {
                let mut path: Vec<(f64, f64, f64)> = face.iter().map(|p| p.to_tuple()).collect();
                path.push(face[0].to_tuple());
                PathElement::new(path, outline)
            }))
            .map_err(|e| RenderError::Draw(e.to_string()))?;
        Ok(())
    }

    fn draw_point(&mut self, point: &Point, style: &MarkerStyle) -> Result<(), RenderError> {
        let radius = self.scaled(style.size) as i32;
        self.chart
            .draw_series(std::iter::once(Circle::new(point.to_tuple(), radius, rgb(style).filled())))
            .map_err(|e| RenderError::Draw(e.to_string()))?;
        Ok(())
    }
}

fn rgb(style: &MarkerStyle) -> RGBColor {
    RGBColor(style.color.0, style.color.1, style.color.2)
}

/// Plots a tree into an RGB pixel buffer of [`PlotSettings::pixel_size`].
///
/// Every point of the tree is appended to `visited`, also when drawing stops
/// early because of an error or an interrupt.
pub fn draw_tree(
    tree: Option<&TreeNode>,
    settings: &PlotSettings,
    visited: &mut Vec<Point>,
    interrupt: &AtomicBool,
) -> Result<Vec<u8>, RenderError> {
    settings.validate()?;
    let (width, height) = settings.pixel_size();
    log::debug!("plotting {}x{} px, axes [-{limit}, {limit}]", width, height, limit = settings.limit);

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        let (r, g, b) = settings.background;
        let background = RGBColor(r, g, b);
        root.fill(&background).map_err(|e| RenderError::Draw(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(settings.points_to_pixels(10.0))
            .build_cartesian_3d(settings.axis_range(), settings.axis_range(), settings.axis_range())
            .map_err(|e| RenderError::Draw(e.to_string()))?;

        let (yaw, pitch) = (settings.yaw, settings.pitch);
        chart.with_projection(|mut pb| {
            pb.yaw = yaw;
            pb.pitch = pitch;
            pb.scale = 0.8;
            pb.into_matrix()
        });

        if settings.show_axes {
            chart
                .configure_axes()
                .axis_panel_style(background.filled())
                .light_grid_style(BLACK.mix(0.1))
                .max_light_lines(3)
                .label_style(("sans-serif", settings.points_to_pixels(8.0) as f64))
                .draw()
                .map_err(|e| RenderError::Draw(e.to_string()))?;
        }

        // Marker styles are in pixels at 72 dpi.
        let scale = settings.dpi as f64 / 72.0;
        let mut canvas = PlottersCanvas::new(&mut chart, scale);
        render_until(tree, &mut canvas, visited, interrupt)?;

        root.present().map_err(|e| RenderError::Draw(e.to_string()))?;
    }
    Ok(buffer)
}

/// Plots a tree and writes the image to [`PlotSettings::output`] as PNG.
///
/// Nothing is written if drawing fails.
pub fn plot_tree(
    tree: Option<&TreeNode>,
    settings: &PlotSettings,
    visited: &mut Vec<Point>,
    interrupt: &AtomicBool,
) -> Result<PathBuf, RenderError> {
    let buffer = draw_tree(tree, settings, visited, interrupt)?;
    let (width, height) = settings.pixel_size();

    image::save_buffer_with_format(
        &settings.output,
        &buffer,
        width,
        height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .map_err(|source| RenderError::Save {
        path: settings.output.clone(),
        source,
    })?;

    log::info!("wrote {}", settings.output.display());
    Ok(settings.output.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = PlotSettings::default();
        assert_eq!(s.limit, 800.0);
        assert_eq!(s.dpi, 1200);
        assert_eq!(s.background, (255, 255, 237));
        assert_eq!(s.output, PathBuf::from("octree_plot.png"));
        assert_eq!(s.pixel_size(), (7680, 5760));
    }

    #[test]
    fn test_axis_range_is_fixed_by_limit() {
        let s = PlotSettings::with_limit(500.0);
        assert_eq!(s.axis_range(), -500.0..500.0);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(PlotSettings::with_limit(0.0).validate().is_err());
        assert!(PlotSettings::with_limit(-3.0).validate().is_err());
        assert!(PlotSettings::with_limit(f64::NAN).validate().is_err());
        assert!(PlotSettings { dpi: 0, ..PlotSettings::default() }.validate().is_err());
        assert!(PlotSettings { figure_size: (0.0, 1.0), ..PlotSettings::default() }.validate().is_err());
    }
}
