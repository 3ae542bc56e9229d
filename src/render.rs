use crate::canvas::{BOX_STYLE, Canvas, POINT_STYLE};
use crate::error::RenderError;
use crate::geometry::Point;
use crate::node::{missing_child, Octant, Trail, TreeNode};
use std::sync::atomic::{AtomicBool, Ordering};

/// Draws a tree onto `canvas` and appends every stored point to `visited`.
///
/// Each node yields one box primitive followed by one marker per stored point.
/// Divided nodes are then descended in [`Octant::ALL`] order. An absent root
/// draws nothing.
///
/// Traversal stops at the first error. Primitives already drawn and points
/// already appended to `visited` are kept.
pub fn render<C: Canvas>(
    node: Option<&TreeNode>,
    canvas: &mut C,
    visited: &mut Vec<Point>,
) -> Result<(), RenderError> {
    render_until(node, canvas, visited, &AtomicBool::new(false))
}

/// Like [`render`], but stops with [`RenderError::Interrupted`] once
/// `interrupt` is set. The flag is checked before every node.
pub fn render_until<C: Canvas>(
    node: Option<&TreeNode>,
    canvas: &mut C,
    visited: &mut Vec<Point>,
    interrupt: &AtomicBool,
) -> Result<(), RenderError> {
    let Some(root) = node else {
        return Ok(());
    };

    // Children are pushed in reverse so they pop in octant order.
    let mut trail = Trail::new();
    let mut stack = vec![(root, Trail::ROOT)];

    while let Some((node, id)) = stack.pop() {
        if interrupt.load(Ordering::Relaxed) {
            return Err(RenderError::Interrupted);
        }
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{}: half_size {}, {} points", trail.path(id), node.boundary.half_size, node.points.len());
        }

        canvas.draw_box(&node.boundary.faces(), &BOX_STYLE)?;

        for point in &node.points {
            visited.push(*point);
            canvas.draw_point(point, &POINT_STYLE)?;
        }

        let children = node.children().map_err(|octant| missing_child(&trail.path(id), octant))?;
        if let Some(children) = children {
            for (child, octant) in children.into_iter().zip(Octant::ALL).rev() {
                stack.push((child, trail.push(id, octant)));
            }
        }
    }

    Ok(())
}
