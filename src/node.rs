use crate::error::RenderError;
use crate::geometry::{Boundary, Point};
use serde::{Deserialize, Serialize};

/// One of the eight sub-cubes of a divided node.
///
/// "front/back" splits along z, "north/south" along y and "east/west" along x.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Octant {
    FrontNorthEast,
    FrontNorthWest,
    FrontSouthEast,
    FrontSouthWest,
    BackNorthEast,
    BackNorthWest,
    BackSouthEast,
    BackSouthWest,
}

impl Octant {
    /// All octants, in the order children are visited.
    pub const ALL: [Octant; 8] = [
        Octant::FrontNorthEast,
        Octant::FrontNorthWest,
        Octant::FrontSouthEast,
        Octant::FrontSouthWest,
        Octant::BackNorthEast,
        Octant::BackNorthWest,
        Octant::BackSouthEast,
        Octant::BackSouthWest,
    ];

    /// The field name of this octant in the octree file.
    pub fn key(self) -> &'static str {
        match self {
            Octant::FrontNorthEast => "fne",
            Octant::FrontNorthWest => "fnw",
            Octant::FrontSouthEast => "fse",
            Octant::FrontSouthWest => "fsw",
            Octant::BackNorthEast => "bne",
            Octant::BackNorthWest => "bnw",
            Octant::BackSouthEast => "bse",
            Octant::BackSouthWest => "bsw",
        }
    }

    /// Direction of the octant's centre relative to its parent's centre,
    /// as a sign per axis.
    pub fn signs(self) -> [f64; 3] {
        match self {
            Octant::FrontNorthEast => [1.0, -1.0, 1.0],
            Octant::FrontNorthWest => [-1.0, -1.0, 1.0],
            Octant::FrontSouthEast => [1.0, 1.0, 1.0],
            Octant::FrontSouthWest => [-1.0, 1.0, 1.0],
            Octant::BackNorthEast => [1.0, -1.0, -1.0],
            Octant::BackNorthWest => [-1.0, -1.0, -1.0],
            Octant::BackSouthEast => [1.0, 1.0, -1.0],
            Octant::BackSouthWest => [-1.0, 1.0, -1.0],
        }
    }

    /// The region this octant covers inside `parent`.
    pub fn boundary_within(self, parent: &Boundary) -> Boundary {
        let h = parent.half_size / 2.0;
        let [sx, sy, sz] = self.signs();
        let c = parent.center;
        Boundary::new(Point::new(c.x + sx * h, c.y + sy * h, c.z + sz * h), h)
    }
}

/// A node of a serialized octree.
///
/// Only `boundary`, `points` and `divided` are required. Child fields are
/// read when present and ignored unless `divided` is set. Any other field in
/// the file (for example a node capacity) is skipped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub boundary: Boundary,
    pub points: Vec<Point>,
    pub divided: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fne: Option<Box<TreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fnw: Option<Box<TreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fse: Option<Box<TreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fsw: Option<Box<TreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bne: Option<Box<TreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bnw: Option<Box<TreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bse: Option<Box<TreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bsw: Option<Box<TreeNode>>,
}

/// Summary counts of a tree, used for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub points: usize,
    pub depth: usize,
}

impl TreeNode {
    /// Creates an undivided node.
    pub fn leaf(boundary: Boundary, points: Vec<Point>) -> Self {
        TreeNode {
            boundary,
            points,
            divided: false,
            fne: None,
            fnw: None,
            fse: None,
            fsw: None,
            bne: None,
            bnw: None,
            bse: None,
            bsw: None,
        }
    }

    /// Creates a divided node from its eight children, given in [`Octant::ALL`] order.
    pub fn with_children(boundary: Boundary, points: Vec<Point>, children: [TreeNode; 8]) -> Self {
        let mut node = TreeNode::leaf(boundary, points);
        for (octant, child) in Octant::ALL.into_iter().zip(children) {
            *node.slot_mut(octant) = Some(Box::new(child));
        }
        node.divided = true;
        node
    }

    pub fn child(&self, octant: Octant) -> Option<&TreeNode> {
        let slot = match octant {
            Octant::FrontNorthEast => &self.fne,
            Octant::FrontNorthWest => &self.fnw,
            Octant::FrontSouthEast => &self.fse,
            Octant::FrontSouthWest => &self.fsw,
            Octant::BackNorthEast => &self.bne,
            Octant::BackNorthWest => &self.bnw,
            Octant::BackSouthEast => &self.bse,
            Octant::BackSouthWest => &self.bsw,
        };
        slot.as_deref()
    }

    pub fn slot_mut(&mut self, octant: Octant) -> &mut Option<Box<TreeNode>> {
        match octant {
            Octant::FrontNorthEast => &mut self.fne,
            Octant::FrontNorthWest => &mut self.fnw,
            Octant::FrontSouthEast => &mut self.fse,
            Octant::FrontSouthWest => &mut self.fsw,
            Octant::BackNorthEast => &mut self.bne,
            Octant::BackNorthWest => &mut self.bnw,
            Octant::BackSouthEast => &mut self.bse,
            Octant::BackSouthWest => &mut self.bsw,
        }
    }

    /// Returns the children to descend into.
    ///
    /// `Ok(None)` for an undivided node, whatever its child fields hold.
    /// For a divided node all eight children are required; the first missing
    /// octant is returned as the error.
    pub fn children(&self) -> Result<Option<[&TreeNode; 8]>, Octant> {
        if !self.divided {
            return Ok(None);
        }
        let mut out = [self; 8];
        for (slot, octant) in out.iter_mut().zip(Octant::ALL) {
            *slot = self.child(octant).ok_or(octant)?;
        }
        Ok(Some(out))
    }

    /// Checks the whole tree for divided nodes with missing children.
    ///
    /// The error names the path of the offending node, e.g. `root/fne/bsw`.
    pub fn validate(&self) -> Result<(), RenderError> {
        let mut trail = Trail::new();
        let mut stack = vec![(self, Trail::ROOT)];
        while let Some((node, id)) = stack.pop() {
            let children = node.children().map_err(|octant| missing_child(&trail.path(id), octant))?;
            if let Some(children) = children {
                for (child, octant) in children.into_iter().zip(Octant::ALL).rev() {
                    stack.push((child, trail.push(id, octant)));
                }
            }
        }
        Ok(())
    }

    /// Counts nodes, leaves, stored points and levels.
    ///
    /// Missing children of a divided node are skipped rather than reported.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            stats.nodes += 1;
            stats.points += node.points.len();
            stats.depth = stats.depth.max(depth);
            if !node.divided {
                stats.leaves += 1;
                continue;
            }
            for octant in Octant::ALL {
                if let Some(child) = node.child(octant) {
                    stack.push((child, depth + 1));
                }
            }
        }
        stats
    }
}

// The derived drop would recurse once per level; unlink children onto a
// heap stack instead so arbitrarily deep trees drop in constant stack space.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode>> =
            Octant::ALL.into_iter().filter_map(|o| self.slot_mut(o).take()).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(Octant::ALL.into_iter().filter_map(|o| node.slot_mut(o).take()));
        }
    }
}

/// Octant paths of the nodes met during a walk, kept as parent links so
/// pending nodes carry an index instead of a string.
pub(crate) struct Trail {
    links: Vec<(usize, Octant)>,
}

impl Trail {
    pub(crate) const ROOT: usize = usize::MAX;

    pub(crate) fn new() -> Self {
        Trail { links: Vec::new() }
    }

    pub(crate) fn push(&mut self, parent: usize, octant: Octant) -> usize {
        self.links.push((parent, octant));
        self.links.len() - 1
    }

    pub(crate) fn path(&self, mut id: usize) -> String {
        let mut keys = Vec::new();
        while id != Trail::ROOT {
            let (parent, octant) = self.links[id];
            keys.push(octant.key());
            id = parent;
        }
        keys.push("root");
        keys.reverse();
        keys.join("/")
    }
}

pub(crate) fn missing_child(path: &str, octant: Octant) -> RenderError {
    RenderError::malformed(
        path,
        format!("node is divided but child `{}` is missing", octant.key()),
    )
}
