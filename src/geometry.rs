use serde::{Deserialize, Serialize};

/// Face index of the bottom face (z = min) in [`Boundary::faces`].
pub const FACE_BOTTOM: usize = 0;
/// Face index of the top face (z = max).
pub const FACE_TOP: usize = 1;
/// Face index of the back face (y = min).
pub const FACE_BACK: usize = 2;
/// Face index of the front face (y = max).
pub const FACE_FRONT: usize = 3;
/// Face index of the left face (x = min).
pub const FACE_LEFT: usize = 4;
/// Face index of the right face (x = max).
pub const FACE_RIGHT: usize = 5;

/// Corner indices of each face, into the array returned by [`Boundary::corners`].
///
/// Every face walks its four corners around the perimeter, so the resulting
/// quadrilaterals never self-intersect.
pub const FACE_CORNERS: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [0, 3, 7, 4],
    [1, 2, 6, 5],
];

/// A point in 3D space, as stored in the octree file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_tuple(self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

/// The cubic region covered by an octree node.
///
/// The cube is axis aligned, centred on `center` and extends `half_size`
/// along each axis in both directions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub center: Point,
    pub half_size: f64,
}

impl Boundary {
    pub fn new(center: Point, half_size: f64) -> Self {
        Self { center, half_size }
    }

    pub fn min(&self) -> Point {
        let c = self.center;
        let h = self.half_size;
        Point::new(c.x - h, c.y - h, c.z - h)
    }

    pub fn max(&self) -> Point {
        let c = self.center;
        let h = self.half_size;
        Point::new(c.x + h, c.y + h, c.z + h)
    }

    pub fn contains(&self, p: &Point) -> bool {
        let min = self.min();
        let max = self.max();
        p.x >= min.x && p.x <= max.x &&
        p.y >= min.y && p.y <= max.y &&
        p.z >= min.z && p.z <= max.z
    }

    /// Returns the eight corners of the cube.
    ///
    /// The first four corners form the bottom ring (z = min) and the last four
    /// the top ring (z = max). Both rings run `(-x,-y)`, `(+x,-y)`, `(+x,+y)`,
    /// `(-x,+y)`, so corner `i + 4` sits directly above corner `i`.
    pub fn corners(&self) -> [Point; 8] {
        let min = self.min();
        let max = self.max();
        [
            Point::new(min.x, min.y, min.z),
            Point::new(max.x, min.y, min.z),
            Point::new(max.x, max.y, min.z),
            Point::new(min.x, max.y, min.z),
            Point::new(min.x, min.y, max.z),
            Point::new(max.x, min.y, max.z),
            Point::new(max.x, max.y, max.z),
            Point::new(min.x, max.y, max.z),
        ]
    }

    /// Assembles the six quadrilateral faces of the cube, indexed by the
    /// `FACE_*` constants.
    pub fn faces(&self) -> [[Point; 4]; 6] {
        let corners = self.corners();
        FACE_CORNERS.map(|face| face.map(|i| corners[i]))
    }
}
