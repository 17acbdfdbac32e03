use serde::{Deserialize, Serialize};

/// Single coordinate axis. The play area is unbounded in every direction,
/// so coordinates are signed and never range-checked.
pub type Coord = i64;

/// Two-dimensional coordinates `(x, y)` on a fixed layer.
pub type Pos2 = (Coord, Coord);

/// Three-dimensional coordinates `(x, y, z)`.
pub type Pos3 = (Coord, Coord, Coord);

/// Places planar coordinates onto the given layer.
pub const fn on_layer((x, y): Pos2, z: Coord) -> Pos3 {
    (x, y, z)
}

/// Projects world coordinates onto their layer plane.
pub const fn drop_layer((x, y, _z): Pos3) -> Pos2 {
    (x, y)
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The 8 Moore neighbors of `pos` within its own layer.
pub fn iter_planar_neighbors((x, y, z): Pos3) -> impl Iterator<Item = Pos3> {
    DISPLACEMENTS.iter().map(move |&(dx, dy)| (x + dx, y + dy, z))
}

/// The 8 Moore neighbors of a planar position.
pub fn iter_neighbors2((x, y): Pos2) -> impl Iterator<Item = Pos2> {
    DISPLACEMENTS.iter().map(move |&(dx, dy)| (x + dx, y + dy))
}

/// Chebyshev distance, the number of 8-directional steps between two
/// positions. Admissible and consistent for the step costs below.
pub fn chebyshev_dist((ax, ay): Pos2, (bx, by): Pos2) -> Coord {
    (ax - bx).abs().max((ay - by).abs())
}

/// Euclidean cost of a single step between two adjacent positions:
/// 1 for orthogonal moves, √2 for diagonal ones.
pub fn step_cost((ax, ay): Pos2, (bx, by): Pos2) -> f64 {
    debug_assert!(chebyshev_dist((ax, ay), (bx, by)) <= 1);
    if ax != bx && ay != by {
        core::f64::consts::SQRT_2
    } else {
        1.0
    }
}

/// Axis-aligned box with inclusive bounds on all three axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect3 {
    pub min: Pos3,
    pub max: Pos3,
}

impl Rect3 {
    pub const fn new(min: Pos3, max: Pos3) -> Self {
        Self { min, max }
    }

    pub const fn grow(&self, amount: Coord) -> Self {
        Self {
            min: (self.min.0 - amount, self.min.1 - amount, self.min.2 - amount),
            max: (self.max.0 + amount, self.max.1 + amount, self.max.2 + amount),
        }
    }
}

/// Axis-aligned rectangle with inclusive bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect2 {
    pub min: Pos2,
    pub max: Pos2,
}

impl Rect2 {
    pub const fn new(min: Pos2, max: Pos2) -> Self {
        Self { min, max }
    }

    pub const fn grow(&self, amount: Coord) -> Self {
        Self {
            min: (self.min.0 - amount, self.min.1 - amount),
            max: (self.max.0 + amount, self.max.1 + amount),
        }
    }
}
