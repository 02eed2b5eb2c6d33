//! Small vector helpers shared by the particle physics and the engine.

/// Spatial dimension of the simulation.
pub const DIM: usize = 2;

/// A 2-D vector `[x, y]`.
pub type Vec2 = [f64; DIM];

/// Coordinate axis, also naming the walls perpendicular to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    /// Horizontal axis; its walls are the vertical left/right boundaries.
    X,
    /// Vertical axis; its walls are the horizontal top/bottom boundaries.
    Y,
}

impl Axis {
    /// Component index of this axis in a [`Vec2`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

#[inline]
pub fn dot(a: &Vec2, b: &Vec2) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// `a - b`, component-wise.
#[inline]
pub fn sub(a: &Vec2, b: &Vec2) -> Vec2 {
    let mut out = [0.0_f64; DIM];
    for ((o, &ak), &bk) in out.iter_mut().zip(a.iter()).zip(b.iter()) {
        *o = ak - bk;
    }
    out
}

#[inline]
pub fn is_finite(a: &Vec2) -> bool {
    a.iter().all(|x| x.is_finite())
}
