/*

    Axis Aligned Box given by "from"/"to" bounds on each axis,
    and the corner points the face computation works on.

    Corner naming (p, q, r triplets) follows the face table in
    halfspace.rs. Only p1..p3, q1, q2, r1..r3 are referenced
    there, q3 is kept so each triplet spans a full face.

    @date: 18 Oct, 2026
*/


use crate::prelude::*;

use crate::error::{Result, SceneError};
use crate::interval::Interval;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub index: usize,

    pub xmin: Float,
    pub xmax: Float,
    pub ymin: Float,
    pub ymax: Float,
    pub zmin: Float,
    pub zmax: Float,
}

impl BBox {
    /// Bounds in (fx, tx, fy, ty, fz, tz) order. Not validated here.
    pub fn new(index: usize, fx: Float, tx: Float, fy: Float, ty: Float, fz: Float, tz: Float) -> Self {
        Self {
            index,
            xmin: fx,
            xmax: tx,
            ymin: fy,
            ymax: ty,
            zmin: fz,
            zmax: tz,
        }
    }

    pub fn new_from(index: usize, xint: &Interval, yint: &Interval, zint: &Interval) -> Self {
        Self::new(index, xint.min, xint.max, yint.min, yint.max, zint.min, zint.max)
    }

    pub fn x_interval(&self) -> Interval { Interval::new(self.xmin, self.xmax) }
    pub fn y_interval(&self) -> Interval { Interval::new(self.ymin, self.ymax) }
    pub fn z_interval(&self) -> Interval { Interval::new(self.zmin, self.zmax) }

    pub fn intervals(&self) -> [Interval; 3] {
        [self.x_interval(), self.y_interval(), self.z_interval()]
    }

    /// Fail fast with InvalidBoxBounds on the first axis where from >= to
    /// or either bound is infinite or NaN
    pub fn validate(&self) -> Result<()> {
        for (axis, int) in ['x', 'y', 'z'].into_iter().zip(self.intervals()) {
            if !int.is_proper() || !int.is_finite() {
                return Err(SceneError::InvalidBoxBounds {
                    index: self.index,
                    axis,
                    from: int.min,
                    to: int.max,
                });
            }
        }
        Ok(())
    }

    pub fn width(&self) -> Float { self.xmax - self.xmin }
    pub fn height(&self) -> Float { self.ymax - self.ymin }
    pub fn depth(&self) -> Float { self.zmax - self.zmin }

    pub fn volume(&self) -> Float {
        self.width() * self.height() * self.depth()
    }

    pub fn face_vertices(&self) -> FaceVertices {
        FaceVertices::new(self)
    }

    /// All 8 corners, bit i of the position selects max on axis i (x = bit 0)
    pub fn corners(&self) -> [Vector3; 8] {
        std::array::from_fn(|i| {
            Vector3::new(
                if i & 1 == 0 { self.xmin } else { self.xmax },
                if i & 2 == 0 { self.ymin } else { self.ymax },
                if i & 4 == 0 { self.zmin } else { self.zmax },
            )
        })
    }
}

/// Named corners used by the face normal computation
#[derive(Debug, Clone, Copy)]
pub struct FaceVertices {
    pub p1: Vector3, pub q1: Vector3, pub r1: Vector3,
    pub p2: Vector3, pub q2: Vector3, pub r2: Vector3,
    pub p3: Vector3, pub q3: Vector3, pub r3: Vector3,
}

impl FaceVertices {
    pub fn new(b: &BBox) -> Self {
        let (fx, tx) = (b.xmin, b.xmax);
        let (fy, ty) = (b.ymin, b.ymax);
        let (fz, tz) = (b.zmin, b.zmax);

        Self {
            p1: Vector3::new(tx, fy, tz),
            q1: Vector3::new(fx, fy, tz),
            r1: Vector3::new(fx, fy, fz),

            p2: Vector3::new(tx, fy, tz),
            q2: Vector3::new(tx, ty, tz),
            r2: Vector3::new(tx, ty, fz),

            p3: Vector3::new(fx, ty, tz),
            q3: Vector3::new(tx, ty, tz),
            r3: Vector3::new(fx, ty, fz),
        }
    }
}
