/*

    Convert an axis aligned box into six half-spaces n.x <= b,
    one per face, in the fixed order H1..H6 expected by the
    downstream planner:

        Face  v1       v2       n          b
        H1    q1 - p1  r1 - p1  v1 x v2    n.p1   (y = ymin)
        H2    p2 - q2  r2 - q2  v1 x v2    n.p2   (x = xmax)
        H3    q2 - p3  r2 - p3  v1 x v2    n.p3   (y = ymax)
        H4    q1 - p3  r1 - p3  v2 x v1    n.p3   (x = xmin)
        H5    r1 - r3  r2 - r3  v2 x v1    n.r1   (z = zmin)
        H6    q1 - p3  q2 - p3  v1 x v2    n.q1   (z = zmax)

    H4 and H5 take the cross product in reverse order, that is what
    keeps their normals pointing out of the box. Normals are not
    normalized, their length is the face area.

    @date: 18 Oct, 2026
*/

use crate::prelude::*;

use crate::bbox::{BBox, FaceVertices};
use crate::error::{Result, SceneError};

/// Box faces in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::H1, Face::H2, Face::H3, Face::H4, Face::H5, Face::H6];

    pub fn name(&self) -> &'static str {
        match self {
            Face::H1 => "H1",
            Face::H2 => "H2",
            Face::H3 => "H3",
            Face::H4 => "H4",
            Face::H5 => "H5",
            Face::H6 => "H6",
        }
    }

    /// Axis (0 = x, 1 = y, 2 = z) the face is perpendicular to,
    /// and whether it sits on the max bound of that axis
    pub fn plane(&self) -> (usize, bool) {
        match self {
            Face::H1 => (1, false),
            Face::H2 => (0, true),
            Face::H3 => (1, true),
            Face::H4 => (0, false),
            Face::H5 => (2, false),
            Face::H6 => (2, true),
        }
    }

    /// Normal and offset of this face's half-space
    pub fn constraint(&self, v: &FaceVertices) -> Constraint {
        let (normal, on_face) = match self {
            Face::H1 => ((v.q1 - v.p1).cross(v.r1 - v.p1), v.p1),
            Face::H2 => ((v.p2 - v.q2).cross(v.r2 - v.q2), v.p2),
            Face::H3 => ((v.q2 - v.p3).cross(v.r2 - v.p3), v.p3),
            Face::H4 => ((v.r1 - v.p3).cross(v.q1 - v.p3), v.p3),
            Face::H5 => ((v.r2 - v.r3).cross(v.r1 - v.r3), v.r1),
            Face::H6 => ((v.q1 - v.p3).cross(v.q2 - v.p3), v.q1),
        };
        Constraint::new(normal, normal.dot(on_face))
    }
}

/// Half-space n.x <= b
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub normal: Vector3,
    pub offset: Float,
}

impl Constraint {
    pub fn new(normal: Vector3, offset: Float) -> Self {
        Self { normal, offset }
    }

    pub fn is_finite(&self) -> bool {
        self.normal.is_finite() && self.offset.is_finite()
    }

    /// n.x - b, non-positive inside the half-space
    pub fn signed_value(&self, point: Vector3) -> Float {
        self.normal.dot(point) - self.offset
    }

    pub fn contains(&self, point: Vector3, eps: Float) -> bool {
        self.signed_value(point) <= eps * self.offset.abs().max(1.0)
    }
}

/// The six constraints of one box, H1..H6
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSet {
    index: usize,
    constraints: [Constraint; 6],
}

impl ConstraintSet {
    /// Validate the box, then compute one constraint per face. Bounds so
    /// large that a normal or offset overflows are rejected too.
    pub fn from_bbox(bbox: &BBox) -> Result<Self> {
        bbox.validate()?;

        let verts = bbox.face_vertices();
        let constraints = Face::ALL.map(|face| face.constraint(&verts));
        if let Some(face) = Face::ALL.into_iter().find(|f| !constraints[*f as usize].is_finite()) {
            return Err(SceneError::NonFiniteConstraint {
                index: bbox.index,
                face: face.name(),
            });
        }
        debug!("Box {} -> {:?}", bbox.index, constraints);

        Ok(Self {
            index: bbox.index,
            constraints,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, face: Face) -> &Constraint {
        &self.constraints[face as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    /// Normals as a 6x3 matrix in row-major order
    pub fn matrix_rows(&self) -> [[Float; 3]; 6] {
        self.constraints.map(|c| c.normal.to_array())
    }

    pub fn offsets(&self) -> [Float; 6] {
        self.constraints.map(|c| c.offset)
    }

    /// Point is inside (or on the boundary of) all six half-spaces
    pub fn contains(&self, point: Vector3, eps: Float) -> bool {
        self.iter().all(|c| c.contains(point, eps))
    }
}
