/*

    Declare Scene consisting of the constraint sets of all
    boxes of one generation run, and the assembler that
    produces it either from a regular 3D grid of blocks or
    from an explicit list of boxes.

    A Scene can only be obtained through SceneAssembler::finish,
    after which it is read-only and handed to the writer.

    @date: 18 Oct, 2026
*/

use crate::prelude::*;

use crate::bbox::BBox;
use crate::error::{Result, SceneError};
use crate::halfspace::ConstraintSet;
use crate::interval::Interval;

/// Regular grid of equally sized blocks, per axis: count blocks of
/// the given size, one every stride units, starting at offset.
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct GridSpec {
    #[serde(deserialize_with = "deser_vec3")]
    pub offset: Vector3,

    #[default([1, 1, 1])]
    #[serde(deserialize_with = "deser_usize_array")]
    pub count: [usize; 3],

    #[default(Vector3::ONE)]
    #[serde(deserialize_with = "deser_vec3")]
    pub size: Vector3,

    #[default(Vector3::ONE)]
    #[serde(deserialize_with = "deser_vec3")]
    pub stride: Vector3,
}

/// Upper bound on the up-front reservation, larger grids grow as they go
const MAX_RESERVE: usize = 1 << 16;

impl GridSpec {
    /// count.x * count.y * count.z, InvalidScenario on overflow
    pub fn n_boxes(&self) -> Result<usize> {
        self.count
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| SceneError::InvalidScenario(format!("Grid count {:?} overflows", self.count)))
    }

    /// Axes with more than one block where consecutive blocks intersect
    pub fn overlapping_axes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..3).filter(|&axis| self.count[axis] > 1 && self.stride[axis].abs() < self.size[axis])
    }

    /// Span of block i on the given axis
    pub fn block_interval(&self, axis: usize, i: usize) -> Interval {
        let offset = self.offset[axis];
        let size = self.size[axis];
        let shift = i as Float * self.stride[axis];
        Interval::new(offset + shift, offset + size + shift)
    }

    /// Boxes in x, y, z nesting order (z innermost), indexed from 0
    pub fn boxes(&self) -> impl Iterator<Item = BBox> + '_ {
        let [nx, ny, nz] = self.count;
        (0..nx)
            .flat_map(move |ix| (0..ny).flat_map(move |iy| (0..nz).map(move |iz| (ix, iy, iz))))
            .enumerate()
            .map(|(index, (ix, iy, iz))| {
                BBox::new_from(
                    index,
                    &self.block_interval(0, ix),
                    &self.block_interval(1, iy),
                    &self.block_interval(2, iz),
                )
            })
    }

    /// Map limits [0, 2 offset + size count + (stride - size)(count - 1)],
    /// i.e. the populated region with an offset-wide margin on both sides
    pub fn map_limits(&self) -> [Interval; 3] {
        std::array::from_fn(|axis| {
            let count = self.count[axis];
            let (offset, size, stride) = (self.offset[axis], self.size[axis], self.stride[axis]);
            let gaps = count.saturating_sub(1) as Float;
            Interval::new(0.0, 2.0 * offset + size * count as Float + (stride - size) * gaps)
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    sets: Vec<ConstraintSet>,
    occupied: [Interval; 3],
}

impl Scene {
    pub fn n_boxes(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstraintSet> {
        self.sets.iter()
    }

    /// Union of all box extents, Interval::EMPTY per axis for an empty scene
    pub fn occupied(&self) -> [Interval; 3] {
        self.occupied
    }
}

#[derive(Debug)]
pub struct SceneAssembler {
    sets: Vec<ConstraintSet>,
    occupied: [Interval; 3],
}

impl Default for SceneAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneAssembler {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            sets: Vec::with_capacity(n),
            occupied: [Interval::EMPTY; 3],
        }
    }

    /// Convert one box and append its constraints. The assembler is left
    /// unchanged if the box is invalid.
    pub fn add(&mut self, bbox: &BBox) -> Result<&ConstraintSet> {
        let set = ConstraintSet::from_bbox(bbox)?;
        for (acc, int) in self.occupied.iter_mut().zip(bbox.intervals()) {
            acc.union(&int);
        }
        self.sets.push(set);
        Ok(&self.sets[self.sets.len() - 1])
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn finish(self) -> Scene {
        debug!("Scene finalized with {} boxes", self.sets.len());
        Scene {
            sets: self.sets,
            occupied: self.occupied,
        }
    }

    pub fn from_grid(grid: &GridSpec) -> Result<Scene> {
        let n = grid.n_boxes()?;
        info!("Generating {:?} grid of blocks ({} boxes)", grid.count, n);
        for axis in grid.overlapping_axes() {
            warn!("Grid stride {} is smaller than block size {} on axis {}, blocks will overlap",
                  grid.stride[axis], grid.size[axis], axis);
        }

        let mut assembler = Self::with_capacity(n.min(MAX_RESERVE));
        for bbox in grid.boxes() {
            assembler.add(&bbox)?;
        }
        Ok(assembler.finish())
    }

    /// Boxes keep their own indices and order
    pub fn from_list<'a, I>(boxes: I) -> Result<Scene>
    where
        I: IntoIterator<Item = &'a BBox>,
    {
        let mut assembler = Self::new();
        for bbox in boxes {
            assembler.add(bbox)?;
        }
        info!("Converted {} listed boxes", assembler.len());
        Ok(assembler.finish())
    }
}
