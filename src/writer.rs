/*

    Serialize a finalized Scene into the constraint file read by
    the planner. The file is pasted into C++ source, each box
    becoming two comma-initializer statements:

        n_obstacles_ = 2;

        A << -0, -100, 0, 112, ..., 175; A_list_.push_back(A);
        B << -1000, 2520, 2400, -1120, -1750, 3150; B_list_.push_back(B);
        ...

    A is the 6x3 normal matrix in row-major order, B the offsets.

    @date: 18 Oct, 2026
*/

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::prelude::*;

use crate::error::{Result, SceneError};
use crate::scene::Scene;

pub const DEFAULT_COUNT_LABEL: &str = "n_obstacles_";

const MATRIX_APPEND: &str = "A_list_.push_back(A);";
const VECTOR_APPEND: &str = "B_list_.push_back(B);";

#[derive(Debug, Clone, SmartDefault)]
pub struct SceneWriter {
    /// Variable assigned the box count in the header line
    #[default(DEFAULT_COUNT_LABEL.to_string())]
    pub count_label: String,

    /// Significant digits, as std::ostream precision
    #[default(STREAM_PRECISION)]
    pub precision: usize,
}

impl SceneWriter {
    pub fn new(count_label: &str, precision: usize) -> Self {
        Self {
            count_label: count_label.to_string(),
            precision,
        }
    }

    fn join(&self, values: impl Iterator<Item = Float>) -> String {
        values
            .map(|v| fmt_stream_float(v, self.precision))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn write<W: Write>(&self, scene: &Scene, out: &mut W) -> io::Result<()> {
        write!(out, "{} = {};\n\n", self.count_label, scene.n_boxes())?;

        for set in scene.iter() {
            let rows = self.join(set.matrix_rows().into_iter().flatten());
            let offsets = self.join(set.offsets().into_iter());
            writeln!(out, "A << {}; {}", rows, MATRIX_APPEND)?;
            writeln!(out, "B << {}; {}", offsets, VECTOR_APPEND)?;
        }
        Ok(())
    }

    pub fn render(&self, scene: &Scene) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec<u8> cannot fail
        let _ = self.write(scene, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Truncate and write `path`. With `atomic`, write a sibling temp file
    /// and rename it over `path` only once everything is flushed.
    pub fn write_file(&self, scene: &Scene, path: &Path, atomic: bool) -> Result<()> {
        let failure = |source: io::Error| SceneError::OutputWriteFailure {
            path: path.to_path_buf(),
            source,
        };

        if !atomic {
            return self.write_truncate(scene, path).map_err(failure);
        }

        let tmp = temp_sibling(path);
        debug!("Writing constraints to temporary {}", tmp.display());
        if let Err(e) = self.write_truncate(scene, &tmp) {
            let _ = fs::remove_file(&tmp);
            return Err(failure(e));
        }
        fs::rename(&tmp, path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            failure(e)
        })
    }

    fn write_truncate(&self, scene: &Scene, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write(scene, &mut out)?;
        out.flush()
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
