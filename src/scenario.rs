/*

    Declare the scenario description loaded from JSON: where to
    write, how to label the count, and which boxes to generate,
    either as a regular Grid of blocks or as an explicit list of
    Boxes.

    {
      "Scenario": {
        "Name": "concrete_blocks",
        "Output": "A.txt",
        "Grid": { "Offset": "10 10 10", "Count": "3 1 1",
                  "Size": "12.5 14 8", "Stride": "16.5 18 12" }
      }
    }

    @date: 18 Oct, 2026
*/

use std::path::{Path, PathBuf};

use crate::prelude::*;

use crate::bbox::BBox;
use crate::error::{Result, SceneError};
use crate::interval::Interval;
use crate::json_structs::SingleOrVec;
use crate::scene::{GridSpec, Scene, SceneAssembler};
use crate::writer::{SceneWriter, DEFAULT_COUNT_LABEL};

#[derive(Debug, Deserialize)]
pub struct RootScenario {
    #[serde(rename = "Scenario")]
    pub scenario: Scenario,
}

#[derive(Debug, Deserialize, SmartDefault)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct Scenario {
    #[default = "unnamed"]
    pub name: String,

    /// Relative paths resolve against the scenario file's directory
    #[default(PathBuf::from("constraints.txt"))]
    pub output: PathBuf,

    #[default(DEFAULT_COUNT_LABEL.to_string())]
    pub count_label: String,

    #[default(STREAM_PRECISION)]
    #[serde(deserialize_with = "deser_usize")]
    pub precision: usize,

    #[serde(deserialize_with = "deser_bool")]
    pub atomic: bool,

    pub grid: Option<GridSpec>,

    pub boxes: SingleOrVec<BoxEntry>,
}

/// One listed box, bounds given per axis as "from to"
#[derive(Debug, Clone, Deserialize)]
pub struct BoxEntry {
    #[serde(rename = "_id", deserialize_with = "deser_usize")]
    pub id: usize,

    #[serde(rename = "X", deserialize_with = "deser_float_pair")]
    pub x: [Float; 2],

    #[serde(rename = "Y", deserialize_with = "deser_float_pair")]
    pub y: [Float; 2],

    #[serde(rename = "Z", deserialize_with = "deser_float_pair")]
    pub z: [Float; 2],

    /// Kept in the file but not generated
    #[serde(rename = "Skip", default, deserialize_with = "deser_bool")]
    pub skip: bool,
}

impl BoxEntry {
    pub fn to_bbox(&self) -> BBox {
        BBox::new(self.id, self.x[0], self.x[1], self.y[0], self.y[1], self.z[0], self.z[1])
    }
}

/// Which generator a scenario drives
#[derive(Debug)]
pub enum Generation<'a> {
    Grid(&'a GridSpec),
    List(Vec<BBox>),
}

/// Result of assembling a scenario
#[derive(Debug)]
pub struct Assembled {
    pub scene: Scene,
    /// Grid mode only
    pub map_limits: Option<[Interval; 3]>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let root = parse_scenario_json(path)?;
        info!("Loaded scenario '{}' from {}", root.scenario.name, path.display());
        Ok(root.scenario)
    }

    pub fn generation(&self) -> Result<Generation<'_>> {
        match (&self.grid, self.boxes.is_empty()) {
            (Some(grid), true) => Ok(Generation::Grid(grid)),
            (None, false) => {
                let boxes: Vec<BBox> = self.boxes
                    .iter()
                    .filter(|entry| {
                        if entry.skip {
                            debug!("Skipping box {}", entry.id);
                        }
                        !entry.skip
                    })
                    .map(BoxEntry::to_bbox)
                    .collect();
                Ok(Generation::List(boxes))
            }
            (Some(_), false) => Err(SceneError::InvalidScenario(format!(
                "scenario '{}' gives both Grid and Boxes, expected exactly one", self.name
            ))),
            (None, true) => Err(SceneError::InvalidScenario(format!(
                "scenario '{}' gives neither Grid nor Boxes", self.name
            ))),
        }
    }

    pub fn assemble(&self) -> Result<Assembled> {
        match self.generation()? {
            Generation::Grid(grid) => Ok(Assembled {
                scene: SceneAssembler::from_grid(grid)?,
                map_limits: Some(grid.map_limits()),
            }),
            Generation::List(boxes) => Ok(Assembled {
                scene: SceneAssembler::from_list(&boxes)?,
                map_limits: None,
            }),
        }
    }

    pub fn writer(&self) -> SceneWriter {
        SceneWriter::new(&self.count_label, self.precision)
    }

    pub fn output_path(&self, scenario_path: &Path) -> PathBuf {
        if self.output.is_absolute() {
            return self.output.clone();
        }
        scenario_path.parent().unwrap_or(Path::new(".")).join(&self.output)
    }

    /// Assemble the scene and write it to `output`
    pub fn generate(&self, output: &Path) -> Result<Assembled> {
        let span = tracing::span!(tracing::Level::INFO, "generate", scenario = %self.name);
        let _enter = span.enter();

        let assembled = self.assemble()?;
        self.writer().write_file(&assembled.scene, output, self.atomic)?;
        info!("Wrote constraints of {} boxes to {}", assembled.scene.n_boxes(), output.display());
        Ok(assembled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(s: &str) -> Scenario {
        serde_json::from_str::<RootScenario>(s).unwrap().scenario
    }

    #[test]
    fn test_grid_scenario_defaults() {
        let scenario = from_json(r#"{
            "Scenario": {
                "Grid": { "Offset": "10 10 10", "Count": "3 1 1", "Size": "12.5 14 8", "Stride": "16.5 18 12" }
            }
        }"#);
        assert_eq!(scenario.count_label, "n_obstacles_");
        assert_eq!(scenario.precision, 6);
        assert!(!scenario.atomic);
        assert_eq!(scenario.output, PathBuf::from("constraints.txt"));

        let assembled = scenario.assemble().unwrap();
        assert_eq!(assembled.scene.n_boxes(), 3);
        let limits = assembled.map_limits.unwrap();
        assert_eq!(limits[0].max, 65.5);
    }

    #[test]
    fn test_list_scenario_skips_and_keeps_ids() {
        let scenario = from_json(r#"{
            "Scenario": {
                "CountLabel": "n_regions_",
                "Precision": "8",
                "Boxes": [
                    { "_id": 0, "X": "0 90", "Y": "50 70", "Z": "0 10" },
                    { "_id": 1, "X": "0 20", "Y": "20 55", "Z": "0 10", "Skip": true },
                    { "_id": "3", "X": [10, 50], "Y": "-50 -40", "Z": "0 10" }
                ]
            }
        }"#);
        assert_eq!(scenario.precision, 8);

        let assembled = scenario.assemble().unwrap();
        assert!(assembled.map_limits.is_none());
        let ids: Vec<usize> = assembled.scene.iter().map(|s| s.index()).collect();
        assert_eq!(ids, vec![0, 3]);
        assert!(scenario.writer().render(&assembled.scene).starts_with("n_regions_ = 2;"));
    }

    #[test]
    fn test_single_box_object() {
        let scenario = from_json(r#"{
            "Scenario": { "Boxes": { "_id": 7, "X": "0 1", "Y": "0 1", "Z": "0 1" } }
        }"#);
        match scenario.generation().unwrap() {
            Generation::List(boxes) => assert_eq!(boxes, vec![BBox::new(7, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0)]),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_mode_must_be_unique() {
        let both = from_json(r#"{
            "Scenario": {
                "Grid": { "Count": "1 1 1" },
                "Boxes": [ { "_id": 0, "X": "0 1", "Y": "0 1", "Z": "0 1" } ]
            }
        }"#);
        assert!(matches!(both.generation(), Err(SceneError::InvalidScenario(_))));

        let neither = from_json(r#"{ "Scenario": { "Name": "empty" } }"#);
        assert!(matches!(neither.generation(), Err(SceneError::InvalidScenario(_))));
    }

    #[test]
    fn test_inverted_listed_box_fails() {
        let scenario = from_json(r#"{
            "Scenario": { "Boxes": [ { "_id": 2, "X": "5 5", "Y": "0 1", "Z": "0 1" } ] }
        }"#);
        assert!(matches!(
            scenario.assemble(),
            Err(SceneError::InvalidBoxBounds { index: 2, axis: 'x', .. })
        ));
    }

    #[test]
    fn test_infinite_listed_box_fails() {
        let scenario = from_json(r#"{
            "Scenario": { "Boxes": [ { "_id": 0, "X": "-inf inf", "Y": "0 1", "Z": "0 1" } ] }
        }"#);
        assert!(matches!(
            scenario.assemble(),
            Err(SceneError::InvalidBoxBounds { index: 0, axis: 'x', .. })
        ));
    }

    #[test]
    fn test_overflowing_listed_box_fails() {
        let scenario = from_json(r#"{
            "Scenario": { "Boxes": [ { "_id": 1, "X": [0, 1e200], "Y": [0, 1e200], "Z": [0, 1e200] } ] }
        }"#);
        assert!(matches!(
            scenario.assemble(),
            Err(SceneError::NonFiniteConstraint { index: 1, .. })
        ));
    }

    #[test]
    fn test_output_path_resolution() {
        let scenario = Scenario { output: PathBuf::from("A.txt"), ..Default::default() };
        assert_eq!(
            scenario.output_path(Path::new("scenarios/concrete_blocks.json")),
            PathBuf::from("scenarios/A.txt")
        );
        assert_eq!(scenario.output_path(Path::new("blocks.json")), PathBuf::from("A.txt"));
    }
}
