/*

    Provide utilities to parse scenario JSON files.

    The parser is somewhat robust, let <a> be integer or float type,
    in JSON file <a> can be given both in quotes (string) or as is.

    e.g. In JSON file both
    "Precision": "6" and "Precision": 6
    works as Precision: usize in source code

    Vector3 fields are accepted as "<a> <a> <a>" or [<a>, <a>, <a>],
    pairs (axis bounds) as "<a> <a>" or [<a>, <a>]. Floats go through
    f64::from_str, so "inf" parses; boxes reject it later.

    @date: 18 Oct, 2026
*/

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{self};
use serde::{Deserialize, Deserializer};
use serde::de::{self};

use crate::prelude::*;
use crate::error::{Result, SceneError};
use crate::scenario::{RootScenario};

pub fn parse_scenario_json(path: &Path) -> Result<RootScenario> {
    /*
        Parse a scenario JSON file into RootScenario.
    */

    let span = tracing::span!(tracing::Level::INFO, "load_scenario");
    let _enter = span.enter();

    // Open file
    let file = File::open(path).map_err(|source| SceneError::ScenarioRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    debug!("Reading file from {}", path.display());

    // Parse JSON into RootScenario
    let root: RootScenario = serde_json::from_reader(reader).map_err(|source| SceneError::ScenarioParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(root)
}

pub(crate) fn deser_usize<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    /*
        Deserialize usize type given as either string or number in JSON
    */
    let s: serde_json::Value = Deserialize::deserialize(deserializer)?;
    value_to_usize(&s).map_err(de::Error::custom)
}

fn value_to_usize(v: &serde_json::Value) -> std::result::Result<usize, String> {
    match v {
        serde_json::Value::Number(n) => n.as_u64()
            .map(|v| v as usize)
            .ok_or_else(|| format!("Invalid non-negative integer {n}")),
        serde_json::Value::String(s) => s.trim().parse::<usize>()
            .map_err(|_| format!("Failed to parse non-negative integer from '{s}'")),
        t => Err(format!("Expected int or string, found {t}")),
    }
}

pub(crate) fn deser_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    // true / false, optionally quoted
    let value: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match value {
        serde_json::Value::Bool(b) => Ok(b),
        serde_json::Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(de::Error::custom(format!("invalid bool '{s}'"))),
        },
        t => Err(de::Error::custom(format!("Expected bool or string, found {t}"))),
    }
}

/// Read exactly n floats given as "a b c" or [a, "b", c]
fn value_to_floats(value: &serde_json::Value, n: usize) -> std::result::Result<Vec<Float>, String> {
    let numbers: Vec<Float> = match value {
        serde_json::Value::String(s) => s
            .split_whitespace()
            .map(|x| x.parse::<Float>().map_err(|e| format!("'{x}': {e}")))
            .collect::<std::result::Result<_, _>>()?,
        serde_json::Value::Array(arr) => arr
            .iter()
            .map(|x| match x {
                serde_json::Value::Number(num) => num.as_f64().ok_or_else(|| format!("Invalid float {num}")),
                serde_json::Value::String(s) => s.trim().parse::<Float>().map_err(|e| format!("'{s}': {e}")),
                t => Err(format!("Expected float or string, found {t}")),
            })
            .collect::<std::result::Result<_, _>>()?,
        t => return Err(format!("Expected string or array, found {t}")),
    };

    if numbers.len() != n {
        return Err(format!("Expected {} values, got {}", n, numbers.len()));
    }
    Ok(numbers)
}

pub(crate) fn deser_vec3<'de, D>(deserializer: D) -> std::result::Result<Vector3, D::Error>
where
    D: Deserializer<'de>,
{
    let value: serde_json::Value = Deserialize::deserialize(deserializer)?;
    let v = value_to_floats(&value, 3).map_err(de::Error::custom)?;
    Ok(Vector3::new(v[0], v[1], v[2]))
}

pub(crate) fn deser_float_pair<'de, D>(deserializer: D) -> std::result::Result<[Float; 2], D::Error>
where
    D: Deserializer<'de>,
{
    let value: serde_json::Value = Deserialize::deserialize(deserializer)?;
    let v = value_to_floats(&value, 2).map_err(de::Error::custom)?;
    Ok([v[0], v[1]])
}

pub(crate) fn deser_usize_array<'de, D, const N: usize>(deserializer: D) -> std::result::Result<[usize; N], D::Error>
where
    D: Deserializer<'de>,
{
    // Either "3 1 1" or [3, 1, 1] (elements may be strings too)
    let value: serde_json::Value = Deserialize::deserialize(deserializer)?;
    let v: Vec<usize> = match value {
        serde_json::Value::String(s) => s
            .split_whitespace()
            .map(|x| x.parse::<usize>().map_err(de::Error::custom))
            .collect::<std::result::Result<_, D::Error>>()?,
        serde_json::Value::Array(arr) => arr
            .iter()
            .map(|x| value_to_usize(x).map_err(de::Error::custom))
            .collect::<std::result::Result<_, D::Error>>()?,
        t => return Err(de::Error::custom(format!("Expected string or array, found {t}"))),
    };

    if v.len() != N {
        return Err(serde::de::Error::custom(format!(
            "expected {} elements, got {}",
            N, v.len()
        )));
    }

    // Convert Vec<usize> to [usize; N] array
    v.try_into()
        .map_err(|_| serde::de::Error::custom("failed to convert Vec to array"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Fields {
        #[serde(deserialize_with = "deser_vec3")]
        v: Vector3,
        #[serde(deserialize_with = "deser_usize_array")]
        n: [usize; 3],
        #[serde(deserialize_with = "deser_float_pair")]
        p: [Float; 2],
        #[serde(deserialize_with = "deser_usize")]
        u: usize,
        #[serde(deserialize_with = "deser_bool")]
        b: bool,
    }

    #[test]
    fn test_string_forms() {
        let fields: Fields = serde_json::from_str(
            r#"{"v": "12.5 14 8", "n": "3 1 1", "p": "-50 -40", "u": "6", "b": "true"}"#,
        ).unwrap();
        assert_eq!(fields.v, Vector3::new(12.5, 14.0, 8.0));
        assert_eq!(fields.n, [3, 1, 1]);
        assert_eq!(fields.p, [-50.0, -40.0]);
        assert_eq!(fields.u, 6);
        assert!(fields.b);
    }

    #[test]
    fn test_array_and_number_forms() {
        let fields: Fields = serde_json::from_str(
            r#"{"v": [1, "2.5", 3], "n": [2, "1", 4], "p": [0, 90], "u": 3, "b": false}"#,
        ).unwrap();
        assert_eq!(fields.v, Vector3::new(1.0, 2.5, 3.0));
        assert_eq!(fields.n, [2, 1, 4]);
        assert_eq!(fields.p, [0.0, 90.0]);
        assert_eq!(fields.u, 3);
        assert!(!fields.b);
    }

    #[test]
    fn test_wrong_lengths_rejected() {
        let bad_vec = r#"{"v": "1 2", "n": "1 1 1", "p": "0 1", "u": 0, "b": false}"#;
        assert!(serde_json::from_str::<Fields>(bad_vec).is_err());

        let bad_pair = r#"{"v": "1 2 3", "n": "1 1 1", "p": [0, 1, 2], "u": 0, "b": false}"#;
        assert!(serde_json::from_str::<Fields>(bad_pair).is_err());

        let bad_count = r#"{"v": "1 2 3", "n": [1, 1], "p": "0 1", "u": 0, "b": false}"#;
        assert!(serde_json::from_str::<Fields>(bad_count).is_err());

        let negative = r#"{"v": "1 2 3", "n": "1 1 1", "p": "0 1", "u": -1, "b": false}"#;
        assert!(serde_json::from_str::<Fields>(negative).is_err());
    }

    #[test]
    fn test_bool_only_accepts_bool_forms() {
        let numeric = r#"{"v": "1 2 3", "n": "1 1 1", "p": "0 1", "u": 0, "b": 1}"#;
        assert!(serde_json::from_str::<Fields>(numeric).is_err());

        let quoted = r#"{"v": "1 2 3", "n": "1 1 1", "p": "0 1", "u": 0, "b": " FALSE "}"#;
        assert!(!serde_json::from_str::<Fields>(quoted).unwrap().b);
    }
}
