/// LDBC driver results: load a results JSON file and extract the per-query
/// run-time statistics the report needs.
///
/// Numbers stay as `serde_json::Number` so they print exactly the way the
/// driver wrote them.
use crate::error::{ConvertError, SchemaError};
use serde_json::{Number, Value};
use std::path::Path;

/// Percentile keys in report column order.
pub const PERCENTILE_KEYS: [&str; 4] = [
    "50th_percentile",
    "90th_percentile",
    "95th_percentile",
    "99th_percentile",
];

/// The parsed results file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsDocument {
    pub all_metrics: Vec<QueryMetric>,
}

/// Statistics for one benchmark query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMetric {
    pub name: String,
    pub run_time: Stats,
}

/// Summary of a run-time distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub count: u64,
    pub mean: Number,
    pub min: Number,
    pub max: Number,
    pub p50: Number,
    pub p90: Number,
    pub p95: Number,
    pub p99: Number,
}

/// Read and parse a results file.
///
/// The file is read in full and closed before this returns.
pub fn load(path: &Path) -> Result<ResultsDocument, ConvertError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConvertError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read results file");

    let value: Value = serde_json::from_str(&content).map_err(|e| ConvertError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    ResultsDocument::from_value(&value).map_err(|e| {
        tracing::debug!(at = e.at(), "results document failed schema check");
        ConvertError::Schema {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

impl ResultsDocument {
    /// Extract the typed document from parsed JSON.
    ///
    /// Every record is validated; the first problem found is returned.
    pub fn from_value(v: &Value) -> Result<Self, SchemaError> {
        let root = v.as_object().ok_or_else(|| SchemaError::WrongType {
            at: "$".to_string(),
            expected: "an object",
            record: None,
        })?;

        let metrics = root
            .get("all_metrics")
            .ok_or_else(|| SchemaError::MissingField {
                at: "all_metrics".to_string(),
                record: None,
            })?
            .as_array()
            .ok_or_else(|| SchemaError::WrongType {
                at: "all_metrics".to_string(),
                expected: "an array",
                record: None,
            })?;

        let all_metrics = metrics
            .iter()
            .enumerate()
            .map(|(i, m)| QueryMetric::from_value(m, &format!("all_metrics[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { all_metrics })
    }
}

impl QueryMetric {
    fn from_value(v: &Value, at: &str) -> Result<Self, SchemaError> {
        let obj = v.as_object().ok_or_else(|| SchemaError::WrongType {
            at: at.to_string(),
            expected: "an object",
            record: None,
        })?;

        let name = match obj.get("name") {
            None => {
                return Err(SchemaError::MissingField {
                    at: format!("{at}.name"),
                    record: None,
                })
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(SchemaError::WrongType {
                    at: format!("{at}.name"),
                    expected: "a string",
                    record: None,
                })
            }
        };

        let run_time = obj.get("run_time").ok_or_else(|| SchemaError::MissingField {
            at: format!("{at}.run_time"),
            record: Some(name.clone()),
        })?;
        let run_time = Stats::from_value(run_time, &format!("{at}.run_time"), &name)?;

        Ok(Self { name, run_time })
    }
}

impl Stats {
    fn from_value(v: &Value, at: &str, record: &str) -> Result<Self, SchemaError> {
        let obj = v.as_object().ok_or_else(|| SchemaError::WrongType {
            at: at.to_string(),
            expected: "an object",
            record: Some(record.to_string()),
        })?;

        let number = |key: &str| -> Result<Number, SchemaError> {
            match obj.get(key) {
                None => Err(SchemaError::MissingField {
                    at: format!("{at}.{key}"),
                    record: Some(record.to_string()),
                }),
                Some(Value::Number(n)) => Ok(n.clone()),
                Some(_) => Err(SchemaError::WrongType {
                    at: format!("{at}.{key}"),
                    expected: "a number",
                    record: Some(record.to_string()),
                }),
            }
        };

        let count = number("count")?
            .as_u64()
            .ok_or_else(|| SchemaError::WrongType {
                at: format!("{at}.count"),
                expected: "a non-negative integer",
                record: Some(record.to_string()),
            })?;

        let [p50, p90, p95, p99] = PERCENTILE_KEYS;

        Ok(Self {
            count,
            mean: number("mean")?,
            min: number("min")?,
            max: number("max")?,
            p50: number(p50)?,
            p90: number(p90)?,
            p95: number(p95)?,
            p99: number(p99)?,
        })
    }
}
