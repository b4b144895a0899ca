/// Error taxonomy for the converter.
///
/// `Read` and `Json` are the two halves of a parse failure (the file could not
/// be read, or it is not JSON). `Schema` covers a well-formed document that
/// lacks a field the report needs. `Write` is a failure on the output stream.
use std::path::PathBuf;

/// A required value is absent or has the wrong JSON type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    MissingField {
        /// JSON path of the missing value, e.g. `all_metrics[2].run_time.mean`.
        at: String,
        /// Name of the enclosing query record, when it could be read.
        record: Option<String>,
    },
    WrongType {
        at: String,
        expected: &'static str,
        record: Option<String>,
    },
}

impl SchemaError {
    /// JSON path of the offending value.
    pub fn at(&self) -> &str {
        match self {
            SchemaError::MissingField { at, .. } | SchemaError::WrongType { at, .. } => at,
        }
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::MissingField { at, record } => {
                write!(f, "missing required field `{at}`")?;
                if let Some(name) = record {
                    write!(f, " (query {name})")?;
                }
                Ok(())
            }
            SchemaError::WrongType {
                at,
                expected,
                record,
            } => {
                write!(f, "field `{at}` must be {expected}")?;
                if let Some(name) = record {
                    write!(f, " (query {name})")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Errors produced by a conversion run.
#[derive(Debug)]
pub enum ConvertError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    Schema {
        path: PathBuf,
        source: SchemaError,
    },
    Write {
        source: std::io::Error,
    },
}

impl ConvertError {
    /// True when the input could not be read or is not valid JSON.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ConvertError::Read { .. } | ConvertError::Json { .. })
    }

    /// True when the output stream was closed by the reader (`EPIPE`).
    pub fn is_broken_pipe(&self) -> bool {
        matches!(
            self,
            ConvertError::Write { source } if source.kind() == std::io::ErrorKind::BrokenPipe
        )
    }
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::Read { path, .. } => {
                write!(f, "failed to read results file {}", path.display())
            }
            ConvertError::Json { path, .. } => {
                write!(f, "results file {} is not valid JSON", path.display())
            }
            ConvertError::Schema { path, .. } => {
                write!(f, "results file {} has an unexpected shape", path.display())
            }
            ConvertError::Write { .. } => write!(f, "failed to write CSV output"),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Read { source, .. } => Some(source),
            ConvertError::Json { source, .. } => Some(source),
            ConvertError::Schema { source, .. } => Some(source),
            ConvertError::Write { source } => Some(source),
        }
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(e: std::io::Error) -> Self {
        ConvertError::Write { source: e }
    }
}
