//! Submission body validation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Rejections for a malformed submission body. The messages are returned to
/// the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Path must be a list")]
    PathNotList,

    #[error("Invalid path point structure")]
    InvalidPoint,

    #[error("Path coordinates must be numbers")]
    NonNumericCoordinate,

    #[error("Field '{0}' must be a string")]
    NotAString(&'static str),
}

/// One point of a drawn path. Numbers are kept as sent, so integer
/// coordinates stay integers when served back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: Number,
    pub y: Number,
}

/// A stored player submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Encoded picture data
    pub picture: String,
    pub path: Vec<PathPoint>,
    /// Encoded sound data
    pub sound: String,
}

/// Validate a submission body and extract the record to store
pub fn validate_submission(body: &Value) -> Result<PlayerRecord, SubmissionError> {
    let fields = match body.as_object() {
        Some(fields) if !fields.is_empty() => fields,
        _ => return Err(SubmissionError::MissingFields),
    };

    let (Some(picture), Some(path), Some(sound)) =
        (fields.get("picture"), fields.get("path"), fields.get("sound"))
    else {
        return Err(SubmissionError::MissingFields);
    };

    let points = path.as_array().ok_or(SubmissionError::PathNotList)?;
    let path = points
        .iter()
        .map(parse_point)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PlayerRecord {
        picture: as_string(picture, "picture")?,
        path,
        sound: as_string(sound, "sound")?,
    })
}

fn parse_point(point: &Value) -> Result<PathPoint, SubmissionError> {
    let point: &Map<String, Value> = point.as_object().ok_or(SubmissionError::InvalidPoint)?;
    let (Some(x), Some(y)) = (point.get("x"), point.get("y")) else {
        return Err(SubmissionError::InvalidPoint);
    };

    match (x, y) {
        (Value::Number(x), Value::Number(y)) => Ok(PathPoint {
            x: x.clone(),
            y: y.clone(),
        }),
        _ => Err(SubmissionError::NonNumericCoordinate),
    }
}

fn as_string(value: &Value, field: &'static str) -> Result<String, SubmissionError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(SubmissionError::NotAString(field))
}
