use std::path::PathBuf;

use strum::Display as DisplayMacro;
use thiserror::Error;

use crate::frame_dimension::FrameDimension;
use crate::job::JobConfiguration;

/// Which side of a frame a dimension check failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DisplayMacro)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    Width,
    Height,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The {axis} of preset '{preset}' cannot be < 1, got {value}.")]
pub struct InvalidDimensionError {
    pub preset: FrameDimension,
    pub axis: Axis,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown frame dimension preset '{0}'.")]
pub struct UnknownPresetError(pub String);

/// A single field of a job configuration that failed its contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The job name cannot be empty.")]
    EmptyJobName,
    #[error("Unknown job type '{0}', expected 'Encode' or 'Decode'.")]
    UnknownJobType(String),
    #[error("The job has no input files.")]
    NoInputFiles,
    #[error("The output folder cannot be empty.")]
    EmptyOutputFolder,
}

/// Returned when a draft is accepted while invalid. The draft comes back
/// untouched so the caller can fix it and try again.
#[derive(Debug, Error)]
#[error("Job configuration rejected with {} problem(s)", .errors.len())]
pub struct SubmissionRejected {
    pub draft: JobConfiguration,
    pub errors: Vec<ValidationError>,
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Rejected(#[from] SubmissionRejected),
    #[error("A job named '{name}' already exists.")]
    DuplicateJobName {
        name: String,
        draft: JobConfiguration,
    },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A job request line that could not be turned into a draft.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Malformed job request: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    UnknownPreset(#[from] UnknownPresetError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("Failed to serialize job: {0}")]
    Serialize(#[source] serde_json::Error),
}
