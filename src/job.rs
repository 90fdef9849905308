use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use strum::Display as DisplayMacro;
use uuid::Uuid;

use crate::error::{SubmissionRejected, ValidationError};
use crate::frame_dimension::FrameDimension;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, DisplayMacro)]
#[serde(try_from = "String")]
pub enum JobType {
    #[default]
    Encode,
    Decode,
}

impl FromStr for JobType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            v if v.eq_ignore_ascii_case("encode") => Ok(JobType::Encode),
            v if v.eq_ignore_ascii_case("decode") => Ok(JobType::Decode),
            _ => Err(ValidationError::UnknownJobType(s.to_string())),
        }
    }
}

impl TryFrom<String> for JobType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A job that is still being filled in. Every field may be unset; nothing
/// touches the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobConfiguration {
    job_name: String,
    job_type: JobType,
    input_files: Vec<PathBuf>,
    output_folder: PathBuf,
    target_dimension: Option<FrameDimension>,
}

impl JobConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn job_type(&self) -> JobType {
        self.job_type
    }

    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    pub fn target_dimension(&self) -> Option<FrameDimension> {
        self.target_dimension
    }

    /// Sets the job name, trimmed. Uniqueness is the caller's concern.
    pub fn set_job_name(&mut self, name: &str) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyJobName);
        }
        debug!("Draft job name set to '{}'", name);
        self.job_name = name.to_string();
        Ok(())
    }

    pub fn set_job_type(&mut self, job_type: JobType) {
        debug!("[Job {}] Type set to {}", self.job_name, job_type);
        self.job_type = job_type;
    }

    /// Parses `value` as a job type ("Encode" or "Decode") and sets it.
    pub fn set_job_type_str(&mut self, value: &str) -> Result<(), ValidationError> {
        let job_type = value.parse()?;
        self.set_job_type(job_type);
        Ok(())
    }

    pub fn add_input_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        debug!("[Job {}] Adding input file {:?}", self.job_name, path);
        self.input_files.push(path);
    }

    /// Removes every entry equal to any of `paths`. Returns how many were removed.
    pub fn remove_input_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        let before = self.input_files.len();
        self.input_files
            .retain(|file| !paths.iter().any(|p| p.as_ref() == file.as_path()));
        let removed = before - self.input_files.len();
        debug!("[Job {}] Removed {} input file(s)", self.job_name, removed);
        removed
    }

    pub fn set_output_folder(&mut self, path: impl Into<PathBuf>) {
        self.output_folder = path.into();
        debug!("[Job {}] Output folder set to {:?}", self.job_name, self.output_folder);
    }

    pub fn set_target_dimension(&mut self, dimension: Option<FrameDimension>) {
        self.target_dimension = dimension;
    }

    /// Checks every field and reports all violations in field order.
    pub fn validate_for_submission(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if self.job_name.trim().is_empty() {
            errors.push(ValidationError::EmptyJobName);
        }
        if self.input_files.is_empty() {
            errors.push(ValidationError::NoInputFiles);
        }
        if self.output_folder.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyOutputFolder);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Freezes the draft into a [`FinalizedJob`]. On failure the draft is
    /// handed back unchanged along with every violation.
    pub fn accept(self) -> Result<FinalizedJob, SubmissionRejected> {
        if let Err(errors) = self.validate_for_submission() {
            warn!(
                "[Job {}] Rejected: {}",
                self.job_name,
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            );
            return Err(SubmissionRejected { draft: self, errors });
        }

        let job = FinalizedJob {
            job_id: Uuid::new_v4(),
            job_name: self.job_name,
            job_type: self.job_type,
            input_files: self.input_files,
            output_folder: self.output_folder,
            target_dimension: self.target_dimension,
        };
        info!(
            "[Job {}] Finalized as {} job {} with {} input file(s), output {:?}",
            job.job_name,
            job.job_type,
            job.job_id,
            job.input_files.len(),
            job.output_folder
        );
        Ok(job)
    }
}

/// Immutable snapshot of an accepted job, ready for an execution engine.
/// Only [`JobConfiguration::accept`] builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizedJob {
    job_id: Uuid,
    job_name: String,
    job_type: JobType,
    input_files: Vec<PathBuf>,
    output_folder: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_dimension: Option<FrameDimension>,
}

impl FinalizedJob {
    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn job_type(&self) -> JobType {
        self.job_type
    }

    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    pub fn target_dimension(&self) -> Option<FrameDimension> {
        self.target_dimension
    }
}
