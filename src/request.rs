use log::{debug, warn};
use serde::Deserialize;

use crate::error::RequestError;
use crate::frame_dimension::FrameDimensionCatalog;
use crate::job::JobType;
use crate::settings::SettingsStore;
use crate::workflow::{JobForm, JobRegistry};

/// One job described as JSON, the way a form submission would fill it in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobRequest {
    pub job_name: String,
    pub job_type: Option<String>,
    pub input_files: Vec<String>,
    pub output_folder: Option<String>,
    pub target_dimension: Option<String>,
}

impl JobRequest {
    pub fn parse(line: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(line)?)
    }

    /// Applies the request to `form`. The job type goes first so an explicit
    /// output folder wins over the type's default. Stops at the first bad
    /// field; missing fields are left for submission validation.
    pub fn fill_form<S: SettingsStore>(
        &self,
        form: &mut JobForm<S>,
        catalog: &FrameDimensionCatalog,
    ) -> Result<(), RequestError> {
        if let Some(job_type) = &self.job_type {
            form.select_job_type(job_type.parse::<JobType>()?);
        }

        let draft = form.draft_mut();
        if let Some(folder) = &self.output_folder {
            draft.set_output_folder(folder);
        }
        if !self.job_name.is_empty() {
            draft.set_job_name(&self.job_name)?;
        }
        for file in &self.input_files {
            draft.add_input_file(file);
        }
        if let Some(name) = &self.target_dimension {
            let preset = catalog.lookup(name)?;
            debug!("[Job {}] Target resolution {}", draft.job_name(), preset);
            draft.set_target_dimension(Some(preset.name()));
        }
        Ok(())
    }
}

/// Runs one JSON request line through a fresh [`JobForm`] and registers the
/// result. Returns the finalized job as a single JSON line.
pub fn process_request<S: SettingsStore>(
    line: &str,
    settings: S,
    catalog: &FrameDimensionCatalog,
    registry: &mut JobRegistry,
) -> Result<String, RequestError> {
    let request = JobRequest::parse(line)?;
    let name = request.job_name.trim();

    let mut form = JobForm::new(settings);
    if let Err(e) = request.fill_form(&mut form, catalog) {
        warn!("[Job {}] {}", name, e);
        form.cancel();
        return Err(e);
    }

    let job = form.accept(registry).map_err(|e| {
        warn!("[Job {}] {}", name, e);
        RequestError::from(e)
    })?;
    serde_json::to_string(job).map_err(RequestError::Serialize)
}
