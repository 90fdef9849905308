//! Job creation workflow: drives a [`JobConfiguration`] draft the way a job
//! form would, applying settings-driven defaults and checking job names
//! against already registered jobs.

use std::path::PathBuf;

use log::{debug, error, info, warn};

use crate::error::WorkflowError;
use crate::job::{FinalizedJob, JobConfiguration, JobType};
use crate::settings::{SettingsStore, default_output_key};

pub struct JobForm<S> {
    settings: S,
    draft: JobConfiguration,
}

impl<S: SettingsStore> JobForm<S> {
    /// Starts an Encode draft with the default encoding folder filled in.
    pub fn new(settings: S) -> Self {
        let mut draft = JobConfiguration::new();
        if let Some(folder) = settings.string_setting(default_output_key(JobType::Encode)) {
            draft.set_output_folder(folder);
        }
        JobForm { settings, draft }
    }

    pub fn draft(&self) -> &JobConfiguration {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut JobConfiguration {
        &mut self.draft
    }

    /// Sets the job type, then swaps in the default output folder for it.
    /// A blank output folder is left blank.
    pub fn select_job_type(&mut self, job_type: JobType) {
        self.draft.set_job_type(job_type);

        if self.draft.output_folder().as_os_str().is_empty() {
            return;
        }

        let folder = self
            .settings
            .string_setting(default_output_key(job_type))
            .unwrap_or_default();
        if !folder.is_empty() {
            self.draft.set_output_folder(folder);
            return;
        }

        match self.canonical_home() {
            Some(home) => {
                debug!("No default {} folder, falling back to {:?}", job_type, home);
                self.draft.set_output_folder(home);
            }
            None => self.draft.set_output_folder(PathBuf::new()),
        }
    }

    fn canonical_home(&self) -> Option<PathBuf> {
        let Some(home) = self.settings.home_directory() else {
            error!("There was an issue retrieving the home directory path: not available.");
            return None;
        };
        match home.canonicalize() {
            Ok(path) => Some(path),
            Err(e) => {
                error!("There was an issue retrieving the home directory path {:?}: {}", home, e);
                None
            }
        }
    }

    /// Finalizes the draft and registers it. On failure the draft comes back
    /// inside the error so nothing entered is lost.
    pub fn accept(self, registry: &mut JobRegistry) -> Result<&FinalizedJob, WorkflowError> {
        let name = self.draft.job_name().to_string();
        if !name.is_empty() && registry.contains_name(&name) {
            warn!("[Job {}] Rejected: a job with this name already exists", name);
            return Err(WorkflowError::DuplicateJobName {
                name,
                draft: self.draft,
            });
        }

        let job = self.draft.accept()?;
        Ok(registry.register(job))
    }

    /// Discards the draft.
    pub fn cancel(self) {
        info!("[Job {}] Creation cancelled", self.draft.job_name());
    }
}

/// Finalized jobs in submission order. Names are unique.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: Vec<FinalizedJob>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.jobs.iter().any(|job| job.job_name() == name)
    }

    pub fn jobs(&self) -> &[FinalizedJob] {
        &self.jobs
    }

    fn register(&mut self, job: FinalizedJob) -> &FinalizedJob {
        info!("[Job {}] Registered as {}", job.job_name(), job.job_id());
        self.jobs.push(job);
        &self.jobs[self.jobs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::settings::{DEFAULT_DECODING_OUTPUT_DIRECTORY, DEFAULT_ENCODING_OUTPUT_DIRECTORY};
    use std::collections::HashMap;
    use std::path::Path;
    use tempfile::TempDir;

    struct FakeSettings {
        values: HashMap<String, String>,
        home: Option<PathBuf>,
    }

    impl FakeSettings {
        fn new(encode: &str, decode: &str, home: Option<PathBuf>) -> Self {
            let mut values = HashMap::new();
            values.insert(DEFAULT_ENCODING_OUTPUT_DIRECTORY.to_string(), encode.to_string());
            values.insert(DEFAULT_DECODING_OUTPUT_DIRECTORY.to_string(), decode.to_string());
            FakeSettings { values, home }
        }
    }

    impl SettingsStore for FakeSettings {
        fn string_setting(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn home_directory(&self) -> Option<PathBuf> {
            self.home.clone()
        }
    }

    fn fill(form: &mut JobForm<impl SettingsStore>, name: &str) {
        let draft = form.draft_mut();
        draft.set_job_name(name).unwrap();
        draft.add_input_file("movie.mkv");
    }

    #[test]
    fn new_form_uses_encoding_default() {
        let form = JobForm::new(FakeSettings::new("/enc", "/dec", None));
        assert_eq!(form.draft().job_type(), JobType::Encode);
        assert_eq!(form.draft().output_folder(), Path::new("/enc"));
    }

    #[test]
    fn new_form_without_settings_has_blank_folder() {
        let form = JobForm::new(HashMap::<String, String>::new());
        assert_eq!(form.draft().output_folder(), Path::new(""));
    }

    #[test]
    fn switching_type_swaps_default_folder() {
        let mut form = JobForm::new(FakeSettings::new("/enc", "/dec", None));
        form.select_job_type(JobType::Decode);
        assert_eq!(form.draft().output_folder(), Path::new("/dec"));
        form.select_job_type(JobType::Encode);
        assert_eq!(form.draft().output_folder(), Path::new("/enc"));
    }

    #[test]
    fn blank_folder_stays_blank_on_switch() {
        let mut form = JobForm::new(FakeSettings::new("", "/dec", None));
        form.select_job_type(JobType::Decode);
        assert_eq!(form.draft().job_type(), JobType::Decode);
        assert_eq!(form.draft().output_folder(), Path::new(""));
    }

    #[test]
    fn missing_default_falls_back_to_home() {
        let home = TempDir::new().unwrap();
        let mut form = JobForm::new(FakeSettings::new(
            "/enc",
            "",
            Some(home.path().to_path_buf()),
        ));
        form.select_job_type(JobType::Decode);
        assert_eq!(
            form.draft().output_folder().to_path_buf(),
            home.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn unresolvable_home_clears_folder() {
        let mut form = JobForm::new(FakeSettings::new("/enc", "", None));
        form.select_job_type(JobType::Decode);
        assert_eq!(form.draft().output_folder(), Path::new(""));
    }

    #[test]
    fn accept_registers_job() {
        let mut registry = JobRegistry::new();
        let mut form = JobForm::new(FakeSettings::new("/enc", "/dec", None));
        fill(&mut form, "first");

        let job = form.accept(&mut registry).unwrap();
        assert_eq!(job.job_name(), "first");
        assert_eq!(job.output_folder(), Path::new("/enc"));
        assert!(registry.contains_name("first"));
        assert_eq!(registry.jobs().len(), 1);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = JobRegistry::new();
        let settings = FakeSettings::new("/enc", "/dec", None);

        let mut form = JobForm::new(&settings);
        fill(&mut form, "nightly");
        form.accept(&mut registry).unwrap();

        let mut form = JobForm::new(&settings);
        fill(&mut form, "nightly");
        match form.accept(&mut registry) {
            Err(WorkflowError::DuplicateJobName { name, draft }) => {
                assert_eq!(name, "nightly");
                assert_eq!(draft.input_files().len(), 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(registry.jobs().len(), 1);
    }

    #[test]
    fn invalid_draft_is_not_registered() {
        let mut registry = JobRegistry::new();
        let form = JobForm::new(HashMap::<String, String>::new());
        match form.accept(&mut registry) {
            Err(WorkflowError::Rejected(rejected)) => assert_eq!(
                rejected.errors,
                vec![
                    ValidationError::EmptyJobName,
                    ValidationError::NoInputFiles,
                    ValidationError::EmptyOutputFolder,
                ]
            ),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(registry.jobs().is_empty());
    }

    #[test]
    fn decode_job_gets_decode_folder() {
        let mut registry = JobRegistry::new();
        let mut form = JobForm::new(FakeSettings::new("/enc", "/dec", None));
        fill(&mut form, "rip");
        form.select_job_type(JobType::Decode);
        let job = form.accept(&mut registry).unwrap();
        assert_eq!(job.job_type(), JobType::Decode);
        assert_eq!(job.output_folder(), Path::new("/dec"));
    }
}
