pub mod error;
pub mod frame_dimension;
pub mod job;
pub mod request;
pub mod settings;
pub mod workflow;

pub use error::{
    InvalidDimensionError, RequestError, SettingsError, SubmissionRejected, UnknownPresetError,
    ValidationError, WorkflowError,
};
pub use frame_dimension::{FrameDimension, FrameDimensionCatalog, FrameDimensionPreset};
pub use job::{FinalizedJob, JobConfiguration, JobType};
pub use request::{JobRequest, process_request};
pub use settings::{Settings, SettingsStore};
pub use workflow::{JobForm, JobRegistry};
