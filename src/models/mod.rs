pub mod query;
pub mod status;

pub use query::{JobFilter, JobListParams, JobListQuery, SortDir, SortField};
pub use status::JobStatus;
