pub mod maintenance_jobs;
pub mod technicians;
