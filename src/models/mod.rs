pub mod job;
pub mod query;
