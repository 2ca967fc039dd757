pub mod notify;
pub mod report;
pub mod snapshot;
