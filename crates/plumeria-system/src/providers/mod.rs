pub mod audit_logs;
pub mod posts;
pub mod tags;
pub mod users;
