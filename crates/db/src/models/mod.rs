pub mod profile;
pub mod progress_log;
pub mod project;
pub mod session;
pub mod user;
