pub mod config;
pub mod logging;
pub mod summary;
pub mod tournament;
