pub mod config;
pub mod db_mongo;
pub mod error;
pub mod log_stats;

pub use db_mongo::handle::{CollectionHandle, UpdateSummary};
pub use db_mongo::memory::MemoryCollection;
pub use db_mongo::queries::{insert_school, list_all, schools_by_topic, update_topics};
pub use error::{Error, Result};
pub use log_stats::{LogStats, collect_log_stats, print_log_stats, write_log_stats};
