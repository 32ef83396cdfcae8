pub const DEFAULT_MONGODB_URI: &str = "mongodb://127.0.0.1:27017";
pub const DEFAULT_LOGS_DB: &str = "logs";
pub const DEFAULT_LOGS_COLLECTION: &str = "nginx";

/// Where the nginx log collection lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoSettings {
    pub uri: String,
    pub logs_db: String,
    pub logs_collection: String,
}

impl MongoSettings {
    /// Read settings from `MONGODB_URI`, `LOGS_DB` and `LOGS_COLLECTION`,
    /// falling back to the local default server and `logs.nginx`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            uri: non_empty("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
            logs_db: non_empty("LOGS_DB").unwrap_or_else(|| DEFAULT_LOGS_DB.to_string()),
            logs_collection: non_empty("LOGS_COLLECTION")
                .unwrap_or_else(|| DEFAULT_LOGS_COLLECTION.to_string()),
        }
    }
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
