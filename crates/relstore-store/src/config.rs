use serde::Deserialize;

/// Plain connection configuration, shaped the way the teacher's
/// `DatabaseConfig` is — a deserializable struct with no global state or
/// env/file layering of its own; that belongs to the host application.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: default_max_connections(),
        }
    }
}
