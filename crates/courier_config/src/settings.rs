use serde::Deserialize;

/// Top-level configuration for the broker and its durable store.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Durable store location and namespace.
    pub store: StoreSettings,
    /// Delivery sink parameters.
    pub sink: SinkSettings,
    /// Logging parameters.
    pub log: LogSettings,
}

/// Configuration of the durable message store.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    /// Filesystem path of the sled database.
    pub path: String,
    /// Logical namespace prefixing every subject tree. Two namespaces in
    /// the same database never see each other's records.
    pub namespace: String,
}

/// Configuration of the per-subscriber delivery sinks.
#[derive(Debug, Deserialize, Clone)]
pub struct SinkSettings {
    /// Bounded capacity of each subscriber's delivery queue. A full queue
    /// blocks publishes on that subject rather than dropping messages.
    pub buffer_capacity: usize,
}

/// Configuration of the tracing output.
#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    /// Severity passed to the tracing subscriber ("error" through "trace").
    pub level: String,
}

/// Partial configuration loaded from files or environment.
///
/// Allows partial specification of settings. Missing values are filled
/// from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub store: Option<PartialStoreSettings>,
    pub sink: Option<PartialSinkSettings>,
    pub log: Option<PartialLogSettings>,
}

/// Partial store settings.
#[derive(Debug, Deserialize)]
pub struct PartialStoreSettings {
    pub path: Option<String>,
    pub namespace: Option<String>,
}

/// Partial sink settings.
#[derive(Debug, Deserialize)]
pub struct PartialSinkSettings {
    pub buffer_capacity: Option<usize>,
}

/// Partial log settings.
#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreSettings {
                path: "courier_db".to_string(),
                namespace: "messages".to_string(),
            },
            sink: SinkSettings {
                buffer_capacity: 128,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}
