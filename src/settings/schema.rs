//! Schema-coded config owned by the host (orbis-world style hosts).
//!
//! The host declares the record with its own codec, persists it, and creates
//! it with defaults on first access. The agent only reads it.

use super::{ConfigProvider, Configuration, MINIMUM_PLAYERS_FLOOR};
use serde::{Deserialize, Serialize};

/// The record as the host codec stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SchemaRecord {
    pub bvc_server: String,
    pub access_token: String,
    pub minimum_players: i32,
}

impl Default for SchemaRecord {
    fn default() -> Self {
        Self {
            bvc_server: String::new(),
            access_token: String::new(),
            minimum_players: MINIMUM_PLAYERS_FLOOR,
        }
    }
}

impl From<SchemaRecord> for Configuration {
    fn from(record: SchemaRecord) -> Self {
        Configuration {
            bvc_server: record.bvc_server,
            access_token: record.access_token,
            minimum_players: record.minimum_players,
        }
    }
}

/// Host-side accessor for the current record.
pub trait SchemaAccessor: Send + Sync {
    fn get(&self) -> SchemaRecord;
}

impl<F> SchemaAccessor for F
where
    F: Fn() -> SchemaRecord + Send + Sync,
{
    fn get(&self) -> SchemaRecord {
        self()
    }
}

pub struct SchemaProvider<A> {
    accessor: A,
}

impl<A: SchemaAccessor> SchemaProvider<A> {
    pub fn new(accessor: A) -> Self {
        Self { accessor }
    }
}

impl<A: SchemaAccessor> ConfigProvider for SchemaProvider<A> {
    fn load(&self) -> Configuration {
        self.accessor.get().into()
    }

    // The host creates the record with defaults on first access.
    fn create_default_if_missing(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_decodes_host_keys() {
        let record: SchemaRecord = serde_json::from_str(
            r#"{"BvcServer":"https://bvc.example","AccessToken":"abc"}"#,
        )
        .unwrap();
        assert_eq!(record.minimum_players, 2);

        let provider = SchemaProvider::new(move || record.clone());
        let cfg = provider.load();
        assert!(cfg.is_valid());
        assert_eq!(cfg.bvc_server, "https://bvc.example");
        assert!(provider.save(&cfg).is_ok());
    }
}
