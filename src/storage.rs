//! Object storage for uploaded audio.
//!
//! The catalog only records where a file lives. Durable storage of the bytes
//! belongs to whatever sits behind the CDN, so the default store hands back a
//! locator under the CDN base without writing anything.

use uuid::Uuid;

use crate::error::Result;

#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Persist `bytes` under `key` and return the public URL.
    async fn store(&self, bytes: &[u8], key: &str) -> Result<String>;
}

/// Unique object key for an upload: `<uuid v4>_<file name>`.
pub fn unique_key(file_name: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), file_name)
}

#[derive(Debug, Clone)]
pub struct CdnUrlStore {
    base_url: String,
}

impl CdnUrlStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}{}", self.base_url, key)
    }
}

#[async_trait::async_trait]
impl ObjectStore for CdnUrlStore {
    async fn store(&self, bytes: &[u8], key: &str) -> Result<String> {
        tracing::debug!(key, size = bytes.len(), "Assigned CDN locator");
        Ok(self.url_for(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_key_keeps_file_name_suffix() {
        let key = unique_key("song.mp3");
        let (token, name) = key.split_once('_').unwrap();
        assert_eq!(name, "song.mp3");
        assert!(Uuid::parse_str(token).is_ok());
    }

    #[test]
    fn identical_names_get_distinct_keys() {
        assert_ne!(unique_key("a.mp3"), unique_key("a.mp3"));
    }

    #[tokio::test]
    async fn cdn_store_joins_base_and_key() {
        let store = CdnUrlStore::new("https://cdn.example.dev/music");
        let url = store.store(b"hello", "abc_a.mp3").await.unwrap();
        assert_eq!(url, "https://cdn.example.dev/music/abc_a.mp3");
    }
}
