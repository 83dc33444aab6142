use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::ENV;
use crate::api::error;

/// Disk-backed object store for room images.
///
/// Object keys are `{room_id}/{timestamp}-{index}.{ext}`; the key is what
/// gets persisted on the room row, and the public URL is derived from it on
/// the way out.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub max_file_size: usize,
    pub allowed_mime_types: Vec<String>,
    pub upload_dir: String,
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            allowed_mime_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/gif".to_string(),
                "image/webp".to_string(),
            ],
            upload_dir: ENV.upload_dir.clone(),
            public_base_url: ENV.public_storage_url.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RoomImageStore {
    config: StorageConfig,
}

impl RoomImageStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn object_key(room_id: &Uuid, timestamp_millis: i64, index: usize, ext: &str) -> String {
        if ext.is_empty() {
            format!("{}/{}-{}", room_id, timestamp_millis, index)
        } else {
            format!("{}/{}-{}.{}", room_id, timestamp_millis, index, ext)
        }
    }

    pub fn extension_of(filename: &str) -> &str {
        Path::new(filename).extension().and_then(|ext| ext.to_str()).unwrap_or("")
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.config.public_base_url, key)
    }

    pub fn public_base_url(&self) -> &str {
        &self.config.public_base_url
    }

    pub fn validate(&self, file_size: usize, mime_type: &str) -> Result<(), error::SystemError> {
        if file_size > self.config.max_file_size {
            return Err(error::SystemError::bad_request(format!(
                "File size exceeds maximum allowed size of {} bytes",
                self.config.max_file_size
            )));
        }

        if !self.config.allowed_mime_types.iter().any(|m| m == mime_type) {
            return Err(error::SystemError::bad_request(format!(
                "File type '{}' is not allowed",
                mime_type
            )));
        }

        Ok(())
    }

    fn object_path(&self, key: &str) -> PathBuf {
        Path::new(&self.config.upload_dir).join(key)
    }

    pub async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), error::SystemError> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    pub async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, error::SystemError> {
        match tokio::fs::read(self.object_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the given objects. Missing files are skipped, so the cascade
    /// saga can re-run this step safely.
    pub async fn remove_all(&self, keys: &[String]) {
        for key in keys {
            let path = self.object_path(key);
            if let Err(e) = tokio::fs::remove_file(&path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to remove storage object {}: {}", key, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> RoomImageStore {
        RoomImageStore::new(StorageConfig {
            max_file_size: 1024,
            allowed_mime_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
            upload_dir: "/tmp/roomrent-test".to_string(),
            public_base_url: "/storage/room-images".to_string(),
        })
    }

    #[test]
    fn test_object_key_format() {
        let room_id = Uuid::parse_str("0191c1a0-0000-7000-8000-000000000001").unwrap();
        let key = RoomImageStore::object_key(&room_id, 1700000000123, 0, "jpg");
        assert_eq!(key, format!("{}/1700000000123-0.jpg", room_id));

        let bare = RoomImageStore::object_key(&room_id, 1700000000123, 2, "");
        assert_eq!(bare, format!("{}/1700000000123-2", room_id));
    }

    #[test]
    fn test_public_url_derived_from_key() {
        let store = test_store();
        assert_eq!(store.public_url("r1/111-0.jpg"), "/storage/room-images/r1/111-0.jpg");
    }

    #[test]
    fn test_validate_rejects_oversize_and_wrong_type() {
        let store = test_store();
        assert!(store.validate(100, "image/jpeg").is_ok());
        assert!(store.validate(2048, "image/jpeg").is_err());
        assert!(store.validate(100, "application/pdf").is_err());
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(RoomImageStore::extension_of("photo.JPG"), "JPG");
        assert_eq!(RoomImageStore::extension_of("noext"), "");
    }
}
