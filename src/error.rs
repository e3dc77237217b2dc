// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Source file not found or unreadable: {path}: {source}")]
    SourceNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Destination object already exists: {0}")]
    AlreadyExists(String),

    #[error("Upload timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("Signed URLs are not supported by {0} storage")]
    SignedUrlUnsupported(String),

    #[error("Expiration time must be in the future, got {0}")]
    InvalidExpiration(DateTime<Utc>),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Object store error: {0}")]
    ObjectStoreError(#[source] object_store::Error),
}

impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        match err {
            // The backend's own non-overwrite precondition tripping is the
            // same condition as our pre-flight guard
            object_store::Error::AlreadyExists { path, .. } => Self::AlreadyExists(path),
            other => Self::ObjectStoreError(other),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_error() {
        let error = StorageError::ConfigError("Invalid configuration".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_invalid_params_error() {
        let error = StorageError::InvalidParams("object key must not be empty".to_string());
        assert!(error.to_string().contains("object key must not be empty"));
    }

    #[test]
    fn test_source_not_found_error() {
        let error = StorageError::SourceNotFound {
            path: PathBuf::from("./missing.png"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file"),
        };
        let msg = error.to_string();
        assert!(msg.contains("Source file not found"));
        assert!(msg.contains("missing.png"));
    }

    #[test]
    fn test_already_exists_error() {
        let error = StorageError::AlreadyExists("upload_tes/photo.png".to_string());
        assert_eq!(
            error.to_string(),
            "Destination object already exists: upload_tes/photo.png"
        );
    }

    #[test]
    fn test_timeout_error_reports_seconds() {
        let error = StorageError::Timeout(Duration::from_secs(60));
        assert_eq!(error.to_string(), "Upload timed out after 60 seconds");
    }

    #[test]
    fn test_signed_url_unsupported_error() {
        let error = StorageError::SignedUrlUnsupported("local".to_string());
        assert_eq!(
            error.to_string(),
            "Signed URLs are not supported by local storage"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let storage_error: StorageError = io_error.into();

        match storage_error {
            StorageError::IoError(_) => {
                assert!(storage_error.to_string().contains("IO error"));
            }
            _ => panic!("Expected IoError variant"),
        }
    }

    #[test]
    fn test_object_store_already_exists_mapping() {
        let backend_error = object_store::Error::AlreadyExists {
            path: "upload_tes/photo.png".to_string(),
            source: "precondition failed".into(),
        };
        let storage_error: StorageError = backend_error.into();

        match storage_error {
            StorageError::AlreadyExists(path) => assert_eq!(path, "upload_tes/photo.png"),
            _ => panic!("Expected AlreadyExists variant"),
        }
    }

    #[test]
    fn test_object_store_generic_error_mapping() {
        let backend_error = object_store::Error::NotFound {
            path: "upload_tes/photo.png".to_string(),
            source: "missing".into(),
        };
        let storage_error: StorageError = backend_error.into();

        match storage_error {
            StorageError::ObjectStoreError(_) => {
                assert!(storage_error.to_string().contains("Object store error"));
            }
            _ => panic!("Expected ObjectStoreError variant"),
        }
    }

    #[test]
    fn test_error_debug() {
        let error = StorageError::ConfigError("test".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("ConfigError"));
    }

    #[test]
    fn test_storage_result_err() {
        let result: StorageResult<i32> = Err(StorageError::ConfigError("error".to_string()));
        assert!(result.is_err());
    }
}
