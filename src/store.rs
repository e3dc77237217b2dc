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

use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use http::Method;
use object_store::buffered::BufWriter;
use object_store::path::Path as ObjectPath;
use object_store::signer::Signer;
use object_store::{
    aws::AmazonS3Builder, azure::MicrosoftAzureBuilder, gcp::GoogleCloudStorageBuilder,
    local::LocalFileSystem, ClientOptions, ObjectStore, RetryConfig,
};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;

use super::config::{StorageConfig, StorageType};
use super::courier::Courier;
use super::error::{StorageError, StorageResult};
use super::params::{SignedUrlParams, UploadParams};

/// Fallback ceiling for a single upload when the `upload_timeout` option is
/// absent or unparseable
const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Option keys consumed by the connection/retry/upload plumbing rather than
/// by the per-backend builders
const RESERVED_OPTIONS: [&str; 7] = [
    "upload_timeout",
    "timeout",
    "connect_timeout",
    "max_retries",
    "retry_timeout",
    "pool_idle_timeout",
    "pool_max_idle_per_host",
];

/// Courier implementation that works with any object_store backend
///
/// Holds the backend session and, for cloud backends, the signing handle.
/// Safe to share across concurrent calls; no additional synchronization is
/// introduced on top of the backend client.
pub struct ObjectStoreCourier {
    pub config: StorageConfig,
    pub store: Arc<dyn ObjectStore>,
    pub signer: Option<Arc<dyn Signer>>,
    pub base_url: String,
    pub upload_timeout: Duration,
}

impl ObjectStoreCourier {
    /// Create a new courier from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Storage configuration specifying the storage type and options
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The storage configuration is invalid
    /// * Required configuration options are missing (e.g., `bucket`)
    /// * The storage backend cannot be created (e.g., invalid credentials)
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let (store, signer, base_url) = Self::build_store(&config)?;
        let upload_timeout = Self::get_upload_timeout(&config);

        Ok(Self {
            config,
            store,
            signer,
            base_url,
            upload_timeout,
        })
    }

    /// Build the appropriate object store and signer based on configuration.
    ///
    /// The signer is `Some` for cloud backends that support signed URLs and
    /// `None` for the local filesystem.
    #[allow(clippy::type_complexity)]
    fn build_store(
        config: &StorageConfig,
    ) -> StorageResult<(Arc<dyn ObjectStore>, Option<Arc<dyn Signer>>, String)> {
        match config.storage_type {
            StorageType::Local => Self::build_local_store(config),
            StorageType::Aws => Self::build_aws_store(config),
            StorageType::Azure => Self::build_azure_store(config),
            StorageType::Gcs => Self::build_gcs_store(config),
        }
    }

    /// Build a local filesystem store.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The 'path' option is missing from configuration
    /// * The path cannot be canonicalized (doesn't exist or permission denied)
    /// * The path is not a directory
    #[allow(clippy::type_complexity)]
    fn build_local_store(
        config: &StorageConfig,
    ) -> StorageResult<(Arc<dyn ObjectStore>, Option<Arc<dyn Signer>>, String)> {
        let path = config.options.get("path").ok_or_else(|| {
            StorageError::ConfigError("Local storage requires 'path' option".to_string())
        })?;
        let base_path = PathBuf::from(path);

        // Canonicalize the path (handles both relative and absolute paths, resolves symlinks)
        let canonical_path = base_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to resolve path '{}': {} (path must exist)",
                path, e
            ))
        })?;

        if !canonical_path.is_dir() {
            return Err(StorageError::ConfigError(format!(
                "Base path is not a directory: {}",
                canonical_path.display()
            )));
        }

        let store = LocalFileSystem::new_with_prefix(&canonical_path).map_err(|e| {
            StorageError::ConfigError(format!("Failed to create local store: {}", e))
        })?;

        let base_url = canonical_path.to_string_lossy().to_string();
        let store: Arc<dyn ObjectStore> = Arc::new(store);
        Ok((store, None, base_url))
    }

    /// Build connection options from configuration.
    fn build_connection_options(config: &StorageConfig) -> ClientOptions {
        let mut client_options = ClientOptions::default();
        if let Some(timeout_str) = config.options.get("timeout") {
            if timeout_str == "0" || timeout_str == "disabled" {
                client_options = client_options.with_timeout_disabled();
            } else if let Ok(sec) = timeout_str.parse::<u64>() {
                client_options = client_options.with_timeout(Duration::from_secs(sec))
            }
        };
        if let Some(connect_timeout_str) = config.options.get("connect_timeout") {
            if connect_timeout_str == "0" || connect_timeout_str == "disabled" {
                client_options = client_options.with_connect_timeout_disabled();
            } else if let Ok(sec) = connect_timeout_str.parse::<u64>() {
                client_options = client_options.with_connect_timeout(Duration::from_secs(sec))
            }
        }
        if let Some(pool_idle_timeout_str) = config.options.get("pool_idle_timeout") {
            if let Ok(sec) = pool_idle_timeout_str.parse::<u64>() {
                client_options = client_options.with_pool_idle_timeout(Duration::from_secs(sec))
            }
        }
        if let Some(pool_max_idle_per_host_str) = config.options.get("pool_max_idle_per_host") {
            if let Ok(max_idle) = pool_max_idle_per_host_str.parse::<usize>() {
                client_options = client_options.with_pool_max_idle_per_host(max_idle)
            }
        }
        client_options
    }

    /// Build retry options from configuration.
    ///
    /// Transient-failure retry is the backend client's job; this only tunes
    /// its built-in policy.
    fn build_retry_options(config: &StorageConfig) -> RetryConfig {
        let default_retry_config = RetryConfig::default();
        let max_retries = config
            .options
            .get("max_retries")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(default_retry_config.max_retries);
        let retry_timeout = config
            .options
            .get("retry_timeout")
            .and_then(|s| Some(Duration::from_secs(s.parse::<u64>().ok()?)))
            .unwrap_or(default_retry_config.retry_timeout);
        RetryConfig {
            backoff: Default::default(),
            max_retries,
            retry_timeout,
        }
    }

    /// Get the upload time ceiling from config (seconds), defaulting to one minute.
    fn get_upload_timeout(config: &StorageConfig) -> Duration {
        config
            .options
            .get("upload_timeout")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_UPLOAD_TIMEOUT)
    }

    /// Build an AWS S3 store.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The 'bucket' option is missing or empty
    /// * The S3 store cannot be initialized
    #[allow(clippy::type_complexity)]
    fn build_aws_store(
        config: &StorageConfig,
    ) -> StorageResult<(Arc<dyn ObjectStore>, Option<Arc<dyn Signer>>, String)> {
        let mut builder = AmazonS3Builder::new()
            .with_client_options(Self::build_connection_options(config))
            .with_retry(Self::build_retry_options(config));
        let mut bucket: Option<&String> = None;
        let mut endpoint: Option<&String> = None;

        for (key, value) in &config.options {
            match key.as_str() {
                "bucket" => {
                    bucket = Some(value);
                    builder = builder.with_bucket_name(value);
                }
                "region" => builder = builder.with_region(value),
                "access_key_id" => builder = builder.with_access_key_id(value),
                "secret_access_key" => builder = builder.with_secret_access_key(value),
                "session_token" | "token" => builder = builder.with_token(value),
                "endpoint" => {
                    endpoint = Some(value);
                    builder = builder.with_endpoint(value);
                }
                "allow_http" => {
                    if value.to_lowercase() == "true" {
                        builder = builder.with_allow_http(true);
                    }
                }
                key if RESERVED_OPTIONS.contains(&key) => (),
                _ => {
                    warn!("Unknown AWS S3 option: {}", key);
                }
            }
        }

        let bucket = require_bucket(bucket, "AWS S3", "bucket")?;

        let store = Arc::new(builder.build().map_err(|e| {
            StorageError::ConfigError(format!("Failed to create S3 store: {}", e))
        })?);

        let base_url = if let Some(endpoint_url) = endpoint {
            endpoint_url.trim_end_matches('/').to_string()
        } else {
            format!("s3://{}", bucket)
        };

        let signer: Arc<dyn Signer> = store.clone();
        let store: Arc<dyn ObjectStore> = store;
        Ok((store, Some(signer), base_url))
    }

    /// Build an Azure Blob store.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The 'account_name' or 'container' option is missing
    /// * The Azure store cannot be initialized
    #[allow(clippy::type_complexity)]
    fn build_azure_store(
        config: &StorageConfig,
    ) -> StorageResult<(Arc<dyn ObjectStore>, Option<Arc<dyn Signer>>, String)> {
        let mut builder = MicrosoftAzureBuilder::new()
            .with_client_options(Self::build_connection_options(config))
            .with_retry(Self::build_retry_options(config));

        let account_name = config.get_option("account_name").ok_or_else(|| {
            StorageError::ConfigError("Azure requires 'account_name' option".to_string())
        })?;
        let container = config.get_option("container").ok_or_else(|| {
            StorageError::ConfigError("Azure requires 'container' option".to_string())
        })?;
        let container = require_bucket(Some(container), "Azure", "container")?;

        builder = builder.with_account(account_name);

        for (key, value) in &config.options {
            match key.as_str() {
                "container" => builder = builder.with_container_name(value),
                "account_name" => (),
                "access_key" | "account_key" => builder = builder.with_access_key(value),
                "tenant_id" => builder = builder.with_tenant_id(value),
                "client_id" => builder = builder.with_client_id(value),
                "client_secret" => builder = builder.with_client_secret(value),
                key if RESERVED_OPTIONS.contains(&key) => (),
                _ => {
                    warn!("Unknown Azure option: {}", key);
                }
            }
        }

        let store = Arc::new(builder.build().map_err(|e| {
            StorageError::ConfigError(format!("Failed to create Azure store: {}", e))
        })?);

        let base_url = format!(
            "abfss://{}@{}.dfs.core.windows.net",
            container, account_name
        );

        let signer: Arc<dyn Signer> = store.clone();
        let store: Arc<dyn ObjectStore> = store;
        Ok((store, Some(signer), base_url))
    }

    /// Build a GCS store.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The 'bucket' option is missing or empty
    /// * The GCS store cannot be initialized (e.g., unreadable key file)
    #[allow(clippy::type_complexity)]
    fn build_gcs_store(
        config: &StorageConfig,
    ) -> StorageResult<(Arc<dyn ObjectStore>, Option<Arc<dyn Signer>>, String)> {
        let mut builder = GoogleCloudStorageBuilder::new()
            .with_client_options(Self::build_connection_options(config))
            .with_retry(Self::build_retry_options(config));
        let mut bucket: Option<&String> = None;

        for (key, value) in &config.options {
            match key.as_str() {
                "bucket" => {
                    bucket = Some(value);
                    builder = builder.with_bucket_name(value);
                }
                "service_account_key_path" => builder = builder.with_service_account_path(value),
                "service_account_key" => builder = builder.with_service_account_key(value),
                "application_credentials" => {
                    builder = builder.with_application_credentials(value)
                }
                "project_id" => {
                    // Object addressing is bucket-scoped; the project is
                    // carried by the credentials
                    debug!("GCS option 'project_id' is informational: {}", value);
                }
                key if RESERVED_OPTIONS.contains(&key) => (),
                _ => {
                    warn!("Unknown GCS option: {}", key);
                }
            }
        }

        let bucket = require_bucket(bucket, "GCS", "bucket")?;

        let store = Arc::new(builder.build().map_err(|e| {
            StorageError::ConfigError(format!("Failed to create GCS store: {}", e))
        })?);

        let base_url = format!("gs://{}", bucket);

        let signer: Arc<dyn Signer> = store.clone();
        let store: Arc<dyn ObjectStore> = store;
        Ok((store, Some(signer), base_url))
    }

    /// Stream the source file into the destination object.
    ///
    /// The destination must not already exist; an existing object fails the
    /// call without being touched. Returns the number of bytes copied.
    async fn transfer(
        store: Arc<dyn ObjectStore>,
        file: &mut fs::File,
        writer: &mut BufWriter,
        dest: &ObjectPath,
    ) -> StorageResult<u64> {
        match store.head(dest).await {
            Ok(_) => return Err(StorageError::AlreadyExists(dest.to_string())),
            Err(object_store::Error::NotFound { .. }) => (),
            Err(e) => return Err(e.into()),
        }

        let bytes = tokio::io::copy(file, writer).await?;
        writer.shutdown().await?;
        Ok(bytes)
    }
}

/// Run an operation under a hard time ceiling, mapping elapse to a timeout error.
async fn with_time_limit<T, F>(limit: Duration, operation: F) -> StorageResult<T>
where
    F: Future<Output = StorageResult<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(StorageError::Timeout(limit)),
    }
}

fn require_bucket<'a>(
    bucket: Option<&'a String>,
    backend: &str,
    option: &str,
) -> StorageResult<&'a String> {
    match bucket {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(StorageError::ConfigError(format!(
            "{} requires a non-empty '{}' option",
            backend, option
        ))),
    }
}

#[async_trait]
impl Courier for ObjectStoreCourier {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn upload(&self, params: &UploadParams) -> StorageResult<()> {
        params.validate()?;

        let source = params.source_path();
        let mut file = fs::File::open(&source)
            .await
            .map_err(|e| StorageError::SourceNotFound {
                path: source.clone(),
                source: e,
            })?;

        let dest = params.dest_path();
        let mut writer = BufWriter::new(Arc::clone(&self.store), dest.clone());

        let result = with_time_limit(
            self.upload_timeout,
            Self::transfer(Arc::clone(&self.store), &mut file, &mut writer, &dest),
        )
        .await;

        match result {
            Ok(bytes) => {
                info!(
                    "Uploaded {} ({} bytes) to {}/{}",
                    params.object, bytes, self.base_url, params.dest_prefix
                );
                Ok(())
            }
            Err(err) => {
                // Releases any partially written multipart state; the file
                // handle closes on drop
                if let Err(abort_err) = writer.abort().await {
                    warn!("Failed to abort upload of {}: {}", dest, abort_err);
                }
                Err(err)
            }
        }
    }

    async fn signed_download_url(&self, params: &SignedUrlParams) -> StorageResult<Url> {
        params.validate()?;

        let now = Utc::now();
        if params.expires_at <= now {
            return Err(StorageError::InvalidExpiration(params.expires_at));
        }
        let expires_in = (params.expires_at - now)
            .to_std()
            .map_err(|_| StorageError::InvalidExpiration(params.expires_at))?;

        let signer = self.signer.as_ref().ok_or_else(|| {
            StorageError::SignedUrlUnsupported(self.config.storage_type_str().to_string())
        })?;

        let dest = params.dest_path();
        let url = signer.signed_url(Method::GET, &dest, expires_in).await?;

        debug!("Signed download URL generated for {}/{}", self.base_url, dest);
        Ok(url)
    }
}

impl Debug for ObjectStoreCourier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ObjectStoreCourier(type={}, base_url={}, upload_timeout={:?})",
            self.config.storage_type_str(),
            self.base_url,
            self.upload_timeout
        )
    }
}
