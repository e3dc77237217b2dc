// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may obtain a copy
// of the License at http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under
// the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR REPRESENTATIONS
// OF ANY KIND, either express or implied. See the License for the specific language
// governing permissions and limitations under the License.

use async_trait::async_trait;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use url::Url;

use crate::error::StorageResult;
use crate::params::{SignedUrlParams, UploadParams};

/// Facade over a cloud storage backend.
///
/// A courier is created once per bucket, owns the backend session, and is
/// safe to share across sequential or concurrent calls. Each call is
/// independent; the courier holds no per-call state.
#[async_trait]
pub trait Courier: Send + Sync {
    /// Get the backend URL the courier writes to (e.g., "gs://bucket",
    /// "s3://bucket", or a local base directory).
    fn base_url(&self) -> &str;

    /// Upload a local file to the bucket.
    ///
    /// Streams `{local_dir}/{object}` to the destination key
    /// `{dest_prefix}/{object}`, subject to the configured time limit.
    /// The destination object must not already exist; an existing object
    /// is never overwritten.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The source file is missing or unreadable
    /// * The destination object already exists
    /// * The configured upload time limit elapses
    /// * The backend rejects the write (credentials, network, quota)
    async fn upload(&self, params: &UploadParams) -> StorageResult<()>;

    /// Generate a signed, time-limited GET URL for an object.
    ///
    /// Signing uses the credentials already bound to the courier; no key
    /// material is passed per call. The expiration time must be in the
    /// future at the time of the call.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The expiration time is not in the future
    /// * The backend does not support URL signing (local filesystem)
    /// * The backend's signing request fails (credentials, permissions)
    async fn signed_download_url(&self, params: &SignedUrlParams) -> StorageResult<Url>;
}

impl Debug for dyn Courier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Courier(base_url={})", self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockCourier;

    #[async_trait]
    impl Courier for MockCourier {
        fn base_url(&self) -> &str {
            "gs://mock-bucket"
        }

        async fn upload(&self, _params: &UploadParams) -> StorageResult<()> {
            Ok(())
        }

        async fn signed_download_url(&self, params: &SignedUrlParams) -> StorageResult<Url> {
            let url = format!(
                "https://storage.example.com/mock-bucket/{}?sig=abc",
                params.dest_path()
            );
            Ok(Url::parse(&url).unwrap())
        }
    }

    #[test]
    fn test_courier_debug() {
        let courier: &dyn Courier = &MockCourier;
        let debug_str = format!("{:?}", courier);
        assert!(debug_str.contains("Courier"));
        assert!(debug_str.contains("gs://mock-bucket"));
    }

    #[tokio::test]
    async fn test_mock_courier_signed_url_contains_key() {
        let courier: &dyn Courier = &MockCourier;
        let params = SignedUrlParams::new(
            "go_gcs.png",
            "upload_tes",
            chrono::Utc::now() + chrono::Duration::minutes(10),
        );
        let url = courier.signed_download_url(&params).await.unwrap();
        assert!(url.path().contains("upload_tes/go_gcs.png"));
    }
}
