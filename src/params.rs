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

use chrono::{DateTime, Utc};
use object_store::path::Path as ObjectPath;

use crate::error::{StorageError, StorageResult};

/// Per-call parameters for uploading a local file to the bucket.
///
/// The source file is read from `{local_dir}/{object}` and written to the
/// destination key `{dest_prefix}/{object}`. Constructed per upload and
/// discarded after the call returns.
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// Object name, used both as the local file name and the destination key suffix
    pub object: String,

    /// Local directory holding the source file
    pub local_dir: String,

    /// Destination key prefix inside the bucket
    pub dest_prefix: String,
}

impl UploadParams {
    pub fn new(
        object: impl Into<String>,
        local_dir: impl Into<String>,
        dest_prefix: impl Into<String>,
    ) -> Self {
        Self {
            object: object.into(),
            local_dir: local_dir.into(),
            dest_prefix: dest_prefix.into(),
        }
    }

    /// Local path of the source file: `{local_dir}/{object}`.
    pub fn source_path(&self) -> PathBuf {
        PathBuf::from(&self.local_dir).join(&self.object)
    }

    /// Destination key inside the bucket: `{dest_prefix}/{object}`.
    pub fn dest_path(&self) -> ObjectPath {
        join_key(&self.dest_prefix, &self.object)
    }

    pub(crate) fn validate(&self) -> StorageResult<()> {
        if self.object.is_empty() {
            return Err(StorageError::InvalidParams(
                "object key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-call parameters for generating a signed download URL.
#[derive(Debug, Clone)]
pub struct SignedUrlParams {
    /// Object name, the destination key suffix
    pub object: String,

    /// Destination key prefix inside the bucket
    pub dest_prefix: String,

    /// Absolute time at which the URL stops being valid; must be in the future
    pub expires_at: DateTime<Utc>,
}

impl SignedUrlParams {
    pub fn new(
        object: impl Into<String>,
        dest_prefix: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            object: object.into(),
            dest_prefix: dest_prefix.into(),
            expires_at,
        }
    }

    /// Destination key inside the bucket: `{dest_prefix}/{object}`.
    pub fn dest_path(&self) -> ObjectPath {
        join_key(&self.dest_prefix, &self.object)
    }

    pub(crate) fn validate(&self) -> StorageResult<()> {
        if self.object.is_empty() {
            return Err(StorageError::InvalidParams(
                "object key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn join_key(prefix: &str, object: &str) -> ObjectPath {
    if prefix.is_empty() {
        ObjectPath::from(object)
    } else {
        ObjectPath::from(format!("{}/{}", prefix.trim_end_matches('/'), object))
    }
}
