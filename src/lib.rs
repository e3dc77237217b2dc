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

//! # Bucket Courier
//!
//! A small convenience layer over cloud object storage, built on the
//! `object_store` crate. It exposes two operations: uploading a local file
//! to a bucket, and generating a time-limited signed download URL.
//!
//! Authentication, transport, retry, and URL-signing cryptography are the
//! backend client's responsibility; this layer only translates friendly
//! parameter structs into backend calls.
//!
//! ## Features
//!
//! - **Streamed uploads**: memory bounded by the copy buffer, not file size
//! - **Non-overwrite guard**: an upload fails if the destination object
//!   already exists, instead of silently replacing it
//! - **Bounded time**: every upload runs under a configurable ceiling
//!   (default one minute)
//! - **Signed GET URLs**: V4-scheme URLs signed with the credentials bound
//!   to the courier, for GCS, S3, and Azure backends
//!
//! ## Quick Start
//!
//! ### Upload to Google Cloud Storage
//!
//! ```rust,no_run
//! use bucket_courier::{Courier, CourierFactory, StorageConfig, UploadParams};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = StorageConfig::gcs()
//!     .with_option("bucket", "my-bucket")
//!     .with_option("service_account_key_path", "/path/to/key.json");
//!
//! let courier = CourierFactory::from_config(config)?;
//!
//! // Streams ./go_gcs.png to my-bucket/upload_tes/go_gcs.png
//! let params = UploadParams::new("go_gcs.png", ".", "upload_tes");
//! courier.upload(&params).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Generate a signed download URL
//!
//! ```rust,no_run
//! use bucket_courier::{Courier, CourierFactory, SignedUrlParams, StorageConfig};
//! use chrono::{Duration, Utc};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = StorageConfig::gcs().with_option("bucket", "my-bucket");
//! let courier = CourierFactory::from_config(config)?;
//!
//! let params = SignedUrlParams::new(
//!     "go_gcs.png",
//!     "upload_tes",
//!     Utc::now() + Duration::minutes(10),
//! );
//! let url = courier.signed_download_url(&params).await?;
//! println!("{}", url);
//! # Ok(())
//! # }
//! ```
//!
//! For runnable examples, see the `demos/` directory.
//!
//! ## Modules
//!
//! - [`config`] - Storage backend configuration
//! - [`courier`] - The storage facade trait
//! - [`store`] - The object_store-backed courier implementation
//! - [`params`] - Per-call parameter structs
//! - [`error`] - Error types
//! - [`factory`] - Courier construction

pub mod config;
pub mod courier;
pub mod error;
pub mod factory;
pub mod params;
pub mod store;

// Re-export commonly used types
pub use config::{StorageConfig, StorageType};
pub use courier::Courier;
pub use error::{StorageError, StorageResult};
pub use factory::CourierFactory;
pub use params::{SignedUrlParams, UploadParams};
pub use store::ObjectStoreCourier;
