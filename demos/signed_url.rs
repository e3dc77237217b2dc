//! Generate a signed download URL for an object.
//!
//! Expects the bucket name (and optionally credentials) in the
//! environment; the URL is valid for ten minutes:
//!
//! ```sh
//! export GOOGLE_APPLICATION_BUCKET=my-bucket
//! export GOOGLE_APPLICATION_CREDENTIALS=/path/to/key.json
//! cargo run --example signed_url
//! ```

use bucket_courier::{Courier, CourierFactory, SignedUrlParams, StorageConfig};
use chrono::{Duration, Utc};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let bucket =
        std::env::var("GOOGLE_APPLICATION_BUCKET").expect("GOOGLE_APPLICATION_BUCKET must be set");

    let mut config = StorageConfig::gcs().with_option("bucket", &bucket);
    if let Ok(key_path) = std::env::var("GOOGLE_APPLICATION_CREDENTIALS") {
        config = config.with_option("service_account_key_path", key_path);
    }

    let courier = CourierFactory::from_config(config).unwrap();

    let params = SignedUrlParams::new("go_gcs.png", "upload_tes", Utc::now() + Duration::minutes(10));
    let url = courier.signed_download_url(&params).await.unwrap();

    println!("Signed URL: {}", url);
}
