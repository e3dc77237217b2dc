//! Upload a local file to a bucket.
//!
//! Expects the bucket name (and optionally credentials) in the
//! environment, and `./go_gcs.png` on disk:
//!
//! ```sh
//! export GOOGLE_APPLICATION_BUCKET=my-bucket
//! export GOOGLE_APPLICATION_CREDENTIALS=/path/to/key.json
//! cargo run --example upload
//! ```

use bucket_courier::{Courier, CourierFactory, StorageConfig, UploadParams};

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

    let params = UploadParams::new("go_gcs.png", ".", "upload_tes");
    courier.upload(&params).await.unwrap();

    println!("Uploaded go_gcs.png to {}/upload_tes", bucket);
}
