use std::sync::Arc;

use super::config::StorageConfig;
use super::courier::Courier;
use super::error::StorageResult;
use super::store::ObjectStoreCourier;

/// Factory for creating couriers
pub struct CourierFactory;

impl CourierFactory {
    /// Create a courier from a configuration.
    ///
    /// This factory creates a generic courier that works with any
    /// object_store backend (AWS S3, Azure, GCS, or local filesystem).
    /// Initialization failure is returned to the caller, never treated as
    /// fatal, so the facade is embeddable in long-running services.
    ///
    /// # Arguments
    ///
    /// * `config` - The storage configuration specifying the backend type and options
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Arc<dyn Courier>)` - A thread-safe reference to the initialized courier
    /// * `Err(StorageError)` - If the courier cannot be created
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The storage configuration is invalid
    /// * Required configuration options are missing
    /// * The backend client cannot be initialized
    pub fn from_config(config: StorageConfig) -> StorageResult<Arc<dyn Courier>> {
        let courier = ObjectStoreCourier::new(config)?;
        Ok(Arc::new(courier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_config_local() {
        let temp_dir = TempDir::new().unwrap();
        let config =
            StorageConfig::local().with_option("path", temp_dir.path().to_str().unwrap());

        let courier = CourierFactory::from_config(config).unwrap();
        assert!(format!("{:?}", courier).contains("Courier"));
    }

    #[test]
    fn test_from_config_invalid() {
        let config = StorageConfig::local();
        assert!(CourierFactory::from_config(config).is_err());
    }
}
