use crate::core::interfaces::SourceReader;
use crate::utils::{BundleError, Result};
use std::path::Path;
use tokio::fs;

pub struct TokioFileSystemService;

#[async_trait::async_trait]
impl SourceReader for TokioFileSystemService {
    async fn check_readable(&self, path: &Path) -> Result<()> {
        let file = fs::File::open(path)
            .await
            .map_err(|e| BundleError::read(path, e))?;

        let metadata = file
            .metadata()
            .await
            .map_err(|e| BundleError::read(path, e))?;

        if metadata.is_dir() {
            return Err(BundleError::read(
                path,
                std::io::Error::new(std::io::ErrorKind::Other, "is a directory"),
            ));
        }

        Ok(())
    }

    async fn read_source(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).await.map_err(|e| BundleError::read(path, e))
    }
}
