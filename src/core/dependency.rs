use crate::domain::ports::BusinessDirectory;
use crate::utils::error::{BizMapError, Result, DIRECTORY_REQUIRED_NOTICE};

/// Refuse to render anything until the business directory answers.
pub async fn ensure_directory_available<D: BusinessDirectory + ?Sized>(directory: &D) -> Result<()> {
    let source_desc = directory.describe();

    match directory.health_check().await {
        Ok(()) => {
            tracing::debug!("✅ Business directory available: {}", source_desc);
            Ok(())
        }
        Err(BizMapError::DirectoryUnavailable { source_desc, message }) => {
            tracing::error!("❌ {} ({}: {})", DIRECTORY_REQUIRED_NOTICE, source_desc, message);
            Err(BizMapError::DirectoryUnavailable { source_desc, message })
        }
        Err(e) => {
            tracing::error!("❌ {} ({}: {})", DIRECTORY_REQUIRED_NOTICE, source_desc, e);
            Err(BizMapError::DirectoryUnavailable {
                source_desc,
                message: e.to_string(),
            })
        }
    }
}
