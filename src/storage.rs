use crate::table::ReportTable;
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("data file encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

pub async fn load_table(path: &Path) -> ReportTable {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(table) => table,
            Err(err) => {
                error!(path = %path.display(), "failed to parse data file: {err}");
                ReportTable::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => ReportTable::default(),
        Err(err) => {
            error!(path = %path.display(), "failed to read data file: {err}");
            ReportTable::default()
        }
    }
}

pub async fn persist_table(path: &Path, table: &ReportTable) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(table)?;
    fs::write(path, payload).await?;
    Ok(())
}
