use crate::table::ReportTable;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub table: Arc<Mutex<ReportTable>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, table: ReportTable) -> Self {
        Self {
            data_path,
            table: Arc::new(Mutex::new(table)),
        }
    }
}
