use crate::backend::BackendClient;
use crate::board::HabitBoard;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub backend: BackendClient,
    pub board: Arc<Mutex<HabitBoard>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, backend: BackendClient, board: HabitBoard) -> Self {
        Self {
            data_path,
            backend,
            board: Arc::new(Mutex::new(board)),
        }
    }
}
