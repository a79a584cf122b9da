use crate::errors::AppError;
use crate::models::BoardSnapshot;
use std::path::Path;
use tokio::fs;
use tracing::error;

pub async fn load_board(path: &Path) -> BoardSnapshot {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("failed to parse board file: {err}");
                BoardSnapshot::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BoardSnapshot::default(),
        Err(err) => {
            error!("failed to read board file: {err}");
            BoardSnapshot::default()
        }
    }
}

pub async fn persist_board(path: &Path, snapshot: &BoardSnapshot) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(snapshot).map_err(AppError::internal)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitListItem;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("habit_board_{tag}_{}_{nanos}/board.json", std::process::id()))
    }

    #[tokio::test]
    async fn missing_file_loads_empty_board() {
        let snapshot = load_board(&temp_path("missing")).await;
        assert!(snapshot.items.is_empty());
        assert!(snapshot.streaks.is_empty());
    }

    #[tokio::test]
    async fn persisted_board_loads_back() {
        let path = temp_path("roundtrip");
        let mut snapshot = BoardSnapshot::default();
        snapshot.items.push(HabitListItem {
            id: 3,
            name: "read".to_string(),
            checked: true,
            is_default_made: false,
        });
        snapshot.streaks.insert(3, 12);

        persist_board(&path, &snapshot).await.unwrap();
        let loaded = load_board(&path).await;
        assert_eq!(loaded.items, snapshot.items);
        assert_eq!(loaded.streaks.get(&3), Some(&12));
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty_board() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, b"{ not json").await.unwrap();
        assert!(load_board(&path).await.items.is_empty());
    }
}
