use crate::errors::AppError;
use crate::models::TaskMap;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_dir() -> Result<PathBuf, std::io::Error> {
    if let Ok(dir) = env::var("APP_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    Ok(PathBuf::from("data"))
}

fn month_path(dir: &Path, month_key: &str) -> PathBuf {
    dir.join(format!("{month_key}.json"))
}

/// Load one month's snapshot. Missing or unreadable snapshots fall back
/// to an empty map; corrupt data never takes the planner down.
pub async fn load_month(dir: &Path, month_key: &str) -> TaskMap {
    let path = month_path(dir, month_key);
    match fs::read(&path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(tasks) => tasks,
            Err(err) => {
                error!("failed to parse snapshot {month_key}: {err}");
                TaskMap::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => TaskMap::default(),
        Err(err) => {
            error!("failed to read snapshot {month_key}: {err}");
            TaskMap::default()
        }
    }
}

/// Write the full snapshot for one month. Called after every successful
/// transition, before the handler returns.
pub async fn persist_month(dir: &Path, month_key: &str, tasks: &TaskMap) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(tasks).map_err(AppError::internal)?;
    fs::write(month_path(dir, month_key), payload)
        .await
        .map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskRecord;

    fn unique_dir() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut dir = std::env::temp_dir();
        dir.push(format!("study_planner_storage_{}_{}", std::process::id(), nanos));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn snapshot_round_trips() {
        let dir = unique_dir();
        let mut tasks = TaskMap::new();
        tasks.insert(
            5,
            TaskRecord::Completed {
                text: "Read ch.3".into(),
            },
        );

        persist_month(&dir, "tasks-2024-2", &tasks).await.unwrap();
        let loaded = load_month(&dir, "tasks-2024-2").await;
        assert_eq!(loaded, tasks);
    }

    #[tokio::test]
    async fn months_do_not_mix() {
        let dir = unique_dir();
        let mut march = TaskMap::new();
        march.insert(1, TaskRecord::Saved { text: "march".into() });
        persist_month(&dir, "tasks-2024-2", &march).await.unwrap();

        let april = load_month(&dir, "tasks-2024-3").await;
        assert!(april.is_empty());

        let mut april = TaskMap::new();
        april.insert(1, TaskRecord::Saved { text: "april".into() });
        persist_month(&dir, "tasks-2024-3", &april).await.unwrap();

        let march_again = load_month(&dir, "tasks-2024-2").await;
        assert_eq!(march_again[&1].text(), "march");
    }

    #[tokio::test]
    async fn missing_snapshot_loads_empty() {
        let dir = unique_dir();
        assert!(load_month(&dir, "tasks-2030-0").await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_snapshot_loads_empty() {
        let dir = unique_dir();
        tokio::fs::write(month_path(&dir, "tasks-2024-5"), b"{not json")
            .await
            .unwrap();
        assert!(load_month(&dir, "tasks-2024-5").await.is_empty());
    }
}
