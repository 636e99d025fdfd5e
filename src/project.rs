use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use crate::constants::PROJECT_FILE_NAME;
use crate::error::StoreError;
use crate::types::SavedProject;

// プロジェクトを保存
pub fn save_project(data_dir: &Path, project: &SavedProject) -> Result<PathBuf, StoreError> {
    // 保存先ディレクトリが存在することを確認
    fs::create_dir_all(data_dir).map_err(|e| StoreError::io(data_dir, e))?;

    let path = data_dir.join(PROJECT_FILE_NAME);
    let json = serde_json::to_string_pretty(project)?;
    fs::write(&path, json).map_err(|e| StoreError::io(&path, e))?;

    Ok(path)
}

/// プロジェクトを読み込み。まだ保存されていなければ `None`
pub fn load_project(data_dir: &Path) -> Result<Option<SavedProject>, StoreError> {
    let path = data_dir.join(PROJECT_FILE_NAME);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(&path, e)),
    };
    let project: SavedProject = serde_json::from_str(&content)?;

    Ok(Some(project))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DialogueRow, PageGroup, PageId, PageRecord};

    #[test]
    fn load_without_saved_project_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(load_project(tmp.path()).unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = tmp.path().join("data");
        let project = SavedProject {
            pages: vec![PageRecord {
                id: PageId::from(1u64),
                display_name: "p1.png".to_string(),
                image_data: Some("data:image/png;base64,AAAA".to_string()),
                group: PageGroup::Big,
                dialogue_link_id: Some("p1".to_string()),
                bubble_position: None,
                bubble_style: None,
            }],
            speech_data: vec![DialogueRow::with_id("p1")],
            language: Some("en".to_string()),
            version: Some("1.0.0".to_string()),
            last_save_time: Some("2024-05-01T09:30:15.000Z".to_string()),
        };

        let path = save_project(&data_dir, &project).unwrap();
        assert_eq!(path, data_dir.join("creator.json"));
        assert_eq!(load_project(&data_dir).unwrap(), Some(project));
    }

    #[test]
    fn corrupt_project_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("creator.json"), "[").unwrap();
        assert!(matches!(load_project(tmp.path()), Err(StoreError::Json(_))));
    }
}
