use std::path::PathBuf;
use tauri::{AppHandle, Manager};
use crate::project;
use crate::types::SavedProject;

// 自動保存先（アプリデータ内の data/）
fn data_dir(app: &AppHandle) -> Result<PathBuf, String> {
    app.path()
        .app_data_dir()
        .map(|p| p.join("data"))
        .map_err(|e| format!("データディレクトリの取得に失敗: {}", e))
}

// プロジェクトを保存
#[tauri::command]
pub async fn save_project(app: AppHandle, data: SavedProject) -> Result<String, String> {
    let dir = data_dir(&app)?;
    let path = project::save_project(&dir, &data).map_err(|e| e.to_string())?;
    Ok(path.to_string_lossy().to_string())
}

// プロジェクトを読み込み（未保存なら None）
#[tauri::command]
pub async fn load_project(app: AppHandle) -> Result<Option<SavedProject>, String> {
    let dir = data_dir(&app)?;
    project::load_project(&dir).map_err(|e| e.to_string())
}
