use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_opener::OpenerExt;
use crate::state::AppState;
use crate::types::Settings;

#[tauri::command]
pub fn get_export_path(state: State<'_, AppState>) -> Result<String, String> {
    let store = state.settings.lock().map_err(|e| e.to_string())?;
    Ok(store.export_path().to_string_lossy().to_string())
}

#[tauri::command]
pub fn set_export_path(state: State<'_, AppState>, path: String) -> Result<(), String> {
    let mut store = state.settings.lock().map_err(|e| e.to_string())?;
    store.set_export_path(path).map_err(|e| e.to_string())
}

// 出力先をファイルマネージャで開く
#[tauri::command]
pub fn open_export_folder(app: AppHandle, state: State<'_, AppState>) -> Result<(), String> {
    let path = {
        let store = state.settings.lock().map_err(|e| e.to_string())?;
        store.ensure_export_path()
    };
    app.opener()
        .open_path(path.to_string_lossy(), None::<&str>)
        .map_err(|e| format!("フォルダを開けません: {}", e))
}

#[tauri::command]
pub fn get_preferences(state: State<'_, AppState>) -> Result<Settings, String> {
    let store = state.settings.lock().map_err(|e| e.to_string())?;
    Ok(store.settings().clone())
}

// フォルダ選択ダイアログ（キャンセル時は None）
#[tauri::command]
pub async fn select_preferences_folder(app: AppHandle) -> Result<Option<String>, String> {
    Ok(app
        .dialog()
        .file()
        .blocking_pick_folder()
        .map(|folder| folder.to_string()))
}

#[tauri::command]
pub fn save_preferences(state: State<'_, AppState>, settings: Settings) -> Result<(), String> {
    let mut store = state.settings.lock().map_err(|e| e.to_string())?;
    store.update(settings).map_err(|e| e.to_string())
}
