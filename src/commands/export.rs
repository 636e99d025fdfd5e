use serde_json::Value;
use tauri::State;
use crate::exporter::{self, ExportOptions};
use crate::state::AppState;
use crate::types::ExportResponse;

// エディタからのエクスポート要求。解析エラーを含め失敗も ExportResponse として返す
#[tauri::command]
pub async fn export_project(
    state: State<'_, AppState>,
    data: Value,
) -> Result<ExportResponse, String> {
    let options = {
        let store = state.settings.lock().map_err(|e| e.to_string())?;
        ExportOptions {
            output_dir: store.ensure_export_path(),
            ..store.export_options()
        }
    };

    Ok(exporter::export_value(data, &options).await)
}
