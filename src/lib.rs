mod constants;
pub mod error;
pub mod types;
pub mod image_utils;
pub mod ordering;
pub mod manifest;
pub mod archive;
pub mod exporter;
pub mod history;
pub mod settings;
pub mod project;

#[cfg(feature = "desktop")]
mod state;
#[cfg(feature = "desktop")]
mod commands;

pub use error::{ExportError, StoreError};
pub use exporter::{export_project, export_value, ExportOptions};
pub use history::{DialogueHistory, History, PageHistory};
pub use settings::SettingsStore;
pub use types::{ExportResponse, ExportSummary, ProjectSnapshot};

#[cfg(feature = "desktop")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG があれば優先
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use std::sync::Mutex;
    use commands::export::export_project;
    use commands::project::{load_project, save_project};
    use commands::settings::{
        get_export_path, get_preferences, open_export_folder, save_preferences,
        select_preferences_folder, set_export_path,
    };
    use state::AppState;

    init_tracing();

    let settings = SettingsStore::open_default().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "設定ディレクトリなし: カレントディレクトリに保存");
        SettingsStore::load(constants::SETTINGS_FILE_NAME)
    });

    if let Err(e) = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .manage(AppState {
            settings: Mutex::new(settings),
        })
        .invoke_handler(tauri::generate_handler![
            export_project,
            save_project,
            load_project,
            get_export_path,
            set_export_path,
            open_export_folder,
            get_preferences,
            select_preferences_folder,
            save_preferences,
        ])
        .run(tauri::generate_context!())
    {
        tracing::error!(error = %e, "Tauriアプリケーション起動エラー");
        std::process::exit(1);
    }
}
