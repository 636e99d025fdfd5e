use std::sync::Mutex;
use crate::settings::SettingsStore;

// アプリケーション状態（環境設定を保持）
pub struct AppState {
    pub settings: Mutex<SettingsStore>,
}
