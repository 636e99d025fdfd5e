use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, warn};
use crate::constants::{
    APP_DIR_NAME, DEFAULT_DELAY_ROWS, DEFAULT_SWEET_SPOT, EXPORT_DIR_NAME, SETTINGS_FILE_NAME,
};
use crate::error::StoreError;
use crate::exporter::ExportOptions;
use crate::types::{LayoutTuning, Settings};

impl Default for Settings {
    fn default() -> Self {
        let documents = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            export_path: documents.join(EXPORT_DIR_NAME),
            sweet_spot: DEFAULT_SWEET_SPOT,
            delay_rows: DEFAULT_DELAY_ROWS,
        }
    }
}

// 設定ファイルのパスを取得
pub fn default_settings_path() -> Result<PathBuf, StoreError> {
    dirs::config_dir()
        .map(|p| p.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
        .ok_or(StoreError::NoConfigDir)
}

/// settings.json に保存される環境設定
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// 読み込めない場合は既定値で作り直して保存する
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let loaded = fs::read_to_string(&path)
            .map_err(|e| StoreError::io(&path, e))
            .and_then(|content| serde_json::from_str::<Settings>(&content).map_err(StoreError::from));

        match loaded {
            Ok(settings) => Self { path, settings },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "設定を既定値で初期化");
                let store = Self { path, settings: Settings::default() };
                if let Err(e) = store.save() {
                    error!(error = %e, "設定の保存に失敗");
                }
                store
            }
        }
    }

    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::load(default_settings_path()?))
    }

    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, json).map_err(|e| StoreError::io(&self.path, e))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // 環境設定画面からの一括更新
    pub fn update(&mut self, settings: Settings) -> Result<(), StoreError> {
        self.settings = settings;
        self.save()
    }

    pub fn export_path(&self) -> &Path {
        &self.settings.export_path
    }

    pub fn set_export_path(&mut self, path: impl Into<PathBuf>) -> Result<(), StoreError> {
        self.settings.export_path = path.into();
        self.save()
    }

    /// 出力先を作成して返す。作成に失敗してもパスは返す（書き出し時に改めて失敗する）
    pub fn ensure_export_path(&self) -> PathBuf {
        let path = self.settings.export_path.clone();
        if let Err(e) = fs::create_dir_all(&path) {
            error!(path = %path.display(), error = %e, "出力先ディレクトリ作成失敗");
        }
        path
    }

    pub fn sweet_spot(&self) -> u32 {
        match self.settings.sweet_spot {
            0 => DEFAULT_SWEET_SPOT,
            n => n,
        }
    }

    pub fn set_sweet_spot(&mut self, value: u32) -> Result<(), StoreError> {
        self.settings.sweet_spot = value;
        self.save()
    }

    pub fn delay_rows(&self) -> u32 {
        match self.settings.delay_rows {
            0 => DEFAULT_DELAY_ROWS,
            n => n,
        }
    }

    pub fn set_delay_rows(&mut self, value: u32) -> Result<(), StoreError> {
        self.settings.delay_rows = value;
        self.save()
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            output_dir: self.settings.export_path.clone(),
            tuning_defaults: LayoutTuning {
                scroll_sweet_spot_px: Some(self.sweet_spot().into()),
                delay_rows: Some(self.delay_rows().into()),
            },
        }
    }
}
