use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use super::snapshot::{DialogueRow, PageRecord};

// 自動保存されるプロジェクト（アプリデータ内の creator.json）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProject {
    #[serde(default)]
    pub pages: Vec<PageRecord>,
    #[serde(default)]
    pub speech_data: Vec<DialogueRow>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub last_save_time: Option<String>,
}

// 環境設定（未指定の項目は既定値で補う）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub export_path: PathBuf,
    pub sweet_spot: u32,
    pub delay_rows: u32,
}
