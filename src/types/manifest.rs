use serde::{Deserialize, Serialize};
use serde_json::Number;
use super::snapshot::{DialogueRow, PageGroup, PageId};

// セクション（各グループの開始位置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub name: PageGroup,
    pub start_index: usize,
}

impl Section {
    /// 全グループが先頭から始まる既定のセクション表
    pub fn default_table() -> [Section; 3] {
        PageGroup::ALL.map(|name| Section { name, start_index: 0 })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechPos {
    pub x: Number,
    pub y: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechStyle {
    pub shape: String,
    pub color: String,
    pub border_color: String,
    pub size: String,
    pub tail: String,
    pub anim: String,
}

// マニフェスト内のページ記述（画像本体は含まない）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    pub id: PageId,
    pub name: String,
    pub filename: String,
    pub speech_id: Option<String>,
    pub speech_pos: SpeechPos,
    pub speech_style: SpeechStyle,
}

/// アーカイブ直下の creator.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub sections: Vec<Section>,
    pub sweet_spot: Number,
    pub delay_rows: Number,
    pub pages: Vec<PageDescriptor>,
    pub speech_data: Vec<DialogueRow>,
    pub language: String,
    pub version: String,
    pub export_date: String,
}
