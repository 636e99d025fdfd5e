use std::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

// ページID（エディタ側で文字列または数値として採番される）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageId {
    Text(String),
    Number(Number),
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageId::Text(s) => f.write_str(s),
            PageId::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        PageId::Text(s.to_string())
    }
}

impl From<u64> for PageId {
    fn from(n: u64) -> Self {
        PageId::Number(n.into())
    }
}

/// ページのグループ。エクスポート時はこの順に並ぶ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageGroup {
    Start,
    #[default]
    Normal,
    Big,
}

impl PageGroup {
    pub const ALL: [PageGroup; 3] = [PageGroup::Start, PageGroup::Normal, PageGroup::Big];

    pub fn as_str(self) -> &'static str {
        match self {
            PageGroup::Start => "Start",
            PageGroup::Normal => "Normal",
            PageGroup::Big => "Big",
        }
    }

    // 未知のタグは Normal 扱い
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Start" => PageGroup::Start,
            "Big" => PageGroup::Big,
            _ => PageGroup::Normal,
        }
    }
}

impl Serialize for PageGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PageGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value
            .as_ref()
            .and_then(Value::as_str)
            .map(PageGroup::from_tag)
            .unwrap_or_default())
    }
}

// 吹き出しの位置（ピクセル）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubblePosition {
    pub x: Number,
    pub y: Number,
}

// 吹き出しのスタイル（各項目は個別に既定値で補われる）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, alias = "fillColor", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, alias = "tailDirection", skip_serializing_if = "Option::is_none")]
    pub tail: Option<String>,
    #[serde(default, alias = "animationKind", alias = "animation", skip_serializing_if = "Option::is_none")]
    pub anim: Option<String>,
}

// エディタ上の1ページ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub id: PageId,
    #[serde(default, alias = "name")]
    pub display_name: String,
    // data:image/...;base64,... 形式
    #[serde(default, alias = "url")]
    pub image_data: Option<String>,
    #[serde(default)]
    pub group: PageGroup,
    #[serde(default, alias = "speechId")]
    pub dialogue_link_id: Option<String>,
    #[serde(default, alias = "speechPos")]
    pub bubble_position: Option<BubblePosition>,
    #[serde(default, alias = "speechStyle")]
    pub bubble_style: Option<BubbleStyle>,
}

/// 台詞1行。同じIDの行が複数あってもよい（1ページで台詞を切り替える場合）
///
/// エディタから来たオブジェクトをそのまま保持する。キーの追加・並べ替えはしない
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogueRow(pub Map<String, Value>);

impl DialogueRow {
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String(id.into()));
        Self(fields)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    // 言語コード -> 台詞
    pub fn line(&self, language: &str) -> Option<&str> {
        self.0.get(language).and_then(Value::as_str)
    }
}

// プレビューのスクロール調整値。小数もそのまま通す
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTuning {
    #[serde(default, alias = "sweetSpot", skip_serializing_if = "Option::is_none")]
    pub scroll_sweet_spot_px: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_rows: Option<Number>,
}

/// エクスポート呼び出しごとに渡されるプロジェクトの状態
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub pages: Vec<PageRecord>,
    #[serde(default, alias = "speechData")]
    pub dialogue_rows: Vec<DialogueRow>,
    #[serde(default, alias = "language")]
    pub language_code: Option<String>,
    #[serde(default)]
    pub layout_tuning: Option<LayoutTuning>,
    #[serde(default, alias = "version")]
    pub schema_version: Option<String>,
    #[serde(default, alias = "title")]
    pub project_title: Option<String>,
    #[serde(default, alias = "compressToWebP")]
    pub compress_images: bool,
    #[serde(default)]
    pub image_quality: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_or_missing_group_is_normal() {
        let pages: Vec<PageRecord> = serde_json::from_str(
            r#"[
                {"id": "a", "group": "Huge"},
                {"id": "b"},
                {"id": "c", "group": null},
                {"id": "d", "group": 3},
                {"id": "e", "group": "Start"}
            ]"#,
        )
        .unwrap();
        let groups: Vec<PageGroup> = pages.iter().map(|p| p.group).collect();
        assert_eq!(
            groups,
            vec![
                PageGroup::Normal,
                PageGroup::Normal,
                PageGroup::Normal,
                PageGroup::Normal,
                PageGroup::Start,
            ]
        );
    }

    #[test]
    fn accepts_editor_wire_names() {
        let snapshot: ProjectSnapshot = serde_json::from_str(
            r#"{
                "title": "demo",
                "language": "en",
                "version": "2.0.0",
                "compressToWebP": true,
                "imageQuality": 70,
                "speechData": [{"id": "p1", "ja": "こんにちは", "en": "Hello"}],
                "pages": [{
                    "id": 1700000000000.5,
                    "name": "page1.png",
                    "url": "data:image/png;base64,AAAA",
                    "speechId": "p1",
                    "speechPos": {"x": 40, "y": 12},
                    "speechStyle": {"shape": "cloud", "tail": "right"}
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.project_title.as_deref(), Some("demo"));
        assert_eq!(snapshot.language_code.as_deref(), Some("en"));
        assert_eq!(snapshot.schema_version.as_deref(), Some("2.0.0"));
        assert!(snapshot.compress_images);
        assert_eq!(snapshot.image_quality, Some(70));
        assert_eq!(snapshot.dialogue_rows[0].line("en"), Some("Hello"));
        assert_eq!(snapshot.dialogue_rows[0].id(), Some("p1"));

        let page = &snapshot.pages[0];
        assert_eq!(page.display_name, "page1.png");
        assert_eq!(page.dialogue_link_id.as_deref(), Some("p1"));
        let style = page.bubble_style.as_ref().unwrap();
        assert_eq!(style.shape.as_deref(), Some("cloud"));
        assert_eq!(style.tail.as_deref(), Some("right"));
        assert_eq!(style.size, None);
        assert_eq!(page.id.to_string(), "1700000000000.5");
    }

    #[test]
    fn descriptive_style_names_are_accepted() {
        let style: BubbleStyle = serde_json::from_str(
            r##"{"fillColor": "#ff0", "tailDirection": "right", "animationKind": "pop"}"##,
        )
        .unwrap();
        assert_eq!(style.color.as_deref(), Some("#ff0"));
        assert_eq!(style.tail.as_deref(), Some("right"));
        assert_eq!(style.anim.as_deref(), Some("pop"));
    }

    #[test]
    fn dialogue_row_is_kept_verbatim() {
        let row: DialogueRow = serde_json::from_str(r#"{"ja": "x", "en": "y"}"#).unwrap();
        assert_eq!(row.id(), None);
        assert_eq!(row.line("ja"), Some("x"));
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"ja":"x","en":"y"}"#);
    }

    #[test]
    fn fractional_tuning_values_are_accepted() {
        let snapshot: ProjectSnapshot = serde_json::from_str(
            r#"{"layoutTuning": {"scrollSweetSpotPx": 600.5, "delayRows": 2}}"#,
        )
        .unwrap();
        let tuning = snapshot.layout_tuning.unwrap();
        assert_eq!(tuning.scroll_sweet_spot_px.unwrap().as_f64(), Some(600.5));
        assert_eq!(tuning.delay_rows.unwrap().as_u64(), Some(2));
    }
}
