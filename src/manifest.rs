use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Number;
use crate::constants::*;
use crate::ordering::OrderedPages;
use crate::types::{
    BubbleStyle, ImageFormatTag, LayoutTuning, Manifest, PageDescriptor, PageRecord,
    ProjectSnapshot, SpeechPos, SpeechStyle,
};

// ページ番号（1始まり）から出力ファイル名を決める
pub fn page_filename(index: usize, format: ImageFormatTag) -> String {
    format!("page_{}.{}", index, format.extension())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn or_default(value: &Option<String>, default: &str) -> String {
    non_blank(value.as_deref()).unwrap_or(default).to_string()
}

fn speech_style(style: Option<&BubbleStyle>) -> SpeechStyle {
    let empty = BubbleStyle::default();
    let style = style.unwrap_or(&empty);
    SpeechStyle {
        shape: or_default(&style.shape, DEFAULT_BUBBLE_SHAPE),
        color: or_default(&style.color, DEFAULT_BUBBLE_COLOR),
        border_color: or_default(&style.border_color, DEFAULT_BUBBLE_BORDER_COLOR),
        size: or_default(&style.size, DEFAULT_BUBBLE_SIZE),
        tail: or_default(&style.tail, DEFAULT_BUBBLE_TAIL),
        anim: or_default(&style.anim, DEFAULT_BUBBLE_ANIM),
    }
}

fn page_descriptor(position: usize, page: &PageRecord, format: ImageFormatTag) -> PageDescriptor {
    let speech_pos = match &page.bubble_position {
        Some(pos) => SpeechPos { x: pos.x.clone(), y: pos.y.clone() },
        None => SpeechPos { x: DEFAULT_BUBBLE_X.into(), y: DEFAULT_BUBBLE_Y.into() },
    };

    PageDescriptor {
        id: page.id.clone(),
        name: page.display_name.clone(),
        filename: page_filename(position, format),
        speech_id: page.dialogue_link_id.clone(),
        speech_pos,
        speech_style: speech_style(page.bubble_style.as_ref()),
    }
}

/// 並べ替え済みのページからマニフェストを組み立てる。
///
/// レイアウト調整値はスナップショット → `tuning_defaults` → 固定値の順に解決する。
/// 画像本体は含めない（アーカイブの別エントリになる）。
pub fn build_manifest(
    ordered: &OrderedPages<'_>,
    snapshot: &ProjectSnapshot,
    tuning_defaults: &LayoutTuning,
    exported_at: DateTime<Utc>,
) -> Manifest {
    let format = ImageFormatTag::for_compression(snapshot.compress_images);
    let tuning = snapshot.layout_tuning.clone().unwrap_or_default();

    let pages = ordered
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| page_descriptor(i + 1, page, format))
        .collect();

    Manifest {
        sections: ordered.sections.to_vec(),
        sweet_spot: tuning
            .scroll_sweet_spot_px
            .or_else(|| tuning_defaults.scroll_sweet_spot_px.clone())
            .unwrap_or_else(|| Number::from(DEFAULT_SWEET_SPOT)),
        delay_rows: tuning
            .delay_rows
            .or_else(|| tuning_defaults.delay_rows.clone())
            .unwrap_or_else(|| Number::from(DEFAULT_DELAY_ROWS)),
        pages,
        speech_data: snapshot.dialogue_rows.clone(),
        language: or_default(&snapshot.language_code, DEFAULT_LANGUAGE),
        version: or_default(&snapshot.schema_version, DEFAULT_SCHEMA_VERSION),
        export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
