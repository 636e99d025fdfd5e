use std::path::PathBuf;
use chrono::Utc;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, error, info};
use crate::archive::write_archive;
use crate::constants::DEFAULT_IMAGE_QUALITY;
use crate::error::ExportError;
use crate::image_utils::{decode_inline_image, transcode, CodecError};
use crate::manifest::{build_manifest, page_filename};
use crate::ordering::order_pages;
use crate::types::{
    ExportResponse, ExportSummary, ImageEntry, ImageFormatTag, LayoutTuning, PageId, ProjectSnapshot,
};

/// エクスポートの進行段階（ログ用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportStage {
    Idle,
    Ordering,
    Building,
    Encoding { total: usize },
    Writing,
    Done,
    Failed,
}

// 呼び出し側（設定）から渡される出力先と既定値
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub tuning_defaults: LayoutTuning,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            tuning_defaults: LayoutTuning::default(),
        }
    }
}

struct StageTracker {
    stage: ExportStage,
}

impl StageTracker {
    fn enter(&mut self, stage: ExportStage) {
        debug!(from = ?self.stage, to = ?stage, "エクスポート段階");
        self.stage = stage;
    }
}

// 画像エンコードに渡す1ページ分（ワーカースレッドへ移すため所有する）
struct PendingImage {
    position: usize,
    id: PageId,
    image_data: Option<String>,
}

// 圧縮しないときは None。品質の指定がなければ既定値、指定があればそのまま使う
fn resolve_quality(snapshot: &ProjectSnapshot) -> Option<u8> {
    snapshot
        .compress_images
        .then(|| snapshot.image_quality.unwrap_or(DEFAULT_IMAGE_QUALITY))
}

fn encode_page(page: &PendingImage, quality: Option<u8>) -> Result<ImageEntry, ExportError> {
    let inline = page
        .image_data
        .as_deref()
        .ok_or_else(|| ExportError::decode(&page.id, "画像データがありません"))?;
    let raw = decode_inline_image(inline).map_err(|e| ExportError::decode(&page.id, e.to_string()))?;

    let (bytes, format) = match quality {
        Some(q) => transcode(&raw, q).map_err(|e| match e {
            CodecError::Decode(reason) => ExportError::decode(&page.id, reason),
            CodecError::Encode(reason) => ExportError::Compression(reason),
        })?,
        None => (raw, ImageFormatTag::Png),
    };

    Ok(ImageEntry {
        filename: page_filename(page.position, format),
        bytes,
    })
}

/// スナップショット1つをZIPとして書き出す。
///
/// 並べ替え → マニフェスト生成 → 画像変換 → アーカイブ書き込みの順に進み、
/// どこかで失敗したらその時点で中断する。入力は読むだけで変更しない。
pub async fn export_project(
    snapshot: &ProjectSnapshot,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let mut tracker = StageTracker { stage: ExportStage::Idle };
    info!(
        pages = snapshot.pages.len(),
        rows = snapshot.dialogue_rows.len(),
        compress = snapshot.compress_images,
        output_dir = %options.output_dir.display(),
        "エクスポート開始"
    );

    match run(snapshot, options, &mut tracker).await {
        Ok(summary) => {
            tracker.enter(ExportStage::Done);
            info!(path = %summary.path.display(), size = summary.size, "エクスポート完了");
            Ok(summary)
        }
        Err(e) => {
            error!(stage = ?tracker.stage, error = %e, "エクスポート失敗");
            tracker.enter(ExportStage::Failed);
            Err(e)
        }
    }
}

/// エディタから届いたJSONを受け取って書き出す。解析に失敗した場合も失敗応答として返す
pub async fn export_value(data: Value, options: &ExportOptions) -> ExportResponse {
    let result = match serde_json::from_value::<ProjectSnapshot>(data) {
        Ok(snapshot) => export_project(&snapshot, options).await,
        Err(e) => {
            error!(error = %e, "プロジェクトデータを解析できません");
            Err(ExportError::Snapshot(e))
        }
    };
    ExportResponse::from(result)
}

async fn run(
    snapshot: &ProjectSnapshot,
    options: &ExportOptions,
    tracker: &mut StageTracker,
) -> Result<ExportSummary, ExportError> {
    tracker.enter(ExportStage::Ordering);
    let ordered = order_pages(&snapshot.pages);

    tracker.enter(ExportStage::Building);
    let manifest = build_manifest(&ordered, snapshot, &options.tuning_defaults, Utc::now());

    let pending: Vec<PendingImage> = ordered
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| PendingImage {
            position: i + 1,
            id: page.id.clone(),
            image_data: page.image_data.clone(),
        })
        .collect();
    let quality = resolve_quality(snapshot);

    tracker.enter(ExportStage::Encoding { total: pending.len() });
    // ページごとの変換は独立しているので並列化し、結果はページ順に集める
    let images = tokio::task::spawn_blocking(move || {
        pending
            .par_iter()
            .map(|page| encode_page(page, quality))
            .collect::<Result<Vec<_>, _>>()
    })
    .await??;

    tracker.enter(ExportStage::Writing);
    let page_count = images.len();
    let archive = write_archive(
        &manifest,
        images,
        &options.output_dir,
        snapshot.project_title.as_deref(),
    )
    .await?;

    Ok(ExportSummary {
        path: archive.path,
        size: archive.size,
        page_count,
    })
}
