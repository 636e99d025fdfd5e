use std::io;
use std::path::PathBuf;
use thiserror::Error;
use crate::types::PageId;

/// エクスポート1回分を中断させるエラー
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("画像デコードエラー (ページ {page_id}): {reason}")]
    ImageDecode { page_id: PageId, reason: String },

    #[error("ファイル操作エラー ({}): {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("圧縮エラー: {0}")]
    Compression(String),

    #[error("プロジェクトデータ解析エラー: {0}")]
    Snapshot(#[source] serde_json::Error),

    #[error("マニフェスト生成エラー: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("バックグラウンド処理エラー: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ExportError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::Filesystem { path: path.into(), source }
    }

    pub(crate) fn decode(page_id: &PageId, reason: impl Into<String>) -> Self {
        ExportError::ImageDecode { page_id: page_id.clone(), reason: reason.into() }
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        ExportError::Compression(e.to_string())
    }
}

// 設定・プロジェクト保存のエラー
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ファイル操作エラー ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("設定ディレクトリを特定できません")]
    NoConfigDir,
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io { path: path.into(), source }
    }
}
