use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::error::ExportError;

/// 画像エントリの出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormatTag {
    Png,
    Webp,
}

impl ImageFormatTag {
    pub fn for_compression(compress_images: bool) -> Self {
        if compress_images {
            ImageFormatTag::Webp
        } else {
            ImageFormatTag::Png
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormatTag::Png => "png",
            ImageFormatTag::Webp => "webp",
        }
    }
}

// アーカイブに追加する画像1枚分
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub filename: String,
    pub bytes: Vec<u8>,
}

// 書き出したアーカイブの情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub size: u64,
    pub page_count: usize,
}

/// エディタに返す結果 `{success, path?, size?, error?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<ExportSummary, ExportError>> for ExportResponse {
    fn from(result: Result<ExportSummary, ExportError>) -> Self {
        match result {
            Ok(summary) => ExportResponse {
                success: true,
                path: Some(summary.path.to_string_lossy().to_string()),
                size: Some(summary.size),
                error: None,
            },
            Err(e) => ExportResponse {
                success: false,
                path: None,
                size: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_response_omits_path_and_size() {
        let response = ExportResponse::from(Err(ExportError::Compression("壊れた".to_string())));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "圧縮エラー: 壊れた"}));
    }

    #[test]
    fn success_response_carries_path_and_size() {
        let response = ExportResponse::from(Ok(ExportSummary {
            path: PathBuf::from("/tmp/out/demo.zip"),
            size: 1234,
            page_count: 2,
        }));
        assert!(response.success);
        assert_eq!(response.path.as_deref(), Some("/tmp/out/demo.zip"));
        assert_eq!(response.size, Some(1234));
        assert_eq!(response.error, None);
    }
}
