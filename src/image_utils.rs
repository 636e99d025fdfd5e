use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::DynamicImage;
use thiserror::Error;
use crate::constants::{MAX_IMAGE_DIMENSION, MAX_IMAGE_QUALITY, MAX_PIXEL_COUNT};
use crate::types::ImageFormatTag;

// 画像処理の失敗理由（ページIDは呼び出し側で付与する）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Encode(String),
}

/// `data:image/<種類>;base64,<本体>` からバイナリを取り出す
pub fn decode_inline_image(inline: &str) -> Result<Vec<u8>, CodecError> {
    let rest = inline
        .strip_prefix("data:image/")
        .ok_or_else(|| CodecError::Decode("data:image/ 接頭辞がありません".to_string()))?;
    let (subtype, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| CodecError::Decode("base64 指定がありません".to_string()))?;

    if subtype.is_empty() || !subtype.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.') {
        return Err(CodecError::Decode(format!("不正なMIMEタイプ: image/{}", subtype)));
    }
    if payload.is_empty() {
        return Err(CodecError::Decode("画像データが空です".to_string()));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| CodecError::Decode(format!("base64 デコード失敗: {}", e)))?;
    if bytes.is_empty() {
        return Err(CodecError::Decode("画像データが空です".to_string()));
    }
    Ok(bytes)
}

// 画像サイズ検証（DoS防止）
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), String> {
    if width == 0 || height == 0 {
        return Err("無効な画像サイズ: 幅または高さが0".to_string());
    }
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(format!(
            "画像サイズが大きすぎます: {}x{} (最大: {})",
            width, height, MAX_IMAGE_DIMENSION
        ));
    }
    let pixel_count = (width as u64) * (height as u64);
    if pixel_count > MAX_PIXEL_COUNT {
        return Err(format!(
            "ピクセル数が多すぎます: {} (最大: {})",
            pixel_count, MAX_PIXEL_COUNT
        ));
    }
    Ok(())
}

/// 非可逆WebPに変換する。品質値はそのまま渡す（100を超える値のみ丸める）
pub fn transcode(raw: &[u8], quality: u8) -> Result<(Vec<u8>, ImageFormatTag), CodecError> {
    let img = image::load_from_memory(raw)
        .map_err(|e| CodecError::Decode(format!("画像読み込みエラー: {}", e)))?;
    validate_dimensions(img.width(), img.height()).map_err(CodecError::Decode)?;

    // libwebp は RGB8 / RGBA8 のみ受け付ける
    let rgba = if matches!(img, DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) {
        img
    } else {
        DynamicImage::ImageRgba8(img.to_rgba8())
    };

    let encoder = webp::Encoder::from_image(&rgba)
        .map_err(|e| CodecError::Encode(format!("WebPエンコーダ初期化エラー: {}", e)))?;
    let encoded = encoder.encode(quality.min(MAX_IMAGE_QUALITY) as f32);

    Ok((encoded.to_vec(), ImageFormatTag::Webp))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;
    use image::{ImageFormat, RgbaImage};

    pub(crate) fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 128, 255])
        });
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    pub(crate) fn data_url(bytes: &[u8]) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(bytes))
    }

    #[test]
    fn decode_strips_prefix() {
        let png = sample_png(4, 4);
        assert_eq!(decode_inline_image(&data_url(&png)).unwrap(), png);
    }

    #[test]
    fn decode_accepts_other_subtypes() {
        let url = format!("data:image/jpeg;base64,{}", STANDARD.encode(b"\xff\xd8\xff"));
        assert_eq!(decode_inline_image(&url).unwrap(), b"\xff\xd8\xff");
    }

    #[test]
    fn decode_rejects_missing_prefix() {
        let err = decode_inline_image("iVBORw0KGgo=").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn decode_rejects_non_base64_header() {
        assert!(decode_inline_image("data:image/png,rawbytes").is_err());
    }

    #[test]
    fn decode_rejects_empty_payload() {
        assert!(decode_inline_image("data:image/png;base64,").is_err());
    }

    #[test]
    fn decode_rejects_garbage_payload() {
        assert!(decode_inline_image("data:image/png;base64,@@@@").is_err());
    }

    #[test]
    fn dimension_checks() {
        assert!(validate_dimensions(0, 10).is_err());
        assert!(validate_dimensions(MAX_IMAGE_DIMENSION + 1, 1).is_err());
        assert!(validate_dimensions(20_000, 20_000).is_err());
        assert!(validate_dimensions(800, 1200).is_ok());
    }

    #[test]
    fn transcode_produces_webp() {
        let png = sample_png(16, 16);
        let (bytes, tag) = transcode(&png, 85).unwrap();
        assert_eq!(tag, ImageFormatTag::Webp);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn transcode_accepts_gif_and_bmp() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(6, 6, image::Rgba([10, 200, 30, 255])));
        for format in [ImageFormat::Gif, ImageFormat::Bmp] {
            let mut buffer = Cursor::new(Vec::new());
            img.write_to(&mut buffer, format).unwrap();
            let (bytes, tag) = transcode(&buffer.into_inner(), 70).unwrap();
            assert_eq!(tag, ImageFormatTag::Webp, "{:?}", format);
            assert_eq!(&bytes[8..12], b"WEBP");
        }
    }

    #[test]
    fn transcode_rejects_non_image_bytes() {
        let err = transcode(b"not an image", 85).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }
}
