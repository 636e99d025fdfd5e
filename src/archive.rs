use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use tracing::debug;
use zip::result::{ZipError, ZipResult};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};
use crate::constants::{
    DEFAULT_PROJECT_TITLE, MANIFEST_ENTRY_NAME, MAX_NAME_SUFFIX, PANELS_DIR, ZIP_COMPRESSION_LEVEL,
};
use crate::error::ExportError;
use crate::types::{ImageEntry, Manifest};

// 書き出し完了したアーカイブ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveInfo {
    pub path: PathBuf,
    pub size: u64,
}

/// タイトルをファイル名に使える形にする。空なら既定名
pub fn sanitize_base_name(title: Option<&str>) -> String {
    let trimmed = title.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return DEFAULT_PROJECT_TITLE.to_string();
    }
    trimmed
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

// ファイル名用のタイムスタンプ（秒単位、コロンとピリオドなし）
pub fn timestamp_label(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S").to_string()
}

pub fn archive_entry_name(filename: &str) -> String {
    format!("{}/{}", PANELS_DIR, filename)
}

// 同じ秒に書き出した場合は -1, -2 ... を付けて上書きを避ける
fn create_archive_file(dir: &Path, base: &str, stamp: &str) -> Result<(PathBuf, File), ExportError> {
    for n in 0..=MAX_NAME_SUFFIX {
        let name = if n == 0 {
            format!("{}_{}.zip", base, stamp)
        } else {
            format!("{}_{}-{}.zip", base, stamp, n)
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(ExportError::filesystem(path, e)),
        }
    }
    Err(ExportError::filesystem(
        dir,
        io::Error::new(io::ErrorKind::AlreadyExists, "同名のアーカイブが多すぎます"),
    ))
}

/// creator.json と panels/ 以下の画像を順に書き込む
pub fn write_zip<W: Write + Seek>(
    writer: W,
    manifest_json: &[u8],
    images: &[ImageEntry],
) -> ZipResult<W> {
    let mut zip = ZipWriter::new(writer);
    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(ZIP_COMPRESSION_LEVEL));

    zip.start_file(MANIFEST_ENTRY_NAME, deflated)?;
    zip.write_all(manifest_json)?;
    debug!(entry = MANIFEST_ENTRY_NAME, bytes = manifest_json.len(), "アーカイブに追加");

    for image in images {
        let name = archive_entry_name(&image.filename);
        zip.start_file(name.as_str(), deflated)?;
        zip.write_all(&image.bytes)?;
        debug!(entry = %name, bytes = image.bytes.len(), "アーカイブに追加");
    }

    zip.finish()
}

fn zip_error(path: &Path, e: ZipError) -> ExportError {
    match e {
        ZipError::Io(source) => ExportError::filesystem(path, source),
        other => ExportError::from(other),
    }
}

// ファイルへの書き込みと同期（ブロッキング）
fn write_archive_file(
    output_dir: &Path,
    base: &str,
    stamp: &str,
    manifest_json: &[u8],
    images: &[ImageEntry],
) -> Result<ArchiveInfo, ExportError> {
    let (path, file) = create_archive_file(output_dir, base, stamp)?;

    let writer = write_zip(BufWriter::new(file), manifest_json, images)
        .map_err(|e| zip_error(&path, e))?;
    let file = writer
        .into_inner()
        .map_err(|e| ExportError::filesystem(&path, e.into_error()))?;

    // ディスクへ書き切ってからサイズを返す
    file.sync_all().map_err(|e| ExportError::filesystem(&path, e))?;
    let size = file
        .metadata()
        .map_err(|e| ExportError::filesystem(&path, e))?
        .len();
    drop(file);

    Ok(ArchiveInfo { path, size })
}

/// `{base}_{timestamp}.zip` を `output_dir` に書き出す。
///
/// 途中で失敗した場合、作りかけのファイルは削除せずに残る。
pub async fn write_archive(
    manifest: &Manifest,
    images: Vec<ImageEntry>,
    output_dir: &Path,
    base_name: Option<&str>,
) -> Result<ArchiveInfo, ExportError> {
    write_archive_at(manifest, images, output_dir, base_name, Utc::now()).await
}

pub async fn write_archive_at(
    manifest: &Manifest,
    images: Vec<ImageEntry>,
    output_dir: &Path,
    base_name: Option<&str>,
    now: DateTime<Utc>,
) -> Result<ArchiveInfo, ExportError> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| ExportError::filesystem(output_dir, e))?;

    let manifest_json = serde_json::to_vec_pretty(manifest)?;
    let base = sanitize_base_name(base_name);
    let stamp = timestamp_label(now);
    let dir = output_dir.to_path_buf();

    tokio::task::spawn_blocking(move || {
        write_archive_file(&dir, &base, &stamp, &manifest_json, &images)
    })
    .await?
}
