// 出力ファイル名
pub const DEFAULT_PROJECT_TITLE: &str = "manga-project";
pub const MANIFEST_ENTRY_NAME: &str = "creator.json";
pub const PANELS_DIR: &str = "panels";

// 圧縮設定
pub const DEFAULT_IMAGE_QUALITY: u8 = 85;
pub const MAX_IMAGE_QUALITY: u8 = 100;
pub const ZIP_COMPRESSION_LEVEL: i64 = 9;  // 最大圧縮

// マニフェストの既定値
pub const DEFAULT_SWEET_SPOT: u32 = 600;
pub const DEFAULT_DELAY_ROWS: u32 = 1;
pub const DEFAULT_LANGUAGE: &str = "ja";
pub const DEFAULT_SCHEMA_VERSION: &str = "1.0.0";

// 吹き出しの既定値
pub const DEFAULT_BUBBLE_X: u32 = 20;
pub const DEFAULT_BUBBLE_Y: u32 = 20;
pub const DEFAULT_BUBBLE_SHAPE: &str = "rounded";
pub const DEFAULT_BUBBLE_COLOR: &str = "#ffffff";
pub const DEFAULT_BUBBLE_BORDER_COLOR: &str = "#000000";
pub const DEFAULT_BUBBLE_SIZE: &str = "medium";
pub const DEFAULT_BUBBLE_TAIL: &str = "left";
pub const DEFAULT_BUBBLE_ANIM: &str = "fade";

// 画像サイズ制限（DoS防止）
pub const MAX_IMAGE_DIMENSION: u32 = 65535;      // 最大辺長
pub const MAX_PIXEL_COUNT: u64 = 100_000_000;    // 最大ピクセル数（100メガピクセル）

// 同一秒内の衝突回避で試す連番の上限
pub const MAX_NAME_SUFFIX: u32 = 999;

// 設定・保存先
pub const APP_DIR_NAME: &str = "manga-creator";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const EXPORT_DIR_NAME: &str = "MangaExports";
pub const PROJECT_FILE_NAME: &str = "creator.json";

// 取り消し履歴の上限
pub const HISTORY_LIMIT: usize = 100;
