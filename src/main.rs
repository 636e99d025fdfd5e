// リリースビルドで Windows のコンソールを出さない
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    manga_creator_tauri_lib::run()
}
