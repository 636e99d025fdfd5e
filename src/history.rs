//! 取り消し・やり直し履歴。
//!
//! 変更のたびに新しい状態を積み、取り消し・やり直しはカーソルを動かすだけで
//! 履歴そのものは書き換えない。ページ一覧と台詞表にそれぞれ1つずつ持たせる。

use crate::constants::HISTORY_LIMIT;
use crate::types::{DialogueRow, PageRecord};

#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
    limit: usize,
}

pub type PageHistory = History<Vec<PageRecord>>;
pub type DialogueHistory = History<Vec<DialogueRow>>;

impl<T> History<T> {
    /// `limit` は遡れる回数の上限（0 のときは 1 として扱う）
    pub fn new(initial: T, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    pub fn present(&self) -> &T {
        &self.entries[self.cursor]
    }

    // 新しい状態を積む。やり直し側の履歴は捨てる
    pub fn set(&mut self, next: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(next);
        if self.entries.len() > self.limit + 1 {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    // 履歴を破棄して初期状態からやり直す（プロジェクト読み込み時など）
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }
}

impl<T: Default> Default for History<T> {
    fn default() -> Self {
        Self::new(T::default(), HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_and_redo_move_the_cursor() {
        let mut history = History::new(vec![1], 10);
        history.set(vec![1, 2]);
        history.set(vec![1, 2, 3]);

        assert!(history.undo());
        assert_eq!(history.present(), &vec![1, 2]);
        assert!(history.undo());
        assert_eq!(history.present(), &vec![1]);
        assert!(!history.undo());

        assert!(history.redo());
        assert!(history.redo());
        assert_eq!(history.present(), &vec![1, 2, 3]);
        assert!(!history.redo());
    }

    #[test]
    fn set_after_undo_drops_redo_branch() {
        let mut history = History::new("a", 10);
        history.set("b");
        history.set("c");
        history.undo();
        history.set("d");

        assert!(!history.can_redo());
        assert_eq!(*history.present(), "d");
        history.undo();
        assert_eq!(*history.present(), "b");
    }

    #[test]
    fn oldest_entries_fall_off_past_the_limit() {
        let mut history = History::new(0, 2);
        for n in 1..=5 {
            history.set(n);
        }
        assert!(history.undo());
        assert!(history.undo());
        assert!(!history.undo());
        assert_eq!(*history.present(), 3);
    }

    #[test]
    fn reset_clears_everything() {
        let mut history: History<Vec<u8>> = History::default();
        history.set(vec![9]);
        history.reset(vec![7]);
        assert_eq!(history.present(), &vec![7]);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn page_and_dialogue_streams_are_independent() {
        let mut pages = PageHistory::default();
        let mut rows = DialogueHistory::default();
        rows.set(vec![DialogueRow::with_id("p1")]);

        assert!(!pages.undo());
        assert!(rows.undo());
        assert!(rows.present().is_empty());
        assert!(pages.present().is_empty());
        pages.set(Vec::new());
        assert!(pages.can_undo());
    }
}
