// ============================================================
// HISTORY ENGINE
// ============================================================
// Undo/redo state machine over table snapshots

use crate::domain::csv::{CsvData, FileStats, Row};

/// Number of snapshots retained; the oldest is evicted past this.
pub const MAX_HISTORY: usize = 10;

/// State transition accepted by the [`HistoryEngine`].
#[derive(Debug, Clone)]
pub enum HistoryAction {
    /// Install a fresh root table, discarding all prior history. Used for
    /// the initial load, a file replace, and an accepted merge.
    SetData(CsvData),
    /// Replace the current rows with an accepted transformation result,
    /// truncating any redo tail. Columns, filename and size carry over.
    UpdateData(Vec<Row>),
    /// Return to the unloaded state, discarding all snapshots.
    Clear,
    Undo,
    Redo,
}

/// Undo/redo ring over immutable table snapshots.
///
/// Holds the current table plus an ordered snapshot list and a read index.
/// `current` always equals `history[index]` while loaded. No transition can
/// fail; undo at the start and redo at the end are silent no-ops. Once the
/// snapshot cap is exceeded the oldest state becomes unrecoverable.
#[derive(Debug)]
pub struct HistoryEngine {
    current: CsvData,
    history: Vec<CsvData>,
    index: Option<usize>,
    max_history: usize,
}

impl Default for HistoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryEngine {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    pub fn with_capacity(max_history: usize) -> Self {
        Self {
            current: CsvData::default(),
            history: Vec::new(),
            index: None,
            max_history: max_history.max(1),
        }
    }

    /// Apply one state transition.
    pub fn apply(&mut self, action: HistoryAction) {
        match action {
            HistoryAction::SetData(data) => {
                self.history = vec![data.clone()];
                self.index = Some(0);
                self.current = data;
            }
            HistoryAction::UpdateData(rows) => {
                let new_state = CsvData {
                    rows,
                    ..self.current.clone()
                };

                let keep = self.index.map_or(0, |i| i + 1);
                self.history.truncate(keep);
                self.history.push(new_state.clone());

                if self.history.len() > self.max_history {
                    self.history.remove(0);
                }

                self.index = Some(self.history.len() - 1);
                self.current = new_state;
            }
            HistoryAction::Clear => {
                self.current = CsvData::default();
                self.history.clear();
                self.index = None;
            }
            HistoryAction::Undo => {
                if let Some(i) = self.index {
                    if i > 0 {
                        self.index = Some(i - 1);
                        self.current = self.history[i - 1].clone();
                    }
                }
            }
            HistoryAction::Redo => {
                if let Some(i) = self.index {
                    if i + 1 < self.history.len() {
                        self.index = Some(i + 1);
                        self.current = self.history[i + 1].clone();
                    }
                }
            }
        }
    }

    pub fn current(&self) -> &CsvData {
        &self.current
    }

    pub fn rows(&self) -> &[Row] {
        &self.current.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.current.columns
    }

    pub fn is_loaded(&self) -> bool {
        !self.current.rows.is_empty()
    }

    pub fn file_stats(&self) -> Option<FileStats> {
        if self.is_loaded() {
            Some(self.current.stats())
        } else {
            None
        }
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.history.len())
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str) -> Row {
        let mut r = Row::new();
        r.insert("id".to_string(), id.to_string());
        r
    }

    fn table(ids: &[&str]) -> CsvData {
        CsvData::new(
            ids.iter().map(|id| row(id)).collect(),
            vec!["id".to_string()],
            "test.csv".to_string(),
            100,
        )
    }

    #[test]
    fn test_initial_state() {
        let engine = HistoryEngine::new();
        assert!(!engine.is_loaded());
        assert!(!engine.can_undo());
        assert!(!engine.can_redo());
        assert!(engine.file_stats().is_none());
    }

    #[test]
    fn test_set_data_resets_history() {
        let mut engine = HistoryEngine::new();
        engine.apply(HistoryAction::SetData(table(&["1"])));
        engine.apply(HistoryAction::UpdateData(vec![row("2")]));
        assert!(engine.can_undo());

        engine.apply(HistoryAction::SetData(table(&["9"])));
        assert!(!engine.can_undo());
        assert!(!engine.can_redo());
        assert_eq!(engine.history_len(), 1);
        assert_eq!(engine.rows()[0]["id"], "9");
    }

    #[test]
    fn test_update_preserves_metadata() {
        let mut engine = HistoryEngine::new();
        engine.apply(HistoryAction::SetData(table(&["1", "2"])));
        engine.apply(HistoryAction::UpdateData(vec![row("1")]));

        assert_eq!(engine.current().filename, "test.csv");
        assert_eq!(engine.current().file_size, 100);
        assert_eq!(engine.rows().len(), 1);
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut engine = HistoryEngine::new();
        engine.apply(HistoryAction::SetData(table(&["0"])));
        engine.apply(HistoryAction::UpdateData(vec![row("1")]));
        engine.apply(HistoryAction::UpdateData(vec![row("2")]));
        engine.apply(HistoryAction::UpdateData(vec![row("3")]));
        assert!(engine.can_undo());

        engine.apply(HistoryAction::Undo);
        engine.apply(HistoryAction::Undo);
        engine.apply(HistoryAction::Undo);
        assert_eq!(engine.rows()[0]["id"], "0");
        assert!(!engine.can_undo());
        assert!(engine.can_redo());

        engine.apply(HistoryAction::Redo);
        assert_eq!(engine.rows()[0]["id"], "1");
    }

    #[test]
    fn test_undo_at_root_is_noop() {
        let mut engine = HistoryEngine::new();
        engine.apply(HistoryAction::SetData(table(&["0"])));
        engine.apply(HistoryAction::Undo);
        assert_eq!(engine.rows()[0]["id"], "0");
    }

    #[test]
    fn test_redo_at_tip_is_noop() {
        let mut engine = HistoryEngine::new();
        engine.apply(HistoryAction::SetData(table(&["0"])));
        engine.apply(HistoryAction::Redo);
        assert_eq!(engine.rows()[0]["id"], "0");
        assert!(!engine.can_redo());
    }

    #[test]
    fn test_mutation_truncates_redo_tail() {
        let mut engine = HistoryEngine::new();
        engine.apply(HistoryAction::SetData(table(&["0"])));
        engine.apply(HistoryAction::UpdateData(vec![row("1")]));
        engine.apply(HistoryAction::UpdateData(vec![row("2")]));
        engine.apply(HistoryAction::UpdateData(vec![row("3")]));

        engine.apply(HistoryAction::Undo);
        assert!(engine.can_redo());

        engine.apply(HistoryAction::UpdateData(vec![row("2b")]));
        assert!(!engine.can_redo());
        assert_eq!(engine.rows()[0]["id"], "2b");

        engine.apply(HistoryAction::Undo);
        assert_eq!(engine.rows()[0]["id"], "2");
    }

    #[test]
    fn test_sliding_window_evicts_oldest() {
        let mut engine = HistoryEngine::with_capacity(3);
        engine.apply(HistoryAction::SetData(table(&["0"])));
        engine.apply(HistoryAction::UpdateData(vec![row("1")]));
        engine.apply(HistoryAction::UpdateData(vec![row("2")]));
        engine.apply(HistoryAction::UpdateData(vec![row("3")]));
        assert_eq!(engine.history_len(), 3);

        // Root snapshot "0" was evicted; undo bottoms out at "1"
        engine.apply(HistoryAction::Undo);
        engine.apply(HistoryAction::Undo);
        assert_eq!(engine.rows()[0]["id"], "1");
        assert!(!engine.can_undo());
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut engine = HistoryEngine::new();
        engine.apply(HistoryAction::SetData(table(&["0"])));
        engine.apply(HistoryAction::UpdateData(vec![row("1")]));
        engine.apply(HistoryAction::Clear);

        assert!(!engine.is_loaded());
        assert!(!engine.can_undo());
        assert!(!engine.can_redo());
        assert_eq!(engine.history_len(), 0);
    }
}
