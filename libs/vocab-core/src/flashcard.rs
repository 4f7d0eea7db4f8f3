//! Flashcard session controller.
//!
//! Tracks the current index and flip state over a category-filtered deck of
//! vocab entries. The deck itself lives in the vocab store; the session only
//! holds navigation state and is handed the current collection per call.

use crate::types::{CategoryFilter, Vocab};

/// Learned/total progress over the filtered deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub learned: usize,
    pub total: usize,
}

impl Progress {
    /// Percentage for the progress bar; 0.0 when the deck is empty.
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.learned as f32 / self.total as f32 * 100.0
        }
    }
}

/// Flashcard session state.
#[derive(Debug, Default)]
pub struct FlashcardSession {
    filter: CategoryFilter,
    index: usize,
    flipped: bool,
}

impl FlashcardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Change the category filter. A changed filter resets the index and
    /// flip state; re-selecting the current filter is a no-op.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        if filter != self.filter {
            self.filter = filter;
            self.index = 0;
            self.flipped = false;
        }
    }

    /// The filtered deck, in store order.
    pub fn deck<'a>(&self, vocabs: &'a [Vocab]) -> Vec<&'a Vocab> {
        vocabs.iter().filter(|v| self.filter.matches(v)).collect()
    }

    /// The card under the cursor, `None` for an empty deck or an index that
    /// fell off the end after deletions.
    pub fn current<'a>(&self, vocabs: &'a [Vocab]) -> Option<&'a Vocab> {
        self.deck(vocabs).get(self.index).copied()
    }

    /// Toggle between word and meaning.
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Move to the next card; clamps at the end, resets flip state.
    pub fn next(&mut self, vocabs: &[Vocab]) {
        self.flipped = false;
        let len = self.deck(vocabs).len();
        if self.index + 1 < len {
            self.index += 1;
        }
    }

    /// Move to the previous card; clamps at the start, resets flip state.
    pub fn prev(&mut self) {
        self.flipped = false;
        self.index = self.index.saturating_sub(1);
    }

    /// Id of the current card if it still needs the learned mark.
    ///
    /// Returns `None` when the deck is empty or the card is already learned,
    /// guarding the redundant mutation.
    pub fn mark_learned_target(&self, vocabs: &[Vocab]) -> Option<i64> {
        self.current(vocabs)
            .filter(|v| !v.learned())
            .map(|v| v.id)
    }

    /// Learned/total counts over the filtered deck.
    pub fn progress(&self, vocabs: &[Vocab]) -> Progress {
        let deck = self.deck(vocabs);
        Progress {
            learned: deck.iter().filter(|v| v.learned()).count(),
            total: deck.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vocab(id: i64, category_id: i64, learned: bool) -> Vocab {
        Vocab {
            id,
            word: format!("word-{id}"),
            meaning: format!("meaning-{id}"),
            category_id,
            is_learned: learned.then_some(true),
        }
    }

    fn deck() -> Vec<Vocab> {
        vec![
            vocab(1, 1, false),
            vocab(2, 1, true),
            vocab(3, 2, false),
        ]
    }

    #[test]
    fn test_navigation_clamps_and_resets_flip() {
        let vocabs = deck();
        let mut session = FlashcardSession::new();
        session.set_filter(CategoryFilter::Category(1));

        session.flip();
        assert!(session.is_flipped());

        session.next(&vocabs);
        assert_eq!(session.index(), 1);
        assert!(!session.is_flipped());

        // clamp at the end, no wraparound
        session.next(&vocabs);
        assert_eq!(session.index(), 1);

        session.flip();
        session.prev();
        assert_eq!(session.index(), 0);
        assert!(!session.is_flipped());

        session.prev();
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_filter_change_resets_state() {
        let vocabs = deck();
        let mut session = FlashcardSession::new();
        session.next(&vocabs);
        session.flip();

        session.set_filter(CategoryFilter::Category(2));
        assert_eq!(session.index(), 0);
        assert!(!session.is_flipped());
        assert_eq!(session.current(&vocabs).unwrap().id, 3);

        // same filter again is a no-op
        session.next(&vocabs);
        session.set_filter(CategoryFilter::Category(2));
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_current_is_none_for_empty_deck() {
        let vocabs = deck();
        let mut session = FlashcardSession::new();
        session.set_filter(CategoryFilter::Category(99));
        assert_eq!(session.current(&vocabs), None);
        assert_eq!(session.mark_learned_target(&vocabs), None);
    }

    #[test]
    fn test_mark_learned_target_guards_redundant_call() {
        let vocabs = deck();
        let mut session = FlashcardSession::new();
        session.set_filter(CategoryFilter::Category(1));

        assert_eq!(session.mark_learned_target(&vocabs), Some(1));
        session.next(&vocabs);
        // already learned
        assert_eq!(session.mark_learned_target(&vocabs), None);
    }

    #[test]
    fn test_progress_counts_and_percent() {
        let vocabs = deck();
        let session = FlashcardSession::new();
        let progress = session.progress(&vocabs);
        assert_eq!(progress, Progress { learned: 1, total: 3 });

        let mut filtered = FlashcardSession::new();
        filtered.set_filter(CategoryFilter::Category(99));
        let empty = filtered.progress(&vocabs);
        assert_eq!(empty, Progress { learned: 0, total: 0 });
        assert_eq!(empty.percent(), 0.0);
    }

    #[test]
    fn test_progress_is_monotonic_as_cards_are_learned() {
        let mut vocabs = deck();
        let session = FlashcardSession::new();
        let mut last = session.progress(&vocabs).learned;
        for i in 0..vocabs.len() {
            vocabs[i].is_learned = Some(true);
            let now = session.progress(&vocabs).learned;
            assert!(now >= last);
            last = now;
        }
        assert_eq!(last, vocabs.len());
    }
}
