use lexicard_types::WordEntry;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LibraryError {
    #[error("word cannot be empty")]
    EmptyWord,

    #[error("\"{0}\" is already in your library")]
    Duplicate(String),
}

/// In-memory ordered word collection, newest first.
///
/// The library is the single owner of word entries; callers persist the
/// whole snapshot after every mutation.
#[derive(Debug, Clone, Default)]
pub struct WordLibrary {
    entries: Vec<WordEntry>,
}

impl WordLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a library from a loaded snapshot, restoring newest-first
    /// order.
    pub fn from_entries(mut entries: Vec<WordEntry>) -> Self {
        entries.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        Self { entries }
    }

    /// Adds a word, trimmed. The canonical text must be non-empty and
    /// case-insensitively unique.
    pub fn add(&mut self, word: &str) -> Result<&WordEntry, LibraryError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(LibraryError::EmptyWord);
        }
        if self.contains(word) {
            return Err(LibraryError::Duplicate(word.to_string()));
        }

        self.entries.insert(0, WordEntry::new(word));
        Ok(&self.entries[0])
    }

    pub fn contains(&self, word: &str) -> bool {
        let needle = word.trim().to_lowercase();
        self.entries
            .iter()
            .any(|e| e.original_word.to_lowercase() == needle)
    }

    /// Replaces the entry with the same id; returns false when the entry is
    /// no longer in the library.
    pub fn update(&mut self, updated: WordEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<WordEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&WordEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn find_by_word(&self, word: &str) -> Option<&WordEntry> {
        let needle = word.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.original_word.to_lowercase() == needle)
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_prepends() {
        let mut library = WordLibrary::new();
        library.add("  house ").unwrap();
        library.add("tree").unwrap();

        assert_eq!(library.entries()[0].original_word, "tree");
        assert_eq!(library.entries()[1].original_word, "house");
    }

    #[test]
    fn empty_words_are_rejected() {
        let mut library = WordLibrary::new();
        assert_eq!(library.add("   "), Err(LibraryError::EmptyWord));
        assert!(library.is_empty());
    }

    #[test]
    fn duplicates_are_rejected_case_insensitively() {
        let mut library = WordLibrary::new();
        library.add("House").unwrap();

        assert_eq!(
            library.add("house"),
            Err(LibraryError::Duplicate("house".to_string()))
        );
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn update_replaces_by_id() {
        let mut library = WordLibrary::new();
        let id = library.add("house").unwrap().id.clone();

        let mut changed = library.get(&id).unwrap().clone();
        changed.original_word = "home".to_string();

        assert!(library.update(changed));
        assert_eq!(library.get(&id).unwrap().original_word, "home");
    }

    #[test]
    fn update_of_a_removed_entry_is_a_noop() {
        let mut library = WordLibrary::new();
        let entry = library.add("house").unwrap().clone();
        library.remove(&entry.id).unwrap();

        assert!(!library.update(entry));
        assert!(library.is_empty());
    }

    #[test]
    fn from_entries_restores_newest_first_order() {
        let mut old = WordEntry::new("old");
        old.date_added = 1;
        let mut new = WordEntry::new("new");
        new.date_added = 2;

        let library = WordLibrary::from_entries(vec![old, new]);
        assert_eq!(library.entries()[0].original_word, "new");
    }

    #[test]
    fn find_by_word_ignores_case_and_whitespace() {
        let mut library = WordLibrary::new();
        library.add("House").unwrap();

        assert!(library.find_by_word(" house ").is_some());
        assert!(library.find_by_word("tree").is_none());
    }
}
