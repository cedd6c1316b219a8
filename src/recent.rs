pub const MAX_RECENT_FILES: usize = 5;

/// Most-recent-first list of opened paths, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentFiles {
    entries: Vec<String>,
}

impl RecentFiles {
    pub fn touch(&mut self, path: &str) {
        self.entries.retain(|entry| entry != path);
        self.entries.insert(0, path.to_string());
        self.entries.truncate(MAX_RECENT_FILES);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
