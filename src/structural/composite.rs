//! Pattern: Composite
//! Example: a file system where folders hold files and other folders, and every
//! operation treats a single file and a whole subtree the same way

use itertools::Itertools;

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    File { name: String, size: u64 },
    Folder { name: String, children: Vec<Entry> },
}

impl Entry {
    pub fn file(name: &str, size: u64) -> Self {
        Entry::File {
            name: name.to_string(),
            size,
        }
    }

    pub fn folder(name: &str) -> Self {
        Entry::Folder {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn with(mut self, child: Entry) -> Self {
        self.add(child);
        self
    }

    /// Adding to a file is a no-op that reports `false`.
    pub fn add(&mut self, child: Entry) -> bool {
        match self {
            Entry::Folder { children, .. } => {
                children.push(child);
                true
            }
            Entry::File { name, .. } => {
                tracing::warn!(file = %name, "cannot add children to a file");
                false
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::File { name, .. } | Entry::Folder { name, .. } => name,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Entry::File { size, .. } => *size,
            Entry::Folder { children, .. } => children.iter().map(Entry::size).sum(),
        }
    }

    pub fn file_count(&self) -> usize {
        match self {
            Entry::File { .. } => 1,
            Entry::Folder { children, .. } => children.iter().map(Entry::file_count).sum(),
        }
    }

    /// One line per entry, indented two spaces per level.
    pub fn display(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.display_into(0, &mut lines);
        lines
    }

    fn display_into(&self, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        match self {
            Entry::File { name, .. } => lines.push(format!("{indent}{name}")),
            Entry::Folder { name, children } => {
                lines.push(format!("{indent}{name}/"));
                for child in children {
                    child.display_into(depth + 1, lines);
                }
            }
        }
    }

    /// Slash-joined paths of every file whose name contains `keyword`.
    pub fn search(&self, keyword: &str) -> Vec<String> {
        let mut hits = Vec::new();
        self.search_into(keyword, &mut Vec::new(), &mut hits);
        hits
    }

    fn search_into<'a>(&'a self, keyword: &str, path: &mut Vec<&'a str>, hits: &mut Vec<String>) {
        path.push(self.name());
        match self {
            Entry::File { name, .. } => {
                if name.contains(keyword) {
                    hits.push(path.iter().join("/"));
                }
            }
            Entry::Folder { children, .. } => {
                for child in children {
                    child.search_into(keyword, path, hits);
                }
            }
        }
        path.pop();
    }
}
