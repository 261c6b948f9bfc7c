use colored::Colorize;

const LABEL_WIDTH: usize = 8;

/// Difference between the committed tree and the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexChangeType {
    Added,
    Modified,
    Deleted,
}

impl IndexChangeType {
    pub fn label(&self) -> &'static str {
        match self {
            IndexChangeType::Added => "added:",
            IndexChangeType::Modified => "modified:",
            IndexChangeType::Deleted => "deleted:",
        }
    }
}

/// Difference between the index and the working tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkspaceChangeType {
    Modified,
    Deleted,
}

impl WorkspaceChangeType {
    pub fn label(&self) -> &'static str {
        match self {
            WorkspaceChangeType::Modified => "modified:",
            WorkspaceChangeType::Deleted => "deleted:",
        }
    }
}

/// One line of status output: an indented, coloured `label path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChangeType {
    Index(IndexChangeType),
    Workspace(WorkspaceChangeType),
    Untracked,
}

impl FileChangeType {
    pub fn render(&self, path: &str) -> String {
        let line = match self {
            FileChangeType::Index(change) => format!("{} {}", change.label(), path).green(),
            FileChangeType::Workspace(change) => format!("{} {}", change.label(), path).red(),
            FileChangeType::Untracked => path.red(),
        };

        format!("{:>width$}{}", "", line, width = LABEL_WIDTH)
    }
}
