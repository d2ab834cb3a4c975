//! Editor-side file models: the explorer tree, open buffers, and the
//! current-file pointer.

use crate::sandbox::{FileTree, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// One explorer entry. Directories carry sorted children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub kind: NodeKind,
    pub children: Vec<FileNode>,
}

impl FileNode {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    pub fn directory(name: impl Into<String>, children: Vec<FileNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            children,
        }
    }

    /// Build an explorer tree from a mounted template. Ordering follows
    /// the template's map order, which is already sorted by name.
    pub fn from_template(tree: &FileTree) -> Vec<FileNode> {
        tree.iter()
            .map(|(name, node)| match node {
                TreeNode::File { .. } => FileNode::file(name.clone()),
                TreeNode::Directory(children) => {
                    FileNode::directory(name.clone(), Self::from_template(children))
                }
            })
            .collect()
    }
}

/// Syntax-highlighting language for a path, by extension.
pub fn editor_language(path: &str) -> &'static str {
    let extension = path.rsplit('.').next().unwrap_or_default();
    match extension {
        "js" | "jsx" => "javascript",
        "rs" => "rust",
        "json" => "json",
        "toml" => "toml",
        "html" => "html",
        "css" => "css",
        "md" => "markdown",
        _ => "plaintext",
    }
}

/// An open editor buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFile {
    pub path: String,
    pub content: String,
    pub language: &'static str,
}

/// The editor's view of the workspace: explorer tree, open buffers,
/// and which buffer has focus.
#[derive(Default)]
pub struct WorkspaceFiles {
    pub tree: Vec<FileNode>,
    open: Vec<OpenFile>,
    current: Option<String>,
}

impl WorkspaceFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything, as when switching languages.
    pub fn reset(&mut self) {
        self.tree.clear();
        self.open.clear();
        self.current = None;
    }

    pub fn set_tree(&mut self, tree: Vec<FileNode>) {
        self.tree = tree;
    }

    pub fn open_files(&self) -> &[OpenFile] {
        &self.open
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_file(&self) -> Option<&OpenFile> {
        let current = self.current.as_deref()?;
        self.open.iter().find(|f| f.path == current)
    }

    /// Focus an already-open buffer. Returns false if the path is not
    /// open, in which case the caller loads it first.
    pub fn focus(&mut self, path: &str) -> bool {
        if self.open.iter().any(|f| f.path == path) {
            self.current = Some(path.to_string());
            true
        } else {
            false
        }
    }

    /// Open (or replace) a buffer and give it focus.
    pub fn insert_open(&mut self, path: &str, content: String) {
        let language = editor_language(path);
        match self.open.iter_mut().find(|f| f.path == path) {
            Some(existing) => existing.content = content,
            None => self.open.push(OpenFile {
                path: path.to_string(),
                content,
                language,
            }),
        }
        self.current = Some(path.to_string());
    }

    /// Update the focused buffer's content. Returns the path updated,
    /// or None when no buffer has focus.
    pub fn update_current_content(&mut self, content: &str) -> Option<String> {
        let current = self.current.clone()?;
        let buffer = self.open.iter_mut().find(|f| f.path == current)?;
        buffer.content = content.to_string();
        Some(current)
    }

    /// Add a node to the explorer tree at the top level.
    pub fn add_tree_node(&mut self, node: FileNode) {
        self.tree.push(node);
        self.tree.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Remove a path everywhere it appears: tree, open buffers, focus.
    /// Focus falls back to the first remaining open buffer.
    pub fn remove(&mut self, path: &str) {
        self.tree.retain(|n| n.name != path);
        self.open.retain(|f| f.path != path);
        if self.current.as_deref() == Some(path) {
            self.current = self.open.first().map(|f| f.path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_detection_by_extension() {
        assert_eq!(editor_language("index.js"), "javascript");
        assert_eq!(editor_language("App.jsx"), "javascript");
        assert_eq!(editor_language("main.rs"), "rust");
        assert_eq!(editor_language("package.json"), "json");
        assert_eq!(editor_language("Cargo.toml"), "toml");
        assert_eq!(editor_language("notes.md"), "markdown");
        assert_eq!(editor_language("README"), "plaintext");
        assert_eq!(editor_language("archive.tar.gz"), "plaintext");
    }

    #[test]
    fn explorer_tree_mirrors_the_template() {
        let mut inner = FileTree::new();
        inner.insert("util.js".into(), TreeNode::file(""));
        let mut tree = FileTree::new();
        tree.insert("index.js".into(), TreeNode::file(""));
        tree.insert("src".into(), TreeNode::Directory(inner));

        let nodes = FileNode::from_template(&tree);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0], FileNode::file("index.js"));
        assert_eq!(
            nodes[1],
            FileNode::directory("src", vec![FileNode::file("util.js")])
        );
    }

    #[test]
    fn insert_open_focuses_and_detects_language() {
        let mut files = WorkspaceFiles::new();
        files.insert_open("main.rs", "fn main() {}".into());
        assert_eq!(files.current_path(), Some("main.rs"));
        let current = files.current_file().unwrap();
        assert_eq!(current.language, "rust");
        assert_eq!(current.content, "fn main() {}");
    }

    #[test]
    fn focus_only_works_for_open_buffers() {
        let mut files = WorkspaceFiles::new();
        files.insert_open("a.js", String::new());
        assert!(!files.focus("b.js"));
        assert!(files.focus("a.js"));
    }

    #[test]
    fn reopening_a_path_replaces_its_content_without_duplicating() {
        let mut files = WorkspaceFiles::new();
        files.insert_open("a.js", "old".into());
        files.insert_open("b.js", String::new());
        files.insert_open("a.js", "new".into());
        assert_eq!(files.open_files().len(), 2);
        assert_eq!(files.current_file().unwrap().content, "new");
    }

    #[test]
    fn update_current_content_targets_the_focused_buffer() {
        let mut files = WorkspaceFiles::new();
        files.insert_open("a.js", "one".into());
        files.insert_open("b.js", "two".into());
        files.focus("a.js");
        assert_eq!(files.update_current_content("edited").as_deref(), Some("a.js"));
        assert_eq!(
            files.open_files().iter().find(|f| f.path == "a.js").unwrap().content,
            "edited"
        );
        assert_eq!(
            files.open_files().iter().find(|f| f.path == "b.js").unwrap().content,
            "two"
        );
    }

    #[test]
    fn update_without_focus_is_none() {
        let mut files = WorkspaceFiles::new();
        assert_eq!(files.update_current_content("x"), None);
    }

    #[test]
    fn remove_refocuses_to_a_remaining_buffer() {
        let mut files = WorkspaceFiles::new();
        files.set_tree(vec![FileNode::file("a.js"), FileNode::file("b.js")]);
        files.insert_open("a.js", String::new());
        files.insert_open("b.js", String::new());
        files.focus("b.js");

        files.remove("b.js");
        assert_eq!(files.current_path(), Some("a.js"));
        assert!(files.tree.iter().all(|n| n.name != "b.js"));

        files.remove("a.js");
        assert_eq!(files.current_path(), None);
        assert!(files.open_files().is_empty());
    }

    #[test]
    fn add_tree_node_keeps_sorted_order() {
        let mut files = WorkspaceFiles::new();
        files.set_tree(vec![FileNode::file("b.js")]);
        files.add_tree_node(FileNode::file("a.js"));
        let names: Vec<&str> = files.tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["a.js", "b.js"]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut files = WorkspaceFiles::new();
        files.set_tree(vec![FileNode::file("a.js")]);
        files.insert_open("a.js", String::new());
        files.reset();
        assert!(files.tree.is_empty());
        assert!(files.open_files().is_empty());
        assert_eq!(files.current_path(), None);
    }
}
