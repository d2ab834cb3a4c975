use std::path::{Path, PathBuf};

use crate::sandbox::error::SandboxError;
use crate::sandbox::types::{FileTree, TreeNode};

/// Workspace filesystem rooted at a single directory.
///
/// All paths are validated to stay within the root. This is NOT a
/// chroot; it's path containment for a single editing session.
pub struct WorkspaceFs {
    root: PathBuf,
}

impl WorkspaceFs {
    /// Create a workspace rooted at `root`, creating the directory if needed.
    pub fn create(root: PathBuf) -> Result<Self, SandboxError> {
        std::fs::create_dir_all(&root).map_err(|e| {
            SandboxError::Mount(format!(
                "failed to create workspace root {}: {e}",
                root.display()
            ))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a workspace-relative path to an absolute host path,
    /// rejecting `..` traversal out of the root. The file need not exist.
    fn resolve(&self, path: &str) -> Result<PathBuf, SandboxError> {
        let raw = Path::new(path);
        // A leading "/" means the workspace root, not the host root.
        let relative = raw.strip_prefix("/").unwrap_or(raw);

        let mut normalized = PathBuf::new();
        for component in relative.components() {
            match component {
                std::path::Component::Normal(seg) => normalized.push(seg),
                std::path::Component::CurDir => {}
                std::path::Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(SandboxError::PathEscape(path.to_string()));
                    }
                }
                _ => {}
            }
        }

        Ok(self.root.join(normalized))
    }

    /// Materialize a template tree under the root. Existing files are
    /// overwritten; files outside the template are left alone.
    pub fn mount(&self, template: &FileTree) -> Result<(), SandboxError> {
        Self::mount_into(&self.root, template)
    }

    fn mount_into(dir: &Path, tree: &FileTree) -> Result<(), SandboxError> {
        for (name, node) in tree {
            let target = dir.join(name);
            match node {
                TreeNode::File { contents } => {
                    std::fs::write(&target, contents).map_err(|e| {
                        SandboxError::Mount(format!("writing {}: {e}", target.display()))
                    })?;
                }
                TreeNode::Directory(entries) => {
                    std::fs::create_dir_all(&target).map_err(|e| {
                        SandboxError::Mount(format!("creating {}: {e}", target.display()))
                    })?;
                    Self::mount_into(&target, entries)?;
                }
            }
        }
        Ok(())
    }

    pub fn read_file(&self, path: &str) -> Result<String, SandboxError> {
        let target = self.resolve(path)?;
        match std::fs::read_to_string(&target) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SandboxError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn write_file(&self, path: &str, contents: &str) -> Result<(), SandboxError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, contents)?;
        Ok(())
    }

    pub fn mkdir(&self, path: &str) -> Result<(), SandboxError> {
        let target = self.resolve(path)?;
        std::fs::create_dir_all(&target)?;
        Ok(())
    }

    /// Remove a file or an empty directory. Non-empty directories are
    /// rejected by the underlying `remove_dir` call.
    pub fn rm(&self, path: &str) -> Result<(), SandboxError> {
        let target = self.resolve(path)?;
        if !target.exists() {
            return Err(SandboxError::NotFound(path.to_string()));
        }
        if target.is_dir() {
            std::fs::remove_dir(&target)?;
        } else {
            std::fs::remove_file(&target)?;
        }
        Ok(())
    }
}
