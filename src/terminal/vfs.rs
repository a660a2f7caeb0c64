use std::collections::HashMap;
use std::fmt::Display;

use thiserror::Error;

use super::path::{display, home_segments, resolve, split_last};
use super::seed::seed_tree;
use super::snapshot::{SnapshotError, SnapshotNode};
use super::style::{paint, BLUE};
use super::tree::{DirEntry, FileTree, KindFilter, VfsError, VfsNode};

const LONG_PERMISSIONS: &str = "rwxr-xr-x";
const LONG_DATE: &str = "Dec  5 10:00";

/// Opaque handle to one shell session's working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u32);

/// A failed filesystem operation: the error kind plus the line shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FsError {
    pub kind: VfsError,
    message: String,
}

impl FsError {
    fn at(kind: VfsError, context: impl Display) -> Self {
        Self {
            kind,
            message: format!("{context}: {kind}"),
        }
    }

    fn usage(message: &str) -> Self {
        Self {
            kind: VfsError::Usage,
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One tree shared by any number of contexts, each with its own cwd.
#[derive(Debug, Clone)]
pub struct VirtualFilesystem {
    tree: FileTree,
    contexts: HashMap<ContextId, Vec<String>>,
    next_context: u32,
}

impl Default for VirtualFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFilesystem {
    /// Seeded filesystem with its default context at the home directory.
    pub fn new() -> Self {
        Self::with_tree(seed_tree())
    }

    pub fn with_tree(tree: FileTree) -> Self {
        let mut vfs = Self {
            tree,
            contexts: HashMap::new(),
            next_context: 0,
        };
        vfs.create_context();
        vfs
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn default_context(&self) -> ContextId {
        ContextId(0)
    }

    /// Allocate a new session starting in the home directory.
    pub fn create_context(&mut self) -> ContextId {
        let id = ContextId(self.next_context);
        self.next_context += 1;
        let start = self.start_dir();
        self.contexts.insert(id, start);
        log::info!("created filesystem context {}", id.0);
        id
    }

    /// Forget a closed session's cwd. The default context is never released.
    pub fn release_context(&mut self, ctx: ContextId) -> bool {
        if ctx == self.default_context() {
            return false;
        }
        let released = self.contexts.remove(&ctx).is_some();
        if released {
            log::info!("released filesystem context {}", ctx.0);
        }
        released
    }

    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    fn start_dir(&self) -> Vec<String> {
        let home = home_segments();
        if self.tree.is_dir(&home) {
            home
        } else {
            Vec::new()
        }
    }

    /// Working directory segments of `ctx`. Unknown handles read as home.
    pub fn cwd(&self, ctx: ContextId) -> Vec<String> {
        self.contexts
            .get(&ctx)
            .cloned()
            .unwrap_or_else(home_segments)
    }

    pub fn resolve(&self, ctx: ContextId, raw: &str) -> Vec<String> {
        resolve(raw, &self.cwd(ctx))
    }

    pub fn pwd(&self, ctx: ContextId) -> String {
        display(&self.cwd(ctx))
    }

    pub fn cd(&mut self, ctx: ContextId, path: &str) -> Result<(), FsError> {
        let target = self.resolve(ctx, path);
        let node = self
            .tree
            .lookup(&target)
            .map_err(|e| FsError::at(e, format!("cd: {path}")))?;
        if !node.is_directory() {
            return Err(FsError::at(
                VfsError::NotADirectory,
                format!("cd: {path}"),
            ));
        }
        log::debug!("context {} moved to {}", ctx.0, display(&target));
        self.contexts.insert(ctx, target);
        Ok(())
    }

    /// Sorted listing of `path` (default: cwd), or the name alone for a file.
    pub fn ls(
        &self,
        ctx: ContextId,
        path: Option<&str>,
        show_hidden: bool,
        long_format: bool,
    ) -> Result<String, FsError> {
        let shown = path.map_or_else(|| self.pwd(ctx), str::to_string);
        let target = self.resolve(ctx, &shown);
        let node = self.tree.lookup(&target).map_err(|e| {
            FsError::at(e, format!("ls: cannot access '{shown}'"))
        })?;
        if !node.is_directory() {
            return Ok(node.name.clone());
        }

        let mut entries = self
            .tree
            .list(&target)
            .map_err(|e| FsError::at(e, format!("ls: cannot access '{shown}'")))?;
        if !show_hidden {
            entries.retain(|e| !e.name.starts_with('.'));
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        if long_format {
            Ok(entries
                .iter()
                .map(long_line)
                .collect::<Vec<_>>()
                .join("\n"))
        } else {
            Ok(entries
                .iter()
                .map(styled_name)
                .collect::<Vec<_>>()
                .join("  "))
        }
    }

    pub fn cat(&self, ctx: ContextId, path: &str) -> Result<String, FsError> {
        let target = self.resolve(ctx, path);
        let node = self
            .tree
            .lookup(&target)
            .map_err(|e| FsError::at(e, format!("cat: {path}")))?;
        node.content()
            .map(str::to_string)
            .ok_or_else(|| FsError::at(VfsError::IsADirectory, format!("cat: {path}")))
    }

    pub fn mkdir(&mut self, ctx: ContextId, path: &str) -> Result<(), FsError> {
        let target = self.resolve(ctx, path);
        let (parent, name) =
            split_last(&target).ok_or_else(|| FsError::usage("mkdir: missing operand"))?;
        self.tree
            .insert_child(parent, VfsNode::directory(name))
            .map_err(|e| FsError::at(e, format!("mkdir: cannot create directory '{path}'")))
    }

    /// `mkdir -p`: create every missing directory along `path`.
    pub fn mkdir_all(&mut self, ctx: ContextId, path: &str) -> Result<(), FsError> {
        let target = self.resolve(ctx, path);
        if target.is_empty() {
            return Ok(());
        }
        for depth in 1..=target.len() {
            let prefix = &target[..depth];
            match self.tree.lookup(prefix) {
                Ok(node) if node.is_directory() => continue,
                Ok(_) => {
                    let kind = if depth == target.len() {
                        VfsError::AlreadyExists
                    } else {
                        VfsError::NotADirectory
                    };
                    return Err(FsError::at(
                        kind,
                        format!("mkdir: cannot create directory '{path}'"),
                    ));
                }
                Err(_) => {
                    let (parent, name) = prefix.split_at(depth - 1);
                    self.tree
                        .insert_child(parent, VfsNode::directory(name[0].as_str()))
                        .map_err(|e| {
                            FsError::at(e, format!("mkdir: cannot create directory '{path}'"))
                        })?;
                }
            }
        }
        Ok(())
    }

    /// Create an empty file. An existing node of either kind is left untouched.
    pub fn touch(&mut self, ctx: ContextId, path: &str) -> Result<(), FsError> {
        let target = self.resolve(ctx, path);
        let (parent, name) =
            split_last(&target).ok_or_else(|| FsError::usage("touch: missing file operand"))?;
        if self.tree.exists(&target) {
            return Ok(());
        }
        self.tree
            .insert_child(parent, VfsNode::file(name, ""))
            .map_err(|e| FsError::at(e, format!("touch: cannot touch '{path}'")))
    }

    pub fn rm(&mut self, ctx: ContextId, path: &str, recursive: bool) -> Result<(), FsError> {
        let target = self.resolve(ctx, path);
        let context = format!("rm: cannot remove '{path}'");
        let Some((parent, name)) = split_last(&target) else {
            let kind = if recursive {
                VfsError::PermissionDenied
            } else {
                VfsError::IsADirectory
            };
            return Err(FsError::at(kind, context));
        };
        let node = self
            .tree
            .lookup(&target)
            .map_err(|e| FsError::at(e, &context))?;
        if node.is_directory() && !recursive {
            return Err(FsError::at(VfsError::IsADirectory, context));
        }
        self.tree
            .remove_child(parent, name, None)
            .map_err(|e| FsError::at(e, context))
    }

    /// Remove an empty directory.
    pub fn rmdir(&mut self, ctx: ContextId, path: &str) -> Result<(), FsError> {
        let target = self.resolve(ctx, path);
        let context = format!("rmdir: failed to remove '{path}'");
        let Some((parent, name)) = split_last(&target) else {
            return Err(FsError::at(VfsError::PermissionDenied, context));
        };
        let node = self
            .tree
            .lookup(&target)
            .map_err(|e| FsError::at(e, &context))?;
        if !node.is_directory() {
            return Err(FsError::at(VfsError::NotADirectory, context));
        }
        if self
            .tree
            .has_children(&target)
            .map_err(|e| FsError::at(e, &context))?
        {
            return Err(FsError::at(VfsError::NotEmpty, context));
        }
        self.tree
            .remove_child(parent, name, Some(KindFilter::Directories))
            .map_err(|e| FsError::at(e, context))
    }

    /// Rename the node at `path` within its own directory.
    pub fn rename(&mut self, ctx: ContextId, path: &str, new_name: &str) -> Result<(), FsError> {
        let target = self.resolve(ctx, path);
        let Some((parent, old_name)) = split_last(&target) else {
            return Err(FsError::at(
                VfsError::PermissionDenied,
                format!("rename: cannot rename '{path}'"),
            ));
        };
        if !self.tree.exists(&target) {
            return Err(FsError::at(
                VfsError::NotFound,
                format!("rename: cannot rename '{path}'"),
            ));
        }
        self.tree
            .rename_child(parent, old_name, new_name)
            .map_err(|e| FsError::at(e, format!("rename: cannot rename '{path}' to '{new_name}'")))
    }

    /// Replace a file's content, as the text editor does on save.
    pub fn write(&mut self, ctx: ContextId, path: &str, content: &str) -> Result<(), FsError> {
        let target = self.resolve(ctx, path);
        self.tree
            .write(&target, content)
            .map_err(|e| FsError::at(e, format!("write: {path}")))
    }

    /// Entries of `path` (default: cwd) in insertion order; empty when it is not a directory.
    pub fn list_entries(&self, ctx: ContextId, path: Option<&str>) -> Vec<DirEntry> {
        let target = match path {
            Some(p) => self.resolve(ctx, p),
            None => self.cwd(ctx),
        };
        self.tree.list(&target).unwrap_or_default()
    }

    pub fn snapshot(&self) -> SnapshotNode {
        self.tree.to_snapshot()
    }

    /// Swap in a saved tree. Contexts whose cwd vanished go back to home.
    pub fn restore(&mut self, snapshot: &SnapshotNode) -> Result<(), SnapshotError> {
        let tree = FileTree::from_snapshot(snapshot).inspect_err(|e| {
            log::warn!("rejected filesystem snapshot: {e}");
        })?;
        self.tree = tree;
        let start = self.start_dir();
        for cwd in self.contexts.values_mut() {
            if !self.tree.is_dir(cwd) {
                *cwd = start.clone();
            }
        }
        log::info!("restored filesystem with {} nodes", self.tree.node_count());
        Ok(())
    }
}

fn styled_name(entry: &DirEntry) -> String {
    if entry.is_directory {
        paint(BLUE, &entry.name)
    } else {
        entry.name.clone()
    }
}

fn long_line(entry: &DirEntry) -> String {
    let kind = if entry.is_directory { 'd' } else { '-' };
    format!(
        "{kind}{LONG_PERMISSIONS} 1 user user {:>8} {LONG_DATE} {}",
        entry.size,
        styled_name(entry)
    )
}
