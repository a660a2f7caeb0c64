use indextree::{Arena, NodeId};
use thiserror::Error;

use super::path::is_valid_name;
use super::snapshot::{SnapshotError, SnapshotNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsNode {
    pub name: String,
    node_type: VfsNodeType,
}

impl VfsNode {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: VfsNodeType::Directory,
        }
    }

    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: VfsNodeType::File {
                content: content.into(),
            },
        }
    }

    pub fn node_type(&self) -> &VfsNodeType {
        &self.node_type
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.node_type, VfsNodeType::Directory)
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// File content, `None` for directories.
    pub fn content(&self) -> Option<&str> {
        match &self.node_type {
            VfsNodeType::File { content } => Some(content),
            VfsNodeType::Directory => None,
        }
    }

    pub fn size(&self) -> u64 {
        match &self.node_type {
            VfsNodeType::File { content } => content.len() as u64,
            VfsNodeType::Directory => 4096,
        }
    }
}

// Kind is fixed at creation: only file content is ever mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VfsNodeType {
    Directory,
    File { content: String },
}

/// Restricts `remove_child` to one node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    Files,
    Directories,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VfsError {
    #[error("No such file or directory")]
    NotFound,
    #[error("Not a directory")]
    NotADirectory,
    #[error("Is a directory")]
    IsADirectory,
    #[error("File exists")]
    AlreadyExists,
    #[error("Directory not empty")]
    NotEmpty,
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Invalid argument")]
    InvalidName,
    #[error("missing operand")]
    Usage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_directory: bool,
    pub size: u64,
}

/// Hierarchical node store. Every node lives in one arena and is addressed
/// from outside by path segments only.
#[derive(Debug, Clone)]
pub struct FileTree {
    arena: Arena<VfsNode>,
    root: NodeId,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(VfsNode::directory("/"));
        Self { arena, root }
    }

    fn data(&self, id: NodeId) -> &VfsNode {
        self.arena[id].get()
    }

    fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        parent
            .children(&self.arena)
            .find(|child| self.data(*child).name == name)
    }

    fn locate(&self, segments: &[String]) -> Result<NodeId, VfsError> {
        let mut current = self.root;
        for segment in segments {
            if !self.data(current).is_directory() {
                return Err(VfsError::NotFound);
            }
            current = self
                .find_child(current, segment)
                .ok_or(VfsError::NotFound)?;
        }
        Ok(current)
    }

    fn locate_dir(&self, segments: &[String]) -> Result<NodeId, VfsError> {
        let id = self.locate(segments)?;
        if self.data(id).is_directory() {
            Ok(id)
        } else {
            Err(VfsError::NotADirectory)
        }
    }

    /// Node at `segments`; the empty sequence is the root.
    pub fn lookup(&self, segments: &[String]) -> Result<&VfsNode, VfsError> {
        self.locate(segments).map(|id| self.data(id))
    }

    pub fn exists(&self, segments: &[String]) -> bool {
        self.locate(segments).is_ok()
    }

    pub fn is_dir(&self, segments: &[String]) -> bool {
        self.lookup(segments).is_ok_and(VfsNode::is_directory)
    }

    /// Children of a directory, in insertion order.
    pub fn list(&self, segments: &[String]) -> Result<Vec<DirEntry>, VfsError> {
        let dir = self.locate_dir(segments)?;
        Ok(dir
            .children(&self.arena)
            .map(|child| {
                let node = self.data(child);
                DirEntry {
                    name: node.name.clone(),
                    is_directory: node.is_directory(),
                    size: node.size(),
                }
            })
            .collect())
    }

    /// Add `node` under the directory at `parent`. Nothing is mutated on failure.
    pub fn insert_child(&mut self, parent: &[String], node: VfsNode) -> Result<(), VfsError> {
        if !is_valid_name(&node.name) {
            return Err(VfsError::InvalidName);
        }
        let parent_id = self.locate_dir(parent)?;
        if self.find_child(parent_id, &node.name).is_some() {
            return Err(VfsError::AlreadyExists);
        }
        let child = self.arena.new_node(node);
        parent_id.append(child, &mut self.arena);
        Ok(())
    }

    /// Detach and drop `name` (and its whole subtree) from `parent`.
    ///
    /// With a filter, a child of the other kind counts as missing.
    pub fn remove_child(
        &mut self,
        parent: &[String],
        name: &str,
        filter: Option<KindFilter>,
    ) -> Result<(), VfsError> {
        let parent_id = self.locate_dir(parent)?;
        let child = self
            .find_child(parent_id, name)
            .ok_or(VfsError::NotFound)?;
        let is_directory = self.data(child).is_directory();
        match filter {
            Some(KindFilter::Files) if is_directory => return Err(VfsError::NotFound),
            Some(KindFilter::Directories) if !is_directory => return Err(VfsError::NotFound),
            _ => {}
        }
        child.remove_subtree(&mut self.arena);
        Ok(())
    }

    /// Rename a child in place. A sibling already called `new_name` is a collision.
    pub fn rename_child(
        &mut self,
        parent: &[String],
        old_name: &str,
        new_name: &str,
    ) -> Result<(), VfsError> {
        if !is_valid_name(new_name) {
            return Err(VfsError::InvalidName);
        }
        let parent_id = self.locate_dir(parent)?;
        let child = self
            .find_child(parent_id, old_name)
            .ok_or(VfsError::NotFound)?;
        if old_name == new_name {
            return Ok(());
        }
        if self.find_child(parent_id, new_name).is_some() {
            return Err(VfsError::AlreadyExists);
        }
        self.arena[child].get_mut().name = new_name.to_string();
        Ok(())
    }

    /// Replace the content of the file at `segments`.
    pub fn write(&mut self, segments: &[String], content: &str) -> Result<(), VfsError> {
        let id = self.locate(segments)?;
        match &mut self.arena[id].get_mut().node_type {
            VfsNodeType::File { content: current } => {
                *current = content.to_string();
                Ok(())
            }
            VfsNodeType::Directory => Err(VfsError::IsADirectory),
        }
    }

    pub fn has_children(&self, segments: &[String]) -> Result<bool, VfsError> {
        let dir = self.locate_dir(segments)?;
        Ok(dir.children(&self.arena).next().is_some())
    }

    /// Owned copy of the whole tree for persistence.
    pub fn to_snapshot(&self) -> SnapshotNode {
        self.snapshot_from(self.root)
    }

    fn snapshot_from(&self, node: NodeId) -> SnapshotNode {
        let data = self.data(node);
        match &data.node_type {
            VfsNodeType::File { content } => SnapshotNode::File {
                name: data.name.clone(),
                content: content.clone(),
            },
            VfsNodeType::Directory => SnapshotNode::Directory {
                name: data.name.clone(),
                children: node
                    .children(&self.arena)
                    .map(|child| self.snapshot_from(child))
                    .collect(),
            },
        }
    }

    /// Rebuild a tree, enforcing the same invariants as the mutating operations.
    pub fn from_snapshot(snapshot: &SnapshotNode) -> Result<Self, SnapshotError> {
        let children = match snapshot {
            SnapshotNode::Directory { children, .. } => children,
            SnapshotNode::File { .. } => return Err(SnapshotError::RootNotDirectory),
        };
        let mut tree = Self::new();
        let root = tree.root;
        for child in children {
            tree.restore_into(root, child)?;
        }
        Ok(tree)
    }

    fn restore_into(&mut self, parent: NodeId, snapshot: &SnapshotNode) -> Result<(), SnapshotError> {
        let name = snapshot.name();
        if !is_valid_name(name) {
            return Err(SnapshotError::InvalidName(name.to_string()));
        }
        if self.find_child(parent, name).is_some() {
            return Err(SnapshotError::DuplicateName(name.to_string()));
        }
        match snapshot {
            SnapshotNode::File { name, content } => {
                let id = self.arena.new_node(VfsNode::file(name.as_str(), content.as_str()));
                parent.append(id, &mut self.arena);
            }
            SnapshotNode::Directory { name, children } => {
                let id = self.arena.new_node(VfsNode::directory(name.as_str()));
                parent.append(id, &mut self.arena);
                for child in children {
                    self.restore_into(id, child)?;
                }
            }
        }
        Ok(())
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.descendants(&self.arena).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(path: &[&str]) -> Vec<String> {
        path.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> FileTree {
        let mut tree = FileTree::new();
        tree.insert_child(&[], VfsNode::directory("docs")).unwrap();
        tree.insert_child(&segs(&["docs"]), VfsNode::file("a.txt", "alpha"))
            .unwrap();
        tree.insert_child(&segs(&["docs"]), VfsNode::directory("sub"))
            .unwrap();
        tree
    }

    #[test]
    fn test_lookup() {
        let tree = sample();
        assert_eq!(tree.lookup(&[]).unwrap().name, "/");
        assert!(tree.lookup(&[]).unwrap().is_directory());
        assert_eq!(
            tree.lookup(&segs(&["docs", "a.txt"])).unwrap().content(),
            Some("alpha")
        );
        assert_eq!(tree.lookup(&segs(&["nope"])), Err(VfsError::NotFound));
        // traversal through a file is a miss, not a type error
        assert_eq!(
            tree.lookup(&segs(&["docs", "a.txt", "x"])),
            Err(VfsError::NotFound)
        );
    }

    #[test]
    fn test_insert_keeps_order_and_rejects_duplicates() {
        let mut tree = sample();
        let names: Vec<String> = tree
            .list(&segs(&["docs"]))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a.txt", "sub"]);

        let before = tree.node_count();
        let dup = tree.insert_child(&segs(&["docs"]), VfsNode::directory("a.txt"));
        assert_eq!(dup, Err(VfsError::AlreadyExists));
        assert_eq!(tree.node_count(), before);
        assert_eq!(
            tree.lookup(&segs(&["docs", "a.txt"])).unwrap().content(),
            Some("alpha")
        );
    }

    #[test]
    fn test_insert_into_file_or_missing_parent() {
        let mut tree = sample();
        assert_eq!(
            tree.insert_child(&segs(&["docs", "a.txt"]), VfsNode::file("x", "")),
            Err(VfsError::NotADirectory)
        );
        assert_eq!(
            tree.insert_child(&segs(&["ghost"]), VfsNode::file("x", "")),
            Err(VfsError::NotFound)
        );
        assert_eq!(
            tree.insert_child(&[], VfsNode::file("..", "")),
            Err(VfsError::InvalidName)
        );
    }

    #[test]
    fn test_remove_child_with_filter() {
        let mut tree = sample();
        assert_eq!(
            tree.remove_child(&segs(&["docs"]), "sub", Some(KindFilter::Files)),
            Err(VfsError::NotFound)
        );
        assert!(tree.exists(&segs(&["docs", "sub"])));
        tree.remove_child(&segs(&["docs"]), "sub", Some(KindFilter::Directories))
            .unwrap();
        assert!(!tree.exists(&segs(&["docs", "sub"])));
        assert_eq!(
            tree.remove_child(&segs(&["docs"]), "sub", None),
            Err(VfsError::NotFound)
        );
    }

    #[test]
    fn test_remove_drops_subtree() {
        let mut tree = sample();
        tree.insert_child(&segs(&["docs", "sub"]), VfsNode::file("deep", "d"))
            .unwrap();
        assert_eq!(tree.node_count(), 5);
        tree.remove_child(&[], "docs", None).unwrap();
        assert_eq!(tree.node_count(), 1);
        assert!(tree.list(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_rename_rejects_collision() {
        let mut tree = sample();
        assert_eq!(
            tree.rename_child(&segs(&["docs"]), "a.txt", "sub"),
            Err(VfsError::AlreadyExists)
        );
        assert_eq!(
            tree.rename_child(&segs(&["docs"]), "missing", "b"),
            Err(VfsError::NotFound)
        );
        tree.rename_child(&segs(&["docs"]), "a.txt", "b.txt").unwrap();
        assert!(tree.exists(&segs(&["docs", "b.txt"])));
        assert!(!tree.exists(&segs(&["docs", "a.txt"])));
    }

    #[test]
    fn test_write_content() {
        let mut tree = sample();
        tree.write(&segs(&["docs", "a.txt"]), "").unwrap();
        assert_eq!(
            tree.lookup(&segs(&["docs", "a.txt"])).unwrap().content(),
            Some("")
        );
        assert_eq!(
            tree.write(&segs(&["docs"]), "x"),
            Err(VfsError::IsADirectory)
        );
        assert_eq!(tree.write(&segs(&["nope"]), "x"), Err(VfsError::NotFound));
    }

    #[test]
    fn test_clone_is_an_independent_snapshot() {
        let mut tree = sample();
        let snapshot = tree.clone();
        tree.write(&segs(&["docs", "a.txt"]), "changed").unwrap();
        tree.remove_child(&segs(&["docs"]), "sub", None).unwrap();
        assert_eq!(
            snapshot.lookup(&segs(&["docs", "a.txt"])).unwrap().content(),
            Some("alpha")
        );
        assert!(snapshot.exists(&segs(&["docs", "sub"])));
    }
}
