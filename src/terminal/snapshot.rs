use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serializable image of a whole tree, children kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SnapshotNode {
    Directory {
        name: String,
        #[serde(default)]
        children: Vec<SnapshotNode>,
    },
    File {
        name: String,
        #[serde(default)]
        content: String,
    },
}

impl SnapshotNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Directory { name, .. } | Self::File { name, .. } => name,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot root must be a directory")]
    RootNotDirectory,
    #[error("duplicate entry '{0}' in snapshot")]
    DuplicateName(String),
    #[error("invalid entry name '{0}' in snapshot")]
    InvalidName(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::tree::FileTree;

    #[test]
    fn test_json_shape() {
        let snapshot = SnapshotNode::Directory {
            name: "/".to_string(),
            children: vec![SnapshotNode::File {
                name: "a.txt".to_string(),
                content: "hi".to_string(),
            }],
        };
        let json = snapshot.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"type":"directory","name":"/","children":[{"type":"file","name":"a.txt","content":"hi"}]}"#
        );
        assert_eq!(SnapshotNode::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_missing_fields_default() {
        let parsed =
            SnapshotNode::from_json(r#"{"type":"directory","name":"/","children":[{"type":"file","name":"empty"}]}"#)
                .unwrap();
        let tree = FileTree::from_snapshot(&parsed).unwrap();
        let node = tree.lookup(&["empty".to_string()]).unwrap();
        assert_eq!(node.content(), Some(""));
    }

    #[test]
    fn test_rejects_invalid_trees() {
        let file_root = SnapshotNode::File {
            name: "/".to_string(),
            content: String::new(),
        };
        assert!(matches!(
            FileTree::from_snapshot(&file_root),
            Err(SnapshotError::RootNotDirectory)
        ));

        let dup = SnapshotNode::from_json(
            r#"{"type":"directory","name":"/","children":[
                {"type":"directory","name":"x"},
                {"type":"file","name":"x","content":""}]}"#,
        )
        .unwrap();
        assert!(matches!(
            FileTree::from_snapshot(&dup),
            Err(SnapshotError::DuplicateName(name)) if name == "x"
        ));

        let bad_name = SnapshotNode::from_json(
            r#"{"type":"directory","name":"/","children":[{"type":"file","name":"a/b"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            FileTree::from_snapshot(&bad_name),
            Err(SnapshotError::InvalidName(_))
        ));

        assert!(matches!(
            SnapshotNode::from_json("not json"),
            Err(SnapshotError::Json(_))
        ));
    }
}
