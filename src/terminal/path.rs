/// Segments of the home directory that `~` expands to.
pub const HOME: [&str; 2] = ["home", "user"];

pub fn home_segments() -> Vec<String> {
    HOME.iter().map(|s| s.to_string()).collect()
}

/// Resolve a user-supplied path against `cwd` into normalized absolute segments.
///
/// Total over every input: missing targets are not detected here and `..`
/// at the root is ignored, the same way a shell treats `cd /..`.
pub fn resolve(raw: &str, cwd: &[String]) -> Vec<String> {
    // A leading `~` is replaced by the home path, whatever follows it
    let expanded;
    let path = if let Some(rest) = raw.strip_prefix('~') {
        expanded = format!("/{}{}", HOME.join("/"), rest);
        expanded.as_str()
    } else {
        raw
    };

    let mut parts: Vec<String> = if path.starts_with('/') {
        Vec::new()
    } else {
        cwd.to_vec()
    };

    for part in path.split('/').filter(|s| !s.is_empty()) {
        match part {
            "." => {}
            ".." => {
                let _ = parts.pop();
            }
            other => parts.push(other.to_string()),
        }
    }
    parts
}

/// Render segments as an absolute path string.
pub fn display(segments: &[String]) -> String {
    format!("/{}", segments.join("/"))
}

/// Split resolved segments into `(parent, name)`. `None` for the root.
pub fn split_last(segments: &[String]) -> Option<(&[String], &str)> {
    segments
        .split_last()
        .map(|(name, parent)| (parent, name.as_str()))
}

/// Whether `name` may be used as a single directory entry name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}
