use super::command::Cmd;
use super::vfs::{ContextId, VirtualFilesystem};

/// Completions for a partially typed line.
///
/// While the first word is being typed this offers command names in table
/// order; after that, entries of the current directory matching the last word.
pub fn suggest(partial: &str, vfs: &VirtualFilesystem, ctx: ContextId) -> Vec<String> {
    let parts: Vec<&str> = partial.split(' ').collect();
    if let [command] = parts.as_slice() {
        let command = command.to_lowercase();
        return Cmd::all()
            .into_iter()
            .filter(|name| name.starts_with(&command))
            .map(str::to_string)
            .collect();
    }

    let last = parts.last().copied().unwrap_or_default();
    vfs.list_entries(ctx, None)
        .into_iter()
        .map(|entry| entry.name)
        .filter(|name| name.starts_with(last))
        .collect()
}
