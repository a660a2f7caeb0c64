use std::collections::HashMap;

use crate::config::Profile;
use crate::terminal::{CommandResult, SnapshotError, SnapshotNode, Terminal, VirtualFilesystem};

/// Every open terminal window over one shared filesystem, keyed by window id.
pub struct Machine {
    vfs: VirtualFilesystem,
    terminals: HashMap<String, Terminal>,
    profile: Profile,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}

fn spawn(vfs: &mut VirtualFilesystem, profile: &Profile, window: &str) -> Terminal {
    let context = vfs.create_context();
    log::info!("opened terminal window {window}");
    Terminal::new(context, profile, None)
}

impl Machine {
    pub fn new(profile: Profile) -> Self {
        let mut vfs = VirtualFilesystem::new();
        let ctx = vfs.default_context();
        if let Err(e) = vfs.write(ctx, "/etc/hostname", &profile.hostname) {
            log::warn!("could not set hostname: {e}");
        }
        Self {
            vfs,
            terminals: HashMap::new(),
            profile,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Shared tree, for the file manager and editor windows.
    pub fn filesystem(&self) -> &VirtualFilesystem {
        &self.vfs
    }

    pub fn filesystem_mut(&mut self) -> &mut VirtualFilesystem {
        &mut self.vfs
    }

    /// Open a window. Returns `false` when it was already open.
    pub fn open_terminal(&mut self, window: &str) -> bool {
        if self.terminals.contains_key(window) {
            return false;
        }
        let terminal = spawn(&mut self.vfs, &self.profile, window);
        self.terminals.insert(window.to_string(), terminal);
        true
    }

    pub fn close_terminal(&mut self, window: &str) -> bool {
        match self.terminals.remove(window) {
            Some(terminal) => {
                self.vfs.release_context(terminal.context());
                log::info!("closed terminal window {window}");
                true
            }
            None => false,
        }
    }

    pub fn is_open(&self, window: &str) -> bool {
        self.terminals.contains_key(window)
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    /// Run one line in `window`, opening it first if needed.
    pub fn run(&mut self, window: &str, line: &str) -> CommandResult {
        let Self {
            vfs,
            terminals,
            profile,
        } = self;
        let terminal = terminals.entry(window.to_string()).or_insert_with(|| {
            log::warn!("command sent to unopened window {window}");
            spawn(vfs, profile, window)
        });
        terminal.handle_command(vfs, line)
    }

    pub fn complete(&self, window: &str, partial: &str) -> Vec<String> {
        match self.terminals.get(window) {
            Some(terminal) => terminal.handle_start_tab(&self.vfs, partial),
            None => {
                log::warn!("completion requested for unknown window {window}");
                Vec::new()
            }
        }
    }

    pub fn history_matches(&self, window: &str, prefix: &str) -> Vec<String> {
        self.terminals
            .get(window)
            .map(|terminal| terminal.handle_start_hist(prefix))
            .unwrap_or_default()
    }

    pub fn prompt(&self, window: &str) -> Option<String> {
        self.terminals
            .get(window)
            .map(|terminal| terminal.prompt(&self.vfs))
    }

    /// Serialize the shared tree for session persistence.
    pub fn save(&self) -> Result<String, SnapshotError> {
        self.vfs.snapshot().to_json()
    }

    pub fn load(&mut self, json: &str) -> Result<(), SnapshotError> {
        let snapshot = SnapshotNode::from_json(json)?;
        self.vfs.restore(&snapshot)
    }
}
