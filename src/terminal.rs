mod app_tools;
pub mod command;
mod complete;
mod fs_tools;
pub mod interpreter;
pub mod path;
mod seed;
mod simple_tools;
pub mod snapshot;
pub mod style;
mod system_tools;
pub mod tree;
pub mod vfs;

pub use command::{AppId, CommandResult};
pub use snapshot::{SnapshotError, SnapshotNode};
pub use tree::{DirEntry, VfsError};
pub use vfs::{ContextId, FsError, VirtualFilesystem};

use std::collections::{HashMap, VecDeque};

use command::CmdAlias;
use path::{display, HOME};
use style::{BLUE, GREEN, RESET};

use crate::config::Profile;

const WELCOME: &str = "Welcome to Linux Simulator (GNU/Linux 6.5.0-virtual x86_64)

 * Documentation:  https://help.linux.org
 * Management:     https://landscape.canonical.com
 * Support:        https://linux.org/advantage

Type \x1b[32mhelp\x1b[0m to see available commands.
";

/// One shell session: its own cwd handle, history and environment over a
/// filesystem that may be shared with other sessions.
pub struct Terminal {
    context: ContextId,
    history: VecDeque<String>,
    history_size: usize,
    env_vars: HashMap<String, String>,
    hostname: String,
}

impl Terminal {
    pub fn new(context: ContextId, profile: &Profile, history: Option<VecDeque<String>>) -> Self {
        let mut history = history.unwrap_or_default();
        while history.len() > profile.history_size {
            history.pop_front();
        }

        let mut env_vars = HashMap::new();
        env_vars.insert("USER".to_string(), "user".to_string());
        env_vars.insert("HOME".to_string(), format!("/{}", HOME.join("/")));
        env_vars.insert("HOSTNAME".to_string(), profile.hostname.clone());
        env_vars.insert("SHELL".to_string(), profile.shell.clone());

        Self {
            context,
            history,
            history_size: profile.history_size,
            env_vars,
            hostname: profile.hostname.clone(),
        }
    }

    pub fn context(&self) -> ContextId {
        self.context
    }

    pub fn history(&self) -> &VecDeque<String> {
        &self.history
    }

    /// Banner printed when a window opens.
    pub fn welcome() -> &'static str {
        WELCOME
    }

    pub fn prompt(&self, vfs: &VirtualFilesystem) -> String {
        let cwd = display(&vfs.cwd(self.context));
        format!("{GREEN}user@{}{RESET}:{BLUE}{cwd}{RESET}$ ", self.hostname)
    }

    fn process_aliases(&self, input: &str) -> String {
        let trimmed = input.trim();

        for alias in CmdAlias::all() {
            let alias_str = alias.as_str();
            if let Some(args) = trimmed.strip_prefix(alias_str) {
                if args.is_empty() || args.starts_with(' ') {
                    return alias.expand(args);
                }
            }
        }

        input.to_string()
    }

    /// Replace `$NAME` references. Unknown names expand to nothing and a
    /// lone `$` is kept.
    fn expand_env_vars(&self, cwd: &str, input: &str) -> String {
        let mut result = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(start) = rest.find('$') {
            result.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find(|c: char| !c.is_alphanumeric() && c != '_')
                .unwrap_or(after.len());
            let var_name = &after[..end];

            if var_name.is_empty() {
                result.push('$');
            } else if var_name == "PWD" {
                result.push_str(cwd);
            } else if let Some(value) = self.env_vars.get(var_name) {
                result.push_str(value);
            }
            rest = &after[end..];
        }
        result.push_str(rest);
        result
    }

    pub fn handle_command(&mut self, vfs: &mut VirtualFilesystem, input: &str) -> CommandResult {
        if input.trim().is_empty() {
            return CommandResult::new();
        }
        self.history.push_back(input.trim().to_string());
        while self.history.len() > self.history_size {
            self.history.pop_front();
        }

        let aliased_input = self.process_aliases(input);
        let expanded_input = self.expand_env_vars(&vfs.pwd(self.context), &aliased_input);

        // history needs the session state, which handlers never see
        match interpreter::tokenize(expanded_input.trim()) {
            Some((cmd, args)) if cmd == "history" => self.run_history(&args),
            _ => interpreter::execute(&expanded_input, vfs, self.context),
        }
    }

    fn run_history(&mut self, args: &[String]) -> CommandResult {
        let count = match args {
            [] => self.history.len(),
            [flag] if flag == "-c" => {
                self.history.clear();
                return CommandResult::new();
            }
            [n] => match n.parse::<usize>() {
                Ok(n) => n.min(self.history.len()),
                Err(_) => {
                    return CommandResult::error(format!(
                        "history: {n}: numeric argument required"
                    ));
                }
            },
            _ => return CommandResult::error("history: too many arguments"),
        };

        let skip = self.history.len() - count;
        let lines = self
            .history
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(i, entry)| format!("{:>5}  {entry}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");
        CommandResult::new().with_output(lines)
    }

    /// History entries starting with `input`, oldest first.
    pub fn handle_start_hist(&self, input: &str) -> Vec<String> {
        if input.trim().is_empty() {
            self.history.iter().cloned().collect()
        } else {
            self.history
                .iter()
                .filter(|s| s.starts_with(input))
                .cloned()
                .collect()
        }
    }

    pub fn handle_start_tab(&self, vfs: &VirtualFilesystem, input: &str) -> Vec<String> {
        complete::suggest(input, vfs, self.context)
    }
}
