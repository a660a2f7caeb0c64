use serde::Serialize;

use super::style;
use super::vfs::{ContextId, FsError, VirtualFilesystem};
use super::{app_tools, fs_tools, simple_tools, system_tools};

/// Windowed applications the interpreter can ask its host to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppId {
    Terminal,
    FileManager,
    Settings,
    TextEditor,
    Calculator,
    Browser,
    Trash,
    Writer,
    Calc,
    Impress,
    SystemMonitor,
}

impl AppId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppId::Terminal => "terminal",
            AppId::FileManager => "file-manager",
            AppId::Settings => "settings",
            AppId::TextEditor => "text-editor",
            AppId::Calculator => "calculator",
            AppId::Browser => "browser",
            AppId::Trash => "trash",
            AppId::Writer => "writer",
            AppId::Calc => "calc",
            AppId::Impress => "impress",
            AppId::SystemMonitor => "system-monitor",
        }
    }

    /// Window title shown while launching.
    pub fn title(&self) -> &'static str {
        match self {
            AppId::Terminal => "Terminal",
            AppId::FileManager => "Files",
            AppId::Settings => "Settings",
            AppId::TextEditor => "Text Editor",
            AppId::Calculator => "Calculator",
            AppId::Browser => "Firefox",
            AppId::Trash => "Trash",
            AppId::Writer => "LibreOffice Writer",
            AppId::Calc => "LibreOffice Calc",
            AppId::Impress => "LibreOffice Impress",
            AppId::SystemMonitor => "System Monitor",
        }
    }
}

/// Outcome of one input line, as handed to the terminal UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    output: String,
    is_error: bool,
    clear: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    open_application: Option<AppId>,
}

impl CommandResult {
    /// Empty, successful result
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, text: impl Into<String>) -> Self {
        self.output = text.into();
        self
    }

    /// Mark this result as an error
    pub fn with_error(mut self) -> Self {
        self.is_error = true;
        self
    }

    /// Shorthand for an error line.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new().with_output(text).with_error()
    }

    pub fn with_clear(mut self) -> Self {
        self.clear = true;
        self
    }

    pub fn with_application(mut self, app: AppId) -> Self {
        self.open_application = Some(app);
        self
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn clears_screen(&self) -> bool {
        self.clear
    }

    pub fn open_application(&self) -> Option<AppId> {
        self.open_application
    }

    /// Output with style markers removed, for hosts that cannot render them.
    pub fn plain_output(&self) -> String {
        style::strip(&self.output)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<Result<(), FsError>> for CommandResult {
    fn from(value: Result<(), FsError>) -> Self {
        match value {
            Ok(()) => Self::new(),
            Err(e) => Self::error(e.message()),
        }
    }
}

impl From<Result<String, FsError>> for CommandResult {
    fn from(value: Result<String, FsError>) -> Self {
        match value {
            Ok(text) => Self::new().with_output(text),
            Err(e) => Self::error(e.message()),
        }
    }
}

/// Handler signature shared by every built-in command.
pub type Handler = fn(&[String], &mut VirtualFilesystem, ContextId) -> CommandResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cmd {
    Help,
    Ls,
    Cd,
    Pwd,
    Cat,
    Echo,
    MkDir,
    Touch,
    Rm,
    RmDir,
    Rename,
    Clear,
    WhoAmI,
    Date,
    Uname,
    Hostname,
    Id,
    Uptime,
    Df,
    Free,
    Ps,
    Top,
    Which,
    Man,
    Neofetch,
    Cowsay,
    Sudo,
    History,
    Exit,
    LibreOffice,
    Nautilus,
    Gedit,
    GnomeCalculator,
    Firefox,
    GnomeSystemMonitor,
    GnomeControlCenter,
    Unknown,
}

/// Dispatch table order, which is also the completion order.
const TABLE: [Cmd; 36] = [
    Cmd::Help,
    Cmd::Ls,
    Cmd::Cd,
    Cmd::Pwd,
    Cmd::Cat,
    Cmd::Echo,
    Cmd::MkDir,
    Cmd::Touch,
    Cmd::Rm,
    Cmd::RmDir,
    Cmd::Rename,
    Cmd::Clear,
    Cmd::WhoAmI,
    Cmd::Date,
    Cmd::Uname,
    Cmd::Hostname,
    Cmd::Id,
    Cmd::Uptime,
    Cmd::Df,
    Cmd::Free,
    Cmd::Ps,
    Cmd::Top,
    Cmd::Which,
    Cmd::Man,
    Cmd::Neofetch,
    Cmd::Cowsay,
    Cmd::Sudo,
    Cmd::History,
    Cmd::Exit,
    Cmd::LibreOffice,
    Cmd::Nautilus,
    Cmd::Gedit,
    Cmd::GnomeCalculator,
    Cmd::Firefox,
    Cmd::GnomeSystemMonitor,
    Cmd::GnomeControlCenter,
];

impl From<&str> for Cmd {
    fn from(value: &str) -> Self {
        TABLE
            .into_iter()
            .find(|cmd| cmd.name() == value)
            .unwrap_or(Self::Unknown)
    }
}

impl Cmd {
    pub fn all() -> Vec<&'static str> {
        TABLE.iter().map(Cmd::name).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Cmd::Help => "help",
            Cmd::Ls => "ls",
            Cmd::Cd => "cd",
            Cmd::Pwd => "pwd",
            Cmd::Cat => "cat",
            Cmd::Echo => "echo",
            Cmd::MkDir => "mkdir",
            Cmd::Touch => "touch",
            Cmd::Rm => "rm",
            Cmd::RmDir => "rmdir",
            Cmd::Rename => "rename",
            Cmd::Clear => "clear",
            Cmd::WhoAmI => "whoami",
            Cmd::Date => "date",
            Cmd::Uname => "uname",
            Cmd::Hostname => "hostname",
            Cmd::Id => "id",
            Cmd::Uptime => "uptime",
            Cmd::Df => "df",
            Cmd::Free => "free",
            Cmd::Ps => "ps",
            Cmd::Top => "top",
            Cmd::Which => "which",
            Cmd::Man => "man",
            Cmd::Neofetch => "neofetch",
            Cmd::Cowsay => "cowsay",
            Cmd::Sudo => "sudo",
            Cmd::History => "history",
            Cmd::Exit => "exit",
            Cmd::LibreOffice => "libreoffice",
            Cmd::Nautilus => "nautilus",
            Cmd::Gedit => "gedit",
            Cmd::GnomeCalculator => "gnome-calculator",
            Cmd::Firefox => "firefox",
            Cmd::GnomeSystemMonitor => "gnome-system-monitor",
            Cmd::GnomeControlCenter => "gnome-control-center",
            Cmd::Unknown => "",
        }
    }

    /// Commands the shell itself implements rather than a binary in /usr/bin.
    pub fn is_builtin(&self) -> bool {
        matches!(
            self,
            Cmd::Cd | Cmd::Pwd | Cmd::Echo | Cmd::History | Cmd::Exit
        )
    }

    pub fn handler(&self) -> Option<Handler> {
        let handler: Handler = match self {
            Cmd::Help => simple_tools::help,
            Cmd::Ls => fs_tools::ls,
            Cmd::Cd => fs_tools::cd,
            Cmd::Pwd => fs_tools::pwd,
            Cmd::Cat => fs_tools::cat,
            Cmd::Echo => simple_tools::echo,
            Cmd::MkDir => fs_tools::mkdir,
            Cmd::Touch => fs_tools::touch,
            Cmd::Rm => fs_tools::rm,
            Cmd::RmDir => fs_tools::rmdir,
            Cmd::Rename => fs_tools::rename,
            Cmd::Clear => simple_tools::clear,
            Cmd::WhoAmI => simple_tools::whoami,
            Cmd::Date => simple_tools::date,
            Cmd::Uname => system_tools::uname,
            Cmd::Hostname => system_tools::hostname,
            Cmd::Id => system_tools::id,
            Cmd::Uptime => system_tools::uptime,
            Cmd::Df => system_tools::df,
            Cmd::Free => system_tools::free,
            Cmd::Ps => system_tools::ps,
            Cmd::Top => system_tools::top,
            Cmd::Which => system_tools::which,
            Cmd::Man => system_tools::man,
            Cmd::Neofetch => simple_tools::neofetch,
            Cmd::Cowsay => simple_tools::cowsay,
            Cmd::Sudo => simple_tools::sudo,
            Cmd::History => simple_tools::history,
            Cmd::Exit => simple_tools::exit,
            Cmd::LibreOffice => app_tools::libreoffice,
            Cmd::Nautilus => app_tools::nautilus,
            Cmd::Gedit => app_tools::gedit,
            Cmd::GnomeCalculator => app_tools::gnome_calculator,
            Cmd::Firefox => app_tools::firefox,
            Cmd::GnomeSystemMonitor => app_tools::gnome_system_monitor,
            Cmd::GnomeControlCenter => app_tools::gnome_control_center,
            Cmd::Unknown => return None,
        };
        Some(handler)
    }
}

/// Shortcuts defined in the seeded `~/.bashrc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdAlias {
    Ll,
    La,
    L,
}

impl CmdAlias {
    pub fn all() -> Vec<CmdAlias> {
        vec![CmdAlias::Ll, CmdAlias::La, CmdAlias::L]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CmdAlias::Ll => "ll",
            CmdAlias::La => "la",
            CmdAlias::L => "l",
        }
    }

    fn replacement(&self) -> &'static str {
        match self {
            CmdAlias::Ll => "ls -la",
            CmdAlias::La => "ls -A",
            CmdAlias::L => "ls",
        }
    }

    /// `args` is everything after the alias, leading space included.
    pub fn expand(&self, args: &str) -> String {
        format!("{}{args}", self.replacement())
    }

    pub fn from_name(s: &str) -> Option<CmdAlias> {
        Self::all().into_iter().find(|alias| alias.as_str() == s)
    }
}

/// Split dash-prefixed arguments into option characters, keeping the rest as operands.
pub fn parse_multitarget(args: &[String]) -> (Vec<char>, Vec<&str>) {
    args.iter().fold(
        (Vec::<char>::new(), Vec::<&str>::new()),
        |(mut options, mut targets), s| {
            if s.starts_with('-') && s.len() > 1 {
                options.extend(s.chars().filter(|c| *c != '-'));
            } else {
                targets.push(s.as_str());
            }
            (options, targets)
        },
    )
}

/// First option not in `allowed`, rendered as the usual complaint.
pub fn reject_options(cmd: &str, options: &[char], allowed: &[char]) -> Option<CommandResult> {
    options
        .iter()
        .find(|c| !allowed.contains(c))
        .map(|c| CommandResult::error(format!("{cmd}: invalid option -- '{c}'")))
}

/// Fold per-operand outcomes into one result; any failure marks the whole line.
pub fn merge_results(results: Vec<CommandResult>) -> CommandResult {
    join_results(results, "\n")
}

pub fn join_results(results: Vec<CommandResult>, separator: &str) -> CommandResult {
    let is_error = results.iter().any(CommandResult::is_error);
    let output = results
        .iter()
        .map(CommandResult::output)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator);
    let merged = CommandResult::new().with_output(output);
    if is_error {
        merged.with_error()
    } else {
        merged
    }
}
