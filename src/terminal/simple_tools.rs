use std::fmt::Write;

use chrono::prelude::*;

use super::command::CommandResult;
use super::vfs::{ContextId, VirtualFilesystem};

const HELP_TEXT: &str = "
\x1b[1mAvailable commands:\x1b[0m

  \x1b[32mls\x1b[0m [-al] [path]    List directory contents
  \x1b[32mcd\x1b[0m <path>          Change directory
  \x1b[32mpwd\x1b[0m                Print working directory
  \x1b[32mcat\x1b[0m <file>...      Display file contents
  \x1b[32mecho\x1b[0m <text>        Display text
  \x1b[32mmkdir\x1b[0m [-p] <dir>   Create directory
  \x1b[32mtouch\x1b[0m <file>       Create empty file
  \x1b[32mrm\x1b[0m [-rf] <file>    Remove file (use -r for directories)
  \x1b[32mrmdir\x1b[0m <dir>        Remove empty directory
  \x1b[32mrename\x1b[0m <old> <new> Rename a file or directory
  \x1b[32mclear\x1b[0m              Clear the terminal
  \x1b[32mwhoami\x1b[0m             Display current user
  \x1b[32mdate\x1b[0m [+FORMAT]     Display current date
  \x1b[32muname\x1b[0m [-a]         Display system information
  \x1b[32mman\x1b[0m <command>      Show the manual page of a command
  \x1b[32mwhich\x1b[0m <command>    Locate a command
  \x1b[32mneofetch\x1b[0m           Display system info with ASCII art
  \x1b[32mcowsay\x1b[0m <text>      Make a cow say something
  \x1b[32mlibreoffice\x1b[0m        Open LibreOffice (--writer, --calc, --impress)
  \x1b[32mhistory\x1b[0m            Show command history
  \x1b[32mexit\x1b[0m               Close terminal (doesn't work here 😉)

\x1b[33mTip:\x1b[0m Use Tab for auto-completion, ↑/↓ for history
";

const NEOFETCH_ASCII: &str = "
\x1b[31m            .-/+oossssoo+/-.\x1b[0m               \x1b[1muser\x1b[0m@\x1b[1mlinux-sim\x1b[0m
\x1b[31m        `:+ssssssssssssssssss+:`\x1b[0m           -------------------------
\x1b[31m      -+ssssssssssssssssssyyssss+-\x1b[0m         \x1b[1mOS:\x1b[0m Linux Simulator 24.04 LTS x86_64
\x1b[31m    .ossssssssssssssssss\x1b[37mdMMMNy\x1b[31msssso.\x1b[0m       \x1b[1mHost:\x1b[0m Linux Simulator
\x1b[31m   /sssssssssss\x1b[37mhdmmNNmmyNMMMMh\x1b[31mssssss/\x1b[0m      \x1b[1mKernel:\x1b[0m 6.5.0-virtual
\x1b[31m  +sssssssss\x1b[37mhm\x1b[31myd\x1b[37mMMMMMMMNddddy\x1b[31mssssssss+\x1b[0m     \x1b[1mUptime:\x1b[0m just now
\x1b[31m /ssssssss\x1b[37mhNMMM\x1b[31myh\x1b[37mhyyyyhmNMMMNh\x1b[31mssssssss/\x1b[0m    \x1b[1mPackages:\x1b[0m 1337 (apt)
\x1b[31m.ssssssss\x1b[37mdMMMNh\x1b[31mssssssssss\x1b[37mhNMMMd\x1b[31mssssssss.\x1b[0m   \x1b[1mShell:\x1b[0m bash 5.1.16
\x1b[31m+ssss\x1b[37mhhhyNMMNy\x1b[31mssssssssssss\x1b[37myNMMMy\x1b[31msssssss+\x1b[0m   \x1b[1mResolution:\x1b[0m 1920x1080
\x1b[31moss\x1b[37myNMMMNyMMh\x1b[31mssssssssssssss\x1b[37mhmmmh\x1b[31mssssssso\x1b[0m   \x1b[1mDE:\x1b[0m GNOME 46
\x1b[31moss\x1b[37myNMMMNyMMh\x1b[31msssssssssssssshmmmh\x1b[31mssssssso\x1b[0m   \x1b[1mWM:\x1b[0m Mutter
\x1b[31m+ssss\x1b[37mhhhyNMMNy\x1b[31mssssssssssss\x1b[37myNMMMy\x1b[31msssssss+\x1b[0m   \x1b[1mTheme:\x1b[0m Yaru [GTK3]
\x1b[31m.ssssssss\x1b[37mdMMMNh\x1b[31mssssssssss\x1b[37mhNMMMd\x1b[31mssssssss.\x1b[0m   \x1b[1mTerminal:\x1b[0m Linux Simulator
\x1b[31m /ssssssss\x1b[37mhNMMM\x1b[31myh\x1b[37mhyyyyhdNMMMNh\x1b[31mssssssss/\x1b[0m    \x1b[1mCPU:\x1b[0m Virtual x86_64
\x1b[31m  +sssssssss\x1b[37mdm\x1b[31myd\x1b[37mMMMMMMMMddddy\x1b[31mssssssss+\x1b[0m     \x1b[1mMemory:\x1b[0m 420MB / 8192MB
\x1b[31m   /sssssssssss\x1b[37mhdmNNNNmyNMMMMh\x1b[31mssssss/\x1b[0m
\x1b[31m    .ossssssssssssssssss\x1b[37mdMMMNy\x1b[31msssso.\x1b[0m
\x1b[31m      -+sssssssssssssssss\x1b[37myyy\x1b[31mssss+-\x1b[0m
\x1b[31m        `:+ssssssssssssssssss+:`\x1b[0m
\x1b[31m            .-/+oossssoo+/-.\x1b[0m
";

const COW_WIDTH: usize = 40;

const SUDO_REFUSAL: &str = "\x1b[31mNice try! 😈\x1b[0m\n\nYou don't have permission to destroy the universe.\nMaybe try something less destructive?";
const SUDO_TEXT: &str =
    "\x1b[33m[sudo] password for user:\x1b[0m\nSorry, this is a simulation. You don't need sudo here! 🎮";
const HISTORY_HINT: &str = "Command history is available using ↑ and ↓ arrow keys";
const EXIT_TEXT: &str = "\x1b[33mYou can't escape that easily! 😄\x1b[0m\n\nThis is a web-based terminal simulator.\nClose the window if you want to exit.";

pub fn help(_args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    CommandResult::new().with_output(HELP_TEXT)
}

pub fn echo(args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    let joined = args.join(" ");
    let message = joined.strip_prefix(['"', '\'']).unwrap_or(&joined);
    let message = message.strip_suffix(['"', '\'']).unwrap_or(message);
    CommandResult::new().with_output(message)
}

pub fn clear(_args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    CommandResult::new().with_clear()
}

pub fn whoami(args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    if !args.is_empty() {
        return CommandResult::error("usage: whoami");
    }
    CommandResult::new().with_output("user")
}

pub fn date(args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    match args {
        [] => {
            let now = format_date(Local::now().fixed_offset(), None);
            CommandResult::new().with_output(now.unwrap_or_default())
        }
        [arg] => {
            let Some(format_str) = arg.trim_matches('"').strip_prefix('+') else {
                return CommandResult::error(format!("date: invalid date '{arg}'"));
            };
            match format_date(Local::now().fixed_offset(), Some(format_str)) {
                Some(text) => CommandResult::new().with_output(text),
                None => CommandResult::error(format!("date: invalid format '+{format_str}'")),
            }
        }
        _ => CommandResult::error("date: too many arguments"),
    }
}

/// `None` when the format string holds an unknown specifier.
fn format_date(now: DateTime<FixedOffset>, format_str: Option<&str>) -> Option<String> {
    // Default format: Thu Dec 05 10:00:00 +00:00 2024
    let format_str = format_str.unwrap_or("%a %b %d %H:%M:%S %Z %Y");
    let mut out = String::new();
    write!(out, "{}", now.format(format_str)).ok()?;
    Some(out)
}

pub fn neofetch(_args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    CommandResult::new().with_output(NEOFETCH_ASCII)
}

pub fn cowsay(args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    let message = if args.is_empty() {
        "Moo!".to_string()
    } else {
        args.join(" ")
    };
    CommandResult::new().with_output(cow(&message))
}

fn cow(message: &str) -> String {
    let len = message.chars().count();
    let width = len.min(COW_WIDTH);
    let text = if len > COW_WIDTH {
        let cut: String = message.chars().take(COW_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        message.to_string()
    };
    let border = "-".repeat(width + 2);
    format!(
        r"
 {border}
< {text:<width$} >
 {border}
        \   ^__^
         \  (oo)\_______
            (__)\       )\/\
                ||----w |
                ||     ||
"
    )
}

pub fn sudo(args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    let Some(first) = args.first() else {
        return CommandResult::error("usage: sudo <command>");
    };
    if first == "rm" && args.iter().any(|a| a == "-rf") && args.iter().any(|a| a == "/") {
        return CommandResult::error(SUDO_REFUSAL);
    }
    CommandResult::new().with_output(SUDO_TEXT)
}

/// Only reached without a Terminal wrapping the interpreter; the Terminal owns the real history.
pub fn history(_args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    CommandResult::new().with_output(HISTORY_HINT)
}

pub fn exit(_args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    CommandResult::new().with_output(EXIT_TEXT)
}
