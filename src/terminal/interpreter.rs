use std::sync::LazyLock;

use regex::Regex;

use super::command::{Cmd, CommandResult};
use super::vfs::{ContextId, VirtualFilesystem};

// Runs of non-space characters; a double-quoted span may contain spaces.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:[^\s"]+|"[^"]*")+"#).expect("token pattern is valid")
});

/// Split a line into `(command, args)`. The command is lower-cased and
/// each argument loses one enclosing pair of double quotes.
pub fn tokenize(line: &str) -> Option<(String, Vec<String>)> {
    let mut tokens = TOKEN_RE.find_iter(line).map(|m| m.as_str());
    let command = tokens.next()?.to_lowercase();
    let args = tokens
        .map(|token| {
            let token = token.strip_prefix('"').unwrap_or(token);
            token.strip_suffix('"').unwrap_or(token).to_string()
        })
        .collect();
    Some((command, args))
}

/// Interpret one raw input line against the filesystem as seen from `ctx`.
pub fn execute(line: &str, vfs: &mut VirtualFilesystem, ctx: ContextId) -> CommandResult {
    let Some((command, args)) = tokenize(line.trim()) else {
        return CommandResult::new();
    };

    let cmd = Cmd::from(command.as_str());
    let Some(handler) = cmd.handler() else {
        log::debug!("unknown command '{command}'");
        return CommandResult::error(format!(
            "{command}: command not found\nType 'help' for available commands."
        ));
    };
    log::debug!("dispatching {} with {} args", cmd.name(), args.len());
    handler(&args, vfs, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::command::AppId;

    fn fresh() -> (VirtualFilesystem, ContextId) {
        let vfs = VirtualFilesystem::new();
        let ctx = vfs.default_context();
        (vfs, ctx)
    }

    fn run(vfs: &mut VirtualFilesystem, ctx: ContextId, line: &str) -> CommandResult {
        execute(line, vfs, ctx)
    }

    #[test]
    fn test_tokenize() {
        let (cmd, args) = tokenize(r#"ECHO "hello world" plain"#).unwrap();
        assert_eq!(cmd, "echo");
        assert_eq!(args, vec!["hello world", "plain"]);

        let (_, args) = tokenize(r#"touch my"file name".txt"#).unwrap();
        assert_eq!(args, vec![r#"my"file name".txt"#]);

        let (_, args) = tokenize(r#"cat """#).unwrap();
        assert_eq!(args, vec![""]);

        assert!(tokenize("").is_none());
        assert!(tokenize("   ").is_none());
    }

    #[test]
    fn test_blank_line_is_noop() {
        let (mut vfs, ctx) = fresh();
        let res = run(&mut vfs, ctx, "   ");
        assert!(!res.is_error());
        assert_eq!(res.output(), "");
    }

    #[test]
    fn test_pwd_fresh() {
        let (mut vfs, ctx) = fresh();
        assert_eq!(run(&mut vfs, ctx, "pwd").output(), "/home/user");
    }

    #[test]
    fn test_ls_fresh() {
        let (mut vfs, ctx) = fresh();
        let res = run(&mut vfs, ctx, "ls");
        assert!(!res.is_error());
        assert_eq!(
            res.plain_output(),
            "Desktop  Documents  Downloads  Music  Pictures  Videos"
        );
    }

    #[test]
    fn test_cd_then_cat() {
        let (mut vfs, ctx) = fresh();
        assert!(!run(&mut vfs, ctx, "cd Documents").is_error());
        assert_eq!(run(&mut vfs, ctx, "pwd").output(), "/home/user/Documents");
        let notes = run(&mut vfs, ctx, "cat notes.txt");
        assert_eq!(
            notes.output(),
            "Mes notes personnelles\n\n- Apprendre les commandes Linux\n- Explorer le terminal\n- Découvrir Linux"
        );
        run(&mut vfs, ctx, "cd");
        assert_eq!(run(&mut vfs, ctx, "pwd").output(), "/home/user");
    }

    #[test]
    fn test_mkdir_twice() {
        let (mut vfs, ctx) = fresh();
        assert!(!run(&mut vfs, ctx, "mkdir projets").is_error());
        let listing = run(&mut vfs, ctx, "ls");
        assert!(listing.output().contains("\x1b[34mprojets\x1b[0m"));

        let again = run(&mut vfs, ctx, "mkdir projets");
        assert!(again.is_error());
        assert_eq!(
            again.output(),
            "mkdir: cannot create directory 'projets': File exists"
        );
        let count = run(&mut vfs, ctx, "ls")
            .plain_output()
            .split("  ")
            .filter(|name| *name == "projets")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_unknown_command() {
        let (mut vfs, ctx) = fresh();
        run(&mut vfs, ctx, "cd /tmp");
        let res = run(&mut vfs, ctx, "asdf123");
        assert!(res.is_error());
        assert_eq!(
            res.output(),
            "asdf123: command not found\nType 'help' for available commands."
        );
        assert_eq!(run(&mut vfs, ctx, "pwd").output(), "/tmp");
        assert_eq!(run(&mut vfs, ctx, "LS /tmp").output(), "");
    }

    #[test]
    fn test_usage_errors() {
        let (mut vfs, ctx) = fresh();
        for (line, message) in [
            ("cat", "cat: missing file operand"),
            ("mkdir", "mkdir: missing operand"),
            ("touch", "touch: missing file operand"),
            ("rm", "rm: missing operand"),
            ("rmdir", "rmdir: missing operand"),
            ("cd a b", "cd: too many arguments"),
            ("ls -z", "ls: invalid option -- 'z'"),
            ("rm -x foo", "rm: invalid option -- 'x'"),
        ] {
            let res = run(&mut vfs, ctx, line);
            assert!(res.is_error(), "{line}");
            assert_eq!(res.output(), message, "{line}");
        }
        assert!(!run(&mut vfs, ctx, "rm -f").is_error());
    }

    #[test]
    fn test_cd_errors() {
        let (mut vfs, ctx) = fresh();
        assert_eq!(
            run(&mut vfs, ctx, "cd nowhere").output(),
            "cd: nowhere: No such file or directory"
        );
        assert_eq!(
            run(&mut vfs, ctx, "cd .bashrc").output(),
            "cd: .bashrc: Not a directory"
        );
    }

    #[test]
    fn test_ls_options_and_targets() {
        let (mut vfs, ctx) = fresh();
        let hidden = run(&mut vfs, ctx, "ls -a").plain_output();
        assert!(hidden.starts_with(".bashrc  .profile"));
        let long = run(&mut vfs, ctx, "ls -la /etc").output().to_string();
        assert_eq!(long.lines().count(), 3);
        assert!(long.starts_with("-rwxr-xr-x 1 user user"));

        let multi = run(&mut vfs, ctx, "ls /usr /tmp").plain_output();
        assert_eq!(multi, "/usr:\nbin  share\n\n/tmp:\n");

        let partial = run(&mut vfs, ctx, "ls /tmp ghost");
        assert!(partial.is_error());
        assert_eq!(
            partial.output(),
            "/tmp:\n\n\nls: cannot access 'ghost': No such file or directory"
        );
    }

    #[test]
    fn test_multi_operand_mutations() {
        let (mut vfs, ctx) = fresh();
        assert!(!run(&mut vfs, ctx, "touch a.txt b.txt").is_error());
        assert!(!run(&mut vfs, ctx, "mkdir -p deep/er/est x").is_error());
        assert!(vfs.tree().is_dir(&vfs.resolve(ctx, "deep/er/est")));

        let res = run(&mut vfs, ctx, "rm a.txt missing b.txt");
        assert!(res.is_error());
        assert_eq!(
            res.output(),
            "rm: cannot remove 'missing': No such file or directory"
        );
        assert!(!vfs.tree().exists(&vfs.resolve(ctx, "b.txt")));

        assert!(!run(&mut vfs, ctx, "rm -f missing").is_error());
        assert_eq!(
            run(&mut vfs, ctx, "rm deep").output(),
            "rm: cannot remove 'deep': Is a directory"
        );
        assert!(!run(&mut vfs, ctx, "rm -r deep").is_error());
        assert_eq!(
            run(&mut vfs, ctx, "rm -rf /").output(),
            "rm: it is dangerous to operate recursively on '/'"
        );
        assert!(!run(&mut vfs, ctx, "rmdir x").is_error());
    }

    #[test]
    fn test_cat_multiple_files() {
        let (mut vfs, ctx) = fresh();
        let res = run(&mut vfs, ctx, "cat /etc/hostname nope /etc/hostname");
        assert!(res.is_error());
        assert_eq!(
            res.output(),
            "linux-sim\ncat: nope: No such file or directory\nlinux-sim"
        );
        assert_eq!(
            run(&mut vfs, ctx, "cat Documents").output(),
            "cat: Documents: Is a directory"
        );
    }

    #[test]
    fn test_rename_command() {
        let (mut vfs, ctx) = fresh();
        assert!(!run(&mut vfs, ctx, "rename Music Musique").is_error());
        assert!(run(&mut vfs, ctx, "ls").plain_output().contains("Musique"));
        assert_eq!(
            run(&mut vfs, ctx, "rename Videos Musique").output(),
            "rename: cannot rename 'Videos' to 'Musique': File exists"
        );
        assert!(run(&mut vfs, ctx, "rename Videos").is_error());
    }

    #[test]
    fn test_echo_strips_outer_quotes() {
        let (mut vfs, ctx) = fresh();
        assert_eq!(run(&mut vfs, ctx, r#"echo "hello world""#).output(), "hello world");
        assert_eq!(run(&mut vfs, ctx, "echo 'single quoted'").output(), "single quoted");
        assert_eq!(run(&mut vfs, ctx, "echo a   b").output(), "a b");
        assert_eq!(run(&mut vfs, ctx, "echo").output(), "");
    }

    #[test]
    fn test_canned_commands() {
        let (mut vfs, ctx) = fresh();
        assert_eq!(run(&mut vfs, ctx, "whoami").output(), "user");
        assert_eq!(run(&mut vfs, ctx, "uname").output(), "Linux");
        assert_eq!(
            run(&mut vfs, ctx, "uname -a").output(),
            "Linux linux-sim 6.5.0-virtual #1 SMP PREEMPT_DYNAMIC x86_64 GNU/Linux"
        );
        assert_eq!(run(&mut vfs, ctx, "uname -sr").output(), "Linux 6.5.0-virtual");
        assert_eq!(run(&mut vfs, ctx, "hostname").output(), "linux-sim");
        assert!(run(&mut vfs, ctx, "id").output().starts_with("uid=1000(user)"));
        assert!(run(&mut vfs, ctx, "df -h").output().contains("50G"));
        assert!(run(&mut vfs, ctx, "df").output().contains("1K-blocks"));
        assert!(run(&mut vfs, ctx, "free -h").output().contains("7.8Gi"));
        assert!(run(&mut vfs, ctx, "ps").output().starts_with("  PID TTY"));
        assert!(run(&mut vfs, ctx, "top").plain_output().contains("Try 'ps'"));
        assert!(run(&mut vfs, ctx, "help").plain_output().contains("Available commands:"));
        assert!(run(&mut vfs, ctx, "neofetch").plain_output().contains("user@linux-sim"));
        assert!(run(&mut vfs, ctx, "cowsay hi").output().contains("< hi >"));
        assert!(run(&mut vfs, ctx, "exit").plain_output().contains("escape"));
        assert!(run(&mut vfs, ctx, "clear").clears_screen());
        assert!(!run(&mut vfs, ctx, "date").output().is_empty());
        assert!(run(&mut vfs, ctx, "date tomorrow").is_error());
    }

    #[test]
    fn test_hostname_follows_etc_hostname() {
        let (mut vfs, ctx) = fresh();
        vfs.write(ctx, "/etc/hostname", "box\n").unwrap();
        assert_eq!(run(&mut vfs, ctx, "hostname").output(), "box");
        assert!(run(&mut vfs, ctx, "uname -n").output().contains("box"));
    }

    #[test]
    fn test_sudo() {
        let (mut vfs, ctx) = fresh();
        let refused = run(&mut vfs, ctx, "sudo rm -rf /");
        assert!(refused.is_error());
        assert!(refused.plain_output().starts_with("Nice try!"));
        assert!(vfs.tree().is_dir(&vfs.resolve(ctx, "/home/user")));
        assert!(!run(&mut vfs, ctx, "sudo ls").is_error());
        assert!(run(&mut vfs, ctx, "sudo").is_error());
    }

    #[test]
    fn test_which_and_man() {
        let (mut vfs, ctx) = fresh();
        assert_eq!(run(&mut vfs, ctx, "which ls").output(), "/usr/bin/ls");
        assert_eq!(run(&mut vfs, ctx, "which cd").output(), "cd: shell builtin");
        assert_eq!(run(&mut vfs, ctx, "which ll").output(), "ll: aliased to ls -la");
        let res = run(&mut vfs, ctx, "which ls nope");
        assert!(res.is_error());
        assert_eq!(res.output(), "/usr/bin/ls\nnope not found");
        assert_eq!(run(&mut vfs, ctx, "which").output(), "");

        let page = run(&mut vfs, ctx, "man ls");
        assert!(page.plain_output().starts_with("LS(1)"));
        assert_eq!(run(&mut vfs, ctx, "man nope").output(), "No manual entry for nope");
        assert!(run(&mut vfs, ctx, "man").is_error());
    }

    #[test]
    fn test_application_launchers() {
        let (mut vfs, ctx) = fresh();
        let cases = [
            ("libreoffice --writer", AppId::Writer),
            ("libreoffice --calc budget.ods", AppId::Calc),
            ("libreoffice slides.odp", AppId::Impress),
            ("libreoffice rapport.odt", AppId::Writer),
            ("libreoffice", AppId::Writer),
            ("nautilus", AppId::FileManager),
            ("gedit", AppId::TextEditor),
            ("gnome-calculator", AppId::Calculator),
            ("firefox", AppId::Browser),
            ("gnome-system-monitor", AppId::SystemMonitor),
            ("gnome-control-center", AppId::Settings),
        ];
        for (line, app) in cases {
            let res = run(&mut vfs, ctx, line);
            assert!(!res.is_error(), "{line}");
            assert_eq!(res.open_application(), Some(app), "{line}");
        }

        let bad = run(&mut vfs, ctx, "libreoffice --draw");
        assert!(bad.is_error());
        assert_eq!(bad.open_application(), None);
        assert!(bad.output().starts_with("libreoffice: unrecognized option '--draw'"));
        assert_eq!(run(&mut vfs, ctx, "ls").open_application(), None);
    }
}
