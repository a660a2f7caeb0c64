use super::path::resolve;
use super::tree::{FileTree, VfsNode};

const README_TXT: &str = "Bienvenue sur Linux Simulator!\n\nCe simulateur vous permet de découvrir Linux de manière interactive.\n\nAmusez-vous bien!";

const NOTES_TXT: &str = "Mes notes personnelles\n\n- Apprendre les commandes Linux\n- Explorer le terminal\n- Découvrir Linux";

const TODO_TXT: &str = "TODO List:\n\n[ ] Maîtriser la commande ls\n[ ] Comprendre cd et pwd\n[ ] Créer des fichiers avec touch\n[ ] Lire des fichiers avec cat";

const BASHRC: &str = r#"# ~/.bashrc: executed by bash(1) for non-login shells.

# If not running interactively, don't do anything
case $- in
    *i*) ;;
      *) return;;
esac

# Alias definitions
alias ll='ls -la'
alias la='ls -A'
alias l='ls -CF'"#;

const PROFILE: &str = r#"# ~/.profile: executed by the command interpreter for login shells.

# set PATH so it includes user's private bin if it exists
if [ -d "$HOME/bin" ] ; then
    PATH="$HOME/bin:$PATH"
fi"#;

const HOSTNAME: &str = "linux-sim";

const PASSWD: &str =
    "root:x:0:0:root:/root:/bin/bash\nuser:x:1000:1000:User:/home/user:/bin/bash";

const OS_RELEASE: &str = r#"NAME="Linux Simulator"
VERSION="24.04 LTS (Noble Numbat)"
ID=linux
ID_LIKE=linux
PRETTY_NAME="Linux Simulator"
VERSION_ID="24.04"
HOME_URL="https://www.linux.org/"
SUPPORT_URL="https://help.linux.org/""#;

const SYSLOG: &str = "Dec  5 10:00:00 linux-sim systemd[1]: Started Linux Simulator.\nDec  5 10:00:01 linux-sim kernel: Welcome to Linux Simulator!";

/// Initial layout in creation order. `None` marks a directory.
const LAYOUT: &[(&str, Option<&str>)] = &[
    ("/home", None),
    ("/home/user", None),
    ("/home/user/Desktop", None),
    ("/home/user/Desktop/readme.txt", Some(README_TXT)),
    ("/home/user/Documents", None),
    ("/home/user/Documents/notes.txt", Some(NOTES_TXT)),
    ("/home/user/Documents/todo.txt", Some(TODO_TXT)),
    ("/home/user/Downloads", None),
    ("/home/user/Pictures", None),
    ("/home/user/Pictures/wallpapers", None),
    ("/home/user/Music", None),
    ("/home/user/Videos", None),
    ("/home/user/.bashrc", Some(BASHRC)),
    ("/home/user/.profile", Some(PROFILE)),
    ("/etc", None),
    ("/etc/hostname", Some(HOSTNAME)),
    ("/etc/passwd", Some(PASSWD)),
    ("/etc/os-release", Some(OS_RELEASE)),
    ("/var", None),
    ("/var/log", None),
    ("/var/log/syslog", Some(SYSLOG)),
    ("/usr", None),
    ("/usr/bin", None),
    ("/usr/share", None),
    ("/usr/share/doc", None),
    ("/tmp", None),
];

/// The tree every new filesystem starts from.
pub fn seed_tree() -> FileTree {
    let mut tree = FileTree::new();
    for (path, content) in LAYOUT {
        let mut segments = resolve(path, &[]);
        let name = segments.pop().expect("seed paths are never the root");
        let node = match content {
            Some(content) => VfsNode::file(name, *content),
            None => VfsNode::directory(name),
        };
        tree.insert_child(&segments, node)
            .expect("seed layout lists parents before children");
    }
    tree
}
