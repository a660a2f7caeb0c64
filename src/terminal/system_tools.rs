use super::command::{
    merge_results, parse_multitarget, reject_options, Cmd, CmdAlias, CommandResult,
};
use super::vfs::{ContextId, VirtualFilesystem};

const DEFAULT_HOSTNAME: &str = "linux-sim";
const KERNEL_RELEASE: &str = "6.5.0-virtual";
const KERNEL_VERSION: &str = "#1 SMP PREEMPT_DYNAMIC";
const MACHINE: &str = "x86_64";

const ID_TEXT: &str = "uid=1000(user) gid=1000(user) groups=1000(user),4(adm),27(sudo)";
const UPTIME_TEXT: &str = " 10:00:00 up 0 min,  1 user,  load average: 0.00, 0.00, 0.00";

const DF_HUMAN: &str = "Filesystem      Size  Used Avail Use% Mounted on
/dev/sda1        50G   15G   35G  30% /
tmpfs           4.0G     0  4.0G   0% /dev/shm
/dev/sda2       100G   20G   80G  20% /home";
const DF_BLOCKS: &str = "Filesystem     1K-blocks     Used Available Use% Mounted on
/dev/sda1       52428800 15728640  36700160  30% /
tmpfs            4194304        0   4194304   0% /dev/shm
/dev/sda2      104857600 20971520  83886080  20% /home";

const FREE_HUMAN: &str = "              total        used        free      shared  buff/cache   available
Mem:          7.8Gi       420Mi       6.5Gi       1.0Mi       900Mi       7.1Gi
Swap:         2.0Gi          0B       2.0Gi";
const FREE_KIB: &str = "              total        used        free      shared  buff/cache   available
Mem:        8192000      430080     6815744        1024      921600     7270400
Swap:       2097152           0     2097152";

const PS_TEXT: &str = "  PID TTY          TIME CMD
    1 pts/0    00:00:00 bash
  100 pts/0    00:00:00 linux-sim
  101 pts/0    00:00:00 ps";
const TOP_TEXT: &str =
    "\x1b[33mInteractive mode not supported.\x1b[0m\nTry 'ps' for a static process list.";

/// Hostname as written in `/etc/hostname`, so edits to that file show up here.
fn current_hostname(vfs: &VirtualFilesystem, ctx: ContextId) -> String {
    vfs.cat(ctx, "/etc/hostname")
        .ok()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_HOSTNAME.to_string())
}

pub fn uname(args: &[String], vfs: &mut VirtualFilesystem, ctx: ContextId) -> CommandResult {
    let (options, operands) = parse_multitarget(args);
    if let Some(err) = reject_options("uname", &options, &['a', 's', 'n', 'r', 'm']) {
        return err;
    }
    if let Some(extra) = operands.first() {
        return CommandResult::error(format!("uname: extra operand '{extra}'"));
    }
    let hostname = current_hostname(vfs, ctx);
    if options.contains(&'a') {
        return CommandResult::new().with_output(format!(
            "Linux {hostname} {KERNEL_RELEASE} {KERNEL_VERSION} {MACHINE} GNU/Linux"
        ));
    }

    let mut fields = Vec::new();
    if options.is_empty() || options.contains(&'s') {
        fields.push("Linux");
    }
    if options.contains(&'n') {
        fields.push(hostname.as_str());
    }
    if options.contains(&'r') {
        fields.push(KERNEL_RELEASE);
    }
    if options.contains(&'m') {
        fields.push(MACHINE);
    }
    CommandResult::new().with_output(fields.join(" "))
}

pub fn hostname(_args: &[String], vfs: &mut VirtualFilesystem, ctx: ContextId) -> CommandResult {
    CommandResult::new().with_output(current_hostname(vfs, ctx))
}

pub fn id(_args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    CommandResult::new().with_output(ID_TEXT)
}

pub fn uptime(_args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    CommandResult::new().with_output(UPTIME_TEXT)
}

pub fn df(args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    let (options, _) = parse_multitarget(args);
    if let Some(err) = reject_options("df", &options, &['h']) {
        return err;
    }
    let table = if options.contains(&'h') {
        DF_HUMAN
    } else {
        DF_BLOCKS
    };
    CommandResult::new().with_output(table)
}

pub fn free(args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    let (options, _) = parse_multitarget(args);
    if let Some(err) = reject_options("free", &options, &['h']) {
        return err;
    }
    let table = if options.contains(&'h') {
        FREE_HUMAN
    } else {
        FREE_KIB
    };
    CommandResult::new().with_output(table)
}

pub fn ps(_args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    CommandResult::new().with_output(PS_TEXT)
}

pub fn top(_args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    CommandResult::new().with_output(TOP_TEXT)
}

fn which_one(command: &str) -> CommandResult {
    if let Some(alias) = CmdAlias::from_name(command) {
        let expansion = alias.expand("");
        return CommandResult::new().with_output(format!("{command}: aliased to {expansion}"));
    }
    match Cmd::from(command) {
        Cmd::Unknown => CommandResult::error(format!("{command} not found")),
        cmd if cmd.is_builtin() => {
            CommandResult::new().with_output(format!("{command}: shell builtin"))
        }
        _ => CommandResult::new().with_output(format!("/usr/bin/{command}")),
    }
}

pub fn which(args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    merge_results(args.iter().map(|a| which_one(a)).collect())
}

pub fn man(args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    let Some(page) = args.first() else {
        return CommandResult::error("What manual page do you want?\nFor example, try 'man ls'");
    };
    if Cmd::from(page.as_str()) == Cmd::Unknown {
        return CommandResult::error(format!("No manual entry for {page}"));
    }
    let title = page.to_uppercase();
    CommandResult::new().with_output(format!(
        "\x1b[1m{title}(1)\x1b[0m\n\nNAME\n    {page} - use 'help' for more info\n\nSYNOPSIS\n    {page} [options] [arguments]\n\nDESCRIPTION\n    Type 'help' to see available commands."
    ))
}
