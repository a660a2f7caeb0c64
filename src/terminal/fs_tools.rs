use super::command::{
    join_results, merge_results, parse_multitarget, reject_options, CommandResult,
};
use super::tree::VfsError;
use super::vfs::{ContextId, VirtualFilesystem};

pub fn ls(args: &[String], vfs: &mut VirtualFilesystem, ctx: ContextId) -> CommandResult {
    let (options, targets) = parse_multitarget(args);
    if let Some(err) = reject_options("ls", &options, &['a', 'A', 'l']) {
        return err;
    }
    let show_hidden = options.iter().any(|c| *c == 'a' || *c == 'A');
    let long_format = options.contains(&'l');

    if targets.is_empty() {
        return vfs.ls(ctx, None, show_hidden, long_format).into();
    }

    if let [target] = targets.as_slice() {
        return vfs.ls(ctx, Some(*target), show_hidden, long_format).into();
    }

    let results = targets
        .iter()
        .map(|tp| match vfs.ls(ctx, Some(*tp), show_hidden, long_format) {
            Ok(listing) => CommandResult::new().with_output(format!("{tp}:\n{listing}")),
            Err(e) => CommandResult::error(e.message()),
        })
        .collect();
    join_results(results, "\n\n")
}

pub fn cd(args: &[String], vfs: &mut VirtualFilesystem, ctx: ContextId) -> CommandResult {
    match args {
        [] => vfs.cd(ctx, "~").into(),
        [path] => vfs.cd(ctx, path).into(),
        _ => CommandResult::error("cd: too many arguments"),
    }
}

pub fn pwd(args: &[String], vfs: &mut VirtualFilesystem, ctx: ContextId) -> CommandResult {
    if !args.is_empty() {
        return CommandResult::error("pwd: too many arguments");
    }
    CommandResult::new().with_output(vfs.pwd(ctx))
}

pub fn cat(args: &[String], vfs: &mut VirtualFilesystem, ctx: ContextId) -> CommandResult {
    let (options, targets) = parse_multitarget(args);
    if let Some(err) = reject_options("cat", &options, &[]) {
        return err;
    }
    if targets.is_empty() {
        return CommandResult::error("cat: missing file operand");
    }
    merge_results(
        targets
            .iter()
            .map(|tp| CommandResult::from(vfs.cat(ctx, tp)))
            .collect(),
    )
}

pub fn mkdir(args: &[String], vfs: &mut VirtualFilesystem, ctx: ContextId) -> CommandResult {
    let (options, targets) = parse_multitarget(args);
    if let Some(err) = reject_options("mkdir", &options, &['p']) {
        return err;
    }
    if targets.is_empty() {
        return CommandResult::error("mkdir: missing operand");
    }
    let parents = options.contains(&'p');
    merge_results(
        targets
            .iter()
            .map(|tp| {
                let created = if parents {
                    vfs.mkdir_all(ctx, tp)
                } else {
                    vfs.mkdir(ctx, tp)
                };
                CommandResult::from(created)
            })
            .collect(),
    )
}

pub fn touch(args: &[String], vfs: &mut VirtualFilesystem, ctx: ContextId) -> CommandResult {
    let (options, targets) = parse_multitarget(args);
    if let Some(err) = reject_options("touch", &options, &[]) {
        return err;
    }
    if targets.is_empty() {
        return CommandResult::error("touch: missing file operand");
    }
    merge_results(
        targets
            .iter()
            .map(|tp| CommandResult::from(vfs.touch(ctx, tp)))
            .collect(),
    )
}

pub fn rm(args: &[String], vfs: &mut VirtualFilesystem, ctx: ContextId) -> CommandResult {
    let (options, targets) = parse_multitarget(args);
    if let Some(err) = reject_options("rm", &options, &['r', 'R', 'f']) {
        return err;
    }
    let recursive = options.iter().any(|c| *c == 'r' || *c == 'R');
    let force = options.contains(&'f');
    if targets.is_empty() {
        return if force {
            CommandResult::new()
        } else {
            CommandResult::error("rm: missing operand")
        };
    }
    merge_results(
        targets
            .iter()
            .map(|tp| {
                if recursive && vfs.resolve(ctx, tp).is_empty() {
                    return CommandResult::error(
                        "rm: it is dangerous to operate recursively on '/'",
                    );
                }
                match vfs.rm(ctx, tp, recursive) {
                    Err(e) if force && e.kind == VfsError::NotFound => CommandResult::new(),
                    other => CommandResult::from(other),
                }
            })
            .collect(),
    )
}

pub fn rmdir(args: &[String], vfs: &mut VirtualFilesystem, ctx: ContextId) -> CommandResult {
    let (options, targets) = parse_multitarget(args);
    if let Some(err) = reject_options("rmdir", &options, &[]) {
        return err;
    }
    if targets.is_empty() {
        return CommandResult::error("rmdir: missing operand");
    }
    merge_results(
        targets
            .iter()
            .map(|tp| CommandResult::from(vfs.rmdir(ctx, tp)))
            .collect(),
    )
}

pub fn rename(args: &[String], vfs: &mut VirtualFilesystem, ctx: ContextId) -> CommandResult {
    match args {
        [] | [_] => CommandResult::error("rename: missing operand\nUsage: rename <path> <new-name>"),
        [path, new_name] => vfs.rename(ctx, path, new_name).into(),
        _ => CommandResult::error("rename: too many arguments"),
    }
}
