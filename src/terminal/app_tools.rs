use super::command::{AppId, CommandResult};
use super::vfs::{ContextId, VirtualFilesystem};

const LIBREOFFICE_USAGE: &str = "Usage: libreoffice [--writer|--calc|--impress] [file]";

fn launch(app: AppId) -> CommandResult {
    CommandResult::new()
        .with_output(format!("Opening {}...", app.title()))
        .with_application(app)
}

/// Office component implied by a document's extension.
fn app_for_document(document: &str) -> AppId {
    let extension = document
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "ods" | "xls" | "xlsx" | "csv" => AppId::Calc,
        "odp" | "ppt" | "pptx" => AppId::Impress,
        _ => AppId::Writer,
    }
}

pub fn libreoffice(
    args: &[String],
    _vfs: &mut VirtualFilesystem,
    _ctx: ContextId,
) -> CommandResult {
    let mut component = None;
    let mut document: Option<&str> = None;
    for arg in args {
        match arg.as_str() {
            "--writer" => component = Some(AppId::Writer),
            "--calc" => component = Some(AppId::Calc),
            "--impress" => component = Some(AppId::Impress),
            // backgrounding is meaningless here
            "&" => {}
            flag if flag.starts_with('-') => {
                return CommandResult::error(format!(
                    "libreoffice: unrecognized option '{flag}'\n{LIBREOFFICE_USAGE}"
                ));
            }
            file if document.is_none() => document = Some(file),
            _ => {
                return CommandResult::error(format!(
                    "libreoffice: only one file can be opened at a time\n{LIBREOFFICE_USAGE}"
                ));
            }
        }
    }

    let app = component.unwrap_or_else(|| document.map_or(AppId::Writer, app_for_document));
    match document {
        Some(file) => CommandResult::new()
            .with_output(format!("Opening {file} in {}...", app.title()))
            .with_application(app),
        None => launch(app),
    }
}

pub fn nautilus(_args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    launch(AppId::FileManager)
}

pub fn gedit(_args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    launch(AppId::TextEditor)
}

pub fn gnome_calculator(
    _args: &[String],
    _vfs: &mut VirtualFilesystem,
    _ctx: ContextId,
) -> CommandResult {
    launch(AppId::Calculator)
}

pub fn firefox(_args: &[String], _vfs: &mut VirtualFilesystem, _ctx: ContextId) -> CommandResult {
    launch(AppId::Browser)
}

pub fn gnome_system_monitor(
    _args: &[String],
    _vfs: &mut VirtualFilesystem,
    _ctx: ContextId,
) -> CommandResult {
    launch(AppId::SystemMonitor)
}

pub fn gnome_control_center(
    _args: &[String],
    _vfs: &mut VirtualFilesystem,
    _ctx: ContextId,
) -> CommandResult {
    launch(AppId::Settings)
}
