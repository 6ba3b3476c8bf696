use std::path::Path;

use crate::app::model::Effect;
use crate::app::{Model, ToastLevel};
use crate::file_io::{self, FileError};

/// Run the file work queued by the last update, reporting through toasts.
pub(super) fn run_pending_effect(model: &mut Model) {
    let Some(effect) = model.pending_effect.take() else {
        return;
    };
    match effect {
        Effect::Open(path) => open_file(model, &path),
        Effect::Save => match file_io::save_buffer(&mut model.buffer) {
            Ok(path) => report_saved(model, &path),
            Err(err) => report_save_error(model, &err),
        },
        Effect::SaveAs(path) => match file_io::save_buffer_as(&mut model.buffer, &path) {
            Ok(path) => report_saved(model, &path),
            Err(err) => report_save_error(model, &err),
        },
    }
}

/// Load `path` into the editor; a missing file starts a new buffer bound to it.
pub(super) fn open_file(model: &mut Model, path: &Path) {
    match file_io::open_buffer(path, model.options) {
        Ok(buffer) => {
            let lines = buffer.line_count();
            model.replace_buffer(buffer);
            tracing::info!(path = %path.display(), lines, "opened file");
            model.show_toast(ToastLevel::Info, format!("Opened {}", path.display()));
        }
        Err(FileError::FileNotFound(_)) => {
            let buffer = model.options.empty_buffer().with_path(path);
            model.replace_buffer(buffer);
            tracing::info!(path = %path.display(), "starting new file");
            model.show_toast(ToastLevel::Info, "New file");
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "open failed");
            model.show_toast(ToastLevel::Error, format!("Open failed: {err}"));
        }
    }
}

fn report_saved(model: &mut Model, path: &Path) {
    tracing::info!(path = %path.display(), "saved file");
    model.show_toast(ToastLevel::Info, format!("Saved {}", path.display()));
}

fn report_save_error(model: &mut Model, err: &FileError) {
    tracing::warn!(error = %err, "save failed");
    model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
}
