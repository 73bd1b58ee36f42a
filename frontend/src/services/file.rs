//! Reading browser files into memory.

use js_sys::Uint8Array;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileList};

use crate::types::{AppError, AppResult, SelectedFile};

/// First file of a picker or drop list, if any.
pub fn first_file(files: Option<FileList>) -> Option<File> {
    files.and_then(|list| list.get(0))
}

/// Read a `File` into a [`SelectedFile`].
pub async fn read_file(file: &File) -> AppResult<SelectedFile> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| AppError::Transport(format!("Failed to read {}: {:?}", file.name(), e)))?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    Ok(SelectedFile::new(file.name(), file.type_(), bytes))
}
