use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

use crate::editing::BlockEditor;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid documents directory: {0}")]
    InvalidDocumentsDir(String),
}

/// File extensions recognized as persisted documents
const DOCUMENT_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// Read a document and return its markup
pub fn read_document(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write markup to a document, creating parent directories as needed
pub fn write_document(
    relative_path: &RelativePath,
    root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Recursively find documents under `root`, sorted by path
pub fn scan_documents(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !root.exists() {
        return Err(IoError::InvalidDocumentsDir(
            "documents directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension().and_then(|ext| ext.to_str())
            && DOCUMENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_documents_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidDocumentsDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// Read a document and seed an editor from it
pub fn load_editor(relative_path: &RelativePath, root: &Path) -> Result<BlockEditor, IoError> {
    let markup = read_document(relative_path, root)?;
    Ok(BlockEditor::from_markup(&markup))
}

/// Serialize an editor's blocks and write them to a document
pub fn save_editor(
    editor: &BlockEditor,
    relative_path: &RelativePath,
    root: &Path,
) -> Result<(), IoError> {
    let markup = editor.to_markup();
    log::debug!(
        "saving {} blocks to {}",
        editor.len(),
        relative_path.as_str()
    );
    write_document(relative_path, root, &markup)
}
