use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::AppError;
use crate::language_utils;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Find the default input: the first file (by name) in `dir` whose name contains `.json`
    pub fn find_default_input<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        WalkDir::new(dir.as_ref())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .find(|entry| entry.file_name().to_string_lossy().contains(".json"))
            .map(|entry| entry.into_path())
    }

    // @generates: Output path for translated document
    // @params: input_file, target_language
    // `messages.json` becomes `messages.fr.json` next to the input
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, target_language: &str) -> PathBuf {
        let input_file = input_file.as_ref();

        // Get the file stem (filename without extension)
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(&language_utils::file_suffix(target_language));
        output_filename.push_str(".json");

        input_file.with_file_name(output_filename)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, AppError> {
        fs::read_to_string(&path)
            .map_err(|e| AppError::File(format!("Failed to read file {:?}: {}", path.as_ref(), e)))
    }

    /// Read and parse a whole JSON document
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Value, AppError> {
        let content = Self::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::File(format!("Failed to parse JSON in {:?}: {}", path.as_ref(), e)))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), AppError> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&path, content)
            .map_err(|e| AppError::File(format!("Failed to write to file {:?}: {}", path.as_ref(), e)))
    }

    /// Serialize a document as compact JSON and write it out
    pub fn write_json<P: AsRef<Path>>(path: P, document: &Value) -> Result<(), AppError> {
        let content = serde_json::to_string(document)?;
        Self::write_to_file(path, &content)
    }
}
