use std::fs::File;
use std::path::Path;

use crate::foundation::error::{TgaError, TgaResult};

/// Required suffix for the output path and the first input path. Case-sensitive.
pub const TGA_EXTENSION: &str = ".tga";

fn has_tga_suffix(path: &Path) -> bool {
    path.as_os_str()
        .as_encoded_bytes()
        .ends_with(TGA_EXTENSION.as_bytes())
}

pub fn validate_output_path(path: &Path) -> TgaResult<()> {
    if !has_tga_suffix(path) {
        return Err(TgaError::InvalidFilename(path.to_path_buf()));
    }
    Ok(())
}

/// The first input needs the suffix and must open for reading.
pub fn validate_input_path(path: &Path) -> TgaResult<()> {
    if !has_tga_suffix(path) {
        return Err(TgaError::InvalidFilename(path.to_path_buf()));
    }
    File::open(path).map_err(|_| TgaError::FileNotFound(path.to_path_buf()))?;
    Ok(())
}
