//! Phase 4: Writing to Disk
//!
//! This is the final phase of the amalgamation pipeline. Its only
//! responsibility is to write the finished artifact text to the host
//! filesystem, creating any missing parent directories first.
//!
//! The write happens once, after every earlier phase has succeeded; a run
//! either produces the complete artifact or nothing.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Execute Phase 4: Write the artifact to `output`.
pub fn execute(artifact: &str, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::Write {
                path: parent.display().to_string(),
                message: format!("failed to create directory: {}", e),
            })?;
        }
    }

    fs::write(output, artifact).map_err(|e| Error::Write {
        path: output.display().to_string(),
        message: e.to_string(),
    })
}
