use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use crate::error::Result;

/// MIME type announced for downloaded STL documents.
pub const STL_MIME_TYPE: &str = "application/sla";

pub const STL_FILE_EXTENSION: &str = "stl";

/// An exported document ready to hand to the host's file-save mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl ExportFile {
    /// Wraps a document, stamping the file name with the current Unix time
    /// in milliseconds.
    #[must_use]
    pub fn new(model_name: &str, contents: String) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        Self::with_token(model_name, &millis.to_string(), contents)
    }

    /// Wraps a document under `<model_name lowercased>_<token>.stl`.
    #[must_use]
    pub fn with_token(model_name: &str, token: &str, contents: String) -> Self {
        Self {
            file_name: format!(
                "{}_{token}.{STL_FILE_EXTENSION}",
                model_name.to_lowercase()
            ),
            mime_type: STL_MIME_TYPE,
            contents,
        }
    }

    /// Writes the document into `dir` and returns the full path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        info!(path = %path.display(), bytes = self.contents.len(), "saved export");
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SimpaadError;

    #[test]
    fn file_name_is_lowercased_and_stamped() {
        let file = ExportFile::with_token("SimpAAD_Model", "1700000000000", String::new());
        assert_eq!(file.file_name, "simpaad_model_1700000000000.stl");
        assert_eq!(file.mime_type, "application/sla");
    }

    #[test]
    fn default_token_is_numeric() {
        let file = ExportFile::new("Part", String::new());
        let token = file
            .file_name
            .strip_prefix("part_")
            .and_then(|rest| rest.strip_suffix(".stl"))
            .unwrap();
        assert!(!token.is_empty());
        assert!(token.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn saves_into_directory() {
        let dir = std::env::temp_dir().join(format!("simpaad-save-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = ExportFile::with_token("M", "1", "solid M\nendsolid M\n".to_string());

        let path = file.save(&dir).unwrap();
        assert_eq!(path, dir.join("m_1.stl"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), file.contents);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = std::env::temp_dir()
            .join(format!("simpaad-missing-{}", std::process::id()))
            .join("nested");
        let file = ExportFile::with_token("M", "1", String::new());
        assert!(matches!(file.save(&dir), Err(SimpaadError::Io(_))));
    }
}
