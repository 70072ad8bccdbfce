use std::fs;
use std::path::PathBuf;

/// Supplies best-effort plain text for one document.
///
/// Implementations never fail: a document whose text cannot be recovered yields an
/// empty string, which the pipeline treats as degenerate input.
pub trait TextSource {
    fn text(&self) -> String;

    /// Label used in logs and reports.
    fn label(&self) -> String;
}

/// Text file on disk, decoded lossily as UTF-8.
#[derive(Debug, Clone)]
pub struct PlainTextFile {
    path: PathBuf,
}

impl PlainTextFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for PlainTextFile {
    fn text(&self) -> String {
        match fs::read(&self.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "unable to read document text"
                );
                String::new()
            }
        }
    }

    fn label(&self) -> String {
        self.path.display().to_string()
    }
}

/// Text already held in memory.
#[derive(Debug, Clone)]
pub struct InlineText {
    label: String,
    text: String,
}

impl InlineText {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

impl TextSource for InlineText {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_empty_text() {
        let source = PlainTextFile::new("/definitely/not/a/resume.txt");
        assert_eq!(source.text(), "");
        assert_eq!(source.label(), "/definitely/not/a/resume.txt");
    }

    #[test]
    fn reads_file_lossily() {
        let path =
            std::env::temp_dir().join(format!("cv-screen-source-{}.txt", std::process::id()));
        fs::write(&path, b"Python \xff developer").expect("temp file writes");

        let text = PlainTextFile::new(&path).text();
        fs::remove_file(&path).ok();

        assert_eq!(text, "Python \u{fffd} developer");
    }

    #[test]
    fn inline_text_returns_its_content() {
        let source = InlineText::new("pasted", "SQL and Excel");
        assert_eq!(source.text(), "SQL and Excel");
        assert_eq!(source.label(), "pasted");
    }
}
