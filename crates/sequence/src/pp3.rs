//! PP3 settings documents.
//!
//! A PP3 file is INI-style: `[Section]` headers followed by `Key=Value`
//! lines. Keys are case-sensitive and section/entry order is kept so a
//! rewritten file stays diffable against the original.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::SettingsError;

/// One `[Section]` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: vec![],
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: &str, value: String) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }
}

/// A syntax error found while parsing, before a path is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

/// An ordered, case-preserving PP3 document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pp3Document {
    sections: Vec<Section>,
}

impl Pp3Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse document text. Blank lines and `;`/`#` comments are dropped.
    pub fn parse(text: &str) -> Result<Self, SyntaxError> {
        let mut doc = Self::new();
        let mut current: Option<usize> = None;

        for (number, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current = Some(doc.section_index_or_insert(name.trim()));
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(SyntaxError {
                    line: number + 1,
                    message: format!("expected 'Key=Value', found '{line}'"),
                });
            };
            let Some(section) = current else {
                return Err(SyntaxError {
                    line: number + 1,
                    message: "entry appears before any [Section] header".to_string(),
                });
            };
            doc.sections[section].set(key.trim(), value.trim().to_string());
        }

        Ok(doc)
    }

    /// Read and parse the document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SettingsError::io(path, e))?;
        Self::parse(&text).map_err(|e| SettingsError::ParseError {
            path: path.to_path_buf(),
            line: e.line,
            message: e.message,
        })
    }

    /// Render and write the document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.render()).map_err(|e| SettingsError::io(path, e))
    }

    /// Render as text: sections separated by a blank line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "[{}]", section.name);
            for (key, value) in &section.entries {
                let _ = writeln!(out, "{key}={value}");
            }
        }
        out
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// Set `key` in `section`, creating the section at the end if missing.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let index = self.section_index_or_insert(section);
        self.sections[index].set(key, value.into());
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "[Version]
AppVersion=5.8
Version=342

; comment line
[White Balance]
Setting=Custom
Temperature=7000
Green=1.5

[Crop]
Enabled=false
Ratio=3:2
";

    #[test]
    fn test_parse_sections_and_entries() {
        let doc = Pp3Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.sections().len(), 3);
        assert_eq!(doc.get("White Balance", "Temperature"), Some("7000"));
        assert_eq!(doc.get("Crop", "Ratio"), Some("3:2"));
        assert_eq!(doc.get("Crop", "Missing"), None);
        assert_eq!(doc.get("Exposure", "Compensation"), None);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let doc = Pp3Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.get("White Balance", "temperature"), None);
    }

    #[test]
    fn test_render_preserves_order() {
        let doc = Pp3Document::parse(SAMPLE).unwrap();
        let rendered = doc.render();
        assert!(rendered.starts_with("[Version]\nAppVersion=5.8\nVersion=342\n\n[White Balance]"));
        assert!(!rendered.contains("comment"));
        assert_eq!(Pp3Document::parse(&rendered).unwrap(), doc);
    }

    #[test]
    fn test_set_updates_in_place_and_appends_sections() {
        let mut doc = Pp3Document::parse(SAMPLE).unwrap();
        doc.set("White Balance", "Temperature", "6500");
        doc.set("Resize", "Width", "3840");

        let wb = doc.section("White Balance").unwrap();
        assert_eq!(wb.entries[1], ("Temperature".to_string(), "6500".to_string()));
        assert_eq!(doc.sections().last().unwrap().name, "Resize");
        assert_eq!(doc.get("Resize", "Width"), Some("3840"));
    }

    #[test]
    fn test_values_may_contain_equals() {
        let doc = Pp3Document::parse("[Meta]\nExpr=a=b\n").unwrap();
        assert_eq!(doc.get("Meta", "Expr"), Some("a=b"));
    }

    #[test]
    fn test_syntax_errors_report_line() {
        let err = Pp3Document::parse("[A]\nKey=1\ngarbage\n").unwrap_err();
        assert_eq!(err.line, 3);

        let err = Pp3Document::parse("Key=1\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("before any [Section]"));
    }
}
