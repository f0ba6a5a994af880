//! Character display framebuffer shared by annunciator implementations.
//!
//! This module provides a 2-line x 16-column text panel that mirrors the
//! 1602-style character LCD of the physical controller. It handles text
//! sanitization, truncation to the line width, and space padding, so every
//! annunciator backend (console, mock) renders identically.
//!
//! # Examples
//!
//! ```
//! use deadbolt_hardware::display::TextPanel;
//!
//! let mut panel = TextPanel::default();
//! panel.set_line(0, "Enter Password").unwrap();
//! panel.set_line(1, "****").unwrap();
//!
//! assert_eq!(panel.get_line(0).unwrap(), "Enter Password  ");
//! assert_eq!(panel.get_line(1).unwrap().trim_end(), "****");
//! ```

use deadbolt_core::{
    Error, Result,
    constants::{DISPLAY_COLUMNS, DISPLAY_LINES},
};

/// Virtual character display buffer.
///
/// Each line is kept padded to exactly `columns` characters, so reading a
/// line back always yields the full rendered row.
#[derive(Debug, Clone)]
pub struct TextPanel {
    /// Number of lines in the display.
    lines: usize,

    /// Number of columns per line.
    columns: usize,

    /// Current display buffer, one padded string per line.
    buffer: Vec<String>,
}

impl TextPanel {
    /// Create a new text panel with the given dimensions, blank.
    pub fn new(lines: usize, columns: usize) -> Self {
        Self {
            lines,
            columns,
            buffer: vec![" ".repeat(columns); lines],
        }
    }

    /// Render text on a line, sanitized, truncated and space-padded.
    ///
    /// Control characters are removed and the text is truncated to the
    /// column width; overflow is never an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLine` if the line index is out of bounds.
    pub fn set_line(&mut self, line: usize, text: &str) -> Result<()> {
        if line >= self.lines {
            return Err(Error::InvalidLine {
                line,
                max: self.lines - 1,
            });
        }

        let sanitized = sanitize_text(text);
        self.buffer[line] = pad_line(&sanitized, self.columns);
        Ok(())
    }

    /// Get the rendered text of a line, padded to the column width.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLine` if the line index is out of bounds.
    pub fn get_line(&self, line: usize) -> Result<&str> {
        if line >= self.lines {
            return Err(Error::InvalidLine {
                line,
                max: self.lines - 1,
            });
        }
        Ok(&self.buffer[line])
    }

    /// Blank all lines.
    pub fn clear(&mut self) {
        for line in &mut self.buffer {
            *line = " ".repeat(self.columns);
        }
    }

    /// All rendered rows, top to bottom.
    pub fn rows(&self) -> &[String] {
        &self.buffer
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Number of columns per line.
    pub fn column_count(&self) -> usize {
        self.columns
    }
}

impl Default for TextPanel {
    fn default() -> Self {
        Self::new(DISPLAY_LINES, DISPLAY_COLUMNS)
    }
}

/// Truncate text to a maximum number of characters.
///
/// # Examples
///
/// ```
/// use deadbolt_hardware::display::truncate_text;
///
/// assert_eq!(truncate_text("Wrong Password!!", 14), "Wrong Password");
/// assert_eq!(truncate_text("Card OK", 16), "Card OK");
/// ```
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Truncate and left-align text within a fixed width, padding with spaces.
fn pad_line(text: &str, width: usize) -> String {
    let truncated = truncate_text(text, width);
    format!("{truncated:<width$}")
}

/// Remove control characters and trim surrounding whitespace.
fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_panel_is_blank() {
        let panel = TextPanel::default();

        assert_eq!(panel.line_count(), 2);
        assert_eq!(panel.column_count(), 16);
        assert_eq!(panel.get_line(0).unwrap().trim(), "");
        assert_eq!(panel.get_line(1).unwrap().trim(), "");
    }

    #[test]
    fn test_set_line_pads_to_width() {
        let mut panel = TextPanel::default();
        panel.set_line(0, "Card OK").unwrap();

        let line = panel.get_line(0).unwrap();
        assert_eq!(line.len(), 16);
        assert_eq!(line, "Card OK         ");
    }

    #[test]
    fn test_set_line_truncates_overflow() {
        let mut panel = TextPanel::default();
        panel.set_line(0, "This text is far too long").unwrap();

        let line = panel.get_line(0).unwrap();
        assert_eq!(line.len(), 16);
        assert_eq!(line, "This text is far");
    }

    #[test]
    fn test_set_line_invalid_index() {
        let mut panel = TextPanel::default();
        let result = panel.set_line(5, "TEXT");

        assert!(result.is_err());
        if let Err(Error::InvalidLine { line, max }) = result {
            assert_eq!(line, 5);
            assert_eq!(max, 1);
        } else {
            panic!("Expected InvalidLine error");
        }
    }

    #[test]
    fn test_get_line_out_of_bounds() {
        let panel = TextPanel::default();
        assert!(panel.get_line(2).is_err());
    }

    #[test]
    fn test_control_characters_removed() {
        let mut panel = TextPanel::default();
        panel.set_line(0, "Mas\nter\tMode").unwrap();

        let line = panel.get_line(0).unwrap();
        assert!(!line.contains('\n'));
        assert!(!line.contains('\t'));
        assert_eq!(line.trim_end(), "MasterMode");
    }

    #[test]
    fn test_clear() {
        let mut panel = TextPanel::default();
        panel.set_line(0, "Access Granted").unwrap();
        panel.set_line(1, "****").unwrap();
        panel.clear();

        assert_eq!(panel.get_line(0).unwrap().trim(), "");
        assert_eq!(panel.get_line(1).unwrap().trim(), "");
    }

    #[test]
    fn test_rows() {
        let mut panel = TextPanel::default();
        panel.set_line(1, "****").unwrap();

        let rows = panel.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].trim_end(), "****");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Hello", 5), "Hello");
        assert_eq!(truncate_text("Hello", 3), "Hel");
        assert_eq!(truncate_text("Hello", 10), "Hello");
    }
}
