//! Module for handling source files and their elements.

use std::{
    cmp::Ordering,
    fmt::Debug,
    ops::Range,
    path::{Path, PathBuf},
    sync::Arc,
};

use getset::{CopyGetters, Getters};

use super::{file_provider::FileProvider, Error};

/// Represents an immutable piece of REN source text.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Getters)]
pub struct SourceFile {
    /// Get the path the source was loaded from, if any.
    #[get = "pub"]
    path: Option<PathBuf>,
    /// Get the identifier of the source file.
    #[get = "pub"]
    identifier: String,
    /// Get the content of the source file
    #[get = "pub"]
    content: String,
    lines: Vec<Range<usize>>,
}

#[allow(clippy::missing_fields_in_debug)]
impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("identifier", &self.identifier)
            .field("path", &self.path)
            .field("lines", &self.lines)
            .finish()
    }
}

impl SourceFile {
    fn new(path: Option<PathBuf>, identifier: String, content: String) -> Arc<Self> {
        let lines = get_line_byte_positions(&content);

        Arc::new(Self {
            path,
            identifier,
            content,
            lines,
        })
    }

    /// Creates a source file from text that is already in memory.
    #[must_use]
    pub fn in_memory(identifier: impl Into<String>, content: impl Into<String>) -> Arc<Self> {
        Self::new(None, identifier.into(), content.into())
    }

    /// Load the source file from the given file path.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when reading the file contents.
    /// - [`Error::Utf8Error`]: The file contents are not valid UTF-8.
    pub fn load(
        path: &Path,
        identifier: String,
        provider: &impl FileProvider,
    ) -> Result<Arc<Self>, Error> {
        let source = provider.read_str(path)?;
        Ok(Self::new(
            Some(path.to_path_buf()),
            identifier,
            source.into_owned(),
        ))
    }

    /// Get the line of the source file at the given line number.
    ///
    /// Numbering starts at 1.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }

        let line = line - 1;
        self.lines
            .get(line)
            .map(|range| &self.content()[range.clone()])
    }

    /// Get the [`Location`] of a given byte index.
    ///
    /// The index one past the last byte is valid and maps to the end of the last line.
    #[must_use]
    pub fn get_location(&self, byte_index: usize) -> Option<Location> {
        if byte_index > self.content.len() || !self.content.is_char_boundary(byte_index) {
            return None;
        }

        // line ranges are sorted and contiguous, the last one always exists
        let line = self
            .lines
            .partition_point(|range| range.end <= byte_index)
            .min(self.lines.len() - 1);

        let line_starting_byte_index = self.lines[line].start;

        // columns count utf-8 characters and start at 1
        let column = self.content[line_starting_byte_index..byte_index]
            .chars()
            .count()
            + 1;

        Some(Location {
            line: line + 1,
            column,
        })
    }

    /// Get the relative path of the source file from the current working directory.
    #[must_use]
    pub fn path_relative(&self) -> Option<PathBuf> {
        pathdiff::diff_paths(self.path.as_ref()?, std::env::current_dir().ok()?)
    }
}

/// Represents a range of characters in a source file.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Getters, CopyGetters)]
pub struct Span {
    /// Get the start byte index of the span.
    #[get_copy = "pub"]
    start: usize,

    /// Get the end byte index of the span (exclusive).
    #[get_copy = "pub"]
    end: usize,

    /// Get the source file that the span is located in.
    #[get = "pub"]
    source_file: Arc<SourceFile>,
}

#[allow(clippy::missing_fields_in_debug)]
impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("content", &self.str())
            .finish()
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source_file, &other.source_file)
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Span {}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        let self_ptr_value = Arc::as_ptr(&self.source_file) as usize;
        let other_ptr_value = Arc::as_ptr(&other.source_file) as usize;

        self_ptr_value
            .cmp(&other_ptr_value)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        Arc::as_ptr(&self.source_file).hash(state);
    }
}

impl Span {
    /// Create a span from the given start and end byte indices in the source file.
    ///
    /// Returns [`None`] if the range is reversed, out of bounds or splits a character.
    ///
    /// # Parameters
    /// - `start`: The start byte index of the span.
    /// - `end`: The end byte index of the span (exclusive).
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>, start: usize, end: usize) -> Option<Self> {
        let content = source_file.content();
        if start > end
            || content.len() < end
            || !content.is_char_boundary(start)
            || !content.is_char_boundary(end)
        {
            return None;
        }

        Some(Self {
            start,
            end,
            source_file,
        })
    }

    /// Create a span from indices the caller has already validated against the bounds checked
    /// by [`Span::new`].
    pub(crate) fn new_unchecked(source_file: Arc<SourceFile>, start: usize, end: usize) -> Self {
        debug_assert!(
            start <= end
                && end <= source_file.content().len()
                && source_file.content().is_char_boundary(start)
                && source_file.content().is_char_boundary(end),
            "invalid span {start}..{end}"
        );

        Self {
            start,
            end,
            source_file,
        }
    }

    /// Create a span covering the single character starting at the given byte index.
    ///
    /// Returns [`None`] if there is no character starting at `start`.
    #[must_use]
    pub fn single_char(source_file: Arc<SourceFile>, start: usize) -> Option<Self> {
        let character = source_file.content().get(start..)?.chars().next()?;
        Self::new(source_file, start, start + character.len_utf8())
    }

    /// Get the string slice of the source code that the span represents.
    #[must_use]
    pub fn str(&self) -> &str {
        &self.source_file.content()[self.start..self.end]
    }

    /// Get the starting [`Location`] of the span.
    #[must_use]
    pub fn start_location(&self) -> Location {
        self.source_file
            .get_location(self.start)
            .unwrap_or_default()
    }

    /// Join the starting position of this span with the end position of the given span.
    #[must_use]
    pub fn join(&self, end: &Self) -> Option<Self> {
        if !Arc::ptr_eq(&self.source_file, &end.source_file) || self.start > end.end {
            return None;
        }

        Some(Self {
            start: self.start,
            end: end.end,
            source_file: self.source_file.clone(),
        })
    }
}

/// Pointing to a particular location in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// Line number of the location (starts at 1).
    pub line: usize,

    /// Column number of the location (starts at 1).
    pub column: usize,
}

/// Get the byte positions of the lines in the given text.
fn get_line_byte_positions(text: &str) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();

    let mut skip = false;

    for (byte, char) in text.char_indices() {
        if skip {
            skip = false;
            continue;
        }

        // lf
        if char == '\n' {
            #[allow(clippy::range_plus_one)]
            results.push(current_position..byte + 1);

            current_position = byte + 1;
        }

        // crlf
        if char == '\r' {
            if text.as_bytes().get(byte + 1) == Some(&b'\n') {
                results.push(current_position..byte + 2);

                current_position = byte + 2;

                skip = true;
            } else {
                #[allow(clippy::range_plus_one)]
                results.push(current_position..byte + 1);

                current_position = byte + 1;
            }
        }
    }

    // add the last line
    results.push(current_position..text.len());

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_byte_positions() {
        assert_eq!(get_line_byte_positions(""), vec![0..0]);
        assert_eq!(get_line_byte_positions("ab\ncd"), vec![0..3, 3..5]);
        assert_eq!(get_line_byte_positions("a\r\nb\rc"), vec![0..3, 3..5, 5..6]);
    }

    #[test]
    fn test_get_location() {
        let source = SourceFile::in_memory("test", "{\n  \"ä\" #\n}");

        assert_eq!(
            source.get_location(0),
            Some(Location { line: 1, column: 1 })
        );
        assert_eq!(
            source.get_location(2),
            Some(Location { line: 2, column: 1 })
        );
        // `#` sits after the two-byte `ä`
        assert_eq!(
            source.get_location(9),
            Some(Location { line: 2, column: 7 })
        );
        assert_eq!(
            source.get_location(source.content().len()),
            Some(Location { line: 3, column: 2 })
        );
        // inside the `ä`
        assert_eq!(source.get_location(6), None);
        assert_eq!(source.get_location(100), None);
    }

    #[test]
    fn test_span_bounds() {
        let source = SourceFile::in_memory("test", "\"ä\"");

        assert_eq!(
            Span::new(source.clone(), 0, 4).map(|s| s.str().to_string()),
            Some("\"ä\"".to_string())
        );
        assert!(Span::new(source.clone(), 0, 2).is_none());
        assert!(Span::new(source.clone(), 3, 1).is_none());
        assert!(Span::new(source.clone(), 0, 5).is_none());
        assert_eq!(
            Span::single_char(source.clone(), 1).map(|s| s.end()),
            Some(3)
        );
        assert!(Span::single_char(source, 4).is_none());
    }

    #[test]
    fn test_span_join() {
        let source = SourceFile::in_memory("test", "(\"k\")");
        let open = Span::new(source.clone(), 0, 1).unwrap();
        let close = Span::new(source.clone(), 4, 5).unwrap();

        assert_eq!(open.join(&close).unwrap().str(), "(\"k\")");
        assert!(close.join(&open).is_none());

        let other = SourceFile::in_memory("other", "(\"k\")");
        let foreign = Span::new(other, 4, 5).unwrap();
        assert!(open.join(&foreign).is_none());
    }
}
