//! Indented, comment-aware text output.

use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

use crate::types::DEFAULT_WRAP;

const INDENT: &str = "  ";

/// Wrap `text` into lines of at most `width` characters.
///
/// Breaks only at whitespace; a word longer than `width` gets a line of its
/// own. Existing line breaks are kept, blank lines are dropped. Runs of
/// spaces or tabs inside a line collapse to a single space.
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for source_line in text.lines() {
        let mut current = String::new();
        for word in source_line.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
            } else if current.chars().count() + 1 + word.chars().count() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Writes indented content and wrapped `#` comments to an output stream.
///
/// Tracks the current nesting depth and whether the next emission is the
/// first one of a list item, which takes a `- ` marker one level shallower.
#[derive(Debug)]
pub struct Writer<W: Write> {
    out: W,
    wrap: usize,
    depth: usize,
    array_item: bool,
}

impl<W: Write> Writer<W> {
    pub fn new(out: W) -> Self {
        Self::with_wrap(out, DEFAULT_WRAP)
    }

    pub fn with_wrap(out: W, wrap: usize) -> Self {
        Self {
            out,
            wrap,
            depth: 0,
            array_item: false,
        }
    }

    /// Current nesting depth in indentation units.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the next emission opens a list item.
    pub fn in_array_item(&self) -> bool {
        self.array_item
    }

    /// Nest one level for the lifetime of the returned guard.
    pub fn indent(&mut self) -> Indented<'_, W> {
        self.depth += 1;
        Indented {
            writer: self,
            levels: 1,
            array: false,
        }
    }

    /// Nest into a list item for the lifetime of the returned guard.
    ///
    /// List items sit two levels deeper so the `- ` marker fits one level up.
    pub fn indent_array(&mut self) -> Indented<'_, W> {
        self.depth += 2;
        self.array_item = true;
        Indented {
            writer: self,
            levels: 2,
            array: true,
        }
    }

    /// Write one content line at the current depth. An empty `msg` writes a
    /// bare blank line.
    pub fn line(&mut self, msg: &str) -> io::Result<()> {
        if msg.is_empty() {
            return writeln!(self.out);
        }
        if self.array_item {
            self.array_item = false;
            let marker = self.marker_indent();
            return writeln!(self.out, "{}- {}", marker, msg);
        }
        let indent = self.indent_str();
        writeln!(self.out, "{}{}", indent, msg)
    }

    /// Write `comment` as wrapped `# ` lines at the current depth.
    pub fn comment(&mut self, comment: &str) -> io::Result<()> {
        let indent = self.indent_str();
        let width = self.wrap.saturating_sub(indent.len());
        for line in word_wrap(comment, width) {
            if self.array_item {
                self.array_item = false;
                let marker = self.marker_indent();
                writeln!(self.out, "{}- # {}", marker, line)?;
            } else {
                writeln!(self.out, "{}# {}", indent, line)?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Consume the writer, returning the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn indent_str(&self) -> String {
        INDENT.repeat(self.depth)
    }

    fn marker_indent(&self) -> String {
        INDENT.repeat(self.depth.saturating_sub(1))
    }
}

/// Scoped nesting level. Restores the writer's depth when dropped.
pub struct Indented<'a, W: Write> {
    writer: &'a mut Writer<W>,
    levels: usize,
    array: bool,
}

impl<W: Write> Deref for Indented<'_, W> {
    type Target = Writer<W>;

    fn deref(&self) -> &Writer<W> {
        self.writer
    }
}

impl<W: Write> DerefMut for Indented<'_, W> {
    fn deref_mut(&mut self) -> &mut Writer<W> {
        self.writer
    }
}

impl<W: Write> Drop for Indented<'_, W> {
    fn drop(&mut self) {
        self.writer.depth -= self.levels;
        if self.array {
            self.writer.array_item = false;
        }
    }
}
