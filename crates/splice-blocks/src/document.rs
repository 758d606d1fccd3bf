//! Line-oriented view of a text document.
//!
//! Each stored line keeps its own terminator so lines that are not replaced
//! come back out byte for byte.

/// The line terminator a document mostly uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// An ordered sequence of lines. Order matters and duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split text into lines, keeping terminators.
    ///
    /// Empty text yields an empty document; `"\n"` yields one (blank) line.
    pub fn parse(text: &str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    /// Build a document from already-split lines.
    ///
    /// Lines are stored as given; callers are responsible for terminators.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Raw lines including terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line content at `index` without its terminator.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|line| strip_terminator(line))
    }

    /// The dominant terminator, `Lf` when the document has none.
    pub fn line_ending(&self) -> LineEnding {
        let crlf = self.lines.iter().filter(|l| l.ends_with("\r\n")).count();
        let lf = self
            .lines
            .iter()
            .filter(|l| l.ends_with('\n') && !l.ends_with("\r\n"))
            .count();
        if crlf > lf {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// Concatenate all lines back into text.
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Drop a trailing `\n` or `\r\n`.
pub fn strip_terminator(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}

pub(crate) fn has_terminator(line: &str) -> bool {
    line.ends_with('\n')
}
