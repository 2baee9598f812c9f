//! Sorted line regions inside otherwise free-form text files
//!
//! A shared file is held as a [`LineList`]: every line keeps its terminator,
//! so rendering the list gives back the file byte for byte. A [`Region`]
//! describes where one sorted, deduplicated list lives inside it and which
//! guarded blocks (`if(` .. `endif()`, `#if` .. `#endif`) must be stepped
//! over without looking inside. [`LineList::merge`] puts a new entry into
//! such a region.
//!
//! Lines are compared as plain strings with the terminator stripped. Nothing here
//! understands the language of the file.

use tracing::debug;

/// A test applied to a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMatch {
    /// Line starts with the token
    Prefix(&'static str),
    /// Line contains the token anywhere
    Contains(&'static str),
}

impl LineMatch {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Prefix(token) => line.starts_with(token),
            Self::Contains(token) => line.contains(token),
        }
    }
}

/// Where the scan for a region begins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// At the first matching line
    At(LineMatch),
    /// On the line after the first matching line
    After(LineMatch),
}

/// A block whose lines are skipped as one opaque span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guard {
    pub open: LineMatch,
    pub close: LineMatch,
}

/// One sorted list embedded in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Used in log output only
    pub name: &'static str,
    pub anchor: Anchor,
    /// First line that is no longer part of the list
    pub end: LineMatch,
    pub guard: Option<Guard>,
    /// When set, only matching lines are compared against the candidate;
    /// everything else in the region is stepped over.
    pub entries: Option<LineMatch>,
}

/// What a merge did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    AlreadyPresent,
}

/// Result of merging one entry into one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    pub outcome: MergeOutcome,
    /// Index where the scan stopped, past any inserted lines. A following
    /// region in the same file is searched from here.
    pub resume: usize,
}

/// A text file as an ordered list of lines, terminators preserved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineList {
    lines: Vec<String>,
}

impl LineList {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.split_inclusive('\n').map(String::from).collect(),
        }
    }

    pub fn render(&self) -> String {
        self.lines.concat()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the first line at or after `from` that matches
    pub fn find(&self, from: usize, pattern: LineMatch) -> Option<usize> {
        self.lines
            .iter()
            .skip(from)
            .position(|line| pattern.matches(line))
            .map(|offset| from + offset)
    }

    /// Merge `entry` into `region`, searching for the region from `from`.
    ///
    /// `entry` is one or more complete lines; only its first line is compared.
    /// The entry goes in front of the first compared line that sorts at or
    /// after it, or in front of the region's end line, whichever comes
    /// first. If a compared line equals the first line of `entry` nothing
    /// changes. Comparison ignores line terminators, so `\n` and `\r\n`
    /// copies of the same line are equal. A missing anchor places the region
    /// at the end of the file.
    pub fn merge(&mut self, from: usize, region: &Region, entry: &[String]) -> Merge {
        let Some(key) = entry.first().map(|line| strip_terminator(line)) else {
            return Merge {
                outcome: MergeOutcome::AlreadyPresent,
                resume: from,
            };
        };

        let start = match region.anchor {
            Anchor::At(pattern) => self.find(from, pattern),
            Anchor::After(pattern) => self.find(from, pattern).map(|i| i + 1),
        }
        .unwrap_or(self.lines.len());

        let mut j = start;
        while j < self.lines.len() {
            let line = self.lines[j].as_str();

            if let Some(guard) = &region.guard {
                if guard.open.matches(line) {
                    j = self.skip_guarded(j, guard);
                    continue;
                }
            }

            if region.end.matches(line) {
                break;
            }

            if let Some(entries) = &region.entries {
                if !entries.matches(line) {
                    j += 1;
                    continue;
                }
            }

            let text = strip_terminator(line);
            if text == key {
                debug!(region = region.name, line = j + 1, "entry already present");
                return Merge {
                    outcome: MergeOutcome::AlreadyPresent,
                    resume: j,
                };
            }

            if text >= key {
                break;
            }

            j += 1;
        }

        debug!(region = region.name, line = j + 1, "inserting {} line(s)", entry.len());
        self.lines.splice(j..j, entry.iter().cloned());

        Merge {
            outcome: MergeOutcome::Inserted,
            resume: j + entry.len(),
        }
    }

    /// Index just past the block opened at `open`
    fn skip_guarded(&self, open: usize, guard: &Guard) -> usize {
        match self.find(open, guard.close) {
            Some(close) => close + 1,
            None => self.lines.len(),
        }
    }
}

fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
