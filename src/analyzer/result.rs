//! Values produced by a successful analysis

/// Number of heading elements per level, h1 through h6
///
/// Always holds exactly six counts; levels absent from the page are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadingCounts([usize; 6]);

impl HeadingCounts {
    /// Tag names in level order
    pub const TAGS: [&'static str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

    /// Builds counts from an array indexed by `level - 1`
    pub fn from_levels(counts: [usize; 6]) -> Self {
        Self(counts)
    }

    /// Count for a tag name such as `"h2"` (lowercase)
    pub fn get(&self, tag: &str) -> Option<usize> {
        Self::TAGS
            .iter()
            .position(|t| *t == tag)
            .map(|index| self.0[index])
    }

    /// Iterates `(tag, count)` pairs from h1 to h6
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        Self::TAGS.into_iter().zip(self.0.iter().copied())
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

/// Internal/external link counts of the analyzed page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSummary {
    pub internal: usize,
    pub external: usize,
    pub total: usize,
}

impl LinkSummary {
    /// Creates a summary whose total is always `internal + external`
    pub fn new(internal: usize, external: usize) -> Self {
        Self {
            internal,
            external,
            total: internal + external,
        }
    }
}

/// Structural facts about one analyzed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// `"HTML5 (with doctype)"` or `"Unknown (no doctype)"`
    pub html_version: String,

    /// Trimmed text of the first `<title>`, empty if none
    pub title: String,

    /// Heading element counts, h1..h6
    pub headings: HeadingCounts,

    /// Deduplicated link counts
    pub links: LinkSummary,

    /// Whether any form looks like a login form
    pub has_login_form: bool,

    /// Links whose HEAD and fallback GET probes both failed
    pub inaccessible: usize,
}
