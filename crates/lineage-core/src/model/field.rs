use std::fmt;

/// An opaque `(tag, value)` pair kept for a source line that was recognized
/// but not mapped onto a typed attribute.
///
/// Fields preserve source order and let unknown extension tags survive a
/// parse without failing it. `depth` is the line's level relative to the
/// record or event that owns it, so a direct child has depth 1 and its own
/// sub-lines have depth 2 and up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub tag: String,
    pub value: String,
    pub depth: usize,
}

impl Field {
    /// A direct child of its owner.
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::nested(tag, value, 1)
    }

    /// A line `depth` levels below its owner. A depth of 0 is raised to 1.
    pub fn nested(tag: impl Into<String>, value: impl Into<String>, depth: usize) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
            depth: depth.max(1),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            f.write_str(&self.tag)
        } else {
            write!(f, "{} {}", self.tag, self.value)
        }
    }
}
