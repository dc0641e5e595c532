//! Searchable fields of the index.

use std::fmt;

/// A searchable document field.
///
/// Fields are searched and reported in declaration order, which is also the order their
/// segments are exported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Document title.
    Title,
    /// Document description.
    Description,
    /// Document body text.
    Content,
}

impl Field {
    /// All searchable fields, in search order.
    pub const ALL: [Self; 3] = [Self::Title, Self::Description, Self::Content];

    /// Returns the field name as used in segment names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Content => "content",
        }
    }

    /// Returns the name of the segment holding this field's postings.
    pub fn segment_name(self) -> String {
        format!("{}.map", self.name())
    }

    /// Parses a segment name back into the field it belongs to.
    pub fn from_segment_name(name: &str) -> Option<Self> {
        let field = name.strip_suffix(".map")?;
        Self::ALL.into_iter().find(|f| f.name() == field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
