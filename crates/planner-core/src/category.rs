// ABOUTME: Defines the closed set of planning categories an event can budget and staff.
// ABOUTME: Owns the single alias table mapping free-text category names onto Category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// A service domain within an event. The set is fixed; free-text names from
/// the catalog or the UI are mapped onto it through `Category::from_str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Venue,
    Catering,
    Photography,
    Videography,
    Decoration,
    Entertainment,
    Attire,
    Invitations,
}

/// Lowercased alias -> category. Canonical names are matched case-insensitively
/// through the same table.
const ALIASES: &[(&str, Category)] = &[
    ("venue", Category::Venue),
    ("venues", Category::Venue),
    ("hall", Category::Venue),
    ("banquet hall", Category::Venue),
    ("catering", Category::Catering),
    ("caterer", Category::Catering),
    ("caterers", Category::Catering),
    ("food", Category::Catering),
    ("photography", Category::Photography),
    ("photographer", Category::Photography),
    ("photographers", Category::Photography),
    ("photo", Category::Photography),
    ("videography", Category::Videography),
    ("videographer", Category::Videography),
    ("videographers", Category::Videography),
    ("video", Category::Videography),
    ("decoration", Category::Decoration),
    ("decorations", Category::Decoration),
    ("decor", Category::Decoration),
    ("decorator", Category::Decoration),
    ("decorators", Category::Decoration),
    ("florist", Category::Decoration),
    ("entertainment", Category::Entertainment),
    ("music", Category::Entertainment),
    ("dj", Category::Entertainment),
    ("band", Category::Entertainment),
    ("attire", Category::Attire),
    ("makeup", Category::Attire),
    ("bridal wear", Category::Attire),
    ("invitations", Category::Invitations),
    ("invitation", Category::Invitations),
    ("stationery", Category::Invitations),
];

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Venue,
        Category::Catering,
        Category::Photography,
        Category::Videography,
        Category::Decoration,
        Category::Entertainment,
        Category::Attire,
        Category::Invitations,
    ];

    /// The canonical display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Venue => "Venue",
            Category::Catering => "Catering",
            Category::Photography => "Photography",
            Category::Videography => "Videography",
            Category::Decoration => "Decoration",
            Category::Entertainment => "Entertainment",
            Category::Attire => "Attire",
            Category::Invitations => "Invitations",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, category)| *category)
            .ok_or_else(|| LedgerError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

/// Parse a list of free-text category names, dropping repeats while keeping
/// first-seen order.
pub fn parse_categories<S: AsRef<str>>(names: &[S]) -> Result<Vec<Category>, LedgerError> {
    let mut out: Vec<Category> = Vec::with_capacity(names.len());
    for name in names {
        let category: Category = name.as_ref().parse()?;
        if !out.contains(&category) {
            out.push(category);
        }
    }
    Ok(out)
}
