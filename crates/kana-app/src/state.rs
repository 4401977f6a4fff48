//! Start-menu choices.
//!
//! The protocol carries the lesson set as an opaque selector string. These
//! are the selectors the host is known to understand, in menu order.

use std::fmt;

/// Lesson set offered on the start page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LessonSet {
    /// Basic hiragana.
    #[default]
    Hiragana,
    /// Basic katakana.
    Katakana,
    /// Hiragana and katakana.
    All,
    /// Hiragana, katakana and rare combinations.
    Rare,
}

impl LessonSet {
    /// All sets in menu order.
    pub const ALL: [Self; 4] = [Self::Hiragana, Self::Katakana, Self::All, Self::Rare];

    /// Selector string sent in `Start`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hiragana => "Hiragana",
            Self::Katakana => "Katakana",
            Self::All => "All",
            Self::Rare => "Rare",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hiragana => "Hiragana",
            Self::Katakana => "Katakana",
            Self::All => "Hiragana + Katakana",
            Self::Rare => "Hiragana + Katakana + Rare",
        }
    }

    /// Parse a host selector. `None` for selectors this UI does not know.
    pub fn from_selector(selector: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|set| set.as_str() == selector)
    }

    /// Next set in menu order, wrapping.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous set in menu order, wrapping.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LessonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Drill sizes offered on the start page. `0` means every available word.
pub const SESSION_SIZES: [u32; 7] = [10, 100, 200, 300, 400, 500, 0];

/// Menu label for a drill size.
pub fn size_label(size: u32) -> String {
    if size == 0 { "All".to_owned() } else { size.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_round_trips() {
        for set in LessonSet::ALL {
            assert_eq!(LessonSet::from_selector(set.as_str()), Some(set));
        }
        assert_eq!(LessonSet::from_selector("Kanji"), None);
    }

    #[test]
    fn navigation_wraps() {
        assert_eq!(LessonSet::Hiragana.prev(), LessonSet::Rare);
        assert_eq!(LessonSet::Rare.next(), LessonSet::Hiragana);
        assert_eq!(LessonSet::Katakana.next(), LessonSet::All);
    }

    #[test]
    fn size_labels() {
        assert_eq!(size_label(100), "100");
        assert_eq!(size_label(0), "All");
    }
}
