//! Sentinel substrings shared with the header generator.
//!
//! The generator leaves literal markers in every header SVG and the patchers
//! locate their edit points by those markers alone. All literal comparisons
//! go through [`MarkerAnchor`].

/// A marker the patchers anchor on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerAnchor {
    /// `<!-- Main Title -->` comment preceding the title `<text>` node.
    MainTitle,
    /// Opening tag prefix of the badge group below the title.
    BadgeGroup,
    /// Reference to a generated clip path; its presence means the overflow
    /// pass already ran on the file.
    ClipPathUse,
}

impl MarkerAnchor {
    /// The literal text of this marker.
    pub const fn literal(self) -> &'static str {
        match self {
            Self::MainTitle => "<!-- Main Title -->",
            Self::BadgeGroup => r#"<g transform="translate(600, 275)""#,
            Self::ClipPathUse => r#"clip-path="url(#clip-"#,
        }
    }

    /// Byte length of the literal.
    #[inline]
    pub const fn len(self) -> usize {
        self.literal().len()
    }

    /// Byte offset of the first occurrence in `doc`.
    #[inline]
    pub fn find(self, doc: &str) -> Option<usize> {
        self.find_from(doc, 0)
    }

    /// Byte offset of the first occurrence at or after `from`.
    pub fn find_from(self, doc: &str, from: usize) -> Option<usize> {
        doc.get(from..)?
            .find(self.literal())
            .map(|offset| from + offset)
    }

    /// Byte offset just past the first occurrence in `doc`.
    #[inline]
    pub fn find_end(self, doc: &str) -> Option<usize> {
        self.find(doc).map(|start| start + self.len())
    }

    /// Whether `doc` contains this marker anywhere.
    #[inline]
    pub fn is_present(self, doc: &str) -> bool {
        doc.contains(self.literal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_main_title() {
        let doc = "<svg>\n  <!-- Main Title -->\n  <text>x</text>\n</svg>";
        let start = MarkerAnchor::MainTitle.find(doc).unwrap();
        assert_eq!(&doc[start..start + 19], "<!-- Main Title -->");
        assert_eq!(MarkerAnchor::MainTitle.find_end(doc), Some(start + 19));
    }

    #[test]
    fn test_find_from_skips_earlier_occurrences() {
        let doc = r#"<g transform="translate(600, 275)"><g transform="translate(600, 275)">"#;
        let first = MarkerAnchor::BadgeGroup.find(doc).unwrap();
        let second = MarkerAnchor::BadgeGroup.find_from(doc, first + 1).unwrap();
        assert_eq!(first, 0);
        assert_eq!(second, MarkerAnchor::BadgeGroup.len() + 1);
    }

    #[test]
    fn test_find_from_out_of_range() {
        assert_eq!(MarkerAnchor::MainTitle.find_from("abc", 10), None);
    }

    #[test]
    fn test_badge_marker_matches_tag_with_more_attrs() {
        let doc = r#"<g transform="translate(600, 275)" opacity="0.9">"#;
        assert!(MarkerAnchor::BadgeGroup.is_present(doc));
    }

    #[test]
    fn test_clip_path_use() {
        assert!(MarkerAnchor::ClipPathUse.is_present(r#"<g clip-path="url(#clip-3)">"#));
        assert!(!MarkerAnchor::ClipPathUse.is_present(r#"<g clip-path="url(#mask)">"#));
    }
}
