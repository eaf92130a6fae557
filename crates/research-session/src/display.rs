//! Snippet preview for result rendering.

use std::borrow::Cow;

/// Snippets longer than this many characters are truncated until expanded.
pub const SNIPPET_PREVIEW_CHARS: usize = 280;

/// Whether the expand/collapse toggle applies to this snippet.
pub fn needs_toggle(snippet: &str) -> bool {
    snippet.chars().count() > SNIPPET_PREVIEW_CHARS
}

/// The text to display for a snippet. Collapsed long snippets are cut at
/// [`SNIPPET_PREVIEW_CHARS`] characters (never mid-character) with a
/// trailing ellipsis; everything else is returned borrowed and unchanged.
pub fn snippet_preview(snippet: &str, expanded: bool) -> Cow<'_, str> {
    if expanded || !needs_toggle(snippet) {
        return Cow::Borrowed(snippet);
    }

    let mut preview: String = snippet.chars().take(SNIPPET_PREVIEW_CHARS).collect();
    preview.push('…');
    Cow::Owned(preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_snippet_unchanged() {
        let text = "short snippet";
        assert!(!needs_toggle(text));
        assert!(matches!(snippet_preview(text, false), Cow::Borrowed(_)));
    }

    #[test]
    fn test_boundary_snippet_unchanged() {
        let text = "x".repeat(SNIPPET_PREVIEW_CHARS);
        assert!(!needs_toggle(&text));
        assert_eq!(snippet_preview(&text, false), text);
    }

    #[test]
    fn test_long_snippet_truncated() {
        let text = "y".repeat(SNIPPET_PREVIEW_CHARS + 40);
        assert!(needs_toggle(&text));

        let preview = snippet_preview(&text, false);
        assert_eq!(preview.chars().count(), SNIPPET_PREVIEW_CHARS + 1);
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn test_expanded_long_snippet_unchanged() {
        let text = "y".repeat(SNIPPET_PREVIEW_CHARS + 40);
        assert_eq!(snippet_preview(&text, true), text);
    }

    #[test]
    fn test_multibyte_snippet_cut_on_char_boundary() {
        let text = "é".repeat(300);
        let preview = snippet_preview(&text, false);
        assert_eq!(preview.chars().count(), SNIPPET_PREVIEW_CHARS + 1);
        assert!(preview.starts_with('é'));
        assert!(preview.ends_with('…'));
    }
}
