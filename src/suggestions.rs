use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one emphasis-delimited span. Non-greedy, so spans never overlap
/// and are consumed left to right; `.` does not cross newlines.
static SUGGESTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// One piece of an assistant message after suggestion extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSegment {
    /// Rendered as-is, not interactive.
    Plain(String),
    /// Selectable; the contained text (markers stripped) overwrites the
    /// prompt when chosen.
    Suggestion(String),
}

/// Splits assistant text into plain and suggestion segments.
///
/// Unpaired `**` markers produce no span and stay literal inside plain text.
/// Plain text with no markers comes back unchanged as a single segment.
pub fn parse_segments(text: &str) -> Vec<MessageSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for capture in SUGGESTION_RE.captures_iter(text) {
        let whole = capture.get(0).unwrap();
        if whole.start() > cursor {
            segments.push(MessageSegment::Plain(text[cursor..whole.start()].to_string()));
        }
        segments.push(MessageSegment::Suggestion(capture[1].to_string()));
        cursor = whole.end();
    }

    if cursor < text.len() || segments.is_empty() {
        segments.push(MessageSegment::Plain(text[cursor..].to_string()));
    }

    segments
}

/// All selectable suggestions in a message, in reading order.
pub fn extract_suggestions(text: &str) -> Vec<String> {
    parse_segments(text)
        .into_iter()
        .filter_map(|segment| match segment {
            MessageSegment::Suggestion(s) => Some(s),
            MessageSegment::Plain(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_one_unchanged_segment() {
        let segments = parse_segments("just a normal reply");
        assert_eq!(
            segments,
            vec![MessageSegment::Plain("just a normal reply".to_string())]
        );
    }

    #[test]
    fn test_single_suggestion_round_trips() {
        let segments = parse_segments("go to **the beach**");
        assert_eq!(
            segments,
            vec![
                MessageSegment::Plain("go to ".to_string()),
                MessageSegment::Suggestion("the beach".to_string()),
            ]
        );
    }

    #[test]
    fn test_multiple_suggestions_in_order() {
        let suggestions =
            extract_suggestions("Try **a snowy mountain cabin** or maybe **a neon city street**!");
        assert_eq!(
            suggestions,
            vec!["a snowy mountain cabin".to_string(), "a neon city street".to_string()]
        );
    }

    #[test]
    fn test_unpaired_markers_stay_literal() {
        let segments = parse_segments("this ** is not a span");
        assert_eq!(
            segments,
            vec![MessageSegment::Plain("this ** is not a span".to_string())]
        );
    }

    #[test]
    fn test_empty_span_is_an_empty_suggestion() {
        // `****` is a matched pair around an empty string, same as the
        // reference split.
        let segments = parse_segments("a****b");
        assert_eq!(
            segments,
            vec![
                MessageSegment::Plain("a".to_string()),
                MessageSegment::Suggestion(String::new()),
                MessageSegment::Plain("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_trailing_plain_text_kept() {
        let segments = parse_segments("**walking at dawn**, if you like");
        assert_eq!(
            segments,
            vec![
                MessageSegment::Suggestion("walking at dawn".to_string()),
                MessageSegment::Plain(", if you like".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            parse_segments(""),
            vec![MessageSegment::Plain(String::new())]
        );
    }
}
