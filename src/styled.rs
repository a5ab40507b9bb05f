//! The `{red}...{/red}` inline span scanner shared by every renderer.

use serde::Serialize;

const RED_OPEN: &str = "{red}";
const RED_CLOSE: &str = "{/red}";

/// A run of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub red: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self { text: text.to_string(), red: false }
    }
}

/// Splits `text` into plain and red segments, left to right.
///
/// Spans do not nest. An opening tag without a closing tag is kept as
/// literal text, and so is a stray closing tag. Empty segments are dropped.
pub fn scan_styled_spans(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find(RED_OPEN) {
        let after_open = &rest[open + RED_OPEN.len()..];
        let Some(close) = after_open.find(RED_CLOSE) else {
            break;
        };
        if open > 0 {
            segments.push(Segment::plain(&rest[..open]));
        }
        if close > 0 {
            segments.push(Segment { text: after_open[..close].to_string(), red: true });
        }
        rest = &after_open[close + RED_CLOSE.len()..];
    }
    if !rest.is_empty() {
        segments.push(Segment::plain(rest));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_span_segments() {
        assert_eq!(
            scan_styled_spans("{red}Priest:{/red} The Lord be with you."),
            vec![
                Segment { text: "Priest:".to_string(), red: true },
                Segment::plain(" The Lord be with you."),
            ]
        );
    }

    #[test]
    fn test_unclosed_span_is_literal() {
        assert_eq!(scan_styled_spans("{red}open"), vec![Segment::plain("{red}open")]);
        assert_eq!(scan_styled_spans("{red}{/red}"), Vec::<Segment>::new());
    }
}
