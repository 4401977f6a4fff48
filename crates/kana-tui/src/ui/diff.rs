//! Highlighted diff text
//!
//! Maps [`StyledText`] spans to ratatui spans.

use kana_app::{Highlight, StyledText};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Style of one highlight class.
pub fn style_for(highlight: Highlight) -> Style {
    match highlight {
        Highlight::Plain => Style::default(),
        Highlight::Deleted => Style::default().fg(Color::Red).add_modifier(Modifier::CROSSED_OUT),
        Highlight::Inserted => Style::default().fg(Color::Green).add_modifier(Modifier::UNDERLINED),
        Highlight::Changed => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    }
}

/// Ratatui spans for `text`, in order.
pub fn spans(text: &StyledText) -> Vec<Span<'static>> {
    text.spans().iter().map(|span| Span::styled(span.text.clone(), style_for(span.style))).collect()
}

#[cfg(test)]
mod tests {
    use kana_app::{EditOp, render_diff};

    use super::*;

    #[test]
    fn spans_keep_text_and_order() {
        let render =
            render_diff(&[EditOp::Change("ne".into(), "na".into()), EditOp::Same("ko".into())], &[
                "ね", "こ",
            ]);

        let spans = spans(&render.expected);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "na");
        assert_eq!(spans[0].style, style_for(Highlight::Changed));
        assert_eq!(spans[1].content, "ko");
        assert_eq!(spans[1].style, Style::default());
    }

    #[test]
    fn highlight_classes_are_distinct() {
        let styles = [Highlight::Plain, Highlight::Deleted, Highlight::Inserted, Highlight::Changed]
            .map(style_for);
        for (i, a) in styles.iter().enumerate() {
            for b in &styles[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
