use super::registry::DisplayRepr;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;
use crate::widgets::toggle::Toggle;
use crate::widgets::traits::DrawOutput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelView {
    pub text: String,
    pub glyph: &'static str,
    pub has_error: bool,
    pub required: bool,
}

/// Everything a field shows for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldView {
    /// `None` renders the field as a bare cell.
    pub label: Option<LabelView>,
    /// Checkbox state for `bool` columns.
    pub toggle: Option<bool>,
    pub display: Option<DisplayRepr>,
    pub editor: Option<DrawOutput>,
    pub children: Vec<SpanLine>,
    /// Error line; `None` when empty or when the field is inline.
    pub error: Option<String>,
    pub inline: bool,
    pub editing: bool,
    pub focused: bool,
}

impl FieldView {
    pub fn is_cell(&self) -> bool {
        self.label.is_none()
    }

    pub fn display_text(&self) -> Option<String> {
        self.display.as_ref().map(DisplayRepr::text)
    }

    pub fn to_draw_output(&self, theme: &Theme) -> DrawOutput {
        let mut head: SpanLine = Vec::new();
        if let Some(label) = &self.label {
            let glyph_style = if label.has_error {
                theme.glyph_error
            } else {
                theme.glyph
            };
            head.push(Span::styled(format!("{} ", label.glyph), glyph_style).no_wrap());
            head.push(Span::styled(label.text.clone(), theme.label).no_wrap());
            if label.required {
                head.push(Span::styled(" *", theme.required).no_wrap());
            }
            head.push(Span::new(": ").no_wrap());
        }
        if let Some(checked) = self.toggle {
            head.push(Toggle::from_value(&checked.into()).span(self.focused));
        }
        if let Some(display) = &self.display {
            head.extend(display.to_line(theme));
        }

        let mut out = DrawOutput::default();
        if !head.is_empty() {
            out.lines.push(head);
        }
        if let Some(editor) = &self.editor {
            for line in &editor.lines {
                let mut indented = vec![Span::styled("  ", theme.overlay_border).no_wrap()];
                indented.extend(line.iter().cloned());
                out.lines.push(indented);
            }
        }
        out.lines.extend(self.children.iter().cloned());
        if let Some(error) = &self.error {
            out.lines
                .push(vec![Span::styled(format!("✗ {error}"), theme.error).no_wrap()]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldView, LabelView};
    use crate::field::registry::DisplayRepr;
    use crate::ui::span::Span;
    use crate::ui::theme::Theme;

    fn label() -> LabelView {
        LabelView {
            text: "Title".into(),
            glyph: "T",
            has_error: false,
            required: true,
        }
    }

    #[test]
    fn labelled_view_draws_marker_display_and_error() {
        let view = FieldView {
            label: Some(label()),
            display: Some(DisplayRepr::Text("Hello".into())),
            error: Some("Too short".into()),
            children: vec![vec![Span::new("hint")]],
            ..FieldView::default()
        };
        assert_eq!(
            view.to_draw_output(&Theme::default()).text_lines(),
            vec![
                "T Title *: Hello".to_string(),
                "hint".to_string(),
                "✗ Too short".to_string(),
            ]
        );
    }

    #[test]
    fn cell_has_no_label() {
        let view = FieldView {
            toggle: Some(true),
            ..FieldView::default()
        };
        assert!(view.is_cell());
        assert_eq!(
            view.to_draw_output(&Theme::default()).text_lines(),
            vec!["[x]".to_string()]
        );
    }
}
