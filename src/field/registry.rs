//! Static type dispatch: formatter, editor selector and hints per `TypeTag`.

use crate::core::descriptor::OptionSet;
use crate::core::type_tag::TypeTag;
use crate::core::value::Value;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;
use crate::widgets::date::{DateEditor, format_display, parse_date_value};
use crate::widgets::json::JsonEditor;
use crate::widgets::select::SelectEditor;
use crate::widgets::static_view::StaticView;
use crate::widgets::text::TextEditor;
use crate::widgets::traits::{DrawOutput, Editor, EditorSeed};
use tracing::{debug, warn};

pub const SELECT_PLACEHOLDER: &str = "Select an option";

/// Read-only rendering of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRepr {
    /// Nothing to show (absent value).
    Empty,
    Text(String),
    /// One tagged chip per selected element.
    Chips(Vec<String>),
    Placeholder(&'static str),
}

impl DisplayRepr {
    fn text_or_empty(text: String) -> Self {
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Text(text)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Plain text form; chips are separated by a single space.
    pub fn text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Chips(chips) => chips.join(" "),
            Self::Placeholder(text) => (*text).to_string(),
        }
    }

    pub fn to_line(&self, theme: &Theme) -> SpanLine {
        match self {
            Self::Empty => Vec::new(),
            Self::Text(text) => vec![Span::new(text.clone()).no_wrap()],
            Self::Chips(chips) => {
                let mut line = Vec::with_capacity(chips.len() * 2);
                for (idx, chip) in chips.iter().enumerate() {
                    if idx > 0 {
                        line.push(Span::new(" ").no_wrap());
                    }
                    line.push(Span::styled(chip.clone(), theme.chip).no_wrap());
                }
                line
            }
            Self::Placeholder(text) => vec![Span::styled(*text, theme.placeholder).no_wrap()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeHints {
    /// False for types that apply changes straight from an always-visible
    /// control or never change at all.
    pub has_edit_state: bool,
    /// Display stays visible under the open editor.
    pub display_while_editing: bool,
    /// Free-text editor; dismissing it validates the typed value when the
    /// field validates on blur.
    pub text_like: bool,
}

pub type Formatter = fn(&Value, &OptionSet) -> DisplayRepr;
pub type EditorSelector = fn(&EditorSeed<'_>) -> Option<Box<dyn Editor>>;

pub struct TypeSpec {
    pub name: &'static str,
    pub format: Formatter,
    pub editor: EditorSelector,
    pub hints: TypeHints,
}

const TEXT_HINTS: TypeHints = TypeHints {
    has_edit_state: true,
    display_while_editing: false,
    text_like: true,
};

const OVERLAY_HINTS: TypeHints = TypeHints {
    has_edit_state: true,
    display_while_editing: true,
    text_like: false,
};

const NO_EDIT_HINTS: TypeHints = TypeHints {
    has_edit_state: false,
    display_while_editing: false,
    text_like: false,
};

static TEXT: TypeSpec = TypeSpec {
    name: "text",
    format: format_plain,
    editor: text_editor,
    hints: TEXT_HINTS,
};

static NUMBER: TypeSpec = TypeSpec {
    name: "number",
    format: format_plain,
    editor: text_editor,
    hints: TEXT_HINTS,
};

static PASSWORD: TypeSpec = TypeSpec {
    name: "password",
    format: format_password,
    editor: text_editor,
    hints: TEXT_HINTS,
};

static EMAIL: TypeSpec = TypeSpec {
    name: "email",
    format: format_plain,
    editor: text_editor,
    hints: TEXT_HINTS,
};

static URL: TypeSpec = TypeSpec {
    name: "url",
    format: format_plain,
    editor: text_editor,
    hints: TEXT_HINTS,
};

static CSV: TypeSpec = TypeSpec {
    name: "csv",
    format: format_csv,
    editor: text_editor,
    hints: TEXT_HINTS,
};

static SELECT: TypeSpec = TypeSpec {
    name: "select",
    format: format_select,
    editor: select_editor,
    hints: OVERLAY_HINTS,
};

static DATE: TypeSpec = TypeSpec {
    name: "date",
    format: format_date,
    editor: date_editor,
    hints: OVERLAY_HINTS,
};

static RELATION: TypeSpec = TypeSpec {
    name: "relation",
    format: format_relation,
    editor: select_editor,
    hints: OVERLAY_HINTS,
};

static JSON: TypeSpec = TypeSpec {
    name: "json",
    format: format_json,
    editor: json_editor,
    hints: TEXT_HINTS,
};

static BOOL: TypeSpec = TypeSpec {
    name: "bool",
    format: format_bool,
    editor: no_editor,
    hints: NO_EDIT_HINTS,
};

static CREATOR: TypeSpec = TypeSpec {
    name: "creator",
    format: format_plain,
    editor: creator_editor,
    hints: NO_EDIT_HINTS,
};

pub struct TypeRegistry;

impl TypeRegistry {
    pub fn lookup(tag: &TypeTag) -> Option<&'static TypeSpec> {
        match tag {
            TypeTag::Text => Some(&TEXT),
            TypeTag::Number => Some(&NUMBER),
            TypeTag::Password => Some(&PASSWORD),
            TypeTag::Email => Some(&EMAIL),
            TypeTag::Url => Some(&URL),
            TypeTag::Csv => Some(&CSV),
            TypeTag::Select => Some(&SELECT),
            TypeTag::Date => Some(&DATE),
            TypeTag::Relation => Some(&RELATION),
            TypeTag::Json => Some(&JSON),
            TypeTag::Bool => Some(&BOOL),
            TypeTag::Creator => Some(&CREATOR),
            TypeTag::Unknown(_) => None,
        }
    }

    /// Like `lookup`, logging unrecognized tags.
    pub fn resolve(tag: &TypeTag) -> Option<&'static TypeSpec> {
        let spec = Self::lookup(tag);
        if spec.is_none() {
            warn!(type_tag = %tag, "unrecognized field type, rendering nothing");
        }
        spec
    }

    pub fn format(tag: &TypeTag, value: &Value, options: &OptionSet) -> DisplayRepr {
        Self::lookup(tag)
            .map(|spec| (spec.format)(value, options))
            .unwrap_or(DisplayRepr::Empty)
    }

    pub fn select_editor(seed: &EditorSeed<'_>) -> Option<Box<dyn Editor>> {
        Self::lookup(seed.type_tag).and_then(|spec| (spec.editor)(seed))
    }

    pub fn hints(tag: &TypeTag) -> TypeHints {
        Self::lookup(tag).map(|spec| spec.hints).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Formatters
// ---------------------------------------------------------------------------

fn format_plain(value: &Value, _options: &OptionSet) -> DisplayRepr {
    DisplayRepr::text_or_empty(value.to_string())
}

fn format_password(value: &Value, _options: &OptionSet) -> DisplayRepr {
    let len = value.to_string().chars().count();
    DisplayRepr::text_or_empty("*".repeat(len))
}

fn format_csv(value: &Value, options: &OptionSet) -> DisplayRepr {
    match value {
        Value::List(items) => DisplayRepr::text_or_empty(
            items
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => format_plain(other, options),
    }
}

fn format_select(value: &Value, options: &OptionSet) -> DisplayRepr {
    match value {
        Value::List(items) if items.is_empty() => DisplayRepr::Placeholder(SELECT_PLACEHOLDER),
        Value::List(items) => DisplayRepr::Chips(
            items
                .iter()
                .map(|item| options.display_label(item))
                .collect(),
        ),
        other => format_relation(other, options),
    }
}

fn format_relation(value: &Value, options: &OptionSet) -> DisplayRepr {
    match value {
        Value::None => DisplayRepr::Empty,
        Value::List(items) => DisplayRepr::text_or_empty(
            items
                .iter()
                .map(|item| options.display_label(item))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => DisplayRepr::text_or_empty(options.display_label(other)),
    }
}

fn format_date(value: &Value, options: &OptionSet) -> DisplayRepr {
    if value.is_empty() {
        return DisplayRepr::Empty;
    }
    match parse_date_value(value) {
        Some(date) => DisplayRepr::Text(format_display(date)),
        None => {
            debug!(value = %value, "date value did not parse, showing raw text");
            format_plain(value, options)
        }
    }
}

fn format_json(value: &Value, _options: &OptionSet) -> DisplayRepr {
    if value.is_none() {
        return DisplayRepr::Empty;
    }
    DisplayRepr::Text(value.to_json_string())
}

fn format_bool(_value: &Value, _options: &OptionSet) -> DisplayRepr {
    DisplayRepr::Empty
}

// ---------------------------------------------------------------------------
// Editor selectors
// ---------------------------------------------------------------------------

fn text_editor(seed: &EditorSeed<'_>) -> Option<Box<dyn Editor>> {
    Some(Box::new(TextEditor::from_seed(seed)))
}

fn select_editor(seed: &EditorSeed<'_>) -> Option<Box<dyn Editor>> {
    Some(Box::new(SelectEditor::from_seed(seed)))
}

fn date_editor(seed: &EditorSeed<'_>) -> Option<Box<dyn Editor>> {
    Some(Box::new(DateEditor::from_seed(seed)))
}

fn json_editor(seed: &EditorSeed<'_>) -> Option<Box<dyn Editor>> {
    Some(Box::new(JsonEditor::from_seed(seed)))
}

fn no_editor(_seed: &EditorSeed<'_>) -> Option<Box<dyn Editor>> {
    None
}

fn creator_editor(seed: &EditorSeed<'_>) -> Option<Box<dyn Editor>> {
    Some(Box::new(StaticView::new(seed.value.clone(), render_creator)))
}

fn render_creator(value: &Value) -> DrawOutput {
    let line = format_plain(value, &OptionSet::default()).to_line(&Theme::default());
    DrawOutput { lines: vec![line] }
}
