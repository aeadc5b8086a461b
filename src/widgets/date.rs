use crate::core::value::Value;
use crate::terminal::{CursorPos, KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{DrawOutput, Editor, EditorResult, EditorSeed};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Human readable pattern used for date display (`Mar 5, 2024`).
pub const DISPLAY_FORMAT: &str = "%b %-d, %Y";
/// Storage form emitted by the editor.
pub const VALUE_FORMAT: &str = "%Y-%m-%d";

/// Reads a date from ISO dates, RFC 3339 timestamps, naive date-times or epoch
/// milliseconds.
pub fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Text(text) => parse_date_text(text.trim()),
        Value::Number(millis) if millis.is_finite() => {
            DateTime::from_timestamp_millis(*millis as i64).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, VALUE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
}

pub fn format_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentType {
    Year,
    Month,
    Day,
}

impl SegmentType {
    fn min_value(self) -> u32 {
        match self {
            SegmentType::Year => 1900,
            SegmentType::Month | SegmentType::Day => 1,
        }
    }

    fn max_value(self) -> u32 {
        match self {
            SegmentType::Year => 2100,
            SegmentType::Month => 12,
            SegmentType::Day => 31,
        }
    }

    fn length(self) -> usize {
        match self {
            SegmentType::Year => 4,
            _ => 2,
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            SegmentType::Year => "yyyy",
            SegmentType::Month => "mm",
            SegmentType::Day => "dd",
        }
    }
}

#[derive(Debug, Clone)]
struct DateSegment {
    segment_type: SegmentType,
    value: String,
}

impl DateSegment {
    fn new(segment_type: SegmentType) -> Self {
        Self {
            segment_type,
            value: String::new(),
        }
    }

    fn is_complete(&self) -> bool {
        self.value.len() == self.segment_type.length()
    }

    fn numeric_value(&self) -> Option<u32> {
        self.value.parse().ok()
    }

    fn set(&mut self, number: u32) {
        self.value = format!("{:0width$}", number, width = self.segment_type.length());
    }

    fn step(&mut self, up: bool) {
        let min = self.segment_type.min_value();
        let max = self.segment_type.max_value();
        let next = match self.numeric_value() {
            None => min,
            Some(current) if up && current >= max => min,
            Some(current) if up => current.max(min - 1) + 1,
            Some(current) if current <= min => max,
            Some(current) => (current - 1).min(max),
        };
        self.set(next);
    }

    fn insert_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() {
            return false;
        }
        if self.value.len() >= self.segment_type.length() {
            self.value.clear();
        }
        self.value.push(digit);
        if self
            .numeric_value()
            .is_some_and(|val| val > self.segment_type.max_value())
        {
            self.value = digit.to_string();
        }
        true
    }

    fn delete_digit(&mut self) -> bool {
        self.value.pop().is_some()
    }

    fn display_string(&self) -> String {
        let len = self.segment_type.length();
        let placeholder = self.segment_type.placeholder();
        if self.value.len() < len {
            format!("{}{}", self.value, &placeholder[self.value.len()..len])
        } else {
            self.value.clone()
        }
    }
}

/// Segmented `yyyy-mm-dd` picker. Enter commits a complete, valid date.
pub struct DateEditor {
    segments: [DateSegment; 3],
    focused: usize,
}

impl DateEditor {
    pub fn new() -> Self {
        Self {
            segments: [
                DateSegment::new(SegmentType::Year),
                DateSegment::new(SegmentType::Month),
                DateSegment::new(SegmentType::Day),
            ],
            focused: 0,
        }
    }

    pub fn from_seed(seed: &EditorSeed<'_>) -> Self {
        let mut editor = Self::new();
        editor.set_value(seed.value.clone());
        editor
    }

    pub fn date(&self) -> Option<NaiveDate> {
        if !self.segments.iter().all(DateSegment::is_complete) {
            return None;
        }
        let year = self.segments[0].numeric_value()? as i32;
        let month = self.segments[1].numeric_value()?;
        let day = self.segments[2].numeric_value()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn focused_segment(&mut self) -> &mut DateSegment {
        &mut self.segments[self.focused]
    }

    fn move_focus(&mut self, forward: bool) -> bool {
        let last = self.segments.len() - 1;
        match (forward, self.focused) {
            (true, idx) if idx < last => self.focused += 1,
            (false, idx) if idx > 0 => self.focused -= 1,
            _ => return false,
        }
        true
    }
}

impl Default for DateEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor for DateEditor {
    fn on_key(&mut self, key: KeyEvent) -> EditorResult {
        match key.code {
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                self.focused_segment().insert_digit(ch);
                if self.segments[self.focused].is_complete() {
                    self.move_focus(true);
                }
                EditorResult::handled()
            }
            KeyCode::Char('-' | '/') => {
                self.move_focus(true);
                EditorResult::handled()
            }
            KeyCode::Backspace => {
                if !self.focused_segment().delete_digit() && self.move_focus(false) {
                    self.focused_segment().delete_digit();
                }
                EditorResult::handled()
            }
            KeyCode::Left => {
                if self.move_focus(false) {
                    return EditorResult::handled();
                }
                EditorResult::ignored()
            }
            KeyCode::Right => {
                if self.move_focus(true) {
                    return EditorResult::handled();
                }
                EditorResult::ignored()
            }
            KeyCode::Up => {
                self.focused_segment().step(true);
                EditorResult::handled()
            }
            KeyCode::Down => {
                self.focused_segment().step(false);
                EditorResult::handled()
            }
            KeyCode::Enter => match self.date() {
                Some(date) => EditorResult::commit(Value::Text(
                    date.format(VALUE_FORMAT).to_string(),
                )),
                None => EditorResult::handled(),
            },
            _ => EditorResult::ignored(),
        }
    }

    fn draw(&self) -> DrawOutput {
        let mut line = Vec::new();
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                line.push(Span::new("-").no_wrap());
            }
            let style = if idx == self.focused {
                Style::new().color(Color::Cyan).bold()
            } else if segment.value.is_empty() {
                Style::new().color(Color::DarkGrey)
            } else {
                Style::default()
            };
            line.push(Span::styled(segment.display_string(), style).no_wrap());
        }
        DrawOutput { lines: vec![line] }
    }

    fn value(&self) -> Value {
        self.date()
            .map(|date| Value::Text(date.format(VALUE_FORMAT).to_string()))
            .unwrap_or_default()
    }

    fn set_value(&mut self, value: Value) {
        let Some(date) = parse_date_value(&value) else {
            return;
        };
        self.segments[0].set(date.year().max(0) as u32);
        self.segments[1].set(date.month());
        self.segments[2].set(date.day());
        self.focused = 0;
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let col = self.segments[..self.focused]
            .iter()
            .map(|segment| segment.segment_type.length() + 1)
            .sum::<usize>();
        Some(CursorPos {
            col: col as u16,
            row: 0,
        })
    }
}
