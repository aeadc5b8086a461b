use field_editor::config::RecordSpec;
use field_editor::core::NodeId;
use field_editor::core::value::Value;
use field_editor::interaction::{FieldHost, Listener, UiEvent};
use field_editor::logging;
use field_editor::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers, Terminal, TerminalEvent};
use field_editor::ui::span::{Span, SpanLine};
use field_editor::ui::style::{Color, Style};
use field_editor::widgets::select::OPTION_PART;
use std::cell::RefCell;
use std::env;
use std::io;
use std::rc::Rc;
use std::time::Duration;
use tracing::info;

const DEFAULT_RECORD: &str = "demos/record.yaml";
const ROW_ID: &str = "record";

/// Screen row ownership, rebuilt every frame.
enum RowTarget {
    Row,
    Field { id: NodeId, editor_line: Option<usize> },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}

fn run() -> io::Result<()> {
    let record_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_RECORD.to_string());
    let record = RecordSpec::load(&record_path).map_err(io::Error::other)?;
    let _log_guard = logging::init(env::temp_dir()).map_err(io::Error::other)?;
    info!(table = %record.table, fields = record.fields.len(), "record loaded");

    let mut terminal = Terminal::new()?;
    terminal.enter()?;
    let result = event_loop(&mut terminal, &record);
    terminal.exit()?;
    result
}

fn event_loop(terminal: &mut Terminal, record: &RecordSpec) -> io::Result<()> {
    let status = Rc::new(RefCell::new(String::from(
        "Tab moves, Enter edits, Esc cancels, Ctrl+C quits",
    )));
    let mut host = FieldHost::new();
    for spec in &record.fields {
        let (on_change, on_submit) = (status.clone(), status.clone());
        let (changed_name, submitted_name) = (spec.name.clone(), spec.name.clone());
        let field = spec
            .to_field()
            .on_change(move |value: Value| {
                *on_change.borrow_mut() = format!("{changed_name} = {value}");
            })
            .on_submit(move || {
                info!(field = %submitted_name, "value committed");
                *on_submit.borrow_mut() = format!("saved {submitted_name}");
            });
        host.mount(field);
    }
    let _row_listener: Listener = host.document().listen_bubble_click(&NodeId::new(ROW_ID));

    loop {
        let (lines, rows, cursor) = layout(&host, &record.table, &status.borrow());
        terminal.render(&lines, cursor)?;

        let event = match terminal.poll_event(Duration::from_millis(100))? {
            TerminalEvent::Key(key) if is_quit(key) => return Ok(()),
            TerminalEvent::Key(key) => UiEvent::Key(key),
            TerminalEvent::Click { row, .. } => UiEvent::Click {
                path: click_path(rows.get(row as usize)),
            },
            TerminalEvent::Resize { .. } | TerminalEvent::Tick => continue,
        };
        let outcome = host.dispatch(event);
        if !outcome.bubbled.is_empty() {
            *status.borrow_mut() = format!("row {} clicked", record.table);
        }
    }
}

fn is_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn click_path(target: Option<&Option<RowTarget>>) -> Vec<NodeId> {
    let mut path = vec![NodeId::new(ROW_ID)];
    if let Some(Some(RowTarget::Field { id, editor_line })) = target {
        path.push(id.clone());
        if let Some(line) = editor_line {
            path.push(NodeId::new(format!("{OPTION_PART}:{line}")));
        }
    }
    path
}

fn layout(
    host: &FieldHost,
    table: &str,
    status: &str,
) -> (Vec<SpanLine>, Vec<Option<RowTarget>>, Option<CursorPos>) {
    let mut lines: Vec<SpanLine> = vec![
        vec![Span::styled(table, Style::new().bold())],
        Vec::new(),
    ];
    let mut rows: Vec<Option<RowTarget>> = vec![Some(RowTarget::Row), None];
    let mut cursor = None;

    for field in host.fields() {
        let view = field.view();
        let output = field.draw();
        let editor_len = view.editor.as_ref().map_or(0, |editor| editor.lines.len());
        let tail = view.children.len() + usize::from(view.error.is_some());
        let editor_start = output.lines.len().saturating_sub(editor_len + tail);
        let top = lines.len();

        if let Some(pos) = field.cursor_pos() {
            cursor = Some(CursorPos {
                col: pos.col + 2,
                row: (top + editor_start) as u16 + pos.row,
            });
        }
        for (idx, line) in output.lines.into_iter().enumerate() {
            let editor_line = (editor_start..editor_start + editor_len)
                .contains(&idx)
                .then(|| idx - editor_start);
            rows.push(Some(RowTarget::Field {
                id: field.id().clone(),
                editor_line,
            }));
            lines.push(line);
        }
    }

    lines.push(Vec::new());
    rows.push(None);
    lines.push(vec![Span::styled(status, Style::new().color(Color::DarkGrey))]);
    rows.push(Some(RowTarget::Row));
    (lines, rows, cursor)
}
