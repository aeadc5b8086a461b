use field_editor::core::descriptor::{FieldConfig, FieldDescriptor, OptionSet};
use field_editor::core::type_tag::TypeTag;
use field_editor::core::value::Value;
use field_editor::core::{NodeId, path};
use field_editor::field::{DisplayRepr, Field};
use field_editor::interaction::{FieldHost, UiEvent};
use field_editor::terminal::{KeyCode, KeyEvent};
use field_editor::widgets::validators;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const ROW: &str = "record";

fn click(ids: &[&str]) -> UiEvent {
    UiEvent::Click {
        path: path(ids.iter().copied()),
    }
}

fn key(code: KeyCode) -> UiEvent {
    UiEvent::Key(KeyEvent::plain(code))
}

fn typed(ch: char) -> UiEvent {
    UiEvent::Key(KeyEvent::char(ch))
}

fn text(id: &str, value: &str) -> Field {
    Field::new(id, FieldDescriptor::new(TypeTag::Text, value).with_label(id))
}

fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
    let count = Rc::new(Cell::new(0));
    let handle = count.clone();
    (count, move || handle.set(handle.get() + 1))
}

fn display_of(host: &FieldHost, id: &str) -> Option<String> {
    host.field(id).and_then(|field| field.view().display_text())
}

#[test]
fn click_enters_editing_once() {
    let mut host = FieldHost::new();
    host.mount(text("title", "a"));

    host.dispatch(click(&[ROW, "title"]));
    assert!(host.field("title").is_some_and(Field::is_editing));
    host.dispatch(typed('b'));

    host.dispatch(click(&[ROW, "title"]));
    let field = host.field("title").expect("mounted");
    assert!(field.is_editing());
    assert_eq!(field.value(), &Value::from("ab"));
    assert_eq!(host.document().overlay_count(), 1);
}

#[test]
fn displays_follow_type_rules() {
    let mut host = FieldHost::new();
    host.mount(Field::new(
        "secret",
        FieldDescriptor::new(TypeTag::Password, "hunter2"),
    ));
    host.mount(Field::new(
        "tags",
        FieldDescriptor::new(TypeTag::Csv, vec!["a", "b", "c"]),
    ));
    host.mount(Field::new(
        "categories",
        FieldDescriptor::new(TypeTag::Select, Value::List(Vec::new())),
    ));
    host.mount(Field::new(
        "status",
        FieldDescriptor::new(TypeTag::Select, 2)
            .with_options(OptionSet::labeled([(1, "One"), (2, "Two")])),
    ));
    host.mount(Field::new(
        "fallback",
        FieldDescriptor::new(TypeTag::Select, 3)
            .with_options(OptionSet::labeled([(1, "One"), (2, "Two")])),
    ));
    host.mount(Field::new(
        "published",
        FieldDescriptor::new(TypeTag::Date, Value::None),
    ));

    assert_eq!(display_of(&host, "secret").as_deref(), Some("*******"));
    assert_eq!(display_of(&host, "tags").as_deref(), Some("a, b, c"));
    assert_eq!(
        host.field("categories").and_then(|f| f.view().display),
        Some(DisplayRepr::Placeholder("Select an option"))
    );
    assert_eq!(display_of(&host, "status").as_deref(), Some("Two"));
    assert_eq!(display_of(&host, "fallback").as_deref(), Some("3"));
    assert_eq!(
        host.field("published").and_then(|f| f.view().display),
        Some(DisplayRepr::Empty)
    );
}

#[test]
fn escape_keeps_validation_error() {
    let (submits, on_submit) = counter();
    let mut host = FieldHost::new();
    host.mount(
        text("title", "")
            .with_validator(validators::required("Required"))
            .on_submit(on_submit),
    );

    host.dispatch(click(&[ROW, "title"]));
    host.dispatch(key(KeyCode::Enter));
    let field = host.field("title").expect("mounted");
    assert!(field.is_editing());
    assert_eq!(field.error(), "Required");
    assert_eq!(submits.get(), 0);

    host.dispatch(key(KeyCode::Esc));
    let field = host.field("title").expect("mounted");
    assert!(!field.is_editing());
    assert_eq!(field.error(), "Required");
}

#[test]
fn validation_trigger_is_reset_after_validating() {
    let trigger = Rc::new(Cell::new(false));
    let reset = trigger.clone();
    let mut field = text("title", "")
        .with_validator(validators::required("Required"))
        .with_trigger_reset(move |value| reset.set(value));

    trigger.set(true);
    field.sync_validation_trigger(trigger.get());
    assert_eq!(field.error(), "Required");
    assert!(!trigger.get());
}

#[test]
fn click_inside_open_editor_picks_without_bubbling() {
    let (closes, on_close) = counter();
    let mut host = FieldHost::new();
    host.mount(
        Field::new(
            "status",
            FieldDescriptor::new(TypeTag::Select, 1)
                .with_options(OptionSet::labeled([(1, "One"), (2, "Two")])),
        )
        .on_close(on_close),
    );
    let _row = host.document().listen_bubble_click(&NodeId::new(ROW));

    let outcome = host.dispatch(click(&[ROW, "status"]));
    assert!(outcome.bubbled.is_empty());
    assert!(host.field("status").is_some_and(Field::is_editing));

    let outcome = host.dispatch(click(&[ROW, "status", "option:1"]));
    assert!(outcome.bubbled.is_empty());
    let field = host.field("status").expect("mounted");
    assert!(!field.is_editing());
    assert_eq!(field.value(), &Value::from(2));
    assert_eq!(closes.get(), 1);

    let outcome = host.dispatch(click(&[ROW]));
    assert_eq!(outcome.bubbled, vec![NodeId::new(ROW)]);
}

#[test]
fn outside_click_closes_and_fires_on_close() {
    let (closes, on_close) = counter();
    let mut host = FieldHost::new();
    host.mount(text("title", "a").on_close(on_close));
    host.mount(text("slug", "b"));

    host.dispatch(click(&[ROW, "title"]));
    host.dispatch(click(&[ROW, "slug"]));

    assert!(host.field("title").is_some_and(|f| !f.is_editing()));
    assert!(host.field("slug").is_some_and(Field::is_editing));
    assert_eq!(closes.get(), 1);
    assert_eq!(host.document().overlay_count(), 1);
}

#[test]
fn dismiss_runs_blur_validation() {
    let mut host = FieldHost::new();
    host.mount(text("title", "a").with_validator(validators::required("Required")));

    host.dispatch(click(&[ROW, "title"]));
    host.dispatch(key(KeyCode::Backspace));
    host.dispatch(click(&[ROW]));

    let field = host.field("title").expect("mounted");
    assert!(!field.is_editing());
    assert_eq!(field.error(), "Required");
}

#[test]
fn blur_validation_can_be_disabled() {
    let mut host = FieldHost::new();
    host.mount(
        text("title", "a")
            .with_validator(validators::required("Required"))
            .validate_on_blur(false),
    );

    host.dispatch(click(&[ROW, "title"]));
    host.dispatch(key(KeyCode::Backspace));
    host.dispatch(click(&[ROW]));
    assert_eq!(host.field("title").map(Field::error), Some(""));
}

#[test]
fn tab_moves_focus_and_activates_next_field() {
    let mut host = FieldHost::new();
    host.mount(text("title", "a"));
    host.mount(text("slug", "b"));
    host.mount(text("hidden", "c").tab_index(false));

    host.dispatch(click(&[ROW, "title"]));
    host.dispatch(key(KeyCode::Tab));

    assert!(host.field("title").is_some_and(|f| !f.is_editing()));
    assert!(host.field("slug").is_some_and(Field::is_editing));
    assert_eq!(host.document().active(), Some(NodeId::new("slug")));

    host.dispatch(key(KeyCode::Tab));
    assert!(host.field("hidden").is_some_and(|f| !f.is_editing()));
    assert!(host.field("title").is_some_and(Field::is_editing));
}

#[test]
fn keys_reach_only_the_active_field() {
    let mut host = FieldHost::new();
    host.mount(text("title", ""));
    host.mount(text("slug", ""));

    host.dispatch(click(&[ROW, "title"]));
    host.dispatch(typed('x'));

    assert_eq!(host.field("title").map(Field::value), Some(&Value::from("x")));
    assert_eq!(host.field("slug").map(Field::value), Some(&Value::from("")));
}

#[test]
fn enter_on_focused_display_begins_editing() {
    let mut host = FieldHost::new();
    host.mount(text("title", "a"));
    host.document().set_active(Some(NodeId::new("title")));

    host.dispatch(key(KeyCode::Enter));
    assert!(host.field("title").is_some_and(Field::is_editing));
}

#[test]
fn programmatic_focus_activates() {
    let mut host = FieldHost::new();
    host.mount(text("title", "a"));
    host.dispatch(UiEvent::Focus {
        target: NodeId::new("title"),
    });
    assert!(host.field("title").is_some_and(Field::is_editing));
}

#[test]
fn bool_click_changes_then_submits() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (changes, submits) = (log.clone(), log.clone());
    let mut host = FieldHost::new();
    host.mount(
        Field::new("pinned", FieldDescriptor::new(TypeTag::Bool, false))
            .on_change(move |value| changes.borrow_mut().push(format!("change {value}")))
            .on_submit(move || submits.borrow_mut().push("submit".to_string())),
    );

    host.dispatch(click(&[ROW, "pinned"]));
    assert_eq!(*log.borrow(), vec!["change true", "submit"]);
    let field = host.field("pinned").expect("mounted");
    assert!(!field.is_editing());
    assert_eq!(host.document().overlay_count(), 0);
}

#[test]
fn disabled_field_swallows_click_without_editing() {
    let mut host = FieldHost::new();
    host.mount(text("title", "a").disabled(true));
    let _row = host.document().listen_bubble_click(&NodeId::new(ROW));

    let outcome = host.dispatch(click(&[ROW, "title"]));
    assert!(outcome.bubbled.is_empty());
    assert!(host.field("title").is_some_and(|f| !f.is_editing()));
}

#[test]
fn focus_on_mount_opens_editor() {
    let mut host = FieldHost::new();
    host.mount(text("title", "a").focus_on_mount(true));
    assert!(host.field("title").is_some_and(Field::is_editing));
    assert_eq!(host.document().active(), Some(NodeId::new("title")));
}

#[test]
fn unmount_and_drop_leave_no_listeners() {
    let mut host = FieldHost::new();
    host.mount(text("title", "a"));
    host.mount(text("slug", "b"));
    host.dispatch(click(&[ROW, "title"]));
    assert_eq!(host.document().listener_count(), 6);

    let field = host.unmount(&NodeId::new("title")).expect("mounted");
    assert_eq!(host.document().listener_count_for(&NodeId::new("title")), 0);
    assert_eq!(host.document().overlay_count(), 0);
    drop(field);

    let document = host.document().clone();
    drop(host);
    assert_eq!(document.listener_count(), 0);
}

#[test]
fn caller_replaces_descriptor_after_change() {
    let latest = Rc::new(RefCell::new(Value::None));
    let sink = latest.clone();
    let mut host = FieldHost::new();
    host.mount(text("title", "").on_change(move |value| *sink.borrow_mut() = value));

    host.dispatch(click(&[ROW, "title"]));
    host.dispatch(typed('h'));
    let next = FieldDescriptor::new(TypeTag::Text, latest.borrow().clone())
        .with_label("title")
        .with_config(FieldConfig::required());
    if let Some(field) = host.field_mut("title") {
        field.set_descriptor(next);
    }
    host.dispatch(typed('i'));

    let field = host.field("title").expect("mounted");
    assert!(field.is_editing());
    assert_eq!(field.value(), &Value::from("hi"));
    assert!(field.view().label.is_some_and(|label| label.required));
}

#[test]
fn untabbable_field_still_takes_keys_after_click() {
    let mut host = FieldHost::new();
    host.mount(text("title", "x"));
    host.mount(text("hidden", "a").tab_index(false));

    host.dispatch(click(&[ROW, "hidden"]));
    assert_eq!(host.document().active(), Some(NodeId::new("hidden")));
    host.dispatch(typed('b'));
    assert_eq!(host.field("hidden").map(Field::value), Some(&Value::from("ab")));

    host.dispatch(key(KeyCode::Esc));
    assert!(host.field("hidden").is_some_and(|f| !f.is_editing()));
    assert_eq!(
        host.document().focus_order().targets(),
        &[NodeId::new("title")]
    );
}

#[test]
fn descriptor_resend_keeps_unparsed_json() {
    let mut host = FieldHost::new();
    let descriptor = FieldDescriptor::new(TypeTag::Json, vec!["a"]);
    host.mount(Field::new("meta", descriptor.clone()));

    host.dispatch(click(&[ROW, "meta"]));
    host.dispatch(key(KeyCode::End));
    host.dispatch(key(KeyCode::Backspace));
    host.dispatch(typed(','));
    if let Some(field) = host.field_mut("meta") {
        field.set_descriptor(descriptor);
    }
    for ch in "\"b\"]".chars() {
        host.dispatch(typed(ch));
    }

    let field = host.field("meta").expect("mounted");
    assert!(field.is_editing());
    assert_eq!(field.value(), &Value::from(vec!["a", "b"]));
}

#[test]
fn multi_select_keeps_toggles_on_outside_click() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    let mut host = FieldHost::new();
    host.mount(
        Field::new(
            "categories",
            FieldDescriptor::new(TypeTag::Select, Value::List(Vec::new()))
                .with_options(OptionSet::labeled([(1, "One"), (2, "Two")])),
        )
        .on_change(move |value| sink.borrow_mut().push(value)),
    );

    host.dispatch(click(&[ROW, "categories"]));
    host.dispatch(click(&[ROW, "categories", "option:1"]));
    host.dispatch(click(&[ROW]));

    let field = host.field("categories").expect("mounted");
    assert!(!field.is_editing());
    assert_eq!(field.value(), &Value::List(vec![Value::from(2)]));
    assert_eq!(*changes.borrow(), vec![Value::List(vec![Value::from(2)])]);
}

#[test]
fn json_dismissal_runs_blur_validation() {
    let mut host = FieldHost::new();
    host.mount(
        Field::new("meta", FieldDescriptor::new(TypeTag::Json, Value::None))
            .with_validator(validators::required("Required")),
    );

    host.dispatch(click(&[ROW, "meta"]));
    host.dispatch(click(&[ROW]));
    assert_eq!(host.field("meta").map(Field::error), Some("Required"));
}
