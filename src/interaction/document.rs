//! Single-threaded event document: listener registry, overlay leases and the
//! active element. Routing produces `Delivery` values; owners of the
//! listeners apply them after the document borrow is released.

use super::focus::FocusOrder;
use super::keymap::tab_direction;
use crate::core::NodeId;
use crate::terminal::KeyEvent;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Pointer activation along an element path, outermost first.
    Click { path: Vec<NodeId> },
    Key(KeyEvent),
    /// Keyboard or programmatic focus of an element.
    Focus { target: NodeId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// A click landed outside the lease's excluded element.
    Dismiss { owner: NodeId },
    /// Capture-phase click on a container; `inner` is the path below it.
    Click {
        container: NodeId,
        inner: Vec<NodeId>,
    },
    /// Bubble-phase click reaching a bubble listener.
    Bubble { element: NodeId },
    Focus { container: NodeId },
    Key { container: NodeId, key: KeyEvent },
}

impl Delivery {
    pub fn target(&self) -> &NodeId {
        match self {
            Self::Dismiss { owner } => owner,
            Self::Click { container, .. } => container,
            Self::Bubble { element } => element,
            Self::Focus { container } => container,
            Self::Key { container, .. } => container,
        }
    }
}

type EntryId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerKind {
    CaptureClick,
    BubbleClick,
    Focus { focusable: bool },
    Keys,
}

#[derive(Debug, Clone)]
struct ListenerEntry {
    id: EntryId,
    kind: ListenerKind,
    element: NodeId,
}

#[derive(Debug, Clone)]
struct OverlayEntry {
    id: EntryId,
    owner: NodeId,
    exclude: NodeId,
}

#[derive(Debug, Default)]
struct DocumentState {
    next_id: EntryId,
    listeners: Vec<ListenerEntry>,
    overlays: Vec<OverlayEntry>,
    active: Option<NodeId>,
}

impl DocumentState {
    fn alloc_id(&mut self) -> EntryId {
        self.next_id += 1;
        self.next_id
    }

    fn has(&self, element: &NodeId, pred: impl Fn(ListenerKind) -> bool) -> bool {
        self.listeners
            .iter()
            .any(|entry| &entry.element == element && pred(entry.kind))
    }

    fn has_focus_listener(&self, element: &NodeId) -> bool {
        self.has(element, |kind| matches!(kind, ListenerKind::Focus { .. }))
    }

    fn focus_order(&self) -> FocusOrder {
        let mut targets: Vec<NodeId> = Vec::new();
        for entry in &self.listeners {
            if matches!(entry.kind, ListenerKind::Focus { focusable: true })
                && !targets.contains(&entry.element)
            {
                targets.push(entry.element.clone());
            }
        }
        FocusOrder::new(targets)
    }

    fn focus(&mut self, target: NodeId, out: &mut Vec<Delivery>) {
        if self.has_focus_listener(&target) {
            out.push(Delivery::Focus {
                container: target.clone(),
            });
        }
        self.active = Some(target);
    }

    fn route_click(&mut self, path: &[NodeId], out: &mut Vec<Delivery>) {
        for overlay in self.overlays.iter().rev() {
            if !path.contains(&overlay.exclude) {
                out.push(Delivery::Dismiss {
                    owner: overlay.owner.clone(),
                });
            }
        }

        self.active = path
            .iter()
            .rev()
            .find(|element| self.has_focus_listener(element))
            .cloned();

        for (idx, element) in path.iter().enumerate() {
            if self.has(element, |kind| kind == ListenerKind::CaptureClick) {
                out.push(Delivery::Click {
                    container: element.clone(),
                    inner: path[idx + 1..].to_vec(),
                });
                return;
            }
        }

        for element in path.iter().rev() {
            let count = self
                .listeners
                .iter()
                .filter(|entry| &entry.element == element && entry.kind == ListenerKind::BubbleClick)
                .count();
            for _ in 0..count {
                out.push(Delivery::Bubble {
                    element: element.clone(),
                });
            }
        }
    }

    fn route_key(&mut self, key: KeyEvent, out: &mut Vec<Delivery>) {
        let listening = self
            .active
            .as_ref()
            .filter(|active| self.has(active, |kind| kind == ListenerKind::Keys));
        if let Some(active) = listening {
            out.push(Delivery::Key {
                container: active.clone(),
                key,
            });
        }

        let Some(forward) = tab_direction(key) else {
            return;
        };
        let order = self.focus_order();
        let next = if forward {
            order.next(self.active.as_ref())
        } else {
            order.prev(self.active.as_ref())
        };
        if let Some(next) = next {
            debug!(target_id = %next, forward, "tab moves focus");
            self.focus(next, out);
        }
    }
}

/// Cheap clonable handle to a shared document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    inner: Rc<RefCell<DocumentState>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self, kind: ListenerKind, element: &NodeId) -> Listener {
        let mut state = self.inner.borrow_mut();
        let id = state.alloc_id();
        state.listeners.push(ListenerEntry {
            id,
            kind,
            element: element.clone(),
        });
        Listener {
            doc: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Capture-phase click listener scoped to `container`.
    pub fn listen_click(&self, container: &NodeId) -> Listener {
        self.register(ListenerKind::CaptureClick, container)
    }

    pub fn listen_bubble_click(&self, element: &NodeId) -> Listener {
        self.register(ListenerKind::BubbleClick, element)
    }

    /// Focus listener. Every focus container takes pointer focus; only
    /// `focusable` ones join the Tab order.
    pub fn listen_focus(&self, container: &NodeId, focusable: bool) -> Listener {
        self.register(ListenerKind::Focus { focusable }, container)
    }

    /// Document-level key listener, fed only while `container` is active.
    pub fn listen_keys(&self, container: &NodeId) -> Listener {
        self.register(ListenerKind::Keys, container)
    }

    pub fn open_overlay(&self, owner: &NodeId, exclude: &NodeId) -> OverlayLease {
        let mut state = self.inner.borrow_mut();
        let id = state.alloc_id();
        state.overlays.push(OverlayEntry {
            id,
            owner: owner.clone(),
            exclude: exclude.clone(),
        });
        OverlayLease {
            doc: Rc::downgrade(&self.inner),
            id,
            owner: owner.clone(),
        }
    }

    pub fn active(&self) -> Option<NodeId> {
        self.inner.borrow().active.clone()
    }

    pub fn set_active(&self, active: Option<NodeId>) {
        self.inner.borrow_mut().active = active;
    }

    pub fn focus_order(&self) -> FocusOrder {
        self.inner.borrow().focus_order()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn listener_count_for(&self, element: &NodeId) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|entry| &entry.element == element)
            .count()
    }

    pub fn overlay_count(&self) -> usize {
        self.inner.borrow().overlays.len()
    }

    /// Routes one event. The borrow ends before the deliveries are returned.
    pub fn dispatch(&self, event: UiEvent) -> Vec<Delivery> {
        let mut out = Vec::new();
        let mut state = self.inner.borrow_mut();
        match event {
            UiEvent::Click { path } => state.route_click(&path, &mut out),
            UiEvent::Key(key) => state.route_key(key, &mut out),
            UiEvent::Focus { target } => state.focus(target, &mut out),
        }
        out
    }
}

/// Registration guard; dropping it removes the listener.
#[derive(Debug)]
pub struct Listener {
    doc: Weak<RefCell<DocumentState>>,
    id: EntryId,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let Some(inner) = self.doc.upgrade() else {
            return;
        };
        match inner.try_borrow_mut() {
            Ok(mut state) => state.listeners.retain(|entry| entry.id != self.id),
            Err(_) => warn!(listener = self.id, "document busy, listener not removed"),
        };
    }
}

/// Guards owned by one field.
#[derive(Debug, Default)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    pub fn push(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Open overlay. Outside clicks produce `Delivery::Dismiss` for the owner
/// until the lease is dropped.
#[derive(Debug)]
pub struct OverlayLease {
    doc: Weak<RefCell<DocumentState>>,
    id: EntryId,
    owner: NodeId,
}

impl OverlayLease {
    pub fn owner(&self) -> &NodeId {
        &self.owner
    }
}

impl Drop for OverlayLease {
    fn drop(&mut self) {
        let Some(inner) = self.doc.upgrade() else {
            return;
        };
        match inner.try_borrow_mut() {
            Ok(mut state) => state.overlays.retain(|entry| entry.id != self.id),
            Err(_) => warn!(owner = %self.owner, "document busy, overlay not released"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{Delivery, Document, UiEvent};
    use crate::core::{NodeId, path};
    use crate::terminal::{KeyCode, KeyEvent};

    fn id(value: &str) -> NodeId {
        NodeId::new(value)
    }

    #[test]
    fn capture_listener_stops_bubble_listeners() {
        let doc = Document::new();
        let _row = doc.listen_bubble_click(&id("row"));
        let _field = doc.listen_click(&id("title"));

        let out = doc.dispatch(UiEvent::Click {
            path: path(["row", "title", "input"]),
        });
        assert_eq!(
            out,
            vec![Delivery::Click {
                container: id("title"),
                inner: vec![id("input")],
            }]
        );

        let out = doc.dispatch(UiEvent::Click {
            path: path(["row", "gap"]),
        });
        assert_eq!(out, vec![Delivery::Bubble { element: id("row") }]);
    }

    #[test]
    fn outermost_capture_listener_wins() {
        let doc = Document::new();
        let _outer = doc.listen_click(&id("outer"));
        let _inner = doc.listen_click(&id("inner"));
        let out = doc.dispatch(UiEvent::Click {
            path: path(["outer", "inner"]),
        });
        assert_eq!(out[0].target(), &id("outer"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn dropping_guards_deregisters() {
        let doc = Document::new();
        let click = doc.listen_click(&id("a"));
        let keys = doc.listen_keys(&id("a"));
        assert_eq!(doc.listener_count_for(&id("a")), 2);
        drop(click);
        drop(keys);
        assert_eq!(doc.listener_count(), 0);

        let lease = doc.open_overlay(&id("a"), &id("a"));
        assert_eq!(doc.overlay_count(), 1);
        drop(lease);
        assert_eq!(doc.overlay_count(), 0);
    }

    #[test]
    fn guard_outliving_document_is_inert() {
        let doc = Document::new();
        let guard = doc.listen_keys(&id("a"));
        drop(doc);
        drop(guard);
    }

    #[test]
    fn outside_click_dismisses_overlay_first() {
        let doc = Document::new();
        let _a = doc.listen_click(&id("a"));
        let _b = doc.listen_click(&id("b"));
        let _lease = doc.open_overlay(&id("a"), &id("a"));

        let inside = doc.dispatch(UiEvent::Click {
            path: path(["a", "option:1"]),
        });
        assert!(!inside.iter().any(|d| matches!(d, Delivery::Dismiss { .. })));

        let outside = doc.dispatch(UiEvent::Click { path: path(["b"]) });
        assert_eq!(outside[0], Delivery::Dismiss { owner: id("a") });
        assert_eq!(outside[1].target(), &id("b"));
    }

    #[test]
    fn keys_reach_only_the_active_container() {
        let doc = Document::new();
        let _a = doc.listen_keys(&id("a"));
        let _b = doc.listen_keys(&id("b"));
        assert!(doc.dispatch(UiEvent::Key(KeyEvent::char('x'))).is_empty());

        doc.set_active(Some(id("b")));
        assert_eq!(
            doc.dispatch(UiEvent::Key(KeyEvent::char('x'))),
            vec![Delivery::Key {
                container: id("b"),
                key: KeyEvent::char('x'),
            }]
        );
    }

    #[test]
    fn pointer_focus_is_silent_and_tab_focus_delivers() {
        let doc = Document::new();
        let _fa = doc.listen_focus(&id("a"), true);
        let _fb = doc.listen_focus(&id("b"), true);
        let _skip = doc.listen_focus(&id("c"), false);

        let out = doc.dispatch(UiEvent::Click { path: path(["a"]) });
        assert!(out.is_empty());
        assert_eq!(doc.active(), Some(id("a")));

        let out = doc.dispatch(UiEvent::Key(KeyEvent::plain(KeyCode::Tab)));
        assert_eq!(out, vec![Delivery::Focus { container: id("b") }]);
        let out = doc.dispatch(UiEvent::Key(KeyEvent::plain(KeyCode::Tab)));
        assert_eq!(out, vec![Delivery::Focus { container: id("a") }]);

        doc.dispatch(UiEvent::Click { path: path(["row"]) });
        assert_eq!(doc.active(), None);
    }

    #[test]
    fn untabbable_container_still_takes_pointer_focus_and_keys() {
        let doc = Document::new();
        let _fa = doc.listen_focus(&id("a"), true);
        let _fc = doc.listen_focus(&id("c"), false);
        let _kc = doc.listen_keys(&id("c"));

        doc.dispatch(UiEvent::Click { path: path(["row", "c"]) });
        assert_eq!(doc.active(), Some(id("c")));
        assert_eq!(
            doc.dispatch(UiEvent::Key(KeyEvent::char('x'))),
            vec![Delivery::Key {
                container: id("c"),
                key: KeyEvent::char('x'),
            }]
        );
        assert_eq!(doc.focus_order().targets(), &[id("a")]);
    }
}
