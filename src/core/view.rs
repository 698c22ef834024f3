//! Bookmark view state management
//!
//! A view owns three observables (`active`, `label`, `editing`), a private
//! data store, and a link to the [`StatesProvider`] shared with its
//! siblings. Listeners are wired at construction:
//!
//! - writes to `label` go through [`BookmarkView::set_label`]
//! - `active` turning true publishes the view's index to the provider
//! - every provider broadcast deactivates views whose index doesn't match

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use super::{EditState, ExportedView, Items, StatesProvider, ViewData, ViewIndex};
use crate::config::ViewConfig;
use crate::reactive::{Observable, Subscription};

struct ViewInner {
    index: ViewIndex,
    editable: bool,
    is_new: bool,
    template: String,
    active: Observable<bool>,
    label: Observable<String>,
    editing: Observable<bool>,
    stored_label: RefCell<String>,
    items: Observable<Rc<Items>>,
    states: Rc<dyn StatesProvider>,
}

impl ViewInner {
    fn set_label(&self, label: &str) {
        let trimmed = label.trim();
        let resolved = if trimmed.is_empty() {
            let stored = self.stored_label.borrow().clone();
            debug!(index = %self.index, label = %stored, "blank label rejected");
            stored
        } else {
            trimmed.to_string()
        };

        self.label.set(resolved.clone());
        *self.stored_label.borrow_mut() = resolved;
    }

    fn on_activate(&self, active: bool) {
        if active {
            trace!(index = %self.index, "view activated");
            self.states.set_active_index(self.index.clone());
        }
    }

    fn on_active_change(&self, index: Option<&ViewIndex>) {
        if index != Some(&self.index) && self.active.get() {
            debug!(index = %self.index, active = ?index, "deactivating view");
            self.active.set(false);
        }
    }
}

/// A single bookmark in a grid-controls bookmark list
pub struct BookmarkView {
    inner: Rc<ViewInner>,
    _subscriptions: Vec<Subscription>,
}

impl BookmarkView {
    /// Create a view and wire it to the shared states provider
    ///
    /// A view configured as active publishes its index right away.
    pub fn new(config: ViewConfig, states: Rc<dyn StatesProvider>) -> Self {
        let ViewConfig {
            index,
            label,
            active,
            editable,
            editing,
            is_new,
            template,
            data,
        } = config;

        let inner = Rc::new(ViewInner {
            index,
            editable,
            is_new,
            template,
            active: Observable::new(active),
            label: Observable::new(label.clone()),
            editing: Observable::new(editing),
            stored_label: RefCell::new(label),
            items: Observable::new(Rc::new(data.unwrap_or_default())),
            states: Rc::clone(&states),
        });

        let weak = Rc::downgrade(&inner);
        let label_sub = inner.label.subscribe(move |label: &String| {
            if let Some(inner) = weak.upgrade() {
                inner.set_label(label);
            }
        });

        let weak = Rc::downgrade(&inner);
        let active_sub = inner.active.subscribe(move |active: &bool| {
            if let Some(inner) = weak.upgrade() {
                inner.on_activate(*active);
            }
        });

        let weak = Rc::downgrade(&inner);
        let states_sub =
            states.subscribe_active_index(Box::new(move |index: &Option<ViewIndex>| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_active_change(index.as_ref());
                }
            }));

        if inner.active.get() {
            inner.on_activate(true);
        }

        Self {
            inner,
            _subscriptions: vec![label_sub, active_sub, states_sub],
        }
    }

    pub fn index(&self) -> &ViewIndex {
        &self.inner.index
    }

    pub fn is_editable(&self) -> bool {
        self.inner.editable
    }

    pub fn is_new(&self) -> bool {
        self.inner.is_new
    }

    pub fn template(&self) -> &str {
        &self.inner.template
    }

    /// Observable `active` flag, for binding
    pub fn active(&self) -> &Observable<bool> {
        &self.inner.active
    }

    /// Observable display label, for binding
    ///
    /// Writes are trimmed, and blank values restore the stored label.
    pub fn label(&self) -> &Observable<String> {
        &self.inner.label
    }

    /// Observable `editing` flag, for binding
    pub fn editing(&self) -> &Observable<bool> {
        &self.inner.editing
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    pub fn is_editing(&self) -> bool {
        self.inner.editing.get()
    }

    pub fn edit_state(&self) -> EditState {
        EditState::from_editing(self.is_editing())
    }

    /// Last committed label
    pub fn stored_label(&self) -> String {
        self.inner.stored_label.borrow().clone()
    }

    /// Snapshot of the internal store
    pub fn data(&self) -> ViewData {
        ViewData {
            label: self.stored_label(),
            items: self.inner.items.get(),
        }
    }

    /// Copy of the current payload
    pub fn get_data(&self) -> Items {
        self.inner.items.with(|items| (**items).clone())
    }

    /// Replace the payload with a copy of `data`
    ///
    /// Ignored when the view is not editable.
    pub fn set_data(&self, data: &Items) -> &Self {
        if self.inner.editable {
            self.inner.items.set(Rc::new(data.clone()));
        } else {
            debug!(index = %self.inner.index, "set_data ignored on read-only view");
        }
        self
    }

    /// Listen for payload replacements
    pub fn on_data_change(&self, callback: impl Fn(&Items) + 'static) -> Subscription {
        self.inner
            .items
            .subscribe(move |items: &Rc<Items>| callback(items))
    }

    /// Resolve and commit a new label
    ///
    /// The label is trimmed; a blank result falls back to the stored label.
    /// Both the observable and the stored label end up with the resolved
    /// value.
    pub fn set_label(&self, label: &str) -> &Self {
        self.inner.set_label(label);
        self
    }

    pub fn start_edit(&self) -> &Self {
        self.inner.editing.set(true);
        self
    }

    pub fn end_edit(&self) -> &Self {
        self.inner.editing.set(false);
        self
    }

    pub fn activate(&self) -> &Self {
        self.inner.active.set(true);
        self
    }

    pub fn deactivate(&self) -> &Self {
        self.inner.active.set(false);
        self
    }

    /// Export index, current label and the payload for persistence
    ///
    /// `data` shares the live payload rather than copying it. It is
    /// immutable, and a later `set_data` replaces it instead of mutating it.
    pub fn export_view(&self) -> ExportedView {
        ExportedView {
            index: self.inner.index.clone(),
            label: self.inner.label.get(),
            data: self.inner.items.get(),
        }
    }

    /// Register a consumer for every change of `active`
    pub fn export_active(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        self.inner
            .active
            .subscribe(move |active: &bool| callback(*active))
    }

    /// Reaction to this view's `active` flag changing
    pub fn on_activate(&self, active: bool) {
        self.inner.on_activate(active);
    }

    /// Reaction to the shared active index changing
    pub fn on_active_change(&self, index: Option<&ViewIndex>) {
        self.inner.on_active_change(index);
    }
}

impl std::fmt::Debug for BookmarkView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmarkView")
            .field("index", &self.inner.index)
            .field("active", &self.inner.active.get())
            .field("label", &self.inner.label.get())
            .field("editing", &self.inner.editing.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SharedStates;
    use serde_json::json;
    use std::cell::Cell;

    fn items(value: serde_json::Value) -> Items {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn create_test_view(index: &str, states: &Rc<SharedStates>) -> BookmarkView {
        let states: Rc<dyn StatesProvider> = states.clone();
        BookmarkView::new(ViewConfig::new(index).with_label("Saved"), states)
    }

    #[test]
    fn test_new_view_defaults() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);

        assert_eq!(view.index(), &ViewIndex::new("default"));
        assert!(!view.is_active());
        assert!(!view.is_editing());
        assert!(view.is_editable());
        assert!(!view.is_new());
        assert_eq!(view.label().get(), "Saved");
        assert_eq!(view.stored_label(), "Saved");
        assert!(view.get_data().is_empty());
        assert_eq!(states.active_index(), None);
    }

    #[test]
    fn test_new_view_seeds_items_from_config() {
        let states: Rc<dyn StatesProvider> = Rc::new(SharedStates::new());
        let config = ViewConfig::new("default").with_items(items(json!({ "a": 1 })));
        let view = BookmarkView::new(config, states);
        assert_eq!(view.get_data(), items(json!({ "a": 1 })));
    }

    #[test]
    fn test_active_config_publishes_index() {
        let states = Rc::new(SharedStates::new());
        let provider: Rc<dyn StatesProvider> = states.clone();
        let view = BookmarkView::new(ViewConfig::new("current").active(true), provider);

        assert!(view.is_active());
        assert_eq!(states.active_index(), Some(ViewIndex::new("current")));
    }

    #[test]
    fn test_set_label_trims() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);

        view.set_label("  Foo  ");
        assert_eq!(view.label().get(), "Foo");
        assert_eq!(view.stored_label(), "Foo");
    }

    #[test]
    fn test_set_label_blank_falls_back() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);

        view.set_label("");
        assert_eq!(view.stored_label(), "Saved");
        view.set_label("   ");
        assert_eq!(view.stored_label(), "Saved");
        assert_eq!(view.label().get(), "Saved");
    }

    #[test]
    fn test_bound_label_write_is_validated() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);

        // Typing into a bound input writes the observable directly
        view.label().set("  Renamed ".to_string());
        assert_eq!(view.label().get(), "Renamed");
        assert_eq!(view.stored_label(), "Renamed");

        view.label().set("    ".to_string());
        assert_eq!(view.label().get(), "Renamed");
        assert_eq!(view.stored_label(), "Renamed");
    }

    #[test]
    fn test_blank_label_with_empty_stored_label() {
        let states: Rc<dyn StatesProvider> = Rc::new(SharedStates::new());
        let view = BookmarkView::new(ViewConfig::new("new"), states);

        view.set_label("   ");
        assert_eq!(view.label().get(), "");
        assert_eq!(view.stored_label(), "");
    }

    #[test]
    fn test_edit_toggle() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);

        assert_eq!(view.edit_state(), EditState::Idle);
        view.start_edit();
        assert!(view.is_editing());
        assert_eq!(view.edit_state(), EditState::Editing);
        view.end_edit();
        assert!(!view.is_editing());
        assert_eq!(view.edit_state(), EditState::Idle);
    }

    #[test]
    fn test_get_data_returns_copy() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);

        view.set_data(&items(json!({ "a": 1 })));
        let mut copy = view.get_data();
        copy.insert("a".to_string(), json!(2));

        assert_eq!(view.get_data(), items(json!({ "a": 1 })));
    }

    #[test]
    fn test_set_data_copies_input() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);

        let mut payload = items(json!({ "a": 1 }));
        view.set_data(&payload);
        payload.insert("b".to_string(), json!(true));

        assert_eq!(view.get_data(), items(json!({ "a": 1 })));
    }

    #[test]
    fn test_set_data_ignored_when_not_editable() {
        let states: Rc<dyn StatesProvider> = Rc::new(SharedStates::new());
        let config = ViewConfig::new("default")
            .with_items(items(json!({ "a": 1 })))
            .editable(false);
        let view = BookmarkView::new(config, states);

        view.set_data(&items(json!({ "a": 2 })));
        assert_eq!(view.get_data(), items(json!({ "a": 1 })));
    }

    #[test]
    fn test_on_data_change_fires_on_set_data() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = view.on_data_change(move |items| {
            assert_eq!(items["a"], json!(1));
            counter.set(counter.get() + 1);
        });

        view.set_data(&items(json!({ "a": 1 })));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_export_view_shape() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);
        view.set_data(&items(json!({ "columns": {} })));

        let exported = view.export_view();
        assert_eq!(exported.index, ViewIndex::new("default"));
        assert_eq!(exported.label, "Saved");
        assert!(Rc::ptr_eq(&exported.data, &view.data().items));
    }

    #[test]
    fn test_export_survives_later_set_data() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);
        view.set_data(&items(json!({ "a": 1 })));

        let exported = view.export_view();
        view.set_data(&items(json!({ "a": 2 })));

        assert_eq!(*exported.data, items(json!({ "a": 1 })));
        assert_eq!(view.get_data(), items(json!({ "a": 2 })));
    }

    #[test]
    fn test_activation_is_exclusive() {
        let states = Rc::new(SharedStates::new());
        let first = create_test_view("first", &states);
        let second = create_test_view("second", &states);

        first.activate();
        assert!(first.is_active());
        assert!(!second.is_active());

        second.activate();
        assert!(!first.is_active());
        assert!(second.is_active());
        assert_eq!(states.active_index(), Some(ViewIndex::new("second")));
    }

    #[test]
    fn test_deactivate_leaves_shared_index() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);

        view.activate();
        view.deactivate();

        assert!(!view.is_active());
        assert_eq!(states.active_index(), Some(ViewIndex::new("default")));
    }

    #[test]
    fn test_on_active_change_matching_index_keeps_active() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);
        view.activate();

        view.on_active_change(Some(&ViewIndex::new("default")));
        assert!(view.is_active());

        view.on_active_change(None);
        assert!(!view.is_active());
    }

    #[test]
    fn test_export_active_receives_changes() {
        let states = Rc::new(SharedStates::new());
        let first = create_test_view("first", &states);
        let second = create_test_view("second", &states);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let _sub = first.export_active(move |active| log.borrow_mut().push(active));

        first.activate();
        second.activate();

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_dropped_view_stops_listening() {
        let states = Rc::new(SharedStates::new());
        let view = create_test_view("default", &states);
        drop(view);

        let other = create_test_view("other", &states);
        other.activate();
        assert!(other.is_active());
    }
}
