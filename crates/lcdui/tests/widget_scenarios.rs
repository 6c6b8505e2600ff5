//! End-to-end scenarios for widget models driven through a recording backend.

use std::sync::Arc;

use lcdui::prelude::*;
use parking_lot::Mutex;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// A backend binding that records notifications and, on selection changes,
/// reads the selected index back from the model it is attached to.
#[derive(Default)]
struct Backend {
    base: BindingBase,
    log: Mutex<Vec<String>>,
    observed: Mutex<Vec<Option<usize>>>,
}

impl Backend {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    fn count(&self, entry: &str) -> usize {
        self.log.lock().iter().filter(|e| *e == entry).count()
    }

    fn push(&self, entry: impl Into<String>) {
        self.log.lock().push(entry.into());
    }
}

impl Binding for Backend {
    fn binding_base(&self) -> &BindingBase {
        &self.base
    }

    fn on_attach(&self) {
        self.push("attach");
    }

    fn on_detach(&self) {
        self.push("detach");
    }
}

impl DisplayableBinding for Backend {
    fn on_command_action(&self, command: &Arc<Command>) {
        self.push(format!("action:{}", command.label()));
    }
}

impl ScreenBinding for Backend {
    fn on_title_changed(&self, _old: Option<&str>, new: Option<&str>) {
        self.push(format!("title:{}", new.unwrap_or("")));
    }
}

impl ItemBinding for Backend {}

impl ChoiceBinding for Backend {
    fn on_item_added(&self, index: usize, text: &str, _image: Option<&Image>) {
        self.push(format!("added:{index}:{text}"));
    }

    fn on_item_removed(&self, index: usize, text: &str, _image: Option<&Image>) {
        self.push(format!("removed:{index}:{text}"));
    }

    fn on_item_selection_change(&self, change: &SelectionChange) {
        self.push(format!("selection:{}:{}", change.index, change.selected));
        let current = self
            .base
            .view::<List>()
            .map(|list| list.selected_index())
            .or_else(|_| self.base.view::<ChoiceGroup>().map(|g| g.selected_index()));
        if let Ok(current) = current {
            self.observed.lock().push(current);
        }
    }
}

impl ListBinding for Backend {}

impl ChoiceGroupBinding for Backend {}

impl FormBinding for Backend {
    fn on_item_state_changed(&self, index: usize, _item: &Arc<dyn FormItem>) {
        self.push(format!("state:{index}"));
    }
}

fn exclusive_group(texts: &[&str]) -> Arc<ChoiceGroup> {
    ChoiceGroup::with_elements(None, ChoiceType::Exclusive, texts, None).unwrap()
}

#[test]
fn test_reattach_detaches_previous_binding_once() {
    setup();
    let list = List::new(None, ChoiceType::Exclusive);
    let first = Backend::new();
    let second = Backend::new();

    list.attach_binding(Some(first.clone()));
    list.attach_binding(Some(second.clone()));
    list.append("a", None).unwrap();

    assert_eq!(first.log(), vec!["attach", "detach"]);
    assert!(!first.base.is_attached());
    assert_eq!(second.log(), vec!["attach", "added:0:a", "selection:0:true"]);
}

#[test]
fn test_attaching_same_binding_twice_is_silent() {
    setup();
    let list = List::new(None, ChoiceType::Multiple);
    let backend = Backend::new();
    list.attach_binding(Some(backend.clone()));
    list.attach_binding(Some(backend.clone()));
    assert_eq!(backend.log(), vec!["attach"]);
}

#[test]
fn test_binding_moves_between_models() {
    setup();
    let a = List::new(Some("A"), ChoiceType::Exclusive);
    let b = List::new(Some("B"), ChoiceType::Exclusive);
    let backend = Backend::new();

    a.attach_binding(Some(backend.clone()));
    b.attach_binding(Some(backend.clone()));

    assert_eq!(backend.base.attached_model(), Some(b.model_id()));
    let seen = backend.base.view::<List>().unwrap();
    assert!(Arc::ptr_eq(&seen, &b));

    a.append("only-a", None).unwrap();
    b.append("only-b", None).unwrap();
    assert_eq!(backend.count("added:0:only-a"), 0);
    assert_eq!(backend.count("added:0:only-b"), 1);
    assert_eq!(backend.count("detach"), 1);
}

#[test]
fn test_double_detach_is_noop() {
    setup();
    let group = exclusive_group(&["a"]);
    let backend = Backend::new();
    group.attach_binding(Some(backend.clone()));

    group.attach_binding(None);
    group.attach_binding(None);
    backend.base.detach();

    assert_eq!(backend.log(), vec!["attach", "detach"]);
    assert!(matches!(
        ChoiceGroupBinding::choice_type(&*backend),
        Err(Error::Binding(BindingError::Detached))
    ));
}

#[test]
fn test_dropping_model_detaches_binding() {
    setup();
    let backend = Backend::new();
    {
        let list = List::with_elements(None, ChoiceType::Implicit, &["a"], None).unwrap();
        list.attach_binding(Some(backend.clone()));
    }
    assert!(!backend.base.is_attached());
    assert_eq!(backend.log(), vec!["attach", "detach"]);
}

#[test]
fn test_exclusive_invariant_holds_across_mutations() {
    setup();
    let group = ChoiceGroup::new(None, ChoiceType::Exclusive).unwrap();
    let check = |group: &ChoiceGroup| {
        let expected = usize::from(!group.is_empty());
        assert_eq!(group.selected_count(), expected);
        assert_eq!(group.selected_index().is_some(), !group.is_empty());
    };

    for text in ["a", "b", "c", "d"] {
        group.append(text, None).unwrap();
        check(&group);
    }
    group.insert(0, "z", None).unwrap();
    check(&group);
    group.set_selected_index(3, true).unwrap();
    check(&group);
    group.delete(3).unwrap();
    check(&group);
    group.set(0, "y", None).unwrap();
    check(&group);
    while !group.is_empty() {
        group.delete(group.len() - 1).unwrap();
        check(&group);
    }
    group.append("again", None).unwrap();
    check(&group);
    group.delete_all();
    check(&group);
}

#[test]
fn test_append_round_trip() {
    setup();
    let group = ChoiceGroup::new(None, ChoiceType::Exclusive).unwrap();
    assert_eq!(group.append("a", None).unwrap(), 0);
    assert_eq!(group.len(), 1);
    assert_eq!(group.string(0).unwrap(), "a");
    assert_eq!(group.image(0).unwrap(), None);
    assert!(group.is_selected(0).unwrap());
}

#[test]
fn test_set_selected_flags_first_true_wins() {
    setup();
    let group = exclusive_group(&["a", "b", "c"]);
    group.set_selected_flags(&[false, true, true]).unwrap();
    assert_eq!(group.selected_index(), Some(1));

    group.set_selected_flags(&[false, false, false]).unwrap();
    assert_eq!(group.selected_index(), Some(0));
}

#[test]
fn test_deleting_selected_head_selects_successor() {
    setup();
    let group = exclusive_group(&["x", "y"]);
    let backend = Backend::new();
    group.attach_binding(Some(backend.clone()));

    group.delete(0).unwrap();

    assert_eq!(group.string(0).unwrap(), "y");
    assert_eq!(group.selected_index(), Some(0));
    assert_eq!(
        backend.log(),
        vec!["attach", "removed:0:x", "selection:0:true"]
    );
}

#[test]
fn test_exclusive_deselect_is_noop() {
    setup();
    let group = exclusive_group(&["a", "b"]);
    let backend = Backend::new();
    group.attach_binding(Some(backend.clone()));

    group.set_selected_index(1, false).unwrap();

    assert_eq!(group.selected_flags(), vec![true, false]);
    assert_eq!(backend.log(), vec!["attach"]);
}

#[test]
fn test_binding_reads_model_from_notification() {
    setup();
    let list = List::with_elements(None, ChoiceType::Exclusive, &["a", "b", "c"], None).unwrap();
    let backend = Backend::new();
    list.attach_binding(Some(backend.clone()));

    list.set_selected_index(2, true).unwrap();

    // Notifications run after the model is updated and unlocked.
    assert_eq!(*backend.observed.lock(), vec![Some(2), Some(2)]);
}

#[test]
fn test_implicit_menu_delivers_select_command() {
    setup();
    let menu = List::with_elements(Some("Menu"), ChoiceType::Implicit, &["Play", "Quit"], None)
        .unwrap();
    let picked = Arc::new(Mutex::new(Vec::new()));
    let sink = picked.clone();
    menu.screen()
        .displayable()
        .set_command_listener(Some(Arc::new(
            move |command: &Arc<Command>, _source: &Displayable| {
                sink.lock().push(Arc::ptr_eq(command, select_command()));
            },
        )))
        .unwrap();

    let backend = Backend::new();
    menu.attach_binding(Some(backend.clone()));
    ListBinding::select_element(&*backend, 1, true).unwrap();

    assert_eq!(menu.selected_index(), Some(1));
    assert_eq!(*picked.lock(), vec![true]);
    assert_eq!(backend.count("action:"), 1);
}

#[test]
fn test_form_reports_user_changes_of_choice_groups() {
    setup();
    let group = exclusive_group(&["on", "off"]);
    let form = Form::with_items(
        Some("Settings"),
        vec![
            StringItem::new(None, Some("Radio")) as Arc<dyn FormItem>,
            group.clone() as Arc<dyn FormItem>,
        ],
    )
    .unwrap();

    let form_backend = Backend::new();
    form.attach_binding(Some(form_backend.clone()));
    let group_backend = Backend::new();
    group.attach_binding(Some(group_backend.clone()));

    ChoiceGroupBinding::select_element(&*group_backend, 1, true).unwrap();

    assert_eq!(group.selected_index(), Some(1));
    assert_eq!(form_backend.count("state:1"), 1);

    // Programmatic changes are not user changes.
    group.set_selected_index(0, true).unwrap();
    assert_eq!(form_backend.count("state:1"), 1);
}

#[test]
fn test_form_ownership_moves_only_after_release() {
    setup();
    let gauge = Gauge::new(Some("Level"), false, 5, 2).unwrap();
    let first = Form::new(None);
    let second = Form::new(None);

    first.append(gauge.clone()).unwrap();
    assert!(matches!(
        second.append(gauge.clone()),
        Err(Error::IllegalState(_))
    ));

    first.delete(0).unwrap();
    second.append(gauge.clone()).unwrap();
    assert_eq!(gauge.item().owner(), Some(second.model_id()));
}
