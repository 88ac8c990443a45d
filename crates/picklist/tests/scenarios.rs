//! End-to-end interaction scenarios for the autocomplete controller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use picklist::prelude::*;
use picklist::{AutocompleteConfig, MatchField};

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ca() -> PickOption {
    PickOption::labeled("Canada", "CA")
}

fn fr() -> PickOption {
    PickOption::labeled("France", "FR")
}

/// A shared controller plus the last value it proposed.
struct Harness {
    autocomplete: SharedAutocomplete,
    proposed: Arc<Mutex<Option<SelectionSet>>>,
}

impl Harness {
    fn new(autocomplete: Autocomplete) -> Self {
        let proposed = Arc::new(Mutex::new(None));
        let sink = proposed.clone();
        autocomplete.changed.connect(move |value: &SelectionSet| {
            *sink.lock() = Some(value.clone());
        });
        Self {
            autocomplete: autocomplete.into_shared(),
            proposed,
        }
    }

    /// Apply the proposed value the way a caller owning the state would.
    fn commit(&self) -> Option<SelectionSet> {
        let value = self.proposed.lock().take()?;
        self.autocomplete.lock().set_value(value.clone());
        Some(value)
    }
}

#[test]
fn test_query_then_clear() {
    setup();
    let mut autocomplete = Autocomplete::new().with_options(vec![ca(), fr()]);
    autocomplete.on_focus();

    autocomplete.on_input_change("fra");
    let panel = autocomplete.panel().unwrap();
    let labels: Vec<_> = panel.option_rows().map(|(_, view)| view.label.clone()).collect();
    assert_eq!(labels, vec!["France"]);
    assert_eq!(autocomplete.highlighted_index(), -1);

    autocomplete.on_key_down(Key::ArrowDown);
    autocomplete.on_input_change("");
    assert_eq!(autocomplete.displayed(), &[ca(), fr()]);
    assert_eq!(autocomplete.highlighted_index(), -1);
    assert!(autocomplete.results().is_empty());
}

#[test]
fn test_multi_select_toggle_round_trip() {
    setup();
    let harness = Harness::new(
        Autocomplete::new()
            .with_multiple(true)
            .with_options(vec![ca(), fr()]),
    );

    harness.autocomplete.lock().click_row(0);
    assert_eq!(harness.commit().unwrap().as_slice(), &[ca()]);

    harness.autocomplete.lock().click_row(1);
    assert_eq!(harness.commit().unwrap().as_slice(), &[ca(), fr()]);

    harness.autocomplete.lock().click_row(0);
    assert_eq!(harness.commit().unwrap().as_slice(), &[fr()]);

    harness.autocomplete.lock().remove_chip(0);
    assert!(harness.commit().unwrap().is_empty());
    assert!(harness.autocomplete.lock().chips().is_empty());
}

#[test]
fn test_single_select_replaces_and_clears() {
    setup();
    let harness = Harness::new(Autocomplete::new().with_options(vec![ca(), fr()]));

    harness.autocomplete.lock().click_row(0);
    assert_eq!(harness.commit().unwrap().as_slice(), &[ca()]);

    harness.autocomplete.lock().click_row(1);
    assert_eq!(harness.commit().unwrap().as_slice(), &[fr()]);

    harness.autocomplete.lock().click_row(1);
    assert!(harness.commit().unwrap().is_empty());
}

#[test]
fn test_selection_identity_survives_option_reload() {
    setup();
    let harness = Harness::new(
        Autocomplete::new()
            .with_multiple(true)
            .with_options(vec![ca(), fr()]),
    );
    harness.autocomplete.lock().click_row(0);
    harness.commit();

    // Same code, different label: still the same option.
    harness
        .autocomplete
        .lock()
        .set_options(vec![PickOption::labeled("Canada (CA)", "CA"), fr()]);
    harness.autocomplete.lock().on_focus();

    let panel = harness.autocomplete.lock().panel().unwrap();
    let checked: Vec<_> = panel.option_rows().map(|(_, view)| view.checked).collect();
    assert_eq!(checked, vec![Some(true), Some(false)]);

    harness.autocomplete.lock().click_row(0);
    assert!(harness.commit().unwrap().is_empty());
}

#[test]
fn test_document_clicks() {
    setup();
    let document = Document::new();
    let boundary = WidgetBoundary::create(&document, document.body());
    let outside = document.create_element(Some(document.body()));
    let row = document.create_element(Some(boundary.panel()));

    let autocomplete = Autocomplete::new().with_options(vec![ca(), fr()]).into_shared();
    let _guard = mount(&autocomplete, &document, boundary);

    document.click(boundary.input());
    assert_eq!(autocomplete.lock().state(), PanelState::OpenIdle);

    autocomplete.lock().on_key_down(Key::ArrowDown);
    document.click(outside);
    assert_eq!(autocomplete.lock().state(), PanelState::Closed);
    // Outside clicks keep the highlight; only Escape clears it.
    assert_eq!(autocomplete.lock().highlighted_index(), 0);

    document.click(row);
    assert!(autocomplete.lock().is_open());

    autocomplete.lock().on_key_down(Key::Escape);
    assert!(!autocomplete.lock().is_open());
    assert_eq!(autocomplete.lock().highlighted_index(), -1);

    document.click(boundary.input());
    assert!(autocomplete.lock().is_open());
}

#[test]
fn test_disabled_still_closes_on_outside_click() {
    setup();
    let document = Document::new();
    let boundary = WidgetBoundary::create(&document, document.body());
    let outside = document.create_element(Some(document.body()));

    let autocomplete = Autocomplete::new().with_options(vec![ca()]).into_shared();
    let _guard = mount(&autocomplete, &document, boundary);

    document.click(boundary.root());
    autocomplete.lock().set_disabled(true);
    document.click(outside);
    assert!(!autocomplete.lock().is_open());
}

#[test]
fn test_two_widgets_on_one_document() {
    setup();
    let document = Document::new();
    let first = WidgetBoundary::create(&document, document.body());
    let second = WidgetBoundary::create(&document, document.body());

    let a = Autocomplete::new().into_shared();
    let b = Autocomplete::new().into_shared();
    let _ga = mount(&a, &document, first);
    let _gb = mount(&b, &document, second);

    document.click(first.input());
    assert!(a.lock().is_open());
    assert!(!b.lock().is_open());

    document.click(second.input());
    assert!(!a.lock().is_open());
    assert!(b.lock().is_open());
}

#[test]
fn test_debounced_loading_flow() {
    setup();
    let timers = Arc::new(SharedTimerManager::new());
    let mut debouncer = Debouncer::new(timers.clone(), Duration::from_millis(600));
    let start = Instant::now();

    let by_code = |options: &[PickOption], query: &str| -> Vec<PickOption> {
        let needle = query.to_lowercase();
        options
            .iter()
            .filter(|o| o.code().is_some_and(|c| c.to_lowercase().contains(&needle)))
            .cloned()
            .collect()
    };
    let mut autocomplete = Autocomplete::new()
        .with_options(vec![ca(), fr()])
        .with_filter(Box::new(by_code));
    let inputs = Arc::new(Mutex::new(Vec::new()));
    let sink = inputs.clone();
    autocomplete
        .input_changed
        .connect(move |event: &InputEvent| sink.lock().push(event.value.clone()));

    autocomplete.on_focus();
    autocomplete.on_input_change("f");
    debouncer.restart_at(start);
    autocomplete.set_loading(debouncer.is_pending());

    assert_eq!(autocomplete.state(), PanelState::OpenLoading);
    assert!(autocomplete.panel().is_none());
    assert!(autocomplete.input_view().loading);

    // Dropped while loading.
    autocomplete.on_input_change("fx");
    assert_eq!(autocomplete.query(), "f");

    timers.process_expired_at(start + Duration::from_millis(599));
    assert!(!debouncer.poll());

    timers.process_expired_at(start + Duration::from_millis(600));
    assert!(debouncer.poll());
    autocomplete.set_loading(debouncer.is_pending());

    let panel = autocomplete.panel().unwrap();
    assert_eq!(panel.option_rows().map(|(o, _)| o.clone()).collect::<Vec<_>>(), vec![fr()]);
    assert_eq!(*inputs.lock(), vec!["f".to_string()]);
}

#[test]
fn test_empty_options_navigation() {
    setup();
    let mut autocomplete = Autocomplete::new();
    autocomplete.on_focus();
    for key in [Key::ArrowDown, Key::ArrowUp, Key::Enter] {
        autocomplete.on_key_down(key);
        assert_eq!(autocomplete.highlighted_index(), -1);
    }
}

#[test]
fn test_config_driven_widget() {
    setup();
    let config = AutocompleteConfig::from_toml_str(
        r#"
        label = "Async search"
        placeholder = "Type to begin searching"
        match_field = "code"
        max_visible_items = 2

        [[options]]
        label = "Canada"
        code = "CA"

        [[options]]
        label = "France"
        code = "FR"

        [[options]]
        label = "Germany"
        code = "DE"
        "#,
    )
    .unwrap();
    assert_eq!(config.match_field, MatchField::Code);

    let mut autocomplete = Autocomplete::from_config(&config);
    autocomplete.on_focus();
    autocomplete.on_input_change("de");
    assert_eq!(autocomplete.results(), &[PickOption::labeled("Germany", "DE")]);

    autocomplete.on_input_change("");
    autocomplete.on_key_down(Key::ArrowUp);
    let panel = autocomplete.panel().unwrap();
    assert_eq!(panel.max_visible_items, 2);
    assert_eq!(panel.first_visible, 1);
}
