//! Picklist Countries Example
//!
//! Scripted session over two autocompletes sharing one country list:
//! - "Async search": code filter, custom rows, debounced loading
//! - "Sync search": default rows, multiple selection
//!
//! Run with: cargo run -p picklist --example countries
//! Set `RUST_LOG=picklist=debug` to see controller logs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use picklist::prelude::*;
use tracing_subscriber::EnvFilter;

fn countries() -> Vec<PickOption> {
    [
        ("Argentina", "AR"),
        ("Australia", "AU"),
        ("Brazil", "BR"),
        ("Canada", "CA"),
        ("Chile", "CL"),
        ("China", "CN"),
        ("France", "FR"),
        ("Germany", "DE"),
        ("India", "IN"),
        ("Japan", "JP"),
        ("Mexico", "MX"),
        ("Spain", "ES"),
        ("United Kingdom", "GB"),
        ("United States", "US"),
    ]
    .into_iter()
    .map(PickOption::from)
    .collect()
}

fn filter_by_code(options: &[PickOption], query: &str) -> Vec<PickOption> {
    let needle = query.to_lowercase();
    options
        .iter()
        .filter(|option| {
            option
                .code()
                .is_some_and(|code| code.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

fn print_widget(autocomplete: &Autocomplete) {
    let input = autocomplete.input_view();
    let chips: Vec<_> = autocomplete.chips().into_iter().map(|chip| chip.label).collect();
    println!(
        "[{}] input={:?} chips={:?}{}",
        input.label,
        input.text,
        chips,
        if input.loading { " (loading)" } else { "" }
    );

    let Some(panel) = autocomplete.panel() else {
        println!("    (panel hidden: {:?})", autocomplete.state());
        return;
    };
    for row in panel.rows.iter().skip(panel.first_visible).take(panel.max_visible_items) {
        match row {
            PanelRow::Option { view, .. } => {
                let marker = if view.highlighted { '>' } else { ' ' };
                let check = match view.checked {
                    Some(true) => "[x] ",
                    Some(false) => "[ ] ",
                    None => "",
                };
                let detail = view.detail.as_deref().unwrap_or_default();
                println!("  {marker} {check}{:<16}{detail}", view.label);
            }
            PanelRow::NoResults { message } => println!("    {message}"),
        }
    }
}

/// Collects the last value proposed by `changed` so it can be applied after
/// the controller call returns.
fn pending_value(autocomplete: &Autocomplete) -> Arc<Mutex<Option<SelectionSet>>> {
    let pending = Arc::new(Mutex::new(None));
    let sink = pending.clone();
    autocomplete.changed.connect(move |value: &SelectionSet| {
        *sink.lock() = Some(value.clone());
    });
    pending
}

fn apply_pending(autocomplete: &SharedAutocomplete, pending: &Mutex<Option<SelectionSet>>) {
    if let Some(value) = pending.lock().take() {
        autocomplete.lock().set_value(value);
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let document = Document::new();
    let outside = document.create_element(Some(document.body()));
    let timers = Arc::new(SharedTimerManager::new());

    // ------------------------------------------------------------------
    // Async search
    // ------------------------------------------------------------------
    let async_search = Autocomplete::new()
        .with_label("Async search")
        .with_description("With description and custom display")
        .with_placeholder("Type to begin searching")
        .with_options(countries())
        .with_filter(Box::new(filter_by_code))
        .with_delegate(Box::new(
            |option: &PickOption, highlighted: i32, index: usize| {
                RowView::new(option.display_text())
                    .with_detail(option.code().unwrap_or_default())
                    .with_highlighted(highlighted == index as i32)
            },
        ));
    let async_pending = pending_value(&async_search);
    let typed = Arc::new(Mutex::new(false));
    let typed_sink = typed.clone();
    async_search
        .input_changed
        .connect(move |_: &InputEvent| *typed_sink.lock() = true);
    let async_search = async_search.into_shared();
    let async_boundary = WidgetBoundary::create(&document, document.body());
    let _async_mount = mount(&async_search, &document, async_boundary);

    let mut debouncer = Debouncer::new(timers.clone(), Debouncer::DEFAULT_DELAY);
    let mut now = Instant::now();

    println!("== Async search ==");
    document.click(async_boundary.input());
    async_search.lock().on_input_change("f");
    if std::mem::take(&mut *typed.lock()) {
        debouncer.restart_at(now);
        async_search.lock().set_loading(debouncer.is_pending());
    }
    print_widget(&async_search.lock());

    // Keystrokes during the loading window are dropped.
    async_search.lock().on_input_change("fx");
    println!("    query while loading: {:?}", async_search.lock().query());

    now += Duration::from_millis(600);
    timers.process_expired_at(now);
    if debouncer.poll() {
        async_search.lock().set_loading(debouncer.is_pending());
    }
    print_widget(&async_search.lock());

    async_search.lock().on_key_down(Key::ArrowDown);
    async_search.lock().on_key_down(Key::Enter);
    apply_pending(&async_search, &async_pending);
    print_widget(&async_search.lock());

    document.click(outside);
    print_widget(&async_search.lock());

    // ------------------------------------------------------------------
    // Sync search
    // ------------------------------------------------------------------
    let sync_search = Autocomplete::new()
        .with_label("Sync search")
        .with_description("With default display and search on focus")
        .with_placeholder("Type to begin searching")
        .with_multiple(true)
        .with_options(countries());
    let sync_pending = pending_value(&sync_search);
    let sync_search = sync_search.into_shared();
    let sync_boundary = WidgetBoundary::create(&document, document.body());
    let _sync_mount = mount(&sync_search, &document, sync_boundary);

    println!();
    println!("== Sync search ==");
    sync_search.lock().on_focus();
    print_widget(&sync_search.lock());

    sync_search.lock().on_input_change("an");
    for key in [Key::ArrowDown, Key::Enter, Key::ArrowDown, Key::Enter] {
        sync_search.lock().on_key_down(key);
        apply_pending(&sync_search, &sync_pending);
    }
    print_widget(&sync_search.lock());

    sync_search.lock().remove_chip(0);
    apply_pending(&sync_search, &sync_pending);
    sync_search.lock().on_input_change("zz");
    print_widget(&sync_search.lock());

    sync_search.lock().on_key_down(Key::Escape);
    print_widget(&sync_search.lock());
}
