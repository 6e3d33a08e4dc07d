// Integration tests for the page-side open and export actions
//
// Tests cover:
// - REQUEST_OPEN: empty selection, confirmation threshold, declining
// - REQUEST_EXPORT: CSV payload, filename, empty selection, save failures
// - TOGGLE_SELECT and panel buttons routed through the engine

use mlo::fake::{FakeHost, FakePage};
use mlo::{Message, OpenerConfig, PageEvent, PanelAction, Rect, SelectorEngine};

fn engine_with_links(n: usize) -> SelectorEngine<FakePage> {
	let mut page = FakePage::new();
	for i in 0..n {
		page.add_link(
			&format!("https://x.test/{i}"),
			&format!("Link {i}"),
			Rect::from_origin_size(0.0, 20.0 * i as f64, 50.0, 10.0),
		);
	}
	let mut engine = SelectorEngine::new(page, OpenerConfig::default());
	engine.enable();
	engine
}

fn select_all(engine: &mut SelectorEngine<FakePage>) {
	engine.select_in_rect(&Rect::new(0.0, 0.0, 1000.0, 1.0e6));
}

#[test]
fn open_with_empty_selection_does_nothing() {
	let mut engine = engine_with_links(3);
	let mut host = FakeHost::new();

	engine.handle_message(&Message::RequestOpen, &mut host);

	assert!(host.sent.is_empty());
	assert!(host.prompts.is_empty());
}

#[test]
fn open_below_threshold_sends_without_asking() {
	let mut engine = engine_with_links(20);
	select_all(&mut engine);
	let mut host = FakeHost::declining();

	assert_eq!(engine.open_all(&mut host), Some(20));

	assert!(host.prompts.is_empty());
	let Message::OpenTabs { urls } = &host.sent[0] else {
		panic!("expected OPEN_TABS, got {:?}", host.sent);
	};
	assert_eq!(urls.len(), 20);
	assert_eq!(urls[0], "https://x.test/0");
	assert_eq!(urls[19], "https://x.test/19");
}

#[test]
fn declining_a_large_batch_sends_nothing() {
	let mut engine = engine_with_links(25);
	select_all(&mut engine);
	let mut host = FakeHost::declining();

	assert_eq!(engine.open_all(&mut host), None);

	assert_eq!(host.prompts, vec!["You're about to open 25 tabs. Continue?".to_string()]);
	assert!(host.sent.is_empty());
	assert_eq!(engine.store().len(), 25);
}

#[test]
fn confirming_a_large_batch_sends_everything() {
	let mut engine = engine_with_links(60);
	select_all(&mut engine);
	let mut host = FakeHost::new();

	engine.handle_panel(PanelAction::Open, &mut host);

	assert_eq!(host.prompts.len(), 1);
	// The page sends the whole selection; capping is the tab authority's job.
	assert_eq!(host.sent, vec![Message::OpenTabs { urls: engine.store().urls() }]);
	assert_eq!(engine.store().len(), 60);
}

#[test]
fn export_hands_csv_to_the_host() {
	let mut page = FakePage::new();
	let a = page.add_link("http://x/1", "A, B", Rect::from_origin_size(0.0, 0.0, 10.0, 10.0));
	let b = page.add_link("http://x/2", "", Rect::from_origin_size(0.0, 20.0, 10.0, 10.0));
	let mut engine = SelectorEngine::new(page, OpenerConfig::default());
	engine.enable();
	engine.handle_event(PageEvent::Click { target: a });
	engine.handle_event(PageEvent::Click { target: b });
	let mut host = FakeHost::new();

	engine.handle_message(&Message::RequestExport, &mut host);

	assert_eq!(host.saved.len(), 1);
	let file = &host.saved[0];
	assert_eq!(file.filename, "links-20240517-090307.csv");
	assert_eq!(file.media_type, "text/csv;charset=utf-8");
	assert_eq!(file.text(), "Name,URL\n\"A, B\",http://x/1\n,http://x/2");
}

#[test]
fn export_of_empty_selection_saves_nothing() {
	let mut engine = engine_with_links(2);
	let mut host = FakeHost::new();

	assert_eq!(engine.export(&mut host), None);
	assert!(host.saved.is_empty());
}

#[test]
fn export_uses_configured_prefix() {
	let mut page = FakePage::new();
	let a = page.add_link("https://x.test/", "X", Rect::from_origin_size(0.0, 0.0, 10.0, 10.0));
	let config = OpenerConfig {
		export_prefix: "reading-list".into(),
		..OpenerConfig::default()
	};
	let mut engine = SelectorEngine::new(page, config);
	engine.enable();
	engine.handle_event(PageEvent::Click { target: a });
	let mut host = FakeHost::new();

	assert_eq!(engine.export(&mut host).as_deref(), Some("reading-list-20240517-090307.csv"));
}

#[test]
fn failed_save_is_swallowed() {
	let mut engine = engine_with_links(1);
	select_all(&mut engine);
	let mut host = FakeHost {
		save_failure: Some("disk full".into()),
		..FakeHost::new()
	};

	engine.handle_panel(PanelAction::Export, &mut host);

	assert_eq!(engine.export(&mut host), None);
	assert!(host.saved.is_empty());
	assert_eq!(engine.store().len(), 1);
}

#[test]
fn toggle_message_flips_mode() {
	let mut engine = engine_with_links(1);
	let mut host = FakeHost::new();

	engine.handle_message(&Message::ToggleSelect, &mut host);
	assert!(!engine.is_active());
	engine.handle_message(&Message::ToggleSelect, &mut host);
	assert!(engine.is_active());
}

#[test]
fn open_tabs_message_is_not_for_the_page() {
	let mut engine = engine_with_links(1);
	select_all(&mut engine);
	let mut host = FakeHost::new();

	engine.handle_message(&Message::open_tabs(["https://x.test/0"]), &mut host);

	assert!(host.sent.is_empty());
	assert!(engine.is_active());
}

#[test]
fn panel_clear_and_exit() {
	let mut engine = engine_with_links(3);
	select_all(&mut engine);
	let mut host = FakeHost::new();

	engine.handle_panel(PanelAction::Clear, &mut host);
	assert!(engine.store().is_empty());
	assert_eq!(engine.page().shown_count(), Some(0));

	engine.handle_panel(PanelAction::Exit, &mut host);
	assert!(!engine.is_active());
	assert!(!engine.page().surface_visible());
}
