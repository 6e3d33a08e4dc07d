// Integration tests for the selector engine against an in-memory page
//
// Tests cover:
// - enable/disable idempotence, panel and root marker, listener teardown
// - click toggling, surface clicks, non-web anchors, nested targets
// - lasso selection: modifier gating, additive-only, visibility filter
// - the click fired by a lasso release does not toggle the anchor
// - marker projection staying in sync with the store

use mlo::fake::{ElementId, FakePage};
use mlo::{EventDisposition, EventKind, LassoModifier, Modifiers, MouseButton, OpenerConfig, Page, PageEvent, Point, Rect, SelectorEngine};

fn link_box(row: u32) -> Rect {
	Rect::from_origin_size(10.0, 20.0 * f64::from(row), 100.0, 16.0)
}

/// Page with three links stacked vertically at y = 0, 20, 40.
fn three_links() -> (FakePage, [ElementId; 3]) {
	let mut page = FakePage::new();
	let a = page.add_link("https://a.test/", "Alpha", link_box(0));
	let b = page.add_link("https://b.test/", "  Beta\n link ", link_box(1));
	let c = page.add_link("https://c.test/", "Gamma", link_box(2));
	(page, [a, b, c])
}

fn active_engine(page: FakePage) -> SelectorEngine<FakePage> {
	let mut engine = SelectorEngine::new(page, OpenerConfig::default());
	engine.enable();
	engine
}

fn click(engine: &mut SelectorEngine<FakePage>, target: ElementId) -> EventDisposition {
	engine.handle_event(PageEvent::Click { target })
}

fn lasso(engine: &mut SelectorEngine<FakePage>, from: Point, to: Point) {
	engine.handle_event(PageEvent::PointerDown {
		point: from,
		button: MouseButton::Primary,
		modifiers: Modifiers::SHIFT,
	});
	engine.handle_event(PageEvent::PointerMove { point: to });
	engine.handle_event(PageEvent::PointerUp { point: to });
}

// Mode transitions

#[test]
fn enable_shows_panel_and_subscribes_once() {
	let (page, _) = three_links();
	let mut engine = active_engine(page);
	engine.enable();

	let page = engine.page();
	assert!(engine.is_active());
	assert!(page.surface_visible());
	assert!(page.root_marker());
	assert_eq!(page.surface_builds(), 1);
	assert_eq!(page.listening(), EventKind::ALL.to_vec());
	assert_eq!(page.shown_count(), Some(0));
}

#[test]
fn disable_tears_everything_down_and_is_idempotent() {
	let (page, _) = three_links();
	let mut engine = active_engine(page);
	engine.disable();
	engine.disable();

	let page = engine.page();
	assert!(!engine.is_active());
	assert!(!page.surface_visible());
	assert!(!page.root_marker());
	assert!(page.listening().is_empty());
}

#[test]
fn reenabling_reuses_the_panel() {
	let (page, _) = three_links();
	let mut engine = active_engine(page);
	engine.toggle();
	engine.toggle();
	assert!(engine.is_active());
	assert_eq!(engine.page().surface_builds(), 1);
	assert_eq!(engine.page().listening().len(), EventKind::ALL.len());
}

#[test]
fn escape_leaves_selection_mode_and_keeps_selection() {
	let (page, [a, ..]) = three_links();
	let mut engine = active_engine(page);
	click(&mut engine, a);

	let outcome = engine.handle_event(PageEvent::KeyDown { key: "Escape".into() });
	assert_eq!(outcome, EventDisposition::PASS);
	assert!(!engine.is_active());
	assert_eq!(engine.store().len(), 1);
	assert!(engine.page().is_marked(&a));
}

#[test]
fn other_keys_are_ignored() {
	let (page, _) = three_links();
	let mut engine = active_engine(page);
	engine.handle_event(PageEvent::KeyDown { key: "Enter".into() });
	assert!(engine.is_active());
}

// Click toggling

#[test]
fn click_selects_marks_and_consumes() {
	let (page, [a, b, _]) = three_links();
	let mut engine = active_engine(page);

	assert_eq!(click(&mut engine, b), EventDisposition::CONSUME);
	assert!(engine.page().is_marked(&b));
	assert!(!engine.page().is_marked(&a));
	assert_eq!(engine.store().entries()[0].url, "https://b.test/");
	assert_eq!(engine.store().entries()[0].text, "Beta link");
	assert_eq!(engine.page().shown_count(), Some(1));
}

#[test]
fn toggling_twice_restores_prior_state() {
	let (page, [a, b, _]) = three_links();
	let mut engine = active_engine(page);
	click(&mut engine, a);
	let before = engine.store().urls();

	click(&mut engine, b);
	click(&mut engine, b);

	assert_eq!(engine.store().urls(), before);
	assert!(!engine.page().is_marked(&b));
	assert!(engine.page().is_marked(&a));
	assert_eq!(engine.page().shown_count(), Some(1));
}

#[test]
fn click_on_nested_element_resolves_enclosing_anchor() {
	let (mut page, [a, ..]) = three_links();
	let icon = page.add_child(a);
	let mut engine = active_engine(page);

	assert_eq!(click(&mut engine, icon), EventDisposition::CONSUME);
	assert!(engine.store().contains("https://a.test/"));
	assert!(engine.page().is_marked(&a));
	assert!(!engine.page().is_marked(&icon));
}

#[test]
fn click_outside_any_anchor_passes_through() {
	let (mut page, _) = three_links();
	let paragraph = page.add_element(None);
	let mut engine = active_engine(page);

	assert_eq!(click(&mut engine, paragraph), EventDisposition::PASS);
	assert!(engine.store().is_empty());
}

#[test]
fn clicks_inside_the_panel_are_left_alone() {
	let (mut page, _) = three_links();
	let button = page.surface_button();
	let mut engine = active_engine(page);

	assert_eq!(click(&mut engine, button), EventDisposition::PASS);
	assert!(engine.store().is_empty());
}

#[test]
fn clicks_pass_when_inactive() {
	let (page, [a, ..]) = three_links();
	let mut engine = SelectorEngine::new(page, OpenerConfig::default());

	assert_eq!(click(&mut engine, a), EventDisposition::PASS);
	assert!(engine.store().is_empty());
	assert!(!engine.page().is_marked(&a));
}

#[test]
fn non_web_anchor_is_swallowed_without_selecting() {
	let (mut page, _) = three_links();
	let mail = page.add_link("mailto:someone@example.com", "Mail", link_box(5));
	let mut engine = active_engine(page);

	assert_eq!(click(&mut engine, mail), EventDisposition::CONSUME);
	assert!(engine.store().is_empty());
	assert!(!engine.page().is_marked(&mail));
}

#[test]
fn anchors_sharing_a_url_share_the_marker() {
	let (mut page, [a, ..]) = three_links();
	let twin = page.add_link("https://A.test", "Alpha again", link_box(6));
	let mut engine = active_engine(page);

	click(&mut engine, a);
	assert!(engine.page().is_marked(&twin));
	assert_eq!(engine.store().len(), 1);

	click(&mut engine, twin);
	assert!(!engine.page().is_marked(&a));
	assert!(!engine.page().is_marked(&twin));
	assert!(engine.store().is_empty());
}

// Lasso selection

#[test]
fn lasso_requires_modifier_and_primary_button() {
	let (page, _) = three_links();
	let mut engine = active_engine(page);

	let plain = engine.handle_event(PageEvent::PointerDown {
		point: Point::new(0.0, 0.0),
		button: MouseButton::Primary,
		modifiers: Modifiers::NONE,
	});
	assert_eq!(plain, EventDisposition::PASS);
	assert!(engine.context().lasso().is_none());

	let right = engine.handle_event(PageEvent::PointerDown {
		point: Point::new(0.0, 0.0),
		button: MouseButton::Secondary,
		modifiers: Modifiers::SHIFT,
	});
	assert_eq!(right, EventDisposition::PASS);

	engine.handle_event(PageEvent::PointerUp { point: Point::new(200.0, 200.0) });
	assert!(engine.store().is_empty());
}

#[test]
fn lasso_is_ignored_when_inactive() {
	let (page, _) = three_links();
	let mut engine = SelectorEngine::new(page, OpenerConfig::default());
	lasso(&mut engine, Point::new(0.0, 0.0), Point::new(500.0, 500.0));
	assert!(engine.store().is_empty());
	assert!(engine.page().lasso().is_none());
}

#[test]
fn lasso_draws_overlay_while_dragging_and_removes_it_on_release() {
	let (page, _) = three_links();
	let mut engine = active_engine(page);

	let down = engine.handle_event(PageEvent::PointerDown {
		point: Point::new(150.0, 30.0),
		button: MouseButton::Primary,
		modifiers: Modifiers::SHIFT,
	});
	assert_eq!(down, EventDisposition::PREVENT);
	assert_eq!(engine.page().lasso(), Some(Rect::new(150.0, 30.0, 150.0, 30.0)));

	engine.handle_event(PageEvent::PointerMove { point: Point::new(50.0, 5.0) });
	assert_eq!(engine.page().lasso(), Some(Rect::new(50.0, 5.0, 150.0, 30.0)));

	engine.handle_event(PageEvent::PointerUp { point: Point::new(50.0, 5.0) });
	assert_eq!(engine.page().lasso(), None);
	assert!(engine.context().lasso().is_none());
	assert_eq!(engine.store().urls(), vec!["https://a.test/", "https://b.test/"]);
}

#[test]
fn lasso_honors_configured_modifier() {
	let (page, _) = three_links();
	let config = OpenerConfig {
		lasso_modifier: LassoModifier::Alt,
		..OpenerConfig::default()
	};
	let mut engine = SelectorEngine::new(page, config);
	engine.enable();

	lasso(&mut engine, Point::new(0.0, 0.0), Point::new(500.0, 500.0));
	assert!(engine.store().is_empty());

	engine.handle_event(PageEvent::PointerDown {
		point: Point::new(0.0, 0.0),
		button: MouseButton::Primary,
		modifiers: Modifiers { alt: true, ..Modifiers::NONE },
	});
	engine.handle_event(PageEvent::PointerUp { point: Point::new(500.0, 500.0) });
	assert_eq!(engine.store().len(), 3);
}

#[test]
fn lasso_is_additive_only() {
	let (page, [a, b, c]) = three_links();
	let mut engine = active_engine(page);
	click(&mut engine, a);
	click(&mut engine, c);

	// Covers b and c only; a stays selected, c is not toggled off.
	lasso(&mut engine, Point::new(0.0, 25.0), Point::new(300.0, 45.0));

	assert_eq!(engine.store().urls(), vec!["https://a.test/", "https://c.test/", "https://b.test/"]);
	for anchor in [a, b, c] {
		assert!(engine.page().is_marked(&anchor));
	}
	assert_eq!(engine.page().shown_count(), Some(3));
}

#[test]
fn lasso_skips_invisible_and_zero_sized_links() {
	let (mut page, [a, b, c]) = three_links();
	page.hide(b);
	page.set_bbox(c, Rect::from_origin_size(10.0, 40.0, 0.0, 16.0));
	let mut engine = active_engine(page);

	lasso(&mut engine, Point::new(0.0, 0.0), Point::new(500.0, 500.0));

	assert_eq!(engine.store().urls(), vec!["https://a.test/"]);
	assert!(engine.page().is_marked(&a));
	assert!(!engine.page().is_marked(&b));
	assert!(!engine.page().is_marked(&c));
}

#[test]
fn lasso_touching_an_edge_selects() {
	let (page, [a, ..]) = three_links();
	let mut engine = active_engine(page);
	// Link a spans x 10..110, y 0..16; the lasso ends exactly on its right edge.
	lasso(&mut engine, Point::new(110.0, 8.0), Point::new(200.0, 10.0));
	assert_eq!(engine.store().urls(), vec!["https://a.test/"]);
	assert!(engine.page().is_marked(&a));
}

#[test]
fn lasso_ignores_non_web_anchors() {
	let (mut page, _) = three_links();
	page.add_link("javascript:void(0)", "Menu", link_box(0));
	let mut engine = active_engine(page);
	lasso(&mut engine, Point::new(0.0, 0.0), Point::new(500.0, 10.0));
	assert_eq!(engine.store().urls(), vec!["https://a.test/"]);
}

#[test]
fn select_in_rect_reports_newly_added() {
	let (page, [a, ..]) = three_links();
	let mut engine = active_engine(page);
	click(&mut engine, a);
	assert_eq!(engine.select_in_rect(&Rect::new(0.0, 0.0, 500.0, 500.0)), 2);
	assert_eq!(engine.select_in_rect(&Rect::new(0.0, 0.0, 500.0, 500.0)), 0);
}

#[test]
fn click_ending_a_lasso_keeps_the_anchor_selected() {
	let (page, [a, ..]) = three_links();
	let mut engine = active_engine(page);

	// Press and release on the same link, as a tiny lasso does.
	lasso(&mut engine, Point::new(20.0, 5.0), Point::new(25.0, 8.0));
	assert!(engine.page().is_marked(&a));
	assert_eq!(click(&mut engine, a), EventDisposition::CONSUME);
	assert!(engine.page().is_marked(&a));
	assert_eq!(engine.store().urls(), vec!["https://a.test/"]);

	// Only that one click is swallowed.
	click(&mut engine, a);
	assert!(engine.store().is_empty());
}

#[test]
fn plain_press_after_a_lasso_rearms_clicks() {
	let (page, [a, b, _]) = three_links();
	let mut engine = active_engine(page);
	lasso(&mut engine, Point::new(20.0, 5.0), Point::new(25.0, 8.0));

	// A press without the modifier starts an ordinary click.
	engine.handle_event(PageEvent::PointerDown {
		point: Point::new(20.0, 25.0),
		button: MouseButton::Primary,
		modifiers: Modifiers::NONE,
	});
	click(&mut engine, b);
	assert!(engine.page().is_marked(&a));
	assert!(engine.page().is_marked(&b));
	assert_eq!(engine.store().len(), 2);
}

#[test]
fn escape_mid_drag_discards_the_lasso() {
	let (page, _) = three_links();
	let mut engine = active_engine(page);
	engine.handle_event(PageEvent::PointerDown {
		point: Point::new(0.0, 0.0),
		button: MouseButton::Primary,
		modifiers: Modifiers::SHIFT,
	});
	engine.handle_event(PageEvent::KeyDown { key: "Escape".into() });

	assert!(engine.page().lasso().is_none());
	engine.handle_event(PageEvent::PointerUp { point: Point::new(500.0, 500.0) });
	assert!(engine.store().is_empty());
}

// Clearing

#[test]
fn clear_selection_strips_all_markers() {
	let (mut page, [a, b, c]) = three_links();
	let orphan = page.add_link("https://d.test/", "Delta", link_box(3));
	let mut engine = active_engine(page);
	lasso(&mut engine, Point::new(0.0, 0.0), Point::new(500.0, 500.0));
	// The page dropped the href after it was marked; clearing still unmarks it.
	engine.page_mut().strip_href(orphan);

	engine.clear_selection();

	assert!(engine.store().is_empty());
	assert_eq!(engine.page().shown_count(), Some(0));
	for element in [a, b, c, orphan] {
		assert!(!engine.page().is_marked(&element));
	}
}
