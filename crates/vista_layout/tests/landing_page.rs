//! End-to-end scroll session over a landing page layout
//!
//! Page: 4000px tall in a 1280x800 viewport.
//! - hero       0..800
//! - features   900..1700
//! - stats      1800..2040
//! - reviews    2400..3000

use std::sync::Arc;

use parking_lot::Mutex;
use vista_layout::prelude::*;

struct Page {
    context: ScrollContext,
    scheduler: AnimationScheduler,
}

impl Page {
    fn new() -> Self {
        Self {
            context: ScrollContext::new(Viewport::new(1280.0, 800.0, 4000.0)),
            scheduler: AnimationScheduler::new(),
        }
    }

    /// Scroll to `y` the way a browser would: one event per 16ms frame
    fn scroll_to(&self, y: f32, step: f32) {
        let mut current = self.context.viewport().scroll_y;
        while current != y {
            current = if y > current {
                (current + step).min(y)
            } else {
                (current - step).max(y)
            };
            self.context.dispatch(ScrollEvent::Scroll { y: current });
            self.scheduler.advance(16.0);
        }
    }

    fn wait(&self, ms: f32) {
        let mut left = ms;
        while left > 0.0 {
            self.scheduler.advance(16.0);
            left -= 16.0;
        }
    }
}

#[test]
fn hero_fades_and_progress_bar_fills() -> anyhow::Result<()> {
    let page = Page::new();

    let document = page
        .context
        .observe_progress(ScrollTarget::Document, ScrollRange::DOCUMENT);
    let bar = Mapper::linear([0.0, 1.0], [0.0, 100.0f32])?.bind(&document);

    let hero = page.context.observe_progress(
        ScrollTarget::Region(Rect::new(0.0, 0.0, 1280.0, 800.0)),
        ScrollRange::PINNED,
    );
    let opacity = Mapper::new([(0.0, 1.0f32), (0.5, 0.0)])?.bind(&hero);
    let scale = Mapper::new([(0.0, 1.0f32), (0.5, 0.9)])?.bind(&hero);

    assert_eq!(bar.get(), 0.0);
    assert_eq!(opacity.get(), 1.0);

    page.scroll_to(200.0, 40.0);
    assert_eq!(hero.progress(), 0.25);
    assert_eq!(opacity.get(), 0.5);
    assert!((scale.get() - 0.95).abs() < 1e-6);

    // Past the breakpoint the hero stays fully faded
    page.scroll_to(1600.0, 200.0);
    assert_eq!(opacity.get(), 0.0);
    assert_eq!(scale.get(), 0.9);
    assert_eq!(bar.get(), 50.0);

    page.scroll_to(3200.0, 400.0);
    assert_eq!(bar.get(), 100.0);

    // Overscroll bounce does not push past the ends
    page.context.dispatch(ScrollEvent::Scroll { y: 3300.0 });
    assert_eq!(bar.get(), 100.0);
    page.context.dispatch(ScrollEvent::Scroll { y: -60.0 });
    assert_eq!(bar.get(), 0.0);
    assert_eq!(opacity.get(), 1.0);
    Ok(())
}

#[test]
fn mapped_values_agree_within_one_event() {
    let page = Page::new();
    let features = page.context.observe_progress(
        ScrollTarget::Region(Rect::new(0.0, 900.0, 1280.0, 800.0)),
        ScrollRange::ENTER_EXIT,
    );
    let offset = Mapper::linear([0.0, 1.0], [100.0f32, -100.0]).unwrap().bind(&features);
    let tint = Mapper::linear([0.0, 1.0], [Color::WHITE, Color::BLACK])
        .unwrap()
        .bind(&features);

    let log = Arc::new(Mutex::new(Vec::new()));
    let offset_log = Arc::clone(&log);
    let _offset_sub = offset.subscribe(move |y| offset_log.lock().push(("offset", y)));
    let tint_log = Arc::clone(&log);
    let _tint_sub = tint.subscribe(move |c| tint_log.lock().push(("tint", c.r)));

    // Halfway through: enters at scroll 100, exits at 1700
    page.context.dispatch(ScrollEvent::Scroll { y: 900.0 });

    let log = log.lock();
    assert_eq!(log.len(), 2);
    assert!(log.contains(&("offset", 0.0)));
    assert!(log.contains(&("tint", 0.5)));
}

#[test]
fn sections_reveal_once_and_counters_count_up() {
    let page = Page::new();
    let margin = RootMargin::px(-100.0);

    let features = RevealMotion::new(
        &page.context,
        page.scheduler.handle(),
        Rect::new(0.0, 900.0, 1280.0, 800.0),
        MotionOptions::fade_up().with_margin(margin),
    );
    let users = CountUp::new(
        &page.context,
        page.scheduler.handle(),
        Rect::new(0.0, 1800.0, 1280.0, 240.0),
        margin,
        50_000.0,
        2000,
    )
    .with_suffix("+");
    let uptime = CountUp::new(
        &page.context,
        page.scheduler.handle(),
        Rect::new(0.0, 1800.0, 1280.0, 240.0),
        margin,
        99.99,
        2000,
    )
    .with_suffix("%");

    assert_eq!(page.context.watch_count(), 3);
    assert!(!features.is_revealed());
    assert_eq!(features.frame(), StyleFrame::hidden(40.0));

    // Features come into view first; stats are still below the fold
    page.scroll_to(400.0, 40.0);
    assert!(features.is_revealed());
    assert!(!users.is_revealed());
    assert_eq!(users.text(), "0+");
    assert_eq!(page.context.watch_count(), 2);

    page.wait(600.0);
    assert_eq!(features.frame(), StyleFrame::IDENTITY);

    page.scroll_to(1400.0, 40.0);
    assert!(users.is_revealed() && uptime.is_revealed());
    assert_eq!(page.context.watch_count(), 0);

    // Scrolling away does not stop or restart them
    page.scroll_to(0.0, 200.0);
    page.wait(2000.0);
    assert_eq!(users.text(), "50,000+");
    assert_eq!(uptime.text(), "99.99%");
    assert!(!page.scheduler.has_active_animations());

    page.scroll_to(1400.0, 200.0);
    assert!(users.is_finished());
    assert!(!page.scheduler.has_active_animations());
}

#[test]
fn unmounting_tears_everything_down() {
    let page = Page::new();
    let progress = page
        .context
        .observe_progress(ScrollTarget::Document, ScrollRange::DOCUMENT);
    let reveal = page
        .context
        .observe_reveal(Rect::new(0.0, 3000.0, 1280.0, 400.0), RootMargin::ZERO);
    let stat = CountUp::new(
        &page.context,
        page.scheduler.handle(),
        Rect::new(0.0, 0.0, 1280.0, 240.0),
        RootMargin::ZERO,
        1000.0,
        2000,
    );

    page.wait(160.0);
    assert!(stat.is_running());
    assert_eq!(page.context.source_count(), 1);
    assert_eq!(page.context.watch_count(), 1);
    assert_eq!(page.scheduler.counter_count(), 1);

    drop(progress);
    drop(reveal);
    drop(stat);

    assert_eq!(page.context.source_count(), 0);
    assert_eq!(page.context.watch_count(), 0);
    assert_eq!(page.scheduler.counter_count(), 0);
    assert!(!page.scheduler.has_active_animations());
}

#[test]
fn testimonials_carousel() -> anyhow::Result<()> {
    let reviews = ["Ada", "Grace", "Linus", "Ken", "Barbara", "Radia"];
    let mut carousel = Carousel::new(reviews.to_vec(), EngineConfig::standard().carousel_page_size)?;

    assert_eq!(carousel.page_count(), 2);
    assert_eq!(carousel.visible_items(), &["Ada", "Grace", "Linus"]);

    carousel.prev_page();
    assert_eq!(carousel.visible_items(), &["Ken", "Barbara", "Radia"]);
    carousel.next_page();
    assert_eq!(carousel.current_page(), 0);

    assert!(carousel.go_to_page(5).is_err());
    assert_eq!(carousel.current_page(), 0);
    Ok(())
}

#[test]
fn nav_bar_turns_solid_after_threshold() {
    let page = Page::new();
    let states = Arc::new(Mutex::new(Vec::new()));
    let states_in_callback = Arc::clone(&states);
    let _sub = page
        .context
        .on_scrolled_change(move |solid| states_in_callback.lock().push(solid));

    page.scroll_to(200.0, 20.0);
    page.scroll_to(0.0, 20.0);

    assert_eq!(*states.lock(), vec![true, false]);
}
