//! Landing Page Scroll Demo
//!
//! Scripts a scroll session over a landing page and logs what the page would
//! render at each step:
//! - Reading progress bar and solid navigation bar
//! - Hero section fading, shrinking and drifting as it scrolls away
//! - Feature cards fading up one after another on first view
//! - Stats counting up once they are on screen
//! - Testimonials carousel pages
//!
//! Run with: RUST_LOG=debug cargo run -p vista_layout --example landing_scroll

use anyhow::Result;
use vista_layout::prelude::*;

const CONFIG: &str = r#"
reveal_margin = "-50px"
counter_duration_ms = 2000
"#;

const FRAME_MS: f32 = 16.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = EngineConfig::from_toml_str(CONFIG)?;
    let context = ScrollContext::with_config(Viewport::new(1280.0, 800.0, 4000.0), &config)?;
    let scheduler = AnimationScheduler::with_config(&config);

    // Reading progress and nav bar
    let page = context.observe_progress(ScrollTarget::Document, ScrollRange::DOCUMENT);
    let progress_width = Mapper::linear([0.0, 1.0], [0.0, 100.0f32])?.bind(&page);
    let _nav = context.on_scrolled_change(|solid| {
        tracing::info!(solid, "nav bar background changed");
    });

    // Hero: fade out, shrink and drift down over the first half of its exit
    let hero = context.observe_progress(
        ScrollTarget::Region(Rect::new(0.0, 0.0, 1280.0, 800.0)),
        ScrollRange::PINNED,
    );
    let hero_style = Mapper::new([
        (0.0, StyleFrame::IDENTITY),
        (
            0.5,
            StyleFrame::IDENTITY
                .with_opacity(0.0)
                .with_scale(0.9)
                .with_offset(0.0, 100.0),
        ),
    ])?
    .bind(&hero);

    // Feature section background tint while it passes through
    let features = context.observe_progress(
        ScrollTarget::Region(Rect::new(0.0, 900.0, 1280.0, 800.0)),
        ScrollRange::ENTER_EXIT,
    );
    let features_tint = Mapper::new([
        (0.0, Color::WHITE),
        (0.5, Color::from_hex(0xEEF2FF)),
        (1.0, Color::WHITE),
    ])?
    .bind(&features);

    let card_motion = MotionOptions::from_config(&config)?;
    let cards: Vec<_> = (0..3)
        .map(|i| {
            RevealMotion::new(
                &context,
                scheduler.handle(),
                Rect::new(80.0 + i as f32 * 400.0, 1000.0, 360.0, 420.0),
                card_motion.stagger(i, config.stagger_step_ms),
            )
        })
        .collect();

    let stats = [(50_000.0, "+"), (99.99, "%"), (120.0, "")]
        .into_iter()
        .enumerate()
        .map(|(i, (target, suffix))| {
            CountUp::from_config(
                &context,
                scheduler.handle(),
                Rect::new(80.0 + i as f32 * 400.0, 1800.0, 360.0, 240.0),
                target,
                &config,
            )
            .map(|stat| stat.with_suffix(suffix))
        })
        .collect::<Result<Vec<_>, VistaError>>()?;

    let mut testimonials = Carousel::new(
        vec!["Ada", "Grace", "Linus", "Ken", "Barbara", "Radia"],
        config.carousel_page_size,
    )?;

    // Scroll down the page at 40px per frame
    let mut y = 0.0;
    let mut frame = 0u32;
    while y < context.viewport().max_scroll() {
        y = (y + 40.0).min(context.viewport().max_scroll());
        context.dispatch(ScrollEvent::Scroll { y });
        scheduler.advance(FRAME_MS);
        frame += 1;

        if frame % 10 == 0 {
            let hero = hero_style.get();
            tracing::info!(
                y,
                progress = progress_width.get(),
                hero_opacity = hero.opacity,
                hero_scale = hero.scale,
                tint = ?features_tint.get().to_array(),
                cards_visible = cards.iter().filter(|card| card.is_revealed()).count(),
                stats = ?stats.iter().map(CountUp::text).collect::<Vec<_>>(),
                "frame {frame}"
            );
        }
    }

    // Let the remaining animations settle
    while scheduler.advance(FRAME_MS) {}
    tracing::info!(
        stats = ?stats.iter().map(CountUp::text).collect::<Vec<_>>(),
        "animations settled"
    );

    for _ in 0..3 {
        testimonials.next_page();
        let dots: String = testimonials
            .indicators()
            .map(|(_, current)| if current { '●' } else { '○' })
            .collect();
        tracing::info!(
            page = testimonials.current_page(),
            shown = ?testimonials.visible_items(),
            "testimonials {dots}"
        );
    }

    Ok(())
}
