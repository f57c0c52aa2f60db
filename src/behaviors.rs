use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use serde_json::json;
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, EventTarget, HtmlCanvasElement, MouseEvent};

use crate::config::SiteConfig;
use crate::dom::{
    body, by_id, document, query_all, query_within, scroll_y, set_style, viewport_size, win,
    DomError, FrameLoop, OneShotObserver,
};
use crate::effects::counter::CounterAnimation;
use crate::effects::cursor::{CursorEvent, CursorTrail, CLICK_CLASS, HOVER_CLASS, HOVER_TARGETS};
use crate::effects::loader::{HideTrigger, LoaderGate};
use crate::effects::navigation::parallax_offset;
use crate::effects::particles::{ParticleField, LINK_WIDTH};
use crate::effects::reveal::{
    grade_fill_width, reveal_delay_ms, skill_fill_width, stagger_delays, CARD_GROUP_SELECTOR,
    CARD_SELECTOR, CARD_VISIBLE_CLASS, GRADE_FILL_SELECTOR, REVEALED_CLASS, REVEAL_SELECTOR,
    SKILL_FILL_SELECTOR, SKILL_ITEM_SELECTOR,
};
use crate::effects::tilt::{self, tilt_transform, CardPointer};
use crate::telemetry::{log_event, LogLevel};

const LOADER_ID: &str = "loader";
const LOADER_HIDDEN_CLASS: &str = "hidden";
const CURSOR_DOT_ID: &str = "cursorDot";
const CURSOR_RING_ID: &str = "cursorRing";
const CANVAS_ID: &str = "particleCanvas";
const PARALLAX_SELECTOR: &str = ".hero-grid";
const STATS_SELECTOR: &str = ".hero-stats";
const STAT_NUMBER_SELECTOR: &str = ".stat-num";

/// Owns every listener, timer, frame loop and observer the page installs.
/// Dropping it at unmount tears all of them down.
pub struct PageEffects {
    _listeners: Vec<EventListener>,
    _frames: Vec<FrameLoop>,
    _timers: Vec<Timeout>,
    _observers: Vec<OneShotObserver>,
    _reveal: Rc<RefCell<Option<RevealEffects>>>,
    _counters: Rc<RefCell<Vec<FrameLoop>>>,
}

/// Installs each behavior independently; one that cannot find its elements
/// is logged and skipped.
pub fn mount(config: Rc<SiteConfig>) -> PageEffects {
    let reveal = Rc::new(RefCell::new(None));
    let counters = Rc::new(RefCell::new(Vec::new()));
    let mut listeners = Vec::new();
    let mut frames = Vec::new();
    let mut timers = Vec::new();
    let mut observers = Vec::new();

    match install_loader(&config, reveal.clone()) {
        Ok(loader_timers) => timers.extend(loader_timers),
        Err(error) => report_failure(&config, "loader", &error),
    }

    match install_cursor(&config) {
        Ok((cursor_listeners, frame)) => {
            listeners.extend(cursor_listeners);
            frames.push(frame);
        }
        Err(error) => report_failure(&config, "cursor", &error),
    }

    match install_particles(&config) {
        Ok(Some((resize, frame))) => {
            listeners.push(resize);
            frames.push(frame);
        }
        Ok(None) => {}
        Err(error) => report_failure(&config, "particles", &error),
    }

    match install_parallax(&config) {
        Ok(scroll) => listeners.extend(scroll),
        Err(error) => report_failure(&config, "parallax", &error),
    }

    match install_tilt(&config) {
        Ok(card_listeners) => listeners.extend(card_listeners),
        Err(error) => report_failure(&config, "tilt", &error),
    }

    match install_counters(&config, counters.clone()) {
        Ok(observer) => observers.extend(observer),
        Err(error) => report_failure(&config, "counters", &error),
    }

    PageEffects {
        _listeners: listeners,
        _frames: frames,
        _timers: timers,
        _observers: observers,
        _reveal: reveal,
        _counters: counters,
    }
}

fn report_failure(config: &SiteConfig, behavior: &str, error: &DomError) {
    log_event(
        config,
        LogLevel::Warn,
        "mount_failed",
        json!({ "behavior": behavior, "error": error.to_string() }),
    );
}

fn install_loader(
    config: &Rc<SiteConfig>,
    reveal: Rc<RefCell<Option<RevealEffects>>>,
) -> Result<Vec<Timeout>, DomError> {
    let gate = Rc::new(RefCell::new(LoaderGate::new()));
    set_style(&body()?, "overflow", gate.borrow().body_overflow());

    let schedule = |trigger: HideTrigger, delay_ms: u32| {
        let config = config.clone();
        let gate = gate.clone();
        let reveal = reveal.clone();
        Timeout::new(delay_ms, move || hide_loader(&config, &gate, &reveal, trigger))
    };

    Ok(vec![
        schedule(HideTrigger::Ready, config.loader.hide_after_ms),
        schedule(HideTrigger::Fallback, config.loader.fallback_ms),
    ])
}

fn hide_loader(
    config: &Rc<SiteConfig>,
    gate: &RefCell<LoaderGate>,
    reveal: &RefCell<Option<RevealEffects>>,
    trigger: HideTrigger,
) {
    if !gate.borrow_mut().hide(trigger) {
        return;
    }

    if let Ok(loader) = by_id(LOADER_ID) {
        let _ = loader.class_list().add_1(LOADER_HIDDEN_CLASS);
    }
    if let Ok(body) = body() {
        set_style(&body, "overflow", gate.borrow().body_overflow());
    }

    log_event(
        config,
        LogLevel::Info,
        "loader_hidden",
        json!({ "trigger": trigger.as_str() }),
    );

    match init_reveal(config) {
        Ok(effects) => *reveal.borrow_mut() = Some(effects),
        Err(error) => report_failure(config, "reveal", &error),
    }
}

fn install_cursor(config: &SiteConfig) -> Result<(Vec<EventListener>, FrameLoop), DomError> {
    let dot = by_id(CURSOR_DOT_ID)?;
    let ring = by_id(CURSOR_RING_ID)?;
    let document = document()?;
    let body = body()?;
    let trail = Rc::new(RefCell::new(CursorTrail::new(&config.cursor)));
    let mut listeners = Vec::new();

    {
        let trail = trail.clone();
        listeners.push(EventListener::new(&document, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                trail
                    .borrow_mut()
                    .pointer_moved(f64::from(event.client_x()), f64::from(event.client_y()));
            }
        }));
    }

    let on = |target: &EventTarget, event_type: &'static str, cursor_event: CursorEvent| {
        let trail = trail.clone();
        let body = body.clone();
        let dot = dot.clone();
        let ring = ring.clone();
        EventListener::new(target, event_type, move |_| {
            let mut trail = trail.borrow_mut();
            trail.handle(cursor_event);
            apply_cursor_state(&body, &dot, &ring, &trail);
        })
    };

    for target in query_all(HOVER_TARGETS)? {
        listeners.push(on(target.as_ref(), "mouseenter", CursorEvent::HoverStart));
        listeners.push(on(target.as_ref(), "mouseleave", CursorEvent::HoverEnd));
    }
    listeners.push(on(document.as_ref(), "mousedown", CursorEvent::Press));
    listeners.push(on(document.as_ref(), "mouseup", CursorEvent::Release));
    listeners.push(on(document.as_ref(), "mouseleave", CursorEvent::LeaveWindow));
    listeners.push(on(document.as_ref(), "mouseenter", CursorEvent::EnterWindow));

    let frame = FrameLoop::start(move |_| {
        let mut trail = trail.borrow_mut();
        trail.step();
        let (dot_at, ring_at) = (trail.dot(), trail.ring());
        set_style(&dot, "left", &format!("{}px", dot_at.x));
        set_style(&dot, "top", &format!("{}px", dot_at.y));
        set_style(&ring, "left", &format!("{}px", ring_at.x));
        set_style(&ring, "top", &format!("{}px", ring_at.y));
        true
    });

    Ok((listeners, frame))
}

fn apply_cursor_state(body: &Element, dot: &Element, ring: &Element, trail: &CursorTrail) {
    let classes = body.class_list();
    let _ = classes.toggle_with_force(HOVER_CLASS, trail.is_hovering());
    let _ = classes.toggle_with_force(CLICK_CLASS, trail.is_pressed());
    set_style(dot, "opacity", trail.opacity());
    set_style(ring, "opacity", trail.opacity());
}

fn install_particles(config: &SiteConfig) -> Result<Option<(EventListener, FrameLoop)>, DomError> {
    let Some(canvas) = document()?.get_element_by_id(CANVAS_ID) else {
        return Ok(None);
    };
    let canvas: HtmlCanvasElement = canvas
        .dyn_into()
        .map_err(|_| DomError::WrongType(CANVAS_ID))?;
    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| DomError::Js("2d context unavailable".to_string()))?
        .dyn_into()
        .map_err(|_| DomError::WrongType("2d context"))?;

    let (width, height) = viewport_size();
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    let field = Rc::new(RefCell::new(ParticleField::new(
        &config.particles,
        width,
        height,
        fastrand::Rng::new(),
    )));

    let resize = {
        let field = field.clone();
        let canvas = canvas.clone();
        EventListener::new(&win()?, "resize", move |_| {
            let (width, height) = viewport_size();
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
            field.borrow_mut().resize(width, height);
        })
    };

    let frame = FrameLoop::start(move |_| {
        draw_particles(&context, &mut field.borrow_mut());
        true
    });

    Ok(Some((resize, frame)))
}

fn draw_particles(context: &CanvasRenderingContext2d, field: &mut ParticleField) {
    let (width, height) = field.size();
    context.clear_rect(0.0, 0.0, width, height);
    field.step();

    for particle in field.particles() {
        context.begin_path();
        let _ = context.arc(particle.x, particle.y, particle.radius, 0.0, TAU);
        context.set_fill_style_str(&particle.fill_style());
        context.fill();
    }

    context.set_line_width(LINK_WIDTH);
    for link in field.links() {
        context.begin_path();
        context.set_stroke_style_str(&link.stroke_style());
        context.move_to(link.from.0, link.from.1);
        context.line_to(link.to.0, link.to.1);
        context.stroke();
    }
}

fn install_parallax(config: &SiteConfig) -> Result<Option<EventListener>, DomError> {
    let Some(grid) = document()?.query_selector(PARALLAX_SELECTOR)? else {
        return Ok(None);
    };
    let nav = config.nav.clone();

    Ok(Some(EventListener::new(&win()?, "scroll", move |_| {
        let offset = parallax_offset(&nav, scroll_y());
        set_style(&grid, "transform", &format!("translateY({offset}px)"));
    })))
}

fn install_tilt(config: &SiteConfig) -> Result<Vec<EventListener>, DomError> {
    let mut listeners = Vec::new();

    for card in query_all(tilt::CARD_SELECTOR)? {
        let tilt_config = config.tilt.clone();
        let target = card.clone();
        listeners.push(EventListener::new(&card, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = target.get_bounding_client_rect();
            let pointer = CardPointer {
                x: f64::from(event.client_x()) - rect.left(),
                y: f64::from(event.client_y()) - rect.top(),
                width: rect.width(),
                height: rect.height(),
            };
            set_style(&target, "transform", &tilt_transform(&tilt_config, pointer));
        }));

        let target = card.clone();
        listeners.push(EventListener::new(&card, "mouseleave", move |_| {
            set_style(&target, "transform", "");
            set_style(&target, "transition", tilt::LEAVE_TRANSITION);
        }));

        let target = card.clone();
        listeners.push(EventListener::new(&card, "mouseenter", move |_| {
            set_style(&target, "transition", tilt::ENTER_TRANSITION);
        }));
    }

    Ok(listeners)
}

fn install_counters(
    config: &Rc<SiteConfig>,
    running: Rc<RefCell<Vec<FrameLoop>>>,
) -> Result<Option<OneShotObserver>, DomError> {
    let Some(stats) = document()?.query_selector(STATS_SELECTOR)? else {
        return Ok(None);
    };
    let numbers = query_within(&stats, STAT_NUMBER_SELECTOR)?;
    let config = config.clone();

    let observer = OneShotObserver::observe(
        vec![stats],
        config.counters.visibility_threshold,
        move |_| {
            let mut running = running.borrow_mut();
            for number in &numbers {
                let Some(mut counter) = counter_for(number, config.counters.steps) else {
                    continue;
                };
                let number = number.clone();
                running.push(FrameLoop::start(move |_| {
                    let frame = counter.advance();
                    number.set_text_content(Some(&frame.text));
                    !frame.finished
                }));
            }

            log_event(
                &config,
                LogLevel::Debug,
                "counters_started",
                json!({ "count": running.len() }),
            );
        },
    )?;

    Ok(Some(observer))
}

fn counter_for(element: &Element, steps: u32) -> Option<CounterAnimation> {
    let target = element
        .get_attribute("data-target")?
        .trim()
        .parse::<u64>()
        .ok()?;
    let prefix = element.get_attribute("data-prefix").unwrap_or_default();
    let suffix = element.get_attribute("data-suffix").unwrap_or_default();

    Some(CounterAnimation::new(target, prefix, suffix, steps))
}

/// Observers created once the loader is gone.
pub struct RevealEffects {
    _observers: Vec<OneShotObserver>,
    _timers: Rc<RefCell<Vec<Timeout>>>,
}

fn init_reveal(config: &SiteConfig) -> Result<RevealEffects, DomError> {
    let timers: Rc<RefCell<Vec<Timeout>>> = Rc::new(RefCell::new(Vec::new()));
    let mut observers = Vec::new();

    let reveal_targets = query_all(REVEAL_SELECTOR)?;
    let reveal_count = reveal_targets.len();
    {
        let timers = timers.clone();
        observers.push(OneShotObserver::observe(
            reveal_targets,
            config.reveal.reveal_threshold,
            move |target| {
                let delay = reveal_delay_ms(target.get_attribute("data-delay").as_deref());
                let target = target.clone();
                let reveal = move || {
                    let _ = target.class_list().add_1(REVEALED_CLASS);
                };

                if delay == 0 {
                    reveal();
                } else {
                    timers.borrow_mut().push(Timeout::new(delay, reveal));
                }
            },
        )?);
    }

    {
        let reveal_config = config.reveal.clone();
        observers.push(OneShotObserver::observe(
            query_all(SKILL_ITEM_SELECTOR)?,
            config.reveal.skill_threshold,
            move |item| {
                let Ok(Some(fill)) = item.query_selector(SKILL_FILL_SELECTOR) else {
                    return;
                };
                let width = skill_fill_width(&reveal_config, item.get_attribute("data-pct").as_deref());
                set_style(&fill, "width", &width);
            },
        )?);
    }

    {
        let reveal_config = config.reveal.clone();
        let timers = timers.clone();
        observers.push(OneShotObserver::observe(
            query_all(CARD_GROUP_SELECTOR)?,
            config.reveal.group_threshold,
            move |group| {
                let Ok(cards) = query_within(group, CARD_SELECTOR) else {
                    return;
                };
                let delays = stagger_delays(&reveal_config, cards.len());
                let mut timers = timers.borrow_mut();
                for (card, delay) in cards.into_iter().zip(delays) {
                    timers.push(Timeout::new(delay, move || {
                        set_style(&card, "animation-delay", "0ms");
                        let _ = card.class_list().add_1(CARD_VISIBLE_CLASS);
                    }));
                }
            },
        )?);
    }

    {
        let reveal_config = config.reveal.clone();
        observers.push(OneShotObserver::observe(
            query_all(GRADE_FILL_SELECTOR)?,
            config.reveal.grade_threshold,
            move |fill| {
                let width = grade_fill_width(&reveal_config, fill.get_attribute("data-pct").as_deref());
                set_style(fill, "width", &width);
            },
        )?);
    }

    log_event(
        config,
        LogLevel::Info,
        "reveal_initialized",
        json!({ "targets": reveal_count }),
    );

    Ok(RevealEffects {
        _observers: observers,
        _timers: timers,
    })
}
