use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use gloo::timers::future::TimeoutFuture;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlElement, HtmlFormElement, MouseEvent, ScrollBehavior, ScrollToOptions, SubmitEvent};
use yew::prelude::*;

use crate::behaviors;
use crate::config::SiteConfig;
use crate::dom::{document, document_height, load_site_config, scroll_y, viewport_size, WebClipboard};
use crate::effects::clipboard::copy_text;
use crate::effects::contact::ContactForm;
use crate::effects::navigation::{self, MobileMenu, NavSnapshot, SectionBounds, ACCENT_COLOR};
use crate::effects::typewriter::Typewriter;

const NAV_SECTIONS: [(&str, &str); 5] = [
    ("home", "Home"),
    ("about", "About"),
    ("skills", "Skills"),
    ("projects", "Projects"),
    ("contact", "Contact"),
];
const CONTACT_EMAIL: &str = "hello@priyanair.dev";
const CONTACT_PHONE: &str = "+91 98450 12345";

#[hook]
fn use_site_config() -> Rc<SiteConfig> {
    use_context::<Rc<SiteConfig>>().unwrap_or_default()
}

fn section_bounds() -> Vec<SectionBounds> {
    let Ok(document) = document() else {
        return Vec::new();
    };

    NAV_SECTIONS
        .iter()
        .filter_map(|(id, _)| {
            let section = document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()?;
            Some(SectionBounds::new(
                *id,
                f64::from(section.offset_top()),
                f64::from(section.offset_height()),
            ))
        })
        .collect()
}

fn current_nav_snapshot(config: &SiteConfig) -> NavSnapshot {
    let (_, viewport_height) = viewport_size();
    navigation::snapshot(
        &config.nav,
        scroll_y(),
        document_height(),
        viewport_height,
        &section_bounds(),
    )
}

#[function_component(Navbar)]
fn navbar() -> Html {
    let config = use_site_config();
    let snapshot = use_state_eq(NavSnapshot::default);
    let menu = use_state_eq(MobileMenu::default);

    {
        let snapshot = snapshot.clone();
        use_effect_with(config, move |config| {
            let config = config.clone();
            snapshot.set(current_nav_snapshot(&config));
            let listeners: Vec<EventListener> = window()
                .map(|win| {
                    ["scroll", "resize"]
                        .into_iter()
                        .map(|event| {
                            let snapshot = snapshot.clone();
                            let config = config.clone();
                            EventListener::new(&win, event, move |_| {
                                snapshot.set(current_nav_snapshot(&config));
                            })
                        })
                        .collect()
                })
                .unwrap_or_default();
            move || drop(listeners)
        });
    }

    let on_toggle = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set((*menu).toggled()))
    };

    let on_link = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set((*menu).closed()))
    };

    let bars = (*menu).bar_styles();
    let progress_style = format!("width: {}%;", snapshot.progress_pct);

    html! {
        <>
            <div id="scrollProgress" class="scroll-progress" style={progress_style}></div>
            <nav id="navbar" class={classes!("navbar", snapshot.scrolled.then_some("scrolled"))}>
                <a class="nav-logo" href="#home">{"PN"}<span class="accent">{"."}</span></a>
                <ul id="navLinks" class={classes!("nav-links", (*menu).is_open().then_some("open"))}>
                    { for NAV_SECTIONS.iter().map(|(id, label)| {
                        let active = snapshot.active.as_deref() == Some(*id);
                        let style = active.then(|| format!("color: {ACCENT_COLOR};"));
                        html! {
                            <li>
                                <a class="nav-link" href={format!("#{id}")} style={style} onclick={on_link.clone()}>
                                    {*label}
                                </a>
                            </li>
                        }
                    }) }
                </ul>
                <button id="hamburger" class="hamburger" type="button" aria-label="Toggle navigation" onclick={on_toggle}>
                    { for bars.iter().map(|style| html! { <span style={*style}></span> }) }
                </button>
            </nav>
        </>
    }
}

#[function_component(TypedText)]
fn typed_text() -> Html {
    let config = use_site_config();
    let text = use_state(String::new);

    {
        let text = text.clone();
        use_effect_with(config, move |config| {
            let alive = Rc::new(Cell::new(true));
            let running = alive.clone();
            let mut typer = Typewriter::new(&config.typing);

            spawn_local(async move {
                while running.get() {
                    let step = typer.tick();
                    text.set(step.text);
                    TimeoutFuture::new(step.delay_ms).await;
                }
            });

            move || alive.set(false)
        });
    }

    html! {
        <span class="typed-wrap">
            <span id="typedText" class="typed-text">{(*text).clone()}</span>
            <span class="typed-caret" aria-hidden="true">{"|"}</span>
        </span>
    }
}

#[function_component(HeroStats)]
fn hero_stats() -> Html {
    let config = use_site_config();

    html! {
        <div class="hero-stats">
            { for config.counters.stats.iter().map(|stat| html! {
                <div class="stat">
                    <span
                        class="stat-num"
                        data-target={stat.target.to_string()}
                        data-prefix={stat.prefix.clone()}
                        data-suffix={stat.suffix.clone()}
                    >
                        {format!("{}0{}", stat.prefix, stat.suffix)}
                    </span>
                    <span class="stat-label">{stat.label.clone()}</span>
                </div>
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CopyButtonProps {
    text: AttrValue,
    label: AttrValue,
    message: AttrValue,
    on_copy: Callback<(AttrValue, AttrValue)>,
}

#[function_component(CopyButton)]
fn copy_button(props: &CopyButtonProps) -> Html {
    let onclick = {
        let text = props.text.clone();
        let message = props.message.clone();
        let on_copy = props.on_copy.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            event.stop_propagation();
            on_copy.emit((text.clone(), message.clone()));
        })
    };

    html! {
        <button class="contact-item social-btn" type="button" onclick={onclick}>
            <span class="contact-label">{props.label.clone()}</span>
            <span class="contact-value">{props.text.clone()}</span>
        </button>
    }
}

pub enum ContactAction {
    Submit,
    Deliver,
    ClearNote(u32),
}

impl Reducible for ContactForm {
    type Action = ContactAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ContactAction::Submit => {
                next.submit();
            }
            ContactAction::Deliver => {
                next.deliver();
            }
            ContactAction::ClearNote(generation) => next.clear_note(generation),
        }
        Rc::new(next)
    }
}

#[function_component(ContactSection)]
fn contact_section() -> Html {
    let config = use_site_config();
    let form = {
        let contact = config.contact.clone();
        use_reducer(move || ContactForm::new(&contact))
    };
    let form_ref = use_node_ref();

    {
        let dispatcher = form.dispatcher();
        let showing = form.note().is_some();
        let visible_ms = form.note_visible_ms();
        use_effect_with(form.note_generation(), move |generation| {
            let generation = *generation;
            let timeout = showing.then(|| {
                Timeout::new(visible_ms, move || {
                    dispatcher.dispatch(ContactAction::ClearNote(generation))
                })
            });
            move || drop(timeout)
        });
    }

    let onsubmit = {
        let form = form.clone();
        let form_ref = form_ref.clone();
        let latency_ms = config.contact.simulated_latency_ms;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if form.submit_disabled() {
                return;
            }

            form.dispatch(ContactAction::Submit);
            let dispatcher = form.dispatcher();
            let form_ref = form_ref.clone();
            spawn_local(async move {
                TimeoutFuture::new(latency_ms).await;
                dispatcher.dispatch(ContactAction::Deliver);
                if let Some(element) = form_ref.cast::<HtmlFormElement>() {
                    element.reset();
                }
            });
        })
    };

    let note_style = form.note().map(|_| format!("color: {ACCENT_COLOR};"));

    html! {
        <form id="contactForm" class="contact-form reveal-right" ref={form_ref} onsubmit={onsubmit}>
            <div class="form-row">
                <input type="text" name="name" placeholder="Your name" required=true />
                <input type="email" name="email" placeholder="Your email" required=true />
            </div>
            <input type="text" name="subject" placeholder="Subject" />
            <textarea name="message" rows="5" placeholder="Your message" required=true></textarea>
            <button id="submitBtn" class="btn btn-primary" type="submit" disabled={form.submit_disabled()}>
                <span>{form.submit_label()}</span>
            </button>
            <p id="formNote" class="form-note" style={note_style}>{form.note().unwrap_or_default()}</p>
        </form>
    }
}

fn scroll_to_top() {
    if let Some(win) = window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| load_site_config());
    let toast = use_state(|| None::<String>);
    let toast_timer = use_mut_ref(|| None::<Timeout>);

    {
        let config = config.clone();
        use_effect_with((), move |_| {
            let effects = behaviors::mount(config);
            move || drop(effects)
        });
    }

    let on_copy = {
        let config = config.clone();
        let toast = toast.clone();
        let toast_timer = toast_timer.clone();
        Callback::from(move |(text, message): (AttrValue, AttrValue)| {
            let config = config.clone();
            let toast = toast.clone();
            let toast_timer = toast_timer.clone();
            spawn_local(async move {
                let shown = copy_text(&config, &WebClipboard, &text, &message).await;
                toast.set(Some(shown));

                let hide = {
                    let toast = toast.clone();
                    Timeout::new(config.toast_visible_ms, move || toast.set(None))
                };
                toast_timer.borrow_mut().replace(hide);
            });
        })
    };

    let on_back_to_top = Callback::from(|event: MouseEvent| {
        event.prevent_default();
        scroll_to_top();
    });

    html! {
        <ContextProvider<Rc<SiteConfig>> context={config.clone()}>
            <div id="loader" class="loader" aria-hidden="true">
                <div class="loader-ring"></div>
                <p class="loader-text">{"Loading portfolio"}</p>
            </div>
            <div id="cursorDot" class="cursor-dot" aria-hidden="true"></div>
            <div id="cursorRing" class="cursor-ring" aria-hidden="true"></div>
            <canvas id="particleCanvas" class="particle-canvas" aria-hidden="true"></canvas>

            <Navbar />

            <main>
                <section id="home" class="hero">
                    <div class="hero-grid" aria-hidden="true"></div>
                    <div class="hero-content">
                        <p class="hero-greeting reveal-up">{"Hi, I'm"}</p>
                        <h1 class="hero-name reveal-up" data-delay="100">{"Priya Nair"}</h1>
                        <p class="hero-role reveal-up" data-delay="200"><TypedText /></p>
                        <p class="hero-summary reveal-up" data-delay="300">
                            {"I turn messy operational data into dashboards and models that people actually use."}
                        </p>
                        <div class="hero-cta reveal-up" data-delay="400">
                            <a class="btn btn-primary" href="#projects">{"View Projects"}</a>
                            <a class="btn btn-ghost" href="#contact">{"Get in Touch"}</a>
                        </div>
                        <HeroStats />
                    </div>
                </section>

                <section id="about" class="section">
                    <h2 class="section-title reveal-up">{"About"}</h2>
                    <div class="about-grid">
                        <p class="reveal-left">
                            {"Data analyst with three years in retail and logistics reporting. I build SQL pipelines, \
                              Power BI models, and the Python glue in between."}
                        </p>
                        <div class="education reveal-right" data-delay="150">
                            <h3>{"B.Sc. Statistics"}</h3>
                            <p class="muted">{"University of Kerala"}</p>
                            <div class="cgpa-bar">
                                <div class="cgpa-fill" data-pct="86"></div>
                            </div>
                            <p class="cgpa-label">{"CGPA 8.6 / 10"}</p>
                        </div>
                    </div>
                </section>

                <section id="skills" class="section">
                    <h2 class="section-title reveal-up">{"Skills"}</h2>
                    <div class="skill-bars">
                        { for [("SQL", 90), ("Power BI", 85), ("Python", 80), ("Excel", 88)].iter().map(|(name, pct)| html! {
                            <div class="skill-item" data-pct={pct.to_string()}>
                                <div class="skill-head"><span>{*name}</span><span>{format!("{pct}%")}</span></div>
                                <div class="skill-bar"><div class="skill-bar-fill"></div></div>
                            </div>
                        }) }
                    </div>
                    { for [
                        ("Analysis", ["Pandas", "NumPy", "Statistics", "A/B Testing"]),
                        ("Visualization", ["Power BI", "DAX", "Tableau", "Matplotlib"]),
                    ].iter().map(|(group, tags)| html! {
                        <div class="skills-group">
                            <h3>{*group}</h3>
                            <div class="skill-tags">
                                { for tags.iter().map(|tag| html! { <div class="skill-tag-card">{*tag}</div> }) }
                            </div>
                        </div>
                    }) }
                </section>

                <section id="projects" class="section">
                    <h2 class="section-title reveal-up">{"Projects"}</h2>
                    <div class="project-grid">
                        { for [
                            ("Sales Performance Dashboard", "Power BI model over 2M order lines with drill-through by region and SKU."),
                            ("Inventory Forecasting", "Python seasonal forecasts that cut stock-outs across 40 stores."),
                            ("Churn Explorer", "SQL cohort analysis surfaced as an interactive retention report."),
                        ].iter().enumerate().map(|(index, (title, summary))| html! {
                            <article class="project-card reveal-up" data-delay={(index * 120).to_string()}>
                                <h3>{*title}</h3>
                                <p>{*summary}</p>
                            </article>
                        }) }
                    </div>
                </section>

                <section id="contact" class="section">
                    <h2 class="section-title reveal-up">{"Contact"}</h2>
                    <div class="contact-grid">
                        <div class="contact-details reveal-left">
                            <CopyButton text={CONTACT_EMAIL} label="Email" message="Email copied!" on_copy={on_copy.clone()} />
                            <CopyButton text={CONTACT_PHONE} label="Phone" message="Phone number copied!" on_copy={on_copy} />
                        </div>
                        <ContactSection />
                    </div>
                </section>
            </main>

            <footer class="footer">
                <p class="muted">{"Built with Rust and Yew."}</p>
                <a id="backToTop" class="back-to-top" href="#home" aria-label="Back to top" onclick={on_back_to_top}>{"↑"}</a>
            </footer>

            <div id="copyToast" class={classes!("copy-toast", toast.is_some().then_some("show"))} role="status">
                {(*toast).clone().unwrap_or_default()}
            </div>
        </ContextProvider<Rc<SiteConfig>>>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
