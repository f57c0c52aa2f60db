use crate::config::NavConfig;

pub const ACCENT_COLOR: &str = "var(--accent-cyan)";

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavSnapshot {
    pub scrolled: bool,
    pub progress_pct: f64,
    pub active: Option<String>,
}

impl Default for NavSnapshot {
    fn default() -> Self {
        Self {
            scrolled: false,
            progress_pct: 0.0,
            active: None,
        }
    }
}

/// Share of the scrollable distance already travelled, in percent.
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }

    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

/// The section containing the probe line `scroll_y + offset`. Sections are
/// checked in document order and the first hit wins.
pub fn active_section<'a>(sections: &'a [SectionBounds], scroll_y: f64, offset: f64) -> Option<&'a str> {
    let probe = scroll_y + offset;
    sections
        .iter()
        .find(|section| section.contains(probe))
        .map(|section| section.id.as_str())
}

pub fn snapshot(
    config: &NavConfig,
    scroll_y: f64,
    document_height: f64,
    viewport_height: f64,
    sections: &[SectionBounds],
) -> NavSnapshot {
    NavSnapshot {
        scrolled: scroll_y > config.scrolled_threshold_px,
        progress_pct: scroll_progress(scroll_y, document_height, viewport_height),
        active: active_section(sections, scroll_y, config.section_offset_px).map(str::to_string),
    }
}

pub fn parallax_offset(config: &NavConfig, scroll_y: f64) -> f64 {
    scroll_y * config.parallax_factor
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed(self) -> Self {
        Self { open: false }
    }

    /// Inline styles for the three hamburger bars, top to bottom.
    pub fn bar_styles(self) -> [&'static str; 3] {
        if self.open {
            [
                "transform: rotate(45deg) translate(5px,5px);",
                "opacity: 0;",
                "transform: rotate(-45deg) translate(5px,-5px);",
            ]
        } else {
            ["", "opacity: 1;", ""]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("home", 0.0, 700.0),
            SectionBounds::new("about", 700.0, 500.0),
            SectionBounds::new("projects", 1_400.0, 900.0),
        ]
    }

    #[test]
    fn progress_is_zero_when_page_does_not_scroll() {
        assert_eq!(scroll_progress(0.0, 600.0, 800.0), 0.0);
        assert_eq!(scroll_progress(120.0, 800.0, 800.0), 0.0);
    }

    #[test]
    fn progress_tracks_scrollable_fraction() {
        assert_eq!(scroll_progress(500.0, 2_000.0, 1_000.0), 50.0);
        assert_eq!(scroll_progress(1_000.0, 2_000.0, 1_000.0), 100.0);
    }

    #[test]
    fn probe_uses_fixed_offset() {
        let sections = sections();

        assert_eq!(active_section(&sections, 0.0, 100.0), Some("home"));
        assert_eq!(active_section(&sections, 600.0, 100.0), Some("about"));
        assert_eq!(active_section(&sections, 599.0, 100.0), Some("home"));
    }

    #[test]
    fn gap_between_sections_selects_nothing() {
        let sections = sections();

        assert_eq!(active_section(&sections, 1_150.0, 100.0), None);
        assert_eq!(active_section(&sections, 5_000.0, 100.0), None);
    }

    #[test]
    fn overlapping_sections_still_select_one_link() {
        let sections = vec![
            SectionBounds::new("a", 0.0, 1_000.0),
            SectionBounds::new("b", 500.0, 1_000.0),
        ];

        let snapshot = snapshot(&NavConfig::default(), 600.0, 3_000.0, 800.0, &sections);
        assert_eq!(snapshot.active.as_deref(), Some("a"));
    }

    #[test]
    fn resized_layout_changes_state_at_same_scroll() {
        let config = NavConfig::default();
        let wide = snapshot(&config, 650.0, 2_300.0, 1_000.0, &sections());

        let narrow_sections = vec![
            SectionBounds::new("home", 0.0, 900.0),
            SectionBounds::new("about", 900.0, 800.0),
        ];
        let narrow = snapshot(&config, 650.0, 3_300.0, 700.0, &narrow_sections);

        assert_eq!(wide.active.as_deref(), Some("about"));
        assert_eq!(narrow.active.as_deref(), Some("home"));
        assert!((wide.progress_pct - 50.0).abs() < 1e-9);
        assert!((narrow.progress_pct - 25.0).abs() < 1e-9);
    }

    #[test]
    fn navbar_turns_solid_past_threshold() {
        let config = NavConfig::default();

        assert!(!snapshot(&config, 60.0, 3_000.0, 800.0, &[]).scrolled);
        assert!(snapshot(&config, 61.0, 3_000.0, 800.0, &[]).scrolled);
    }

    #[test]
    fn parallax_scales_scroll_offset() {
        assert!((parallax_offset(&NavConfig::default(), 500.0) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn menu_closes_from_any_state() {
        let menu = MobileMenu::default().toggled();
        assert!(menu.is_open());
        assert_eq!(menu.bar_styles()[1], "opacity: 0;");

        let menu = menu.closed();
        assert!(!menu.is_open());
        assert_eq!(menu.bar_styles(), ["", "opacity: 1;", ""]);
        assert!(!menu.closed().is_open());
    }
}
