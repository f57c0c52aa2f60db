use serde::Deserialize;

use crate::telemetry::LogLevel;

const DEFAULT_PHRASES: [&str; 5] = [
    "Data Analyst",
    "Power BI Developer",
    "SQL Enthusiast",
    "Dashboard Storyteller",
    "Python Data Wrangler",
];

const DELAY_MS_BOUNDS: (u32, u32) = (0, 60_000);
const SMOOTHING_BOUNDS: (f64, f64) = (0.01, 1.0);
const THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const PARTICLE_COUNT_BOUNDS: (usize, usize) = (0, 400);
const LINK_DISTANCE_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const PERCENT_BOUNDS: (f64, f64) = (0.0, 100.0);
const COUNTER_STEPS_BOUNDS: (u32, u32) = (1, 600);
const TILT_DEGREES_BOUNDS: (f64, f64) = (0.0, 45.0);
const PARALLAX_FACTOR_BOUNDS: (f64, f64) = (0.0, 2.0);

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoaderConfig {
    pub hide_after_ms: u32,
    pub fallback_ms: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            hide_after_ms: 1_600,
            fallback_ms: 3_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CursorConfig {
    pub dot_smoothing: f64,
    pub ring_smoothing: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            dot_smoothing: 0.92,
            ring_smoothing: 0.14,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavConfig {
    pub scrolled_threshold_px: f64,
    pub section_offset_px: f64,
    pub parallax_factor: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold_px: 60.0,
            section_offset_px: 100.0,
            parallax_factor: 0.3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub type_ms: u32,
    pub delete_ms: u32,
    pub hold_ms: u32,
    pub next_phrase_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|phrase| phrase.to_string()).collect(),
            type_ms: 110,
            delete_ms: 60,
            hold_ms: 1_800,
            next_phrase_ms: 400,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleConfig {
    pub count: usize,
    pub link_distance: f64,
    pub link_opacity: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 60,
            link_distance: 120.0,
            link_opacity: 0.06,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub reveal_threshold: f64,
    pub skill_threshold: f64,
    pub group_threshold: f64,
    pub grade_threshold: f64,
    pub stagger_ms: u32,
    pub skill_default_pct: f64,
    pub grade_default_pct: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: 0.12,
            skill_threshold: 0.3,
            group_threshold: 0.15,
            grade_threshold: 0.3,
            stagger_ms: 70,
            skill_default_pct: 0.0,
            grade_default_pct: 70.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactConfig {
    pub simulated_latency_ms: u32,
    pub note_visible_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 1_800,
            note_visible_ms: 5_000,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatSpec {
    pub label: String,
    pub target: u64,
    pub prefix: String,
    pub suffix: String,
}

fn stat(label: &str, target: u64, prefix: &str, suffix: &str) -> StatSpec {
    StatSpec {
        label: label.to_string(),
        target,
        prefix: prefix.to_string(),
        suffix: suffix.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CounterConfig {
    pub steps: u32,
    pub visibility_threshold: f64,
    pub stats: Vec<StatSpec>,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            steps: 60,
            visibility_threshold: 0.5,
            stats: vec![
                stat("Years of experience", 3, "", "+"),
                stat("Cost savings identified", 233, "$", "K+"),
                stat("Records automated monthly", 3_900, "", "+"),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TiltConfig {
    pub max_degrees: f64,
    pub lift_px: f64,
    pub perspective_px: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_degrees: 5.0,
            lift_px: 6.0,
            perspective_px: 800.0,
        }
    }
}

/// Every tunable of the page behaviors. Values outside their bounds fall back
/// to the default rather than being clamped.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub log_level: LogLevel,
    pub toast_visible_ms: u32,
    pub loader: LoaderConfig,
    pub cursor: CursorConfig,
    pub nav: NavConfig,
    pub typing: TypingConfig,
    pub particles: ParticleConfig,
    pub reveal: RevealConfig,
    pub contact: ContactConfig,
    pub counters: CounterConfig,
    pub tilt: TiltConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            toast_visible_ms: 2_200,
            loader: LoaderConfig::default(),
            cursor: CursorConfig::default(),
            nav: NavConfig::default(),
            typing: TypingConfig::default(),
            particles: ParticleConfig::default(),
            reveal: RevealConfig::default(),
            contact: ContactConfig::default(),
            counters: CounterConfig::default(),
            tilt: TiltConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: Self = serde_json::from_str(raw)?;
        Ok(parsed.sanitized())
    }

    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        self.toast_visible_ms = u32_within(self.toast_visible_ms, defaults.toast_visible_ms, DELAY_MS_BOUNDS);

        self.loader.hide_after_ms = u32_within(
            self.loader.hide_after_ms,
            defaults.loader.hide_after_ms,
            DELAY_MS_BOUNDS,
        );
        self.loader.fallback_ms = u32_within(
            self.loader.fallback_ms,
            defaults.loader.fallback_ms,
            DELAY_MS_BOUNDS,
        );
        if self.loader.fallback_ms < self.loader.hide_after_ms {
            self.loader.fallback_ms = self.loader.hide_after_ms;
        }

        self.cursor.dot_smoothing = f64_within(
            self.cursor.dot_smoothing,
            defaults.cursor.dot_smoothing,
            SMOOTHING_BOUNDS,
        );
        self.cursor.ring_smoothing = f64_within(
            self.cursor.ring_smoothing,
            defaults.cursor.ring_smoothing,
            SMOOTHING_BOUNDS,
        );

        self.nav.scrolled_threshold_px = f64_within(
            self.nav.scrolled_threshold_px,
            defaults.nav.scrolled_threshold_px,
            OFFSET_PX_BOUNDS,
        );
        self.nav.section_offset_px = f64_within(
            self.nav.section_offset_px,
            defaults.nav.section_offset_px,
            OFFSET_PX_BOUNDS,
        );
        self.nav.parallax_factor = f64_within(
            self.nav.parallax_factor,
            defaults.nav.parallax_factor,
            PARALLAX_FACTOR_BOUNDS,
        );

        self.typing.phrases.retain(|phrase| !phrase.trim().is_empty());
        if self.typing.phrases.is_empty() {
            self.typing.phrases = defaults.typing.phrases.clone();
        }
        self.typing.type_ms = u32_within(self.typing.type_ms, defaults.typing.type_ms, DELAY_MS_BOUNDS);
        self.typing.delete_ms = u32_within(self.typing.delete_ms, defaults.typing.delete_ms, DELAY_MS_BOUNDS);
        self.typing.hold_ms = u32_within(self.typing.hold_ms, defaults.typing.hold_ms, DELAY_MS_BOUNDS);
        self.typing.next_phrase_ms = u32_within(
            self.typing.next_phrase_ms,
            defaults.typing.next_phrase_ms,
            DELAY_MS_BOUNDS,
        );

        self.particles.count = usize_within(
            self.particles.count,
            defaults.particles.count,
            PARTICLE_COUNT_BOUNDS,
        );
        self.particles.link_distance = f64_within(
            self.particles.link_distance,
            defaults.particles.link_distance,
            LINK_DISTANCE_BOUNDS,
        );
        self.particles.link_opacity = f64_within(
            self.particles.link_opacity,
            defaults.particles.link_opacity,
            THRESHOLD_BOUNDS,
        );

        self.reveal.reveal_threshold = f64_within(
            self.reveal.reveal_threshold,
            defaults.reveal.reveal_threshold,
            THRESHOLD_BOUNDS,
        );
        self.reveal.skill_threshold = f64_within(
            self.reveal.skill_threshold,
            defaults.reveal.skill_threshold,
            THRESHOLD_BOUNDS,
        );
        self.reveal.group_threshold = f64_within(
            self.reveal.group_threshold,
            defaults.reveal.group_threshold,
            THRESHOLD_BOUNDS,
        );
        self.reveal.grade_threshold = f64_within(
            self.reveal.grade_threshold,
            defaults.reveal.grade_threshold,
            THRESHOLD_BOUNDS,
        );
        self.reveal.stagger_ms = u32_within(self.reveal.stagger_ms, defaults.reveal.stagger_ms, DELAY_MS_BOUNDS);
        self.reveal.skill_default_pct = f64_within(
            self.reveal.skill_default_pct,
            defaults.reveal.skill_default_pct,
            PERCENT_BOUNDS,
        );
        self.reveal.grade_default_pct = f64_within(
            self.reveal.grade_default_pct,
            defaults.reveal.grade_default_pct,
            PERCENT_BOUNDS,
        );

        self.contact.simulated_latency_ms = u32_within(
            self.contact.simulated_latency_ms,
            defaults.contact.simulated_latency_ms,
            DELAY_MS_BOUNDS,
        );
        self.contact.note_visible_ms = u32_within(
            self.contact.note_visible_ms,
            defaults.contact.note_visible_ms,
            DELAY_MS_BOUNDS,
        );

        self.counters.steps = u32_within(self.counters.steps, defaults.counters.steps, COUNTER_STEPS_BOUNDS);
        self.counters.visibility_threshold = f64_within(
            self.counters.visibility_threshold,
            defaults.counters.visibility_threshold,
            THRESHOLD_BOUNDS,
        );

        self.tilt.max_degrees = f64_within(self.tilt.max_degrees, defaults.tilt.max_degrees, TILT_DEGREES_BOUNDS);
        self.tilt.lift_px = f64_within(self.tilt.lift_px, defaults.tilt.lift_px, OFFSET_PX_BOUNDS);
        self.tilt.perspective_px = f64_within(
            self.tilt.perspective_px,
            defaults.tilt.perspective_px,
            OFFSET_PX_BOUNDS,
        );

        self
    }
}

fn u32_within(value: u32, default: u32, bounds: (u32, u32)) -> u32 {
    Some(value)
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn usize_within(value: usize, default: usize, bounds: (usize, usize)) -> usize {
    Some(value)
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn f64_within(value: f64, default: f64, bounds: (f64, f64)) -> f64 {
    Some(value)
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SiteConfig::from_json("{}").expect("empty object is valid");
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(
            r#"{"typing": {"phrases": ["Rustacean"], "typeMs": 90}, "logLevel": "debug"}"#,
        )
        .expect("valid config");

        assert_eq!(config.typing.phrases, vec!["Rustacean".to_string()]);
        assert_eq!(config.typing.type_ms, 90);
        assert_eq!(config.typing.delete_ms, 60);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.particles.count, 60);
    }

    #[test]
    fn out_of_bounds_values_fall_back_to_defaults() {
        let config = SiteConfig::from_json(
            r#"{"cursor": {"dotSmoothing": 4.0}, "reveal": {"gradeDefaultPct": 140}, "counters": {"steps": 0}}"#,
        )
        .expect("valid config");

        assert_eq!(config.cursor.dot_smoothing, 0.92);
        assert_eq!(config.reveal.grade_default_pct, 70.0);
        assert_eq!(config.counters.steps, 60);
    }

    #[test]
    fn blank_phrase_list_falls_back_to_defaults() {
        let config = SiteConfig::from_json(r#"{"typing": {"phrases": ["", "   "]}}"#)
            .expect("valid config");

        assert_eq!(config.typing.phrases.len(), DEFAULT_PHRASES.len());
        assert_eq!(config.typing.phrases[0], "Data Analyst");
    }

    #[test]
    fn fallback_timer_never_precedes_primary_hide() {
        let config = SiteConfig::from_json(r#"{"loader": {"hideAfterMs": 2500, "fallbackMs": 1000}}"#)
            .expect("valid config");

        assert_eq!(config.loader.hide_after_ms, 2_500);
        assert_eq!(config.loader.fallback_ms, 2_500);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(SiteConfig::from_json("{not json").is_err());
    }
}
