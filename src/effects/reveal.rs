use crate::config::RevealConfig;

pub const REVEAL_SELECTOR: &str = ".reveal-up, .reveal-left, .reveal-right";
pub const REVEALED_CLASS: &str = "revealed";
pub const SKILL_ITEM_SELECTOR: &str = ".skill-item";
pub const SKILL_FILL_SELECTOR: &str = ".skill-bar-fill";
pub const CARD_GROUP_SELECTOR: &str = ".skills-group";
pub const CARD_SELECTOR: &str = ".skill-tag-card";
pub const CARD_VISIBLE_CLASS: &str = "card-visible";
pub const GRADE_FILL_SELECTOR: &str = ".cgpa-fill";

/// Browsers report ratios a hair under the threshold that triggered them.
const RATIO_TOLERANCE: f64 = 0.01;

/// One-shot visibility bookkeeping for a list of observed targets. A target
/// fires the first time it reaches the threshold and is then forgotten.
#[derive(Clone, Debug)]
pub struct VisibilityTracker {
    threshold: f64,
    watching: Vec<bool>,
}

impl VisibilityTracker {
    pub fn new(threshold: f64, targets: usize) -> Self {
        Self {
            threshold,
            watching: vec![true; targets],
        }
    }

    #[cfg(test)]
    pub fn is_watching(&self, index: usize) -> bool {
        self.watching.get(index).copied().unwrap_or(false)
    }

    #[cfg(test)]
    pub fn remaining(&self) -> usize {
        self.watching.iter().filter(|watching| **watching).count()
    }

    /// Returns `true` exactly once per target, on its first sufficiently
    /// visible report.
    pub fn report(&mut self, index: usize, intersecting: bool, ratio: f64) -> bool {
        let Some(watching) = self.watching.get_mut(index) else {
            return false;
        };

        if !*watching || !intersecting || ratio + RATIO_TOLERANCE < self.threshold {
            return false;
        }

        *watching = false;
        true
    }
}

/// Leading-digit integer parse: `"250ms"` is 250, anything unparsable is `None`.
fn leading_integer(raw: &str) -> Option<u32> {
    let digits: String = raw.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(index, _)| index)
        .unwrap_or(trimmed.len());

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Delay before an element is marked revealed, from its `data-delay`.
pub fn reveal_delay_ms(declared: Option<&str>) -> u32 {
    declared.and_then(leading_integer).unwrap_or(0)
}

fn percent_width(declared: Option<&str>, default_pct: f64) -> String {
    let pct = declared
        .and_then(leading_number)
        .map(|value| value.clamp(0.0, 100.0))
        .unwrap_or(default_pct);
    format!("{pct}%")
}

pub fn skill_fill_width(config: &RevealConfig, declared: Option<&str>) -> String {
    percent_width(declared, config.skill_default_pct)
}

pub fn grade_fill_width(config: &RevealConfig, declared: Option<&str>) -> String {
    percent_width(declared, config.grade_default_pct)
}

pub fn stagger_delays(config: &RevealConfig, count: usize) -> impl Iterator<Item = u32> {
    let step = config.stagger_ms;
    (0..count).map(move |index| step.saturating_mul(index as u32))
}
