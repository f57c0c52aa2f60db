#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HideTrigger {
    Ready,
    Fallback,
}

impl HideTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Fallback => "fallback",
        }
    }
}

/// Splash-screen gate shared by the primary and fallback timers.
#[derive(Debug, Default)]
pub struct LoaderGate {
    hidden_by: Option<HideTrigger>,
}

impl LoaderGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden_by.is_some()
    }

    #[cfg(test)]
    pub fn hidden_by(&self) -> Option<HideTrigger> {
        self.hidden_by
    }

    /// Scrolling stays locked until the loader is gone.
    pub fn body_overflow(&self) -> &'static str {
        if self.is_hidden() {
            "auto"
        } else {
            "hidden"
        }
    }

    /// Returns `true` only for the call that actually hides the loader; that
    /// caller owns the reveal initialization.
    pub fn hide(&mut self, trigger: HideTrigger) -> bool {
        if self.hidden_by.is_some() {
            return false;
        }

        self.hidden_by = Some(trigger);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_is_locked_until_hidden() {
        let mut gate = LoaderGate::new();
        assert_eq!(gate.body_overflow(), "hidden");

        assert!(gate.hide(HideTrigger::Ready));
        assert_eq!(gate.body_overflow(), "auto");
    }

    #[test]
    fn second_hide_is_a_no_op() {
        let mut gate = LoaderGate::new();

        assert!(gate.hide(HideTrigger::Ready));
        assert!(!gate.hide(HideTrigger::Fallback));
        assert_eq!(gate.hidden_by(), Some(HideTrigger::Ready));
    }

    #[test]
    fn fallback_hides_when_primary_never_fires() {
        let mut gate = LoaderGate::new();

        assert!(gate.hide(HideTrigger::Fallback));
        assert!(gate.is_hidden());
        assert_eq!(gate.hidden_by().map(HideTrigger::as_str), Some("fallback"));
    }
}
