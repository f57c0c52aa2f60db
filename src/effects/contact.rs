use crate::config::ContactConfig;

pub const IDLE_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending…";
pub const SENT_NOTE: &str = "✅ Message sent! I'll get back to you soon.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactPhase {
    Idle,
    Sending,
}

/// Contact form controller. Delivery is simulated: a submission waits out a
/// fixed latency and then reports success. No message leaves the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactForm {
    phase: ContactPhase,
    note: Option<&'static str>,
    note_generation: u32,
    latency_ms: u32,
    note_visible_ms: u32,
}

impl ContactForm {
    pub fn new(config: &ContactConfig) -> Self {
        Self {
            phase: ContactPhase::Idle,
            note: None,
            note_generation: 0,
            latency_ms: config.simulated_latency_ms,
            note_visible_ms: config.note_visible_ms,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> ContactPhase {
        self.phase
    }

    pub fn submit_disabled(&self) -> bool {
        self.phase == ContactPhase::Sending
    }

    pub fn submit_label(&self) -> &'static str {
        match self.phase {
            ContactPhase::Idle => IDLE_LABEL,
            ContactPhase::Sending => SENDING_LABEL,
        }
    }

    pub fn note(&self) -> Option<&'static str> {
        self.note
    }

    /// Starts a simulated send and returns the latency to wait out, or `None`
    /// when a send is already pending.
    pub fn submit(&mut self) -> Option<u32> {
        if self.phase == ContactPhase::Sending {
            return None;
        }

        self.phase = ContactPhase::Sending;
        Some(self.latency_ms)
    }

    pub fn note_generation(&self) -> u32 {
        self.note_generation
    }

    pub fn note_visible_ms(&self) -> u32 {
        self.note_visible_ms
    }

    /// Completes the pending send: the button unlocks and the success note
    /// appears. Returns `false` when nothing was pending.
    pub fn deliver(&mut self) -> bool {
        if self.phase != ContactPhase::Sending {
            return false;
        }

        self.phase = ContactPhase::Idle;
        self.note = Some(SENT_NOTE);
        self.note_generation = self.note_generation.wrapping_add(1);
        true
    }

    /// Clears the note unless a newer delivery has replaced it since the
    /// clear was scheduled.
    pub fn clear_note(&mut self, generation: u32) {
        if generation == self.note_generation {
            self.note = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_locks_the_button_until_delivery() {
        let mut form = ContactForm::new(&ContactConfig::default());
        assert_eq!(form.submit_label(), "Send Message");

        assert_eq!(form.submit(), Some(1_800));
        assert!(form.submit_disabled());
        assert_eq!(form.phase(), ContactPhase::Sending);
        assert_eq!(form.submit_label(), "Sending…");
        assert_eq!(form.submit(), None);

        assert!(form.deliver());
        assert!(!form.submit_disabled());
        assert_eq!(form.submit_label(), "Send Message");
        assert_eq!(form.note(), Some(SENT_NOTE));
        assert_eq!(form.note_visible_ms(), 5_000);
    }

    #[test]
    fn note_clears_after_delivery() {
        let mut form = ContactForm::new(&ContactConfig::default());
        form.submit();
        form.deliver();

        form.clear_note(form.note_generation());
        assert_eq!(form.note(), None);
    }

    #[test]
    fn stale_clear_keeps_newer_note() {
        let mut form = ContactForm::new(&ContactConfig::default());
        form.submit();
        form.deliver();
        let first = form.note_generation();
        form.submit();
        form.deliver();

        form.clear_note(first);
        assert_eq!(form.note(), Some(SENT_NOTE));

        form.clear_note(form.note_generation());
        assert_eq!(form.note(), None);
    }

    #[test]
    fn deliver_without_submit_is_ignored() {
        let mut form = ContactForm::new(&ContactConfig::default());
        assert!(!form.deliver());
        assert_eq!(form.note(), None);
        assert_eq!(form.note_generation(), 0);
    }
}
