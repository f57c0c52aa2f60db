use crate::config::TypingConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeStep {
    pub text: String,
    pub delay_ms: u32,
}

/// Types and deletes each phrase in turn, forever.
#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    phrase: usize,
    chars: usize,
    deleting: bool,
    type_ms: u32,
    delete_ms: u32,
    hold_ms: u32,
    next_phrase_ms: u32,
}

impl Typewriter {
    pub fn new(config: &TypingConfig) -> Self {
        Self {
            phrases: config
                .phrases
                .iter()
                .map(|phrase| phrase.chars().collect())
                .collect(),
            phrase: 0,
            chars: 0,
            deleting: false,
            type_ms: config.type_ms,
            delete_ms: config.delete_ms,
            hold_ms: config.hold_ms,
            next_phrase_ms: config.next_phrase_ms,
        }
    }

    #[cfg(test)]
    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    #[cfg(test)]
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Advances one character and returns the text to show plus the delay
    /// before the next tick.
    pub fn tick(&mut self) -> TypeStep {
        let Some(current) = self.phrases.get(self.phrase) else {
            return TypeStep {
                text: String::new(),
                delay_ms: self.hold_ms,
            };
        };
        let len = current.len();

        if self.deleting {
            self.chars = self.chars.saturating_sub(1);
        } else {
            self.chars = (self.chars + 1).min(len);
        }
        let text: String = current[..self.chars].iter().collect();

        let mut delay_ms = if self.deleting {
            self.delete_ms
        } else {
            self.type_ms
        };

        if !self.deleting && self.chars == len {
            delay_ms = self.hold_ms;
            self.deleting = true;
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
            delay_ms = self.next_phrase_ms;
        }

        TypeStep { text, delay_ms }
    }
}
