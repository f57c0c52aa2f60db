pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    pub finished: bool,
}

/// Counts from zero to a target in equal increments, one per display frame.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: u64,
    prefix: String,
    suffix: String,
    step: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: u64, prefix: impl Into<String>, suffix: impl Into<String>, steps: u32) -> Self {
        Self {
            target,
            prefix: prefix.into(),
            suffix: suffix.into(),
            step: target as f64 / f64::from(steps.max(1)),
            current: 0.0,
            finished: false,
        }
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn render(&self, value: u64) -> String {
        format!("{}{}{}", self.prefix, group_thousands(value), self.suffix)
    }

    /// The text for the next frame. Once the running value reaches the target
    /// the frame shows the exact target and the animation is finished.
    pub fn advance(&mut self) -> CounterFrame {
        if !self.finished {
            self.current += self.step;
            if self.current >= self.target as f64 {
                self.finished = true;
            }
        }

        let value = if self.finished {
            self.target
        } else {
            (self.current.floor() as u64).min(self.target)
        };

        CounterFrame {
            text: self.render(value),
            finished: self.finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(text: &str) -> u64 {
        text.chars()
            .filter(char::is_ascii_digit)
            .collect::<String>()
            .parse()
            .expect("frame contains digits")
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(3_900), "3,900");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn counts_up_without_overshooting_and_lands_on_target() {
        let mut counter = CounterAnimation::new(3_900, "", "+", 60);
        let mut frames = Vec::new();

        loop {
            let frame = counter.advance();
            let done = frame.finished;
            frames.push(frame.text);
            if done {
                break;
            }
            assert!(frames.len() < 1_000, "counter never finished");
        }

        let values: Vec<u64> = frames.iter().map(|text| numeric(text)).collect();
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(values.iter().all(|value| *value <= 3_900));
        assert_eq!(frames.last().map(String::as_str), Some("3,900+"));
        assert_eq!(frames.len(), 60);
    }

    #[test]
    fn prefix_and_suffix_wrap_every_frame() {
        let mut counter = CounterAnimation::new(233, "$", "K+", 60);

        let first = counter.advance();
        assert!(first.text.starts_with('$'));
        assert!(first.text.ends_with("K+"));
    }

    #[test]
    fn finished_counter_keeps_showing_target() {
        let mut counter = CounterAnimation::new(3, "", "+", 2);

        assert_eq!(counter.advance().text, "1+");
        assert_eq!(counter.advance(), CounterFrame { text: "3+".to_string(), finished: true });
        assert_eq!(counter.advance().text, "3+");
        assert!(counter.is_finished());
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut counter = CounterAnimation::new(0, "", "", 60);
        assert_eq!(counter.advance(), CounterFrame { text: "0".to_string(), finished: true });
    }
}
