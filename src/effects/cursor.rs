use crate::config::CursorConfig;

/// Elements that switch the cursor into its hover pose.
pub const HOVER_TARGETS: &str =
    "a, button, .project-card, .cert-card, .skill-tag-card, input, textarea, .social-btn, .nav-link, .btn";

pub const HOVER_CLASS: &str = "cursor-hover";
pub const CLICK_CLASS: &str = "cursor-click";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn approach(self, target: Point, smoothing: f64) -> Point {
        Point {
            x: self.x + (target.x - self.x) * smoothing,
            y: self.y + (target.y - self.y) * smoothing,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorEvent {
    HoverStart,
    HoverEnd,
    Press,
    Release,
    LeaveWindow,
    EnterWindow,
}

#[derive(Clone, Debug)]
pub struct CursorTrail {
    pointer: Point,
    dot: Point,
    ring: Point,
    dot_smoothing: f64,
    ring_smoothing: f64,
    hovering: bool,
    pressed: bool,
    visible: bool,
}

impl CursorTrail {
    pub fn new(config: &CursorConfig) -> Self {
        Self {
            pointer: Point::default(),
            dot: Point::default(),
            ring: Point::default(),
            dot_smoothing: config.dot_smoothing,
            ring_smoothing: config.ring_smoothing,
            hovering: false,
            pressed: false,
            visible: true,
        }
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
    }

    pub fn handle(&mut self, event: CursorEvent) {
        match event {
            CursorEvent::HoverStart => self.hovering = true,
            CursorEvent::HoverEnd => self.hovering = false,
            CursorEvent::Press => self.pressed = true,
            CursorEvent::Release => self.pressed = false,
            CursorEvent::LeaveWindow => self.visible = false,
            CursorEvent::EnterWindow => self.visible = true,
        }
    }

    /// One display frame: both decorations move a fixed fraction of the way
    /// toward the pointer.
    pub fn step(&mut self) {
        self.dot = self.dot.approach(self.pointer, self.dot_smoothing);
        self.ring = self.ring.approach(self.pointer, self.ring_smoothing);
    }

    pub fn dot(&self) -> Point {
        self.dot
    }

    pub fn ring(&self) -> Point {
        self.ring
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn opacity(&self) -> &'static str {
        if self.visible {
            "1"
        } else {
            "0"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: Point, b: Point) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    #[test]
    fn ring_lags_behind_dot() {
        let mut trail = CursorTrail::new(&CursorConfig::default());
        trail.pointer_moved(200.0, 100.0);

        trail.step();

        let target = Point::new(200.0, 100.0);
        assert!((trail.dot().x - 184.0).abs() < 1e-9);
        assert!((trail.ring().x - 28.0).abs() < 1e-9);
        assert!(distance(trail.ring(), target) > distance(trail.dot(), target));
    }

    #[test]
    fn both_decorations_converge_on_a_resting_pointer() {
        let mut trail = CursorTrail::new(&CursorConfig::default());
        trail.pointer_moved(-40.0, 75.0);

        let mut previous = f64::MAX;
        for _ in 0..200 {
            trail.step();
            let gap = distance(trail.ring(), Point::new(-40.0, 75.0));
            assert!(gap <= previous);
            previous = gap;
        }

        assert!(previous < 1e-6);
        assert!(distance(trail.dot(), Point::new(-40.0, 75.0)) < 1e-9);
    }

    #[test]
    fn pseudo_states_follow_synthetic_events() {
        let mut trail = CursorTrail::new(&CursorConfig::default());

        trail.handle(CursorEvent::HoverStart);
        trail.handle(CursorEvent::Press);
        assert!(trail.is_hovering());
        assert!(trail.is_pressed());

        trail.handle(CursorEvent::Release);
        trail.handle(CursorEvent::HoverEnd);
        assert!(!trail.is_hovering());
        assert!(!trail.is_pressed());
    }

    #[test]
    fn leaving_the_window_hides_the_cursor() {
        let mut trail = CursorTrail::new(&CursorConfig::default());
        assert_eq!(trail.opacity(), "1");

        trail.handle(CursorEvent::LeaveWindow);
        assert_eq!(trail.opacity(), "0");

        trail.handle(CursorEvent::EnterWindow);
        assert_eq!(trail.opacity(), "1");
    }
}
