use crate::config::ParticleConfig;

/// Particles drifting past this far above the top edge get recycled.
const RECYCLE_MARGIN: f64 = 10.0;
/// Recycled particles spawn within this band below the bottom edge.
const SPAWN_BAND: f64 = 10.0;

pub const PALETTE: [(u8, u8, u8); 3] = [(79, 142, 247), (34, 211, 238), (167, 139, 250)];
const LINK_COLOR: (u8, u8, u8) = (79, 142, 247);
pub const LINK_WIDTH: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub alpha: f64,
    pub color: (u8, u8, u8),
}

impl Particle {
    fn spawn(rng: &mut fastrand::Rng, width: f64, y: f64) -> Self {
        Self {
            x: rng.f64() * width,
            y,
            vx: (rng.f64() - 0.5) * 0.3,
            vy: -rng.f64() * 0.4 - 0.1,
            radius: rng.f64() * 1.5 + 0.5,
            alpha: rng.f64() * 0.4 + 0.1,
            color: PALETTE[rng.usize(..PALETTE.len())],
        }
    }

    pub fn fill_style(&self) -> String {
        let (r, g, b) = self.color;
        format!("rgba({r},{g},{b},{})", self.alpha)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub alpha: f64,
}

impl Link {
    pub fn stroke_style(&self) -> String {
        let (r, g, b) = LINK_COLOR;
        format!("rgba({r},{g},{b},{})", self.alpha)
    }
}

/// Fixed-size, self-recycling particle pool sized to the canvas.
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    link_distance: f64,
    link_opacity: f64,
    rng: fastrand::Rng,
}

impl ParticleField {
    pub fn new(config: &ParticleConfig, width: f64, height: f64, mut rng: fastrand::Rng) -> Self {
        let particles = (0..config.count)
            .map(|_| {
                let y = rng.f64() * height;
                Particle::spawn(&mut rng, width, y)
            })
            .collect();

        Self {
            particles,
            width,
            height,
            link_distance: config.link_distance,
            link_opacity: config.link_opacity,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Moves every particle one frame and recycles those that left the top.
    pub fn step(&mut self) {
        for index in 0..self.particles.len() {
            let particle = &mut self.particles[index];
            particle.x += particle.vx;
            particle.y += particle.vy;

            if particle.y < -RECYCLE_MARGIN {
                let y = self.height + self.rng.f64() * SPAWN_BAND;
                self.particles[index] = Particle::spawn(&mut self.rng, self.width, y);
            }
        }
    }

    /// Every pair closer than the link distance, fading with distance.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();

        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let dx = a.x - b.x;
                let dy = a.y - b.y;
                let dist = (dx * dx + dy * dy).sqrt();

                if dist < self.link_distance {
                    links.push(Link {
                        from: (a.x, a.y),
                        to: (b.x, b.y),
                        alpha: self.link_opacity * (1.0 - dist / self.link_distance),
                    });
                }
            }
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(count: usize, seed: u64) -> ParticleField {
        let config = ParticleConfig {
            count,
            ..ParticleConfig::default()
        };
        ParticleField::new(&config, 1_280.0, 720.0, fastrand::Rng::with_seed(seed))
    }

    fn assert_in_declared_ranges(particle: &Particle) {
        assert!((-0.15..0.15).contains(&particle.vx), "vx {}", particle.vx);
        assert!(particle.vy <= -0.1 && particle.vy > -0.5, "vy {}", particle.vy);
        assert!((0.5..2.0).contains(&particle.radius));
        assert!((0.1..0.5).contains(&particle.alpha));
        assert!(PALETTE.contains(&particle.color));
    }

    #[test]
    fn initial_pool_fills_the_canvas() {
        let field = field(60, 7);

        assert_eq!(field.particles().len(), 60);
        for particle in field.particles() {
            assert!((0.0..1_280.0).contains(&particle.x));
            assert!((0.0..720.0).contains(&particle.y));
            assert_in_declared_ranges(particle);
        }
    }

    #[test]
    fn recycled_particles_respawn_below_the_viewport() {
        let mut field = field(60, 42);
        for particle in &mut field.particles {
            particle.y = -9.95;
            particle.vy = -0.1;
        }

        field.step();

        for particle in field.particles() {
            assert!((720.0..730.0).contains(&particle.y), "y {}", particle.y);
            assert!((0.0..1_280.0).contains(&particle.x));
            assert_in_declared_ranges(particle);
        }
    }

    #[test]
    fn pool_size_is_constant_over_many_frames() {
        let mut field = field(60, 3);

        for _ in 0..20_000 {
            field.step();
        }

        assert_eq!(field.particles().len(), 60);
        for particle in field.particles() {
            assert!(particle.y >= -RECYCLE_MARGIN - 0.5);
            assert!(particle.y < 720.0 + SPAWN_BAND);
        }
    }

    #[test]
    fn resize_moves_the_spawn_line() {
        let mut field = field(5, 9);
        field.resize(400.0, 300.0);
        for particle in &mut field.particles {
            particle.y = -11.0;
        }

        field.step();

        assert_eq!(field.size(), (400.0, 300.0));
        for particle in field.particles() {
            assert!((300.0..310.0).contains(&particle.y));
            assert!((0.0..400.0).contains(&particle.x));
        }
    }

    #[test]
    fn links_fade_with_distance_and_stop_at_threshold() {
        let mut field = field(3, 1);
        field.particles[0].x = 0.0;
        field.particles[0].y = 0.0;
        field.particles[1].x = 60.0;
        field.particles[1].y = 0.0;
        field.particles[2].x = 500.0;
        field.particles[2].y = 500.0;

        let links = field.links();

        assert_eq!(links.len(), 1);
        assert!((links[0].alpha - 0.03).abs() < 1e-12);
        assert_eq!(links[0].stroke_style(), "rgba(79,142,247,0.03)");
    }
}
