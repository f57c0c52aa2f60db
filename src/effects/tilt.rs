use crate::config::TiltConfig;

pub const CARD_SELECTOR: &str = ".project-card";
pub const ENTER_TRANSITION: &str = "border-color 0.35s ease, box-shadow 0.35s ease";
pub const LEAVE_TRANSITION: &str = "transform 0.5s ease";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardPointer {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn tilt_angles(config: &TiltConfig, pointer: CardPointer) -> (f64, f64) {
    let cx = pointer.width / 2.0;
    let cy = pointer.height / 2.0;
    if cx <= 0.0 || cy <= 0.0 {
        return (0.0, 0.0);
    }

    let rot_x = ((pointer.y - cy) / cy) * -config.max_degrees;
    let rot_y = ((pointer.x - cx) / cx) * config.max_degrees;
    (rot_x + 0.0, rot_y + 0.0)
}

pub fn tilt_transform(config: &TiltConfig, pointer: CardPointer) -> String {
    let (rot_x, rot_y) = tilt_angles(config, pointer);
    format!(
        "translateY(-{}px) perspective({}px) rotateX({rot_x:.2}deg) rotateY({rot_y:.2}deg)",
        config.lift_px, config.perspective_px
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> CardPointer {
        CardPointer {
            x,
            y,
            width: 400.0,
            height: 300.0,
        }
    }

    #[test]
    fn center_is_flat() {
        let config = TiltConfig::default();

        assert_eq!(tilt_angles(&config, at(200.0, 150.0)), (0.0, 0.0));
        assert_eq!(
            tilt_transform(&config, at(200.0, 150.0)),
            "translateY(-6px) perspective(800px) rotateX(0.00deg) rotateY(0.00deg)"
        );
    }

    #[test]
    fn fractional_lift_and_perspective_are_kept() {
        let config = TiltConfig {
            lift_px: 6.5,
            perspective_px: 812.5,
            ..TiltConfig::default()
        };

        assert_eq!(
            tilt_transform(&config, at(200.0, 150.0)),
            "translateY(-6.5px) perspective(812.5px) rotateX(0.00deg) rotateY(0.00deg)"
        );
    }

    #[test]
    fn corners_reach_full_tilt() {
        let config = TiltConfig::default();

        assert_eq!(tilt_angles(&config, at(0.0, 0.0)), (5.0, -5.0));
        assert_eq!(tilt_angles(&config, at(400.0, 300.0)), (-5.0, 5.0));
    }

    #[test]
    fn tilt_is_linear_in_offset() {
        let config = TiltConfig::default();
        let (rot_x, rot_y) = tilt_angles(&config, at(300.0, 75.0));

        assert!((rot_x - 2.5).abs() < 1e-9);
        assert!((rot_y - 2.5).abs() < 1e-9);
    }

    #[test]
    fn collapsed_card_does_not_divide_by_zero() {
        let pointer = CardPointer {
            x: 10.0,
            y: 10.0,
            width: 0.0,
            height: 0.0,
        };

        assert_eq!(tilt_angles(&TiltConfig::default(), pointer), (0.0, 0.0));
    }
}
