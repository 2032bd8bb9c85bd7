//! Geometry of a color wheel: a ring for the primary channel around a plane for the two
//! secondary channels.
//!
//! Widget coordinates are in [0, 1]², with y pointing down. Centered widget coordinates are in
//! [-1, 1]², origin at the center of the widget. Shape coordinates are the two secondary
//! channels, in [0, 1]² for points inside the plane.

use std::f64::consts::{FRAC_1_SQRT_2, PI, TAU};

const MIN_LENGTH: f64 = 1e-6;

/// The ring around the plane that selects the primary channel.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimaryRing {
    /// Width of the ring, relative to the widget size. Zero means there is no ring.
    pub thickness: f64,
    /// Gap between the ring and the plane.
    pub margin: f64,
    /// Angle in radians added to the ring before mapping it to a value.
    pub rotation: f64,
    /// Whether the value grows clockwise.
    pub reversed: bool,
}

impl PrimaryRing {
    /// Diameter of the inner edge of the ring.
    pub fn boundary_diameter(&self) -> f64 {
        1.0 - self.thickness * 2.0
    }

    /// Diameter of the area left to the plane.
    pub fn margined_boundary_diameter(&self) -> f64 {
        1.0 - (self.margin + self.thickness) * 2.0
    }

    /// Value of the primary channel at a point of the widget.
    pub fn value_at(&self, [wx, wy]: [f64; 2]) -> f64 {
        let x = wx * 2.0 - 1.0;
        let y = -(wy * 2.0 - 1.0);
        let t = (y.atan2(x) + self.rotation) / PI * 0.5 + 0.5;
        let v = t - t.floor();
        if self.reversed {
            1.0 - v
        } else {
            v
        }
    }

    /// Point in the middle of the ring where the primary channel has `value`.
    pub fn widget_coord(&self, value: f64) -> [f64; 2] {
        let value = if self.reversed { 1.0 - value } else { value };
        let angle = (value + 0.5) * TAU - self.rotation;
        let r = 1.0 - self.thickness;
        let (sin, cos) = angle.sin_cos();
        [cos * r * 0.5 + 0.5, -sin * r * 0.5 + 0.5]
    }
}

/// Shape of the plane of secondary channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WheelShape {
    #[default]
    Square,
    Triangle,
    Circle,
}

impl WheelShape {
    pub const ALL: [WheelShape; 3] = [WheelShape::Square, WheelShape::Triangle, WheelShape::Circle];

    pub fn display_name(self) -> &'static str {
        match self {
            WheelShape::Square => "Square",
            WheelShape::Triangle => "Triangle",
            WheelShape::Circle => "Circle",
        }
    }

    /// Convert a centered widget coordinate to shape coordinates. The flag is false when the
    /// point falls outside of the shape.
    pub fn shape_coord(self, [px, py]: [f64; 2], ring: &PrimaryRing) -> ([f64; 2], bool) {
        match self {
            WheelShape::Square => {
                let coord = if ring.thickness == 0.0 {
                    [px * 0.5 + 0.5, py * 0.5 + 0.5]
                } else {
                    let a = square_side(ring);
                    [px / a * 0.5 + 0.5, py / a * 0.5 + 0.5]
                };
                let inside = coord.iter().all(|c| (0.0..=1.0).contains(c));
                (coord, inside)
            }
            WheelShape::Triangle => {
                let [v0, v1, v2] = triangle_vertices(ring);
                let vc = scale(add(v1, v2), 0.5);
                let vh = sub(vc, v0);
                let a = length(sub(v0, v1));
                let h = length(vh).max(MIN_LENGTH);

                let y = dot(sub([px, py], v0), scale(vh, 1.0 / h)) / h;
                let b = sub([px, py], lerp(v0, v1, y));
                let mut x = length(b) / (y * a).max(MIN_LENGTH);
                let mut inside = true;
                if dot(b, sub(v2, v1)) < 0.0 {
                    x = 0.0;
                    inside = false;
                }

                let inside = inside && (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y);
                ([x, y], inside)
            }
            WheelShape::Circle => {
                let r = px.hypot(py);
                let a = py.atan2(px) / PI * 0.5 + 0.5;
                let x = r / circle_diameter(ring);
                ([x, a], (0.0..=1.0).contains(&x))
            }
        }
    }

    /// Inverse of [WheelShape::shape_coord], for points inside the shape.
    pub fn widget_coord(self, [x, y]: [f64; 2], ring: &PrimaryRing) -> [f64; 2] {
        match self {
            WheelShape::Square => {
                if ring.thickness == 0.0 {
                    return [x * 2.0 - 1.0, y * 2.0 - 1.0];
                }
                let a = square_side(ring);
                [(x * 2.0 - 1.0) * a, (y * 2.0 - 1.0) * a]
            }
            WheelShape::Triangle => {
                let [v0, v1, v2] = triangle_vertices(ring);
                add(lerp(v0, v1, y), scale(sub(v2, v1), y * x))
            }
            WheelShape::Circle => {
                let angle = TAU * y + PI;
                let r = x * circle_diameter(ring);
                let (sin, cos) = angle.sin_cos();
                [cos * r, sin * r]
            }
        }
    }
}

fn square_side(ring: &PrimaryRing) -> f64 {
    (ring.margined_boundary_diameter() * FRAC_1_SQRT_2).max(MIN_LENGTH)
}

fn circle_diameter(ring: &PrimaryRing) -> f64 {
    ring.margined_boundary_diameter().max(MIN_LENGTH)
}

fn triangle_vertices(ring: &PrimaryRing) -> [[f64; 2]; 3] {
    let t = ring.margined_boundary_diameter();
    std::array::from_fn(|i| {
        let (sin, cos) = (TAU / 3.0 * i as f64).sin_cos();
        [cos * t, sin * t]
    })
}

fn add(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [a[0] + b[0], a[1] + b[1]]
}

fn sub(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

fn scale(a: [f64; 2], s: f64) -> [f64; 2] {
    [a[0] * s, a[1] * s]
}

fn dot(a: [f64; 2], b: [f64; 2]) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

fn length(a: [f64; 2]) -> f64 {
    a[0].hypot(a[1])
}

fn lerp(a: [f64; 2], b: [f64; 2], t: f64) -> [f64; 2] {
    add(scale(a, 1.0 - t), scale(b, t))
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng};

    fn rings() -> [PrimaryRing; 3] {
        [
            PrimaryRing::default(),
            PrimaryRing {
                thickness: 0.1,
                margin: 0.02,
                rotation: 0.0,
                reversed: false,
            },
            PrimaryRing {
                thickness: 0.15,
                margin: 0.0,
                rotation: 1.3,
                reversed: true,
            },
        ]
    }

    #[test]
    fn shape_round_trip() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(77);
        for ring in rings() {
            for shape in WheelShape::ALL {
                for _ in 0..200 {
                    let coord = [rng.gen_range(0.01..0.99), rng.gen_range(0.01..0.99)];
                    let p = shape.widget_coord(coord, &ring);
                    let (back, inside) = shape.shape_coord(p, &ring);
                    assert!(inside, "{:?} {:?} {:?}", shape, coord, back);
                    assert_abs_diff_eq!(back[0], coord[0], epsilon = 1e-9);
                    assert_abs_diff_eq!(back[1], coord[1], epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn outside_points() {
        let ring = rings()[1];
        let far = [0.99, -0.99];
        for shape in WheelShape::ALL {
            let (_, inside) = shape.shape_coord(far, &ring);
            assert!(!inside, "{:?}", shape);
        }
    }

    #[test]
    fn triangle_vertices_map_to_corners() {
        let ring = rings()[1];
        let [v0, v1, v2] = triangle_vertices(&ring);
        let shape = WheelShape::Triangle;
        assert_abs_diff_eq!(shape.widget_coord([0.0, 0.0], &ring)[0], v0[0], epsilon = 1e-12);
        assert_abs_diff_eq!(shape.widget_coord([0.0, 1.0], &ring)[1], v1[1], epsilon = 1e-12);
        assert_abs_diff_eq!(shape.widget_coord([1.0, 1.0], &ring)[1], v2[1], epsilon = 1e-12);
    }

    #[test]
    fn degenerate_ring_stays_finite() {
        // no space left for the plane
        let ring = PrimaryRing {
            thickness: 0.4,
            margin: 0.1,
            ..Default::default()
        };
        for shape in WheelShape::ALL {
            let (coord, _) = shape.shape_coord([0.3, 0.2], &ring);
            assert!(coord.iter().all(|x| x.is_finite()), "{:?} {:?}", shape, coord);
        }
    }

    #[test]
    fn ring_round_trip() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        for ring in rings() {
            for _ in 0..200 {
                let value = rng.gen_range(0.001..0.999);
                let p = ring.widget_coord(value);
                assert_abs_diff_eq!(ring.value_at(p), value, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn ring_orientation() {
        let ring = PrimaryRing::default();
        // value 0 is on the left, growing counter-clockwise
        let [x, y] = ring.widget_coord(0.0);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 0.5, epsilon = 1e-12);
        let [_, y] = ring.widget_coord(0.75);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);

        let reversed = PrimaryRing {
            reversed: true,
            ..ring
        };
        assert_abs_diff_eq!(reversed.value_at([0.5, 0.0]), 0.25, epsilon = 1e-12);
    }
}
