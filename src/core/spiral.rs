use crate::domain::model::{SignalParameters, SpiralPoint};
use crate::utils::error::{Result, SpiralError};
use std::f64::consts::PI;

/// The two golden-angle constants found in the source readings. They differ
/// past the third decimal (π(3−√5) ≈ 137.5078°, the degree form is exactly
/// 137.5°), so the choice is part of the output contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleConvention {
    Radians,
    Degrees,
}

impl AngleConvention {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "radians" | "rad" => Ok(AngleConvention::Radians),
            "degrees" | "deg" => Ok(AngleConvention::Degrees),
            _ => Err(SpiralError::InvalidConfigValueError {
                field: "angle_convention".to_string(),
                value: value.to_string(),
                reason: "Allowed values: radians, degrees".to_string(),
            }),
        }
    }

    pub fn golden_angle(self) -> f64 {
        match self {
            AngleConvention::Radians => PI * (3.0 - 5.0_f64.sqrt()),
            AngleConvention::Degrees => 137.5_f64.to_radians(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AngleConvention::Radians => "radians",
            AngleConvention::Degrees => "degrees",
        }
    }
}

/// How the point count is chosen: grow past the self index (personality
/// readings) or use a fixed count (resonance readings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingPolicy {
    SelfPlusBuffer { buffer: usize },
    Fixed { count: usize },
}

impl SizingPolicy {
    pub fn from_config(kind: &str, buffer: usize, count: usize) -> Result<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "self-plus-buffer" => Ok(SizingPolicy::SelfPlusBuffer { buffer }),
            "fixed" => Ok(SizingPolicy::Fixed { count }),
            _ => Err(SpiralError::InvalidConfigValueError {
                field: "sizing_policy".to_string(),
                value: kind.to_string(),
                reason: "Allowed values: self-plus-buffer, fixed".to_string(),
            }),
        }
    }

    pub fn resolve(&self, self_index: i64) -> Result<usize> {
        match *self {
            SizingPolicy::SelfPlusBuffer { buffer } => {
                let base = usize::try_from(self_index).map_err(|_| {
                    SpiralError::IndexOutOfRange {
                        index: self_index,
                        point_count: 0,
                    }
                })?;
                Ok(base + buffer)
            }
            SizingPolicy::Fixed { count } => Ok(count),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RadialLayout {
    /// r(i) = i, θ(i) = i·g, residue-class highlighting.
    Linear,
    /// r(i) = √(i+1), θ(i) = (i+1)·g, no residue highlighting.
    Sqrt,
}

/// Restartable lazy producer of spiral points. Collect it for rendering, or
/// iterate directly for large point counts.
#[derive(Debug, Clone)]
pub struct SpiralIter {
    golden_angle: f64,
    layout: RadialLayout,
    modulus: i64,
    arm: i64,
    self_index: usize,
    point_count: usize,
    next: usize,
}

impl SpiralIter {
    fn new(
        params: &SignalParameters,
        layout: RadialLayout,
        self_index: i64,
        point_count: usize,
        convention: AngleConvention,
    ) -> Result<Self> {
        if self_index < 0 || self_index as usize >= point_count {
            return Err(SpiralError::IndexOutOfRange {
                index: self_index,
                point_count,
            });
        }

        Ok(Self {
            golden_angle: convention.golden_angle(),
            layout,
            modulus: params.modulus,
            arm: params.arm,
            self_index: self_index as usize,
            point_count,
            next: 0,
        })
    }

    /// Personality layout: the self point sits at index `n`.
    pub fn personality(
        params: &SignalParameters,
        point_count: usize,
        convention: AngleConvention,
    ) -> Result<Self> {
        Self::new(params, RadialLayout::Linear, params.n, point_count, convention)
    }

    /// Resonance layout: the marked harmonic sits at index `arm`.
    pub fn resonance(
        params: &SignalParameters,
        point_count: usize,
        convention: AngleConvention,
    ) -> Result<Self> {
        Self::new(params, RadialLayout::Sqrt, params.arm, point_count, convention)
    }
}

impl Iterator for SpiralIter {
    type Item = SpiralPoint;

    fn next(&mut self) -> Option<SpiralPoint> {
        if self.next >= self.point_count {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let (r, theta, highlighted) = match self.layout {
            RadialLayout::Linear => (
                index as f64,
                index as f64 * self.golden_angle,
                index as i64 % self.modulus == self.arm,
            ),
            RadialLayout::Sqrt => {
                let k = (index + 1) as f64;
                (k.sqrt(), k * self.golden_angle, false)
            }
        };

        Some(SpiralPoint {
            index,
            x: r * theta.cos(),
            y: r * theta.sin(),
            highlighted,
            is_self: index == self.self_index,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.point_count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SpiralIter {}

pub fn generate_personality_spiral(
    params: &SignalParameters,
    point_count: usize,
    convention: AngleConvention,
) -> Result<Vec<SpiralPoint>> {
    Ok(SpiralIter::personality(params, point_count, convention)?.collect())
}

pub fn generate_resonance_spiral(
    params: &SignalParameters,
    point_count: usize,
    convention: AngleConvention,
) -> Result<Vec<SpiralPoint>> {
    Ok(SpiralIter::resonance(params, point_count, convention)?.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params() -> SignalParameters {
        // 1987-06-15: n = 11922, modulus = 15, arm = 11922 mod 15 = 12
        SignalParameters {
            n: 11922,
            modulus: 15,
            arm: 12,
        }
    }

    fn small_params() -> SignalParameters {
        SignalParameters {
            n: 42,
            modulus: 5,
            arm: 2,
        }
    }

    #[test]
    fn test_exact_point_count_and_unique_indices() {
        let points =
            generate_personality_spiral(&small_params(), 100, AngleConvention::Radians).unwrap();
        assert_eq!(points.len(), 100);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.index, i);
        }
    }

    #[test]
    fn test_self_point_marked_exactly_once() {
        let params = small_params();
        let points = generate_personality_spiral(&params, 100, AngleConvention::Radians).unwrap();
        let selves: Vec<_> = points.iter().filter(|p| p.is_self).collect();
        assert_eq!(selves.len(), 1);
        assert_eq!(selves[0].index, params.n as usize);
    }

    #[test]
    fn test_residue_class_highlighting() {
        let params = small_params();
        let points = generate_personality_spiral(&params, 50, AngleConvention::Radians).unwrap();
        for p in &points {
            let expected = p.index as i64 % params.modulus == params.arm;
            assert_eq!(p.highlighted, expected, "index {}", p.index);
        }
    }

    #[test]
    fn test_personality_radius_grows_linearly() {
        let points =
            generate_personality_spiral(&small_params(), 50, AngleConvention::Radians).unwrap();
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[0].y, 0.0);
        for p in &points {
            let r = p.x.hypot(p.y);
            assert!((r - p.index as f64).abs() < 1e-9, "index {}", p.index);
        }
    }

    #[test]
    fn test_resonance_radius_is_sqrt() {
        let points =
            generate_resonance_spiral(&small_params(), 50, AngleConvention::Radians).unwrap();
        for p in &points {
            let r = p.x.hypot(p.y);
            assert!(
                (r - ((p.index + 1) as f64).sqrt()).abs() < 1e-9,
                "index {}",
                p.index
            );
        }
    }

    #[test]
    fn test_resonance_marks_harmonic_without_residue_highlights() {
        let params = small_params();
        let points = generate_resonance_spiral(&params, 50, AngleConvention::Radians).unwrap();
        assert!(points.iter().all(|p| !p.highlighted));
        let selves: Vec<_> = points.iter().filter(|p| p.is_self).collect();
        assert_eq!(selves.len(), 1);
        assert_eq!(selves[0].index, params.arm as usize);
    }

    #[test]
    fn test_self_index_out_of_range() {
        let params = small_params();
        // n = 42 needs at least 43 points
        let err = generate_personality_spiral(&params, 42, AngleConvention::Radians).unwrap_err();
        assert!(matches!(
            err,
            SpiralError::IndexOutOfRange {
                index: 42,
                point_count: 42
            }
        ));
        assert!(generate_personality_spiral(&params, 43, AngleConvention::Radians).is_ok());
    }

    #[test]
    fn test_angle_conventions_diverge() {
        let a = generate_personality_spiral(&small_params(), 50, AngleConvention::Radians).unwrap();
        let b = generate_personality_spiral(&small_params(), 50, AngleConvention::Degrees).unwrap();
        // Same radii, different angles from index 1 on.
        assert_ne!(a[1], b[1]);
        assert!((a[10].x.hypot(a[10].y) - b[10].x.hypot(b[10].y)).abs() < 1e-9);
    }

    #[test]
    fn test_golden_angle_constants() {
        let rad = AngleConvention::Radians.golden_angle();
        let deg = AngleConvention::Degrees.golden_angle();
        assert!((rad - 2.399963229728653).abs() < 1e-12);
        assert!((deg - 137.5_f64.to_radians()).abs() < 1e-12);
        assert!(rad != deg);
    }

    #[test]
    fn test_generation_is_deterministic_and_restartable() {
        let params = sample_params();
        let iter = SpiralIter::personality(&params, 12500, AngleConvention::Radians).unwrap();
        assert_eq!(iter.len(), 12500);
        let a: Vec<_> = iter.collect();
        let b = generate_personality_spiral(&params, 12500, AngleConvention::Radians).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sizing_policies() {
        let policy = SizingPolicy::SelfPlusBuffer { buffer: 500 };
        assert_eq!(policy.resolve(1990).unwrap(), 2490);

        let fixed = SizingPolicy::Fixed { count: 2000 };
        assert_eq!(fixed.resolve(1990).unwrap(), 2000);

        assert!(policy.resolve(-1).is_err());
    }

    #[test]
    fn test_sizing_policy_from_config() {
        assert_eq!(
            SizingPolicy::from_config("self-plus-buffer", 500, 2000).unwrap(),
            SizingPolicy::SelfPlusBuffer { buffer: 500 }
        );
        assert_eq!(
            SizingPolicy::from_config("fixed", 500, 2000).unwrap(),
            SizingPolicy::Fixed { count: 2000 }
        );
        assert!(SizingPolicy::from_config("adaptive", 500, 2000).is_err());
    }

    #[test]
    fn test_angle_convention_parse() {
        assert_eq!(
            AngleConvention::parse("radians").unwrap(),
            AngleConvention::Radians
        );
        assert_eq!(
            AngleConvention::parse("DEG").unwrap(),
            AngleConvention::Degrees
        );
        assert!(AngleConvention::parse("turns").is_err());
    }
}
