/// Closed interval `[min, max]`.
///
/// The default value is the empty interval (`min = +inf`, `max = -inf`).
/// Consumers assume `min <= max` for anything but that sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const EMPTY: Interval = Interval {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    pub const UNIVERSE: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub fn new(min: f64, max: f64) -> Self {
        return Self { min, max };
    }

    pub fn size(&self) -> f64 {
        return self.max - self.min;
    }

    /// `min <= x <= max`
    pub fn contains(&self, x: f64) -> bool {
        return self.min <= x && x <= self.max;
    }

    /// `min < x < max`, boundaries excluded.
    pub fn surrounds(&self, x: f64) -> bool {
        return self.min < x && x < self.max;
    }

    /// Projects `x` into `[min, max]`. Never call this on the empty sentinel.
    pub fn clamp(&self, x: f64) -> f64 {
        if x < self.min {
            return self.min;
        }
        if x > self.max {
            return self.max;
        }
        return x;
    }
}

impl Default for Interval {
    fn default() -> Self {
        return Self::EMPTY;
    }
}
