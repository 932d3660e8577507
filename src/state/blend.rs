use crate::foundation::core::{Palette, Point, Rgb};

/// Interpolation contract for animatable state fields.
///
/// Numeric values interpolate linearly from `old` toward `target`; everything
/// else snaps to `target` immediately. Implementations must land exactly on
/// `target` at `t >= 1` so a completed transition is indistinguishable from an
/// immediate application.
pub trait Blend: Clone {
    /// Value at normalized progress `t` in `[0, 1]`.
    fn blend(old: &Self, target: &Self, t: f64) -> Self;
}

impl Blend for f64 {
    fn blend(old: &Self, target: &Self, t: f64) -> Self {
        old + (target - old) * t
    }
}

impl Blend for Point {
    fn blend(old: &Self, target: &Self, t: f64) -> Self {
        Point::new(
            f64::blend(&old.x, &target.x, t),
            f64::blend(&old.y, &target.y, t),
        )
    }
}

impl Blend for Rgb {
    fn blend(old: &Self, target: &Self, t: f64) -> Self {
        Self {
            r: f64::blend(&old.r, &target.r, t),
            g: f64::blend(&old.g, &target.g, t),
            b: f64::blend(&old.b, &target.b, t),
        }
    }
}

impl Blend for Palette {
    fn blend(old: &Self, target: &Self, t: f64) -> Self {
        let mut stops = old.0;
        for (stop, (a, b)) in stops.iter_mut().zip(old.0.iter().zip(target.0.iter())) {
            *stop = Rgb::blend(a, b, t);
        }
        Self(stops)
    }
}

// Opaque values: no meaningful midpoint, snap to the target.
impl Blend for bool {
    fn blend(_old: &Self, target: &Self, _t: f64) -> Self {
        *target
    }
}

impl Blend for String {
    fn blend(_old: &Self, target: &Self, _t: f64) -> Self {
        target.clone()
    }
}

/// A previously-unset value snaps; interpolating from "unset" is meaningless.
impl<T: Blend> Blend for Option<T> {
    fn blend(old: &Self, target: &Self, t: f64) -> Self {
        match (old, target) {
            (Some(a), Some(b)) => Some(T::blend(a, b, t)),
            _ => target.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/blend.rs"]
mod tests;
