use crate::{
    animation::ease::Ease,
    foundation::core::{Color, Millis, Point, Vec2},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Color {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// A single eased interpolation between two values on the virtual clock.
///
/// Before `start` the tween yields `from`, after `start + duration` it yields `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start: Millis,
    pub duration: Millis,
    pub ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn new(from: T, to: T, start: Millis, duration: Millis, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            ease,
        }
    }

    /// A tween that is already settled on `value`.
    pub fn hold(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            start: Millis::ZERO,
            duration: Millis::ZERO,
            ease: Ease::Linear,
        }
    }

    pub fn end(&self) -> Millis {
        self.start.saturating_add(self.duration)
    }

    /// Linear (un-eased) progress in 0..=1.
    pub fn progress(&self, now: Millis) -> f64 {
        if now <= self.start {
            return if self.duration.0 == 0 && now == self.start {
                1.0
            } else {
                0.0
            };
        }
        if self.duration.0 == 0 {
            return 1.0;
        }
        (now.since(self.start).as_f64() / self.duration.as_f64()).min(1.0)
    }

    pub fn sample(&self, now: Millis) -> T {
        let p = self.progress(now);
        if p <= 0.0 {
            return self.from.clone();
        }
        if p >= 1.0 {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, self.ease.apply(p))
    }

    pub fn is_finished(&self, now: Millis) -> bool {
        now >= self.end()
    }

    pub fn end_value(&self) -> &T {
        &self.to
    }

    /// Starts a new tween from wherever this one currently is.
    pub fn retarget(&self, now: Millis, to: T, start: Millis, duration: Millis, ease: Ease) -> Self {
        Self::new(self.sample(now), to, start, duration, ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
