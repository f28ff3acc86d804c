//! Timed interpolation of a single value.

use glam::Vec2;

use crate::easing::Ease;

/// Types a [`Tween`] can interpolate.
pub trait Lerp: Copy {
    fn lerp_to(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp_to(&self, other: &Self, t: f32) -> Self {
        Vec2::lerp(*self, *other, t)
    }
}

/// `from -> to` over `duration` seconds, starting `delay` seconds into the
/// owning timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T: Lerp> {
    pub from: T,
    pub to: T,
    pub delay: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            delay: 0.0,
            duration,
            ease,
        }
    }

    pub fn delayed(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn end(&self) -> f32 {
        self.delay + self.duration.max(0.0)
    }

    /// Value at `elapsed` seconds of timeline time. Holds `from` before the
    /// delay and `to` after the end.
    pub fn sample(&self, elapsed: f32) -> T {
        let local = elapsed - self.delay;
        if local < 0.0 {
            return self.from;
        }
        if self.duration <= 0.0 || local >= self.duration {
            return self.to;
        }
        let t = self.ease.apply(local / self.duration);
        self.from.lerp_to(&self.to, t)
    }
}

/// A tween on a value that can be retargeted mid-flight: the new tween
/// starts from wherever the previous one currently is.
#[derive(Debug, Clone, Copy)]
pub struct Retarget<T: Lerp> {
    tween: Tween<T>,
    elapsed: f32,
}

impl<T: Lerp> Retarget<T> {
    pub fn settled(value: T) -> Self {
        Self {
            tween: Tween::new(value, value, 0.0, Ease::Linear),
            elapsed: 0.0,
        }
    }

    pub fn value(&self) -> T {
        self.tween.sample(self.elapsed)
    }

    pub fn target(&self) -> T {
        self.tween.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.tween.end()
    }

    pub fn retarget(&mut self, to: T, duration: f32, ease: Ease) {
        let from = self.value();
        self.tween = Tween::new(from, to, duration, ease);
        self.elapsed = 0.0;
    }

    /// Jump straight to `value` with no animation.
    pub fn set(&mut self, value: T) {
        *self = Self::settled(value);
    }

    pub fn advance(&mut self, dt: f32) -> T {
        if !self.is_finished() {
            self.elapsed += dt.max(0.0);
        }
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_holds_before_delay_and_after_end() {
        let tween = Tween::new(1.0_f32, 0.0, 0.5, Ease::Linear).delayed(0.5);
        assert_eq!(tween.sample(0.0), 1.0);
        assert_eq!(tween.sample(0.5), 1.0);
        assert!((tween.sample(0.75) - 0.5).abs() < 1e-6);
        assert_eq!(tween.sample(2.0), 0.0);
        assert_eq!(tween.end(), 1.0);
    }

    #[test]
    fn vec_tween_interpolates_componentwise() {
        let tween = Tween::new(Vec2::ZERO, Vec2::new(10.0, -20.0), 1.0, Ease::Linear);
        assert_eq!(tween.sample(0.5), Vec2::new(5.0, -10.0));
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut value = Retarget::settled(0.0_f32);
        value.retarget(10.0, 1.0, Ease::Linear);
        value.advance(0.5);
        assert!((value.value() - 5.0).abs() < 1e-5);

        value.retarget(0.0, 1.0, Ease::Linear);
        assert!((value.value() - 5.0).abs() < 1e-5);
        value.advance(1.0);
        assert_eq!(value.value(), 0.0);
        assert!(value.is_finished());
    }
}
