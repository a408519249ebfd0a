/// Cubic ease-in-out, `x` is progress of animation in range 0..1.
pub fn ease_in_out(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

/// Animated transition of scroll offset, driven by elapsed time.
#[derive(Clone, Debug)]
pub struct ScrollAnimator {
    from: f32,
    to: f32,
    /// The length of time in seconds that animation takes to complete.
    duration: f32,
    time: f32,
}

impl ScrollAnimator {
    pub const DURATION: f32 = 0.3;

    pub fn new(from: f32, to: f32) -> Self {
        Self {
            from,
            to,
            duration: Self::DURATION,
            time: 0.0,
        }
    }

    /// Advances animation by elapsed seconds and returns current scroll offset.
    pub fn update(&mut self, time: f32) -> f32 {
        self.time = (self.time + time).min(self.duration);
        if self.is_finished() {
            return self.to;
        }
        let t = ease_in_out(self.time / self.duration);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.time >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_ease_in_out_bounds() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(2.0), 1.0);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }

    #[test]
    pub fn test_scroll_reaches_target() {
        let mut animator = ScrollAnimator::new(0.0, 400.0);
        let first = animator.update(0.1);
        assert!(first > 0.0 && first < 400.0);
        let second = animator.update(0.1);
        assert!(second > first);
        assert_eq!(animator.update(1.0), 400.0);
        assert!(animator.is_finished());
    }

    #[test]
    pub fn test_scroll_up() {
        let mut animator = ScrollAnimator::new(300.0, 100.0);
        let value = animator.update(0.15);
        assert!(value < 300.0 && value > 100.0);
        assert_eq!(animator.update(0.2), 100.0);
    }
}
