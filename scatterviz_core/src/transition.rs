// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-based interpolation of updated marks.

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;

use hashbrown::HashMap;

use crate::mark::{Mark, MarkId};
use crate::scene::{MarkDiff, Scene};

/// Easing curve applied to normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cubic ease-in-out (slow start and end).
    #[default]
    CubicInOut,
}

impl Easing {
    /// Maps progress `t` in `0..=1` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Tween {
    from: Mark,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() || now >= self.start + self.duration {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        self.easing
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    fn finished(&self, now: Duration) -> bool {
        now >= self.start + self.duration
    }
}

/// Running tweens, keyed by mark id.
///
/// Targets live in the [`Scene`]; a tween only remembers where the mark started. Enters appear
/// at their target immediately and exits are dropped immediately.
#[derive(Debug, Default)]
pub struct Transitions {
    tweens: HashMap<MarkId, Tween>,
}

impl Transitions {
    /// Creates an empty set of transitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules tweens for the updates in `diffs`.
    ///
    /// A mark that is already mid-transition restarts from its displayed state at `now`, so the
    /// new tween takes over without a jump.
    pub fn start(&mut self, diffs: &[MarkDiff], now: Duration, duration: Duration, easing: Easing) {
        for diff in diffs {
            match diff {
                MarkDiff::Update { id, old, .. } => {
                    let from = self.sample(old, now);
                    self.tweens.insert(
                        *id,
                        Tween {
                            from,
                            start: now,
                            duration,
                            easing,
                        },
                    );
                }
                MarkDiff::Enter { id, .. } | MarkDiff::Exit { id, .. } => {
                    self.tweens.remove(id);
                }
            }
        }
    }

    /// Returns `target` as displayed at `now`.
    ///
    /// `target` is the tween's end state (the scene's current mark for that id). Identity, z-index
    /// and class come from `target`.
    pub fn sample(&self, target: &Mark, now: Duration) -> Mark {
        match self.tweens.get(&target.id) {
            Some(tween) if !tween.finished(now) => {
                let t = tween.progress(now);
                Mark {
                    payload: tween.from.payload.lerp(&target.payload, t),
                    ..target.clone()
                }
            }
            _ => target.clone(),
        }
    }

    /// Samples every mark of `scene` at `now`, in render order.
    pub fn frame(&self, scene: &Scene, now: Duration) -> Vec<Mark> {
        scene.sorted().map(|m| self.sample(m, now)).collect()
    }

    /// Returns `true` while any tween has not reached its end.
    pub fn is_active(&self, now: Duration) -> bool {
        self.tweens.values().any(|t| !t.finished(now))
    }

    /// Drops tweens that have finished by `now`.
    pub fn prune(&mut self, now: Duration) {
        self.tweens.retain(|_, t| !t.finished(now));
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;
    use peniko::color::palette::css;

    use super::*;
    use crate::mark::{CircleMark, MarkPayload};
    use crate::scene::LayerId;

    const SECOND: Duration = Duration::from_millis(1000);

    fn dot(x: f64) -> Mark {
        Mark::new(
            MarkId::from_raw(1),
            CircleMark {
                center: Point::new(x, 0.0),
                radius: 20.0,
                fill: css::BROWN.into(),
                opacity: 0.75,
            },
        )
    }

    fn x_of(mark: &Mark) -> f64 {
        match &mark.payload {
            MarkPayload::Circle(c) => c.center.x,
            _ => panic!("expected circle"),
        }
    }

    #[test]
    fn cubic_in_out_is_symmetric() {
        let e = Easing::CubicInOut;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn update_reaches_target_at_duration() {
        let mut scene = Scene::new();
        let mut tr = Transitions::new();
        scene.tick_layer(LayerId(0), vec![dot(0.0)]);
        let diffs = scene.tick_layer(LayerId(0), vec![dot(100.0)]);
        tr.start(&diffs, Duration::ZERO, SECOND, Easing::Linear);

        let mid = tr.frame(&scene, Duration::from_millis(500));
        assert!((x_of(&mid[0]) - 50.0).abs() < 1e-9);
        assert!(tr.is_active(Duration::from_millis(999)));

        let end = tr.frame(&scene, SECOND);
        assert_eq!(x_of(&end[0]), 100.0);
        assert!(!tr.is_active(SECOND));
    }

    #[test]
    fn takeover_starts_from_displayed_state() {
        let mut scene = Scene::new();
        let mut tr = Transitions::new();
        scene.tick_layer(LayerId(0), vec![dot(0.0)]);
        let d1 = scene.tick_layer(LayerId(0), vec![dot(100.0)]);
        tr.start(&d1, Duration::ZERO, SECOND, Easing::Linear);

        let at = Duration::from_millis(500);
        let d2 = scene.tick_layer(LayerId(0), vec![dot(200.0)]);
        tr.start(&d2, at, SECOND, Easing::Linear);

        assert!((x_of(&tr.frame(&scene, at)[0]) - 50.0).abs() < 1e-9);
        let later = tr.frame(&scene, at + Duration::from_millis(500));
        assert!((x_of(&later[0]) - 125.0).abs() < 1e-9);
    }

    #[test]
    fn prune_drops_finished_tweens() {
        let mut scene = Scene::new();
        let mut tr = Transitions::new();
        scene.tick_layer(LayerId(0), vec![dot(0.0)]);
        let diffs = scene.tick_layer(LayerId(0), vec![dot(10.0)]);
        tr.start(&diffs, Duration::ZERO, SECOND, Easing::CubicInOut);
        tr.prune(SECOND * 2);
        assert!(!tr.is_active(Duration::ZERO));
    }
}
