//! Animation bundles and the configurations they resolve to.
//!
//! A bundle holds two resolver functions. Each render pass calls them with the
//! current [`TreeNode`] to obtain concrete toggle and drawer settings.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::tree_node::TreeNode;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Easing curve applied to transition progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Easing::Linear),
            "ease-in" => Ok(Easing::EaseIn),
            "ease-out" => Ok(Easing::EaseOut),
            "ease-in-out" => Ok(Easing::EaseInOut),
            other => Err(format!("unknown easing '{}'", other)),
        }
    }
}

/// Visual effect of a drawer transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// Rows appear top to bottom.
    SlideDown,
    /// Rows disappear bottom to top.
    SlideUp,
    /// Rows are dimmed for the first half of the transition.
    Fade,
}

/// One phase (enter or leave) of a drawer transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpec {
    pub effect: TransitionEffect,
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionSpec {
    pub fn new(effect: TransitionEffect, duration: Duration, easing: Easing) -> Self {
        Self {
            effect,
            duration,
            easing,
        }
    }

    /// Eased progress at `elapsed`, 1.0 once the duration has passed.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.easing.apply(t)
    }
}

/// Resolved toggle-arrow animation.
///
/// A terminal arrow has two glyphs, so only the target rotation matters; the
/// `Toggle` decorator picks the glyph from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleAnimation {
    /// Arrow rotation in degrees; 90 means expanded.
    pub rotate_z: f32,
}

impl ToggleAnimation {
    pub fn rotated(rotate_z: f32) -> Self {
        Self { rotate_z }
    }
}

/// Resolved drawer animation.
///
/// `animation` and `duration` are free-form keys a custom resolver may set.
/// They are never forwarded to the transition container; see
/// [`DrawerAnimation::transition_props`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerAnimation {
    pub animation: Option<TransitionEffect>,
    pub duration: Option<Duration>,
    pub enter: Option<TransitionSpec>,
    pub leave: Option<TransitionSpec>,
    pub run_on_mount: bool,
}

impl DrawerAnimation {
    pub fn transition_props(&self) -> TransitionProps {
        TransitionProps {
            enter: self.enter,
            leave: self.leave,
            run_on_mount: self.run_on_mount,
        }
    }
}

/// Configuration handed to the transition container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitionProps {
    pub enter: Option<TransitionSpec>,
    pub leave: Option<TransitionSpec>,
    pub run_on_mount: bool,
}

/// Both resolved configurations for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAnimations {
    pub toggle: ToggleAnimation,
    pub drawer: DrawerAnimation,
}

type ToggleFn = dyn Fn(&TreeNode<'_>) -> ToggleAnimation + Send + Sync;
type DrawerFn = dyn Fn(&TreeNode<'_>) -> DrawerAnimation + Send + Sync;

/// Shared toggle resolver.
#[derive(Clone)]
pub struct ToggleResolver(Arc<ToggleFn>);

impl ToggleResolver {
    pub fn new<F>(resolve: F) -> Self
    where
        F: Fn(&TreeNode<'_>) -> ToggleAnimation + Send + Sync + 'static,
    {
        Self(Arc::new(resolve))
    }

    pub fn resolve(&self, node: &TreeNode<'_>) -> ToggleAnimation {
        (self.0)(node)
    }
}

/// Shared drawer resolver.
#[derive(Clone)]
pub struct DrawerResolver(Arc<DrawerFn>);

impl DrawerResolver {
    pub fn new<F>(resolve: F) -> Self
    where
        F: Fn(&TreeNode<'_>) -> DrawerAnimation + Send + Sync + 'static,
    {
        Self(Arc::new(resolve))
    }

    pub fn resolve(&self, node: &TreeNode<'_>) -> DrawerAnimation {
        (self.0)(node)
    }
}

impl fmt::Debug for ToggleResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ToggleResolver(..)")
    }
}

impl fmt::Debug for DrawerResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DrawerResolver(..)")
    }
}

/// The global animation bundle.
#[derive(Debug, Clone)]
pub struct AnimationBundle {
    pub toggle: ToggleResolver,
    pub drawer: DrawerResolver,
}

impl AnimationBundle {
    /// Node-level overrides replace our resolvers key by key.
    pub fn merged(&self, overrides: Option<&AnimationOverrides>) -> AnimationBundle {
        let Some(overrides) = overrides else {
            return self.clone();
        };
        AnimationBundle {
            toggle: overrides.toggle.clone().unwrap_or_else(|| self.toggle.clone()),
            drawer: overrides.drawer.clone().unwrap_or_else(|| self.drawer.clone()),
        }
    }

    /// Arrow rotates to 90 degrees when expanded; drawer slides down on
    /// enter and up on leave.
    pub fn standard(duration: Duration, easing: Easing, run_on_mount: bool) -> Self {
        AnimationBundle {
            toggle: ToggleResolver::new(|tree_node| {
                ToggleAnimation::rotated(if tree_node.node.toggled { 90.0 } else { 0.0 })
            }),
            drawer: DrawerResolver::new(move |_| DrawerAnimation {
                animation: None,
                duration: None,
                enter: Some(TransitionSpec::new(TransitionEffect::SlideDown, duration, easing)),
                leave: Some(TransitionSpec::new(TransitionEffect::SlideUp, duration, easing)),
                run_on_mount,
            }),
        }
    }
}

/// Node-level animation overrides.
#[derive(Debug, Clone, Default)]
pub struct AnimationOverrides {
    pub toggle: Option<ToggleResolver>,
    pub drawer: Option<DrawerResolver>,
}

/// Animation setting shared by the whole tree.
#[derive(Debug, Clone)]
pub enum Animations {
    /// No animation anywhere; drawers mount and unmount instantly.
    Disabled,
    Enabled(AnimationBundle),
}

impl Animations {
    pub fn standard() -> Self {
        Animations::Enabled(AnimationBundle::standard(
            DEFAULT_DURATION,
            Easing::default(),
            false,
        ))
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Animations::Enabled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_bounds() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
    }

    #[test]
    fn test_easing_from_str() {
        assert_eq!("ease-out".parse::<Easing>().unwrap(), Easing::EaseOut);
        assert_eq!("LINEAR".parse::<Easing>().unwrap(), Easing::Linear);
        assert!("bouncy".parse::<Easing>().is_err());
    }

    #[test]
    fn test_transition_progress() {
        let spec = TransitionSpec::new(
            TransitionEffect::SlideDown,
            Duration::from_millis(200),
            Easing::Linear,
        );
        assert_eq!(spec.progress(Duration::ZERO), 0.0);
        assert!((spec.progress(Duration::from_millis(100)) - 0.5).abs() < 1e-6);
        assert_eq!(spec.progress(Duration::from_millis(500)), 1.0);

        let instant = TransitionSpec::new(TransitionEffect::Fade, Duration::ZERO, Easing::Linear);
        assert_eq!(instant.progress(Duration::ZERO), 1.0);
    }

    #[test]
    fn test_transition_props_drop_animation_and_duration() {
        let drawer = DrawerAnimation {
            animation: Some(TransitionEffect::Fade),
            duration: Some(Duration::from_millis(50)),
            enter: Some(TransitionSpec::new(
                TransitionEffect::SlideDown,
                DEFAULT_DURATION,
                Easing::EaseOut,
            )),
            leave: None,
            run_on_mount: true,
        };
        let props = drawer.transition_props();
        assert_eq!(props.enter, drawer.enter);
        assert_eq!(props.leave, None);
        assert!(props.run_on_mount);
    }
}
