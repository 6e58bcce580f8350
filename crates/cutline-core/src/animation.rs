//! Keyframe animation channels.
//!
//! Each element may animate position, opacity, scale, and rotation. A channel
//! is an ordered sequence of keyframes at millisecond offsets relative to the
//! element's start time. Evaluation clamps at both ends and interpolates
//! between neighbors with the easing of the earlier keyframe.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Values that can be interpolated between keyframes.
pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    #[inline]
    fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for [f64; 2] {
    #[inline]
    fn lerp(self, other: Self, t: f64) -> Self {
        [self[0].lerp(other[0], t), self[1].lerp(other[1], t)]
    }
}

/// How to interpolate from a keyframe to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Hold the value until the next keyframe.
    Hold,
    #[default]
    Linear,
}

/// A single keyframe: a value at a millisecond offset from element start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<V> {
    pub offset_ms: i64,
    pub value: V,
    #[serde(default)]
    pub easing: Easing,
}

/// A sorted keyframe sequence for one animated parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel<V> {
    keys: Vec<Keyframe<V>>,
}

impl<V> Default for Channel<V> {
    fn default() -> Self {
        Self { keys: Vec::new() }
    }
}

impl<V: Lerp> Channel<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the keyframe at `offset_ms`, keeping sorted order.
    pub fn set(&mut self, offset_ms: i64, value: V, easing: Easing) {
        if let Some(kf) = self.keys.iter_mut().find(|kf| kf.offset_ms == offset_ms) {
            kf.value = value;
            kf.easing = easing;
            return;
        }
        let pos = self
            .keys
            .binary_search_by(|kf| kf.offset_ms.cmp(&offset_ms))
            .unwrap_or_else(|e| e);
        self.keys.insert(
            pos,
            Keyframe {
                offset_ms,
                value,
                easing,
            },
        );
    }

    /// Remove the keyframe at `offset_ms`. Returns whether one existed.
    pub fn remove(&mut self, offset_ms: i64) -> bool {
        if let Some(pos) = self.keys.iter().position(|kf| kf.offset_ms == offset_ms) {
            self.keys.remove(pos);
            true
        } else {
            false
        }
    }

    /// Evaluate at `offset_ms`. `None` when the channel has no keyframes.
    pub fn evaluate(&self, offset_ms: i64) -> Option<V> {
        let (first, last) = (self.keys.first()?, self.keys.last()?);
        if offset_ms <= first.offset_ms {
            return Some(first.value);
        }
        if offset_ms >= last.offset_ms {
            return Some(last.value);
        }
        let idx = self
            .keys
            .partition_point(|kf| kf.offset_ms <= offset_ms)
            .saturating_sub(1);
        let a = &self.keys[idx];
        let b = &self.keys[idx + 1];
        let span = (b.offset_ms - a.offset_ms) as f64;
        if span <= 0.0 {
            return Some(a.value);
        }
        Some(match a.easing {
            Easing::Hold => a.value,
            Easing::Linear => {
                let t = (offset_ms - a.offset_ms) as f64 / span;
                a.value.lerp(b.value, t)
            }
        })
    }

    pub fn keys(&self) -> &[Keyframe<V>] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Identifies one of the four animation channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    Position,
    Opacity,
    Scale,
    Rotation,
}

impl ChannelKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Opacity => "opacity",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
        }
    }
}

/// Per-element animation: the four channels the canvas animates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Animation {
    #[serde(default)]
    pub position: Channel<[f64; 2]>,
    #[serde(default)]
    pub opacity: Channel<f64>,
    #[serde(default)]
    pub scale: Channel<f64>,
    #[serde(default)]
    pub rotation: Channel<f64>,
}

impl Animation {
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
            && self.opacity.is_empty()
            && self.scale.is_empty()
            && self.rotation.is_empty()
    }

    /// Channels with at least one keyframe, with their offsets, in panel
    /// order. This is what the renderer draws as keyframe sub-panel rows.
    pub fn active_channels(&self) -> SmallVec<[(ChannelKind, Vec<i64>); 4]> {
        let mut out = SmallVec::new();
        if !self.position.is_empty() {
            out.push((
                ChannelKind::Position,
                self.position.keys().iter().map(|k| k.offset_ms).collect(),
            ));
        }
        if !self.opacity.is_empty() {
            out.push((
                ChannelKind::Opacity,
                self.opacity.keys().iter().map(|k| k.offset_ms).collect(),
            ));
        }
        if !self.scale.is_empty() {
            out.push((
                ChannelKind::Scale,
                self.scale.keys().iter().map(|k| k.offset_ms).collect(),
            ));
        }
        if !self.rotation.is_empty() {
            out.push((
                ChannelKind::Rotation,
                self.rotation.keys().iter().map(|k| k.offset_ms).collect(),
            ));
        }
        out
    }
}
