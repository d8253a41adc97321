//! Animation documents
//!
//! Specs are deserialized with serde and validated once; after that they are
//! immutable and only ever replaced wholesale. A document is either a single
//! animation object or a list of them.

mod keyframe;

use alloc::{format, vec::Vec};

use embassy_time::Duration;
pub(crate) use keyframe::frame_count;
pub use keyframe::Keyframe;
use serde::Deserialize;
use serde_json::Value;

use crate::color::{Blend, Rgb};
use crate::error::{Error, Result};

/// Default frame interval in milliseconds
pub const DEFAULT_REFRESH_MS: u32 = 50;
/// Default playthrough length; the frame count is derived from the refresh.
pub const DEFAULT_PLAY_MS: u32 = 30_000;
/// Default comet trail length in LEDs
pub const DEFAULT_TRAIL: usize = 4;
/// Default dark gap between comets in LEDs
pub const DEFAULT_SPACING: usize = 20;
/// Longest Colors frame table or Comet ring a controller may expand to
pub const MAX_TABLE_LEN: usize = 16_384;

/// A set of animations played round-robin
pub type AnimationSet = Vec<AnimationSpec>;

/// One animation: frame timing plus the root container
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawAnimation")]
pub struct AnimationSpec {
    /// Target interval between frames
    pub refresh: Duration,
    /// Number of frames in one playthrough
    pub duration: u32,
    /// Root container spanning the whole strip
    pub root: ContainerSpec,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnimation {
    #[serde(default, alias = "interval")]
    refresh: Option<u32>,
    #[serde(default)]
    duration: Option<u32>,
    #[serde(default, alias = "patterns")]
    controllers: Vec<ControllerSpec>,
    #[serde(default)]
    offset_adjust: i64,
}

impl TryFrom<RawAnimation> for AnimationSpec {
    type Error = Error;

    fn try_from(raw: RawAnimation) -> Result<Self> {
        let refresh = raw.refresh.unwrap_or(DEFAULT_REFRESH_MS);
        if refresh == 0 {
            return Err(Error::validation("'refresh' must be > 0 ms"));
        }

        Ok(Self {
            refresh: Duration::from_millis(u64::from(refresh)),
            duration: raw.duration.unwrap_or(DEFAULT_PLAY_MS / refresh),
            root: ContainerSpec {
                controllers: raw.controllers,
                offset_adjust: raw.offset_adjust,
            },
        })
    }
}

impl AnimationSpec {
    /// Parse a single animation object
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Parse an animation document into a set
///
/// The whole document is rejected when any animation in it is invalid.
pub fn parse_animation_set(text: &str) -> Result<AnimationSet> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| AnimationSpec::deserialize(item).map_err(Error::from))
            .collect(),
        Value::Object(_) => Ok(alloc::vec![AnimationSpec::deserialize(value)?]),
        other => Err(Error::validation(format!(
            "'{other}' is not an animation or a list of animations"
        ))),
    }
}

/// How a controller claims LEDs from its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Fixed number of LEDs
    Width(usize),
    /// Relative share of the LEDs left after fixed widths
    Flex(u32),
}

/// A node of the controller tree
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawController")]
pub struct ControllerSpec {
    pub sizing: Sizing,
    /// Phase offset in frames
    pub offset: i64,
    pub kind: ControllerKind,
}

#[derive(Deserialize)]
struct RawController {
    #[serde(default)]
    width: Option<usize>,
    #[serde(default)]
    flex: Option<u32>,
    #[serde(default)]
    offset: i64,
    #[serde(flatten)]
    kind: ControllerKind,
}

impl TryFrom<RawController> for ControllerSpec {
    type Error = Error;

    fn try_from(raw: RawController) -> Result<Self> {
        let sizing = match (raw.width, raw.flex) {
            (Some(width), None) => Sizing::Width(width),
            (None, Some(flex)) => Sizing::Flex(flex),
            (Some(_), Some(_)) => {
                return Err(Error::validation(format!(
                    "'{}' controller sets both 'width' and 'flex'",
                    raw.kind.name()
                )));
            }
            (None, None) => {
                return Err(Error::validation(format!(
                    "'{}' controller needs a 'width' or a 'flex'",
                    raw.kind.name()
                )));
            }
        };
        raw.kind.validate()?;

        Ok(Self {
            sizing,
            offset: raw.offset,
            kind: raw.kind,
        })
    }
}

/// Controller kinds, keyed by the `type` field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControllerKind {
    Container(ContainerSpec),
    Noop,
    Colors(ColorsSpec),
    Comet(CometSpec),
    Fire(FireSpec),
}

impl ControllerKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Container(_) => "container",
            Self::Noop => "noop",
            Self::Colors(_) => "colors",
            Self::Comet(_) => "comet",
            Self::Fire(_) => "fire",
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Colors(spec) if spec.colors.is_empty() => {
                Err(Error::validation("'colors' controller has no colors"))
            }
            Self::Colors(spec) => match frame_count(&spec.colors, spec.duration, spec.fade) {
                Some(len) if len <= MAX_TABLE_LEN => Ok(()),
                _ => Err(Error::validation(format!(
                    "'colors' controller expands to more than {MAX_TABLE_LEN} frames"
                ))),
            },
            Self::Comet(spec) => match spec.trail.checked_add(spec.spacing) {
                Some(0) => Err(Error::validation(
                    "'comet' controller needs a non-zero 'trail' or 'spacing'",
                )),
                Some(len) if len <= MAX_TABLE_LEN => Ok(()),
                _ => Err(Error::validation(format!(
                    "'comet' controller 'trail' + 'spacing' exceeds {MAX_TABLE_LEN} LEDs"
                ))),
            },
            _ => Ok(()),
        }
    }
}

/// Composite controller dividing its LEDs among children
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    #[serde(default, alias = "patterns")]
    pub controllers: Vec<ControllerSpec>,
    /// Phase added each time the children wrap around a longer range
    #[serde(default)]
    pub offset_adjust: i64,
}

/// Cyclic keyframe sequence with optional fades
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorsSpec {
    pub colors: Vec<Keyframe>,
    /// Default hold length for keyframes that omit one
    #[serde(default)]
    pub duration: u32,
    /// Default fade length for keyframes that omit one
    #[serde(default)]
    pub fade: u32,
    #[serde(default)]
    pub mix: Blend,
}

/// Traveling comet with a fading trail
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CometSpec {
    #[serde(deserialize_with = "keyframe::rgb")]
    pub color: Rgb,
    #[serde(default = "default_trail")]
    pub trail: usize,
    #[serde(default = "default_spacing")]
    pub spacing: usize,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub mix: Blend,
}

/// Random warm flicker
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FireSpec {
    /// Fixed seed for reproducible flicker
    #[serde(default)]
    pub seed: Option<u64>,
}

const fn default_trail() -> usize {
    DEFAULT_TRAIL
}

const fn default_spacing() -> usize {
    DEFAULT_SPACING
}
