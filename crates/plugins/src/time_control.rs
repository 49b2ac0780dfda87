// SPDX-License-Identifier: MIT

//!
//! Playback options of a time control
//!

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can arise in relation to the time control options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeControlError {
    /// The transition time can't be converted to a whole number of ms
    #[error("Transition time `{0}` is not an integer")]
    TransitionTime(String),
}

/// The duration (in ms) of the animation between two timestamps
#[derive(derive_more::Display, Serialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TransitionTime(i64);

impl TransitionTime {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }
}

impl Default for TransitionTime {
    fn default() -> Self {
        Self(200)
    }
}

impl From<i64> for TransitionTime {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Truncates towards zero.  Fails for NaN, infinities and values that don't fit
impl TryFrom<f64> for TransitionTime {
    type Error = TimeControlError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let truncated = value.trunc();
        if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
            Ok(Self(truncated as i64))
        } else {
            Err(TimeControlError::TransitionTime(value.to_string()))
        }
    }
}

/// Accepts an integer, optionally surrounded by whitespace
impl FromStr for TransitionTime {
    type Err = TimeControlError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| TimeControlError::TransitionTime(s.to_string()))
    }
}

/// Used only by the custom deserialiser
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawTransitionTime {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for TransitionTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let transition_time = match RawTransitionTime::deserialize(deserializer)? {
            RawTransitionTime::Integer(millis) => Ok(TransitionTime(millis)),
            RawTransitionTime::Float(millis) => TransitionTime::try_from(millis),
            RawTransitionTime::Text(text) => text.parse(),
        };
        transition_time.map_err(serde::de::Error::custom)
    }
}

/// Used only by the time interval deserialiser
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawTimeInterval {
    Flag(bool),
    Text(String),
}

/// Accepts a string, `false` or `null`
fn deserialize_time_interval<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawTimeInterval>::deserialize(deserializer)? {
        None | Some(RawTimeInterval::Flag(false)) => Ok(None),
        Some(RawTimeInterval::Text(text)) => Ok(Some(text)),
        Some(RawTimeInterval::Flag(true)) => Err(serde::de::Error::custom(
            "time interval must be an ISO 8601 interval or `false`",
        )),
    }
}

/// How the time control plays through the available times
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeControlOptions {
    /// Duration of the transition between timestamps
    pub transition_time: TransitionTime,

    /// Whether the animation loops (off by default to reduce load on WMS
    /// services)
    #[serde(rename = "loop")]
    pub loop_playback: bool,

    /// Whether the animation starts automatically (off by default to reduce
    /// load on WMS services)
    pub auto_play: bool,

    /// ISO 8601 duration used to build the available times from the first
    /// available time, e.g. `P1M`, `P1D`, `PT1H`, `PT1M`.  Passed through as is.
    pub period: String,

    /// ISO 8601 interval that overrides the available times, e.g.
    /// `2016-01-01/2016-01-08`.  Passed through as is.  In JSON, `false` and
    /// `null` both mean "not set".
    #[serde(deserialize_with = "deserialize_time_interval")]
    pub time_interval: Option<String>,
}

impl Default for TimeControlOptions {
    fn default() -> Self {
        Self {
            transition_time: TransitionTime::default(),
            loop_playback: false,
            auto_play: false,
            period: String::from("P1D"),
            time_interval: None,
        }
    }
}

impl TimeControlOptions {
    /// The time interval if it's set to something non-empty
    pub fn effective_time_interval(&self) -> Option<&str> {
        self.time_interval
            .as_deref()
            .filter(|interval| !interval.is_empty())
    }
}
