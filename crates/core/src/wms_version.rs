// SPDX-License-Identifier: MIT

//!
//! The WMS protocol version type
//!

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors that can arise in relation to a [`WmsVersion`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WmsVersionError {
    #[error("Unknown WMS version `{0}`")]
    Unknown(String),
}

/// A WMS protocol version (as sent in the `VERSION` request parameter)
#[derive(derive_more::Display, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WmsVersion {
    #[display("1.0.0")]
    V1_0_0,
    #[display("1.1.0")]
    V1_1_0,
    #[default]
    #[display("1.1.1")]
    V1_1_1,
    #[display("1.3.0")]
    V1_3_0,
}

impl WmsVersion {
    /// Get the version string
    pub fn as_str(&self) -> &'static str {
        match self {
            WmsVersion::V1_0_0 => "1.0.0",
            WmsVersion::V1_1_0 => "1.1.0",
            WmsVersion::V1_1_1 => "1.1.1",
            WmsVersion::V1_3_0 => "1.3.0",
        }
    }
}

impl TryFrom<&str> for WmsVersion {
    type Error = WmsVersionError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "1.0.0" => Ok(WmsVersion::V1_0_0),
            "1.1.0" => Ok(WmsVersion::V1_1_0),
            "1.1.1" => Ok(WmsVersion::V1_1_1),
            "1.3.0" => Ok(WmsVersion::V1_3_0),
            _ => Err(WmsVersionError::Unknown(value.to_string())),
        }
    }
}

impl Serialize for WmsVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WmsVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        WmsVersion::try_from(string.as_str()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use timemap_macros::wms_version;

    #[test]
    fn try_from() {
        assert_eq!(WmsVersion::try_from("1.3.0"), Ok(WmsVersion::V1_3_0));
        assert_eq!(WmsVersion::try_from(" 1.1.1 "), Ok(WmsVersion::V1_1_1));
        assert!(WmsVersion::try_from("2.0").is_err());
        assert!(WmsVersion::try_from("").is_err());
    }

    #[test]
    fn default_and_display() {
        assert_eq!(WmsVersion::default(), WmsVersion::V1_1_1);
        assert_eq!(WmsVersion::V1_3_0.to_string(), "1.3.0");
        assert_eq!(wms_version!("1.3.0"), WmsVersion::V1_3_0);
    }

    #[test]
    fn serde() {
        let version: WmsVersion = serde_json::from_str(r#""1.3.0""#).unwrap();
        assert_eq!(version, WmsVersion::V1_3_0);
        assert_eq!(serde_json::to_string(&version).unwrap(), r#""1.3.0""#);
        assert!(serde_json::from_str::<WmsVersion>(r#""9.9.9""#).is_err());
    }
}
