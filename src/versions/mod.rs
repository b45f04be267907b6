//! Supported SCUTTLE API versions.

mod v1;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Result, ScuttleError};
use crate::traits::{Transport, WikiApi};

pub use v1::V1;

/// A SCUTTLE API version this client has an implementation for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    #[default]
    V1,
}

impl ApiVersion {
    /// Every supported version, oldest first.
    pub const ALL: &'static [ApiVersion] = &[ApiVersion::V1];

    /// The newest supported version.
    pub fn latest() -> Self {
        ApiVersion::V1
    }

    /// The numeric version, as used in API URLs.
    pub fn number(&self) -> u32 {
        match self {
            ApiVersion::V1 => 1,
        }
    }

    /// Build the implementation of this version on top of a transport.
    pub fn connect(self, transport: Arc<dyn Transport>) -> Box<dyn WikiApi> {
        match self {
            ApiVersion::V1 => Box::new(V1::new(transport)),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

impl TryFrom<u32> for ApiVersion {
    type Error = ScuttleError;

    fn try_from(number: u32) -> Result<Self> {
        ApiVersion::ALL
            .iter()
            .copied()
            .find(|v| v.number() == number)
            .ok_or(ScuttleError::UnsupportedVersion(number))
    }
}

impl FromStr for ApiVersion {
    type Err = ScuttleError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches(['v', 'V']);
        let number = digits.parse::<u32>().map_err(|_| {
            ScuttleError::ConfigMissing(format!("API version must be a number, got '{s}'"))
        })?;
        ApiVersion::try_from(number)
    }
}
