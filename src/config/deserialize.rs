// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Handles service lists and retry attempt counts.

use crate::types::ServiceList;
use serde::Deserialize;

pub fn deserialize_services<'de, D>(deserializer: D) -> Result<ServiceList, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let names: Vec<String> = Vec::deserialize(deserializer)?;
    ServiceList::parse(&names).map_err(serde::de::Error::custom)
}

pub fn deserialize_max_attempts<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let attempts = u32::deserialize(deserializer)?;
    if attempts == 0 {
        return Err(serde::de::Error::custom(
            "retry.max_attempts must be at least 1",
        ));
    }
    Ok(attempts)
}
