// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Lets port and volume maps use unquoted YAML numbers as keys or values.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Str(String),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Str(s) => s,
        }
    }
}

/// A map whose keys and values may be YAML strings or integers.
pub fn deserialize_scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<Scalar, Scalar> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(k, v)| (k.into_string(), v.into_string()))
        .collect())
}
