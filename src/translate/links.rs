// ABOUTME: Container link parsing.
// ABOUTME: "db" links db as db; "db:database" links db under the alias database.

use super::TranslateError;
use std::fmt;

/// A link to another container under an alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub name: String,
    pub alias: String,
}

impl Link {
    pub fn parse(spec: &str) -> Result<Self, TranslateError> {
        let (name, alias) = match spec.split_once(':') {
            Some((_, alias)) if alias.contains(':') => {
                return Err(TranslateError::link(spec, "expected name or name:alias"));
            }
            Some((name, alias)) => (name, alias),
            None => (spec, spec),
        };

        if name.is_empty() {
            return Err(TranslateError::link(spec, "container name is empty"));
        }
        if alias.is_empty() {
            return Err(TranslateError::link(spec, "alias is empty"));
        }

        Ok(Self {
            name: name.to_string(),
            alias: alias.to_string(),
        })
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.alias)
    }
}

/// Parse each link spec, order preserved.
pub fn links<I, S>(specs: I) -> Result<Vec<Link>, TranslateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    specs.into_iter().map(|s| Link::parse(s.as_ref())).collect()
}
