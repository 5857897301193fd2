// ABOUTME: Volume mapping to bind mounts, and the volumes-from list.
// ABOUTME: Paths are passed through untouched; the daemon validates them.

use std::fmt;

/// A host path exposed inside the container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindMount {
    pub host_path: String,
    pub container_path: String,
}

impl BindMount {
    pub fn new(host_path: impl Into<String>, container_path: impl Into<String>) -> Self {
        Self {
            host_path: host_path.into(),
            container_path: container_path.into(),
        }
    }
}

/// The daemon's `host:container` bind syntax.
impl fmt::Display for BindMount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host_path, self.container_path)
    }
}

/// One bind mount per `host path -> container path` entry.
pub fn binds<I, K, V>(volumes: I) -> Vec<BindMount>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    volumes
        .into_iter()
        .map(|(host, container)| BindMount::new(host.as_ref(), container.as_ref()))
        .collect()
}

/// Container references to inherit volumes from, order preserved.
pub fn volumes_from<I, S>(containers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    containers
        .into_iter()
        .map(|c| c.as_ref().to_string())
        .collect()
}

/// The comma-joined form, as shown in log lines.
pub fn join_volumes_from(containers: &[String]) -> String {
    containers.join(",")
}
