//! Resource paths under the fixed `REST` root.

use crate::schema::RecordType;

/// Root segment every resource path starts with.
pub const ROOT_SEGMENT: &str = "REST";

/// Normalized sequence of path segments identifying an API resource.
///
/// Construction strips empty segments and prefixes [`ROOT_SEGMENT`] when it is
/// missing, so `"/REST/Job/1/"`, `"REST/Job/1"` and `["Job", "1"]` all name the
/// same resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Build a path from segments. Each segment may itself contain `/`.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segments: Vec<String> = segments
            .into_iter()
            .flat_map(|s| {
                s.as_ref()
                    .split('/')
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        if segments.first().map(String::as_str) != Some(ROOT_SEGMENT) {
            segments.insert(0, ROOT_SEGMENT.to_string());
        }

        Self { segments }
    }

    /// Parse a raw path string such as a job redirect body.
    pub fn parse(raw: &str) -> Self {
        Self::new([raw.trim()])
    }

    /// `REST/Session`
    pub fn session() -> Self {
        Self::new(["Session"])
    }

    /// `REST/Node/<zone>/<node>`
    pub fn node(zone: &str, node: &str) -> Self {
        Self::new(["Node", zone, node])
    }

    /// `REST/AllRecord/<zone>/<node>`: every record at the node regardless of type.
    pub fn all_records(zone: &str, node: &str) -> Self {
        Self::new(["AllRecord", zone, node])
    }

    /// `REST/<Type>Record/<zone>/<node>`
    pub fn records(record_type: RecordType, zone: &str, node: &str) -> Self {
        Self::new([record_type.resource_name().as_str(), zone, node])
    }

    /// `REST/<Type>Record/<zone>/<node>/<record_id>`
    pub fn record(record_type: RecordType, zone: &str, node: &str, record_id: &str) -> Self {
        Self::new([record_type.resource_name().as_str(), zone, node, record_id])
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Absolute URL under `base_url`, with the trailing slash the API expects.
    pub fn to_url(&self, base_url: &str) -> String {
        let path = self
            .segments
            .iter()
            .map(|s| urlencoding::encode(s).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{path}/", base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}
