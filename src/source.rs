//! Source registry: which domains each source is allowed to return.

use serde::{Deserialize, Serialize};

/// Maximum number of results a single source contributes to a response.
pub const MAX_RESULTS_PER_SOURCE: usize = 10;

/// Extractor variant used to parse a source's result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// Google Scholar result page.
    Scholar,
    /// Google Web Search result page.
    Web,
}

/// Known sources, in response priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    Pucp,
    Unmsm,
    PjTc,
}

impl Source {
    /// All sources in the order their results appear in a response.
    pub const ALL: [Source; 3] = [Source::Pucp, Source::Unmsm, Source::PjTc];

    /// Display name, also used as the `source` tag on results.
    pub fn name(self) -> &'static str {
        match self {
            Source::Pucp => "PUCP",
            Source::Unmsm => "UNMSM",
            Source::PjTc => "PJ/TC",
        }
    }

    /// Allowed host domains, in query order.
    pub fn domains(self) -> &'static [&'static str] {
        match self {
            Source::Pucp => &[
                "tesis.pucp.edu.pe",
                "repositorio.pucp.edu.pe",
                "revistas.pucp.edu.pe",
            ],
            Source::Unmsm => &["cybertesis.unmsm.edu.pe"],
            Source::PjTc => &["pj.gob.pe", "tc.gob.pe"],
        }
    }

    pub fn extractor_kind(self) -> ExtractorKind {
        match self {
            Source::Pucp | Source::Unmsm => ExtractorKind::Scholar,
            Source::PjTc => ExtractorKind::Web,
        }
    }

    /// Looks up a source by display name or CLI shortcut (case-insensitive).
    pub fn from_name(name: &str) -> Option<Source> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "pucp" => Some(Source::Pucp),
            "unmsm" => Some(Source::Unmsm),
            "pj/tc" | "pjtc" | "pj-tc" => Some(Source::PjTc),
            _ => None,
        }
    }

    /// Builds the immutable spec for this source.
    pub fn spec(self) -> SourceSpec {
        SourceSpec {
            name: self.name().to_string(),
            domains: self.domains().iter().map(|d| d.to_string()).collect(),
            kind: self.extractor_kind(),
        }
    }
}

/// A configured search origin: its name, domain allowlist and extractor variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    pub domains: Vec<String>,
    pub kind: ExtractorKind,
}

impl SourceSpec {
    /// The full registry in response priority order.
    pub fn registry() -> Vec<SourceSpec> {
        Source::ALL.iter().map(|s| s.spec()).collect()
    }

    /// Returns `true` if `link` contains any allowed domain as a substring.
    ///
    /// Deliberately loose: subdomains and tracking-decorated URLs that embed
    /// the domain anywhere are accepted.
    pub fn allows(&self, link: &str) -> bool {
        link_matches_domains(link, &self.domains)
    }
}

/// Substring-containment domain filter.
pub fn link_matches_domains<S: AsRef<str>>(link: &str, domains: &[S]) -> bool {
    domains.iter().any(|d| link.contains(d.as_ref()))
}
