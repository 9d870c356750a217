//! Identifier extraction from self-referencing hyperlink fields.
//!
//! The API never hands out bare ids; every resource carries `_links` entries
//! like `http://…/soccerseasons/354` and the id has to be peeled out of the
//! URL tail.

/// Result of stripping a known prefix off a self-link. The upstream data is
/// not always a full URL, so a missing prefix degrades to a verbatim copy;
/// the variant makes that passthrough visible to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractedId<'a> {
    Stripped(&'a str),
    Unchanged(&'a str),
}

impl<'a> ExtractedId<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            ExtractedId::Stripped(id) | ExtractedId::Unchanged(id) => id,
        }
    }
}

/// Strips `known_prefix` from the start of `self_link` if present; returns
/// the input untouched otherwise. Pure.
pub fn extract_id<'a>(self_link: &'a str, known_prefix: &str) -> ExtractedId<'a> {
    match self_link.strip_prefix(known_prefix) {
        Some(rest) => ExtractedId::Stripped(rest),
        None => ExtractedId::Unchanged(self_link),
    }
}

/// The per-resource link prefixes for one API deployment, derived from its
/// base endpoint.
#[derive(Debug, Clone)]
pub struct LinkPrefixes {
    pub seasons: String,
    pub teams: String,
    pub fixtures: String,
}

impl LinkPrefixes {
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            seasons: format!("{base}/soccerseasons/"),
            teams: format!("{base}/teams/"),
            fixtures: format!("{base}/fixtures/"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "http://api.football-data.org/alpha/soccerseasons/";

    #[test]
    fn strips_known_prefix() {
        let id = extract_id("http://api.football-data.org/alpha/soccerseasons/42", PREFIX);
        assert_eq!(id, ExtractedId::Stripped("42"));
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn missing_prefix_passes_through() {
        let id = extract_id("42", PREFIX);
        assert_eq!(id, ExtractedId::Unchanged("42"));
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn empty_remainder_is_allowed() {
        assert_eq!(extract_id(PREFIX, PREFIX).as_str(), "");
    }

    #[test]
    fn prefixes_tolerate_trailing_slash_on_base() {
        let with = LinkPrefixes::from_base_url("http://api.example.org/alpha/");
        let without = LinkPrefixes::from_base_url("http://api.example.org/alpha");
        assert_eq!(with.seasons, without.seasons);
        assert_eq!(with.teams, "http://api.example.org/alpha/teams/");
        assert_eq!(with.fixtures, "http://api.example.org/alpha/fixtures/");
    }
}
