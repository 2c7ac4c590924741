//! Locating a draft's file name inside a bibxml reference.
//!
//! The bibxml schema changed over time and old and new records coexist in the same
//! directory, so the file name is looked up with ordered fallbacks:
//!
//! 1. `<format type="TXT" target="...">`: last path segment of the target URL (old records)
//! 2. `<seriesInfo name="Internet-Draft" value="...">`: value plus `.txt` (current records)
//! 3. root `anchor="I-D.<name>"`: name plus `.txt`
//!
//! The first strategy that produces a non-empty name wins.

use std::fmt;

use url::Url;

use crate::error::XmlResult;
use crate::libxml2::XmlDocument;

const FORMAT_TXT_TARGET: &str = "/reference/format[@type='TXT'][1]/@target";
const SERIES_INFO_VALUE: &str = "/reference/seriesInfo[@name='Internet-Draft'][1]/@value";
const ROOT_ANCHOR: &str = "/*/@anchor";

const ANCHOR_PREFIX: &str = "I-D.";
const DRAFT_EXTENSION: &str = ".txt";

/// Which part of the reference the file name was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftFileSource {
    FormatTarget,
    SeriesInfo,
    Anchor,
}

impl fmt::Display for DraftFileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftFileSource::FormatTarget => "format[@type='TXT']",
            DraftFileSource::SeriesInfo => "seriesInfo[@name='Internet-Draft']",
            DraftFileSource::Anchor => "anchor",
        };
        f.write_str(name)
    }
}

/// A located draft file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftFileReference {
    pub file_name: String,
    pub source: DraftFileSource,
}

/// Run the fallback strategies in order and report the first match
pub fn locate_draft_file(doc: &XmlDocument) -> XmlResult<Option<DraftFileReference>> {
    let strategies: [(DraftFileSource, fn(&XmlDocument) -> XmlResult<Option<String>>); 3] = [
        (DraftFileSource::FormatTarget, from_format_target),
        (DraftFileSource::SeriesInfo, from_series_info),
        (DraftFileSource::Anchor, from_anchor),
    ];

    for (source, strategy) in strategies {
        if let Some(file_name) = strategy(doc)?
            && !file_name.is_empty()
        {
            return Ok(Some(DraftFileReference { file_name, source }));
        }
    }

    Ok(None)
}

/// The draft's file name, or `None` if the reference carries no usable signal
pub fn extract_draft_file_name(doc: &XmlDocument) -> XmlResult<Option<String>> {
    Ok(locate_draft_file(doc)?.map(|reference| reference.file_name))
}

fn from_format_target(doc: &XmlDocument) -> XmlResult<Option<String>> {
    Ok(doc
        .attribute(FORMAT_TXT_TARGET)?
        .filter(|target| !target.is_empty())
        .map(|target| last_path_segment(&target)))
}

fn from_series_info(doc: &XmlDocument) -> XmlResult<Option<String>> {
    Ok(doc
        .attribute(SERIES_INFO_VALUE)?
        .filter(|value| !value.is_empty())
        .map(|value| value + DRAFT_EXTENSION))
}

fn from_anchor(doc: &XmlDocument) -> XmlResult<Option<String>> {
    Ok(doc.attribute(ROOT_ANCHOR)?.and_then(|anchor| {
        anchor
            .strip_prefix(ANCHOR_PREFIX)
            .map(|name| format!("{name}{DRAFT_EXTENSION}"))
    }))
}

/// Last `/`-separated segment of a URL's path.
///
/// Targets that are not absolute URLs are treated as bare paths. The segment is
/// returned as written in the target, without the percent-encoding `Url` applies.
fn last_path_segment(target: &str) -> String {
    let path = match Url::parse(target) {
        Ok(url) => url.path().to_string(),
        Err(_) => target.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    let segment = path.rsplit('/').next().unwrap_or_default();

    if target.contains(segment) {
        return segment.to_string();
    }
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> XmlDocument {
        XmlDocument::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_legacy_format_target() {
        let doc = parse(
            r#"<reference anchor="I-D.ietf-tls-esni">
  <front><title>ECH</title></front>
  <format type="TXT" target="http://www.ietf.org/internet-drafts/draft-ietf-tls-esni-18.txt"/>
</reference>"#,
        );

        let reference = locate_draft_file(&doc).unwrap().unwrap();
        assert_eq!(reference.file_name, "draft-ietf-tls-esni-18.txt");
        assert_eq!(reference.source, DraftFileSource::FormatTarget);
    }

    #[test]
    fn test_legacy_format_wins_over_series_info() {
        let doc = parse(
            r#"<reference anchor="I-D.draft-c-00">
  <seriesInfo name="Internet-Draft" value="draft-b-00"/>
  <format type="TXT" target="https://example.org/id/draft-a-00.txt?x=1#top"/>
</reference>"#,
        );

        assert_eq!(
            extract_draft_file_name(&doc).unwrap().as_deref(),
            Some("draft-a-00.txt")
        );
    }

    #[test]
    fn test_only_txt_format_is_considered() {
        let doc = parse(
            r#"<reference>
  <format type="HTML" target="https://example.org/draft-html-00.html"/>
  <seriesInfo name="Internet-Draft" value="draft-ietf-quic-http-34"/>
</reference>"#,
        );

        let reference = locate_draft_file(&doc).unwrap().unwrap();
        assert_eq!(reference.file_name, "draft-ietf-quic-http-34.txt");
        assert_eq!(reference.source, DraftFileSource::SeriesInfo);
    }

    #[test]
    fn test_series_info_requires_internet_draft_name() {
        let doc = parse(
            r#"<reference anchor="I-D.draft-smith-foo-01">
  <seriesInfo name="DOI" value="10.17487/RFC8446"/>
</reference>"#,
        );

        let reference = locate_draft_file(&doc).unwrap().unwrap();
        assert_eq!(reference.file_name, "draft-smith-foo-01.txt");
        assert_eq!(reference.source, DraftFileSource::Anchor);
    }

    #[test]
    fn test_anchor_fallback() {
        let doc = parse(r#"<reference anchor="I-D.draft-smith-foo-01"><front/></reference>"#);

        assert_eq!(
            extract_draft_file_name(&doc).unwrap().as_deref(),
            Some("draft-smith-foo-01.txt")
        );
    }

    #[test]
    fn test_empty_signals_fall_through() {
        let doc = parse(
            r#"<reference anchor="I-D.draft-last-resort-02">
  <format type="TXT" target="https://example.org/archive/"/>
  <seriesInfo name="Internet-Draft" value=""/>
</reference>"#,
        );

        let reference = locate_draft_file(&doc).unwrap().unwrap();
        assert_eq!(reference.file_name, "draft-last-resort-02.txt");
        assert_eq!(reference.source, DraftFileSource::Anchor);
    }

    #[test]
    fn test_no_signal() {
        let doc = parse(r#"<reference anchor="RFC8446"><front/></reference>"#);
        assert_eq!(extract_draft_file_name(&doc).unwrap(), None);

        let doc = parse(r#"<reference><front/></reference>"#);
        assert_eq!(extract_draft_file_name(&doc).unwrap(), None);
    }

    #[test]
    fn test_relative_target() {
        assert_eq!(last_path_segment("id/draft-x-00.txt?raw"), "draft-x-00.txt");
        assert_eq!(last_path_segment("draft-y-01.txt"), "draft-y-01.txt");
        assert_eq!(
            last_path_segment("ftp://ftp.ietf.org/internet-drafts/draft-z-02.txt"),
            "draft-z-02.txt"
        );
    }

    #[test]
    fn test_target_segment_is_not_percent_encoded() {
        assert_eq!(
            last_path_segment("https://example.org/id/draft a-00.txt"),
            "draft a-00.txt"
        );
        assert_eq!(
            last_path_segment("https://example.org/id/draft-müller-naïve-00.txt"),
            "draft-müller-naïve-00.txt"
        );
        // Escapes already present in the target are kept verbatim
        assert_eq!(
            last_path_segment("https://example.org/id/draft%20b-01.txt"),
            "draft%20b-01.txt"
        );
    }

    #[test]
    fn test_non_ascii_target_reaches_draft_parser() {
        let doc = parse(
            r#"<reference>
  <format type="TXT" target="https://example.org/id/draft-ietf-tls-ésni-18.txt"/>
</reference>"#,
        );

        assert_eq!(
            extract_draft_file_name(&doc).unwrap().as_deref(),
            Some("draft-ietf-tls-ésni-18.txt")
        );
    }
}
