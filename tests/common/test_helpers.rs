#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use id_log::record::TimeOfDaySource;

/// Time-of-day source that always answers the same hour and minute
pub struct FixedTimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDaySource for FixedTimeOfDay {
    fn hour(&mut self) -> u32 {
        self.hour
    }

    fn minute(&mut self) -> u32 {
        self.minute
    }
}

/// Builder for bibxml `<reference>` documents
#[derive(Default)]
pub struct ReferenceBuilder {
    anchor: Option<String>,
    title: Option<String>,
    authors: Vec<Option<String>>,
    date: Option<(Option<String>, Option<String>, Option<String>)>,
    series_info: Option<String>,
    format_target: Option<String>,
}

impl ReferenceBuilder {
    pub fn new() -> Self {
        Self {
            title: Some("An Internet-Draft".to_string()),
            ..Self::default()
        }
    }

    pub fn anchor(mut self, anchor: &str) -> Self {
        self.anchor = Some(anchor.to_string());
        self
    }

    pub fn without_title(mut self) -> Self {
        self.title = None;
        self
    }

    pub fn author(mut self, fullname: &str) -> Self {
        self.authors.push(Some(fullname.to_string()));
        self
    }

    /// Author carrying only an organization
    pub fn anonymous_author(mut self) -> Self {
        self.authors.push(None);
        self
    }

    pub fn date(mut self, year: Option<&str>, month: Option<&str>, day: Option<&str>) -> Self {
        self.date = Some((
            year.map(str::to_string),
            month.map(str::to_string),
            day.map(str::to_string),
        ));
        self
    }

    pub fn series_info(mut self, value: &str) -> Self {
        self.series_info = Some(value.to_string());
        self
    }

    pub fn format_target(mut self, target: &str) -> Self {
        self.format_target = Some(target.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        match &self.anchor {
            Some(anchor) => xml.push_str(&format!("<reference anchor=\"{anchor}\">\n")),
            None => xml.push_str("<reference>\n"),
        }

        xml.push_str("  <front>\n");
        if let Some(title) = &self.title {
            xml.push_str(&format!("    <title>{title}</title>\n"));
        }
        for author in &self.authors {
            match author {
                Some(name) => xml.push_str(&format!("    <author fullname=\"{name}\"/>\n")),
                None => xml.push_str(
                    "    <author><organization>IETF</organization></author>\n",
                ),
            }
        }
        if let Some((year, month, day)) = &self.date {
            xml.push_str("    <date");
            for (name, value) in [("year", year), ("month", month), ("day", day)] {
                if let Some(value) = value {
                    xml.push_str(&format!(" {name}=\"{value}\""));
                }
            }
            xml.push_str("/>\n");
        }
        xml.push_str("  </front>\n");

        if let Some(value) = &self.series_info {
            xml.push_str(&format!(
                "  <seriesInfo name=\"Internet-Draft\" value=\"{value}\"/>\n"
            ));
        }
        if let Some(target) = &self.format_target {
            xml.push_str(&format!("  <format type=\"TXT\" target=\"{target}\"/>\n"));
        }

        xml.push_str("</reference>\n");
        xml
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.build())
    }
}

/// Current-style reference: draft name in `seriesInfo`
pub fn quic_transport_reference() -> ReferenceBuilder {
    ReferenceBuilder::new()
        .anchor("I-D.ietf-quic-transport")
        .author("Jana Iyengar")
        .author("Martin Thomson")
        .date(Some("2021"), Some("January"), Some("15"))
        .series_info("draft-ietf-quic-transport-34")
}

/// Legacy reference: draft name in `format[@type='TXT']/@target`
pub fn hpke_reference() -> ReferenceBuilder {
    ReferenceBuilder::new()
        .anchor("I-D.irtf-cfrg-hpke")
        .author("Richard Barnes")
        .anonymous_author()
        .date(Some("2022"), Some("Feb"), None)
        .format_target("https://www.ietf.org/archive/id/draft-irtf-cfrg-hpke-12.txt")
}

/// Individual submission named only by its anchor
pub fn individual_reference() -> ReferenceBuilder {
    ReferenceBuilder::new()
        .anchor("I-D.draft-smith-foo-01")
        .author("Jane Smith")
        .date(Some("2020"), Some("December"), Some("31"))
}

/// A bibxml3-style directory with three usable references and three bad entries
pub fn create_bibxml_dir() -> std::io::Result<TempDir> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    quic_transport_reference().write_to(&root.join("reference.I-D.ietf-quic-transport.xml"))?;
    hpke_reference().write_to(&root.join("reference.I-D.irtf-cfrg-hpke.xml"))?;
    individual_reference().write_to(&root.join("reference.I-D.draft-smith-foo.xml"))?;

    quic_transport_reference()
        .without_title()
        .write_to(&root.join("reference.I-D.untitled.xml"))?;
    fs::write(root.join("reference.I-D.broken.xml"), "<reference><front>")?;
    fs::write(root.join("empty.xml"), "")?;

    Ok(temp_dir)
}

/// Sort output lines so assertions do not depend on directory order
pub fn sorted_lines(output: &str) -> Vec<String> {
    let mut lines: Vec<String> = output.lines().map(str::to_string).collect();
    lines.sort();
    lines
}
