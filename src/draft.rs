//! Internet-Draft file name decomposition.
//!
//! Draft file names follow `draft-<org>[-<group>]-<name...>-<version>.<ext>`. The leading
//! `draft` segment is always discarded and the trailing segment is always the version,
//! which is excluded from the semantic name but kept in the canonical file name.

use thiserror::Error;

use crate::areas::{Area, area_of};

pub const ORG_IETF: &str = "ietf";
pub const ORG_IRTF: &str = "irtf";
/// Organization assigned to names that cannot be decomposed
pub const ORG_OTHER: &str = "other";

/// Length of the file extension (`.txt`, `.xml`) removed before splitting
const EXTENSION_LEN: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftNameError {
    #[error("expected a group segment after 'draft-{prefix}'")]
    MissingGroup { prefix: String },
}

/// Structured identity parsed from a draft file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftIdentity {
    pub organization: String,
    /// Only set for IETF drafts whose working group is in the area table
    pub area: Option<Area>,
    /// Only set for IETF drafts
    pub working_group: Option<String>,
    /// Only set for IRTF drafts
    pub research_group: Option<String>,
    pub name: String,
    pub canonical_file_name: String,
}

impl DraftIdentity {
    /// Decompose a draft file name such as `draft-ietf-tls-extensions-23.txt`.
    ///
    /// Names with fewer than two hyphen-separated segments degrade to an `other`
    /// identity. IETF, IRTF and double-hyphen names that stop before their group
    /// segment cannot be decomposed and are rejected.
    pub fn parse(file_name: &str) -> Result<Self, DraftNameError> {
        let stem = strip_extension(file_name);
        let segments: Vec<&str> = stem.split('-').collect();

        if segments.len() < 2 {
            return Ok(Self::unclassified(stem));
        }

        let canonical_file_name = segments[1..].join("-");

        let identity = match segments[1] {
            ORG_IETF => {
                let working_group = group_segment(&segments)?;
                Self {
                    organization: ORG_IETF.to_string(),
                    area: area_of(working_group),
                    working_group: Some(working_group.to_string()),
                    research_group: None,
                    name: join_name(&segments, 3),
                    canonical_file_name,
                }
            }
            ORG_IRTF => {
                let research_group = group_segment(&segments)?;
                Self {
                    organization: ORG_IRTF.to_string(),
                    area: None,
                    working_group: None,
                    research_group: Some(research_group.to_string()),
                    name: join_name(&segments, 3),
                    canonical_file_name,
                }
            }
            // `draft--<org>-...`
            "" => Self {
                organization: group_segment(&segments)?.to_string(),
                area: None,
                working_group: None,
                research_group: None,
                name: join_name(&segments, 3),
                canonical_file_name,
            },
            organization => Self {
                organization: organization.to_string(),
                area: None,
                working_group: None,
                research_group: None,
                name: join_name(&segments, 2),
                canonical_file_name,
            },
        };

        Ok(identity)
    }

    fn unclassified(stem: &str) -> Self {
        Self {
            organization: ORG_OTHER.to_string(),
            area: None,
            working_group: None,
            research_group: None,
            name: stem.to_string(),
            canonical_file_name: stem.to_string(),
        }
    }

    /// Non-empty identity fields in path order: organization, area, working group,
    /// research group, name, canonical file name
    pub fn path_tokens(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.organization.as_str()),
            self.area.map(Area::code),
            self.working_group.as_deref(),
            self.research_group.as_deref(),
            Some(self.name.as_str()),
            Some(self.canonical_file_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|token| !token.is_empty())
    }

    /// `/`-joined path tokens, e.g. `ietf/sec/tls/extensions/ietf-tls-extensions-23`
    pub fn path(&self) -> String {
        self.path_tokens().collect::<Vec<_>>().join("/")
    }
}

fn strip_extension(file_name: &str) -> &str {
    match file_name.char_indices().rev().nth(EXTENSION_LEN - 1) {
        Some((index, _)) => &file_name[..index],
        None => "",
    }
}

fn group_segment<'a>(segments: &[&'a str]) -> Result<&'a str, DraftNameError> {
    segments
        .get(2)
        .copied()
        .ok_or_else(|| DraftNameError::MissingGroup {
            prefix: segments[1].to_string(),
        })
}

/// Join `segments[start..len - 1]`, dropping the trailing version segment
fn join_name(segments: &[&str], start: usize) -> String {
    let end = segments.len().saturating_sub(1);
    if start >= end {
        return String::new();
    }
    segments[start..end].join("-")
}
