//! Display colours for gource, as six-digit hexadecimal RGB.

use crate::areas::Area;
use crate::draft::{DraftIdentity, ORG_IETF, ORG_IRTF};

/// IETF drafts outside any known area
pub const IETF_COLOUR: &str = "0079C1";
/// IRTF research group drafts
pub const IRTF_COLOUR: &str = "7F3F98";
/// Everything else, including areas without a colour of their own
pub const OTHER_COLOUR: &str = "A0A0A0";

// Historical areas (app, rai) intentionally have no entry.
static AREA_COLOURS: &[(Area, &str)] = &[
    (Area::Art, "E6194B"),
    (Area::Gen, "F58231"),
    (Area::Int, "3CB44B"),
    (Area::Ops, "FFE119"),
    (Area::Rtg, "46F0F0"),
    (Area::Sec, "F032E6"),
    (Area::Tsv, "BCF60C"),
];

/// Colour assigned to an area, if it has one
pub fn area_colour(area: Area) -> Option<&'static str> {
    AREA_COLOURS
        .iter()
        .find(|(candidate, _)| *candidate == area)
        .map(|(_, colour)| *colour)
}

/// Resolve the display colour of a draft: area colour first, then organization
pub fn colour_of(identity: &DraftIdentity) -> &'static str {
    if let Some(area) = identity.area {
        return area_colour(area).unwrap_or(OTHER_COLOUR);
    }

    match identity.organization.as_str() {
        ORG_IETF => IETF_COLOUR,
        ORG_IRTF => IRTF_COLOUR,
        _ => OTHER_COLOUR,
    }
}
