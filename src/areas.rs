//! IETF area classification of working groups.

/// An IETF area, identified by its short code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    /// Applications (historical, merged into ART)
    App,
    /// Applications and Real-Time
    Art,
    /// General
    Gen,
    /// Internet
    Int,
    /// Operations and Management
    Ops,
    /// Real-time Applications and Infrastructure (historical, merged into ART)
    Rai,
    /// Routing
    Rtg,
    /// Security
    Sec,
    /// Transport
    Tsv,
}

impl Area {
    /// Lowercase area code used in draft paths
    pub fn code(self) -> &'static str {
        match self {
            Area::App => "app",
            Area::Art => "art",
            Area::Gen => "gen",
            Area::Int => "int",
            Area::Ops => "ops",
            Area::Rai => "rai",
            Area::Rtg => "rtg",
            Area::Sec => "sec",
            Area::Tsv => "tsv",
        }
    }
}

static AREAS: &[(Area, &[&str])] = &[
    (
        Area::App,
        &[
            "appsawg", "atompub", "calsify", "eai", "httpbis", "imapext", "json", "lemonade",
            "morg", "paws", "precis", "sieve", "spfbis", "vcarddav", "weirds", "websec",
        ],
    ),
    (
        Area::Art,
        &[
            "acme", "calext", "cbor", "cellar", "core", "dispatch", "emailcore", "extra", "gendispatch",
            "httpapi", "jmap", "lamps", "mailmaint", "mediaman", "moq", "mimi", "ohai", "regext",
            "sedate", "sipcore", "stir", "uta", "webtrans", "wish",
        ],
    ),
    (Area::Gen, &["genarea", "iasa2", "mtgvenue", "rswg"]),
    (
        Area::Int,
        &[
            "6lo", "6man", "ace", "add", "dhc", "dmm", "dnssd", "drip", "hip", "intarea", "ipwave",
            "lisp", "lpwan", "madinas", "mif", "ntp", "pce", "radext", "shmoo", "snac", "v6ops",
        ],
    ),
    (
        Area::Ops,
        &[
            "anima", "bmwg", "dnsop", "grow", "ippm", "ivy", "mboned", "netconf", "netmod", "nmop",
            "opsawg", "opsarea", "sidrops",
        ],
    ),
    (
        Area::Rai,
        &[
            "avtcore", "avtext", "bfcpbis", "clue", "ecrit", "insipid", "mmusic", "rtcweb", "siprec",
            "straw", "xrblock",
        ],
    ),
    (
        Area::Rtg,
        &[
            "babel", "bess", "bfd", "bier", "ccamp", "detnet", "idr", "lsr", "lsvr", "manet", "mpls",
            "nvo3", "ospf", "pals", "pim", "raw", "rift", "roll", "rtgwg", "savnet", "spring", "teas",
        ],
    ),
    (
        Area::Sec,
        &[
            "cose", "dance", "emu", "gnap", "ipsecme", "jose", "keytrans", "kitten", "lake", "mls",
            "oauth", "openpgp", "pquip", "privacypass", "rats", "scitt", "secdispatch", "suit",
            "teep", "tls",
        ],
    ),
    (
        Area::Tsv,
        &[
            "alto", "ccwg", "deepspace", "dtn", "masque", "nfsv4", "quic", "rmcat", "scone", "taps",
            "tcpm", "tsvwg", "tsvarea",
        ],
    ),
];

/// Area owning a working group, or `None` if the group is not in the table
pub fn area_of(working_group: &str) -> Option<Area> {
    AREAS
        .iter()
        .find(|(_, groups)| groups.contains(&working_group))
        .map(|(area, _)| *area)
}
