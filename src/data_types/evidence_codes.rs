
/// The canonical evidence-code alphabet tracked by the per-code tallies.
/// Declaration order matches the canonical list order and drives report order.
/// Tokens outside this set are excluded from tallies, never an error.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, strum_macros::Display, strum_macros::EnumIter, strum_macros::EnumString)]
pub enum EvidenceCode {
    #[strum(serialize = "PVS1")]
    Pvs1,
    #[strum(serialize = "PS1")]
    Ps1,
    #[strum(serialize = "PM1")]
    Pm1,
    #[strum(serialize = "PM2")]
    Pm2,
    #[strum(serialize = "PM4")]
    Pm4,
    #[strum(serialize = "PM5")]
    Pm5,
    #[strum(serialize = "PP2")]
    Pp2,
    #[strum(serialize = "PP3")]
    Pp3,
    #[strum(serialize = "BA1")]
    Ba1,
    #[strum(serialize = "BS1")]
    Bs1,
    #[strum(serialize = "BS2")]
    Bs2,
    #[strum(serialize = "BP3")]
    Bp3,
    #[strum(serialize = "BP4")]
    Bp4,
    #[strum(serialize = "BP7")]
    Bp7
}

/// Codes whose justifications can overlap when a variant is both a novel event at a
/// known pathogenic residue and a direct match to a known pathogenic variant. A record
/// asserting two or more of these is flagged in the double-counting tally. Note that
/// PP5 is intentionally not part of the tallied alphabet above.
/// Kept lexicographically sorted; the tally keys inherit this order.
pub const OVERLAPPING_EVIDENCE_CODES: [&str; 3] = ["PM5", "PP5", "PS1"];
