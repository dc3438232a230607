
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum CategoryError {
    #[error("unrecognized pathogenicity code: {label:?}")]
    UnrecognizedCode { label: String },
    #[error("unrecognized germline classification: {label:?}")]
    UnrecognizedGermlineClass { label: String },
    #[error("unrecognized auto-pathogenicity code: {label:?}")]
    UnrecognizedAutoCode { label: String }
}

/// The closed pathogenicity category alphabet.
/// Declaration order drives report order, so keep P at the top and B at the bottom.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, strum_macros::Display, strum_macros::EnumString)]
pub enum Pathogenicity {
    #[strum(serialize = "P")]
    Pathogenic,
    #[strum(serialize = "LP")]
    LikelyPathogenic,
    /// Upper VUS sub-tier, "Uncertain significance P" in verbose sources
    #[strum(serialize = "VUS++")]
    VusHigh,
    /// Lower VUS sub-tier, "Uncertain significance LP" in verbose sources
    #[strum(serialize = "VUS+")]
    VusModerate,
    #[strum(serialize = "VUS")]
    Vus,
    #[strum(serialize = "LB")]
    LikelyBenign,
    #[strum(serialize = "B")]
    Benign
}

impl Pathogenicity {
    /// Maps a canonical short code from the truth set ("P", "LP", "VUS", ...).
    /// The label vocabulary is closed; anything else is a configuration error.
    /// # Arguments
    /// * `label` - the raw truth-set pathogenicity field
    pub fn from_truth_label(label: &str) -> Result<Self, CategoryError> {
        label.parse()
            .map_err(|_| CategoryError::UnrecognizedCode { label: label.to_string() })
    }

    /// Maps a verbose competitor germline classification to a category (the shrinkage mapping).
    /// The label vocabulary is closed; anything else is a configuration error.
    /// # Arguments
    /// * `label` - the raw "Germline Class" field
    pub fn from_germline_class(label: &str) -> Result<Self, CategoryError> {
        match label {
            "Pathogenic" => Ok(Self::Pathogenic),
            "Likely pathogenic" => Ok(Self::LikelyPathogenic),
            "Uncertain significance P" => Ok(Self::VusHigh),
            "Uncertain significance LP" => Ok(Self::VusModerate),
            "Uncertain significance" => Ok(Self::Vus),
            "Likely benign" => Ok(Self::LikelyBenign),
            "Benign" => Ok(Self::Benign),
            _ => Err(CategoryError::UnrecognizedGermlineClass { label: label.to_string() })
        }
    }

    /// Maps a pipeline-internal code with trailing confidence modifiers to a category
    /// (the extended mapping). Modifiers encode confidence and are stripped, never
    /// interpreted numerically. The 20-label vocabulary below is closed; anything else
    /// is a configuration error.
    /// # Arguments
    /// * `code` - the raw "auto_pathogenicity" field
    pub fn from_modifier_code(code: &str) -> Result<Self, CategoryError> {
        match code {
            "P" | "P-" | "P--" | "P---" => Ok(Self::Pathogenic),
            "LP" | "LP-" | "LP--" | "LP---" => Ok(Self::LikelyPathogenic),
            "VUS++" | "VUS++-" | "VUS++--" | "VUS++---" => Ok(Self::VusHigh),
            "VUS+" | "VUS+-" | "VUS+--" | "VUS+---" => Ok(Self::VusModerate),
            "VUS" | "VUS-" | "VUS--" => Ok(Self::Vus),
            "LB" => Ok(Self::LikelyBenign),
            "B" => Ok(Self::Benign),
            _ => Err(CategoryError::UnrecognizedAutoCode { label: code.to_string() })
        }
    }

    /// Collapses the VUS sub-tiers into plain VUS, leaving everything else untouched.
    /// This is the comparison-time "merge VUS" option.
    pub fn merge_vus(self) -> Self {
        match self {
            Self::VusHigh |
            Self::VusModerate => Self::Vus,
            other => other
        }
    }
}

/// Category groupings used when reporting a contingency table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Grouping {
    /// Five categories; VUS sub-tiers are folded into VUS
    Standard,
    /// Three-bucket coarsening: LP into P, VUS tiers into VUS, LB into B
    Merged
}

impl Grouping {
    /// Collapses a category into its reporting bucket for this grouping.
    /// # Arguments
    /// * `category` - the category to collapse
    pub fn apply(&self, category: Pathogenicity) -> Pathogenicity {
        match self {
            Grouping::Standard => category.merge_vus(),
            Grouping::Merged => {
                match category {
                    Pathogenicity::Pathogenic |
                    Pathogenicity::LikelyPathogenic => Pathogenicity::Pathogenic,
                    Pathogenicity::VusHigh |
                    Pathogenicity::VusModerate |
                    Pathogenicity::Vus => Pathogenicity::Vus,
                    Pathogenicity::LikelyBenign |
                    Pathogenicity::Benign => Pathogenicity::Benign
                }
            }
        }
    }

    /// The categories reported for this grouping, in report order.
    pub fn categories(&self) -> &'static [Pathogenicity] {
        match self {
            Grouping::Standard => &[
                Pathogenicity::Pathogenic,
                Pathogenicity::LikelyPathogenic,
                Pathogenicity::Vus,
                Pathogenicity::LikelyBenign,
                Pathogenicity::Benign
            ],
            Grouping::Merged => &[
                Pathogenicity::Pathogenic,
                Pathogenicity::Vus,
                Pathogenicity::Benign
            ]
        }
    }
}
