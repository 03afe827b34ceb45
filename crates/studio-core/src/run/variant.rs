use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Input dataset offered to the discovery service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    /// Transcript with personal data already removed.
    #[default]
    Sanitized,
    /// Transcript containing personal data the service must scrub.
    Sensitive,
}

impl Variant {
    /// Label shown next to the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Sanitized => "Sanitized transcript",
            Variant::Sensitive => "Sensitive transcript (demo)",
        }
    }

    /// File name of the transcript preview for this variant.
    pub fn sample_file_name(&self) -> String {
        format!("{}.txt", self)
    }
}
