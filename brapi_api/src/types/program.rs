//! Breeding program records returned by the `/programs` endpoint.

use serde::{Deserialize, Serialize};

use crate::schema::{required_nullable, Schema};

use super::Resource;

/// Unique identifier for a program (e.g. "f44f152f").
pub type ProgramDbId = String;

/// A breeding program.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Unique program identifier.
    pub program_db_id: ProgramDbId,

    /// Human readable program name.
    pub program_name: String,

    /// Short form of the name. May be `null` or missing.
    #[serde(default)]
    pub abbreviation: Option<String>,

    /// Program objective. The key is always sent, the value may be `null`.
    #[serde(deserialize_with = "required_nullable")]
    pub objective: Option<String>,

    #[serde(default)]
    pub additional_info: Option<AdditionalInfo>,

    #[serde(default)]
    pub program_type: Option<ProgramType>,

    #[serde(default)]
    pub common_crop_name: Option<String>,
}

impl Program {
    /// The free-text description nested under `additionalInfo`, if any.
    pub fn description(&self) -> Option<&str> {
        self.additional_info
            .as_ref()
            .and_then(|info| info.description.as_deref())
    }
}

impl Schema for Program {
    const NAME: &'static str = "Program";
}

impl Resource for Program {
    const PATH: &'static str = "programs";
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AdditionalInfo {
    #[serde(default)]
    pub description: Option<String>,
}

/// BrAPI program classification. Serialized in upper case.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProgramType {
    /// A long running breeding program.
    Standard,
    /// A time-bounded project.
    Project,
}

impl std::fmt::Display for ProgramType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ProgramType::Standard => "STANDARD",
                ProgramType::Project => "PROJECT",
            }
        )
    }
}
