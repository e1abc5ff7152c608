//! Character profile input shape.

use serde::{Deserialize, Serialize};

/// A character definition submitted by the caller.
///
/// Used only to render the system-prompt string for the character's
/// transcript; the profile itself is never persisted verbatim. Wire field
/// names are camelCase to match the client payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterProfile {
    pub name: String,
    pub background: String,
    pub physical_description: String,
    pub mannerisms: String,
    pub known_connections: String,
    /// The human persona the character is role-playing with.
    pub persona: String,
    pub other: String,
}
