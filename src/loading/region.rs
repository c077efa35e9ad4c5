//! Filename-based region guess for images whose data does not say.

use crate::core::types::GameSystem;

/// Tags that mark a PAL release in dump naming conventions
const PAL_TAGS: &[&str] = &["(e)", "(australia)", "(germany)", "(spain)", "(europe)"];

const VS_TAG: &str = "(vs)";

/// Infer the console variant from a file path.
///
/// PAL tags win over `(vs)`; anything else is NTSC.
#[must_use]
pub fn infer_system(path: &str) -> GameSystem {
    let lower = path.to_lowercase();
    if PAL_TAGS.iter().any(|tag| lower.contains(tag)) {
        GameSystem::NesPal
    } else if lower.contains(VS_TAG) {
        GameSystem::VsSystem
    } else {
        GameSystem::NesNtsc
    }
}
