//! Prompt construction for the encouragement message.

/// Event theme woven into every generated message.
pub const THEME: &str = "Crossover to Abundance";

/// Build the generation prompt for a named attendee.
///
/// Keeps the instruction short and bounded: warm tone, the event theme,
/// a hard 30-word cap so the message fits the confirmation card.
pub fn encouragement_prompt(name: &str) -> String {
    format!(
        "You are a prophetic voice for a Christian crossover service. \
         Generate a short, warm, and powerful word of encouragement for 2026 \
         for {name}. Theme: \"{THEME}\". Max 30 words."
    )
}
