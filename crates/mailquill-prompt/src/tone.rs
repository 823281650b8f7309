// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tone instruction text.

use mailquill_core::Tone;

/// One instruction sentence per tone, embedded into every prompt.
///
/// Unknown tone strings never reach this function: the serde boundary on
/// [`Tone`] already folds them into `Professional`.
pub fn instruction(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => {
            "Write in a formal, business-appropriate tone using professional language and proper etiquette."
        }
        Tone::Friendly => {
            "Write in a warm and personable tone while maintaining professionalism."
        }
        Tone::Casual => "Write in a relaxed and informal tone, as if speaking to a friend.",
        Tone::Custom => "Write in the user's preferred style based on the context.",
    }
}
