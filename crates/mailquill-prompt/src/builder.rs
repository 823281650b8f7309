// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt construction.
//!
//! Maps an `(action, text, tone, language, previous email)` tuple into a
//! single instruction string for the generation backend. Pure and
//! deterministic: identical inputs always yield the identical string.

use mailquill_core::{ActionKind, Tone};

use crate::catalog::{self, LanguageProfile};
use crate::tone;

/// Builds the model-ready prompt for one turn.
///
/// With a previous email present the prompt frames a modification of that
/// email, embedding it verbatim; without one it frames a fresh composition.
/// Both branches carry the same formatting/cultural constraint checklist.
/// Unrecognized language codes fall back to English silently.
pub fn build_prompt(
    action: ActionKind,
    text: &str,
    tone: Tone,
    language: &str,
    previous_email: Option<&str>,
) -> String {
    let tone_instructions = tone::instruction(tone);
    let profile = catalog::lookup(language);

    match previous_email {
        Some(previous) => modify_prompt(action, text, tone_instructions, profile, previous),
        None => compose_prompt(text, tone_instructions, profile),
    }
}

fn modify_prompt(
    action: ActionKind,
    text: &str,
    tone_instructions: &str,
    profile: &LanguageProfile,
    previous: &str,
) -> String {
    let directive = match action {
        ActionKind::Reply => "Please write a reply to this email based on the user's request.",
        ActionKind::Summarize => "Please summarize this email based on the user's request.",
        ActionKind::Write | ActionKind::Enhance => {
            "Please modify or enhance this email based on the user's request."
        }
    };

    format!(
        "Here is an existing email:\n\
         \n\
         {previous}\n\
         \n\
         User request: {text}\n\
         \n\
         {directive} Follow these guidelines:\n\
         - Write the ENTIRE response in {name}\n\
         - Use proper {name} grammar, punctuation, and formatting\n\
         - For formal emails in {name}, use \"{greeting}\" as greeting\n\
         - For formal emails in {name}, use \"{closing}\" as closing\n\
         - Use the correct date format for {name}: {date_format}\n\
         - Follow the name format: {name_format}\n\
         - Use appropriate honorifics based on gender and formality ({honorifics})\n\
         - Maintain the same tone: {tone_instructions}\n\
         - Preserve the email structure and format\n\
         - Incorporate the requested changes seamlessly\n\
         - Keep any relevant information from the original email\n\
         - Ensure the modified email is complete and coherent\n\
         - Make sure the response reads naturally in {name}\n\
         - Follow these cultural notes for {name}:\n\
         {notes}",
        name = profile.name,
        greeting = profile.formal_greeting,
        closing = profile.closing,
        date_format = profile.date_format,
        name_format = profile.name_format,
        honorifics = honorific_guidance(profile),
        notes = cultural_notes(profile),
    )
}

fn compose_prompt(text: &str, tone_instructions: &str, profile: &LanguageProfile) -> String {
    format!(
        "Write a professional email in {name}. Follow these requirements:\n\
         \n\
         Content Requirements:\n\
         - Use this context/request: {text}\n\
         - Follow this tone: {tone_instructions}\n\
         \n\
         Language and Cultural Requirements:\n\
         - Write the ENTIRE email in {name}\n\
         - Use proper {name} grammar and punctuation\n\
         - For formal emails, use \"{greeting}\" as greeting\n\
         - For formal emails, use \"{closing}\" as closing\n\
         - Use the correct date format: {date_format}\n\
         - Follow the name format: {name_format}\n\
         - Use appropriate honorifics based on gender and formality ({honorifics})\n\
         - Follow these cultural notes:\n\
         {notes}\n\
         \n\
         Format Requirements:\n\
         - Include proper email format with greeting and signature\n\
         - Use appropriate spacing and paragraphs\n\
         - Be concise and clear\n\
         - Maintain professional formatting\n\
         \n\
         Cultural Considerations:\n\
         - Use appropriate honorifics and titles for {name}\n\
         - Follow cultural norms for formal communication in {name}\n\
         - Use region-appropriate date formats\n\
         - Include any culture-specific formalities required in {name} business communication",
        name = profile.name,
        greeting = profile.formal_greeting,
        closing = profile.closing,
        date_format = profile.date_format,
        name_format = profile.name_format,
        honorifics = honorific_guidance(profile),
        notes = cultural_notes(profile),
    )
}

fn honorific_guidance(profile: &LanguageProfile) -> String {
    format!(
        "male: {}; female: {}; neutral: {}",
        profile.honorifics.male.join(", "),
        profile.honorifics.female.join(", "),
        profile.honorifics.neutral.join(", "),
    )
}

fn cultural_notes(profile: &LanguageProfile) -> String {
    profile
        .cultural_notes
        .iter()
        .map(|note| format!("  - {note}"))
        .collect::<Vec<_>>()
        .join("\n")
}
