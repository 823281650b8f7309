// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static language catalog.
//!
//! A fixed, compiled-in table of formatting and cultural conventions per
//! supported language. No insertion or removal operations exist; adding a
//! language is a data change. Lookup never fails -- unknown codes resolve to
//! the English profile.

/// Honorific sets keyed by gender category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Honorifics {
    pub male: &'static [&'static str],
    pub female: &'static [&'static str],
    pub neutral: &'static [&'static str],
}

/// Formatting rules and cultural conventions for one supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    pub code: &'static str,
    pub name: &'static str,
    pub formal_greeting: &'static str,
    pub closing: &'static str,
    pub date_format: &'static str,
    pub name_format: &'static str,
    pub honorifics: Honorifics,
    pub cultural_notes: &'static [&'static str],
}

/// Looks up a language profile by code. Unknown codes resolve silently to
/// the English profile.
pub fn lookup(code: &str) -> &'static LanguageProfile {
    SUPPORTED
        .iter()
        .find(|profile| profile.code == code)
        .unwrap_or(&SUPPORTED[0])
}

/// All supported languages. English is first and doubles as the fallback.
pub static SUPPORTED: &[LanguageProfile] = &[
    LanguageProfile {
        code: "en",
        name: "English",
        formal_greeting: "Dear",
        closing: "Best regards,",
        date_format: "MM/DD/YYYY",
        name_format: "{title} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["Mr.", "Dr.", "Prof."],
            female: &["Ms.", "Mrs.", "Dr.", "Prof."],
            neutral: &["Mx.", "Dr.", "Prof."],
        },
        cultural_notes: &[
            "Use titles unless explicitly asked to use first names",
            "Keep paragraphs concise and well-spaced",
            "Be direct but polite",
        ],
    },
    LanguageProfile {
        code: "es",
        name: "Spanish (Español)",
        formal_greeting: "Estimado/a",
        closing: "Atentamente,",
        date_format: "DD/MM/YYYY",
        name_format: "{honorific} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["Sr.", "Dr.", "Prof."],
            female: &["Sra.", "Srita.", "Dr.", "Prof."],
            neutral: &["Sr.", "Dr.", "Prof."],
        },
        cultural_notes: &[
            "Use titles unless explicitly asked to use first names",
            "Keep paragraphs concise and well-spaced",
            "Be direct but polite",
        ],
    },
    LanguageProfile {
        code: "fr",
        name: "French (Français)",
        formal_greeting: "Cher/Chère",
        closing: "Cordialement,",
        date_format: "DD/MM/YYYY",
        name_format: "{honorific} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["M.", "Dr.", "Prof."],
            female: &["Mme.", "Mlle.", "Dr.", "Prof."],
            neutral: &["Mx.", "Dr.", "Prof."],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Keep paragraphs concise",
            "Be polite and respectful",
            "Use proper French punctuation and spacing",
        ],
    },
    LanguageProfile {
        code: "de",
        name: "German (Deutsch)",
        formal_greeting: "Sehr geehrte(r)",
        closing: "Mit freundlichen Grüßen,",
        date_format: "DD.MM.YYYY",
        name_format: "{honorific} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["Herr", "Dr.", "Prof."],
            female: &["Frau", "Dr.", "Prof."],
            neutral: &["Dr.", "Prof."],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Be precise and structured",
            "Maintain professional distance",
            "Use proper German punctuation",
        ],
    },
    LanguageProfile {
        code: "it",
        name: "Italian (Italiano)",
        formal_greeting: "Gentile",
        closing: "Cordiali saluti,",
        date_format: "DD/MM/YYYY",
        name_format: "{honorific} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["Sig.", "Dott.", "Prof."],
            female: &["Sig.ra", "Dott.ssa", "Prof.ssa"],
            neutral: &["Dott.", "Prof."],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Be warm but professional",
            "Use proper Italian punctuation",
            "Maintain respectful tone",
        ],
    },
    LanguageProfile {
        code: "pt",
        name: "Portuguese (Português)",
        formal_greeting: "Prezado(a)",
        closing: "Atenciosamente,",
        date_format: "DD/MM/YYYY",
        name_format: "{honorific} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["Sr.", "Dr.", "Prof."],
            female: &["Sra.", "Dra.", "Profa."],
            neutral: &["Dr.", "Prof."],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Be polite and respectful",
            "Use proper Portuguese punctuation",
            "Maintain professional tone",
        ],
    },
    LanguageProfile {
        code: "nl",
        name: "Dutch (Nederlands)",
        formal_greeting: "Geachte",
        closing: "Met vriendelijke groet,",
        date_format: "DD-MM-YYYY",
        name_format: "{honorific} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["Dhr.", "Dr.", "Prof."],
            female: &["Mevr.", "Dr.", "Prof."],
            neutral: &["Dr.", "Prof."],
        },
        cultural_notes: &[
            "Be direct but polite",
            "Use formal language in business context",
            "Keep communication clear and concise",
            "Maintain professional distance",
        ],
    },
    LanguageProfile {
        code: "ru",
        name: "Russian (Русский)",
        formal_greeting: "Уважаемый(ая)",
        closing: "С уважением,",
        date_format: "DD.MM.YYYY",
        name_format: "{honorific} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["Господин", "Доктор", "Профессор"],
            female: &["Госпожа", "Доктор", "Профессор"],
            neutral: &["Доктор", "Профессор"],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Be respectful and professional",
            "Use proper Russian punctuation",
            "Maintain formal tone",
        ],
    },
    LanguageProfile {
        code: "zh",
        name: "Chinese (中文)",
        formal_greeting: "尊敬的",
        closing: "此致",
        date_format: "YYYY/MM/DD",
        name_format: "{honorific}{lastName}{firstName}",
        honorifics: Honorifics {
            male: &["先生", "博士", "教授"],
            female: &["女士", "博士", "教授"],
            neutral: &["博士", "教授"],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Be respectful and humble",
            "Use proper Chinese punctuation",
            "Maintain hierarchical respect",
        ],
    },
    LanguageProfile {
        code: "ja",
        name: "Japanese (日本語)",
        formal_greeting: "拝啓",
        closing: "敬具",
        date_format: "YYYY/MM/DD",
        name_format: "{lastName}{honorific} {firstName}",
        honorifics: Honorifics {
            male: &["様", "博士", "教授"],
            female: &["様", "博士", "教授"],
            neutral: &["様", "博士", "教授"],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Be extremely polite and respectful",
            "Use proper Japanese punctuation",
            "Maintain hierarchical respect",
        ],
    },
    LanguageProfile {
        code: "ko",
        name: "Korean (한국어)",
        formal_greeting: "존경하는",
        closing: "감사합니다",
        date_format: "YYYY/MM/DD",
        name_format: "{lastName}{honorific} {firstName}",
        honorifics: Honorifics {
            male: &["님", "박사", "교수"],
            female: &["님", "박사", "교수"],
            neutral: &["님", "박사", "교수"],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Be extremely polite and respectful",
            "Use proper Korean punctuation",
            "Maintain hierarchical respect",
        ],
    },
    LanguageProfile {
        code: "ar",
        name: "Arabic (العربية)",
        formal_greeting: "عزيزي/عزيزتي",
        closing: "مع تحياتي",
        date_format: "DD/MM/YYYY",
        name_format: "{honorific} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["السيد", "الدكتور", "الأستاذ"],
            female: &["السيدة", "الدكتورة", "الأستاذة"],
            neutral: &["الدكتور", "الأستاذ"],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Be respectful and polite",
            "Use proper Arabic punctuation",
            "Maintain cultural sensitivity",
        ],
    },
    LanguageProfile {
        code: "hi",
        name: "Hindi (हिन्दी)",
        formal_greeting: "प्रिय",
        closing: "सादर",
        date_format: "DD/MM/YYYY",
        name_format: "{honorific} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["श्री", "डॉ.", "प्रो."],
            female: &["श्रीमती", "डॉ.", "प्रो."],
            neutral: &["डॉ.", "प्रो."],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Be respectful and polite",
            "Use proper Hindi punctuation",
            "Maintain cultural sensitivity",
        ],
    },
    LanguageProfile {
        code: "tr",
        name: "Turkish (Türkçe)",
        formal_greeting: "Sayın",
        closing: "Saygılarımla,",
        date_format: "DD.MM.YYYY",
        name_format: "{honorific} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["Bay", "Dr.", "Prof."],
            female: &["Bayan", "Dr.", "Prof."],
            neutral: &["Dr.", "Prof."],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Be respectful and polite",
            "Use proper Turkish punctuation",
            "Maintain professional tone",
        ],
    },
    LanguageProfile {
        code: "pl",
        name: "Polish (Polski)",
        formal_greeting: "Szanowny(a)",
        closing: "Z poważaniem,",
        date_format: "DD.MM.YYYY",
        name_format: "{honorific} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["Pan", "Dr.", "Prof."],
            female: &["Pani", "Dr.", "Prof."],
            neutral: &["Dr.", "Prof."],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Be respectful and polite",
            "Use proper Polish punctuation",
            "Maintain professional tone",
        ],
    },
    LanguageProfile {
        code: "he",
        name: "Hebrew (עברית)",
        formal_greeting: "יקר/ה",
        closing: "בברכה,",
        date_format: "DD/MM/YYYY",
        name_format: "{honorific} {firstName} {lastName}",
        honorifics: Honorifics {
            male: &["מר", "ד\"ר", "פרופ'"],
            female: &["גב'", "ד\"ר", "פרופ'"],
            neutral: &["ד\"ר", "פרופ'"],
        },
        cultural_notes: &[
            "Use formal language in business context",
            "Be respectful and polite",
            "Use proper Hebrew punctuation",
            "Maintain cultural sensitivity",
        ],
    },
];
