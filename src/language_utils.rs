//! Language utilities for the tags sent to the translation backend
//!
//! Backends take BCP-47 style tags such as `en`, `pt-BR` or `zh-Hans`. Only
//! the primary subtag is checked, against ISO 639-1 and ISO 639-2/3 codes.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Language code type of a primary subtag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T or 639-3 (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

// ISO 639-2/B codes that differ from their 639-2/T counterpart
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("fre", "fra"), ("ger", "deu"), ("dut", "nld"), ("gre", "ell"),
    ("chi", "zho"), ("cze", "ces"), ("ice", "isl"), ("alb", "sqi"),
    ("arm", "hye"), ("baq", "eus"), ("bur", "mya"), ("per", "fas"),
    ("geo", "kat"), ("may", "msa"), ("mac", "mkd"), ("rum", "ron"),
    ("slo", "slk"), ("wel", "cym"),
];

/// Lowercased primary subtag of a language tag (`zh-Hans` -> `zh`)
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

fn bibliographic_to_terminologic(code: &str) -> Option<&'static str> {
    BIBLIOGRAPHIC_CODES.iter()
        .find(|(bib, _)| *bib == code)
        .map(|(_, term)| *term)
}

/// Validate the primary subtag of a language tag
pub fn validate_language_tag(tag: &str) -> Result<LanguageCodeType> {
    let primary = primary_subtag(tag);

    match primary.len() {
        2 if Language::from_639_1(&primary).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&primary).is_some() => Ok(LanguageCodeType::Part2T),
        3 if bibliographic_to_terminologic(&primary).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language tag: {}", tag)),
    }
}

/// Normalize the primary subtag to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(tag: &str) -> Result<String> {
    let primary = primary_subtag(tag);

    match validate_language_tag(tag)? {
        LanguageCodeType::Part1 => Language::from_639_1(&primary)
            .map(|lang| lang.to_639_3().to_string())
            .ok_or_else(|| anyhow!("Cannot normalize invalid language tag: {}", tag)),
        LanguageCodeType::Part2T => Ok(primary),
        LanguageCodeType::Part2B => bibliographic_to_terminologic(&primary)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Cannot normalize invalid language tag: {}", tag)),
    }
}

/// Check if two tags name the same primary language
pub fn language_tags_match(tag1: &str, tag2: &str) -> bool {
    match (normalize_to_part2t(tag1), normalize_to_part2t(tag2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a tag
pub fn get_language_name(tag: &str) -> Result<String> {
    let normalized = normalize_to_part2t(tag)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
