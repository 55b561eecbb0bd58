//! Language and country lookup tables.
//!
//! The news service identifies a regional edition by a language code
//! (`en`, `es-419`, `zh-Hans`, ...) and a country code (`US`, `GB`, ...).
//! Users may pass either the code itself or a human-readable name; names
//! and a few common alternate codes are mapped to the canonical code here.
//!
//! Lookups are case-sensitive. Anything not found in a table is passed
//! through unchanged so that new editions keep working without a table
//! update.

use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};

const LANGUAGES: &[(&str, &str)] = &[
    ("english", "en"),
    ("indonesian", "id"),
    ("czech", "cs"),
    ("german", "de"),
    ("spanish", "es-419"),
    ("french", "fr"),
    ("italian", "it"),
    ("latvian", "lv"),
    ("lithuanian", "lt"),
    ("hungarian", "hu"),
    ("dutch", "nl"),
    ("norwegian", "no"),
    ("polish", "pl"),
    ("portuguese brasil", "pt-419"),
    ("portuguese portugal", "pt-150"),
    ("romanian", "ro"),
    ("slovak", "sk"),
    ("slovenian", "sl"),
    ("swedish", "sv"),
    ("vietnamese", "vi"),
    ("turkish", "tr"),
    ("greek", "el"),
    ("russian", "ru"),
    ("serbian", "sr"),
    ("ukrainian", "uk"),
    ("hebrew", "he"),
    ("arabic", "ar"),
    ("marathi", "mr"),
    ("hindi", "hi"),
    ("bengali", "bn"),
    ("tamil", "ta"),
    ("telugu", "te"),
    ("malyalam", "ml"),
    ("thai", "th"),
    ("chinese simplified", "zh-Hans"),
    ("chinese traditional", "zh-Hant"),
    ("japanese", "ja"),
    ("korean", "ko"),
    // alternate codes
    ("es", "es-419"),
    ("pt", "pt-419"),
    ("pt-BR", "pt-419"),
    ("pt-PT", "pt-150"),
    ("zh-CN", "zh-Hans"),
    ("zh-TW", "zh-Hant"),
    ("iw", "he"),
];

const COUNTRIES: &[(&str, &str)] = &[
    ("Australia", "AU"),
    ("Botswana", "BW"),
    ("Canada", "CA"),
    ("Ethiopia", "ET"),
    ("Ghana", "GH"),
    ("India", "IN"),
    ("Indonesia", "ID"),
    ("Ireland", "IE"),
    ("Israel", "IL"),
    ("Kenya", "KE"),
    ("Latvia", "LV"),
    ("Malaysia", "MY"),
    ("Namibia", "NA"),
    ("New Zealand", "NZ"),
    ("Nigeria", "NG"),
    ("Pakistan", "PK"),
    ("Philippines", "PH"),
    ("Singapore", "SG"),
    ("South Africa", "ZA"),
    ("Tanzania", "TZ"),
    ("Uganda", "UG"),
    ("United Kingdom", "GB"),
    ("United States", "US"),
    ("Zimbabwe", "ZW"),
    ("Czech Republic", "CZ"),
    ("Germany", "DE"),
    ("Austria", "AT"),
    ("Switzerland", "CH"),
    ("Argentina", "AR"),
    ("Chile", "CL"),
    ("Colombia", "CO"),
    ("Cuba", "CU"),
    ("Mexico", "MX"),
    ("Peru", "PE"),
    ("Venezuela", "VE"),
    ("Belgium", "BE"),
    ("France", "FR"),
    ("Morocco", "MA"),
    ("Senegal", "SN"),
    ("Italy", "IT"),
    ("Lithuania", "LT"),
    ("Hungary", "HU"),
    ("Netherlands", "NL"),
    ("Norway", "NO"),
    ("Poland", "PL"),
    ("Brazil", "BR"),
    ("Portugal", "PT"),
    ("Romania", "RO"),
    ("Slovakia", "SK"),
    ("Slovenia", "SI"),
    ("Sweden", "SE"),
    ("Vietnam", "VN"),
    ("Turkey", "TR"),
    ("Greece", "GR"),
    ("Bulgaria", "BG"),
    ("Russia", "RU"),
    ("Ukraine", "UA"),
    ("Serbia", "RS"),
    ("United Arab Emirates", "AE"),
    ("Saudi Arabia", "SA"),
    ("Lebanon", "LB"),
    ("Egypt", "EG"),
    ("Bangladesh", "BD"),
    ("Thailand", "TH"),
    ("China", "CN"),
    ("Taiwan", "TW"),
    ("Hong Kong", "HK"),
    ("Japan", "JP"),
    ("Republic of Korea", "KR"),
    // alternate codes
    ("UK", "GB"),
    ("USA", "US"),
];

static LANGUAGE_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LANGUAGES.iter().copied().collect());

static COUNTRY_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| COUNTRIES.iter().copied().collect());

static LANGUAGE_CODES: Lazy<BTreeSet<&'static str>> =
    Lazy::new(|| LANGUAGES.iter().map(|(_, code)| *code).collect());

static COUNTRY_CODES: Lazy<BTreeSet<&'static str>> =
    Lazy::new(|| COUNTRIES.iter().map(|(_, code)| *code).collect());

/// Map a language name or alternate code to the canonical code.
///
/// Unknown input is returned unchanged.
///
/// ```
/// assert_eq!(gnews::locale::resolve_language("german"), "de");
/// assert_eq!(gnews::locale::resolve_language("xx"), "xx");
/// ```
pub fn resolve_language(input: &str) -> String {
    LANGUAGE_TABLE
        .get(input)
        .map(|code| code.to_string())
        .unwrap_or_else(|| input.to_string())
}

/// Map a country name or alternate code to the canonical code.
///
/// Unknown input is returned unchanged.
pub fn resolve_country(input: &str) -> String {
    COUNTRY_TABLE
        .get(input)
        .map(|code| code.to_string())
        .unwrap_or_else(|| input.to_string())
}

/// Every canonical language code the service is known to serve.
pub fn available_languages() -> &'static BTreeSet<&'static str> {
    &LANGUAGE_CODES
}

/// Every canonical country code the service is known to serve.
pub fn available_countries() -> &'static BTreeSet<&'static str> {
    &COUNTRY_CODES
}

/// `true` if `code` is a canonical language code.
///
/// # Arguments
///
/// * `code` - Code as sent in `hl`, compared case-sensitively
pub fn is_known_language(code: &str) -> bool {
    LANGUAGE_CODES.contains(code)
}

/// `true` if `code` is a canonical country code.
pub fn is_known_country(code: &str) -> bool {
    COUNTRY_CODES.contains(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_language_by_name() {
        assert_eq!(resolve_language("english"), "en");
        assert_eq!(resolve_language("chinese simplified"), "zh-Hans");
        assert_eq!(resolve_language("portuguese portugal"), "pt-150");
    }

    #[test]
    fn test_resolve_language_alternate_code() {
        assert_eq!(resolve_language("pt-BR"), "pt-419");
        assert_eq!(resolve_language("zh-TW"), "zh-Hant");
    }

    #[test]
    fn test_resolve_language_passthrough() {
        assert_eq!(resolve_language("en"), "en");
        assert_eq!(resolve_language("klingon"), "klingon");
        assert_eq!(resolve_language(""), "");
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert_eq!(resolve_language("English"), "English");
        assert_eq!(resolve_country("united states"), "united states");
    }

    #[test]
    fn test_resolve_country() {
        assert_eq!(resolve_country("United States"), "US");
        assert_eq!(resolve_country("Republic of Korea"), "KR");
        assert_eq!(resolve_country("UK"), "GB");
        assert_eq!(resolve_country("FR"), "FR");
        assert_eq!(resolve_country("Atlantis"), "Atlantis");
    }

    #[test]
    fn test_available_codes_are_canonical() {
        assert!(available_languages().contains("en"));
        assert!(available_languages().contains("es-419"));
        assert!(!available_languages().contains("english"));
        assert!(!available_languages().contains("pt-BR"));
        assert!(available_countries().contains("US"));
        assert!(!available_countries().contains("UK"));
    }

    #[test]
    fn test_every_name_maps_to_known_code() {
        for (_, code) in LANGUAGES {
            assert!(is_known_language(code));
        }
        for (_, code) in COUNTRIES {
            assert!(is_known_country(code));
        }
    }
}
