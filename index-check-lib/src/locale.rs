//! Locale tables for search queries.
//!
//! Three static label→code mappings select which regional version of the
//! search engine is queried: the country (`gl`), the interface language
//! (`hl`) and the search engine domain (`google_domain`). Codes are opaque to
//! the library and passed through unchanged.
//!
//! Lookups accept either the human-readable label or the code itself and are
//! case-insensitive.

use crate::error::IndexCheckError;
use crate::types::LocaleSelection;
use std::collections::HashMap;

/// Country labels and their `gl` codes.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("Argentina", "ar"),
    ("Australia", "au"),
    ("Austria", "at"),
    ("Belgium", "be"),
    ("Brazil", "br"),
    ("Canada", "ca"),
    ("Chile", "cl"),
    ("China", "cn"),
    ("Colombia", "co"),
    ("Czech Republic", "cz"),
    ("Denmark", "dk"),
    ("Egypt", "eg"),
    ("Finland", "fi"),
    ("France", "fr"),
    ("Germany", "de"),
    ("Greece", "gr"),
    ("Hong Kong", "hk"),
    ("Hungary", "hu"),
    ("India", "in"),
    ("Indonesia", "id"),
    ("Ireland", "ie"),
    ("Israel", "il"),
    ("Italy", "it"),
    ("Japan", "jp"),
    ("Luxembourg", "lu"),
    ("Malaysia", "my"),
    ("Mexico", "mx"),
    ("Morocco", "ma"),
    ("Netherlands", "nl"),
    ("New Zealand", "nz"),
    ("Nigeria", "ng"),
    ("Norway", "no"),
    ("Pakistan", "pk"),
    ("Peru", "pe"),
    ("Philippines", "ph"),
    ("Poland", "pl"),
    ("Portugal", "pt"),
    ("Romania", "ro"),
    ("Russia", "ru"),
    ("Saudi Arabia", "sa"),
    ("Senegal", "sn"),
    ("Singapore", "sg"),
    ("South Africa", "za"),
    ("South Korea", "kr"),
    ("Spain", "es"),
    ("Sweden", "se"),
    ("Switzerland", "ch"),
    ("Taiwan", "tw"),
    ("Thailand", "th"),
    ("Tunisia", "tn"),
    ("Turkey", "tr"),
    ("Ukraine", "ua"),
    ("United Arab Emirates", "ae"),
    ("United Kingdom", "uk"),
    ("United States", "us"),
    ("Vietnam", "vn"),
];

/// Interface language labels and their `hl` codes.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("Afrikaans", "af"),
    ("Albanian", "sq"),
    ("Amharic", "am"),
    ("Arabic", "ar"),
    ("Azerbaijani", "az"),
    ("Basque", "eu"),
    ("Belarusian", "be"),
    ("Bengali", "bn"),
    ("Bihari", "bh"),
    ("Bosnian", "bs"),
    ("Bulgarian", "bg"),
    ("Catalan", "ca"),
    ("Chinese (Simplified)", "zh-CN"),
    ("Chinese (Traditional)", "zh-TW"),
    ("Croatian", "hr"),
    ("Czech", "cs"),
    ("Danish", "da"),
    ("Dutch", "nl"),
    ("English", "en"),
    ("Esperanto", "eo"),
    ("Estonian", "et"),
    ("Faroese", "fo"),
    ("Finnish", "fi"),
    ("French", "fr"),
    ("Frisian", "fy"),
    ("Galician", "gl"),
    ("Georgian", "ka"),
    ("German", "de"),
    ("Greek", "el"),
    ("Gujarati", "gu"),
    ("Hebrew", "iw"),
    ("Hindi", "hi"),
    ("Hungarian", "hu"),
    ("Icelandic", "is"),
    ("Indonesian", "id"),
    ("Interlingua", "ia"),
    ("Irish", "ga"),
    ("Italian", "it"),
    ("Japanese", "ja"),
    ("Javanese", "jw"),
    ("Kannada", "kn"),
    ("Korean", "ko"),
    ("Latin", "la"),
    ("Latvian", "lv"),
    ("Lithuanian", "lt"),
    ("Macedonian", "mk"),
    ("Malay", "ms"),
    ("Malayalam", "ml"),
    ("Maltese", "mt"),
    ("Marathi", "mr"),
    ("Nepali", "ne"),
    ("Norwegian", "no"),
    ("Norwegian (Nynorsk)", "nn"),
    ("Occitan", "oc"),
    ("Persian", "fa"),
    ("Polish", "pl"),
    ("Portuguese (Brazil)", "pt-BR"),
    ("Portuguese (Portugal)", "pt-PT"),
    ("Punjabi", "pa"),
    ("Romanian", "ro"),
    ("Russian", "ru"),
    ("Scots Gaelic", "gd"),
    ("Serbian", "sr"),
    ("Sinhalese", "si"),
    ("Slovak", "sk"),
    ("Slovenian", "sl"),
    ("Spanish", "es"),
    ("Sudanese", "su"),
    ("Swahili", "sw"),
    ("Swedish", "sv"),
    ("Tagalog", "tl"),
    ("Tamil", "ta"),
    ("Telugu", "te"),
    ("Thai", "th"),
    ("Tigrinya", "ti"),
    ("Turkish", "tr"),
    ("Ukrainian", "uk"),
    ("Urdu", "ur"),
    ("Uzbek", "uz"),
    ("Vietnamese", "vi"),
    ("Welsh", "cy"),
    ("Xhosa", "xh"),
    ("Zulu", "zu"),
];

/// Search engine domain labels and their `google_domain` values.
pub const DOMAINS: &[(&str, &str)] = &[
    ("Google Argentina", "google.com.ar"),
    ("Google Australia", "google.com.au"),
    ("Google Austria", "google.at"),
    ("Google Belgium", "google.be"),
    ("Google Brasil", "google.com.br"),
    ("Google Canada", "google.ca"),
    ("Google Chile", "google.cl"),
    ("Google Colombia", "google.com.co"),
    ("Google Denmark", "google.dk"),
    ("Google Deutschland", "google.de"),
    ("Google France", "google.fr"),
    ("Google Greece", "google.com.gr"),
    ("Google India", "google.co.in"),
    ("Google Ireland", "google.ie"),
    ("Google Italia", "google.it"),
    ("Google Japan", "google.co.jp"),
    ("Google Korea", "google.co.kr"),
    ("Google Mexico", "google.com.mx"),
    ("Google Nederland", "google.nl"),
    ("Google Pakistan", "google.com.pk"),
    ("Google Poland", "google.pl"),
    ("Google Portugal", "google.pt"),
    ("Google Spain", "google.es"),
    ("Google Switzerland", "google.ch"),
    ("Google Taiwan", "google.com.tw"),
    ("Google Turkey", "google.com.tr"),
    ("Google United Kingdom", "google.co.uk"),
    ("Google USA", "google.com"),
];

/// The three locale tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleTable {
    Country,
    Language,
    Domain,
}

impl LocaleTable {
    /// Static entries of this table, in display order.
    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            LocaleTable::Country => COUNTRIES,
            LocaleTable::Language => LANGUAGES,
            LocaleTable::Domain => DOMAINS,
        }
    }

    /// Query parameter this table feeds.
    pub fn parameter(&self) -> &'static str {
        match self {
            LocaleTable::Country => "gl",
            LocaleTable::Language => "hl",
            LocaleTable::Domain => "google_domain",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LocaleTable::Country => "country",
            LocaleTable::Language => "language",
            LocaleTable::Domain => "search domain",
        }
    }

    fn index(&self) -> &'static HashMap<String, &'static str> {
        match self {
            LocaleTable::Country => &COUNTRY_INDEX,
            LocaleTable::Language => &LANGUAGE_INDEX,
            LocaleTable::Domain => &DOMAIN_INDEX,
        }
    }

    /// Resolve a label or code to the code sent to the API.
    pub fn resolve(&self, input: &str) -> Result<&'static str, IndexCheckError> {
        let key = input.trim().to_lowercase();
        self.index()
            .get(&key)
            .copied()
            .ok_or_else(|| IndexCheckError::unknown_locale(self.name(), input.trim()))
    }

    /// Label for a code, if the code belongs to this table.
    pub fn label_for(&self, code: &str) -> Option<&'static str> {
        self.entries()
            .iter()
            .find(|(_, c)| c.eq_ignore_ascii_case(code))
            .map(|(label, _)| *label)
    }
}

/// Build a lowercase label/code → code index for one table.
fn build_index(entries: &'static [(&'static str, &'static str)]) -> HashMap<String, &'static str> {
    let mut index = HashMap::with_capacity(entries.len() * 2);
    for (label, code) in entries {
        index.insert(code.to_lowercase(), *code);
        index.insert(label.to_lowercase(), *code);
    }
    index
}

lazy_static::lazy_static! {
    static ref COUNTRY_INDEX: HashMap<String, &'static str> = build_index(COUNTRIES);
    static ref LANGUAGE_INDEX: HashMap<String, &'static str> = build_index(LANGUAGES);
    static ref DOMAIN_INDEX: HashMap<String, &'static str> = build_index(DOMAINS);
}

impl LocaleSelection {
    /// Build a validated selection from labels or codes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use index_check_lib::LocaleSelection;
    ///
    /// let locale = LocaleSelection::resolve("France", "French", "Google France").unwrap();
    /// assert_eq!(locale.as_query_fragment(), "gl=fr&hl=fr&google_domain=google.fr");
    /// ```
    pub fn resolve(country: &str, language: &str, domain: &str) -> Result<Self, IndexCheckError> {
        Ok(Self::new(
            LocaleTable::Country.resolve(country)?,
            LocaleTable::Language.resolve(language)?,
            LocaleTable::Domain.resolve(domain)?,
        ))
    }
}
