use regex::Regex;
use std::sync::LazyLock;

use veil_core::EntityKind;

/// A compiled detection pattern.
///
/// Patterns are matched independently; overlapping or nested hits are
/// reported as-is and left to the span resolver to arbitrate.
pub struct DetectPattern {
    pub name: &'static str,
    pub kind: EntityKind,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub base_confidence: f64,
    /// Capture group holding the entity surface; 0 takes the whole match.
    pub capture: usize,
    /// Minimum surface length in bytes; shorter matches are discarded.
    pub min_len: usize,
    pub gate: Gate,
}

/// Post-match check a hit must pass before it becomes a span.
///
/// Gates keep the broad numeric and capitalized-word patterns honest:
/// a bare 9-digit run is only an ID number near an ID cue or with a
/// valid checksum, and a date is only a birth date near a birth cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    None,
    /// A birth cue must appear shortly before the match.
    BirthCue,
    /// An ID cue before the match, or a passing BSN checksum.
    IdCue,
    /// The surface must not be a known non-street word.
    StreetWord,
    /// The captured word must not be a month, weekday, or institution.
    PlaceWord,
    /// The surface must not be a legal phrase or end in a street suffix.
    PersonShape,
}

macro_rules! detect_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> =
            LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Email ──────────────────────────────────────────────────────────────────
detect_pattern!(
    RE_EMAIL,
    r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}"
);

// ── IBAN (Belgian form first, then the generic European shape) ─────────────
detect_pattern!(RE_IBAN_BE, r"\b(?i:be\d{2}(?:\s?\d{4}){3})\b");
// Uppercase only: a case-folded version of the grouped form swallows
// ordinary lowercase words after the account number.
detect_pattern!(
    RE_IBAN_GENERIC,
    r"\b[A-Z]{2}\d{2}\s?[A-Z0-9]{4}(?:\s?[A-Z0-9]{2,4}){2,7}\b"
);

// ── Phone numbers ──────────────────────────────────────────────────────────
// International with country prefix, US long and short local forms, and
// the Belgian landline/mobile groupings with slash or dot separators.
detect_pattern!(
    RE_PHONE_INTL,
    r"\+\d{1,3}[\s./-]?\d{1,4}(?:[\s./-]?\d{2,4}){1,4}\b"
);
detect_pattern!(
    RE_PHONE_US,
    r"\(\d{3}\)[\s.-]?\d{3}[-.\s]\d{4}\b|\b\d{3}[-.\s]\d{3}[-.\s]\d{4}\b"
);
detect_pattern!(RE_PHONE_US_LOCAL, r"\b\d{3}[-.]\d{4}\b");
detect_pattern!(
    RE_PHONE_BE_LANDLINE,
    r"\b0\d{1,2}[/.\s-]\d{2,3}[/.\s-]?\d{2}[/.\s-]?\d{2}\b"
);
detect_pattern!(
    RE_PHONE_BE_MOBILE,
    r"\b04\d{2}[/.\s-]?\d{2}[/.\s-]?\d{2}[/.\s-]?\d{2}\b"
);

// ── Dates of birth (numeric and written-out month) ─────────────────────────
detect_pattern!(RE_DOB_NUMERIC, r"\b\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}\b");
detect_pattern!(
    RE_DOB_TEXTUAL,
    r"\b\d{1,2}\s+(?i:januari|februari|maart|april|mei|juni|juli|augustus|september|oktober|november|december|january|february|march|may|june|july|august|october)\s+(?:19|20)\d{2}\b"
);

// ── National ID numbers ────────────────────────────────────────────────────
// Belgian national register number (11 digits, optionally dotted) and the
// Dutch BSN (9 digits). Both are gated: context cue or checksum.
detect_pattern!(
    RE_NATIONAL_ID_BE,
    r"\b\d{2}[.\-\s]?\d{2}[.\-\s]?\d{2}[.\-\s]?\d{3}[.\-\s]?\d{2}\b"
);
detect_pattern!(RE_NATIONAL_ID_BSN, r"\b\d{9}\b");

// ── Addresses ──────────────────────────────────────────────────────────────
detect_pattern!(
    RE_ADDRESS_BE,
    r"\b[A-Z][a-zA-Zéèë]*(?:straat|laan|weg|plein|singel|dreef|lei|baan|kaai|steenweg|vest|markt)\s+\d{1,4}(?:\s?(?:bus|b)\s?\d{1,3})?\b"
);
detect_pattern!(
    RE_ADDRESS_US,
    r"\b\d{1,5}[A-Za-z]?\s+(?:[A-Z][a-z]+\s+){0,3}(?:Street|St|Avenue|Ave|Boulevard|Blvd|Road|Rd|Drive|Dr|Lane|Ln|Court|Ct|Place|Pl|Way)\b"
);
detect_pattern!(RE_ADDRESS_POSTAL_CITY, r"\b[1-9]\d{3}\s+[A-Z][a-zA-Zë\-]+\b");

// ── Street names without a house number ────────────────────────────────────
detect_pattern!(
    RE_STREET_MULTIWORD_NL,
    r"\b(?:Grote|Kleine|Oude|Nieuwe|Korte|Lange)\s+(?:Markt|Baan|Steenweg|Weg|Plein|Kade|Dreef)\b"
);
detect_pattern!(
    RE_STREET_SUFFIX_NL,
    r"\b[A-Z][a-zA-Zéèë]*(?:straat|laan|steenweg|weg|plein|singel|dreef|lei|kaai|baan|dijk|gracht|vest)\b"
);
detect_pattern!(
    RE_STREET_EN,
    r"\b(?:[A-Z][a-z]+\s+){1,2}(?:Street|Avenue|Road|Lane|Boulevard|Square|Gardens|Terrace|Row)\b"
);

// ── Places ─────────────────────────────────────────────────────────────────
// A fixed list of common Benelux and nearby cities, plus capitalized words
// behind a Dutch location marker.
detect_pattern!(
    RE_PLACE_KNOWN,
    r"\b(?i:antwerpen|antwerp|gent|ghent|brugge|bruges|leuven|mechelen|hasselt|brussel|brussels|bruxelles|oostende|kortrijk|genk|aalst|turnhout|wuustwezel|brasschaat|schoten|kapellen|essen|kalmthout|zandvliet|merksem|deurne|wilrijk|hoboken|amsterdam|rotterdam|utrecht|eindhoven|breda|tilburg|maastricht|roosendaal|paris|london|berlin|madrid)\b"
);
detect_pattern!(
    RE_PLACE_CONTEXT,
    r"\b(?:te|naar|richting|vanuit|nabij|bij)\s+([A-Z][a-zA-Zëé]+(?:-[A-Z][a-zA-Zëé]+)?)\b"
);

// ── Road numbers (E19, N133, A12, R1) ──────────────────────────────────────
detect_pattern!(RE_ROAD_NUMBER, r"\b(?i:[naer])\d{1,4}\b");

// ── Vehicles ───────────────────────────────────────────────────────────────
// Brand followed by an optional model word, and a list of standalone van
// and car models common in incident reports. Brands that collide with
// ordinary words (seat, mini, smart, man) are deliberately left out.
detect_pattern!(
    RE_VEHICLE_BRAND,
    r"\b(?i:volkswagen|vw|mercedes(?:-benz)?|bmw|audi|opel|ford|peugeot|renault|citro[eë]n|fiat|toyota|volvo|skoda|nissan|honda|mazda|hyundai|kia|dacia|porsche|tesla|suzuki|mitsubishi|jeep|iveco|scania|daf)(?:\s+[A-Z0-9][A-Za-z0-9\-]{1,14})?\b"
);
detect_pattern!(
    RE_VEHICLE_MODEL,
    r"\b(?i:ducato|sprinter|transit|crafter|transporter|caddy|berlingo|kangoo|doblo|vivaro|trafic|master|daily|golf|polo|passat|corsa|astra|focus|fiesta|clio|megane)\b"
);

// ── Organizations (legal-form suffix) ──────────────────────────────────────
detect_pattern!(
    RE_ORG_SUFFIX,
    r"\b[A-Z][A-Za-z0-9&.\-']*(?:\s+[A-Z0-9][A-Za-z0-9&.\-']*){0,3}\s+(?:BV|NV|BVBA|VZW|CVBA|CV|GmbH|AG|SARL|SPRL|SA|Ltd|LLC|Inc|Corp|PLC)\b"
);

// ── Person names ───────────────────────────────────────────────────────────
// Structured forms only: surname-in-caps pairs, particle surnames, and
// titled names. Plain mixed-case word pairs are left to model-backed
// detectors; as a bare regex they flag half of every sentence.
detect_pattern!(
    RE_PERSON_TITLE,
    r"\b(?:Mr|Mrs|Ms|Dr|Prof|Dhr|Mevr|Mevrouw|Meneer)\.?\s+[A-Z][a-zé]+(?:\s+[A-Z][a-zé]+)?\b"
);
detect_pattern!(
    RE_PERSON_PARTICLE,
    r"\b[A-Z][a-zé]+\s+(?:[vV]an|[dD]e|[dD]er|[dD]en|[tT]en|[tT]er|[eE]l)(?:\s+(?:de|der|den|het))?\s+[A-Z][a-zé]+\b"
);
detect_pattern!(RE_PERSON_CAPS_FIRST, r"\b[A-Z]{2,}(?:\s+[A-Z][a-zé]+){1,2}\b");
detect_pattern!(RE_PERSON_FIRST_CAPS, r"\b[A-Z][a-zé]+\s+[A-Z]{2,}\b");

/// Cues that qualify a nearby date as a date of birth.
const BIRTH_CUES: &[&str] = &[
    "geboren",
    "geboortedatum",
    "birth",
    "born",
    "dob",
    "né le",
    "née",
    "geb.",
    "°",
];

/// Cues that qualify a nearby digit run as a national ID number.
const ID_CUES: &[&str] = &[
    "bsn",
    "burgerservicenummer",
    "rijksregisternummer",
    "rijksregister",
    "rrn",
    "nationaal nummer",
    "national id",
    "identiteitskaart",
    "id-kaart",
    "sofinummer",
    "persoonsnummer",
];

/// Capitalized words the street-suffix pattern must not claim.
const NOT_STREETS: &[&str] = &[
    "onderweg",
    "terugweg",
    "halverwege",
    "loopbaan",
    "spoorbaan",
    "levensweg",
    "vluchtweg",
];

/// Words the place-context capture must not claim.
const NOT_PLACES: &[&str] = &[
    "januari",
    "februari",
    "maart",
    "april",
    "mei",
    "juni",
    "juli",
    "augustus",
    "september",
    "oktober",
    "november",
    "december",
    "maandag",
    "dinsdag",
    "woensdag",
    "donderdag",
    "vrijdag",
    "zaterdag",
    "zondag",
    "politie",
    "rechtbank",
    "parket",
    "justitie",
    "ziekenhuis",
    "gemeente",
    "dienst",
    "afdeling",
    "bureau",
];

/// Surfaces the person patterns must not claim, uppercased.
const NOT_PERSONS: &[&str] = &[
    "PRO JUSTITIA",
    "PRO DEO",
    "PRO RATA",
    "PER SALDO",
    "AD HOC",
];

/// Abbreviations that mark a capitalized pair as jargon, not a name,
/// wherever they appear in the surface.
const NOT_PERSON_WORDS: &[&str] = &[
    "PRO", "GSM", "PV", "EUR", "BTW", "VAT", "KBO", "BSN", "RRN", "NB", "PS",
];

const STREET_SUFFIXES: &[&str] = &["straat", "laan", "weg", "plein", "dreef", "baan", "kaai"];

/// Bytes of preceding text searched for birth cues.
const BIRTH_CUE_WINDOW: usize = 30;
/// Bytes of preceding text searched for ID cues.
const ID_CUE_WINDOW: usize = 50;

/// All patterns in detection order, most specific first.
pub fn all_patterns() -> Vec<DetectPattern> {
    fn pattern(
        name: &'static str,
        kind: EntityKind,
        regex: &'static LazyLock<Option<Regex>>,
        base_confidence: f64,
    ) -> DetectPattern {
        DetectPattern {
            name,
            kind,
            regex,
            base_confidence,
            capture: 0,
            min_len: 0,
            gate: Gate::None,
        }
    }

    vec![
        pattern("email", EntityKind::Email, &RE_EMAIL, 0.99),
        pattern("iban_be", EntityKind::Iban, &RE_IBAN_BE, 0.95),
        pattern("iban_generic", EntityKind::Iban, &RE_IBAN_GENERIC, 0.90),
        pattern("phone_intl", EntityKind::Phone, &RE_PHONE_INTL, 0.95),
        pattern("phone_us", EntityKind::Phone, &RE_PHONE_US, 0.95),
        pattern("phone_us_local", EntityKind::Phone, &RE_PHONE_US_LOCAL, 0.80),
        pattern(
            "phone_be_landline",
            EntityKind::Phone,
            &RE_PHONE_BE_LANDLINE,
            0.95,
        ),
        pattern(
            "phone_be_mobile",
            EntityKind::Phone,
            &RE_PHONE_BE_MOBILE,
            0.95,
        ),
        DetectPattern {
            gate: Gate::BirthCue,
            ..pattern("dob_numeric", EntityKind::BirthDate, &RE_DOB_NUMERIC, 0.90)
        },
        DetectPattern {
            gate: Gate::BirthCue,
            ..pattern("dob_textual", EntityKind::BirthDate, &RE_DOB_TEXTUAL, 0.90)
        },
        DetectPattern {
            gate: Gate::IdCue,
            ..pattern(
                "national_id_be",
                EntityKind::NationalId,
                &RE_NATIONAL_ID_BE,
                0.85,
            )
        },
        DetectPattern {
            gate: Gate::IdCue,
            ..pattern(
                "national_id_bsn",
                EntityKind::NationalId,
                &RE_NATIONAL_ID_BSN,
                0.85,
            )
        },
        pattern("address_be", EntityKind::Address, &RE_ADDRESS_BE, 0.85),
        pattern("address_us", EntityKind::Address, &RE_ADDRESS_US, 0.85),
        pattern(
            "address_postal_city",
            EntityKind::Address,
            &RE_ADDRESS_POSTAL_CITY,
            0.75,
        ),
        pattern(
            "street_multiword_nl",
            EntityKind::Street,
            &RE_STREET_MULTIWORD_NL,
            0.85,
        ),
        DetectPattern {
            min_len: 6,
            gate: Gate::StreetWord,
            ..pattern(
                "street_suffix_nl",
                EntityKind::Street,
                &RE_STREET_SUFFIX_NL,
                0.88,
            )
        },
        pattern("street_en", EntityKind::Street, &RE_STREET_EN, 0.85),
        pattern("place_known", EntityKind::Place, &RE_PLACE_KNOWN, 0.95),
        DetectPattern {
            capture: 1,
            min_len: 3,
            gate: Gate::PlaceWord,
            ..pattern("place_context", EntityKind::Place, &RE_PLACE_CONTEXT, 0.85)
        },
        pattern("road_number", EntityKind::Road, &RE_ROAD_NUMBER, 0.95),
        DetectPattern {
            min_len: 3,
            ..pattern("vehicle_brand", EntityKind::Vehicle, &RE_VEHICLE_BRAND, 0.92)
        },
        pattern("vehicle_model", EntityKind::Vehicle, &RE_VEHICLE_MODEL, 0.85),
        pattern("org_suffix", EntityKind::Org, &RE_ORG_SUFFIX, 0.85),
        pattern("person_title", EntityKind::Person, &RE_PERSON_TITLE, 0.85),
        DetectPattern {
            min_len: 5,
            gate: Gate::PersonShape,
            ..pattern(
                "person_particle",
                EntityKind::Person,
                &RE_PERSON_PARTICLE,
                0.85,
            )
        },
        DetectPattern {
            min_len: 5,
            gate: Gate::PersonShape,
            ..pattern(
                "person_caps_first",
                EntityKind::Person,
                &RE_PERSON_CAPS_FIRST,
                0.80,
            )
        },
        DetectPattern {
            min_len: 5,
            gate: Gate::PersonShape,
            ..pattern(
                "person_first_caps",
                EntityKind::Person,
                &RE_PERSON_FIRST_CAPS,
                0.80,
            )
        },
    ]
}

/// Names of patterns whose regex failed to compile. Non-empty means the
/// detector runs with reduced coverage.
pub fn compile_failures() -> Vec<&'static str> {
    all_patterns()
        .iter()
        .filter(|p| p.regex.is_none())
        .map(|p| p.name)
        .collect()
}

/// Apply a pattern's gate to a raw hit.
///
/// Returns the confidence the span should carry, or `None` to discard
/// the hit.
pub(crate) fn apply_gate(
    gate: Gate,
    text: &str,
    start: usize,
    surface: &str,
    base: f64,
) -> Option<f64> {
    match gate {
        Gate::None => Some(base),
        Gate::BirthCue => {
            let window = preceding_window(text, start, BIRTH_CUE_WINDOW).to_lowercase();
            BIRTH_CUES
                .iter()
                .any(|cue| window.contains(cue))
                .then_some(base)
        }
        Gate::IdCue => {
            let window = preceding_window(text, start, ID_CUE_WINDOW).to_lowercase();
            if ID_CUES.iter().any(|cue| window.contains(cue)) {
                Some(base)
            } else if bsn_checksum(surface) {
                // No cue nearby; the checksum alone is weaker evidence.
                Some(0.70)
            } else {
                None
            }
        }
        Gate::StreetWord => {
            let lowered = surface.to_lowercase();
            (!NOT_STREETS.contains(&lowered.as_str())).then_some(base)
        }
        Gate::PlaceWord => {
            let lowered = surface.to_lowercase();
            if NOT_PLACES.contains(&lowered.as_str()) {
                return None;
            }
            if STREET_SUFFIXES.iter().any(|s| lowered.ends_with(s)) {
                return None;
            }
            Some(base)
        }
        Gate::PersonShape => {
            let upper = surface.to_uppercase();
            if NOT_PERSONS.contains(&upper.as_str()) {
                return None;
            }
            if upper.split(' ').any(|word| NOT_PERSON_WORDS.contains(&word)) {
                return None;
            }
            let last = surface.rsplit(' ').next().unwrap_or(surface).to_lowercase();
            if STREET_SUFFIXES.iter().any(|s| last.ends_with(s)) {
                return None;
            }
            Some(base)
        }
    }
}

/// Up to `width` bytes of text before `start`, snapped to a char boundary.
fn preceding_window(text: &str, start: usize, width: usize) -> &str {
    let mut from = start.saturating_sub(width);
    while !text.is_char_boundary(from) {
        from += 1;
    }
    &text[from..start]
}

/// Dutch BSN eleven-test: digits weighted 9..2 with the last digit
/// counted negative must sum to a multiple of eleven.
pub(crate) fn bsn_checksum(surface: &str) -> bool {
    let digits: Vec<i32> = surface
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| i32::from(b - b'0'))
        .collect();
    if digits.len() != 9 || digits.iter().all(|&d| d == 0) {
        return false;
    }
    let weights = [9, 8, 7, 6, 5, 4, 3, 2, -1];
    let sum: i32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    sum % 11 == 0
}
