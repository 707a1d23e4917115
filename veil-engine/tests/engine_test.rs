//! Unit coverage for the encode pipeline stages: span resolution, entity
//! grouping, placeholder allocation, the legend, and both substitution
//! directions.

use veil_core::config::{DecodeConfig, PlaceholderConfig, ResolverConfig};
use veil_core::{Entity, EntityKind, Placeholder, Span, VeilError};
use veil_engine::allocator::{check_delimiters, PlaceholderAllocator};
use veil_engine::legend::Legend;
use veil_engine::normalizer::group;
use veil_engine::resolver::resolve;
use veil_engine::substitute::{forward, reverse, TokenMatcher};
use veil_mapping::{Mapping, MappingIndex};

// ═══════════════════════════════════════════════════════════════════════════
// SPAN RESOLUTION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn spans_come_back_in_document_order() {
    let text = "call 555-1234 or mail a@b.com";
    let phone = Span::new(5, 13, EntityKind::Phone, 0.9, "555-1234");
    let email = Span::new(22, 29, EntityKind::Email, 0.99, "a@b.com");

    let resolution = resolve(text, vec![email, phone], &ResolverConfig::default());

    assert_eq!(resolution.dropped, 0);
    let starts: Vec<usize> = resolution.spans.iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![5, 22]);
}

#[test]
fn invalid_geometry_is_discarded() {
    let text = "café staat hier";
    let candidates = vec![
        Span::new(0, 99, EntityKind::Person, 1.0, "whatever"),
        Span::new(2, 2, EntityKind::Person, 1.0, ""),
        // end falls inside the two-byte é
        Span::new(0, 4, EntityKind::Person, 1.0, "café"),
        Span::new(6, 11, EntityKind::Person, 1.0, "stoat"),
        Span::new(5, 6, EntityKind::Person, 1.0, " "),
    ];

    let resolution = resolve(text, candidates, &ResolverConfig::default());

    assert!(resolution.spans.is_empty(), "kept: {:?}", resolution.spans);
    assert_eq!(resolution.dropped, 5);
}

#[test]
fn confidence_floor_and_masked_surfaces_are_filtered() {
    let text = "nummer 0478 of XX-999-XX dus";
    let weak = Span::new(7, 11, EntityKind::Phone, 0.3, "0478");
    let masked = Span::new(15, 24, EntityKind::Vehicle, 0.9, "XX-999-XX");

    let strict = ResolverConfig {
        min_confidence: 0.5,
        skip_masked: true,
    };
    let resolution = resolve(text, vec![weak.clone(), masked.clone()], &strict);
    assert!(resolution.spans.is_empty());
    assert_eq!(resolution.dropped, 2);

    let lenient = ResolverConfig {
        min_confidence: 0.0,
        skip_masked: false,
    };
    let resolution = resolve(text, vec![weak, masked], &lenient);
    assert_eq!(resolution.spans.len(), 2);
    assert_eq!(resolution.dropped, 0);
}

#[test]
fn higher_priority_kind_wins_overlap() {
    let text = "mail jan@voorbeeld.be nu";
    let email = Span::new(5, 21, EntityKind::Email, 0.99, "jan@voorbeeld.be");
    let person = Span::new(5, 8, EntityKind::Person, 0.8, "jan");

    let resolution = resolve(text, vec![person, email], &ResolverConfig::default());

    assert_eq!(resolution.spans.len(), 1);
    assert_eq!(resolution.spans[0].kind, EntityKind::Email);
    assert_eq!(resolution.dropped, 1);
}

#[test]
fn longer_span_wins_at_equal_priority() {
    let text = "at 221B Baker Street now";
    let full = Span::new(3, 20, EntityKind::Street, 0.85, "221B Baker Street");
    let partial = Span::new(8, 20, EntityKind::Street, 0.88, "Baker Street");

    let resolution = resolve(text, vec![partial, full], &ResolverConfig::default());

    assert_eq!(resolution.spans.len(), 1);
    assert_eq!(
        resolution.spans[0].surface, "221B Baker Street",
        "length outranks confidence at equal priority"
    );
}

#[test]
fn chain_overlap_replaces_then_drops() {
    let text = "abcdefghijklmnopqrst";
    let first = Span::new(0, 10, EntityKind::Person, 1.0, "abcdefghij");
    let middle = Span::new(5, 15, EntityKind::Phone, 1.0, "fghijklmno");
    let last = Span::new(12, 20, EntityKind::Person, 1.0, "mnopqrst");

    let resolution = resolve(text, vec![first, middle, last], &ResolverConfig::default());

    assert_eq!(resolution.spans.len(), 1);
    assert_eq!(resolution.spans[0].kind, EntityKind::Phone);
    assert_eq!(resolution.spans[0].start, 5);
    assert_eq!(resolution.dropped, 2);
}

#[test]
fn tied_contest_is_order_independent() {
    let text = "Jan Smits here";
    let a = Span::new(0, 8, EntityKind::Person, 0.9, "Jan Smit");
    let b = Span::new(1, 9, EntityKind::Person, 0.9, "an Smits");

    let one = resolve(text, vec![a.clone(), b.clone()], &ResolverConfig::default());
    let two = resolve(text, vec![b, a], &ResolverConfig::default());

    assert_eq!(one.spans, two.spans);
    assert_eq!(one.spans.len(), 1);
    assert_eq!(one.spans[0].start, 0, "tie keeps the span sorted first");
}

// ═══════════════════════════════════════════════════════════════════════════
// ENTITY GROUPING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn case_and_whitespace_variants_fold_into_one_entity() {
    let spans = vec![
        Span::new(0, 10, EntityKind::Person, 0.9, "John Smith"),
        Span::new(40, 51, EntityKind::Person, 0.9, "JOHN  SMITH"),
    ];

    let grouped = group(&spans);

    assert_eq!(grouped.entities.len(), 1);
    let entity = &grouped.entities[0];
    assert_eq!(entity.canonical, "John Smith", "first surface is canonical");
    assert_eq!(entity.variants, vec!["John Smith", "JOHN  SMITH"]);
    assert_eq!(entity.occurrences, 2);
    assert_eq!(entity.first_offset, 0);
    assert_eq!(grouped.assignments, vec![0, 0]);
}

#[test]
fn formatting_variants_of_identifiers_group() {
    let spans = vec![
        Span::new(10, 18, EntityKind::Phone, 0.9, "555-1234"),
        Span::new(30, 40, EntityKind::Phone, 0.9, "(555) 1234"),
        Span::new(60, 67, EntityKind::Phone, 0.9, "5551234"),
    ];

    let grouped = group(&spans);

    assert_eq!(grouped.entities.len(), 1);
    assert_eq!(grouped.entities[0].canonical, "555-1234");
    assert_eq!(grouped.entities[0].occurrences, 3);
    assert_eq!(grouped.assignments, vec![0, 0, 0]);
}

#[test]
fn same_value_under_different_kinds_stays_separate() {
    let spans = vec![
        Span::new(5, 10, EntityKind::Place, 0.9, "Essen"),
        Span::new(20, 25, EntityKind::Org, 0.9, "Essen"),
    ];

    let grouped = group(&spans);

    assert_eq!(grouped.entities.len(), 2);
    assert_eq!(grouped.assignments, vec![0, 1]);
}

#[test]
fn near_identical_names_stay_separate() {
    let spans = vec![
        Span::new(0, 10, EntityKind::Person, 0.9, "John Smith"),
        Span::new(20, 29, EntityKind::Person, 0.9, "Jon Smith"),
    ];

    assert_eq!(group(&spans).entities.len(), 2, "no fuzzy matching");
}

#[test]
fn entities_keep_first_occurrence_order() {
    let spans = vec![
        Span::new(0, 13, EntityKind::Phone, 0.9, "0489 66 70 88"),
        Span::new(20, 23, EntityKind::Person, 0.9, "Jan"),
        Span::new(40, 50, EntityKind::Phone, 0.9, "0489667088"),
        Span::new(60, 64, EntityKind::Person, 0.9, "Piet"),
    ];

    let grouped = group(&spans);

    let canonicals: Vec<&str> = grouped.entities.iter().map(|e| e.canonical.as_str()).collect();
    assert_eq!(canonicals, vec!["0489 66 70 88", "Jan", "Piet"]);
    assert_eq!(grouped.assignments, vec![0, 1, 0, 2]);
}

// ═══════════════════════════════════════════════════════════════════════════
// PLACEHOLDER ALLOCATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn numbering_is_per_kind_one_based_in_entity_order() {
    let entities = vec![
        Entity::new(EntityKind::Person, "Jan", 0),
        Entity::new(EntityKind::Phone, "0489", 10),
        Entity::new(EntityKind::Person, "Piet", 20),
    ];

    let placeholders = PlaceholderAllocator::new().allocate(&entities);

    let tokens: Vec<String> = placeholders.iter().map(|p| p.to_string()).collect();
    assert_eq!(tokens, vec!["PERSON_1", "PHONE_1", "PERSON_2"]);
}

#[test]
fn each_allocator_starts_fresh() {
    let entities = vec![
        Entity::new(EntityKind::Person, "Jan", 0),
        Entity::new(EntityKind::Person, "Piet", 10),
    ];

    let first = PlaceholderAllocator::new().allocate(&entities);
    let second = PlaceholderAllocator::new().allocate(&entities);

    assert_eq!(first, second, "no numbering state survives an allocator");
}

#[test]
fn next_advances_one_kind_only() {
    let mut allocator = PlaceholderAllocator::new();
    assert_eq!(allocator.next(EntityKind::Person).to_string(), "PERSON_1");
    assert_eq!(allocator.next(EntityKind::Person).to_string(), "PERSON_2");
    assert_eq!(allocator.next(EntityKind::Phone).to_string(), "PHONE_1");
}

#[test]
fn clean_text_passes_the_delimiter_check() {
    let config = PlaceholderConfig::default();
    assert!(check_delimiters("gewone tekst zonder haken", &config).is_ok());
}

#[test]
fn open_delimiter_in_source_is_fatal() {
    let config = PlaceholderConfig::default();
    match check_delimiters("al een ⟦ teken aanwezig", &config) {
        Err(VeilError::PlaceholderCollision {
            delimiter,
            offset,
            snippet,
        }) => {
            assert_eq!(delimiter, "⟦");
            assert_eq!(offset, 7);
            assert!(snippet.contains("teken"), "snippet: {snippet:?}");
        }
        other => panic!("expected a collision, got {other:?}"),
    }
}

#[test]
fn close_delimiter_alone_is_also_fatal() {
    let config = PlaceholderConfig::default();
    match check_delimiters("hier ⟧ daar", &config) {
        Err(VeilError::PlaceholderCollision { delimiter, offset, .. }) => {
            assert_eq!(delimiter, "⟧");
            assert_eq!(offset, 5);
        }
        other => panic!("expected a collision, got {other:?}"),
    }
}

#[test]
fn custom_delimiters_are_checked_too() {
    let config = PlaceholderConfig {
        open: "[[".to_string(),
        close: "]]".to_string(),
    };
    assert!(check_delimiters("geen haken", &config).is_ok());
    assert!(check_delimiters("index ]] hier", &config).is_err());
}

// ═══════════════════════════════════════════════════════════════════════════
// LEGEND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn legend_counts_per_kind_in_display_order() {
    let entities = vec![
        Entity::new(EntityKind::Place, "Antwerpen", 30),
        Entity::new(EntityKind::Person, "Jan", 0),
        Entity::new(EntityKind::Person, "Piet", 10),
        Entity::new(EntityKind::Phone, "0489", 50),
    ];

    let legend = Legend::from_entities(&entities);

    assert_eq!(
        legend.entries(),
        &[
            (EntityKind::Person, 2),
            (EntityKind::Place, 1),
            (EntityKind::Phone, 1),
        ]
    );
    assert_eq!(legend.count(EntityKind::Person), 2);
    assert_eq!(legend.count(EntityKind::Org), 0);
    assert_eq!(legend.total(), 4);
}

#[test]
fn legend_renders_counts_with_plural_labels() {
    let entities = vec![
        Entity::new(EntityKind::Person, "Jan", 0),
        Entity::new(EntityKind::Person, "Piet", 10),
        Entity::new(EntityKind::Place, "Gent", 20),
        Entity::new(EntityKind::Phone, "0489", 30),
    ];

    let legend = Legend::from_entities(&entities);
    assert_eq!(legend.to_string(), "2 person names, 1 location, 1 phone number");
}

#[test]
fn empty_legend_renders_nothing() {
    let legend = Legend::from_entities(&[]);
    assert!(legend.is_empty());
    assert_eq!(legend.total(), 0);
    assert_eq!(legend.to_string(), "");
}

// ═══════════════════════════════════════════════════════════════════════════
// FORWARD SUBSTITUTION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn forward_splices_placeholders_into_gaps() {
    let text = "Bel 0489 66 70 88 vandaag.";
    let spans = vec![Span::new(4, 17, EntityKind::Phone, 0.95, "0489 66 70 88")];
    let placeholders = vec![Placeholder::new(EntityKind::Phone, 1)];

    let sanitized = forward(text, &spans, &placeholders, &PlaceholderConfig::default());
    assert_eq!(sanitized, "Bel ⟦PHONE_1⟧ vandaag.");
}

#[test]
fn forward_handles_adjacent_spans_and_document_edges() {
    let text = "JanPiet";
    let spans = vec![
        Span::new(0, 3, EntityKind::Person, 0.9, "Jan"),
        Span::new(3, 7, EntityKind::Person, 0.9, "Piet"),
    ];
    let placeholders = vec![
        Placeholder::new(EntityKind::Person, 1),
        Placeholder::new(EntityKind::Person, 2),
    ];

    let sanitized = forward(text, &spans, &placeholders, &PlaceholderConfig::default());
    assert_eq!(sanitized, "⟦PERSON_1⟧⟦PERSON_2⟧");
}

#[test]
fn forward_without_spans_is_identity() {
    let text = "niets te vervangen";
    let sanitized = forward(text, &[], &[], &PlaceholderConfig::default());
    assert_eq!(sanitized, text);
}

// ═══════════════════════════════════════════════════════════════════════════
// REVERSE SUBSTITUTION
// ═══════════════════════════════════════════════════════════════════════════

fn sample_mapping() -> Mapping {
    let mut person = Entity::new(EntityKind::Person, "Jan Smit", 0);
    person.observe("JAN SMIT");
    let phone = Entity::new(EntityKind::Phone, "0489 66 70 88", 20);
    Mapping::from_entities(
        "bron",
        vec![
            (Placeholder::new(EntityKind::Person, 1), person),
            (Placeholder::new(EntityKind::Phone, 1), phone),
        ],
    )
}

fn default_matcher() -> TokenMatcher {
    TokenMatcher::new(&PlaceholderConfig::default(), &DecodeConfig::default())
        .expect("default matcher compiles")
}

#[test]
fn reverse_restores_canonical_values() {
    let mapping = sample_mapping();
    let index = MappingIndex::build(&mapping);

    let restored = reverse("⟦PERSON_1⟧ belde ⟦PHONE_1⟧.", &index, &default_matcher());

    assert_eq!(restored.text, "Jan Smit belde 0489 66 70 88.");
    assert!(restored.unresolved.is_empty());
}

#[test]
fn reverse_always_restores_canonical_never_a_variant() {
    let mapping = sample_mapping();
    let index = MappingIndex::build(&mapping);

    let restored = reverse("⟦PERSON_1⟧ en ⟦PERSON_1⟧", &index, &default_matcher());

    assert_eq!(restored.text, "Jan Smit en Jan Smit");
    assert!(!restored.text.contains("JAN SMIT"));
}

#[test]
fn reverse_tolerates_decorated_and_recased_tokens() {
    let mapping = sample_mapping();
    let index = MappingIndex::build(&mapping);

    let restored = reverse("⟦ **person_001** ⟧ belde.", &index, &default_matcher());

    assert_eq!(restored.text, "Jan Smit belde.");
    assert!(restored.unresolved.is_empty());
}

#[test]
fn reverse_leaves_unknown_tokens_and_reports_them() {
    let mapping = sample_mapping();
    let index = MappingIndex::build(&mapping);

    let restored = reverse("⟦PERSON_1⟧ met ⟦PERSON_9⟧.", &index, &default_matcher());

    assert_eq!(restored.text, "Jan Smit met ⟦PERSON_9⟧.");
    assert_eq!(restored.unresolved.len(), 1);
    assert_eq!(restored.unresolved[0].token, "PERSON_9");
    assert_eq!(restored.unresolved[0].offset, 19);
}

#[test]
fn reverse_reports_unparseable_cores_verbatim() {
    let mapping = sample_mapping();
    let index = MappingIndex::build(&mapping);

    let restored = reverse("zie ⟦NIET GELDIG⟧ en ⟦PERSON_00⟧", &index, &default_matcher());

    assert_eq!(restored.text, "zie ⟦NIET GELDIG⟧ en ⟦PERSON_00⟧");
    let tokens: Vec<&str> = restored.unresolved.iter().map(|u| u.token.as_str()).collect();
    assert_eq!(tokens, vec!["⟦NIET GELDIG⟧", "⟦PERSON_00⟧"]);
    assert_eq!(restored.unresolved[0].offset, 4);
}

#[test]
fn bare_tokens_restore_only_when_enabled() {
    let place = Entity::new(EntityKind::Place, "Wuustwezel", 0);
    let mapping = Mapping::from_entities(
        "bron",
        vec![(Placeholder::new(EntityKind::Place, 1), place)],
    );
    let index = MappingIndex::build(&mapping);

    let restored = reverse("Zie PLACE_1.", &index, &default_matcher());
    assert_eq!(restored.text, "Zie PLACE_1.", "bare tokens are off by default");
    assert!(restored.unresolved.is_empty());

    let bare = DecodeConfig {
        bare_tokens: true,
        ..DecodeConfig::default()
    };
    let matcher = TokenMatcher::new(&PlaceholderConfig::default(), &bare)
        .expect("bare matcher compiles");
    let restored = reverse("Zie PLACE_1 ofwel LOCATION_1.", &index, &matcher);
    assert_eq!(restored.text, "Zie Wuustwezel ofwel Wuustwezel.");
}

#[test]
fn empty_delimiters_disable_matching() {
    let mapping = sample_mapping();
    let index = MappingIndex::build(&mapping);
    let empty = PlaceholderConfig {
        open: String::new(),
        close: String::new(),
    };
    let matcher =
        TokenMatcher::new(&empty, &DecodeConfig::default()).expect("degenerate matcher compiles");

    let input = "⟦PERSON_1⟧ PERSON_1";
    let restored = reverse(input, &index, &matcher);

    assert_eq!(restored.text, input);
    assert!(restored.unresolved.is_empty());
}

#[test]
fn metacharacter_delimiters_are_escaped() {
    let mapping = sample_mapping();
    let index = MappingIndex::build(&mapping);
    let brackets = PlaceholderConfig {
        open: "[[".to_string(),
        close: "]]".to_string(),
    };
    let matcher =
        TokenMatcher::new(&brackets, &DecodeConfig::default()).expect("bracket matcher compiles");

    let restored = reverse("[[PERSON_1]] belde.", &index, &matcher);
    assert_eq!(restored.text, "Jan Smit belde.");
}

#[test]
fn tokens_never_span_lines() {
    let mapping = sample_mapping();
    let index = MappingIndex::build(&mapping);

    let restored = reverse("⟦PERSON_1\n⟧ ⟦PHONE_1⟧", &index, &default_matcher());

    assert_eq!(restored.text, "⟦PERSON_1\n⟧ 0489 66 70 88");
    assert!(restored.unresolved.is_empty());
}
