//! Search Module Tests
//!
//! Validates the query pipeline from tokenization to the three query operations.
//!
//! ## Test Scopes
//! - **Tokenizer**: folding, punctuation splitting, keyword probe ordering.
//! - **Inputs**: category parsing, year range checks, empty keyword and name rejection.
//! - **Index**: range lookup, category postings, name and rationale candidates.
//! - **Engine**: counts and name lookups against a hand-built fixture, including withheld awards.
//! - **Snapshot**: publication swaps the whole view; old readers keep their snapshot.

#[cfg(test)]
mod tests {
    use crate::config::YearBounds;
    use crate::error::{Code, QueryError};
    use crate::search::engine::QueryEngine;
    use crate::search::index::CatalogIndex;
    use crate::search::snapshot::{Snapshot, SnapshotHandle};
    use crate::search::tokenizer::{fold, tokenize_keyword, tokenize_text};
    use crate::search::types::{
        AwardDetail, Category, FullName, Keyword, NO_MOTIVATION, YearRange,
    };
    use crate::storage::memory::RecordStore;
    use crate::storage::types::{AwardRecord, Recipient, RecipientRef, RecordId};
    use std::sync::Arc;

    fn award(category: &str, year: i32, recipients: Vec<Recipient>) -> AwardRecord {
        AwardRecord {
            year,
            category: category.to_string(),
            recipients,
        }
    }

    fn fixture() -> Vec<AwardRecord> {
        vec![
            award(
                "Physics",
                2021,
                vec![
                    Recipient::new("Alain", "Aspect", "for experiments with entangled photons"),
                    Recipient::new("John", "Clauser", "for experiments with entangled photons"),
                ],
            ),
            award(
                "peace",
                2021,
                vec![
                    Recipient::new("Maria", "Ressa", "for their efforts to safeguard freedom of expression"),
                    Recipient::new("Dmitry", "Muratov", "for their efforts to safeguard freedom of expression"),
                ],
            ),
            award(
                "physics",
                2015,
                vec![
                    Recipient::new("Takaaki", "Kajita", "for the discovery of neutrino oscillations"),
                    Recipient::new("Arthur B.", "McDonald", "for the discovery of neutrino oscillations"),
                ],
            ),
            award(
                "peace",
                2017,
                vec![Recipient::new(
                    "International Campaign to Abolish Nuclear Weapons",
                    "",
                    "for its work to draw attention to the catastrophic humanitarian consequences",
                )],
            ),
            award(
                "chemistry",
                2019,
                vec![
                    Recipient::new("John B.", "Goodenough", "for the development of lithium-ion batteries"),
                    Recipient::new("M. Stanley", "Whittingham", "for the development of lithium-ion batteries"),
                    Recipient::new("Akira", "Yoshino", "for the development of lithium-ion batteries"),
                ],
            ),
            award("literature", 2018, vec![]),
            award(
                "peace",
                2013,
                vec![Recipient::new(
                    "Organisation for the Prohibition of Chemical Weapons",
                    "",
                    "",
                )],
            ),
            award(
                "peace",
                2014,
                vec![Recipient::new("Malala", "Yousafzai", "for a peaceful struggle for the right of all children")],
            ),
        ]
    }

    fn engine() -> QueryEngine {
        engine_for(fixture())
    }

    fn engine_for(records: Vec<AwardRecord>) -> QueryEngine {
        let snapshot = Snapshot::build(RecordStore::from_records(records), 1);
        QueryEngine::new(Arc::new(snapshot))
    }

    fn range(start: i32, end: i32) -> YearRange {
        YearRange::new(start, end, &YearBounds::default()).expect("valid range")
    }

    fn count_keyword(engine: &QueryEngine, keyword: &str) -> u64 {
        engine
            .count_by_motivation_keyword(&Keyword::parse(keyword).unwrap())
            .unwrap()
    }

    fn details(engine: &QueryEngine, first: &str, last: &str) -> Vec<AwardDetail> {
        engine
            .details_by_name(&FullName::parse(first, last).unwrap())
            .unwrap()
    }

    // ============================================================
    // TOKENIZER TESTS
    // ============================================================

    #[test]
    fn test_fold_trims_and_lowercases() {
        assert_eq!(fold("  Physics "), "physics");
        assert_eq!(fold("ÉCONOMIE"), "économie");
    }

    #[test]
    fn test_tokenize_text_splits_on_punctuation() {
        let tokens = tokenize_text("\"for the development of lithium-ion batteries\"");

        assert!(tokens.contains("lithium"));
        assert!(tokens.contains("ion"));
        assert!(tokens.contains("batteries"));
        assert!(!tokens.contains("lithium-ion"));
    }

    #[test]
    fn test_tokenize_text_keeps_short_words_and_numbers() {
        let tokens = tokenize_text("for work on covid 19");

        assert!(tokens.contains("on"));
        assert!(tokens.contains("19"));
    }

    #[test]
    fn test_tokenize_keyword_longest_first() {
        let tokens = tokenize_keyword("entangled photons of");
        assert_eq!(tokens, vec!["entangled", "photons", "of"]);
    }

    #[test]
    fn test_tokenize_keyword_punctuation_only() {
        assert!(tokenize_keyword("-").is_empty());
    }

    // ============================================================
    // INPUT VALIDATION TESTS
    // ============================================================

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!("PHYSICS".parse::<Category>().unwrap(), Category::Physics);
        assert_eq!(" economics ".parse::<Category>().unwrap(), Category::Economics);
    }

    #[test]
    fn test_category_parse_unknown_rejected() {
        let err = "astronomy".parse::<Category>().unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = YearRange::new(2020, 2015, &YearBounds::default()).unwrap_err();
        assert!(matches!(err, QueryError::InvalidRange { .. }));
        assert_eq!(err.code(), Code::InvalidArgument);
    }

    #[test]
    fn test_out_of_bounds_range_rejected() {
        let bounds = YearBounds::default();
        assert!(YearRange::new(2012, 2015, &bounds).is_err());
        assert!(YearRange::new(2015, 2024, &bounds).is_err());
        assert!(YearRange::new(2013, 2023, &bounds).is_ok());
    }

    #[test]
    fn test_empty_keyword_rejected() {
        assert!(Keyword::parse("").is_err());
        assert!(Keyword::parse("   ").is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = FullName::parse(" ", "").unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);
        assert!(FullName::parse("Maria", "").is_ok());
    }

    // ============================================================
    // INDEX TESTS
    // ============================================================

    #[test]
    fn test_year_range_lookup() {
        let store = RecordStore::from_records(fixture());
        let index = CatalogIndex::build(&store);

        assert_eq!(
            index.years_in(2017, 2019),
            vec![RecordId(3), RecordId(4), RecordId(5)]
        );
        assert_eq!(index.years_in(2021, 2021), vec![RecordId(0), RecordId(1)]);
        assert!(index.years_in(2022, 2023).is_empty());
        assert!(index.years_in(2020, 2010).is_empty());
    }

    #[test]
    fn test_category_postings_are_folded() {
        let store = RecordStore::from_records(fixture());
        let index = CatalogIndex::build(&store);

        // "Physics" and "physics" share one posting list.
        assert_eq!(index.category("physics"), &[RecordId(0), RecordId(2)]);
        assert!(index.category("Physics").is_empty());
        assert!(index.category("economics").is_empty());
    }

    #[test]
    fn test_name_candidates() {
        let store = RecordStore::from_records(fixture());
        let index = CatalogIndex::build(&store);

        let alain = RecipientRef {
            record: RecordId(0),
            position: 0,
        };
        assert_eq!(index.name_candidates("alain", "aspect"), &[alain]);
        assert!(index.name_candidates("alain", "nobody").is_empty());
        // Surname-only probes hit the surname postings.
        assert_eq!(index.name_candidates("", "aspect"), &[alain]);
    }

    #[test]
    fn test_rationale_candidates_match_sub_tokens() {
        let store = RecordStore::from_records(fixture());
        let index = CatalogIndex::build(&store);

        // "peace" is only inside "peaceful".
        let refs = index.rationale_candidates("peace");
        assert_eq!(
            refs,
            vec![RecipientRef {
                record: RecordId(7),
                position: 0
            }]
        );
    }

    #[test]
    fn test_all_recipients_skips_withheld_awards() {
        let store = RecordStore::from_records(fixture());
        let index = CatalogIndex::build(&store);
        assert_eq!(index.all_recipients().count(), store.recipient_count());
    }

    // ============================================================
    // ENGINE TESTS - count by category and years
    // ============================================================

    #[test]
    fn test_physics_2021_counts_both_recipients() {
        let engine = engine();
        let count = engine
            .count_by_category_and_years(Category::Physics, range(2021, 2021))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_count_matches_independent_oracle() {
        let engine = engine();
        let records = fixture();

        for category in Category::ALL {
            for start in 2013..=2023 {
                for end in start..=2023 {
                    let expected: u64 = records
                        .iter()
                        .filter(|r| r.category.to_lowercase() == category.as_str())
                        .filter(|r| r.year >= start && r.year <= end)
                        .map(|r| r.recipients.len() as u64)
                        .sum();
                    let actual = engine
                        .count_by_category_and_years(category, range(start, end))
                        .unwrap();
                    assert_eq!(actual, expected, "{} {}..={}", category, start, end);
                }
            }
        }
    }

    #[test]
    fn test_no_matching_records_is_zero() {
        let engine = engine();
        let count = engine
            .count_by_category_and_years(Category::Economics, range(2013, 2023))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_withheld_award_contributes_zero() {
        let engine = engine();
        let count = engine
            .count_by_category_and_years(Category::Literature, range(2018, 2018))
            .unwrap();
        assert_eq!(count, 0);
    }

    // ============================================================
    // ENGINE TESTS - count by motivation keyword
    // ============================================================

    #[test]
    fn test_keyword_entangled() {
        assert_eq!(count_keyword(&engine(), "entangled"), 2);
    }

    #[test]
    fn test_keyword_is_case_insensitive_substring() {
        let engine = engine_for(vec![award(
            "physics",
            2022,
            vec![Recipient::new("A", "B", "for research on Quantum Entanglement")],
        )]);

        assert_eq!(count_keyword(&engine, "quantum"), 1);
        assert_eq!(count_keyword(&engine, "ENTANGLE"), 1);
        assert_eq!(count_keyword(&engine, "tum entang"), 1);
        assert_eq!(count_keyword(&engine, "entanglements"), 0);
    }

    #[test]
    fn test_keyword_matches_inside_words() {
        // Substring, not word boundary: "peace" is found in "peaceful".
        assert_eq!(count_keyword(&engine(), "peace"), 1);
    }

    #[test]
    fn test_keyword_counts_recipients_not_records() {
        assert_eq!(count_keyword(&engine(), "lithium-ion"), 3);
        assert_eq!(count_keyword(&engine(), "freedom of expression"), 2);
    }

    #[test]
    fn test_keyword_tokenization_false_positive_filtered() {
        // Both words are indexed terms of the same rationales, but never adjacent like this.
        assert_eq!(count_keyword(&engine(), "lithium batteries"), 0);
        assert_eq!(count_keyword(&engine(), "ion-batteries"), 0);
    }

    #[test]
    fn test_punctuation_keyword_falls_back_to_scan() {
        assert_eq!(count_keyword(&engine(), "-"), 3);
    }

    #[test]
    fn test_keyword_surrounding_whitespace_ignored() {
        assert_eq!(count_keyword(&engine(), "  neutrino "), 2);
    }

    #[test]
    fn test_keyword_trailing_space_is_not_a_word_boundary() {
        assert_eq!(Keyword::parse("peace ").unwrap().folded(), "peace");
        assert_eq!(Keyword::parse(" of expression").unwrap().folded(), "of expression");
        // Malala Yousafzai's "peaceful struggle" still matches.
        assert_eq!(count_keyword(&engine(), "peace "), 1);
    }

    // ============================================================
    // ENGINE TESTS - details by name
    // ============================================================

    #[test]
    fn test_details_alain_aspect() {
        let found = details(&engine(), "Alain", "Aspect");
        assert_eq!(
            found,
            vec![AwardDetail {
                year: 2021,
                category: "Physics".to_string(),
                motivation: "for experiments with entangled photons".to_string(),
            }]
        );
    }

    #[test]
    fn test_details_case_insensitive() {
        assert_eq!(details(&engine(), "aLAIN", "ASPECT").len(), 1);
    }

    #[test]
    fn test_details_requires_both_names_exactly() {
        let engine = engine();

        // Partial names never match: the empty surname must equal the stored one.
        assert!(details(&engine, "Maria", "").is_empty());
        assert!(details(&engine, "", "Ressa").is_empty());
        assert!(details(&engine, "Mari", "Ressa").is_empty());
        assert!(details(&engine, "Arthur", "McDonald").is_empty());
        assert_eq!(details(&engine, "Arthur B.", "McDonald").len(), 1);
    }

    #[test]
    fn test_details_organization_with_empty_surname() {
        let found = details(&engine(), "international campaign to abolish nuclear weapons", "");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].year, 2017);
    }

    #[test]
    fn test_details_default_motivation() {
        let found = details(&engine(), "Organisation for the Prohibition of Chemical Weapons", "");
        assert_eq!(found[0].motivation, NO_MOTIVATION);
    }

    #[test]
    fn test_details_multiple_prizes_in_dataset_order() {
        let engine = engine_for(vec![
            award("chemistry", 2022, vec![Recipient::new("Barry", "Sharpless", "for click chemistry")]),
            award("physics", 2020, vec![]),
            award("chemistry", 2001, vec![Recipient::new("K. Barry", "Sharpless", "for chirally catalysed oxidation")]),
            award("chemistry", 2015, vec![Recipient::new("Barry", "Sharpless", "second entry")]),
        ]);

        let found = details(&engine, "barry", "sharpless");
        let years: Vec<i32> = found.iter().map(|d| d.year).collect();
        assert_eq!(years, vec![2022, 2015]);
    }

    #[test]
    fn test_details_unknown_name_is_empty() {
        assert!(details(&engine(), "Nobody", "Atall").is_empty());
    }

    #[test]
    fn test_queries_are_idempotent() {
        let engine = engine();
        let first = (
            engine
                .count_by_category_and_years(Category::Peace, range(2013, 2023))
                .unwrap(),
            count_keyword(&engine, "for"),
            details(&engine, "John", "Clauser"),
        );
        for _ in 0..5 {
            let again = (
                engine
                    .count_by_category_and_years(Category::Peace, range(2013, 2023))
                    .unwrap(),
                count_keyword(&engine, "for"),
                details(&engine, "John", "Clauser"),
            );
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_empty_store_answers_zero() {
        let engine = engine_for(vec![]);
        assert_eq!(
            engine
                .count_by_category_and_years(Category::Physics, range(2013, 2023))
                .unwrap(),
            0
        );
        assert_eq!(count_keyword(&engine, "anything"), 0);
        assert!(details(&engine, "Alain", "Aspect").is_empty());
    }

    // ============================================================
    // SNAPSHOT TESTS
    // ============================================================

    #[test]
    fn test_publish_swaps_snapshot() {
        let handle = SnapshotHandle::new(RecordStore::from_records(fixture()));
        let before = handle.current().unwrap();
        assert_eq!(before.generation(), 1);

        let generation = handle
            .publish(RecordStore::from_records(vec![award("physics", 2022, vec![])]))
            .unwrap();
        assert_eq!(generation, 2);

        let after = handle.current().unwrap();
        assert_eq!(after.generation(), 2);
        assert_eq!(after.store().len(), 1);

        // A reader holding the old snapshot still sees the complete old view.
        assert_eq!(before.store().len(), fixture().len());
        let old_engine = QueryEngine::new(before);
        assert_eq!(count_keyword(&old_engine, "entangled"), 2);
    }

    #[test]
    fn test_snapshot_stats() {
        let snapshot = Snapshot::build(RecordStore::from_records(fixture()), 3);
        let stats = snapshot.stats();

        assert_eq!(stats.generation, 3);
        assert_eq!(stats.records, 8);
        assert_eq!(stats.recipients, 12);
        assert!(stats.rationale_terms > 0);
    }
}
