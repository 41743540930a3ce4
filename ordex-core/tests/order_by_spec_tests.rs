use chrono::NaiveDate;
use ordex_core::{
    FieldMatching, MissingValues, OrderBySpec, SortConfig, SortError,
    SortOrder, SortSpec, order_by_spec, order_by_spec_with, sortable_record,
};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
struct Person {
    seq: usize,
    age: u32,
    name: String,
    born: Option<NaiveDate>,
    score: Option<f64>,
    attributes: HashMap<String, String>,
}

sortable_record!(Person {
    "age" => |p| p.age,
    "name" => |p| p.name.clone(),
    "born" => |p| p.born,
    "score" => |p| p.score,
} opaque {
    "attributes": HashMap<String, String>,
});

/// Holds an `Rc`, so it is not `Send`
#[derive(Debug)]
struct SharedTally {
    label: &'static str,
    count: Rc<u32>,
}

sortable_record!(SharedTally {
    "count" => |t| *t.count,
    "label" => |t| t.label,
});

mod helpers {
    use super::*;

    pub fn person(seq: usize, age: u32, name: &str) -> Person {
        Person {
            seq,
            age,
            name: name.to_string(),
            born: None,
            score: None,
            attributes: HashMap::new(),
        }
    }

    pub fn by_age(ages: &[u32]) -> Vec<Person> {
        ages.iter()
            .enumerate()
            .map(|(seq, &age)| person(seq, age, "x"))
            .collect()
    }

    pub fn ages(people: &[Person]) -> Vec<u32> {
        people.iter().map(|p| p.age).collect()
    }

    pub fn sort(people: Vec<Person>, spec: &str) -> Vec<Person> {
        order_by_spec(people, spec, SortOrder::Ascending)
            .expect("spec should build")
            .into_vec()
    }

    /// Deterministic mix of duplicate keys for stability checks
    pub fn crowd() -> Vec<Person> {
        let names = ["kim", "ali", "bo", "ali", "kim", "bo", "zed"];
        (0..42)
            .map(|seq| person(seq, (seq * 7 % 5) as u32, names[seq % names.len()]))
            .collect()
    }
}

use helpers::*;

#[test]
fn blank_spec_leaves_order_untouched() {
    for spec in ["", " ", "\t\n", " , , "] {
        let input = crowd();
        let output = sort(input.clone(), spec);
        assert_eq!(output, input, "spec {spec:?} reordered records");
    }
}

#[test]
fn single_field_ascending() {
    let output = sort(by_age(&[3, 1, 2]), "age");
    assert_eq!(ages(&output), [1, 2, 3]);
}

#[test]
fn single_field_descending() {
    let output = sort(by_age(&[3, 1, 2]), "age desc");
    assert_eq!(ages(&output), [3, 2, 1]);
}

#[test]
fn secondary_key_descending_within_equal_primary() {
    let input = vec![person(0, 1, "b"), person(1, 1, "a"), person(2, 2, "z")];
    let output = sort(input.clone(), "age, name desc");
    assert_eq!(output, input);

    let shuffled = vec![input[2].clone(), input[1].clone(), input[0].clone()];
    assert_eq!(sort(shuffled, "age, name desc"), input);
}

#[test]
fn unknown_field_is_dropped_without_breaking_chain() {
    let with_bogus = sort(crowd(), "age, bogus desc, name");
    let without = sort(crowd(), "age, name");
    assert_eq!(with_bogus, without);
}

#[test]
fn only_unknown_fields_apply_no_ordering() {
    let ordered = crowd().order_by_spec("height desc, weight").unwrap();
    assert!(!ordered.is_ordered());
    assert_eq!(ordered.into_vec(), crowd());
}

#[test]
fn equal_keys_keep_input_order() {
    for spec in ["age", "name", "age desc", "name desc, age", "age, name"] {
        let output = sort(crowd(), spec);
        let config = SortConfig::default();
        let chain = ordex_core::ChainedOrder::<Person>::from_spec(
            &SortSpec::parse(spec, config.default_order),
            &config,
        )
        .unwrap();

        for pair in output.windows(2) {
            if chain.compare(&pair[0], &pair[1]).is_eq() {
                assert!(
                    pair[0].seq < pair[1].seq,
                    "spec {spec:?} swapped equal records {} and {}",
                    pair[0].seq,
                    pair[1].seq
                );
            }
        }
    }
}

#[test]
fn direction_synonyms_and_fallback() {
    let asc = sort(crowd(), "age asc");
    assert_eq!(sort(crowd(), "age ascending"), asc);
    assert_eq!(sort(crowd(), "age"), asc);
    assert_eq!(sort(crowd(), "age up"), asc);

    let desc = sort(crowd(), "age desc");
    assert_eq!(sort(crowd(), "age descending"), desc);
    assert_ne!(desc, asc);

    // Direction words are case-sensitive
    assert_eq!(sort(crowd(), "age DESC"), asc);
}

#[test]
fn unrecognized_direction_uses_configured_default() {
    let output = order_by_spec(by_age(&[2, 3, 1]), "age sideways", SortOrder::Descending)
        .unwrap()
        .into_vec();
    assert_eq!(ages(&output), [3, 2, 1]);
}

#[test]
fn sorting_is_idempotent() {
    for spec in ["age desc, name", "name, age desc", "name desc"] {
        let once = sort(crowd(), spec);
        let twice = sort(once.clone(), spec);
        assert_eq!(once, twice);
    }
}

#[test]
fn incomparable_field_is_an_error() {
    let err = crowd().order_by_spec("age, attributes desc").unwrap_err();
    match err {
        SortError::IncomparableField { field, type_name } => {
            assert_eq!(field, "attributes");
            assert!(type_name.contains("HashMap"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_field_after_incomparable_still_fails() {
    assert!(crowd().order_by_spec("nothing, attributes").is_err());
}

#[test]
fn chaining_after_the_call() {
    let input = vec![
        person(0, 30, "b"),
        person(1, 20, "a"),
        person(2, 30, "a"),
        person(3, 20, "b"),
    ];

    let output = input
        .order_by_spec("age desc")
        .unwrap()
        .then_by("name")
        .unwrap()
        .then_by_key("seq", SortOrder::Descending, |p: &Person| p.seq)
        .into_vec();

    let seqs: Vec<_> = output.iter().map(|p| p.seq).collect();
    assert_eq!(seqs, [2, 0, 1, 3]);
}

#[test]
fn chaining_onto_a_blank_spec_makes_primary_key() {
    let output = by_age(&[2, 3, 1])
        .order_by_spec("")
        .unwrap()
        .then_by_descending("age")
        .unwrap()
        .into_vec();
    assert_eq!(ages(&output), [3, 2, 1]);
}

#[test]
fn case_insensitive_matching_is_opt_in() {
    assert_eq!(sort(by_age(&[2, 3, 1]), "AGE desc"), by_age(&[2, 3, 1]));

    let config = SortConfig {
        field_matching: FieldMatching::IgnoreAsciiCase,
        ..SortConfig::default()
    };
    let output = order_by_spec_with(by_age(&[2, 3, 1]), "AGE desc", &config)
        .unwrap()
        .into_vec();
    assert_eq!(ages(&output), [3, 2, 1]);
}

#[test]
fn dates_sort_chronologically_with_missing_last() {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
    let mut people = by_age(&[0, 0, 0, 0]);
    people[0].born = date(2001, 5, 1);
    people[1].born = None;
    people[2].born = date(1999, 12, 31);
    people[3].born = date(2001, 1, 9);

    let seqs = |people: &[Person]| people.iter().map(|p| p.seq).collect::<Vec<_>>();

    assert_eq!(seqs(&sort(people.clone(), "born")), [2, 3, 0, 1]);
    assert_eq!(seqs(&sort(people.clone(), "born desc")), [1, 0, 3, 2]);

    let config = SortConfig {
        missing_values: MissingValues::AlwaysLast,
        ..SortConfig::default()
    };
    let output = order_by_spec_with(people, "born desc", &config)
        .unwrap()
        .into_vec();
    assert_eq!(seqs(&output), [0, 3, 2, 1]);
}

#[test]
fn floats_sort_numerically() {
    let mut people = by_age(&[0, 0, 0]);
    people[0].score = Some(10.5);
    people[1].score = Some(-2.0);
    people[2].score = Some(3.25);

    let output = sort(people, "score desc");
    let scores: Vec<_> = output.iter().map(|p| p.score.unwrap()).collect();
    assert_eq!(scores, [10.5, 3.25, -2.0]);
}

#[test]
fn config_from_toml_drives_ordering() {
    let config = SortConfig::from_toml_str(
        r#"
        default_order = "descending"
        field_matching = "ignore_ascii_case"
        "#,
    )
    .unwrap();

    let output = by_age(&[1, 3, 2])
        .order_by_spec_with("Age", &config)
        .unwrap()
        .into_vec();
    assert_eq!(ages(&output), [3, 2, 1]);
}

#[test]
fn records_are_not_mutated() {
    let input = crowd();
    let ordered = input.clone().order_by_spec("name desc").unwrap();
    let copy = ordered.to_vec();
    let output = ordered.into_vec();

    assert_eq!(copy, output);
    let mut restored = output;
    restored.sort_by_key(|p| p.seq);
    assert_eq!(restored, input);
}

#[test]
fn records_that_are_not_send_can_be_ordered() {
    let shared = Rc::new(2);
    let tallies = vec![
        SharedTally { label: "b", count: Rc::clone(&shared) },
        SharedTally { label: "c", count: Rc::new(1) },
        SharedTally { label: "a", count: shared },
    ];

    let sorted = tallies.order_by_spec("count desc, label").unwrap().into_vec();
    let labels: Vec<_> = sorted.iter().map(|t| t.label).collect();
    assert_eq!(labels, ["a", "b", "c"]);

    let blank: Vec<SharedTally> =
        order_by_spec(sorted, "", SortOrder::Ascending).unwrap().into_iter().collect();
    assert_eq!(blank.len(), 3);
}
