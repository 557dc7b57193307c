//! Tests for filter evaluation.

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use scc_classes_rs::models::{
    Capacity, ClassEntry, ClassType, DateRange, DayOfWeek, FilterableClassEntry, ScheduleEntry,
    ScheduleTime,
};

use crate::evaluator::FUZZY_THRESHOLD;
use crate::{CstNode, Evaluator, FilterError, Query, Span, TokenKind, Value};

// ==================== Test Helpers ====================

fn make_schedule(days: &[DayOfWeek], time: ScheduleTime, location: &str) -> ScheduleEntry {
    ScheduleEntry {
        uid: format!("s-{location}"),
        days: days.to_vec(),
        time,
        date: DateRange::new(
            NaiveDate::from_ymd_opt(2024, 8, 12).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 13).unwrap(),
        ),
        instructor: "Erica L  Beam (P)".to_string(),
        location: location.to_string(),
        attributes: String::new(),
    }
}

fn lecture() -> ScheduleEntry {
    make_schedule(
        &[DayOfWeek::Monday, DayOfWeek::Wednesday],
        ScheduleTime::range(
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 50, 0).unwrap(),
        ),
        "0500 0505",
    )
}

fn make_entry(crn: u32, subject: &str, title: &str) -> FilterableClassEntry {
    make_entry_with_schedule(crn, subject, title, vec![lecture()])
}

fn make_entry_with_schedule(
    crn: u32,
    subject: &str,
    title: &str,
    schedule: Vec<ScheduleEntry>,
) -> FilterableClassEntry {
    ClassEntry {
        uid: format!("c-{crn}"),
        class_type: ClassType::from_schedule(&schedule),
        title: title.to_string(),
        crn,
        campus: "M".to_string(),
        credit: 4.0,
        subject: subject.to_string(),
        course: "001".to_string(),
        section: "0".to_string(),
        department: "Accounting".to_string(),
        capacity: Capacity {
            total: 40,
            actual: 29,
            remaining: 11,
        },
        waitlist: Capacity {
            total: 24,
            actual: 0,
            remaining: 24,
        },
        schedule,
    }
    .into()
}

fn accounting() -> FilterableClassEntry {
    make_entry(80644, "ACCT", "Principles of Accounting - Financial")
}

fn matches(query: &str, entry: &FilterableClassEntry) -> bool {
    Query::compile(query)
        .matches(entry)
        .unwrap_or_else(|e| panic!("query {query:?} failed: {e}"))
}

// ==================== Fuzzy Match Tests ====================

#[test]
fn test_subject_fuzzy_match() {
    assert!(matches("subject:ACCT", &make_entry(1, "ACCT", "A")));
    assert!(matches("subject:ACCT", &make_entry(2, "ACCTG", "A")));
    assert!(!matches("subject:ACCT", &make_entry(3, "BIOL", "A")));
}

#[test]
fn test_fuzzy_match_is_case_insensitive() {
    assert!(matches("subject:acct", &accounting()));
    assert!(matches("title:FINANCIAL", &accounting()));
}

#[test]
fn test_fuzzy_match_tolerates_typos() {
    assert!(matches(
        "title:\"Principles of Acounting - Financial\"",
        &accounting()
    ));
    assert!(!matches("title:chemistry", &accounting()));
}

#[test]
fn test_asterisk_is_fuzzy_equality() {
    assert!(matches("title*accounting", &accounting()));
    assert!(!matches("title*biology", &accounting()));
}

#[test]
fn test_fuzzy_threshold() {
    let a = Value::from("accounting");
    assert!(a.fuzzy_eq(&Value::from("acounting")));
    assert!(!Value::from("intro").fuzzy_eq(&Value::from("intor")));
    assert!(FUZZY_THRESHOLD > 0.6 && FUZZY_THRESHOLD <= 0.9);
}

// ==================== Schedule Tests ====================

#[test]
fn test_schedule_days_any_entry() {
    let entry = accounting();
    assert!(matches("schedule.days:M", &entry));
    assert!(matches("schedule.days:=W", &entry));
    assert!(!matches("schedule.location:0505", &entry));
    assert!(!matches("schedule.days:F", &entry));
}

#[test]
fn test_schedule_days_across_entries() {
    let online = make_schedule(&[DayOfWeek::Friday], ScheduleTime::label("TBA"), "ONLINE");
    let entry = make_entry_with_schedule(2001, "BIOL", "Cell Biology", vec![lecture(), online]);
    assert!(matches("schedule.days:F", &entry));
    assert!(matches("schedule.location:=ONLINE", &entry));
    assert!(matches("schedule.location:\"0505\"", &entry));
    assert!(matches("type:=hybrid", &entry));
}

#[test]
fn test_schedule_instructor() {
    assert!(matches("schedule.instructor:beam", &accounting()));
    assert!(!matches("schedule.instructor:=beam", &accounting()));
}

#[test]
fn test_schedule_without_entries_never_matches() {
    let entry = make_entry_with_schedule(1, "ACCT", "A", vec![]);
    assert!(!matches("schedule.days:M", &entry));
    assert!(matches("not schedule.days:M", &entry));
}

// ==================== Shorthand Tests ====================

#[test]
fn test_bare_number_matches_crn() {
    assert!(matches("80644", &accounting()));
    assert!(!matches("80645", &accounting()));
}

#[test]
fn test_bare_string_matches_title() {
    assert!(matches("\"financial\"", &accounting()));
    assert!(matches("'principles of'", &accounting()));
    assert!(!matches("\"biology\"", &accounting()));
}

// ==================== Comparison Tests ====================

#[test]
fn test_numeric_ordering() {
    let entry = accounting();
    assert!(matches("credit:>=4", &entry));
    assert!(matches("credit:<=4", &entry));
    assert!(!matches("credit:>4", &entry));
    assert!(matches("capacity.remaining:>0", &entry));
    assert!(matches("waitlist.total:<25", &entry));
}

#[test]
fn test_string_ordering() {
    assert!(matches("subject:<\"BIOL\"", &accounting()));
    assert!(!matches("subject:>\"BIOL\"", &accounting()));
}

#[test]
fn test_mixed_ordering_is_false() {
    assert!(!matches("subject:>1", &accounting()));
    assert!(!matches("subject:<1", &accounting()));
}

#[test]
fn test_loose_equality() {
    let entry = accounting();
    assert!(matches("crn:=80644", &entry));
    assert!(matches("crn:=\"80644\"", &entry));
    assert!(matches("course:=1", &entry));
    assert!(!matches("crn:=80645", &entry));
}

#[test]
fn test_quoted_type() {
    assert!(matches("type:=\"in-person\"", &accounting()));
    assert!(!matches("type:=online", &accounting()));
}

#[test]
fn test_loose_eq_values() {
    assert!(Value::Bool(true).loose_eq(&Value::Number(1.0)));
    assert!(Value::String(Cow::Borrowed("")).loose_eq(&Value::Number(0.0)));
    assert!(!Value::from("abc").loose_eq(&Value::Number(0.0)));
    assert!(Value::Undefined.loose_eq(&Value::Undefined));
    assert!(!Value::Undefined.loose_eq(&Value::Bool(false)));
}

#[test]
fn test_truthiness() {
    assert!(!Value::Undefined.is_truthy());
    assert!(!Value::Number(0.0).is_truthy());
    assert!(!Value::Number(f64::NAN).is_truthy());
    assert!(!Value::from("").is_truthy());
    assert!(Value::from("x").is_truthy());
    assert!(Value::Number(-1.0).is_truthy());
}

// ==================== Arithmetic Tests ====================

#[test]
fn test_arithmetic() {
    let entry = accounting();
    assert!(matches(
        "capacity.actual + capacity.remaining:=capacity.total",
        &entry
    ));
    assert!(matches("capacity.total - capacity.actual:=11", &entry));
    assert!(matches("capacity.total / 2:>=20", &entry));
}

#[test]
fn test_arithmetic_on_text_is_undefined() {
    let entry = accounting();
    assert!(!matches("title + 1:=1", &entry));
    assert!(!matches("(title + 1)", &entry));
}

// ==================== Boolean Tests ====================

#[test]
fn test_connectives() {
    let entry = accounting();
    assert!(matches("subject:ACCT and credit:>=3", &entry));
    assert!(!matches("subject:BIOL and credit:>=3", &entry));
    assert!(matches("subject:BIOL or credit:>=3", &entry));
    assert!(matches("(subject:BIOL or subject:ACCT) and crn:=80644", &entry));
}

#[test]
fn test_not() {
    let entry = accounting();
    assert!(matches("not subject:BIOL", &entry));
    assert!(!matches("not (crn:=80644)", &entry));
    assert!(!matches("not", &entry));
}

#[test]
fn test_view_flags() {
    let mut entry = accounting();
    assert!(!matches("selected", &entry));
    assert!(matches("not selected", &entry));

    entry.selected = true;
    entry.expanded = true;
    assert!(matches("selected", &entry));
    assert!(matches("selected:=true and expanded", &entry));
    assert!(!matches("credit:>=3 and not selected", &entry));
}

#[test]
fn test_empty_group_is_false() {
    assert!(!matches("()", &accounting()));
}

// ==================== Error Handling Tests ====================

#[test]
fn test_bad_comparison_operand_fails_closed() {
    let entry = accounting();
    assert!(!matches("crn:=\n80644", &entry));
    assert!(matches("not crn:=\n80644", &entry));
}

#[test]
fn test_stray_line_break_still_evaluates() {
    let entry = accounting();
    assert_eq!(Query::compile("\n").matches(&entry), Ok(false));
    assert_eq!(
        Query::compile("subject:ACCT and\ncredit:>3").matches(&entry),
        Ok(false)
    );
    assert_eq!(
        Query::compile("subject:ACCT or\ncredit:>3").matches(&entry),
        Ok(true)
    );
    assert_eq!(Query::compile("not\nselected").matches(&entry), Ok(true));
}

#[test]
fn test_stray_line_break_does_not_abort_filter() {
    let entries = vec![make_entry(1, "ACCT", "A"), make_entry(2, "BIOL", "B")];
    let query = Query::compile("subject:ACCT or\nselected");
    assert!(!query.is_clean());
    let kept: Vec<u32> = query
        .filter(&entries)
        .unwrap()
        .iter()
        .map(|e| e.entry.crn)
        .collect();
    assert_eq!(kept, vec![1]);
}

#[test]
fn test_unflagged_break_node_is_an_error() {
    let node = CstNode {
        kind: TokenKind::Break,
        value: "\n".to_string(),
        span: Span::new(0, 1),
        depth: None,
        children: Vec::new(),
        error: None,
    };
    let err = Evaluator::new(&node).matches(&accounting()).unwrap_err();
    match err {
        FilterError::UnsupportedNode { kind } => assert_eq!(kind, "line break"),
    }
}

// ==================== Filtering Tests ====================

#[test]
fn test_filter_keeps_order() {
    let entries = vec![
        make_entry(1, "ACCT", "A"),
        make_entry(2, "BIOL", "B"),
        make_entry(3, "ACCTG", "C"),
        make_entry(4, "CHEM", "D"),
    ];
    let query = Query::compile("subject:ACCT");
    let kept: Vec<u32> = query
        .filter(&entries)
        .unwrap()
        .iter()
        .map(|e| e.entry.crn)
        .collect();
    assert_eq!(kept, vec![1, 3]);
}

#[test]
fn test_filter_with_evaluator() {
    let entries: Vec<FilterableClassEntry> = (0..50)
        .map(|i| make_entry(1000 + i, "ACCT", "A"))
        .collect();
    let query = Query::compile("crn:>=1040");
    let evaluator = query.evaluator().unwrap();
    let kept = evaluator.filter_entries(&entries).unwrap();
    assert_eq!(kept.len(), 10);
    assert_eq!(kept[0].entry.crn, 1040);
    assert_eq!(kept[9].entry.crn, 1049);
}

#[test]
fn test_blank_query_matches_everything() {
    let entries = vec![make_entry(1, "ACCT", "A"), make_entry(2, "BIOL", "B")];
    let query = Query::compile("  ");
    assert!(query.is_empty());
    assert!(query.evaluator().is_none());
    assert!(query.matches(&entries[0]).unwrap());
    assert_eq!(query.filter(&entries).unwrap().len(), 2);
}

#[test]
fn test_filter_propagates_errors() {
    let entries = vec![make_entry(1, "ACCT", "A")];
    assert!(Query::compile("\n").filter(&entries).is_err());
}
