//! Tests for the filter parser.

use pretty_assertions::assert_eq;

use crate::cst::{parse, CstNode, ParseResult};
use crate::lexer::{tokenize, Span, TokenKind};
use crate::Query;

fn parse_str(input: &str) -> ParseResult {
    parse(&tokenize(input).tokens)
}

fn root(input: &str) -> CstNode {
    parse_str(input).root.expect("query should have a root")
}

fn messages(result: &ParseResult) -> Vec<&str> {
    result.errors.iter().map(|e| e.message.as_str()).collect()
}

/// Renders a tree as an s-expression of token values.
fn sexpr(node: &CstNode) -> String {
    if node.children.is_empty() {
        return node.value.clone();
    }
    let children: Vec<String> = node.children.iter().map(sexpr).collect();
    format!("({} {})", node.value, children.join(" "))
}

// ==================== Comparison Tests ====================

#[test]
fn test_parse_equality() {
    let result = parse_str("crn:=80644");
    assert!(result.errors.is_empty());

    let root = result.root.unwrap();
    assert_eq!(root.kind, TokenKind::Equals);
    assert_eq!(root.left().unwrap().kind, TokenKind::Identifier);
    assert_eq!(root.left().unwrap().value, "crn");
    assert_eq!(root.right().unwrap().kind, TokenKind::Number);
    assert_eq!(root.right().unwrap().value, "80644");
}

#[test]
fn test_parse_every_comparison() {
    for (query, kind) in [
        ("credit:<=3", TokenKind::LessThanOrEqual),
        ("credit:>=3", TokenKind::GreaterThanOrEqual),
        ("credit:>3", TokenKind::GreaterThan),
        ("credit:<3", TokenKind::LessThan),
        ("credit:=3", TokenKind::Equals),
        ("credit:3", TokenKind::FuzzyEquals),
        ("credit*3", TokenKind::Asterisk),
    ] {
        assert_eq!(root(query).kind, kind, "query: {query}");
    }
}

#[test]
fn test_parse_string_operand() {
    let root = root(r#"title:"financial accounting""#);
    assert_eq!(root.right().unwrap().kind, TokenKind::String);
    assert_eq!(root.right().unwrap().value, "financial accounting");
}

// ==================== Precedence Tests ====================

#[test]
fn test_arithmetic_binds_tighter_than_comparison() {
    assert_eq!(sexpr(&root("credit + 1:>3")), "(:> (+ credit 1) 3)");
    assert_eq!(
        sexpr(&root("capacity.total - capacity.actual:>=5")),
        "(:>= (- capacity.total capacity.actual) 5)"
    );
}

#[test]
fn test_comparison_binds_tighter_than_connectives() {
    assert_eq!(
        sexpr(&root("crn:=1 or crn:=2")),
        "(or (:= crn 1) (:= crn 2))"
    );
}

#[test]
fn test_and_or_share_a_tier_and_associate_left() {
    assert_eq!(
        sexpr(&root("selected or expanded and crn:=1")),
        "(and (or selected expanded) (:= crn 1))"
    );
}

#[test]
fn test_asterisk_ranks_with_comparisons() {
    assert_eq!(sexpr(&root("title*intro + 1")), "(* title (+ intro 1))");
}

// ==================== Not Tests ====================

#[test]
fn test_not_binds_tighter_than_connectives() {
    assert_eq!(
        sexpr(&root("not selected and expanded")),
        "(and (not selected) expanded)"
    );
}

#[test]
fn test_not_takes_a_whole_comparison() {
    assert_eq!(sexpr(&root("not crn:=1")), "(not (:= crn 1))");
}

#[test]
fn test_not_keyword_is_case_insensitive() {
    assert_eq!(root("NOT selected").kind, TokenKind::Not);
    assert_eq!(root("selected AND expanded").kind, TokenKind::And);
}

#[test]
fn test_not_without_operand() {
    let result = parse_str("not");
    assert_eq!(messages(&result), vec!["Expected expression after NOT operator"]);
    assert_eq!(result.errors[0].span, Span::new(0, 3));

    let root = result.root.unwrap();
    assert_eq!(root.kind, TokenKind::Not);
    assert!(root.children.is_empty());
}

#[test]
fn test_not_is_prefix_only() {
    let result = parse_str("selected not expanded");
    assert_eq!(messages(&result), vec!["Unexpected tokens after parsing"]);
    assert_eq!(result.errors[0].span, Span::new(9, 12));
    assert_eq!(result.root.unwrap().value, "selected");
}

// ==================== Group Tests ====================

#[test]
fn test_group_overrides_precedence() {
    let result = parse_str("(crn:=1 or crn:=2) and selected");
    assert!(result.errors.is_empty());
    assert_eq!(
        sexpr(result.root.as_ref().unwrap()),
        "(and (( (or (:= crn 1) (:= crn 2)) )) selected)"
    );
}

#[test]
fn test_group_keeps_close_node() {
    let root = root("(selected)");
    assert_eq!(root.kind, TokenKind::Open);
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[1].kind, TokenKind::Close);
    assert_eq!(root.depth, Some(1));
}

#[test]
fn test_empty_group() {
    let result = parse_str("()");
    let root = result.root.as_ref().unwrap();
    assert_eq!(root.kind, TokenKind::Open);
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].kind, TokenKind::Close);
    assert_eq!(
        messages(&result),
        vec!["Unexpected token: )", "Missing closing parenthesis"]
    );
}

#[test]
fn test_unclosed_group_is_reported_by_lexer() {
    let query = Query::compile("(selected");
    let root = query.root().unwrap();
    assert_eq!(root.children.len(), 2);

    let close = &root.children[1];
    assert_eq!(close.kind, TokenKind::Close);
    assert_eq!(close.span, Span::new(9, 9));
    assert_eq!(
        close.error.as_ref().map(|e| e.message.as_str()),
        Some("Missing closing bracket")
    );

    let diagnostics = query.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "Missing closing bracket");
}

#[test]
fn test_stray_close_is_trailing() {
    let query = Query::compile("selected)");
    let diagnostics: Vec<String> = query
        .diagnostics()
        .into_iter()
        .map(|d| d.message)
        .collect();
    assert_eq!(
        diagnostics,
        vec![
            "Unexpected closing bracket, expected (".to_string(),
            "Unexpected tokens after parsing".to_string(),
        ]
    );
}

// ==================== Recovery Tests ====================

#[test]
fn test_missing_right_operand() {
    let result = parse_str("crn:=");
    assert_eq!(messages(&result), vec!["Expected expression after operator"]);
    assert_eq!(result.errors[0].span, Span::new(3, 5));
    assert_eq!(result.root.unwrap().value, "crn");
}

#[test]
fn test_leading_operator_is_unexpected() {
    let result = parse_str("and selected");
    assert_eq!(
        messages(&result),
        vec!["Unexpected token: and", "Unexpected tokens after parsing"]
    );

    let root = result.root.unwrap();
    assert_eq!(root.kind, TokenKind::And);
    assert_eq!(
        root.error.as_ref().map(|e| e.message.as_str()),
        Some("Unexpected token: and")
    );
}

#[test]
fn test_blank_query() {
    let result = parse_str("   ");
    assert!(result.root.is_none());
    assert!(result.errors.is_empty());
}

// ==================== Identifier Tests ====================

#[test]
fn test_unknown_identifier_suggests_title() {
    let result = parse_str("ttle:intro");
    assert_eq!(
        result.errors[0].message,
        "Unknown identifier: \"ttle\". Did you mean: title?"
    );
    assert_eq!(result.errors[0].span, Span::new(0, 4));

    let left = result.root.as_ref().unwrap().left().unwrap();
    assert_eq!(left.error.as_ref(), Some(&result.errors[0]));
}

#[test]
fn test_unknown_identifier_without_suggestion() {
    let result = parse_str("subject:ACCT");
    assert_eq!(messages(&result), vec!["Unknown identifier: \"ACCT\""]);
    assert_eq!(sexpr(result.root.as_ref().unwrap()), "(: subject ACCT)");
}

#[test]
fn test_known_identifiers_are_clean() {
    for (path, _) in crate::vocabulary::IDENTIFIERS {
        let result = parse_str(&format!("{path}:=1"));
        assert!(result.errors.is_empty(), "path: {path}");
    }
}

#[test]
fn test_errors_keep_partial_tree() {
    let result = parse_str("crn:=1 and ttle:x");
    assert_eq!(result.errors.len(), 2);
    assert_eq!(
        sexpr(result.root.as_ref().unwrap()),
        "(and (:= crn 1) (: ttle x))"
    );
}
