use super::*;
use crate::ErrorCode;

#[test]
fn tracks_errors_separately_from_warnings() {
    let mut bag = DiagnosticBag::new();
    assert!(!bag.has_errors());

    bag.push(Diagnostic::warning(ErrorCode::E2019).with_message("w"));
    assert!(!bag.has_errors());
    assert_eq!(bag.len(), 1);

    bag.push(Diagnostic::error(ErrorCode::E2002).with_message("e"));
    assert!(bag.has_errors());
    assert_eq!(bag.error_count(), 1);
}

#[test]
fn extend_preserves_order() {
    let first: DiagnosticBag = [Diagnostic::error(ErrorCode::E1001)].into_iter().collect();
    let mut bag = DiagnosticBag::new();
    bag.push(Diagnostic::error(ErrorCode::E0001));
    bag.extend(first);

    let codes: Vec<_> = bag.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0001, ErrorCode::E1001]);
}
