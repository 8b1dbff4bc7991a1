use pretty_assertions::assert_eq;

use super::*;

const COMPARISONS: [BinaryOp; 6] = [
    BinaryOp::Lt,
    BinaryOp::Gt,
    BinaryOp::LtEq,
    BinaryOp::GtEq,
    BinaryOp::Eq,
    BinaryOp::NotEq,
];

#[test]
fn comparisons_share_compare() {
    for op in COMPARISONS {
        assert!(op.is_comparison());
        assert_eq!(op.method_name(), "compare");
    }
    assert!(!BinaryOp::Add.is_comparison());
}

#[test]
fn compare_holds_matches_ordering() {
    let table = [
        (BinaryOp::Lt, [true, false, false]),
        (BinaryOp::Gt, [false, false, true]),
        (BinaryOp::LtEq, [true, true, false]),
        (BinaryOp::GtEq, [false, true, true]),
        (BinaryOp::Eq, [false, true, false]),
        (BinaryOp::NotEq, [true, false, true]),
    ];
    for (op, expected) in table {
        let got = [op.compare_holds(-1), op.compare_holds(0), op.compare_holds(1)];
        assert_eq!(got, expected, "{op}");
    }
}

#[test]
fn only_symmetric_operators_swap() {
    assert!(BinaryOp::Add.is_bidirectional());
    assert!(BinaryOp::Mul.is_bidirectional());
    assert!(BinaryOp::Eq.is_bidirectional());
    assert!(BinaryOp::NotEq.is_bidirectional());
    assert!(!BinaryOp::Sub.is_bidirectional());
    assert!(!BinaryOp::Div.is_bidirectional());
    assert!(!BinaryOp::Lt.is_bidirectional());
}

#[test]
fn compound_assignment_desugars() {
    assert_eq!(AssignOp::Set.binary(), None);
    assert_eq!(AssignOp::IntDiv.binary(), Some(BinaryOp::IntDiv));
    assert_eq!(AssignOp::Pow.binary().map(BinaryOp::method_name), Some("power"));
}

#[test]
fn method_name_tables_are_complete() {
    for name in [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Pow,
        BinaryOp::IntDiv,
        BinaryOp::Eq,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::Range,
    ]
    .map(BinaryOp::method_name)
    {
        assert!(BinaryOp::METHOD_NAMES.contains(&name), "{name}");
    }
    for op in [UnaryOp::Plus, UnaryOp::Neg, UnaryOp::Not] {
        assert!(UnaryOp::METHOD_NAMES.contains(&op.method_name()));
    }
}
