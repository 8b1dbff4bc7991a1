//! Declaration modifiers.

use std::fmt;

bitflags::bitflags! {
    /// Modifier set attached to fields, methods, constructors and functions.
    ///
    /// The protocol modifiers (`indexer`, `accessor`, `assigner`, `iterator`,
    /// `invoker`, `operator`) mark methods the runtime calls implicitly.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u16 {
        const PRIVATE = 1 << 0;
        const PROTECTED = 1 << 1;
        const ABSTRACT = 1 << 2;
        const NATIVE = 1 << 3;
        const FINAL = 1 << 4;
        const STATIC = 1 << 5;
        const READONLY = 1 << 6;
        const OPERATOR = 1 << 7;
        const ITERATOR = 1 << 8;
        const GET = 1 << 9;
        const SET = 1 << 10;
        const INDEXER = 1 << 11;
        const ACCESSOR = 1 << 12;
        const ASSIGNER = 1 << 13;
        const INVOKER = 1 << 14;
    }
}

const KEYWORDS: [(&str, Modifiers); 15] = [
    ("private", Modifiers::PRIVATE),
    ("protected", Modifiers::PROTECTED),
    ("abstract", Modifiers::ABSTRACT),
    ("native", Modifiers::NATIVE),
    ("final", Modifiers::FINAL),
    ("static", Modifiers::STATIC),
    ("readonly", Modifiers::READONLY),
    ("operator", Modifiers::OPERATOR),
    ("iterator", Modifiers::ITERATOR),
    ("get", Modifiers::GET),
    ("set", Modifiers::SET),
    ("indexer", Modifiers::INDEXER),
    ("accessor", Modifiers::ACCESSOR),
    ("assigner", Modifiers::ASSIGNER),
    ("invoker", Modifiers::INVOKER),
];

impl Modifiers {
    /// Modifiers permitted on fields.
    pub const FIELD_ALLOWED: Modifiers = Modifiers::PRIVATE
        .union(Modifiers::PROTECTED)
        .union(Modifiers::STATIC)
        .union(Modifiers::READONLY)
        .union(Modifiers::FINAL);

    /// Modifiers permitted on constructors.
    pub const CONSTRUCTOR_ALLOWED: Modifiers = Modifiers::PRIVATE.union(Modifiers::PROTECTED);

    /// Modifiers permitted on free functions.
    pub const FUNCTION_ALLOWED: Modifiers = Modifiers::NATIVE;

    /// Modifiers permitted on methods.
    pub const METHOD_ALLOWED: Modifiers = Modifiers::all().difference(Modifiers::READONLY);

    /// Modifiers that make a method part of an implicit call protocol.
    pub const PROTOCOL: Modifiers = Modifiers::OPERATOR
        .union(Modifiers::ITERATOR)
        .union(Modifiers::INDEXER)
        .union(Modifiers::ACCESSOR)
        .union(Modifiers::ASSIGNER)
        .union(Modifiers::INVOKER);

    /// Look up a single modifier by its keyword.
    pub fn from_keyword(word: &str) -> Option<Modifiers> {
        KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == word)
            .map(|(_, flag)| *flag)
    }

    /// Keyword for a single-flag set; `None` for empty or combined sets.
    pub fn keyword(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(_, flag)| *flag == self)
            .map(|(kw, _)| *kw)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (kw, flag) in KEYWORDS {
            if self.contains(flag) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(kw)?;
                first = false;
            }
        }
        Ok(())
    }
}
