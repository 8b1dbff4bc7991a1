//! Error codes for all diagnostics.
//!
//! Format: E#### where the first digit names the phase:
//! - E0xxx: lexer
//! - E1xxx: parser
//! - E2xxx: symbol registration and checking
//! - E6xxx: runtime faults

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Unterminated interpolation
    E0004,
    /// Invalid escape sequence
    E0005,

    // Parser
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Expected type
    E1003,
    /// Duplicate modifier
    E1004,

    // Checker
    /// Unknown type
    E2001,
    /// Unknown variable
    E2002,
    /// Unknown member
    E2003,
    /// Duplicate declaration
    E2004,
    /// Operator not applicable to operand types
    E2005,
    /// No overload accepts the arguments
    E2006,
    /// Modifier not allowed or conflicting
    E2007,
    /// Protocol method has the wrong shape
    E2008,
    /// Invalid parameter list
    E2009,
    /// Type mismatch
    E2010,
    /// Missing or unexpected return value
    E2011,
    /// Body present where forbidden, or missing where required
    E2012,
    /// `this` outside an instance context
    E2013,
    /// Private member accessed from outside its class
    E2014,
    /// Value is not indexable
    E2015,
    /// Value is not callable
    E2016,
    /// Value is not iterable
    E2017,
    /// Invalid assignment target
    E2018,
    /// Expression statement has no effect
    E2019,
    /// Assignment to readonly field
    E2020,
    /// Wrong number of type arguments
    E2021,
    /// Invalid native signature
    E2022,
    /// Unknown function
    E2023,
    /// Modifier accepted but without effect (warning)
    E2024,

    // Runtime
    /// Division by zero
    E6001,
    /// Index out of bounds
    E6002,
    /// Unknown variable at run time
    E6003,
    /// Unknown member at run time
    E6004,
    /// No overload accepts the runtime arguments
    E6005,
    /// Operator not applicable at run time
    E6006,
    /// Value is not callable at run time
    E6007,
    /// Value is not iterable at run time
    E6008,
    /// Native symbol has no registered implementation
    E6009,
    /// Member access on null
    E6010,
    /// Call depth limit exceeded
    E6011,
    /// Invalid argument to a native function
    E6012,
    /// Instance method called without a receiver
    E6013,
    /// Value has the wrong runtime type
    E6014,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E2014 => "E2014",
            ErrorCode::E2015 => "E2015",
            ErrorCode::E2016 => "E2016",
            ErrorCode::E2017 => "E2017",
            ErrorCode::E2018 => "E2018",
            ErrorCode::E2019 => "E2019",
            ErrorCode::E2020 => "E2020",
            ErrorCode::E2021 => "E2021",
            ErrorCode::E2022 => "E2022",
            ErrorCode::E2023 => "E2023",
            ErrorCode::E2024 => "E2024",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
            ErrorCode::E6013 => "E6013",
            ErrorCode::E6014 => "E6014",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
