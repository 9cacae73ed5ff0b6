//! This module contains the symbols and keywords used when we prettyprint
//! terms, equations and case trees.

// Symbols
//
//

/// The symbol `=>`
pub const FAT_ARROW: &str = "=>";

/// The symbol `,`
pub const COMMA: &str = ",";

/// The symbol `:`
pub const COLON: &str = ":";

/// The symbol `.`
pub const DOT: &str = ".";

/// The symbol `?`
pub const QUESTION_MARK: &str = "?";

/// The symbol `#`
pub const HASH: &str = "#";

/// The symbol `|`
pub const PIPE: &str = "|";

/// The symbol `*`, used for wildcard clauses
pub const WILDCARD: &str = "*";

/// The symbol `=`
pub const EQ: &str = "=";

/// The symbol `<=`
pub const LE: &str = "<=";

/// The symbol `>=`
pub const GE: &str = ">=";

// Keywords
//
//

/// The keyword `Type`
pub const TYPE: &str = "Type";

/// The keyword `case`
pub const CASE: &str = "case";

/// The keyword `of`
pub const OF: &str = "of";

/// The interval endpoint `0`
pub const I0: &str = "0";

/// The interval endpoint `1`
pub const I1: &str = "1";
