//! RVN Format Reference
//!
//! This module documents the RVN wire format as implemented by this library.
//!
//! # Overview
//!
//! RVN is a human-editable data-interchange format. Its concrete syntax
//! mirrors an expression sublanguage: values look like literals, compounds
//! nest freely, and comments and trailing commas keep hand-maintained files
//! diff-friendly.
//!
//! # Grammar
//!
//! ```text
//! value  := ws (int | float | bool | string | list | record | tuple | tag) ws
//! int    := '-'? ('0b' bindigits | '0x' hexdigits | decdigits)
//! float  := '-'? decdigits ('.' decdigits)?
//! bool   := 'Bool.true' | 'Bool.false'
//! string := '"' (char | escape)* '"'
//! escape := '\' ('n' | 't' | '"' | '\' | '$')
//! list   := '[' (value (',' value)* ','?)? ']'
//! record := '{' (field (',' field)* ','?)? '}'
//! field  := ws key ws ':' value
//! key    := [^ \t\n#:]+
//! tuple  := '(' (value (',' value)* ','?)? ')'
//! tag    := TagIdent (ws attr)*
//! attr   := value-without-leading-tag | '(' ws tag ws ')'
//! ws     := (' ' | '\t' | '\n' | '#' ...'\n')*
//! ```
//!
//! # Lexical rules
//!
//! Whitespace is spaces, tabs, and newlines. A `#` begins a line comment
//! running through the next newline (or end of input). Whitespace and
//! comments may appear between any two tokens.
//!
//! Digit runs accept `_` as a separator anywhere: `1_000_000`, `0xdead_beef`.
//!
//! # Numbers
//!
//! Integers carry an optional sign, then an optional radix prefix (`0b`
//! binary, `0x` hexadecimal, otherwise decimal), then a digit run. Each
//! integer decodes at the width the caller requests (8 through 128 bits,
//! signed or unsigned); a value outside that width is a decode error.
//!
//! Decimals are a sign, a decimal digit run, and an optional fraction. There
//! is no exponent notation and no infinity or NaN token; the encoder emits
//! the shortest decimal form that reads back to the same float, with a `.0`
//! suffix when there is no fractional part.
//!
//! # Strings
//!
//! Strings are `"`-delimited UTF-8 with exactly five escapes: `\n`, `\t`,
//! `\"`, `\\`, and `\$`. Any other character after a backslash is an error,
//! as is a `"""` opener (triple-quoted strings are not part of the format).
//!
//! # Compounds
//!
//! Lists (`[...]`), records (`{...}`), and tuples (`(...)`) are
//! comma-separated and tolerate a trailing comma; the encoder always emits
//! one after every element:
//!
//! ```text
//! [1,2,]
//! {name:"Alice",age:30,}
//! (4,"five",)
//! ```
//!
//! Record keys are any run of bytes other than whitespace, `#`, and `:`.
//! Empty compounds are `[]`, `{}` and `()`.
//!
//! # Tags
//!
//! A tag is a capitalized identifier followed by zero or more
//! space-separated attribute values:
//!
//! ```text
//! Rgb 0 128 255
//! Solid (Rgb 0 128 255)
//! ```
//!
//! A tag that carries attributes and sits directly inside another tag's
//! attribute list is parenthesized; everywhere else the surrounding brackets
//! or whitespace already delimit it, so no parentheses appear. Tags are
//! produced by the encoder (from Rust enums) but never consumed by the
//! decoder.
//!
//! # Pretty output
//!
//! Pretty mode guarantees:
//!
//! - a newline after the opening bracket of every non-empty compound,
//! - four spaces per nesting level,
//! - a newline after every element's trailing comma,
//! - closing brackets on their own line at the enclosing indent,
//! - no trailing whitespace on any line.
//!
//! ```text
//! {
//!     name: "Alice",
//!     scores: [
//!         1,
//!         2,
//!     ],
//! }
//! ```
//!
//! Tag attributes each go on their own line, one level deeper than the tag
//! (two levels when the tag is parenthesized).
//!
//! Both modes parse identically: inserting or removing insignificant
//! whitespace never changes the decoded value.
