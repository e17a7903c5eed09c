// Access path grammar
//
// Parses and canonicalizes node sequences such as `Argument[0]`,
// `Argument[-1].SyntheticField[p.A.foo]` or `ReturnValue.Element`.
//
// Grammar:
//   path    := anchor ('.' content)*
//   anchor  := 'Argument[' (index | '-1' | 'this') ']' | 'ReturnValue'
//   content := 'Element' | 'MapKey' | 'MapValue' | 'SyntheticField[' owner '.' name ']'

pub mod domain;
pub mod infrastructure;

pub use domain::{AccessPath, AccessPathSegment};
pub use infrastructure::{canonicalize, parse, ParseError, ParseErrorReason};
