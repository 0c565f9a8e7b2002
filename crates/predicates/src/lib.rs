//! Plug-in predicate catalogue for `tagcheck-core`.
//!
//! Every function here is a pure check over a single string (plus literal
//! parameters for the parameterized family). The engine never calls these
//! directly; it reaches them through its built-in rule tables.

pub mod formats;
pub mod iso;
pub mod network;
pub mod params;
pub mod strings;
