//! Static pattern tables consumed by the analysis, skill and interview modules.
//!
//! Tables are plain data; anything that needs compiling (regexes, automata)
//! is compiled lazily once per process by the module that consumes it.

pub mod language;
pub mod skills;
pub mod templates;
