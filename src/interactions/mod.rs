//! Local drug-pair interaction checks.
//!
//! A fixed rule table, a pair classifier that matches names by
//! case-insensitive substring containment, and a pairwise scanner over a
//! regimen. Everything here is pure and allocation-light; results are
//! recomputed from scratch on every call.

pub mod classify;
pub mod rules;
pub mod scan;

pub use classify::*;
pub use rules::*;
pub use scan::*;
