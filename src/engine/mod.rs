//! Pure string transformations over already-parsed transactions.
//!
//! Every function here is total: malformed input degrades to a best-effort
//! result instead of failing.

pub mod normalizer;
pub mod origin;
pub mod title;

pub use normalizer::{normalize, Label, PathNormalizer, RewriteRule, RuleSet};
pub use origin::extract_origin;
pub use title::extract_title;
