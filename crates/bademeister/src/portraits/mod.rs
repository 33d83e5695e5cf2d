//! Best-effort player portraits looked up on Wikipedia and memoized per name.
//!
//! A lookup never fails from the caller's point of view: either an image URL
//! comes back or `None` does, and the avatar falls back to initials.

pub mod avatar;
pub mod cache;
pub mod candidates;
pub mod resolver;
pub mod source;
pub mod wikipedia;

pub use avatar::{initials, Avatar};
pub use cache::{CacheEntry, PortraitCache, NEGATIVE_SENTINEL};
pub use candidates::{candidates_for, Candidate, Locale};
pub use resolver::PortraitResolver;
pub use source::{PageSummary, PortraitSource, PortraitSourceError, Thumbnail};
pub use wikipedia::WikipediaSummaryClient;
