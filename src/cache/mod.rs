/// Upstream caches shared by all request handlers.
///
/// - `alerts`    — live alert feed, 5-minute TTL, serves stale on failure.
/// - `reference` — county boundaries, loaded once, never expires.
///
/// Both are constructed once in `main` and handed to the endpoint behind an
/// `Arc`. Each entry is replaced as a whole under a write lock, so readers
/// never see a payload paired with another fetch's timestamp.

pub mod alerts;
pub mod reference;

pub use alerts::{AlertCache, AlertSnapshot, ALERT_CACHE_TTL_MS};
pub use reference::ReferenceDataCache;
