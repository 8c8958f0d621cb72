//! Well-known state keys.

/// Identifier of the listening window, persisted across restarts.
pub const LISTENING_WINDOW_ID: &str = "listeningWindowId";

/// Whether the active-tab monitor is doing any work.
pub const EXTENSION_ACTIVE: &str = "extensionActive";

/// Per-URL research cache (URL string -> research text).
pub const ANALYZED_URLS_CACHE: &str = "analyzedUrlsCache";
