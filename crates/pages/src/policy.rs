//! Decides which episode pages are generated ahead of time and how requests
//! outside that set are handled.

/// How a page that was not generated ahead of time gets built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPolicy {
    /// Only pre-rendered pages exist; anything else is a 404.
    Prebuilt,
    /// The first request builds the page and waits for the result, so the
    /// visitor never sees a loading state or a spurious 404.
    OnDemandBlocking,
    /// Respond immediately with a not-ready marker and build in the
    /// background; the client polls until the page exists.
    OnDemandClientRendered,
}

/// The set of pages to build before the server starts taking requests,
/// plus the policy for everything outside that set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathManifest {
    pub prerender: Vec<String>,
    pub fallback: GenerationPolicy,
}

impl PathManifest {
    /// The manifest for episode pages: nothing is built ahead of time and
    /// every page renders on demand, blocking its first request. Episodes
    /// are long-lived once built, so enumerating the whole catalog up front
    /// buys nothing over building each page when it is first visited.
    pub fn episodes() -> PathManifest {
        PathManifest {
            prerender: Vec::new(),
            fallback: GenerationPolicy::OnDemandBlocking,
        }
    }
}
