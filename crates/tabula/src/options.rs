//! Sheet configuration

/// Which cached values a successful edit throws away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Clear the edited cell and every cell that reads it, directly or
    /// transitively
    InvalidateDependents,
    /// Clear only the edited cell. Cells that read it keep returning their
    /// previous value until they are edited themselves.
    SelfOnly,
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy::InvalidateDependents
    }
}

/// Options for a [`crate::Sheet`]
#[derive(Debug, Clone, Default)]
pub struct SheetOptions {
    /// Cache invalidation on edits (default: invalidate dependents)
    pub cache_policy: CachePolicy,
}

impl SheetOptions {
    /// Options with the given cache policy
    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }
}
