//! Runtime configuration.

/// Runtime configuration options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Heap slots reserved up front.
    pub initial_capacity: usize,
    /// Allocations between collections before the first cycle retunes it.
    pub gc_threshold: usize,
    /// Lower bound for the retuned threshold.
    pub min_gc_threshold: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1024,
            gc_threshold: 100_000,
            min_gc_threshold: 4096,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `ORB_HEAP_CAPACITY` and `ORB_GC_THRESHOLD`.
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<usize>().ok());
        if let Some(v) = parse("ORB_HEAP_CAPACITY") {
            config.initial_capacity = v;
        }
        if let Some(v) = parse("ORB_GC_THRESHOLD") {
            config.gc_threshold = v.max(1);
        }
        config
    }
}
