//! Evaluation settings shared by every evaluator a run creates.

/// Default maximum nesting of `{{template}}` invocations.
pub const DEFAULT_MAX_DEPTH: usize = 100_000;

/// Knobs for a single evaluation.
///
/// Plain `Copy` data, so a `Template` can hold one and stamp out an
/// evaluator per call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum template invocation depth; `None` disables the check.
    pub max_depth: Option<usize>,
}

impl EvalConfig {
    /// The configured limit, if a template invocation at `depth` exceeds it.
    ///
    /// The root template runs at depth 0.
    #[inline]
    pub fn exceeded_limit(self, depth: usize) -> Option<usize> {
        self.max_depth.filter(|&max| depth > max)
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

#[cfg(test)]
mod tests;
