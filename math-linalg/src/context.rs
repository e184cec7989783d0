//! Compute context: the active provider and parallelism budget
//!
//! A [`ComputeContext`] is an immutable `Copy` value. Arithmetic either takes
//! one explicitly (`*_with` methods) or uses [`ComputeContext::default`], the
//! native provider with a budget equal to the logical core count.
//! Reconfiguring means building a new context, so in-flight operations never
//! observe a change.

use crate::dispatch::DispatchPolicy;
use crate::error::{LinalgError, NotSupportedReason, Result};
use crate::parallel::{is_parallel_available, logical_cores};
use crate::provider::{Provider, ProviderKind, is_available};
use serde::{Deserialize, Serialize};

/// Serializable compute settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeConfig {
    /// Requested backend
    pub provider: ProviderKind,
    /// Parallelism budget; `None` uses the logical core count
    pub max_parallelism: Option<usize>,
}

/// Immutable selection of provider and dispatch policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputeContext {
    provider: Provider,
    policy: DispatchPolicy,
}

impl ComputeContext {
    /// Native provider with the default budget
    pub fn new() -> Self {
        Self::from_parts(ProviderKind::Native, DispatchPolicy::default())
    }

    /// Native provider that never parallelizes
    pub fn sequential() -> Self {
        Self::from_parts(ProviderKind::Native, DispatchPolicy::sequential())
    }

    fn from_parts(kind: ProviderKind, policy: DispatchPolicy) -> Self {
        Self {
            provider: Provider::new(kind, policy),
            policy,
        }
    }

    /// Switch to `kind`, failing with `NotSupported(Backend)` if it cannot run here.
    pub fn with_provider(self, kind: ProviderKind) -> Result<Self> {
        if !is_available(kind) {
            return Err(LinalgError::NotSupported(NotSupportedReason::Backend(kind)));
        }
        Ok(Self::from_parts(kind, self.policy))
    }

    /// Switch to `kind`, keeping the native provider if it is unavailable.
    pub fn resolve(self, kind: ProviderKind) -> Self {
        match self.with_provider(kind) {
            Ok(context) => context,
            Err(_) => {
                log::warn!(
                    "{} provider is not available, using {}",
                    kind,
                    ProviderKind::Native
                );
                Self::from_parts(ProviderKind::Native, self.policy)
            }
        }
    }

    /// Same provider, budget clamped to `1..=1024`
    pub fn with_max_parallelism(self, max_parallelism: usize) -> Self {
        Self::from_parts(self.kind(), DispatchPolicy::new(max_parallelism))
    }

    /// Build from settings, falling back to native for unavailable backends
    pub fn from_config(config: &ComputeConfig) -> Self {
        Self::from_parts(ProviderKind::Native, Self::policy_for(config)).resolve(config.provider)
    }

    /// Build from settings, failing for unavailable backends
    pub fn try_from_config(config: &ComputeConfig) -> Result<Self> {
        Self::from_parts(ProviderKind::Native, Self::policy_for(config))
            .with_provider(config.provider)
    }

    fn policy_for(config: &ComputeConfig) -> DispatchPolicy {
        config
            .max_parallelism
            .map(DispatchPolicy::new)
            .unwrap_or_default()
    }

    /// Settings that rebuild this context
    pub fn to_config(&self) -> ComputeConfig {
        ComputeConfig {
            provider: self.kind(),
            max_parallelism: Some(self.max_parallelism()),
        }
    }

    /// The active provider
    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Tag of the active provider
    pub fn kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    /// The dispatch policy
    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// The clamped parallelism budget
    pub fn max_parallelism(&self) -> usize {
        self.policy.max_parallelism()
    }

    /// One-line summary of the runtime environment
    pub fn describe(&self) -> String {
        format!(
            "math-linalg {} | provider: {} | max parallelism: {} (cores: {}, rayon: {}) | {}-{}",
            env!("CARGO_PKG_VERSION"),
            self.kind(),
            self.max_parallelism(),
            logical_cores(),
            if is_parallel_available() { "on" } else { "off" },
            std::env::consts::OS,
            std::env::consts::ARCH,
        )
    }
}

impl Default for ComputeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ComputeConfig> for ComputeContext {
    fn from(config: ComputeConfig) -> Self {
        Self::from_config(&config)
    }
}
