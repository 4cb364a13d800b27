//! # Pricing State
//!
//! Markup bounds in effect for this session. Seeded from the `[pricing]`
//! config section; the operator may replace them at runtime.

use std::sync::{Arc, PoisonError, RwLock};

use mostrador_core::{CoreResult, MarkupConfig};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct PricingState {
    config: Arc<RwLock<MarkupConfig>>,
}

impl PricingState {
    pub fn new(config: MarkupConfig) -> Self {
        PricingState {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Current bounds.
    pub fn get(&self) -> MarkupConfig {
        *self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the bounds after validating them.
    ///
    /// ## Errors
    /// [`mostrador_core::CoreError::InvalidInput`] when a bound is not
    /// positive or `min_markup > max_markup`. The old bounds stay.
    pub fn set(&self, next: MarkupConfig) -> CoreResult<MarkupConfig> {
        next.validate()?;
        let mut current = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *current, next);
        info!(
            min_markup = %next.min_markup,
            max_markup = %next.max_markup,
            min_floating = %next.min_floating,
            "Markup bounds updated"
        );
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_set_validates() {
        let state = PricingState::default();
        let inverted = MarkupConfig {
            min_markup: dec!(3),
            max_markup: dec!(2),
            min_floating: dec!(1.4),
        };
        assert!(state.set(inverted).is_err());
        assert_eq!(state.get(), MarkupConfig::default());

        let wider = MarkupConfig {
            max_markup: dec!(4),
            ..MarkupConfig::default()
        };
        let previous = state.set(wider).unwrap();
        assert_eq!(previous, MarkupConfig::default());
        assert_eq!(state.get().max_markup, dec!(4));
    }
}
