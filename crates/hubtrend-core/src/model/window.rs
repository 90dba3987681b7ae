use crate::errors::{Result, TrendError};
use serde::{Deserialize, Serialize};

/// Lookback used when the caller does not pick one
pub const DEFAULT_DAYS: u32 = 7;

/// Per-generation cap used by the truncating variant of the analysis
pub const DEFAULT_TOP_N: usize = 100;

/// Analysis configuration for one delta computation
///
/// Constructed through [`DeltaWindow::new`] so that out-of-range values are
/// rejected before any history is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaWindow {
    days: u32,
    max_age_months: Option<u32>,
    top_n_per_generation: Option<usize>,
}

impl DeltaWindow {
    /// # Errors
    ///
    /// `InvalidWindow` if `days` is zero.
    pub fn new(days: u32) -> Result<Self> {
        if days == 0 {
            return Err(TrendError::InvalidWindow {
                field: "days".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(Self {
            days,
            max_age_months: None,
            top_n_per_generation: None,
        })
    }

    /// Bound results to items modified within `months` × 30 days of the
    /// latest generation. Zero disables the bound.
    pub fn with_max_age_months(mut self, months: u32) -> Self {
        self.max_age_months = Some(months);
        self
    }

    /// Only the `cap` most-downloaded records of each generation take part.
    ///
    /// # Errors
    ///
    /// `InvalidWindow` if `cap` is zero.
    pub fn with_top_n(mut self, cap: usize) -> Result<Self> {
        if cap == 0 {
            return Err(TrendError::InvalidWindow {
                field: "top_n_per_generation".into(),
                reason: "must be at least 1".into(),
            });
        }
        self.top_n_per_generation = Some(cap);
        Ok(self)
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn max_age_months(&self) -> Option<u32> {
        self.max_age_months
    }

    /// The recency bound in months, or `None` when the filter is disabled.
    pub fn recency_months(&self) -> Option<u32> {
        self.max_age_months.filter(|months| *months > 0)
    }

    pub fn top_n_per_generation(&self) -> Option<usize> {
        self.top_n_per_generation
    }
}

impl Default for DeltaWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            max_age_months: None,
            top_n_per_generation: None,
        }
    }
}
