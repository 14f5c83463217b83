//! Oversampling rate expressed as a percentage.

use std::{fmt, num::NonZeroU32};

use crate::{Result, error::SmoteError};

const FULL_RATE: u32 = 100;

/// Percentage of synthetic points to generate per source point.
///
/// Rates of 100 or more are treated as whole multiples of 100%; anything
/// below 100 triggers the undersampling pre-pass.
///
/// # Examples
/// ```
/// use smote_core::OversamplingRate;
///
/// let rate = OversamplingRate::new(250)?;
/// assert_eq!(rate.multiplier(), 2);
/// assert!(!rate.is_undersampling());
/// assert!(OversamplingRate::new(40)?.is_undersampling());
/// # Ok::<(), smote_core::SmoteError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct OversamplingRate(NonZeroU32);

impl OversamplingRate {
    /// The 100% rate: one synthetic point per source point.
    pub const FULL: Self = Self(match NonZeroU32::new(FULL_RATE) {
        Some(rate) => rate,
        None => panic!("100 is non-zero"),
    });

    /// Validates a percentage.
    ///
    /// # Errors
    /// Returns [`SmoteError::InvalidRate`] when `percent` is zero.
    pub fn new(percent: u32) -> Result<Self> {
        NonZeroU32::new(percent)
            .map(Self)
            .ok_or(SmoteError::InvalidRate { got: percent })
    }

    /// Returns the raw percentage.
    #[must_use]
    pub fn percent(self) -> u32 {
        self.0.get()
    }

    /// Returns whether the rate is below 100%.
    #[must_use]
    pub fn is_undersampling(self) -> bool {
        self.0.get() < FULL_RATE
    }

    /// Returns the number of synthetic points per source point, `N / 100`.
    #[must_use]
    pub fn multiplier(self) -> usize {
        (self.0.get() / FULL_RATE) as usize
    }

    /// Returns `floor(percent * count / 100)`.
    #[must_use]
    pub fn scale(self, count: usize) -> usize {
        let scaled = u128::from(self.0.get()) * count as u128 / u128::from(FULL_RATE);
        usize::try_from(scaled).unwrap_or(usize::MAX)
    }
}

impl Default for OversamplingRate {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for OversamplingRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
