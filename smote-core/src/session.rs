//! Caller-owned working data for repeated oversampling runs.

use rand::{SeedableRng, rngs::SmallRng};

use crate::{Result, result::SyntheticSample, sample::Sample, smote::smote};

/// Holds a working [`Sample`] and the random generator used to oversample it.
///
/// Each session owns its state; nothing is shared between sessions, so two
/// independent requests never observe each other's data.
///
/// # Examples
/// ```
/// use smote_core::{Sample, Session};
///
/// let sample = Sample::try_new((0..6).map(|i| vec![f64::from(i), 1.0]).collect())?;
/// let mut session = Session::with_seed(sample, 42);
/// let synthetic = session.smote(6, 200, 2)?;
/// assert_eq!(synthetic.len(), 12);
///
/// let replacement = Sample::try_new(vec![vec![0.0], vec![1.0], vec![2.0]])?;
/// let dimension = session.set_working_data(replacement).working_data().dimension();
/// assert_eq!(dimension, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    working_data: Sample,
    rng: SmallRng,
}

impl Session {
    /// Creates a session whose generator is seeded from system entropy.
    #[must_use]
    pub fn new(working_data: Sample) -> Self {
        Self {
            working_data,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a session with a reproducible generator.
    #[must_use]
    pub fn with_seed(working_data: Sample, seed: u64) -> Self {
        Self {
            working_data,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Replaces the working data, keeping the generator state.
    pub fn set_working_data(&mut self, working_data: Sample) -> &mut Self {
        self.working_data = working_data;
        self
    }

    /// Returns the current working data.
    #[must_use]
    pub fn working_data(&self) -> &Sample {
        &self.working_data
    }

    /// Runs SMOTE over the working data with explicit parameters.
    ///
    /// # Errors
    /// See [`crate::smote()`].
    pub fn smote(&mut self, count: usize, rate: u32, k: usize) -> Result<SyntheticSample> {
        smote(&self.working_data, count, rate, k, &mut self.rng)
    }
}
