//! Bounded attempt counter shared by one search.

use thiserror::Error;

/// Default number of load attempts one search may make
pub const MAX_FILES_TO_CHECK: usize = 100;

/// Returned when a search asks for an attempt past its ceiling
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Search budget of {ceiling} attempts exhausted")]
pub struct BudgetExhausted {
    pub ceiling: usize,
}

/// Counts verification attempts against a fixed ceiling.
///
/// One budget covers a whole search: the candidate loop and every archive
/// entry loop below it draw from the same `&mut` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBudget {
    ceiling: usize,
    attempts: usize,
}

impl SearchBudget {
    #[must_use]
    pub fn new(ceiling: usize) -> Self {
        Self {
            ceiling,
            attempts: 0,
        }
    }

    /// Record one attempt, or fail if the ceiling is already reached
    ///
    /// # Errors
    ///
    /// Returns `BudgetExhausted` once `ceiling` attempts have been made.
    pub fn try_consume(&mut self) -> Result<(), BudgetExhausted> {
        if self.attempts >= self.ceiling {
            return Err(BudgetExhausted {
                ceiling: self.ceiling,
            });
        }
        self.attempts += 1;
        Ok(())
    }

    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    #[must_use]
    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.ceiling.saturating_sub(self.attempts)
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.ceiling
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::new(MAX_FILES_TO_CHECK)
    }
}
