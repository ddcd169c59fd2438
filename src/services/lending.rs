//! Loan period rules

use chrono::{DateTime, Duration, Utc};
use config::ConfigError;

use crate::{config::LendingConfig, models::book::BookDto};

#[derive(Debug, Clone, Copy)]
pub struct LendingPolicy {
    loan_period: Duration,
}

impl LendingPolicy {
    pub fn new(loan_period: Duration) -> Self {
        Self { loan_period }
    }

    /// A book is expired once it has been held longer than the loan period
    pub fn is_expired(&self, taken_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        taken_at
            .and_then(|taken| taken.checked_add_signed(self.loan_period))
            .map(|due| due < now)
            .unwrap_or(false)
    }

    pub fn apply(&self, mut book: BookDto, now: DateTime<Utc>) -> BookDto {
        book.expired = self.is_expired(book.taken_at, now);
        book
    }
}

impl TryFrom<&LendingConfig> for LendingPolicy {
    type Error = ConfigError;

    fn try_from(config: &LendingConfig) -> Result<Self, Self::Error> {
        Ok(Self::new(config.loan_period()?))
    }
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self::new(Duration::days(10))
    }
}
