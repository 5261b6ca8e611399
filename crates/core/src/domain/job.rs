// Job Domain Model

use super::error::{DomainError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Job ID (assigned by the register, starting at 1)
pub type JobId = u64;

/// Fields supplied by the caller when a job is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    pub name: String,
    pub details: String,
    pub price: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub paid: bool,
}

/// Partial edit of a job's mutable fields (`None` = leave unchanged)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobUpdate {
    pub name: Option<String>,
    pub details: Option<String>,
    pub price: Option<f64>,
    pub date: Option<NaiveDate>,
    pub completed: Option<bool>,
    pub paid: Option<bool>,
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.details.is_none()
            && self.price.is_none()
            && self.date.is_none()
            && self.completed.is_none()
            && self.paid.is_none()
    }
}

/// Job Entity
///
/// The `id` is fixed at construction; every other field can be changed
/// through its setter or [`Job::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    name: String,
    details: String,
    price: f64,
    date: NaiveDate,
    completed: bool,
    paid: bool,
}

impl Job {
    /// Create a new Job
    ///
    /// # Arguments
    ///
    /// * `id` - Unique job ID (allocated by the register or restored from a file)
    /// * `name` - Client name
    /// * `details` - Description of the work
    /// * `price` - Agreed price
    /// * `date` - Calendar date of the job
    /// * `completed` - Whether the work is done
    /// * `paid` - Whether the client has paid
    pub fn new(
        id: JobId,
        name: impl Into<String>,
        details: impl Into<String>,
        price: f64,
        date: NaiveDate,
        completed: bool,
        paid: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            details: details.into(),
            price,
            date,
            completed,
            paid,
        }
    }

    pub(crate) fn from_new(id: JobId, new: NewJob) -> Self {
        Self::new(
            id,
            new.name,
            new.details,
            new.price,
            new.date,
            new.completed,
            new.paid,
        )
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_details(&mut self, details: impl Into<String>) {
        self.details = details.into();
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub fn set_paid(&mut self, paid: bool) {
        self.paid = paid;
    }

    /// Apply every `Some` field of the update, leaving the rest untouched
    pub fn apply(&mut self, update: &JobUpdate) {
        if let Some(name) = &update.name {
            self.set_name(name.as_str());
        }
        if let Some(details) = &update.details {
            self.set_details(details.as_str());
        }
        if let Some(price) = update.price {
            self.set_price(price);
        }
        if let Some(date) = update.date {
            self.set_date(date);
        }
        if let Some(completed) = update.completed {
            self.set_completed(completed);
        }
        if let Some(paid) = update.paid {
            self.set_paid(paid);
        }
    }

    /// Check that the job can be written to a flat file.
    /// NaN and infinite prices have no textual form that reads back.
    pub fn ensure_persistable(&self) -> Result<()> {
        if !self.price.is_finite() {
            return Err(DomainError::NonFinitePrice {
                id: self.id,
                price: self.price,
            });
        }
        Ok(())
    }
}
