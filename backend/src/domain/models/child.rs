//! backend/src/domain/models/child.rs

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Domain model representing a tracked child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: String,
}

/// A child that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChild {
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: String,
}

impl Child {
    /// Age in whole months on the given day. Never negative.
    pub fn age_in_months(&self, today: NaiveDate) -> u32 {
        age_in_months(self.birth_date, today)
    }
}

/// Whole calendar months between `birth_date` and `today`.
///
/// A month only counts once the day-of-month has been reached, so a child
/// born on Jan 31 turns one month old on Mar 1 (Feb has no 31st).
pub fn age_in_months(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    if today <= birth_date {
        return 0;
    }

    let mut months = (today.year() - birth_date.year()) * 12
        + today.month() as i32
        - birth_date.month() as i32;

    if today.day() < birth_date.day() {
        months -= 1;
    }

    months.max(0) as u32
}
