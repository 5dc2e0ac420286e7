// backend/src/domain/commands.rs

//! Domain-level command types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types, which
//! is where timestamps and dates get parsed.

pub mod child {
    use chrono::NaiveDate;

    /// Input for creating a new child.
    #[derive(Debug, Clone)]
    pub struct CreateChildCommand {
        pub name: String,
        pub birth_date: NaiveDate,
        pub gender: String,
    }

    /// Input for editing a child. `None` leaves the field unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateChildCommand {
        pub name: Option<String>,
        pub birth_date: Option<NaiveDate>,
        pub gender: Option<String>,
    }
}

pub mod sleep_record {
    use chrono::{DateTime, Utc};
    use shared::SleepQuality;

    /// Input for recording a sleep session.
    #[derive(Debug, Clone)]
    pub struct CreateSleepRecordCommand {
        pub child_id: i64,
        pub start_time: DateTime<Utc>,
        pub end_time: Option<DateTime<Utc>>,
        pub is_active: Option<bool>,
        pub quality: Option<SleepQuality>,
    }

    /// Partial update of a sleep record.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateSleepRecordCommand {
        pub end_time: Option<DateTime<Utc>>,
        pub is_active: Option<bool>,
        pub quality: Option<SleepQuality>,
    }
}
