use crate::entities::*;
use sea_orm::*;
use std::sync::Arc;

pub mod api;

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Entry {
    id: i32,
    habit_id: i32,
    date: String,
    completed: bool,
}

impl Entry {
    pub fn new(id: i32, habit_id: i32, date: String, completed: bool) -> Self {
        Self {
            id,
            habit_id,
            date,
            completed,
        }
    }

    /// Returns the ID of the entry.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Returns the ID of the habit this entry refers to.
    pub fn habit_id(&self) -> i32 {
        self.habit_id
    }

    /// Returns the calendar date of the entry in `YYYY-MM-DD` form.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns whether the habit was completed on this date.
    pub fn completed(&self) -> bool {
        self.completed
    }
}

/// Error type for EntryService operations.
#[derive(Debug, thiserror::Error)]
pub enum EntryServiceError {
    /// The backing store could not be reached or rejected the query.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sea_orm::DbErr),
}

/// Shared state for entry handlers.
#[derive(Clone)]
pub struct EntryState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

pub struct EntryService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl From<entry::Model> for Entry {
    fn from(model: entry::Model) -> Self {
        Entry::new(model.id, model.habit_id, model.date, model.completed)
    }
}

impl EntryService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> EntryService {
        EntryService { db }
    }

    /// Records a habit's completion status for a calendar date, upserting on
    /// the (habit_id, date) pair: an existing entry for that pair has its
    /// `completed` field overwritten, otherwise a new entry is created.
    ///
    /// `habit_id` is not checked against existing habits, and `date` is
    /// stored verbatim without format validation. Two racing writers for the
    /// same pair resolve as last-writer-wins.
    ///
    /// # Arguments
    ///
    /// * `habit_id` - The ID of the habit the entry refers to.
    /// * `date` - The calendar date in `YYYY-MM-DD` form.
    /// * `completed` - Whether the habit was completed on that date.
    ///
    /// # Returns
    ///
    /// A `Result` containing the post-write `Entry` if successful, or an
    /// error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn record_entry(
        &self,
        habit_id: i32,
        date: String,
        completed: bool,
    ) -> Result<Entry, EntryServiceError> {
        let existing = entry::Entity::find()
            .filter(entry::Column::HabitId.eq(habit_id))
            .filter(entry::Column::Date.eq(date.as_str()))
            .one(self.db)
            .await?;

        let written_model = match existing {
            Some(model) => {
                let mut active_model: entry::ActiveModel = model.into();
                active_model.completed = ActiveValue::Set(completed);
                active_model.update(self.db).await?
            }
            None => {
                let active_model = entry::ActiveModel {
                    habit_id: ActiveValue::Set(habit_id),
                    date: ActiveValue::Set(date),
                    completed: ActiveValue::Set(completed),
                    ..Default::default()
                };
                active_model.insert(self.db).await?
            }
        };

        Ok(Entry::from(written_model))
    }
}
