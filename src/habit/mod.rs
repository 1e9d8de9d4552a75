use crate::entities::*;
use sea_orm::*;
use std::sync::Arc;

pub mod api;

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Habit {
    id: i32,
    title: String,
    target: i32,
}

impl Habit {
    pub fn new(id: i32, title: String, target: i32) -> Self {
        Self { id, title, target }
    }

    /// Returns the ID of the habit.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Returns the title of the habit.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the daily target count of the habit.
    pub fn target(&self) -> i32 {
        self.target
    }
}

/// Error type for HabitService operations.
#[derive(Debug, thiserror::Error)]
pub enum HabitServiceError {
    /// The backing store could not be reached or rejected the query.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sea_orm::DbErr),
}

/// Shared state for habit handlers.
#[derive(Clone)]
pub struct HabitState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

pub struct HabitService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl From<habit::Model> for Habit {
    fn from(model: habit::Model) -> Self {
        Habit::new(model.id, model.title, model.target)
    }
}

impl HabitService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> HabitService {
        HabitService { db }
    }

    /// Creates a new habit in the store.
    ///
    /// # Arguments
    ///
    /// * `title` - The free-text label of the habit. Not validated; an empty
    ///   string is accepted.
    /// * `target` - The daily target count, defaulting to 1 when absent.
    ///
    /// # Returns
    ///
    /// A `Result` containing the persisted `Habit` (including its assigned
    /// id) if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn create_habit(
        &self,
        title: String,
        target: Option<i32>,
    ) -> Result<Habit, HabitServiceError> {
        let active_model = habit::ActiveModel {
            title: ActiveValue::Set(title),
            target: ActiveValue::Set(target.unwrap_or(1)),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        Ok(Habit::from(created_model))
    }

    /// Retrieves all habits from the store, in store-native order.
    ///
    /// # Returns
    ///
    /// A `Result` containing a vector of `Habit` if successful, or an error
    /// otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn list_habits(&self) -> Result<Vec<Habit>, HabitServiceError> {
        let habits = habit::Entity::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(Habit::from)
            .collect();
        Ok(habits)
    }
}
