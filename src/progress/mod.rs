use crate::entities::*;
use chrono::{Days, NaiveDate};
use sea_orm::*;
use std::sync::Arc;

pub mod api;

/// Number of calendar days covered by the progress window, inclusive of the
/// as-of day.
const WINDOW_DAYS: u64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Completion percentage across all habits for a single calendar day.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct DailyProgress {
    date: String,
    percent: u8,
}

impl DailyProgress {
    pub fn new(date: String, percent: u8) -> Self {
        Self { date, percent }
    }

    /// Returns the calendar date of the data point in `YYYY-MM-DD` form.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the completion percentage for the date, in 0..=100.
    pub fn percent(&self) -> u8 {
        self.percent
    }
}

/// Error type for ProgressService operations.
#[derive(Debug, thiserror::Error)]
pub enum ProgressServiceError {
    /// The backing store could not be reached or rejected the query.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sea_orm::DbErr),
}

/// Shared state for progress handlers.
#[derive(Clone)]
pub struct ProgressState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

pub struct ProgressService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl ProgressService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> ProgressService {
        ProgressService { db }
    }

    /// Derives the completion time series for the 30 calendar days ending at
    /// `as_of`, oldest first.
    ///
    /// The habit count is fetched once up front and used as the denominator
    /// for every date in the window, including dates before a habit existed.
    /// Each date is then queried separately for its entries; no snapshot is
    /// taken, so writes landing mid-computation may be observed.
    ///
    /// # Arguments
    ///
    /// * `as_of` - The last (most recent) day of the window, inclusive.
    ///
    /// # Returns
    ///
    /// A `Result` containing exactly 30 `DailyProgress` points if successful,
    /// or an error otherwise. Any store failure fails the whole call; there
    /// are no partial results.
    #[tracing::instrument(skip(self))]
    pub async fn progress_over_window(
        &self,
        as_of: NaiveDate,
    ) -> Result<Vec<DailyProgress>, ProgressServiceError> {
        let habit_count = habit::Entity::find().count(self.db).await? as usize;

        let mut series = Vec::with_capacity(WINDOW_DAYS as usize);
        for date in window_dates(as_of) {
            let formatted = date.format(DATE_FORMAT).to_string();
            let entries = entry::Entity::find()
                .filter(entry::Column::Date.eq(formatted.as_str()))
                .all(self.db)
                .await?;
            let completed_count = entries.iter().filter(|entry| entry.completed).count();
            series.push(DailyProgress::new(
                formatted,
                completion_percent(completed_count, habit_count),
            ));
        }
        Ok(series)
    }
}

/// The 30 calendar days ending at `as_of`, oldest first. Calendar-day
/// arithmetic only, so daylight-saving transitions and locale have no effect.
fn window_dates(as_of: NaiveDate) -> Vec<NaiveDate> {
    let start = as_of - Days::new(WINDOW_DAYS - 1);
    (0..WINDOW_DAYS)
        .map(|offset| start + Days::new(offset))
        .collect()
}

/// Share of habits completed, rounded to the nearest whole percent. A store
/// with no habits reports zero rather than dividing by zero.
fn completion_percent(completed_count: usize, habit_count: usize) -> u8 {
    if habit_count == 0 {
        return 0;
    }
    (completed_count as f64 / habit_count as f64 * 100.0).round() as u8
}
