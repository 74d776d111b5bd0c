//! User settings repository.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};

use crate::entities::user_settings;

/// Language used when a user never chose one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Repository for per-user preferences.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    db: DatabaseConnection,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The stored language, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn language(&self, user_id: i64) -> Result<Option<String>, DbErr> {
        let row = user_settings::Entity::find_by_id(user_id).one(&self.db).await?;
        Ok(row.map(|r| r.language))
    }

    /// Inserts or replaces a user's language.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub async fn set_language(
        &self,
        user_id: i64,
        language: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let model = user_settings::ActiveModel {
            user_id: Set(user_id),
            language: Set(language.to_string()),
            updated_at: Set(updated_at),
        };
        user_settings::Entity::insert(model)
            .on_conflict(
                OnConflict::column(user_settings::Column::UserId)
                    .update_columns([
                        user_settings::Column::Language,
                        user_settings::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
