//! Person repository for database operations.

use chrono::{DateTime, Utc};
use debtbook_shared::types::PageRequest;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Set, Statement,
};

use crate::entities::people;

/// A person row with aggregated transaction figures.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct PersonUsageRow {
    /// Person id.
    pub id: i64,
    /// Person name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Number of transactions.
    pub transaction_count: i64,
    /// Sum of amounts in minor units.
    pub balance: i64,
}

const USAGE_SQL: &str = r"
SELECT
    p.id,
    p.name,
    p.created_at,
    COUNT(t.id) AS transaction_count,
    COALESCE(SUM(t.amount), 0) AS balance
FROM people p
LEFT JOIN transactions t ON t.person_id = p.id
GROUP BY p.id
";

/// Person repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PersonRepository {
    db: DatabaseConnection,
}

impl PersonRepository {
    /// Creates a new person repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a person.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including unique violations.
    pub async fn create(
        &self,
        name: &str,
        created_at: DateTime<Utc>,
    ) -> Result<people::Model, DbErr> {
        people::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    /// Finds a person by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<people::Model>, DbErr> {
        people::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a person by exact (case-sensitive) name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<people::Model>, DbErr> {
        people::Entity::find()
            .filter(people::Column::Name.eq(name))
            .one(&self.db)
            .await
    }

    /// Renames a person. Returns `false` when no row has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails, including unique violations.
    pub async fn rename(&self, id: i64, name: &str) -> Result<bool, DbErr> {
        let result = people::Entity::update_many()
            .col_expr(people::Column::Name, Expr::value(name))
            .filter(people::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Deletes a person; their transactions go with them.
    ///
    /// Returns the number of deleted people (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete(&self, id: i64) -> Result<u64, DbErr> {
        let result = people::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    /// Lists people, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: Option<PageRequest>) -> Result<Vec<people::Model>, DbErr> {
        let mut query = people::Entity::find()
            .order_by_desc(people::Column::CreatedAt)
            .order_by_desc(people::Column::Id);
        if let Some(page) = page {
            query = query.limit(page.limit).offset(page.offset);
        }
        query.all(&self.db).await
    }

    /// Every person with transaction count and balance, unordered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_with_usage(&self) -> Result<Vec<PersonUsageRow>, DbErr> {
        PersonUsageRow::find_by_statement(Statement::from_string(DbBackend::Sqlite, USAGE_SQL))
            .all(&self.db)
            .await
    }

    /// Names of the most recently created people.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent_names(&self, limit: u64) -> Result<Vec<String>, DbErr> {
        people::Entity::find()
            .select_only()
            .column(people::Column::Name)
            .order_by_desc(people::Column::CreatedAt)
            .order_by_desc(people::Column::Id)
            .limit(limit)
            .into_tuple::<String>()
            .all(&self.db)
            .await
    }
}
