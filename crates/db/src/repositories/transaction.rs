//! Transaction repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use sea_orm::sea_query::Expr;

use crate::entities::transactions;

/// Transaction repository. Transactions are append-only.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including foreign key violations.
    pub async fn create(
        &self,
        person_id: i64,
        amount: i64,
        description: &str,
        created_at: DateTime<Utc>,
    ) -> Result<transactions::Model, DbErr> {
        transactions::ActiveModel {
            person_id: Set(person_id),
            amount: Set(amount),
            description: Set(description.to_string()),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    /// Finds a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<transactions::Model>, DbErr> {
        transactions::Entity::find_by_id(id).one(&self.db).await
    }

    /// Sum of a person's amounts, 0 when they have none.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn balance(&self, person_id: i64) -> Result<i64, DbErr> {
        let sum: Option<i64> = transactions::Entity::find()
            .select_only()
            .column_as(Expr::cust("COALESCE(SUM(amount), 0)"), "balance")
            .filter(transactions::Column::PersonId.eq(person_id))
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(sum.unwrap_or(0))
    }

    /// A person's transactions, newest first, within optional inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn history(
        &self,
        person_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::PersonId.eq(person_id));
        if let Some(start) = start {
            query = query.filter(transactions::Column::CreatedAt.gte(start));
        }
        if let Some(end) = end {
            query = query.filter(transactions::Column::CreatedAt.lte(end));
        }
        query
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .all(&self.db)
            .await
    }
}
