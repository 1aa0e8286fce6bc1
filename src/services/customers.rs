use crate::{
    db::DbPool,
    entities::{customer, sales_order},
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::instrument;

/// Service for managing customers
pub struct CustomerService {
    db_pool: Arc<DbPool>,
}

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: Option<String>,
}

/// Partial update; omitted fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CustomerPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

impl CustomerService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists all customers, newest first
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<customer::Model>, ServiceError> {
        let db = &*self.db_pool;
        let customers = customer::Entity::find()
            .order_by_desc(customer::Column::CreatedAt)
            .all(db)
            .await?;

        Ok(customers)
    }

    /// Gets a customer by ID
    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: i32) -> Result<Option<customer::Model>, ServiceError> {
        let db = &*self.db_pool;
        let found = customer::Entity::find_by_id(id).one(db).await?;

        Ok(found)
    }

    /// Creates a new customer
    #[instrument(skip(self))]
    pub async fn create_customer(&self, input: NewCustomer) -> Result<customer::Model, ServiceError> {
        let db = &*self.db_pool;
        let created = customer::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(created)
    }

    /// Applies a partial update; omitted fields retain their prior value
    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: i32,
        patch: CustomerPatch,
    ) -> Result<customer::Model, ServiceError> {
        let db = &*self.db_pool;

        let Some(existing) = customer::Entity::find_by_id(id).one(db).await? else {
            return Err(ServiceError::NotFound(format!(
                "Customer with id {} not found",
                id
            )));
        };

        if patch.is_empty() {
            return Ok(existing);
        }

        let mut active: customer::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(email) = patch.email {
            active.email = Set(Some(email));
        }

        let updated = active.update(db).await?;
        Ok(updated)
    }

    /// Deletes a customer unless sales orders still reference them.
    ///
    /// Same check-then-delete transaction shape as the supplier guard, with
    /// the RESTRICT constraint as the backstop.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db_pool.begin().await?;

        let dependents = sales_order::Entity::find()
            .filter(sales_order::Column::CustomerId.eq(id))
            .count(&txn)
            .await?;

        if dependents > 0 {
            txn.rollback().await?;
            return Err(ServiceError::InvalidOperation(
                "Cannot delete customer with existing sales. Consider anonymizing instead."
                    .to_string(),
            ));
        }

        let result = customer::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ServiceError::NotFound(format!(
                "Customer with id {} not found",
                id
            )));
        }

        txn.commit().await?;
        Ok(())
    }
}
