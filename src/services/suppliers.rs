use crate::{
    db::DbPool,
    entities::{product, supplier},
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::instrument;

/// Service for managing suppliers
pub struct SupplierService {
    db_pool: Arc<DbPool>,
}

#[derive(Debug, Clone)]
pub struct NewSupplier {
    pub name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

/// Partial update; omitted fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl SupplierPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.contact_email.is_none() && self.contact_phone.is_none()
    }
}

impl SupplierService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists all suppliers ordered by name
    #[instrument(skip(self))]
    pub async fn list_suppliers(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        let db = &*self.db_pool;
        let suppliers = supplier::Entity::find()
            .order_by_asc(supplier::Column::Name)
            .all(db)
            .await?;

        Ok(suppliers)
    }

    /// Gets a supplier by ID
    #[instrument(skip(self))]
    pub async fn get_supplier(&self, id: i32) -> Result<Option<supplier::Model>, ServiceError> {
        let db = &*self.db_pool;
        let found = supplier::Entity::find_by_id(id).one(db).await?;

        Ok(found)
    }

    /// Creates a new supplier
    #[instrument(skip(self))]
    pub async fn create_supplier(&self, input: NewSupplier) -> Result<supplier::Model, ServiceError> {
        let db = &*self.db_pool;
        let created = supplier::ActiveModel {
            name: Set(input.name),
            contact_email: Set(input.contact_email),
            contact_phone: Set(input.contact_phone),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(created)
    }

    /// Applies a partial update; omitted fields retain their prior value
    #[instrument(skip(self))]
    pub async fn update_supplier(
        &self,
        id: i32,
        patch: SupplierPatch,
    ) -> Result<supplier::Model, ServiceError> {
        let db = &*self.db_pool;

        let Some(existing) = supplier::Entity::find_by_id(id).one(db).await? else {
            return Err(ServiceError::NotFound(format!(
                "Supplier with id {} not found",
                id
            )));
        };

        if patch.is_empty() {
            return Ok(existing);
        }

        let mut active: supplier::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(contact_email) = patch.contact_email {
            active.contact_email = Set(Some(contact_email));
        }
        if let Some(contact_phone) = patch.contact_phone {
            active.contact_phone = Set(Some(contact_phone));
        }

        let updated = active.update(db).await?;
        Ok(updated)
    }

    /// Deletes a supplier unless products still reference it.
    ///
    /// The dependency check and the delete run inside one transaction; the
    /// schema's RESTRICT constraint backstops the window between the two
    /// statements under concurrent writers.
    #[instrument(skip(self))]
    pub async fn delete_supplier(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db_pool.begin().await?;

        let dependents = product::Entity::find()
            .filter(product::Column::SupplierId.eq(id))
            .count(&txn)
            .await?;

        if dependents > 0 {
            txn.rollback().await?;
            return Err(ServiceError::InvalidOperation(
                "Cannot delete supplier with existing products. Reassign or remove products first."
                    .to_string(),
            ));
        }

        let result = supplier::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ServiceError::NotFound(format!(
                "Supplier with id {} not found",
                id
            )));
        }

        txn.commit().await?;
        Ok(())
    }
}
