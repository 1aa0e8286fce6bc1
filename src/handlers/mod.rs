pub mod common;
pub mod customers;
pub mod health;
pub mod inventory;
pub mod products;
pub mod reports;
pub mod sales;
pub mod suppliers;

use crate::db::DbPool;
use crate::procedures::StoredProcedures;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<crate::services::products::ProductService>,
    pub suppliers: Arc<crate::services::suppliers::SupplierService>,
    pub customers: Arc<crate::services::customers::CustomerService>,
    pub sales: Arc<crate::services::sales::SaleService>,
    pub inventory: Arc<crate::services::inventory::InventoryService>,
    pub reports: Arc<crate::services::reports::ReportService>,
}

impl AppServices {
    /// Build the service container from the shared pool and procedure gateway.
    pub fn new(db_pool: Arc<DbPool>, procedures: Arc<dyn StoredProcedures>) -> Self {
        let products = Arc::new(crate::services::products::ProductService::new(
            db_pool.clone(),
        ));
        let suppliers = Arc::new(crate::services::suppliers::SupplierService::new(
            db_pool.clone(),
        ));
        let customers = Arc::new(crate::services::customers::CustomerService::new(
            db_pool.clone(),
        ));
        let sales = Arc::new(crate::services::sales::SaleService::new(
            db_pool.clone(),
            procedures.clone(),
        ));
        let inventory = Arc::new(crate::services::inventory::InventoryService::new(
            db_pool.clone(),
            procedures,
        ));
        let reports = Arc::new(crate::services::reports::ReportService::new(db_pool));

        Self {
            products,
            suppliers,
            customers,
            sales,
            inventory,
            reports,
        }
    }
}
