use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gameshelf API",
        version = "0.1.0",
        description = r#"
# Gameshelf Inventory API

Backend for a video-game retailer's inventory console: product, supplier and
customer management, stored-procedure backed sale recording, stock receipts
and sales reporting.

Sale recording and stock receipts delegate to the database procedures
`sp_record_sale` and `sp_receive_stock`, which own stock validation,
inventory mutation and the audit trail.
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Products", description = "Product and inventory-row management"),
        (name = "Suppliers", description = "Supplier management"),
        (name = "Customers", description = "Customer management"),
        (name = "Sales", description = "Sale recording and listings"),
        (name = "Inventory", description = "Stock receipts and low-stock reporting"),
        (name = "Reports", description = "Sales aggregation reports"),
        (name = "Health", description = "Health check endpoints")
    ),
    paths(
        // Products
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,

        // Suppliers
        crate::handlers::suppliers::list_suppliers,
        crate::handlers::suppliers::get_supplier,
        crate::handlers::suppliers::create_supplier,
        crate::handlers::suppliers::update_supplier,
        crate::handlers::suppliers::delete_supplier,

        // Customers
        crate::handlers::customers::list_customers,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::create_customer,
        crate::handlers::customers::update_customer,
        crate::handlers::customers::delete_customer,

        // Sales
        crate::handlers::sales::create_sale,
        crate::handlers::sales::list_sales,

        // Inventory
        crate::handlers::inventory::receive_stock,
        crate::handlers::inventory::low_stock,

        // Reports
        crate::handlers::reports::top_products,
        crate::handlers::reports::sales_by_channel,

        // Health
        crate::handlers::health::health_check,
    ),
    components(
        schemas(
            // Entities
            crate::entities::product::Model,
            crate::entities::supplier::Model,
            crate::entities::customer::Model,
            crate::entities::sales_order::SaleChannel,

            // Request types
            crate::handlers::products::CreateProductRequest,
            crate::handlers::products::UpdateProductRequest,
            crate::handlers::suppliers::CreateSupplierRequest,
            crate::handlers::suppliers::UpdateSupplierRequest,
            crate::handlers::customers::CreateCustomerRequest,
            crate::handlers::customers::UpdateCustomerRequest,
            crate::handlers::sales::CreateSaleRequest,
            crate::handlers::inventory::ReceiveStockRequest,

            // Response rows
            crate::services::products::ProductWithStock,
            crate::services::sales::SaleSummary,
            crate::services::inventory::LowStockItem,
            crate::services::reports::TopProduct,
            crate::services::reports::ChannelSales,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
