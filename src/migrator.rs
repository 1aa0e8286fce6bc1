use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_suppliers_table::Migration),
            Box::new(m20260101_000002_create_customers_table::Migration),
            Box::new(m20260101_000003_create_products_table::Migration),
            Box::new(m20260101_000004_create_inventory_table::Migration),
            Box::new(m20260101_000005_create_sales_orders_table::Migration),
            Box::new(m20260101_000006_create_sales_order_items_table::Migration),
            Box::new(m20260101_000007_create_inventory_audit_table::Migration),
        ]
    }
}

// Migration implementations

mod m20260101_000001_create_suppliers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000001_create_suppliers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Suppliers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Suppliers::Name).string_len(255).not_null())
                        .col(ColumnDef::new(Suppliers::ContactEmail).string_len(255).null())
                        .col(ColumnDef::new(Suppliers::ContactPhone).string_len(64).null())
                        .col(
                            ColumnDef::new(Suppliers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Suppliers {
        Table,
        Id,
        Name,
        ContactEmail,
        ContactPhone,
        CreatedAt,
    }
}

mod m20260101_000002_create_customers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000002_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Customers::Name).string_len(255).not_null())
                        .col(ColumnDef::new(Customers::Email).string_len(255).null())
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Customers {
        Table,
        Id,
        Name,
        Email,
        CreatedAt,
    }
}

mod m20260101_000003_create_products_table {

    use super::m20260101_000001_create_suppliers_table::Suppliers;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000003_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Products::Name).string_len(255).not_null())
                        .col(ColumnDef::new(Products::Platform).string_len(64).null())
                        .col(ColumnDef::new(Products::Edition).string_len(64).null())
                        .col(ColumnDef::new(Products::Genre).string_len(64).null())
                        .col(
                            ColumnDef::new(Products::BasePrice)
                                .decimal_len(19, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Products::IsPhysical)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Products::IsDigital)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Products::SupplierId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_supplier")
                                .from(Products::Table, Products::SupplierId)
                                .to(Suppliers::Table, Suppliers::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_products_supplier_id")
                        .table(Products::Table)
                        .col(Products::SupplierId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Products {
        Table,
        Id,
        Name,
        Platform,
        Edition,
        Genre,
        BasePrice,
        IsPhysical,
        IsDigital,
        SupplierId,
    }
}

mod m20260101_000004_create_inventory_table {

    use super::m20260101_000003_create_products_table::Products;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000004_create_inventory_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Inventory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Inventory::ProductId)
                                .integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Inventory::QuantityOnHand)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Inventory::ReorderLevel)
                                .integer()
                                .not_null()
                                .default(5),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_product")
                                .from(Inventory::Table, Inventory::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Inventory::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Inventory {
        Table,
        ProductId,
        QuantityOnHand,
        ReorderLevel,
    }
}

mod m20260101_000005_create_sales_orders_table {

    use super::m20260101_000002_create_customers_table::Customers;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000005_create_sales_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SalesOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(SalesOrders::CustomerId).integer().null())
                        .col(
                            ColumnDef::new(SalesOrders::OrderDate)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::Channel)
                                .string_len(16)
                                .not_null()
                                .default("in_store"),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::PaymentMethod)
                                .string_len(64)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::Status)
                                .string_len(32)
                                .not_null()
                                .default("completed"),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_orders_customer")
                                .from(SalesOrders::Table, SalesOrders::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_sales_orders_order_date")
                        .table(SalesOrders::Table)
                        .col(SalesOrders::OrderDate)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalesOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum SalesOrders {
        Table,
        Id,
        CustomerId,
        OrderDate,
        Channel,
        PaymentMethod,
        Status,
    }
}

mod m20260101_000006_create_sales_order_items_table {

    use super::m20260101_000003_create_products_table::Products;
    use super::m20260101_000005_create_sales_orders_table::SalesOrders;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000006_create_sales_order_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SalesOrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrderItems::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(SalesOrderItems::OrderId).integer().not_null())
                        .col(
                            ColumnDef::new(SalesOrderItems::ProductId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderItems::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderItems::UnitPrice)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_order_items_order")
                                .from(SalesOrderItems::Table, SalesOrderItems::OrderId)
                                .to(SalesOrders::Table, SalesOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_order_items_product")
                                .from(SalesOrderItems::Table, SalesOrderItems::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_sales_order_items_order_id")
                        .table(SalesOrderItems::Table)
                        .col(SalesOrderItems::OrderId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalesOrderItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum SalesOrderItems {
        Table,
        Id,
        OrderId,
        ProductId,
        Quantity,
        UnitPrice,
    }
}

mod m20260101_000007_create_inventory_audit_table {

    use super::m20260101_000003_create_products_table::Products;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000007_create_inventory_audit_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryAudit::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryAudit::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(InventoryAudit::ProductId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryAudit::OldQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryAudit::NewQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryAudit::ChangedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_audit_product")
                                .from(InventoryAudit::Table, InventoryAudit::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_inventory_audit_product_id")
                        .table(InventoryAudit::Table)
                        .col(InventoryAudit::ProductId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryAudit::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum InventoryAudit {
        Table,
        Id,
        ProductId,
        OldQuantity,
        NewQuantity,
        ChangedAt,
    }
}
