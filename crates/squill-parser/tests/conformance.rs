//! End-to-end conformance over realistic multi-statement scripts: migration
//! DDL, stored procedures, cursor loops, JSON rowsets, and admin commands.
//! Each script must parse clean and print to a re-parse fixed point.

use pretty_assertions::assert_eq;
use squill_parser::ast::StatementKind;
use squill_parser::parse;

fn parse_clean(sql: &str) -> squill_parser::ParseOutcome {
    let outcome = parse(sql);
    assert!(
        !outcome.has_errors(),
        "unexpected errors: {:?}",
        outcome.diagnostics
    );
    let printed = outcome.script.to_string();
    let reprint = parse(&printed);
    assert!(
        !reprint.has_errors(),
        "reparse errors in {printed:?}: {:?}",
        reprint.diagnostics
    );
    assert_eq!(printed, reprint.script.to_string());
    outcome
}

#[test]
fn test_migration_script() {
    let outcome = parse_clean(
        "USE inventory;\n\
         GO\n\
         CREATE TABLE dbo.products (\n\
             id INT NOT NULL IDENTITY(1, 1),\n\
             sku NVARCHAR(50) NOT NULL,\n\
             price DECIMAL(10, 2) NOT NULL DEFAULT 0,\n\
             valid_from DATETIME2 GENERATED ALWAYS AS ROW START,\n\
             valid_to DATETIME2 GENERATED ALWAYS AS ROW END,\n\
             PERIOD FOR SYSTEM_TIME (valid_from, valid_to),\n\
             CONSTRAINT pk_products PRIMARY KEY CLUSTERED (id)\n\
         ) WITH (SYSTEM_VERSIONING = ON (HISTORY_TABLE = dbo.products_history));\n\
         GO\n\
         CREATE UNIQUE NONCLUSTERED INDEX ix_products_sku ON dbo.products (sku) WHERE sku IS NOT NULL;\n\
         GO\n\
         ALTER TABLE dbo.products ADD CONSTRAINT ck_price CHECK (price >= 0);\n\
         GO\n\
         CREATE OR ALTER VIEW dbo.active_products AS\n\
         SELECT id, sku, price FROM dbo.products WHERE price > 0;\n",
    );
    assert_eq!(outcome.script.batches.len(), 5);
    assert!(matches!(
        outcome.script.batches[1].statements[0].kind,
        StatementKind::CreateTable(_)
    ));
    assert!(matches!(
        outcome.script.batches[4].statements[0].kind,
        StatementKind::CreateView(_)
    ));
}

#[test]
fn test_stored_procedure_script() {
    let outcome = parse_clean(
        "CREATE PROCEDURE dbo.upsert_product\n\
             @sku NVARCHAR(50),\n\
             @price DECIMAL(10, 2),\n\
             @updated INT OUTPUT\n\
         AS\n\
         BEGIN\n\
             SET NOCOUNT ON;\n\
             BEGIN TRY\n\
                 BEGIN TRANSACTION;\n\
                 MERGE dbo.products AS t\n\
                 USING (SELECT @sku AS sku, @price AS price) AS s\n\
                 ON t.sku = s.sku\n\
                 WHEN MATCHED THEN UPDATE SET t.price = s.price\n\
                 WHEN NOT MATCHED THEN INSERT (sku, price) VALUES (s.sku, s.price);\n\
                 SET @updated = @@ROWCOUNT;\n\
                 COMMIT TRANSACTION;\n\
             END TRY\n\
             BEGIN CATCH\n\
                 IF @@TRANCOUNT > 0 ROLLBACK TRANSACTION;\n\
                 THROW;\n\
             END CATCH\n\
         END\n\
         GO\n\
         DECLARE @n INT;\n\
         EXEC dbo.upsert_product @sku = N'ABC-1', @price = 19.99, @updated = @n OUTPUT;\n",
    );
    assert_eq!(outcome.script.batches.len(), 2);
    let StatementKind::CreateProcedure(proc) = &outcome.script.batches[0].statements[0].kind
    else {
        unreachable!();
    };
    assert_eq!(proc.params.len(), 3);
}

#[test]
fn test_cursor_and_dynamic_sql_script() {
    let outcome = parse_clean(
        "DECLARE @name NVARCHAR(200);\n\
         DECLARE product_cursor CURSOR LOCAL FAST_FORWARD FOR\n\
             SELECT sku FROM dbo.products;\n\
         OPEN product_cursor;\n\
         FETCH NEXT FROM product_cursor INTO @name;\n\
         WHILE @@FETCH_STATUS = 0\n\
         BEGIN\n\
             PRINT @name;\n\
             FETCH NEXT FROM product_cursor INTO @name;\n\
         END\n\
         CLOSE product_cursor;\n\
         DEALLOCATE product_cursor;\n\
         GO\n\
         DECLARE @sql NVARCHAR(MAX) = N'SELECT COUNT(*) FROM dbo.products';\n\
         EXEC (@sql);\n",
    );
    assert_eq!(outcome.script.batches.len(), 2);
    assert_eq!(outcome.script.batches[0].statements.len(), 7);

    // Dynamic SQL stays opaque until the caller asks for the second pass.
    let inner = squill_parser::parse_dynamic_sql("SELECT COUNT(*) FROM dbo.products");
    assert!(!inner.has_errors());
}

#[test]
fn test_json_and_pivot_script() {
    let outcome = parse_clean(
        "SELECT j.id, j.qty\n\
         FROM OPENJSON(@payload) WITH (id INT '$.id', qty INT '$.qty') AS j;\n\
         SELECT p.north, p.south\n\
         FROM (SELECT region, amount FROM dbo.sales) AS src\n\
         PIVOT (SUM(amount) FOR region IN (north, south)) AS p;\n",
    );
    assert_eq!(outcome.script.batches[0].statements.len(), 2);
}

#[test]
fn test_partitioning_and_security_script() {
    let outcome = parse_clean(
        "CREATE PARTITION FUNCTION pf_by_year (INT) AS RANGE RIGHT FOR VALUES (2023, 2024, 2025);\n\
         GO\n\
         CREATE PARTITION SCHEME ps_by_year AS PARTITION pf_by_year ALL TO (primary_fg);\n\
         GO\n\
         CREATE SECURITY POLICY sec.tenant_filter\n\
             ADD FILTER PREDICATE sec.fn_tenant_access(tenant_id) ON dbo.orders\n\
         WITH (STATE = ON);\n",
    );
    assert_eq!(outcome.script.batches.len(), 3);
}

#[test]
fn test_admin_script() {
    let outcome = parse_clean(
        "BACKUP DATABASE inventory TO DISK = N'/var/backups/inventory.bak' WITH COMPRESSION, CHECKSUM;\n\
         RESTORE DATABASE inventory_copy FROM DISK = N'/var/backups/inventory.bak' WITH REPLACE;\n\
         DROP TABLE IF EXISTS dbo.products_staging, dbo.orders_staging;\n\
         BULK INSERT dbo.products_staging FROM '/var/feeds/products.csv' WITH (FIELDTERMINATOR = ',', FIRSTROW = 2);\n",
    );
    let stmts = &outcome.script.batches[0].statements;
    assert_eq!(stmts.len(), 4);
    assert!(matches!(stmts[3].kind, StatementKind::BulkInsert(_)));
}
