//! Round-trip fidelity: printing a parsed script and parsing the printed
//! text again must reach a fixed point. Spans differ between the original
//! and the reprint, so the comparison is on the printed form, not the trees.

use pretty_assertions::assert_eq;
use squill_parser::parse;

fn assert_roundtrip(sql: &str) {
    let first = parse(sql);
    assert!(
        !first.has_errors(),
        "parse errors for {sql:?}: {:?}",
        first.diagnostics
    );
    let printed = first.script.to_string();
    let second = parse(&printed);
    assert!(
        !second.has_errors(),
        "reparse errors for {printed:?}: {:?}",
        second.diagnostics
    );
    assert_eq!(
        printed,
        second.script.to_string(),
        "printing is not a fixed point for {sql:?}"
    );
}

#[test]
fn test_roundtrip_select_basics() {
    assert_roundtrip("SELECT a, b AS c FROM dbo.t WHERE a > 1 AND b < 2");
    assert_roundtrip("SELECT DISTINCT region FROM sales ORDER BY region DESC");
    assert_roundtrip("SELECT TOP (5) PERCENT * FROM t ORDER BY score");
    assert_roundtrip("SELECT COUNT(*) AS n, region FROM sales GROUP BY region HAVING COUNT(*) > 10");
}

#[test]
fn test_roundtrip_joins_and_apply() {
    assert_roundtrip("SELECT * FROM a INNER JOIN b ON a.id = b.id");
    assert_roundtrip("SELECT * FROM a LEFT OUTER JOIN b ON a.id = b.id WHERE b.id IS NULL");
    assert_roundtrip("SELECT o.id, x.total FROM orders AS o CROSS APPLY dbo.order_total(o.id) AS x");
}

#[test]
fn test_roundtrip_set_operators() {
    assert_roundtrip("SELECT a FROM t1 UNION ALL SELECT a FROM t2 UNION SELECT a FROM t3");
    assert_roundtrip("SELECT a FROM t1 EXCEPT SELECT a FROM t2");
}

#[test]
fn test_roundtrip_cte_and_paging() {
    assert_roundtrip(
        "WITH recent AS (SELECT id, created FROM events WHERE created > @since) \
         SELECT id FROM recent ORDER BY created OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY",
    );
}

#[test]
fn test_roundtrip_window_functions() {
    assert_roundtrip(
        "SELECT id, ROW_NUMBER() OVER (PARTITION BY region ORDER BY total DESC) AS rn FROM sales",
    );
}

#[test]
fn test_roundtrip_quantified_comparison() {
    assert_roundtrip("SELECT * FROM t WHERE a > ALL (SELECT b FROM u)");
    assert_roundtrip("SELECT * FROM t WHERE a = ANY (SELECT b FROM u WHERE c = 1)");
}

#[test]
fn test_roundtrip_case_nesting_is_preserved() {
    let sql = "SELECT CASE WHEN a = 1 THEN CASE b WHEN 2 THEN 'x' ELSE 'y' END ELSE 'z' END FROM t";
    assert_roundtrip(sql);
    let printed = parse(sql).script.to_string();
    assert_eq!(printed.matches("CASE").count(), 2);
    assert_eq!(printed.matches("END").count(), 2);
}

#[test]
fn test_roundtrip_method_chains() {
    assert_roundtrip(
        "SELECT n.x.value('(@id)[1]', 'INT') FROM @doc.nodes('/root/item') AS n(x)",
    );
    assert_roundtrip("SELECT @xml.exist('/a/b') WHERE @xml.value('(/a)[1]', 'NVARCHAR(10)') = N'ok'");
}

#[test]
fn test_roundtrip_for_xml_path() {
    assert_roundtrip("SELECT id, name FROM t FOR XML PATH('row')");
}

#[test]
fn test_roundtrip_insert_forms() {
    assert_roundtrip("INSERT INTO t (a, b) VALUES (1, N'x'), (2, N'y')");
    assert_roundtrip("INSERT INTO archive (id, payload) SELECT id, payload FROM live WHERE id < 100");
}

#[test]
fn test_roundtrip_update_delete() {
    assert_roundtrip("UPDATE t SET n = n + 1, flag = 0 WHERE id = 7");
    assert_roundtrip(
        "UPDATE t SET t.total = s.total FROM t INNER JOIN staging AS s ON t.id = s.id",
    );
    assert_roundtrip("DELETE FROM t WHERE created < @cutoff");
}

#[test]
fn test_roundtrip_merge() {
    assert_roundtrip(
        "MERGE INTO target AS t USING source AS s ON t.id = s.id \
         WHEN MATCHED THEN UPDATE SET t.n = s.n \
         WHEN NOT MATCHED THEN INSERT (id, n) VALUES (s.id, s.n);",
    );
}

#[test]
fn test_roundtrip_create_table() {
    assert_roundtrip(
        "CREATE TABLE dbo.users (\
         id INT NOT NULL IDENTITY(1, 1) PRIMARY KEY, \
         name NVARCHAR(200) NOT NULL, \
         bio NVARCHAR(MAX) NULL, \
         created DATETIME2 NOT NULL DEFAULT SYSUTCDATETIME())",
    );
}

#[test]
fn test_roundtrip_procedural() {
    assert_roundtrip(
        "DECLARE @n INT = 0;\nWHILE @n < 10 BEGIN SET @n = @n + 1; END",
    );
    assert_roundtrip(
        "IF @count > 0 BEGIN SELECT 'some'; END ELSE BEGIN SELECT 'none'; END",
    );
    assert_roundtrip("BEGIN TRY SELECT 1 / @d; END TRY BEGIN CATCH THROW; END CATCH");
}

#[test]
fn test_roundtrip_exec() {
    assert_roundtrip("EXEC dbo.refresh_totals @region = N'west', @force = 1");
    assert_roundtrip("EXEC (N'SELECT 1')");
}

#[test]
fn test_roundtrip_go_repeat_script() {
    assert_roundtrip("SELECT 1\nGO 2\nSELECT 2\nGO\nSELECT 3");
}
