//! Database schema for the inventory store.
//!
//! Every table is created with `IF NOT EXISTS`, so initialization can run on
//! every startup. Tables are applied one at a time outside any transaction: a
//! failing table is logged and the remaining tables are still attempted.

use rusqlite::Connection;
use tracing::{debug, error, info};

use crate::error::{Result, StoreError};

/// One table and the statements that create it.
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub ddl: &'static str,
}

/// The products table.
pub const PRODUCTS: TableDef = TableDef {
    name: "products",
    ddl: r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL,
            modelo TEXT,
            capacidade TEXT,
            cor TEXT,
            sku TEXT UNIQUE
        );
    "#,
};

/// The sales table.
pub const SALES: TableDef = TableDef {
    name: "sales",
    ddl: r#"
        CREATE TABLE IF NOT EXISTS sales (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            preco_lista REAL DEFAULT 0,
            preco_unit REAL DEFAULT 0,
            custo_snapshot REAL DEFAULT 0,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(product_id) REFERENCES products(id)
        );
        CREATE INDEX IF NOT EXISTS idx_sales_product ON sales(product_id);
    "#,
};

/// The stock movements table. `origem` is restricted to the known origins.
pub const STOCK_MOVES: TableDef = TableDef {
    name: "stock_moves",
    ddl: r#"
        CREATE TABLE IF NOT EXISTS stock_moves (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            origem TEXT NOT NULL
                CHECK(origem IN ('ajuste', 'venda', 'ajuste_edit_prod', 'venda_edit')),
            quantidade INTEGER NOT NULL,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(product_id) REFERENCES products(id)
        );
        CREATE INDEX IF NOT EXISTS idx_stock_moves_product ON stock_moves(product_id);
    "#,
};

/// All tables, in creation order.
pub const TABLES: [TableDef; 3] = [PRODUCTS, SALES, STOCK_MOVES];

/// Whether `name` is one of the schema's tables.
pub fn is_known_table(name: &str) -> bool {
    TABLES.iter().any(|t| t.name == name)
}

/// Tables ensured by an initialization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    pub ensured: Vec<&'static str>,
}

/// Create any missing tables.
pub fn initialize(conn: &Connection) -> Result<SchemaReport> {
    let report = apply_tables(conn, &TABLES)?;
    info!(tables = ?report.ensured, "schema initialized");
    Ok(report)
}

/// Apply each table independently, returning the first failure once all
/// tables have been attempted.
fn apply_tables(conn: &Connection, tables: &[TableDef]) -> Result<SchemaReport> {
    let mut report = SchemaReport::default();
    let mut first_error = None;

    for table in tables {
        match conn.execute_batch(table.ddl) {
            Ok(()) => {
                debug!(table = table.name, "table ensured");
                report.ensured.push(table.name);
            }
            Err(err) => {
                let err = schema_error(table.name, err);
                error!(table = table.name, error = %err, "failed to ensure table");
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(report),
    }
}

fn schema_error(table: &'static str, err: rusqlite::Error) -> StoreError {
    match StoreError::from(err) {
        unavailable @ StoreError::StorageUnavailable(_) => unavailable,
        other => StoreError::Schema {
            table,
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap()
    }

    fn schema_sql(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT sql FROM sqlite_master WHERE sql IS NOT NULL ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_initialize_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        let report = initialize(&conn).unwrap();
        assert_eq!(report.ensured, vec!["products", "sales", "stock_moves"]);

        let tables = table_names(&conn);
        assert!(tables.contains(&"products".to_string()));
        assert!(tables.contains(&"sales".to_string()));
        assert!(tables.contains(&"stock_moves".to_string()));
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let before = schema_sql(&conn);

        initialize(&conn).unwrap();
        initialize(&conn).unwrap();
        assert_eq!(schema_sql(&conn), before);
    }

    #[test]
    fn test_failed_table_does_not_block_others() {
        let conn = Connection::open_in_memory().unwrap();
        let broken = TableDef {
            name: "broken",
            ddl: "CREATE TABLE IF NOT EXISTS broken (id INTEGER PRIMARY KEY,,);",
        };

        let err = apply_tables(&conn, &[PRODUCTS, broken, STOCK_MOVES]).unwrap_err();
        assert!(matches!(err, StoreError::Schema { table: "broken", .. }));

        let tables = table_names(&conn);
        assert!(tables.contains(&"products".to_string()));
        assert!(tables.contains(&"stock_moves".to_string()));
        assert!(!tables.contains(&"broken".to_string()));
    }

    #[test]
    fn test_known_tables() {
        assert!(is_known_table("sales"));
        assert!(!is_known_table("sqlite_master"));
    }
}
