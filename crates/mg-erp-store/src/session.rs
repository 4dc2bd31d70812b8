//! A single unit of work against the store.
//!
//! A [`Session`] owns exactly one SQLite connection. Callers hold it for the
//! duration of their work and pass it explicitly; the connection closes when
//! the session is dropped.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Params};
use tracing::debug;

use mg_erp_core::{
    NewProduct, NewSale, NewStockMove, Product, ProductId, Sale, SaleId, StockMove, StockMoveId,
};

use crate::error::{Result, StoreError};
use crate::record::Record;
use crate::schema;

/// Net profit per product, most profitable first.
const DASHBOARD_SQL: &str = "
    SELECT p.id AS product_id,
           p.nome AS nome,
           COUNT(s.id) AS vendas,
           SUM(s.preco_unit) AS receita,
           SUM(s.preco_unit - s.custo_snapshot) AS lucro_liquido
    FROM sales s
    JOIN products p ON p.id = s.product_id
    GROUP BY p.id, p.nome
    ORDER BY lucro_liquido DESC, p.id";

/// An open connection scoped to one unit of work.
pub struct Session {
    conn: Connection,
}

impl Session {
    /// Open a connection to the database file at `path`.
    ///
    /// Foreign keys are enforced on every session.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|err| match StoreError::from(err) {
            StoreError::StorageUnavailable(msg) => {
                StoreError::StorageUnavailable(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        debug!(path = %path.display(), "session opened");
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self { conn })
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a product. A duplicate non-null SKU is a `ConstraintViolation`.
    pub fn insert_product(&self, product: &NewProduct) -> Result<ProductId> {
        insert_product(&self.conn, product)
    }

    /// Insert a sale. An unknown product is a `ReferentialViolation`.
    pub fn insert_sale(&self, sale: &NewSale) -> Result<SaleId> {
        insert_sale(&self.conn, sale)
    }

    /// Insert a stock movement. An unknown product is a `ReferentialViolation`.
    pub fn insert_stock_move(&self, mv: &NewStockMove) -> Result<StockMoveId> {
        insert_stock_move(&self.conn, mv)
    }

    /// Record a sale of `quantity` units together with its stock deduction.
    ///
    /// Both rows are written in one transaction.
    pub fn record_sale(&mut self, sale: &NewSale, quantity: i64) -> Result<(SaleId, StockMoveId)> {
        let mv = NewStockMove::for_sale(sale.product_id, quantity)?;

        let tx = self.conn.transaction()?;
        let sale_id = insert_sale(&tx, sale)?;
        let move_id = insert_stock_move(&tx, &mv)?;
        tx.commit()?;

        Ok((sale_id, move_id))
    }

    /// Delete a product that nothing references.
    ///
    /// Products with sales or stock movements are kept and the call fails with
    /// `ReferentialViolation`. Returns `false` if no such product exists.
    pub fn delete_product(&self, id: ProductId) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM products WHERE id = ?1", params![id.get()])?;
        Ok(deleted > 0)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    pub fn product(&self, id: ProductId) -> Result<Option<Product>> {
        self.conn
            .query_row(
                "SELECT id, nome, modelo, capacidade, cor, sku FROM products WHERE id = ?1",
                params![id.get()],
                row_to_product,
            )
            .optional()
            .map_err(StoreError::from)
    }

    /// All products, by id.
    pub fn products(&self) -> Result<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, nome, modelo, capacidade, cor, sku FROM products ORDER BY id")?;
        let products = stmt
            .query_map([], row_to_product)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(products)
    }

    /// All sales, by id.
    pub fn sales(&self) -> Result<Vec<Sale>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, product_id,
                    COALESCE(preco_lista, 0) AS preco_lista,
                    COALESCE(preco_unit, 0) AS preco_unit,
                    COALESCE(custo_snapshot, 0) AS custo_snapshot,
                    created_at
             FROM sales ORDER BY id",
        )?;
        let sales = stmt
            .query_map([], row_to_sale)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sales)
    }

    /// Stock movements of one product, oldest first.
    pub fn stock_moves(&self, product_id: ProductId) -> Result<Vec<StockMove>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, product_id, origem, quantidade, created_at
             FROM stock_moves WHERE product_id = ?1 ORDER BY id",
        )?;
        let moves = stmt
            .query_map(params![product_id.get()], row_to_stock_move)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(moves)
    }

    /// Net stock of a product: the sum of its movements.
    pub fn stock_on_hand(&self, product_id: ProductId) -> Result<i64> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(quantidade), 0) FROM stock_moves WHERE product_id = ?1",
            params![product_id.get()],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Row count of one of the schema's tables.
    pub fn count(&self, table: &str) -> Result<i64> {
        if !schema::is_known_table(table) {
            return Err(StoreError::UnknownTable(table.to_string()));
        }
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count)
    }

    /// Run a read query, returning name-keyed rows.
    pub fn query<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Arc<[String]> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let records = stmt
            .query_map(params, |row| Record::from_row(&columns, row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Run a write statement, returning the number of changed rows.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Per-product sales summary for the dashboard.
    ///
    /// A store whose tables do not exist yet yields no rows instead of an
    /// error.
    pub fn dashboard(&self) -> Result<Vec<Record>> {
        match self.query(DASHBOARD_SQL, []) {
            Err(StoreError::MissingTable(table)) => {
                debug!(%table, "dashboard read before schema initialization");
                Ok(Vec::new())
            }
            other => other,
        }
    }
}

pub(crate) fn insert_product(conn: &Connection, product: &NewProduct) -> Result<ProductId> {
    product.validate()?;
    conn.execute(
        "INSERT INTO products (nome, modelo, capacidade, cor, sku) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            product.name,
            product.model,
            product.capacity,
            product.color,
            product.sku,
        ],
    )?;
    Ok(ProductId(conn.last_insert_rowid()))
}

pub(crate) fn insert_sale(conn: &Connection, sale: &NewSale) -> Result<SaleId> {
    conn.execute(
        "INSERT INTO sales (product_id, preco_lista, preco_unit, custo_snapshot)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            sale.product_id.get(),
            sale.list_price,
            sale.unit_price,
            sale.cost_snapshot,
        ],
    )?;
    Ok(SaleId(conn.last_insert_rowid()))
}

pub(crate) fn insert_stock_move(conn: &Connection, mv: &NewStockMove) -> Result<StockMoveId> {
    conn.execute(
        "INSERT INTO stock_moves (product_id, origem, quantidade) VALUES (?1, ?2, ?3)",
        params![mv.product_id.get(), mv.origin.as_str(), mv.quantity],
    )?;
    Ok(StockMoveId(conn.last_insert_rowid()))
}

fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: ProductId(row.get("id")?),
        name: row.get("nome")?,
        model: row.get("modelo")?,
        capacity: row.get("capacidade")?,
        color: row.get("cor")?,
        sku: row.get("sku")?,
    })
}

fn row_to_sale(row: &rusqlite::Row<'_>) -> rusqlite::Result<Sale> {
    Ok(Sale {
        id: SaleId(row.get("id")?),
        product_id: ProductId(row.get("product_id")?),
        list_price: row.get("preco_lista")?,
        unit_price: row.get("preco_unit")?,
        cost_snapshot: row.get("custo_snapshot")?,
        created_at: row.get::<_, Option<NaiveDateTime>>("created_at")?,
    })
}

fn row_to_stock_move(row: &rusqlite::Row<'_>) -> rusqlite::Result<StockMove> {
    let tag: String = row.get("origem")?;
    let origin = tag
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    Ok(StockMove {
        id: StockMoveId(row.get("id")?),
        product_id: ProductId(row.get("product_id")?),
        origin,
        quantity: row.get("quantidade")?,
        created_at: row.get::<_, Option<NaiveDateTime>>("created_at")?,
    })
}
