//! Item repository — CRUD plus paginated, filtered, sorted listing.
//!
//! Every operation maps to one parameterized statement. Caller-supplied
//! values are always bound as parameters; sort/filter identifiers reach query
//! text only as the `as_str()` of the allow-list enums in `wares_core::enums`.

use chrono::Utc;

use wares_core::context::RequestContext;
use wares_core::entities::{Item, MetadataDetail, MetadataRecord};
use wares_core::enums::{AuditAction, ItemColumn};
use wares_core::paging::{ItemPage, ListQuery};

use crate::error::StoreError;
use crate::service::WaresService;

const SELECT_COLS: &str = "id, name, description, price";

fn row_to_item(row: &libsql::Row) -> Result<Item, StoreError> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
    })
}

/// Reject unusable item fields before any SQL runs.
fn validate_item_fields(name: &str, price: f64) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation("item name must not be empty".into()));
    }
    if !price.is_finite() {
        return Err(StoreError::Validation("price must be a finite number".into()));
    }
    if price < 0.0 {
        return Err(StoreError::Validation("price must not be negative".into()));
    }
    Ok(())
}

/// Convert an equality-filter value into a typed bind parameter.
///
/// `id` and `price` are numeric columns; comparing them against a TEXT
/// parameter would never match in `SQLite`, so the raw string must parse into
/// the column's type.
fn filter_param(column: ItemColumn, value: &str) -> Result<libsql::Value, StoreError> {
    match column {
        ItemColumn::Id => value
            .parse::<i64>()
            .map(libsql::Value::Integer)
            .map_err(|_| StoreError::Validation(format!("filter value '{value}' is not an id"))),
        ItemColumn::Price => value
            .parse::<f64>()
            .map(libsql::Value::Real)
            .map_err(|_| StoreError::Validation(format!("filter value '{value}' is not a price"))),
        ItemColumn::Name | ItemColumn::Description => {
            Ok(libsql::Value::Text(value.to_string()))
        }
    }
}

fn detail_for(item: &Item, ctx: &RequestContext) -> MetadataDetail {
    MetadataDetail {
        name: item.name.clone(),
        description: item.description.clone(),
        ip_address: ctx.ip_address.clone(),
        user_agent: ctx.user_agent.clone(),
        user_id: ctx.user.id,
        username: ctx.user.username.clone(),
    }
}

impl WaresService {
    /// Insert a new item and record a `create` metadata entry.
    ///
    /// # Errors
    ///
    /// `Validation` on unusable fields, `Storage` if the row was inserted but
    /// the audit append failed (the row is not rolled back), other
    /// `StoreError` on store failure.
    pub async fn create_item(
        &self,
        name: &str,
        description: &str,
        price: f64,
        ctx: &RequestContext,
    ) -> Result<Item, StoreError> {
        validate_item_fields(name, price)?;

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "INSERT INTO items (name, description, price)
                     VALUES (?1, ?2, ?3) RETURNING {SELECT_COLS}"
                ),
                libsql::params![name, description, price],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("insert returned no row".into()))?;
        let item = row_to_item(&row)?;

        tracing::debug!(item_id = item.id, user = %ctx.user.username, "item created");
        self.append_item_audit(&item, AuditAction::Create, ctx).await?;

        Ok(item)
    }

    /// Fetch one item by id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no row matches.
    pub async fn get_item(&self, id: i64) -> Result<Item, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM items WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(StoreError::NotFound { entity: "item", id })?;
        row_to_item(&row)
    }

    /// Replace all mutable fields of an item and record an `update` entry.
    /// The id is immutable.
    ///
    /// # Errors
    ///
    /// `NotFound` if no row matches, `Validation` on unusable fields.
    pub async fn update_item(
        &self,
        id: i64,
        name: &str,
        description: &str,
        price: f64,
        ctx: &RequestContext,
    ) -> Result<Item, StoreError> {
        validate_item_fields(name, price)?;

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "UPDATE items SET name = ?1, description = ?2, price = ?3
                     WHERE id = ?4 RETURNING {SELECT_COLS}"
                ),
                libsql::params![name, description, price, id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(StoreError::NotFound { entity: "item", id })?;
        let item = row_to_item(&row)?;

        tracing::debug!(item_id = id, user = %ctx.user.username, "item updated");
        self.append_item_audit(&item, AuditAction::Update, ctx).await?;

        Ok(item)
    }

    /// Remove an item, returning the removed row's snapshot, and record a
    /// `delete` entry.
    ///
    /// # Errors
    ///
    /// `NotFound` if no row matches.
    pub async fn delete_item(&self, id: i64, ctx: &RequestContext) -> Result<Item, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("DELETE FROM items WHERE id = ?1 RETURNING {SELECT_COLS}"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(StoreError::NotFound { entity: "item", id })?;
        let item = row_to_item(&row)?;

        tracing::debug!(item_id = id, user = %ctx.user.username, "item deleted");
        self.append_item_audit(&item, AuditAction::Delete, ctx).await?;

        Ok(item)
    }

    /// One page of items plus the total count matching the filter.
    ///
    /// The query arrives already validated (`ListQuery::parse`); this method
    /// interpolates only allow-list identifiers and binds everything else.
    /// No upper bound is enforced on the page size.
    ///
    /// # Errors
    ///
    /// `Validation` if the filter value does not fit the column's type.
    pub async fn list_items(&self, query: &ListQuery) -> Result<ItemPage, StoreError> {
        let mut where_clause = String::new();
        let mut filter_value = None;
        if let Some((column, value)) = &query.filter {
            where_clause = format!("WHERE {} = ?1", column.as_str());
            filter_value = Some(filter_param(*column, value)?);
        }

        let order_col = query.sort_by.as_str();
        let order_dir = query.sort_order.as_str();

        let mut params: Vec<libsql::Value> = filter_value.iter().cloned().collect();
        let limit_idx = params.len() + 1;
        let offset_idx = params.len() + 2;
        params.push(libsql::Value::Integer(i64::from(query.page_size)));
        params.push(libsql::Value::Integer(
            i64::try_from(query.offset()).map_err(|_| {
                StoreError::Validation("page out of addressable range".into())
            })?,
        ));

        let sql = format!(
            "SELECT {SELECT_COLS} FROM items {where_clause}
             ORDER BY {order_col} {order_dir}
             LIMIT ?{limit_idx} OFFSET ?{offset_idx}"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row)?);
        }

        // Total count over the same filter, ignoring pagination.
        let count_sql = format!("SELECT COUNT(*) FROM items {where_clause}");
        let count_params: Vec<libsql::Value> = filter_value.into_iter().collect();
        let mut count_rows = self
            .db()
            .conn()
            .query(&count_sql, libsql::params_from_iter(count_params))
            .await?;
        let count_row = count_rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("count returned no row".into()))?;
        let total_items = u64::try_from(count_row.get::<i64>(0)?)
            .map_err(|_| StoreError::Query("negative row count".into()))?;

        Ok(ItemPage::new(items, query, total_items))
    }

    /// The full metadata history for an item, oldest first.
    ///
    /// An item with no recorded events is reported as not found, not as an
    /// empty history.
    ///
    /// # Errors
    ///
    /// `NotFound` if no records exist for the id, `Storage` on audit document
    /// failure.
    pub async fn item_metadata(&self, id: i64) -> Result<Vec<MetadataRecord>, StoreError> {
        let records = self.audit().records_for_item(id).await?;
        if records.is_empty() {
            return Err(StoreError::NotFound {
                entity: "item metadata",
                id,
            });
        }
        Ok(records)
    }

    /// Build and append the metadata record for one mutation.
    async fn append_item_audit(
        &self,
        item: &Item,
        action: AuditAction,
        ctx: &RequestContext,
    ) -> Result<(), StoreError> {
        self.audit()
            .append(MetadataRecord {
                item_id: item.id,
                timestamp: Utc::now(),
                action,
                details: detail_for(item, ctx),
            })
            .await
    }
}
