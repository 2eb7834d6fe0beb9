//! Catalog store: the category to services mapping and its three mutations.
//!
//! All writes run in a transaction together with the revision bump.

use std::sync::Arc;

use chrono::Utc;
use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::errors::CatalogError;
use crate::models::{
    normalize_details, CatalogSnapshot, Category, CategoryListing, Notification, RevisionInfo,
    Service, ServiceDraft,
};
use crate::notifications::NotificationSink;

const SERVICE_COLUMNS: &str = "id, title, description, details, price, popular";

/// Owned catalog injected into whichever component needs it.
#[derive(Clone)]
pub struct CatalogStore {
    pool: SqlitePool,
    notifier: Arc<dyn NotificationSink>,
}

impl CatalogStore {
    pub fn new(pool: SqlitePool, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { pool, notifier }
    }

    /// Get the current revision ID.
    pub async fn revision_id(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    /// Get revision info.
    pub async fn revision_info(&self) -> Result<RevisionInfo, sqlx::Error> {
        let row = sqlx::query("SELECT revision_id, generated_at FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(RevisionInfo {
            revision_id: row.get("revision_id"),
            generated_at: row.get("generated_at"),
        })
    }

    /// Append records with their existing ids, without notifying or bumping the revision.
    pub async fn import(&self, category: Category, services: &[Service]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut position = next_position(&mut tx, category).await?;

        for service in services {
            sqlx::query(
                "INSERT INTO services (id, category, position, title, description, details, price, popular) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(service.id)
            .bind(category.as_str())
            .bind(position)
            .bind(&service.title)
            .bind(&service.description)
            .bind(details_json(&service.details))
            .bind(&service.price)
            .bind(service.popular as i32)
            .execute(&mut *tx)
            .await?;
            position += 1;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Services of one category in display order.
    pub async fn list_by_category(&self, category: Category) -> Result<Vec<Service>, sqlx::Error> {
        let sql =
            format!("SELECT {SERVICE_COLUMNS} FROM services WHERE category = ? ORDER BY position");
        let rows = sqlx::query(&sql)
            .bind(category.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(service_from_row).collect()
    }

    /// Every service, categories in declaration order.
    pub async fn list_all(&self) -> Result<Vec<Service>, sqlx::Error> {
        let mut all = Vec::new();
        for category in Category::ALL {
            all.extend(self.list_by_category(category).await?);
        }
        Ok(all)
    }

    /// Grouped view of the whole catalog, empty categories included.
    pub async fn snapshot(&self) -> Result<CatalogSnapshot, sqlx::Error> {
        let mut categories = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            categories.push(CategoryListing {
                category,
                label: category.label().to_string(),
                services: self.list_by_category(category).await?,
            });
        }
        Ok(CatalogSnapshot { categories })
    }

    /// Look up a service by id in any category.
    pub async fn find(&self, id: i64) -> Result<Option<(Category, Service)>, sqlx::Error> {
        let sql = format!("SELECT category, {SERVICE_COLUMNS} FROM services WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let category: String = row.get("category");
        let category: Category = category
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Some((category, service_from_row(&row)?)))
    }

    /// Create a service at the end of `category`.
    ///
    /// Blank required fields abort the add with a destructive notice and no write.
    pub async fn add_service(
        &self,
        category: Category,
        draft: ServiceDraft,
    ) -> Result<Service, CatalogError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            tracing::warn!(%category, ?missing, "Rejected service draft");
            self.notifier.notify(Notification::destructive(
                "Missing information",
                format!("Please fill in all required fields: {}.", missing.join(", ")),
            ));
            return Err(CatalogError::MissingFields(missing));
        }

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT COALESCE(MAX(id), 0) + 1 AS next_id FROM services")
            .fetch_one(&mut *tx)
            .await?;
        let id: i64 = row.get("next_id");
        let position = next_position(&mut tx, category).await?;

        let service = ServiceDraft {
            details: normalize_details(draft.details),
            ..draft
        }
        .into_service(id);

        sqlx::query(
            "INSERT INTO services (id, category, position, title, description, details, price, popular) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(service.id)
        .bind(category.as_str())
        .bind(position)
        .bind(&service.title)
        .bind(&service.description)
        .bind(details_json(&service.details))
        .bind(&service.price)
        .bind(service.popular as i32)
        .execute(&mut *tx)
        .await?;

        bump_revision(&mut tx).await?;
        tx.commit().await?;

        tracing::info!(%category, id = service.id, "Added service");
        self.notifier.notify(Notification::new(
            "Service added",
            format!("{} has been added to {}.", service.title, category.label()),
        ));

        Ok(service)
    }

    /// Replace the record with `id` inside `category`, keeping its position.
    ///
    /// Returns `None` without notifying when the category has no such record.
    pub async fn update_service(
        &self,
        category: Category,
        id: i64,
        record: ServiceDraft,
    ) -> Result<Option<Service>, CatalogError> {
        let service = record.into_service(id);
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE services SET title = ?, description = ?, details = ?, price = ?, popular = ? WHERE category = ? AND id = ?",
        )
        .bind(&service.title)
        .bind(&service.description)
        .bind(details_json(&service.details))
        .bind(&service.price)
        .bind(service.popular as i32)
        .bind(category.as_str())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(%category, id, "Update matched no service");
            return Ok(None);
        }

        bump_revision(&mut tx).await?;
        tx.commit().await?;

        tracing::info!(%category, id, "Updated service");
        self.notifier.notify(Notification::new(
            "Service updated",
            format!("{} has been updated.", service.title),
        ));

        Ok(Some(service))
    }

    /// Remove the record with `id` from `category`.
    ///
    /// Always reports success to the user; the return value says whether anything was removed.
    pub async fn delete_service(&self, category: Category, id: i64) -> Result<bool, CatalogError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM services WHERE category = ? AND id = ?")
            .bind(category.as_str())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            bump_revision(&mut tx).await?;
        }
        tx.commit().await?;

        tracing::info!(%category, id, removed, "Deleted service");
        self.notifier.notify(Notification::new(
            "Service deleted",
            format!("The service has been removed from {}.", category.label()),
        ));

        Ok(removed)
    }
}

async fn next_position(conn: &mut SqliteConnection, category: Category) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COALESCE(MAX(position), -1) + 1 AS next_position FROM services WHERE category = ?",
    )
    .bind(category.as_str())
    .fetch_one(conn)
    .await?;
    Ok(row.get("next_position"))
}

async fn bump_revision(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    let now = Utc::now().to_rfc3339();
    sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
        .bind(&now)
        .execute(conn)
        .await?;
    Ok(())
}

// Helper functions for row conversion

fn service_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Service, sqlx::Error> {
    let id: i64 = row.get("id");
    let popular: i32 = row.get("popular");
    let details: String = row.get("details");
    let details = serde_json::from_str(&details).map_err(|e| {
        tracing::warn!(id, error = %e, "Corrupt details column");
        sqlx::Error::Decode(Box::new(e))
    })?;

    Ok(Service {
        id,
        title: row.get("title"),
        description: row.get("description"),
        details,
        price: row.get("price"),
        popular: popular != 0,
    })
}

fn details_json(details: &[String]) -> String {
    serde_json::to_string(details).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_database, sample_catalog};
    use crate::models::{Variant, DETAILS_PLACEHOLDER};
    use crate::notifications::NotificationCenter;

    async fn empty_store() -> (CatalogStore, Arc<NotificationCenter>) {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let center = Arc::new(NotificationCenter::new(16));
        (CatalogStore::new(pool, center.clone()), center)
    }

    async fn seeded_store() -> (CatalogStore, Arc<NotificationCenter>) {
        let (store, center) = empty_store().await;
        for (category, services) in sample_catalog() {
            store.import(category, &services).await.unwrap();
        }
        (store, center)
    }

    fn sample(id: i64, title: &str) -> Service {
        Service {
            id,
            title: title.to_string(),
            description: format!("{title} description"),
            details: vec!["First step".to_string()],
            price: "$100/hour".to_string(),
            popular: false,
        }
    }

    fn draft(title: &str, description: &str, price: &str, details: &[&str]) -> ServiceDraft {
        ServiceDraft {
            title: title.to_string(),
            description: description.to_string(),
            details: details.iter().map(|d| d.to_string()).collect(),
            price: price.to_string(),
            popular: false,
        }
    }

    #[tokio::test]
    async fn test_add_service_appends_with_next_id() {
        let (store, center) = empty_store().await;
        store
            .import(Category::Litigation, &[sample(1, "Civil Litigation")])
            .await
            .unwrap();

        let added = store
            .add_service(
                Category::Litigation,
                draft("Tax Appeal", "x", "$100/hr", &["a", "", ""]),
            )
            .await
            .unwrap();

        assert_eq!(added.id, 2);
        assert_eq!(added.details, vec!["a".to_string()]);

        let litigation = store.list_by_category(Category::Litigation).await.unwrap();
        assert_eq!(litigation.len(), 2);
        assert_eq!(litigation[1], added);

        let notices = center.recent();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].variant, Variant::Default);
        assert!(notices[0].description.contains("Tax Appeal"));
    }

    #[tokio::test]
    async fn test_add_service_id_exceeds_every_category() {
        let (store, _) = seeded_store().await;
        let before = store.list_all().await.unwrap();
        let max_id = before.iter().map(|s| s.id).max().unwrap();

        let added = store
            .add_service(Category::Family, draft("Mediation", "Neutral", "$200/hour", &[]))
            .await
            .unwrap();

        assert!(added.id > max_id);
        assert_eq!(added.details, vec![DETAILS_PLACEHOLDER.to_string()]);
        assert_eq!(
            store.list_by_category(Category::Family).await.unwrap().len(),
            4
        );
        assert_eq!(store.revision_id().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_service_rejects_missing_fields() {
        let (store, center) = seeded_store().await;
        let before = store.snapshot().await.unwrap();

        let err = store
            .add_service(Category::Estate, draft("Trusts", "", " ", &["a"]))
            .await
            .unwrap_err();

        match err {
            CatalogError::MissingFields(fields) => {
                assert_eq!(fields, vec!["description", "price"])
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let after = store.snapshot().await.unwrap();
        for category in Category::ALL {
            assert_eq!(before.services(category), after.services(category));
        }
        assert_eq!(store.revision_id().await.unwrap(), 0);

        let notices = center.recent();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].variant, Variant::Destructive);
    }

    #[tokio::test]
    async fn test_update_service_preserves_position() {
        let (store, center) = seeded_store().await;
        let before = store.list_by_category(Category::Business).await.unwrap();

        let updated = store
            .update_service(
                Category::Business,
                8,
                draft("Contract Drafting", "Drafting only", "$300/hour", &["Drafts"]),
            )
            .await
            .unwrap()
            .unwrap();

        let after = store.list_by_category(Category::Business).await.unwrap();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], updated);
        assert_eq!(after[1].id, 8);
        assert_eq!(after[2], before[2]);
        assert!(center.recent()[0].description.contains("Contract Drafting"));
    }

    #[tokio::test]
    async fn test_update_service_in_wrong_category_is_silent() {
        let (store, center) = seeded_store().await;

        let result = store
            .update_service(Category::Estate, 1, draft("Moved", "x", "y", &[]))
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(center.recent().is_empty());
        assert_eq!(store.revision_id().await.unwrap(), 0);
        assert_eq!(
            store.find(1).await.unwrap().unwrap().1.title,
            "Civil Litigation"
        );
    }

    #[tokio::test]
    async fn test_delete_only_service_in_category() {
        let (store, center) = empty_store().await;
        store
            .import(Category::Litigation, &[sample(1, "Civil Litigation")])
            .await
            .unwrap();
        store
            .import(Category::Family, &[sample(4, "Divorce Proceedings")])
            .await
            .unwrap();

        assert!(store.delete_service(Category::Family, 4).await.unwrap());

        assert!(store
            .list_by_category(Category::Family)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            store.list_by_category(Category::Litigation).await.unwrap(),
            vec![sample(1, "Civil Litigation")]
        );
        assert_eq!(center.recent().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_still_notifies() {
        let (store, center) = seeded_store().await;

        assert!(!store.delete_service(Category::Family, 99).await.unwrap());
        assert_eq!(store.list_all().await.unwrap().len(), 12);
        assert_eq!(center.recent().len(), 1);
        assert_eq!(store.revision_id().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_id_reused_after_deleting_maximum() {
        let (store, _) = seeded_store().await;
        store.delete_service(Category::Estate, 12).await.unwrap();

        let added = store
            .add_service(Category::Litigation, draft("Arbitration", "x", "y", &["z"]))
            .await
            .unwrap();

        assert_eq!(added.id, 12);
    }

    #[tokio::test]
    async fn test_list_all_follows_declaration_order() {
        let (store, _) = seeded_store().await;
        store
            .add_service(Category::Litigation, draft("Appeals", "x", "y", &["z"]))
            .await
            .unwrap();

        let ids: Vec<i64> = store.list_all().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 13, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[tokio::test]
    async fn test_corrupt_details_surface_as_error() {
        let (store, _) = seeded_store().await;
        sqlx::query("UPDATE services SET details = 'not json' WHERE id = 2")
            .execute(&store.pool)
            .await
            .unwrap();

        assert!(matches!(
            store.list_by_category(Category::Litigation).await,
            Err(sqlx::Error::Decode(_))
        ));
        assert!(store.find(2).await.is_err());
        assert_eq!(store.list_by_category(Category::Family).await.unwrap().len(), 3);
    }
}
