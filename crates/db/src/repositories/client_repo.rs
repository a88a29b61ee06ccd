//! Repository for the `clients` table.

use healthtrack_core::pagination::PageRequest;
use healthtrack_core::types::ClientId;
use healthtrack_core::validation::contains_pattern;
use sqlx::PgPool;

use crate::models::client::{Client, ClientChanges, NewClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, gender, date_of_birth, phone_number, address";

/// Filter shared by the paginated list and its count: optional substring
/// match on name or phone.
const LIST_FILTER: &str = "($1::text IS NULL OR full_name ILIKE $1 OR phone_number ILIKE $1)";

/// Result of [`ClientRepo::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientDeletion {
    Deleted,
    NotFound,
    /// Deletion refused: the client still has this many enrollments.
    HasEnrollments(i64),
}

/// Provides CRUD and search operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client with a freshly generated UUID.
    pub async fn create(pool: &PgPool, input: &NewClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (id, full_name, gender, date_of_birth, phone_number, address)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(uuid::Uuid::new_v4())
            .bind(&input.full_name)
            .bind(&input.gender)
            .bind(input.date_of_birth)
            .bind(&input.phone_number)
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: ClientId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of clients plus the total number matching `q`.
    pub async fn list_page(
        pool: &PgPool,
        q: Option<&str>,
        page: PageRequest,
    ) -> Result<(Vec<Client>, i64), sqlx::Error> {
        let pattern = q.filter(|s| !s.is_empty()).map(contains_pattern);

        let count_query = format!("SELECT COUNT(*) FROM clients WHERE {LIST_FILTER}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM clients WHERE {LIST_FILTER}
             ORDER BY created_at, id
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, Client>(&query)
            .bind(&pattern)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((items, total))
    }

    /// Unpaginated search over id, name and phone number.
    pub async fn search(pool: &PgPool, q: &str) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients
             WHERE id::text ILIKE $1 OR full_name ILIKE $1 OR phone_number ILIKE $1
             ORDER BY full_name, id"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(contains_pattern(q))
            .fetch_all(pool)
            .await
    }

    /// Update a client. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: ClientId,
        input: &ClientChanges,
    ) -> Result<Option<Client>, sqlx::Error> {
        // Outer `Some` means "set this column", so `Some(None)` clears it.
        let query = format!(
            "UPDATE clients SET
                full_name = COALESCE($2, full_name),
                gender = CASE WHEN $3 THEN $4 ELSE gender END,
                date_of_birth = CASE WHEN $5 THEN $6 ELSE date_of_birth END,
                phone_number = CASE WHEN $7 THEN $8 ELSE phone_number END,
                address = CASE WHEN $9 THEN $10 ELSE address END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(input.gender.is_some())
            .bind(input.gender.as_ref().and_then(|v| v.as_deref()))
            .bind(input.date_of_birth.is_some())
            .bind(input.date_of_birth.flatten())
            .bind(input.phone_number.is_some())
            .bind(input.phone_number.as_ref().and_then(|v| v.as_deref()))
            .bind(input.address.is_some())
            .bind(input.address.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a client unless enrollments still reference it.
    ///
    /// The client row is locked for the duration of the check so a
    /// concurrent enrollment insert waits and then fails its foreign key.
    pub async fn delete(pool: &PgPool, id: ClientId) -> Result<ClientDeletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(ClientId,)> =
            sqlx::query_as("SELECT id FROM clients WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(ClientDeletion::NotFound);
        }

        let (enrollments,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM enrollments WHERE client_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if enrollments > 0 {
            return Ok(ClientDeletion::HasEnrollments(enrollments));
        }

        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(ClientDeletion::Deleted)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
