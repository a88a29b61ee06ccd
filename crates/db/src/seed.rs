//! Sample data for local development.

use healthtrack_core::types::{ClientId, Date, DbId};
use sqlx::PgPool;

struct SampleClient {
    full_name: &'static str,
    gender: &'static str,
    date_of_birth: (i32, u32, u32),
    phone_number: &'static str,
    address: &'static str,
}

const CLIENTS: [SampleClient; 2] = [
    SampleClient {
        full_name: "Alice Mwangi",
        gender: "Female",
        date_of_birth: (1990, 5, 21),
        phone_number: "0712345678",
        address: "Nairobi, Kenya",
    },
    SampleClient {
        full_name: "James Otieno",
        gender: "Male",
        date_of_birth: (1985, 9, 10),
        phone_number: "0723456789",
        address: "Kisumu, Kenya",
    },
];

const PROGRAMS: [(&str, &str); 2] = [
    ("Maternal Health", "Support for expectant and new mothers"),
    ("HIV Awareness", "Outreach and counseling services"),
];

/// Counts of rows inserted by [`seed_sample_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub clients: usize,
    pub programs: usize,
    pub enrollments: usize,
}

/// Wipe all three tables and insert the sample data set.
///
/// Runs in one transaction: on any failure nothing is removed or inserted.
/// Client `i` is enrolled in program `i`.
pub async fn seed_sample_data(pool: &PgPool) -> Result<SeedReport, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM enrollments").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM programs").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM clients").execute(&mut *tx).await?;

    let mut client_ids: Vec<ClientId> = Vec::with_capacity(CLIENTS.len());
    for client in &CLIENTS {
        let (y, m, d) = client.date_of_birth;
        let id = uuid::Uuid::new_v4();
        sqlx::query(
            "INSERT INTO clients (id, full_name, gender, date_of_birth, phone_number, address)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(client.full_name)
        .bind(client.gender)
        .bind(Date::from_ymd_opt(y, m, d))
        .bind(client.phone_number)
        .bind(client.address)
        .execute(&mut *tx)
        .await?;
        client_ids.push(id);
    }

    let mut program_ids: Vec<DbId> = Vec::with_capacity(PROGRAMS.len());
    for (name, description) in PROGRAMS {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO programs (name, description, start_date, end_date)
             VALUES ($1, $2, DATE_TRUNC('year', CURRENT_DATE)::date,
                     (DATE_TRUNC('year', CURRENT_DATE) + INTERVAL '1 year - 1 day')::date)
             RETURNING id",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&mut *tx)
        .await?;
        program_ids.push(id);
    }

    for (client_id, program_id) in client_ids.iter().zip(&program_ids) {
        sqlx::query("INSERT INTO enrollments (client_id, program_id) VALUES ($1, $2)")
            .bind(client_id)
            .bind(program_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    let report = SeedReport {
        clients: client_ids.len(),
        programs: program_ids.len(),
        enrollments: client_ids.len().min(program_ids.len()),
    };
    tracing::info!(?report, "Sample data seeded");
    Ok(report)
}
