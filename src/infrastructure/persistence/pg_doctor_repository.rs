use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{DoctorRepository, RepositoryError};
use crate::domain::{Doctor, DoctorId};

pub struct PgDoctorRepository {
    pool: PgPool,
}

impl PgDoctorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_doctor(row: &PgRow) -> Result<Doctor, RepositoryError> {
    let read = |e: sqlx::Error| RepositoryError::QueryFailed(e.to_string());
    Ok(Doctor {
        id: DoctorId::from_uuid(row.try_get::<Uuid, _>("id").map_err(read)?),
        name: row.try_get("name").map_err(read)?,
        email: row.try_get("email").map_err(read)?,
        password_hash: row.try_get("password_hash").map_err(read)?,
        specialization: row.try_get("specialization").map_err(read)?,
        qualification: row.try_get("qualification").map_err(read)?,
        college: row.try_get("college").map_err(read)?,
        experience_years: row.try_get("experience_years").map_err(read)?,
        created_at: row.try_get("created_at").map_err(read)?,
    })
}

#[async_trait]
impl DoctorRepository for PgDoctorRepository {
    #[instrument(skip(self, doctor), fields(doctor_id = %doctor.id.as_uuid()))]
    async fn create(&self, doctor: &Doctor) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO doctors
                (id, name, email, password_hash, specialization, qualification,
                 college, experience_years, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(doctor.id.as_uuid())
        .bind(&doctor.name)
        .bind(&doctor.email)
        .bind(&doctor.password_hash)
        .bind(&doctor.specialization)
        .bind(&doctor.qualification)
        .bind(&doctor.college)
        .bind(doctor.experience_years)
        .bind(doctor.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .map(|d| d.is_unique_violation())
                .unwrap_or(false)
            {
                RepositoryError::Conflict(format!("email already registered: {}", doctor.email))
            } else {
                RepositoryError::QueryFailed(e.to_string())
            }
        })?;

        Ok(())
    }

    #[instrument(skip(self), fields(doctor_id = %id.as_uuid()))]
    async fn find_by_id(&self, id: DoctorId) -> Result<Option<Doctor>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, specialization, qualification,
                   college, experience_years, created_at
            FROM doctors
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.as_ref().map(map_doctor).transpose()
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, specialization, qualification,
                   college, experience_years, created_at
            FROM doctors
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.as_ref().map(map_doctor).transpose()
    }
}
