use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{PatientRepository, RepositoryError};
use crate::domain::{DoctorId, Patient, PatientId};

pub struct PgPatientRepository {
    pool: PgPool,
}

impl PgPatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_patient(row: &PgRow) -> Result<Patient, RepositoryError> {
    let read = |e: sqlx::Error| RepositoryError::QueryFailed(e.to_string());
    Ok(Patient {
        id: PatientId::from_uuid(row.try_get::<Uuid, _>("id").map_err(read)?),
        name: row.try_get("name").map_err(read)?,
        age: row.try_get("age").map_err(read)?,
        gender: row.try_get("gender").map_err(read)?,
        notes: row.try_get("notes").map_err(read)?,
        doctor_id: DoctorId::from_uuid(row.try_get::<Uuid, _>("doctor_id").map_err(read)?),
        created_at: row.try_get("created_at").map_err(read)?,
    })
}

#[async_trait]
impl PatientRepository for PgPatientRepository {
    #[instrument(skip(self, patient), fields(patient_id = %patient.id.as_uuid()))]
    async fn create(&self, patient: &Patient) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO patients (id, name, age, gender, notes, doctor_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(patient.id.as_uuid())
        .bind(&patient.name)
        .bind(patient.age)
        .bind(&patient.gender)
        .bind(&patient.notes)
        .bind(patient.doctor_id.as_uuid())
        .bind(patient.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(patient_id = %id.as_uuid()))]
    async fn get_by_id(&self, id: PatientId) -> Result<Option<Patient>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, age, gender, notes, doctor_id, created_at
            FROM patients
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.as_ref().map(map_patient).transpose()
    }

    #[instrument(skip(self), fields(doctor_id = %doctor_id.as_uuid()))]
    async fn list_by_doctor(&self, doctor_id: DoctorId) -> Result<Vec<Patient>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, age, gender, notes, doctor_id, created_at
            FROM patients
            WHERE doctor_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(doctor_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        rows.iter().map(map_patient).collect()
    }

    #[instrument(skip(self, patient), fields(patient_id = %patient.id.as_uuid()))]
    async fn update(&self, patient: &Patient) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE patients
            SET name = $1, age = $2, gender = $3, notes = $4
            WHERE id = $5
            "#,
        )
        .bind(&patient.name)
        .bind(patient.age)
        .bind(&patient.gender)
        .bind(&patient.notes)
        .bind(patient.id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "patient {}",
                patient.id.as_uuid()
            )));
        }

        Ok(())
    }

    #[instrument(skip(self), fields(patient_id = %id.as_uuid()))]
    async fn delete(&self, id: PatientId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}
