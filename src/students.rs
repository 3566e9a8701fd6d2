use std::str::FromStr;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::err::Error;
use crate::models::{Student, StudentWithFees};
use crate::validate::{valid_email, valid_phone};
use crate::{repo, RefStr};

pub async fn register_student(
    Json(body): Json<RegisterStudent>,
    Extension(pg): Extension<PgPool>,
) -> Result<(StatusCode, Json<Confirmation>), Error> {
    let (name, phone, email) = match (body.name, body.phone, body.email) {
        (Some(name), Some(phone), Some(email)) => (name, phone, email),
        _ => return Err(Error::validation("All fields are required")),
    };

    if !valid_phone(&phone) {
        return Err(Error::validation("Invalid phone number"));
    }
    if !valid_email(&email) {
        return Err(Error::validation("Invalid email address"));
    }

    let existing = repo::find_student_by_contact(&pg, &phone, &email).await?;
    if existing.is_some() {
        return Err(Error::Conflict {
            message: "Phone or Email already registered".to_string(),
        });
    }

    let student = Student {
        id: Uuid::new_v4(),
        name,
        phone,
        email,
    };
    repo::insert_student(&pg, &student).await?;

    Ok((
        StatusCode::CREATED,
        Json(Confirmation {
            message: "Student registered",
        }),
    ))
}

pub async fn delete_student(
    Path(id): Path<String>,
    Extension(pg): Extension<PgPool>,
) -> Result<Json<Confirmation>, Error> {
    let id = Uuid::from_str(&id)?;
    let deleted = repo::delete_student(&pg, id).await?;
    if !deleted {
        return Err(Error::not_found("Student not found"));
    }
    Ok(Json(Confirmation {
        message: "Student deleted successfully",
    }))
}

pub async fn list_students(Extension(pg): Extension<PgPool>) -> Result<Json<Vec<Student>>, Error> {
    let students = repo::list_students(&pg).await?;
    Ok(Json(students))
}

pub async fn students_with_fees(
    Extension(pg): Extension<PgPool>,
) -> Result<Json<Vec<StudentWithFees>>, Error> {
    let students = repo::students_with_fees(&pg).await?;
    Ok(Json(students))
}

// All three fields optional so the missing-field check answers with the
// application's own 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterStudent {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Confirmation {
    pub message: RefStr,
}
