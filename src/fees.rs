use std::str::FromStr;

use axum::extract::Path;
use axum::{Extension, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::err::Error;
use crate::models::{Fee, FeeWithStudent, UnpaidFee};
use crate::{repo, RefStr};

pub async fn add_fee(
    Json(body): Json<AddFee>,
    Extension(pg): Extension<PgPool>,
) -> Result<Json<FeeSaved>, Error> {
    // No existence check on the student: fees keep a weak reference and the
    // listing queries null-guard instead.
    let paid_on = if body.paid { Some(Utc::now()) } else { None };
    let fee = Fee {
        id: Uuid::new_v4(),
        student_id: body.student_id,
        amount: body.amount,
        due_date: body.due_date,
        paid: body.paid,
        paid_on,
    };
    repo::insert_fee(&pg, &fee).await?;

    Ok(Json(FeeSaved {
        message: "Fee added",
        fee,
    }))
}

pub async fn update_fee(
    Path(fee_id): Path<String>,
    Json(body): Json<UpdateFee>,
    Extension(pg): Extension<PgPool>,
) -> Result<Json<FeeSaved>, Error> {
    let id = Uuid::from_str(&fee_id)?;
    // paid_on is recomputed from the new flag on every update, including
    // updates that leave `paid` unchanged.
    let paid_on = if body.paid { Some(Utc::now()) } else { None };
    let fee = match repo::set_fee_paid(&pg, id, body.paid, paid_on).await? {
        Some(fee) => fee,
        None => return Err(Error::not_found("Fee not found")),
    };

    Ok(Json(FeeSaved {
        message: "Fee updated",
        fee,
    }))
}

pub async fn unpaid_fees(Extension(pg): Extension<PgPool>) -> Result<Json<Vec<UnpaidFee>>, Error> {
    let fees = repo::unpaid_fees_with_students(&pg).await?;
    Ok(Json(fees))
}

pub async fn all_fees(
    Extension(pg): Extension<PgPool>,
) -> Result<Json<Vec<FeeWithStudent>>, Error> {
    let fees = repo::all_fees_with_students(&pg).await?;
    Ok(Json(fees))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFee {
    pub student_id: Uuid,
    pub amount: f64,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFee {
    pub paid: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeeSaved {
    pub message: RefStr,
    pub fee: Fee,
}
