use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub id: Uuid,
    pub student_id: Uuid,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid: bool,
    pub paid_on: Option<DateTime<Utc>>,
}

/// Contact projection of a student, attached to fee listings.
#[derive(Debug, Clone, Serialize)]
pub struct StudentContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpaidFee {
    pub name: String,
    pub phone: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

/// A fee joined with its student; `student` is null when the referenced
/// student has been deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeWithStudent {
    pub id: Uuid,
    pub student: Option<StudentContact>,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid: bool,
    pub paid_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentWithFees {
    #[serde(flatten)]
    pub student: Student,
    pub fees: Vec<Fee>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_serializes_with_camel_case_members() {
        let fee = Fee {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            amount: 1500.0,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            paid: false,
            paid_on: None,
        };
        let value = serde_json::to_value(&fee).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("studentId"));
        assert!(object.contains_key("dueDate"));
        assert!(object.contains_key("paidOn"));
        assert_eq!(object["dueDate"], "2024-01-01");
        assert!(object["paidOn"].is_null());
    }
}
