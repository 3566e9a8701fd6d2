//! Persistence layer. All functions take a `&PgPool` and operate on the
//! `students` and `fees` tables; the composite listings join fees with
//! students application-side through the pure helpers at the bottom.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Fee, FeeWithStudent, Student, StudentContact, StudentWithFees, UnpaidFee};

pub async fn find_student_by_contact(
    pool: &PgPool,
    phone: &str,
    email: &str,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, name, phone, email FROM students WHERE phone = $1 OR email = $2 LIMIT 1",
    )
    .bind(phone)
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn insert_student(pool: &PgPool, student: &Student) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO students (id, name, phone, email) VALUES ($1, $2, $3, $4)")
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.phone)
        .bind(&student.email)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_student(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM students WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_students(pool: &PgPool) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>("SELECT id, name, phone, email FROM students")
        .fetch_all(pool)
        .await
}

pub async fn insert_fee(pool: &PgPool, fee: &Fee) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO fees (id, student_id, amount, due_date, paid, paid_on)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(fee.id)
    .bind(fee.student_id)
    .bind(fee.amount)
    .bind(fee.due_date)
    .bind(fee.paid)
    .bind(fee.paid_on)
    .execute(pool)
    .await?;
    Ok(())
}

/// Flip a fee's paid flag and recompute `paid_on` in one statement.
/// Returns `None` when no fee with that id exists.
pub async fn set_fee_paid(
    pool: &PgPool,
    id: Uuid,
    paid: bool,
    paid_on: Option<DateTime<Utc>>,
) -> Result<Option<Fee>, sqlx::Error> {
    sqlx::query_as::<_, Fee>(
        "UPDATE fees SET paid = $1, paid_on = $2 WHERE id = $3
         RETURNING id, student_id, amount, due_date, paid, paid_on",
    )
    .bind(paid)
    .bind(paid_on)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_fees(pool: &PgPool) -> Result<Vec<Fee>, sqlx::Error> {
    sqlx::query_as::<_, Fee>("SELECT id, student_id, amount, due_date, paid, paid_on FROM fees")
        .fetch_all(pool)
        .await
}

pub async fn list_unpaid_fees(pool: &PgPool) -> Result<Vec<Fee>, sqlx::Error> {
    sqlx::query_as::<_, Fee>(
        "SELECT id, student_id, amount, due_date, paid, paid_on FROM fees WHERE paid = FALSE",
    )
    .fetch_all(pool)
    .await
}

async fn student_index(pool: &PgPool) -> Result<HashMap<Uuid, Student>, sqlx::Error> {
    let students = list_students(pool).await?;
    Ok(students.into_iter().map(|s| (s.id, s)).collect())
}

pub async fn unpaid_fees_with_students(pool: &PgPool) -> Result<Vec<UnpaidFee>, sqlx::Error> {
    let fees = list_unpaid_fees(pool).await?;
    let index = student_index(pool).await?;
    Ok(project_unpaid(fees, &index))
}

pub async fn all_fees_with_students(pool: &PgPool) -> Result<Vec<FeeWithStudent>, sqlx::Error> {
    let fees = list_fees(pool).await?;
    let index = student_index(pool).await?;
    Ok(project_all(fees, &index))
}

pub async fn students_with_fees(pool: &PgPool) -> Result<Vec<StudentWithFees>, sqlx::Error> {
    let students = list_students(pool).await?;
    let fees = list_fees(pool).await?;
    Ok(group_by_student(students, fees))
}

// Fees whose student was deleted are skipped; the projection has no shape
// without a name and phone.
fn project_unpaid(fees: Vec<Fee>, index: &HashMap<Uuid, Student>) -> Vec<UnpaidFee> {
    fees.into_iter()
        .filter_map(|fee| {
            index.get(&fee.student_id).map(|student| UnpaidFee {
                name: student.name.clone(),
                phone: student.phone.clone(),
                amount: fee.amount,
                due_date: fee.due_date,
            })
        })
        .collect()
}

fn project_all(fees: Vec<Fee>, index: &HashMap<Uuid, Student>) -> Vec<FeeWithStudent> {
    fees.into_iter()
        .map(|fee| FeeWithStudent {
            id: fee.id,
            student: index.get(&fee.student_id).map(|student| StudentContact {
                name: student.name.clone(),
                phone: student.phone.clone(),
                email: student.email.clone(),
            }),
            amount: fee.amount,
            due_date: fee.due_date,
            paid: fee.paid,
            paid_on: fee.paid_on,
        })
        .collect()
}

fn group_by_student(students: Vec<Student>, fees: Vec<Fee>) -> Vec<StudentWithFees> {
    let mut by_student: HashMap<Uuid, Vec<Fee>> = HashMap::new();
    for fee in fees {
        by_student.entry(fee.student_id).or_default().push(fee);
    }
    students
        .into_iter()
        .map(|student| {
            let mut fees = by_student.remove(&student.id).unwrap_or_default();
            fees.sort_by(|a, b| b.due_date.cmp(&a.due_date));
            StudentWithFees { student, fees }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn student(name: &str) -> Student {
        Student {
            id: Uuid::new_v4(),
            name: name.to_string(),
            phone: "9123456789".to_string(),
            email: format!("{}@example.com", name),
        }
    }

    fn fee(student_id: Uuid, due: (i32, u32, u32), paid: bool) -> Fee {
        Fee {
            id: Uuid::new_v4(),
            student_id,
            amount: 1000.0,
            due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap(),
            paid,
            paid_on: if paid { Some(Utc::now()) } else { None },
        }
    }

    fn index_of(students: &[Student]) -> HashMap<Uuid, Student> {
        students.iter().map(|s| (s.id, s.clone())).collect()
    }

    #[test]
    fn unpaid_projection_skips_dangling_references() {
        let a = student("a");
        let dangling = fee(Uuid::new_v4(), (2024, 3, 1), false);
        let owned = fee(a.id, (2024, 1, 1), false);
        let index = index_of(&[a.clone()]);

        let projected = project_unpaid(vec![dangling, owned], &index);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].name, a.name);
        assert_eq!(projected[0].phone, a.phone);
        assert_eq!(
            projected[0].due_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn all_projection_nulls_missing_students() {
        let a = student("a");
        let owned = fee(a.id, (2024, 1, 1), true);
        let dangling = fee(Uuid::new_v4(), (2024, 3, 1), false);
        let index = index_of(&[a.clone()]);

        let projected = project_all(vec![owned, dangling], &index);
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].student.as_ref().unwrap().email, a.email);
        assert!(projected[0].paid_on.is_some());
        assert!(projected[1].student.is_none());
    }

    #[test]
    fn grouping_attaches_fees_sorted_by_due_date_descending() {
        let a = student("a");
        let b = student("b");
        let early = fee(a.id, (2024, 1, 1), false);
        let late = fee(a.id, (2024, 6, 1), false);
        let other = fee(b.id, (2024, 2, 1), false);

        let grouped = group_by_student(
            vec![a.clone(), b.clone()],
            vec![early.clone(), other.clone(), late.clone()],
        );
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].fees.len(), 2);
        assert_eq!(grouped[0].fees[0].id, late.id);
        assert_eq!(grouped[0].fees[1].id, early.id);
        assert_eq!(grouped[1].fees.len(), 1);
        assert_eq!(grouped[1].fees[0].id, other.id);
    }

    #[test]
    fn grouping_leaves_feeless_students_with_empty_lists() {
        let a = student("a");
        let grouped = group_by_student(vec![a], vec![]);
        assert_eq!(grouped.len(), 1);
        assert!(grouped[0].fees.is_empty());
    }
}
