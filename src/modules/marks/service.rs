use std::collections::BTreeMap;

use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;
use crate::utils::grading::{PASS_THRESHOLD, compute_grade};
use crate::utils::pagination::{PageParams, PaginationInfo};

use super::model::{
    DeletedMarkRef, DepartmentWiseStats, Mark, MarkFilterParams, MarkRow, MarkScopeParams,
    MarkStatisticsParams, MarksDashboardStatistics, StudentInfo, StudentMarksData,
    StudentMarksStatistics, SubjectMarksData, SubjectMarksStatistics, SubjectRef, UpsertMarkDto,
};

const MARK_SELECT: &str = "SELECT m.id, m.student_id, m.department, m.department_id, m.subject, \
     m.assignment_marks, m.exam_marks, m.total_marks, m.grade, m.semester, m.year, \
     m.academic_year, m.added_by, m.remarks, m.created_at, m.updated_at, \
     d.department_id AS dept_code, d.name AS dept_name, \
     s.subject_code AS subj_code, s.subject_name AS subj_name, s.credits AS subj_credits, \
     u.user_id AS stu_user_id, u.first_name AS stu_first_name, \
     u.last_name AS stu_last_name, u.email AS stu_email, u.department AS stu_department \
     FROM marks m \
     JOIN departments d ON d.id = m.department \
     JOIN subjects s ON s.id = m.subject \
     LEFT JOIN users u ON u.user_id = m.student_id";

pub struct MarkService;

impl MarkService {
    /// Insert-or-update keyed by (student, subject, semester, year,
    /// academic year). The total and grade are recomputed on every save.
    #[instrument(skip(db, dto), fields(mark.student = %dto.student_id))]
    pub async fn upsert(
        db: &PgPool,
        dto: UpsertMarkDto,
        added_by: &str,
    ) -> Result<(Mark, bool), AppError> {
        let student = sqlx::query_as::<_, (String, Option<String>)>(
            "SELECT role, department FROM users WHERE user_id = $1",
        )
        .bind(&dto.student_id)
        .fetch_optional(db)
        .await?;
        let student = match student {
            Some((role, department)) if UserRole::parse(&role).ok() == Some(UserRole::Student) => {
                department
            }
            _ => return Err(AppError::not_found("Student not found")),
        };

        let department = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, department_id FROM departments WHERE UPPER(department_id) = UPPER($1)",
        )
        .bind(&dto.department_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Department not found"))?;

        let subject_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subjects WHERE id = $1")
                .bind(dto.subject_id)
                .fetch_one(db)
                .await?;
        if subject_exists == 0 {
            return Err(AppError::not_found("Subject not found"));
        }

        if student.as_deref().map(str::to_uppercase) != Some(department.1.to_uppercase()) {
            return Err(AppError::bad_request(
                "Student does not belong to the selected department",
            ));
        }

        let academic_year = dto
            .academic_year
            .filter(|y| !y.trim().is_empty())
            .unwrap_or_else(|| chrono::Utc::now().format("%Y").to_string());

        let (total, grade) = compute_grade(dto.assignment_marks, dto.exam_marks);

        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM marks
             WHERE student_id = $1 AND subject = $2 AND semester = $3 AND year = $4
               AND academic_year = $5",
        )
        .bind(&dto.student_id)
        .bind(dto.subject_id)
        .bind(dto.semester)
        .bind(dto.year)
        .bind(&academic_year)
        .fetch_optional(db)
        .await?;

        let remarks = dto.remarks.unwrap_or_default();

        let (id, updated) = match existing {
            Some(id) => {
                sqlx::query(
                    "UPDATE marks SET assignment_marks = $2, exam_marks = $3, total_marks = $4,
                         grade = $5, remarks = $6, added_by = $7, updated_at = NOW()
                     WHERE id = $1",
                )
                .bind(id)
                .bind(dto.assignment_marks)
                .bind(dto.exam_marks)
                .bind(total)
                .bind(grade.as_str())
                .bind(&remarks)
                .bind(added_by)
                .execute(db)
                .await?;
                (id, true)
            }
            None => {
                let id = sqlx::query_scalar::<_, Uuid>(
                    "INSERT INTO marks (student_id, department, department_id, subject,
                         assignment_marks, exam_marks, total_marks, grade, semester, year,
                         academic_year, added_by, remarks)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                     RETURNING id",
                )
                .bind(&dto.student_id)
                .bind(department.0)
                .bind(&department.1)
                .bind(dto.subject_id)
                .bind(dto.assignment_marks)
                .bind(dto.exam_marks)
                .bind(total)
                .bind(grade.as_str())
                .bind(dto.semester)
                .bind(dto.year)
                .bind(&academic_year)
                .bind(added_by)
                .bind(&remarks)
                .fetch_one(db)
                .await
                .map_err(|e| {
                    AppError::from_db(e, "Marks already recorded for this subject and term")
                })?;
                (id, false)
            }
        };

        info!(mark.id = %id, mark.grade = grade.as_str(), updated, "Marks saved");
        Ok((Self::get_by_id(db, id).await?, updated))
    }

    pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Mark, AppError> {
        sqlx::query_as::<_, MarkRow>(&format!("{MARK_SELECT} WHERE m.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .map(Mark::from)
            .ok_or_else(|| AppError::not_found("Marks record not found"))
    }

    pub async fn get_all(
        db: &PgPool,
        filters: MarkFilterParams,
    ) -> Result<(Vec<Mark>, PaginationInfo), AppError> {
        let mut clauses: Vec<String> = Vec::new();
        let mut text_binds: Vec<String> = Vec::new();
        let mut int_binds: Vec<i64> = Vec::new();
        let mut uuid_bind: Option<Uuid> = None;
        let mut n = 0usize;

        if let Some(student_id) = filters.student_id.filter(|s| !s.is_empty()) {
            n += 1;
            clauses.push(format!("m.student_id = ${n}"));
            text_binds.push(student_id);
        }
        if let Some(department_id) = filters.department_id.filter(|s| !s.is_empty()) {
            n += 1;
            clauses.push(format!("UPPER(m.department_id) = UPPER(${n})"));
            text_binds.push(department_id);
        }
        if let Some(academic_year) = filters.academic_year.filter(|s| !s.is_empty()) {
            n += 1;
            clauses.push(format!("m.academic_year = ${n}"));
            text_binds.push(academic_year);
        }
        if let Some(subject_id) = filters.subject_id {
            n += 1;
            clauses.push(format!("m.subject = ${n}"));
            uuid_bind = Some(subject_id);
        }
        if let Some(semester) = filters.semester {
            n += 1;
            clauses.push(format!("m.semester = ${n}"));
            int_binds.push(semester);
        }
        if let Some(year) = filters.year {
            n += 1;
            clauses.push(format!("m.year = ${n}"));
            int_binds.push(year);
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        let page = PageParams {
            page: filters.page,
            limit: filters.limit,
        };
        let limit = page.limit_or(50);
        let offset = page.offset(limit);

        let count_sql = format!("SELECT COUNT(*) FROM marks m{where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for bind in &text_binds {
            count_query = count_query.bind(bind);
        }
        if let Some(subject_id) = uuid_bind {
            count_query = count_query.bind(subject_id);
        }
        for bind in &int_binds {
            count_query = count_query.bind(bind);
        }
        let total = count_query.fetch_one(db).await?;

        let list_sql = format!(
            "{MARK_SELECT}{where_clause} ORDER BY m.created_at DESC LIMIT ${} OFFSET ${}",
            n + 1,
            n + 2
        );
        let mut list_query = sqlx::query_as::<_, MarkRow>(&list_sql);
        for bind in &text_binds {
            list_query = list_query.bind(bind);
        }
        if let Some(subject_id) = uuid_bind {
            list_query = list_query.bind(subject_id);
        }
        for bind in &int_binds {
            list_query = list_query.bind(bind);
        }
        let rows = list_query.bind(limit).bind(offset).fetch_all(db).await?;

        Ok((
            rows.into_iter().map(Mark::from).collect(),
            PaginationInfo::new(page.page(), limit, total),
        ))
    }

    pub async fn get_by_student(
        db: &PgPool,
        student_id: &str,
        scope: MarkScopeParams,
    ) -> Result<StudentMarksData, AppError> {
        let student = sqlx::query_as::<_, (String, String, String, String, Option<String>)>(
            "SELECT user_id, first_name, last_name, email, department
             FROM users WHERE user_id = $1 AND role = 'student'",
        )
        .bind(student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Student not found"))?;

        let mut sql = format!("{MARK_SELECT} WHERE m.student_id = $1");
        let mut n = 1usize;
        if scope.academic_year.as_deref().is_some_and(|y| !y.is_empty()) {
            n += 1;
            sql.push_str(&format!(" AND m.academic_year = ${n}"));
        }
        if scope.semester.is_some() {
            n += 1;
            sql.push_str(&format!(" AND m.semester = ${n}"));
        }
        if scope.year.is_some() {
            n += 1;
            sql.push_str(&format!(" AND m.year = ${n}"));
        }
        sql.push_str(" ORDER BY m.year DESC, m.semester DESC, m.created_at DESC");

        let mut query = sqlx::query_as::<_, MarkRow>(&sql).bind(student_id);
        if let Some(academic_year) = scope.academic_year.filter(|y| !y.is_empty()) {
            query = query.bind(academic_year);
        }
        if let Some(semester) = scope.semester {
            query = query.bind(semester);
        }
        if let Some(year) = scope.year {
            query = query.bind(year);
        }
        let marks: Vec<Mark> = query
            .fetch_all(db)
            .await?
            .into_iter()
            .map(Mark::from)
            .collect();

        let totals: Vec<i32> = marks.iter().map(|m| m.total_marks).collect();
        let statistics = StudentMarksStatistics {
            total_subjects: marks.len(),
            average_marks: average_str(&totals),
            highest_marks: totals.iter().copied().max().unwrap_or(0),
            lowest_marks: totals.iter().copied().min().unwrap_or(0),
            grade_distribution: grade_distribution(&marks),
        };

        Ok(StudentMarksData {
            student: StudentInfo {
                user_id: student.0,
                first_name: student.1,
                last_name: student.2,
                email: student.3,
                department: student.4,
            },
            marks,
            statistics,
        })
    }

    pub async fn get_by_subject(
        db: &PgPool,
        subject_id: Uuid,
        scope: MarkScopeParams,
    ) -> Result<SubjectMarksData, AppError> {
        let subject = sqlx::query_as::<_, (Uuid, String, String, i32)>(
            "SELECT id, subject_code, subject_name, credits FROM subjects WHERE id = $1",
        )
        .bind(subject_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Subject not found"))?;

        let mut sql = format!("{MARK_SELECT} WHERE m.subject = $1");
        let mut n = 1usize;
        if scope.academic_year.as_deref().is_some_and(|y| !y.is_empty()) {
            n += 1;
            sql.push_str(&format!(" AND m.academic_year = ${n}"));
        }
        if scope.semester.is_some() {
            n += 1;
            sql.push_str(&format!(" AND m.semester = ${n}"));
        }
        if scope.year.is_some() {
            n += 1;
            sql.push_str(&format!(" AND m.year = ${n}"));
        }
        sql.push_str(" ORDER BY m.total_marks DESC");

        let mut query = sqlx::query_as::<_, MarkRow>(&sql).bind(subject_id);
        if let Some(academic_year) = scope.academic_year.filter(|y| !y.is_empty()) {
            query = query.bind(academic_year);
        }
        if let Some(semester) = scope.semester {
            query = query.bind(semester);
        }
        if let Some(year) = scope.year {
            query = query.bind(year);
        }
        let marks: Vec<Mark> = query
            .fetch_all(db)
            .await?
            .into_iter()
            .map(Mark::from)
            .collect();

        let totals: Vec<i32> = marks.iter().map(|m| m.total_marks).collect();
        let statistics = SubjectMarksStatistics {
            total_students: marks.len(),
            average_marks: average_str(&totals),
            highest_marks: totals.iter().copied().max().unwrap_or(0),
            lowest_marks: totals.iter().copied().min().unwrap_or(0),
            pass_rate: pass_rate_str(&totals),
            grade_distribution: grade_distribution(&marks),
        };

        Ok(SubjectMarksData {
            subject: SubjectRef {
                id: subject.0,
                subject_code: subject.1,
                subject_name: subject.2,
                credits: subject.3,
            },
            marks,
            statistics,
        })
    }

    #[instrument(skip(db), fields(mark.id = %id))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<DeletedMarkRef, AppError> {
        let deleted = sqlx::query_as::<_, (Uuid, String, Uuid)>(
            "DELETE FROM marks WHERE id = $1 RETURNING id, student_id, subject",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Marks record not found"))?;

        info!(mark.id = %id, "Marks deleted");
        Ok(DeletedMarkRef {
            id: deleted.0,
            student_id: deleted.1,
            subject: deleted.2,
        })
    }

    /// Admin dashboard rollup over the whole marks table, optionally
    /// narrowed to a department and academic year.
    pub async fn get_statistics(
        db: &PgPool,
        params: MarkStatisticsParams,
    ) -> Result<MarksDashboardStatistics, AppError> {
        let mut sql = MARK_SELECT.to_string();
        let mut clauses: Vec<String> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(department_id) = params.department_id.filter(|s| !s.is_empty()) {
            clauses.push(format!(
                "UPPER(m.department_id) = UPPER(${})",
                binds.len() + 1
            ));
            binds.push(department_id);
        }
        if let Some(academic_year) = params.academic_year.filter(|s| !s.is_empty()) {
            clauses.push(format!("m.academic_year = ${}", binds.len() + 1));
            binds.push(academic_year);
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        let mut query = sqlx::query_as::<_, MarkRow>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let marks: Vec<Mark> = query
            .fetch_all(db)
            .await?
            .into_iter()
            .map(Mark::from)
            .collect();

        let totals: Vec<i32> = marks.iter().map(|m| m.total_marks).collect();
        let mut students: Vec<&str> = marks.iter().map(|m| m.student_id.as_str()).collect();
        students.sort_unstable();
        students.dedup();
        let mut subjects: Vec<Uuid> = marks.iter().map(|m| m.subject.id).collect();
        subjects.sort_unstable();
        subjects.dedup();

        let mut per_department: BTreeMap<String, Vec<i32>> = BTreeMap::new();
        for mark in &marks {
            per_department
                .entry(mark.department.department_id.clone())
                .or_default()
                .push(mark.total_marks);
        }
        let department_wise_stats = per_department
            .into_iter()
            .map(|(code, totals)| {
                (
                    code,
                    DepartmentWiseStats {
                        total_records: totals.len(),
                        average_marks: average_str(&totals),
                        pass_rate: pass_rate_str(&totals),
                    },
                )
            })
            .collect();

        Ok(MarksDashboardStatistics {
            total_marks_records: marks.len(),
            total_students: students.len(),
            total_subjects: subjects.len(),
            average_marks: average_str(&totals),
            pass_rate: pass_rate_str(&totals),
            grade_distribution: grade_distribution(&marks),
            department_wise_stats,
        })
    }
}

fn average_str(totals: &[i32]) -> String {
    if totals.is_empty() {
        return "0.00".to_string();
    }
    let sum: i64 = totals.iter().map(|&t| t as i64).sum();
    format!("{:.2}", sum as f64 / totals.len() as f64)
}

fn pass_rate_str(totals: &[i32]) -> String {
    if totals.is_empty() {
        return "0.00".to_string();
    }
    let passed = totals.iter().filter(|&&t| t >= PASS_THRESHOLD).count();
    format!("{:.2}", passed as f64 * 100.0 / totals.len() as f64)
}

fn grade_distribution(marks: &[Mark]) -> BTreeMap<String, i64> {
    let mut distribution = BTreeMap::new();
    for mark in marks {
        *distribution.entry(mark.grade.clone()).or_insert(0) += 1;
    }
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_is_two_decimal_string() {
        assert_eq!(average_str(&[150, 125]), "137.50");
        assert_eq!(average_str(&[100]), "100.00");
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average_str(&[]), "0.00");
    }

    #[test]
    fn pass_rate_counts_the_threshold_as_passing() {
        assert_eq!(pass_rate_str(&[100, 99, 150, 20]), "50.00");
        assert_eq!(pass_rate_str(&[]), "0.00");
    }
}
