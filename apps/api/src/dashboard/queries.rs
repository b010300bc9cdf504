use std::str::FromStr;

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::dashboard::{
    ActivityRow, CandidateStatsRow, DateCountRow, PhaseCountRow, PhaseDistributionRow, QuickStats,
    RecentActivityRow, SkillCountRow, SkillDistributionRow, StatusCountRow,
};

/// Chart families the dashboard can request. Anything else is rejected
/// before a query is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    CandidatesByDate,
    StatusDistribution,
    PhaseDistribution,
    SkillDistribution,
}

impl FromStr for ChartType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "candidates_by_date" => Ok(ChartType::CandidatesByDate),
            "status_distribution" => Ok(ChartType::StatusDistribution),
            "phase_distribution" => Ok(ChartType::PhaseDistribution),
            "skill_distribution" => Ok(ChartType::SkillDistribution),
            _ => Err(AppError::Validation("Invalid chart type".to_string())),
        }
    }
}

/// Date window for chart queries. Periods other than 7, 30, and 90 days
/// fall back to no filter at all.
fn period_filter(period: &str) -> &'static str {
    match period {
        "7" => "AND created_at >= CURRENT_DATE - INTERVAL '7 days'",
        "30" => "AND created_at >= CURRENT_DATE - INTERVAL '30 days'",
        "90" => "AND created_at >= CURRENT_DATE - INTERVAL '90 days'",
        _ => "",
    }
}

pub async fn candidate_stats(pool: &PgPool) -> Result<CandidateStatsRow, AppError> {
    let row = sqlx::query_as::<_, CandidateStatsRow>(
        "SELECT
            COUNT(*) AS total_candidates,
            COUNT(CASE WHEN prescreening_status = 'Passed' THEN 1 END) AS passed_prescreening,
            COUNT(CASE WHEN prescreening_status = 'Failed' THEN 1 END) AS failed_prescreening,
            COUNT(CASE WHEN prescreening_status = 'Pending' THEN 1 END) AS pending_prescreening,
            COUNT(CASE WHEN offer_status = 'Offered' THEN 1 END) AS offered,
            COUNT(CASE WHEN offer_status = 'Rejected' THEN 1 END) AS rejected,
            COUNT(CASE WHEN recruitment_phase = 'L1' THEN 1 END) AS l1_candidates,
            COUNT(CASE WHEN recruitment_phase = 'L2' THEN 1 END) AS l2_candidates,
            COUNT(CASE WHEN recruitment_phase = 'Final' THEN 1 END) AS final_candidates
         FROM candidate_info
         WHERE visible = true",
    )
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn hr_count(pool: &PgPool) -> Result<i64, AppError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM hr_info")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn admin_count(pool: &PgPool) -> Result<i64, AppError> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin_table WHERE status = 'Enable'")
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn panel_count(pool: &PgPool) -> Result<i64, AppError> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM panel_details WHERE status = 'Active'")
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Candidates touched in the last seven days, newest first.
pub async fn recent_activities(pool: &PgPool) -> Result<Vec<RecentActivityRow>, AppError> {
    let rows = sqlx::query_as::<_, RecentActivityRow>(
        "SELECT candidate_name, prescreening_status, recruitment_phase, created_at
         FROM candidate_info
         WHERE visible = true
           AND created_at >= CURRENT_DATE - INTERVAL '7 days'
         ORDER BY created_at DESC
         LIMIT 10",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn skill_distribution(pool: &PgPool) -> Result<Vec<SkillDistributionRow>, AppError> {
    let rows = sqlx::query_as::<_, SkillDistributionRow>(
        "SELECT primary_skill, COUNT(*) AS count
         FROM candidate_info
         WHERE visible = true AND primary_skill IS NOT NULL
         GROUP BY primary_skill
         ORDER BY count DESC
         LIMIT 10",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn phase_distribution(pool: &PgPool) -> Result<Vec<PhaseDistributionRow>, AppError> {
    let rows = sqlx::query_as::<_, PhaseDistributionRow>(
        "SELECT recruitment_phase, COUNT(*) AS count
         FROM candidate_info
         WHERE visible = true AND recruitment_phase IS NOT NULL
         GROUP BY recruitment_phase
         ORDER BY count DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn candidates_by_date(pool: &PgPool, period: &str) -> Result<Vec<DateCountRow>, AppError> {
    let sql = format!(
        "SELECT DATE(created_at) AS date, COUNT(*) AS count
         FROM candidate_info
         WHERE visible = true {}
         GROUP BY DATE(created_at)
         ORDER BY date",
        period_filter(period)
    );
    let rows = sqlx::query_as::<_, DateCountRow>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn status_chart(pool: &PgPool, period: &str) -> Result<Vec<StatusCountRow>, AppError> {
    let sql = format!(
        "SELECT prescreening_status AS status, COUNT(*) AS count
         FROM candidate_info
         WHERE visible = true {}
         GROUP BY prescreening_status",
        period_filter(period)
    );
    let rows = sqlx::query_as::<_, StatusCountRow>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn phase_chart(pool: &PgPool, period: &str) -> Result<Vec<PhaseCountRow>, AppError> {
    let sql = format!(
        "SELECT recruitment_phase AS phase, COUNT(*) AS count
         FROM candidate_info
         WHERE visible = true {}
         GROUP BY recruitment_phase",
        period_filter(period)
    );
    let rows = sqlx::query_as::<_, PhaseCountRow>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn skill_chart(pool: &PgPool, period: &str) -> Result<Vec<SkillCountRow>, AppError> {
    let sql = format!(
        "SELECT primary_skill AS skill, COUNT(*) AS count
         FROM candidate_info
         WHERE visible = true AND primary_skill IS NOT NULL {}
         GROUP BY primary_skill
         ORDER BY count DESC
         LIMIT 10",
        period_filter(period)
    );
    let rows = sqlx::query_as::<_, SkillCountRow>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Activity feed, newest update first.
pub async fn activities(pool: &PgPool, limit: i64) -> Result<Vec<ActivityRow>, AppError> {
    let rows = sqlx::query_as::<_, ActivityRow>(
        "SELECT id, candidate_name, candidate_email, prescreening_status, recruitment_phase,
                offer_status, created_at, updated_at
         FROM candidate_info
         WHERE visible = true
         ORDER BY updated_at DESC
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

async fn visible_count(pool: &PgPool, predicate: &str) -> Result<i64, AppError> {
    let sql = format!("SELECT COUNT(*) FROM candidate_info WHERE visible = true AND {predicate}");
    let count = sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await?;
    Ok(count)
}

/// The four quick-stat counters, fetched concurrently.
pub async fn quick_stats(pool: &PgPool) -> Result<QuickStats, AppError> {
    let (today, week, month, pending) = tokio::join!(
        visible_count(pool, "DATE(created_at) = CURRENT_DATE"),
        visible_count(pool, "created_at >= CURRENT_DATE - INTERVAL '7 days'"),
        visible_count(pool, "created_at >= CURRENT_DATE - INTERVAL '30 days'"),
        visible_count(
            pool,
            "(prescreening_status = 'Pending' OR recruitment_phase = 'L1')"
        ),
    );
    Ok(QuickStats {
        today: today?,
        week: week?,
        month: month?,
        pending: pending?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_type_parses_known_values() {
        assert_eq!(
            "candidates_by_date".parse::<ChartType>().ok(),
            Some(ChartType::CandidatesByDate)
        );
        assert_eq!(
            "skill_distribution".parse::<ChartType>().ok(),
            Some(ChartType::SkillDistribution)
        );
    }

    #[test]
    fn test_chart_type_rejects_unknown_values() {
        assert!(matches!(
            "pie".parse::<ChartType>(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_period_filter_windows() {
        assert!(period_filter("7").contains("'7 days'"));
        assert!(period_filter("30").contains("'30 days'"));
        assert!(period_filter("90").contains("'90 days'"));
        assert_eq!(period_filter("365"), "");
        assert_eq!(period_filter("all"), "");
    }
}
