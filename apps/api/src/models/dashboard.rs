//! Row shapes for the dashboard stat and chart endpoints. Keys mirror the
//! column aliases the dashboard frontend expects, so the per-chart structs
//! stay separate even where the shapes look alike.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Headline candidate counters for the stats card.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CandidateStatsRow {
    pub total_candidates: i64,
    pub passed_prescreening: i64,
    pub failed_prescreening: i64,
    pub pending_prescreening: i64,
    pub offered: i64,
    pub rejected: i64,
    pub l1_candidates: i64,
    pub l2_candidates: i64,
    pub final_candidates: i64,
}

/// Seven-day activity row embedded in the stats payload.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecentActivityRow {
    pub candidate_name: String,
    pub prescreening_status: Option<String>,
    pub recruitment_phase: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SkillDistributionRow {
    pub primary_skill: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PhaseDistributionRow {
    pub recruitment_phase: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DateCountRow {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StatusCountRow {
    pub status: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PhaseCountRow {
    pub phase: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SkillCountRow {
    pub skill: String,
    pub count: i64,
}

/// Activity-feed row for the standalone activities endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ActivityRow {
    pub id: i32,
    pub candidate_name: String,
    pub candidate_email: String,
    pub prescreening_status: Option<String>,
    pub recruitment_phase: Option<String>,
    pub offer_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Counters for the quick-stats strip.
#[derive(Debug, Clone, Serialize)]
pub struct QuickStats {
    pub today: i64,
    pub week: i64,
    pub month: i64,
    pub pending: i64,
}
