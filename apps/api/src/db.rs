use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS analysis_history (
        id BIGSERIAL PRIMARY KEY,
        session_id UUID NOT NULL,
        resume_filename TEXT NOT NULL,
        jd_filename TEXT NOT NULL,
        match_score DOUBLE PRECISION NOT NULL,
        matched_keywords JSONB NOT NULL DEFAULT '[]',
        missing_keywords JSONB NOT NULL DEFAULT '[]',
        improvement_suggestions JSONB NOT NULL DEFAULT '[]',
        ats_score DOUBLE PRECISION NOT NULL,
        completeness_score DOUBLE PRECISION NOT NULL,
        action_verbs_score DOUBLE PRECISION NOT NULL,
        quantifiable_impact_score DOUBLE PRECISION NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS analysis_history_session_idx ON analysis_history (session_id, created_at DESC)",
    r#"
    CREATE TABLE IF NOT EXISTS comparison_history (
        id BIGSERIAL PRIMARY KEY,
        session_id UUID NOT NULL,
        jd_filename TEXT NOT NULL,
        resume_filenames JSONB NOT NULL,
        scores JSONB NOT NULL,
        best_match TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS comparison_history_session_idx ON comparison_history (session_id, created_at DESC)",
];

/// Creates the history tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("History schema ready");
    Ok(())
}
