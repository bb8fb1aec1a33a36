//! PostgreSQL store for analysis sessions, ticker results and indicator data

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, error, info};

use super::{ResultStore, StoreError};
use crate::models::session::AnalysisSession;
use crate::models::signal::{AnalysisOutcome, AnalysisResult, Signal};
use crate::signals::categories::CategoryScores;

const SCHEMA: [&str; 7] = [
    "CREATE TABLE IF NOT EXISTS analysis_sessions (
        id SERIAL PRIMARY KEY,
        session_id VARCHAR(50) UNIQUE NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        weights JSONB NOT NULL,
        buy_threshold DOUBLE PRECISION,
        sell_threshold DOUBLE PRECISION,
        total_tickers INTEGER,
        status VARCHAR(20) DEFAULT 'pending'
    )",
    "CREATE TABLE IF NOT EXISTS ticker_results (
        id SERIAL PRIMARY KEY,
        session_id VARCHAR(50) REFERENCES analysis_sessions(session_id),
        ticker VARCHAR(10) NOT NULL,
        current_price DOUBLE PRECISION,
        momentum_score DOUBLE PRECISION,
        trend_score DOUBLE PRECISION,
        volatility_score DOUBLE PRECISION,
        strength_score DOUBLE PRECISION,
        support_resistance_score DOUBLE PRECISION,
        final_weighted_score DOUBLE PRECISION,
        signal VARCHAR(4) CHECK (signal IN ('BUY', 'HOLD', 'SELL')),
        error_message TEXT,
        created_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS indicator_data (
        id SERIAL PRIMARY KEY,
        session_id VARCHAR(50) REFERENCES analysis_sessions(session_id),
        ticker VARCHAR(10) NOT NULL,
        indicator_name VARCHAR(50) NOT NULL,
        indicator_value DOUBLE PRECISION,
        normalized_value DOUBLE PRECISION,
        created_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE INDEX IF NOT EXISTS idx_ticker_results_session_id ON ticker_results(session_id)",
    "CREATE INDEX IF NOT EXISTS idx_ticker_results_ticker ON ticker_results(ticker)",
    "CREATE INDEX IF NOT EXISTS idx_indicator_data_session_id ON indicator_data(session_id)",
    "CREATE INDEX IF NOT EXISTS idx_indicator_data_ticker ON indicator_data(ticker)",
];

pub struct PostgresStore {
    client: Mutex<Client>,
}

impl PostgresStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let (client, connection) = tokio_postgres::connect(database_url, NoTls)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "PostgreSQL connection error");
            }
        });

        let store = Self {
            client: Mutex::new(client),
        };
        store.init_schema().await?;
        info!("PostgreSQL result store ready");
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        let client = self.client.lock().await;
        for statement in SCHEMA {
            client.execute(statement, &[]).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ResultStore for PostgresStore {
    async fn save_session(&self, session: &AnalysisSession) -> Result<(), StoreError> {
        let weights = serde_json::to_value(session.weights)?;
        let total_tickers = i32::try_from(session.results.len())
            .map_err(|_| StoreError::InvalidRow("too many tickers".to_string()))?;

        let mut client = self.client.lock().await;
        let tx = client.transaction().await?;

        tx.execute(
            "INSERT INTO analysis_sessions
                (session_id, created_at, weights, buy_threshold, sell_threshold, total_tickers, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (session_id) DO UPDATE SET
                weights = EXCLUDED.weights,
                buy_threshold = EXCLUDED.buy_threshold,
                sell_threshold = EXCLUDED.sell_threshold,
                total_tickers = EXCLUDED.total_tickers,
                status = EXCLUDED.status",
            &[
                &session.session_id,
                &session.created_at,
                &weights,
                &session.thresholds.buy(),
                &session.thresholds.sell(),
                &total_tickers,
                &session.status.as_str(),
            ],
        )
        .await?;

        tx.execute(
            "DELETE FROM ticker_results WHERE session_id = $1",
            &[&session.session_id],
        )
        .await?;
        tx.execute(
            "DELETE FROM indicator_data WHERE session_id = $1",
            &[&session.session_id],
        )
        .await?;

        for result in &session.results {
            let scores = result.category_scores();
            let signal = result.signal().map(|s| s.as_str());
            tx.execute(
                "INSERT INTO ticker_results
                    (session_id, ticker, current_price, momentum_score, trend_score,
                     volatility_score, strength_score, support_resistance_score,
                     final_weighted_score, signal, error_message)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
                &[
                    &session.session_id,
                    &result.ticker,
                    &result.current_price(),
                    &scores.map(|s| s.momentum),
                    &scores.map(|s| s.trend),
                    &scores.map(|s| s.volatility),
                    &scores.map(|s| s.strength),
                    &scores.map(|s| s.support_resistance),
                    &result.final_score(),
                    &signal,
                    &result.error_message(),
                ],
            )
            .await?;
        }

        for (ticker, breakdown) in &session.indicator_scores {
            for indicator in breakdown {
                tx.execute(
                    "INSERT INTO indicator_data
                        (session_id, ticker, indicator_name, indicator_value, normalized_value)
                     VALUES ($1, $2, $3, $4, $5)",
                    &[
                        &session.session_id,
                        ticker,
                        &indicator.name,
                        &indicator.raw_value,
                        &indicator.score,
                    ],
                )
                .await?;
            }
        }

        tx.commit().await?;
        debug!(session_id = %session.session_id, results = session.results.len(), "session stored");
        Ok(())
    }

    async fn load_results(&self, session_id: &str) -> Result<Vec<AnalysisResult>, StoreError> {
        let client = self.client.lock().await;

        let exists = client
            .query_opt(
                "SELECT 1 FROM analysis_sessions WHERE session_id = $1",
                &[&session_id],
            )
            .await?;
        if exists.is_none() {
            return Err(StoreError::NotFound(session_id.to_string()));
        }

        let rows = client
            .query(
                "SELECT ticker, current_price, momentum_score, trend_score, volatility_score,
                        strength_score, support_resistance_score, final_weighted_score,
                        signal, error_message
                 FROM ticker_results WHERE session_id = $1 ORDER BY id",
                &[&session_id],
            )
            .await?;

        rows.iter().map(result_from_row).collect()
    }
}

fn result_from_row(row: &Row) -> Result<AnalysisResult, StoreError> {
    let ticker: String = row.try_get(0)?;
    let current_price: Option<f64> = row.try_get(1)?;
    let error_message: Option<String> = row.try_get(9)?;

    if let Some(message) = error_message {
        return Ok(AnalysisResult::failed(ticker, current_price, message));
    }

    let missing = |column: &str| StoreError::InvalidRow(format!("{ticker}: missing {column}"));
    let score = |index: usize, column: &str| -> Result<f64, StoreError> {
        row.try_get::<_, Option<f64>>(index)?
            .ok_or_else(|| missing(column))
    };

    let category_scores = CategoryScores {
        momentum: score(2, "momentum_score")?,
        trend: score(3, "trend_score")?,
        volatility: score(4, "volatility_score")?,
        strength: score(5, "strength_score")?,
        support_resistance: score(6, "support_resistance_score")?,
    };
    let final_weighted_score = score(7, "final_weighted_score")?;
    let signal_text: Option<String> = row.try_get(8)?;
    let signal = signal_text
        .as_deref()
        .and_then(Signal::parse)
        .ok_or_else(|| missing("signal"))?;

    Ok(AnalysisResult {
        ticker: ticker.clone(),
        outcome: AnalysisOutcome::Scored {
            current_price: current_price.ok_or_else(|| missing("current_price"))?,
            category_scores,
            final_weighted_score,
            signal,
        },
    })
}
