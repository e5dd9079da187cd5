//! Analysis seam and the stubbed implementation.
//!
//! [`Analyzer`] is the pluggable boundary between the task machinery and
//! the actual analysis logic. [`StubAnalyzer`] stands in for a real
//! multi-agent pipeline: it sleeps for a fixed delay, then synthesizes a
//! fixed-shape payload from the query string.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default simulated analysis duration.
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_secs(10);

/// Tabular portion of an analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    /// Rows of mixed scalar values (strings and numbers).
    pub rows: Vec<Vec<Value>>,
}

/// Chart description portion of an analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: String,
    #[serde(rename = "xAxis")]
    pub x_axis: Vec<String>,
    pub series: Vec<i64>,
}

/// Completed analysis payload.
///
/// The task machinery treats this as opaque: it is produced by an
/// [`Analyzer`] and passed through to the poll endpoint unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub answer: String,
    pub table: TableData,
    pub chart: ChartData,
}

/// Pluggable analysis boundary.
///
/// Implementations must be safe to share across concurrently running
/// tasks; the runner holds a single instance behind an `Arc`.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Run the analysis for `query`, producing the result payload.
    async fn analyze(&self, query: &str) -> Result<AnalysisResult>;
}

/// Fixed-delay stand-in for a real analysis pipeline.
///
/// Sleeps for the configured delay, then returns a deterministic payload:
/// the answer text interpolates the query verbatim, while the table and
/// chart fields are fixed literal data.
#[derive(Debug, Clone)]
pub struct StubAnalyzer {
    delay: Duration,
}

impl StubAnalyzer {
    /// Create a stub analyzer with the default 10 second delay.
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_ANALYSIS_DELAY,
        }
    }

    /// Override the simulated delay (tests use a near-zero delay).
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for StubAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Analyzer for StubAnalyzer {
    async fn analyze(&self, query: &str) -> Result<AnalysisResult> {
        tokio::time::sleep(self.delay).await;

        Ok(AnalysisResult {
            answer: format!("关于 '{query}' 的分析结果如下：水果类商品销量最高。"),
            table: TableData {
                columns: vec!["类目".to_string(), "销量".to_string()],
                rows: vec![
                    vec![json!("水果"), json!(18320)],
                    vec![json!("服饰"), json!(13200)],
                    vec![json!("母婴"), json!(12800)],
                ],
            },
            chart: ChartData {
                title: "销量前3类目".to_string(),
                chart_type: "bar".to_string(),
                x_axis: vec![
                    "水果".to_string(),
                    "服饰".to_string(),
                    "母婴".to_string(),
                ],
                series: vec![18320, 13200, 12800],
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn stub_interpolates_query_into_answer() {
        let analyzer = StubAnalyzer::with_delay(Duration::ZERO);
        let result = analyzer.analyze("fruit sales").await.unwrap();
        assert!(result.answer.contains("fruit sales"));
    }

    #[tokio::test]
    async fn stub_payload_is_deterministic_across_queries() {
        let analyzer = StubAnalyzer::with_delay(Duration::ZERO);
        let a = analyzer.analyze("query-a").await.unwrap();
        let b = analyzer.analyze("query-b").await.unwrap();
        // Only the answer derives from the query
        assert_eq!(a.table, b.table);
        assert_eq!(a.chart, b.chart);
        assert_ne!(a.answer, b.answer);
    }

    #[tokio::test]
    async fn result_serializes_with_wire_field_names() {
        let analyzer = StubAnalyzer::with_delay(Duration::ZERO);
        let result = analyzer.analyze("fruit sales").await.unwrap();

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "answer": "关于 'fruit sales' 的分析结果如下：水果类商品销量最高。",
                "table": {
                    "columns": ["类目", "销量"],
                    "rows": [["水果", 18320], ["服饰", 13200], ["母婴", 12800]]
                },
                "chart": {
                    "title": "销量前3类目",
                    "type": "bar",
                    "xAxis": ["水果", "服饰", "母婴"],
                    "series": [18320, 13200, 12800]
                }
            })
        );
    }

    #[test]
    fn result_round_trips_through_json() {
        let original = AnalysisResult {
            answer: "answer".to_string(),
            table: TableData {
                columns: vec!["col".to_string()],
                rows: vec![vec![json!("cell"), json!(1)]],
            },
            chart: ChartData {
                title: "title".to_string(),
                chart_type: "bar".to_string(),
                x_axis: vec!["x".to_string()],
                series: vec![1],
            },
        };

        let text = serde_json::to_string(&original).unwrap();
        let parsed: AnalysisResult = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, original);
    }
}
