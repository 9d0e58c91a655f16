//! Completeness reporting for an imputation run.

use serde::Serialize;

/// Outcome summary of one imputation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Rows with a missing target value before imputation started. This
    /// denominator is fixed up front and never re-evaluated mid-run.
    pub attempted: usize,
    /// Rows that ended up with a known value.
    pub resolved: usize,
    /// `resolved / attempted * 100`; omitted when nothing was attempted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_rate_percent: Option<f64>,
}

impl Report {
    /// Derive the report from the fixed pre-run missing count and a post-run
    /// recount of still-missing rows.
    pub fn summarize(attempted: usize, still_missing_after: usize) -> Self {
        let resolved = attempted.saturating_sub(still_missing_after);
        let success_rate_percent = if attempted > 0 {
            Some(resolved as f64 / attempted as f64 * 100.0)
        } else {
            None
        };
        Self {
            attempted,
            resolved,
            success_rate_percent,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.success_rate_percent {
            Some(rate) => write!(
                f,
                "{} attempted, {} resolved ({:.1}% success)",
                self.attempted, self.resolved, rate
            ),
            None => write!(f, "no rows needed imputation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_arithmetic() {
        let report = Report::summarize(10, 2);
        assert_eq!(report.attempted, 10);
        assert_eq!(report.resolved, 8);
        assert_eq!(report.success_rate_percent, Some(80.0));
    }

    #[test]
    fn test_nothing_attempted_has_no_rate() {
        let report = Report::summarize(0, 0);
        assert_eq!(report.attempted, 0);
        assert_eq!(report.resolved, 0);
        assert_eq!(report.success_rate_percent, None);
        assert_eq!(report.to_string(), "no rows needed imputation");
    }

    #[test]
    fn test_full_success() {
        let report = Report::summarize(1, 0);
        assert_eq!(report.success_rate_percent, Some(100.0));
        assert_eq!(report.to_string(), "1 attempted, 1 resolved (100.0% success)");
    }

    #[test]
    fn test_rate_omitted_from_json_when_none() {
        let json = serde_json::to_string(&Report::summarize(0, 0)).unwrap();
        assert_eq!(json, r#"{"attempted":0,"resolved":0}"#);
    }
}
