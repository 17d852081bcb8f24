//! Conversions from wire types to domain types for price history.

use super::wire::{HistoryData, HistoryPointResponse};
use super::{sort_by_timestamp, HistoryPoint, HistorySeries};

impl From<HistoryPointResponse> for HistoryPoint {
    fn from(p: HistoryPointResponse) -> Self {
        Self {
            price: p.price.unwrap_or_default(),
            timestamp: p.timestamp,
        }
    }
}

impl From<HistoryData> for HistorySeries {
    fn from(data: HistoryData) -> Self {
        let mut points: Vec<HistoryPoint> =
            data.history.into_iter().map(HistoryPoint::from).collect();
        sort_by_timestamp(&mut points);
        Self {
            change: data
                .change
                .and_then(|c| c.trim().parse::<f64>().ok())
                .filter(|c| c.is_finite()),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::history::wire::HistoryResponse;

    const HISTORY_BODY: &str = r#"{
        "status": "success",
        "data": {
            "change": "-1.25",
            "history": [
                {"price": "50300", "timestamp": 300},
                {"price": "50100", "timestamp": 100},
                {"price": null, "timestamp": 200}
            ]
        }
    }"#;

    #[test]
    fn test_history_series_is_sorted_with_change() {
        let resp: HistoryResponse = serde_json::from_str(HISTORY_BODY).unwrap();
        let series = HistorySeries::from(resp.data);
        assert_eq!(series.change, Some(-1.25));
        let ts: Vec<i64> = series.points.iter().map(|p| p.timestamp).collect();
        assert_eq!(ts, [100, 200, 300]);
        assert_eq!(series.points[1].price, "");
        assert_eq!(series.points[1].price_value(), 0.0);
    }

    #[test]
    fn test_history_without_change() {
        let body = r#"{"status":"success","data":{"history":[]}}"#;
        let resp: HistoryResponse = serde_json::from_str(body).unwrap();
        let series = HistorySeries::from(resp.data);
        assert_eq!(series.change, None);
        assert!(series.points.is_empty());
    }
}
