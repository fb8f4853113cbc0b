mod helpers;

use helpers::{HOUR_MS, MockProvider, hourly};
use perp_metrics::{CombinedDataRequest, fetch_combined_data};

fn request(interval: &str, funding: u32, oi: u32, pv: u32) -> CombinedDataRequest {
    CombinedDataRequest {
        symbol: "ETHUSDT".to_string(),
        interval: interval.to_string(),
        funding_limit: funding,
        oi_limit: oi,
        price_volume_limit: pv,
    }
}

#[tokio::test]
async fn aligns_on_timestamps_shared_by_all_streams() {
    let provider = MockProvider::aligned(&[1, 2, 3], &[2, 3, 4], &[2, 3]);

    let dataset = fetch_combined_data(&provider, &CombinedDataRequest::default()).await;

    let times: Vec<i64> = dataset.timestamps().map(|t| t.timestamp_millis()).collect();
    assert_eq!(times, vec![2, 3]);

    let row = &dataset.rows()[0];
    assert_eq!(row.close, 2002.0);
    assert_eq!(row.volume, 10.0);
    assert_eq!(row.funding_rate, 0.0001);
    assert_eq!(row.open_interest, 502.0);
    assert_eq!(row.notional_value, 1_000_000.0);
}

#[tokio::test]
async fn funding_failure_empties_the_dataset() {
    let provider = MockProvider {
        funding: None,
        ..MockProvider::aligned(&[1, 2, 3], &[], &[1, 2, 3])
    };

    let dataset = fetch_combined_data(&provider, &CombinedDataRequest::default()).await;

    assert!(dataset.is_empty());
    // The other streams were still fetched
    assert_eq!(provider.candle_limits().len(), 1);
    assert!(!provider.page_calls().is_empty());
}

#[tokio::test]
async fn candle_failure_empties_the_dataset() {
    let provider = MockProvider {
        candles: None,
        ..MockProvider::aligned(&[], &[1, 2], &[1, 2])
    };

    let dataset = fetch_combined_data(&provider, &CombinedDataRequest::default()).await;

    assert!(dataset.is_empty());
}

#[tokio::test]
async fn disjoint_streams_give_an_empty_dataset() {
    let provider = MockProvider::aligned(&[1, 2], &[3, 4], &[5, 6]);

    let dataset = fetch_combined_data(&provider, &CombinedDataRequest::default()).await;

    assert!(dataset.is_empty());
    assert!(dataset.summary().is_none());
}

#[tokio::test]
async fn short_interval_limits_reach_the_provider() {
    let times = hourly(3_000);
    let provider = MockProvider::aligned(&times, &times, &times);

    let dataset = fetch_combined_data(&provider, &request("1h", 300, 2_000, 800)).await;

    // oi = min(2000, 800), candles = min(800, 300); funding keeps its own limit
    assert_eq!(provider.candle_limits(), vec![300]);
    assert_eq!(provider.funding_limits(), vec![300]);
    let pages: Vec<u32> = provider.page_calls().iter().map(|c| c.limit).collect();
    assert_eq!(pages, vec![500, 300]);

    assert_eq!(dataset.len(), 300);
    assert_eq!(
        dataset.timestamps().last().map(|t| t.timestamp_millis()),
        Some(3_000 * HOUR_MS)
    );
}

#[tokio::test]
async fn long_interval_limits_pass_through() {
    let times = hourly(3_000);
    let provider = MockProvider::aligned(&times, &times, &times);

    let dataset = fetch_combined_data(&provider, &request("8h", 300, 1_200, 800)).await;

    assert_eq!(provider.candle_limits(), vec![800]);
    assert_eq!(provider.funding_limits(), vec![300]);
    let pages: Vec<u32> = provider.page_calls().iter().map(|c| c.limit).collect();
    assert_eq!(pages, vec![500, 500, 200]);

    // Funding is the shallowest stream
    assert_eq!(dataset.len(), 300);
}

#[tokio::test]
async fn dataset_rows_are_ascending() {
    let provider = MockProvider::aligned(&hourly(50), &hourly(50), &hourly(50));

    let dataset = fetch_combined_data(&provider, &request("4h", 1_000, 500, 1_000)).await;

    assert_eq!(dataset.len(), 50);
    let times: Vec<_> = dataset.timestamps().collect();
    assert!(times.windows(2).all(|w| w[0] < w[1]));
}
