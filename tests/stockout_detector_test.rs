// ==========================================
// StockoutDetector 集成测试
// ==========================================
// 测试目标: 累计售罄率计算与商业性断货周识别
// 覆盖范围: 阈值穿越、零入库、单调性、确定性
// ==========================================

mod helpers;

use helpers::series_builder::{generated_batch, SeriesBuilder};
use season_loss_forecast::engine::StockoutDetector;

// ==========================================
// 测试用例 1: 首次穿越阈值
// ==========================================

#[test]
fn test_single_delivery_crosses_at_week_7() {
    println!("\n=== 测试：单次入库 100, 每周销售 10 ===");

    let builder = SeriesBuilder::new("DX25S01", "BK").single_delivery(100, &[10; 8]);
    let expected_date = builder.date_of(6);
    let series = builder.build();

    let event = StockoutDetector::new(0.70)
        .detect(&series.observations)
        .expect("70/100 应达到阈值");

    println!("  - 断货周: index={}, date={}", event.index, event.date);
    assert_eq!(event.index, 6, "第 7 周累计售罄率恰好为 70%");
    assert_eq!(event.date, expected_date);
}

#[test]
fn test_replenishment_delays_stockout() {
    // 第 5 周补货 50, 售罄率回落
    let series = SeriesBuilder::new("DX25S02", "NY")
        .weeks(&[100, 0, 0, 0, 50, 0, 0, 0], &[20, 20, 20, 10, 10, 10, 10, 20])
        .build();

    let curve = StockoutDetector::sell_through_curve(&series.observations);
    assert!((curve[3] - 0.70).abs() < 1e-12);
    assert!(curve[4] < curve[3], "补货后售罄率应下降");

    let event = StockoutDetector::detect_stockout(&series.observations, 0.70).unwrap();
    assert_eq!(event.index, 3);

    let later = StockoutDetector::detect_stockout(&series.observations, 0.75).unwrap();
    assert_eq!(later.index, 7, "100/150 < 0.75, 120/150 = 0.8");
}

#[test]
fn test_no_inbound_never_stocks_out() {
    let series = SeriesBuilder::new("DX25S03", "WH")
        .weeks(&[0; 6], &[3, 1, 4, 1, 5, 9])
        .build();

    assert!(StockoutDetector::sell_through_curve(&series.observations)
        .iter()
        .all(|st| *st == 0.0));
    assert!(StockoutDetector::new(0.01).detect(&series.observations).is_none());
}

// ==========================================
// 测试用例 2: 售罄率单调性
// ==========================================

#[test]
fn test_sell_through_monotonic_in_sale() {
    for cum_inbound in [1u64, 7, 100, 12_345] {
        let mut previous = StockoutDetector::sell_through(0, cum_inbound);
        for cum_sale in 1..500u64 {
            let current = StockoutDetector::sell_through(cum_sale, cum_inbound);
            assert!(current >= previous, "固定入库 {} 时售罄率应随销售单调不减", cum_inbound);
            previous = current;
        }
    }
}

#[test]
fn test_sell_through_monotonic_in_inbound() {
    for cum_sale in [0u64, 1, 55, 9_999] {
        let mut previous = StockoutDetector::sell_through(cum_sale, 1);
        for cum_inbound in 2..500u64 {
            let current = StockoutDetector::sell_through(cum_sale, cum_inbound);
            assert!(current <= previous, "固定销售 {} 时售罄率应随入库单调不增", cum_sale);
            previous = current;
        }
    }
    // 零入库固定为 0
    assert_eq!(StockoutDetector::sell_through(10, 0), 0.0);
}

// ==========================================
// 测试用例 3: 确定性与阈值单调
// ==========================================

#[test]
fn test_detection_is_deterministic() {
    for series in generated_batch(60, 7) {
        let first = StockoutDetector::detect_stockout(&series.observations, 0.7);
        for _ in 0..3 {
            assert_eq!(StockoutDetector::detect_stockout(&series.observations, 0.7), first);
        }
    }
}

#[test]
fn test_lower_threshold_never_returns_later_index() {
    let thresholds = [0.3, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

    for series in generated_batch(120, 42) {
        for pair in thresholds.windows(2) {
            let (low, high) = (pair[0], pair[1]);
            if let Some(high_event) = StockoutDetector::detect_stockout(&series.observations, high) {
                let low_event = StockoutDetector::detect_stockout(&series.observations, low)
                    .expect("高阈值能识别时低阈值必然能识别");
                assert!(
                    low_event.index <= high_event.index,
                    "{}: 阈值 {} → {}, 阈值 {} → {}",
                    series.key,
                    low,
                    low_event.index,
                    high,
                    high_event.index
                );
            }
        }
    }
}
