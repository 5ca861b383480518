// ==========================================
// 周度序列构建器 - 用于集成测试
// ==========================================

use chrono::{Duration, NaiveDate};
use season_loss_forecast::config::ForecastConfig;
use season_loss_forecast::domain::{SeriesKey, WeeklyObservation, WeeklyRow, WeeklySeries};

/// 默认首周（周日）
pub fn season_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 默认测试配置: 季末 2025-09-30, 硬截止 2025-10-30
pub fn test_config() -> ForecastConfig {
    ForecastConfig::new(ymd(2025, 9, 30), ymd(2025, 10, 30))
}

// ==========================================
// SeriesBuilder
// ==========================================

pub struct SeriesBuilder {
    key: SeriesKey,
    start: NaiveDate,
    weeks: Vec<(u32, u32)>,
}

impl SeriesBuilder {
    pub fn new(style_code: &str, color_code: &str) -> Self {
        Self {
            key: SeriesKey::new(style_code, color_code),
            start: season_start(),
            weeks: Vec::new(),
        }
    }

    pub fn starting(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    pub fn week(mut self, inbound_qty: u32, sale_qty: u32) -> Self {
        self.weeks.push((inbound_qty, sale_qty));
        self
    }

    /// 批量追加周，inbound 与 sale 按位置配对
    pub fn weeks(mut self, inbound: &[u32], sale: &[u32]) -> Self {
        assert_eq!(inbound.len(), sale.len(), "入库与销售周数必须一致");
        self.weeks.extend(inbound.iter().copied().zip(sale.iter().copied()));
        self
    }

    /// 首周入库 inbound, 之后每周只有销售
    pub fn single_delivery(self, inbound: u32, sale: &[u32]) -> Self {
        let mut inbound_weeks = vec![0; sale.len()];
        if let Some(first) = inbound_weeks.first_mut() {
            *first = inbound;
        }
        self.weeks(&inbound_weeks, sale)
    }

    pub fn date_of(&self, index: usize) -> NaiveDate {
        self.start + Duration::weeks(index as i64)
    }

    pub fn build(self) -> WeeklySeries {
        let observations = self
            .weeks
            .iter()
            .enumerate()
            .map(|(i, &(inbound, sale))| {
                WeeklyObservation::new(self.start + Duration::weeks(i as i64), inbound, sale)
            })
            .collect();
        WeeklySeries::new(self.key, observations)
    }

    /// 展开为加载器格式的扁平行
    pub fn rows(self) -> Vec<WeeklyRow> {
        let series = self.build();
        series
            .observations
            .iter()
            .map(|o| WeeklyRow {
                style_code: series.key.style_code.clone(),
                color_code: series.key.color_code.clone(),
                date: o.date,
                inbound_qty: o.inbound_qty,
                sale_qty: o.sale_qty,
            })
            .collect()
    }
}

// ==========================================
// 确定性伪随机序列（无需 rand）
// ==========================================

/// 线性同余生成器
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self, bound: u32) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) % u64::from(bound.max(1))) as u32
    }
}

/// 生成 count 条长度与销量各异的序列
pub fn generated_batch(count: usize, seed: u64) -> Vec<WeeklySeries> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|i| {
            let len = 1 + rng.next_u32(30) as usize;
            let mut builder = SeriesBuilder::new(&format!("G{:03}", i / 3), &format!("C{}", i % 3));
            for w in 0..len {
                let inbound = if w == 0 || rng.next_u32(5) == 0 {
                    rng.next_u32(200)
                } else {
                    0
                };
                builder = builder.week(inbound, rng.next_u32(40));
            }
            builder.build()
        })
        .collect()
}
