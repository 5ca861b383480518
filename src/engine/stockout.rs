// ==========================================
// 季节款机会损失预测系统 - 商业性断货识别
// ==========================================
// 规则: 累计售罄率 = 累计销售 / 累计入库 (累计入库为 0 或结果非有限时取 0)
//       首个售罄率 >= 阈值的周即为商业性断货周
// 红线: 无状态、无副作用、无 I/O 操作
// 前置: 最短序列长度由调用方过滤,本模块不检查
// ==========================================

use crate::domain::forecast::StockoutEvent;
use crate::domain::series::WeeklyObservation;

// ==========================================
// StockoutDetector - 断货识别器
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct StockoutDetector {
    threshold: f64,
}

impl StockoutDetector {
    /// 创建断货识别器
    ///
    /// # 参数
    /// - threshold: 售罄率阈值, (0, 1]，由 ForecastConfig::validate 保证
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 识别本序列的断货周
    pub fn detect(&self, observations: &[WeeklyObservation]) -> Option<StockoutEvent> {
        Self::detect_stockout(observations, self.threshold)
    }

    /// 识别断货周（纯函数版本）
    ///
    /// # 返回
    /// - Some(StockoutEvent): 首个售罄率 >= threshold 的周
    /// - None: 全季未达阈值（正常结论，非错误）
    pub fn detect_stockout(
        observations: &[WeeklyObservation],
        threshold: f64,
    ) -> Option<StockoutEvent> {
        Self::sell_through_curve(observations)
            .into_iter()
            .position(|st| st >= threshold)
            .map(|index| StockoutEvent {
                index,
                date: observations[index].date,
            })
    }

    /// 逐周累计售罄率
    pub fn sell_through_curve(observations: &[WeeklyObservation]) -> Vec<f64> {
        let mut cum_inbound: u64 = 0;
        let mut cum_sale: u64 = 0;

        observations
            .iter()
            .map(|obs| {
                cum_inbound += u64::from(obs.inbound_qty);
                cum_sale += u64::from(obs.sale_qty);
                Self::sell_through(cum_sale, cum_inbound)
            })
            .collect()
    }

    /// 单点售罄率
    pub fn sell_through(cum_sale: u64, cum_inbound: u64) -> f64 {
        if cum_inbound == 0 {
            return 0.0;
        }
        let ratio = cum_sale as f64 / cum_inbound as f64;
        if ratio.is_finite() {
            ratio
        } else {
            0.0
        }
    }
}
