//! Dashboard analytics.

use super::{Latency, Operation};
use crate::model::analytics::{
    self, DashboardMetrics, FunnelStage, GrowthPoint, MetricTile, PageStats, PeriodData,
    RealtimeMetrics, RevenuePoint, TrafficSource,
};
use crate::output::SerializeError;

#[derive(Debug, Clone, Default)]
pub struct AnalyticsService {
    latency: Latency,
}

impl AnalyticsService {
    pub fn new(latency: Latency) -> Self {
        AnalyticsService { latency }
    }

    pub fn dashboard_metrics(&self) -> DashboardMetrics {
        self.latency.wait(Operation::Dashboard);
        tracing::debug!("dashboard metrics");
        analytics::dashboard_metrics()
    }

    pub fn monthly_data(&self) -> Vec<PeriodData> {
        self.latency.wait(Operation::Monthly);
        tracing::debug!("monthly data");
        analytics::monthly_data()
    }

    pub fn revenue_series(&self) -> Vec<RevenuePoint> {
        self.latency.wait(Operation::Revenue);
        tracing::debug!("revenue series");
        analytics::revenue_series()
    }

    pub fn user_growth(&self) -> Vec<GrowthPoint> {
        self.latency.wait(Operation::Growth);
        tracing::debug!("user growth");
        analytics::user_growth()
    }

    /// The `limit` most viewed pages.
    pub fn top_pages(&self, limit: usize) -> Vec<PageStats> {
        self.latency.wait(Operation::TopPages);
        let mut pages = analytics::top_pages();
        pages.sort_by(|a, b| b.views.cmp(&a.views));
        pages.truncate(limit);
        tracing::debug!(limit, count = pages.len(), "top pages");
        pages
    }

    pub fn traffic_sources(&self) -> Vec<TrafficSource> {
        self.latency.wait(Operation::Traffic);
        tracing::debug!("traffic sources");
        analytics::traffic_sources()
    }

    pub fn conversion_funnel(&self) -> Vec<FunnelStage> {
        self.latency.wait(Operation::Funnel);
        tracing::debug!("conversion funnel");
        analytics::conversion_funnel()
    }

    pub fn metric_tiles(&self) -> Vec<MetricTile> {
        self.latency.wait(Operation::Tiles);
        tracing::debug!("metric tiles");
        analytics::metric_tiles()
    }

    pub fn realtime_metrics(&self) -> RealtimeMetrics {
        self.latency.wait(Operation::Realtime);
        tracing::debug!("realtime metrics");
        analytics::realtime_metrics()
    }

    /// Monthly revenue, users and orders as CSV.
    pub fn export_csv(&self) -> Result<String, SerializeError> {
        self.latency.wait(Operation::Export);
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        let csv_err = |e: csv::Error| SerializeError::Csv(e.to_string());

        writer
            .write_record(["Date", "Revenue", "Users", "Orders"])
            .map_err(csv_err)?;
        let rows = analytics::monthly_data();
        for row in &rows {
            writer
                .write_record([
                    row.period.clone(),
                    row.revenue.to_string(),
                    row.users.to_string(),
                    row.orders.to_string(),
                ])
                .map_err(csv_err)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| SerializeError::Csv(e.to_string()))?;
        tracing::debug!(rows = rows.len(), "exported analytics");
        String::from_utf8(bytes).map_err(|e| SerializeError::Csv(e.to_string()))
    }
}
