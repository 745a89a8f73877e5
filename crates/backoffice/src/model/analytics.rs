//! Analytics figures shown on the dashboard.
//!
//! All of it is static sample data; nothing is computed from the stores.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_users: u64,
    pub total_revenue: u64,
    pub total_orders: u64,
    pub total_products: u64,
    pub user_growth: f64,
    pub revenue_growth: f64,
    pub order_growth: f64,
    pub product_growth: f64,
}

/// Aggregates for one reporting period (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodData {
    pub period: String,
    pub users: u64,
    pub revenue: u64,
    pub orders: u64,
    pub conversion_rate: f64,
    pub page_views: u64,
    pub new_users: u64,
    pub returning_users: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: String,
    pub revenue: u64,
    pub target: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub date: String,
    pub new_users: u64,
    pub returning_users: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageStats {
    pub page: String,
    pub views: u64,
    pub unique_views: u64,
    /// Seconds.
    pub avg_time_on_page: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSource {
    pub source: String,
    pub sessions: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub value: f64,
}

/// A headline figure with its change against the previous period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTile {
    pub id: String,
    pub title: String,
    pub value: String,
    pub change: f64,
    pub change_type: ChangeType,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub trend: Vec<TrendPoint>,
}

/// Live counters for the current day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeMetrics {
    pub active_users: u64,
    pub current_sessions: u64,
    pub page_views_today: u64,
    pub revenue_today: u64,
    pub orders_today: u64,
    pub conversion_rate_today: f64,
}

pub fn dashboard_metrics() -> DashboardMetrics {
    DashboardMetrics {
        total_users: 2543,
        total_revenue: 45231,
        total_orders: 1234,
        total_products: 892,
        user_growth: 12.5,
        revenue_growth: 8.2,
        order_growth: -2.1,
        product_growth: 5.7,
    }
}

pub fn monthly_data() -> Vec<PeriodData> {
    let period = |period: &str, users, revenue, orders, conversion_rate, page_views, new_users, returning_users| {
        PeriodData {
            period: period.to_string(),
            users,
            revenue,
            orders,
            conversion_rate,
            page_views,
            new_users,
            returning_users,
        }
    };
    vec![
        period("2024-01", 450, 45000, 120, 3.2, 12500, 180, 270),
        period("2024-02", 520, 52000, 135, 3.8, 14200, 210, 310),
        period("2024-03", 480, 48000, 125, 2.9, 13100, 190, 290),
    ]
}

pub fn revenue_series() -> Vec<RevenuePoint> {
    [
        ("Jan", 45, 50),
        ("Feb", 52, 55),
        ("Mar", 48, 50),
        ("Apr", 61, 60),
        ("May", 55, 58),
        ("Jun", 67, 65),
    ]
    .into_iter()
    .map(|(date, revenue, target)| RevenuePoint {
        date: date.to_string(),
        revenue,
        target,
    })
    .collect()
}

pub fn user_growth() -> Vec<GrowthPoint> {
    [(1, 120, 340), (2, 132, 356), (3, 145, 378), (4, 158, 392)]
        .into_iter()
        .map(|(week, new_users, returning_users)| GrowthPoint {
            date: format!("Week {}", week),
            new_users,
            returning_users,
        })
        .collect()
}

pub fn top_pages() -> Vec<PageStats> {
    [
        ("/dashboard", 12543, 8765, 245),
        ("/products", 8765, 6432, 189),
        ("/analytics", 6432, 4321, 312),
        ("/users", 5421, 3876, 167),
        ("/settings", 3210, 2543, 98),
    ]
    .into_iter()
    .map(|(page, views, unique_views, avg_time_on_page)| PageStats {
        page: page.to_string(),
        views,
        unique_views,
        avg_time_on_page,
    })
    .collect()
}

pub fn traffic_sources() -> Vec<TrafficSource> {
    [
        ("Organic Search", 4521, 45.2),
        ("Direct", 2876, 28.8),
        ("Social Media", 1543, 15.4),
        ("Email", 876, 8.8),
        ("Referral", 234, 2.3),
    ]
    .into_iter()
    .map(|(source, sessions, percentage)| TrafficSource {
        source: source.to_string(),
        sessions,
        percentage,
    })
    .collect()
}

pub fn conversion_funnel() -> Vec<FunnelStage> {
    [
        ("Visitors", 10000, 100.0),
        ("Product Views", 6500, 65.0),
        ("Add to Cart", 1950, 19.5),
        ("Checkout", 780, 7.8),
        ("Purchase", 390, 3.9),
    ]
    .into_iter()
    .map(|(stage, count, percentage)| FunnelStage {
        stage: stage.to_string(),
        count,
        percentage,
    })
    .collect()
}

pub fn metric_tiles() -> Vec<MetricTile> {
    let tile = |id: &str, title: &str, value: &str, change: f64, change_type, icon: &str, description: &str| {
        MetricTile {
            id: id.to_string(),
            title: title.to_string(),
            value: value.to_string(),
            change,
            change_type,
            icon: icon.to_string(),
            description: Some(description.to_string()),
            trend: Vec::new(),
        }
    };

    let mut revenue = tile(
        "revenue",
        "Total Revenue",
        "$124,563",
        12.5,
        ChangeType::Positive,
        "TrendingUp",
        "vs last period",
    );
    revenue.trend = [45.0, 52.0, 48.0, 61.0, 55.0, 67.0]
        .into_iter()
        .enumerate()
        .map(|(i, value)| TrendPoint {
            date: (i + 1).to_string(),
            value,
        })
        .collect();

    vec![
        revenue,
        tile("conversion", "Conversion Rate", "3.6%", 8.2, ChangeType::Positive, "Target", "avg conversion rate"),
        tile("aov", "Avg Order Value", "$67.32", -2.1, ChangeType::Negative, "DollarSign", "per transaction"),
        tile("ltv", "Customer LTV", "$234.56", 15.7, ChangeType::Positive, "Users", "lifetime value"),
    ]
}

pub fn realtime_metrics() -> RealtimeMetrics {
    RealtimeMetrics {
        active_users: 1429,
        current_sessions: 234,
        page_views_today: 5678,
        revenue_today: 12543,
        orders_today: 45,
        conversion_rate_today: 3.8,
    }
}
