use chrono::{DateTime, Utc};

use super::{Detail, Tabular};
use crate::model::analytics::{
    DashboardMetrics, FunnelStage, GrowthPoint, MetricTile, PageStats, PeriodData,
    RealtimeMetrics, RevenuePoint, TrafficSource,
};
use crate::model::{AuthSession, Product, User};

fn date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn signed_percent(change: f64) -> String {
    format!("{:+.1}%", change)
}

impl Tabular for User {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Role", "Status", "Created", "Last login"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.role.to_string(),
            self.status.to_string(),
            date(&self.created_at),
            self.last_login.as_ref().map_or_else(|| "never".to_string(), date),
        ]
    }
}

impl Detail for User {
    fn title(&self) -> String {
        format!("User {}", self.id)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Email", self.email.clone()),
            ("Role", self.role.to_string()),
            ("Status", self.status.to_string()),
            ("Created", timestamp(&self.created_at)),
            ("Updated", timestamp(&self.updated_at)),
            (
                "Last login",
                self.last_login.as_ref().map_or_else(|| "never".to_string(), timestamp),
            ),
        ]
    }
}

impl Tabular for Product {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "SKU", "Category", "Price", "Stock", "Status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.sku.clone().unwrap_or_default(),
            self.category.clone(),
            money(self.price),
            self.stock.to_string(),
            self.status.to_string(),
        ]
    }
}

impl Detail for Product {
    fn title(&self) -> String {
        format!("Product {}", self.id)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Description", self.description.clone()),
            ("SKU", self.sku.clone().unwrap_or_else(|| "-".to_string())),
            ("Category", self.category.clone()),
            ("Price", money(self.price)),
            ("Stock", self.stock.to_string()),
            ("Status", self.status.to_string()),
            ("Tags", self.tags.join(", ")),
            ("Images", self.images.len().to_string()),
            ("Created", timestamp(&self.created_at)),
            ("Updated", timestamp(&self.updated_at)),
        ]
    }
}

impl Detail for AuthSession {
    fn title(&self) -> String {
        format!("Signed in as {}", self.user.name)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Email", self.user.email.clone()),
            ("Role", self.user.role.to_string()),
            ("Permissions", self.user.permissions.join(", ")),
            ("Token", self.token.clone()),
            ("Expires in", format!("{}s", self.expires_in)),
        ]
    }
}

impl Detail for DashboardMetrics {
    fn title(&self) -> String {
        "Dashboard".to_string()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Users", format!("{} ({})", self.total_users, signed_percent(self.user_growth))),
            (
                "Revenue",
                format!("${} ({})", self.total_revenue, signed_percent(self.revenue_growth)),
            ),
            ("Orders", format!("{} ({})", self.total_orders, signed_percent(self.order_growth))),
            (
                "Products",
                format!("{} ({})", self.total_products, signed_percent(self.product_growth)),
            ),
        ]
    }
}

impl Detail for RealtimeMetrics {
    fn title(&self) -> String {
        "Today".to_string()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Active users", self.active_users.to_string()),
            ("Sessions", self.current_sessions.to_string()),
            ("Page views", self.page_views_today.to_string()),
            ("Revenue", format!("${}", self.revenue_today)),
            ("Orders", self.orders_today.to_string()),
            ("Conversion", format!("{:.1}%", self.conversion_rate_today)),
        ]
    }
}

impl Tabular for PeriodData {
    fn headers() -> &'static [&'static str] {
        &["Period", "Users", "Revenue", "Orders", "Conversion", "Page views"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.period.clone(),
            self.users.to_string(),
            format!("${}", self.revenue),
            self.orders.to_string(),
            format!("{:.1}%", self.conversion_rate),
            self.page_views.to_string(),
        ]
    }
}

impl Tabular for RevenuePoint {
    fn headers() -> &'static [&'static str] {
        &["Month", "Revenue", "Target"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            format!("${}k", self.revenue),
            format!("${}k", self.target),
        ]
    }
}

impl Tabular for GrowthPoint {
    fn headers() -> &'static [&'static str] {
        &["Week", "New", "Returning"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.new_users.to_string(),
            self.returning_users.to_string(),
        ]
    }
}

impl Tabular for PageStats {
    fn headers() -> &'static [&'static str] {
        &["Page", "Views", "Unique", "Avg time"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.page.clone(),
            self.views.to_string(),
            self.unique_views.to_string(),
            format!("{}s", self.avg_time_on_page),
        ]
    }
}

impl Tabular for TrafficSource {
    fn headers() -> &'static [&'static str] {
        &["Source", "Sessions", "Share"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.source.clone(),
            self.sessions.to_string(),
            format!("{:.1}%", self.percentage),
        ]
    }
}

impl Tabular for FunnelStage {
    fn headers() -> &'static [&'static str] {
        &["Stage", "Count", "Share"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.stage.clone(),
            self.count.to_string(),
            format!("{:.1}%", self.percentage),
        ]
    }
}

impl Tabular for MetricTile {
    fn headers() -> &'static [&'static str] {
        &["Metric", "Value", "Change", "Note"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.value.clone(),
            signed_percent(self.change),
            self.description.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{seed_products, seed_users};

    #[test]
    fn user_row() {
        let user = &seed_users()[0];
        assert_eq!(
            user.row(),
            ["1", "John Doe", "john.doe@example.com", "admin", "active", "2024-01-15", "2024-01-20"]
        );
        assert_eq!(User::headers().len(), user.row().len());
    }

    #[test]
    fn product_row_formats_price() {
        let product = &seed_products()[2];
        assert_eq!(product.row()[4], "$24.99");
        assert_eq!(product.row()[2], "PCB-003");
    }

    #[test]
    fn changes_carry_sign() {
        assert_eq!(signed_percent(12.5), "+12.5%");
        assert_eq!(signed_percent(-2.1), "-2.1%");
    }
}
