//! Mock dataset generators.
//!
//! Values are random within fixed ranges; shapes match what the dashboard
//! charts consume.

use chrono::{Duration as ChronoDuration, Months, Utc};
use rand::Rng;
use serde_json::{json, Value};

use crate::error::ServiceError;

const ORDER_STATUSES: [(&str, &str); 5] = [
    ("Pending payment", "#faad14"),
    ("Pending shipment", "#1890ff"),
    ("Shipped", "#13c2c2"),
    ("Completed", "#52c41a"),
    ("Cancelled", "#ff4d4f"),
];

const CATEGORIES: [&str; 6] = [
    "Electronics",
    "Apparel",
    "Home",
    "Beauty",
    "Sports",
    "Books",
];

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Days covered by a `period` parameter.
pub fn period_days(period: &str) -> Result<i64, ServiceError> {
    match period {
        "7d" => Ok(7),
        "30d" => Ok(30),
        "90d" => Ok(90),
        other => Err(ServiceError::InvalidRequest(format!(
            "Unsupported period '{}', expected 7d, 30d or 90d",
            other
        ))),
    }
}

pub fn sales_trend(rng: &mut impl Rng, days: i64) -> Value {
    let today = Utc::now().date_naive();
    let categories: Vec<String> = (0..days)
        .rev()
        .map(|offset| (today - ChronoDuration::days(offset)).format("%m-%d").to_string())
        .collect();
    let revenue: Vec<u32> = categories
        .iter()
        .map(|_| rng.gen_range(10_000..50_000))
        .collect();
    let orders: Vec<u32> = categories.iter().map(|_| rng.gen_range(100..500)).collect();

    json!({
        "categories": categories,
        "series": [
            { "name": "Revenue", "data": revenue, "type": "line", "color": "#1890ff" },
            { "name": "Orders", "data": orders, "type": "line", "color": "#52c41a", "dashStyle": "dash" }
        ]
    })
}

pub fn order_status(rng: &mut impl Rng) -> Value {
    let counts: Vec<u32> = ORDER_STATUSES
        .iter()
        .map(|_| rng.gen_range(50..500))
        .collect();
    let total: u32 = counts.iter().sum();

    let slices: Vec<Value> = ORDER_STATUSES
        .iter()
        .zip(&counts)
        .map(|((name, color), &y)| {
            let percentage = (f64::from(y) / f64::from(total) * 1000.0).round() / 10.0;
            json!({ "name": name, "y": y, "color": color, "percentage": percentage })
        })
        .collect();

    Value::Array(slices)
}

pub fn user_growth(rng: &mut impl Rng) -> Value {
    let this_month = Utc::now().date_naive();
    let months: Vec<String> = (0..12u32)
        .rev()
        .map(|back| {
            this_month
                .checked_sub_months(Months::new(back))
                .unwrap_or(this_month)
                .format("%Y-%m")
                .to_string()
        })
        .collect();

    let mut total = rng.gen_range(5_000..10_000u32);
    let mut new_users = Vec::with_capacity(months.len());
    let mut total_users = Vec::with_capacity(months.len());
    for _ in &months {
        let added = rng.gen_range(200..1_500u32);
        total += added;
        new_users.push(added);
        total_users.push(total);
    }

    json!({
        "categories": months,
        "series": [
            { "name": "New users", "data": new_users, "type": "column" },
            { "name": "Total users", "data": total_users, "type": "line" }
        ]
    })
}

pub fn category_distribution(rng: &mut impl Rng) -> Value {
    let slices: Vec<Value> = CATEGORIES
        .iter()
        .map(|name| json!({ "name": name, "y": rng.gen_range(100..2_000u32) }))
        .collect();
    Value::Array(slices)
}

pub fn heatmap(rng: &mut impl Rng) -> Value {
    let hours: Vec<String> = (0..24).map(|h| format!("{}:00", h)).collect();
    let mut cells = Vec::with_capacity(hours.len() * WEEKDAYS.len());
    let mut max = 0u32;

    for day in 0..WEEKDAYS.len() {
        for hour in 0..hours.len() {
            let value = rng.gen_range(0..100u32);
            max = max.max(value);
            cells.push(json!([hour, day, value]));
        }
    }

    json!({ "xAxis": hours, "yAxis": WEEKDAYS, "data": cells, "max": max })
}

pub fn realtime_overview(rng: &mut impl Rng) -> Value {
    json!({
        "totalUsers": rng.gen_range(1_000..6_000u32),
        "totalProducts": rng.gen_range(500..1_500u32),
        "totalOrders": rng.gen_range(800..2_800u32),
        "totalRevenue": rng.gen_range(100_000..600_000u32),
        "todaySales": rng.gen_range(25_000..75_000u32),
        "todayOrders": rng.gen_range(200..700u32),
        "onlineUsers": rng.gen_range(500..1_500u32),
        "conversionRate": format!("{:.2}", rng.gen_range(2.0..7.0f64)),
    })
}
