use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EconomicMetrics {
    pub overview: EconomyOverview,
    pub resource_prices: Vec<ResourcePrice>,
    pub scarcity_levels: Vec<ResourceScarcity>,
    pub trade_routes: Vec<TradeRoute>,
    pub market_activity: MarketActivity,
    pub production_chains: Vec<ProductionChain>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EconomyOverview {
    pub total_wealth: u64,
    pub wealth_distribution: WealthDistribution,
    pub daily_trade_volume: u64,
    /// Percentage.
    pub inflation_rate: f64,
    /// Percentage.
    pub economic_growth: f64,
    /// Percentage.
    pub unemployment_rate: f64,
}

/// Percentage shares of total wealth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WealthDistribution {
    pub factions: u32,
    pub cities: u32,
    pub individuals: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Rising,
    Falling,
    Stable,
}

impl PriceTrend {
    pub fn from_change(change_24h: f64) -> Self {
        if change_24h > 5.0 {
            PriceTrend::Rising
        } else if change_24h < -5.0 {
            PriceTrend::Falling
        } else {
            PriceTrend::Stable
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            PriceTrend::Rising => "↑",
            PriceTrend::Falling => "↓",
            PriceTrend::Stable => "→",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePrice {
    pub resource: String,
    pub tier: u8,
    pub current_price: u32,
    /// Percentage.
    pub price_change_24h: f64,
    /// Percentage.
    pub price_change_7d: f64,
    pub trend: PriceTrend,
    /// Units traded.
    pub volume: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScarcityLevel {
    Abundant,
    Normal,
    Scarce,
    Critical,
}

impl ScarcityLevel {
    pub fn from_score(score: u32) -> Self {
        if score > 75 {
            ScarcityLevel::Critical
        } else if score > 50 {
            ScarcityLevel::Scarce
        } else if score > 25 {
            ScarcityLevel::Normal
        } else {
            ScarcityLevel::Abundant
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScarcityLevel::Abundant => "abundant",
            ScarcityLevel::Normal => "normal",
            ScarcityLevel::Scarce => "scarce",
            ScarcityLevel::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceScarcity {
    pub resource: String,
    pub tier: u8,
    pub scarcity_level: ScarcityLevel,
    /// 0-100
    pub scarcity_score: u32,
    pub supply: u32,
    pub demand: u32,
    /// Active nodes.
    pub node_availability: u32,
    pub affected_cities: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Active,
    Disrupted,
    Blocked,
}

impl RouteStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RouteStatus::Active => "active",
            RouteStatus::Disrupted => "disrupted",
            RouteStatus::Blocked => "blocked",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeRoute {
    pub id: String,
    pub origin: String,
    pub destination: String,
    /// Gold value.
    pub volume: u32,
    /// Percentage.
    pub profitability: f64,
    pub status: RouteStatus,
    pub primary_goods: Vec<String>,
    /// Ticks.
    pub travel_time: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketActivity {
    pub active_orders: u32,
    pub buy_orders: u32,
    pub sell_orders: u32,
    pub orders_filled_today: u32,
    /// Ticks.
    pub average_fulfillment_time: u32,
    pub top_traded_resources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductionChain {
    pub city: String,
    pub input: String,
    pub output: String,
    /// 0-100
    pub efficiency: u32,
    pub daily_output: u32,
    pub bottleneck: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scarcity_buckets() {
        assert_eq!(ScarcityLevel::from_score(0), ScarcityLevel::Abundant);
        assert_eq!(ScarcityLevel::from_score(25), ScarcityLevel::Abundant);
        assert_eq!(ScarcityLevel::from_score(26), ScarcityLevel::Normal);
        assert_eq!(ScarcityLevel::from_score(51), ScarcityLevel::Scarce);
        assert_eq!(ScarcityLevel::from_score(75), ScarcityLevel::Scarce);
        assert_eq!(ScarcityLevel::from_score(76), ScarcityLevel::Critical);
    }

    #[test]
    fn price_trend_uses_five_percent_band() {
        assert_eq!(PriceTrend::from_change(5.1), PriceTrend::Rising);
        assert_eq!(PriceTrend::from_change(5.0), PriceTrend::Stable);
        assert_eq!(PriceTrend::from_change(-5.0), PriceTrend::Stable);
        assert_eq!(PriceTrend::from_change(-12.0), PriceTrend::Falling);
    }

    #[test]
    fn production_chain_bottleneck_may_be_null() {
        let raw = r#"{"city":"Oasis","input":"Herbs","output":"Cloth","efficiency":70,"dailyOutput":300,"bottleneck":null}"#;
        let chain: ProductionChain = serde_json::from_str(raw).expect("chain parses");
        assert!(chain.bottleneck.is_none());
    }
}
