use ratatui::{
    prelude::*,
    style::Stylize,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row},
};

use super::{rows, split_columns};
use crate::metrics::{EconomicMetrics, PriceTrend, RouteStatus, ScarcityLevel};
use crate::ui::THEME;
use crate::ui::components::{
    MetricsCard, columns, data_table, format_currency, format_number, format_percent, heat_bar,
    panel,
};

fn trend_color(trend: PriceTrend) -> Color {
    match trend {
        PriceTrend::Rising => THEME.good,
        PriceTrend::Falling => THEME.bad,
        PriceTrend::Stable => THEME.muted,
    }
}

fn scarcity_color(level: ScarcityLevel) -> Color {
    match level {
        ScarcityLevel::Abundant => THEME.good,
        ScarcityLevel::Normal => THEME.accent_a,
        ScarcityLevel::Scarce => THEME.warn,
        ScarcityLevel::Critical => THEME.bad,
    }
}

fn route_color(status: RouteStatus) -> Color {
    match status {
        RouteStatus::Active => THEME.good,
        RouteStatus::Disrupted => THEME.warn,
        RouteStatus::Blocked => THEME.bad,
    }
}

pub fn render(frame: &mut Frame, area: Rect, metrics: &EconomicMetrics) {
    let lanes = rows(
        area,
        [
            Constraint::Length(5),
            Constraint::Length(12),
            Constraint::Min(8),
        ],
    );

    let overview = &metrics.overview;
    let cards = columns(lanes[0], 4);
    frame.render_widget(
        MetricsCard::new("Total Wealth", format_currency(overview.total_wealth))
            .trend(overview.economic_growth),
        cards[0],
    );
    frame.render_widget(
        MetricsCard::new("Daily Trade", format_currency(overview.daily_trade_volume))
            .subtitle(format!("{} active orders", format_number(metrics.market_activity.active_orders as u64))),
        cards[1],
    );
    frame.render_widget(
        MetricsCard::new("Inflation", format_percent(overview.inflation_rate, 1)).color(
            if overview.inflation_rate > 5.0 {
                THEME.warn
            } else {
                THEME.accent_b
            },
        ),
        cards[2],
    );
    frame.render_widget(
        MetricsCard::new("Unemployment", format_percent(overview.unemployment_rate, 1))
            .subtitle(format!("growth {}", format_percent(overview.economic_growth, 1))),
        cards[3],
    );

    let middle = split_columns(
        lanes[1],
        [
            Constraint::Percentage(28),
            Constraint::Percentage(40),
            Constraint::Percentage(32),
        ],
    );

    let share = &overview.wealth_distribution;
    let market = &metrics.market_activity;
    let mut side = vec![
        Line::from(Span::styled("Wealth held by", Style::default().fg(THEME.muted))),
        Line::from(format!("  factions    {} {:>3}%", heat_bar(share.factions as f64, 100.0, 8), share.factions)),
        Line::from(format!("  cities      {} {:>3}%", heat_bar(share.cities as f64, 100.0, 8), share.cities)),
        Line::from(format!("  individuals {} {:>3}%", heat_bar(share.individuals as f64, 100.0, 8), share.individuals)),
        Line::from(""),
        Line::from(Span::styled("Market", Style::default().fg(THEME.muted))),
        Line::from(format!(
            "  buy {} · sell {}",
            format_number(market.buy_orders as u64),
            format_number(market.sell_orders as u64)
        )),
        Line::from(format!(
            "  filled today {} · avg {}m",
            format_number(market.orders_filled_today as u64),
            market.average_fulfillment_time
        )),
    ];
    side.push(Line::from(vec![
        Span::styled("  top: ", Style::default().fg(THEME.muted)),
        Span::styled(market.top_traded_resources.join(", "), Style::default().fg(THEME.accent_b).bold()),
    ]));
    frame.render_widget(
        Paragraph::new(side).block(panel("Wealth & Market")),
        middle[0],
    );

    let price_rows: Vec<Row> = metrics
        .resource_prices
        .iter()
        .map(|p| {
            let color = trend_color(p.trend);
            Row::new(vec![
                Cell::from(p.resource.clone()),
                Cell::from(format!("T{}", p.tier)),
                Cell::from(format_number(p.current_price as u64)),
                Cell::from(format!("{} {:+.1}%", p.trend.arrow(), p.price_change_24h))
                    .style(Style::default().fg(color)),
                Cell::from(format!("{:+.1}%", p.price_change_7d)),
                Cell::from(format_number(p.volume as u64)),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Resource Prices",
            ["Resource", "Tier", "Price", "24h", "7d", "Volume"],
            price_rows,
            [
                Constraint::Min(10),
                Constraint::Length(4),
                Constraint::Length(7),
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Length(8),
            ],
        ),
        middle[1],
    );

    let scarcity_rows: Vec<Row> = metrics
        .scarcity_levels
        .iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(s.resource.clone()),
                Cell::from(format!("{} {}", heat_bar(s.scarcity_score as f64, 100.0, 6), s.scarcity_level.label()))
                    .style(Style::default().fg(scarcity_color(s.scarcity_level))),
                Cell::from(format!("{}/{}", format_number(s.supply as u64), format_number(s.demand as u64))),
                Cell::from(format!("{}%", s.node_availability)),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Scarcity",
            ["Resource", "Level", "Supply/Demand", "Nodes"],
            scarcity_rows,
            [
                Constraint::Min(10),
                Constraint::Length(16),
                Constraint::Length(13),
                Constraint::Length(5),
            ],
        ),
        middle[2],
    );

    let bottom = split_columns(
        lanes[2],
        [Constraint::Percentage(60), Constraint::Percentage(40)],
    );
    let route_rows: Vec<Row> = metrics
        .trade_routes
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(format!("{} → {}", r.origin, r.destination)),
                Cell::from(format_number(r.volume as u64)),
                Cell::from(format!("{:.1}%", r.profitability)),
                Cell::from(r.status.label()).style(Style::default().fg(route_color(r.status))),
                Cell::from(r.primary_goods.join(", ")),
                Cell::from(format!("{}h", r.travel_time)),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Trade Routes",
            ["Route", "Volume", "Profit", "Status", "Goods", "Travel"],
            route_rows,
            [
                Constraint::Min(22),
                Constraint::Length(7),
                Constraint::Length(7),
                Constraint::Length(10),
                Constraint::Length(18),
                Constraint::Length(6),
            ],
        ),
        bottom[0],
    );

    let chain_rows: Vec<Row> = metrics
        .production_chains
        .iter()
        .map(|c| {
            let bottleneck = c.bottleneck.clone().unwrap_or_else(|| "-".to_string());
            Row::new(vec![
                Cell::from(c.city.clone()),
                Cell::from(format!("{} → {}", c.input, c.output)),
                Cell::from(format!("{}%", c.efficiency)),
                Cell::from(format_number(c.daily_output as u64)),
                Cell::from(bottleneck).style(Style::default().fg(if c.bottleneck.is_some() {
                    THEME.warn
                } else {
                    THEME.muted
                })),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Production Chains",
            ["City", "Chain", "Eff.", "Daily", "Bottleneck"],
            chain_rows,
            [
                Constraint::Length(12),
                Constraint::Min(16),
                Constraint::Length(5),
                Constraint::Length(6),
                Constraint::Length(14),
            ],
        ),
        bottom[1],
    );
}
