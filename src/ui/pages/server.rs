use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Cell, Gauge, Paragraph, Row},
};

use super::{rows, split_columns};
use crate::metrics::ServerMetrics;
use crate::ui::THEME;
use crate::ui::components::{
    MetricsCard, Series, TimeSeriesChart, columns, data_table, format_number, format_percent,
    format_uptime, heat_bar, load_color, panel, time_label,
};

pub fn render(frame: &mut Frame, area: Rect, metrics: &ServerMetrics) {
    let lanes = rows(
        area,
        [
            Constraint::Length(5),
            Constraint::Length(12),
            Constraint::Min(8),
        ],
    );

    let cards = columns(lanes[0], 4);
    frame.render_widget(
        MetricsCard::new("Total Requests", format_number(metrics.total_requests))
            .subtitle(format!("{} ok", format_number(metrics.successful_requests))),
        cards[0],
    );
    frame.render_widget(
        MetricsCard::new("Error Rate", format_percent(metrics.error_rate, 2))
            .subtitle(format!("{} failed", format_number(metrics.failed_requests)))
            .color(if metrics.error_rate > 1.0 {
                THEME.bad
            } else {
                THEME.good
            }),
        cards[1],
    );
    frame.render_widget(
        MetricsCard::new(
            "Avg Response",
            format!("{:.0} ms", metrics.response_times.avg),
        )
        .subtitle(format!("p99 {:.0} ms", metrics.response_times.p99)),
        cards[2],
    );
    frame.render_widget(
        MetricsCard::new("Uptime", format_uptime(metrics.uptime)).color(THEME.good),
        cards[3],
    );

    let middle = split_columns(
        lanes[1],
        [Constraint::Percentage(30), Constraint::Percentage(70)],
    );
    let times = &metrics.response_times;
    let breakdown: Vec<Line> = [
        ("p50", times.p50),
        ("avg", times.avg),
        ("p95", times.p95),
        ("p99", times.p99),
        ("max", times.max),
    ]
    .into_iter()
    .map(|(label, value)| {
        Line::from(vec![
            Span::styled(format!("{label:<4}"), Style::default().fg(THEME.muted)),
            Span::styled(
                heat_bar(value, times.max, 14),
                Style::default().fg(THEME.accent_a),
            ),
            Span::raw(format!(" {value:>6.0} ms")),
        ])
    })
    .collect();
    frame.render_widget(
        Paragraph::new(breakdown).block(panel("Response Times")),
        middle[0],
    );

    let timestamps = metrics
        .requests_over_time
        .iter()
        .map(|s| s.timestamp.clone())
        .collect();
    let chart = TimeSeriesChart::new("Requests Over Time", timestamps)
        .series(Series {
            name: "requests",
            color: THEME.accent_a,
            values: metrics
                .requests_over_time
                .iter()
                .map(|s| s.requests as f64)
                .collect(),
        })
        .series(Series {
            name: "errors",
            color: THEME.bad,
            values: metrics
                .requests_over_time
                .iter()
                .map(|s| s.errors as f64)
                .collect(),
        });
    frame.render_widget(chart, middle[1]);

    let bottom = split_columns(
        lanes[2],
        [
            Constraint::Percentage(45),
            Constraint::Percentage(25),
            Constraint::Percentage(30),
        ],
    );

    let endpoint_rows: Vec<Row> = metrics
        .requests_by_endpoint
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(e.endpoint.clone()),
                Cell::from(format_number(e.requests as u64)),
                Cell::from(format!("{:.0} ms", e.avg_response_time)),
                Cell::from(format_percent(e.error_rate, 2))
                    .style(Style::default().fg(if e.error_rate > 1.0 {
                        THEME.bad
                    } else {
                        THEME.good
                    })),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Endpoints",
            ["Endpoint", "Requests", "Avg", "Errors"],
            endpoint_rows,
            [
                Constraint::Min(18),
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Length(7),
            ],
        ),
        bottom[0],
    );

    let health = &metrics.server_health;
    let health_block = panel("Server Health");
    let inner = health_block.inner(bottom[1]);
    frame.render_widget(health_block, bottom[1]);
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 4])
        .split(inner);
    for (slot, (label, value)) in slots.iter().zip([
        ("CPU", health.cpu),
        ("Memory", health.memory),
        ("Disk", health.disk),
        ("Network", health.network),
    ]) {
        let value = value.min(100);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(load_color(value as f64)).bg(THEME.surface))
            .percent(value as u16)
            .label(format!("{label} {value}%"));
        frame.render_widget(gauge, *slot);
    }

    let error_rows: Vec<Row> = metrics
        .errors_by_type
        .iter()
        .map(|e| {
            Row::new(vec![
                e.error_type.clone(),
                format_number(e.count as u64),
                format_percent(e.percentage, 1),
                time_label(&e.last_occurrence),
            ])
        })
        .collect();
    frame.render_widget(
        data_table(
            "Errors by Type",
            ["Type", "Count", "Share", "Last"],
            error_rows,
            [
                Constraint::Min(12),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(6),
            ],
        ),
        bottom[2],
    );
}
