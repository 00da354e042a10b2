use chrono::{DateTime, Local};
use ratatui::{
    prelude::*,
    style::Stylize,
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, BarChart, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph, Row,
        Table, Wrap,
    },
};

use super::THEME;

/// Thousands separators: 1234567 -> "1,234,567".
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

/// Compact currency: 1_250_000 -> "1.2M", 350_000 -> "350K".
pub fn format_currency(value: u64) -> String {
    if value >= 1_000_000_000 {
        format!("{:.1}B", value as f64 / 1_000_000_000.0)
    } else if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{}K", value / 1_000)
    } else {
        value.to_string()
    }
}

pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    format!("{days}d {hours}h")
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

pub fn format_duration_minutes(minutes: u32) -> String {
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

fn parse_timestamp(timestamp: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|ts| ts.with_timezone(&Local))
}

/// Local `HH:MM` for chart axes; unparsable input passes through.
pub fn time_label(timestamp: &str) -> String {
    parse_timestamp(timestamp)
        .map(|ts| ts.format("%H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// "12m ago" style age for event feeds.
pub fn relative_time(timestamp: &str, now: DateTime<Local>) -> String {
    let Some(ts) = parse_timestamp(timestamp) else {
        return timestamp.to_string();
    };
    let minutes = (now - ts).num_minutes().max(0);
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 60 * 24 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (60 * 24))
    }
}

/// Green at 70 and above, yellow from 40, red below.
pub fn health_color(value: u32) -> Color {
    if value >= 70 {
        THEME.good
    } else if value >= 40 {
        THEME.warn
    } else {
        THEME.bad
    }
}

/// Inverse of `health_color` for load-like values where high is bad.
pub fn load_color(value: f64) -> Color {
    if value >= 85.0 {
        THEME.bad
    } else if value >= 60.0 {
        THEME.warn
    } else {
        THEME.good
    }
}

pub fn heat_bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max <= 0.0 { 0.0 } else { (value / max).clamp(0.0, 1.0) };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width.saturating_sub(filled)))
}

/// Standard rounded, titled panel.
pub fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.border))
        .title(title)
        .title_style(Style::default().fg(THEME.accent_a).bold())
}

/// Bordered table with a highlighted header row.
pub fn data_table<'a, const N: usize>(
    title: &'a str,
    header: [&'a str; N],
    rows: Vec<Row<'a>>,
    widths: [Constraint; N],
) -> Table<'a> {
    Table::new(rows, widths)
        .header(
            Row::new(header)
                .style(Style::default().fg(THEME.accent_b).bold())
                .bottom_margin(0),
        )
        .column_spacing(1)
        .block(panel(title))
}

/// Splits `area` into `count` equal columns.
pub fn columns(area: Rect, count: usize) -> std::rc::Rc<[Rect]> {
    let count = count.max(1) as u32;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
}

/// Placeholder shown while a query has no data yet: a row of skeleton
/// cards above a skeleton chart.
pub fn render_skeleton(frame: &mut Frame, area: Rect, title: &str) {
    let lanes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);
    for slot in columns(lanes[0], 4).iter() {
        frame.render_widget(MetricsCard::new(title, "").loading(true), *slot);
    }
    let charts = columns(lanes[1], 2);
    frame.render_widget(BarChartCard::new(title, Vec::new()).loading(true), charts[0]);
    frame.render_widget(
        TimeSeriesChart::new(title, Vec::new()).loading(true),
        charts[1],
    );
}

pub fn render_error(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "Failed to load metrics",
            Style::default().fg(THEME.bad).bold(),
        )),
        Line::from(message.to_string()),
        Line::from(Span::styled(
            "Retrying on the next refresh. Press r to retry now.",
            Style::default().fg(THEME.muted),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel(title)),
        area,
    );
}

/// Headline value with optional subtitle and trend.
pub struct MetricsCard<'a> {
    title: &'a str,
    value: String,
    subtitle: Option<String>,
    trend: Option<f64>,
    color: Color,
    loading: bool,
}

impl<'a> MetricsCard<'a> {
    pub fn new(title: &'a str, value: impl Into<String>) -> Self {
        Self {
            title,
            value: value.into(),
            subtitle: None,
            trend: None,
            color: THEME.accent_b,
            loading: false,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Percent change versus the previous period.
    pub fn trend(mut self, percent: f64) -> Self {
        self.trend = Some(percent);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for MetricsCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel(self.title);
        if self.loading {
            Paragraph::new(vec![
                Line::from(Span::styled("░░░░░░", Style::default().fg(THEME.muted))),
                Line::from(Span::styled("░░░░░░░░░░", Style::default().fg(THEME.muted))),
            ])
            .block(block)
            .render(area, buf);
            return;
        }

        let mut lines = vec![Line::from(Span::styled(
            self.value,
            Style::default().fg(self.color).bold(),
        ))];
        if let Some(subtitle) = self.subtitle {
            lines.push(Line::from(Span::styled(
                subtitle,
                Style::default().fg(THEME.muted),
            )));
        }
        if let Some(trend) = self.trend {
            let (arrow, color) = if trend >= 0.0 {
                ("↑", THEME.good)
            } else {
                ("↓", THEME.bad)
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{arrow} {:.1}%", trend.abs()),
                    Style::default().fg(color),
                ),
                Span::styled(" vs last period", Style::default().fg(THEME.muted)),
            ]));
        }
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

/// Labelled vertical bars.
pub struct BarChartCard<'a> {
    title: &'a str,
    bars: Vec<(String, u64)>,
    color: Color,
    loading: bool,
}

impl<'a> BarChartCard<'a> {
    pub fn new(title: &'a str, bars: Vec<(String, u64)>) -> Self {
        Self {
            title,
            bars,
            color: THEME.accent_a,
            loading: false,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for BarChartCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel(self.title);
        if self.loading || self.bars.is_empty() {
            let note = if self.loading { "Loading…" } else { "No data" };
            Paragraph::new(Span::styled(note, Style::default().fg(THEME.muted)))
                .block(block)
                .render(area, buf);
            return;
        }

        let inner_width = area.width.saturating_sub(2) as usize;
        let slots = self.bars.len().max(1);
        let bar_width = (inner_width / slots).saturating_sub(1).clamp(1, 12) as u16;
        let label_width = bar_width as usize;
        let labels: Vec<String> = self
            .bars
            .iter()
            .map(|(label, _)| label.chars().take(label_width).collect())
            .collect();
        let data: Vec<(&str, u64)> = labels
            .iter()
            .zip(self.bars.iter())
            .map(|(label, (_, value))| (label.as_str(), *value))
            .collect();

        BarChart::default()
            .block(block)
            .data(data.as_slice())
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(Style::default().fg(self.color))
            .value_style(Style::default().fg(Color::Black).bg(self.color))
            .label_style(Style::default().fg(THEME.muted))
            .render(area, buf);
    }
}

/// One line of a time series chart.
pub struct Series<'a> {
    pub name: &'a str,
    pub color: Color,
    pub values: Vec<f64>,
}

/// Line chart over timestamped samples; the x axis shows `HH:MM`.
pub struct TimeSeriesChart<'a> {
    title: &'a str,
    timestamps: Vec<String>,
    series: Vec<Series<'a>>,
    loading: bool,
}

impl<'a> TimeSeriesChart<'a> {
    pub fn new(title: &'a str, timestamps: Vec<String>) -> Self {
        Self {
            title,
            timestamps,
            series: Vec::new(),
            loading: false,
        }
    }

    pub fn series(mut self, series: Series<'a>) -> Self {
        self.series.push(series);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for TimeSeriesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel(self.title);
        if self.loading {
            let shade = Style::default().fg(THEME.muted);
            let width = area.width.saturating_sub(2) as usize;
            let band = "░".repeat(width);
            let mut lines = vec![Line::from(Span::styled("Loading…", shade))];
            let rows = area.height.saturating_sub(3) as usize;
            lines.extend((0..rows).map(|_| Line::from(Span::styled(band.clone(), shade))));
            Paragraph::new(lines).block(block).render(area, buf);
            return;
        }
        if self.timestamps.is_empty() {
            Paragraph::new(Span::styled("No data", Style::default().fg(THEME.muted)))
                .block(block)
                .render(area, buf);
            return;
        }

        let points: Vec<Vec<(f64, f64)>> = self
            .series
            .iter()
            .map(|s| {
                s.values
                    .iter()
                    .enumerate()
                    .map(|(idx, value)| (idx as f64, *value))
                    .collect()
            })
            .collect();
        let max_y = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0_f64, f64::max)
            .max(1.0);
        let last_x = (self.timestamps.len().saturating_sub(1)).max(1) as f64;

        let datasets: Vec<Dataset> = self
            .series
            .iter()
            .zip(points.iter())
            .map(|(s, data)| {
                Dataset::default()
                    .name(s.name)
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(s.color))
                    .data(data)
            })
            .collect();

        let first = self.timestamps.first().map(|t| time_label(t)).unwrap_or_default();
        let middle = self
            .timestamps
            .get(self.timestamps.len() / 2)
            .map(|t| time_label(t))
            .unwrap_or_default();
        let last = self.timestamps.last().map(|t| time_label(t)).unwrap_or_default();

        Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(THEME.muted))
                    .bounds([0.0, last_x])
                    .labels(vec![Span::raw(first), Span::raw(middle), Span::raw(last)]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(THEME.muted))
                    .bounds([0.0, max_y * 1.1])
                    .labels(vec![
                        Span::raw("0"),
                        Span::raw(format_number((max_y / 2.0).round() as u64)),
                        Span::raw(format_number(max_y.round() as u64)),
                    ]),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn compact_currency() {
        assert_eq!(format_currency(950), "950");
        assert_eq!(format_currency(350_000), "350K");
        assert_eq!(format_currency(1_250_000), "1.2M");
        assert_eq!(format_currency(7_400_000_000), "7.4B");
    }

    #[test]
    fn uptime_and_durations() {
        assert_eq!(format_uptime(86_400 * 3 + 3_600 * 5 + 59), "3d 5h");
        assert_eq!(format_uptime(1_800), "0d 0h");
        assert_eq!(format_duration_minutes(45), "45m");
        assert_eq!(format_duration_minutes(135), "2h 15m");
        assert_eq!(format_percent(12.345, 1), "12.3%");
    }

    #[test]
    fn health_thresholds() {
        assert_eq!(health_color(70), THEME.good);
        assert_eq!(health_color(69), THEME.warn);
        assert_eq!(health_color(40), THEME.warn);
        assert_eq!(health_color(39), THEME.bad);
    }

    #[test]
    fn heat_bar_is_clamped() {
        assert_eq!(heat_bar(5.0, 10.0, 4), "██░░");
        assert_eq!(heat_bar(50.0, 10.0, 3), "███");
        assert_eq!(heat_bar(1.0, 0.0, 2), "░░");
    }

    #[test]
    fn relative_time_buckets() {
        let now = Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let at = |minutes: i64| (now - chrono::Duration::minutes(minutes)).to_rfc3339();
        assert_eq!(relative_time(&at(0), now), "just now");
        assert_eq!(relative_time(&at(12), now), "12m ago");
        assert_eq!(relative_time(&at(180), now), "3h ago");
        assert_eq!(relative_time(&at(60 * 50), now), "2d ago");
        assert_eq!(relative_time("yesterday", now), "yesterday");
    }

    #[test]
    fn time_label_falls_back_to_raw_text() {
        assert_eq!(time_label("not a time"), "not a time");
        let ts = Local.with_ymd_and_hms(2026, 3, 1, 9, 5, 0).unwrap().to_rfc3339();
        assert_eq!(time_label(&ts), "09:05");
    }

    #[test]
    fn metrics_card_renders_trend_line() {
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        MetricsCard::new("Players", "1,024").trend(-3.5).render(area, &mut buf);
        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("1,024"));
        assert!(text.contains("↓ 3.5%"));
    }

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn time_series_loading_swaps_in_a_skeleton() {
        let area = Rect::new(0, 0, 40, 8);
        let stamps: Vec<String> = (0..4)
            .map(|h| Local.with_ymd_and_hms(2026, 3, 1, 9 + h, 0, 0).unwrap().to_rfc3339())
            .collect();
        let series = || Series {
            name: "requests",
            color: THEME.accent_a,
            values: vec![10.0, 40.0, 25.0, 60.0],
        };

        let mut buf = Buffer::empty(area);
        TimeSeriesChart::new("Traffic", stamps.clone())
            .series(series())
            .loading(true)
            .render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Loading…"));
        assert!(text.contains("░░░"));
        assert!(!text.contains("09:00"));

        let mut buf = Buffer::empty(area);
        TimeSeriesChart::new("Traffic", stamps).series(series()).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(!text.contains("Loading…"));
        assert!(text.contains("09:00"));
    }

    #[test]
    fn empty_time_series_says_no_data() {
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        TimeSeriesChart::new("Traffic", Vec::new()).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("No data"));
    }
}
