//! 分析画面（レビュー集計の棒グラフ）
//!
//! 表示中だけ定期取得を行い、画面を離れるとハンドルの破棄で停止する。

use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::gui::app_context::AppContext;
use crate::gui::hooks::use_watch;
use crate::gui::styles::theme::CssClasses;
use crate::models::ReviewStats;
use crate::state::{AnalyticsPoller, PollerHandle, PollerState};

#[component]
pub fn AnalyticsPage() -> Element {
    let ctx = use_context::<AppContext>();

    let poller = use_hook(|| {
        AnalyticsPoller::with_interval(ctx.analytics.clone(), ctx.config.analytics.poll_interval())
    });
    let state = use_watch({
        let poller = poller.clone();
        move || poller.subscribe()
    });

    let handle: Rc<RefCell<Option<PollerHandle>>> =
        use_hook(|| Rc::new(RefCell::new(Some(poller.start()))));

    use_drop(move || {
        if let Some(mut handle) = handle.borrow_mut().take() {
            handle.stop();
        }
    });

    let snapshot = state.read().clone();
    let updated = snapshot
        .last_updated
        .map(|at| at.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = match snapshot.status {
        PollerState::Polling => "🟢 更新中",
        PollerState::Idle => "⚪ 停止",
    };

    rsx! {
        div {
            class: CssClasses::CARD,

            div {
                class: CssClasses::CARD_HEADER,
                h2 { "📊 レビュー分析" }
                span {
                    style: "font-size: 0.85rem; color: #7f8c8d;",
                    "{status}（{poller.interval().as_secs()}秒ごと） 最終更新: {updated}"
                }
            }

            if snapshot.series.is_empty() {
                div { class: CssClasses::EMPTY_STATE, "データがありません" }
            } else {
                h3 { "レビュー数" }
                BarChart { series: snapshot.series.clone(), metric: Metric::Count }
                h3 { "平均評価" }
                BarChart { series: snapshot.series.clone(), metric: Metric::AverageStars }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Metric {
    Count,
    AverageStars,
}

impl Metric {
    fn value(&self, stats: &ReviewStats) -> f64 {
        match self {
            Metric::Count => stats.count as f64,
            Metric::AverageStars => stats.average_stars,
        }
    }

    fn display(&self, stats: &ReviewStats) -> String {
        match self {
            Metric::Count => stats.count.to_string(),
            Metric::AverageStars => format!("{:.2}", stats.average_stars),
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Metric::Count => "#667eea",
            Metric::AverageStars => "#f1c40f",
        }
    }
}

/// バーの長さ（最大値に対する割合、0〜100）
fn bar_percentage(value: f64, max: f64) -> f64 {
    if max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

#[component]
fn BarChart(series: Vec<ReviewStats>, metric: Metric) -> Element {
    let max = match metric {
        Metric::Count => series.iter().map(|s| metric.value(s)).fold(0.0, f64::max),
        Metric::AverageStars => 5.0,
    };
    let color = metric.color();

    rsx! {
        div {
            class: CssClasses::CHART,
            for stats in series.iter() {
                div {
                    key: "{stats.window_end}",
                    class: CssClasses::CHART_ROW,
                    span { class: CssClasses::CHART_LABEL, "{stats.window_label()}" }
                    div {
                        class: CssClasses::CHART_TRACK,
                        div {
                            class: CssClasses::CHART_BAR,
                            style: "width: {bar_percentage(metric.value(stats), max)}%; background: {color};",
                        }
                    }
                    span { style: "min-width: 48px; text-align: right;", "{metric.display(stats)}" }
                }
            }
        }
    }
}
