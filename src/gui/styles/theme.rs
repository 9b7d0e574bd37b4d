//! テーマとスタイルヘルパー

use crate::api::ErrorKind;

/// CSS クラス名の定数
pub struct CssClasses;

impl CssClasses {
    // アプリケーション
    pub const MAIN_WINDOW: &'static str = "main-window";
    pub const MAIN_CONTENT: &'static str = "main-content";
    pub const APP_HEADER: &'static str = "app-header";
    pub const APP_TITLE: &'static str = "app-title";
    pub const APP_USER: &'static str = "app-user";

    // タブ
    pub const TAB_NAVIGATION: &'static str = "tab-navigation";
    pub const TAB_BUTTON: &'static str = "tab-button";

    // カード・テーブル
    pub const CARD: &'static str = "card";
    pub const CARD_HEADER: &'static str = "card-header";
    pub const DATA_TABLE: &'static str = "data-table";
    pub const EMPTY_STATE: &'static str = "empty-state";

    // フォーム
    pub const FORM_PANEL: &'static str = "form-panel";
    pub const FORM_GRID: &'static str = "form-grid";
    pub const FORM_GROUP: &'static str = "form-group";
    pub const FORM_LABEL: &'static str = "form-label";
    pub const FORM_INPUT: &'static str = "form-input";

    // ボタン
    pub const BTN: &'static str = "btn";
    pub const BTN_PRIMARY: &'static str = "btn-primary";
    pub const BTN_DANGER: &'static str = "btn-danger";
    pub const BTN_WARNING: &'static str = "btn-warning";
    pub const BTN_SECONDARY: &'static str = "btn-secondary";
    pub const BTN_GROUP: &'static str = "btn-group";

    // レビュー
    pub const REVIEW_LIST: &'static str = "review-list";
    pub const REVIEW_ITEM: &'static str = "review-item";
    pub const REVIEW_STARS: &'static str = "review-stars";

    // チャート
    pub const CHART: &'static str = "chart";
    pub const CHART_ROW: &'static str = "chart-row";
    pub const CHART_LABEL: &'static str = "chart-label";
    pub const CHART_TRACK: &'static str = "chart-track";
    pub const CHART_BAR: &'static str = "chart-bar";

    // エラー
    pub const ERROR_BANNER: &'static str = "error-banner";
}

/// ボタンの状態に応じたCSSクラスを取得
pub fn get_button_class(variant: &str, disabled: bool) -> String {
    let base_class = CssClasses::BTN;
    let variant_class = match variant {
        "primary" => CssClasses::BTN_PRIMARY,
        "danger" => CssClasses::BTN_DANGER,
        "warning" => CssClasses::BTN_WARNING,
        "secondary" => CssClasses::BTN_SECONDARY,
        _ => CssClasses::BTN_PRIMARY,
    };

    let mut classes = format!("{} {}", base_class, variant_class);
    if disabled {
        classes.push_str(" disabled");
    }
    classes
}

/// エラー種別に応じたバナーのCSSクラスを取得
pub fn get_error_class(kind: ErrorKind) -> String {
    let kind_class = match kind {
        ErrorKind::Transport => "transport",
        ErrorKind::Authorization => "authorization",
        ErrorKind::Validation => "validation",
        ErrorKind::Server | ErrorKind::Codec => "server",
    };
    format!("{} {}", CssClasses::ERROR_BANNER, kind_class)
}

/// 星評価の表示（例: ★★★☆☆）
pub fn star_rating(stars: i32) -> String {
    let filled = stars.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// CSSの埋め込み用ヘルパー
pub fn get_embedded_css() -> &'static str {
    include_str!("theme.css")
}
