use serde::{Deserialize, Serialize};

/// キーノートID（サーバー採番の不透明な文字列）
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeynoteId(pub String);

impl KeynoteId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// キーノート（登壇者）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keynote {
    pub keynote_id: KeynoteId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub keynote_function: String,
}

impl Keynote {
    /// 一覧・選択肢に表示する氏名
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// 作成・更新時に送るフィールド（IDを除く）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeynoteDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub keynote_function: String,
}

impl From<&Keynote> for KeynoteDraft {
    fn from(keynote: &Keynote) -> Self {
        Self {
            first_name: keynote.first_name.clone(),
            last_name: keynote.last_name.clone(),
            email: keynote.email.clone(),
            keynote_function: keynote.keynote_function.clone(),
        }
    }
}
