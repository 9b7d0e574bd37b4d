//! 一覧＋フォーム画面の状態管理
//!
//! 変更系の操作が成功するたびにコレクション全体を再取得する（差分適用はしない）。
//! 楽観的更新は行わず、コレクションは常にサーバーからの往復後の値を映す。
//! 状態は `watch` チャンネルで公開し、画面はスナップショットから再描画する。

use std::sync::Arc;
use tokio::sync::watch;

use crate::api::{ApiError, ApiResult, CrudResource};

/// 一覧＋フォームの状態
#[derive(Debug, Clone, PartialEq)]
pub struct ListFormState<E> {
    /// 最後に取得したコレクション
    pub collection: Vec<E>,
    /// 編集中のエンティティ（新規作成中は `None`）
    pub editing: Option<E>,
    /// フォームの表示状態
    pub form_visible: bool,
    /// 直近の失敗（次の成功で消える）
    pub last_error: Option<ApiError>,
}

impl<E> Default for ListFormState<E> {
    fn default() -> Self {
        Self {
            collection: Vec::new(),
            editing: None,
            form_visible: false,
            last_error: None,
        }
    }
}

impl<E> ListFormState<E> {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

/// 一覧＋フォーム画面のコントローラー
pub struct CrudController<R: CrudResource> {
    resource: Arc<R>,
    state: Arc<watch::Sender<ListFormState<R::Entity>>>,
}

impl<R: CrudResource> Clone for CrudController<R> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
            state: self.state.clone(),
        }
    }
}

impl<R: CrudResource> CrudController<R> {
    pub fn new(resource: Arc<R>) -> Self {
        let (state, _) = watch::channel(ListFormState::default());
        Self {
            resource,
            state: Arc::new(state),
        }
    }

    pub fn resource(&self) -> &Arc<R> {
        &self.resource
    }

    /// 状態の変更を購読
    pub fn subscribe(&self) -> watch::Receiver<ListFormState<R::Entity>> {
        self.state.subscribe()
    }

    /// 現在の状態のコピー
    pub fn snapshot(&self) -> ListFormState<R::Entity> {
        self.state.borrow().clone()
    }

    /// コレクション全体を取得し直して置き換える
    pub async fn load(&self) -> ApiResult<()> {
        match self.resource.list().await {
            Ok(items) => {
                tracing::debug!(resource = R::NAME, count = items.len(), "📋 Collection reloaded");
                self.state.send_modify(|state| {
                    state.collection = items;
                    state.last_error = None;
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(resource = R::NAME, "❌ Failed to load collection: {}", e);
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// 新規作成フォームを開く
    pub fn begin_create(&self) {
        self.state.send_modify(|state| {
            state.editing = None;
            state.form_visible = true;
        });
    }

    /// 編集フォームを開く
    pub fn begin_edit(&self, entity: R::Entity) {
        self.state.send_modify(|state| {
            state.editing = Some(entity);
            state.form_visible = true;
        });
    }

    /// フォームを閉じる（通信なし）
    pub fn cancel(&self) {
        self.state.send_modify(|state| {
            state.editing = None;
            state.form_visible = false;
        });
    }

    /// 「追加／キャンセル」ボタン
    pub fn toggle_form(&self) {
        let visible = self.state.borrow().form_visible;
        if visible {
            self.cancel();
        } else {
            self.begin_create();
        }
    }

    /// フォームの初期値（編集中ならそのエンティティ、新規なら空）
    pub fn form_seed(&self) -> R::Draft {
        self.state
            .borrow()
            .editing
            .as_ref()
            .map(R::draft_of)
            .unwrap_or_default()
    }

    /// 保存
    ///
    /// 編集中なら更新、そうでなければ作成。成功したら再取得してフォームを閉じる。
    /// 失敗時は状態を変えず（フォームは入力値のまま開いたまま）エラーを返す。
    /// 戻り値は変更操作の結果で、再取得の失敗は `last_error` に残る。
    pub async fn save(&self, fields: R::Draft) -> ApiResult<R::Id> {
        let target = self.state.borrow().editing.as_ref().map(R::entity_id);

        let result = match &target {
            Some(id) => self.resource.update(id, &fields).await,
            None => self.resource.create(&fields).await,
        };

        let id = match result {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(
                    resource = R::NAME,
                    editing = target.is_some(),
                    "❌ Save failed: {}",
                    e
                );
                self.record_error(&e);
                return Err(e);
            }
        };

        let _ = self.load().await;
        self.state.send_modify(|state| {
            state.editing = None;
            state.form_visible = false;
        });

        Ok(id)
    }

    /// 削除（確認なし）。成功したら再取得する。
    pub async fn delete(&self, id: &R::Id) -> ApiResult<R::Id> {
        match self.resource.delete(id).await {
            Ok(deleted) => {
                let _ = self.load().await;
                Ok(deleted)
            }
            Err(e) => {
                tracing::warn!(resource = R::NAME, id = %id, "❌ Delete failed: {}", e);
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// エラー表示を閉じる
    pub fn dismiss_error(&self) {
        self.state.send_modify(|state| state.last_error = None);
    }

    fn record_error(&self, error: &ApiError) {
        let error = error.clone();
        self.state.send_modify(|state| state.last_error = Some(error));
    }
}
