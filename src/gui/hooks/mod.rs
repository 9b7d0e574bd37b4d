//! コントローラーとDioxusのシグナルをつなぐフック

use dioxus::prelude::*;
use std::sync::Arc;
use tokio::sync::watch;

use crate::api::CrudResource;
use crate::state::{CrudController, ListFormState};

/// `watch` チャンネルの値をシグナルへ反映し続ける
///
/// 購読タスクはコンポーネントのスコープに紐づき、アンマウント時に破棄される。
pub fn use_watch<T: Clone + 'static>(subscribe: impl FnOnce() -> watch::Receiver<T>) -> Signal<T> {
    let receiver = use_hook(subscribe);
    let mut value = use_signal(|| receiver.borrow().clone());

    use_hook(move || {
        let mut receiver = receiver.clone();
        spawn(async move {
            while receiver.changed().await.is_ok() {
                let next = receiver.borrow_and_update().clone();
                value.set(next);
            }
        });
    });

    value
}

/// 一覧＋フォーム画面のコントローラーを作り、マウント時に一覧を取得する
pub fn use_crud_controller<R: CrudResource>(
    resource: Arc<R>,
) -> (CrudController<R>, Signal<ListFormState<R::Entity>>) {
    let controller = use_hook(move || CrudController::new(resource));

    let state = use_watch({
        let controller = controller.clone();
        move || controller.subscribe()
    });

    use_hook({
        let controller = controller.clone();
        move || {
            spawn(async move {
                let _ = controller.load().await;
            });
        }
    });

    (controller, state)
}
