//! Controllers — async drivers for the state containers in `domain/*/state.rs`.
//!
//! Each controller owns its state behind one lock, issues fetches through a
//! [`CoinCatalog`](crate::domain::catalog::CoinCatalog), and publishes a
//! snapshot over a `tokio::sync::watch` channel after every change. The lock
//! is released before any network await.
//!
//! Controllers are cheap to clone; clones drive the same state.

pub mod detail;
pub mod list;

pub use detail::CoinDetailController;
pub use list::CoinListController;

use futures_util::Stream;
use tokio::sync::watch;

/// Stream of values sent on `tx` after this call.
pub(crate) fn watch_stream<T>(tx: &watch::Sender<T>) -> impl Stream<Item = T> + Send + 'static
where
    T: Clone + Send + Sync + 'static,
{
    futures_util::stream::unfold(tx.subscribe(), |mut rx| async move {
        rx.changed().await.ok()?;
        let value = rx.borrow_and_update().clone();
        Some((value, rx))
    })
}
