use super::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

type TestCache = QueryCache<QueryKey, Vec<u32>>;

async fn counted_read(cache: &TestCache, fetches: &AtomicUsize, value: Vec<u32>) -> Vec<u32> {
    cache
        .read(QueryKey::Books, || async move {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(value)
        })
        .await
        .expect("read")
}

#[tokio::test]
async fn fresh_entry_is_served_without_fetching() {
    let cache = TestCache::new();
    let fetches = AtomicUsize::new(0);

    assert!(cache.is_stale(QueryKey::Books).await);
    assert_eq!(counted_read(&cache, &fetches, vec![1]).await, vec![1]);
    assert_eq!(counted_read(&cache, &fetches, vec![2]).await, vec![1]);
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert!(!cache.is_stale(QueryKey::Books).await);
}

#[tokio::test]
async fn invalidation_triggers_refetch_on_next_read() {
    let cache = TestCache::new();
    let fetches = AtomicUsize::new(0);

    counted_read(&cache, &fetches, vec![1]).await;
    cache.invalidate(QueryKey::Books).await;
    assert!(cache.is_stale(QueryKey::Books).await);
    assert_eq!(cache.generation(QueryKey::Books).await, 1);
    // Stale data stays visible to peek until the re-fetch lands.
    assert_eq!(cache.peek(QueryKey::Books).await, Some(vec![1]));

    assert_eq!(counted_read(&cache, &fetches, vec![1, 2]).await, vec![1, 2]);
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
    assert!(!cache.is_stale(QueryKey::Books).await);
}

#[tokio::test]
async fn failed_fetch_leaves_entry_untouched() {
    let cache = TestCache::new();
    let fetches = AtomicUsize::new(0);
    counted_read(&cache, &fetches, vec![7]).await;
    cache.invalidate(QueryKey::Books).await;

    let err = cache
        .read(QueryKey::Books, || async { Err::<Vec<u32>, _>("boom") })
        .await
        .expect_err("fetch fails");
    assert_eq!(err, "boom");
    assert_eq!(cache.peek(QueryKey::Books).await, Some(vec![7]));
    assert!(cache.is_stale(QueryKey::Books).await);
    assert_eq!(cache.generation(QueryKey::Books).await, 1);
}

#[tokio::test]
async fn invalidation_during_fetch_keeps_entry_stale() {
    let cache = Arc::new(TestCache::new());
    let (started_tx, started_rx) = tokio::sync::oneshot::channel::<()>();
    let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();

    let reader = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move {
            cache
                .read(QueryKey::Books, || async move {
                    let _ = started_tx.send(());
                    let _ = release_rx.await;
                    Ok::<_, String>(vec![1])
                })
                .await
        })
    };

    started_rx.await.expect("fetch started");
    cache.invalidate(QueryKey::Books).await;
    release_tx.send(()).expect("release fetch");

    assert_eq!(reader.await.expect("join").expect("read"), vec![1]);
    assert!(cache.is_stale(QueryKey::Books).await);
    assert_eq!(cache.peek(QueryKey::Books).await, Some(vec![1]));
}
