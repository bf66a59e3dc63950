// Discovery and filter-stage tests against the in-memory gateway.

mod common;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use common::{ids, MockGateway};
use pagescout::classify::traits::Predicate;
use pagescout::pipeline::discovery::discover_pages;
use pagescout::pipeline::filter::filter_pages;
use pagescout::vk::{PageId, VkError};

fn queries(list: &[&str]) -> Vec<String> {
    list.iter().map(|q| q.to_string()).collect()
}

// --- Discovery ---

#[tokio::test]
async fn overlapping_queries_are_merged() {
    let gateway = MockGateway::new()
        .with_search("python", &[1, 2, 3])
        .with_search("rust", &[3, 4, 5]);

    let pages = discover_pages(&gateway, &queries(&["python", "rust"]), 20)
        .await
        .unwrap();

    assert_eq!(pages, ids(&[1, 2, 3, 4, 5]));
}

#[tokio::test]
async fn query_order_does_not_matter() {
    let gateway = MockGateway::new()
        .with_search("a", &[9, 1])
        .with_search("b", &[1, 4])
        .with_search("c", &[]);

    let forward = discover_pages(&gateway, &queries(&["a", "b", "c"]), 20)
        .await
        .unwrap();
    let reverse = discover_pages(&gateway, &queries(&["c", "b", "a"]), 20)
        .await
        .unwrap();

    assert_eq!(forward, reverse);
    assert_eq!(forward, ids(&[1, 4, 9]));
}

#[tokio::test]
async fn each_query_is_capped_and_sent_once() {
    let gateway = MockGateway::new()
        .with_search("python", &[1, 2, 3, 4])
        .with_search("rust", &[5, 6, 7]);

    let pages = discover_pages(&gateway, &queries(&["python", "rust"]), 2)
        .await
        .unwrap();

    assert_eq!(pages, ids(&[1, 2, 5, 6]));
    assert_eq!(
        *gateway.search_calls.lock().unwrap(),
        vec![("python".to_string(), 2), ("rust".to_string(), 2)]
    );
}

#[tokio::test]
async fn failing_query_aborts_discovery() {
    let gateway = MockGateway::new()
        .with_search("python", &[1, 2])
        .failing_search("rust")
        .with_search("go", &[3]);

    let err = discover_pages(&gateway, &queries(&["python", "rust", "go"]), 20)
        .await
        .unwrap_err();

    assert!(err.is_transport());
    // Nothing after the failed query is attempted
    assert_eq!(gateway.search_calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn no_queries_means_no_pages() {
    let gateway = MockGateway::new();
    let pages = discover_pages(&gateway, &[], 20).await.unwrap();
    assert!(pages.is_empty());
    assert_eq!(gateway.total_calls(), 0);
}

// --- Filter stage ---

#[tokio::test]
async fn rejected_pages_are_dropped() {
    let reject_two = Predicate::new("reject-2", |page: PageId| Ok(page == PageId(2)));
    let kept = filter_pages(&ids(&[1, 2, 3]), &reject_two, 1).await.unwrap();
    assert_eq!(kept, ids(&[1, 3]));
}

#[tokio::test]
async fn empty_input_makes_no_calls() {
    let calls = AtomicUsize::new(0);
    let counting = Predicate::new("counting", |_page: PageId| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    });

    let kept = filter_pages(&ids(&[]), &counting, 1).await.unwrap();

    assert!(kept.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn predicate_error_aborts_the_stage() {
    let failing = Predicate::new("failing", |page: PageId| {
        if page == PageId(2) {
            Err(VkError::Request {
                code: 5,
                message: "User authorization failed".to_string(),
            })
        } else {
            Ok(false)
        }
    });

    let err = filter_pages(&ids(&[1, 2, 3]), &failing, 1).await.unwrap_err();
    assert!(err.is_request());
}

#[tokio::test]
async fn predicate_error_aborts_the_stage_concurrently() {
    let failing = Predicate::new("failing", |page: PageId| {
        if page.0 % 7 == 0 {
            Err(VkError::Transport("connection reset".to_string()))
        } else {
            Ok(false)
        }
    });

    let pages = ids(&(1..=30).collect::<Vec<_>>());
    let err = filter_pages(&pages, &failing, 4).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn concurrency_does_not_change_the_result() {
    let odd = Predicate::new("odd", |page: PageId| Ok(page.0 % 2 == 1));
    let pages = ids(&(1..=40).collect::<Vec<_>>());

    let sequential = filter_pages(&pages, &odd, 1).await.unwrap();
    let parallel = filter_pages(&pages, &odd, 8).await.unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(sequential, ids(&(2..=40).step_by(2).collect::<Vec<_>>()));
}

#[tokio::test]
async fn each_page_is_checked_exactly_once() {
    let seen = Mutex::new(HashMap::<u64, usize>::new());
    let recording = Predicate::new("recording", |page: PageId| {
        *seen.lock().unwrap().entry(page.0).or_default() += 1;
        Ok(false)
    });
    let pages = ids(&(1..=25).collect::<Vec<_>>());

    let kept = filter_pages(&pages, &recording, 5).await.unwrap();

    assert_eq!(kept, pages);
    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 25);
    assert!(seen.values().all(|&n| n == 1));
}

#[tokio::test]
async fn zero_concurrency_behaves_like_one() {
    let none = Predicate::new("none", |_page: PageId| Ok(false));
    let kept = filter_pages(&ids(&[4, 5]), &none, 0).await.unwrap();
    assert_eq!(kept, ids(&[4, 5]));
}
