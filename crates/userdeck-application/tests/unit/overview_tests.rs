//! Overview view-model tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use userdeck_application::{OverviewState, OverviewViewModel};
use userdeck_domain::{Error, UserRepository};
use userdeck_providers::repository::InMemoryUserRepository;

use crate::test_utils::{ScriptedRepository, link, midna, zelda};

#[test]
fn test_initial_state_is_loading() {
    let vm = OverviewViewModel::new(Arc::new(InMemoryUserRepository::new()));
    let state = vm.state().current();

    assert_eq!(*state, OverviewState::default());
    assert!(state.is_loading);
    assert!(vm.adults().current().is_empty());
}

#[tokio::test]
async fn test_fetch_publishes_users_and_loading_in_one_update() {
    let repo = Arc::new(ScriptedRepository::with_users(&[("a", midna()), ("b", link())]));
    let vm = OverviewViewModel::new(repo);
    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notifications);
    let _sub = vm.state().subscribe(move |_: &Arc<OverviewState>| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    vm.fetch_users().await.unwrap();

    // Already loading, so only the final snapshot is published
    assert_eq!(notifications.load(Ordering::SeqCst), 1);
    let state = vm.state().current();
    assert_eq!(state.users, vec![midna(), link()]);
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
    assert_eq!(*vm.adults().current(), vec![midna()]);
}

#[tokio::test]
async fn test_failed_fetch_is_recorded_in_state() {
    let repo = Arc::new(ScriptedRepository::default().failing("store unreachable"));
    let vm = OverviewViewModel::new(repo);

    let result = vm.fetch_users().await;

    assert!(matches!(result, Err(Error::Transport { .. })));
    let state = vm.state().current();
    assert!(!state.is_loading);
    assert!(state.error.as_deref().unwrap().contains("store unreachable"));
}

#[tokio::test]
async fn test_refetch_sets_loading_then_clears_it() {
    let repo = Arc::new(ScriptedRepository::with_users(&[("a", midna())]));
    let vm = OverviewViewModel::new(repo);
    vm.fetch_users().await.unwrap();

    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = vm.state().subscribe(move |s: &Arc<OverviewState>| {
        sink.lock().unwrap().push(s.is_loading);
    });

    vm.fetch_users().await.unwrap();

    // Users unchanged: loading=true then loading=false
    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    assert_eq!(vm.adults().recompute_count(), 1);
}

#[tokio::test]
async fn test_add_user_writes_through_and_refreshes() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let vm = OverviewViewModel::new(repo.clone());

    vm.add_user("z", zelda()).await.unwrap();
    vm.add_user("l", link()).await.unwrap();

    assert_eq!(repo.get_user("z").await.unwrap(), Some(zelda()));
    assert_eq!(vm.state().current().users, vec![link(), zelda()]);
    assert_eq!(*vm.adults().current(), vec![zelda()]);
}

#[tokio::test]
async fn test_add_user_rejects_empty_id() {
    let vm = OverviewViewModel::new(Arc::new(InMemoryUserRepository::new()));
    let result = vm.add_user("", midna()).await;
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[tokio::test]
async fn test_find_user() {
    let repo = Arc::new(ScriptedRepository::with_users(&[("a", midna())]));
    let vm = OverviewViewModel::new(repo);

    assert_eq!(vm.find_user("a").await.unwrap(), Some(midna()));
    assert_eq!(vm.find_user("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_result_arriving_after_clear_is_dropped() {
    let (repo, gate) = ScriptedRepository::with_users(&[("a", midna())]).gated();
    let repo = Arc::new(repo);
    let vm = OverviewViewModel::new(repo.clone());

    let handle = vm.on_fetch_users().expect("fetch spawned");
    while repo.list_calls() == 0 {
        tokio::task::yield_now().await;
    }

    vm.clear();
    gate.notify_one();
    handle.await.unwrap();

    let state = vm.state().current();
    assert!(state.users.is_empty());
    assert!(state.is_loading);
    assert!(vm.is_cleared());
    assert!(vm.on_fetch_users().is_none());
}

#[tokio::test]
async fn test_background_fetch_publishes() {
    let repo = Arc::new(ScriptedRepository::with_users(&[("a", midna()), ("z", zelda())]));
    let vm = OverviewViewModel::new(repo);

    vm.on_fetch_users().expect("fetch spawned").await.unwrap();

    assert_eq!(vm.adults().current().len(), 2);
    assert!(!vm.state().current().is_loading);
}

#[test]
fn test_repository_name_reports_injected_provider() {
    let vm = OverviewViewModel::new(Arc::new(ScriptedRepository::default()));
    assert_eq!(vm.repository_name(), "scripted");
}
