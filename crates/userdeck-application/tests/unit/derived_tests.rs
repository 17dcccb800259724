//! Derived state tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use userdeck_application::{OverviewState, StateHolder};
use userdeck_application::view_models::adults_of;
use userdeck_domain::User;

use crate::test_utils::{link, midna, zelda};

fn adults_view(
    holder: &StateHolder<OverviewState>,
) -> userdeck_application::DerivedState<Vec<User>> {
    holder.derive(
        |state: &OverviewState| state.users.clone(),
        |users: &Vec<User>| adults_of(users),
    )
}

#[test]
fn test_initial_value_matches_source() {
    let holder = StateHolder::new(OverviewState {
        users: vec![midna(), link()],
        is_loading: false,
        error: None,
    });

    let adults = adults_view(&holder);

    assert_eq!(*adults.current(), vec![midna()]);
    assert_eq!(adults.recompute_count(), 0);
}

#[test]
fn test_only_adults_are_projected() {
    let holder = StateHolder::new(OverviewState::default());
    let adults = adults_view(&holder);

    holder.update(|s| OverviewState {
        users: vec![link(), zelda(), midna()],
        ..s.clone()
    });

    assert_eq!(*adults.current(), vec![zelda(), midna()]);
    assert!(adults.current().iter().all(|u| u.age >= 18));
}

#[test]
fn test_loading_flag_alone_does_not_recompute() {
    let holder = StateHolder::new(OverviewState {
        users: vec![midna()],
        is_loading: false,
        error: None,
    });
    let adults = adults_view(&holder);
    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notifications);
    let _sub = adults.subscribe(move |_: &Arc<Vec<User>>| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    holder.update(|s| OverviewState {
        is_loading: true,
        ..s.clone()
    });
    holder.update(|s| OverviewState {
        is_loading: false,
        ..s.clone()
    });

    assert_eq!(holder.version(), 2);
    assert_eq!(adults.recompute_count(), 0);
    assert_eq!(notifications.load(Ordering::SeqCst), 0);
}

#[test]
fn test_user_list_change_recomputes_once() {
    let holder = StateHolder::new(OverviewState::default());
    let adults = adults_view(&holder);
    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notifications);
    let _sub = adults.subscribe(move |_: &Arc<Vec<User>>| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    holder.update(|_| OverviewState {
        users: vec![midna()],
        is_loading: false,
        error: None,
    });

    assert_eq!(adults.recompute_count(), 1);
    assert_eq!(notifications.load(Ordering::SeqCst), 1);
    assert_eq!(*adults.current(), vec![midna()]);
}

#[test]
fn test_minor_added_recomputes_without_changing_adults() {
    let holder = StateHolder::new(OverviewState {
        users: vec![midna()],
        is_loading: false,
        error: None,
    });
    let adults = adults_view(&holder);
    let version_before = adults.version();

    holder.update(|s| OverviewState {
        users: vec![midna(), link()],
        ..s.clone()
    });

    assert_eq!(adults.recompute_count(), 1);
    assert_eq!(adults.version(), version_before);
    assert_eq!(*adults.current(), vec![midna()]);
}

#[test]
fn test_detached_view_keeps_last_value() {
    let holder = StateHolder::new(OverviewState::default());
    let mut adults = adults_view(&holder);
    assert_eq!(holder.subscriber_count(), 1);

    adults.detach();
    holder.update(|_| OverviewState {
        users: vec![midna()],
        is_loading: false,
        error: None,
    });

    assert!(!adults.is_attached());
    assert!(adults.current().is_empty());
    assert_eq!(holder.subscriber_count(), 0);
}

#[test]
fn test_dropping_view_unsubscribes_from_source() {
    let holder = StateHolder::new(OverviewState::default());
    {
        let _adults = adults_view(&holder);
        assert_eq!(holder.subscriber_count(), 1);
    }
    assert_eq!(holder.subscriber_count(), 0);
}

#[test]
fn test_debug_reports_value_and_attachment() {
    let holder = StateHolder::new(OverviewState {
        users: vec![midna()],
        is_loading: false,
        error: None,
    });
    let mut adults = adults_view(&holder);

    let attached = format!("{adults:?}");
    assert!(attached.contains("Midna"));
    assert!(attached.contains("recomputations: 0"));
    assert!(attached.contains("attached: true"));

    adults.detach();
    assert!(format!("{adults:?}").contains("attached: false"));
}
