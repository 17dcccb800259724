//! Composition root tests

use std::sync::Arc;

use mockito::Server;
use serde_json::json;
use userdeck_domain::{Error, User, UserRepository};
use userdeck_infrastructure::config::{AppConfig, ConfigBuilder, Profile};
use userdeck_infrastructure::di::{Lifetime, UserRepositoryResolver, bindings_for, init_app};
use userdeck_providers::InMemoryUserRepository;

fn test_profile() -> AppConfig {
    AppConfig::for_profile(Profile::Test)
}

#[test]
fn test_binding_tables() {
    let production = bindings_for(Profile::Production);
    let test = bindings_for(Profile::Test);

    assert_eq!(production[0].capability, "UserRepository");
    assert_eq!(production[0].implementation, "remote");
    assert_eq!(production[0].lifetime, Lifetime::Singleton);
    assert_eq!(test[0].implementation, "memory");
    assert_eq!(test[0].lifetime, Lifetime::Singleton);

    for table in [production, test] {
        let view_model = table
            .iter()
            .find(|b| b.capability == "OverviewViewModel")
            .unwrap();
        assert_eq!(view_model.lifetime, Lifetime::Transient);
    }
    assert_eq!(
        test[0].to_string(),
        "UserRepository -> memory (singleton)"
    );
}

#[tokio::test]
async fn test_test_profile_binds_memory_repository() {
    let context = init_app(test_profile()).await.unwrap();

    let repository = context.user_repository().unwrap();

    assert_eq!(context.profile(), Profile::Test);
    assert_eq!(repository.provider_name(), "memory");
}

#[tokio::test]
async fn test_production_profile_binds_remote_repository() {
    let config = ConfigBuilder::new()
        .with_profile(Profile::Production)
        .with_remote_url("http://127.0.0.1:9")
        .build();
    let context = init_app(config).await.unwrap();

    let repository = context.user_repository().unwrap();

    assert_eq!(repository.provider_name(), "remote");
}

#[tokio::test]
async fn test_production_without_url_fails_to_start() {
    let result = init_app(AppConfig::default()).await;

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[tokio::test]
async fn test_repository_is_singleton_per_container() {
    let context = init_app(test_profile()).await.unwrap();

    let first = context.user_repository().unwrap();
    let second = context.user_repository().unwrap();
    first.add_user("u1", User::new("Midna", 21)).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        second.get_user("u1").await.unwrap(),
        Some(User::new("Midna", 21))
    );
}

#[tokio::test]
async fn test_containers_do_not_share_singletons() {
    let a = init_app(test_profile()).await.unwrap();
    let b = init_app(test_profile()).await.unwrap();

    a.user_repository()
        .unwrap()
        .add_user("u1", User::new("Link", 17))
        .await
        .unwrap();

    assert_eq!(b.user_repository().unwrap().get_user("u1").await.unwrap(), None);
}

#[tokio::test]
async fn test_view_model_is_transient_over_shared_repository() {
    let context = init_app(test_profile()).await.unwrap();
    context
        .user_repository()
        .unwrap()
        .add_user("u1", User::new("Zelda", 18))
        .await
        .unwrap();

    let first = context.overview_view_model().unwrap();
    let second = context.overview_view_model().unwrap();
    first.fetch_users().await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.state().current().users, vec![User::new("Zelda", 18)]);
    // Fresh view-model, not yet loaded
    assert!(second.state().current().is_loading);
}

#[tokio::test]
async fn test_injected_repository_overrides_binding() {
    let repository = Arc::new(InMemoryUserRepository::from_users([(
        "u1",
        User::new("Midna", 21),
    )]));
    let config = ConfigBuilder::new()
        .with_profile(Profile::Production)
        .with_remote_url("http://127.0.0.1:9")
        .build();

    let context = init_app(config)
        .await
        .unwrap()
        .with_user_repository(repository.clone());
    let view_model = context.overview_view_model().unwrap();
    view_model.fetch_users().await.unwrap();

    assert_eq!(context.user_repository().unwrap().provider_name(), "memory");
    assert_eq!(*view_model.adults().current(), vec![User::new("Midna", 21)]);
}

#[tokio::test]
async fn test_switching_profile_keeps_consumer_unchanged() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/collections/users/documents")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {"id": "a", "name": "Midna", "age": 21},
                {"id": "b", "name": "Link", "age": 17},
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let production = ConfigBuilder::new()
        .with_profile(Profile::Production)
        .with_remote_url(server.url())
        .build();
    let test = test_profile();

    let mut adults = Vec::new();
    for config in [production, test] {
        let context = init_app(config).await.unwrap();
        // Consumer code: identical for both profiles
        let view_model = context.overview_view_model().unwrap();
        view_model.fetch_users().await.unwrap();
        adults.push((*view_model.adults().current()).clone());
    }

    assert_eq!(adults[0], vec![User::new("Midna", 21)]);
    assert!(adults[1].is_empty());
}

#[test]
fn test_resolver_lists_registered_providers() {
    let resolver = UserRepositoryResolver::new(Arc::new(test_profile()));

    let names: Vec<&str> = resolver
        .list_available()
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    assert!(names.contains(&"memory"));
    assert!(names.contains(&"remote"));
    assert!(resolver.is_registered("memory"));
    assert!(resolver.resolve("postgres").is_err());
}
