mod common;

use common::{Call, FakeRemote};
use friendgraph_core::{
    hobby_catalogue, GraphService, Position, Size, UserId, UserPatch,
};
use std::collections::HashMap;

fn three_user_remote() -> FakeRemote {
    let remote = FakeRemote::new();
    remote.seed_user("a", "Alice", 30, &[]);
    remote.seed_user("b", "Bob", 31, &["tennis"]);
    remote.seed_user("c", "Carol", 40, &["chess", "go"]);
    remote
}

async fn loaded() -> (GraphService<FakeRemote>, HashMap<UserId, Size>) {
    let service = GraphService::new(three_user_remote());
    service.fetch_data().await.unwrap();
    let measured = service
        .state()
        .users()
        .iter()
        .map(|user| (user.id.clone(), Size::new(160.0, 70.0)))
        .collect();
    (service, measured)
}

#[tokio::test]
async fn dropping_existing_hobby_submits_set_without_duplicate() {
    let (service, measured) = loaded().await;

    let confirmation = service
        .drop_hobby(Position::new(540.0, 35.0), Some("chess"), &measured)
        .await
        .unwrap();

    assert!(confirmation.is_some());
    assert_eq!(
        service.remote().calls(),
        vec![Call::Update(
            "c".to_string(),
            UserPatch::hobbies(vec!["chess".to_string(), "go".to_string()])
        )]
    );
    assert_eq!(
        service.remote().user_hobbies("c"),
        Some(vec!["chess".to_string(), "go".to_string()])
    );
}

#[tokio::test]
async fn dropping_new_hobby_merges_and_refetches() {
    let (service, measured) = loaded().await;
    let before = service.state().user("b").unwrap().position;

    service
        .drop_hobby(Position::new(260.0, 10.0), Some("chess"), &measured)
        .await
        .unwrap();

    let state = service.state();
    let bob = state.user("b").unwrap();
    assert_eq!(bob.data.hobbies, vec!["tennis", "chess"]);
    assert_eq!(bob.position, before);
    assert_eq!(hobby_catalogue(state.users()), vec!["chess", "go", "tennis"]);
}

#[tokio::test]
async fn drop_outside_every_node_is_silent_noop() {
    let (service, measured) = loaded().await;
    let before = service.state();
    let fetches_before = service.remote().fetch_count();

    let outcome = service
        .drop_hobby(Position::new(200.0, 35.0), Some("chess"), &measured)
        .await
        .unwrap();

    assert_eq!(outcome, None);
    assert!(service.remote().calls().is_empty());
    assert_eq!(service.remote().fetch_count(), fetches_before);
    assert_eq!(service.state(), before);
}

#[tokio::test]
async fn empty_payload_is_noop() {
    let (service, measured) = loaded().await;
    let inside_a = Position::new(20.0, 20.0);

    assert_eq!(service.drop_hobby(inside_a, None, &measured).await.unwrap(), None);
    assert_eq!(
        service.drop_hobby(inside_a, Some(""), &measured).await.unwrap(),
        None
    );
    assert!(service.remote().calls().is_empty());
}

#[tokio::test]
async fn drop_clears_selection_like_any_update() {
    let (service, measured) = loaded().await;
    service.select_node(Some("a"));

    service
        .drop_hobby(Position::new(20.0, 20.0), Some("go"), &measured)
        .await
        .unwrap();

    let state = service.state();
    assert_eq!(state.selected_user_id(), None);
    assert_eq!(state.user("a").unwrap().data.hobbies, vec!["go"]);
}
