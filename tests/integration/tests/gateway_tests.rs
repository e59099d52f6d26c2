//! Gateway Integration Tests
//!
//! Boots the gateway on a loopback port and drives it over real WebSockets.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::time::Duration;

use integration_tests::{assert_json, fixtures::*, wait_until, TestServer};
use lobby_common::AppConfig;
use reqwest::StatusCode;

// ============================================================================
// Connection Tests
// ============================================================================

#[tokio::test]
async fn test_open_delivers_identity() {
    let server = TestServer::start().await.unwrap();

    let (_a, session_a) = server.connect().await.unwrap();
    let (_b, session_b) = server.connect().await.unwrap();

    assert_ne!(session_a.user_id, session_b.user_id);
    assert!(!session_a.is_room_owner);
    assert!(session_a.user_dsp.is_empty());
    assert!(server
        .state
        .connection_manager()
        .has_session(session_a.user_id));
}

#[tokio::test]
async fn test_health_reports_counts() {
    let server = TestServer::start().await.unwrap();
    let (mut client, _) = server.connect().await.unwrap();
    client.send_envelope(NEW_ROOM, new_room("h", 0)).await.unwrap();
    let _room: RoomResponse = client.recv_json().await.unwrap();

    let response = server.get("/health").await.unwrap();
    let health: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(health.status, "ok");
    assert_eq!(health.connections, 1);
    assert_eq!(health.rooms, 1);
}

#[tokio::test]
async fn test_heartbeat_probe() {
    let mut config = AppConfig::for_tests();
    config.heartbeat.interval_secs = 1;
    let server = TestServer::start_with_config(config).await.unwrap();
    let (mut client, _) = server.connect().await.unwrap();

    let body = client.recv_ping(Duration::from_secs(3)).await.unwrap();
    assert_eq!(body, b"ping".to_vec());
}

// ============================================================================
// Room Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_join_notifies_owner() {
    let server = TestServer::start().await.unwrap();
    let (mut a, session_a) = server.connect().await.unwrap();

    a.send_envelope(NEW_ROOM, new_room("", 2)).await.unwrap();
    let room: RoomResponse = a.recv_json().await.unwrap();
    assert!(!room.room_id.is_empty());
    assert_eq!(room.owner.user_id, session_a.user_id);
    assert!(room.owner.is_room_owner);
    assert!(room.members.is_empty());

    let (mut b, session_b) = server.connect().await.unwrap();
    b.send_envelope(JOIN_ROOM, join_room(&room.room_id))
        .await
        .unwrap();
    let joined: RoomResponse = b.recv_json().await.unwrap();
    assert_eq!(joined.owner.user_id, session_a.user_id);
    assert_eq!(joined.member_ids(), vec![session_b.user_id]);

    let event: EventResponse = a.recv_json().await.unwrap();
    assert_eq!(event.event, "membersUpdated");
    assert_eq!(event.room_id, room.room_id);
    assert_eq!(event.member_ids(), vec![session_b.user_id]);

    b.expect_silence(Duration::from_millis(200)).await.unwrap();
}

#[tokio::test]
async fn test_owner_disconnect_closes_room() {
    let server = TestServer::start().await.unwrap();
    let (mut owner, _) = server.connect().await.unwrap();
    owner.send_envelope(NEW_ROOM, new_room("r", 0)).await.unwrap();
    let _room: RoomResponse = owner.recv_json().await.unwrap();

    let (mut a, _) = server.connect().await.unwrap();
    let (mut b, _) = server.connect().await.unwrap();
    for client in [&mut a, &mut b] {
        client.send_envelope(JOIN_ROOM, join_room("r")).await.unwrap();
        let _joined: RoomResponse = client.recv_json().await.unwrap();
    }

    owner.close().await.unwrap();

    for client in [&mut a, &mut b] {
        let event: EventResponse = client.recv_json().await.unwrap();
        assert_eq!(event.event, "roomClosed");
        assert_eq!(event.room_id, "r");
        client
            .expect_silence(Duration::from_millis(200))
            .await
            .unwrap();
    }

    assert!(!server.state.room_registry().contains_room("r"));
    wait_until(|| server.state.connection_manager().connection_count() == 2)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_member_disconnect_updates_owner() {
    let server = TestServer::start().await.unwrap();
    let (mut owner, _) = server.connect().await.unwrap();
    owner.send_envelope(NEW_ROOM, new_room("r", 0)).await.unwrap();
    let _room: RoomResponse = owner.recv_json().await.unwrap();

    let (mut member, _) = server.connect().await.unwrap();
    member.send_envelope(JOIN_ROOM, join_room("r")).await.unwrap();
    let _joined: RoomResponse = member.recv_json().await.unwrap();
    let _update: EventResponse = owner.recv_json().await.unwrap();

    member.close().await.unwrap();

    let event: EventResponse = owner.recv_json().await.unwrap();
    assert_eq!(event.event, "membersUpdated");
    assert!(event.members.is_empty());
    assert!(server.state.room_registry().contains_room("r"));
}

#[tokio::test]
async fn test_leave_then_leave_again() {
    let server = TestServer::start().await.unwrap();
    let (mut owner, _) = server.connect().await.unwrap();
    owner.send_envelope(NEW_ROOM, new_room("r", 0)).await.unwrap();
    let _room: RoomResponse = owner.recv_json().await.unwrap();

    let (mut member, _) = server.connect().await.unwrap();
    member.send_envelope(JOIN_ROOM, join_room("r")).await.unwrap();
    let _joined: RoomResponse = member.recv_json().await.unwrap();

    member.send_envelope(LEAVE_ROOM, leave_room("r")).await.unwrap();
    assert_eq!(member.recv_text().await.unwrap(), "");

    member.send_envelope(LEAVE_ROOM, leave_room("r")).await.unwrap();
    let error: ErrorResponse = member.recv_json().await.unwrap();
    assert_eq!(error.error_message, "user not in room");
    assert_eq!(error.action, "room leaving");
}

#[tokio::test]
async fn test_room_capacity() {
    let server = TestServer::start().await.unwrap();
    let (mut owner, _) = server.connect().await.unwrap();
    owner.send_envelope(NEW_ROOM, new_room("small", 1)).await.unwrap();
    let _room: RoomResponse = owner.recv_json().await.unwrap();

    let (mut first, _) = server.connect().await.unwrap();
    first.send_envelope(JOIN_ROOM, join_room("small")).await.unwrap();
    let _joined: RoomResponse = first.recv_json().await.unwrap();

    let (mut second, _) = server.connect().await.unwrap();
    second.send_envelope(JOIN_ROOM, join_room("small")).await.unwrap();
    let error: ErrorResponse = second.recv_json().await.unwrap();
    assert_eq!(error.error_message, "room is full");
    assert_eq!(error.action, "room joining");
}

#[tokio::test]
async fn test_duplicate_room_rejected() {
    let server = TestServer::start().await.unwrap();
    let (mut a, _) = server.connect().await.unwrap();
    let (mut b, _) = server.connect().await.unwrap();

    a.send_envelope(NEW_ROOM, new_room("same", 0)).await.unwrap();
    let _room: RoomResponse = a.recv_json().await.unwrap();

    b.send_envelope(NEW_ROOM, new_room("same", 0)).await.unwrap();
    let error: ErrorResponse = b.recv_json().await.unwrap();
    assert_eq!(error.action, "room creation");
}

#[tokio::test]
async fn test_init_user_is_visible_in_later_room() {
    let server = TestServer::start().await.unwrap();
    let (mut client, _) = server.connect().await.unwrap();

    // Pipelined requests are answered in order
    client.send_envelope(INIT_USER, init_user("dsp-42")).await.unwrap();
    client.send_envelope(NEW_ROOM, new_room("", 0)).await.unwrap();

    assert_eq!(client.recv_text().await.unwrap(), "");
    let room: RoomResponse = client.recv_json().await.unwrap();
    assert_eq!(room.owner.user_dsp, "dsp-42");
}

// ============================================================================
// Protocol Error Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_type_name() {
    let server = TestServer::start().await.unwrap();
    let (mut client, _) = server.connect().await.unwrap();

    client.send_envelope(99, new_room("x", 0)).await.unwrap();
    let error: ErrorResponse = client.recv_json().await.unwrap();

    assert_eq!(error.action, "types");
    assert_eq!(server.state.room_registry().room_count(), 0);
}

#[tokio::test]
async fn test_join_without_room_id() {
    let server = TestServer::start().await.unwrap();
    let (mut client, _) = server.connect().await.unwrap();

    client
        .send_envelope(JOIN_ROOM, serde_json::json!({}))
        .await
        .unwrap();
    let error: ErrorResponse = client.recv_json().await.unwrap();

    assert_eq!(error.action, "payload");
}

#[tokio::test]
async fn test_binary_frame_rejected() {
    let server = TestServer::start().await.unwrap();
    let (mut client, _) = server.connect().await.unwrap();

    client.send_binary(&[0, 1, 2]).await.unwrap();
    let error: ErrorResponse = client.recv_json().await.unwrap();
    assert_eq!(error.action, "message parsing");

    // Connection stays usable
    client.send_envelope(INIT_USER, init_user("a")).await.unwrap();
    assert_eq!(client.recv_text().await.unwrap(), "");
}

#[tokio::test]
async fn test_invalid_json() {
    let server = TestServer::start().await.unwrap();
    let (mut client, _) = server.connect().await.unwrap();

    client.send_text("{not json").await.unwrap();
    let error: ErrorResponse = client.recv_json().await.unwrap();
    assert_eq!(error.action, "message parsing");
}
