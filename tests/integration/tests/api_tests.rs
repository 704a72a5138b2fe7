//! API Integration Tests
//!
//! Most tests run against a server backed by the in-memory store. Tests named
//! `*_postgres` additionally require `DATABASE_URL` and are skipped otherwise.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_database_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

async fn create_idea(server: &TestServer, token: &str) -> IdeaResponse {
    let response = server
        .post_auth("/api/v1/ideas", token, &CreateIdeaRequest::unique())
        .await
        .unwrap();
    let created: CreateIdeaResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    created.idea
}

async fn create_comment(
    server: &TestServer,
    token: &str,
    request: &CreateCommentRequest,
) -> CommentResponse {
    let response = server.post_auth("/api/v1/comments", token, request).await.unwrap();
    let created: CreateCommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    created.comment
}

async fn vote_comment(
    server: &TestServer,
    token: &str,
    comment_id: &str,
    vote: &VoteRequest,
) -> VoteResponse {
    let response = server
        .post_auth(&format!("/api/v1/comments/{comment_id}/vote"), token, vote)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_health_ready_postgres() {
    if !check_database_env() {
        return;
    }

    let server = TestServer::start_postgres().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_mutations_require_auth() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/v1/ideas", &CreateIdeaRequest::unique())
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");

    let response = server
        .post_auth("/api/v1/ideas", "not-a-jwt", &CreateIdeaRequest::unique())
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_listings_allow_anonymous() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = server.new_user().unwrap();
    let idea = create_idea(&server, &token).await;

    let response = server.get("/api/v1/ideas").await.unwrap();
    let feed: IdeaListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(feed.ideas.len(), 1);
    assert!(feed.ideas[0].user_vote.is_none());

    let response = server
        .get(&format!("/api/v1/ideas/{}/comments", idea.id))
        .await
        .unwrap();
    let page: CommentListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.comments.is_empty());
    assert!(!page.has_more);
    assert!(page.next_cursor.is_none());
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_thread_scenario() {
    let server = TestServer::start().await.unwrap();
    let (alice_id, alice) = server.new_user().unwrap();
    let (_, bob) = server.new_user().unwrap();

    let idea = create_idea(&server, &alice).await;
    let c1 = create_comment(
        &server,
        &alice,
        &CreateCommentRequest::top_level(&idea.id, "First!"),
    )
    .await;
    assert_eq!(c1.author_id, alice_id.to_string());
    assert_eq!(c1.votes_count, 0);
    assert_eq!(c1.replies_count, 0);

    let c2 = create_comment(
        &server,
        &bob,
        &CreateCommentRequest::reply(&idea.id, &c1.id, "Replying"),
    )
    .await;
    assert_eq!(c2.parent_id.as_deref(), Some(c1.id.as_str()));

    let vote = vote_comment(&server, &bob, &c1.id, &VoteRequest::up()).await;
    assert!(vote.success);
    assert_eq!(vote.votes_count, 1);
    assert_eq!(vote.user_vote.as_deref(), Some("UP"));

    let response = server
        .get_auth(&format!("/api/v1/ideas/{}/comments", idea.id), &bob)
        .await
        .unwrap();
    let page: CommentListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.comments.len(), 1);
    assert_eq!(page.comments[0].id, c1.id);
    assert_eq!(page.comments[0].votes_count, 1);
    assert_eq!(page.comments[0].replies_count, 1);
    assert_eq!(page.comments[0].user_vote.as_deref(), Some("UP"));

    let response = server
        .get(&format!("/api/v1/comments/{}/replies", c1.id))
        .await
        .unwrap();
    let replies: ReplyListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(replies.replies.len(), 1);
    assert_eq!(replies.replies[0].id, c2.id);
    assert!(!replies.has_more);

    let response = server
        .delete_auth(&format!("/api/v1/comments/{}", c1.id), &alice)
        .await
        .unwrap();
    let deleted: DeleteCommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(deleted.success);

    // C1 has a reply, so it stays in the thread as a placeholder
    let response = server
        .get_auth(&format!("/api/v1/ideas/{}/comments", idea.id), &bob)
        .await
        .unwrap();
    let page: CommentListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.comments.len(), 1);
    assert!(!page.has_more);
    assert!(page.next_cursor.is_none());
    let listed = &page.comments[0];
    assert_eq!(listed.id, c1.id);
    assert!(listed.is_deleted);
    assert_eq!(listed.content, "[deleted]");
    assert_eq!(listed.votes_count, 1);
    assert_eq!(listed.replies_count, 1);
    assert_eq!(listed.user_vote.as_deref(), Some("UP"));

    let response = server
        .get(&format!("/api/v1/comments/{}/replies", c1.id))
        .await
        .unwrap();
    let replies: ReplyListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(replies.replies.len(), 1);
    assert_eq!(replies.replies[0].id, c2.id);
    assert_eq!(replies.replies[0].content, "Replying");
    assert!(!replies.has_more);
}

#[tokio::test]
async fn test_create_comment_validation() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = server.new_user().unwrap();
    let idea = create_idea(&server, &token).await;

    let response = server
        .post_auth(
            "/api/v1/comments",
            &token,
            &CreateCommentRequest::top_level(&idea.id, "   "),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "EMPTY_CONTENT");

    let too_long = "a".repeat(2001);
    let response = server
        .post_auth(
            "/api/v1/comments",
            &token,
            &CreateCommentRequest::top_level(&idea.id, &too_long),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "CONTENT_TOO_LONG");

    let response = server
        .post_auth(
            "/api/v1/comments",
            &token,
            &CreateCommentRequest::top_level("123", "hello"),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_IDEA");

    let response = server
        .post_auth(
            "/api/v1/comments",
            &token,
            &serde_json::json!({ "content": "no idea id" }),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/comments",
            &token,
            &serde_json::json!({ "content": "hello", "ideaId": -5 }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_BODY");
}

#[tokio::test]
async fn test_reply_to_other_idea_rejected() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = server.new_user().unwrap();
    let first = create_idea(&server, &token).await;
    let second = create_idea(&server, &token).await;
    let parent = create_comment(
        &server,
        &token,
        &CreateCommentRequest::top_level(&first.id, "parent"),
    )
    .await;

    let response = server
        .post_auth(
            "/api/v1/comments",
            &token,
            &CreateCommentRequest::reply(&second.id, &parent.id, "wrong idea"),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "PARENT_IDEA_MISMATCH");
}

#[tokio::test]
async fn test_edit_and_delete_rules() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = server.new_user().unwrap();
    let (_, bob) = server.new_user().unwrap();
    let idea = create_idea(&server, &alice).await;
    let comment = create_comment(
        &server,
        &alice,
        &CreateCommentRequest::top_level(&idea.id, "original"),
    )
    .await;
    let path = format!("/api/v1/comments/{}", comment.id);
    let edit = |content: &str| EditCommentRequest {
        content: content.to_string(),
    };

    let response = server.patch_auth(&path, &bob, &edit("hijack")).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_COMMENT_AUTHOR");

    let response = server.delete_auth(&path, &bob).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.patch_auth(&path, &alice, &edit("revised")).await.unwrap();
    let edited: EditCommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(edited.success);
    assert_eq!(edited.comment.content, "revised");
    assert_eq!(edited.comment.created_at, comment.created_at);
    assert!(edited.comment.updated_at.is_some());

    let response = server.delete_auth(&path, &alice).await.unwrap();
    let deleted: DeleteCommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(deleted.success);

    let response = server.delete_auth(&path, &alice).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "COMMENT_ALREADY_DELETED");

    let response = server.patch_auth(&path, &alice, &edit("again")).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "COMMENT_DELETED");

    let response = server
        .delete_auth("/api/v1/comments/999999", &alice)
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_deleted_comment_visibility() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = server.new_user().unwrap();
    let (_, bob) = server.new_user().unwrap();
    let idea = create_idea(&server, &alice).await;

    let leaf = create_comment(
        &server,
        &alice,
        &CreateCommentRequest::top_level(&idea.id, "leaf"),
    )
    .await;
    let parent = create_comment(
        &server,
        &alice,
        &CreateCommentRequest::top_level(&idea.id, "parent"),
    )
    .await;
    create_comment(
        &server,
        &bob,
        &CreateCommentRequest::reply(&idea.id, &parent.id, "child"),
    )
    .await;

    for id in [&leaf.id, &parent.id] {
        let response = server
            .delete_auth(&format!("/api/v1/comments/{id}"), &alice)
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server
        .get(&format!("/api/v1/ideas/{}/comments", idea.id))
        .await
        .unwrap();
    let page: CommentListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.comments.len(), 1);
    assert_eq!(page.comments[0].id, parent.id);
    assert!(page.comments[0].is_deleted);
    assert_eq!(page.comments[0].content, "[deleted]");
}

#[tokio::test]
async fn test_comment_pagination_walks_every_item() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = server.new_user().unwrap();
    let idea = create_idea(&server, &token).await;

    let mut created = Vec::new();
    for n in 0..5 {
        let comment = create_comment(
            &server,
            &token,
            &CreateCommentRequest::top_level(&idea.id, &format!("comment {n}")),
        )
        .await;
        created.push(comment.id);
    }

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let mut path = format!("/api/v1/ideas/{}/comments?limit=2", idea.id);
        if let Some(c) = &cursor {
            path.push_str(&format!("&cursor={c}"));
        }
        let response = server.get(&path).await.unwrap();
        let page: CommentListResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(page.comments.len() <= 2);
        seen.extend(page.comments.into_iter().map(|c| c.id));
        if !page.has_more {
            break;
        }
        cursor = page.next_cursor;
    }

    created.reverse();
    assert_eq!(seen, created);

    let response = server
        .get(&format!("/api/v1/ideas/{}/comments?cursor=not-a-cursor", idea.id))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Vote Tests
// ============================================================================

#[tokio::test]
async fn test_vote_transitions() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = server.new_user().unwrap();
    let (_, bob) = server.new_user().unwrap();
    let idea = create_idea(&server, &alice).await;
    let comment = create_comment(
        &server,
        &alice,
        &CreateCommentRequest::top_level(&idea.id, "vote on me"),
    )
    .await;

    let steps = [
        (VoteRequest::up(), 1, Some("UP")),
        (VoteRequest::up(), 1, Some("UP")),
        (VoteRequest::down(), -1, Some("DOWN")),
        (VoteRequest::clear(), 0, None),
    ];
    for (vote, expected_count, expected_vote) in steps {
        let result = vote_comment(&server, &bob, &comment.id, &vote).await;
        assert_eq!(result.votes_count, expected_count);
        assert_eq!(result.user_vote.as_deref(), expected_vote);
    }

    // An absent voteType clears as well
    vote_comment(&server, &bob, &comment.id, &VoteRequest::up()).await;
    let response = server
        .post_auth(
            &format!("/api/v1/comments/{}/vote", comment.id),
            &bob,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    let result: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.votes_count, 0);
    assert!(result.user_vote.is_none());

    let response = server
        .post_auth(
            &format!("/api/v1/comments/{}/vote", comment.id),
            &bob,
            &serde_json::json!({ "voteType": "SIDEWAYS" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_VOTE_TYPE");
}

#[tokio::test]
async fn test_concurrent_comment_votes() {
    let server = TestServer::start().await.unwrap();
    let (_, author) = server.new_user().unwrap();
    let idea = create_idea(&server, &author).await;
    let comment = create_comment(
        &server,
        &author,
        &CreateCommentRequest::top_level(&idea.id, "popular"),
    )
    .await;

    let mut tasks = Vec::new();
    for n in 0..12 {
        let (_, token) = server.new_user().unwrap();
        let vote = if n % 3 == 0 { VoteRequest::down() } else { VoteRequest::up() };
        let url = format!("{}/api/v1/comments/{}/vote", server.base_url(), comment.id);
        let client = server.client.clone();
        tasks.push(tokio::spawn(async move {
            client.post(url).bearer_auth(token).json(&vote).send().await
        }));
    }
    for task in tasks {
        let response = task.await.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = server
        .get(&format!("/api/v1/ideas/{}/comments", idea.id))
        .await
        .unwrap();
    let page: CommentListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.comments[0].votes_count, 8 - 4);
}

#[tokio::test]
async fn test_vote_unknown_comment() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = server.new_user().unwrap();

    let response = server
        .post_auth("/api/v1/comments/424242/vote", &token, &VoteRequest::up())
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_COMMENT");
}

// ============================================================================
// Idea Tests
// ============================================================================

#[tokio::test]
async fn test_idea_feed_and_votes() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = server.new_user().unwrap();
    let (_, bob) = server.new_user().unwrap();

    let older = create_idea(&server, &alice).await;
    let newer = create_idea(&server, &alice).await;

    let response = server
        .post_auth(
            &format!("/api/v1/ideas/{}/vote", older.id),
            &bob,
            &VoteRequest::up(),
        )
        .await
        .unwrap();
    let vote: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(vote.votes_count, 1);

    let response = server.get("/api/v1/ideas?sort=new").await.unwrap();
    let feed: IdeaListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<_> = feed.ideas.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec![newer.id.as_str(), older.id.as_str()]);

    let response = server.get_auth("/api/v1/ideas?sort=top", &bob).await.unwrap();
    let feed: IdeaListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(feed.ideas[0].id, older.id);
    assert_eq!(feed.ideas[0].user_vote.as_deref(), Some("UP"));

    let response = server
        .get_auth(&format!("/api/v1/ideas/{}", older.id), &bob)
        .await
        .unwrap();
    let envelope: IdeaEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.idea.votes_count, 1);
    assert_eq!(envelope.idea.user_vote.as_deref(), Some("UP"));

    let response = server.get("/api/v1/ideas?sort=hot").await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get("/api/v1/ideas/not-an-id").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");

    let response = server.get("/api/v1/ideas/31337").await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
}
