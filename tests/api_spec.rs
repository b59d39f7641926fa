use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use nlm_web::api::{create_router, create_router_with_config, SecurityConfig};
use nlm_web::models::*;
use nlm_web::nlm::*;
use serde_json::{json, Value};

/// Test server backed by an nlm client replaying `runner`.
fn setup(runner: &ScriptedRunner) -> TestServer {
    let client = NlmClient::new("token", "cookies")
        .expect("Failed to create client")
        .with_runner(runner.clone());
    TestServer::new(create_router(Arc::new(client))).expect("Failed to create test server")
}

fn setup_demo() -> TestServer {
    TestServer::new(create_router(Arc::new(DemoClient::new())))
        .expect("Failed to create test server")
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_live_mode() {
        let server = setup(&ScriptedRunner::new());

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["mode"], "live");
    }

    #[tokio::test]
    async fn reports_demo_mode() {
        let body: Value = setup_demo().get("/health").await.json();
        assert_eq!(body["mode"], "demo");
    }
}

mod notebooks {
    use super::*;

    #[tokio::test]
    async fn lists_notebooks() {
        let runner = ScriptedRunner::new().respond(r#"[{"project_id":"nb1","title":"Notebook 1"}]"#);
        let server = setup(&runner);

        let response = server.get("/api/notebooks").await;

        response.assert_status_ok();
        let notebooks: Vec<Value> = response.json();
        assert_eq!(notebooks.len(), 1);
        assert_eq!(notebooks[0]["project_id"], "nb1");
    }

    #[tokio::test]
    async fn list_failure_is_server_error_with_message() {
        let runner = ScriptedRunner::new().fail(1, "Authentication failed");
        let server = setup(&runner);

        let response = server.get("/api/notebooks").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), "Authentication failed");
    }

    #[tokio::test]
    async fn timeout_is_server_error() {
        let runner = ScriptedRunner::new().error(NlmError::CommandTimeout { secs: 60 });
        let server = setup(&runner);

        let response = server.get("/api/notebooks").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.text().contains("timed out"));
    }

    #[tokio::test]
    async fn creates_notebook() {
        let runner = ScriptedRunner::new().respond(
            "Created notebook: notebook/nb123\n{\"project_id\":\"nb123\",\"title\":\"New Notebook\"}",
        );
        let server = setup(&runner);

        let response = server
            .post("/api/notebooks")
            .json(&json!({"title": "New Notebook", "emoji": "📚"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let notebook: Value = response.json();
        assert_eq!(notebook["project_id"], "nb123");
    }

    #[tokio::test]
    async fn rejects_empty_title() {
        let runner = ScriptedRunner::new();
        let server = setup(&runner);

        let response = server
            .post("/api/notebooks")
            .json(&CreateNotebookInput::new(""))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn gets_notebook() {
        let runner = ScriptedRunner::new().respond(r#"[{"project_id":"nb1","title":"One"}]"#);
        let server = setup(&runner);

        let response = server.get("/api/notebooks/nb1").await;

        response.assert_status_ok();
        let notebook: Value = response.json();
        assert_eq!(notebook["title"], "One");
    }

    #[tokio::test]
    async fn get_unknown_notebook_is_404() {
        let runner = ScriptedRunner::new().respond(r#"[{"project_id":"nb2"}]"#);
        let server = setup(&runner);

        let response = server.get("/api/notebooks/nb1").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "Notebook nb1 not found");
    }

    #[tokio::test]
    async fn deletes_notebook() {
        let runner = ScriptedRunner::new().respond("Deleted notebook");
        let server = setup(&runner);

        server
            .delete("/api/notebooks/nb1")
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn delete_unknown_notebook_is_404() {
        let runner = ScriptedRunner::new().fail(1, "Notebook not found");
        let server = setup(&runner);

        server
            .delete("/api/notebooks/invalid")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod sources {
    use super::*;

    #[tokio::test]
    async fn lists_sources() {
        let runner = ScriptedRunner::new().respond(r#"[{"source_id":"s1"},{"source_id":"s2"}]"#);
        let server = setup(&runner);

        let response = server.get("/api/notebooks/nb1/sources").await;

        response.assert_status_ok();
        let sources: Vec<Value> = response.json();
        assert_eq!(sources.len(), 2);
    }

    #[tokio::test]
    async fn adds_text_source() {
        let runner = ScriptedRunner::new().respond(r#"{"source_id":"s3"}"#);
        let server = setup(&runner);

        let response = server
            .post("/api/notebooks/nb1/sources")
            .json(&json!({"source_input": "Pasted text", "source_type": "text"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(runner.calls()[0].stdin.as_deref(), Some("Pasted text"));
    }

    #[tokio::test]
    async fn delete_unknown_source_is_404() {
        let runner = ScriptedRunner::new().fail(1, "source s9 not found");
        let server = setup(&runner);

        server
            .delete("/api/notebooks/nb1/sources/s9")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn renames_source() {
        let runner = ScriptedRunner::new();
        let server = setup(&runner);

        server
            .put("/api/sources/s1")
            .json(&RenameSourceInput {
                name: "Renamed".to_string(),
            })
            .await
            .assert_status(StatusCode::NO_CONTENT);

        assert_eq!(runner.calls()[0].args, vec!["rename-source", "s1", "Renamed"]);
    }
}

mod generate {
    use super::*;

    #[tokio::test]
    async fn returns_generated_text() {
        let runner = ScriptedRunner::new().respond("Q: What?\nA: This.\n");
        let server = setup(&runner);

        let response = server.post("/api/notebooks/nb1/generate/faq").await;

        response.assert_status_ok();
        let content: GeneratedContent = response.json();
        assert_eq!(content.kind, GenerateKind::Faq);
        assert_eq!(content.notebook_id, "nb1");
        assert_eq!(content.content, "Q: What?\nA: This.\n");
        assert_eq!(runner.calls()[0].args, vec!["faq", "nb1"]);
    }

    #[tokio::test]
    async fn unknown_kind_is_bad_request() {
        let runner = ScriptedRunner::new();
        let server = setup(&runner);

        server
            .post("/api/notebooks/nb1/generate/poem")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert!(runner.calls().is_empty());
    }
}

mod audio {
    use super::*;

    #[tokio::test]
    async fn creates_audio_with_default_instructions() {
        let runner = ScriptedRunner::new().respond(r#"{"audio_id":"a1","status":"pending"}"#);
        let server = setup(&runner);

        let response = server
            .post("/api/notebooks/nb1/audio")
            .json(&json!({}))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(
            runner.calls()[0].args,
            vec!["audio-create", "nb1", DEFAULT_AUDIO_INSTRUCTIONS]
        );
    }

    #[tokio::test]
    async fn gets_lists_and_deletes_audio() {
        let runner = ScriptedRunner::new()
            .respond(r#"{"audio_id":"a1","status":"ready"}"#)
            .respond(r#"[{"audio_id":"a1"}]"#)
            .respond("");
        let server = setup(&runner);

        let audio: Value = server.get("/api/notebooks/nb1/audio").await.json();
        let listed: Vec<Value> = server.get("/api/notebooks/nb1/audio/list").await.json();
        server
            .delete("/api/notebooks/nb1/audio")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        assert_eq!(audio["status"], "ready");
        assert_eq!(listed.len(), 1);
    }
}

mod notes {
    use super::*;

    #[tokio::test]
    async fn note_lifecycle() {
        let runner = ScriptedRunner::new()
            .respond(r#"{"note_id":"n1","title":"Ideas"}"#)
            .respond("")
            .respond(r#"[{"note_id":"n1","title":"Ideas v2"}]"#)
            .respond("");
        let server = setup(&runner);

        server
            .post("/api/notebooks/nb1/notes")
            .json(&CreateNoteInput {
                title: "Ideas".to_string(),
            })
            .await
            .assert_status(StatusCode::CREATED);
        server
            .put("/api/notebooks/nb1/notes/n1")
            .json(&UpdateNoteInput {
                content: "Body".to_string(),
                title: "Ideas v2".to_string(),
            })
            .await
            .assert_status(StatusCode::NO_CONTENT);
        let notes: Vec<Value> = server.get("/api/notebooks/nb1/notes").await.json();
        server
            .delete("/api/notes/n1")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        assert_eq!(notes[0]["title"], "Ideas v2");
        assert_eq!(runner.calls().len(), 4);
    }
}

mod demo_mode {
    use super::*;

    #[tokio::test]
    async fn serves_sample_notebooks() {
        let notebooks: Vec<Value> = setup_demo().get("/api/notebooks").await.json();
        assert_eq!(notebooks.len(), 2);
        assert_eq!(notebooks[1]["project_id"], "demo-nb-2");
    }

    #[tokio::test]
    async fn unknown_notebook_is_404() {
        setup_demo()
            .get("/api/notebooks/nope")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod security_auth {
    use super::*;

    fn setup_with_auth(api_key: &str) -> TestServer {
        let app = create_router_with_config(
            Arc::new(DemoClient::new()),
            SecurityConfig::with_api_key(api_key),
        );
        TestServer::new(app).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn health_endpoint_is_accessible_without_auth() {
        let server = setup_with_auth("test-secret-key");

        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn api_requires_auth() {
        let server = setup_with_auth("test-secret-key");

        let response = server.get("/api/notebooks").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn api_accepts_valid_bearer_token() {
        let server = setup_with_auth("test-secret-key");

        let response = server
            .get("/api/notebooks")
            .add_header("Authorization", "Bearer test-secret-key")
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn api_rejects_invalid_bearer_token() {
        let server = setup_with_auth("test-secret-key");

        let response = server
            .get("/api/notebooks")
            .add_header("Authorization", "Bearer wrong-key")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn api_rejects_malformed_auth_header() {
        let server = setup_with_auth("test-secret-key");

        let response = server
            .get("/api/notebooks")
            .add_header("Authorization", "Basic dXNlcjpwYXNz")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    fn setup_live_with_auth(runner: &ScriptedRunner, api_key: &str) -> TestServer {
        let client = NlmClient::new("token", "cookies")
            .expect("Failed to create client")
            .with_runner(runner.clone());
        let app = create_router_with_config(Arc::new(client), SecurityConfig::with_api_key(api_key));
        TestServer::new(app).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn pages_require_auth() {
        let server = setup_with_auth("test-secret-key");

        server.get("/").await.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn delete_form_requires_auth() {
        let runner = ScriptedRunner::new();
        let server = setup_live_with_auth(&runner, "test-secret-key");

        server
            .post("/notebooks/nb1/delete")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn create_form_requires_auth() {
        let runner = ScriptedRunner::new();
        let server = setup_live_with_auth(&runner, "test-secret-key");

        server
            .post("/notebooks")
            .form(&[("title", "Sneaky"), ("emoji", "")])
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_form_accepts_valid_bearer_token() {
        let runner = ScriptedRunner::new().respond("");
        let server = setup_live_with_auth(&runner, "test-secret-key");

        server
            .post("/notebooks/nb1/delete")
            .add_header("Authorization", "Bearer test-secret-key")
            .await
            .assert_status(StatusCode::SEE_OTHER);

        assert_eq!(runner.call_args(), vec![vec!["rm".to_string(), "nb1".to_string()]]);
    }
}
