// ABOUTME: Tests for image build and push through the client.
// ABOUTME: Tag validation, output relay, and failure wrapping.

mod support;

use dockrun::DockerClient;
use dockrun::error::{ErrorKind, Operation};
use dockrun::runtime::ConnectionConfig;
use support::spy_daemon::{Call, SpyDaemon};
use std::io;
use std::path::Path;

fn client(daemon: SpyDaemon) -> DockerClient<SpyDaemon> {
    DockerClient::with_runtime(ConnectionConfig::local(), daemon)
}

#[tokio::test]
async fn build_relays_output_to_writer() {
    support::init_tracing();
    let client = client(SpyDaemon::new().output(&["Step 1/2 : FROM alpine", "Successfully built 1a2b"]));
    let mut out = Vec::new();

    client
        .build_image(Path::new("ctx"), "app:1", &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "Step 1/2 : FROM alpine\nSuccessfully built 1a2b\n");

    let calls = client.runtime().calls();
    let Call::Build { context, tag } = &calls[0] else {
        panic!("expected build, got {:?}", calls[0]);
    };
    assert_eq!(context, Path::new("ctx"));
    assert_eq!(tag, "app:1");
}

#[tokio::test]
async fn build_failure_names_build() {
    let client = client(SpyDaemon::new().fail_build("unknown instruction: RUNN"));

    let err = client
        .build_image(Path::new("."), "app:1", &mut io::sink())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DaemonOperationFailed);
    assert_eq!(err.operation(), Some(Operation::Build));
    assert!(err.to_string().contains("unknown instruction: RUNN"));
}

#[tokio::test]
async fn push_relays_status_lines() {
    let client = client(SpyDaemon::new().output(&["Pushing", "Pushed"]));
    let mut out = Vec::new();

    client
        .push_image("registry.example.com/app:2", &mut out)
        .await
        .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "Pushing\nPushed\n");
    assert_eq!(client.runtime().call_names(), vec!["push"]);
}

#[tokio::test]
async fn push_failure_names_push() {
    let client = client(SpyDaemon::new().fail_push("unauthorized"));

    let err = client
        .push_image("app:1", &mut io::sink())
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::Push));
    assert_eq!(err.to_string(), "failed to push image: push failed: unauthorized");
}

#[tokio::test]
async fn empty_tag_never_reaches_daemon() {
    let client = client(SpyDaemon::new());

    let build = client
        .build_image(Path::new("."), "", &mut io::sink())
        .await
        .unwrap_err();
    let push = client.push_image("  ", &mut io::sink()).await.unwrap_err();

    assert_eq!(build.kind(), ErrorKind::InvalidArgument);
    assert_eq!(push.kind(), ErrorKind::InvalidArgument);
    assert!(client.runtime().calls().is_empty());
}

#[tokio::test]
async fn push_by_digest_is_refused() {
    let client = client(SpyDaemon::new());

    for reference in ["app@sha256:4f2a9c", "app:1@sha256:4f2a9c"] {
        let err = client
            .push_image(reference, &mut io::sink())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("sha256:4f2a9c"));
    }
    assert!(client.runtime().calls().is_empty());
}
