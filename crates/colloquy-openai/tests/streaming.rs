//! End-to-end streaming tests against a scripted local HTTP fixture.
//!
//! The fixture writes the response body in hand-picked fragments with a
//! pause between each, so frames reach the client across several reads.
//! Exact split-position coverage lives in the decoder's unit tests; these
//! tests exercise the full request/decode/callback path over a real socket.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use colloquy_core::ColloquyClient;
use colloquy_core::error::ColloquyError;
use colloquy_core::generic::{GenericMessage, GenericRole};
use colloquy_core::model::{Model, ModelTier};
use colloquy_core::provider::{ChatCompleteParameters, ChatCompletionProvider as _};
use colloquy_openai::error::OpenAiError;
use colloquy_openai::{OpenAiAdapter, OpenAiAdapterBuilder};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const HEAD_200_STREAM: &str =
    "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nConnection: close\r\n\r\n";
const HEAD_401_JSON: &str =
    "HTTP/1.1 401 Unauthorized\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n";

/// Serve exactly one connection: read the full request, write `head`, then
/// write each body fragment separately with a short pause in between.
async fn spawn_scripted_server(
    head: &'static str,
    body_fragments: Vec<&'static [u8]>,
    connections: Arc<AtomicUsize>,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.expect("accept");
        connections.fetch_add(1, Ordering::SeqCst);

        read_full_request(&mut sock).await;

        sock.write_all(head.as_bytes()).await.expect("write head");
        sock.flush().await.ok();
        for fragment in body_fragments {
            tokio::time::sleep(Duration::from_millis(20)).await;
            sock.write_all(fragment).await.expect("write body fragment");
            sock.flush().await.ok();
        }
        // dropping the socket closes the connection and ends the body
    });

    addr
}

/// Read until the request headers plus `Content-Length` body bytes arrived.
async fn read_full_request(sock: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];
    loop {
        let n = sock.read(&mut tmp).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&tmp[..n]);

        let Some(headers_end) = buf
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
        else {
            continue;
        };

        let headers = String::from_utf8_lossy(&buf[..headers_end]);
        let content_length = headers
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        if buf.len() >= headers_end + 4 + content_length {
            return;
        }
    }
}

fn adapter_for(addr: SocketAddr, api_key: &str) -> OpenAiAdapter {
    OpenAiAdapterBuilder::new()
        .with_api_key(api_key)
        .with_base_url(format!("http://{addr}"))
        .build()
        .expect("adapter builds")
}

fn params() -> ChatCompleteParameters<GenericMessage> {
    ChatCompleteParameters::new(
        vec![GenericMessage::new("hi".into(), GenericRole::User)],
        Model::Tier(ModelTier::Base),
    )
}

fn as_openai_error(err: &ColloquyError) -> &OpenAiError {
    match err {
        ColloquyError::Backend(inner) => inner
            .downcast_ref::<OpenAiError>()
            .expect("backend error is an OpenAiError"),
        other => panic!("unexpected error variant: {other}"),
    }
}

#[tokio::test]
async fn deltas_split_inside_the_prefix_arrive_in_order_then_complete() {
    // The split lands inside the second frame's `data: ` prefix; the bare
    // `llo` line is noise and must contribute nothing.
    let fragments: Vec<&'static [u8]> = vec![
        b"data: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\nllo\nda",
        b"ta: {\"choices\":[{\"delta\":{\"content\":\"llo\"}}]}\ndata: [DONE]\n",
    ];
    let addr =
        spawn_scripted_server(HEAD_200_STREAM, fragments, Arc::new(AtomicUsize::new(0))).await;
    let client = ColloquyClient::new(adapter_for(addr, "sk-test"));

    let mut chunks: Vec<String> = Vec::new();
    let mut completions = 0u32;
    client
        .chat_stream_with(
            params(),
            |chunk| chunks.push(chunk.to_owned()),
            || completions += 1,
        )
        .await
        .expect("stream succeeds");

    assert_eq!(chunks, vec!["He".to_owned(), "llo".to_owned()]);
    assert_eq!(completions, 1);
}

#[tokio::test]
async fn end_of_data_without_sentinel_still_completes_once() {
    let fragments: Vec<&'static [u8]> =
        vec![b"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n"];
    let addr =
        spawn_scripted_server(HEAD_200_STREAM, fragments, Arc::new(AtomicUsize::new(0))).await;
    let client = ColloquyClient::new(adapter_for(addr, "sk-test"));

    let mut chunks: Vec<String> = Vec::new();
    let mut completions = 0u32;
    client
        .chat_stream_with(
            params(),
            |chunk| chunks.push(chunk.to_owned()),
            || completions += 1,
        )
        .await
        .expect("closed stream completes");

    assert_eq!(chunks, vec!["Hi".to_owned()]);
    assert_eq!(completions, 1);
}

#[tokio::test]
async fn upstream_failure_surfaces_status_and_extracted_message() {
    let fragments: Vec<&'static [u8]> = vec![br#"{"error":{"message":"bad key"}}"#];
    let addr =
        spawn_scripted_server(HEAD_401_JSON, fragments, Arc::new(AtomicUsize::new(0))).await;
    let client = ColloquyClient::new(adapter_for(addr, "sk-test"));

    let mut chunks = 0u32;
    let mut completions = 0u32;
    let err = client
        .chat_stream_with(params(), |_| chunks += 1, || completions += 1)
        .await
        .expect_err("401 must fail the operation");

    match as_openai_error(&err) {
        OpenAiError::Api { status, message } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(message, "bad key");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(chunks, 0);
    assert_eq!(completions, 0);
}

#[tokio::test]
async fn malformed_credential_never_reaches_the_network() {
    let connections = Arc::new(AtomicUsize::new(0));
    let addr = spawn_scripted_server(HEAD_200_STREAM, vec![], Arc::clone(&connections)).await;
    let client = ColloquyClient::new(adapter_for(addr, "not-a-key"));

    let mut completions = 0u32;
    let err = client
        .chat_stream_with(params(), |_| {}, || completions += 1)
        .await
        .expect_err("credential pre-check must fail");

    assert!(matches!(
        as_openai_error(&err),
        OpenAiError::InvalidCredentialFormat
    ));
    assert_eq!(completions, 0);

    // give a stray connection attempt time to land before asserting
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(connections.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_failure_mid_stream_keeps_chunks_but_not_completion() {
    // Announce more body bytes than are ever sent; closing early makes the
    // read fail after the first delta was already delivered.
    let head: &'static str = "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nContent-Length: 100000\r\n\r\n";
    let fragments: Vec<&'static [u8]> =
        vec![b"data: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\n"];
    let addr = spawn_scripted_server(head, fragments, Arc::new(AtomicUsize::new(0))).await;
    let client = ColloquyClient::new(adapter_for(addr, "sk-test"));

    let mut chunks: Vec<String> = Vec::new();
    let mut completions = 0u32;
    let err = client
        .chat_stream_with(
            params(),
            |chunk| chunks.push(chunk.to_owned()),
            || completions += 1,
        )
        .await
        .expect_err("truncated body must fail the stream");

    assert!(matches!(
        as_openai_error(&err),
        OpenAiError::Transport(_)
    ));
    assert_eq!(chunks, vec!["He".to_owned()]);
    assert_eq!(completions, 0);
}

#[tokio::test]
async fn non_streaming_round_trip_parses_message_and_usage() {
    let body: &'static [u8] = br#"{"id":"cmpl-1","object":"chat.completion","created":1,"model":"gpt-4o","choices":[{"index":0,"message":{"role":"assistant","content":"Hello there"},"finish_reason":"stop","finish_details":null}],"usage":{"prompt_tokens":5,"completion_tokens":3,"total_tokens":8}}"#;
    let head: &'static str =
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n";
    let addr = spawn_scripted_server(head, vec![body], Arc::new(AtomicUsize::new(0))).await;
    let client = ColloquyClient::new(adapter_for(addr, "sk-test"));

    let response = client
        .chat_complete(params())
        .await
        .expect("completion succeeds");

    assert_eq!(response.message.content, "Hello there");
    assert_eq!(response.message.role, GenericRole::Assistant);
    assert_eq!(response.usage.expect("usage reported").total_tokens, 8);
}
