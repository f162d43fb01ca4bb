//! Integration tests for [`msglog_telegram::Ingestor`].
//!
//! Drives the full pipeline (normalize → chat filter → human log → structured stream) with
//! synthetic InboundEvents; both streams live in a temp dir.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use handler_chain::HandlerChain;
use middleware::{HumanLogMiddleware, PersistenceMiddleware};
use msglog_core::{
    ChatKind, HandlerResponse, InboundEvent, IngestConfig, MessageContent, MessageRecord,
    MessageType, MsglogError, Sender,
};
use msglog_telegram::Ingestor;
use storage::{aggregate, HumanLog, JsonlRecordStore, RecordSink, StorageError};
use tempfile::TempDir;

fn test_config(dir: &TempDir) -> IngestConfig {
    IngestConfig {
        structured_stream_path: dir.path().join("messages_data.jsonl"),
        human_log_path: dir.path().join("telegram_messages.log"),
        ..IngestConfig::default()
    }
}

fn event(chat_id: i64, message_id: i32, content: MessageContent) -> InboundEvent {
    InboundEvent {
        chat_id: Some(chat_id),
        chat_title: format!("chat {}", chat_id),
        chat_type: ChatKind::Group,
        sender: Some(Sender {
            id: 77,
            username: Some("alice".to_string()),
            first_name: "Alice".to_string(),
            last_name: None,
        }),
        message_id: Some(message_id),
        timestamp: Some(Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap()),
        content,
        is_forwarded: false,
        reply_to_message_id: None,
    }
}

fn text(chat_id: i64, message_id: i32, body: &str) -> InboundEvent {
    event(chat_id, message_id, MessageContent::Text(body.to_string()))
}

fn human_lines(config: &IngestConfig) -> Vec<String> {
    std::fs::read_to_string(&config.human_log_path)
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

fn records(config: &IngestConfig) -> Vec<MessageRecord> {
    JsonlRecordStore::new(config.structured_stream_path.clone())
        .load_all()
        .unwrap()
}

/// **Test: A text event lands in both streams with extracted metadata.**
#[tokio::test]
async fn test_text_event_written_to_both_streams() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let ingestor = Ingestor::from_config(&config, None);

    let response = ingestor
        .handle_event(&text(1, 1, "Hello @alice and @bob, check #news at https://example.com"))
        .await
        .unwrap();
    assert_eq!(response, HandlerResponse::Continue);

    let saved = records(&config);
    assert_eq!(saved.len(), 1);
    let meta = saved[0].metadata.as_ref().unwrap();
    assert_eq!(meta.mentions, vec!["@alice", "@bob"]);
    assert_eq!(meta.hashtags, vec!["#news"]);
    assert_eq!(meta.urls, vec!["https://example.com"]);
    assert_eq!(meta.word_count, 8);

    let lines = human_lines(&config);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("[INFO]"));
    assert!(lines[0].contains("Type: text"));
}

/// **Test: A photo event is stored without text or metadata; the human log shows the placeholder.**
#[tokio::test]
async fn test_photo_event_asymmetry() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let ingestor = Ingestor::from_config(&config, None);

    ingestor
        .handle_event(&event(1, 1, MessageContent::Photo { caption: None }))
        .await
        .unwrap();

    let saved = records(&config);
    assert_eq!(saved[0].message_type, MessageType::Photo);
    assert!(saved[0].text.is_none());
    assert!(saved[0].metadata.is_none());
    assert!(human_lines(&config)[0].contains("Message: [Photo]"));
}

/// **Test: An event missing chat_id fails with MalformedEvent, appends no record, and the next event still lands.**
#[tokio::test]
async fn test_malformed_event_dropped_and_loop_continues() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let ingestor = Ingestor::from_config(&config, None);

    let mut bad = text(1, 1, "lost");
    bad.chat_id = None;
    let result = ingestor.handle_event(&bad).await;
    assert!(matches!(result, Err(MsglogError::MalformedEvent(_))));
    assert!(records(&config).is_empty());

    ingestor.handle_event(&text(1, 2, "kept")).await.unwrap();

    let saved = records(&config);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].message_id, 2);

    let lines = human_lines(&config);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[ERROR]"));
    assert!(lines[0].contains("missing chat_id"));
    assert!(!lines[0].contains("lost"));
    assert!(lines[1].contains("[INFO]"));
}

/// **Test: Events from chats outside monitored_chat_ids write nothing and raise no error.**
#[tokio::test]
async fn test_unmonitored_chat_silently_dropped() {
    let dir = TempDir::new().unwrap();
    let config = IngestConfig {
        monitored_chat_ids: Some(HashSet::from([10])),
        ..test_config(&dir)
    };
    let ingestor = Ingestor::from_config(&config, None);

    let response = ingestor.handle_event(&text(99, 1, "ignored")).await.unwrap();
    assert_eq!(response, HandlerResponse::Stop);
    assert!(!config.structured_stream_path.exists());
    assert!(!config.human_log_path.exists());

    ingestor.handle_event(&text(10, 2, "watched")).await.unwrap();
    assert_eq!(records(&config).len(), 1);
    assert_eq!(human_lines(&config).len(), 1);
}

/// **Test: With structured persistence disabled, only the human log is written.**
#[tokio::test]
async fn test_structured_stream_disabled() {
    let dir = TempDir::new().unwrap();
    let config = IngestConfig {
        save_to_structured_stream: false,
        ..test_config(&dir)
    };
    let ingestor = Ingestor::from_config(&config, None);

    ingestor.handle_event(&text(1, 1, "hi")).await.unwrap();

    assert!(!config.structured_stream_path.exists());
    assert_eq!(human_lines(&config).len(), 1);
}

/// **Test: Highlight keywords produce a WARN line with annotation.**
#[tokio::test]
async fn test_highlight_keyword_warns() {
    let dir = TempDir::new().unwrap();
    let config = IngestConfig {
        highlight_keywords: vec!["important".to_string()],
        ..test_config(&dir)
    };
    let ingestor = Ingestor::from_config(&config, None);

    ingestor
        .handle_event(&text(1, 1, "An Important update"))
        .await
        .unwrap();

    let lines = human_lines(&config);
    assert!(lines[0].contains("[WARN]"));
    assert!(lines[0].ends_with("HIGHLIGHT: important"));
    assert_eq!(records(&config).len(), 1);
}

/// **Test: Output order equals input order for N sequential events of mixed types.**
#[tokio::test]
async fn test_output_order_matches_input_order() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let ingestor = Ingestor::from_config(&config, None);

    let n = 40;
    for i in 0..n {
        let content = match i % 4 {
            0 => MessageContent::Text(format!("msg {} #t{}", i, i % 3)),
            1 => MessageContent::Voice,
            2 => MessageContent::Sticker {
                emoji: Some("🙂".to_string()),
            },
            _ => MessageContent::Document {
                file_name: Some(format!("f{}.txt", i)),
            },
        };
        ingestor
            .handle_event(&event(i64::from(i % 5), i, content))
            .await
            .unwrap();
    }

    let saved = records(&config);
    let ids: Vec<i32> = saved.iter().map(|r| r.message_id).collect();
    assert_eq!(ids, (0..n).collect::<Vec<_>>());

    let report = aggregate(&saved);
    assert_eq!(report.total, n as usize);
    assert_eq!(report.count_of(MessageType::Text), 10);
    assert_eq!(report.count_of(MessageType::Voice), 10);
    assert_eq!(report.unique_chats(), 5);
    assert_eq!(report.unique_users(), 1);
    assert_eq!(report, aggregate(&records(&config)));
}

/// Fails on the first append, then delegates to a real store.
struct FlakySink {
    calls: AtomicUsize,
    path: PathBuf,
    inner: JsonlRecordStore,
}

impl RecordSink for FlakySink {
    fn append(&self, record: &MessageRecord) -> Result<(), StorageError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(StorageError::Write {
                path: self.path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
            });
        }
        self.inner.append(record)
    }
}

/// **Test: A structured write failure surfaces as StorageFailure, is logged at ERROR, and the next event is persisted.**
#[tokio::test]
async fn test_storage_failure_does_not_stop_processing() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let human_log = HumanLog::new(config.human_log_path.clone());
    let sink = Arc::new(FlakySink {
        calls: AtomicUsize::new(0),
        path: config.structured_stream_path.clone(),
        inner: JsonlRecordStore::new(config.structured_stream_path.clone()),
    });
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(HumanLogMiddleware::new(human_log.clone(), vec![])))
        .add_middleware(Arc::new(PersistenceMiddleware::new(sink)));
    let ingestor = Ingestor::new(chain, human_log);

    let first = ingestor.handle_event(&text(1, 1, "first")).await;
    assert!(matches!(first, Err(MsglogError::StorageFailure(_))));

    ingestor.handle_event(&text(1, 2, "second")).await.unwrap();

    let saved = records(&config);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].message_id, 2);

    let lines = human_lines(&config);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("[INFO]"));
    assert!(lines[1].contains("[ERROR]"));
    assert!(lines[1].contains("permission denied"));
    assert!(lines[2].contains("Message: second"));
}

/// **Test: An unwritable human log does not cost the structured record.**
#[tokio::test]
async fn test_human_log_failure_keeps_structured_record() {
    let dir = TempDir::new().unwrap();
    let config = IngestConfig {
        human_log_path: dir.path().to_path_buf(),
        ..test_config(&dir)
    };
    let ingestor = Ingestor::from_config(&config, None);

    let response = ingestor.handle_event(&text(1, 1, "still saved")).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);

    let saved = records(&config);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].text.as_deref(), Some("still saved"));
}
