//! End-to-end memory flow: record → promote → build context → save/load,
//! plus the background maintenance task.

use async_trait::async_trait;
use coda_memory::{
    spawn_maintenance, spawn_maintenance_from_config, ConversationTurn, Embedder, MemoryConfig,
    MemoryEvent, MemoryManager, MemoryType, OperationType, Promotion, Result,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const DIMS: usize = 16;

/// Bag-of-words hashing embedder; texts sharing words are similar.
struct HashingEmbedder;

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0.0f32; DIMS];
        for word in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > 2)
        {
            let bucket = word.bytes().fold(7usize, |h, b| h.wrapping_mul(31).wrapping_add(b as usize));
            v[bucket % DIMS] += 1.0;
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    fn name(&self) -> &'static str {
        "hashing"
    }
}

fn config() -> MemoryConfig {
    let mut config = MemoryConfig::default();
    config.long_term.embedding_dim = DIMS;
    config.short_term.max_turns = 4;
    config
}

fn manager() -> MemoryManager {
    MemoryManager::new(config(), Arc::new(HashingEmbedder)).unwrap()
}

#[tokio::test]
async fn test_record_promote_build_save_load() {
    let manager = manager();
    let mut events = manager.subscribe();

    manager
        .record_turn(ConversationTurn::system("You are Coda, a friendly assistant."))
        .await
        .unwrap();
    let outcome = manager
        .record_turn(ConversationTurn::user("My name is Sam and I love espresso"))
        .await
        .unwrap();
    assert!(matches!(outcome.promotion, Promotion::Promoted(_)));
    manager
        .record_turn(ConversationTurn::assistant("Nice to meet you, Sam!"))
        .await
        .unwrap();

    // The promotion produced a memory_store event
    let mut saw_store = false;
    while let Ok(event) = events.try_recv() {
        if let MemoryEvent::MemoryStore(store) = event {
            assert!(store.content_preview.contains("espresso"));
            saw_store = true;
        }
    }
    assert!(saw_store);

    let context = manager
        .build_prompt_context(200, "Do you remember my espresso order?")
        .await
        .unwrap();
    assert_eq!(context.turns.len(), 3);
    assert!(context
        .memories
        .iter()
        .any(|m| m.record.content.contains("espresso")));
    assert!(context.total_tokens() <= 200);

    let messages = context.to_messages();
    assert!(messages[0].content.starts_with("You are Coda"));

    let dir = tempfile::tempdir().unwrap();
    manager.save_session(dir.path()).await.unwrap();

    let restored = self::manager();
    let (turns, memories) = restored.load_session(dir.path()).await.unwrap();
    assert_eq!(turns, 3);
    assert_eq!(memories, manager.stats().await.long_term.memory_count);
    assert_eq!(restored.recent_turns().await, manager.recent_turns().await);

    let stats = restored.stats().await;
    assert_eq!(stats.short_term.max_turns, 4);
    assert!(stats.long_term.memory_types[&MemoryType::Preference] >= 1);
}

#[tokio::test]
async fn test_maintenance_task_runs_until_cancelled() {
    let manager = Arc::new(manager());
    manager
        .remember("User prefers window seats", MemoryType::Preference, 0.8)
        .await
        .unwrap();

    let cancel = CancellationToken::new();
    let handle = spawn_maintenance(manager.clone(), Duration::from_millis(10), cancel.clone());

    let mut passes = 0;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        passes = manager
            .operations(Some(OperationType::ApplyDecay), 100)
            .len();
        if passes >= 2 {
            break;
        }
    }
    assert!(passes >= 2);

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();

    // A few milliseconds of decay leave the memory in place
    assert_eq!(manager.stats().await.long_term.memory_count, 1);
}

#[tokio::test]
async fn test_maintenance_from_config() {
    let mut disabled = config();
    disabled.retention.maintenance_interval_secs = 0;
    let manager = Arc::new(MemoryManager::new(disabled, Arc::new(HashingEmbedder)).unwrap());
    assert!(spawn_maintenance_from_config(manager, CancellationToken::new()).is_none());

    let mut enabled = config();
    enabled.retention.maintenance_interval_secs = 1;
    let manager = Arc::new(MemoryManager::new(enabled, Arc::new(HashingEmbedder)).unwrap());
    let cancel = CancellationToken::new();
    let handle = spawn_maintenance_from_config(manager.clone(), cancel.clone()).unwrap();

    tokio::time::timeout(Duration::from_secs(5), async {
        while manager
            .operations(Some(OperationType::ApplyDecay), 10)
            .is_empty()
        {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await
    .unwrap();

    cancel.cancel();
    handle.await.unwrap();
}
