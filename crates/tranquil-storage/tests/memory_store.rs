use serde_json::json;
use tranquil_core::models::{AssessmentContext, FlowSession, QuestionnaireKind, ScreenData};
use tranquil_instruments::result::score_assessment;
use tranquil_storage::memory::MemoryStore;
use tranquil_storage::{AssessmentStore, SessionStore};

#[tokio::test]
async fn clones_share_sessions() {
    let store = MemoryStore::new();
    let other = store.clone();
    let mut data = ScreenData::new();
    data.merge("Screen1", json!({ "value": "test" }));

    store.save_session("morning", "Screen2", &data).await.unwrap();

    let loaded = other.load_session("morning").await.unwrap().unwrap();
    assert_eq!(loaded.current_screen, "Screen2");
    assert_eq!(loaded.screen_data, data);
}

#[tokio::test]
async fn seeded_session_is_visible() {
    let store = MemoryStore::new();
    store
        .insert_session(FlowSession {
            flow_type: "evening".to_string(),
            current_screen: "Gratitude".to_string(),
            saved_at: jiff::Timestamp::now(),
            screen_data: ScreenData::new(),
        })
        .await;

    assert!(store.load_session("evening").await.unwrap().is_some());
    store.clear_session("evening").await.unwrap();
    assert!(store.load_session("evening").await.unwrap().is_none());
}

#[tokio::test]
async fn saving_the_same_result_twice_does_not_duplicate_it() {
    let store = MemoryStore::new();
    let result = score_assessment(
        QuestionnaireKind::Gad7,
        vec![1; 7],
        AssessmentContext::Standalone,
    )
    .unwrap();

    store.save_assessment(&result).await.unwrap();
    store.save_assessment(&result).await.unwrap();

    assert_eq!(store.get_assessments().await.unwrap().len(), 1);
}
