use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SessionModel {
    pub session_id: String,
    pub capabilities: Value,
    pub created_at: Instant,
}

impl SessionModel {
    pub fn new(capabilities: Value) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            capabilities,
            created_at: Instant::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionModel>>,
}

impl SessionStore {
    pub fn create(&self, capabilities: Value) -> SessionModel {
        let model = SessionModel::new(capabilities);
        self.sessions
            .write()
            .insert(model.session_id.clone(), model.clone());
        model
    }

    pub fn get(&self, id: &str) -> Option<SessionModel> {
        self.sessions.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.read().contains_key(id)
    }

    pub fn remove(&self, id: &str) -> Option<SessionModel> {
        self.sessions.write().remove(id)
    }

    /// Drops every session, returning the ids that were active.
    pub fn clear(&self) -> Vec<String> {
        self.sessions.write().drain().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_get_remove() {
        let store = SessionStore::default();
        let session = store.create(json!({ "platformName": "Android" }));
        assert!(store.contains(&session.session_id));
        assert_eq!(
            store.get(&session.session_id).map(|s| s.capabilities),
            Some(json!({ "platformName": "Android" }))
        );
        assert!(store.remove(&session.session_id).is_some());
        assert!(store.is_empty());
    }

    #[test]
    fn clear_returns_previous_ids() {
        let store = SessionStore::default();
        let a = store.create(json!({}));
        let b = store.create(json!({}));
        let mut cleared = store.clear();
        cleared.sort();
        let mut expected = vec![a.session_id, b.session_id];
        expected.sort();
        assert_eq!(cleared, expected);
        assert_eq!(store.len(), 0);
    }
}
