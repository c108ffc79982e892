use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Process-wide session store: opaque token -> user id. Volatile on purpose;
/// a restart invalidates every session. Tokens never expire and repeated
/// logins accumulate unrelated tokens for the same user.
#[derive(Default)]
pub struct TokenStore {
    tokens: RwLock<HashMap<String, i64>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_token(&self, user_id: i64) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.write().unwrap().insert(token.clone(), user_id);
        token
    }

    pub fn user_id_for(&self, token: &str) -> Option<i64> {
        self.tokens.read().unwrap().get(token).copied()
    }

    /// No-op if the token was never issued or is already gone.
    pub fn invalidate(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn issued_token_resolves_to_user() {
        let store = TokenStore::new();
        let token = store.create_token(42);
        assert_eq!(store.user_id_for(&token), Some(42));
    }

    #[test]
    fn unknown_token_resolves_to_none() {
        let store = TokenStore::new();
        assert_eq!(store.user_id_for("nope"), None);
    }

    #[test]
    fn repeated_logins_issue_distinct_tokens() {
        let store = TokenStore::new();
        let first = store.create_token(7);
        let second = store.create_token(7);
        assert_ne!(first, second);
        assert_eq!(store.user_id_for(&first), Some(7));
        assert_eq!(store.user_id_for(&second), Some(7));
    }

    #[test]
    fn invalidate_is_idempotent() {
        let store = TokenStore::new();
        let token = store.create_token(1);
        store.invalidate(&token);
        assert_eq!(store.user_id_for(&token), None);
        store.invalidate(&token);
        store.invalidate("never-issued");
    }

    #[test]
    fn concurrent_use_keeps_unrelated_tokens_intact() {
        let store = Arc::new(TokenStore::new());
        let keeper = store.create_token(999);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for j in 0..200 {
                        let token = store.create_token(i * 1000 + j);
                        assert_eq!(store.user_id_for(&token), Some(i * 1000 + j));
                        if j % 2 == 0 {
                            store.invalidate(&token);
                            assert_eq!(store.user_id_for(&token), None);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.user_id_for(&keeper), Some(999));
    }
}
