//! 클랜 이름 캐시
//!
//! 프로세스가 살아있는 동안 clanId → 표시 이름을 보관합니다.
//! 만료나 무효화는 없고, 먼저 저장된 값이 유지됩니다.

use std::collections::HashMap;

use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct ClanCache {
    names: RwLock<HashMap<String, String>>,
}

impl ClanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 메모리만 확인한다. 네트워크 요청은 하지 않음.
    pub async fn lookup(&self, clan_id: &str) -> Option<String> {
        self.names.read().await.get(clan_id).cloned()
    }

    /// 없을 때만 저장하고, 캐시에 남은 값을 돌려준다.
    pub async fn store(&self, clan_id: &str, name: String) -> String {
        let mut names = self.names.write().await;
        names.entry(clan_id.to_string()).or_insert(name).clone()
    }

    pub async fn len(&self) -> usize {
        self.names.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn lookup_misses_until_stored() {
        let cache = ClanCache::new();
        assert_eq!(cache.lookup("clan.1").await, None);

        cache.store("clan.1", "TAG".to_string()).await;
        assert_eq!(cache.lookup("clan.1").await.as_deref(), Some("TAG"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn first_writer_wins() {
        let cache = ClanCache::new();
        assert_eq!(cache.store("clan.1", "FIRST".to_string()).await, "FIRST");
        assert_eq!(cache.store("clan.1", "SECOND".to_string()).await, "FIRST");
        assert_eq!(cache.lookup("clan.1").await.as_deref(), Some("FIRST"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_keep_one_value_per_key() {
        let cache = Arc::new(ClanCache::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                cache.store(&format!("clan.{}", i % 4), format!("name-{}", i)).await
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len().await, 4);
        for key in 0..4 {
            let name = cache.lookup(&format!("clan.{}", key)).await.unwrap();
            let again = cache.store(&format!("clan.{}", key), "late".to_string()).await;
            assert_eq!(name, again);
        }
    }
}
