use std::collections::VecDeque;

use tokio::sync::Mutex;

/// 최근에 조회된 플레이어 이름 (최신순, 대소문자 무시 중복 제거)
///
/// 이름 자동완성용. 프로세스 재시작 시 비워짐.
#[derive(Debug)]
pub struct RecentSearches {
    capacity: usize,
    names: Mutex<VecDeque<String>>,
}

impl RecentSearches {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            names: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub async fn record(&self, name: &str) {
        if self.capacity == 0 || name.is_empty() {
            return;
        }

        let key = name.to_lowercase();
        let mut names = self.names.lock().await;
        names.retain(|n| n.to_lowercase() != key);
        names.push_front(name.to_string());
        names.truncate(self.capacity);
    }

    /// prefix로 시작하는 이름 (대소문자 무시). 빈 prefix는 결과 없음.
    pub async fn matching(&self, prefix: &str, limit: usize) -> Vec<String> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }

        self.names
            .lock()
            .await
            .iter()
            .filter(|n| n.to_lowercase().starts_with(&prefix))
            .take(limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn newest_first_without_duplicates() {
        let recent = RecentSearches::new(10);
        recent.record("Alice").await;
        recent.record("Albert").await;
        recent.record("ALICE").await;

        assert_eq!(recent.matching("al", 10).await, vec!["ALICE", "Albert"]);
    }

    #[tokio::test]
    async fn capacity_drops_oldest() {
        let recent = RecentSearches::new(2);
        recent.record("p1").await;
        recent.record("p2").await;
        recent.record("p3").await;

        assert_eq!(recent.matching("p", 10).await, vec!["p3", "p2"]);
    }

    #[tokio::test]
    async fn empty_prefix_and_limit() {
        let recent = RecentSearches::new(10);
        for name in ["bob1", "bob2", "bob3"] {
            recent.record(name).await;
        }

        assert!(recent.matching("  ", 10).await.is_empty());
        assert_eq!(recent.matching("BOB", 2).await, vec!["bob3", "bob2"]);
    }
}
