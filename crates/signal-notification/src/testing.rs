//! 테스트용 메모리 전송기.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::format::render_event;
use crate::types::{Notification, NotificationEvent, NotificationResult, NotificationSender};

/// 전송된 알림을 메모리에 보관하는 전송기.
///
/// 복제본끼리 같은 버퍼를 공유하므로 관리자에 넘긴 뒤에도 검사할 수 있습니다.
#[derive(Clone, Default)]
pub struct MemorySender {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl MemorySender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 전송된 이벤트 목록.
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.sent
            .lock()
            .map(|sent| sent.iter().map(|n| n.event.clone()).collect())
            .unwrap_or_default()
    }

    /// 전송된 메시지 본문 목록.
    pub fn messages(&self) -> Vec<String> {
        self.events().iter().map(render_event).collect()
    }
}

#[async_trait]
impl NotificationSender for MemorySender {
    async fn send(&self, notification: &Notification) -> NotificationResult<()> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification.clone());
        }
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "memory"
    }
}
