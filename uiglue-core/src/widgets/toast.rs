//! Toast notifications: a bounded FIFO with per-item expiry

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::ToastConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Error,
    Success,
}

impl ToastVariant {
    /// Modifier class a host renders the toast with
    pub fn class(&self) -> &'static str {
        match self {
            ToastVariant::Default => "toast--default",
            ToastVariant::Error => "toast--error",
            ToastVariant::Success => "toast--success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub variant: ToastVariant,
}

/// Sink for user-facing notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, variant: ToastVariant);
}

struct Entry {
    toast: Toast,
    expiry: Option<JoinHandle<()>>,
}

#[derive(Default)]
struct QueueInner {
    next_id: u64,
    visible: VecDeque<Entry>,
}

impl QueueInner {
    fn remove(&mut self, id: u64) -> Option<Entry> {
        let pos = self.visible.iter().position(|e| e.toast.id == id)?;
        self.visible.remove(pos)
    }
}

/// Visible toasts, oldest first
///
/// Showing a toast when `max_toasts` are already visible evicts the oldest
/// ones first. Each toast expires after its duration unless dismissed
/// earlier. Without a tokio runtime toasts never expire on their own.
#[derive(Clone)]
pub struct ToastQueue {
    inner: Arc<Mutex<QueueInner>>,
    config: ToastConfig,
    runtime: Option<Handle>,
}

impl ToastQueue {
    pub fn new(config: ToastConfig) -> Self {
        let runtime = Handle::try_current().ok();
        if runtime.is_none() {
            debug!("toast queue created outside a runtime; toasts will not auto-dismiss");
        }
        Self {
            inner: Arc::default(),
            config,
            runtime,
        }
    }

    /// Show a toast for the configured duration; returns its id
    pub fn show(&self, message: &str, variant: ToastVariant) -> u64 {
        self.show_for(message, variant, self.config.duration())
    }

    pub fn show_for(&self, message: &str, variant: ToastVariant, duration: Duration) -> u64 {
        let mut inner = self.lock();

        let max = self.config.max_toasts.max(1);
        while inner.visible.len() >= max {
            if let Some(evicted) = inner.visible.pop_front() {
                if let Some(expiry) = evicted.expiry {
                    expiry.abort();
                }
                debug!(id = evicted.toast.id, "toast evicted");
            }
        }

        inner.next_id += 1;
        let id = inner.next_id;

        let expiry = self.runtime.as_ref().map(|runtime| {
            let queue: Weak<Mutex<QueueInner>> = Arc::downgrade(&self.inner);
            runtime.spawn(async move {
                tokio::time::sleep(duration).await;
                if let Some(queue) = queue.upgrade() {
                    let mut inner = queue.lock().unwrap_or_else(PoisonError::into_inner);
                    if inner.remove(id).is_some() {
                        debug!(id, "toast expired");
                    }
                }
            })
        });

        inner.visible.push_back(Entry {
            toast: Toast {
                id,
                message: message.to_string(),
                variant,
            },
            expiry,
        });

        id
    }

    /// Click-to-dismiss; returns whether the toast was still visible
    pub fn dismiss(&self, id: u64) -> bool {
        match self.lock().remove(id) {
            Some(entry) => {
                if let Some(expiry) = entry.expiry {
                    expiry.abort();
                }
                true
            }
            None => false,
        }
    }

    pub fn visible(&self) -> Vec<Toast> {
        self.lock().visible.iter().map(|e| e.toast.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, QueueInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, message: &str, variant: ToastVariant) {
        self.show(message, variant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(queue: &ToastQueue) -> Vec<String> {
        queue.visible().into_iter().map(|t| t.message).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_evicts_oldest_beyond_max() {
        let queue = ToastQueue::new(ToastConfig::default());
        for msg in ["one", "two", "three", "four"] {
            queue.show(msg, ToastVariant::Default);
        }
        assert_eq!(messages(&queue), vec!["two", "three", "four"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_after_duration() {
        let queue = ToastQueue::new(ToastConfig::default());
        queue.show("saved", ToastVariant::Success);
        queue.show_for("slow", ToastVariant::Default, Duration::from_secs(10));

        tokio::time::sleep(Duration::from_millis(2400)).await;
        assert_eq!(messages(&queue), vec!["saved", "slow"]);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(messages(&queue), vec!["slow"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_removes_once() {
        let queue = ToastQueue::new(ToastConfig::default());
        let id = queue.show("oops", ToastVariant::Error);

        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert!(queue.visible().is_empty());
    }

    #[test]
    fn test_without_runtime_toasts_stay() {
        let queue = ToastQueue::new(ToastConfig::default());
        queue.notify("hello", ToastVariant::Default);
        assert_eq!(queue.visible()[0].variant.class(), "toast--default");
    }
}
