use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::PendingReply;

/// Delivers pending replies after their delay by posting them into a channel.
///
/// Every scheduled reply is a spawned task that can be aborted; `cancel_all`
/// is called when the conversation resets so nothing lands afterwards.
pub struct ReplyScheduler<T> {
    tx: mpsc::UnboundedSender<T>,
    in_flight: Vec<JoinHandle<()>>,
}

impl<T> ReplyScheduler<T>
where
    T: From<PendingReply> + Send + 'static,
{
    pub fn new(tx: mpsc::UnboundedSender<T>) -> Self {
        Self {
            tx,
            in_flight: Vec::new(),
        }
    }

    pub fn schedule(&mut self, reply: PendingReply) {
        self.in_flight.retain(|h| !h.is_finished());

        let tx = self.tx.clone();
        self.in_flight.push(tokio::spawn(async move {
            tokio::time::sleep(reply.delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(T::from(reply));
        }));
    }

    pub fn cancel_all(&mut self) {
        let cancelled = self.in_flight.len();
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
        if cancelled > 0 {
            tracing::debug!(cancelled, "cancelled pending replies");
        }
    }

    /// Number of replies still waiting on their delay.
    pub fn in_flight(&self) -> usize {
        self.in_flight.iter().filter(|h| !h.is_finished()).count()
    }
}

impl<T> Drop for ReplyScheduler<T> {
    fn drop(&mut self) {
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{SessionId, SUGGESTED_REPLY_DELAY, TYPED_REPLY_DELAY};
    use std::time::Duration;
    use tokio::time::{timeout, Instant};

    fn reply(session: u64, text: &'static str, delay: Duration) -> PendingReply {
        PendingReply {
            session: SessionId(session),
            text,
            delay,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel::<PendingReply>();
        let mut scheduler = ReplyScheduler::new(tx);

        let start = Instant::now();
        scheduler.schedule(reply(0, "hi", TYPED_REPLY_DELAY));
        assert_eq!(scheduler.in_flight(), 1);

        let got = rx.recv().await.unwrap();
        assert_eq!(got.text, "hi");
        assert!(start.elapsed() >= TYPED_REPLY_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replies_land_in_timer_order() {
        let (tx, mut rx) = mpsc::unbounded_channel::<PendingReply>();
        let mut scheduler = ReplyScheduler::new(tx);

        scheduler.schedule(reply(0, "suggested", SUGGESTED_REPLY_DELAY));
        scheduler.schedule(reply(0, "typed", TYPED_REPLY_DELAY));

        assert_eq!(rx.recv().await.unwrap().text, "typed");
        assert_eq!(rx.recv().await.unwrap().text, "suggested");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_prevents_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel::<PendingReply>();
        let mut scheduler = ReplyScheduler::new(tx);

        scheduler.schedule(reply(0, "a", TYPED_REPLY_DELAY));
        scheduler.schedule(reply(0, "b", TYPED_REPLY_DELAY));
        scheduler.cancel_all();
        assert_eq!(scheduler.in_flight(), 0);

        let waited = timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err(), "cancelled reply was delivered");
    }
}
