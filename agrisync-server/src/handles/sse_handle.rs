use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Sse;
use axum::response::sse::Event;
use tokio_stream::{Stream, StreamExt, wrappers};

use crate::services::notification_service::NotificationService;

#[derive(Clone)]
pub struct SSEState {
    pub notifier: Arc<NotificationService>,
}

pub async fn sse_handler(
    State(state): State<SSEState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.notifier.subscribe();

    let stream = wrappers::BroadcastStream::new(receiver).filter_map(|result| match result {
        Ok(notification) => serde_json::to_string(&notification)
            .ok()
            .map(|data| Ok(Event::default().data(data))),
        // lagged receiver, skip to the next notification
        Err(_) => None,
    });

    Sse::new(stream)
}
