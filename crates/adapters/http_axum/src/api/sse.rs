//! Server-Sent Events (SSE) stream of dashboard snapshots.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use relaydash_app::ports::{PassengerDirectory, RelayControl};
use relaydash_domain::dashboard::DashboardState;

use crate::state::AppState;

fn to_event(snapshot: &DashboardState) -> Option<Event> {
    match serde_json::to_string(snapshot) {
        Ok(json) => Some(Event::default().data(json)),
        Err(err) => {
            tracing::warn!(%err, "failed to serialize snapshot for SSE stream");
            None
        }
    }
}

/// `GET /api/dashboard/stream` — current snapshot, then one frame per change.
///
/// A subscriber that falls behind skips the snapshots it missed; the next
/// frame it gets is complete, so nothing needs replaying.
pub async fn stream<R, P>(
    State(state): State<AppState<R, P>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    R: RelayControl + Send + Sync + 'static,
    P: PassengerDirectory + Send + Sync + 'static,
{
    // Subscribe first so no change slips between the snapshot and the feed.
    let updates = BroadcastStream::new(state.event_bus.subscribe());
    let current = tokio_stream::once(Ok::<_, BroadcastStreamRecvError>(
        state.control_service.current(),
    ));

    let events = current.chain(updates).filter_map(|result| match result {
        Ok(snapshot) => to_event(&snapshot).map(Ok),
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "SSE subscriber lagged, snapshots were dropped");
            None
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
