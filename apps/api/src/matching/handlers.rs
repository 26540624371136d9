//! Student-facing match views: buckets, timeline, and a live SSE stream.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, Stream};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::session::check_active;
use crate::auth::RequireStudent;
use crate::errors::AppError;
use crate::feed::FeedEvent;
use crate::matching::{compute_matches, timeline, SkillSet, TimelineEntry};
use crate::models::job_post::JobPostRow;
use crate::models::user::UserRow;
use crate::posts::store as post_store;
use crate::state::AppState;
use crate::users::store as user_store;

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    /// False until the student has saved at least one skill.
    pub profile_complete: bool,
    pub matched: Vec<JobPostRow>,
    pub suggested: Vec<JobPostRow>,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub profile_complete: bool,
    pub posts: Vec<TimelineEntry>,
}

fn candidate_skills(user: &UserRow) -> SkillSet {
    user.profile_skills().iter().collect()
}

async fn matches_snapshot(state: &AppState, user: &UserRow) -> Result<MatchesResponse, AppError> {
    let skills = candidate_skills(user);
    let approved = post_store::list_approved(&state.db).await?;
    let buckets = compute_matches(&skills, approved);
    Ok(MatchesResponse {
        profile_complete: !skills.is_empty(),
        matched: buckets.matched,
        suggested: buckets.suggested,
    })
}

/// GET /api/v1/students/me/matches
pub async fn handle_matches(
    State(state): State<AppState>,
    RequireStudent(session): RequireStudent,
) -> Result<Json<MatchesResponse>, AppError> {
    Ok(Json(matches_snapshot(&state, &session.user).await?))
}

/// GET /api/v1/students/me/timeline
pub async fn handle_timeline(
    State(state): State<AppState>,
    RequireStudent(session): RequireStudent,
) -> Result<Json<TimelineResponse>, AppError> {
    let skills = candidate_skills(&session.user);
    let approved = post_store::list_approved(&state.db).await?;
    Ok(Json(TimelineResponse {
        profile_complete: !skills.is_empty(),
        posts: timeline(&skills, approved),
    }))
}

struct LiveMatches {
    state: AppState,
    user_id: Uuid,
    rx: broadcast::Receiver<FeedEvent>,
    sent_initial: bool,
}

/// Waits for the next posting change. `false` once the feed is gone.
///
/// On lag the receiver is moved to the tail and the caller gets a single
/// `true`: one fresh snapshot covers everything that was skipped.
pub(crate) async fn wait_for_change(rx: &mut broadcast::Receiver<FeedEvent>) -> bool {
    match rx.recv().await {
        Ok(event) => {
            debug!(?event, "refreshing live matches");
            true
        }
        Err(broadcast::error::RecvError::Lagged(skipped)) => {
            warn!(skipped, "live matches lagged, resyncing");
            *rx = rx.resubscribe();
            true
        }
        Err(broadcast::error::RecvError::Closed) => false,
    }
}

impl LiveMatches {
    /// `None` ends the stream: the account was removed or restricted since
    /// the connection was opened.
    async fn snapshot_event(&self) -> Option<Event> {
        // Reload so profile edits and restrictions made mid-stream apply.
        let user = match user_store::find_by_id(&self.state.db, self.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!(user_id = %self.user_id, "account gone, closing live matches");
                return None;
            }
            Err(e) => {
                warn!(user_id = %self.user_id, "failed to reload user for live matches: {e}");
                return Some(Event::default().event("error").data("snapshot unavailable"));
            }
        };
        if check_active(&user).is_err() {
            info!(user_id = %self.user_id, "account restricted, closing live matches");
            return None;
        }

        let event = match matches_snapshot(&self.state, &user).await {
            Ok(snapshot) => Event::default().event("matches").json_data(snapshot),
            Err(e) => {
                warn!(user_id = %self.user_id, "failed to load matches snapshot: {e}");
                return Some(Event::default().event("error").data("snapshot unavailable"));
            }
        };
        Some(event.unwrap_or_else(|e| {
            warn!(user_id = %self.user_id, "failed to encode matches event: {e}");
            Event::default().event("error").data("snapshot unavailable")
        }))
    }
}

/// GET /api/v1/students/me/matches/stream
///
/// Sends the current buckets, then a fresh set after every posting change.
pub async fn handle_matches_stream(
    State(state): State<AppState>,
    RequireStudent(session): RequireStudent,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Subscribe before the first snapshot so no change slips between them.
    let live = LiveMatches {
        rx: state.feed.subscribe(),
        state,
        user_id: session.user_id(),
        sent_initial: false,
    };

    let events = stream::unfold(live, |mut live| async move {
        if live.sent_initial && !wait_for_change(&mut live.rx).await {
            return None;
        }
        live.sent_initial = true;
        let event = live.snapshot_event().await?;
        Some((Ok::<_, Infallible>(event), live))
    });

    Sse::new(events).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}

#[cfg(test)]
mod tests {
    use sqlx::types::Json as SqlJson;

    use super::*;
    use crate::feed::PostFeed;
    use crate::models::user::{test_user, Role, StudentProfile};

    #[test]
    fn test_candidate_skills_from_profile() {
        let mut user = test_user(Role::Student);
        assert!(candidate_skills(&user).is_empty());

        user.profile = Some(SqlJson(StudentProfile {
            skills: vec!["Python".to_string(), "python".to_string(), "SQL".to_string()],
            ..Default::default()
        }));
        let skills = candidate_skills(&user);
        assert_eq!(skills.len(), 2);
        assert!(skills.contains("sql"));
    }

    #[tokio::test]
    async fn test_wait_for_change_on_event() {
        let feed = PostFeed::default();
        let mut rx = feed.subscribe();
        feed.publish(FeedEvent::PostApproved {
            post_id: Uuid::new_v4(),
        });
        assert!(wait_for_change(&mut rx).await);
    }

    #[tokio::test]
    async fn test_lag_resyncs_once_then_ends_when_feed_dropped() {
        let feed = PostFeed::new(2);
        let mut rx = feed.subscribe();
        for _ in 0..5 {
            feed.publish(FeedEvent::PostSubmitted {
                post_id: Uuid::new_v4(),
            });
        }

        // Lagged: one refresh, and the backlog is discarded.
        assert!(wait_for_change(&mut rx).await);
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));

        drop(feed);
        assert!(!wait_for_change(&mut rx).await);
    }
}
