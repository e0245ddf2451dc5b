//! Opening a course: fetch, fall back, hydrate progress, build the gate.
//!
//! ERROR HANDLING
//! ==============
//! Any failure fetching the course or its levels (including a level list
//! that is not contiguous from 1) falls back to the static catalog with a
//! "Using Demo Content" notice. A failed progress fetch only costs the
//! prior completions. The view is `None` only when neither the backend nor
//! the static catalog knows the course.

#[cfg(test)]
#[path = "course_view_test.rs"]
mod course_view_test;

use std::sync::Arc;

use tracing::{error, warn};

use crate::announcer::Announcer;
use crate::auth::Session;
use crate::backend::{Backend, BackendError};
use crate::catalog::{self, Course, CourseLevel};
use crate::notice::{Notice, NoticeBoard};
use crate::progress::{LevelCompletion, ProgressGate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseSource {
    Remote,
    Fallback,
}

pub struct CourseView {
    pub course: Course,
    pub source: CourseSource,
    pub gate: ProgressGate,
}

/// Everything a view needs to reach its collaborators.
#[derive(Clone)]
pub struct ViewContext {
    pub backend: Option<Arc<dyn Backend>>,
    pub session: Option<Session>,
    pub announcer: Announcer,
    pub notices: NoticeBoard,
}

impl CourseView {
    pub async fn open(course_id: &str, ctx: &ViewContext) -> Option<Self> {
        let remote = match &ctx.backend {
            Some(backend) => Some(fetch_remote(backend.as_ref(), course_id, ctx).await),
            None => None,
        };

        let (course, levels, source) = match remote {
            Some(Ok((course, levels))) => (course, levels, CourseSource::Remote),
            Some(Err(e)) => {
                error!(error = %e, course_id, "error fetching course details");
                let (course, levels) = catalog::static_course(course_id)?;
                ctx.notices.push(
                    Notice::new(
                        "Using Demo Content",
                        "Couldn't load course data from the server. Displaying demo content.",
                        5000,
                    )
                    .destructive(),
                );
                (course, levels, CourseSource::Fallback)
            }
            None => {
                let (course, levels) = catalog::static_course(course_id)?;
                ctx.announcer.announce(format!("Course loaded: {}", course.title));
                (course, levels, CourseSource::Fallback)
            }
        };

        let completions = match (&ctx.session, source) {
            (Some(session), CourseSource::Remote) => fetch_completions(session, &course.id).await,
            _ => Vec::new(),
        };

        let gate = ProgressGate::new(levels, completions, ctx.session.clone(), ctx.announcer.clone(), ctx.notices.clone());
        Some(Self { course, source, gate })
    }
}

async fn fetch_remote(
    backend: &dyn Backend,
    course_id: &str,
    ctx: &ViewContext,
) -> Result<(Course, Vec<CourseLevel>), BackendError> {
    let course = backend.fetch_course(course_id).await?;
    ctx.announcer.announce(format!("Course loaded: {}", course.title));
    let mut levels = backend.fetch_levels(&course.id).await?;
    catalog::validate_levels(&course.id, &mut levels).map_err(|e| BackendError::Parse(e.to_string()))?;
    Ok((course, levels))
}

async fn fetch_completions(session: &Session, course_id: &str) -> Vec<LevelCompletion> {
    match session.backend.fetch_progress(&session.identity, course_id).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, course_id, user_id = %session.identity.id, "progress fetch failed");
            Vec::new()
        }
    }
}
