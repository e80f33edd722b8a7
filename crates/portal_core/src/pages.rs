use std::time::Duration;

use crate::Page;

/// Number of job cards shown on the home page.
pub const HOME_PAGE_JOB_LIMIT: usize = 6;

/// Jobs to display on `page`: the home page shows a short teaser, every other page all of them.
pub fn jobs_for_page<T>(jobs: &[T], page: Page) -> &[T] {
    match page {
        Page::Home => &jobs[..jobs.len().min(HOME_PAGE_JOB_LIMIT)],
        _ => jobs,
    }
}

/// Where choosing a job leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyDestination {
    pub page: Page,
    /// Page to resume after a successful login, if the user has to log in first.
    pub redirect_after_login: Option<Page>,
}

pub fn apply_destination(logged_in: bool) -> ApplyDestination {
    if logged_in {
        ApplyDestination {
            page: Page::Application,
            redirect_after_login: None,
        }
    } else {
        ApplyDestination {
            page: Page::Login,
            redirect_after_login: Some(Page::Application),
        }
    }
}

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login to apply for this job";

/// Pause between the login-required notice and opening the login page.
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Pause between a successful sign-in or sign-up and leaving the login page.
pub const AUTH_REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// Page opened after login when no redirect target was stored.
pub fn after_login(redirect_after_login: Option<Page>) -> Page {
    redirect_after_login.unwrap_or(Page::Home)
}
