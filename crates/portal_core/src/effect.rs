use std::time::Duration;

use crate::{ApplicationRecord, Msg};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a transient message to the user.
    Notify { message: String, kind: NotifyKind },
    /// Send the assembled record to the applications endpoint.
    SubmitApplication { record: ApplicationRecord },
    /// Decorative success animation.
    Celebrate,
    /// Deliver `msg` back to `update` after `delay`.
    Schedule { delay: Duration, msg: Box<Msg> },
    /// Leave the current page.
    Navigate { page: Page },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Jobs,
    Login,
    Application,
    Contact,
}

impl Page {
    pub fn as_str(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Jobs => "jobs",
            Page::Login => "login",
            Page::Application => "application",
            Page::Contact => "contact",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "home" => Some(Page::Home),
            "jobs" => Some(Page::Jobs),
            "login" => Some(Page::Login),
            "application" => Some(Page::Application),
            "contact" => Some(Page::Contact),
            _ => None,
        }
    }
}
