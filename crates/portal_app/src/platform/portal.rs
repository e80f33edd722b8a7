use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use portal_core::{
    after_login, apply_destination, jobs_for_page, ContactForm, NotifyKind, Page, SignInForm,
    SignUpForm, AUTH_REDIRECT_DELAY, CONTACT_FAILED_MESSAGE, CONTACT_REJECTED_MESSAGE,
    CONTACT_SENT_MESSAGE, LOGIN_REDIRECT_DELAY, LOGIN_REQUIRED_MESSAGE, LOGOUT_MESSAGE,
    SIGN_IN_FAILED, SIGN_UP_FAILED,
};
use portal_engine::{
    ApiEnvelope, ApiError, ApplicationFilters, AuthData, JobFilters, ReqwestApiClient,
    SignInRequest, SignUpRequest, SubmissionPort,
};
use portal_logging::{portal_info, portal_warn};
use serde_json::Value;
use tokio::runtime::Runtime;

use super::app::run_wizard;
use super::notifier::Notifier;
use super::prompt::Prompter;
use super::storage::LocalStore;
use super::ui::render;

/// One interactive session: API client, local store and the terminal surfaces.
pub struct Portal {
    client: ReqwestApiClient,
    store: LocalStore,
    notifier: Notifier,
    prompter: Box<dyn Prompter>,
    out: Box<dyn Write>,
    runtime: Runtime,
}

impl Portal {
    pub fn new(
        client: ReqwestApiClient,
        data_dir: &Path,
        notifier: Notifier,
        prompter: Box<dyn Prompter>,
        out: Box<dyn Write>,
    ) -> Result<Self> {
        let store = LocalStore::open(data_dir)
            .with_context(|| format!("cannot use data dir {}", data_dir.display()))?;
        let runtime = Runtime::new().context("failed to start async runtime")?;
        Ok(Self {
            client,
            store,
            notifier,
            prompter,
            out,
            runtime,
        })
    }

    /// Opens `page` and follows any page it hands over to.
    pub fn open(&mut self, page: Page) -> Result<()> {
        let mut next = Some(page);
        while let Some(page) = next.take() {
            portal_info!("Opening page {}", page.as_str());
            next = match page {
                Page::Home | Page::Jobs => {
                    self.list_jobs(&JobFilters::default(), page)?;
                    None
                }
                Page::Login => self.login()?,
                Page::Application => Some(self.apply()?),
                Page::Contact => {
                    self.contact()?;
                    None
                }
            };
        }
        Ok(())
    }

    fn apply(&mut self) -> Result<Page> {
        let selected = self
            .store
            .selected_job()
            .map(|job| job.title)
            .filter(|title| !title.is_empty());
        let port: Arc<dyn SubmissionPort> = Arc::new(self.client.clone());
        let page = run_wizard(
            port,
            selected,
            self.prompter.as_mut(),
            &mut self.notifier,
            self.out.as_mut(),
        )?;
        Ok(page)
    }

    pub fn list_jobs(&mut self, filters: &JobFilters, page: Page) -> Result<()> {
        match self.runtime.block_on(self.client.get_all_jobs(filters)) {
            Ok(ApiEnvelope {
                success: true,
                data: Some(jobs),
                ..
            }) => {
                let shown = jobs_for_page(&jobs, page);
                if shown.is_empty() {
                    writeln!(self.out, "No jobs available at the moment.")?;
                } else {
                    writeln!(self.out, "{}", render::job_list(shown))?;
                }
            }
            Ok(envelope) => {
                let reason = envelope.reason().unwrap_or("No jobs returned").to_string();
                self.notifier.notify(&reason, NotifyKind::Error);
            }
            Err(err) => {
                writeln!(self.out, "Failed to load jobs")?;
                self.notifier
                    .notify(&format!("Error: {}", err.message), NotifyKind::Error);
            }
        }
        Ok(())
    }

    pub fn search_jobs(&mut self, keyword: &str) -> Result<()> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list_jobs(&JobFilters::default(), Page::Jobs);
        }
        match self.runtime.block_on(self.client.search_jobs(keyword)) {
            Ok(envelope) if envelope.success => {
                let jobs = envelope.data.unwrap_or_default();
                if jobs.is_empty() {
                    writeln!(self.out, "No jobs found for \"{keyword}\"")?;
                } else {
                    writeln!(self.out, "{}", render::job_list(&jobs))?;
                }
            }
            Ok(_) | Err(_) => {
                writeln!(self.out, "Search failed. Please try again.")?;
                self.notifier.notify("Search failed", NotifyKind::Error);
            }
        }
        Ok(())
    }

    pub fn show_job(&mut self, id: &str) -> Result<()> {
        match self.runtime.block_on(self.client.get_job_by_id(id)) {
            Ok(ApiEnvelope {
                data: Some(job), ..
            }) => writeln!(self.out, "{}", render::job_card(&job))?,
            Ok(envelope) => {
                let reason = envelope.reason().unwrap_or("Job not found").to_string();
                self.notifier.notify(&reason, NotifyKind::Error);
            }
            Err(err) => self.notifier.notify(&err.message, NotifyKind::Error),
        }
        Ok(())
    }

    /// Remembers the job and opens the form, sending anonymous users through login first.
    pub fn apply_to_job(&mut self, id: &str) -> Result<()> {
        let job = match self.runtime.block_on(self.client.get_job_by_id(id)) {
            Ok(ApiEnvelope {
                data: Some(job), ..
            }) => job,
            Ok(envelope) => {
                let reason = envelope.reason().unwrap_or("Job not found").to_string();
                self.notifier.notify(&reason, NotifyKind::Error);
                return Ok(());
            }
            Err(err) => {
                self.notifier.notify(&err.message, NotifyKind::Error);
                return Ok(());
            }
        };
        self.store.set_selected_job(&job)?;

        let destination = apply_destination(self.store.is_logged_in());
        if let Some(redirect) = destination.redirect_after_login {
            self.notifier
                .notify(LOGIN_REQUIRED_MESSAGE, NotifyKind::Info);
            self.store.set_redirect_after_login(redirect)?;
            thread::sleep(LOGIN_REDIRECT_DELAY);
        }
        self.open(destination.page)
    }

    fn login(&mut self) -> Result<Option<Page>> {
        let username = self.prompter.text("Username", "")?;
        let password = self.prompter.secret("Password")?;
        let form = SignInForm::new(&username, &password);
        if let Err(err) = form.validate() {
            self.notifier.notify(&err.message, NotifyKind::Error);
            return Ok(None);
        }
        let request = SignInRequest {
            username: form.username,
            password: form.password,
        };
        let response = self.runtime.block_on(self.client.signin(&request));
        self.finish_auth(response, SIGN_IN_FAILED)
    }

    fn signup(&mut self) -> Result<Option<Page>> {
        let username = self.prompter.text("Username", "")?;
        let email = self.prompter.text("Email", "")?;
        let password = self.prompter.secret("Password")?;
        let form = SignUpForm::new(&username, &email, &password);
        if let Err(err) = form.validate() {
            self.notifier.notify(&err.message, NotifyKind::Error);
            return Ok(None);
        }
        let request = SignUpRequest {
            username: form.username,
            email: form.email,
            password: form.password,
        };
        let response = self.runtime.block_on(self.client.signup(&request));
        self.finish_auth(response, SIGN_UP_FAILED)
    }

    fn finish_auth(
        &mut self,
        response: Result<ApiEnvelope<AuthData>, ApiError>,
        fallback: &str,
    ) -> Result<Option<Page>> {
        let envelope = match response {
            Ok(envelope) => envelope,
            Err(err) => {
                let message = if err.message.trim().is_empty() {
                    fallback.to_string()
                } else {
                    err.message
                };
                self.notifier.notify(&message, NotifyKind::Error);
                return Ok(None);
            }
        };
        let message = envelope.reason().map(str::to_string);
        let auth = match envelope.data {
            Some(auth) if envelope.success => auth,
            _ => {
                let message = message.unwrap_or_else(|| fallback.to_string());
                self.notifier.notify(&message, NotifyKind::Error);
                return Ok(None);
            }
        };

        self.store.store_auth(&auth)?;
        portal_info!("Signed in; session stored");
        let greeting = message.unwrap_or_else(|| format!("Welcome, {}!", auth.user.username));
        self.notifier.notify(&greeting, NotifyKind::Success);

        let redirect = self.store.take_redirect_after_login()?;
        thread::sleep(AUTH_REDIRECT_DELAY);
        Ok(Some(after_login(redirect)))
    }

    /// Always forgets the session, even when the API call fails.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(token) = self.store.token().map(str::to_string) {
            if let Err(err) = self.runtime.block_on(self.client.logout(&token)) {
                portal_warn!("logout call failed: {}", err);
            }
        }
        self.store.clear_auth()?;
        self.notifier.notify(LOGOUT_MESSAGE, NotifyKind::Success);
        Ok(())
    }

    pub fn whoami(&mut self) -> Result<()> {
        let Some(token) = self
            .store
            .token()
            .filter(|_| self.store.is_logged_in())
            .map(str::to_string)
        else {
            self.notifier
                .notify("You are not logged in", NotifyKind::Info);
            return Ok(());
        };
        match self.runtime.block_on(self.client.get_me(&token)) {
            Ok(ApiEnvelope {
                data: Some(user), ..
            }) => writeln!(self.out, "{} <{}>", user.username, user.email)?,
            Ok(_) | Err(_) => {
                let username = self.store.username().unwrap_or_default().to_string();
                let email = self.store.user_email().unwrap_or_default().to_string();
                writeln!(self.out, "{username} <{email}> (offline)")?;
            }
        }
        Ok(())
    }

    pub fn contact(&mut self) -> Result<()> {
        let name = self.prompter.text("Name", "")?;
        let email = self.prompter.text("Email", "")?;
        let phone = self.prompter.text("Phone [optional]", "")?;
        let subject = self.prompter.text("Subject", "")?;
        let message = self.prompter.text("Message", "")?;
        let form = ContactForm::new(&name, &email, &phone, &subject, &message);
        if let Err(reason) = form.validate() {
            self.notifier.notify(reason, NotifyKind::Error);
            return Ok(());
        }

        match self.runtime.block_on(self.client.submit_contact(&form)) {
            Ok(envelope) if envelope.success => {
                let text = envelope.message.filter(|m| !m.trim().is_empty());
                self.notifier.notify(
                    text.as_deref().unwrap_or(CONTACT_SENT_MESSAGE),
                    NotifyKind::Success,
                );
            }
            Ok(envelope) => {
                let text = envelope.error.filter(|e| !e.trim().is_empty());
                self.notifier.notify(
                    text.as_deref().unwrap_or(CONTACT_REJECTED_MESSAGE),
                    NotifyKind::Error,
                );
            }
            Err(err) => {
                let text = if err.message.trim().is_empty() {
                    CONTACT_FAILED_MESSAGE.to_string()
                } else {
                    err.message
                };
                self.notifier.notify(&text, NotifyKind::Error);
            }
        }
        Ok(())
    }

    pub fn health(&mut self) -> Result<()> {
        match self.runtime.block_on(self.client.check_health()) {
            Ok(envelope) => {
                let status = envelope.reason().unwrap_or("API is reachable").to_string();
                writeln!(self.out, "{} ({})", status, self.client.settings().base_url)?;
            }
            Err(err) => self
                .notifier
                .notify(&format!("API unreachable: {}", err.message), NotifyKind::Error),
        }
        Ok(())
    }

    pub fn admin_applications(&mut self, filters: &ApplicationFilters) -> Result<()> {
        let response = self.runtime.block_on(self.client.get_all_applications(filters));
        self.print_records(response, "No applications found.")
    }

    pub fn admin_application(&mut self, id: &str) -> Result<()> {
        match self.runtime.block_on(self.client.get_application_by_id(id)) {
            Ok(ApiEnvelope {
                data: Some(record), ..
            }) => writeln!(self.out, "{}", render::json_value(&record))?,
            Ok(envelope) => {
                let reason = envelope.reason().unwrap_or("Application not found").to_string();
                self.notifier.notify(&reason, NotifyKind::Error);
            }
            Err(err) => self.notifier.notify(&err.message, NotifyKind::Error),
        }
        Ok(())
    }

    pub fn admin_contacts(&mut self) -> Result<()> {
        let response = self.runtime.block_on(self.client.get_all_contacts());
        self.print_records(response, "No messages found.")
    }

    pub fn admin_create_job(&mut self, file: &Path) -> Result<()> {
        let text = fs::read_to_string(file)
            .with_context(|| format!("failed to read job description {}", file.display()))?;
        let job: Value = serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", file.display()))?;
        match self.runtime.block_on(self.client.create_job(&job)) {
            Ok(envelope) if envelope.success => {
                if let Some(job) = &envelope.data {
                    writeln!(self.out, "{}", render::job_card(job))?;
                }
                let text = envelope.reason().unwrap_or("Job created").to_string();
                self.notifier.notify(&text, NotifyKind::Success);
            }
            Ok(envelope) => {
                let reason = envelope.reason().unwrap_or("Failed to create job").to_string();
                self.notifier.notify(&reason, NotifyKind::Error);
            }
            Err(err) => self.notifier.notify(&err.message, NotifyKind::Error),
        }
        Ok(())
    }

    fn print_records(
        &mut self,
        response: Result<ApiEnvelope<Vec<Value>>, ApiError>,
        empty: &str,
    ) -> Result<()> {
        match response {
            Ok(envelope) => {
                let records = envelope.data.unwrap_or_default();
                if records.is_empty() {
                    writeln!(self.out, "{empty}")?;
                }
                for record in &records {
                    writeln!(self.out, "{}", render::json_value(record))?;
                }
            }
            Err(err) => self.notifier.notify(&err.message, NotifyKind::Error),
        }
        Ok(())
    }

    pub fn open_signup(&mut self) -> Result<()> {
        if let Some(page) = self.signup()? {
            self.open(page)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::{recording_notifier, Recorded, ScriptedPrompter, SharedOutput};
    use portal_engine::ApiSettings;
    use serde_json::json;
    use std::sync::Mutex;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Harness {
        portal: Portal,
        seen: Arc<Mutex<Recorded>>,
        screen: SharedOutput,
        _server: MockServer,
        _server_runtime: Runtime,
        _dir: TempDir,
    }

    fn harness(mocks: Vec<Mock>, answers: &[(&str, &str)], choices: &[&str]) -> Harness {
        let server_runtime = Runtime::new().unwrap();
        let server = server_runtime.block_on(async {
            let server = MockServer::start().await;
            for mock in mocks {
                mock.mount(&server).await;
            }
            server
        });
        let client =
            ReqwestApiClient::new(ApiSettings::with_base_url(format!("{}/api", server.uri())))
                .unwrap();
        let dir = TempDir::new().unwrap();
        let (notifier, seen) = recording_notifier(true, true);
        let screen = SharedOutput::default();
        let portal = Portal::new(
            client,
            dir.path(),
            notifier,
            Box::new(ScriptedPrompter::new(answers, choices)),
            Box::new(screen.clone()),
        )
        .unwrap();
        Harness {
            portal,
            seen,
            screen,
            _server: server,
            _server_runtime: server_runtime,
            _dir: dir,
        }
    }

    fn jobs_response(count: usize) -> ResponseTemplate {
        let jobs: Vec<Value> = (1..=count)
            .map(|n| json!({ "_id": format!("j{n}"), "title": format!("Job {n}") }))
            .collect();
        ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": jobs }))
    }

    #[test]
    fn home_page_shows_at_most_six_jobs() {
        let mocks = vec![Mock::given(method("GET"))
            .and(path("/api/jobs"))
            .respond_with(jobs_response(8))];
        let mut h = harness(mocks, &[], &[]);

        h.portal.open(Page::Home).unwrap();
        let screen = h.screen.text();
        assert!(screen.contains("Job 6  [j6]"));
        assert!(!screen.contains("Job 7"));

        h.portal.open(Page::Jobs).unwrap();
        assert!(h.screen.text().contains("Job 8  [j8]"));
    }

    #[test]
    fn invalid_sign_in_never_calls_the_api() {
        let mocks = vec![Mock::given(method("POST"))
            .and(path("/api/auth/signin"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)];
        let mut h = harness(mocks, &[("Username", "asha")], &[]);

        h.portal.open(Page::Login).unwrap();
        assert_eq!(
            h.seen.lock().unwrap().messages(),
            vec!["Please enter your password"]
        );
        assert!(!h.portal.store.is_logged_in());
    }

    #[test]
    fn anonymous_apply_goes_through_login_then_the_form() {
        let mocks = vec![
            Mock::given(method("GET"))
                .and(path("/api/jobs/j1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "success": true,
                    "data": { "_id": "j1", "title": "CNC Operator" }
                }))),
            Mock::given(method("POST"))
                .and(path("/api/auth/signin"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "success": true,
                    "message": "Login successful",
                    "data": {
                        "token": "tok-1",
                        "user": { "id": "u1", "username": "asha", "email": "asha@example.in" }
                    }
                }))),
            Mock::given(method("GET"))
                .and(path("/api/jobs"))
                .respond_with(jobs_response(1)),
        ];
        let mut h = harness(
            mocks,
            &[("Username", "asha"), ("Password", "secret123")],
            &["Quit"],
        );

        h.portal.apply_to_job("j1").unwrap();

        assert_eq!(
            h.seen.lock().unwrap().messages(),
            vec![LOGIN_REQUIRED_MESSAGE, "Login successful"]
        );
        assert!(h.portal.store.is_logged_in());
        assert_eq!(h.portal.store.take_redirect_after_login().unwrap(), None);
        assert_eq!(
            h.portal.store.selected_job().map(|job| job.title),
            Some("CNC Operator".to_string())
        );
        let screen = h.screen.text();
        assert!(screen.contains("Step 1 of 5: Personal Information"));
        assert!(screen.contains("Job 1  [j1]"), "quitting the form lands on home");
    }

    #[test]
    fn logout_clears_session_even_when_the_api_fails() {
        let mocks = vec![Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)];
        let mut h = harness(mocks, &[], &[]);
        h.portal
            .store
            .store_auth(&AuthData {
                token: "tok-1".to_string(),
                user: Default::default(),
            })
            .unwrap();

        h.portal.logout().unwrap();
        assert!(!h.portal.store.is_logged_in());
        assert_eq!(h.seen.lock().unwrap().messages(), vec![LOGOUT_MESSAGE]);
    }

    #[test]
    fn rejected_contact_shows_server_error() {
        let mocks = vec![Mock::given(method("POST"))
            .and(path("/api/contact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": "Too many messages"
            })))];
        let answers = [
            ("Name", "Ravi"),
            ("Email", "ravi@example.in"),
            ("Subject", "Hiring"),
            ("Message", "We have openings"),
        ];
        let mut h = harness(mocks, &answers, &[]);

        h.portal.contact().unwrap();
        assert_eq!(h.seen.lock().unwrap().messages(), vec!["Too many messages"]);
    }
}
