//! Blocking client: same surface and error taxonomy as [`crate::Ruobr`],
//! synchronous network I/O.

use crate::client::{create_blocking_client, Config};
use crate::error::Result;
use crate::models::{
    ControlmarksPeriod, FoodHistoryEntry, FoodInfo, Lesson, Letter, Mark, NewsItem, Progress, User,
};
use crate::response;
use crate::session::Account;
use crate::time::DateArg;
use serde_json::Value;
use std::collections::HashMap;

/// Blocking client for the diary API
#[derive(Clone)]
pub struct Ruobr {
    client: reqwest::blocking::Client,
    config: Config,
    account: Account,
}

impl Ruobr {
    /// Create a client for the production service
    pub fn new(username: &str, password: &str) -> Self {
        Self::with_config(username, password, Config::default())
    }

    /// Create a client pointed at a custom host (tests, mirrors)
    pub fn with_config(username: &str, password: &str, config: Config) -> Self {
        Ruobr {
            client: create_blocking_client(),
            config,
            account: Account::new(username, password),
        }
    }

    /// Account state: authentication, applicant/empty flags, children
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Record which child subsequent child-scoped calls refer to.
    /// No network call; all children were fetched in one response.
    pub fn select_child(&mut self, index: usize) {
        self.account.select_child(index);
    }

    /// Raw passthrough entry point: perform an authenticated GET against a
    /// relative target and return the envelope-checked JSON unchanged
    pub fn fetch(&self, target: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = self.config.endpoint_url(target, params)?;

        let start = std::time::Instant::now();
        let http_response = self
            .client
            .get(url)
            .header("username", self.account.credentials().username())
            .header("password", self.account.credentials().password())
            .send()?;
        let status = http_response.status().as_u16();
        let body = http_response.bytes()?;

        if self.config.debug {
            eprintln!(
                "[ruobr] GET {} => {:?} (status: {})",
                target,
                start.elapsed(),
                status
            );
        }

        response::interpret(status, &body)
    }

    fn ensure_authenticated(&mut self) -> Result<()> {
        if !self.account.is_authenticated() {
            let payload = self.fetch("user/", &[])?;
            self.account.absorb_user_payload(payload)?;
        }
        Ok(())
    }

    /// Selected-child id for child-scoped queries; fails with `NoChildren`
    /// before any request to the child-scoped endpoint is made
    fn child_param(&mut self) -> Result<(&'static str, String)> {
        self.ensure_authenticated()?;
        Ok(("child", self.account.selected_user()?.id.to_string()))
    }

    /// Authenticate if needed and return the selected child.
    /// Idempotent: a second call performs no network request.
    pub fn get_user(&mut self) -> Result<User> {
        self.ensure_authenticated()?;
        Ok(self.account.selected_user()?.clone())
    }

    /// All children of the account (one entry for student profiles)
    pub fn get_children(&mut self) -> Result<Vec<User>> {
        self.ensure_authenticated()?;
        Ok(self.account.children().unwrap_or_default().to_vec())
    }

    /// Drop the cached child list and authenticate again
    pub fn refresh(&mut self) -> Result<User> {
        self.account.reset();
        self.get_user()
    }

    /// Mailbox of the account
    pub fn get_mail(&mut self) -> Result<Vec<Letter>> {
        self.ensure_authenticated()?;
        let value = self.fetch("mail/", &[])?;
        response::convert(response::extract(value, "messages")?)
    }

    /// Mark a mail message as read
    pub fn read_message(&mut self, id: i64) -> Result<()> {
        self.ensure_authenticated()?;
        self.fetch("mail/read/", &[("message", id.to_string())])?;
        Ok(())
    }

    /// Period-end (quarterly) final grades
    pub fn get_controlmarks(&mut self) -> Result<Vec<ControlmarksPeriod>> {
        let child = self.child_param()?;
        let value = self.fetch("controlmark/", &[child])?;
        response::convert(value)
    }

    /// Full timetable for a date range
    pub fn get_timetable(
        &mut self,
        start: impl Into<DateArg>,
        end: impl Into<DateArg>,
    ) -> Result<Vec<Lesson>> {
        let child = self.child_param()?;
        let value = self.fetch(
            "timetable/",
            &[
                ("start", start.into().format()),
                ("end", end.into().format()),
                child,
            ],
        )?;
        response::convert(response::extract(value, "lessons")?)
    }

    /// Timetable filtered down to lessons carrying an assignment
    pub fn get_homework(
        &mut self,
        start: impl Into<DateArg>,
        end: impl Into<DateArg>,
    ) -> Result<Vec<Lesson>> {
        let timetable = self.get_timetable(start, end)?;
        Ok(timetable
            .into_iter()
            .filter(|lesson| lesson.task.is_some())
            .collect())
    }

    /// Class ranking and averages for a given date (usually today)
    pub fn get_progress(&mut self, date: impl Into<DateArg>) -> Result<Progress> {
        let child = self.child_param()?;
        let value = self.fetch("progress/", &[child, ("date", date.into().format())])?;
        response::convert(value)
    }

    /// Marks for a date range, grouped by subject name
    pub fn get_marks(
        &mut self,
        start: impl Into<DateArg>,
        end: impl Into<DateArg>,
    ) -> Result<HashMap<String, Vec<Mark>>> {
        let child = self.child_param()?;
        let value = self.fetch(
            "mark/",
            &[
                child,
                ("start", start.into().format()),
                ("end", end.into().format()),
            ],
        )?;
        response::convert(response::extract(value, "subjects")?)
    }

    /// Absence records for a date range, grouped by subject name
    pub fn get_attendance(
        &mut self,
        start: impl Into<DateArg>,
        end: impl Into<DateArg>,
    ) -> Result<HashMap<String, Vec<String>>> {
        let child = self.child_param()?;
        let value = self.fetch(
            "attendance/",
            &[
                child,
                ("start", start.into().format()),
                ("end", end.into().format()),
            ],
        )?;
        response::convert(response::extract(value, "subjects")?)
    }

    /// Cafeteria account balance
    pub fn get_food_info(&mut self) -> Result<FoodInfo> {
        let child = self.child_param()?;
        let value = self.fetch("food/", &[child])?;
        response::convert(response::extract(value, "account")?)
    }

    /// Cafeteria history, usually queried for the whole school year
    pub fn get_food_history(
        &mut self,
        start: impl Into<DateArg>,
        end: impl Into<DateArg>,
    ) -> Result<Vec<FoodHistoryEntry>> {
        let child = self.child_param()?;
        let value = self.fetch(
            "food/history/",
            &[
                child,
                ("end", end.into().format()),
                ("start", start.into().format()),
            ],
        )?;
        response::convert(response::extract(value, "events")?)
    }

    /// School news feed
    pub fn get_news(&mut self) -> Result<Vec<NewsItem>> {
        self.ensure_authenticated()?;
        let value = self.fetch("news/", &[])?;
        response::convert(value)
    }

    /// Achievements list. The service does not document the payload shape,
    /// so it is returned as an opaque JSON value
    pub fn get_achievements(&mut self) -> Result<Value> {
        let child = self.child_param()?;
        let value = self.fetch("achievements/", &[child])?;
        response::extract(value, "data")
    }

    /// Events feed, returned as an opaque JSON value
    pub fn get_events(&mut self) -> Result<Value> {
        let child = self.child_param()?;
        self.fetch("btm/", &[child])
    }

    /// Library loans, returned as an opaque JSON value
    pub fn get_books(&mut self) -> Result<Value> {
        let child = self.child_param()?;
        let value = self.fetch("book/", &[child])?;
        response::extract(value, "data")
    }

    /// Remedial-plan ("ios") links, returned as an opaque JSON value
    pub fn get_ios(&mut self) -> Result<Value> {
        let child = self.child_param()?;
        let value = self.fetch("ios/", &[child])?;
        response::extract(value, "data")
    }

    /// Link to the homework detail page. A documentation URL, not an API
    /// call: the page needs no authentication
    pub fn homework_url(id: i64, kind: &str) -> String {
        crate::Ruobr::homework_url(id, kind)
    }
}
