//! # ruobr - Ruobr electronic diary client for Rust
//!
//! A typed client for the Ruobr school-diary web service, exposing
//! student/parent account data (grades, timetable, mail, food balance,
//! news) through thin request wrappers in both blocking and async flavors.
//!
//! ## Features
//!
//! - Blocking and async clients with identical surfaces and errors
//! - Lazy, cached authentication (one `user/` request per account)
//! - Parent ("applicant") profiles with child selection
//! - Strict typed mapping of responses, with a raw JSON passthrough
//! - Closed error taxonomy for the service's ad-hoc success/error envelope
//!
//! ## Basic Usage
//!
//! ```no_run
//! use ruobr::blocking::Ruobr;
//!
//! fn main() -> ruobr::Result<()> {
//!     let mut diary = Ruobr::new("username", "password");
//!
//!     let user = diary.get_user()?;
//!     println!("{} {} ({})", user.last_name, user.first_name, user.group);
//!
//!     for period in diary.get_controlmarks()? {
//!         println!("{}: {} marks", period.title, period.marks.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Async Usage
//!
//! The async client has the same methods; clone it after authenticating to
//! fan independent requests out concurrently:
//!
//! ```no_run
//! use ruobr::Ruobr;
//!
//! # async fn example() -> ruobr::Result<()> {
//! let mut diary = Ruobr::new("username", "password");
//! diary.get_user().await?;
//!
//! let mut a = diary.clone();
//! let mut b = diary.clone();
//! let (mail, news) = tokio::try_join!(a.get_mail(), b.get_news())?;
//! println!("{} letters, {} news items", mail.len(), news.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`RuobrError`]: rejected credentials, a
//! `success: false` envelope, a non-JSON body, an empty account on a
//! child-scoped call, or a response that does not fit the typed records.
//! The library never retries; callers decide what to do.
//!
//! Credentials travel base64-encoded in two custom headers. This is the
//! wire format the service expects, not encryption.

pub mod blocking;
pub mod client;
pub mod credentials;
pub mod diary;
pub mod error;
pub mod models;
pub mod response;
pub mod session;
pub mod time;

// Re-export main types for convenience
pub use client::Config;
pub use credentials::Credentials;
pub use diary::Ruobr;
pub use error::{Result, RuobrError};
pub use models::{
    ControlmarksPeriod, FoodHistoryEntry, FoodInfo, Lesson, Letter, Mark, NewsItem, Progress,
    ProgressSubject, Task, User,
};
pub use session::{Account, Auth};
pub use time::DateArg;
