//! Per-visitor UI state: display locale, search box and newsletter form.
//!
//! One `SessionContext` belongs to one browsing session and is passed to the
//! operations that need it. Nothing here is shared between sessions.

use crate::core::site::SiteContent;
use crate::core::ContentSource;
use crate::domain::model::Locale;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl SubscriptionState {
    pub fn start(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.success = false;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.error = Some(message.into());
        self.success = false;
    }

    pub fn succeed(&mut self) {
        self.is_loading = false;
        self.error = None;
        self.success = true;
        self.submitted_at = Some(Utc::now());
    }

}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    locale: Locale,
    search_query: String,
    subscription: SubscriptionState,
}

impl SessionContext {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        if locale != self.locale {
            tracing::debug!("Switching locale {} -> {}", self.locale, locale);
        }
        self.locale = locale;
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn subscription(&self) -> &SubscriptionState {
        &self.subscription
    }

    /// Runs the newsletter signup and records the outcome in the form state.
    pub async fn subscribe<S: ContentSource>(&mut self, site: &SiteContent<S>, email: &str) -> bool {
        self.subscription.start();
        match site.subscribe(email).await {
            Ok(_) => {
                self.subscription.succeed();
                true
            }
            Err(e) => {
                self.subscription.fail(e.user_friendly_message());
                false
            }
        }
    }
}
