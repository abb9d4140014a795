//! Human-readable message generation.
//!
//! Reminder bodies and encouragement text come from a remote
//! text-generation service when one is configured. Every call degrades to a
//! fixed, category-specific fallback on any failure -- network errors,
//! non-success statuses, malformed bodies, timeouts -- so callers never see
//! an error and never block past the request timeout.

pub mod catalog;
pub mod greeting;

pub use catalog::{MotivationCatalog, MotivationCategory};
pub use greeting::{greeting, Greeting};

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::goal::Project;

/// Category of generated notification text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    TaskReminder,
    DailyFocus,
    GoalDeadline,
}

impl MessageCategory {
    /// Wire identifier, also used as the notification tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageCategory::TaskReminder => "task_reminder",
            MessageCategory::DailyFocus => "daily_focus",
            MessageCategory::GoalDeadline => "goal_deadline",
        }
    }
}

/// Free-form context shipped with a generation request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageContext {
    #[serde(rename = "taskTitle", skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,
    #[serde(rename = "projectTitle", skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
}

impl MessageContext {
    pub fn for_task(task_title: &str, project_title: &str) -> Self {
        Self {
            task_title: Some(task_title.to_string()),
            project_title: Some(project_title.to_string()),
        }
    }

    pub fn for_project(project_title: &str) -> Self {
        Self {
            task_title: None,
            project_title: Some(project_title.to_string()),
        }
    }
}

/// The deterministic fallback text for a category.
pub fn fallback_message(category: MessageCategory, context: &MessageContext) -> String {
    match category {
        MessageCategory::TaskReminder => match &context.task_title {
            Some(title) => format!("Time to focus on \"{title}\""),
            None => "Stay focused on your goals!".to_string(),
        },
        MessageCategory::DailyFocus => "Ready to tackle your goals today?".to_string(),
        MessageCategory::GoalDeadline => match &context.project_title {
            Some(title) => format!("\"{title}\" deadline is approaching!"),
            None => "Stay focused on your goals!".to_string(),
        },
    }
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

/// Client for the remote text-generation collaborator.
///
/// An empty endpoint disables remote calls entirely; everything resolves to
/// the fallback text.
pub struct MessageProvider {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl MessageProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(5))
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Generate a notification body for `category`.
    ///
    /// Never fails; any remote problem yields [`fallback_message`].
    pub async fn notification_message(
        &self,
        category: MessageCategory,
        context: &MessageContext,
    ) -> String {
        if self.endpoint.is_empty() {
            return fallback_message(category, context);
        }
        match self.invoke("generate-notification-message", &json!({
            "type": category.as_str(),
            "context": context,
        })).await {
            Ok(message) if !message.trim().is_empty() => message,
            Ok(_) => fallback_message(category, context),
            Err(e) => {
                tracing::warn!(category = category.as_str(), error = %e, "message generation failed, using fallback");
                fallback_message(category, context)
            }
        }
    }

    /// Generate the daily encouragement line from the user's name and a
    /// per-project progress summary.
    pub async fn daily_encouragement(&self, user_name: &str, projects: &[Project]) -> String {
        let fallback = format!(
            "Keep pushing forward, {user_name}! Every small step counts toward your goals."
        );
        if self.endpoint.is_empty() {
            return fallback;
        }

        let summary: Vec<serde_json::Value> = projects
            .iter()
            .map(|p| {
                json!({
                    "title": p.title,
                    "progress": p.progress,
                    "deadline": p.deadline,
                    "tasksCount": p.tasks.len(),
                    "completedTasks": p.completed_task_count(),
                })
            })
            .collect();

        match self.invoke("generate-daily-encouragement", &json!({
            "userName": user_name,
            "projects": summary,
        })).await {
            Ok(message) if !message.trim().is_empty() => message,
            Ok(_) => fallback,
            Err(e) => {
                tracing::warn!(error = %e, "encouragement generation failed, using fallback");
                fallback
            }
        }
    }

    async fn invoke(
        &self,
        function: &str,
        body: &serde_json::Value,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/{}", self.endpoint, function);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        let parsed: MessageResponse = response.json().await?;
        Ok(parsed.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallbacks_are_category_appropriate() {
        let context = MessageContext::for_task("Outline", "Write a book");
        assert_eq!(
            fallback_message(MessageCategory::TaskReminder, &context),
            "Time to focus on \"Outline\""
        );
        assert_eq!(
            fallback_message(MessageCategory::DailyFocus, &MessageContext::default()),
            "Ready to tackle your goals today?"
        );
        assert_eq!(
            fallback_message(
                MessageCategory::GoalDeadline,
                &MessageContext::for_project("Write a book")
            ),
            "\"Write a book\" deadline is approaching!"
        );
        // Missing context still yields non-empty text.
        assert!(!fallback_message(MessageCategory::TaskReminder, &MessageContext::default())
            .is_empty());
    }

    #[tokio::test]
    async fn remote_message_is_used_on_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/generate-notification-message")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"Go write that outline."}"#)
            .create_async()
            .await;

        let provider = MessageProvider::new(server.url());
        let body = provider
            .notification_message(
                MessageCategory::TaskReminder,
                &MessageContext::for_task("Outline", "Write a book"),
            )
            .await;

        assert_eq!(body, "Go write that outline.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate-notification-message")
            .with_status(500)
            .create_async()
            .await;

        let provider = MessageProvider::new(server.url());
        let body = provider
            .notification_message(
                MessageCategory::TaskReminder,
                &MessageContext::for_task("Outline", "Write a book"),
            )
            .await;

        assert_eq!(body, "Time to focus on \"Outline\"");
    }

    #[tokio::test]
    async fn malformed_body_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate-notification-message")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let provider = MessageProvider::new(server.url());
        let body = provider
            .notification_message(MessageCategory::DailyFocus, &MessageContext::default())
            .await;

        assert_eq!(body, "Ready to tackle your goals today?");
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back() {
        // Nothing listens on this port; connection fails fast.
        let provider = MessageProvider::with_timeout(
            "http://127.0.0.1:1",
            Duration::from_millis(200),
        );
        let body = provider
            .notification_message(
                MessageCategory::GoalDeadline,
                &MessageContext::for_project("Write a book"),
            )
            .await;

        assert_eq!(body, "\"Write a book\" deadline is approaching!");
    }

    #[tokio::test]
    async fn empty_endpoint_never_calls_out() {
        let provider = MessageProvider::new("");
        let body = provider
            .notification_message(MessageCategory::DailyFocus, &MessageContext::default())
            .await;
        assert_eq!(body, "Ready to tackle your goals today?");

        let encouragement = provider.daily_encouragement("sam", &[]).await;
        assert!(encouragement.starts_with("Keep pushing forward, sam!"));
    }
}
