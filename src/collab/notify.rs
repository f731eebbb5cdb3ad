//! Milestone notifications — outbound email via SMTP.
//!
//! Notifications are best-effort side effects: the engine fires them after
//! the state change has already been persisted, and a delivery failure is
//! logged rather than surfaced to the user.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::error::NotifyError;

const CONSISTENCY_CHALLENGE_DAYS: u32 = 30;

/// A milestone worth telling the user about, with everything needed to
/// render the message.
///
/// The engine fires `Welcome` and `Checkpoint` itself. `DailyTip` and
/// `ConsistencyReminder` are rendered here but fired by an external
/// scheduler; this crate only defines the templates and the transport.
#[derive(Debug, Clone)]
pub enum Milestone {
    /// First session: the program greets the user.
    Welcome { name: String },
    /// A card was completed.
    Checkpoint {
        name: String,
        checkpoint: String,
        next_step: String,
    },
    /// A standalone tip, sent on a schedule outside the engine.
    DailyTip { name: String, tip: String },
    /// Progress nudge during the consistency challenge.
    ConsistencyReminder {
        name: String,
        days_completed: u32,
        days_remaining: u32,
    },
}

impl Milestone {
    pub fn subject(&self) -> String {
        match self {
            Milestone::Welcome { .. } => "Welcome to the program".to_string(),
            Milestone::Checkpoint { checkpoint, .. } => {
                format!("Checkpoint complete: {checkpoint}")
            }
            Milestone::DailyTip { .. } => "Tip of the day".to_string(),
            Milestone::ConsistencyReminder { days_completed, .. } => {
                format!("You've completed {days_completed} days. Keep going!")
            }
        }
    }

    pub fn body(&self) -> String {
        match self {
            Milestone::Welcome { name } => format!(
                "Hi {name},\n\n\
                 You just joined a community of creators rebuilding their \
                 routines around strategy.\n\n\
                 Next steps:\n\
                 1. Open the program\n\
                 2. Pick your goal (UGC, influencer, viral or seller)\n\
                 3. Start your first protocol\n\n\
                 The system is waiting. It will walk you through every step."
            ),
            Milestone::Checkpoint {
                name,
                checkpoint,
                next_step,
            } => format!(
                "Congratulations, {name}!\n\n\
                 You just completed an important checkpoint:\n\n\
                 {checkpoint}\n\n\
                 Next step: {next_step}\n\n\
                 You are on the right track. Keep going."
            ),
            Milestone::DailyTip { name, tip } => format!(
                "Hi {name},\n\n{tip}\n\nApply this today and watch the difference."
            ),
            Milestone::ConsistencyReminder {
                name,
                days_completed,
                days_remaining,
            } => {
                let percent = (f64::from(*days_completed)
                    / f64::from(CONSISTENCY_CHALLENGE_DAYS)
                    * 100.0)
                    .round() as u32;
                format!(
                    "Hi {name},\n\n\
                     You have completed {days_completed} days of your \
                     consistency challenge. Progress: {percent}%.\n\
                     {days_remaining} days left.\n\n\
                     Don't stop now."
                )
            }
        }
    }
}

/// Outbound notification seam.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, to: &str, milestone: &Milestone) -> Result<(), NotifyError>;
}

/// Notifier that drops everything. Used when no SMTP config is present.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, _to: &str, milestone: &Milestone) -> Result<(), NotifyError> {
        tracing::debug!("Notification suppressed (no SMTP config): {}", milestone.subject());
        Ok(())
    }
}

// ── SMTP ────────────────────────────────────────────────────────────

/// SMTP configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

impl SmtpConfig {
    /// Build config from environment variables.
    /// Returns `None` if `GROWTH_OS_SMTP_HOST` is not set (notifications disabled).
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("GROWTH_OS_SMTP_HOST").ok()?;

        let port: u16 = std::env::var("GROWTH_OS_SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);

        let username = std::env::var("GROWTH_OS_SMTP_USERNAME").unwrap_or_default();
        let password = std::env::var("GROWTH_OS_SMTP_PASSWORD").unwrap_or_default();
        let from_address =
            std::env::var("GROWTH_OS_SMTP_FROM").unwrap_or_else(|_| username.clone());

        Some(Self {
            host,
            port,
            username,
            password,
            from_address,
        })
    }
}

/// Notifier that delivers milestones over SMTP.
pub struct SmtpNotifier {
    config: SmtpConfig,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let creds = Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );

        let transport = SmtpTransport::relay(&self.config.host)
            .map_err(|e| NotifyError::Transport(format!("SMTP relay error: {e}")))?
            .port(self.config.port)
            .credentials(creds)
            .build();

        let email = Message::builder()
            .from(
                self.config
                    .from_address
                    .parse()
                    .map_err(|e| NotifyError::InvalidAddress(format!("from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| NotifyError::InvalidAddress(format!("to address: {e}")))?)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| NotifyError::Build(format!("failed to build email: {e}")))?;

        transport
            .send(&email)
            .map_err(|e| NotifyError::Transport(format!("SMTP send failed: {e}")))?;

        tracing::info!("Notification sent to {to}: {subject}");
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, to: &str, milestone: &Milestone) -> Result<(), NotifyError> {
        self.send_email(to, &milestone.subject(), &milestone.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_subject_names_the_checkpoint() {
        let m = Milestone::Checkpoint {
            name: "Ada".into(),
            checkpoint: "VECTOR TRIANGULATION".into(),
            next_step: "Open the next protocol".into(),
        };
        assert_eq!(m.subject(), "Checkpoint complete: VECTOR TRIANGULATION");
        assert!(m.body().contains("Ada"));
        assert!(m.body().contains("Open the next protocol"));
    }

    #[test]
    fn consistency_reminder_reports_rounded_percent() {
        let m = Milestone::ConsistencyReminder {
            name: "Ada".into(),
            days_completed: 10,
            days_remaining: 20,
        };
        assert!(m.body().contains("33%"));
        assert!(m.body().contains("20 days left"));
        assert_eq!(m.subject(), "You've completed 10 days. Keep going!");
    }

    #[test]
    fn welcome_body_lists_personas() {
        let m = Milestone::Welcome { name: "Ada".into() };
        let body = m.body();
        for goal in ["UGC", "influencer", "viral", "seller"] {
            assert!(body.contains(goal), "missing {goal}");
        }
    }

    #[tokio::test]
    async fn null_notifier_always_succeeds() {
        let n = NullNotifier;
        let m = Milestone::DailyTip {
            name: "Ada".into(),
            tip: "Post before noon.".into(),
        };
        assert!(n.notify("nobody@example.com", &m).await.is_ok());
    }

    #[test]
    fn smtp_config_from_env_returns_none_when_no_host() {
        // SAFETY: test-local variable, no concurrent reader.
        unsafe { std::env::remove_var("GROWTH_OS_SMTP_HOST") };
        assert!(SmtpConfig::from_env().is_none());
    }
}
