//! Outbound email for sign-up confirmations.
//!
//! When `SMTP_URL` is configured the confirmation link is mailed via
//! lettre; otherwise the link is logged so local development works
//! without a mail server. Sending is best-effort: a transport failure is
//! logged and surfaced to tracing, never turned into a sign-up failure,
//! since the account row already exists and the link can be re-issued.

use lettre::message::Mailbox;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Confirmation mailer. Holds an SMTP transport when one is configured.
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
}

impl Mailer {
    /// Build the mailer from `SMTP_URL` and `SMTP_FROM`.
    ///
    /// Both must be set to enable real delivery; otherwise the mailer
    /// runs in log-only mode.
    ///
    /// # Panics
    ///
    /// Panics if a provided `SMTP_URL` or `SMTP_FROM` is malformed --
    /// misconfiguration should fail at startup, not at first sign-up.
    pub fn from_env() -> Self {
        let url = std::env::var("SMTP_URL").ok();
        let from = std::env::var("SMTP_FROM").ok();

        match (url, from) {
            (Some(url), Some(from)) => {
                let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(&url)
                    .unwrap_or_else(|e| panic!("Invalid SMTP_URL: {e}"))
                    .build();
                let from = from
                    .parse()
                    .unwrap_or_else(|e| panic!("Invalid SMTP_FROM address: {e}"));
                Self {
                    transport: Some(transport),
                    from: Some(from),
                }
            }
            _ => Self {
                transport: None,
                from: None,
            },
        }
    }

    /// A mailer that never sends; integration tests use this.
    pub fn disabled() -> Self {
        Self {
            transport: None,
            from: None,
        }
    }

    /// Send the confirmation link to a freshly registered address.
    pub async fn send_confirmation(&self, to: &str, link: &str) {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            tracing::info!(email = %to, %link, "SMTP not configured; confirmation link logged");
            return;
        };

        let to_mailbox: Mailbox = match to.parse() {
            Ok(mb) => mb,
            Err(e) => {
                tracing::error!(email = %to, error = %e, "Invalid recipient address");
                return;
            }
        };

        let message = Message::builder()
            .from(from.clone())
            .to(to_mailbox)
            .subject("Confirm your CodeProgress account")
            .body(format!(
                "Welcome to CodeProgress!\n\n\
                 Please confirm your account before signing in:\n\n{link}\n"
            ));

        let message = match message {
            Ok(m) => m,
            Err(e) => {
                tracing::error!(email = %to, error = %e, "Failed to build confirmation email");
                return;
            }
        };

        if let Err(e) = transport.send(message).await {
            tracing::error!(email = %to, error = %e, "Failed to send confirmation email");
        } else {
            tracing::info!(email = %to, "Confirmation email sent");
        }
    }
}
