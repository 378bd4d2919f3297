//! Mail transport
//!
//! [`Mailer`] is the seam between notification content and delivery.
//! Production uses AWS SES; deployments without SES credentials fall back to
//! [`NoopMailer`], which logs and drops. Tests plug in their own recorder.

use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use thiserror::Error;

/// Mail transport failure. Only ever logged — never surfaced to callers of
/// the lifecycle engines.
#[derive(Debug, Error)]
#[error("mail transport error: {0}")]
pub struct MailError(pub String);

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, from: &str, to: &str, subject: &str, body: &str)
    -> Result<(), MailError>;
}

/// AWS SES transport
pub struct SesMailer {
    client: SesClient,
}

impl SesMailer {
    /// Build from ambient AWS credentials; `region` overrides the default
    /// resolution when SES lives in a different region than the rest.
    pub async fn from_env(region: Option<String>) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = if let Some(region) = region {
            let ses_config = aws_config
                .to_builder()
                .region(aws_config::Region::new(region))
                .build();
            SesClient::new(&ses_config)
        } else {
            SesClient::new(&aws_config)
        };
        Self { client }
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), MailError> {
        let subject = Content::builder()
            .data(subject)
            .build()
            .map_err(|e| MailError(e.to_string()))?;

        let text = Content::builder()
            .data(body)
            .build()
            .map_err(|e| MailError(e.to_string()))?;
        let body = Body::builder().text(text).build();

        let message = Message::builder().subject(subject).body(body).build();

        self.client
            .send_email()
            .from_email_address(from)
            .destination(Destination::builder().to_addresses(to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| MailError(e.to_string()))?;

        Ok(())
    }
}

/// Transport that logs instead of sending (development / no SES configured)
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(
        &self,
        _from: &str,
        to: &str,
        subject: &str,
        _body: &str,
    ) -> Result<(), MailError> {
        tracing::debug!(to, subject, "Mail transport disabled, dropping email");
        Ok(())
    }
}
