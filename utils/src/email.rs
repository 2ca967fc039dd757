use crate::config::{Env, SmtpConfig};
use crate::log::LogTarget;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid address {address:?}: {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("{0}")]
    Message(#[from] lettre::error::Error),

    #[error("{0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("message could not be delivered to any of {0} recipients")]
    NoneDelivered(usize),
}

fn parse_mailbox(address: &str) -> Result<lettre::message::Mailbox, Error> {
    address.parse().map_err(|source| Error::Address {
        address: address.to_string(),
        source,
    })
}

/// Every subject is tagged with the environment it was sent from.
pub fn subject_line(env: Env, subject: &str) -> String {
    format!("{} | {}", env, subject)
}

/// Sends `html` to every configured recipient, one message each.
///
/// A failed recipient is logged and skipped. Returns the number delivered;
/// it is an error only if nobody got the message.
pub fn send_email(smtp: &SmtpConfig, subject: &str, html: String) -> Result<usize, Error> {
    let from = parse_mailbox(&smtp.from)?;

    let mailer = SmtpTransport::starttls_relay(&smtp.host)?
        .port(smtp.port)
        .credentials(Credentials::new(
            smtp.username.clone(),
            smtp.password.clone(),
        ))
        .build();

    let mut delivered = 0;
    for to in &smtp.to {
        let result = parse_mailbox(to).and_then(|mailbox| {
            let message = Message::builder()
                .from(from.clone())
                .to(mailbox)
                .subject(subject)
                .header(ContentType::TEXT_HTML)
                .body(html.clone())?;
            mailer.send(&message)?;
            Ok(())
        });

        match result {
            Ok(()) => {
                delivered += 1;
                info!(target: LogTarget::Notifier.as_str(), "Message sent to {}", to);
            }
            Err(e) => {
                error!(target: LogTarget::Notifier.as_str(), "Sending to {} failed: {}", to, e)
            }
        }
    }

    if delivered == 0 {
        return Err(Error::NoneDelivered(smtp.to.len()));
    }

    Ok(delivered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_is_prefixed_with_env() {
        assert_eq!(subject_line(Env::Prod, "Revenue report"), "prod | Revenue report");
        assert_eq!(subject_line(Env::Dev, "Revenue report"), "dev | Revenue report");
        assert_eq!(subject_line(Env::Uat, "Revenue report"), "uat | Revenue report");
    }

    #[test]
    fn bad_sender_address_is_reported() {
        let smtp = SmtpConfig {
            host: "localhost".to_string(),
            port: 2525,
            username: "u".to_string(),
            password: "p".to_string(),
            from: "not an address".to_string(),
            to: vec!["ops@example.com".to_string()],
        };

        let err = send_email(&smtp, "subject", "<p>hi</p>".to_string()).unwrap_err();
        assert!(matches!(err, Error::Address { .. }));
    }
}
