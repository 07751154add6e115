//! SMTP courier implementation

use std::{fmt, time::Duration};

use clap::{Parser, ValueEnum};
use lettre::{transport::smtp::authentication::Credentials, Message, SmtpTransport, Transport};
use tracing::{debug, error, info};

use crate::domain::communication::mailer::{Mailer, MailerError};

/// How the connection to the SMTP server is secured
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TlsMode {
    /// Plain text connection
    #[default]
    None,

    /// Upgrade a plain connection with STARTTLS
    Starttls,

    /// TLS from the first byte
    Tls,
}

impl fmt::Display for TlsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Starttls => "starttls",
            Self::Tls => "tls",
        };

        write!(f, "{name}")
    }
}

/// SMTP configuration
#[derive(Clone, Debug, Parser)]
pub struct CourierConfig {
    /// The SMTP host
    #[clap(short = 'H', long, env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[clap(short = 'P', long, env = "SMTP_PORT")]
    pub port: u16,

    /// The SMTP username
    #[clap(short = 'u', long = "user-name", env = "SMTP_USER")]
    pub user: Option<String>,

    /// The SMTP password
    #[clap(short = 'p', long = "user-pwd", env = "SMTP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// How the connection is secured
    #[clap(long, env = "SMTP_TLS", value_enum, default_value_t = TlsMode::None)]
    pub tls: TlsMode,

    /// Connection timeout in seconds
    #[clap(long, env = "SMTP_TIMEOUT", default_value = "10")]
    pub timeout: u64,
}

impl CourierConfig {
    /// A plain text configuration for `host:port` with no credentials.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            user: None,
            password: None,
            tls: TlsMode::default(),
            timeout: 10,
        }
    }

    fn credentials(&self) -> Option<Credentials> {
        match (&self.user, &self.password) {
            (Some(user), Some(password)) => Some(Credentials::new(user.clone(), password.clone())),
            _ => None,
        }
    }
}

/// SMTP courier. Every delivery opens its own connection.
#[derive(Debug, Clone)]
pub struct SmtpCourier {
    config: CourierConfig,
}

impl SmtpCourier {
    /// Create a new SMTP courier
    pub fn new(config: CourierConfig) -> Self {
        Self { config }
    }

    /// The configuration this courier connects with.
    pub fn config(&self) -> &CourierConfig {
        &self.config
    }

    /// Build a non-pooled transport from the configuration
    pub fn transport(&self) -> Result<SmtpTransport, MailerError> {
        let host = self.config.host.as_str();

        let mut builder = match self.config.tls {
            TlsMode::None => SmtpTransport::builder_dangerous(host),
            TlsMode::Starttls => {
                SmtpTransport::starttls_relay(host).map_err(MailerError::Transport)?
            }
            TlsMode::Tls => SmtpTransport::relay(host).map_err(MailerError::Transport)?,
        };

        builder = builder
            .port(self.config.port)
            .timeout(Some(Duration::from_secs(self.config.timeout)));

        if let Some(credentials) = self.config.credentials() {
            builder = builder.credentials(credentials);
        }

        Ok(builder.build())
    }
}

impl Mailer for SmtpCourier {
    fn deliver(&self, message: &Message) -> Result<(), MailerError> {
        let transport = self.transport()?;

        debug!(
            host = %self.config.host,
            port = self.config.port,
            tls = %self.config.tls,
            "connecting to smtp server"
        );

        match transport.send(message) {
            Ok(response) => {
                info!(
                    host = %self.config.host,
                    code = %response.code(),
                    recipients = message.envelope().to().len(),
                    "email delivered"
                );

                Ok(())
            }
            Err(err) => {
                error!(host = %self.config.host, port = self.config.port, "smtp delivery failed: {err}");

                Err(MailerError::SendError(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn message() -> Result<Message, Box<dyn std::error::Error>> {
        Ok(Message::builder()
            .from("sender@email.com".parse()?)
            .to("receiver@email.com".parse()?)
            .subject("Hello")
            .body(String::from("Hi"))?)
    }

    #[test]
    fn test_config_from_args() -> TestResult {
        let config = CourierConfig::try_parse_from([
            "courier",
            "-H",
            "mail.example.com",
            "-P",
            "2525",
            "--user-name",
            "bob",
            "--user-pwd",
            "secret",
            "--tls",
            "starttls",
        ])?;

        assert_eq!(config.host, "mail.example.com");
        assert_eq!(config.port, 2525);
        assert_eq!(config.user.as_deref(), Some("bob"));
        assert_eq!(config.tls, TlsMode::Starttls);
        assert_eq!(config.timeout, 10);
        assert!(config.credentials().is_some());

        Ok(())
    }

    #[test]
    fn test_credentials_need_user_and_password() {
        let mut config = CourierConfig::new("localhost", 25);
        config.user = Some("bob".to_string());

        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_transport_for_every_tls_mode() -> TestResult {
        for tls in [TlsMode::None, TlsMode::Starttls, TlsMode::Tls] {
            let mut config = CourierConfig::new("localhost", 2525);
            config.tls = tls;

            SmtpCourier::new(config).transport()?;
        }

        Ok(())
    }

    #[test]
    fn test_unreachable_server_is_a_send_error() -> TestResult {
        let mut config = CourierConfig::new("127.0.0.1", 1);
        config.timeout = 1;

        let result = SmtpCourier::new(config).deliver(&message()?);

        assert!(matches!(result, Err(MailerError::SendError(_))));

        Ok(())
    }
}
