#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command line interface for sending emails

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use courier::{
    deliver,
    domain::communication::scribe::TemplateType,
    infrastructure::email::smtp::CourierConfig,
    EnvelopeParams, MessageParams, Parameters,
};
use tracing::debug;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[command(name = "courier", version, about = "Send templated emails over SMTP")]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one email
    Send(SendCmd),
}

/// Arguments of the `send` command
#[derive(Debug, clap::Args)]
pub struct SendCmd {
    /// The SMTP connection
    #[clap(flatten)]
    pub courier: CourierConfig,

    /// The sender address
    #[clap(short = 'F', long)]
    pub send_from: String,

    /// The reply-to address
    #[clap(long, default_value = "")]
    pub reply_to: String,

    /// Recipient addresses
    #[clap(short = 'T', long)]
    pub send_to: Vec<String>,

    /// Carbon copy addresses
    #[clap(short = 'C', long)]
    pub send_cc: Vec<String>,

    /// Blind carbon copy addresses
    #[clap(short = 'B', long)]
    pub send_bcc: Vec<String>,

    /// Mark the email as high priority
    #[clap(long)]
    pub high_priority: bool,

    /// The subject template
    #[clap(short = 'S', long, default_value = "")]
    pub subject: String,

    /// Treat the message as HTML
    #[clap(long)]
    pub html: bool,

    /// How the subject and message are rendered
    #[clap(short = 't', long, value_enum, default_value_t = TemplateType::None)]
    pub template: TemplateType,

    /// Template values as key=value
    #[clap(long = "params", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Files to attach
    #[clap(short = 'A', long = "attach", value_parser = existing_file)]
    pub attachments: Vec<PathBuf>,

    /// The message template, or a path to a file containing it
    pub message: String,
}

impl SendCmd {
    /// Converts the arguments into delivery parameters.
    pub fn into_parameters(self) -> Parameters {
        let mut params = Parameters {
            courier: self.courier,
            envelope: EnvelopeParams {
                send_from: self.send_from,
                reply_to: self.reply_to,
                send_to: self.send_to,
                send_cc: self.send_cc,
                send_bcc: self.send_bcc,
            },
            message: MessageParams {
                high_priority: self.high_priority,
                subject: self.subject,
                template_type: self.template,
                attachments: self.attachments,
                ..MessageParams::default()
            },
        };

        params.set_message(self.message, self.html);
        params.set_template_data(self.params);

        params
    }
}

fn parse_key_val(value: &str) -> Result<(String, String), String> {
    let (key, val) = value
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value: no `=` found in '{value}'"))?;

    if key.trim().is_empty() {
        return Err(format!("invalid key=value: empty key in '{value}'"));
    }

    Ok((key.trim().to_string(), val.to_string()))
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);

    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("'{value}' is not an existing file"))
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Send(cmd) => {
            let params = cmd.into_parameters();
            params.validate()?;

            debug!(host = %params.courier.host, port = params.courier.port, "sending email");

            deliver(&params)?;
        }
    }

    Ok(())
}

#[mutants::skip]
fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
