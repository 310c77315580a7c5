use clap::{Parser, Subcommand};

use mindgauge_common::TestType;

/// mindgauge — guided psychological self-assessments over GigaChat.
#[derive(Parser, Debug)]
#[command(name = "mindgauge", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a guided assessment dialogue.
    Test {
        /// Which assessment to run (e.g. personality, stress, advice).
        test_type: TestType,
    },
    /// Free-form chat with the assistant persona.
    Chat,
    /// List stored test results.
    History {
        /// Only show results of one test type.
        #[arg(long)]
        test_type: Option<TestType>,
    },
    /// Show one stored result in full.
    Show { id: u64 },
    /// Store the GigaChat authorization credential.
    Credential {
        /// The long-lived authorization key (base64 client id:secret).
        value: String,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
