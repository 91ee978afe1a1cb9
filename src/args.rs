use clap::Parser;

use crate::config::DEFAULT_MAX_CONTENT_LEN;

/// Interactive editor for an account ledger stored in a gist.
///
/// The remote store is configured through the environment:
/// GISTBANK_API_URL, GISTBANK_TOKEN and GISTBANK_FILE.
#[derive(Parser, Debug)]
pub struct Args {
    /// Upper bound in bytes for the uploaded ledger text
    #[clap(long, default_value_t = DEFAULT_MAX_CONTENT_LEN)]
    pub max_content_len: usize,
}

pub fn parse() -> Args {
    Args::parse()
}
