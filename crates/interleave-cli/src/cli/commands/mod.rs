use super::args::*;

pub(crate) mod input;
pub mod judge_config;
pub mod prompt;
pub mod score;

use crate::exit_codes;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Score(args) => score::run(args).await,
        Command::Prompt(args) => prompt::run(args),
        Command::JudgeConfig(args) => judge_config::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}
