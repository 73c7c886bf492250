//! `echo [-v] WORDS...`

use async_trait::async_trait;

use crate::application::console::CommandHandler;
use crate::application::error::CommandError;
use crate::application::ports::{CancelPredicate, OutputSink};
use crate::domain::options::split_options;

pub struct EchoCommand;

#[async_trait]
impl CommandHandler for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn run(
        &self,
        out: &mut dyn OutputSink,
        args: &[String],
        _cancel: &dyn CancelPredicate,
    ) -> Result<(), CommandError> {
        let parsed = split_options(args, &["-v"]);

        if parsed.has("-v") {
            for (idx, word) in parsed.positionals.iter().enumerate() {
                out.write_line_fmt(format_args!("[{}] {}", idx + 1, word));
            }
        } else {
            out.write_line(&parsed.positionals.join(" "));
        }
        Ok(())
    }
}
