//! `filter show` / `filter ban TARGET`

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::application::console::CommandHandler;
use crate::application::error::CommandError;
use crate::application::ports::{CancelPredicate, FilterTable, OutputSink};

pub struct FilterCommand {
    table: Arc<dyn FilterTable>,
}

impl FilterCommand {
    pub fn new(table: Arc<dyn FilterTable>) -> Self {
        Self { table }
    }
}

#[async_trait]
impl CommandHandler for FilterCommand {
    fn name(&self) -> &'static str {
        "filter"
    }

    async fn run(
        &self,
        out: &mut dyn OutputSink,
        args: &[String],
        _cancel: &dyn CancelPredicate,
    ) -> Result<(), CommandError> {
        let Some(subcommand) = args.first() else {
            out.write_line("Usage: filter show");
            out.write_line("       filter ban TARGET");
            return Ok(());
        };

        match subcommand.as_str() {
            "show" => {
                for filter in self.table.snapshot() {
                    out.write_line(&filter.render_line());
                }
            }
            "ban" => {
                let [_, target] = args else {
                    out.write_line("Usage: filter ban TARGET");
                    return Ok(());
                };
                let filter = self.table.ban(target);
                info!(pattern = %filter.pattern, "filter ban added from console");
                out.write_line_fmt(format_args!("Banned {}", filter.pattern));
            }
            other => out.write_line_fmt(format_args!("Unknown subcommand '{other}'")),
        }
        Ok(())
    }
}
