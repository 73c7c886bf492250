//! 명령 디스패치 테이블.
//!
//! 명령줄을 토큰화하고 첫 토큰으로 핸들러를 찾아 실행한다.
//! 모델링된 오류는 전부 이 경계에서 `Error: ...` 한 줄로 바뀐다.

mod handler;
mod sink;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::application::ports::{CancelPredicate, OutputSink};
use crate::domain::tokenizer::tokenize;

pub use handler::CommandHandler;
pub use sink::MemorySink;

/// 이름 → 핸들러 고정 매핑. 생성 후에는 변경하지 않으며 여러 세션이 공유한다.
#[derive(Clone, Default)]
pub struct Console {
    commands: BTreeMap<&'static str, Arc<dyn CommandHandler>>,
}

impl Console {
    pub fn builder() -> ConsoleBuilder {
        ConsoleBuilder::default()
    }

    pub fn command_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// 명령줄 하나를 실행한다. 결과는 전부 `out`에 대한 부작용이다.
    pub async fn dispatch(
        &self,
        line: &str,
        out: &mut dyn OutputSink,
        cancel: &dyn CancelPredicate,
    ) {
        let words = match tokenize(line) {
            Ok(words) => words,
            Err(err) => {
                out.write_line_fmt(format_args!("Error: {err}"));
                return;
            }
        };

        let Some((name, args)) = words.split_first() else {
            out.write_line("Error: Empty command line");
            return;
        };

        let Some(handler) = self.commands.get(name.as_str()) else {
            out.write_line_fmt(format_args!("Error: No such command '{name}'"));
            return;
        };

        debug!(command = %name, args = args.len(), "dispatching console command");
        if let Err(err) = handler.run(out, args, cancel).await {
            debug!(command = %name, error = %err, "console command failed");
            out.write_line_fmt(format_args!("Error: {err}"));
        }
    }
}

#[derive(Default)]
pub struct ConsoleBuilder {
    commands: BTreeMap<&'static str, Arc<dyn CommandHandler>>,
}

impl ConsoleBuilder {
    /// 같은 이름이 이미 있으면 나중 등록이 이긴다.
    pub fn register(mut self, handler: impl CommandHandler + 'static) -> Self {
        self.commands.insert(handler.name(), Arc::new(handler));
        self
    }

    pub fn build(self) -> Console {
        Console {
            commands: self.commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::application::error::CommandError;

    struct Fails;

    #[async_trait]
    impl CommandHandler for Fails {
        fn name(&self) -> &'static str {
            "fails"
        }

        async fn run(
            &self,
            out: &mut dyn OutputSink,
            _args: &[String],
            _cancel: &dyn CancelPredicate,
        ) -> Result<(), CommandError> {
            out.write_line("partial");
            Err(CommandError::NotFound("x".into()))
        }
    }

    struct Args(&'static str);

    #[async_trait]
    impl CommandHandler for Args {
        fn name(&self) -> &'static str {
            "args"
        }

        async fn run(
            &self,
            out: &mut dyn OutputSink,
            args: &[String],
            _cancel: &dyn CancelPredicate,
        ) -> Result<(), CommandError> {
            out.write_line_fmt(format_args!("{}:{}", self.0, args.join("|")));
            Ok(())
        }
    }

    fn never() -> impl CancelPredicate {
        || false
    }

    async fn run(console: &Console, line: &str) -> Vec<String> {
        let mut sink = MemorySink::new();
        console.dispatch(line, &mut sink, &never()).await;
        sink.lines()
    }

    #[tokio::test]
    async fn empty_line_is_reported_not_escalated() {
        let console = Console::builder().build();
        assert_eq!(run(&console, "").await, vec!["Error: Empty command line"]);
        assert_eq!(run(&console, "    ").await, vec!["Error: Empty command line"]);
    }

    #[tokio::test]
    async fn unknown_command_is_named_in_the_error() {
        let console = Console::builder().register(Args("a")).build();
        assert_eq!(
            run(&console, "bogus 1 2").await,
            vec!["Error: No such command 'bogus'"]
        );
        // 대소문자를 구분한다.
        assert_eq!(run(&console, "ARGS").await, vec!["Error: No such command 'ARGS'"]);
    }

    #[tokio::test]
    async fn malformed_line_yields_exactly_one_error_line() {
        let console = Console::builder().register(Args("a")).build();
        let lines = run(&console, r#"args "http://x"#).await;
        assert_eq!(lines, vec!["Error: Premature end of quoted string"]);
    }

    #[tokio::test]
    async fn raw_arguments_are_passed_through_unsplit() {
        let console = Console::builder().register(Args("a")).build();
        assert_eq!(run(&console, r#"args -v "x y" -- z"#).await, vec!["a:-v|x y|--|z"]);
    }

    #[tokio::test]
    async fn handler_errors_are_rendered_after_prior_output() {
        let console = Console::builder().register(Fails).build();
        assert_eq!(run(&console, "fails").await, vec!["partial", "Error: 'x' not found"]);
    }

    #[tokio::test]
    async fn later_registration_replaces_earlier_one() {
        let console = Console::builder().register(Args("old")).register(Args("new")).build();
        assert_eq!(run(&console, "args 1").await, vec!["new:1"]);
        assert_eq!(console.command_names().collect::<Vec<_>>(), vec!["args"]);
    }
}
