//! `nslookup NAME|IP`

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::console::CommandHandler;
use crate::application::error::CommandError;
use crate::application::ports::{CancelPredicate, HostResolver, OutputSink};

pub struct NslookupCommand {
    resolver: Arc<dyn HostResolver>,
}

impl NslookupCommand {
    pub fn new(resolver: Arc<dyn HostResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl CommandHandler for NslookupCommand {
    fn name(&self) -> &'static str {
        "nslookup"
    }

    async fn run(
        &self,
        out: &mut dyn OutputSink,
        args: &[String],
        _cancel: &dyn CancelPredicate,
    ) -> Result<(), CommandError> {
        let [target] = args else {
            out.write_line("Usage: nslookup NAME");
            return Ok(());
        };

        // IP 주소면 역방향, 아니면 정방향 조회.
        if let Ok(ip) = target.parse::<IpAddr>() {
            let Some(hostname) = self.resolver.reverse(ip).await? else {
                return Err(CommandError::NotFound(target.clone()));
            };
            out.write_line(&hostname);
            return Ok(());
        }

        for addr in self.resolver.lookup(target).await? {
            out.write_line(&addr.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, Ipv6Addr};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::application::console::{Console, MemorySink};

    #[derive(Default)]
    struct FakeResolver {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HostResolver for FakeResolver {
        async fn lookup(&self, name: &str) -> Result<Vec<IpAddr>, CommandError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match name {
                "dual.example" => Ok(vec![
                    IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
                    IpAddr::V6(Ipv6Addr::LOCALHOST),
                ]),
                _ => Err(CommandError::Lookup {
                    name: name.to_string(),
                    reason: "no such host".into(),
                }),
            }
        }

        async fn reverse(&self, ip: IpAddr) -> Result<Option<String>, CommandError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((ip == IpAddr::V4(Ipv4Addr::LOCALHOST)).then(|| "localhost".to_string()))
        }
    }

    async fn run(resolver: Arc<FakeResolver>, line: &str) -> Vec<String> {
        let console = Console::builder().register(NslookupCommand::new(resolver)).build();
        let mut sink = MemorySink::new();
        console.dispatch(line, &mut sink, &|| false).await;
        sink.lines()
    }

    #[tokio::test]
    async fn wrong_argument_count_prints_usage_without_lookup() {
        let resolver = Arc::new(FakeResolver::default());
        for line in ["nslookup", "nslookup a b", "nslookup a b c"] {
            assert_eq!(run(resolver.clone(), line).await, vec!["Usage: nslookup NAME"]);
        }
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn forward_lookup_prints_one_address_per_line() {
        let lines = run(Arc::new(FakeResolver::default()), "nslookup dual.example").await;
        assert_eq!(lines, vec!["192.0.2.1", "::1"]);
    }

    #[tokio::test]
    async fn forward_failure_is_rendered_by_the_dispatcher() {
        let lines = run(Arc::new(FakeResolver::default()), "nslookup nowhere.invalid").await;
        assert_eq!(lines, vec!["Error: 'nowhere.invalid' not found: no such host"]);
    }

    #[tokio::test]
    async fn reverse_lookup_hit_and_miss() {
        let resolver = Arc::new(FakeResolver::default());
        assert_eq!(run(resolver.clone(), "nslookup 127.0.0.1").await, vec!["localhost"]);
        assert_eq!(
            run(resolver, "nslookup 10.9.9.9").await,
            vec!["Error: '10.9.9.9' not found"]
        );
    }
}
