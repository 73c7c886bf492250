//! `log` 스트리밍: 순서 보존과 구독 해제.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::Harness;
use ctlshell::application::console::MemorySink;
use ctlshell::domain::log_record::Severity;

#[tokio::test]
async fn events_before_first_drain_are_all_emitted_in_order() {
    let h = Harness::new();
    let before = h.log.listener_count();

    // 첫 확인에서 취소 요청이 보이도록 하고, 그 전에 이벤트를 넣는다.
    let polls = Arc::new(AtomicUsize::new(0));
    let cancel = {
        let polls = Arc::clone(&polls);
        let log = Arc::clone(&h.log);
        move || {
            if polls.fetch_add(1, Ordering::SeqCst) == 0 {
                for idx in 0..20 {
                    log.write(Severity::Info, format!("event {idx}"));
                }
            }
            true
        }
    };

    let mut out = MemorySink::new();
    h.console.dispatch("log", &mut out, &cancel).await;

    let expected: Vec<String> = (0..20).map(|idx| format!("[INFO] event {idx}")).collect();
    assert_eq!(out.lines(), expected);
    assert_eq!(h.log.listener_count(), before);
}

#[tokio::test]
async fn tail_keeps_streaming_until_cancelled() {
    let h = Harness::new();
    let stop = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let console = h.console.clone();
    let task = {
        let stop = Arc::clone(&stop);
        tokio::spawn(async move {
            let mut out = MemorySink::new();
            let cancel = move || stop.load(Ordering::SeqCst);
            console.dispatch("log", &mut out, &cancel).await;
            out
        })
    };

    // 리스너가 붙을 때까지 기다린다.
    while h.log.listener_count() == 0 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    h.log.write(Severity::Warn, "first");
    tokio::time::sleep(Duration::from_millis(20)).await;
    h.log.write(Severity::Error, "second");
    stop.store(true, Ordering::SeqCst);

    let out = task.await.unwrap();
    assert_eq!(out.lines(), vec!["[WARN] first", "[ERROR] second"]);
    assert_eq!(h.log.listener_count(), 0);
}
