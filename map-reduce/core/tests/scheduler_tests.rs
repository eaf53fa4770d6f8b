mod scripted_invoker;

use map_reduce_core::{JobPhase, PhaseDescriptor, Scheduler, WorkerAddress, DO_TASK_METHOD};
use scripted_invoker::{Behavior, ScriptedInvoker};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

const GENEROUS: Duration = Duration::from_secs(10);

fn input_files(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("input-{}.txt", i)).collect()
}

fn feed_of(workers: &[&str]) -> mpsc::UnboundedReceiver<WorkerAddress> {
    let (tx, rx) = mpsc::unbounded_channel();
    for worker in workers {
        tx.send(WorkerAddress::from(*worker)).unwrap();
    }
    // Leak the sender so the feed never reports closure during the test.
    std::mem::forget(tx);
    rx
}

// ============================================================
// completion
// ============================================================

#[tokio::test]
async fn test_liveness_single_reliable_worker_completes_all_tasks() {
    let invoker = ScriptedInvoker::new();
    let scheduler = Scheduler::new(invoker.clone());

    let summary = timeout(
        GENEROUS,
        scheduler.schedule(PhaseDescriptor::map("wc", input_files(5), 3), feed_of(&["w1"])),
    )
    .await
    .expect("schedule should return once every task is done");

    assert_eq!(summary.phase, JobPhase::Map);
    assert_eq!(summary.n_tasks, 5);
    assert_eq!(summary.workers, 1);
    assert_eq!(summary.attempts, 5);
    assert_eq!(summary.failures, 0);
    for task in 0..5 {
        assert_eq!(invoker.successes_for(task), 1, "task {} should succeed once", task);
    }
    assert!(invoker.calls().iter().all(|call| call.method == DO_TASK_METHOD));
}

#[tokio::test]
async fn test_liveness_zero_tasks_returns_without_dispatching() {
    let invoker = ScriptedInvoker::new();
    let scheduler = Scheduler::new(invoker.clone());
    let (tx, rx) = mpsc::unbounded_channel();

    let summary = timeout(
        Duration::from_secs(1),
        scheduler.schedule(PhaseDescriptor::reduce("wc", 4, 0), rx),
    )
    .await
    .expect("an empty phase returns immediately");

    assert_eq!(summary.n_tasks, 0);
    assert_eq!(summary.workers, 0);
    // Registering a worker afterwards must not trigger any call.
    let _ = tx.send(WorkerAddress::from("late"));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(invoker.call_count(), 0);
}

#[tokio::test]
async fn test_safety_always_failing_worker_blocks_forever() {
    let invoker = ScriptedInvoker::with_latency(Duration::from_millis(1));
    invoker.set_behavior("broken", Behavior::Fail);
    let scheduler = Scheduler::new(invoker.clone());

    let result = timeout(
        Duration::from_millis(300),
        scheduler.schedule(PhaseDescriptor::map("wc", input_files(5), 1), feed_of(&["broken"])),
    )
    .await;

    assert!(result.is_err(), "no task can complete, schedule must keep blocking");
    assert!(invoker.call_count() > 0);
    assert!(invoker.calls().iter().all(|call| !call.success));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_safety_flaky_and_reliable_workers_complete_each_task_once() {
    let invoker = ScriptedInvoker::with_latency(Duration::from_millis(2));
    invoker.set_behavior("flaky", Behavior::FailFirstPerTask);
    invoker.set_behavior("steady", Behavior::Succeed);
    let scheduler = Scheduler::new(invoker.clone());

    let summary = timeout(
        GENEROUS,
        scheduler.schedule(
            PhaseDescriptor::map("wc", input_files(20), 2),
            feed_of(&["flaky", "steady"]),
        ),
    )
    .await
    .expect("the steady worker alone can finish the phase");

    assert_eq!(summary.workers, 2);
    for task in 0..20 {
        assert_eq!(invoker.successes_for(task), 1, "task {} done more than once", task);
    }
    assert_eq!(summary.attempts, summary.failures + 20);
}

#[tokio::test]
async fn test_safety_task_failing_k_times_is_done_once_after_success() {
    let invoker = ScriptedInvoker::new();
    invoker.set_behavior("w1", Behavior::FailTaskTimes(2, 3));
    let scheduler = Scheduler::new(invoker.clone());

    let summary = timeout(
        GENEROUS,
        scheduler.schedule(PhaseDescriptor::reduce("wc", 2, 4), feed_of(&["w1"])),
    )
    .await
    .expect("task 2 eventually succeeds");

    assert_eq!(invoker.attempts_for(2), 4);
    assert_eq!(invoker.successes_for(2), 1);
    let last_call_for_task = invoker
        .calls()
        .into_iter()
        .filter(|call| call.assignment.task_number == 2)
        .last()
        .unwrap();
    assert!(last_call_for_task.success);
    assert_eq!(summary.failures, 3);
    assert_eq!(summary.attempts, 7);
}

#[tokio::test]
async fn test_safety_abandoned_schedule_stops_calling_workers() {
    let invoker = ScriptedInvoker::with_latency(Duration::from_millis(1));
    invoker.set_behavior("broken", Behavior::Fail);
    let scheduler = Scheduler::new(invoker.clone());

    let abandoned = timeout(
        Duration::from_millis(100),
        scheduler.schedule(PhaseDescriptor::map("wc", input_files(3), 1), feed_of(&["broken"])),
    )
    .await;
    assert!(abandoned.is_err());

    // Let the call that was in flight when the phase was dropped finish.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let calls_after_drop = invoker.call_count();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(invoker.call_count(), calls_after_drop);
}

// ============================================================
// worker feed
// ============================================================

#[tokio::test]
async fn test_liveness_late_registration_drains_the_pool() {
    let invoker = ScriptedInvoker::with_latency(Duration::from_millis(1));
    invoker.set_behavior("broken", Behavior::Fail);
    let scheduler = Scheduler::new(invoker.clone());
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(WorkerAddress::from("broken")).unwrap();

    let register_later = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(WorkerAddress::from("healthy")).unwrap();
        tx
    });

    let summary = timeout(
        GENEROUS,
        scheduler.schedule(PhaseDescriptor::map("wc", input_files(6), 2), rx),
    )
    .await
    .expect("the late worker should finish the phase");

    let _tx = register_later.await.unwrap();
    assert_eq!(summary.workers, 2);
    for task in 0..6 {
        assert_eq!(invoker.successes_for(task), 1);
    }
    assert!(invoker
        .calls()
        .iter()
        .filter(|call| call.success)
        .all(|call| call.worker.as_str() == "healthy"));
}

#[tokio::test]
async fn test_safety_no_dispatch_after_schedule_returns() {
    let invoker = ScriptedInvoker::new();
    let scheduler = Scheduler::new(invoker.clone());
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(WorkerAddress::from("w1")).unwrap();

    timeout(
        GENEROUS,
        scheduler.schedule(PhaseDescriptor::map("wc", input_files(3), 1), rx),
    )
    .await
    .expect("phase completes");

    let calls_at_return = invoker.call_count();
    let _ = tx.send(WorkerAddress::from("w2"));
    let _ = tx.send(WorkerAddress::from("w3"));
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(invoker.call_count(), calls_at_return);
    assert!(invoker.calls().iter().all(|call| call.worker.as_str() == "w1"));
}

#[tokio::test]
async fn test_safety_duplicate_registration_starts_one_loop() {
    let invoker = ScriptedInvoker::new();
    let scheduler = Scheduler::new(invoker.clone());

    let summary = timeout(
        GENEROUS,
        scheduler.schedule(
            PhaseDescriptor::map("wc", input_files(4), 1),
            feed_of(&["w1", "w1", "w1"]),
        ),
    )
    .await
    .expect("phase completes");

    assert_eq!(summary.workers, 1);
    assert_eq!(summary.attempts, 4);
}

#[tokio::test]
async fn test_liveness_closed_feed_still_finishes_with_known_workers() {
    let invoker = ScriptedInvoker::new();
    let scheduler = Scheduler::new(invoker.clone());
    let (tx, rx) = mpsc::channel(4);
    tx.send(WorkerAddress::from("w1")).await.unwrap();
    drop(tx);

    let summary = timeout(
        GENEROUS,
        scheduler.schedule(PhaseDescriptor::reduce("wc", 3, 5), rx),
    )
    .await
    .expect("a closed feed does not end the phase early or stall it");

    assert_eq!(summary.n_tasks, 5);
    assert_eq!(summary.attempts, 5);
}

// ============================================================
// task assignments
// ============================================================

#[tokio::test]
async fn test_map_assignments_carry_their_input_file() {
    let invoker = ScriptedInvoker::new();
    let scheduler = Scheduler::new(invoker.clone());
    let files = input_files(8);

    scheduler
        .schedule(PhaseDescriptor::map("wc", files.clone(), 3), feed_of(&["a", "b"]))
        .await;

    let calls = invoker.calls();
    assert_eq!(calls.len(), 8);
    for call in calls {
        let task = call.assignment.task_number;
        assert_eq!(call.assignment.phase, JobPhase::Map);
        assert_eq!(call.assignment.file.as_ref(), Some(&files[task]));
        assert_eq!(call.assignment.num_other_phase, 3);
        assert_eq!(call.assignment.job_name, "wc");
    }
}

#[tokio::test]
async fn test_reduce_assignments_carry_no_file() {
    let invoker = ScriptedInvoker::new();
    let scheduler = Scheduler::new(invoker.clone());

    scheduler
        .schedule(PhaseDescriptor::reduce("wc", 8, 3), feed_of(&["a"]))
        .await;

    let calls = invoker.calls();
    assert_eq!(calls.len(), 3);
    for call in calls {
        assert_eq!(call.assignment.phase, JobPhase::Reduce);
        assert_eq!(call.assignment.file, None);
        assert_eq!(call.assignment.num_other_phase, 8);
    }
}

#[tokio::test]
async fn test_scheduler_is_reusable_across_phases() {
    let invoker = ScriptedInvoker::new();
    let scheduler = Scheduler::new(invoker.clone());

    let map = scheduler
        .schedule(PhaseDescriptor::map("wc", input_files(3), 2), feed_of(&["a"]))
        .await;
    let reduce = scheduler
        .schedule(PhaseDescriptor::reduce("wc", 3, 2), feed_of(&["a"]))
        .await;

    assert_eq!(map.attempts, 3);
    assert_eq!(reduce.attempts, 2);
    assert_eq!(invoker.call_count(), 5);
}
