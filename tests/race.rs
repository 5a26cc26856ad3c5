use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sortvisor::{
    AlgorithmId, Category, Config, Event, EventKind, ProgressRecorder, RuntimeError, SortContext,
    Sorter, SorterRef, Subscribe, Supervisor, TaskError, dataset, sorters, verify,
};

const STEPS: [u32; 6] = [0, 20, 40, 60, 80, 100];

#[derive(Default)]
struct Kinds {
    seen: Mutex<Vec<Event>>,
}

#[async_trait]
impl Subscribe for Kinds {
    async fn on_event(&self, event: &Event) {
        self.seen.lock().unwrap().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "kinds"
    }

    fn queue_capacity(&self) -> usize {
        4096
    }
}

impl Kinds {
    fn events(&self) -> Vec<Event> {
        self.seen.lock().unwrap().clone()
    }
}

struct Panics;

#[async_trait]
impl Sorter for Panics {
    fn name(&self) -> &str {
        "panics"
    }

    async fn sort(&self, ctx: &mut SortContext) -> Result<(), TaskError> {
        ctx.compare(0, 1).await?;
        panic!("sorter exploded");
    }
}

struct Spins;

#[async_trait]
impl Sorter for Spins {
    fn name(&self) -> &str {
        "spins"
    }

    async fn sort(&self, ctx: &mut SortContext) -> Result<(), TaskError> {
        loop {
            ctx.compare(0, 1).await?;
        }
    }
}

struct Hangs;

#[async_trait]
impl Sorter for Hangs {
    fn name(&self) -> &str {
        "hangs"
    }

    async fn sort(&self, _ctx: &mut SortContext) -> Result<(), TaskError> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

fn supervisor(cfg: Config, subs: Vec<Arc<dyn Subscribe>>) -> Supervisor {
    Supervisor::builder(cfg).with_subscribers(subs).build()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_algorithm_sorts_and_reports_full_progress() {
    let progress = Arc::new(ProgressRecorder::new());
    let sup = supervisor(Config::default(), vec![progress.clone()]);
    let data = dataset::shuffled(300);

    let outcomes = sup.run(&data, sorters::all()).await.unwrap();

    let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["bubble", "selection", "insertion", "shell", "quick"]);
    for (idx, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.id, AlgorithmId(idx as u32 + 1));
        assert!(outcome.is_ok(), "{}: {:?}", outcome.name, outcome.result);
        assert!(verify::SortReport::new(&outcome.name, &outcome.data).is_sorted());
        assert_eq!(outcome.data, (0..300).collect::<Vec<i32>>());

        for category in Category::ALL {
            let records = progress.records_for(&outcome.name, category);
            let percents: Vec<u32> = records.iter().map(|r| r.percent).collect();
            assert_eq!(percents, STEPS, "{} {category}", outcome.name);
            assert!(records.windows(2).all(|w| w[0].count <= w[1].count));

            let total = progress.total(&outcome.name, category).unwrap();
            assert_eq!(records.last().unwrap().count, total);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_threshold_arrives_when_the_bus_is_tiny() {
    let cfg = Config {
        report_step: 1,
        bus_capacity: 8,
        ..Config::default()
    };
    let progress = Arc::new(ProgressRecorder::new());
    let sup = Supervisor::builder(cfg).subscriber(progress.clone()).build();
    assert_eq!(sup.config().report_step_clamped(), 1);
    assert_eq!(sup.config().bus_capacity_clamped(), 8);

    let outcomes = sup
        .run(&dataset::shuffled(400), sorters::all())
        .await
        .unwrap();

    let every_percent: Vec<u32> = (0..=100).collect();
    for outcome in &outcomes {
        for category in Category::ALL {
            let percents: Vec<u32> = progress
                .records_for(&outcome.name, category)
                .iter()
                .map(|r| r.percent)
                .collect();
            assert_eq!(percents, every_percent, "{} {category}", outcome.name);
        }
    }
    assert_eq!(progress.records().len(), outcomes.len() * 2 * 101);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn completion_is_reported_once_per_category_and_last() {
    let kinds = Arc::new(Kinds::default());
    let sup = supervisor(Config::default(), vec![kinds.clone()]);

    sup.run(&dataset::shuffled(120), sorters::all()).await.unwrap();

    let events = kinds.events();
    let categories: Vec<Category> = events
        .iter()
        .filter(|e| e.kind == EventKind::CategoryCompleted)
        .filter_map(|e| e.category)
        .collect();
    assert_eq!(categories.len(), 2);
    assert!(categories.contains(&Category::Comparisons));
    assert!(categories.contains(&Category::Swaps));

    let last = events.last().unwrap();
    assert_eq!(last.kind, EventKind::AllCompleted);
    assert_eq!(
        events.iter().filter(|e| e.kind == EventKind::AllCompleted).count(),
        1
    );

    let completed = events
        .iter()
        .filter(|e| e.kind == EventKind::AlgorithmCompleted)
        .count();
    assert_eq!(completed, 10);
    assert_eq!(
        events.iter().filter(|e| e.kind == EventKind::SortFinished).count(),
        5
    );
}

#[tokio::test]
async fn empty_dataset_reports_full_progress_with_no_events() {
    let progress = Arc::new(ProgressRecorder::new());
    let sup = supervisor(Config::default(), vec![progress.clone()]);

    let outcomes = sup.run(&[], sorters::all()).await.unwrap();

    assert_eq!(outcomes.len(), 5);
    for outcome in &outcomes {
        assert!(outcome.data.is_empty());
        for category in Category::ALL {
            let records = progress.records_for(&outcome.name, category);
            assert_eq!(records.iter().map(|r| r.percent).collect::<Vec<_>>(), STEPS);
            assert!(records.iter().all(|r| r.count == 0));
        }
    }
}

#[tokio::test]
async fn no_sorters_completes_immediately() {
    let kinds = Arc::new(Kinds::default());
    let sup = supervisor(Config::default(), vec![kinds.clone()]);

    let outcomes = sup.run(&[3, 2, 1], Vec::new()).await.unwrap();

    assert!(outcomes.is_empty());
    let events = kinds.events();
    assert_eq!(
        events
            .iter()
            .filter(|e| e.kind == EventKind::CategoryCompleted)
            .count(),
        2
    );
    assert_eq!(events.last().unwrap().kind, EventKind::AllCompleted);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn panicking_sorter_fails_the_run_without_hanging() {
    let kinds = Arc::new(Kinds::default());
    let sup = supervisor(Config::default(), vec![kinds.clone()]);
    let mut list = sorters::all();
    list.push(Arc::new(Panics));

    let err = sup.run(&dataset::shuffled(50), list).await.unwrap_err();

    match err {
        RuntimeError::TaskPanicked { algorithm } => assert_eq!(algorithm, "panics"),
        other => panic!("unexpected error: {other:?}"),
    }
    let events = kinds.events();
    assert!(events.iter().any(|e| {
        e.kind == EventKind::StreamClosed && e.algorithm.as_deref() == Some("panics")
    }));
    assert_eq!(events.last().unwrap().kind, EventKind::RunAborted);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_cancels_running_sorters() {
    let kinds = Arc::new(Kinds::default());
    let sup = supervisor(Config::default(), vec![kinds.clone()]);
    let list: Vec<SorterRef> = vec![Arc::new(Spins)];

    let err = sup
        .run_until(
            &[1, 2, 3],
            list,
            tokio::time::sleep(Duration::from_millis(20)),
        )
        .await
        .unwrap_err();

    match err {
        RuntimeError::Canceled { stuck } => assert!(stuck.is_empty()),
        other => panic!("unexpected error: {other:?}"),
    }
    let events = kinds.events();
    assert!(events.iter().any(|e| e.kind == EventKind::ShutdownRequested));
    assert!(events.iter().any(|e| e.kind == EventKind::SortFailed));
    assert_eq!(events.last().unwrap().kind, EventKind::RunAborted);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_reports_tasks_stuck_past_grace() {
    let cfg = Config {
        grace: Duration::from_millis(30),
        ..Config::default()
    };
    let sup = supervisor(cfg, Vec::new());
    let list: Vec<SorterRef> = vec![Arc::new(Hangs), Arc::new(sorters::QuickSort)];

    let err = sup
        .run_until(
            &dataset::shuffled(40),
            list,
            tokio::time::sleep(Duration::from_millis(20)),
        )
        .await
        .unwrap_err();

    match err {
        RuntimeError::Canceled { stuck } => assert_eq!(stuck, vec!["hangs".to_string()]),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn barrier_timeout_lists_pending_categories() {
    let cfg = Config {
        timeout: Duration::from_millis(30),
        ..Config::default()
    };
    let kinds = Arc::new(Kinds::default());
    let sup = supervisor(cfg, vec![kinds.clone()]);
    let list: Vec<SorterRef> = vec![Arc::new(sorters::InsertionSort), Arc::new(Hangs)];

    let err = sup.run(&[2, 1], list).await.unwrap_err();

    match err {
        RuntimeError::BarrierTimeout { timeout, pending } => {
            assert_eq!(timeout, Duration::from_millis(30));
            assert_eq!(pending, vec![Category::Comparisons, Category::Swaps]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let events = kinds.events();
    assert!(events.iter().any(|e| e.kind == EventKind::BarrierTimeout));
    assert_eq!(events.last().unwrap().kind, EventKind::RunAborted);
}
