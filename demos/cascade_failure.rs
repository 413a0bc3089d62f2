//! # Cascade failure demo
//!
//! A three-component chain where the middle component fails a few seconds
//! after becoming ready. Watch the failure become the lifecycle cause, the
//! chain cancel children-first, and the metrics record what happened.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use compvisor::{
    ComponentFn, ComponentRef, Config, Lifecycle, LifecycleError, LogSubscriber,
    MetricsSubscriber, ReadySignal, Scope,
};

fn steady(name: &'static str, deps: Vec<ComponentRef>) -> ComponentRef {
    Arc::new(
        ComponentFn::new(name, move |scope: Scope, ready: ReadySignal| async move {
            ready.ready();
            scope.cancelled().await;
            Ok(())
        })
        .with_dependencies(deps),
    )
}

fn flaky(name: &'static str, deps: Vec<ComponentRef>) -> ComponentRef {
    Arc::new(
        ComponentFn::new(name, move |scope: Scope, ready: ReadySignal| async move {
            ready.ready();
            tokio::select! {
                _ = scope.cancelled() => Ok(()),
                _ = tokio::time::sleep(Duration::from_secs(2)) => {
                    Err(LifecycleError::failure("queue connection lost"))
                }
            }
        })
        .with_dependencies(deps),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("🚀 Cascade demo: `queue` fails two seconds after readiness\n");

    let broker = steady("broker", vec![]);
    let queue = flaky("queue", vec![broker.clone()]);
    let consumer = steady("consumer", vec![queue.clone()]);

    let metrics = MetricsSubscriber::new();
    let mut lc = Lifecycle::new(Config::default());
    lc.subscribe(Arc::new(LogSubscriber));
    lc.subscribe(metrics.clone());
    lc.register(broker);
    lc.register(queue);
    lc.register(consumer);

    let result = lc
        .run(CancellationToken::new(), |verdict| match verdict {
            None => println!("✅ all components ready\n"),
            Some(err) => println!("⚠️  startup failed: {err}\n"),
        })
        .await;

    println!("\nrun result: {result:?}");
    for name in ["broker", "queue", "consumer"] {
        println!(
            "  {name}: ready after {:?}, ran for {:?}",
            metrics.ready_duration(name).await,
            metrics.run_duration(name).await,
        );
    }
    Ok(())
}
