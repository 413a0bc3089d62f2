//! # Web stack demo
//!
//! Wires a small service stack through the lifecycle supervisor:
//!
//! ```text
//! storage ──► user-repo ──► api-server
//!        └──► cache ─────┘
//! ```
//!
//! Components become ready in dependency order, and on Ctrl-C the stack
//! tears down children-first: the server stops before the repos, the repos
//! before storage.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use compvisor::{
    Adapter, ComponentFn, ComponentRef, Config, Lifecycle, LifecycleError, LogSubscriber,
    ReadySignal, Scope,
};

/// Stand-in for a connection pool a real application would wrap.
struct StoragePool {
    dsn: &'static str,
}

fn storage() -> ComponentRef {
    Adapter::new(
        StoragePool {
            dsn: "postgres://localhost/demo",
        },
        |pool: Arc<StoragePool>, scope: Scope, ready: ReadySignal| async move {
            println!("🗄  storage: connecting to {}", pool.dsn);
            tokio::time::sleep(Duration::from_millis(150)).await;
            ready.ready();
            scope.cancelled().await;
            println!("🗄  storage: draining connections");
            Ok::<_, LifecycleError>(())
        },
    )
    .named("storage")
    .into_ref()
}

fn service(name: &'static str, warmup: Duration, deps: Vec<ComponentRef>) -> ComponentRef {
    Arc::new(
        ComponentFn::new(name, move |scope: Scope, ready: ReadySignal| async move {
            tokio::time::sleep(warmup).await;
            println!("⚙️  {name}: ready");
            ready.ready();
            scope.cancelled().await;
            println!("⚙️  {name}: stopped");
            Ok(())
        })
        .with_dependencies(deps),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("🚀 Web stack demo, press Ctrl+C to stop\n");

    let storage = storage();
    let cache = service("cache", Duration::from_millis(50), vec![storage.clone()]);
    let users = service("user-repo", Duration::from_millis(80), vec![storage.clone()]);
    let api = service(
        "api-server",
        Duration::from_millis(30),
        vec![cache.clone(), users.clone()],
    );

    let mut cfg = Config::default();
    cfg.shutdown_signal = true;
    cfg.graph_file = Some("web_stack.dot".into());

    let mut lc = Lifecycle::new(cfg);
    lc.subscribe(Arc::new(LogSubscriber));
    lc.register(storage);
    lc.register(cache);
    lc.register(users);
    lc.register(api);

    match lc
        .run(CancellationToken::new(), |verdict| match verdict {
            None => println!("\n✅ all components ready (graph in web_stack.dot)\n"),
            Some(err) => println!("\n⚠️  startup failed: {err}\n"),
        })
        .await
    {
        Ok(()) => println!("\n✅ stack shut down cleanly"),
        Err(err) => println!("\n⚠️  stack stopped with error: {err}"),
    }
    Ok(())
}
