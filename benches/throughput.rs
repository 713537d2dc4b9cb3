use criterion::{criterion_group, criterion_main, Criterion};
use gof::context::Context;
use gof::controller::{ActionTable, Controller};
use gof::{dispatch, resolve_action, Dispatcher, RuntimeConfig};
use http::{Method, Request};
use std::hint::black_box;

struct Zoo;

impl Zoo {
    fn index(&self, ctx: &mut Context) {
        ctx.response_mut().write_str("zoo");
    }

    fn animals(&self, ctx: &mut Context, id: i64, name: String) {
        ctx.response_mut().write_str(&format!("{id}:{name}"));
    }

    fn feed_post(&self, ctx: &mut Context, amount: f64) {
        ctx.response_mut().write_str(&amount.to_string());
    }
}

impl Controller for Zoo {
    fn actions(table: &mut ActionTable<Self>) {
        table
            .action("Index", Zoo::index)
            .action("Animals", Zoo::animals)
            .action("Feed_post", Zoo::feed_post);
    }
}

fn request(method: Method, path: &str) -> Context {
    Context::new(
        Request::builder()
            .method(method)
            .uri(path)
            .body(Vec::new())
            .unwrap_or_default(),
    )
}

fn bench_resolve(c: &mut Criterion) {
    let paths = [
        (Method::GET, "/"),
        (Method::GET, "/zoo/animals"),
        (Method::GET, "/zoo/animals/"),
        (Method::POST, "/zoo/feed.json"),
        (Method::GET, "/a/b/c/d/e/f/g/h/index.html"),
    ];
    c.bench_function("resolve_action", |b| {
        b.iter(|| {
            for (method, path) in paths.iter() {
                black_box(resolve_action(path, method, true));
            }
        })
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let args = gof::args![7i64, "zebra"];
    c.bench_function("dispatch_uncached", |b| {
        b.iter(|| {
            let mut ctx = request(Method::GET, "/zoo/animals");
            let _ = black_box(dispatch(&Zoo, &mut ctx, true, &args));
        })
    });

    let dispatcher = Dispatcher::with_config(RuntimeConfig {
        action_cache: true,
        ..RuntimeConfig::default()
    });
    c.bench_function("dispatch_cached", |b| {
        b.iter(|| {
            let mut ctx = request(Method::GET, "/zoo/animals");
            let _ = black_box(dispatcher.handle(&Zoo, &mut ctx, &args));
        })
    });
}

criterion_group!(benches, bench_resolve, bench_dispatch);
criterion_main!(benches);
