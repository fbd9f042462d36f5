use std::hint::black_box;

use bytes::Bytes;
use criterion::{Criterion, criterion_group, criterion_main};
use futures::executor::block_on;
use http::header::{ACCEPT, HOST, USER_AGENT};
use http_body_util::BodyExt;
use micro_http_core::builder::{BasicRequestBuilder, ClassicRequestBuilder, MessageBuilder, RequestBuilder};
use micro_http_core::context::{self, BasicHttpContext, ExecutionContext, HttpContext, HttpCoreContext};
use micro_http_core::protocol::{HttpHost, RequestHeader};

fn bench_basic_builder(c: &mut Criterion) {
    c.bench_function("build_basic_request", |b| {
        b.iter(|| {
            let mut builder = BasicRequestBuilder::get("http://localhost/search").unwrap();
            builder.add_parameter_pair("q", "micro http").add_parameter_pair("page", "2");
            builder.set_header(HOST, "localhost").unwrap().add_header(ACCEPT, "*/*").unwrap();
            black_box(builder.build().unwrap());
        });
    });
}

fn bench_classic_form(c: &mut Criterion) {
    let mut builder = ClassicRequestBuilder::post("http://localhost/login").unwrap();
    builder.add_parameter_pair("user", "alice").add_parameter_pair("pass", "s3cr3t&more");
    builder.set_header(USER_AGENT, "bench").unwrap();

    c.bench_function("build_form_request", |b| {
        b.iter(|| {
            let request = builder.build().unwrap();
            let body: Bytes = block_on(request.into_body().collect()).unwrap().to_bytes();
            black_box(body);
        });
    });
}

fn bench_context(c: &mut Criterion) {
    let request: RequestHeader = BasicRequestBuilder::get("http://localhost/").unwrap().build().unwrap();
    let host = HttpHost::from_uri(request.uri()).unwrap();

    c.bench_function("core_context_round_trip", |b| {
        b.iter(|| {
            let mut ctx = HttpCoreContext::new();
            ctx.set_request(request.clone());
            ctx.set_target_host(host.clone());
            ctx.set_request_sent(true);
            black_box(ctx.request().unwrap());
            black_box(ctx.is_request_sent().unwrap());
        });
    });

    c.bench_function("adapt_plain_store", |b| {
        b.iter(|| {
            let mut store = BasicHttpContext::new();
            store.set_attribute("custom.id", Box::new(7_u32));
            let mut adapted = context::adapt(&mut store);
            adapted.set_expect_continue();
            black_box(adapted.is_expect_continue().unwrap());
        });
    });
}

criterion_group!(benches, bench_basic_builder, bench_classic_form, bench_context);
criterion_main!(benches);
