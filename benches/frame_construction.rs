//! Benchmarks for HEP frame construction
//!
//! Tracks encoder throughput for the hot path of a capture agent:
//! - v3 chunked frames over IPv4 and IPv6
//! - legacy v2 fixed frames
//! - the auth-chunk and compression variants
//!
//! Platform: cross-platform (pure encoding, no sockets)

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use hepline::codec::compress;
use hepline::{AF_INET6, AgentConfig, ConnectionInfo, payload_type, wire};
use std::hint::black_box;

const SIP_PAYLOAD: &[u8] =
    b"INVITE sip:alice@example.org SIP/2.0\r\nVia: SIP/2.0/UDP 192.168.1.1:5060\r\n\
Call-ID: 1234567890@host\r\nCSeq: 1 INVITE\r\nContent-Length: 0\r\n\r\n";

fn sip_info() -> ConnectionInfo {
    ConnectionInfo::udp_ipv4("192.168.1.1", 5060, "192.168.1.2", 5060, payload_type::SIP)
}

fn bench_v3_encoding(c: &mut Criterion) {
    let config = AgentConfig::default();
    let info = sip_info();

    let mut group = c.benchmark_group("v3_encoding");
    group.throughput(Throughput::Bytes(SIP_PAYLOAD.len() as u64));

    group.bench_function("ipv4_sip", |b| {
        b.iter(|| {
            let frame =
                wire::encode(black_box(&config), black_box(&info), black_box(SIP_PAYLOAD), false)
                    .unwrap();
            black_box(frame)
        })
    });

    let authed = AgentConfig { password: Some("secret".to_string()), ..AgentConfig::default() };
    group.bench_function("ipv4_sip_with_auth", |b| {
        b.iter(|| {
            let frame =
                wire::encode(black_box(&authed), black_box(&info), black_box(SIP_PAYLOAD), false)
                    .unwrap();
            black_box(frame)
        })
    });

    let info_v6 = ConnectionInfo {
        family: AF_INET6,
        src_addr: "2001:db8::1".to_string(),
        dst_addr: "2001:db8::2".to_string(),
        ..sip_info()
    };
    group.bench_function("ipv6_sip", |b| {
        b.iter(|| {
            let frame =
                wire::encode(black_box(&config), black_box(&info_v6), black_box(SIP_PAYLOAD), false)
                    .unwrap();
            black_box(frame)
        })
    });

    group.finish();
}

fn bench_legacy_encoding(c: &mut Criterion) {
    let config = AgentConfig { version: 2, ..AgentConfig::default() };
    let info = sip_info();

    let mut group = c.benchmark_group("legacy_encoding");
    group.throughput(Throughput::Bytes(SIP_PAYLOAD.len() as u64));

    group.bench_function("v2_ipv4_sip", |b| {
        b.iter(|| {
            let frame =
                wire::encode(black_box(&config), black_box(&info), black_box(SIP_PAYLOAD), false)
                    .unwrap();
            black_box(frame)
        })
    });

    group.finish();
}

fn bench_compression(c: &mut Criterion) {
    let payload = SIP_PAYLOAD.repeat(10);

    let mut group = c.benchmark_group("payload_compression");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    group.bench_function("deflate_sip_10x", |b| {
        b.iter(|| {
            let compressed = compress::deflate(black_box(&payload)).unwrap();
            black_box(compressed)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_v3_encoding, bench_legacy_encoding, bench_compression);
criterion_main!(benches);
