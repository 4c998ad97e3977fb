// Codec benchmarks for stellar-base.
//
// Measures envelope encode/decode (raw XDR and base64), StrKey encoding and
// decoding, and the Txrep text form in both directions.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stellar_base::config::Network;
use stellar_base::crypto::KeyPair;
use stellar_base::strkey;
use stellar_base::transaction::{operations, Account, Envelope, TransactionBuilder};
use stellar_base::xdr::{Asset, Memo, TransactionEnvelope, XdrCodec};

const ISSUER: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";

fn signed_envelope(ops: usize) -> Envelope {
    let source = KeyPair::from_raw_seed(&[5; 32]);
    let usd = Asset::credit("USD", ISSUER).unwrap();
    let mut account = Account::new(&source.account_id(), 1_000).unwrap();
    let mut tx = TransactionBuilder::new(&mut account, Network::testnet())
        .add_operations((0..ops).map(|_| operations::payment(ISSUER, &usd, "12.3456789").unwrap()))
        .memo(Memo::text("bench").unwrap())
        .time_bounds(0, 1_900_000_000)
        .build()
        .unwrap();
    tx.sign(&source).unwrap();
    Envelope::from(tx)
}

fn bench_envelope_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("xdr/envelope");

    for ops in [1, 10, 100] {
        let envelope = signed_envelope(ops).to_envelope();
        let bytes = envelope.to_xdr().unwrap();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", ops), &envelope, |b, env| {
            b.iter(|| env.to_xdr().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("decode", ops), &bytes, |b, bytes| {
            b.iter(|| TransactionEnvelope::from_xdr(bytes).unwrap());
        });
    }

    group.finish();
}

fn bench_envelope_base64(c: &mut Criterion) {
    let encoded = signed_envelope(10).to_xdr_base64().unwrap();

    c.bench_function("xdr/envelope_from_base64", |b| {
        b.iter(|| Envelope::from_xdr_base64(&encoded, Network::testnet()).unwrap());
    });
}

fn bench_strkey(c: &mut Criterion) {
    let key = [9u8; 32];
    let encoded = strkey::encode_account_id(&key);

    c.bench_function("strkey/encode_account_id", |b| {
        b.iter(|| strkey::encode_account_id(&key));
    });
    c.bench_function("strkey/decode_account_id", |b| {
        b.iter(|| strkey::decode_account_id(&encoded).unwrap());
    });
}

fn bench_txrep(c: &mut Criterion) {
    let envelope = signed_envelope(10);
    let text = envelope.to_txrep();

    c.bench_function("txrep/render", |b| {
        b.iter(|| envelope.to_txrep());
    });
    c.bench_function("txrep/parse", |b| {
        b.iter(|| Envelope::from_txrep(&text, Network::testnet()).unwrap());
    });
}

criterion_group!(
    benches,
    bench_envelope_codec,
    bench_envelope_base64,
    bench_strkey,
    bench_txrep,
);
criterion_main!(benches);
