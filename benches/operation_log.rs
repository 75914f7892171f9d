use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use card_forest::core::EngineConfig;
use card_forest::games::Klondike;
use card_forest::motion::InstantDriver;
use card_forest::session::GameSession;

fn deal_and_flush(c: &mut Criterion) {
    c.bench_function("klondike_deal_flush", |b| {
        b.iter_batched(
            || GameSession::<Klondike>::new(EngineConfig::default().with_seed(7)).unwrap(),
            |mut game| {
                game.deal().unwrap();
                black_box(game.board_mut().flush(&mut InstantDriver))
            },
            BatchSize::SmallInput,
        )
    });
}

fn stock_cycle(c: &mut Criterion) {
    c.bench_function("klondike_stock_cycle", |b| {
        b.iter_batched(
            || {
                let mut game = GameSession::<Klondike>::new(EngineConfig::default().with_seed(7)).unwrap();
                game.deal().unwrap();
                game.board_mut().flush(&mut InstantDriver);
                game
            },
            |mut game| {
                let (stock, waste) = (game.variant().stock(), game.variant().waste());
                let table = game.board_mut().table_mut();
                for _ in 0..24 {
                    table.flip_top(stock).unwrap();
                    table.move_to(stock, waste, 1, false).unwrap();
                }
                black_box(game.board_mut().flush(&mut InstantDriver))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, deal_and_flush, stock_cycle);
criterion_main!(benches);
