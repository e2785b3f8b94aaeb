use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polymorph::{concept, implement, Poly};

concept! {
    pub concept Accumulate {
        fn add(&mut self, amount: u64);
        fn total(&self) -> u64;
    }
}

#[derive(Clone, Default)]
struct Register {
    total: u64,
}

impl Register {
    fn add(&mut self, amount: u64) {
        self.total = self.total.wrapping_add(amount);
    }

    fn total(&self) -> u64 {
        self.total
    }
}

implement! {
    impl Accumulate for Register {
        fn add(&mut self, amount: u64) = Register::add;
        fn total(&self) -> u64 = Register::total;
    }
}

// Built-in trait objects, as the dispatch baseline to beat or match.
trait Accumulator {
    fn add(&mut self, amount: u64);
    fn total(&self) -> u64;
}

impl Accumulator for Register {
    fn add(&mut self, amount: u64) {
        Register::add(self, amount);
    }

    fn total(&self) -> u64 {
        Register::total(self)
    }
}

criterion_main!(dispatch_benches);
criterion_group!(dispatch_benches, dispatch, construction);

pub fn dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("add and total");

    let mut register = Register::default();
    group.bench_function("direct", |b| {
        b.iter(|| {
            register.add(black_box(3));
            black_box(register.total())
        })
    });

    let mut boxed: Box<dyn Accumulator> = Box::new(Register::default());
    group.bench_function("trait object", |b| {
        b.iter(|| {
            boxed.add(black_box(3));
            black_box(boxed.total())
        })
    });

    let mut holder: Poly<dyn Accumulate> = Poly::new(Register::default());
    group.bench_function("dispatch table", |b| {
        b.iter(|| {
            holder.add(black_box(3));
            black_box(holder.total())
        })
    });

    group.finish();
}

pub fn construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("holder lifecycle");

    group.bench_function("owning construction", |b| {
        b.iter(|| {
            let holder: Poly<dyn Accumulate> = Poly::new(black_box(Register::default()));
            black_box(holder.total())
        })
    });

    group.bench_function("clone", |b| {
        let holder: Poly<dyn Accumulate> = Poly::new(Register { total: 7 });
        b.iter(|| black_box(holder.clone().total()))
    });

    group.finish();
}
