use polymorph::{concept, implement, Poly};

concept! {
    pub concept Counter {
        fn increment(&mut self);
        fn set(&mut self, value: i32);
        fn get(&self) -> i32;
        fn decrement(&mut self);
        fn multiply(&self, factor: f64) -> f64;
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Tally {
    value: i32,
}

impl Tally {
    fn increment(&mut self) {
        self.value += 1;
    }

    fn set(&mut self, value: i32) {
        self.value = value;
    }

    fn get(&self) -> i32 {
        self.value
    }
}

implement! {
    impl Counter for Tally {
        fn increment(&mut self) = Tally::increment;
        fn set(&mut self, value: i32) = Tally::set;
        fn get(&self) -> i32 = Tally::get;
        fn decrement(&mut self) = |t: &mut Tally| t.set(t.get() - 1);
        fn multiply(&self, factor: f64) -> f64 = |t: &Tally, factor: f64| factor * f64::from(t.get());
    }
}

/// a tour of the holder state machine, in random combinations, checked
/// against a plain value mutated in lockstep
#[test]
fn holder_tracks_a_plain_value() {
    const SEED: u64 = 0;
    const ITER: usize = 1000;
    fastrand::seed(SEED);

    let mut model = Tally::default();
    let mut holder: Poly<dyn Counter> = Poly::new(Tally::default());
    for _ in 0..ITER {
        match fastrand::u32(0..8) {
            0 => {
                holder.increment();
                model.increment();
            }
            1 => {
                let value = fastrand::i32(-1_000..1_000);
                holder.set(value);
                model.set(value);
            }
            2 => {
                holder.decrement();
                model.set(model.get() - 1);
            }
            3 => assert_eq!(holder.get(), model.get()),
            4 => {
                let factor = f64::from(fastrand::i32(-8..8));
                let expected = factor * f64::from(model.get());
                assert!((holder.multiply(factor) - expected).abs() < 1e-9);
            }
            5 => holder = holder.clone(),
            6 => holder = holder.take(),
            7 => holder.emplace(model.clone()),
            _ => unreachable!(),
        }
    }
    assert_eq!(holder.downcast_ref::<Tally>(), Some(&model));
}

#[test]
fn reborrowed_views_stay_in_sync() {
    fastrand::seed(7);

    let mut model = Tally::default();
    let mut holder: Poly<dyn Counter> = Poly::new(Tally::default());
    for _ in 0..200 {
        let value = fastrand::i32(-100..100);
        let mut view = holder.reborrow();
        view.set(value);
        view.increment();
        drop(view);

        model.set(value);
        model.increment();
        assert_eq!(holder.get(), model.get());
    }
}
