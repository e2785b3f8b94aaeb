use std::ptr;
use std::thread;

use polymorph::{concept, implement, table_of, Poly};

concept! {
    pub concept Stamp {
        fn value(&self) -> u64;
    }
}

#[derive(Clone)]
struct Seal(u64);

implement! {
    impl Stamp for Seal {
        fn value(&self) -> u64 = |s: &Seal| s.0;
    }
}

#[test]
fn concurrent_first_use_materializes_one_table() {
    let _ = simple_logger::init_with_level(log::Level::Debug);

    let handles: Vec<_> = (0..16)
        .map(|_| thread::spawn(|| ptr::from_ref(table_of::<dyn Stamp, Seal>()) as usize))
        .collect();
    let addresses: Vec<usize> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker panicked"))
        .collect();

    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));

    // Holders bind the exact same table the workers saw.
    let holder: Poly<dyn Stamp> = Poly::new(Seal(3));
    let bound = ptr::from_ref(holder.table().expect("bound")) as usize;
    assert_eq!(bound, addresses[0]);
    assert_eq!(holder.value(), 3);
}
