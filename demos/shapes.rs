//! Unrelated shape types dispatched through one concept.
//!
//! Run with `cargo run --example shapes`.

use polymorph::{concept, implement, Poly};

concept! {
    /// Closed plane figures with a measurable boundary.
    pub concept Shape {
        fn area(&self) -> f64;
        fn perimeter(&self) -> f64;
        fn scale(&mut self, factor: f64);
    }
}

#[derive(Clone)]
struct Circle {
    radius: f64,
}

impl Circle {
    fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    fn perimeter(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }
}

#[derive(Clone)]
struct Rectangle {
    width: f64,
    height: f64,
}

impl Rectangle {
    fn area(&self) -> f64 {
        self.width * self.height
    }

    fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }
}

implement! {
    impl Shape for Circle {
        fn area(&self) -> f64 = Circle::area;
        fn perimeter(&self) -> f64 = Circle::perimeter;
        fn scale(&mut self, factor: f64) = |c: &mut Circle, factor: f64| c.radius *= factor;
    }
}

implement! {
    impl Shape for Rectangle {
        fn area(&self) -> f64 = Rectangle::area;
        fn perimeter(&self) -> f64 = Rectangle::perimeter;
        fn scale(&mut self, factor: f64) = |r: &mut Rectangle, factor: f64| {
            r.width *= factor;
            r.height *= factor;
        };
    }
}

fn main() {
    let shapes: Vec<Poly<dyn Shape>> = vec![
        Poly::new(Circle { radius: 1.0 }),
        Poly::new(Rectangle {
            width: 3.0,
            height: 2.0,
        }),
    ];

    for mut shape in shapes {
        shape.scale(2.0);
        println!(
            "{}: area {:.2}, perimeter {:.2}",
            shape.type_name().unwrap_or("<empty>"),
            shape.area(),
            shape.perimeter(),
        );
    }
}
