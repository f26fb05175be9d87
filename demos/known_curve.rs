extern crate cubic_interp;

use cubic_interp::{build, Evaluator, SampleSet};

fn f(x: f64) -> f64 {
    x * x * (-x * x).exp()
}

fn main() {

    let x_min = -2.0;
    let x_max = 0.5;

    let (x, y) = SampleSet::tabulate(x_min, x_max, 0.1, f).unwrap();
    let table = build(&x, &y).unwrap();
    let spline = Evaluator::new(&table);

    println!("{}", spline.evaluate(-1.5));

    let number_of_steps = 8;
    let step = 0.3;

    println!("x;y;real_y");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        println!("{:.2};{:.5};{:.5}", x, spline.evaluate(x), f(x));
    }
}
