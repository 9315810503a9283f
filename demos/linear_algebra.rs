use fracalg::{
    printer::{MatrixPrinter, PrintOptions},
    tensors::{
        matrix::{Matrix, Vector},
        transformation::LinearTransformation,
    },
};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn reduction() {
    let a: Matrix = "[[1, 2, 1, 1], [3, 6, 4, 1]]".parse().unwrap();

    println!("> Reduced row echelon form of {} =", a);
    println!(
        "{}",
        MatrixPrinter::new_with_options(&a.reduced(), PrintOptions::tabular())
    );

    println!("> Solution space =");
    for v in a.solution_space() {
        println!("\t{}", v);
    }
}

fn inverse() {
    let a: Matrix = "[[2, 1, 0], [1, 3, 1], [0, 1, 4]]".parse().unwrap();

    println!("> det {} = {}", a, a.determinant());
    match a.inverse() {
        Ok(inv) => println!(
            "> Inverse =\n{}",
            MatrixPrinter::new_with_options(&inv, PrintOptions::tabular())
        ),
        Err(e) => println!("> {}", e),
    }
}

fn eigen() {
    let a: Matrix = "[[4, 1], [2, 3]]".parse().unwrap();

    println!("> Characteristic polynomial of {} = {}", a, a.characteristic_polynomial());
    if let Some(d) = a.diagonalize() {
        println!("> P = {}", d.p);
        println!("> D = {}", d.d);
        println!(
            "> LaTeX: {}",
            MatrixPrinter::new_with_options(&d.p_inv, PrintOptions::latex())
        );
    }

    let svd = "[[1, 1], [1, 1], [0, 0]]"
        .parse::<Matrix>()
        .unwrap()
        .singular_value_decomposition()
        .unwrap();
    println!("> Singular values = {} ({})", svd.sigma, svd.precision);
}

fn transformation() {
    let t = LinearTransformation::new("[[0, 1, -2], [3, 0, 1]]".parse().unwrap());
    let v = Vector::new(vec![1, 1, 1]);

    println!("> {} applied to {} = {}", t, v, t.transform(&v));
    println!("> Kernel =");
    for k in t.kernel() {
        println!("\t{}", k);
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("FRACALG_LOG"))
        .init();

    reduction();
    inverse();
    eigen();
    transformation();
}
