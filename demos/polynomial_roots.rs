use fracalg::{
    domains::{
        rational::Fraction,
        rational_function::{Direction, RationalFunction},
    },
    poly::univariate::Polynomial,
};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn roots() {
    for c in [vec![1, 2, 1], vec![6, -5, -2, 1], vec![1, 0, -3, 1], vec![1, 0, 1]] {
        let p = Polynomial::from_coefficients(c);
        println!("> Roots of {} =", p);
        match p.roots_with_precision() {
            Some(r) => {
                for (x, precision) in r {
                    println!("\t{} ({}, ~{})", x, precision, x.to_f64());
                }
            }
            None => println!("\tno real roots"),
        }
    }
}

fn factorization() {
    let p = &Polynomial::from_coefficients(vec![2, -6]).pow(2)
        * &Polynomial::from_coefficients(vec![1, 0, 1]);

    if let Some(f) = p.factorized() {
        println!("> Factorization of {} =", p);
        println!("\t{}", f.leading_coefficient);
        for (factor, multiplicity) in f.factors() {
            println!("\t({})^{}", factor, multiplicity);
        }
    }
}

fn limits() {
    let f = RationalFunction::new(
        Polynomial::from_coefficients(vec![1, 0, -4]),
        Polynomial::from_coefficients(vec![1, -2]),
    )
    .unwrap();
    let g = RationalFunction::new(Polynomial::one(), Polynomial::from_coefficients(vec![1, 0]))
        .unwrap();

    println!("> lim x->2 {} = {}", f, f.limit(&Fraction::from(2), Direction::Both));
    println!("> lim x->0+ {} = {}", g, g.limit(&Fraction::zero(), Direction::Right));
    println!("> lim x->0- {} = {}", g, g.limit(&Fraction::zero(), Direction::Left));
    println!("> d/dx {} = {}", f, f.derivative());
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("FRACALG_LOG"))
        .init();

    roots();
    factorization();
    limits();
}
