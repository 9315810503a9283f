use fracalg::domains::{
    float::{approximate, Precision},
    integer::Integer,
    natural::Natural,
    rational::{Fraction, RoundingRule},
};

fn rug_int(x: &Integer) -> rug::Integer {
    x.to_string().parse().unwrap()
}

fn int(s: &str) -> Integer {
    s.parse().unwrap()
}

fn frac(s: &str) -> Fraction {
    s.parse().unwrap()
}

#[test]
fn integer_addition() {
    assert_eq!(int("123") + int("877"), int("1000"));
    assert_eq!(int("-123") + int("123"), Integer::zero());
    assert_eq!((int("-123") + int("123")).to_string(), "0");
}

#[test]
fn natural_normalization() {
    let zero = Natural::from_digits([0, 0, 0]);
    assert_eq!(zero.digits(), &[0]);
    assert!(zero.is_zero());
    assert_eq!(zero, Natural::zero());

    let n = Natural::from_digits([3, 2, 1, 0, 0]);
    assert_eq!(n.num_digits(), 3);
    assert_eq!(n.to_string(), "123");
}

#[test]
fn large_products_against_gmp() {
    let a = int("-98765432109876543210987654321098765432109876543210");
    let b = int("12345678901234567890123456789");

    let product = &a * &b;
    assert_eq!(rug_int(&product), rug_int(&a) * rug_int(&b));

    let (q, r) = a.quot_rem(&b);
    let (ra, rb) = (rug_int(&a), rug_int(&b));
    assert_eq!(rug_int(&q), ra.clone() / &rb);
    assert_eq!(rug_int(&r), ra % &rb);

    let p = int("3").pow(200);
    assert_eq!(rug_int(&p), rug::Integer::from(rug::Integer::u_pow_u(3, 200)));
}

#[test]
fn gcd_against_gmp() {
    let a = int("1234567890123456789012345678901234567890");
    let b = int("987654321098765432109876543210");
    let g = a.gcd(&b);
    assert_eq!(rug_int(&g), rug_int(&a).gcd(&rug_int(&b)));
    assert_eq!(rug_int(&a.lcm(&b)), rug_int(&a).lcm(&rug_int(&b)));
}

#[test]
fn factorial_against_gmp() {
    let f = Integer::new(40).factorial();
    assert_eq!(rug_int(&f), rug::Integer::from(rug::Integer::factorial(40)));
}

#[test]
#[should_panic(expected = "Division by zero")]
fn integer_division_by_zero() {
    let _ = int("5") / int("0");
}

#[test]
fn fraction_reduction() {
    assert_eq!(Fraction::from((2, 4)), Fraction::from((1, 2)));
    assert_eq!(Fraction::from((3, -6)).to_string(), "-1/2");
    assert_eq!(Fraction::from((7, 7)), Fraction::one());
    assert_eq!(frac("1.25"), Fraction::from((5, 4)));
    assert_eq!(frac("-0.5"), Fraction::from((-1, 2)));
    assert_eq!(frac("-5"), Fraction::from(-5));
}

#[test]
fn fraction_sentinels() {
    let inf = Fraction::infinity();
    let ninf = Fraction::neg_infinity();
    let nan = Fraction::nan();

    assert_eq!(&inf + &inf, inf);
    assert!((&inf - &inf).is_nan());
    assert_eq!(&inf - &Fraction::one(), inf);
    assert_eq!(&Fraction::one() - &inf, ninf);
    assert!((&nan + &Fraction::one()).is_nan());
    assert!((&inf / &inf).is_nan());
    assert_eq!(&Fraction::one() / &inf, Fraction::zero());
    assert_eq!(&inf / &Fraction::from(3), inf);

    assert_eq!(&Fraction::one() / &Fraction::zero(), inf);
    assert_eq!(&Fraction::from(-2) / &Fraction::zero(), ninf);
    assert!((&Fraction::zero() / &Fraction::zero()).is_nan());

    // equality is structural, so the two (0, 0) pairs compare equal
    assert_eq!(nan, Fraction::nan());

    assert_eq!(inf.to_string(), "inf");
    assert_eq!(ninf.to_string(), "-inf");
    assert_eq!(nan.to_string(), "nan");
    assert!(frac("nan").is_nan());
    assert_eq!(frac("-inf"), ninf);
}

#[test]
fn rounding() {
    let x = Fraction::from((-7, 2));
    assert_eq!(x.floor(), Fraction::from(-4));
    assert_eq!(x.ceil(), Fraction::from(-3));
    assert_eq!(x.truncate(), Fraction::from(-3));
    assert_eq!(x.rounded(RoundingRule::ToNearestOrAwayFromZero), Fraction::from(-4));
}

#[test]
fn double_bridge() {
    assert_eq!(approximate(0.75), (Fraction::from((3, 4)), Precision::Exact));
    assert_eq!(Fraction::from_f64(1. / 3.), Fraction::from((1, 3)));

    let (r, p) = Fraction::from((9, 16)).sqrt_with_precision();
    assert_eq!(r, Fraction::from((3, 4)));
    assert!(p.is_exact());

    let (r, p) = Fraction::from(3).sqrt_with_precision();
    assert!(!p.is_exact());
    assert!((r.to_f64() - 3f64.sqrt()).abs() < 1e-9);

    assert_eq!(Fraction::zero().sin(), Fraction::zero());
    assert_eq!(Fraction::zero().cos(), Fraction::one());
}
