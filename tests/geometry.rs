use fracalg::{
    domains::rational::Fraction,
    geometry::{Line, LineIntersection, Plane},
    poly::univariate::Polynomial,
    tensors::matrix::Vector,
};

fn v(data: Vec<i64>) -> Vector {
    Vector::new(data)
}

#[test]
fn canonical_directions() {
    let l = Line::new(v(vec![1, 1, 1]), Vector::new(vec![
        Fraction::from((-1, 2)),
        Fraction::from((1, 4)),
        Fraction::zero(),
    ]));
    assert_eq!(l.direction(), &v(vec![2, -1, 0]));
    assert_eq!(l.to_string(), "r = (1, 1, 1) + t(2, -1, 0)");

    let p = Plane::new(v(vec![0, 0, 0]), v(vec![2, 0, 0]), v(vec![0, 0, -3]));
    assert_eq!(p.directions(), &[v(vec![1, 0, 0]), v(vec![0, 0, 1])]);
    assert_eq!(p.normal(), &v(vec![0, 1, 0]));
    assert_eq!(p.to_string(), "y = 0");
}

#[test]
fn lines_in_the_plane() {
    // y = 2x + 1 and y = -x + 4 meet at (1, 3)
    let a = Line::from_polynomial(&Polynomial::from_coefficients(vec![2, 1]));
    let b = Line::from_polynomial(&Polynomial::from_coefficients(vec![-1, 4]));
    assert_eq!(
        a.intersection(&b),
        Some(LineIntersection::Point(v(vec![1, 3, 0])))
    );

    let c = Line::from_polynomial(&Polynomial::from_coefficients(vec![2, -5]));
    assert!(a.is_parallel(&c));
    assert!(!a.is_intersection(&c));
    assert!(!a.is_skew(&c));
}

#[test]
fn skew_lines() {
    let a = Line::through(v(vec![0, 0, 0]), v(vec![1, 0, 0]));
    let b = Line::through(v(vec![0, 1, 1]), v(vec![0, 2, 1]));
    assert!(a.is_skew(&b));
    assert_eq!(a.distance_squared_to_point(&v(vec![5, 1, 1])), Fraction::from(2));
}

#[test]
fn forms() {
    let l = Line::new(v(vec![0, 2, 0]), v(vec![1, 0, 3]));
    assert_eq!(l.parametric_form(), "x = t, y = 2, z = 3t");
    assert_eq!(l.cartesian_form(), "x = z/3, y = 2");

    let p = Plane::from_normal(v(vec![1, 2, 3]), v(vec![1, -2, 1]));
    assert_eq!(p.cartesian_form(), "x - 2y + z = 0");
    assert!(p.contains(&v(vec![1, 2, 3])));
}

#[test]
fn planes() {
    let floor = Plane::from_points(v(vec![0, 0, 0]), v(vec![1, 0, 0]), v(vec![0, 1, 0]));
    let wall = Plane::from_normal(v(vec![2, 0, 0]), v(vec![1, 0, 0]));

    let edge = floor.intersect_plane(&wall).unwrap();
    assert!(floor.contains_line(&edge));
    assert!(wall.contains_line(&edge));
    assert!(edge.contains(&v(vec![2, 7, 0])));

    let vertical = Line::new(v(vec![3, 4, 5]), v(vec![0, 0, 1]));
    assert_eq!(
        floor.intersect_line(&vertical),
        Some(LineIntersection::Point(v(vec![3, 4, 0])))
    );
    assert_eq!(wall.intersect_line(&vertical), None);

    let ceiling = Plane::from_normal(v(vec![0, 0, 9]), v(vec![0, 0, -2]));
    assert!(floor.is_parallel(&ceiling));
    assert_eq!(floor.intersect_plane(&ceiling), None);
}
