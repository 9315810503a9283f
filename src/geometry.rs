//! Lines and planes in three-dimensional space.
//!
//! Points and directions of dimension 2 are embedded in the plane `z = 0`.

use std::fmt::Display;

use crate::{
    domains::rational::Fraction,
    poly::univariate::Polynomial,
    tensors::matrix::{Matrix, Vector},
};

/// The intersection of a line with another line or with a plane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineIntersection {
    /// The objects meet in a single point.
    Point(Vector),
    /// The line lies in the other object.
    Contained,
}

fn embed(v: Vector) -> Vector {
    match v.len() {
        3 => v,
        2 => {
            let mut data = v.data;
            data.push(Fraction::zero());
            Vector { data }
        }
        n => panic!("Geometric objects require vectors of dimension 2 or 3, not {}", n),
    }
}

/// Format a linear combination such as `1 + 2t` or `x - y + (1/2)z`.
/// A term with an empty variable name is a constant.
fn linear_expression(terms: &[(Fraction, &str)]) -> String {
    let mut out = String::new();
    for (c, var) in terms.iter().filter(|(c, _)| !c.is_zero()) {
        let abs = c.abs();
        if out.is_empty() {
            if c.is_negative() {
                out.push('-');
            }
        } else {
            out.push_str(if c.is_negative() { " - " } else { " + " });
        }

        if var.is_empty() {
            out.push_str(&abs.to_string());
        } else {
            if !abs.is_one() {
                if abs.is_integer() {
                    out.push_str(&abs.to_string());
                } else {
                    out.push_str(&format!("({})", abs));
                }
            }
            out.push_str(var);
        }
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}

fn tuple(v: &Vector) -> String {
    let entries: Vec<_> = v.iter().map(|e| e.to_string()).collect();
    format!("({})", entries.join(", "))
}

const AXES: [&str; 3] = ["x", "y", "z"];

/// A line `point + t * direction`, with a direction of coprime integer entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Line {
    point: Vector,
    direction: Vector,
}

impl Line {
    /// # Panics
    ///
    /// Panics if the direction is the zero vector or if a dimension is not 2 or 3.
    pub fn new(point: Vector, direction: Vector) -> Line {
        let direction = embed(direction).simplified();
        if direction.is_zero() {
            panic!("The direction of a line cannot be the zero vector");
        }

        Line {
            point: embed(point),
            direction,
        }
    }

    /// Create the line through the distinct points `a` and `b`.
    pub fn through(a: Vector, b: Vector) -> Line {
        let (a, b) = (embed(a), embed(b));
        let direction = &b - &a;
        Line::new(a, direction)
    }

    /// Create the line `y = m * x + c` in the plane `z = 0`.
    ///
    /// # Panics
    ///
    /// Panics if the polynomial has a degree larger than one.
    pub fn from_polynomial(p: &Polynomial) -> Line {
        if p.degree() > 1 {
            panic!(
                "A line requires a polynomial of degree at most 1, not {}: {}",
                p.degree(),
                p
            );
        }

        Line::new(
            Vector::new(vec![Fraction::zero(), p.constant_term(), Fraction::zero()]),
            Vector::new(vec![Fraction::one(), p.coefficient(1), Fraction::zero()]),
        )
    }

    #[inline]
    pub fn point(&self) -> &Vector {
        &self.point
    }

    #[inline]
    pub fn direction(&self) -> &Vector {
        &self.direction
    }

    pub fn point_at(&self, t: &Fraction) -> Vector {
        &self.point + &self.direction.scale(t)
    }

    pub fn contains(&self, p: &Vector) -> bool {
        let p = embed(p.clone());
        (&p - &self.point).cross_product(&self.direction).is_zero()
    }

    pub fn is_parallel(&self, other: &Line) -> bool {
        self.direction.cross_product(&other.direction).is_zero()
    }

    /// Intersect two lines. Returns `None` for parallel lines that do not coincide
    /// and for skew lines.
    pub fn intersection(&self, other: &Line) -> Option<LineIntersection> {
        if self.is_parallel(other) {
            return if self.contains(&other.point) {
                Some(LineIntersection::Contained)
            } else {
                None
            };
        }

        // solve point + t * direction = other.point + s * other.direction
        let system = Matrix::from_columns(&[self.direction.clone(), -&other.direction]).ok()?;
        let params = system.solve(&(&other.point - &self.point)).ok()?;
        Some(LineIntersection::Point(self.point_at(&params[0])))
    }

    pub fn is_intersection(&self, other: &Line) -> bool {
        self.intersection(other).is_some()
    }

    /// Check if the lines are neither parallel nor intersecting.
    pub fn is_skew(&self, other: &Line) -> bool {
        !self.is_parallel(other) && !self.is_intersection(other)
    }

    pub fn distance_squared_to_point(&self, p: &Vector) -> Fraction {
        let p = embed(p.clone());
        (&p - &self.point).cross_product(&self.direction).norm_squared()
            / self.direction.norm_squared()
    }

    /// Format as `r = (p) + t(d)`.
    pub fn vector_form(&self) -> String {
        format!("r = {} + t{}", tuple(&self.point), tuple(&self.direction))
    }

    /// Format as `x = p_x + d_x t, y = ..., z = ...`.
    pub fn parametric_form(&self) -> String {
        AXES.iter()
            .enumerate()
            .map(|(i, axis)| {
                format!(
                    "{} = {}",
                    axis,
                    linear_expression(&[
                        (self.point[i].clone(), ""),
                        (self.direction[i].clone(), "t")
                    ])
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Format as `(x - p_x)/d_x = (y - p_y)/d_y = ...`, with a separate equation
    /// for every axis along which the line does not move.
    pub fn cartesian_form(&self) -> String {
        let mut ratios = vec![];
        let mut fixed = vec![];

        for (i, axis) in AXES.iter().enumerate() {
            let (p, d) = (&self.point[i], &self.direction[i]);
            if d.is_zero() {
                fixed.push(format!("{} = {}", axis, p));
                continue;
            }

            let offset = linear_expression(&[(Fraction::one(), *axis), (-p, "")]);
            let numerator = if p.is_zero() { offset } else { format!("({})", offset) };
            ratios.push(if d.is_one() {
                numerator
            } else if d.is_negative() || !d.is_integer() {
                format!("{}/({})", numerator, d)
            } else {
                format!("{}/{}", numerator, d)
            });
        }

        let mut equations = vec![ratios.join(" = ")];
        equations.extend(fixed);
        equations.retain(|e| !e.is_empty());
        equations.join(", ")
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.vector_form())
    }
}

/// A plane `point + s * u + t * v` with normal `u x v`. The directions and the
/// normal are stored with coprime integer entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Plane {
    point: Vector,
    directions: [Vector; 2],
    normal: Vector,
}

impl Plane {
    /// # Panics
    ///
    /// Panics if the directions are linearly dependent.
    pub fn new(point: Vector, u: Vector, v: Vector) -> Plane {
        let (u, v) = (embed(u).simplified(), embed(v).simplified());
        let normal = u.cross_product(&v).simplified();
        if normal.is_zero() {
            panic!(
                "The directions of a plane must be linearly independent: {} and {}",
                u, v
            );
        }

        Plane {
            point: embed(point),
            directions: [u, v],
            normal,
        }
    }

    /// Create the plane through three points that are not on a line.
    pub fn from_points(a: Vector, b: Vector, c: Vector) -> Plane {
        let (a, b, c) = (embed(a), embed(b), embed(c));
        let (u, v) = (&b - &a, &c - &a);
        Plane::new(a, u, v)
    }

    /// Create the plane through `point` that is orthogonal to `normal`.
    ///
    /// # Panics
    ///
    /// Panics if the normal is the zero vector.
    pub fn from_normal(point: Vector, normal: Vector) -> Plane {
        let normal = embed(normal);
        if normal.is_zero() {
            panic!("The normal of a plane cannot be the zero vector");
        }

        let mut basis = normal.into_row().solution_space().into_iter();
        match (basis.next(), basis.next()) {
            (Some(u), Some(v)) => Plane::new(point, u, v),
            _ => unreachable!("A non-zero normal has a two-dimensional orthogonal complement"),
        }
    }

    #[inline]
    pub fn point(&self) -> &Vector {
        &self.point
    }

    #[inline]
    pub fn directions(&self) -> &[Vector; 2] {
        &self.directions
    }

    #[inline]
    pub fn normal(&self) -> &Vector {
        &self.normal
    }

    pub fn contains(&self, p: &Vector) -> bool {
        let p = embed(p.clone());
        (&p - &self.point).dot(&self.normal).is_zero()
    }

    pub fn contains_line(&self, line: &Line) -> bool {
        self.contains(line.point()) && line.direction().dot(&self.normal).is_zero()
    }

    pub fn is_parallel(&self, other: &Plane) -> bool {
        self.normal.cross_product(&other.normal).is_zero()
    }

    /// Intersect the plane with a line. Returns `None` if the line is parallel to
    /// the plane and not contained in it.
    pub fn intersect_line(&self, line: &Line) -> Option<LineIntersection> {
        let denominator = self.normal.dot(line.direction());
        if denominator.is_zero() {
            return if self.contains(line.point()) {
                Some(LineIntersection::Contained)
            } else {
                None
            };
        }

        let t = self.normal.dot(&(&self.point - line.point())) / denominator;
        Some(LineIntersection::Point(line.point_at(&t)))
    }

    /// Intersect two planes. Returns `None` for parallel planes, including
    /// coinciding ones.
    pub fn intersect_plane(&self, other: &Plane) -> Option<Line> {
        if self.is_parallel(other) {
            return None;
        }

        let direction = self.normal.cross_product(&other.normal);
        let system = Matrix::from_rows(&[self.normal.clone(), other.normal.clone()]).ok()?;
        let rhs = Vector::new(vec![
            self.normal.dot(&self.point),
            other.normal.dot(&other.point),
        ]);
        let point = system.particular_solution(&rhs).ok()?;

        Some(Line::new(point, direction))
    }

    /// Format as `r = (p) + s(u) + t(v)`.
    pub fn vector_form(&self) -> String {
        format!(
            "r = {} + s{} + t{}",
            tuple(&self.point),
            tuple(&self.directions[0]),
            tuple(&self.directions[1])
        )
    }

    pub fn parametric_form(&self) -> String {
        let [u, v] = &self.directions;
        AXES.iter()
            .enumerate()
            .map(|(i, axis)| {
                format!(
                    "{} = {}",
                    axis,
                    linear_expression(&[
                        (self.point[i].clone(), ""),
                        (u[i].clone(), "s"),
                        (v[i].clone(), "t")
                    ])
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Format as `a x + b y + c z = d`.
    pub fn cartesian_form(&self) -> String {
        let terms: Vec<_> = AXES
            .iter()
            .enumerate()
            .map(|(i, axis)| (self.normal[i].clone(), *axis))
            .collect();
        format!(
            "{} = {}",
            linear_expression(&terms),
            self.normal.dot(&self.point)
        )
    }
}

impl Display for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.cartesian_form())
    }
}

#[cfg(test)]
mod test {
    use super::{Line, LineIntersection, Plane};
    use crate::{domains::rational::Fraction, poly::univariate::Polynomial, tensors::matrix::Vector};

    fn v(data: Vec<i64>) -> Vector {
        Vector::new(data)
    }

    #[test]
    fn lines() {
        let l = Line::through(v(vec![0, 0, 0]), v(vec![1, 1, 1]));
        assert!(l.contains(&v(vec![2, 2, 2])));
        assert!(!l.contains(&v(vec![2, 2, 1])));
        assert_eq!(l.point_at(&Fraction::from(3)), v(vec![3, 3, 3]));

        let x = Line::new(v(vec![0, 0]), v(vec![1, 0]));
        let y = Line::new(v(vec![0, 5, 0]), v(vec![0, 2, 0]));
        assert_eq!(x.intersection(&y), Some(LineIntersection::Point(v(vec![0, 0, 0]))));
        assert!(x.is_intersection(&y));
        assert!(!x.is_skew(&y));

        let z = Line::new(v(vec![0, 1, 1]), v(vec![0, 0, 1]));
        assert!(x.is_skew(&z));
        assert_eq!(x.intersection(&z), None);

        let x2 = Line::new(v(vec![4, 0, 0]), v(vec![-2, 0, 0]));
        assert!(x.is_parallel(&x2));
        assert_eq!(x.intersection(&x2), Some(LineIntersection::Contained));

        assert_eq!(x.distance_squared_to_point(&v(vec![7, 3, 4])), 25);
    }

    #[test]
    #[should_panic(expected = "zero vector")]
    fn degenerate_line() {
        Line::new(v(vec![1, 2, 3]), v(vec![0, 0, 0]));
    }

    #[test]
    fn line_from_polynomial() {
        let l = Line::from_polynomial(&Polynomial::from_coefficients(vec![2, 1]));
        assert!(l.contains(&v(vec![1, 3])));
        assert!(l.contains(&v(vec![-1, -1, 0])));

        let flat = Line::from_polynomial(&Polynomial::from_coefficients(vec![4]));
        assert!(flat.contains(&v(vec![10, 4])));
    }

    #[test]
    #[should_panic(expected = "degree at most 1")]
    fn line_from_quadratic() {
        Line::from_polynomial(&Polynomial::from_coefficients(vec![1, 0, 0]));
    }

    #[test]
    fn line_forms() {
        let l = Line::new(v(vec![1, 0, -2]), v(vec![2, -1, 0]));
        assert_eq!(l.vector_form(), "r = (1, 0, -2) + t(2, -1, 0)");
        assert_eq!(l.parametric_form(), "x = 1 + 2t, y = -t, z = -2");
        assert_eq!(l.cartesian_form(), "(x - 1)/2 = y/(-1), z = -2");
    }

    #[test]
    fn planes() {
        let p = Plane::from_points(v(vec![1, 0, 0]), v(vec![0, 1, 0]), v(vec![0, 0, 1]));
        assert_eq!(p.normal(), &v(vec![1, 1, 1]));
        assert_eq!(p.cartesian_form(), "x + y + z = 1");
        assert!(p.contains(&Vector::new(vec![Fraction::from((1, 2)), Fraction::from((1, 2)), Fraction::zero()])));

        let diagonal = Line::new(v(vec![0, 0, 0]), v(vec![1, 1, 1]));
        let third = Fraction::from((1, 3));
        assert_eq!(
            p.intersect_line(&diagonal),
            Some(LineIntersection::Point(Vector::new(vec![third.clone(), third.clone(), third])))
        );

        let edge = Line::through(v(vec![1, 0, 0]), v(vec![0, 1, 0]));
        assert!(p.contains_line(&edge));
        assert_eq!(p.intersect_line(&edge), Some(LineIntersection::Contained));

        let shifted = Line::new(v(vec![0, 0, 0]), v(vec![1, -1, 0]));
        assert_eq!(p.intersect_line(&shifted), None);
    }

    #[test]
    fn plane_intersection() {
        let xy = Plane::from_normal(v(vec![0, 0, 0]), v(vec![0, 0, 1]));
        let yz = Plane::from_normal(v(vec![0, 0, 0]), v(vec![1, 0, 0]));
        assert_eq!(xy.directions(), &[v(vec![1, 0, 0]), v(vec![0, 1, 0])]);

        let l = xy.intersect_plane(&yz).unwrap();
        assert_eq!(l.direction(), &v(vec![0, 1, 0]));
        assert_eq!(l.point(), &v(vec![0, 0, 0]));

        let lifted = Plane::from_normal(v(vec![0, 0, 2]), v(vec![0, 0, 3]));
        assert!(xy.is_parallel(&lifted));
        assert_eq!(xy.intersect_plane(&lifted), None);
        assert_eq!(lifted.cartesian_form(), "z = 2");
        assert_eq!(xy.parametric_form(), "x = s, y = t, z = 0");
    }

    #[test]
    #[should_panic(expected = "linearly independent")]
    fn degenerate_plane() {
        Plane::new(v(vec![0, 0, 0]), v(vec![1, 2, 3]), v(vec![2, 4, 6]));
    }
}
