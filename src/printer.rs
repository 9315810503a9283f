use std::fmt::{self, Display};

use smartstring::{LazyCompact, SmartString};

use crate::{
    domains::rational::Fraction,
    poly::univariate::Polynomial,
    tensors::matrix::{Matrix, Vector},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrintMode {
    /// The textual form that can be parsed back, e.g. `[[1, 2/3], [3, 4]]`.
    Plain,
    /// A LaTeX expression, e.g. `\begin{bmatrix}1 & \frac{2}{3} \\ 3 & 4\end{bmatrix}`.
    Latex,
}

/// Options that control how vectors, matrices, polynomials and fractions are printed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PrintOptions {
    pub mode: PrintMode,
    /// Print every matrix row on its own line with right-aligned columns.
    /// Only used in plain mode.
    pub align_columns: bool,
}

impl PrintOptions {
    pub const fn plain() -> PrintOptions {
        PrintOptions {
            mode: PrintMode::Plain,
            align_columns: false,
        }
    }

    /// Plain output with one matrix row per line.
    pub const fn tabular() -> PrintOptions {
        PrintOptions {
            mode: PrintMode::Plain,
            align_columns: true,
        }
    }

    pub const fn latex() -> PrintOptions {
        PrintOptions {
            mode: PrintMode::Latex,
            align_columns: false,
        }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions::plain()
    }
}

pub struct FractionPrinter<'a> {
    pub fraction: &'a Fraction,
    pub options: PrintOptions,
}

impl<'a> FractionPrinter<'a> {
    pub fn new(fraction: &'a Fraction) -> FractionPrinter<'a> {
        FractionPrinter {
            fraction,
            options: PrintOptions::default(),
        }
    }

    pub fn new_with_options(fraction: &'a Fraction, options: PrintOptions) -> FractionPrinter<'a> {
        FractionPrinter { fraction, options }
    }
}

impl<'a> Display for FractionPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let x = self.fraction;
        if self.options.mode == PrintMode::Plain {
            return Display::fmt(x, f);
        }

        if x.is_nan() {
            f.write_str("\\mathrm{NaN}")
        } else if x.is_infinite() {
            f.write_str(if x.is_negative() { "-\\infty" } else { "\\infty" })
        } else if x.is_integer() {
            write!(f, "{}", x.numerator())
        } else {
            if x.is_negative() {
                f.write_str("-")?;
            }
            write!(
                f,
                "\\frac{{{}}}{{{}}}",
                x.numerator().abs(),
                x.denominator()
            )
        }
    }
}

pub struct VectorPrinter<'a> {
    pub vector: &'a Vector,
    pub options: PrintOptions,
}

impl<'a> VectorPrinter<'a> {
    pub fn new(vector: &'a Vector) -> VectorPrinter<'a> {
        VectorPrinter {
            vector,
            options: PrintOptions::default(),
        }
    }

    pub fn new_with_options(vector: &'a Vector, options: PrintOptions) -> VectorPrinter<'a> {
        VectorPrinter { vector, options }
    }
}

impl<'a> Display for VectorPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries: Vec<String> = self
            .vector
            .iter()
            .map(|e| FractionPrinter::new_with_options(e, self.options).to_string())
            .collect();

        match self.options.mode {
            // column vector
            PrintMode::Latex => write!(f, "\\begin{{bmatrix}}{}\\end{{bmatrix}}", entries.join(" \\\\ ")),
            PrintMode::Plain => write!(f, "[{}]", entries.join(", ")),
        }
    }
}

pub struct MatrixPrinter<'a> {
    pub matrix: &'a Matrix,
    pub options: PrintOptions,
}

impl<'a> MatrixPrinter<'a> {
    pub fn new(matrix: &'a Matrix) -> MatrixPrinter<'a> {
        MatrixPrinter {
            matrix,
            options: PrintOptions::default(),
        }
    }

    pub fn new_with_options(matrix: &'a Matrix, options: PrintOptions) -> MatrixPrinter<'a> {
        MatrixPrinter { matrix, options }
    }
}

impl<'a> Display for MatrixPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let m = self.matrix;
        if m.nrows() == 0 || m.ncols() == 0 {
            return match self.options.mode {
                PrintMode::Latex => f.write_str("\\begin{bmatrix}\\end{bmatrix}"),
                PrintMode::Plain => f.write_str("[]"),
            };
        }

        let entries: Vec<Vec<String>> = m
            .row_iter()
            .map(|r| {
                r.iter()
                    .map(|e| FractionPrinter::new_with_options(e, self.options).to_string())
                    .collect()
            })
            .collect();

        if self.options.mode == PrintMode::Latex {
            let rows: Vec<String> = entries.iter().map(|r| r.join(" & ")).collect();
            return write!(f, "\\begin{{bmatrix}}{}\\end{{bmatrix}}", rows.join(" \\\\ "));
        }

        if !self.options.align_columns {
            let rows: Vec<String> = entries
                .iter()
                .map(|r| format!("[{}]", r.join(", ")))
                .collect();
            return write!(f, "[{}]", rows.join(", "));
        }

        let widths: Vec<usize> = (0..m.ncols())
            .map(|c| entries.iter().map(|r| r[c].len()).max().unwrap_or(0))
            .collect();

        f.write_str("[")?;
        for (i, r) in entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",\n ")?;
            }
            f.write_str("[")?;
            for (j, (e, w)) in r.iter().zip(&widths).enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{:>w$}", e, w = *w)?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}

pub struct PolynomialPrinter<'a> {
    pub polynomial: &'a Polynomial,
    pub options: PrintOptions,
    pub variable: SmartString<LazyCompact>,
}

impl<'a> PolynomialPrinter<'a> {
    pub fn new(polynomial: &'a Polynomial) -> PolynomialPrinter<'a> {
        PolynomialPrinter::new_with_options(polynomial, PrintOptions::default())
    }

    pub fn new_with_options(
        polynomial: &'a Polynomial,
        options: PrintOptions,
    ) -> PolynomialPrinter<'a> {
        PolynomialPrinter {
            polynomial,
            options,
            variable: "x".into(),
        }
    }

    /// Print the polynomial in the variable `name` instead of `x`.
    pub fn with_variable(mut self, name: &str) -> PolynomialPrinter<'a> {
        self.variable = name.into();
        self
    }
}

impl<'a> Display for PolynomialPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let p = self.polynomial.simplified();
        if p.is_zero() {
            return f.write_str("0");
        }

        let latex = self.options.mode == PrintMode::Latex;
        let degree = p.degree();

        let mut first = true;
        for (i, c) in p.coefficients().iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let power = degree - i;

            if first {
                if c.is_negative() {
                    f.write_str("-")?;
                }
            } else {
                f.write_str(if c.is_negative() { " - " } else { " + " })?;
            }
            first = false;

            let abs = c.abs();
            let coeff = FractionPrinter::new_with_options(&abs, self.options);
            if power == 0 {
                write!(f, "{}", coeff)?;
                continue;
            }

            if !abs.is_one() {
                if abs.is_integer() || latex || !abs.is_finite() {
                    write!(f, "{}", coeff)?;
                } else {
                    write!(f, "({})", coeff)?;
                }
            }

            f.write_str(&self.variable)?;
            if power > 1 {
                if latex {
                    write!(f, "^{{{}}}", power)?;
                } else {
                    write!(f, "^{}", power)?;
                }
            }
        }

        Ok(())
    }
}
