/// Hit results of a play and the accuracy they amount to.
///
/// # Example
///
/// ```
/// use rosu_ppv2::Accuracy;
///
/// // 300s are derived from the total amount of objects
/// let acc = Accuracy::from_counts(None, 8, 0, 0, 800);
/// assert_eq!(acc.n300, 792);
///
/// // Hit results are generated for the given accuracy percentage
/// let acc = Accuracy::from_percent(98.5, 800, 1);
/// assert!((acc.value() * 100.0 - 98.5).abs() < 0.1);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Accuracy {
    pub n300: usize,
    pub n100: usize,
    pub n50: usize,
    pub n_misses: usize,
}

impl Accuracy {
    #[inline]
    pub fn new(n300: usize, n100: usize, n50: usize, n_misses: usize) -> Self {
        Self {
            n300,
            n100,
            n50,
            n_misses,
        }
    }

    /// Create hit results where the amount of 300s is derived from
    /// `n_objects` if it's not specified.
    pub fn from_counts(
        n300: Option<usize>,
        n100: usize,
        n50: usize,
        n_misses: usize,
        n_objects: usize,
    ) -> Self {
        let n300 = n300.unwrap_or_else(|| {
            n_objects
                .saturating_sub(n100)
                .saturating_sub(n50)
                .saturating_sub(n_misses)
        });

        Self::new(n300, n100, n50, n_misses)
    }

    /// Generate the hit results closest to the given accuracy percentage between `0` and `100`.
    ///
    /// The percentage is clamped to the maximum accuracy achievable with the given
    /// amount of misses. 100s are preferred over 50s and only if the accuracy is lower
    /// than what all 100s would reach, 50s are used instead. The 50s are solved with
    /// twice the factor of the 100s so any accuracy in that range ends up as all 50s.
    pub fn from_percent(acc_percent: f64, n_objects: usize, n_misses: usize) -> Self {
        let n_misses = n_misses.min(n_objects);
        let max300 = n_objects - n_misses;

        let max_acc = Self::new(max300, 0, 0, n_misses).value() * 100.0;
        let clamped = acc_percent.clamp(0.0, max_acc);

        // NaN input is passed through by clamp
        let clamped = if clamped.is_nan() { max_acc } else { clamped };

        if (clamped - acc_percent).abs() > f64::EPSILON {
            tracing::warn!(
                acc_percent,
                clamped,
                n_misses,
                "accuracy percentage out of range, clamping"
            );
        }

        // Solving `300 * n300 + 100 * n100 = acc * 300 * n_objects` with
        // `n300 = n_objects - n100 - n_misses` for `n100`.
        let missing = (clamped * 0.01 - 1.0) * n_objects as f64 + n_misses as f64;

        let mut n100 = round_count(-3.0 * missing * 0.5);
        let mut n50 = 0;

        if n100 > max300 {
            // Accuracy lower than all 100s, use 50s
            n100 = 0;
            n50 = round_count(-6.0 * missing * 0.5).min(max300);
        }

        let n300 = n_objects - n100 - n50 - n_misses;

        Self::new(n300, n100, n50, n_misses)
    }

    /// The sum of all hit results.
    #[inline]
    pub fn n_objects(&self) -> usize {
        self.n300 + self.n100 + self.n50 + self.n_misses
    }

    /// The accuracy between `0.0` and `1.0`.
    ///
    /// Without any hit results the accuracy is `0.0`.
    pub fn value(&self) -> f64 {
        let n_objects = self.n_objects();

        if n_objects == 0 {
            return 0.0;
        }

        let numerator = self.n50 as f64 * 50.0 + self.n100 as f64 * 100.0 + self.n300 as f64 * 300.0;
        let res = numerator / (n_objects as f64 * 300.0);

        res.clamp(0.0, 1.0)
    }
}

#[inline]
fn round_count(n: f64) -> usize {
    n.round().max(0.0) as usize
}
