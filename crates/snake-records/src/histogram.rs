use std::ops::RangeInclusive;

/// Frequency of integer values in equal-width bins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramBin {
    pub range: RangeInclusive<usize>,
    pub count: usize,
}

impl Histogram {
    /// Spreads `values` over at most `max_bins` bins covering `min..=max`.
    ///
    /// Bins are at least one unit wide, so a narrow range yields fewer bins.
    ///
    /// ```
    /// # use snake_records::histogram::Histogram;
    /// let histogram = Histogram::new([0, 1, 1, 5, 9], 5);
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, vec![3, 0, 1, 0, 1]);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, max_bins: usize) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
            return Self { bins: vec![] };
        };
        if max_bins == 0 {
            return Self { bins: vec![] };
        }

        let span = max - min + 1;
        let width = span.div_ceil(max_bins);
        let bin_count = span.div_ceil(width);
        let mut bins = (0..bin_count)
            .map(|i| {
                let start = min + i * width;
                HistogramBin {
                    range: start..=(start + width - 1).min(max),
                    count: 0,
                }
            })
            .collect::<Vec<_>>();
        for value in values {
            bins[(value - min) / width].count += 1;
        }
        Self { bins }
    }
}
