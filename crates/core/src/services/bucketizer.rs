use chrono::NaiveDateTime;
use std::collections::HashMap;

use crate::models::range::TimeRange;
use crate::models::rate::RawRatePoint;
use crate::models::series::{BucketReduction, LabeledSeries};

/// x-axis label for a single point in `range`.
///
/// - 24H: `HH:MM`
/// - 7D: `DD Mon`
/// - 1M: `Mon DD`
/// - 6M: `Mon YYYY`
/// - 1Y: `Mon` (the year is dropped, so the same month a year apart shares a label)
pub fn format_label(timestamp: NaiveDateTime, range: TimeRange) -> String {
    let pattern = match range {
        TimeRange::Day => "%H:%M",
        TimeRange::Week => "%d %b",
        TimeRange::Month => "%b %d",
        TimeRange::HalfYear => "%b %Y",
        TimeRange::Year => "%b",
    };
    timestamp.format(pattern).to_string()
}

/// Bucketize with the default reduction (first value per bucket).
pub fn bucketize(points: &[RawRatePoint], range: TimeRange) -> LabeledSeries {
    bucketize_with(points, range, BucketReduction::First)
}

/// Turn ordered raw points into a chart series for `range`.
///
/// 24H / 7D / 1M produce one bucket per point. 6M / 1Y keep one bucket
/// per distinct label, in order of first appearance, and reduce the
/// `closeBid` of every point in the bucket with `reduction`.
///
/// `points` must be ascending by timestamp. Empty input yields an empty series.
pub fn bucketize_with(
    points: &[RawRatePoint],
    range: TimeRange,
    reduction: BucketReduction,
) -> LabeledSeries {
    if !range.is_deduplicated() {
        let mut series = LabeledSeries::new();
        for point in points {
            series.push(format_label(point.timestamp, range), point.close_bid);
        }
        return series;
    }

    // (label, first value, running sum, count) in order of first appearance
    let mut buckets: Vec<(String, f64, f64, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for point in points {
        let label = format_label(point.timestamp, range);
        match index.get(&label) {
            Some(&idx) => {
                let bucket = &mut buckets[idx];
                bucket.2 += point.close_bid;
                bucket.3 += 1;
            }
            None => {
                index.insert(label.clone(), buckets.len());
                buckets.push((label, point.close_bid, point.close_bid, 1));
            }
        }
    }

    let mut series = LabeledSeries::new();
    for (label, first, sum, count) in buckets {
        let value = match reduction {
            BucketReduction::First => first,
            BucketReduction::Average => sum / count as f64,
        };
        series.push(label, value);
    }
    series
}
