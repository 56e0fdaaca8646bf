use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Source clock unit: 100 ns ticks since 0001-01-01T00:00:00.
pub type Ticks = i64;

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    #[serde(deserialize_with = "deserialize_ticks")]
    pub x: Ticks,
    pub y: f64,
}

impl Point {
    pub fn new(x: Ticks, y: f64) -> Self {
        Self { x, y }
    }
}

/// Truncates a floating tick value toward zero. `None` when it is not
/// finite or does not fit in [`Ticks`].
pub fn ticks_from_f64(v: f64) -> Option<Ticks> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    let t = v.trunc();
    if t.is_finite() && t >= Ticks::MIN as f64 && t < Ticks::MAX as f64 {
        Some(t as Ticks)
    } else {
        None
    }
}

/// Accepts both integer and floating JSON numbers for a tick value.
/// Floating values are truncated toward zero.
pub fn deserialize_ticks<'de, D>(deserializer: D) -> Result<Ticks, D::Error>
where
    D: Deserializer<'de>,
{
    struct TicksVisitor;

    impl<'de> Visitor<'de> for TicksVisitor {
        type Value = Ticks;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a tick count")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Ticks, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Ticks, E> {
            Ticks::try_from(v).map_err(|_| E::custom(format!("tick value {v} out of range")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Ticks, E> {
            ticks_from_f64(v).ok_or_else(|| E::custom(format!("tick value {v} out of range")))
        }
    }

    deserializer.deserialize_any(TicksVisitor)
}

/// One labeled, x-ascending point sequence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<Point>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_point(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Restores the ascending-x invariant. Stable, so equal timestamps keep
    /// their arrival order.
    pub fn sort_by_x(&mut self) {
        if !self.points.windows(2).all(|w| w[0].x <= w[1].x) {
            self.points.sort_by_key(|p| p.x);
        }
    }
}

/// Result of one fetch cycle. Series keep the order the source produced
/// them in; the last one is the primary series.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Snapshot {
    series: Vec<Series>,
}

impl Snapshot {
    pub fn new(series: Vec<Series>) -> Self {
        Self { series }
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn series_mut(&mut self) -> &mut [Series] {
        &mut self.series
    }

    pub fn into_series(self) -> Vec<Series> {
        self.series
    }

    pub fn get(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// A snapshot without series. Valid, but nothing to merge.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    /// The series whose last point drives the cursor and which is drawn
    /// with the highlight color.
    pub fn primary_series(&self) -> Option<&Series> {
        self.series.last()
    }

    pub fn primary_series_label(&self) -> Option<&str> {
        self.primary_series().map(|s| s.label.as_str())
    }

    /// Largest x across every point of every series. Does not rely on the
    /// series being sorted.
    pub fn max_timestamp(&self) -> Option<Ticks> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.x))
            .max()
    }

    /// Drops every point with `x <= newest`, and then every series left empty.
    pub fn retain_newer_than(&mut self, newest: Ticks) {
        for s in &mut self.series {
            s.points.retain(|p| p.x > newest);
        }
        self.series.retain(|s| !s.is_empty());
    }

    pub fn sort_series(&mut self) {
        for s in &mut self.series {
            s.sort_by_x();
        }
    }
}

impl FromIterator<Series> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Series>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// Map encoding: `{ "label": [ {x, y}, ... ], ... }`, key order preserved.
impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = Snapshot;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of series label to point list")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Snapshot, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut series: Vec<Series> = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, points)) = map.next_entry::<String, PointList>()? {
                    if series.iter().any(|s| s.label == label) {
                        return Err(de::Error::custom(format!("duplicate series label `{label}`")));
                    }
                    series.push(Series::new(label, points.0));
                }
                Ok(Snapshot::new(series))
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}

struct PointList(Vec<Point>);

impl<'de> Deserialize<'de> for PointList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PointListVisitor;

        impl<'de> Visitor<'de> for PointListVisitor {
            type Value = PointList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a list of points")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<PointList, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut points = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(p) = seq.next_element::<Point>()? {
                    points.push(p);
                }
                Ok(PointList(points))
            }
        }

        deserializer.deserialize_seq(PointListVisitor)
    }
}
