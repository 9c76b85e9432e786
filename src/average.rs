use crate::model::Medicine;

/// Mean of the numeric prices. Records whose price is missing or not a
/// number are left out of both the sum and the count.
///
/// Kept as a running mean so prices near `f64::MAX` don't overflow a sum.
pub fn average_price(medicines: &[Medicine]) -> Option<f64> {
  let (mean, count) = medicines
    .iter()
    .filter_map(Medicine::numeric_price)
    .fold((0.0_f64, 0_usize), |(mean, count), price| {
      let count = count + 1;
      (mean + (price - mean) / count as f64, count)
    });

  if count == 0 { None } else { Some(mean) }
}
