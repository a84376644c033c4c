//! Integer space distribution along one axis.
//!
//! Given each item's preferred length and expand flag, split an available
//! length into item lengths. Three regimes apply, compared against the total
//! preferred length `fixed_sum + expandable_sum + (n - 1) * space`:
//!
//! - **Exact fit**: every item gets its preferred length.
//! - **Surplus**: fixed items keep their preferred length; the room left
//!   after fixed items and spacing goes to expandable items in proportion to
//!   their preferred lengths (equal split if all of them prefer zero).
//! - **Deficit**: with `widgets = available - (n - 1) * space`:
//!   - `widgets <= 0`: every item collapses to zero;
//!   - `widgets <= fixed_sum`: expandable items get zero and fixed items share
//!     `widgets` in proportion to their preferred lengths;
//!   - otherwise expandable items share `widgets - fixed_sum` in proportion
//!     to their preferred lengths and fixed items keep theirs.
//!
//! All splits use integer division. Pixels lost to truncation are not
//! redistributed; offsets come from a running cursor, so drift shows up as
//! slack after the last item.

/// One item's demand along the axis being solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisItem {
    pub preferred: i32,
    pub expand: bool,
}

impl AxisItem {
    pub const fn new(preferred: i32, expand: bool) -> Self {
        Self { preferred, expand }
    }
}

/// Which of the three regimes a distribution ran in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    ExactFit,
    Surplus,
    Deficit,
}

/// Pick the regime for `items` in `available` with `space` between items.
pub fn regime(items: &[AxisItem], available: i32, space: i32) -> Regime {
    let total = total_preferred(items, space);
    match available.cmp(&total) {
        std::cmp::Ordering::Equal => Regime::ExactFit,
        std::cmp::Ordering::Greater => Regime::Surplus,
        std::cmp::Ordering::Less => Regime::Deficit,
    }
}

/// Sum of preferred lengths plus spacing.
pub fn total_preferred(items: &[AxisItem], space: i32) -> i32 {
    if items.is_empty() {
        return 0;
    }
    items.iter().map(|item| item.preferred).sum::<i32>() + gaps(items.len(), space)
}

/// Lengths for each item.
pub fn distribute(items: &[AxisItem], available: i32, space: i32) -> Vec<i32> {
    if items.is_empty() {
        return Vec::new();
    }

    let (fixed_sum, expandable_sum, expandable_count) =
        items
            .iter()
            .fold((0i64, 0i64, 0i64), |(fixed, exp, count), item| {
                if item.expand {
                    (fixed, exp + item.preferred as i64, count + 1)
                } else {
                    (fixed + item.preferred as i64, exp, count)
                }
            });
    let gaps = gaps(items.len(), space) as i64;
    let available = available as i64;
    let total = fixed_sum + expandable_sum + gaps;

    let lengths: Vec<i64> = if available == total {
        items.iter().map(|item| item.preferred as i64).collect()
    } else if available > total {
        let expandable_width = available - fixed_sum - gaps;
        items
            .iter()
            .map(|item| {
                if !item.expand {
                    item.preferred as i64
                } else if expandable_sum > 0 {
                    expandable_width * item.preferred as i64 / expandable_sum
                } else {
                    expandable_width / expandable_count
                }
            })
            .collect()
    } else {
        let widgets_width = available - gaps;
        if widgets_width <= 0 {
            vec![0; items.len()]
        } else if widgets_width <= fixed_sum {
            items
                .iter()
                .map(|item| {
                    if item.expand || fixed_sum == 0 {
                        0
                    } else {
                        widgets_width * item.preferred as i64 / fixed_sum
                    }
                })
                .collect()
        } else {
            let expandable_width = widgets_width - fixed_sum;
            items
                .iter()
                .map(|item| {
                    if !item.expand {
                        item.preferred as i64
                    } else if expandable_sum > 0 {
                        expandable_width * item.preferred as i64 / expandable_sum
                    } else {
                        0
                    }
                })
                .collect()
        }
    };

    lengths
        .into_iter()
        .map(|length| length.clamp(0, i32::MAX as i64) as i32)
        .collect()
}

/// Offsets from the start of the axis, advancing a cursor by `length + space`.
pub fn offsets(lengths: &[i32], space: i32) -> Vec<i32> {
    let mut cursor = 0;
    lengths
        .iter()
        .map(|&length| {
            let offset = cursor;
            cursor += length + space;
            offset
        })
        .collect()
}

fn gaps(count: usize, space: i32) -> i32 {
    (count.saturating_sub(1) as i32).saturating_mul(space)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(preferred: i32) -> AxisItem {
        AxisItem::new(preferred, false)
    }

    fn expanding(preferred: i32) -> AxisItem {
        AxisItem::new(preferred, true)
    }

    #[test]
    fn test_exact_fit() {
        let items = [fixed(100), fixed(80), fixed(100)];
        assert_eq!(regime(&items, 300, 10), Regime::ExactFit);
        let lengths = distribute(&items, 300, 10);
        assert_eq!(lengths, vec![100, 80, 100]);
        assert_eq!(offsets(&lengths, 10), vec![0, 110, 200]);
    }

    #[test]
    fn test_deficit_shrinks_fixed_proportionally() {
        let items = [fixed(100), fixed(80), fixed(100)];
        assert_eq!(regime(&items, 150, 10), Regime::Deficit);
        let lengths = distribute(&items, 150, 10);
        assert_eq!(lengths, vec![46, 37, 46]);
        assert_eq!(offsets(&lengths, 10), vec![0, 56, 103]);
    }

    #[test]
    fn test_deficit_expandables_absorb_first() {
        let items = [fixed(50), expanding(100), expanding(50)];
        // widgets = 170 - 20 = 150, fixed keeps 50, expandables share 100 as 2:1.
        let lengths = distribute(&items, 170, 10);
        assert_eq!(lengths, vec![50, 66, 33]);
    }

    #[test]
    fn test_deficit_fixed_overflow_zeroes_expandables() {
        let items = [fixed(60), expanding(100), fixed(40)];
        // widgets = 70 - 20 = 50 <= fixed_sum 100.
        let lengths = distribute(&items, 70, 10);
        assert_eq!(lengths, vec![30, 0, 20]);
    }

    #[test]
    fn test_deficit_degenerate_collapses_all() {
        let items = [fixed(10), expanding(10), fixed(10)];
        assert_eq!(distribute(&items, 20, 10), vec![0, 0, 0]);
        assert_eq!(distribute(&items, 5, 10), vec![0, 0, 0]);
    }

    #[test]
    fn test_surplus_proportional() {
        let items = [expanding(20), fixed(30), expanding(60)];
        // expandable room = 230 - 30 - 20 = 180, split 1:3.
        let lengths = distribute(&items, 230, 10);
        assert_eq!(lengths, vec![45, 30, 135]);

        let extra_a = lengths[0] - 20;
        let extra_c = lengths[2] - 60;
        assert_eq!(extra_c, 3 * extra_a);
    }

    #[test]
    fn test_surplus_zero_preferred_splits_equally() {
        let items = [expanding(0), expanding(0), fixed(10)];
        assert_eq!(distribute(&items, 110, 0), vec![50, 50, 10]);
    }

    #[test]
    fn test_surplus_without_expandables_keeps_preferred() {
        let items = [fixed(10), fixed(20)];
        assert_eq!(distribute(&items, 500, 5), vec![10, 20]);
    }

    #[test]
    fn test_rounding_is_not_corrected() {
        let items = [expanding(1), expanding(1), expanding(1)];
        let lengths = distribute(&items, 100, 0);
        assert_eq!(lengths, vec![33, 33, 33]);
        assert_eq!(lengths.iter().sum::<i32>(), 99);
    }

    #[test]
    fn test_empty() {
        assert!(distribute(&[], 100, 10).is_empty());
        assert_eq!(total_preferred(&[], 10), 0);
    }

    #[test]
    fn test_single_item_has_no_spacing() {
        assert_eq!(total_preferred(&[fixed(40)], 10), 40);
        assert_eq!(distribute(&[expanding(40)], 90, 10), vec![90]);
    }
}
