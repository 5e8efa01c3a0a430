//! Greedy row grouping by vertical position.

/// Vertical distance within which siblings share a row.
pub const Y_TOLERANCE: f64 = 5.0;

/// Group items into rows.
///
/// Items are sorted top-to-bottom then left-to-right. Each row is anchored
/// at the y of its first member; an item joins the row while its y is within
/// `tolerance` of that anchor (inclusive). Items inside a row are ordered by x.
///
/// Anchoring at the first member means a slow drift (0, 4, 8) splits into
/// two rows even though consecutive gaps are all within tolerance.
pub fn group_rows<T>(items: Vec<T>, position: impl Fn(&T) -> (f64, f64), tolerance: f64) -> Vec<Vec<T>> {
    let mut keyed: Vec<((f64, f64), T)> = items.into_iter().map(|item| (position(&item), item)).collect();
    keyed.sort_by(|(a, _), (b, _)| a.1.total_cmp(&b.1).then(a.0.total_cmp(&b.0)));

    let mut rows: Vec<Vec<((f64, f64), T)>> = Vec::new();
    let mut anchor = f64::NAN;

    for (pos, item) in keyed {
        match rows.last_mut() {
            Some(row) if (pos.1 - anchor).abs() <= tolerance => row.push((pos, item)),
            _ => {
                anchor = pos.1;
                rows.push(vec![(pos, item)]);
            }
        }
    }

    rows.into_iter()
        .map(|mut row| {
            row.sort_by(|(a, _), (b, _)| a.0.total_cmp(&b.0));
            row.into_iter().map(|(_, item)| item).collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rows_of(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
        group_rows(points.to_vec(), |p| *p, Y_TOLERANCE)
    }

    #[test]
    fn test_two_rows() {
        let rows = rows_of(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (0.0, 50.0), (10.0, 50.0)]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 2);
    }

    #[test]
    fn test_tolerance_boundary() {
        assert_eq!(rows_of(&[(0.0, 0.0), (10.0, 4.0)]).len(), 1);
        assert_eq!(rows_of(&[(0.0, 0.0), (10.0, 5.0)]).len(), 1);
        assert_eq!(rows_of(&[(0.0, 0.0), (10.0, 6.0)]).len(), 2);
    }

    #[test]
    fn test_rows_anchor_at_first_member() {
        let rows = rows_of(&[(0.0, 0.0), (10.0, 4.0), (20.0, 8.0)]);
        assert_eq!(rows, vec![vec![(0.0, 0.0), (10.0, 4.0)], vec![(20.0, 8.0)]]);
    }

    #[test]
    fn test_row_members_ordered_by_x() {
        let rows = rows_of(&[(30.0, 2.0), (10.0, 0.0), (20.0, 1.0)]);
        let xs: Vec<f64> = rows[0].iter().map(|p| p.0).collect();
        assert_eq!(xs, [10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_empty_input() {
        assert!(rows_of(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_rows_partition_items(ys in prop::collection::vec(0u16..400, 0..40)) {
            let points: Vec<(f64, f64)> = ys.iter().enumerate().map(|(i, y)| (i as f64, f64::from(*y))).collect();
            let rows = rows_of(&points);

            prop_assert_eq!(rows.iter().map(Vec::len).sum::<usize>(), points.len());

            let mut previous_anchor = f64::NEG_INFINITY;
            for row in &rows {
                let anchor = row.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
                prop_assert!(anchor > previous_anchor);
                for point in row {
                    prop_assert!((point.1 - anchor).abs() <= Y_TOLERANCE);
                }
                previous_anchor = anchor;
            }
        }
    }
}
