//! Property-based tests for containment and damage accounting

use proptest::prelude::*;

use termpad::{Cell, Dimensions, Display, Error};

const DIMS: Dimensions = Dimensions { rows: 24, cols: 80 };

proptest! {
    /// Any subpad whose bounds fit inside the parent is created, and
    /// writes through it alias the parent at the shifted offset.
    #[test]
    fn subpad_containment_and_aliasing(
        parent_rows in 1usize..40,
        parent_cols in 1usize..40,
        begin_y in 0usize..40,
        begin_x in 0usize..40,
        nlines in 1usize..40,
        ncols in 1usize..40,
    ) {
        let d = Display::new(DIMS, ()).unwrap();
        let mut parent = d.new_pad(parent_rows, parent_cols).unwrap();
        let fits = begin_y + nlines <= parent_rows && begin_x + ncols <= parent_cols;

        match d.sub_pad(&parent, nlines, ncols, begin_y, begin_x) {
            Ok(mut sub) => {
                prop_assert!(fits);
                sub.set_cell(0, 0, Cell::new('M'));
                prop_assert_eq!(parent.cell(begin_y, begin_x).unwrap().ch, 'M');
                parent.set_cell(begin_y + nlines - 1, begin_x + ncols - 1, Cell::new('P'));
                prop_assert_eq!(sub.cell(nlines - 1, ncols - 1).unwrap().ch, 'P');
            }
            Err(err) => {
                prop_assert!(!fits);
                prop_assert!(
                    matches!(err, Error::Containment { .. }),
                    "expected Error::Containment, got {:?}",
                    err
                );
            }
        }
    }

    /// The virtual screen's dirty range after two refreshes on the same
    /// row is exactly the union of the two destination column ranges.
    #[test]
    fn damage_union_is_exact(
        a_first in 0usize..80,
        a_last in 0usize..80,
        b_first in 0usize..80,
        b_last in 0usize..80,
    ) {
        let (a_first, a_last) = (a_first.min(a_last), a_first.max(a_last));
        let (b_first, b_last) = (b_first.min(b_last), b_first.max(b_last));

        let mut d = Display::new(DIMS, ()).unwrap();
        let mut pad = d.new_pad(1, 80).unwrap();

        d.refresh_virtual_only(&mut pad, 0, 0, 0, a_first, 0, a_last).unwrap();
        d.refresh_virtual_only(&mut pad, 0, 0, 0, b_first, 0, b_last).unwrap();

        let span = d.virtual_screen().row_damage(0).unwrap().span().unwrap();
        prop_assert_eq!(span, (a_first.min(b_first), a_last.max(b_last)));
    }

    /// Refreshing any valid viewport clears exactly the pad rows it
    /// covered and leaves the others owing their damage.
    #[test]
    fn refresh_clears_only_covered_rows(
        pad_rows in 2usize..30,
        py in 0usize..30,
        height in 1usize..24,
    ) {
        let mut d = Display::new(DIMS, ()).unwrap();
        let mut pad = d.new_pad(pad_rows, 10).unwrap();
        for row in 0..pad_rows {
            pad.set_cell(row, 0, Cell::new('x'));
        }

        d.refresh_virtual_only(&mut pad, py, 0, 0, 0, height - 1, 9).unwrap();

        for row in 0..pad_rows {
            let covered = row >= py && row < py + height;
            prop_assert_eq!(pad.row_damage(row).unwrap().is_clean(), covered);
        }
    }
}
