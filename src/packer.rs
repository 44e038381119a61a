use std::cmp::Reverse;

use crate::types::{PackReport, Rect, Shelf};

/// Non-rotated containment check. Callers try both orientations when
/// rotation is allowed.
pub fn fits(item: Rect, bound: Rect) -> bool {
    item.fits_in(&bound)
}

/// Whether every item can be loaded into `bound` by the shelf heuristic.
pub fn can_pack(items: &[Rect], bound: Rect) -> bool {
    ShelfPacker::new(bound).run(items).fits
}

/// Greedy first-fit shelf packer.
///
/// Rows run along the truck's length. Each item occupies its short side
/// along a row and widens the row to its long side. New rows are only opened
/// while the summed row widths leave room across the truck; rows that widen
/// afterwards are not re-checked against that budget.
pub struct ShelfPacker {
    bound: Rect,
}

impl ShelfPacker {
    pub fn new(bound: Rect) -> Self {
        Self { bound }
    }

    pub fn run(&self, items: &[Rect]) -> PackReport {
        let items = sort_for_packing(items);
        let total = items.len();
        let mut shelves: Vec<Shelf> = Vec::new();

        for (placed, &item) in items.iter().enumerate() {
            if let Some(idx) = self.first_fit(&shelves, item) {
                shelves[idx].push(item);
                tracing::debug!(%item, row = idx, "placed in existing row");
                continue;
            }

            let budget = Rect::new(self.bound.length, self.remaining_width(&shelves));
            if item.fits_in_any_orientation(&budget) {
                shelves.push(Shelf::open(item));
                tracing::debug!(%item, row = shelves.len() - 1, "opened new row");
                continue;
            }

            tracing::debug!(%item, placed, total, "item does not fit");
            return PackReport {
                fits: false,
                placed,
                total,
                shelves,
            };
        }

        PackReport {
            fits: true,
            placed: total,
            total,
            shelves,
        }
    }

    fn first_fit(&self, shelves: &[Shelf], item: Rect) -> Option<usize> {
        shelves.iter().position(|shelf| {
            let space = shelf.remaining(self.bound);
            tracing::trace!(%item, %space, "probing row");
            fits(item, space) || fits(item.rotated(), space)
        })
    }

    fn remaining_width(&self, shelves: &[Shelf]) -> u32 {
        let used: u64 = shelves.iter().map(|s| s.row_width as u64).sum();
        (self.bound.width as u64).saturating_sub(used) as u32
    }
}

/// Largest area first. The sort is stable, so equal-area items keep the
/// order the caller listed them in.
fn sort_for_packing(items: &[Rect]) -> Vec<Rect> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|r| Reverse(r.area()));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRUCK: Rect = Rect {
        length: 600,
        width: 235,
    };
    const FRAME: Rect = Rect {
        length: 229,
        width: 108,
    };

    /// All orderings of `items`, via Heap's algorithm.
    fn permutations(items: &[Rect]) -> Vec<Vec<Rect>> {
        fn heap(k: usize, items: &mut Vec<Rect>, out: &mut Vec<Vec<Rect>>) {
            if k <= 1 {
                out.push(items.clone());
                return;
            }
            heap(k - 1, items, out);
            for i in 0..k - 1 {
                if k % 2 == 0 {
                    items.swap(i, k - 1);
                } else {
                    items.swap(0, k - 1);
                }
                heap(k - 1, items, out);
            }
        }
        let mut out = Vec::new();
        heap(items.len(), &mut items.to_vec(), &mut out);
        out
    }

    #[test]
    fn test_fits_predicate() {
        assert!(fits(Rect::new(229, 108), TRUCK));
        assert!(!fits(Rect::new(108, 300), TRUCK));
        assert!(fits(Rect::new(0, 0), Rect::new(0, 0)));
    }

    #[test]
    fn test_empty_list_packs() {
        assert!(can_pack(&[], TRUCK));
        assert!(can_pack(&[], Rect::new(1, 1)));
    }

    #[test]
    fn test_two_frames_fit() {
        assert!(can_pack(&[FRAME, FRAME], TRUCK));
    }

    #[test]
    fn test_three_frames_share_one_row() {
        // Each frame takes 108 along the row and 229 across it, so three
        // frames use 324 of 600 in a single 229-wide row.
        let report = ShelfPacker::new(TRUCK).run(&[FRAME, FRAME, FRAME]);
        assert!(report.fits);
        assert_eq!(report.shelves, vec![Shelf { occupied_length: 324, row_width: 229 }]);
    }

    #[test]
    fn test_six_frames_overflow() {
        // Five frames fill the row (540), a sixth row would need 229 more width.
        let report = ShelfPacker::new(TRUCK).run(&[FRAME; 6]);
        assert!(!report.fits);
        assert_eq!(report.placed, 5);
        assert_eq!(report.total, 6);
        assert_eq!(report.row_count(), 1);
    }

    #[test]
    fn test_oversized_item_fails_immediately() {
        let report = ShelfPacker::new(TRUCK).run(&[FRAME, Rect::new(700, 300)]);
        assert!(!report.fits);
        assert_eq!(report.placed, 0);
        assert_eq!(report.total, 2);
        assert!(report.shelves.is_empty());
    }

    #[test]
    fn test_smaller_items_placed_before_late_failure() {
        // 700x10 is smaller by area than a frame, so the frame is loaded first.
        let report = ShelfPacker::new(TRUCK).run(&[Rect::new(700, 10), FRAME]);
        assert!(!report.fits);
        assert_eq!(report.placed, 1);
        assert_eq!(report.row_count(), 1);
    }

    #[test]
    fn test_rotation_symmetry_single_item() {
        let cases = [
            (Rect::new(500, 200), TRUCK),
            (Rect::new(200, 500), TRUCK),
            (Rect::new(240, 240), TRUCK),
            (Rect::new(50, 100), Rect::new(100, 50)),
            (Rect::new(30, 700), TRUCK),
        ];
        for (item, bound) in cases {
            assert_eq!(
                can_pack(&[item], bound),
                can_pack(&[item.rotated()], bound),
                "{item} in {bound}"
            );
        }
    }

    #[test]
    fn test_bigger_bound_never_hurts() {
        let items = vec![
            FRAME,
            FRAME,
            Rect::new(141, 103),
            Rect::new(102, 79),
            Rect::new(102, 79),
            Rect::new(222, 29),
        ];
        assert!(can_pack(&items, TRUCK));
        for (dl, dw) in [(0, 0), (1, 0), (0, 1), (50, 50), (400, 0), (0, 400)] {
            let bigger = Rect::new(TRUCK.length + dl, TRUCK.width + dw);
            assert!(can_pack(&items, bigger), "failed at {bigger}");
        }
    }

    #[test]
    fn test_order_does_not_matter() {
        // Only one shape per area: 100x50 and 50x100 are the same footprint.
        let items = [
            Rect::new(100, 50),
            Rect::new(50, 100),
            Rect::new(25, 190),
            Rect::new(229, 108),
            Rect::new(70, 70),
        ];
        for bound in [TRUCK, Rect::new(250, 150), Rect::new(200, 120), Rect::new(120, 200)] {
            let expected = can_pack(&items, bound);
            for perm in permutations(&items) {
                assert_eq!(can_pack(&perm, bound), expected, "{perm:?} in {bound}");
            }
        }
    }

    #[test]
    fn test_largest_area_first() {
        let sorted = sort_for_packing(&[Rect::new(10, 10), Rect::new(229, 108), Rect::new(20, 20)]);
        assert_eq!(sorted, vec![Rect::new(229, 108), Rect::new(20, 20), Rect::new(10, 10)]);
    }

    #[test]
    fn test_equal_area_keeps_caller_order() {
        let sorted = sort_for_packing(&[Rect::new(50, 100), Rect::new(25, 200)]);
        assert_eq!(sorted, vec![Rect::new(50, 100), Rect::new(25, 200)]);
        let sorted = sort_for_packing(&[Rect::new(25, 200), Rect::new(50, 100)]);
        assert_eq!(sorted, vec![Rect::new(25, 200), Rect::new(50, 100)]);
    }

    #[test]
    fn test_equal_area_shapes_depend_on_order() {
        // Same area, different shapes: whichever comes first sets the row
        // width, so listing order changes the answer.
        let bound = Rect::new(206, 104);
        assert!(!can_pack(&[Rect::new(50, 100), Rect::new(25, 200)], bound));
        assert!(can_pack(&[Rect::new(25, 200), Rect::new(50, 100)], bound));
    }

    #[test]
    fn test_zero_sized_items_always_place() {
        let items = vec![Rect::new(0, 0); 10];
        assert!(can_pack(&items, TRUCK));
        assert!(can_pack(&items, Rect::new(0, 0)));
    }

    #[test]
    fn test_zero_width_item_still_needs_length() {
        // A zero side does not make an item fit: 700 is longer than the
        // truck in either orientation.
        assert!(!can_pack(&[Rect::new(0, 700)], TRUCK));
        assert!(can_pack(&[Rect::new(0, 600)], TRUCK));
    }

    #[test]
    fn test_rotated_fit_joins_existing_row() {
        // The second item only fits the row turned on its side.
        let report = ShelfPacker::new(Rect::new(300, 250)).run(&[Rect::new(250, 100); 2]);
        assert!(report.fits);
        assert_eq!(report.shelves, vec![Shelf { occupied_length: 200, row_width: 250 }]);
    }

    #[test]
    fn test_new_row_when_length_runs_out() {
        let report = ShelfPacker::new(Rect::new(300, 300)).run(&[Rect::new(120, 120); 3]);
        assert!(report.fits);
        assert_eq!(
            report.shelves,
            vec![
                Shelf { occupied_length: 240, row_width: 120 },
                Shelf { occupied_length: 120, row_width: 120 },
            ]
        );
        assert_eq!(report.used_width(), 240);
    }

    #[test]
    fn test_no_width_left_for_new_row() {
        let report = ShelfPacker::new(Rect::new(300, 250)).run(&[Rect::new(250, 120); 3]);
        assert!(!report.fits);
        assert_eq!(report.placed, 2);
    }

    #[test]
    fn test_row_growth_is_not_rechecked() {
        // Three squares fill row 0, the fourth opens row 1 with the last 100
        // of width. The thin item then lands in row 1 and widens it to 150,
        // leaving the rows 250 wide in total on a 200 wide truck.
        let mut items = vec![Rect::new(100, 100); 4];
        items.push(Rect::new(150, 10));
        let bound = Rect::new(300, 200);

        let report = ShelfPacker::new(bound).run(&items);
        assert!(report.fits);
        assert_eq!(
            report.shelves,
            vec![
                Shelf { occupied_length: 300, row_width: 100 },
                Shelf { occupied_length: 110, row_width: 150 },
            ]
        );
        assert!(report.used_width() > bound.width as u64);
    }
}
