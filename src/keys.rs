use crate::util::{rotate, search_left, Less};

/// Holds the state of a key buffer: a sorted run of distinct elements drifting rightwards through
/// the scanned region
struct Keys {
    /// Index of the leftmost key
    start: usize,

    /// Number of keys
    len: usize,
}

impl Keys {
    // Insert the element at `item` into the keys at index `index`, first rotating the keys up to
    // the immediate left of it.
    fn insert<T>(&mut self, v: &mut [T], item: usize, index: usize) {
        rotate(v, self.start, self.len, item - (self.start + self.len));
        self.start = item - self.len;

        rotate(v, self.start + index, self.len - index, 1);
        self.len += 1;
    }

    // Shift the keys leftwards so that they start at `dst`.
    fn shift<T>(&mut self, v: &mut [T], dst: usize) {
        rotate(v, dst, self.start - dst, self.len);
        self.start = dst;
    }
}

/// Scan `start..start + len` from the left to collect distinct keys, stopping at `ideal` keys.
///
/// The keys are gathered in ascending order into `start..start + found`, and all other scanned
/// elements follow them in their original relative order. Return `found`, which is less than
/// `ideal` when the region holds too few distinct values.
///
/// Costs `2 * len + ideal^2 / 2` moves in the worst case.
pub fn collect_keys<T, F: Less<T>>(
    v: &mut [T],
    start: usize,
    len: usize,
    ideal: usize,
    less: &mut F,
) -> usize {
    assert!(start + len <= v.len(), "key collection out of bounds");

    if len == 0 || ideal == 0 {
        return 0;
    }

    // The first element is always distinct from an empty set of keys
    let mut keys = Keys { start, len: 1 };

    for i in start + 1..start + len {
        if keys.len == ideal {
            break;
        }

        let pos = search_left(v, keys.start, keys.len, &v[i], less);

        // Everything before `pos` is less than the candidate, so it is a duplicate exactly when it
        // is not less than the key at `pos`
        if pos == keys.len || less(&v[i], &v[keys.start + pos]) {
            keys.insert(v, i, pos);
        }
    }

    keys.shift(v, start);
    keys.len
}
