/*  ************************************************************

    PayQR: QR Code encoder for payment payloads

    Copyright (C) 2011-2018 Henrik Kaare Poulsen

    Licensed under the Apache License, Version 2.0 (the "License");
    you may not use this file except in compliance with the License.
    You may obtain a copy of the License at

     http://www.apache.org/licenses/LICENSE-2.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.

    ************************************************************ */


//  ************************************************************
//! Data masks and the penalty score used to choose between them
//  ************************************************************

use super::symbol::Matrix;


//  ************************************************************

pub const N_MASKS: u8 = 8;

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;


//  ************************************************************
/// True if mask `m` inverts the module at (`row`, `col`)
//  ************************************************************

pub fn mask(m: u8, row: usize, col: usize) -> bool {
    debug_assert!(m < N_MASKS, "BAD MASK PATTERN: {}", m);
    let (i, j) = (row, col);
    match m {
        0 => (i + j) % 2 == 0,
        1 => i % 2 == 0,
        2 => j % 3 == 0,
        3 => (i + j) % 3 == 0,
        4 => (i / 2 + j / 3) % 2 == 0,
        5 => (i * j) % 2 + (i * j) % 3 == 0,
        6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
        7 => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
        _ => false,
    }
}


//  ************************************************************
/// Build one trial matrix per mask and return the best mask with its penalty
///
/// The lowest mask number wins a tie, also when the trials run in parallel.
//  ************************************************************

pub fn select_best<F>(build: F) -> (u8, f64)
where
    F: Fn(u8) -> Matrix + Sync,
{
    let penalties = trial_penalties(&build);
    let (best_mask, best_penalty) = first_minimum(&penalties);
    debug!("select_best: best_penalty={} best_mask={}", best_penalty, best_mask);
    (best_mask, best_penalty)
}

#[cfg(not(feature = "parallel"))]
fn trial_penalties<F>(build: &F) -> Vec<f64>
where
    F: Fn(u8) -> Matrix + Sync,
{
    (0..N_MASKS).map(|m| penalty_for(m, &build(m))).collect()
}

#[cfg(feature = "parallel")]
fn trial_penalties<F>(build: &F) -> Vec<f64>
where
    F: Fn(u8) -> Matrix + Sync,
{
    use rayon::prelude::*;
    (0..N_MASKS).into_par_iter().map(|m| penalty_for(m, &build(m))).collect()
}

fn penalty_for(m: u8, matrix: &Matrix) -> f64 {
    let p = penalty(matrix);
    trace!("penalty_for: mask={} penalty={}", m, p);
    p
}


//  ************************************************************
/// Index and value of the first strictly smallest penalty
//  ************************************************************

pub fn first_minimum(penalties: &[f64]) -> (u8, f64) {
    let mut best_penalty = f64::INFINITY;
    let mut best_mask = 0u8;
    for (m, &p) in penalties.iter().enumerate() {
        if p < best_penalty {
            best_penalty = p;
            best_mask = m as u8;
        }
    }
    (best_mask, best_penalty)
}


//  ************************************************************
/// Sum of the four rules; only the dark proportion rule is fractional
//  ************************************************************

pub fn penalty(matrix: &Matrix) -> f64 {
    let p_adjacent = penalty_adjacent(matrix);
    let p_blocks = penalty_blocks(matrix);
    let p_ratio = penalty_ratio(matrix);
    let p_dark = penalty_dark(matrix);
    let p_total = f64::from(p_adjacent + p_blocks + p_ratio) + p_dark;
    insane!(
        "penalty: p_adjacent={} p_blocks={} p_ratio={} p_dark={} p_total={}",
        p_adjacent,
        p_blocks,
        p_ratio,
        p_dark,
        p_total
    );
    p_total
}


//  ************************************************************
/// Calculate penalty for modules surrounded by their own color
///
/// # Feature:
/// Same colored modules among the 8 neighbours of a module
///
/// # Evaluation condition:
/// No. of same colored neighbours = (5 + i), i > 0
///
/// # Points:
/// N1 + i
//  ************************************************************

pub fn penalty_adjacent(matrix: &Matrix) -> u32 {
    let n = matrix.get_dim() as isize;
    let mut points = 0;
    for row in 0..n {
        for col in 0..n {
            let dark = matrix.is_dark(row as usize, col as usize);
            let mut same = 0;
            for r in row - 1..=row + 1 {
                for c in col - 1..=col + 1 {
                    if r < 0 || r >= n || c < 0 || c >= n || (r == row && c == col) {
                        continue;
                    }
                    if matrix.is_dark(r as usize, c as usize) == dark {
                        same += 1;
                    }
                }
            }
            if same > 5 {
                points += PENALTY_N1 + same - 5;
            }
        }
    }
    points
}


//  ************************************************************
/// Calculate penalty for block of modules in same color
///
/// # Feature:
/// Block of modules in same color
///
/// # Evaluation condition:
/// Every 2x2 window of one color, overlapping windows counted separately
///
/// # Points:
/// N2
//  ************************************************************

pub fn penalty_blocks(matrix: &Matrix) -> u32 {
    let n = matrix.get_dim();
    let mut p = 0;
    for row in 0..n.saturating_sub(1) {
        for col in 0..n - 1 {
            let b = [(0, 0), (1, 0), (0, 1), (1, 1)].iter().filter(|&&(r, c)| matrix.is_dark(row + r, col + c)).count();
            if (b == 0) || (b == 4) {
                p += PENALTY_N2;
            }
        }
    }
    p
}


//  ************************************************************
/// Calculate penalty for 1:1:3:1:1 ratio (dark:light:dark:light:dark) pattern in row/column
///
/// # Feature:
/// dark, light, dark, dark, dark, light, dark in 7 consecutive modules
///
/// # Evaluation condition:
/// Existence of the pattern, horizontally or vertically
///
/// # Points:
/// N3
//  ************************************************************

pub fn penalty_ratio(matrix: &Matrix) -> u32 {
    const PATTERN: [bool; 7] = [true, false, true, true, true, false, true];
    let n = matrix.get_dim();
    let mut points = 0;
    for i in 0..n {
        for j in 0..n.saturating_sub(6) {
            if (0..7).all(|k| matrix.is_dark(i, j + k) == PATTERN[k]) {
                insane!("penalty_ratio: row={} col={}", i, j);
                points += PENALTY_N3;
            }
            if (0..7).all(|k| matrix.is_dark(j + k, i) == PATTERN[k]) {
                insane!("penalty_ratio: col={} row={}", i, j);
                points += PENALTY_N3;
            }
        }
    }
    points
}


//  ************************************************************
/// Calculate penalty for proportion of dark modules in entire symbol
///
/// # Feature:
/// Proportion of dark modules in entire symbol
///
/// # Evaluation condition:
/// Deviation from 50% dark
///
/// # Points:
/// N4 per 5% of deviation, not rounded
//  ************************************************************

pub fn penalty_dark(matrix: &Matrix) -> f64 {
    let n = matrix.get_dim() as f64;
    if n == 0.0 {
        return 0.0;
    }
    let dark = matrix.n_dark() as f64;
    let ratio = ((100.0 * dark) / n / n - 50.0).abs() / 5.0;
    ratio * f64::from(PENALTY_N4)
}


//  ************************************************************
#[cfg(test)]
//  ************************************************************

mod mask {
    use super::*;

    fn filled(n: usize, dark: bool) -> Matrix {
        let mut m = Matrix::new(n);
        for row in 0..n {
            for col in 0..n {
                m.set(row, col, dark);
            }
        }
        m
    }

    fn checkerboard(n: usize) -> Matrix {
        let mut m = Matrix::new(n);
        for row in 0..n {
            for col in 0..n {
                m.set(row, col, (row + col) % 2 == 0);
            }
        }
        m
    }

    #[test]
    fn test_mask_functions() {
        assert!(mask(0, 0, 0));
        assert!(!mask(0, 0, 1));
        assert!(mask(1, 0, 5));
        assert!(!mask(1, 1, 0));
        assert!(mask(2, 5, 3));
        assert!(!mask(2, 3, 5));
        assert!(mask(3, 1, 2));
        assert!(mask(4, 2, 3));
        assert!(!mask(4, 2, 0));
        assert!(mask(5, 0, 7));
        assert!(!mask(5, 1, 1));
        assert!(mask(6, 2, 3));
        assert!(!mask(6, 3, 3));
        assert!(mask(7, 1, 3));
        assert!(!mask(7, 1, 1));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "BAD MASK PATTERN")]
    fn test_mask_out_of_range() {
        mask(N_MASKS, 0, 0);
    }

    #[test]
    fn test_masks_differ() {
        for a in 0..N_MASKS {
            for b in a + 1..N_MASKS {
                let differs = (0..12).any(|row| (0..12).any(|col| mask(a, row, col) != mask(b, row, col)));
                assert!(differs, "masks {} and {} are identical", a, b);
            }
        }
    }

    #[test]
    fn test_all_dark_5x5() {
        let m = filled(5, true);
        // only the 9 inner modules have 8 equal neighbours: 9 * (3 + 3)
        assert_eq!(penalty_adjacent(&m), 54);
        // 16 windows
        assert_eq!(penalty_blocks(&m), 48);
        assert_eq!(penalty_ratio(&m), 0);
        assert_eq!(penalty_dark(&m), 100.0);
        assert_eq!(penalty(&m), 202.0);
    }

    #[test]
    fn test_all_light_matches_all_dark() {
        assert_eq!(penalty(&filled(9, false)), penalty(&filled(9, true)));
    }

    #[test]
    fn test_unset_reads_light() {
        assert_eq!(penalty(&Matrix::new(9)), penalty(&filled(9, false)));
    }

    #[test]
    fn test_finder_like_row() {
        let mut m = filled(7, false);
        for (col, &dark) in [true, false, true, true, true, false, true].iter().enumerate() {
            m.set(0, col, dark);
        }
        assert_eq!(penalty_ratio(&m), 40);
        let mut t = filled(7, false);
        for (row, &dark) in [true, false, true, true, true, false, true].iter().enumerate() {
            t.set(row, 3, dark);
        }
        assert_eq!(penalty_ratio(&t), 40);
    }

    #[test]
    fn test_checkerboard_is_free() {
        let m = checkerboard(8);
        assert_eq!(penalty_adjacent(&m), 0);
        assert_eq!(penalty_blocks(&m), 0);
        assert_eq!(penalty_ratio(&m), 0);
        assert_eq!(penalty_dark(&m), 0.0);
    }

    #[test]
    fn test_dark_proportion_not_rounded() {
        // 25 of 49 dark: 51.02% gives 2.04 points
        let mut m = filled(7, false);
        for i in 0..25 {
            m.set(i / 7, i % 7, true);
        }
        let p = penalty_dark(&m);
        assert!((p - 2.040_816_326).abs() < 1e-6, "p_dark={}", p);
        // 26 of 49 dark: 6.12 points
        m.set(3, 4, true);
        assert!((penalty_dark(&m) - 6.122_448_979).abs() < 1e-6);
    }

    #[test]
    fn test_fraction_breaks_tie() {
        // 221 of 441 dark scores 0.23; one more dark module scores 0.68; both floor to 0
        let low = checkerboard(21);
        let mut high = checkerboard(21);
        high.set(0, 1, true);
        assert_eq!(penalty(&low) as u32, penalty(&high) as u32);
        assert!(penalty(&low) < penalty(&high));
        let (m, p) = select_best(|m| if m == 4 { low.clone() } else { high.clone() });
        assert_eq!(m, 4);
        assert!((p - 0.226_757).abs() < 1e-6, "p={}", p);
    }

    #[test]
    fn test_first_minimum_keeps_first_tie() {
        assert_eq!(first_minimum(&[5.0, 3.0, 3.0, 7.0]), (1, 3.0));
        assert_eq!(first_minimum(&[2.0; 8]), (0, 2.0));
        assert_eq!(first_minimum(&[9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0]), (7, 2.0));
        assert_eq!(first_minimum(&[1416.76, 1416.36, 1416.36]), (1, 1416.36));
    }

    #[test]
    fn test_select_best() {
        let (m, p) = select_best(|m| if m == 3 || m == 6 { checkerboard(8) } else { filled(8, true) });
        assert_eq!((m, p), (3, 0.0));
    }
}
