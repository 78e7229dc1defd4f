// aligner.rs - Affine-gap global alignment (Gotoh)

use crate::core::alphabet::GAP;
use crate::core::scoring::ScoringScheme;
use crate::error::{DivergenceError, Result};

/// One global alignment of two sequences.
///
/// Both rows always have the same length, and stripping [`GAP`] from a row
/// gives back the sequence it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub aligned1: Vec<u8>,
    pub aligned2: Vec<u8>,
    /// Alignment score, `None` for alignments built from pre-aligned rows
    pub score: Option<f64>,
}

impl Alignment {
    /// Wrap two pre-aligned rows, checking they have the same length
    pub fn from_aligned(aligned1: impl Into<Vec<u8>>, aligned2: impl Into<Vec<u8>>) -> Result<Self> {
        let aligned1 = aligned1.into();
        let aligned2 = aligned2.into();
        if aligned1.len() != aligned2.len() {
            return Err(DivergenceError::AlignmentLengthMismatch {
                left: aligned1.len(),
                right: aligned2.len(),
            });
        }
        Ok(Self { aligned1, aligned2, score: None })
    }

    pub fn len(&self) -> usize {
        self.aligned1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned1.is_empty()
    }

    /// Aligned column pairs, left to right
    pub fn columns(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.aligned1.iter().copied().zip(self.aligned2.iter().copied())
    }

    /// First row with gap symbols removed
    pub fn ungapped1(&self) -> Vec<u8> {
        self.aligned1.iter().copied().filter(|&b| b != GAP).collect()
    }

    /// Second row with gap symbols removed
    pub fn ungapped2(&self) -> Vec<u8> {
        self.aligned2.iter().copied().filter(|&b| b != GAP).collect()
    }

    /// Rows as strings, for reports
    pub fn rows(&self) -> (String, String) {
        (
            String::from_utf8_lossy(&self.aligned1).into_owned(),
            String::from_utf8_lossy(&self.aligned2).into_owned(),
        )
    }
}

/// DP state a cell value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// `M`: seq1[i-1] aligned against seq2[j-1]
    Match = 0,
    /// `X`: seq1[i-1] against a gap
    GapInSeq2 = 1,
    /// `Y`: seq2[j-1] against a gap
    GapInSeq1 = 2,
}

impl State {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            1 => State::GapInSeq2,
            2 => State::GapInSeq1,
            _ => State::Match,
        }
    }
}

// Pointer byte layout: bits 0-1 predecessor state of M, bit 2 set when X
// extends X, bit 3 set when Y extends Y.
const X_EXTENDS: u8 = 0b0100;
const Y_EXTENDS: u8 = 0b1000;

/// Traceback pointers, one byte per cell, row-major
struct TracebackMatrix {
    data: Vec<u8>,
    cols: usize,
}

impl TracebackMatrix {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0; rows * cols],
            cols,
        }
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, value: u8) {
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.cols + col]
    }
}

/// Pick the best of the three states, M over X over Y on ties
#[inline]
fn best_state(m: f64, x: f64, y: f64) -> (f64, State) {
    let mut best = (m, State::Match);
    if x > best.0 {
        best = (x, State::GapInSeq2);
    }
    if y > best.0 {
        best = (y, State::GapInSeq1);
    }
    best
}

/// Global aligner with affine gap penalties.
///
/// Scores are kept for two rows at a time; only the traceback pointers
/// are stored for the whole `(len1 + 1) x (len2 + 1)` grid.
#[derive(Debug, Clone)]
pub struct PairwiseAligner {
    scoring: ScoringScheme,
    max_cells: Option<usize>,
}

impl PairwiseAligner {
    pub fn new(scoring: ScoringScheme) -> Self {
        Self { scoring, max_cells: None }
    }

    /// Refuse alignments whose DP grid exceeds `limit` cells
    pub fn with_max_cells(mut self, limit: Option<usize>) -> Self {
        self.max_cells = limit;
        self
    }

    pub fn scoring(&self) -> &ScoringScheme {
        &self.scoring
    }

    pub fn max_cells(&self) -> Option<usize> {
        self.max_cells
    }

    /// Compute one optimal global alignment of `seq1` and `seq2`.
    ///
    /// When several paths reach the optimal score the traceback prefers the
    /// match state, then a gap in `seq2`, then a gap in `seq1`, so the
    /// result is deterministic for fixed inputs and scoring.
    pub fn align(&self, seq1: &[u8], seq2: &[u8]) -> Result<Alignment> {
        if seq1.is_empty() || seq2.is_empty() {
            return Err(DivergenceError::InvalidInput(format!(
                "cannot align empty sequence (lengths {} and {})",
                seq1.len(),
                seq2.len()
            )));
        }

        let rows = seq1.len() + 1;
        let cols = seq2.len() + 1;
        let cells = rows.checked_mul(cols).unwrap_or(usize::MAX);
        if let Some(limit) = self.max_cells {
            if cells > limit {
                return Err(DivergenceError::AlignmentTooLarge { cells, limit });
            }
        }

        let open = self.scoring.gap_open;
        let extend = self.scoring.gap_extend;
        let neg = f64::NEG_INFINITY;

        let mut trace = TracebackMatrix::new(rows, cols);

        let mut prev_m = vec![neg; cols];
        let mut prev_x = vec![neg; cols];
        let mut prev_y = vec![neg; cols];
        let mut cur_m = vec![neg; cols];
        let mut cur_x = vec![neg; cols];
        let mut cur_y = vec![neg; cols];

        for i in 0..rows {
            for j in 0..cols {
                let mut ptr = 0u8;

                let m = if i == 0 && j == 0 {
                    0.0
                } else if i > 0 && j > 0 {
                    let (best, from) = best_state(prev_m[j - 1], prev_x[j - 1], prev_y[j - 1]);
                    ptr |= from as u8;
                    best + self.scoring.substitution(seq1[i - 1], seq2[j - 1])
                } else {
                    neg
                };

                let x = if i > 0 {
                    let opened = prev_m[j] + open;
                    let extended = prev_x[j] + extend;
                    if extended > opened {
                        ptr |= X_EXTENDS;
                        extended
                    } else {
                        opened
                    }
                } else {
                    neg
                };

                let y = if j > 0 {
                    let opened = cur_m[j - 1] + open;
                    let extended = cur_y[j - 1] + extend;
                    if extended > opened {
                        ptr |= Y_EXTENDS;
                        extended
                    } else {
                        opened
                    }
                } else {
                    neg
                };

                cur_m[j] = m;
                cur_x[j] = x;
                cur_y[j] = y;
                trace.set(i, j, ptr);
            }
            std::mem::swap(&mut prev_m, &mut cur_m);
            std::mem::swap(&mut prev_x, &mut cur_x);
            std::mem::swap(&mut prev_y, &mut cur_y);
        }

        // After the final swap the last row lives in prev_*
        let last = cols - 1;
        let (score, state) = best_state(prev_m[last], prev_x[last], prev_y[last]);

        self.traceback(&trace, seq1, seq2, state, score)
    }

    fn traceback(
        &self,
        trace: &TracebackMatrix,
        seq1: &[u8],
        seq2: &[u8],
        mut state: State,
        score: f64,
    ) -> Result<Alignment> {
        let mut aligned1 = Vec::with_capacity(seq1.len() + seq2.len());
        let mut aligned2 = Vec::with_capacity(seq1.len() + seq2.len());
        let (mut i, mut j) = (seq1.len(), seq2.len());

        while i > 0 || j > 0 {
            let ptr = trace.get(i, j);
            match state {
                State::Match if i > 0 && j > 0 => {
                    aligned1.push(seq1[i - 1]);
                    aligned2.push(seq2[j - 1]);
                    state = State::from_bits(ptr);
                    i -= 1;
                    j -= 1;
                }
                State::GapInSeq2 if i > 0 => {
                    aligned1.push(seq1[i - 1]);
                    aligned2.push(GAP);
                    if ptr & X_EXTENDS == 0 {
                        state = State::Match;
                    }
                    i -= 1;
                }
                State::GapInSeq1 if j > 0 => {
                    aligned1.push(GAP);
                    aligned2.push(seq2[j - 1]);
                    if ptr & Y_EXTENDS == 0 {
                        state = State::Match;
                    }
                    j -= 1;
                }
                // Pointer walked off the grid; caught by the checks below
                _ => break,
            }
        }

        aligned1.reverse();
        aligned2.reverse();

        if i > 0 || j > 0 || aligned1.len() != aligned2.len() {
            return Err(DivergenceError::AlignmentLengthMismatch {
                left: aligned1.len() + i,
                right: aligned2.len() + j,
            });
        }

        Ok(Alignment {
            aligned1,
            aligned2,
            score: Some(score),
        })
    }
}

impl Default for PairwiseAligner {
    fn default() -> Self {
        Self::new(ScoringScheme::default())
    }
}

/// Align two sequences under `scoring` with no size limit
pub fn align(seq1: &[u8], seq2: &[u8], scoring: &ScoringScheme) -> Result<Alignment> {
    PairwiseAligner::new(scoring.clone()).align(seq1, seq2)
}
